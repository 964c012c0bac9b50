mod credential;
pub mod resolver;
mod session;
mod sync;
mod token;

pub use credential::CredentialStore;
pub use credential::FileCredentialStore;
pub use credential::MemoryCredentialStore;
pub use resolver::ResolvedPlaylists;
pub use resolver::resolve;
pub use session::PendingAuthorization;
pub use session::Session;
pub use session::SessionStore;
pub use sync::ExtractedTracks;
pub use sync::PlaylistSynchronizer;
pub use sync::extract_tracks;
pub use token::REFRESH_MARGIN_SECS;
pub use token::TokenManager;
pub use token::is_expired;
