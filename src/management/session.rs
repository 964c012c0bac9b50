use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::{
    config,
    management::{MemoryCredentialStore, TokenManager},
    spotify::IdentityProvider,
    utils,
};

/// PKCE verifier and CSRF state of an authorization in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAuthorization {
    pub code_verifier: String,
    pub state: String,
}

/// Server-side state of one browser.
pub struct Session {
    tokens: TokenManager<MemoryCredentialStore>,
    pending: Mutex<Option<PendingAuthorization>>,
    /// Milliseconds since the owning store was created.
    last_seen: AtomicU64,
}

impl Session {
    fn new(provider: Arc<dyn IdentityProvider>, now: u64) -> Self {
        Self {
            tokens: TokenManager::new(MemoryCredentialStore::new(), provider),
            pending: Mutex::new(None),
            last_seen: AtomicU64::new(now),
        }
    }

    fn touch(&self, now: u64) {
        self.last_seen.fetch_max(now, Ordering::Relaxed);
    }

    fn last_seen(&self) -> u64 {
        self.last_seen.load(Ordering::Relaxed)
    }

    pub fn tokens(&self) -> &TokenManager<MemoryCredentialStore> {
        &self.tokens
    }

    pub async fn begin_authorization(&self, pending: PendingAuthorization) {
        *self.pending.lock().await = Some(pending);
    }

    /// Removes and returns the pending authorization; a second call yields `None`.
    pub async fn take_pending(&self) -> Option<PendingAuthorization> {
        self.pending.lock().await.take()
    }
}

/// Registry of live sessions keyed by opaque id.
///
/// Sessions idle for longer than the idle timeout are reclaimed, and the
/// registry never holds more than `max_sessions` entries; the least recently
/// seen session makes room for a new one.
pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    started: Instant,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self::with_limits(
            provider,
            Duration::from_secs(config::DEFAULT_SESSION_IDLE_SECS),
            config::DEFAULT_MAX_SESSIONS,
        )
    }

    pub fn with_limits(
        provider: Arc<dyn IdentityProvider>,
        idle_timeout: Duration,
        max_sessions: usize,
    ) -> Self {
        Self {
            provider,
            sessions: RwLock::new(HashMap::new()),
            started: Instant::now(),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    fn now(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn is_idle(&self, session: &Session, now: u64) -> bool {
        Duration::from_millis(now.saturating_sub(session.last_seen())) > self.idle_timeout
    }

    /// Returns the live session `id`, marking it as seen. An idle session is
    /// removed and reported as absent.
    pub async fn get(&self, id: &str) -> Option<Arc<Session>> {
        let now = self.now();
        let session = self.sessions.read().await.get(id).cloned()?;

        if self.is_idle(&session, now) {
            self.sessions.write().await.remove(id);
            debug!("dropped idle session");
            return None;
        }

        session.touch(now);
        Some(session)
    }

    pub async fn create(&self) -> (String, Arc<Session>) {
        let now = self.now();
        let id = utils::generate_session_id();
        let session = Arc::new(Session::new(Arc::clone(&self.provider), now));

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !self.is_idle(s, now));

        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, s)| s.last_seen())
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
        }

        let reclaimed = before - sessions.len();
        if reclaimed > 0 {
            debug!(reclaimed, "reclaimed sessions");
        }

        sessions.insert(id.clone(), Arc::clone(&session));
        (id, session)
    }

    /// Looks up `id`, creating a fresh session when it is absent, unknown or idle.
    pub async fn get_or_create(&self, id: Option<&str>) -> (String, Arc<Session>) {
        if let Some(id) = id {
            if let Some(session) = self.get(id).await {
                return (id.to_string(), session);
            }
        }
        self.create().await
    }

    pub async fn remove(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.write().await.remove(id)
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
