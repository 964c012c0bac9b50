use tabled::Table;

use crate::{
    cli::{sync::spinner, valid_token},
    config::Config,
    error,
    management::PlaylistSynchronizer,
    spotify::SpotifyCatalog,
    utils,
};

pub async fn list_playlists(config: &Config, search: Option<String>) {
    let token = valid_token(config).await;
    let synchronizer =
        PlaylistSynchronizer::new(SpotifyCatalog::new(&config.api_url, &token.access_token));

    let pb = spinner("Fetching playlists...");
    let result = synchronizer.list_current_user_playlists().await;
    pb.finish_and_clear();

    match result {
        Ok(mut playlists) => {
            if let Some(search) = search {
                let search_term = search.to_lowercase();
                playlists.retain(|p| p.name.to_lowercase().contains(&search_term));
            }
            println!("{}", Table::new(utils::playlist_table_rows(&playlists)));
        }
        Err(e) => error!("Failed to fetch playlists: {}", e),
    }
}
