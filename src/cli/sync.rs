use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli::valid_token,
    config::Config,
    error, info,
    management::{PlaylistSynchronizer, resolver::DESTINATION_PLAYLIST_NAME},
    spotify::SpotifyCatalog,
    success, utils, warning,
};

pub async fn sync(config: &Config) {
    let token = valid_token(config).await;
    let synchronizer =
        PlaylistSynchronizer::new(SpotifyCatalog::new(&config.api_url, &token.access_token));

    let pb = spinner("Saving Discover Weekly...");
    let result = synchronizer.sync_current_user().await;
    pb.finish_and_clear();

    match result {
        Ok(result) => {
            if result.created_destination {
                info!("Created playlist {}", DESTINATION_PLAYLIST_NAME);
            }
            if result.skipped_slots > 0 {
                warning!("Skipped {} unavailable tracks", result.skipped_slots);
            }

            println!(
                "{}",
                Table::new(utils::track_table_rows(&result.added_track_details))
            );
            success!(
                "Added {} songs to {}",
                result.added_track_details.len(),
                DESTINATION_PLAYLIST_NAME
            );
        }
        Err(e) if e.is_not_found() => error!("{}", e),
        Err(e) => error!("Failed to save Discover Weekly: {}", e),
    }
}

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
