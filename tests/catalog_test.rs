mod common;

use axum::http::StatusCode;
use common::mock_api::{self, MockSpotify, TOKEN};
use savedweekly::{
    error::CatalogError,
    management::PlaylistSynchronizer,
    spotify::{CatalogClient, SpotifyCatalog},
};

fn catalog(mock: &MockSpotify, token: &str) -> SpotifyCatalog {
    SpotifyCatalog::new(&format!("{}/v1/", mock.base), token)
}

#[tokio::test]
async fn test_current_user_id() {
    let mock = mock_api::start().await;
    assert_eq!(catalog(&mock, TOKEN).current_user_id().await.unwrap(), "user-1");
}

#[tokio::test]
async fn test_unauthorized_is_status_error() {
    let mock = mock_api::start().await;
    let err = catalog(&mock, "wrong").current_user_id().await.unwrap_err();

    match err {
        CatalogError::Status { status, .. } => assert_eq!(status, StatusCode::UNAUTHORIZED),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_list_playlists_follows_next_and_drops_nulls() {
    let mock = mock_api::start().await;
    let playlists = catalog(&mock, TOKEN).list_playlists("user-1").await.unwrap();

    let names: Vec<&str> = playlists.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Road Trip", "Discover Weekly"]);
}

#[tokio::test]
async fn test_list_playlist_items_keeps_empty_slots() {
    let mock = mock_api::start().await;
    let slots = catalog(&mock, TOKEN).list_playlist_items("dw").await.unwrap();

    assert_eq!(slots.len(), 4);
    assert!(slots[1].is_none());
    let first = slots[0].as_ref().unwrap();
    assert_eq!(first.uri, "spotify:track:0");
    assert_eq!(first.artists, vec!["Band".to_string(), "Feat 0".to_string()]);
}

#[tokio::test]
async fn test_append_tracks_in_batches() {
    let mock = mock_api::start().await;
    let uris: Vec<String> = (0..250).map(|n| format!("spotify:track:{}", n)).collect();

    catalog(&mock, TOKEN).append_tracks("sw", &uris).await.unwrap();

    let appended = mock.appended.lock().unwrap().clone();
    let sizes: Vec<usize> = appended.iter().map(|(_, batch)| batch.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    let flattened: Vec<String> = appended.into_iter().flat_map(|(_, batch)| batch).collect();
    assert_eq!(flattened, uris);
}

#[tokio::test]
async fn test_sync_against_mock_api() {
    let mock = mock_api::start().await;
    let sync = PlaylistSynchronizer::new(catalog(&mock, TOKEN));

    let result = sync.sync_current_user().await.unwrap();

    assert!(result.created_destination);
    assert_eq!(result.skipped_slots, 1);
    assert_eq!(result.added_track_details.len(), 3);

    let created = mock.created.lock().unwrap().clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["name"], "Saved Weekly");
    assert_eq!(created[0]["public"], false);

    let appended = mock.appended.lock().unwrap().clone();
    assert_eq!(
        appended,
        vec![(
            "sw".to_string(),
            vec![
                "spotify:track:0".to_string(),
                "spotify:track:1".to_string(),
                "spotify:track:2".to_string(),
            ]
        )]
    );
}
