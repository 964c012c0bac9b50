//! Minimal Spotify Web API served on an ephemeral port.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use savedweekly::spotify::catalog::MAX_TRACKS_PER_REQUEST;
use serde_json::{Value, json};

/// Matches what `FakeProvider` issues for the code `granted`.
pub const TOKEN: &str = "access-granted";

#[derive(Clone, Default)]
pub struct MockSpotify {
    pub base: String,
    pub appended: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    pub created: Arc<Mutex<Vec<Value>>>,
}

fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == format!("Bearer {}", TOKEN) => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn me(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    Ok(Json(json!({ "id": "user-1", "display_name": "Test" })))
}

async fn my_playlists(
    State(mock): State<MockSpotify>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let page = match query.get("offset").map(String::as_str) {
        Some("2") => json!({
            "items": [{ "id": "dw", "name": "Discover Weekly" }],
            "next": null
        }),
        _ => json!({
            "items": [
                { "id": "p1", "name": "Road Trip" },
                null
            ],
            "next": format!("{}/v1/me/playlists?offset=2&limit=50", mock.base)
        }),
    };
    Ok(Json(page))
}

async fn create_playlist(
    State(mock): State<MockSpotify>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    authorized(&headers)?;
    assert_eq!(user_id, "user-1");
    mock.created.lock().unwrap().push(body.clone());
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": "sw", "name": body["name"] })),
    ))
}

async fn playlist_tracks(
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    if id != "dw" {
        return Err(StatusCode::NOT_FOUND);
    }

    let mut items: Vec<Value> = (0..3)
        .map(|n| {
            json!({
                "added_at": "2024-01-01T00:00:00Z",
                "track": {
                    "uri": format!("spotify:track:{}", n),
                    "name": format!("Song {}", n),
                    "artists": [{ "name": "Band" }, { "name": format!("Feat {}", n) }]
                }
            })
        })
        .collect();
    items.insert(1, json!({ "added_at": "2024-01-01T00:00:00Z", "track": null }));

    Ok(Json(json!({ "items": items, "next": null })))
}

async fn add_tracks(
    State(mock): State<MockSpotify>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    authorized(&headers)?;
    let uris: Vec<String> = serde_json::from_value(body["uris"].clone()).unwrap();
    if uris.len() > MAX_TRACKS_PER_REQUEST {
        return Err(StatusCode::BAD_REQUEST);
    }
    mock.appended.lock().unwrap().push((id, uris));
    Ok((StatusCode::CREATED, Json(json!({ "snapshot_id": "snap" }))))
}

pub async fn start() -> MockSpotify {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mock = MockSpotify {
        base: format!("http://{}", listener.local_addr().unwrap()),
        ..MockSpotify::default()
    };

    let app = Router::new()
        .route("/v1/me", get(me))
        .route("/v1/me/playlists", get(my_playlists))
        .route(
            "/v1/users/{user_id}/playlists",
            post(create_playlist),
        )
        .route(
            "/v1/playlists/{id}/tracks",
            get(playlist_tracks).post(add_tracks),
        )
        .with_state(mock.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    mock
}
