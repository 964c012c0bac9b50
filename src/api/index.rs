use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;
use tracing::warn;

use crate::api::AppState;

const INDEX_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Saved Weekly</title>
</head>
<body>
  <h1>Saved Weekly</h1>
  <p>Copy this week's Discover Weekly into your Saved Weekly playlist.</p>
  <button id="save">Save Discover Weekly</button>
  <a href="/logout">Log out</a>
  <p id="status"></p>
  <ul id="songs"></ul>
  <h2>Your playlists</h2>
  <ul id="playlists"></ul>
  <script>
    const status = document.getElementById("status");
    const songs = document.getElementById("songs");

    document.getElementById("save").addEventListener("click", async () => {
      status.textContent = "Saving...";
      songs.innerHTML = "";
      const res = await fetch("/saveDiscoverWeekly", { method: "POST" });
      const body = await res.json();
      if (!res.ok) {
        status.textContent = body.error;
        return;
      }
      status.textContent = body.message;
      for (const song of body.added_songs) {
        const li = document.createElement("li");
        li.textContent = song.name + " - " + song.artists.join(", ");
        songs.appendChild(li);
      }
    });

    fetch("/get_playlists")
      .then((res) => res.json())
      .then((playlists) => {
        if (!Array.isArray(playlists)) return;
        const list = document.getElementById("playlists");
        for (const playlist of playlists) {
          const li = document.createElement("li");
          li.textContent = playlist.name;
          list.appendChild(li);
        }
      });
  </script>
</body>
</html>
"#;

pub async fn index(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let Some(session) = state.current_session(&jar).await else {
        return Redirect::to("/login").into_response();
    };

    match session.tokens().is_signed_in().await {
        Ok(true) => Html(INDEX_PAGE).into_response(),
        Ok(false) => Redirect::to("/login").into_response(),
        Err(e) => {
            warn!(error = %e, "failed to read session credentials");
            Redirect::to("/login").into_response()
        }
    }
}
