use serde_json::Value;

use crate::{
    error::ExportError,
    spotify::{
        client::SpotifyClient,
        normalize::normalize_item,
        pagination::{Paginated, collect_all},
    },
    types::Track,
};

pub const MY_PLAYLISTS_PATH: &str = "/v1/me/playlists";

pub fn playlist_tracks_path(playlist_id: &str) -> String {
    format!("/v1/playlists/{playlist_id}/tracks")
}

/// Retrieves all playlists of the current user as raw simplified playlist
/// objects, in the order Spotify lists them.
pub async fn get_my_playlists(
    client: &SpotifyClient,
    page_size: u32,
) -> Result<Paginated<Value>, ExportError> {
    collect_all(
        move |limit, offset| client.fetch_page(MY_PLAYLISTS_PATH, limit, offset),
        page_size,
    )
    .await
}

/// Retrieves and normalizes every track of a playlist.
pub async fn get_playlist_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
    page_size: u32,
) -> Result<Paginated<Track>, ExportError> {
    let path = playlist_tracks_path(playlist_id);
    let path = path.as_str();

    let items = collect_all(
        move |limit, offset| client.fetch_page(path, limit, offset),
        page_size,
    )
    .await?;

    Ok(items.map(|item| normalize_item(&item)))
}
