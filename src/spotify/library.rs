use crate::{
    error::ExportError,
    spotify::{
        client::SpotifyClient,
        normalize::normalize_item,
        pagination::{Paginated, collect_all},
    },
    types::Track,
};

pub const SAVED_TRACKS_PATH: &str = "/v1/me/tracks";

/// Retrieves and normalizes the tracks saved in the user's library.
pub async fn get_saved_tracks(
    client: &SpotifyClient,
    page_size: u32,
) -> Result<Paginated<Track>, ExportError> {
    let items = collect_all(
        move |limit, offset| client.fetch_page(SAVED_TRACKS_PATH, limit, offset),
        page_size,
    )
    .await?;

    Ok(items.map(|item| normalize_item(&item)))
}
