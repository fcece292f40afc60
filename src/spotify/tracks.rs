use crate::{
    error::ExportError,
    spotify::{
        client::{Fetch, SpotifyClient},
        normalize::normalize_track,
    },
    types::Track,
};

/// Looks up a single track by its Spotify id.
pub async fn get_track(client: &SpotifyClient, track_id: &str) -> Result<Fetch<Track>, ExportError> {
    let path = format!("/v1/tracks/{track_id}");
    let fetched = client.fetch_resource(&path).await?;
    Ok(fetched.map(|json| normalize_track(&json)))
}
