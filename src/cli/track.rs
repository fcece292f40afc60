use tabled::Table;

use crate::{
    config, error,
    management::TokenManager,
    spotify::{self, client::SpotifyClient},
    types::TrackTableRow,
    utils, warning,
};

pub async fn track(track: String) {
    let track_id = match utils::parse_track_id(&track) {
        Some(id) => id,
        None => error!("Not a Spotify track id, URI or link: {}", track),
    };

    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run spotify-xspf auth\n Error: {}",
                e
            );
        }
    };

    let client = SpotifyClient::new(config::spotify_apiurl(), token_mgr.get_valid_token().await);

    match spotify::tracks::get_track(&client, &track_id).await {
        Ok(Ok(track)) => println!("{}", Table::new(vec![TrackTableRow::from(&track)])),
        Ok(Err(failure)) => warning!("Unable to fetch track details for {}. {}", track_id, failure),
        Err(e) => error!("{}\nPlease run spotify-xspf auth", e),
    }
}
