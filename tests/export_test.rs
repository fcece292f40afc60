//! End-to-end export runs against a mock Web API

use std::{fs, path::Path};

use serde_json::{Value, json};
use spotify_xspf::{
    exporter::{ExportOptions, ExportWarning, Exporter},
    spotify::client::SpotifyClient,
};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Helper building a simplified playlist object of the listing
fn playlist(id: &str, name: &str, total: u64) -> Value {
    json!({ "id": id, "name": name, "tracks": { "total": total } })
}

// Helper building one page of playlist items with numbered tracks
fn track_page(total: u64, offset: u64, count: u64) -> Value {
    let items: Vec<Value> = (offset..offset + count)
        .map(|i| {
            json!({
                "added_at": "2024-01-01T00:00:00Z",
                "track": {
                    "name": format!("Song {i}"),
                    "artists": [{ "name": format!("Artist {i}") }],
                    "album": { "name": format!("Album {i}") }
                }
            })
        })
        .collect();
    json!({ "total": total, "items": items })
}

async fn mount_listing(server: &MockServer, playlists: Vec<Value>) {
    let total = playlists.len();
    Mock::given(method("GET"))
        .and(path("/v1/me/playlists"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "total": total, "items": playlists })),
        )
        .mount(server)
        .await;
}

async fn mount_tracks(server: &MockServer, playlist_id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/playlists/{playlist_id}/tracks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn xspf_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".xspf"))
        .collect();
    names.sort();
    names
}

fn read(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join(file)).unwrap()
}

#[tokio::test]
async fn test_export_writes_one_file_per_playlist() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_listing(
        &mock_server,
        vec![playlist("pA", "Road Trip!", 3), playlist("pB", "Empty One", 0)],
    )
    .await;
    mount_tracks(&mock_server, "pA", track_page(3, 0, 3)).await;
    mount_tracks(&mock_server, "pB", json!({ "total": 0, "items": [] })).await;

    let client = SpotifyClient::new(mock_server.uri(), "token");
    let mut exporter = Exporter::new(client, ExportOptions::new(output.path()));
    exporter.run().await.unwrap();

    assert_eq!(
        xspf_files(output.path()),
        vec!["Empty One.xspf", "Road Trip.xspf"]
    );

    let road_trip = read(output.path(), "Road Trip.xspf");
    assert_eq!(road_trip.matches("<track>").count(), 3);
    assert!(road_trip.contains("<track><creator>Artist 0</creator><title>Song 0</title></track>"));
    // Album is left out unless asked for
    assert!(!road_trip.contains("<album>"));

    let empty = read(output.path(), "Empty One.xspf");
    assert!(empty.contains("<trackList></trackList>"));

    let report = exporter.into_report();
    assert!(report.is_success());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.exported.len(), 2);
    assert_eq!(report.exported[0].tracks, 3);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn test_export_large_playlist_is_complete_with_warning() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_listing(&mock_server, vec![playlist("big", "Big", 150)]).await;
    for offset in [0u64, 50, 100] {
        Mock::given(method("GET"))
            .and(path("/v1/playlists/big/tracks"))
            .and(query_param("offset", offset.to_string()))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(track_page(150, offset, 50)))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = SpotifyClient::new(mock_server.uri(), "token");
    let mut options = ExportOptions::new(output.path());
    options.include_album = true;
    let mut exporter = Exporter::new(client, options);
    exporter.run().await.unwrap();

    let big = read(output.path(), "Big.xspf");
    assert_eq!(big.matches("<track>").count(), 150);
    assert!(big.contains("<title>Song 149</title>"));
    assert!(big.contains("<album>Album 0</album>"));

    let report = exporter.report();
    assert!(report.is_success());
    assert_eq!(
        report.warnings,
        vec![ExportWarning::OverSoftLimit {
            playlist: "Big".to_string(),
            file_name: "Big".to_string(),
            track_count: 150,
            limit: 100,
        }]
    );
}

#[tokio::test]
async fn test_export_warns_for_each_playlist_over_limit() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    // Same name and size, different playlists
    mount_listing(
        &mock_server,
        vec![playlist("a", "Mix", 3), playlist("b", "Mix", 3)],
    )
    .await;
    mount_tracks(&mock_server, "a", track_page(3, 0, 3)).await;
    mount_tracks(&mock_server, "b", track_page(3, 0, 3)).await;

    let client = SpotifyClient::new(mock_server.uri(), "token");
    let mut options = ExportOptions::new(output.path());
    options.song_limit = 2;
    let mut exporter = Exporter::new(client, options);
    exporter.run().await.unwrap();

    assert_eq!(xspf_files(output.path()), vec!["Mix (b).xspf", "Mix.xspf"]);

    let over_limit: Vec<_> = exporter
        .report()
        .warnings
        .iter()
        .filter(|w| matches!(w, ExportWarning::OverSoftLimit { .. }))
        .cloned()
        .collect();
    assert_eq!(
        over_limit,
        vec![
            ExportWarning::OverSoftLimit {
                playlist: "Mix".to_string(),
                file_name: "Mix".to_string(),
                track_count: 3,
                limit: 2,
            },
            ExportWarning::OverSoftLimit {
                playlist: "Mix".to_string(),
                file_name: "Mix (b)".to_string(),
                track_count: 3,
                limit: 2,
            },
        ]
    );
}

#[tokio::test]
async fn test_export_continues_after_write_failure() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    // A directory in the way of the first playlist's file
    fs::create_dir(output.path().join("Rock.xspf")).unwrap();

    mount_listing(
        &mock_server,
        vec![playlist("a", "Rock", 1), playlist("b", "Jazz", 1)],
    )
    .await;
    mount_tracks(&mock_server, "a", track_page(1, 0, 1)).await;
    mount_tracks(&mock_server, "b", track_page(1, 0, 1)).await;

    let client = SpotifyClient::new(mock_server.uri(), "token");
    let mut exporter = Exporter::new(client, ExportOptions::new(output.path()));
    exporter.run().await.unwrap();

    assert!(output.path().join("Rock.xspf").is_dir());
    assert!(read(output.path(), "Jazz.xspf").contains("<title>Song 0</title>"));

    let report = exporter.into_report();
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.exported.len(), 1);
    assert_eq!(report.exported[0].collection, "Jazz");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].collection, "playlist Rock (a)");
    assert!(report.failures[0].reason.contains("Rock.xspf"));
}

#[tokio::test]
async fn test_export_continues_after_failed_playlist() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_listing(
        &mock_server,
        vec![playlist("bad", "Broken", 5), playlist("good", "Works", 1)],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/bad/tracks"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "status": 500, "message": "Server error" }
        })))
        .mount(&mock_server)
        .await;
    mount_tracks(&mock_server, "good", track_page(1, 0, 1)).await;

    let client = SpotifyClient::new(mock_server.uri(), "token");
    let mut exporter = Exporter::new(client, ExportOptions::new(output.path()));
    exporter.run().await.unwrap();

    assert_eq!(xspf_files(output.path()), vec!["Works.xspf"]);

    let report = exporter.into_report();
    assert!(!report.is_success());
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].collection.contains("Broken"));
    assert!(report.failures[0].reason.contains("Server error"));
}

#[tokio::test]
async fn test_export_writes_partial_playlist_with_warning() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_listing(&mock_server, vec![playlist("half", "Half", 120)]).await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/half/tracks"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(track_page(120, 0, 50)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/half/tracks"))
        .and(query_param("offset", "50"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = SpotifyClient::new(mock_server.uri(), "token");
    let mut exporter = Exporter::new(client, ExportOptions::new(output.path()));
    exporter.run().await.unwrap();

    let half = read(output.path(), "Half.xspf");
    assert_eq!(half.matches("<track>").count(), 50);

    let report = exporter.into_report();
    assert!(report.is_success());
    assert!(report.warnings.iter().any(|w| matches!(
        w,
        ExportWarning::Incomplete { detail, .. } if detail.contains("received 50 of 120")
    )));
}

#[tokio::test]
async fn test_export_saved_tracks_and_name_collisions() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_listing(
        &mock_server,
        vec![
            playlist("p1", "Rock", 1),
            playlist("p2", "rock?", 1),
            playlist("p3", "SavedTracks", 1),
            playlist("p4", "★★★", 1),
        ],
    )
    .await;
    for id in ["p1", "p2", "p3", "p4"] {
        mount_tracks(&mock_server, id, track_page(1, 0, 1)).await;
    }
    Mock::given(method("GET"))
        .and(path("/v1/me/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(track_page(2, 0, 2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SpotifyClient::new(mock_server.uri(), "token");
    let mut options = ExportOptions::new(output.path());
    options.include_saved_tracks = true;
    let mut exporter = Exporter::new(client, options);
    exporter.run().await.unwrap();

    assert_eq!(
        xspf_files(output.path()),
        vec![
            "Rock.xspf",
            "SavedTracks (p3).xspf",
            "SavedTracks.xspf",
            "p4.xspf",
            "rock (p2).xspf",
        ]
    );
    assert_eq!(
        read(output.path(), "SavedTracks.xspf")
            .matches("<track>")
            .count(),
        2
    );

    let report = exporter.into_report();
    assert!(report.is_success());
    assert!(report.warnings.contains(&ExportWarning::NameCollision {
        playlist: "rock?".to_string(),
        file_name: "rock (p2)".to_string(),
    }));
    assert!(report.warnings.contains(&ExportWarning::NameCollision {
        playlist: "SavedTracks".to_string(),
        file_name: "SavedTracks (p3)".to_string(),
    }));
    assert!(report.warnings.contains(&ExportWarning::UnnamedPlaylist {
        playlist_id: "p4".to_string(),
        file_name: "p4".to_string(),
    }));
}

#[tokio::test]
async fn test_export_resumes_after_token_refresh() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_listing(
        &mock_server,
        vec![playlist("first", "First", 1), playlist("second", "Second", 1)],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/first/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(track_page(1, 0, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/second/tracks"))
        .and(header("authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "status": 401, "message": "The access token expired" }
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/second/tracks"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(track_page(1, 0, 1)))
        .mount(&mock_server)
        .await;

    let client = SpotifyClient::new(mock_server.uri(), "old");
    let mut exporter = Exporter::new(client, ExportOptions::new(output.path()));

    let err = exporter.run().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(xspf_files(output.path()), vec!["First.xspf"]);

    exporter.set_token("new");
    exporter.run().await.unwrap();

    // The first playlist is not fetched a second time
    assert_eq!(xspf_files(output.path()), vec!["First.xspf", "Second.xspf"]);
    let report = exporter.into_report();
    assert!(report.is_success());
    assert_eq!(report.exported.len(), 2);
}

#[tokio::test]
async fn test_export_listing_failure() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/me/playlists"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = SpotifyClient::new(mock_server.uri(), "token");
    let mut exporter = Exporter::new(client, ExportOptions::new(output.path()));
    exporter.run().await.unwrap();

    assert!(xspf_files(output.path()).is_empty());
    let report = exporter.into_report();
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.failures.len(), 1);
}

#[tokio::test]
async fn test_export_no_playlists() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_listing(&mock_server, Vec::new()).await;

    let client = SpotifyClient::new(mock_server.uri(), "token");
    let mut exporter = Exporter::new(client, ExportOptions::new(output.path()));
    exporter.run().await.unwrap();

    assert!(xspf_files(output.path()).is_empty());
    assert!(exporter.report().is_success());
}
