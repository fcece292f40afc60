use std::{
    collections::{HashMap, HashSet},
    fmt,
    path::PathBuf,
};

use indicatif::ProgressBar;

use crate::{
    error::ExportError,
    failed, info,
    management::PlaylistFileManager,
    spotify::{
        client::{MAX_PAGE_SIZE, SpotifyClient},
        library,
        normalize::playlist_summary,
        pagination::Paginated,
        playlists,
    },
    success,
    types::{ExportTableRow, PlaylistSummary, Track},
    utils::FileNameRegistry,
    warning, xspf,
};

/// Fixed base name of the saved tracks export.
pub const SAVED_TRACKS_FILE_NAME: &str = "SavedTracks";

/// Playlists with more declared tracks than this are exported in full but
/// reported with a warning.
pub const DEFAULT_SONG_LIMIT: u64 = 100;

const PLAYLISTS_COLLECTION: &str = "playlist listing";
const SAVED_TRACKS_COLLECTION: &str = "saved tracks";

/// Settings of one export run.
///
/// Built from the environment by [`crate::config::export_options`] and
/// adjusted by the flags of the `export` command.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory the `.xspf` files are written to. Created if missing.
    pub output_dir: PathBuf,
    /// Items per request, clamped to `1..=50` by the client.
    pub page_size: u32,
    /// Declared track count above which a playlist is reported with a warning.
    pub song_limit: u64,
    /// Whether the saved tracks are exported to `SavedTracks.xspf`.
    pub include_saved_tracks: bool,
    /// Whether tracks carry an `<album>` element.
    pub include_album: bool,
}

impl ExportOptions {
    /// Default options writing to `output_dir`: full pages, a soft limit of
    /// [`DEFAULT_SONG_LIMIT`], no saved tracks and no albums.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            page_size: MAX_PAGE_SIZE,
            song_limit: DEFAULT_SONG_LIMIT,
            include_saved_tracks: false,
            include_album: false,
        }
    }
}

/// Something worth telling the user that did not stop a file from being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportWarning {
    OverSoftLimit {
        playlist: String,
        file_name: String,
        track_count: u64,
        limit: u64,
    },
    Incomplete {
        collection: String,
        detail: String,
    },
    NameCollision {
        playlist: String,
        file_name: String,
    },
    UnnamedPlaylist {
        playlist_id: String,
        file_name: String,
    },
    SkippedItem {
        collection: String,
        detail: String,
    },
}

impl ExportWarning {
    fn is_about(&self, name: &str) -> bool {
        match self {
            ExportWarning::Incomplete { collection, .. }
            | ExportWarning::SkippedItem { collection, .. } => collection == name,
            _ => false,
        }
    }
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportWarning::OverSoftLimit {
                playlist,
                file_name,
                track_count,
                limit,
            } => write!(
                f,
                "Backed up playlist over the limit of {limit} tracks: {playlist} ({track_count} tracks) to {file_name}.xspf"
            ),
            ExportWarning::Incomplete { collection, detail } => {
                write!(f, "Incomplete export of {collection}: {detail}")
            }
            ExportWarning::NameCollision {
                playlist,
                file_name,
            } => write!(
                f,
                "File name of playlist {playlist} is already taken, writing {file_name}.xspf instead"
            ),
            ExportWarning::UnnamedPlaylist {
                playlist_id,
                file_name,
            } => write!(
                f,
                "Name of playlist {playlist_id} has no usable characters, writing {file_name}.xspf"
            ),
            ExportWarning::SkippedItem { collection, detail } => {
                write!(f, "Skipped an entry of {collection}: {detail}")
            }
        }
    }
}

/// A collection that could not be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    pub collection: String,
    pub reason: String,
}

impl fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unable to export {}: {}", self.collection, self.reason)
    }
}

/// A file written by the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub collection: String,
    pub path: PathBuf,
    pub tracks: usize,
}

/// Outcome of an export run.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub exported: Vec<ExportedFile>,
    pub warnings: Vec<ExportWarning>,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    /// Whether no failure was recorded. Warnings do not count.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Process exit status for the run: 0 when every collection was exported.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    /// One summary table row per written file, in export order.
    pub fn table_rows(&self) -> Vec<ExportTableRow> {
        self.exported
            .iter()
            .map(|file| ExportTableRow {
                name: file.collection.clone(),
                tracks: file.tracks,
                file: file.path.display().to_string(),
            })
            .collect()
    }
}

/// Exports the user's playlists, and optionally the saved tracks, to XSPF files.
///
/// Every collection is exported on its own: a failure is recorded in the
/// [`ExportReport`] and the run moves on. The only error that stops
/// [`Exporter::run`] is [`ExportError::Unauthorized`]. The exporter remembers
/// what it already finished, so after installing a fresh token with
/// [`Exporter::set_token`] calling `run` again resumes with the remaining work.
pub struct Exporter {
    client: SpotifyClient,
    options: ExportOptions,
    files: PlaylistFileManager,
    names: FileNameRegistry,
    assigned: HashMap<String, String>,
    completed: HashSet<String>,
    saved_tracks_done: bool,
    report: ExportReport,
    progress: ProgressBar,
}

impl Exporter {
    /// Creates an exporter. `SavedTracks` is reserved right away when the
    /// saved tracks are part of the run, so no playlist can take that name.
    pub fn new(client: SpotifyClient, options: ExportOptions) -> Self {
        let mut names = FileNameRegistry::new();
        if options.include_saved_tracks {
            names.reserve(SAVED_TRACKS_FILE_NAME);
        }

        Self {
            client,
            files: PlaylistFileManager::new(options.output_dir.clone()),
            options,
            names,
            assigned: HashMap::new(),
            completed: HashSet::new(),
            saved_tracks_done: false,
            report: ExportReport::default(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Shows progress on `progress` instead of a hidden spinner.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Installs a refreshed access token for the next [`Exporter::run`].
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.client.set_token(token);
    }

    pub fn report(&self) -> &ExportReport {
        &self.report
    }

    pub fn into_report(self) -> ExportReport {
        self.report
    }

    /// Runs the export: saved tracks first (if enabled), then every playlist.
    pub async fn run(&mut self) -> Result<(), ExportError> {
        if self.options.include_saved_tracks && !self.saved_tracks_done {
            self.export_saved_tracks().await?;
            self.saved_tracks_done = true;
        }

        let playlists = self.list_playlists().await?;
        let listing_failed = self
            .report
            .failures
            .iter()
            .any(|f| f.collection == PLAYLISTS_COLLECTION);
        if playlists.is_empty() && !listing_failed {
            self.progress
                .suspend(|| info!("No playlists found to back up."));
        }

        for playlist in playlists {
            if self.completed.contains(&playlist.id) {
                continue;
            }
            self.export_playlist(&playlist).await?;
            self.completed.insert(playlist.id);
        }

        Ok(())
    }

    /// Enumerates the user's playlists.
    pub async fn list_playlists(&mut self) -> Result<Vec<PlaylistSummary>, ExportError> {
        self.progress.set_message("Fetching playlists...");
        let listing = playlists::get_my_playlists(&self.client, self.options.page_size).await?;

        if !self.check_collection(PLAYLISTS_COLLECTION, &listing) {
            return Ok(Vec::new());
        }

        let mut summaries = Vec::with_capacity(listing.items.len());
        for (index, raw) in listing.items.iter().enumerate() {
            match playlist_summary(raw) {
                Some(summary) => summaries.push(summary),
                None => self.warn(ExportWarning::SkippedItem {
                    collection: PLAYLISTS_COLLECTION.to_string(),
                    detail: format!("entry {index} has no playlist id"),
                }),
            }
        }

        self.progress
            .suspend(|| info!("Collected {} playlists.", summaries.len()));
        Ok(summaries)
    }

    /// Fetches, renders and writes one playlist.
    ///
    /// A playlist that cannot be fetched at all or cannot be written is
    /// recorded as a failure; a partial one is written and recorded as a
    /// warning. Only [`ExportError::Unauthorized`] is returned as an error.
    pub async fn export_playlist(&mut self, playlist: &PlaylistSummary) -> Result<(), ExportError> {
        let file_name = self.file_name_for(playlist);
        let collection = format!("playlist {} ({})", playlist.name, playlist.id);

        self.progress
            .set_message(format!("Exporting playlist {}...", playlist.name));
        let tracks =
            playlists::get_playlist_tracks(&self.client, &playlist.id, self.options.page_size)
                .await?;

        if !self.check_collection(&collection, &tracks) {
            return Ok(());
        }

        let written = self
            .write_document(&playlist.name, &collection, &file_name, &tracks.items)
            .await;

        if written && playlist.track_count > self.options.song_limit {
            self.warn(ExportWarning::OverSoftLimit {
                playlist: playlist.name.clone(),
                file_name: file_name.clone(),
                track_count: playlist.track_count,
                limit: self.options.song_limit,
            });
        }

        Ok(())
    }

    /// Exports the user's saved tracks to [`SAVED_TRACKS_FILE_NAME`].
    /// Failures are recorded the same way as for playlists.
    pub async fn export_saved_tracks(&mut self) -> Result<(), ExportError> {
        self.progress.set_message("Exporting saved tracks...");
        let tracks = library::get_saved_tracks(&self.client, self.options.page_size).await?;

        if !self.check_collection(SAVED_TRACKS_COLLECTION, &tracks) {
            return Ok(());
        }

        self.write_document(
            SAVED_TRACKS_FILE_NAME,
            SAVED_TRACKS_COLLECTION,
            SAVED_TRACKS_FILE_NAME,
            &tracks.items,
        )
        .await;

        Ok(())
    }

    /// Records a failure if nothing could be fetched or a warning if the
    /// collection is partial. Returns whether there is something to write.
    fn check_collection<T>(&mut self, collection: &str, paginated: &Paginated<T>) -> bool {
        let Some(detail) = paginated.discrepancy() else {
            return true;
        };

        if paginated.is_available() {
            self.warn(ExportWarning::Incomplete {
                collection: collection.to_string(),
                detail,
            });
            true
        } else {
            self.fail(collection, detail);
            false
        }
    }

    async fn write_document(
        &mut self,
        display_name: &str,
        collection: &str,
        file_name: &str,
        tracks: &[Track],
    ) -> bool {
        let document = xspf::render(tracks, self.options.include_album);

        match self.files.persist(file_name, &document).await {
            Ok(path) => {
                self.progress.suspend(|| {
                    success!(
                        "Wrote {} ({} tracks) to file {}.",
                        display_name,
                        tracks.len(),
                        path.display()
                    )
                });
                self.report.exported.push(ExportedFile {
                    collection: display_name.to_string(),
                    path,
                    tracks: tracks.len(),
                });
                true
            }
            Err(e) => {
                self.fail(collection, e.to_string());
                false
            }
        }
    }

    fn file_name_for(&mut self, playlist: &PlaylistSummary) -> String {
        if let Some(name) = self.assigned.get(&playlist.id) {
            return name.clone();
        }

        let assigned = self.names.assign(&playlist.name, &playlist.id);
        if assigned.is_unnamed() {
            self.warn(ExportWarning::UnnamedPlaylist {
                playlist_id: playlist.id.clone(),
                file_name: assigned.name.clone(),
            });
        } else if assigned.is_renamed() {
            self.warn(ExportWarning::NameCollision {
                playlist: playlist.name.clone(),
                file_name: assigned.name.clone(),
            });
        }

        self.assigned
            .insert(playlist.id.clone(), assigned.name.clone());
        assigned.name
    }

    fn warn(&mut self, warning: ExportWarning) {
        // the listing is fetched again when a run resumes
        if warning.is_about(PLAYLISTS_COLLECTION) && self.report.warnings.contains(&warning) {
            return;
        }
        self.progress.suspend(|| warning!("{}", warning));
        self.report.warnings.push(warning);
    }

    fn fail(&mut self, collection: &str, reason: String) {
        let failure = ExportFailure {
            collection: collection.to_string(),
            reason,
        };
        if failure.collection == PLAYLISTS_COLLECTION && self.report.failures.contains(&failure) {
            return;
        }
        self.progress.suspend(|| failed!("{}", failure));
        self.report.failures.push(failure);
    }
}
