use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotify_xspf::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Export playlists as XSPF files
    Export(ExportArgs),

    /// Show the exported fields of a single track
    Track(TrackArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Directory the .xspf files are written to
    #[clap(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Items per request (1-50)
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    page_size: Option<u32>,

    /// Warn about playlists with more tracks than this
    #[clap(long)]
    song_limit: Option<u64>,

    /// Also export the saved tracks to SavedTracks.xspf
    #[clap(long)]
    saved_tracks: bool,

    /// Write an <album> element for every track
    #[clap(long)]
    include_album: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackArgs {
    /// Track id, spotify:track URI or open.spotify.com link
    id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Export(args) => {
            let mut options = config::export_options();
            if let Some(dir) = args.output_dir {
                options.output_dir = dir;
            }
            if let Some(page_size) = args.page_size {
                options.page_size = page_size;
            }
            if let Some(limit) = args.song_limit {
                options.song_limit = limit;
            }
            options.include_saved_tracks |= args.saved_tracks;
            options.include_album |= args.include_album;

            cli::export(options).await
        }
        Command::Track(args) => cli::track(args.id).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
