//! Build script for the Spotify XSPF exporter.
//!
//! Copies the `.env.example` configuration template into the application's
//! local data directory so that users find it next to the `.env` file the
//! binary loads at startup.
//!
//! - Linux: `~/.local/share/spotify-xspf/.env.example`
//! - macOS: `~/Library/Application Support/spotify-xspf/.env.example`
//! - Windows: `%LOCALAPPDATA%/spotify-xspf/.env.example`

use std::{env, fs, path::PathBuf};

/// Copies the template, or emits a cargo warning if it is missing.
///
/// # Errors
///
/// Fails when `CARGO_MANIFEST_DIR` is unset or the data directory cannot be
/// created or written.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotify-xspf");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
