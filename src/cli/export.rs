use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, error,
    error::ExportError,
    exporter::{ExportOptions, ExportReport, Exporter},
    failed, info,
    management::TokenManager,
    spotify::client::SpotifyClient,
    success, warning,
};

pub async fn export(options: ExportOptions) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run spotify-xspf auth\n Error: {}",
                e
            );
        }
    };

    info!("Exporting to {}", options.output_dir.display());

    let token = token_mgr.get_valid_token().await;
    let client = SpotifyClient::new(config::spotify_apiurl(), token);

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let mut exporter = Exporter::new(client, options).with_progress(pb.clone());
    let mut result = exporter.run().await;

    // one refresh, then resume with whatever is left
    if let Err(ExportError::Unauthorized(reason)) = &result {
        pb.suspend(|| warning!("{}. Refreshing the token and resuming.", reason));
        match token_mgr.force_refresh().await {
            Ok(token) => {
                exporter.set_token(token);
                result = exporter.run().await;
            }
            Err(e) => {
                pb.finish_and_clear();
                error!(
                    "Failed to refresh token. Please run spotify-xspf auth\n Error: {}",
                    e
                );
            }
        }
    }

    pb.finish_and_clear();

    match result {
        Ok(()) => {}
        Err(e) if e.is_unauthorized() => {
            error!("{}\nPlease run spotify-xspf auth", e);
        }
        Err(e) => {
            error!("Export aborted: {}", e);
        }
    }

    let report = exporter.into_report();
    print_report(&report);

    if !report.is_success() {
        std::process::exit(report.exit_code());
    }
}

fn print_report(report: &ExportReport) {
    if !report.exported.is_empty() {
        println!("{}", Table::new(report.table_rows()));
    }

    if !report.warnings.is_empty() {
        warning!("{} warning(s) during export.", report.warnings.len());
    }

    if report.is_success() {
        success!(
            "Backup process completed. {} file(s) written.",
            report.exported.len()
        );
    } else {
        failed!(
            "{} collection(s) could not be exported.",
            report.failures.len()
        );
    }
}
