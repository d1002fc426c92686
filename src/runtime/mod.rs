use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use log::{info, warn};

use crate::audio::{Ffmpeg, Transcoder};
use crate::cartridge::{Builder, list_cartridges};

mod cli;
mod settings;

/// Build every configured album and map the outcome to a process exit code.
///
/// Per-album failures are logged and turn the exit code to 1; only setup
/// problems (bad config, unwritable output root) return `Err`.
pub fn run() -> anyhow::Result<ExitCode> {
    let matches = cli::build_cli().get_matches();
    let overrides = cli::CliOverrides::from_matches(&matches);
    let settings = settings::load_settings(&overrides)?;

    let out_root = &settings.output.root;
    fs::create_dir_all(out_root)
        .with_context(|| format!("failed to create output root '{}'", out_root.display()))?;

    let transcoder = Ffmpeg::new(&settings.transcoder);
    if !transcoder.is_available() {
        warn!(
            "{} not found; albums that need conversion will fail",
            transcoder.name()
        );
    }

    let builder = Builder::new(
        out_root.clone(),
        settings.output.tracks_per_album,
        &transcoder,
    );
    let summary = builder.build_all(&settings.albums);

    match list_cartridges(out_root) {
        Ok(ids) => info!("archive {} holds: {}", out_root.display(), ids.join(", ")),
        Err(e) => warn!("could not list cartridges in {}: {e}", out_root.display()),
    }

    info!(
        "built {} of {} album(s)",
        summary.built.len(),
        settings.albums.len()
    );
    if summary.all_built() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
