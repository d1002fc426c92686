use anyhow::{Context, anyhow};

use crate::config::{self, SourceKind};

use super::cli::CliOverrides;

/// Load settings, then apply command-line overrides on top.
///
/// Invalid configuration is a hard error: there is no sensible archive to
/// build from it.
pub fn load_settings(cli: &CliOverrides) -> anyhow::Result<config::Settings> {
    let config_path = cli.config.clone().or_else(config::resolve_config_path);
    let mut settings = config::Settings::load_from(config_path.as_deref()).with_context(|| {
        match &config_path {
            Some(p) => format!("failed to load config from '{}'", p.display()),
            None => "failed to load config".to_string(),
        }
    })?;

    apply_overrides(&mut settings, cli);
    settings
        .validate()
        .map_err(|msg| anyhow!("invalid config: {msg}"))?;
    Ok(settings)
}

/// `--manifest-src` / `--folder-src` set the source of the first album of that kind.
pub fn apply_overrides(settings: &mut config::Settings, cli: &CliOverrides) {
    if let Some(root) = &cli.out_root {
        settings.output.root = root.clone();
    }
    if let Some(n) = cli.tracks_per_album {
        settings.output.tracks_per_album = n;
    }

    let sources = [
        (SourceKind::Manifest, &cli.manifest_src),
        (SourceKind::Directory, &cli.folder_src),
    ];
    for (kind, src) in sources {
        let Some(src) = src else { continue };
        match settings.albums.iter_mut().find(|a| a.kind == kind) {
            Some(album) => album.source = Some(src.clone()),
            None => log::warn!(
                "no {kind:?} album configured; ignoring source '{}'",
                src.display()
            ),
        }
    }
}
