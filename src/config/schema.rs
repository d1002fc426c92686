use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings for an archive build, loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cartridge/config.toml` or `~/.config/cartridge/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags (applied by the runtime after loading)
/// 2) Environment variables (prefix `CARTRIDGE__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub transcoder: TranscoderSettings,
    pub albums: Vec<AlbumSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: OutputSettings::default(),
            transcoder: TranscoderSettings::default(),
            albums: vec![
                AlbumSettings {
                    cartridge_id: "BS1926-001".to_string(),
                    kind: SourceKind::Manifest,
                    source: None,
                    title: "Giants of Jazz: Bessie Smith".to_string(),
                    artist: "Smith, Bessie".to_string(),
                    year: Some(1923),
                },
                AlbumSettings {
                    cartridge_id: "SPELLS201x-001".to_string(),
                    kind: SourceKind::Directory,
                    source: None,
                    title: "The Night Has Eyes".to_string(),
                    artist: "The Spells".to_string(),
                    year: None,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Archive root; cartridges land in `<root>/cartridges/<id>/`.
    pub root: PathBuf,
    /// Maximum number of tracks copied per album.
    /// Zero or negative selects nothing, which fails the album.
    pub tracks_per_album: i64,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("TestAssets").join("TestPlaytArchive"),
            tracks_per_album: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscoderSettings {
    /// Executable looked up on `PATH` (or an explicit path).
    pub program: String,
    /// Audio codec passed as `-c:a`.
    pub codec: String,
    /// Target bitrate passed as `-b:a`.
    pub bitrate: String,
}

impl Default for TranscoderSettings {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            codec: "aac".to_string(),
            bitrate: "192k".to_string(),
        }
    }
}

/// Where an album's tracks come from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// A `playt.json` manifest listing tracks in order.
    #[serde(alias = "playt", alias = "json")]
    Manifest,
    /// A plain folder of audio files named `Artist - Title (Year)`.
    #[serde(alias = "folder", alias = "dir")]
    Directory,
}

/// One album to build, and the cartridge id it is written under.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumSettings {
    pub cartridge_id: String,
    pub kind: SourceKind,
    /// Source root. Albums without one fail with a missing-source error.
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// Fallback album title when the source does not provide one.
    #[serde(default)]
    pub title: String,
    /// Fallback album artist when the source does not provide one.
    #[serde(default)]
    pub artist: String,
    /// Fallback release year.
    #[serde(default)]
    pub year: Option<u32>,
}
