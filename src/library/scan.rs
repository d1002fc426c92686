use std::path::Path;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;
use walkdir::WalkDir;

use crate::error::BuildError;
use crate::naming::title_from_stem;

use super::model::{AlbumInfo, AlbumSource, TrackCandidate};

/// Extensions picked up from a plain album folder.
pub const SOURCE_EXTENSIONS: &[&str] = &["flac", "mp3", "m4a", "wav"];

fn year_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(19|20)\d{2}").expect("static regex"))
}

/// Lower-cased extension without the dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

fn is_audio_file(path: &Path) -> bool {
    let ext = extension_of(path);
    SOURCE_EXTENSIONS.iter().any(|e| *e == ext)
}

/// Recover artist, title and year from a folder named like
/// `Artist - Album (1999)`.
///
/// Only the first ` - ` splits; either side left blank keeps the fallback.
/// The year is the first `19xx`/`20xx` run anywhere in the name.
pub fn parse_folder_name(name: &str, fallback: &AlbumInfo) -> AlbumInfo {
    let mut info = fallback.clone();

    if let Some((artist, title)) = name.split_once(" - ") {
        if !artist.trim().is_empty() {
            info.artist = artist.trim().to_string();
        }
        if !title.trim().is_empty() {
            info.title = title.trim().to_string();
        }
    }

    if let Some(m) = year_token().find(name) {
        info.year = m.as_str().parse().ok();
    }

    info
}

/// List the audio files directly inside `dir` in byte-wise name order.
///
/// Subdirectories are not descended into. Entries that cannot be read,
/// such as dangling symlinks, are skipped.
pub fn scan_folder(dir: &Path, fallback: &AlbumInfo) -> Result<AlbumSource, BuildError> {
    if !dir.is_dir() {
        return Err(BuildError::SourceMissing(dir.to_path_buf()));
    }

    let folder_name = dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let info = parse_folder_name(folder_name, fallback);

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_audio_file(path) {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(BuildError::NoTracks(dir.to_path_buf()));
    }

    let tracks = files
        .into_iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            TrackCandidate {
                title: title_from_stem(stem, &info.artist, &info.title),
                extension: extension_of(&path),
                path,
            }
        })
        .collect();

    Ok(AlbumSource {
        root: dir.to_path_buf(),
        info,
        tracks,
    })
}
