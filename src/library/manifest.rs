use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::BuildError;

use super::model::{AlbumInfo, AlbumSource, TrackCandidate};
use super::scan::extension_of;

/// File name of the manifest inside a manifest-kind source root.
pub const MANIFEST_FILE: &str = "playt.json";

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    album: ManifestAlbum,
    #[serde(default)]
    tracks: Vec<ManifestTrack>,
}

#[derive(Debug, Default, Deserialize)]
struct ManifestAlbum {
    title: Option<String>,
    artist: Option<String>,
    year: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ManifestTrack {
    title: Option<String>,
    /// Path relative to the source root.
    audio: String,
}

/// Read `<root>/playt.json` into an [`AlbumSource`].
///
/// Album fields missing from the manifest take their value from `fallback`.
/// Tracks keep the manifest's order; a track without a title is called
/// `Track N` after its 1-based position.
pub fn load_manifest(root: &Path, fallback: &AlbumInfo) -> Result<AlbumSource, BuildError> {
    let path = root.join(MANIFEST_FILE);
    let raw = fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => BuildError::SourceMissing(path.clone()),
        _ => BuildError::io(&path, e),
    })?;

    let manifest: Manifest = serde_json::from_str(&raw).map_err(|source| {
        BuildError::ManifestParse {
            path: path.clone(),
            source,
        }
    })?;

    let info = AlbumInfo {
        title: manifest.album.title.unwrap_or_else(|| fallback.title.clone()),
        artist: manifest
            .album
            .artist
            .unwrap_or_else(|| fallback.artist.clone()),
        year: manifest.album.year.or(fallback.year),
    };

    let tracks = manifest
        .tracks
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            let path = root.join(&t.audio);
            TrackCandidate {
                title: t.title.unwrap_or_else(|| format!("Track {}", i + 1)),
                extension: extension_of(&path),
                path,
            }
        })
        .collect();

    Ok(AlbumSource {
        root: root.to_path_buf(),
        info,
        tracks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fallback() -> AlbumInfo {
        AlbumInfo {
            title: "Fallback Title".into(),
            artist: "Fallback Artist".into(),
            year: Some(1923),
        }
    }

    #[test]
    fn load_manifest_keeps_declared_order_and_album_fields() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{
                "album": {"title": "Empty Bed Blues", "artist": "Bessie Smith", "year": 1928},
                "tracks": [
                    {"title": "Intro", "audio": "media/01.FLAC"},
                    {"title": "Second Song", "audio": "media/02.mp3"},
                    {"audio": "media/03.wav"}
                ]
            }"#,
        )
        .unwrap();

        let source = load_manifest(dir.path(), &fallback()).unwrap();
        assert_eq!(source.info.title, "Empty Bed Blues");
        assert_eq!(source.info.artist, "Bessie Smith");
        assert_eq!(source.info.year, Some(1928));

        let titles: Vec<&str> = source.tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Intro", "Second Song", "Track 3"]);
        assert_eq!(source.tracks[0].extension, "flac");
        assert_eq!(source.tracks[0].path, dir.path().join("media/01.FLAC"));
        assert_eq!(source.tracks[1].extension, "mp3");
    }

    #[test]
    fn load_manifest_falls_back_for_missing_album_fields() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"album": {"artist": "Someone"}, "tracks": []}"#,
        )
        .unwrap();

        let source = load_manifest(dir.path(), &fallback()).unwrap();
        assert_eq!(source.info.title, "Fallback Title");
        assert_eq!(source.info.artist, "Someone");
        assert_eq!(source.info.year, Some(1923));
        assert!(source.tracks.is_empty());
    }

    #[test]
    fn load_manifest_reports_missing_file_as_source_missing() {
        let dir = tempdir().unwrap();
        let err = load_manifest(dir.path(), &fallback()).unwrap_err();
        assert!(matches!(err, BuildError::SourceMissing(p) if p.ends_with(MANIFEST_FILE)));
    }

    #[test]
    fn load_manifest_reports_invalid_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "{ not json").unwrap();
        let err = load_manifest(dir.path(), &fallback()).unwrap_err();
        assert!(matches!(err, BuildError::ManifestParse { .. }));
    }
}
