use super::manifest::MANIFEST_FILE;
use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn c(title: &str) -> TrackCandidate {
    TrackCandidate {
        title: title.into(),
        path: PathBuf::from(format!("/src/{title}.flac")),
        extension: "flac".into(),
    }
}

fn album(kind: SourceKind, source: Option<PathBuf>) -> AlbumSettings {
    AlbumSettings {
        cartridge_id: "TEST-001".into(),
        kind,
        source,
        title: "Fallback".into(),
        artist: "Nobody".into(),
        year: None,
    }
}

#[test]
fn select_tracks_truncates_and_preserves_order() {
    let selected = select_tracks(vec![c("a"), c("b"), c("c"), c("d")], 3);
    let titles: Vec<&str> = selected.iter().map(|s| s.candidate.title.as_str()).collect();
    assert_eq!(titles, ["a", "b", "c"]);
    let numbers: Vec<usize> = selected.iter().map(|s| s.number).collect();
    assert_eq!(numbers, [1, 2, 3]);
}

#[test]
fn select_tracks_returns_everything_when_list_is_short() {
    let selected = select_tracks(vec![c("b"), c("a")], 10);
    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0].candidate.title, "b");
    assert_eq!(selected[1].number, 2);
}

#[test]
fn select_tracks_with_non_positive_limit_is_empty() {
    assert!(select_tracks(vec![c("a")], 0).is_empty());
    assert!(select_tracks(vec![c("a")], -4).is_empty());
    assert!(select_tracks(Vec::new(), 3).is_empty());
}

#[test]
fn locate_without_source_is_an_error() {
    let err = locate(&album(SourceKind::Manifest, None)).unwrap_err();
    assert!(matches!(err, BuildError::SourceUnset(id) if id == "TEST-001"));
}

#[test]
fn locate_dispatches_on_kind() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("01 - One.mp3"), b"x").unwrap();
    fs::write(
        dir.path().join(MANIFEST_FILE),
        r#"{"tracks": [{"title": "From Manifest", "audio": "01 - One.mp3"}]}"#,
    )
    .unwrap();

    let from_manifest = locate(&album(SourceKind::Manifest, Some(dir.path().into()))).unwrap();
    assert_eq!(from_manifest.tracks[0].title, "From Manifest");
    assert_eq!(from_manifest.info.title, "Fallback");

    let from_folder = locate(&album(SourceKind::Directory, Some(dir.path().into()))).unwrap();
    assert_eq!(from_folder.tracks.len(), 1);
    assert_eq!(from_folder.tracks[0].title, "One");
}
