use std::path::PathBuf;

/// Album-level fields written into the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumInfo {
    pub title: String,
    pub artist: String,
    pub year: Option<u32>,
}

/// One discovered input file, before selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCandidate {
    /// Title as it should appear in the descriptor.
    pub title: String,
    pub path: PathBuf,
    /// Lower-cased extension without the dot; empty when the file has none.
    pub extension: String,
}

/// A candidate that made the cut, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedTrack {
    pub number: usize,
    pub candidate: TrackCandidate,
}

/// Everything read from an album's source, in track order.
#[derive(Debug, Clone)]
pub struct AlbumSource {
    pub root: PathBuf,
    pub info: AlbumInfo,
    pub tracks: Vec<TrackCandidate>,
}
