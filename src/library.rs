//! Album sources: reading a manifest or scanning a folder, then picking
//! which tracks go into the cartridge.

mod manifest;
mod model;
mod scan;
mod select;

pub use manifest::load_manifest;
pub use model::{AlbumInfo, AlbumSource, SelectedTrack, TrackCandidate};
pub use scan::scan_folder;
pub use select::select_tracks;

use crate::config::{AlbumSettings, SourceKind};
use crate::error::BuildError;

/// Resolve an album's configured source into ordered track candidates.
pub fn locate(album: &AlbumSettings) -> Result<AlbumSource, BuildError> {
    let root = album
        .source
        .as_deref()
        .ok_or_else(|| BuildError::SourceUnset(album.cartridge_id.clone()))?;

    let fallback = AlbumInfo {
        title: album.title.clone(),
        artist: album.artist.clone(),
        year: album.year,
    };

    match album.kind {
        SourceKind::Manifest => load_manifest(root, &fallback),
        SourceKind::Directory => scan_folder(root, &fallback),
    }
}

#[cfg(test)]
mod tests;
