//! Building cartridges: one album in, one `cartridges/<id>/` directory out.
//!
//! A build either finishes with a verified `playt.json` or stops at the
//! first error. Audio already written by a failed build is left on disk;
//! without a descriptor the cartridge does not count as built.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::audio::{Transcoder, materialize};
use crate::config::AlbumSettings;
use crate::error::BuildError;
use crate::library::{self, select_tracks};
use crate::playt::{
    AUDIO_DIR, PlaytDescriptor, PlaytTrack, audio_path, verify_cartridge, write_descriptor,
};

/// Directory under the output root that holds every cartridge.
pub const CARTRIDGES_DIR: &str = "cartridges";

/// Inputs shared by every album in a run.
pub struct Builder<'a> {
    out_root: PathBuf,
    tracks_per_album: i64,
    transcoder: &'a dyn Transcoder,
}

/// What happened to each configured album.
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub built: Vec<PlaytDescriptor>,
    pub failed: Vec<(String, BuildError)>,
}

impl BuildSummary {
    pub fn all_built(&self) -> bool {
        self.failed.is_empty()
    }
}

/// `<out_root>/cartridges/<id>`.
pub fn cartridge_root(out_root: &Path, cartridge_id: &str) -> PathBuf {
    out_root.join(CARTRIDGES_DIR).join(cartridge_id)
}

impl<'a> Builder<'a> {
    pub fn new(
        out_root: impl Into<PathBuf>,
        tracks_per_album: i64,
        transcoder: &'a dyn Transcoder,
    ) -> Self {
        Self {
            out_root: out_root.into(),
            tracks_per_album,
            transcoder,
        }
    }

    /// Build every album in order. A failure is reported on stderr
    /// whatever the log level, and does not stop the albums after it.
    pub fn build_all(&self, albums: &[AlbumSettings]) -> BuildSummary {
        let mut summary = BuildSummary::default();
        for album in albums {
            match self.build_album(album) {
                Ok(descriptor) => summary.built.push(descriptor),
                Err(e) => {
                    eprintln!("cartridge: {}: {e}", album.cartridge_id);
                    summary.failed.push((album.cartridge_id.clone(), e));
                }
            }
        }
        summary
    }

    /// Rebuild one cartridge from scratch.
    pub fn build_album(&self, album: &AlbumSettings) -> Result<PlaytDescriptor, BuildError> {
        info!("{}: building", album.cartridge_id);

        let source = library::locate(album)?;
        let selected = select_tracks(source.tracks, self.tracks_per_album);
        if selected.is_empty() {
            return Err(BuildError::NoTracks(source.root));
        }

        let root = cartridge_root(&self.out_root, &album.cartridge_id);
        reset_dir(&root)?;
        let audio_dir = root.join(AUDIO_DIR);
        fs::create_dir_all(&audio_dir).map_err(|e| BuildError::io(&audio_dir, e))?;

        let mut tracks = Vec::with_capacity(selected.len());
        for track in &selected {
            let done = materialize(track, &audio_dir, self.transcoder)?;
            info!(
                "{}: {:?} {}",
                album.cartridge_id,
                done.how,
                done.path.display()
            );
            tracks.push(PlaytTrack {
                number: track.number,
                title: track.candidate.title.clone(),
                path: audio_path(&done.file_name),
            });
        }

        let descriptor = PlaytDescriptor {
            cartridge_id: album.cartridge_id.clone(),
            title: source.info.title,
            artist: source.info.artist,
            year: source.info.year,
            tracks,
        };
        write_descriptor(&root, &descriptor)?;
        verify_cartridge(&root)?;

        info!(
            "{}: wrote {} track(s) to {}",
            album.cartridge_id,
            descriptor.tracks.len(),
            root.display()
        );
        Ok(descriptor)
    }
}

/// Remove whatever is at `root` so the cartridge is rebuilt from nothing.
fn reset_dir(root: &Path) -> Result<(), BuildError> {
    let result = if root.is_dir() {
        fs::remove_dir_all(root)
    } else if root.exists() {
        fs::remove_file(root)
    } else {
        Ok(())
    };
    result.map_err(|e| BuildError::io(root, e))
}

/// Sorted ids of the cartridge directories under `out_root`, hidden ones skipped.
pub fn list_cartridges(out_root: &Path) -> io::Result<Vec<String>> {
    let dir = out_root.join(CARTRIDGES_DIR);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut ids = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with('.') {
                ids.push(name.to_string());
            }
        }
    }
    ids.sort();
    Ok(ids)
}
