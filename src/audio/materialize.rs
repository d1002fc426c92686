use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::library::SelectedTrack;
use crate::naming::{destination_file_name, sanitize_filename};

use super::transcoder::Transcoder;

/// Extensions a cartridge can carry as-is.
pub const PASSTHROUGH_EXTENSIONS: &[&str] = &["m4a", "mp3"];

/// Extension of transcoded output.
pub const TRANSCODED_EXTENSION: &str = "m4a";

/// How a source file ends up in the cartridge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Materialization {
    Copied,
    Transcoded,
}

/// Result of materializing one track.
#[derive(Debug, Clone)]
pub struct MaterializedTrack {
    pub file_name: String,
    pub path: PathBuf,
    pub how: Materialization,
}

/// Whether a source with this (lower-case) extension is copied untouched.
pub fn is_passthrough(ext: &str) -> bool {
    PASSTHROUGH_EXTENSIONS.contains(&ext)
}

/// `NN - Title.ext` for a selected track.
pub fn destination_name(track: &SelectedTrack) -> String {
    let ext = &track.candidate.extension;
    let ext = if is_passthrough(ext) {
        ext.as_str()
    } else {
        TRANSCODED_EXTENSION
    };
    destination_file_name(track.number, &sanitize_filename(&track.candidate.title), ext)
}

/// Copy or transcode `track` into `audio_dir`.
pub fn materialize(
    track: &SelectedTrack,
    audio_dir: &Path,
    transcoder: &dyn Transcoder,
) -> Result<MaterializedTrack, BuildError> {
    fs::create_dir_all(audio_dir).map_err(|e| BuildError::io(audio_dir, e))?;

    let file_name = destination_name(track);
    let dest = audio_dir.join(&file_name);
    let src = &track.candidate.path;

    let how = if is_passthrough(&track.candidate.extension) {
        copy_audio(src, &dest)?;
        Materialization::Copied
    } else {
        if !transcoder.is_available() {
            return Err(BuildError::TranscoderMissing {
                program: transcoder.name().to_string(),
                input: src.clone(),
            });
        }
        transcoder.transcode(src, &dest)?;
        Materialization::Transcoded
    };

    Ok(MaterializedTrack {
        file_name,
        path: dest,
        how,
    })
}

/// Byte copy that also carries over the modification time.
fn copy_audio(src: &Path, dest: &Path) -> Result<(), BuildError> {
    fs::copy(src, dest).map_err(|e| BuildError::io(src, e))?;

    let modified = fs::metadata(src)
        .and_then(|m| m.modified())
        .map_err(|e| BuildError::io(src, e))?;
    fs::File::options()
        .write(true)
        .open(dest)
        .and_then(|f| f.set_modified(modified))
        .map_err(|e| BuildError::io(dest, e))?;
    Ok(())
}
