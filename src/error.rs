use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a single album build.
///
/// None of these are fatal to the process: the runtime logs them and moves
/// on to the next album.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The album has no source configured, or the configured one is missing.
    #[error("source missing: {}", .0.display())]
    SourceMissing(PathBuf),

    /// The album has no source path at all.
    #[error("no source configured for cartridge '{0}'")]
    SourceUnset(String),

    /// The manifest exists but is not a valid `playt.json`.
    #[error("failed to parse manifest '{}': {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Nothing left to build after filtering and truncation.
    #[error("no tracks found in {}", .0.display())]
    NoTracks(PathBuf),

    /// A source needs transcoding but the transcoder is not installed.
    #[error("{program} not found; cannot convert '{}'", .input.display())]
    TranscoderMissing { program: String, input: PathBuf },

    /// The transcoder ran but reported failure.
    #[error("{program} failed on '{}' ({status})", .input.display())]
    TranscodeFailed {
        program: String,
        input: PathBuf,
        status: String,
    },

    /// A written descriptor does not describe the cartridge on disk.
    #[error("cartridge '{id}' is inconsistent: {reason}")]
    Inconsistent { id: String, reason: String },

    /// Filesystem failure on the given path.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
