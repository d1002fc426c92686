//! External transcoder seam.
//!
//! Production builds shell out to ffmpeg; tests swap in a stub so the
//! pipeline can run without the binary installed.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::config::TranscoderSettings;
use crate::error::BuildError;

/// Turns any readable audio file into AAC in an M4A container.
pub trait Transcoder {
    /// Whether the transcoder can be invoked at all.
    fn is_available(&self) -> bool;

    /// Human-readable name used in error messages.
    fn name(&self) -> &str;

    /// Write `output` from `input`, replacing any existing file.
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), BuildError>;
}

/// ffmpeg invoked as a blocking child process.
///
/// Availability is probed once on construction and never re-checked.
pub struct Ffmpeg {
    program: String,
    resolved: Option<PathBuf>,
    codec: String,
    bitrate: String,
}

impl Ffmpeg {
    pub fn new(settings: &TranscoderSettings) -> Self {
        let resolved = which::which(&settings.program).ok();
        match &resolved {
            Some(path) => debug!("transcoder: using {}", path.display()),
            None => debug!("transcoder: {} not found on PATH", settings.program),
        }

        Self {
            program: settings.program.clone(),
            resolved,
            codec: settings.codec.clone(),
            bitrate: settings.bitrate.clone(),
        }
    }

    /// Arguments passed after the program name.
    pub fn args(&self, input: &Path, output: &Path) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = Vec::with_capacity(12);
        args.push("-y".into());
        args.push("-i".into());
        args.push(input.into());
        args.push("-vn".into());
        args.push("-c:a".into());
        args.push(self.codec.as_str().into());
        args.push("-b:a".into());
        args.push(self.bitrate.as_str().into());
        args.push("-movflags".into());
        args.push("+faststart".into());
        args.push(output.into());
        args
    }
}

impl Transcoder for Ffmpeg {
    fn is_available(&self) -> bool {
        self.resolved.is_some()
    }

    fn name(&self) -> &str {
        &self.program
    }

    fn transcode(&self, input: &Path, output: &Path) -> Result<(), BuildError> {
        let Some(program) = &self.resolved else {
            return Err(BuildError::TranscoderMissing {
                program: self.program.clone(),
                input: input.to_path_buf(),
            });
        };

        let status = Command::new(program)
            .args(self.args(input, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| BuildError::io(program, e))?;

        if !status.success() {
            return Err(BuildError::TranscodeFailed {
                program: self.program.clone(),
                input: input.to_path_buf(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}
