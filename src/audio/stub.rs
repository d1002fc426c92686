use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BuildError;

use super::Transcoder;

/// In-process transcoder that writes a marker file and records its calls.
pub struct StubTranscoder {
    available: bool,
    pub calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl StubTranscoder {
    pub const OUTPUT: &'static [u8] = b"stub-aac";

    pub fn available() -> Self {
        Self {
            available: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn missing() -> Self {
        Self {
            available: false,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Transcoder for StubTranscoder {
    fn is_available(&self) -> bool {
        self.available
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn transcode(&self, input: &Path, output: &Path) -> Result<(), BuildError> {
        self.calls
            .borrow_mut()
            .push((input.to_path_buf(), output.to_path_buf()));
        fs::write(output, Self::OUTPUT).map_err(|e| BuildError::io(output, e))
    }
}
