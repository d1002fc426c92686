//! Getting audio into a cartridge.
//!
//! `.m4a` and `.mp3` sources are copied byte for byte. Everything else is
//! handed to a [`Transcoder`] and comes out as AAC in M4A.

mod materialize;
mod transcoder;

pub use materialize::materialize;
pub use transcoder::{Ffmpeg, Transcoder};

#[cfg(test)]
pub mod stub;
