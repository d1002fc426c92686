//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive an archive build (output
//! root, track limit, transcoder flags and the album-to-cartridge mapping)
//! and helpers to load them from disk and the environment.

mod load;
mod schema;

pub use load::resolve_config_path;
pub use schema::*;
