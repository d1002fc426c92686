//! The `playt.json` descriptor written at the root of every cartridge.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::error::BuildError;

/// Descriptor file name inside a cartridge directory.
pub const DESCRIPTOR_FILE: &str = "playt.json";

/// Subdirectory of a cartridge holding its audio.
pub const AUDIO_DIR: &str = "audio";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaytDescriptor {
    pub cartridge_id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    pub tracks: Vec<PlaytTrack>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaytTrack {
    pub number: usize,
    pub title: String,
    /// Forward-slash path relative to the cartridge root, e.g. `audio/01 - Intro.m4a`.
    pub path: String,
}

/// Relative descriptor path for a file in the cartridge's audio directory.
pub fn audio_path(file_name: &str) -> String {
    format!("{AUDIO_DIR}/{file_name}")
}

/// Pretty printer (2-space indent) that escapes everything outside ASCII.
struct AsciiPretty<'a> {
    inner: PrettyFormatter<'a>,
}

impl AsciiPretty<'_> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for AsciiPretty<'_> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object_value(writer)
    }
}

/// Serialize a descriptor the way it is stored on disk, trailing newline included.
pub fn to_json(descriptor: &PlaytDescriptor) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, AsciiPretty::new());
    descriptor.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `descriptor` to `<cartridge_root>/playt.json`, replacing any existing file.
pub fn write_descriptor(cartridge_root: &Path, descriptor: &PlaytDescriptor) -> Result<(), BuildError> {
    fs::create_dir_all(cartridge_root).map_err(|e| BuildError::io(cartridge_root, e))?;

    let path = cartridge_root.join(DESCRIPTOR_FILE);
    let bytes = to_json(descriptor).map_err(|e| BuildError::io(&path, e.into()))?;
    fs::write(&path, bytes).map_err(|e| BuildError::io(&path, e))
}

/// Read `<cartridge_root>/playt.json` back.
pub fn load_descriptor(cartridge_root: &Path) -> Result<PlaytDescriptor, BuildError> {
    let path = cartridge_root.join(DESCRIPTOR_FILE);
    let raw = fs::read_to_string(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BuildError::SourceMissing(path.clone()),
        _ => BuildError::io(&path, e),
    })?;
    serde_json::from_str(&raw).map_err(|source| BuildError::ManifestParse { path, source })
}

/// Check a relative media path the way a player resolving it would.
fn check_media_path(cartridge_root: &Path, relative: &str) -> Result<(), String> {
    let trimmed = relative.trim();
    if trimmed.is_empty() {
        return Err("empty media path".to_string());
    }
    if trimmed.starts_with('/') || trimmed.starts_with('~') || trimmed.contains('\\') {
        return Err(format!("media path '{relative}' is not relative"));
    }
    let rel = Path::new(trimmed);
    if rel.components().any(|c| !matches!(c, Component::Normal(_))) {
        return Err(format!("media path '{relative}' escapes the cartridge"));
    }
    if !cartridge_root.join(rel).is_file() {
        return Err(format!("media file '{relative}' is missing"));
    }
    Ok(())
}

/// Confirm a written cartridge is consistent with its descriptor.
///
/// Track numbers must run 1..=N in order and every path must name an
/// existing file inside the cartridge.
pub fn verify_cartridge(cartridge_root: &Path) -> Result<PlaytDescriptor, BuildError> {
    let descriptor = load_descriptor(cartridge_root)?;
    let fail = |reason: String| BuildError::Inconsistent {
        id: descriptor.cartridge_id.clone(),
        reason,
    };

    if descriptor.tracks.is_empty() {
        return Err(fail("no tracks".to_string()));
    }
    for (i, track) in descriptor.tracks.iter().enumerate() {
        if track.number != i + 1 {
            return Err(fail(format!(
                "track {} is numbered {}",
                i + 1,
                track.number
            )));
        }
        check_media_path(cartridge_root, &track.path).map_err(fail)?;
    }
    Ok(descriptor)
}
