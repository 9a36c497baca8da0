//! Latin-1 file reading.
//!
//! Mod source files routinely carry extended bytes that are not valid
//! UTF-8. Latin-1 maps every byte to exactly one scalar value, so decoding
//! is total: no file can fail to decode, and no byte is rejected.

use std::fs;
use std::io;
use std::path::Path;

/// Reads a file and decodes it as Latin-1.
pub fn read_latin1(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode_latin1(&bytes))
}

/// Decodes bytes as Latin-1. Bytes 0x00-0xFF map to U+0000-U+00FF.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
