//! Names of file-local types.
//!
//! A type declared `file` is emitted under a prefix that pins it to its
//! source file: `<{sanitized file name}>F{SHA-256 of the path, hex}__`.
//! Two files declaring the same file-local type never collide, and tools
//! can recover both the display file name and the checksum.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::GeneratedNameKind;

/// Length in bytes of a file path checksum.
pub const CHECKSUM_LEN: usize = 32;

const NO_CHECKSUM: &str = "<no checksum>";

#[allow(clippy::unwrap_used, reason = "the pattern is a literal")]
static FILE_TYPE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([a-zA-Z_0-9]*)>F([0-9A-F]{64})__").unwrap());

/// SHA-256 of the UTF-8 bytes of a file path.
pub fn file_path_checksum(file_path: &str) -> [u8; CHECKSUM_LEN] {
    Sha256::digest(file_path.as_bytes()).into()
}

/// Identity of the source file owning a file-local type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FileIdentifier {
    pub file_path: String,
    /// `None` when no checksum could be computed, e.g. for a file known only
    /// by display name.
    pub checksum: Option<[u8; CHECKSUM_LEN]>,
}

impl FileIdentifier {
    pub fn new(file_path: impl Into<String>) -> Self {
        let file_path = file_path.into();
        let checksum = Some(file_path_checksum(&file_path));
        FileIdentifier {
            file_path,
            checksum,
        }
    }

    /// Identifier recovered from metadata, where only the checksum survives.
    pub fn from_checksum(
        display_file_path: impl Into<String>,
        checksum: [u8; CHECKSUM_LEN],
    ) -> Self {
        FileIdentifier {
            file_path: display_file_path.into(),
            checksum: Some(checksum),
        }
    }

    pub fn metadata_name_prefix(&self) -> String {
        make_file_type_metadata_name_prefix(&self.file_path, self.checksum.as_ref())
    }
}

/// `<{file}>F{checksum hex}__`
///
/// The file name loses its directory and extension and every character
/// outside `[a-zA-Z0-9]` becomes `_`, one per UTF-16 unit. A missing
/// checksum is spelled `<no checksum>`, which the parser rejects.
pub fn make_file_type_metadata_name_prefix(
    file_path: &str,
    checksum: Option<&[u8; CHECKSUM_LEN]>,
) -> String {
    let mut out = String::with_capacity(file_path.len() + 2 * CHECKSUM_LEN + 5);
    out.push('<');
    for c in file_stem(file_path).chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.extend(std::iter::repeat_n('_', c.len_utf16()));
        }
    }
    out.push('>');
    out.push(GeneratedNameKind::FILE_TYPE.as_char());
    match checksum {
        Some(bytes) => {
            for byte in bytes {
                out.push(hex_digit(byte >> 4));
                out.push(hex_digit(byte & 0xF));
            }
        }
        None => out.push_str(NO_CHECKSUM),
    }
    out.push_str("__");
    out
}

/// Parts recovered from a file-local type name.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FileTypeName {
    pub display_file_name: String,
    pub checksum: [u8; CHECKSUM_LEN],
    /// Everything after the prefix, generic arity suffix included.
    pub original_type_name: String,
}

/// Split a file-local type name into file name, checksum and type name.
///
/// The prefix may appear anywhere in the name, e.g. after a namespace.
pub fn try_parse_file_type_name(generated_name: &str) -> Option<FileTypeName> {
    let captures = FILE_TYPE_NAME_PATTERN.captures(generated_name)?;
    let whole = captures.get(0)?;
    let display_file_name = captures.get(1)?.as_str().to_owned();
    let hex = captures.get(2)?.as_str().as_bytes();

    let mut checksum = [0u8; CHECKSUM_LEN];
    for (byte, pair) in checksum.iter_mut().zip(hex.chunks_exact(2)) {
        *byte = (hex_value(pair[0]) << 4) | hex_value(pair[1]);
    }

    Some(FileTypeName {
        display_file_name,
        checksum,
        original_type_name: generated_name[whole.end()..].to_owned(),
    })
}

/// File name without directory or extension. Both separators are honored
/// regardless of host.
fn file_stem(path: &str) -> &str {
    let name = path.rsplit(['/', '\\', ':']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}

fn hex_digit(nibble: u8) -> char {
    char::from(b"0123456789ABCDEF"[usize::from(nibble & 0xF)])
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'A'..=b'F' => digit - b'A' + 10,
        _ => unreachable!("checksum digit {digit:#x} passed the pattern"),
    }
}
