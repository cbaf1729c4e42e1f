//! Header constants and structure

/// Magic bytes identifying a container
pub const MAGIC: &[u8; 4] = b"BARE";

/// Header size in bytes (magic + structural region offset)
pub const HEADER_SIZE: usize = 8;

/// Every array starts on a multiple of this many bytes
pub const ALIGNMENT: usize = 4;

/// Reserved root key carrying the key-shape tree
pub const KEYS_FIELD: &str = "__keys";

/// Deepest container nesting in the structural region, descriptors included.
///
/// serde_json refuses to parse input nested 128 levels or more.
pub const MAX_NESTING: usize = 127;

/// Conventional file extension for containers
pub const FILE_EXTENSION: &str = "bm";

/// Parsed fixed header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Byte offset where the structural region begins
    pub structure_offset: u32,
}

impl Header {
    pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[..4].copy_from_slice(MAGIC);
        bytes[4..].copy_from_slice(&self.structure_offset.to_be_bytes());
        bytes
    }
}

/// Round `n` up to the next multiple of [`ALIGNMENT`]
pub fn align_up(n: usize) -> usize {
    n.div_ceil(ALIGNMENT) * ALIGNMENT
}
