// Rule archive format: header parsing, validation

use crate::FarError;

/// Archive header magic constants (little-endian).
const COOKIE1: u32 = 0x4D52_4721;
const COOKIE2: u32 = 0x0001_A4C5;

/// Size of the archive header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Size of the fixed-width block that follows each rule name.
pub const RULE_HEADER_SIZE: usize = 16;

/// Parsed archive header.
///
/// The header occupies the first 16 bytes of an archive:
/// - bytes 0..4: cookie1 (magic number)
/// - bytes 4..8: cookie2 (magic number)
/// - bytes 8..12: number of rules in the archive
/// - bytes 12..16: reserved (written as zero, ignored on read)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    /// Number of rules that follow the header.
    pub rule_count: u32,
}

/// Fixed-width block preceding each rule's state and arc tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleHeader {
    pub start: u32,
    pub state_count: u32,
    pub arc_count: u32,
}

/// Parses and validates the 16-byte archive header.
///
/// Archives are always stored little-endian; there is no byte-swap detection.
pub fn parse_header(data: &[u8]) -> Result<ArchiveHeader, FarError> {
    if data.len() < HEADER_SIZE {
        return Err(FarError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    let cookie1 = read_u32(data, 0);
    let cookie2 = read_u32(data, 4);

    if cookie1 != COOKIE1 || cookie2 != COOKIE2 {
        return Err(FarError::InvalidMagic);
    }

    Ok(ArchiveHeader {
        rule_count: read_u32(data, 8),
    })
}

/// Serialize an archive header.
pub fn write_header(out: &mut Vec<u8>, header: &ArchiveHeader) {
    out.extend_from_slice(&COOKIE1.to_le_bytes());
    out.extend_from_slice(&COOKIE2.to_le_bytes());
    out.extend_from_slice(&header.rule_count.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
}

/// Parse the per-rule block at `offset`.
pub fn parse_rule_header(data: &[u8], offset: usize) -> Result<RuleHeader, FarError> {
    if offset + RULE_HEADER_SIZE > data.len() {
        return Err(FarError::TooShort {
            expected: offset + RULE_HEADER_SIZE,
            actual: data.len(),
        });
    }
    Ok(RuleHeader {
        start: read_u32(data, offset),
        state_count: read_u32(data, offset + 4),
        arc_count: read_u32(data, offset + 8),
    })
}

/// Serialize the per-rule block.
pub fn write_rule_header(out: &mut Vec<u8>, header: &RuleHeader) {
    out.extend_from_slice(&header.start.to_le_bytes());
    out.extend_from_slice(&header.state_count.to_le_bytes());
    out.extend_from_slice(&header.arc_count.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
}

/// Round `offset` up to the next multiple of 4.
#[inline]
pub fn align4(offset: usize) -> usize {
    let partial = offset % 4;
    if partial > 0 { offset + (4 - partial) } else { offset }
}

#[inline]
fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}
