// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact header and footer structures.
//!
//! The header is 36 bytes of fixed-size fields, read before anything else.
//! It carries the n-gram range, the section lengths and the feature-space
//! fingerprint, so `inspect` can describe an artifact without decoding it.
//!
//! The footer is 8 bytes: a CRC32 over everything before it, plus the header
//! magic reversed ("YBJD"). A wrong footer means truncation or corruption.
//!
//! `SectionOffsets` is the only place that knows the section order. The
//! encoder and the decoder both go through it.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "DJBY" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x44, 0x4A, 0x42, 0x59];

/// Footer magic: "YBJD" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = [0x59, 0x42, 0x4A, 0x44];

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// LIMITS (reject hostile or garbage input before allocating)
// ============================================================================

/// Maximum artifact size: 256 MB
pub const MAX_FILE_SIZE: usize = 256 * 1024 * 1024;

/// Maximum vocabulary size
pub const MAX_TERM_COUNT: u32 = 20_000_000;

/// Maximum catalog size
pub const MAX_PRODUCT_COUNT: u32 = 10_000_000;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    /// Queries were NFC-normalized before cleaning when this was trained.
    pub const UNICODE_NFC: u8 = 0b0000_0001;

    pub fn new() -> Self {
        Self(0)
    }

    /// Flags describing how this build normalizes text.
    pub fn current() -> Self {
        if cfg!(feature = "unicode-normalization") {
            Self::new().with_unicode_nfc()
        } else {
            Self::new()
        }
    }

    pub fn with_unicode_nfc(mut self) -> Self {
        self.0 |= Self::UNICODE_NFC;
        self
    }

    pub fn unicode_nfc(self) -> bool {
        self.0 & Self::UNICODE_NFC != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Artifact header (36 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHeader {
    pub version: u8,
    pub flags: FormatFlags,
    pub ngram_min: u8,
    pub ngram_max: u8,
    pub vocab_count: u32,
    pub product_count: u32,
    pub vocab_len: u32,
    pub weights_len: u32,
    pub catalog_len: u32,
    /// Feature-space fingerprint shared by vocabulary and weights.
    pub fingerprint: u32,
}

impl ArtifactHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved)
    // + 1 + 1 (ngram range) + 2 (reserved) + 6*4 (u32s) = 36
    pub const SIZE: usize = 36;

    pub fn section_offsets(&self) -> SectionOffsets {
        SectionOffsets::from_header(self)
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version, self.flags.0])?;
        w.write_all(&[0u8; 2])?; // reserved
        w.write_all(&[self.ngram_min, self.ngram_max])?;
        w.write_all(&[0u8; 2])?; // reserved
        w.write_all(&self.vocab_count.to_le_bytes())?;
        w.write_all(&self.product_count.to_le_bytes())?;
        w.write_all(&self.vocab_len.to_le_bytes())?;
        w.write_all(&self.weights_len.to_le_bytes())?;
        w.write_all(&self.catalog_len.to_le_bytes())?;
        w.write_all(&self.fingerprint.to_le_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected DJBY, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 32]; // 36 - 4 (magic)
        r.read_exact(&mut buf)?;

        let u32_at = |i: usize| u32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);

        Ok(Self {
            version: buf[0],
            flags: FormatFlags(buf[1]),
            // buf[2..4] reserved
            ngram_min: buf[4],
            ngram_max: buf[5],
            // buf[6..8] reserved
            vocab_count: u32_at(8),
            product_count: u32_at(12),
            vocab_len: u32_at(16),
            weights_len: u32_at(20),
            catalog_len: u32_at(24),
            fingerprint: u32_at(28),
        })
    }
}

// ============================================================================
// SECTION OFFSETS
// ============================================================================

/// Section byte ranges within an artifact.
///
/// Layout order:
/// 1. HEADER      [36B]
/// 2. VOCABULARY  [vocab_len]   - n-grams and idf weights
/// 3. WEIGHTS     [weights_len] - intercept, coefficients, fingerprint
/// 4. CATALOG     [catalog_len] - product records
/// 5. FOOTER      [8B]          - CRC32 validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOffsets {
    pub vocabulary: (usize, usize),
    pub weights: (usize, usize),
    pub catalog: (usize, usize),
    pub footer: (usize, usize),
}

impl SectionOffsets {
    pub fn from_header(h: &ArtifactHeader) -> Self {
        let mut pos = ArtifactHeader::SIZE;

        let vocab_start = pos;
        pos += h.vocab_len as usize;
        let vocab_end = pos;

        let weights_start = pos;
        pos += h.weights_len as usize;
        let weights_end = pos;

        let catalog_start = pos;
        pos += h.catalog_len as usize;
        let catalog_end = pos;

        Self {
            vocabulary: (vocab_start, vocab_end),
            weights: (weights_start, weights_end),
            catalog: (catalog_start, catalog_end),
            footer: (pos, pos + ArtifactFooter::SIZE),
        }
    }

    /// Expected content size (everything before footer)
    pub fn content_size(&self) -> usize {
        self.footer.0
    }

    /// Total file size including footer
    pub fn total_size(&self) -> usize {
        self.footer.1
    }

    #[inline]
    pub fn slice<'a>(&self, bytes: &'a [u8], section: (usize, usize)) -> Option<&'a [u8]> {
        bytes.get(section.0..section.1)
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFooter {
    /// CRC32 of header + all sections (everything before footer)
    pub crc32: u32,
}

impl ArtifactFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "File too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected YBJD, got {:?}", magic),
            ));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
