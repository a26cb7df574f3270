// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for trained djibly artifacts.
//!
//! One file holds everything a search needs: the fitted n-gram vocabulary,
//! the scorer weights and the catalog. They are written together and checked
//! together, so a loader can never pair weights with the wrong vocabulary.
//!
//! # Validation
//!
//! Artifacts are parsed as untrusted input:
//! - Size fields are checked against `MAX_*` limits and the actual file size
//! - Every decoder bounds-checks before slicing
//! - The CRC32 footer catches truncation and bit flips
//! - The vocabulary, the weights and the header must agree on the
//!   feature-space fingerprint
//!
//! # Format Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (36 bytes)                                          │
//! │   magic: [u8; 4] = "DJBY"                                  │
//! │   version: u8 = 1, flags: u8, reserved: [u8; 2]            │
//! │   ngram_min: u8, ngram_max: u8, reserved: [u8; 2]          │
//! │   vocab_count: u32, product_count: u32                     │
//! │   vocab_len: u32, weights_len: u32, catalog_len: u32       │
//! │   fingerprint: u32                                         │
//! ├────────────────────────────────────────────────────────────┤
//! │ 1. VOCABULARY  varint n, n × (string, f64 idf)             │
//! ├────────────────────────────────────────────────────────────┤
//! │ 2. WEIGHTS     f64 intercept, varint n, n × f64, u32 fp    │
//! ├────────────────────────────────────────────────────────────┤
//! │ 3. CATALOG     varint n, n × (id, name, category,          │
//! │                               description, f64 price)      │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "YBJD"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod encoding;
mod header;

pub use encoding::{
    decode_catalog, decode_string, decode_varint, decode_vocabulary, decode_weights,
    encode_catalog, encode_string, encode_varint, encode_vocabulary, encode_weights,
    WeightsSection,
};
pub use header::{
    ArtifactFooter, ArtifactHeader, FormatFlags, SectionOffsets, FOOTER_MAGIC, MAGIC,
    MAX_FILE_SIZE, MAX_PRODUCT_COUNT, MAX_TERM_COUNT, VERSION,
};

use std::io;

use crate::pipeline::TrainedPipeline;
use crate::types::ProductRecord;

/// Decoded artifact sections, not yet checked for semantic coherence.
///
/// [`crate::store::load`] turns this into a [`TrainedPipeline`].
#[derive(Debug, Clone)]
pub struct ArtifactContents {
    pub header: ArtifactHeader,
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
    pub weights: WeightsSection,
    pub products: Vec<ProductRecord>,
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

fn section_len(len: usize, name: &str) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| invalid(format!("{} section too large: {} bytes", name, len)))
}

fn extract_section<'a>(
    bytes: &'a [u8],
    offsets: &SectionOffsets,
    section: (usize, usize),
    name: &str,
) -> io::Result<&'a [u8]> {
    offsets.slice(bytes, section).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("{} section truncated", name),
        )
    })
}

fn exact(used: usize, section: &[u8], name: &str) -> io::Result<()> {
    if used == section.len() {
        Ok(())
    } else {
        Err(invalid(format!(
            "{} section has {} trailing bytes",
            name,
            section.len() - used
        )))
    }
}

/// Serialize a pipeline to artifact bytes.
pub fn encode(pipeline: &TrainedPipeline) -> io::Result<Vec<u8>> {
    let vectorizer = pipeline.vectorizer();
    let model = pipeline.model();
    let products = pipeline.catalog().products();

    let mut vocab_bytes = Vec::new();
    encode_vocabulary(vectorizer.vocabulary(), vectorizer.idf(), &mut vocab_bytes);

    let mut weights_bytes = Vec::with_capacity(8 + 10 + model.weights().len() * 8 + 4);
    encode_weights(
        model.intercept(),
        model.weights(),
        model.feature_fingerprint(),
        &mut weights_bytes,
    );

    let mut catalog_bytes = Vec::new();
    encode_catalog(products, &mut catalog_bytes);

    let (ngram_min, ngram_max) = vectorizer.ngram_range();
    let header = ArtifactHeader {
        version: VERSION,
        flags: FormatFlags::current(),
        ngram_min: u8::try_from(ngram_min).map_err(|_| invalid("ngram_min exceeds 255"))?,
        ngram_max: u8::try_from(ngram_max).map_err(|_| invalid("ngram_max exceeds 255"))?,
        vocab_count: section_len(vectorizer.len(), "Vocabulary")?,
        product_count: section_len(products.len(), "Catalog")?,
        vocab_len: section_len(vocab_bytes.len(), "Vocabulary")?,
        weights_len: section_len(weights_bytes.len(), "Weights")?,
        catalog_len: section_len(catalog_bytes.len(), "Catalog")?,
        fingerprint: model.feature_fingerprint(),
    };

    let offsets = header.section_offsets();
    let mut buf = Vec::with_capacity(offsets.total_size());
    header.write(&mut buf)?;
    buf.extend_from_slice(&vocab_bytes);
    buf.extend_from_slice(&weights_bytes);
    buf.extend_from_slice(&catalog_bytes);

    let crc32 = ArtifactFooter::compute_crc32(&buf);
    ArtifactFooter { crc32 }.write(&mut buf)?;

    Ok(buf)
}

/// Parse and validate the header, footer and CRC without decoding sections.
///
/// Checks, in order:
/// 1. File size is within `MAX_FILE_SIZE`
/// 2. Header magic is "DJBY" and the version is supported
/// 3. Footer magic is "YBJD" and the CRC32 matches
/// 4. Section lengths add up to the file size
pub fn read_header(bytes: &[u8]) -> io::Result<ArtifactHeader> {
    if bytes.len() > MAX_FILE_SIZE {
        return Err(invalid(format!(
            "File too large: {} bytes (max {})",
            bytes.len(),
            MAX_FILE_SIZE
        )));
    }

    let min_size = ArtifactHeader::SIZE + ArtifactFooter::SIZE;
    if bytes.len() < min_size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("File too small: {} bytes (minimum {})", bytes.len(), min_size),
        ));
    }

    let header = ArtifactHeader::read(&mut io::Cursor::new(bytes))?;
    if header.version != VERSION {
        return Err(invalid(format!(
            "Unsupported version: {} (expected {})",
            header.version, VERSION
        )));
    }

    let footer = ArtifactFooter::read(bytes)?;
    let content = &bytes[..bytes.len() - ArtifactFooter::SIZE];
    let computed = ArtifactFooter::compute_crc32(content);
    if footer.crc32 != computed {
        return Err(invalid(format!(
            "CRC32 mismatch: expected {:#010x}, got {:#010x} (file corrupted)",
            footer.crc32, computed
        )));
    }

    let offsets = header.section_offsets();
    if offsets.content_size() != content.len() {
        return Err(invalid(format!(
            "Section lengths mismatch: header claims {} bytes, got {} bytes",
            offsets.content_size(),
            content.len()
        )));
    }

    Ok(header)
}

/// Decode every section of an artifact.
///
/// Structural checks only: counts match the header, sections are consumed
/// exactly, and the weights carry one coefficient per vocabulary term.
pub fn decode(bytes: &[u8]) -> io::Result<ArtifactContents> {
    let header = read_header(bytes)?;

    if header.vocab_count > MAX_TERM_COUNT {
        return Err(invalid(format!(
            "Too many terms: {} (max {})",
            header.vocab_count, MAX_TERM_COUNT
        )));
    }
    if header.product_count > MAX_PRODUCT_COUNT {
        return Err(invalid(format!(
            "Too many products: {} (max {})",
            header.product_count, MAX_PRODUCT_COUNT
        )));
    }

    let offsets = header.section_offsets();

    let vocab_bytes = extract_section(bytes, &offsets, offsets.vocabulary, "Vocabulary")?;
    let (vocabulary, idf, used) = decode_vocabulary(vocab_bytes)?;
    exact(used, vocab_bytes, "Vocabulary")?;
    if vocabulary.len() != header.vocab_count as usize {
        return Err(invalid(format!(
            "Term count mismatch: header says {}, got {}",
            header.vocab_count,
            vocabulary.len()
        )));
    }

    let weights_bytes = extract_section(bytes, &offsets, offsets.weights, "Weights")?;
    let (weights, used) = decode_weights(weights_bytes)?;
    exact(used, weights_bytes, "Weights")?;
    if weights.weights.len() != vocabulary.len() {
        return Err(invalid(format!(
            "Weight count mismatch: {} weights for {} terms",
            weights.weights.len(),
            vocabulary.len()
        )));
    }

    let catalog_bytes = extract_section(bytes, &offsets, offsets.catalog, "Catalog")?;
    let (products, used) = decode_catalog(catalog_bytes)?;
    exact(used, catalog_bytes, "Catalog")?;
    if products.len() != header.product_count as usize {
        return Err(invalid(format!(
            "Product count mismatch: header says {}, got {}",
            header.product_count,
            products.len()
        )));
    }

    Ok(ArtifactContents {
        header,
        vocabulary,
        idf,
        weights,
        products,
    })
}
