// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives and section codecs.
//!
//! Varints (LEB128) for counts and lengths, length-prefixed UTF-8 for
//! strings, little-endian IEEE 754 for floats. Every decoder returns
//! `(value, bytes_consumed)` and checks bounds before slicing, so arbitrary
//! input produces an error and never a panic.
//!
//! # References
//!
//! - **Varint (LEB128)**: DWARF4 specification §7.6 "Variable Length Data",
//!   and the Protocol Buffers encoding guide:
//!   <https://protobuf.dev/programming-guides/encoding/>

use std::io;

use super::header::MAX_VARINT_BYTES;
use crate::types::ProductRecord;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Fails on an empty buffer, a varint cut off by the end of the buffer, or
/// one longer than `MAX_VARINT_BYTES`.
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty buffer for varint",
        ));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    let mut i = 0;

    while i < bytes.len() && i < MAX_VARINT_BYTES {
        let byte = bytes[i];
        result |= ((byte & 0x7F) as u64) << shift;
        i += 1;
        if byte & 0x80 == 0 {
            return Ok((result, i));
        }
        shift += 7;
    }

    if i >= MAX_VARINT_BYTES {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Incomplete varint",
        ))
    }
}

/// Decode a varint used as an element count, bounded by the bytes left.
///
/// Every element takes at least `min_element_size` bytes, so a count larger
/// than `remaining / min_element_size` cannot be genuine.
fn decode_count(bytes: &[u8], min_element_size: usize, what: &str) -> io::Result<(usize, usize)> {
    let (count, consumed) = decode_varint(bytes)?;
    let remaining = bytes.len().saturating_sub(consumed);
    let max = remaining / min_element_size.max(1);
    if count > max as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} count {} exceeds available bytes {}", what, count, remaining),
        ));
    }
    Ok((count as usize, consumed))
}

// ============================================================================
// SCALARS AND STRINGS
// ============================================================================

pub fn encode_f64(value: f64, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn decode_f64(bytes: &[u8]) -> io::Result<(f64, usize)> {
    let raw: [u8; 8] = bytes
        .get(..8)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "Truncated f64"))?;
    Ok((f64::from_le_bytes(raw), 8))
}

pub fn encode_u32(value: u32, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn decode_u32(bytes: &[u8]) -> io::Result<(u32, usize)> {
    let raw: [u8; 4] = bytes
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "Truncated u32"))?;
    Ok((u32::from_le_bytes(raw), 4))
}

/// Encode a length-prefixed UTF-8 string
pub fn encode_string(s: &str, buf: &mut Vec<u8>) {
    encode_varint(s.len() as u64, buf);
    buf.extend_from_slice(s.as_bytes());
}

/// Decode a length-prefixed UTF-8 string
pub fn decode_string(bytes: &[u8]) -> io::Result<(String, usize)> {
    let (len, pos) = decode_varint(bytes)?;
    let end = usize::try_from(len)
        .ok()
        .and_then(|len| pos.checked_add(len))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("String length {} causes overflow", len),
            )
        })?;
    let raw = bytes.get(pos..end).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Truncated string (expected {} bytes)", len),
        )
    })?;
    let s = std::str::from_utf8(raw).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e))
    })?;
    Ok((s.to_string(), end))
}

fn finite(value: f64, what: &str) -> io::Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not finite", what),
        ))
    }
}

// ============================================================================
// VOCABULARY SECTION
// ============================================================================

/// Encode the vocabulary: varint count, then (n-gram, idf) per feature index.
pub fn encode_vocabulary(terms: &[String], idf: &[f64], buf: &mut Vec<u8>) {
    encode_varint(terms.len() as u64, buf);
    for (term, weight) in terms.iter().zip(idf) {
        encode_string(term, buf);
        encode_f64(*weight, buf);
    }
}

/// Decode the vocabulary section into (terms, idf).
pub fn decode_vocabulary(bytes: &[u8]) -> io::Result<(Vec<String>, Vec<f64>, usize)> {
    // 1 byte length prefix + 8 bytes idf
    let (count, mut pos) = decode_count(bytes, 9, "Vocabulary")?;
    let mut terms = Vec::with_capacity(count);
    let mut idf = Vec::with_capacity(count);

    for i in 0..count {
        let (term, consumed) = decode_string(&bytes[pos..]).map_err(|e| {
            io::Error::new(e.kind(), format!("Vocabulary term {}: {}", i, e))
        })?;
        pos += consumed;
        let (weight, consumed) = decode_f64(&bytes[pos..])?;
        pos += consumed;
        terms.push(term);
        idf.push(finite(weight, "idf weight")?);
    }

    Ok((terms, idf, pos))
}

// ============================================================================
// WEIGHTS SECTION
// ============================================================================

/// Scorer parameters as stored on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightsSection {
    pub intercept: f64,
    pub weights: Vec<f64>,
    pub fingerprint: u32,
}

/// Encode the weights: f64 intercept, varint count, f64 per feature, u32 fingerprint.
pub fn encode_weights(intercept: f64, weights: &[f64], fingerprint: u32, buf: &mut Vec<u8>) {
    encode_f64(intercept, buf);
    encode_varint(weights.len() as u64, buf);
    for w in weights {
        encode_f64(*w, buf);
    }
    encode_u32(fingerprint, buf);
}

pub fn decode_weights(bytes: &[u8]) -> io::Result<(WeightsSection, usize)> {
    let (intercept, mut pos) = decode_f64(bytes)?;
    let intercept = finite(intercept, "intercept")?;

    let (count, consumed) = decode_count(&bytes[pos..], 8, "Weights")?;
    pos += consumed;

    let mut weights = Vec::with_capacity(count);
    for _ in 0..count {
        let (w, consumed) = decode_f64(&bytes[pos..])?;
        pos += consumed;
        weights.push(finite(w, "weight")?);
    }

    let (fingerprint, consumed) = decode_u32(&bytes[pos..])?;
    pos += consumed;

    Ok((
        WeightsSection {
            intercept,
            weights,
            fingerprint,
        },
        pos,
    ))
}

// ============================================================================
// CATALOG SECTION
// ============================================================================

/// Encode the catalog: varint count, then (id, name, category, description, price).
///
/// `search_text` is not stored; the decoder rebuilds it.
pub fn encode_catalog(products: &[ProductRecord], buf: &mut Vec<u8>) {
    encode_varint(products.len() as u64, buf);
    for p in products {
        encode_string(&p.id, buf);
        encode_string(&p.name, buf);
        encode_string(&p.category, buf);
        encode_string(&p.description, buf);
        encode_f64(p.price, buf);
    }
}

pub fn decode_catalog(bytes: &[u8]) -> io::Result<(Vec<ProductRecord>, usize)> {
    // 4 one-byte string prefixes + 8 bytes price
    let (count, mut pos) = decode_count(bytes, 12, "Catalog")?;
    let mut products = Vec::with_capacity(count);

    for i in 0..count {
        let mut fields: [String; 4] = Default::default();
        for field in fields.iter_mut() {
            let (s, consumed) = decode_string(&bytes[pos..]).map_err(|e| {
                io::Error::new(e.kind(), format!("Catalog entry {}: {}", i, e))
            })?;
            pos += consumed;
            *field = s;
        }
        let (price, consumed) = decode_f64(&bytes[pos..])?;
        pos += consumed;
        let price = finite(price, "price")?;

        let [id, name, category, description] = fields;
        products.push(ProductRecord::new(id, name, category, description, price));
    }

    Ok((products, pos))
}
