// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact persistence: save, load, train-or-load, inspect.
//!
//! Saves go through a temporary file in the destination directory and an
//! atomic rename, so a crash mid-write leaves the previous artifact intact.
//!
//! Load errors come in two kinds that callers must be able to tell apart:
//!
//! | Condition                          | Error                                |
//! |------------------------------------|--------------------------------------|
//! | nothing at the path                | [`DjiblyError::ArtifactNotFound`]    |
//! | bad magic, version, CRC, counts    | [`DjiblyError::ArtifactCorrupt`]     |
//! | fingerprint or catalog mismatch    | [`DjiblyError::ArtifactCorrupt`]     |
//! | permission denied, other I/O       | [`DjiblyError::Io`]                  |

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::binary::{self, ArtifactContents, ArtifactFooter, ArtifactHeader, FormatFlags, SectionOffsets};
use crate::catalog::Catalog;
use crate::config::TrainingConfig;
use crate::corpus::load_corpus;
use crate::error::{DjiblyError, Result};
use crate::features::NgramVectorizer;
use crate::pipeline::TrainedPipeline;
use crate::scoring::LogisticModel;
use crate::training::{train_with, TrainingSummary};

/// Write `pipeline` to `path`, replacing any existing artifact atomically.
pub fn save(pipeline: &TrainedPipeline, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = binary::encode(pipeline)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| DjiblyError::Io(e.error))?;

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        fingerprint = %format!("{:08x}", pipeline.fingerprint()),
        "saved artifact"
    );
    Ok(())
}

/// Load an artifact into a ready-to-search pipeline.
pub fn load(path: impl AsRef<Path>) -> Result<TrainedPipeline> {
    let path = path.as_ref();
    let bytes = read_artifact(path)?;
    let pipeline = from_bytes(&bytes)?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        products = pipeline.catalog().len(),
        vocabulary = pipeline.vectorizer().len(),
        "loaded artifact"
    );
    Ok(pipeline)
}

/// Decode artifact bytes into a pipeline, validating every cross-section
/// invariant.
pub fn from_bytes(bytes: &[u8]) -> Result<TrainedPipeline> {
    let contents = binary::decode(bytes).map_err(corrupt)?;
    assemble(contents)
}

fn read_artifact(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DjiblyError::ArtifactNotFound {
            path: path.to_path_buf(),
        },
        _ => DjiblyError::Io(e),
    })
}

fn corrupt(err: io::Error) -> DjiblyError {
    DjiblyError::corrupt(err.to_string())
}

fn assemble(contents: ArtifactContents) -> Result<TrainedPipeline> {
    let ArtifactContents {
        header,
        vocabulary,
        idf,
        weights,
        products,
    } = contents;

    if weights.fingerprint != header.fingerprint {
        return Err(DjiblyError::corrupt(format!(
            "weights fingerprint {:08x} does not match header fingerprint {:08x}",
            weights.fingerprint, header.fingerprint
        )));
    }
    if header.flags != FormatFlags::current() {
        warn!(
            artifact_flags = header.flags.bits(),
            build_flags = FormatFlags::current().bits(),
            "artifact was trained with different text normalization; scores may drift"
        );
    }

    let vectorizer = NgramVectorizer::restore(
        usize::from(header.ngram_min),
        usize::from(header.ngram_max),
        vocabulary,
        idf,
    )?;
    if vectorizer.fingerprint() != header.fingerprint {
        return Err(DjiblyError::corrupt(format!(
            "vocabulary fingerprint {:08x} does not match header fingerprint {:08x}",
            vectorizer.fingerprint(),
            header.fingerprint
        )));
    }

    let model = LogisticModel::new(weights.weights, weights.intercept, weights.fingerprint);
    let catalog = Catalog::from_records(products)?;
    TrainedPipeline::from_parts(vectorizer, model, catalog)
}

/// Which path [`load_or_train`] took.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// An artifact existed and was loaded.
    Loaded,
    /// No artifact existed; one was trained from the corpus and saved.
    Trained(TrainingSummary),
}

/// Load the artifact at `artifact`, or train from `corpus` and save if
/// there is none.
///
/// A corrupt artifact is returned as an error, never retrained over.
pub fn load_or_train(
    artifact: impl AsRef<Path>,
    corpus: impl AsRef<Path>,
    config: &TrainingConfig,
) -> Result<(TrainedPipeline, LoadOutcome)> {
    let artifact = artifact.as_ref();
    match load(artifact) {
        Ok(pipeline) => Ok((pipeline, LoadOutcome::Loaded)),
        Err(DjiblyError::ArtifactNotFound { .. }) => {
            info!(path = %artifact.display(), "no artifact found, training a new one");
            let examples = load_corpus(corpus)?;
            let (pipeline, summary) = train_with(&examples, config)?;
            save(&pipeline, artifact)?;
            Ok((pipeline, LoadOutcome::Trained(summary)))
        }
        Err(e) => Err(e),
    }
}

/// What `inspect` reports about an artifact file.
#[derive(Debug, Clone)]
pub struct ArtifactInfo {
    pub file_size: usize,
    pub header: ArtifactHeader,
    pub offsets: SectionOffsets,
    pub stored_crc32: Option<u32>,
    pub computed_crc32: u32,
    /// `None` when the artifact loads cleanly, else why it does not.
    pub problem: Option<String>,
}

impl ArtifactInfo {
    pub fn is_valid(&self) -> bool {
        self.problem.is_none()
    }
}

/// Describe an artifact without installing it.
///
/// Only an unreadable header is an error; anything past the header is
/// reported through [`ArtifactInfo::problem`].
pub fn inspect(path: impl AsRef<Path>) -> Result<ArtifactInfo> {
    let bytes = read_artifact(path.as_ref())?;
    let header = ArtifactHeader::read(&mut io::Cursor::new(&bytes)).map_err(corrupt)?;

    let content_end = bytes.len().saturating_sub(ArtifactFooter::SIZE);
    let stored_crc32 = ArtifactFooter::read(&bytes).ok().map(|f| f.crc32);
    let computed_crc32 = ArtifactFooter::compute_crc32(&bytes[..content_end]);
    let problem = from_bytes(&bytes).err().map(|e| e.to_string());

    Ok(ArtifactInfo {
        file_size: bytes.len(),
        offsets: header.section_offsets(),
        header,
        stored_crc32,
        computed_crc32,
        problem,
    })
}
