//! Generation Pipeline - Single Entry Point
//!
//! Linear run: Located -> Loaded -> Validated -> Formatted -> Encoded(contact)
//! -> Encoded(site) -> Reported. Validation failures are terminal before any
//! artifact is written; encode failures are collected, never fatal.

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::Config;
use crate::encoder::QrEncoder;
use crate::record::{load_record, locate_data_file, SourceRecord};
use crate::validation::{ValidationViolation, Validator};
use crate::vcard::{build_card, ContactCard};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data file not found; searched:\n{}", candidate_list(.candidates))]
    NotFound { candidates: Vec<PathBuf> },

    #[error("data file vanished before it could be read: {0}")]
    Vanished(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("required fields missing: {}", field_list(.0))]
    MissingFields(Vec<ValidationViolation>),
}

fn candidate_list(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_list(violations: &[ValidationViolation]) -> String {
    violations
        .iter()
        .map(|v| v.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl PipelineError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. } => 3,
            Self::Vanished(_) | Self::Read { .. } => 4,
            Self::Parse { .. } => 5,
            Self::MissingFields(_) => 6,
        }
    }
}

/// Outcome of one artifact attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOutcome {
    Written(PathBuf),
    Skipped(String),
    Failed(String),
}

impl ArtifactOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// Everything a run produced, for the final console report.
#[derive(Debug)]
pub struct RunReport {
    pub data_path: PathBuf,
    pub warnings: Vec<ValidationViolation>,
    pub card: ContactCard,
    pub contact: ArtifactOutcome,
    pub site: ArtifactOutcome,
    /// The data file carries a `qrCodes` key (even an empty one); the user
    /// may want to update it by hand with the new artifact paths.
    pub qr_codes_present: bool,
}

impl RunReport {
    /// Failure messages from encode attempts, in artifact order.
    pub fn failures(&self) -> Vec<&str> {
        [&self.contact, &self.site]
            .into_iter()
            .filter_map(|outcome| match outcome {
                ArtifactOutcome::Failed(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// The pipeline - the only way artifacts get produced.
pub struct GenerationPipeline<E> {
    config: Config,
    encoder: E,
    validator: Validator,
}

impl<E: QrEncoder> GenerationPipeline<E> {
    pub fn new(config: Config, encoder: E) -> Self {
        Self {
            config,
            encoder,
            validator: Validator::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full run. Halts with `MissingFields` before any output exists when a
    /// required field is absent.
    pub fn run(&self) -> Result<RunReport, PipelineError> {
        let data_path = locate_data_file(&self.config.candidate_paths)?;
        let record = load_record(&data_path)?;
        let warnings = self.check(&record)?;
        Ok(self.produce_artifacts(data_path, &record, warnings))
    }

    /// Validation stage: returns the non-fatal warnings, or the full set of
    /// missing required fields as an error.
    pub fn check(&self, record: &SourceRecord) -> Result<Vec<ValidationViolation>, PipelineError> {
        let result = self.validator.validate(record);
        if result.has_errors() {
            return Err(PipelineError::MissingFields(
                result.missing_required().into_iter().cloned().collect(),
            ));
        }
        Ok(result.missing_recommended().into_iter().cloned().collect())
    }

    /// Format + encode stage. A failure on one artifact never prevents the
    /// other attempt; a blank website URL skips the site artifact.
    pub fn produce_artifacts(
        &self,
        data_path: PathBuf,
        record: &SourceRecord,
        warnings: Vec<ValidationViolation>,
    ) -> RunReport {
        let card = build_card(record, self.config.revision.as_deref());

        let contact = self.write_artifact(&card.payload(), &self.config.contact_stem);

        let site_url = record.social.website.trim();
        let site = if site_url.is_empty() {
            ArtifactOutcome::Skipped("no website URL in the data file".to_string())
        } else {
            self.write_artifact(site_url, &self.config.site_stem)
        };

        RunReport {
            data_path,
            warnings,
            card,
            contact,
            site,
            qr_codes_present: record.qr_codes.is_some(),
        }
    }

    /// Where an artifact with the given stem lands.
    pub fn artifact_path(&self, stem: &str) -> PathBuf {
        self.config.output_dir.join(format!("{stem}.png"))
    }

    fn write_artifact(&self, payload: &str, stem: &str) -> ArtifactOutcome {
        let attempt = || -> Result<PathBuf, crate::encoder::EncodeError> {
            let bytes = self.encoder.encode(payload, &self.config.qr)?;
            fs::create_dir_all(&self.config.output_dir)?;
            let path = self.artifact_path(stem);
            fs::write(&path, bytes)?;
            Ok(path)
        };
        match attempt() {
            Ok(path) => ArtifactOutcome::Written(path),
            Err(e) => ArtifactOutcome::Failed(e.to_string()),
        }
    }
}
