//! Source Record - Read-Only Data Model
//!
//! The data file is located, read and parsed here. It is never written back.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::PipelineError;

/// Parsed data file. Sections and fields all default to empty; a missing key
/// and an empty string both mean "not provided".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    #[serde(default)]
    pub personal: Personal,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub site: Site,
    /// Kept raw: presence of the key (even as `{}`) triggers the
    /// manual-update reminder after a run.
    #[serde(default)]
    pub qr_codes: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personal {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub name_initial: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub department: String,
    #[serde(default, rename = "postal_code")]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default, rename = "revision_date")]
    pub revision_date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Social {
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Site {
    #[serde(default, rename = "revision_date")]
    pub revision_date: String,
}

impl SourceRecord {
    /// Revision timestamp carried by the record itself, if any.
    pub fn embedded_revision(&self) -> Option<&str> {
        for candidate in [&self.site.revision_date, &self.personal.revision_date] {
            if !candidate.trim().is_empty() {
                return Some(candidate.as_str());
            }
        }
        None
    }
}

/// Probe the candidate paths in order; first regular file wins.
pub fn locate_data_file(candidates: &[PathBuf]) -> Result<PathBuf, PipelineError> {
    for path in candidates {
        if path.is_file() {
            return Ok(path.clone());
        }
    }
    Err(PipelineError::NotFound {
        candidates: candidates.to_vec(),
    })
}

/// Read and parse the located file. No partial results on failure.
pub fn load_record(path: &Path) -> Result<SourceRecord, PipelineError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PipelineError::Vanished(path.to_path_buf())
        } else {
            PipelineError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|e| PipelineError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
