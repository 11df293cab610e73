//! Run Configuration
//!
//! Every path, size and color the pipeline uses comes through here.
//! Nothing is ambient; tests inject their own instances.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Visual treatment of the dark modules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleStyle {
    #[default]
    Normal,
    RoundedModules,
    CircularModules,
}

/// Options handed to the encoder for one artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrOptions {
    /// Foreground color, `#RRGGBB`.
    pub dark: String,
    /// Background color, `#RRGGBB`.
    pub light: String,
    pub style: ModuleStyle,
    /// Pixels per module.
    pub box_size: u32,
    /// Quiet-zone width, in modules.
    pub border: u32,
    /// Fixed symbol version (1..=40); `None` fits automatically.
    pub version: Option<i16>,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            dark: "#000000".to_string(),
            light: "#ffffff".to_string(),
            style: ModuleStyle::Normal,
            box_size: 12,
            border: 4,
            version: Some(10),
        }
    }
}

impl QrOptions {
    /// Create from user-supplied sizes, with bounds checking.
    pub fn from_user(box_size: u32, border: u32, version: Option<i16>) -> Result<Self, &'static str> {
        if box_size == 0 || box_size > 64 {
            return Err("box size must be between 1 and 64 pixels per module");
        }
        if border > 16 {
            return Err("border must be at most 16 modules");
        }
        if let Some(v) = version {
            if !(1..=40).contains(&v) {
                return Err("symbol version must be between 1 and 40");
            }
        }
        Ok(Self {
            box_size,
            border,
            version,
            ..Self::default()
        })
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Candidate locations for the data file, probed in order.
    pub candidate_paths: Vec<PathBuf>,
    /// Directory the artifacts are written to (created if absent).
    pub output_dir: PathBuf,
    /// Filename stem for the contact-card artifact.
    pub contact_stem: String,
    /// Filename stem for the site-link artifact.
    pub site_stem: String,
    pub qr: QrOptions,
    /// Fixed revision timestamp (ISO-8601 UTC); `None` uses the record or now.
    pub revision: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            candidate_paths: vec![
                PathBuf::from("assets/json/data.json"),
                PathBuf::from("data.json"),
            ],
            output_dir: PathBuf::from("assets/img/qr_codes"),
            contact_stem: "contact_qr".to_string(),
            site_stem: "site_qr".to_string(),
            qr: QrOptions::default(),
            revision: None,
        }
    }
}
