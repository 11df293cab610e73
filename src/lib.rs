//! QR Card Generator Core
//!
//! # The Four Laws (Non-Negotiable)
//! 1. The Data File Is Truth (read-only, never written back)
//! 2. Validation Is Protective (required fields block before any output)
//! 3. Deterministic Output (same record + same revision => same bytes)
//! 4. One Artifact's Failure Never Kills The Other

pub mod config;
pub mod record;
pub mod validation;
pub mod vcard;
pub mod encoder;
pub mod pipeline;

pub use config::{Config, ModuleStyle, QrOptions};
pub use record::{locate_data_file, load_record, SourceRecord};
pub use validation::{
    ValidationResult, ValidationRule, ValidationViolation, Validator, ViolationSeverity,
};
pub use vcard::ContactCard;
pub use encoder::{EncodeError, ModuleEncoder, QrEncoder};
pub use pipeline::{ArtifactOutcome, GenerationPipeline, PipelineError, RunReport};

pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
