use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use storelens_generate::GenerateOptions;
use storelens_validate::{ValidateOptions, Validation, Validator};

use crate::errors::ExtractError;
use crate::retry::RetryPolicy;
use crate::source::{RawSource, RemoteSource, SampleSource, TableSource};

/// Configuration for the extraction coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Directory holding externally supplied dataset files.
    pub raw_dir: PathBuf,
    /// Directory holding (or receiving) generated sample data.
    pub sample_dir: PathBuf,
    /// File-name prefix shared by every table file.
    pub file_prefix: String,
    pub retry: RetryPolicy,
    pub generate: GenerateOptions,
    pub validate: ValidateOptions,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            sample_dir: PathBuf::from("data/sample"),
            file_prefix: "olist".to_string(),
            retry: RetryPolicy::default(),
            generate: GenerateOptions::default(),
            validate: ValidateOptions::default(),
        }
    }
}

/// Coordinates the prioritized fallback chain and the validation gate.
#[derive(Debug, Clone)]
pub struct Extractor {
    options: ExtractOptions,
    validator: Validator,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        let validator = Validator::new(options.validate.clone());
        Self { options, validator }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Walk the source chain, first success wins, then validate.
    ///
    /// Succeeds when at least one table survives validation. All sources
    /// unavailable, or a surviving set of zero tables, is a total
    /// extraction failure.
    pub fn extract(&self) -> Result<Validation, ExtractError> {
        info!("starting data extraction");

        let sources: Vec<Box<dyn TableSource>> = vec![
            Box::new(RawSource {
                dir: self.options.raw_dir.clone(),
                prefix: self.options.file_prefix.clone(),
            }),
            Box::new(SampleSource {
                dir: self.options.sample_dir.clone(),
                prefix: self.options.file_prefix.clone(),
                generate: self.options.generate.clone(),
            }),
            Box::new(RemoteSource {
                retry: self.options.retry.clone(),
            }),
        ];

        for source in &sources {
            let kind = source.kind();
            info!(source = %kind, "trying extraction source");
            let Some(set) = source.fetch() else {
                info!(source = %kind, "source unavailable, falling back");
                continue;
            };

            info!(source = %kind, tables = set.len(), "source provided a complete set");
            let validation = self.validator.validate(set, kind);
            if validation.is_empty() {
                warn!(source = %kind, "every table was rejected by validation");
                return Err(ExtractError::NoValidTables(kind));
            }
            if validation.is_degraded() {
                warn!(source = %kind, missing = ?validation.missing(), "extraction is degraded");
            }
            info!(source = %kind, tables = validation.len(), "extraction complete");
            return Ok(validation);
        }

        warn!("all extraction sources exhausted");
        Err(ExtractError::Exhausted)
    }
}
