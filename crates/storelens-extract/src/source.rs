use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use storelens_core::{SourceKind, TableSet};
use storelens_generate::{GenerateOptions, Generator};

use crate::loader::{all_files_present, load_table_set};
use crate::retry::RetryPolicy;

/// A prioritized origin the coordinator can try.
///
/// `fetch` yields a complete table set or nothing; the reason for an
/// unavailable source lives in the logs, not in the signature, so the
/// chain stays a plain ordered walk.
pub trait TableSource {
    fn kind(&self) -> SourceKind;
    fn fetch(&self) -> Option<TableSet>;
}

/// Externally supplied dataset files in the raw directory.
#[derive(Debug, Clone)]
pub struct RawSource {
    pub dir: PathBuf,
    pub prefix: String,
}

impl TableSource for RawSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Raw
    }

    fn fetch(&self) -> Option<TableSet> {
        load_table_set(&self.dir, &self.prefix)
    }
}

/// Generated sample cache: loads existing files, otherwise generates,
/// persists, and loads them back.
#[derive(Debug, Clone)]
pub struct SampleSource {
    pub dir: PathBuf,
    pub prefix: String,
    pub generate: GenerateOptions,
}

impl SampleSource {
    fn generate_and_persist(&self) -> Option<TableSet> {
        let mut options = self.generate.clone();
        options.out_dir = Some(self.dir.clone());
        options.file_prefix = self.prefix.clone();

        match Generator::new(options).run() {
            Ok(_) => load_table_set(&self.dir, &self.prefix),
            Err(err) => {
                warn!(error = %err, "sample data generation failed");
                None
            }
        }
    }
}

impl TableSource for SampleSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Sample
    }

    fn fetch(&self) -> Option<TableSet> {
        if all_files_present(&self.dir, &self.prefix) {
            info!(dir = %self.dir.display(), "found existing sample data");
            return load_table_set(&self.dir, &self.prefix);
        }
        info!(dir = %self.dir.display(), "sample data absent, generating");
        self.generate_and_persist()
    }
}

#[derive(Debug, Error)]
enum RemoteError {
    #[error("remote extraction not implemented")]
    NotImplemented,
}

/// Remote/API source. The upstream contract is unspecified, so this
/// stage always reports unavailable; transient failures of a real
/// fetcher would go through the retry policy.
#[derive(Debug, Clone, Default)]
pub struct RemoteSource {
    pub retry: RetryPolicy,
}

impl RemoteSource {
    fn fetch_once(&self) -> Result<TableSet, RemoteError> {
        Err(RemoteError::NotImplemented)
    }
}

impl TableSource for RemoteSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    fn fetch(&self) -> Option<TableSet> {
        match self.retry.run("remote extraction", |_| self.fetch_once()) {
            Ok(set) => Some(set),
            Err(err) => {
                info!(error = %err, "remote source unavailable");
                None
            }
        }
    }
}
