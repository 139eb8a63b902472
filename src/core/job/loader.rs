#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::job::JobThread;
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Top-level job definitions document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsDocument {
    pub jobs: Vec<JobEntry>,
}

/// One job definition entry prior to normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEntry {
    pub stage: String,
    #[serde(default = "default_substage")]
    pub substage: String,
    pub distro: String,
    pub arch: String,
    #[serde(default)]
    pub options: IndexMap<String, Value>,
}

fn default_substage() -> String {
    "default".to_string()
}

impl From<JobEntry> for JobThread {
    fn from(entry: JobEntry) -> Self {
        JobThread {
            stage: entry.stage,
            substage: entry.substage,
            distro: entry.distro,
            arch: entry.arch,
            options: entry.options,
        }
    }
}

/// Load job definitions from a YAML (or JSON) file and convert each entry
/// into a job thread, preserving document order.
pub fn load_jobs(path: &Path) -> Result<Vec<JobThread>, AppError> {
    let document = load_document(path)?;
    validate(&document)?;
    tracing::debug!(
        path = %path.display(),
        jobs = document.jobs.len(),
        "loaded job definitions"
    );
    Ok(document.jobs.into_iter().map(JobThread::from).collect())
}

/// Parse a job definitions file without validating entries.
pub fn load_document(path: &Path) -> Result<JobsDocument, AppError> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("Failed to read job definitions {}: {}", path.display(), e),
        )
    })?;

    let document: JobsDocument = serde_yaml::from_str(&content).map_err(|e| {
        AppError::with_source(
            ErrorCategory::ParseError,
            format!("Failed to parse job definitions {}", path.display()),
            e,
        )
    })?;

    Ok(document)
}

fn validate(document: &JobsDocument) -> Result<(), AppError> {
    for (index, job) in document.jobs.iter().enumerate() {
        let coordinates = [
            ("stage", &job.stage),
            ("substage", &job.substage),
            ("distro", &job.distro),
            ("arch", &job.arch),
        ];
        for (field, value) in coordinates {
            if value.trim().is_empty() {
                return Err(AppError::new(
                    ErrorCategory::ValidationError,
                    format!("job {}: {} must not be empty", index, field),
                ));
            }
        }
    }
    Ok(())
}
