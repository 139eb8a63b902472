use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-job build coordinate plus the option mapping being normalized.
///
/// Threads are created once per job definition entry, mutated in place by
/// option normalizers during a single pass, and handed off afterwards.
/// Equality is structural across the four coordinates and the options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobThread {
    pub stage: String,
    pub substage: String,
    pub distro: String,
    pub arch: String,
    #[serde(default)]
    pub options: IndexMap<String, Value>,
}

impl JobThread {
    pub fn new<T: Into<String>>(
        stage: T,
        substage: T,
        distro: T,
        arch: T,
        options: IndexMap<String, Value>,
    ) -> Self {
        JobThread {
            stage: stage.into(),
            substage: substage.into(),
            distro: distro.into(),
            arch: arch.into(),
            options,
        }
    }

    /// Coordinate string used in logs and error context.
    pub fn coordinate(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.stage, self.substage, self.distro, self.arch
        )
    }
}
