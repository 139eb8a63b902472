pub mod config;
pub mod error;
pub mod job;
pub mod normalize;
pub mod types;

pub use config::{ConfigLoader, PipewrightConfig};
pub use error::AppError;
pub use job::{JobEntry, JobThread, JobsDocument};
pub use normalize::{
    builtin_registry, NormalizeContext, NormalizeError, NormalizerRegistry, OptionNormalizer,
};
pub use types::*;
