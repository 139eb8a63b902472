pub mod options;
pub mod registry;
pub mod schema;
pub mod security;
pub mod template;

pub use registry::{
    NormalizeContext, NormalizerRegistry, NormalizerRegistryBuilder, OptionNormalizer,
};
pub use schema::{Field, Schema};
pub use security::ImagePolicy;

use thiserror::Error;

/// Errors raised while normalizing job options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Structurally malformed option data.
    #[error("{0}")]
    DataNormalization(String),
    /// Well-formed data violating a policy invariant.
    #[error("{0}")]
    ConfigurationSyntax(String),
}

impl NormalizeError {
    pub fn data<T: Into<String>>(message: T) -> Self {
        NormalizeError::DataNormalization(message.into())
    }

    pub fn syntax<T: Into<String>>(message: T) -> Self {
        NormalizeError::ConfigurationSyntax(message.into())
    }

    /// Descriptive message carried by either kind.
    pub fn message(&self) -> &str {
        match self {
            NormalizeError::DataNormalization(message)
            | NormalizeError::ConfigurationSyntax(message) => message,
        }
    }
}

/// Build the registry holding every built-in option normalizer.
pub fn builtin_registry() -> NormalizerRegistry {
    let mut builder = NormalizerRegistry::builder();
    options::register_builtins(&mut builder);
    builder.build()
}
