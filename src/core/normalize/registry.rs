use crate::core::job::JobThread;
use crate::core::normalize::security::ImagePolicy;
use crate::core::normalize::NormalizeError;
use indexmap::IndexMap;
use std::sync::Arc;

/// Per-pass snapshot of ambient inputs consulted by normalizers.
///
/// Built once at the call boundary so one pass's environment never leaks
/// into another's.
#[derive(Debug, Clone, Default)]
pub struct NormalizeContext {
    pub policy: ImagePolicy,
}

impl NormalizeContext {
    /// Snapshot ambient inputs from the process environment.
    pub fn from_env() -> Self {
        NormalizeContext {
            policy: ImagePolicy::from_env(),
        }
    }

    pub fn with_policy(policy: ImagePolicy) -> Self {
        NormalizeContext { policy }
    }
}

/// Trait implemented by option normalizers.
pub trait OptionNormalizer: Send + Sync + 'static {
    /// Option name this normalizer owns in the job options mapping.
    fn option(&self) -> &'static str;

    /// Normalize the owned option, returning the updated thread.
    ///
    /// Normalizers run even when their option is absent so they can write
    /// defaults; every other option must pass through untouched.
    fn normalize(
        &self,
        thread: JobThread,
        ctx: &NormalizeContext,
    ) -> Result<JobThread, NormalizeError>;
}

/// Builder used to register normalizers before any pass runs.
pub struct NormalizerRegistryBuilder {
    normalizers: IndexMap<String, Arc<dyn OptionNormalizer>>,
}

impl Default for NormalizerRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizerRegistryBuilder {
    pub fn new() -> Self {
        Self {
            normalizers: IndexMap::new(),
        }
    }

    pub fn register<T: OptionNormalizer>(&mut self, normalizer: T) -> &mut Self {
        let option = normalizer.option();
        if self.normalizers.contains_key(option) {
            panic!("duplicate option normalizer registered: {}", option);
        }
        self.normalizers
            .insert(option.to_string(), Arc::new(normalizer));
        self
    }

    pub fn build(self) -> NormalizerRegistry {
        NormalizerRegistry {
            inner: Arc::new(self.normalizers),
        }
    }
}

/// Immutable registry dispatching normalization passes.
#[derive(Clone)]
pub struct NormalizerRegistry {
    inner: Arc<IndexMap<String, Arc<dyn OptionNormalizer>>>,
}

impl Default for NormalizerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizerRegistry {
    pub fn new() -> Self {
        NormalizerRegistryBuilder::new().build()
    }

    pub fn builder() -> NormalizerRegistryBuilder {
        NormalizerRegistryBuilder::new()
    }

    pub fn get(&self, option: &str) -> Option<Arc<dyn OptionNormalizer>> {
        self.inner.get(option).cloned()
    }

    /// Run a full pass with ambient inputs snapshotted from the environment.
    pub fn normalize(&self, thread: JobThread) -> Result<JobThread, NormalizeError> {
        let ctx = NormalizeContext::from_env();
        self.normalize_with(thread, &ctx)
    }

    /// Run every registered normalizer over the thread in registration order.
    pub fn normalize_with(
        &self,
        mut thread: JobThread,
        ctx: &NormalizeContext,
    ) -> Result<JobThread, NormalizeError> {
        for normalizer in self.inner.values() {
            tracing::debug!(
                option = normalizer.option(),
                job = %thread.coordinate(),
                "normalizing option"
            );
            thread = normalizer.normalize(thread, ctx)?;
        }
        Ok(thread)
    }
}
