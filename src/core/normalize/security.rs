use globset::{Glob, GlobSet, GlobSetBuilder};
use std::env;

/// Environment key holding the comma-separated secure image allow-list.
pub const SECURE_IMAGES_VAR: &str = "CI_SECURE_IMAGES";

/// Glob allow-list classifying container images as secure or insecure.
///
/// Matching is anchored: a pattern must cover the whole image reference,
/// with `*` crossing `/` boundaries. An empty allow-list matches nothing.
#[derive(Debug, Clone)]
pub struct ImagePolicy {
    allow: GlobSet,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        ImagePolicy {
            allow: GlobSet::empty(),
        }
    }
}

impl ImagePolicy {
    /// Read the allow-list from the process environment.
    pub fn from_env() -> Self {
        Self::from_source(env::var(SECURE_IMAGES_VAR).ok().as_deref())
    }

    /// Compile an allow-list from a raw comma-separated pattern source.
    ///
    /// Invalid patterns are skipped with a warning: a malformed source
    /// degrades towards "nothing secure" instead of failing the pass.
    pub fn from_source(source: Option<&str>) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in source
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => {
                    tracing::warn!(pattern, error = %e, "skipping invalid secure image pattern");
                }
            }
        }
        let allow = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "secure image allow-list disabled");
            GlobSet::empty()
        });
        ImagePolicy { allow }
    }

    /// True when the image reference matches any allow-list pattern.
    pub fn is_secure(&self, image: &str) -> bool {
        self.allow.is_match(image)
    }
}
