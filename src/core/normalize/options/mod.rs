pub mod containers;

use crate::core::normalize::registry::NormalizerRegistryBuilder;

/// Register built-in option normalizers into the supplied builder.
pub fn register_builtins(builder: &mut NormalizerRegistryBuilder) {
    builder.register(containers::Containers::new());
}
