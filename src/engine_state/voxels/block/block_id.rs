//! # Block Identifiers
//!
//! Block, model and texture identifiers are `namespace:path` strings. A bare path
//! belongs to the default `minecraft` namespace, so `stone` and `minecraft:stone`
//! name the same block.

use std::borrow::Cow;

/// Namespace applied to identifiers that do not carry one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Returns the fully namespaced form of an identifier.
///
/// # Arguments
/// * `id` - A bare (`stone`) or namespaced (`minecraft:stone`) identifier
///
/// # Returns
/// The identifier unchanged if it already has a namespace, otherwise prefixed with
/// [`DEFAULT_NAMESPACE`].
pub fn namespaced(id: &str) -> Cow<'_, str> {
    if id.contains(':') {
        Cow::Borrowed(id)
    } else {
        Cow::Owned(format!("{DEFAULT_NAMESPACE}:{id}"))
    }
}

/// Returns the path part of an identifier, dropping any namespace.
pub fn path(id: &str) -> &str {
    match id.split_once(':') {
        Some((_, path)) => path,
        None => id,
    }
}
