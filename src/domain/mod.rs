//! Domain layer: the knowledge tree and its transcript form
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod answer;
pub mod arena;
pub mod error;
pub mod transcript;
pub mod tree_traits;

pub use answer::{Answer, Branch, NO_MARKER, QUIT_MARKER, YES_MARKER};
pub use arena::{KnowledgeBase, KnowledgeNode, Slot, DEFAULT_SEED_ANIMAL};
pub use error::{DomainError, DomainResult};
pub use transcript::render_transcript;
pub use tree_traits::TreeNodeConvert;

/// Expand `~` and environment variables in a path-like string.
///
/// Returns the input unchanged if expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
