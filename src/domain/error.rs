//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Domain errors represent violations of the knowledge tree invariants.
/// The growth protocol never produces them; seeing one means a logic fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found in knowledge base: {0:?}")]
    MissingNode(Index),

    #[error("expected a question node at {0:?}")]
    NotAQuestion(Index),

    #[error("slot does not hold an animal: {0:?}")]
    NotAnAnimal(Index),
}

/// Result type for knowledge tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
