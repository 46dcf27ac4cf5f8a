//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Messenger)
//! but are themselves concrete structs, not traits.

mod game;
mod knowledge;
mod learning;
mod traversal;

pub use game::GameService;
pub use knowledge::KnowledgeService;
pub use learning::LearningMutator;
pub use traversal::{SessionSummary, TraversalEngine, TraversalState};
