//! Line interpreter for the hexer tracker.
//!
//! Turns free-text input lines into typed commands (tokenizer + classifier)
//! and executes them against the in-memory world model, producing the exact
//! single-line responses of the tracker protocol. Each line is atomic:
//! either it is fully valid and applied, or it is rejected in full.

/// Error types for the command engine.
pub mod error;
/// Tokenization and line classification.
pub mod parser;
/// Session management: the command engine over a world.
pub mod session;

pub use error::{EngineError, EngineResult};
pub use parser::{ItemCount, Line, Question, Sentence, classify, classify_line};
pub use session::Session;
