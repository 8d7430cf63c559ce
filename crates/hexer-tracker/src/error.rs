//! Error types for the command engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Semantic failures: the grammar was valid but the world refused.
///
/// The `Display` strings are the exact response lines the session prints.
/// A command that fails with one of these is guaranteed to have left the
/// world untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A trade offered more of a trophy than is on hand.
    #[error("Not enough trophies")]
    NotEnoughTrophies,

    /// A brew was attempted without a known formula for the potion.
    #[error("No formula for {0}")]
    FormulaUnknown(String),

    /// A brew ran short of at least one required ingredient.
    #[error("Not enough ingredients")]
    NotEnoughIngredients,

    /// An encounter with a monster Geralt has no usable counter against.
    #[error("Geralt is unprepared and barely escapes with his life")]
    Unprepared,
}
