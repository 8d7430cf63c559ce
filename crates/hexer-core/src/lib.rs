//! Core state for the hexer tracker: ledgers, formulas, and the bestiary.
//!
//! This crate defines the world model that interpreted commands act on. It is
//! independent of the parser — the types here know nothing about input lines
//! or response strings, only about counts, formulas, and monster knowledge.

/// Bestiary entries: which signs and potions work against which monster.
pub mod bestiary;
/// Potion formulas and the book that collects them.
pub mod formula;
/// Positive-count ledgers for ingredients, trophies, and brewed potions.
pub mod ledger;
/// The aggregate world state owned by a tracking session.
pub mod world;

/// Re-export bestiary types.
pub use bestiary::{Bestiary, BestiaryEntry};
/// Re-export formula types.
pub use formula::{Formula, FormulaBook, Requirement};
/// Re-export the ledger type.
pub use ledger::Ledger;
/// Re-export the world aggregate.
pub use world::World;
