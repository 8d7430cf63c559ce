use crate::bestiary::Bestiary;
use crate::formula::FormulaBook;
use crate::ledger::Ledger;

/// The complete mutable state of a tracking session.
///
/// Everything lives in memory for the process lifetime; there is no
/// persistence. Fields are public — the interpreter crate owns a `World`
/// and applies each command as one non-interleaved transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct World {
    /// Alchemy ingredients on hand.
    pub ingredients: Ledger,
    /// Monster trophies on hand, keyed by monster name.
    pub trophies: Ledger,
    /// Brewed potions on hand, keyed by potion name.
    pub potions: Ledger,
    /// Known potion formulas.
    pub formulas: FormulaBook,
    /// Knowledge of what is effective against which monster.
    pub bestiary: Bestiary,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }
}
