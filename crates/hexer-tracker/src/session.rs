//! Session management: the command engine over a world.

use std::collections::BTreeMap;

use hexer_core::{Formula, Requirement, World};

use crate::error::{EngineError, EngineResult};
use crate::parser::{ItemCount, Line, Question, Sentence, classify_line};

/// An interpreter session owning the world state.
///
/// One session, one world, one line at a time: every input line is
/// tokenized, classified, and applied to completion before the next one is
/// read. There is no partial application — a sentence either passes all of
/// its checks and mutates the world, or leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct Session {
    world: World,
}

impl Session {
    /// Create a session over an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current world state.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Interpret one input line.
    ///
    /// Returns the single response line for it, or `None` when the line is
    /// the session terminator (`Exit`), which produces no output and ends
    /// the session.
    pub fn respond(&mut self, line: &str) -> Option<String> {
        match classify_line(line) {
            Line::Exit => None,
            Line::Invalid => Some("INVALID".to_string()),
            Line::Question(question) => Some(self.answer(&question)),
            Line::Sentence(sentence) => {
                Some(self.execute(sentence).unwrap_or_else(|e| e.to_string()))
            }
        }
    }

    /// Execute an action sentence. On error the world is unchanged.
    pub fn execute(&mut self, sentence: Sentence) -> EngineResult<String> {
        match sentence {
            Sentence::Loot { haul } => Ok(self.do_loot(&haul)),
            Sentence::Trade {
                trophies,
                ingredients,
            } => self.do_trade(&trophies, &ingredients),
            Sentence::Brew { potion } => self.do_brew(&potion),
            Sentence::SignKnowledge { sign, monster } => Ok(self.do_learn_sign(&sign, &monster)),
            Sentence::PotionKnowledge { potion, monster } => {
                Ok(self.do_learn_potion(&potion, &monster))
            }
            Sentence::PotionRecipe {
                potion,
                ingredients,
            } => Ok(self.do_learn_formula(&potion, ingredients)),
            Sentence::Encounter { monster } => self.do_encounter(&monster),
        }
    }

    /// Answer a read-only question.
    pub fn answer(&self, question: &Question) -> String {
        match question {
            Question::IngredientCount { name } => self.world.ingredients.count(name).to_string(),
            Question::AllIngredients => self.world.ingredients.to_string(),
            Question::PotionCount { name } => self.world.potions.count(name).to_string(),
            Question::AllPotions => self.world.potions.to_string(),
            Question::TrophyCount { name } => self.world.trophies.count(name).to_string(),
            Question::AllTrophies => self.world.trophies.to_string(),
            Question::MonsterKnowledge { monster } => self.answer_knowledge(monster),
            Question::PotionFormula { potion } => self.answer_formula(potion),
        }
    }

    fn do_loot(&mut self, haul: &[ItemCount]) -> String {
        for item in haul {
            self.world.ingredients.add(&item.name, item.count);
        }
        "Alchemy ingredients obtained".to_string()
    }

    fn do_trade(
        &mut self,
        trophies: &[ItemCount],
        ingredients: &[ItemCount],
    ) -> EngineResult<String> {
        // Pre-flight over every mention before anything is decremented. A
        // trophy named twice is checked at each mention but paid once, at
        // the amount of its last mention.
        let mut requested: BTreeMap<&str, u64> = BTreeMap::new();
        for trophy in trophies {
            if !self.world.trophies.has(&trophy.name, trophy.count) {
                return Err(EngineError::NotEnoughTrophies);
            }
            requested.insert(&trophy.name, trophy.count);
        }
        for (name, count) in requested {
            self.world.trophies.remove(name, count);
        }
        for ingredient in ingredients {
            self.world.ingredients.add(&ingredient.name, ingredient.count);
        }
        Ok("Trade successful".to_string())
    }

    fn do_brew(&mut self, potion: &str) -> EngineResult<String> {
        let Some(formula) = self.world.formulas.get(potion) else {
            return Err(EngineError::FormulaUnknown(potion.to_string()));
        };
        // Every requirement is checked against the pre-brew ledger; only
        // then is anything consumed.
        for requirement in formula.requirements() {
            if !self
                .world
                .ingredients
                .has(&requirement.ingredient, requirement.quantity)
            {
                return Err(EngineError::NotEnoughIngredients);
            }
        }
        let requirements = formula.requirements().to_vec();
        for requirement in &requirements {
            self.world
                .ingredients
                .remove(&requirement.ingredient, requirement.quantity);
        }
        self.world.potions.add(potion, 1);
        Ok(format!("Alchemy item created: {potion}"))
    }

    fn do_learn_sign(&mut self, sign: &str, monster: &str) -> String {
        if !self.world.bestiary.contains(monster) {
            self.world.bestiary.entry_mut(monster).record_sign(sign);
            format!("New bestiary entry added: {monster}")
        } else if self.world.bestiary.entry_mut(monster).record_sign(sign) {
            format!("Bestiary entry updated: {monster}")
        } else {
            "Already known effectiveness".to_string()
        }
    }

    fn do_learn_potion(&mut self, potion: &str, monster: &str) -> String {
        if !self.world.bestiary.contains(monster) {
            self.world.bestiary.entry_mut(monster).record_potion(potion);
            format!("New bestiary entry added: {monster}")
        } else if self.world.bestiary.entry_mut(monster).record_potion(potion) {
            format!("Bestiary entry updated: {monster}")
        } else {
            "Already known effectiveness".to_string()
        }
    }

    fn do_learn_formula(&mut self, potion: &str, ingredients: Vec<ItemCount>) -> String {
        if self.world.formulas.knows(potion) {
            return "Already known formula".to_string();
        }
        let requirements = ingredients
            .into_iter()
            .map(|item| Requirement {
                ingredient: item.name,
                quantity: item.count,
            })
            .collect();
        self.world.formulas.learn(potion, Formula::new(requirements));
        format!("New alchemy formula obtained: {potion}")
    }

    fn do_encounter(&mut self, monster: &str) -> EngineResult<String> {
        let entry = self
            .world
            .bestiary
            .get(monster)
            .filter(|entry| !entry.is_empty())
            .ok_or(EngineError::Unprepared)?;
        let in_stock: Vec<String> = entry
            .potions()
            .iter()
            .filter(|potion| self.world.potions.count(potion) > 0)
            .cloned()
            .collect();
        // A known sign always carries the fight; potion knowledge alone
        // needs at least one of those potions on hand.
        if entry.signs().is_empty() && in_stock.is_empty() {
            return Err(EngineError::Unprepared);
        }
        for potion in &in_stock {
            self.world.potions.remove(potion, 1);
        }
        self.world.trophies.add(monster, 1);
        Ok(format!("Geralt defeats {monster}"))
    }

    fn answer_knowledge(&self, monster: &str) -> String {
        match self.world.bestiary.get(monster) {
            Some(entry) if !entry.is_empty() => entry.merged().join(", "),
            _ => format!("No knowledge of {monster}"),
        }
    }

    fn answer_formula(&self, potion: &str) -> String {
        match self.world.formulas.get(potion) {
            Some(formula) if !formula.is_empty() => formula
                .sorted()
                .iter()
                .map(|r| format!("{} {}", r.quantity, r.ingredient))
                .collect::<Vec<_>>()
                .join(", "),
            _ => format!("No formula for {potion}"),
        }
    }
}
