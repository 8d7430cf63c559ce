use std::ops::Range;

use crate::parser::lexer::{Span, Token, tokenize};

/// A requested amount of one named item, as written in a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCount {
    /// Item name (an ingredient or a monster, depending on context).
    pub name: String,
    /// Requested amount, always positive.
    pub count: u64,
}

/// An action line. Executing one mutates the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentence {
    /// `Geralt loots <count> <ingredient>, <count> <ingredient>, …`
    Loot {
        /// Looted ingredients in sentence order.
        haul: Vec<ItemCount>,
    },
    /// `Geralt trades <count> <monster>, … <count> <monster> trophy for
    /// <count> <ingredient>, …`
    Trade {
        /// Trophies offered, in sentence order.
        trophies: Vec<ItemCount>,
        /// Ingredients received in exchange.
        ingredients: Vec<ItemCount>,
    },
    /// `Geralt brews <potion>`
    Brew {
        /// Potion name; may contain single internal spaces.
        potion: String,
    },
    /// `Geralt learns <sign> sign is effective against <monster>`
    SignKnowledge {
        /// Sign name.
        sign: String,
        /// Monster the sign works against.
        monster: String,
    },
    /// `Geralt learns <potion> potion is effective against <monster>`
    PotionKnowledge {
        /// Potion name.
        potion: String,
        /// Monster the potion works against.
        monster: String,
    },
    /// `Geralt learns <potion> potion consists of <count> <ingredient>, …`
    PotionRecipe {
        /// Potion name.
        potion: String,
        /// Formula ingredients in sentence order, duplicates preserved.
        ingredients: Vec<ItemCount>,
    },
    /// `Geralt encounters a <monster>`
    Encounter {
        /// Monster encountered.
        monster: String,
    },
}

/// A query line. Answering one never mutates the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    /// `Total ingredient <name> ?`
    IngredientCount {
        /// Ingredient name.
        name: String,
    },
    /// `Total ingredient ?`
    AllIngredients,
    /// `Total potion <name…> ?`
    PotionCount {
        /// Potion name.
        name: String,
    },
    /// `Total potion ?`
    AllPotions,
    /// `Total trophy <name> ?`
    TrophyCount {
        /// Monster name.
        name: String,
    },
    /// `Total trophy ?`
    AllTrophies,
    /// `What is effective against <monster> ?`
    MonsterKnowledge {
        /// Monster name.
        monster: String,
    },
    /// `What is in <potion…> ?`
    PotionFormula {
        /// Potion name.
        potion: String,
    },
}

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// The session terminator. Produces no output.
    Exit,
    /// A valid action sentence.
    Sentence(Sentence),
    /// A valid question.
    Question(Question),
    /// Anything that fits no recognized form. The reply is `INVALID`.
    Invalid,
}

/// Tokenize and classify one raw input line.
pub fn classify_line(line: &str) -> Line {
    classify(&tokenize(line), line)
}

/// Classify a token stream against the raw line it was lexed from.
///
/// Dispatch order: empty input is invalid; the lone word `Exit` ends the
/// session; a line whose last token is `?` is only ever a question (a
/// failed question never falls back to sentence parsing); everything else
/// is tried as a sentence.
pub fn classify(tokens: &[(Token, Span)], line: &str) -> Line {
    let t = Tokens { tokens, line };
    if t.is_empty() {
        return Line::Invalid;
    }
    if t.len() == 1 && t.is_word(0, "Exit") {
        return Line::Exit;
    }
    if t.is_question(t.len() - 1) {
        return match question(&t) {
            Some(q) => Line::Question(q),
            None => Line::Invalid,
        };
    }
    match sentence(&t) {
        Some(s) => Line::Sentence(s),
        None => Line::Invalid,
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

fn question(t: &Tokens) -> Option<Question> {
    match t.word(0)? {
        "Total" => total_question(t),
        "What" => what_question(t),
        _ => None,
    }
}

fn total_question(t: &Tokens) -> Option<Question> {
    match t.word(1)? {
        // `Total ingredient ?` / `Total ingredient <name> ?`
        "ingredient" => match t.len() {
            3 => Some(Question::AllIngredients),
            4 => Some(Question::IngredientCount {
                name: t.alpha_word(2)?.to_string(),
            }),
            _ => None,
        },
        // `Total potion ?` / `Total potion <name…> ?`
        "potion" => {
            if t.len() == 3 {
                return Some(Question::AllPotions);
            }
            Some(Question::PotionCount {
                name: t.name(2..t.len() - 1)?,
            })
        }
        // `Total trophy ?` / `Total trophy <name> ?`
        "trophy" => match t.len() {
            3 => Some(Question::AllTrophies),
            4 => Some(Question::TrophyCount {
                name: t.alpha_word(2)?.to_string(),
            }),
            _ => None,
        },
        _ => None,
    }
}

fn what_question(t: &Tokens) -> Option<Question> {
    // `What is effective against <monster> ?` — exactly six tokens.
    if t.len() == 6 && t.is_word(1, "is") && t.is_word(2, "effective") && t.is_word(3, "against") {
        return Some(Question::MonsterKnowledge {
            monster: t.alpha_word(4)?.to_string(),
        });
    }
    // `What is in <potion…> ?` — the name runs to the closing `?`.
    if t.is_word(1, "is") && t.is_word(2, "in") {
        return Some(Question::PotionFormula {
            potion: t.name(3..t.len() - 1)?,
        });
    }
    None
}

// ---------------------------------------------------------------------------
// Sentences
// ---------------------------------------------------------------------------

/// Index of the verb in every sentence form (`Geralt <verb> …`).
const VERB: usize = 1;
/// First payload token, after subject and verb.
const PAYLOAD: usize = 2;

fn sentence(t: &Tokens) -> Option<Sentence> {
    // Shared shape: `Geralt <verb> <payload…>` where the payload neither
    // starts nor the line ends with a comma.
    if !t.is_word(0, "Geralt") || t.len() < 3 {
        return None;
    }
    if t.is_comma(PAYLOAD) || t.is_comma(t.len() - 1) {
        return None;
    }
    match t.word(VERB)? {
        "loots" => Some(Sentence::Loot {
            haul: item_groups(t, PAYLOAD)?,
        }),
        "trades" => trade(t),
        "brews" => Some(Sentence::Brew {
            potion: t.name(PAYLOAD..t.len())?,
        }),
        "learns" => learns(t),
        "encounters" => encounter(t),
        _ => None,
    }
}

fn trade(t: &Tokens) -> Option<Sentence> {
    // Trophy section: comma-separated (count, monster) pairs; the final
    // pair is closed by the literal `trophy` and then `for`.
    let mut trophies = Vec::new();
    let mut i = PAYLOAD;
    loop {
        let count = t.count(i)?;
        let name = t.alpha_word(i + 1)?.to_string();
        trophies.push(ItemCount { name, count });
        if t.is_word(i + 3, "for") {
            if !t.is_word(i + 2, "trophy") {
                return None;
            }
            i += 4;
            break;
        }
        if !t.is_comma(i + 2) {
            return None;
        }
        i += 3;
    }
    // Ingredient section: same shape as a loot haul.
    Some(Sentence::Trade {
        trophies,
        ingredients: item_groups(t, i)?,
    })
}

fn learns(t: &Tokens) -> Option<Sentence> {
    // Every learnable fact needs at least eight tokens; shorter lines
    // cannot carry any of the three forms.
    if t.len() < 8 {
        return None;
    }
    if t.is_word(3, "sign") {
        return sign_knowledge(t);
    }
    // The two potion forms share a prefix: the potion name is everything
    // before the first `potion` keyword.
    let keyword = (PAYLOAD..t.len()).find(|&i| t.is_word(i, "potion"))?;
    let potion = t.name(PAYLOAD..keyword)?;
    if t.is_word(keyword + 1, "is") {
        return potion_knowledge(t, keyword, potion);
    }
    if t.is_word(keyword + 1, "consists") && t.is_word(keyword + 2, "of") {
        return Some(Sentence::PotionRecipe {
            potion,
            ingredients: item_groups(t, keyword + 3)?,
        });
    }
    None
}

/// `Geralt learns <sign> sign is effective against <monster>` positions.
const SIGN_NAME: usize = 2;
/// Monster position in the sign-knowledge form.
const SIGN_MONSTER: usize = 7;
/// Token count of the sign-knowledge form.
const SIGN_LEN: usize = 8;

fn sign_knowledge(t: &Tokens) -> Option<Sentence> {
    if t.len() != SIGN_LEN {
        return None;
    }
    if !t.is_word(4, "is") || !t.is_word(5, "effective") || !t.is_word(6, "against") {
        return None;
    }
    Some(Sentence::SignKnowledge {
        sign: t.alpha_word(SIGN_NAME)?.to_string(),
        monster: t.alpha_word(SIGN_MONSTER)?.to_string(),
    })
}

fn potion_knowledge(t: &Tokens, keyword: usize, potion: String) -> Option<Sentence> {
    if !t.is_word(keyword + 2, "effective") || !t.is_word(keyword + 3, "against") {
        return None;
    }
    let monster = t.alpha_word(keyword + 4)?;
    // The monster is tied to the final token by value, not by position.
    if t.word(t.len() - 1) != Some(monster) {
        return None;
    }
    Some(Sentence::PotionKnowledge {
        potion,
        monster: monster.to_string(),
    })
}

fn encounter(t: &Tokens) -> Option<Sentence> {
    // `Geralt encounters a <monster>` — exactly four tokens.
    if t.len() != 4 || !t.is_word(PAYLOAD, "a") {
        return None;
    }
    Some(Sentence::Encounter {
        monster: t.alpha_word(3)?.to_string(),
    })
}

/// Parse `<count> <name>, <count> <name>, … <count> <name>` running from
/// `start` to the end of the line — the shape shared by loot hauls, trade
/// ingredient sections, and recipe ingredient lists. The comma belongs to
/// every group but the last, so the region length must be ≡ 2 (mod 3).
fn item_groups(t: &Tokens, start: usize) -> Option<Vec<ItemCount>> {
    let region = t.len().checked_sub(start)?;
    if region % 3 != 2 {
        return None;
    }
    let mut items = Vec::new();
    let mut i = start;
    while i < t.len() {
        let count = t.count(i)?;
        let name = t.alpha_word(i + 1)?.to_string();
        if i + 2 < t.len() && !t.is_comma(i + 2) {
            return None;
        }
        items.push(ItemCount { name, count });
        i += 3;
    }
    Some(items)
}

// ---------------------------------------------------------------------------
// Token-stream view
// ---------------------------------------------------------------------------

/// The token stream plus the raw line it came from.
///
/// Classification is positional, so everything here is index-based; the raw
/// line is only consulted by [`Tokens::name`] to check original spacing.
struct Tokens<'a> {
    tokens: &'a [(Token, Span)],
    line: &'a str,
}

impl<'a> Tokens<'a> {
    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn word(&self, i: usize) -> Option<&'a str> {
        match self.tokens.get(i) {
            Some((Token::Word(w), _)) => Some(w.as_str()),
            _ => None,
        }
    }

    fn is_word(&self, i: usize, expected: &str) -> bool {
        self.word(i) == Some(expected)
    }

    fn is_comma(&self, i: usize) -> bool {
        matches!(self.tokens.get(i), Some((Token::Comma, _)))
    }

    fn is_question(&self, i: usize) -> bool {
        matches!(self.tokens.get(i), Some((Token::Question, _)))
    }

    /// Word at `i`, required to be letters only.
    fn alpha_word(&self, i: usize) -> Option<&'a str> {
        self.word(i).filter(|w| w.chars().all(char::is_alphabetic))
    }

    /// Positive count at `i`: digits only, fits the count type, nonzero.
    /// Digits are checked before conversion so the engine never sees a
    /// count that could fail to convert.
    fn count(&self, i: usize) -> Option<u64> {
        let word = self.word(i)?;
        if !word.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        word.parse::<u64>().ok().filter(|&count| count > 0)
    }

    /// Extract a multi-word name spanning the token `range`.
    ///
    /// The range must be non-empty and all letters, and the raw-line region
    /// it covers must contain no two consecutive whitespace characters —
    /// tokenization would have collapsed a doubled space silently, and a
    /// name's internal spacing must be exactly one space.
    fn name(&self, range: Range<usize>) -> Option<String> {
        if range.is_empty() {
            return None;
        }
        let words: Vec<&str> = range
            .clone()
            .map(|i| self.alpha_word(i))
            .collect::<Option<_>>()?;
        let first = &self.tokens[range.start].1;
        let last = &self.tokens[range.end - 1].1;
        let raw = &self.line[first.start..last.end];
        let doubled = raw
            .chars()
            .zip(raw.chars().skip(1))
            .any(|(a, b)| a.is_whitespace() && b.is_whitespace());
        if doubled {
            return None;
        }
        Some(words.join(" "))
    }
}
