//! Tokenization and line classification.

mod command;
mod lexer;

pub use command::{ItemCount, Line, Question, Sentence, classify, classify_line};
pub use lexer::{Span, Token, tokenize};
