use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Byte range of a token in the raw input line.
pub type Span = Range<usize>;

/// Token type for the tracker's line grammar.
///
/// The lexer is deliberately simple — all keyword recognition happens in
/// the classifier. Words like "loots", "trophy", "potion" are all
/// `Token::Word`; only the two separator characters get their own tokens,
/// because the grammar positions them explicitly (commas between item
/// groups, the question mark closing a query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Comma separator `,`.
    Comma,
    /// Question mark `?` (marks a line as a query).
    Question,
    /// Any other run of non-separator characters — names, keywords, and
    /// counts alike. Validity is the classifier's job.
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Comma => write!(f, ","),
            Token::Question => write!(f, "?"),
            Token::Word(w) => write!(f, "{w}"),
        }
    }
}

/// Internal logos token — borrows from the line to avoid allocations
/// during lexing. Converted to an owned `Token` afterwards.
#[derive(Logos, Debug)]
#[logos(skip r"\s+")]
enum RawToken {
    #[token(",")]
    Comma,

    #[token("?")]
    Question,

    #[regex(r"[^\s,?]+")]
    Word,
}

/// Split a raw line into `(Token, Span)` pairs.
///
/// Splits on runs of whitespace; each `,` and `?` becomes its own token
/// even without surrounding whitespace. This is a total function: the word
/// rule covers every non-separator character, so any string tokenizes and
/// empty input yields an empty stream. Spans index into the raw line and
/// let the classifier inspect the original spacing of multi-word names.
pub fn tokenize(line: &str) -> Vec<(Token, Span)> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(line);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let token = match result {
            Ok(RawToken::Comma) => Token::Comma,
            Ok(RawToken::Question) => Token::Question,
            // The word rule is a catch-all, so the error arm is unreachable;
            // mapping it to a word keeps the conversion total.
            Ok(RawToken::Word) | Err(_) => Token::Word(lexer.slice().to_string()),
        };
        tokens.push((token, span));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(line: &str) -> Vec<Token> {
        tokenize(line).into_iter().map(|(token, _)| token).collect()
    }

    fn word(w: &str) -> Token {
        Token::Word(w.to_string())
    }

    #[test]
    fn splits_on_whitespace_runs() {
        assert_eq!(
            words("Geralt   loots\t5 Rebis"),
            [word("Geralt"), word("loots"), word("5"), word("Rebis")]
        );
    }

    #[test]
    fn comma_is_standalone_even_unspaced() {
        assert_eq!(
            words("5 Rebis,3 Vitriol"),
            [
                word("5"),
                word("Rebis"),
                Token::Comma,
                word("3"),
                word("Vitriol")
            ]
        );
    }

    #[test]
    fn question_mark_is_standalone() {
        assert_eq!(
            words("Total ingredient?"),
            [word("Total"), word("ingredient"), Token::Question]
        );
    }

    #[test]
    fn other_punctuation_stays_inside_words() {
        assert_eq!(words("3.5 semi-colon;"), [word("3.5"), word("semi-colon;")]);
    }

    #[test]
    fn empty_and_blank_lines_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t  ").is_empty());
    }

    #[test]
    fn spans_preserve_original_spacing() {
        let line = "Geralt brews Black  Blood";
        let tokens = tokenize(line);
        let (Token::Word(black), black_span) = &tokens[2] else {
            panic!("expected a word");
        };
        let (Token::Word(blood), blood_span) = &tokens[3] else {
            panic!("expected a word");
        };
        assert_eq!(black, "Black");
        assert_eq!(blood, "Blood");
        // The gap between the two spans is the doubled space.
        assert_eq!(blood_span.start - black_span.end, 2);
    }

    proptest! {
        #[test]
        fn tokenize_is_total(line in ".*") {
            for (token, span) in tokenize(&line) {
                prop_assert!(span.start < span.end);
                if let Token::Word(w) = token {
                    prop_assert!(!w.chars().any(char::is_whitespace));
                    prop_assert!(!w.contains(','));
                    prop_assert!(!w.contains('?'));
                }
            }
        }

        #[test]
        fn spans_slice_back_to_token_text(line in ".*") {
            for (token, span) in tokenize(&line) {
                let slice = &line[span];
                match token {
                    Token::Comma => prop_assert_eq!(slice, ","),
                    Token::Question => prop_assert_eq!(slice, "?"),
                    Token::Word(w) => prop_assert_eq!(slice, w),
                }
            }
        }
    }
}
