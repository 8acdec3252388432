//! SQL Lexer - Tokenizes SQL input text into a sequence of tokens
//!
//! The lexer is a small state machine over the characters of the input. Every token
//! records its character offsets (not byte offsets) so that errors can point back
//! into the original query text.

use std::fmt::Display;

use crate::error::{Error, Result};

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier such as table name or column name
    Ident,
    /// String literal, without the quotes
    String,
    /// Numeric literal; validated later by the decimal parser
    Number,
    Comma,
    Dot,
    Asterisk,
    Semicolon,
    OpenParen,
    CloseParen,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    /// SQL reserved keyword
    Keyword(Keyword),
}

impl TokenKind {
    /// Looks up a run of punctuation characters
    fn from_punctuation(text: &str) -> Option<TokenKind> {
        Some(match text {
            "," => TokenKind::Comma,
            "." => TokenKind::Dot,
            "*" => TokenKind::Asterisk,
            ";" => TokenKind::Semicolon,
            "(" => TokenKind::OpenParen,
            ")" => TokenKind::CloseParen,
            "=" => TokenKind::Equal,
            "!=" | "<>" => TokenKind::NotEqual,
            "<" => TokenKind::LessThan,
            ">" => TokenKind::GreaterThan,
            "<=" => TokenKind::LessThanOrEqual,
            ">=" => TokenKind::GreaterThanOrEqual,
            _ => return None,
        })
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TokenKind::Ident => "identifier",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Asterisk => "*",
            TokenKind::Semicolon => ";",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Equal => "=",
            TokenKind::NotEqual => "!=",
            TokenKind::LessThan => "<",
            TokenKind::GreaterThan => ">",
            TokenKind::LessThanOrEqual => "<=",
            TokenKind::GreaterThanOrEqual => ">=",
            TokenKind::Keyword(keyword) => keyword.to_str(),
        })
    }
}

/// SQL reserved keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Select,
    From,
    Where,
    And,
    Or,
    Not,
    Is,
    Null,
    Left,
    Right,
    Outer,
    Join,
    On,
    False,
    True,
}

impl Keyword {
    /// Attempts to parse a string as a keyword (case-insensitive)
    pub fn from_str(ident: &str) -> Option<Keyword> {
        Some(match ident.to_uppercase().as_ref() {
            "SELECT" => Keyword::Select,
            "FROM" => Keyword::From,
            "WHERE" => Keyword::Where,
            "AND" => Keyword::And,
            "OR" => Keyword::Or,
            "NOT" => Keyword::Not,
            "IS" => Keyword::Is,
            "NULL" => Keyword::Null,
            "LEFT" => Keyword::Left,
            "RIGHT" => Keyword::Right,
            "OUTER" => Keyword::Outer,
            "JOIN" => Keyword::Join,
            "ON" => Keyword::On,
            "FALSE" => Keyword::False,
            "TRUE" => Keyword::True,
            _ => return None,
        })
    }

    /// Returns the uppercase string representation of the keyword
    pub fn to_str(&self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::Is => "IS",
            Keyword::Null => "NULL",
            Keyword::Left => "LEFT",
            Keyword::Right => "RIGHT",
            Keyword::Outer => "OUTER",
            Keyword::Join => "JOIN",
            Keyword::On => "ON",
            Keyword::False => "FALSE",
            Keyword::True => "TRUE",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// A single lexical token with its source text and character offsets `[from, to)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub from: usize,
    pub to: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Ident | TokenKind::Number => write!(f, "{} {:?}", self.kind, self.text),
            TokenKind::String => write!(f, "string '{}'", self.text),
            kind => write!(f, "{}", kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Word,
    Punctuation,
    Number,
    String,
}

/// SQL lexical analyzer (lexer/tokenizer)
pub struct Lexer {
    input: Vec<char>,
    state: State,
    /// Start offset of the token being scanned
    from: usize,
    tokens: Vec<Token>,
}

/// Tokenizes the whole input
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).run()
}

impl Lexer {
    /// Creates a new lexer for the given SQL text
    pub fn new(sql_text: &str) -> Self {
        Self {
            input: sql_text.chars().collect(),
            state: State::Start,
            from: 0,
            tokens: Vec::new(),
        }
    }

    /// Runs the state machine to the end of the input
    pub fn run(mut self) -> Result<Vec<Token>> {
        // A trailing space flushes the last token
        for next in 0..=self.input.len() {
            let c = self.input.get(next).copied().unwrap_or(' ');
            self.step(next, c)?;
        }
        if self.state == State::String {
            return Err(Error::syntax(self.from, "unterminated string literal"));
        }
        Ok(self.tokens)
    }

    /// Feeds the character at offset `next` into the state machine
    fn step(&mut self, next: usize, c: char) -> Result<()> {
        match self.state {
            State::Start => self.dispatch(next, c),
            State::Word => {
                if is_word_char(c) {
                    return Ok(());
                }
                self.end_word(next);
                self.redispatch(next, c)
            }
            State::Number => {
                if is_digit_or_dot(c) {
                    return Ok(());
                }
                self.push_token(TokenKind::Number, self.from, next);
                self.redispatch(next, c)
            }
            State::Punctuation => {
                if is_punctuation(c) {
                    return Ok(());
                }
                self.end_punctuation(next)?;
                self.dispatch(next, c)
            }
            State::String => {
                if c == '\'' {
                    // Skip the opening quote
                    self.push_token(TokenKind::String, self.from + 1, next);
                    self.change_state(State::Start, next + 1);
                }
                Ok(())
            }
        }
    }

    /// Decides what kind of token starts at `c`
    fn dispatch(&mut self, next: usize, c: char) -> Result<()> {
        match c {
            c if is_space(c) => self.change_state(State::Start, next + 1),
            c if is_word_start(c) => self.change_state(State::Word, next),
            c if is_digit_or_dot(c) => self.change_state(State::Number, next),
            '\'' => self.change_state(State::String, next),
            c if is_punctuation(c) => self.change_state(State::Punctuation, next),
            c => return Err(Error::syntax(next, format!("unexpected character '{}'", c))),
        }
        Ok(())
    }

    /// After a word or number only whitespace or punctuation may follow
    fn redispatch(&mut self, next: usize, c: char) -> Result<()> {
        match c {
            c if is_space(c) => self.change_state(State::Start, next + 1),
            c if is_punctuation(c) => self.change_state(State::Punctuation, next),
            c => return Err(Error::syntax(next, format!("unexpected character '{}'", c))),
        }
        Ok(())
    }

    fn change_state(&mut self, state: State, from: usize) {
        self.state = state;
        self.from = from;
    }

    fn text(&self, from: usize, to: usize) -> String {
        self.input[from..to].iter().collect()
    }

    fn push_token(&mut self, kind: TokenKind, from: usize, to: usize) {
        let text = self.text(from, to);
        self.tokens.push(Token { kind, text, from, to });
    }

    fn end_word(&mut self, next: usize) {
        let word = self.text(self.from, next);
        let kind = Keyword::from_str(&word).map_or(TokenKind::Ident, TokenKind::Keyword);
        self.push_token(kind, self.from, next);
    }

    fn end_punctuation(&mut self, next: usize) -> Result<()> {
        let text = self.text(self.from, next);
        match TokenKind::from_punctuation(&text) {
            Some(kind) => {
                self.push_token(kind, self.from, next);
                Ok(())
            }
            None => Err(Error::syntax(self.from, format!("invalid SQL: {:?}", text))),
        }
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
    is_word_start(c) || c.is_ascii_digit() || c == '$'
}

fn is_digit_or_dot(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn is_punctuation(c: char) -> bool {
    matches!(c, ',' | '.' | ';' | '=' | '!' | '<' | '>' | '(' | ')' | '*')
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
