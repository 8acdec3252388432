use crate::{
    error::{Error, Result},
    sql::parser::lexer::{Token, TokenKind},
};

/// Cursor over the token sequence produced by the lexer
pub struct TokenList {
    tokens: Vec<Token>,
    next: usize,
    /// Character length of the input, reported for errors at end of input
    end: usize,
}

impl TokenList {
    pub fn new(tokens: Vec<Token>, end: usize) -> Self {
        Self {
            tokens,
            next: 0,
            end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.next >= self.tokens.len()
    }

    /// Number of tokens not yet consumed
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.next)
    }

    /// Offset of the next token, or of the end of input
    pub fn position(&self) -> usize {
        self.tokens.get(self.next).map_or(self.end, |t| t.from)
    }

    /// Peeks at the next token
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.next)
    }

    /// Peeks at the kind of the token after the next one
    pub fn peek_second(&self) -> Option<TokenKind> {
        self.tokens.get(self.next + 1).map(|t| t.kind)
    }

    /// Whether the next token is of the given kind
    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    /// Consumes and returns the next token, whatever it is
    pub fn next(&mut self) -> Result<Token> {
        let token = self
            .tokens
            .get(self.next)
            .cloned()
            .ok_or_else(|| Error::syntax(self.end, "unexpected end of input"))?;
        self.next += 1;
        Ok(token)
    }

    /// Consumes the next token if it is one of the expected kinds
    pub fn next_expect(&mut self, expected: &[TokenKind]) -> Result<Token> {
        let token = self.peek().ok_or_else(|| {
            Error::syntax(
                self.end,
                format!("unexpected end of input, expected {}", describe(expected)),
            )
        })?;
        if !expected.contains(&token.kind) {
            return Err(Error::syntax(
                token.from,
                format!("got {}, expected {}", token, describe(expected)),
            ));
        }
        self.next()
    }

    /// Consumes the next token if it matches the given kind
    pub fn next_if(&mut self, kind: TokenKind) -> Option<Token> {
        if !self.peek_is(kind) {
            return None;
        }
        self.next().ok()
    }
}

fn describe(expected: &[TokenKind]) -> String {
    match expected {
        [one] => one.to_string(),
        many => {
            let names: Vec<String> = many.iter().map(|k| k.to_string()).collect();
            format!("one of: {}", names.join(", "))
        }
    }
}
