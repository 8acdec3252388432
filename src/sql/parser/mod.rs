use crate::error::{Error, Result};
use crate::sql::parser::ast::{BinaryOperator, Expression, FromItem, JoinType, SelectList, UnaryOperator};
use crate::sql::parser::cursor::TokenList;
use crate::sql::parser::lexer::{Keyword, TokenKind, tokenize};
use crate::sql::types::{Date, Decimal};

pub mod ast;
mod cursor;
pub mod lexer;

/// Parses a single SELECT statement
pub fn parse(input: &str) -> Result<ast::Statement> {
    Parser::new(input)?.parse()
}

/// SQL Parser - Converts tokens into Abstract Syntax Tree (AST)
///
/// Grammar:
///
/// ```text
/// Statement  := "select" SelectList "from" FromItem ("where" Expr)? ";"?
/// SelectList := "*" | (Expr ("," Expr)*)?
/// FromItem   := Ident (JoinType Ident "on" Expr)?
/// JoinType   := "join" | "left" "outer"? "join" | "right" "outer"? "join"
/// Expr       := Value (CompOp Value)? | Value "is" "not"? "null"
/// Value      := String | Number | "true" | "false" | "date" String | Ident ("." Ident)?
/// ```
pub struct Parser {
    tokens: TokenList,
}

impl Parser {
    /// Tokenizes the given SQL input
    pub fn new(input: &str) -> Result<Self> {
        let tokens = tokenize(input)?;
        Ok(Parser {
            tokens: TokenList::new(tokens, input.chars().count()),
        })
    }

    /// Parses the input SQL statement into an AST
    pub fn parse(&mut self) -> Result<ast::Statement> {
        let stmt = self.parse_select()?;
        self.tokens.next_if(TokenKind::Semicolon);
        // No tokens allowed after semicolon
        if let Some(token) = self.tokens.peek() {
            return Err(Error::syntax(
                token.from,
                format!("expected end of statement, got {}", token),
            ));
        }
        Ok(stmt)
    }

    /// Parses SELECT statement
    fn parse_select(&mut self) -> Result<ast::Statement> {
        self.next_keyword(Keyword::Select)?;
        let select = self.parse_select_list()?;
        self.next_keyword(Keyword::From)?;
        let from = self.parse_from_item()?;
        let where_clause = match self.tokens.next_if(TokenKind::Keyword(Keyword::Where)) {
            Some(_) => Some(self.parse_expression()?),
            None => None,
        };
        Ok(ast::Statement::Select {
            select,
            from,
            where_clause,
        })
    }

    /// Parses `*` or a comma-separated, possibly empty, expression list
    fn parse_select_list(&mut self) -> Result<SelectList> {
        if self.tokens.next_if(TokenKind::Asterisk).is_some() {
            return Ok(SelectList::Star);
        }
        let mut exprs = Vec::new();
        if self.tokens.is_empty() || self.tokens.peek_is(TokenKind::Keyword(Keyword::From)) {
            return Ok(SelectList::Expressions(exprs));
        }
        loop {
            exprs.push(self.parse_expression()?);
            if self.tokens.next_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        Ok(SelectList::Expressions(exprs))
    }

    /// Parses a table name, optionally joined with a second table
    fn parse_from_item(&mut self) -> Result<FromItem> {
        let left = FromItem::Table {
            name: self.next_ident()?,
        };
        let join_type = match self.parse_join_type()? {
            Some(join_type) => join_type,
            None => return Ok(left),
        };
        let right = FromItem::Table {
            name: self.next_ident()?,
        };
        self.next_keyword(Keyword::On)?;
        let predicate = self.parse_expression()?;
        Ok(FromItem::Join {
            left: Box::new(left),
            right: Box::new(right),
            join_type,
            predicate,
        })
    }

    fn parse_join_type(&mut self) -> Result<Option<JoinType>> {
        let join_type = match self.tokens.peek().map(|t| t.kind) {
            Some(TokenKind::Keyword(Keyword::Join)) => JoinType::Inner,
            Some(TokenKind::Keyword(Keyword::Left)) => JoinType::LeftOuter,
            Some(TokenKind::Keyword(Keyword::Right)) => JoinType::RightOuter,
            _ => return Ok(None),
        };
        if join_type != JoinType::Inner {
            self.tokens.next()?;
            self.tokens.next_if(TokenKind::Keyword(Keyword::Outer));
        }
        self.next_keyword(Keyword::Join)?;
        Ok(Some(join_type))
    }

    /// Parses a value, optionally compared with a second value or checked for null
    fn parse_expression(&mut self) -> Result<Expression> {
        let left = self.parse_value()?;

        if self.tokens.next_if(TokenKind::Keyword(Keyword::Is)).is_some() {
            let operator = match self.tokens.next_if(TokenKind::Keyword(Keyword::Not)) {
                Some(_) => UnaryOperator::IsNotNull,
                None => UnaryOperator::IsNull,
            };
            self.next_keyword(Keyword::Null)?;
            return Ok(Expression::Unary {
                operand: Box::new(left),
                operator,
            });
        }

        let operator = match self.tokens.peek().map(|t| t.kind) {
            Some(TokenKind::Equal) => BinaryOperator::Eq,
            Some(TokenKind::NotEqual) => BinaryOperator::Ne,
            Some(TokenKind::LessThan) => BinaryOperator::Lt,
            Some(TokenKind::GreaterThan) => BinaryOperator::Gt,
            Some(TokenKind::LessThanOrEqual) => BinaryOperator::Le,
            Some(TokenKind::GreaterThanOrEqual) => BinaryOperator::Ge,
            _ => return Ok(left),
        };
        self.tokens.next()?;
        let right = self.parse_value()?;
        Ok(Expression::binary(left, operator, right))
    }

    /// Parses a literal or a column reference
    fn parse_value(&mut self) -> Result<Expression> {
        let token = self.tokens.next_expect(&[
            TokenKind::String,
            TokenKind::Number,
            TokenKind::Keyword(Keyword::True),
            TokenKind::Keyword(Keyword::False),
            TokenKind::Ident,
        ])?;
        Ok(match token.kind {
            TokenKind::String => Expression::String(token.text),
            TokenKind::Number => {
                let number = token
                    .text
                    .parse::<Decimal>()
                    .map_err(|e| Error::syntax(token.from, e.to_string()))?;
                Expression::Number(number)
            }
            TokenKind::Keyword(Keyword::True) => Expression::Boolean(true),
            TokenKind::Keyword(Keyword::False) => Expression::Boolean(false),
            _ if token.text.eq_ignore_ascii_case("date") && self.tokens.peek_is(TokenKind::String) => {
                let literal = self.tokens.next()?;
                let date = literal
                    .text
                    .parse::<Date>()
                    .map_err(|e| Error::syntax(token.from, e.to_string()))?;
                Expression::Date(date)
            }
            _ => match self.tokens.next_if(TokenKind::Dot) {
                Some(_) => Expression::Column {
                    relation: Some(token.text),
                    name: self.next_ident()?,
                },
                None => Expression::Column {
                    relation: None,
                    name: token.text,
                },
            },
        })
    }

    /// Expects and consumes an identifier
    fn next_ident(&mut self) -> Result<String> {
        Ok(self.tokens.next_expect(&[TokenKind::Ident])?.text)
    }

    /// Expects and consumes a keyword
    fn next_keyword(&mut self, keyword: Keyword) -> Result<()> {
        self.tokens.next_expect(&[TokenKind::Keyword(keyword)])?;
        Ok(())
    }
}
