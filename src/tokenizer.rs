use compact_str::{CompactString, ToCompactString};
use thiserror::Error;

#[derive(Debug, Default)]
enum TokenizerState {
    #[default]
    Clean,
    InNumber(CompactString),
    InSymbol(Token),
}

#[derive(Debug, Default)]
pub struct Tokenizer {
    state: TokenizerState,
}

impl Tokenizer {
    pub fn update(&mut self, c: char) -> Result<Option<Token>, TokenizeError> {
        use TokenizerState::*;

        match self.state {
            Clean => match c {
                '0'..='9' | '.' => {
                    self.state = InNumber(c.to_compact_string());
                    Ok(None)
                }
                '+' => self.hold(Token::Op(Operation::Add)),
                '-' => self.hold(Token::Op(Operation::Sub)),
                '*' => self.hold(Token::Op(Operation::Mul)),
                '/' => self.hold(Token::Op(Operation::Div)),
                '(' => self.hold(Token::LParen),
                ')' => self.hold(Token::RParen),
                _ if c.is_whitespace() => Ok(None),
                _ => Err(TokenizeError::UnexpectedChar(c)),
            },
            InNumber(ref mut literal) => match c {
                '0'..='9' | '.' => {
                    literal.push(c);
                    Ok(None)
                }
                _ if c.is_whitespace() => self.finalize(),
                c => self.release_then(c),
            },
            // Symbols are always a single char
            InSymbol(_) => self.release_then(c),
        }
    }

    pub fn finalize(&mut self) -> Result<Option<Token>, TokenizeError> {
        use TokenizerState::*;

        match std::mem::take(&mut self.state) {
            Clean => Ok(None),
            InNumber(literal) => match literal.parse::<Value>() {
                Ok(value) if value.is_finite() && !has_leading_zeros(&literal) => {
                    Ok(Some(Token::Num(value)))
                }
                _ => Err(TokenizeError::InvalidNumber(literal)),
            },
            InSymbol(token) => Ok(Some(token)),
        }
    }

    fn hold(&mut self, token: Token) -> Result<Option<Token>, TokenizeError> {
        self.state = TokenizerState::InSymbol(token);
        Ok(None)
    }

    // Updating from a clean state never yields a token
    fn release_then(&mut self, c: char) -> Result<Option<Token>, TokenizeError> {
        let token = self.finalize()?;
        self.update(c)?;
        Ok(token)
    }
}

// `007` is rejected, while `0`, `00` and `007.5` are fine
fn has_leading_zeros(literal: &str) -> bool {
    literal.starts_with('0')
        && !literal.contains('.')
        && literal.bytes().any(|b| b != b'0')
}

pub fn tokenize(expr: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut tokens = vec![];
    let mut tokenizer = Tokenizer::default();
    for c in expr.chars() {
        if let Some(token) = tokenizer.update(c)? {
            tokens.push(token)
        }
    }
    if let Some(token) = tokenizer.finalize()? {
        tokens.push(token)
    }
    Ok(tokens)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("Unexpected character: {0:?}")]
    UnexpectedChar(char),
    #[error("Invalid number: {0}")]
    InvalidNumber(CompactString),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Num(Value),
    Op(Operation),
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

pub type Value = f64;
