use crate::tokenizer::{self, Operation, Token, TokenizeError, Value};
use crate::validator;
use compact_str::CompactString;
use thiserror::Error;
use tracing::{debug, trace};

pub const MAX_DEPTH: usize = 256;

pub fn evaluate(input: &str) -> Result<Value, CalcError> {
    let expr = validator::validate(input)?;
    debug!(expr, "evaluating");

    let tokens = tokenizer::tokenize(expr)?;
    let value = Calculator::new(&tokens).run()?;

    debug!(value, "evaluated");
    Ok(value)
}

// sum     := product (('+' | '-') product)*
// product := unary (('*' | '/') unary)*
// unary   := '-' unary | primary
// primary := number | '(' sum ')'
#[derive(Debug)]
struct Calculator<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    // Reported only once the whole input is known to be well formed
    division_by_zero: bool,
}

impl<'a> Calculator<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            division_by_zero: false,
        }
    }

    fn run(mut self) -> Result<Value, CalcError> {
        let value = self.sum()?;

        match self.peek() {
            None => {}
            Some(Token::RParen) => return Err(Malformed::UnbalancedParentheses.into()),
            Some(_) => return Err(Malformed::OperationExpected.into()),
        }

        if self.division_by_zero {
            return Err(CalcError::DivisionByZero);
        }
        if !value.is_finite() {
            return Err(Malformed::OutOfRange.into());
        }
        Ok(value)
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn sum(&mut self) -> Result<Value, Malformed> {
        let mut l = self.product()?;
        while let Some(Token::Op(op @ (Operation::Add | Operation::Sub))) = self.peek() {
            self.pos += 1;
            let r = self.product()?;
            l = self.execute(Action { l, op }, r);
        }
        Ok(l)
    }

    fn product(&mut self) -> Result<Value, Malformed> {
        let mut l = self.unary()?;
        while let Some(Token::Op(op @ (Operation::Mul | Operation::Div))) = self.peek() {
            self.pos += 1;
            let r = self.unary()?;
            l = self.execute(Action { l, op }, r);
        }
        Ok(l)
    }

    fn unary(&mut self) -> Result<Value, Malformed> {
        if let Some(Token::Op(Operation::Sub)) = self.peek() {
            self.pos += 1;
            let v = self.nested(Self::unary)?;
            return Ok(-v);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Value, Malformed> {
        match self.bump() {
            Some(Token::Num(v)) => Ok(v),
            Some(Token::LParen) => {
                if let Some(Token::RParen) = self.peek() {
                    return Err(Malformed::EmptyParentheses);
                }
                let v = self.nested(Self::sum)?;
                match self.bump() {
                    Some(Token::RParen) => Ok(v),
                    None => Err(Malformed::UnbalancedParentheses),
                    Some(_) => Err(Malformed::OperationExpected),
                }
            }
            Some(Token::Op(_) | Token::RParen) | None => Err(Malformed::NumberExpected),
        }
    }

    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<Value, Malformed>,
    ) -> Result<Value, Malformed> {
        if self.depth >= MAX_DEPTH {
            return Err(Malformed::TooDeep);
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn execute(&mut self, action: Action, r: Value) -> Value {
        trace!(l = action.l, op = ?action.op, r, "execute");
        action.execute(r).unwrap_or_else(|| {
            self.division_by_zero = true;
            Value::NAN
        })
    }
}

#[derive(Debug)]
struct Action {
    l: Value,
    op: Operation,
}

impl Action {
    fn execute(self, r: Value) -> Option<Value> {
        match self.op {
            Operation::Add => Some(self.l + r),
            Operation::Sub => Some(self.l - r),
            Operation::Mul => Some(self.l * r),
            Operation::Div if r == 0.0 => None,
            Operation::Div => Some(self.l / r),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("Empty expression")]
    EmptyExpression,
    #[error("Invalid characters in expression. Only numbers and operators (+, -, *, /, parentheses) are allowed. Found {0:?}")]
    InvalidCharacters(char),
    #[error("Division by zero is not allowed")]
    DivisionByZero,
    #[error("Invalid mathematical expression: {0}")]
    MalformedExpression(#[from] Malformed),
}

impl From<TokenizeError> for CalcError {
    fn from(e: TokenizeError) -> Self {
        match e {
            TokenizeError::UnexpectedChar(c) => CalcError::InvalidCharacters(c),
            TokenizeError::InvalidNumber(literal) => Malformed::InvalidNumber(literal).into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    #[error("number expected")]
    NumberExpected,
    #[error("operation expected")]
    OperationExpected,
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("empty parentheses")]
    EmptyParentheses,
    #[error("invalid number {0}")]
    InvalidNumber(CompactString),
    #[error("nested too deeply")]
    TooDeep,
    #[error("result out of range")]
    OutOfRange,
}
