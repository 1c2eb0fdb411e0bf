use crate::calculator::CalcError;

pub fn validate(input: &str) -> Result<&str, CalcError> {
    let expr = input.trim();
    if expr.is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    match expr.chars().find(|&c| !is_allowed(c)) {
        Some(c) => Err(CalcError::InvalidCharacters(c)),
        None => Ok(expr),
    }
}

fn is_allowed(c: char) -> bool {
    matches!(c, '0'..='9' | '+' | '-' | '*' | '/' | '(' | ')' | '.') || c.is_whitespace()
}
