//! Spoken arithmetic.
//!
//! An utterance like "what is ten divided by four" is stripped of its
//! command phrase, run through the lexicon and evaluated by a small
//! recursive-descent parser that only knows `+ - * /`, decimals and
//! unary signs. Nothing else is ever evaluated.

use super::lexicon::resolve_words;

const COMMAND_PHRASES: [&str; 3] = ["what is", "calculate", "solve"];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("expression contains characters other than digits and + - * /: {0:?}")]
    UnsupportedInput(String),
    #[error("malformed expression: {0}")]
    Malformed(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFinite,
}

/// Resolves a spoken arithmetic question to its numeric answer.
pub fn solve(utterance: &str) -> Result<f64, MathError> {
    let expression = to_expression(utterance);
    if !is_arithmetic(&expression) {
        return Err(MathError::UnsupportedInput(expression));
    }
    evaluate(&expression)
}

/// Strips command phrases and applies the lexicon, without evaluating.
pub fn to_expression(utterance: &str) -> String {
    let mut stripped = utterance.to_string();
    for phrase in COMMAND_PHRASES {
        stripped = stripped.replacen(phrase, "", 1);
    }
    resolve_words(stripped.trim())
}

/// True when `text` is non-empty and holds only digits, the four operators,
/// decimal points and spaces.
pub fn is_arithmetic(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '.' | ' '))
}

/// Renders an answer the way it is spoken back: shortest round-trip form,
/// never `-0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Op(char),
}

fn tokenize(expression: &str) -> Result<Vec<Token>, MathError> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' => {
                chars.next();
            }
            '+' | '-' | '*' | '/' => {
                tokens.push(Token::Op(c));
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| MathError::Malformed(format!("bad number '{}'", literal)))?;
                tokens.push(Token::Number(value));
            }
            other => return Err(MathError::UnsupportedInput(other.to_string())),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, MathError> {
        let mut value = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek().cloned() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<f64, MathError> {
        let mut value = self.unary()?;
        while let Some(Token::Op(op @ ('*' | '/'))) = self.peek().cloned() {
            self.pos += 1;
            let rhs = self.unary()?;
            if op == '*' {
                value *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(MathError::DivisionByZero);
                }
                value /= rhs;
            }
        }
        Ok(value)
    }

    // unary := ('+' | '-') unary | number
    fn unary(&mut self) -> Result<f64, MathError> {
        match self.next() {
            Some(Token::Op('-')) => Ok(-self.unary()?),
            Some(Token::Op('+')) => self.unary(),
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Op(op)) => {
                Err(MathError::Malformed(format!("unexpected operator '{}'", op)))
            }
            None => Err(MathError::Malformed("expression ends early".to_string())),
        }
    }
}

/// Evaluates an expression already restricted to the arithmetic alphabet.
pub fn evaluate(expression: &str) -> Result<f64, MathError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(MathError::Malformed("empty expression".to_string()));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;

    if parser.pos < parser.tokens.len() {
        return Err(MathError::Malformed(format!(
            "unexpected token at position {}",
            parser.pos
        )));
    }
    if !value.is_finite() {
        return Err(MathError::NonFinite);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spoken_sums() {
        assert_eq!(solve("two plus two"), Ok(4.0));
        assert_eq!(solve("what is 5 plus 7"), Ok(12.0));
        assert_eq!(solve("calculate twenty minus thirty"), Ok(-10.0));
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(evaluate("10 - 4 - 3"), Ok(3.0));
        assert_eq!(evaluate("100 / 10 / 5"), Ok(2.0));
        assert_eq!(evaluate("-5 + 3"), Ok(-2.0));
        assert_eq!(evaluate("5 * -2"), Ok(-10.0));
        assert_eq!(evaluate("1.5 * 2"), Ok(3.0));
    }

    #[test]
    fn division_by_zero_is_rejected() {
        assert_eq!(solve("ten divided by zero"), Err(MathError::DivisionByZero));
    }

    #[test]
    fn leftover_words_are_rejected() {
        assert!(matches!(solve("the game is over now"), Err(MathError::UnsupportedInput(_))));
    }

    #[test]
    fn malformed_shapes() {
        assert!(matches!(evaluate("2 100"), Err(MathError::Malformed(_))));
        assert!(matches!(evaluate("3 +"), Err(MathError::Malformed(_))));
        assert!(matches!(evaluate("1..2"), Err(MathError::Malformed(_))));
        assert!(matches!(evaluate("   "), Err(MathError::Malformed(_))));
        assert!(matches!(solve("solve"), Err(MathError::UnsupportedInput(_))));
    }

    #[test]
    fn answers_render_like_speech() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(10.0 / 3.0), "3.3333333333333335");
    }
}
