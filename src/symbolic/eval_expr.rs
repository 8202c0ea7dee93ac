//! Tokenizing evaluator for expressions without unknowns.
//!
//! Characters are classified as operator, letter, digit or separator and
//! maximal runs become tokens. Evaluation walks the tokens left to right and
//! applies every operator as soon as its right operand is known, so there is no
//! precedence: `2+3*4` is 20 and `2^3^2` is 64. Parentheses group.
use crate::numerical::errors::EquationError;
use crate::numerical::solution::fmt_number;
use crate::numerical::tolerances::is_zero;
use crate::symbolic::utils::check_nesting;
use log::debug;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(char),
    Open,
    Close,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(v) => write!(f, "{}", v),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Operator,
    Letter,
    Digit,
    Separator,
}

fn classify_char(c: char) -> CharClass {
    match c {
        '+' | '-' | '*' | '/' | '^' => CharClass::Operator,
        '0'..='9' | '.' => CharClass::Digit,
        c if c.is_alphabetic() => CharClass::Letter,
        _ => CharClass::Separator,
    }
}

/// result of an evaluation with the operations that led to it
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    pub steps: Vec<String>,
}

fn malformed(msg: impl Into<String>) -> EquationError {
    EquationError::Extraction(msg.into())
}

pub fn tokenize(text: &str) -> Result<Vec<Token>, EquationError> {
    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match classify_char(c) {
            CharClass::Digit => {
                let start = i;
                while i < chars.len() && classify_char(chars[i]) == CharClass::Digit {
                    i += 1;
                }
                let run: String = chars[start..i].iter().collect();
                let value = run
                    .parse::<f64>()
                    .map_err(|_| malformed(format!("'{}' is not a number", run)))?;
                tokens.push(Token::Number(value));
                continue;
            }
            CharClass::Operator => tokens.push(Token::Operator(c)),
            CharClass::Letter => {
                let start = i;
                while i < chars.len() && classify_char(chars[i]) == CharClass::Letter {
                    i += 1;
                }
                let run: String = chars[start..i].iter().collect();
                return Err(malformed(format!(
                    "'{}' cannot be evaluated as a number",
                    run
                )));
            }
            CharClass::Separator => match c {
                '(' => tokens.push(Token::Open),
                ')' => tokens.push(Token::Close),
                '²' => tokens.extend([Token::Operator('^'), Token::Number(2.0)]),
                '³' => tokens.extend([Token::Operator('^'), Token::Number(3.0)]),
                other => {
                    return Err(malformed(format!(
                        "'{}' is not supported in a plain expression",
                        other
                    )));
                }
            },
        }
        i += 1;
    }
    Ok(tokens)
}

fn apply(lhs: f64, op: char, rhs: f64) -> Result<f64, EquationError> {
    match op {
        '+' => Ok(lhs + rhs),
        '-' => Ok(lhs - rhs),
        '*' => Ok(lhs * rhs),
        '/' if is_zero(rhs) => Err(malformed(format!("division by zero in {} / {}", lhs, rhs))),
        '/' => Ok(lhs / rhs),
        '^' => Ok(lhs.powf(rhs)),
        other => Err(malformed(format!("unknown operator '{}'", other))),
    }
}

struct Evaluator<'a> {
    tokens: &'a [Token],
    pos: usize,
    steps: Vec<String>,
}

impl<'a> Evaluator<'a> {
    /// a number, a parenthesized group, or a signed operand
    fn operand(&mut self) -> Result<f64, EquationError> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        match token {
            Some(Token::Number(v)) => Ok(v),
            Some(Token::Open) => {
                let value = self.sequence()?;
                match self.tokens.get(self.pos) {
                    Some(Token::Close) => {
                        self.pos += 1;
                        Ok(value)
                    }
                    _ => Err(malformed("missing ')'")),
                }
            }
            Some(Token::Operator('-')) => Ok(-self.operand()?),
            Some(Token::Operator('+')) => self.operand(),
            Some(other) => Err(malformed(format!("unexpected '{}'", other))),
            None => Err(malformed("the expression ends with an operator")),
        }
    }

    /// operand (operator operand)*, applied strictly left to right
    fn sequence(&mut self) -> Result<f64, EquationError> {
        let mut acc = self.operand()?;
        while let Some(token) = self.tokens.get(self.pos).copied() {
            match token {
                Token::Close => break,
                Token::Operator(op) => {
                    self.pos += 1;
                    let rhs = self.operand()?;
                    let value = apply(acc, op, rhs)?;
                    self.steps.push(format!(
                        "{} {} {} = {}",
                        fmt_number(acc, 10),
                        op,
                        fmt_number(rhs, 10),
                        fmt_number(value, 10)
                    ));
                    acc = value;
                }
                other => {
                    return Err(malformed(format!("missing operator before '{}'", other)));
                }
            }
        }
        Ok(acc)
    }
}

/// evaluates a variable-free expression left to right
pub fn evaluate_expression(text: &str) -> Result<Evaluation, EquationError> {
    check_nesting(text).map_err(malformed)?;
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(malformed("nothing to evaluate"));
    }
    let listed: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    let mut evaluator = Evaluator {
        tokens: &tokens,
        pos: 0,
        steps: vec![format!("tokens: {}", listed.join(" "))],
    };
    let value = evaluator.sequence()?;
    if evaluator.pos < tokens.len() {
        return Err(malformed(format!(
            "unexpected '{}' after the expression",
            tokens[evaluator.pos]
        )));
    }
    debug!("{} evaluates to {}", text, value);
    Ok(Evaluation {
        value,
        steps: evaluator.steps,
    })
}
