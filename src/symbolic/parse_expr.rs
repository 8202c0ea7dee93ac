//! a module turns a normalized equation string into the typed `Expr` tree
//!
//! Recursive descent, lowest precedence first:
//! ```text
//!   sum     := product (('+' | '-') product)*
//!   product := signed (('*' | '/') signed | power)*      -- a bare power is implicit multiplication: 2x, 3(x+1), 2|x|
//!   signed  := ('+' | '-') signed | power
//!   power   := atom ('²' | '³' | '^' integer)*
//!   atom    := number | x | y | z | '(' sum ')' | '|' sum '|' | '√' power
//! ```
//! Inside |…| a '|' closes the absolute value, so it never starts an implicit product there;
//! parentheses reset that rule.
use crate::numerical::errors::EquationError;
use crate::symbolic::symbolic_engine::{Equation, Expr, Variable};
use crate::symbolic::utils::{check_nesting, find_char_positions_outside_brackets};
use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{map, map_res, not, opt, recognize},
    sequence::{delimited, preceded, terminated},
};

fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        alt((
            recognize((digit1, opt((char('.'), digit0)))),
            recognize((char('.'), digit1)),
        )),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

fn variable(input: &str) -> IResult<&str, Variable> {
    map(one_of("xyz"), |c| match c {
        'x' => Variable::X,
        'y' => Variable::Y,
        _ => Variable::Z,
    })
    .parse(input)
}

/// integer exponent after '^'; "2.5" is not one
fn exponent(input: &str) -> IResult<&str, u32> {
    terminated(map_res(digit1, |s: &str| s.parse::<u32>()), not(char('.'))).parse(input)
}

fn additive_op(input: &str) -> IResult<&str, char> {
    one_of("+-").parse(input)
}

fn multiplicative_op(input: &str) -> IResult<&str, char> {
    one_of("*/").parse(input)
}

fn starts_atom(input: &str, abs_depth: usize) -> bool {
    match input.chars().next() {
        Some(c) => {
            c.is_ascii_digit() || matches!(c, '.' | 'x' | 'y' | 'z' | '(' | '√') || (c == '|' && abs_depth == 0)
        }
        None => false,
    }
}

fn sum(input: &str, abs_depth: usize) -> IResult<&str, Expr> {
    let (mut rest, mut acc) = product(input, abs_depth)?;
    while let Ok((after_op, op)) = additive_op(rest) {
        let (after_rhs, rhs) = product(after_op, abs_depth)?;
        acc = if op == '+' { acc + rhs } else { acc - rhs };
        rest = after_rhs;
    }
    Ok((rest, acc))
}

fn product(input: &str, abs_depth: usize) -> IResult<&str, Expr> {
    let (mut rest, mut acc) = signed(input, abs_depth)?;
    loop {
        if let Ok((after_op, op)) = multiplicative_op(rest) {
            let (after_rhs, rhs) = signed(after_op, abs_depth)?;
            acc = if op == '*' { acc * rhs } else { acc / rhs };
            rest = after_rhs;
        } else if starts_atom(rest, abs_depth) {
            let (after_rhs, rhs) = power(rest, abs_depth)?;
            acc = acc * rhs;
            rest = after_rhs;
        } else {
            break;
        }
    }
    Ok((rest, acc))
}

fn signed(input: &str, abs_depth: usize) -> IResult<&str, Expr> {
    if let Ok((rest, op)) = additive_op(input) {
        let (rest, inner) = signed(rest, abs_depth)?;
        return Ok((rest, if op == '-' { -inner } else { inner }));
    }
    power(input, abs_depth)
}

fn power(input: &str, abs_depth: usize) -> IResult<&str, Expr> {
    let (mut rest, mut base) = atom(input, abs_depth)?;
    loop {
        if let Some(after) = rest.strip_prefix('²') {
            base = Expr::Pow(base.boxed(), 2);
            rest = after;
        } else if let Some(after) = rest.strip_prefix('³') {
            base = Expr::Pow(base.boxed(), 3);
            rest = after;
        } else if let Ok((after, n)) = preceded(char('^'), exponent).parse(rest) {
            base = Expr::Pow(base.boxed(), n);
            rest = after;
        } else {
            break;
        }
    }
    Ok((rest, base))
}

fn atom(input: &str, abs_depth: usize) -> IResult<&str, Expr> {
    alt((
        map(number, Expr::Const),
        map(variable, Expr::Var),
        delimited(char('('), |i| sum(i, 0), char(')')),
        map(
            delimited(char('|'), |i| sum(i, abs_depth + 1), char('|')),
            |e| Expr::Abs(e.boxed()),
        ),
        map(preceded(char('√'), |i| power(i, abs_depth)), |e| {
            Expr::Sqrt(e.boxed())
        }),
    ))
    .parse(input)
}

/// parses one side of an equation; the whole text has to be consumed
pub fn parse_side(text: &str) -> Result<Expr, EquationError> {
    if text.is_empty() {
        return Err(EquationError::Extraction(
            "one side of the equation is empty".to_string(),
        ));
    }
    check_nesting(text).map_err(EquationError::Extraction)?;
    match sum(text, 0) {
        Ok(("", expr)) => Ok(expr),
        Ok((rest, _)) => Err(EquationError::Extraction(format!(
            "unexpected '{}' in '{}'",
            rest, text
        ))),
        Err(e) => Err(EquationError::Extraction(format!(
            "no recognizable term in '{}' ({})",
            text, e
        ))),
    }
}

/// parses "left=right" (normalized, exactly one top-level '=')
pub fn parse_equation(text: &str) -> Result<Equation, EquationError> {
    let positions = find_char_positions_outside_brackets(text, '=');
    let [pos] = positions.as_slice() else {
        return Err(EquationError::Extraction(format!(
            "'{}' is not a single equation",
            text
        )));
    };
    let left = parse_side(&text[..*pos])?;
    let right = parse_side(&text[*pos + 1..])?;
    Ok(Equation::new(left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::Var(Variable::X)
    }

    fn c(v: f64) -> Expr {
        Expr::Const(v)
    }

    #[test]
    fn test_parse_constant_and_variable() {
        assert_eq!(parse_side("42").unwrap(), c(42.0));
        assert_eq!(parse_side(".5").unwrap(), c(0.5));
        assert_eq!(parse_side("x").unwrap(), x());
    }

    #[test]
    fn test_implicit_multiplication_and_power() {
        assert_eq!(
            parse_side("2x²").unwrap(),
            c(2.0) * Expr::Pow(x().boxed(), 2)
        );
        assert_eq!(parse_side("x^3").unwrap(), Expr::Pow(x().boxed(), 3));
        assert_eq!(
            parse_side("3(x+1)").unwrap(),
            c(3.0) * (x() + c(1.0))
        );
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        assert_eq!(parse_side("-x²").unwrap(), -Expr::Pow(x().boxed(), 2));
        assert_eq!(parse_side("-x+1").unwrap(), -x() + c(1.0));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(parse_side("1+2*x").unwrap(), c(1.0) + c(2.0) * x());
        assert_eq!(parse_side("x-2-3").unwrap(), (x() - c(2.0)) - c(3.0));
    }

    #[test]
    fn test_abs_and_sqrt() {
        assert_eq!(parse_side("|x|+2").unwrap(), Expr::Abs(x().boxed()) + c(2.0));
        assert_eq!(parse_side("2|x-1|").unwrap(), c(2.0) * Expr::Abs((x() - c(1.0)).boxed()));
        assert_eq!(parse_side("√(x+7)").unwrap(), Expr::Sqrt((x() + c(7.0)).boxed()));
        assert_eq!(parse_side("√x+7").unwrap(), Expr::Sqrt(x().boxed()) + c(7.0));
        assert_eq!(
            parse_side("||x|-1|").unwrap(),
            Expr::Abs((Expr::Abs(x().boxed()) - c(1.0)).boxed())
        );
    }

    #[test]
    fn test_parse_equation_sides() {
        let eq = parse_equation("2x+3=15").unwrap();
        assert_eq!(eq.left, c(2.0) * x() + c(3.0));
        assert_eq!(eq.right, c(15.0));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_side(""), Err(EquationError::Extraction(_))));
        assert!(matches!(parse_side("x+"), Err(EquationError::Extraction(_))));
        assert!(matches!(parse_side("x^2.5"), Err(EquationError::Extraction(_))));
        assert!(matches!(parse_side("2)"), Err(EquationError::Extraction(_))));
        assert!(matches!(parse_equation("x=1=2"), Err(EquationError::Extraction(_))));
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let deep = format!("{}x{}", "(".repeat(20000), ")".repeat(20000));
        assert!(matches!(parse_side(&deep), Err(EquationError::Extraction(_))));
        let bars = format!("{}x{}", "|".repeat(300), "|".repeat(300));
        assert!(matches!(parse_side(&bars), Err(EquationError::Extraction(_))));
    }
}
