// the collection of utility functions for bracket parsing and proceeding

/// Stack-based bracket scan: push on '(', pop on ')'.
/// Returns Err with a description when a ')' has nothing to close
/// or when some '(' is left open at the end.
pub fn check_brackets(s: &str) -> Result<(), String> {
    let mut stack = Vec::new();
    for (i, c) in s.chars().enumerate() {
        match c {
            '(' => stack.push(i),
            ')' => {
                if stack.pop().is_none() {
                    return Err(format!("unbalanced parentheses: ')' at position {} has no opening '('", i));
                }
            }
            _ => {}
        }
    }
    match stack.last() {
        Some(open) => Err(format!(
            "unbalanced parentheses: '(' at position {} is never closed",
            open
        )),
        None => Ok(()),
    }
}

/// deepest nesting the parser and the evaluator descend into
pub const MAX_NESTING: usize = 64;

/// Upper bound of the recursion depth needed to parse `s`: the deepest
/// parenthesis level plus every square root plus every pair of bars.
pub fn nesting_depth(s: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut roots = 0usize;
    let mut bars = 0usize;
    for c in s.chars() {
        match c {
            '(' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            ')' => depth = depth.saturating_sub(1),
            '√' => roots += 1,
            '|' => bars += 1,
            _ => {}
        }
    }
    deepest + roots + bars.div_ceil(2)
}

/// Err when `s` nests deeper than `MAX_NESTING`
pub fn check_nesting(s: &str) -> Result<(), String> {
    let depth = nesting_depth(s);
    if depth > MAX_NESTING {
        return Err(format!(
            "the expression is nested {} levels deep, at most {} are allowed",
            depth, MAX_NESTING
        ));
    }
    Ok(())
}

// code finds the byte position of the bracket closing the one opened at byte `bracket_start`
pub fn find_pair_to_this_bracket(input: &str, bracket_start: usize) -> Option<usize> {
    let mut stack = 0;
    for (i, c) in input[bracket_start..].char_indices() {
        if c == '(' {
            stack += 1;
        } else if c == ')' {
            stack -= 1;
            if stack == 0 {
                return Some(bracket_start + i);
            }
        }
    }
    None
}

// find byte positions of giving char that are outside brackets only
pub fn find_char_positions_outside_brackets(s: &str, target: char) -> Vec<usize> {
    let mut depth = 0i32;
    let mut positions = Vec::new();
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if ch == target && depth == 0 => positions.push(i),
            _ => {}
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_brackets() {
        assert!(check_brackets("2(x+1)=(3)").is_ok());
        assert!(check_brackets("x)+(1=2").is_err());
        assert!(check_brackets("((x)=1").is_err());
        assert!(check_brackets("x=1").is_ok());
    }

    #[test]
    fn test_find_pair_to_this_bracket() {
        let s = "abs(2(x+1))+3";
        assert_eq!(find_pair_to_this_bracket(s, 3), Some(10));
        assert_eq!(find_pair_to_this_bracket("(x", 0), None);
    }

    #[test]
    fn test_positions_outside_brackets() {
        assert_eq!(find_char_positions_outside_brackets("x+(y+1)+2", '+'), vec![1, 7]);
    }

    #[test]
    fn test_nesting_depth() {
        assert_eq!(nesting_depth("x=1"), 0);
        assert_eq!(nesting_depth("((x)+(1))=2"), 2);
        assert_eq!(nesting_depth("√(|x|)=2"), 3);
        let deep = format!("{}x{}=1", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert!(check_nesting(&deep).is_err());
        let fine = format!("{}x{}=1", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert!(check_nesting(&fine).is_ok());
    }
}
