//! Pure string rewrite applied after validation: lower-case, no whitespace,
//! decimal commas turned into points, `^2`/`^3` into `²`/`³`, `sqrt` into `√`
//! and `abs(…)` into `|…|`. Normalizing twice gives the same string.
use crate::symbolic::utils::find_pair_to_this_bracket;

pub fn normalize(text: &str) -> String {
    let compact: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let with_points = decimal_commas(&compact);
    let with_powers = superscript_powers(&with_points);
    let with_roots = with_powers.replace("sqrt", "√");
    abs_to_bars(&with_roots)
}

/// "2,5" -> "2.5"; a comma not surrounded by digits is kept
fn decimal_commas(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let between_digits = i > 0
                && i + 1 < chars.len()
                && chars[i - 1].is_ascii_digit()
                && chars[i + 1].is_ascii_digit();
            if c == ',' && between_digits { '.' } else { c }
        })
        .collect()
}

/// "^2" -> "²" and "^3" -> "³" unless the exponent continues ("^23", "^2.5")
fn superscript_powers(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '^' && i + 1 < chars.len() && matches!(chars[i + 1], '2' | '3') {
            let continues = chars
                .get(i + 2)
                .is_some_and(|c| c.is_ascii_digit() || *c == '.');
            if !continues {
                out.push(if chars[i + 1] == '2' { '²' } else { '³' });
                i += 2;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// "abs(x-1)" -> "|x-1|"; an "abs(" without its closing bracket is left untouched
fn abs_to_bars(s: &str) -> String {
    let mut out = s.to_string();
    let mut search_from = 0;
    while let Some(offset) = out[search_from..].find("abs(") {
        let start = search_from + offset;
        let open = start + "abs".len();
        match find_pair_to_this_bracket(&out, open) {
            Some(close) => {
                let inner = out[open + 1..close].to_string();
                out = format!("{}|{}|{}", &out[..start], inner, &out[close + 1..]);
                search_from = start;
            }
            None => search_from = open,
        }
    }
    out
}
