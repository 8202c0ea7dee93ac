//! Reader for small configuration documents of the form
//! ```text
//! solver
//!   precision: 6
//!   loglevel: info
//! graph
//!   range: -10, 10
//! ```
//! A document is a list of sections; a section is a title followed by
//! `key: value, value` pairs. Lines starting with `//`, `#` or `%` are comments.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt;

/// values of one key; None when a templated key is absent from the document
pub type SectionMap = HashMap<String, Option<Vec<Value>>>;
pub type DocumentMap = HashMap<String, SectionMap>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// integers are accepted where a float is expected
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// identifier: a letter or '_' followed by letters, digits or '_'
fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
        String::from,
    )
    .parse(input)
}

pub(crate) fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, title) = identifier(input)?;
    Ok((input.trim_start(), title))
}

pub(crate) fn parse_key(input: &str) -> IResult<&str, String> {
    identifier(input)
}

/// one value; integer, float and bool are tried before falling back to a string
pub(crate) fn parse_value(input: &str) -> IResult<&str, Value> {
    map(
        take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';')),
        |s: &str| {
            if let Ok(val) = s.parse::<i64>() {
                Value::Integer(val)
            } else if let Ok(val) = s.parse::<f64>() {
                Value::Float(val)
            } else if let Ok(val) = s.parse::<bool>() {
                Value::Boolean(val)
            } else {
                Value::String(s.to_string())
            }
        },
    )
    .parse(input)
}

pub(crate) fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    separated_list0(delimited(space0, tag(","), space0), parse_value).parse(input)
}

pub(crate) fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let (input, pair) =
        separated_pair(parse_key, delimited(space0, tag(":"), space0), parse_value_list)
            .parse(input)?;
    Ok((input.trim_start(), pair))
}

pub(crate) fn parse_section(input: &str) -> IResult<&str, (String, HashMap<String, Vec<Value>>)> {
    let (input, _) = multispace0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, pairs) = many1(terminated(parse_key_value_pair, multispace0)).parse(input)?;
    Ok((input, (title, pairs.into_iter().collect())))
}

pub(crate) fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !(trimmed.is_empty()
                || trimmed.starts_with("//")
                || trimmed.starts_with('#')
                || trimmed.starts_with('%'))
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

pub fn parse_document(input: &str) -> IResult<&str, DocumentMap> {
    let (input, sections) = many1(delimited(space0, parse_section, multispace0)).parse(input)?;
    let document = sections
        .into_iter()
        .map(|(title, pairs)| {
            let section = pairs.into_iter().map(|(k, v)| (k, Some(v))).collect();
            (title, section)
        })
        .collect();
    Ok((input, document))
}

/// Parses a whole document. With a template every templated section and key is
/// guaranteed to be present in the result (missing keys map to None).
pub fn parse_document_as(input: &str, template: Option<&DocumentMap>) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    let mut parsed = if filtered.trim().is_empty() {
        DocumentMap::new()
    } else {
        let (remaining, parsed) =
            parse_document(&filtered).map_err(|e| format!("Parsing error: {:?}", e))?;
        if !remaining.trim().is_empty() {
            return Err(format!(
                "Failed to parse entire document. Remaining: '{}'",
                remaining
            ));
        }
        parsed
    };
    if let Some(template) = template {
        for (title, keys) in template {
            let section = parsed.entry(title.clone()).or_default();
            for key in keys.keys() {
                section.entry(key.clone()).or_insert(None);
            }
        }
    }
    Ok(parsed)
}

/// template with the given sections and keys, every value None
pub fn template_of(sections: &[(&str, &[&str])]) -> DocumentMap {
    sections
        .iter()
        .map(|(title, keys)| {
            let section = keys.iter().map(|k| (k.to_string(), None)).collect();
            (title.to_string(), section)
        })
        .collect()
}
