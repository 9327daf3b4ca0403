//! Filter expressions in the backing store's formula language.
//!
//! Filters are built as a small expression tree and only rendered to text at
//! the request boundary. Rendering escapes every string literal, so caller
//! supplied values can never close the quoted literal and inject formula
//! syntax.

use std::fmt;

/// A boolean filter expression.
///
/// Field names are `&'static str` because they always come from the tool
/// definitions, never from callers.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// Case-insensitive substring match: `FIND(LOWER('v'), LOWER({f}))`
    Contains { field: &'static str, value: String },

    /// Case-insensitive equality: `LOWER({f}) = LOWER('v')`
    EqualsIgnoreCase { field: &'static str, value: String },

    /// Membership in a list-typed field: `FIND('v', ARRAYJOIN({f}, ','))`
    InList { field: &'static str, value: String },

    /// Numeric threshold: `{f} >= n`
    AtLeast { field: &'static str, threshold: i64 },

    And(Vec<Formula>),
    Or(Vec<Formula>),
}

impl Default for Formula {
    fn default() -> Self {
        Formula::And(Vec::new())
    }
}

impl Formula {
    /// True when the expression renders to nothing (no predicates at all).
    pub fn is_empty(&self) -> bool {
        match self {
            Formula::And(clauses) | Formula::Or(clauses) => clauses.iter().all(Formula::is_empty),
            _ => false,
        }
    }

    /// Render to formula text. Empty expressions render to `""`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_combinator(
        f: &mut fmt::Formatter<'_>,
        name: &str,
        clauses: &[Formula],
    ) -> fmt::Result {
        let present: Vec<&Formula> = clauses.iter().filter(|c| !c.is_empty()).collect();
        match present.as_slice() {
            [] => Ok(()),
            [single] => write!(f, "{}", single),
            many => {
                write!(f, "{}(", name)?;
                for (i, clause) in many.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", clause)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Contains { field, value } => {
                write!(f, "FIND(LOWER({}), LOWER({{{}}}))", quote(value), field)
            }
            Formula::EqualsIgnoreCase { field, value } => {
                write!(f, "LOWER({{{}}}) = LOWER({})", field, quote(value))
            }
            Formula::InList { field, value } => {
                write!(f, "FIND({}, ARRAYJOIN({{{}}}, ','))", quote(value), field)
            }
            Formula::AtLeast { field, threshold } => write!(f, "{{{}}} >= {}", field, threshold),
            Formula::And(clauses) => Self::write_combinator(f, "AND", clauses),
            Formula::Or(clauses) => Self::write_combinator(f, "OR", clauses),
        }
    }
}

/// Quote a string literal, escaping backslashes, quotes and line breaks.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// Collects optional search parameters into a conjunction.
///
/// Absent parameters contribute nothing. Blank strings, empty lists and
/// zero thresholds count as absent.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    clauses: Vec<Formula>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substring match on a text field.
    pub fn contains(mut self, field: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = non_blank(value) {
            self.clauses.push(Formula::Contains {
                field,
                value: value.to_string(),
            });
        }
        self
    }

    /// Case-insensitive equality on a single-valued field.
    pub fn equals(mut self, field: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = non_blank(value) {
            self.clauses.push(Formula::EqualsIgnoreCase {
                field,
                value: value.to_string(),
            });
        }
        self
    }

    /// Any of several accepted values on a single-valued field.
    pub fn any_of(mut self, field: &'static str, values: Option<&[String]>) -> Self {
        let clauses: Vec<Formula> = non_blank_values(values)
            .map(|value| Formula::EqualsIgnoreCase {
                field,
                value: value.to_string(),
            })
            .collect();
        if !clauses.is_empty() {
            self.clauses.push(Formula::Or(clauses));
        }
        self
    }

    /// Any of several values present in a list-typed field.
    pub fn any_in_list(mut self, field: &'static str, values: Option<&[String]>) -> Self {
        let clauses: Vec<Formula> = non_blank_values(values)
            .map(|value| Formula::InList {
                field,
                value: value.to_string(),
            })
            .collect();
        if !clauses.is_empty() {
            self.clauses.push(Formula::Or(clauses));
        }
        self
    }

    /// Numeric lower bound (inclusive).
    pub fn at_least(mut self, field: &'static str, threshold: Option<i64>) -> Self {
        if let Some(threshold) = threshold.filter(|t| *t != 0) {
            self.clauses.push(Formula::AtLeast { field, threshold });
        }
        self
    }

    pub fn build(self) -> Formula {
        Formula::And(self.clauses)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_blank_values(values: Option<&[String]>) -> impl Iterator<Item = &String> {
    values
        .unwrap_or_default()
        .iter()
        .filter(|v| !v.trim().is_empty())
}
