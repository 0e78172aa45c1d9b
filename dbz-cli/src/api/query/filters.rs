//! Predicate building blocks for OQL WHERE clauses

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators understood by the OQL executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Ge,
        Operator::Lt,
        Operator::Le,
        Operator::Like,
    ];

    /// The operator as it appears in OQL text
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Like => "LIKE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("like") {
            return Ok(Self::Like);
        }
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == trimmed)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown operator '{}' (expected one of =, !=, >, >=, <, <=, LIKE)",
                    s
                )
            })
    }
}

/// A single `field operator 'value'` comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Render with the value quoted verbatim. Embedded `'` characters are not escaped.
    pub fn to_oql(&self) -> String {
        format!("{} {} '{}'", self.field, self.operator, self.value)
    }

    /// Render with a placeholder in place of the value
    pub fn to_oql_with_placeholder(&self, placeholder: &str) -> String {
        format!("{} {} {}", self.field, self.operator, placeholder)
    }

    /// Parse CLI-style text such as `status = active` or `name LIKE 'Acme%'`
    ///
    /// The field is the first whitespace-separated word and the operator the
    /// second; everything after is the value, with one pair of surrounding
    /// single quotes stripped if present.
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        let (field, rest) = input
            .split_once(char::is_whitespace)
            .ok_or_else(|| anyhow::anyhow!("Expected 'field operator value', got '{}'", input))?;
        let rest = rest.trim_start();
        let (op, value) = rest
            .split_once(char::is_whitespace)
            .ok_or_else(|| anyhow::anyhow!("Missing value in condition '{}'", input))?;

        let operator: Operator = op.parse()?;
        let value = value.trim();
        let value = value
            .strip_prefix('\'')
            .and_then(|v| v.strip_suffix('\''))
            .unwrap_or(value);

        Ok(Self::new(field, operator, value))
    }
}

/// One entry in the ordered predicate list of an OQL query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateToken {
    Condition(Condition),
    And,
    Or,
}

impl PredicateToken {
    pub fn is_connective(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Ordered WHERE clause tokens
///
/// Conditions and connectives strictly alternate. A connective is only ever
/// pushed immediately before a condition and only when a condition already
/// exists, so the list never begins or ends with `AND`/`OR`. A bare
/// [`push`](Self::push) onto a non-empty predicate is joined with `AND`.
/// The push methods are the only way to add tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    tokens: Vec<PredicateToken>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, condition: Condition) {
        self.push_and(condition);
    }

    pub fn push_and(&mut self, condition: Condition) {
        self.push_connected(PredicateToken::And, condition);
    }

    pub fn push_or(&mut self, condition: Condition) {
        self.push_connected(PredicateToken::Or, condition);
    }

    fn push_connected(&mut self, connective: PredicateToken, condition: Condition) {
        if self.has_conditions() {
            self.tokens.push(connective);
        }
        self.tokens.push(PredicateToken::Condition(condition));
    }

    pub fn has_conditions(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| matches!(t, PredicateToken::Condition(_)))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[PredicateToken] {
        &self.tokens
    }

    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.tokens.iter().filter_map(|t| match t {
            PredicateToken::Condition(c) => Some(c),
            _ => None,
        })
    }

    /// Render tokens, letting `render` decide how each condition is written
    pub(crate) fn render_with<F>(&self, mut render: F) -> String
    where
        F: FnMut(&Condition) -> String,
    {
        self.tokens
            .iter()
            .map(|t| match t {
                PredicateToken::Condition(c) => render(c),
                PredicateToken::And => "AND".to_string(),
                PredicateToken::Or => "OR".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_oql(&self) -> String {
        self.render_with(Condition::to_oql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_round_trip_text() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
        assert_eq!("like".parse::<Operator>().unwrap(), Operator::Like);
        assert!("==".parse::<Operator>().is_err());
    }

    #[test]
    fn test_condition_renders_quoted_value() {
        let c = Condition::new("status", Operator::Eq, "active");
        assert_eq!(c.to_oql(), "status = 'active'");
    }

    #[test]
    fn test_condition_keeps_embedded_quote() {
        let c = Condition::new("name", Operator::Eq, "O'Brien");
        assert_eq!(c.to_oql(), "name = 'O'Brien'");
    }

    #[test]
    fn test_parse_condition() {
        let c = Condition::parse("name LIKE 'Acme%'").unwrap();
        assert_eq!(c, Condition::new("name", Operator::Like, "Acme%"));

        let c = Condition::parse("  amount >=   100 ").unwrap();
        assert_eq!(c, Condition::new("amount", Operator::Ge, "100"));

        let c = Condition::parse("title = Head of Sales").unwrap();
        assert_eq!(c.value, "Head of Sales");
    }

    #[test]
    fn test_parse_condition_errors() {
        assert!(Condition::parse("status").is_err());
        assert!(Condition::parse("status =").is_err());
        assert!(Condition::parse("status ~ x").is_err());
    }

    #[test]
    fn test_leading_connective_is_dropped() {
        let mut p = Predicate::new();
        p.push_and(Condition::new("a", Operator::Eq, "1"));
        p.push_or(Condition::new("b", Operator::Eq, "2"));

        assert_eq!(p.tokens().len(), 3);
        assert!(!p.tokens()[0].is_connective());
        assert_eq!(p.to_oql(), "a = '1' OR b = '2'");
    }

    #[test]
    fn test_connective_on_empty_predicate_adds_condition_only() {
        let mut p = Predicate::new();
        assert_eq!(p.to_oql(), "");

        let condition = Condition::new("a", Operator::Eq, "1");
        p.push_or(condition.clone());
        assert_eq!(p.tokens(), [PredicateToken::Condition(condition)]);
        assert_eq!(p.to_oql(), "a = '1'");
    }

    #[test]
    fn test_tokens_alternate() {
        let mut p = Predicate::new();
        p.push_or(Condition::new("a", Operator::Gt, "1"));
        p.push(Condition::new("b", Operator::Lt, "2"));
        p.push_and(Condition::new("c", Operator::Ne, "3"));
        p.push_or(Condition::new("d", Operator::Like, "x%"));

        let tokens = p.tokens();
        assert_eq!(tokens.len(), 7);
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.is_connective(), i % 2 == 1);
        }
        assert_eq!(p.conditions().count(), 4);
        assert_eq!(
            p.to_oql(),
            "a > '1' AND b < '2' AND c != '3' OR d LIKE 'x%'"
        );
    }
}
