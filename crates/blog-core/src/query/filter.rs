//! Filter expressions

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A typed value a field is compared against
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterValue {
    Text(String),
    Id(Uuid),
    Bool(bool),
    Time(DateTime<Utc>),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::Id(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact equality
    Eq,
    /// Case-insensitive substring match on text fields
    ContainsInsensitive,
}

/// Boolean filter tree over named fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Condition {
        field: &'static str,
        op: FilterOp,
        value: FilterValue,
    },
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<FilterValue>) -> Self {
        Self::Condition {
            field,
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn contains(field: &'static str, term: impl Into<String>) -> Self {
        Self::Condition {
            field,
            op: FilterOp::ContainsInsensitive,
            value: FilterValue::Text(term.into()),
        }
    }

    /// OR of the given filters; `None` when there is nothing to match on
    pub fn any_of(filters: Vec<Filter>) -> Option<Self> {
        match filters.len() {
            0 => None,
            1 => filters.into_iter().next(),
            _ => Some(Self::Or(filters)),
        }
    }

    /// AND of the given filters; `None` when unrestricted
    pub fn all_of(filters: Vec<Filter>) -> Option<Self> {
        match filters.len() {
            0 => None,
            1 => filters.into_iter().next(),
            _ => Some(Self::And(filters)),
        }
    }

    /// Evaluate against a record
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Self::Condition { field, op, value } => match (op, record.field(field)) {
                (_, None) => false,
                (FilterOp::Eq, Some(actual)) => actual == *value,
                (
                    FilterOp::ContainsInsensitive,
                    Some(FilterValue::Text(actual)),
                ) => match value {
                    FilterValue::Text(term) => actual.to_lowercase().contains(&term.to_lowercase()),
                    _ => false,
                },
                (FilterOp::ContainsInsensitive, Some(_)) => false,
            },
            Self::And(filters) => filters.iter().all(|f| f.matches(record)),
            Self::Or(filters) => filters.iter().any(|f| f.matches(record)),
        }
    }
}

/// Field lookup by API field name, used by in-memory evaluation
pub trait Record {
    fn field(&self, name: &str) -> Option<FilterValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Account {
        login: &'static str,
        email: &'static str,
    }

    impl Record for Account {
        fn field(&self, name: &str) -> Option<FilterValue> {
            match name {
                "login" => Some(self.login.into()),
                "email" => Some(self.email.into()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let account = Account {
            login: "RustFan",
            email: "fan@example.com",
        };
        assert!(Filter::contains("login", "rust").matches(&account));
        assert!(Filter::contains("login", "FAN").matches(&account));
        assert!(!Filter::contains("login", "go").matches(&account));
    }

    #[test]
    fn test_or_of_search_terms() {
        let filter = Filter::any_of(vec![
            Filter::contains("login", "zzz"),
            Filter::contains("email", "EXAMPLE"),
        ])
        .unwrap();
        let account = Account {
            login: "bob",
            email: "bob@example.com",
        };
        assert!(filter.matches(&account));
    }

    #[test]
    fn test_and_requires_all() {
        let account = Account {
            login: "bob",
            email: "bob@example.com",
        };
        let filter = Filter::And(vec![
            Filter::eq("login", "bob"),
            Filter::contains("email", "nope"),
        ]);
        assert!(!filter.matches(&account));
    }

    #[test]
    fn test_unknown_field_never_matches() {
        let account = Account {
            login: "bob",
            email: "bob@example.com",
        };
        assert!(!Filter::eq("missing", "bob").matches(&account));
    }

    #[test]
    fn test_any_of_collapses() {
        assert!(Filter::any_of(vec![]).is_none());
        assert_eq!(
            Filter::all_of(vec![Filter::eq("login", "a")]),
            Some(Filter::eq("login", "a"))
        );
    }
}
