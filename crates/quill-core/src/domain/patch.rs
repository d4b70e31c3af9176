//! Tri-state field wrapper for partial updates.

use serde::{Deserialize, Deserializer};

/// A request field that distinguishes "omitted" from "sent as null".
///
/// Use with `#[serde(default)]` so omitted keys land on `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// The carried value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Change to a nullable column: `None` means untouched, `Some(None)` clears.
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }
}

impl Patch<String> {
    /// Present with a non-blank string.
    pub fn is_filled(&self) -> bool {
        self.value().is_some_and(|s| !s.trim().is_empty())
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default)]
        field: Patch<String>,
    }

    #[test]
    fn distinguishes_absent_null_and_value() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        let null: Probe = serde_json::from_str(r#"{"field": null}"#).unwrap();
        let value: Probe = serde_json::from_str(r#"{"field": "x"}"#).unwrap();

        assert_eq!(absent.field, Patch::Absent);
        assert_eq!(null.field, Patch::Null);
        assert_eq!(value.field, Patch::Value("x".to_string()));
    }

    #[test]
    fn filled_ignores_blank_strings() {
        assert!(!Patch::Value("   ".to_string()).is_filled());
        assert!(!Patch::<String>::Null.is_filled());
        assert!(Patch::Value("a".to_string()).is_filled());
    }

    #[test]
    fn into_change_maps_each_state() {
        assert_eq!(Patch::<u8>::Absent.into_change(), None);
        assert_eq!(Patch::<u8>::Null.into_change(), Some(None));
        assert_eq!(Patch::Value(3u8).into_change(), Some(Some(3)));
    }
}
