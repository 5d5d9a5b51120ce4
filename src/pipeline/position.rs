//! Relative Positions
//!
//! A [`Position`] tells the pipeline where a newly registered layer goes,
//! expressed against layers that are already registered rather than as a
//! numeric priority. Extensions stay stable when unrelated layers move.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placement directive applied once, when a layer is registered.
///
/// # Serialized Form
///
/// | Variant | JSON |
/// |---------|------|
/// | `Append` | `"append"` |
/// | `Before` | `{ "before": "Torso" }` |
/// | `After` | `{ "after": "Torso" }` |
/// | `Between` | `{ "between": ["Torso", "OffhandAcc"] }` |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// After every layer currently in the order.
    #[default]
    Append,
    /// Immediately before the anchor.
    Before(String),
    /// Immediately after the anchor.
    After(String),
    /// Between two anchors that are currently adjacent.
    Between(String, String),
}

impl Position {
    #[inline]
    #[must_use]
    pub fn before(anchor: impl Into<String>) -> Self {
        Self::Before(anchor.into())
    }

    #[inline]
    #[must_use]
    pub fn after(anchor: impl Into<String>) -> Self {
        Self::After(anchor.into())
    }

    #[inline]
    #[must_use]
    pub fn between(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::Between(first.into(), second.into())
    }

    /// Names of the layers this position refers to.
    pub fn anchors(&self) -> impl Iterator<Item = &str> {
        let (first, second) = match self {
            Self::Append => (None, None),
            Self::Before(anchor) | Self::After(anchor) => (Some(anchor.as_str()), None),
            Self::Between(first, second) => (Some(first.as_str()), Some(second.as_str())),
        };
        first.into_iter().chain(second)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Append => f.write_str("append"),
            Self::Before(anchor) => write!(f, "before '{anchor}'"),
            Self::After(anchor) => write!(f, "after '{anchor}'"),
            Self::Between(first, second) => write!(f, "between '{first}' and '{second}'"),
        }
    }
}

/// How strictly `Between` checks the adjacency of its anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetweenPolicy {
    /// The first anchor must immediately precede the second.
    Ordered,
    /// The anchors must be neighbours, in either order.
    #[default]
    EitherOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_json_forms() {
        let positions: Vec<Position> =
            serde_json::from_str(r#"["append", {"before": "A"}, {"between": ["A", "B"]}]"#)
                .unwrap();

        assert_eq!(
            positions,
            vec![Position::Append, Position::before("A"), Position::between("A", "B")]
        );
    }

    #[test]
    fn test_anchors() {
        assert_eq!(Position::Append.anchors().count(), 0);
        assert_eq!(Position::after("Torso").anchors().collect::<Vec<_>>(), ["Torso"]);
        assert_eq!(
            Position::between("Torso", "Head").anchors().collect::<Vec<_>>(),
            ["Torso", "Head"]
        );
    }
}
