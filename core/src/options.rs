use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecurError;

/// When a node is yielded relative to the nodes below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Order {
    /// Node before its descendants.
    #[default]
    Pre,
    /// Node after its descendants.
    Post,
}

impl Order {
    pub fn flipped(self) -> Self {
        match self {
            Order::Pre => Order::Post,
            Order::Post => Order::Pre,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Order::Pre => "pre",
            Order::Post => "post",
        }
    }
}

/// Parse an order string.
///
/// Accepts: "pre", "preorder", "post", "postorder" (case-insensitive).
impl FromStr for Order {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pre" | "preorder" => Ok(Order::Pre),
            "post" | "postorder" => Ok(Order::Post),
            _ => Err(RecurError::InvalidOrder {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Order {
    type Error = RecurError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which end of each adjacency list is visited first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Direction {
    #[default]
    Forward,
    /// Siblings are visited back to front. This reverses adjacency order at
    /// every level, not the whole output sequence.
    Reverse,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

/// Accepts: "forward", "fwd", "reverse", "rev" (case-insensitive).
impl FromStr for Direction {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forward" | "fwd" => Ok(Direction::Forward),
            "reverse" | "rev" => Ok(Direction::Reverse),
            _ => Err(RecurError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = RecurError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate excluding a node and its whole subtree when it returns true.
///
/// Reference-counted so every iterator branched from one traversal shares it.
pub type Prune<N> = Rc<dyn Fn(&N) -> bool>;

/// Wrap a closure as a [`Prune`] predicate.
pub fn prune<N, F>(predicate: F) -> Prune<N>
where
    F: Fn(&N) -> bool + 'static,
{
    Rc::new(predicate)
}

/// Serializable traversal settings.
///
/// Missing fields fall back to pre-order, forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalOptions {
    pub order: Order,
    pub direction: Direction,
}

impl TraversalOptions {
    pub fn new(order: Order, direction: Direction) -> Self {
        Self { order, direction }
    }

    /// Build options from user-supplied strings, rejecting unknown values.
    pub fn parse(order: &str, direction: &str) -> crate::Result<Self> {
        Ok(Self {
            order: order.parse()?,
            direction: direction.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_aliases() {
        assert_eq!("pre".parse::<Order>(), Ok(Order::Pre));
        assert_eq!("PreOrder".parse::<Order>(), Ok(Order::Pre));
        assert_eq!(" post ".parse::<Order>(), Ok(Order::Post));
        assert_eq!("postorder".parse::<Order>(), Ok(Order::Post));
    }

    #[test]
    fn test_parse_order_rejects_unknown() {
        assert_eq!(
            "a".parse::<Order>(),
            Err(RecurError::InvalidOrder { value: "a".into() })
        );
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("rev".parse::<Direction>(), Ok(Direction::Reverse));
        assert_eq!("FORWARD".parse::<Direction>(), Ok(Direction::Forward));
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(RecurError::InvalidDirection { .. })
        ));
    }

    #[test]
    fn test_flipped() {
        assert_eq!(Order::Pre.flipped(), Order::Post);
        assert_eq!(Order::Post.flipped().flipped(), Order::Post);
    }

    #[test]
    fn test_options_defaults() {
        let opts: TraversalOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, TraversalOptions::new(Order::Pre, Direction::Forward));
    }

    #[test]
    fn test_options_deserialize_aliases() {
        let opts: TraversalOptions =
            serde_json::from_str(r#"{"order": "Postorder", "direction": "rev"}"#).unwrap();
        assert_eq!(opts.order, Order::Post);
        assert_eq!(opts.direction, Direction::Reverse);
    }

    #[test]
    fn test_options_deserialize_rejects_unknown_order() {
        let err = serde_json::from_str::<TraversalOptions>(r#"{"order": "inorder"}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("invalid order 'inorder'"), "{err}");
    }

    #[test]
    fn test_options_serialize_lowercase() {
        let json = serde_json::to_string(&TraversalOptions::new(Order::Post, Direction::Reverse))
            .unwrap();
        assert_eq!(json, r#"{"order":"post","direction":"reverse"}"#);
    }

    #[test]
    fn test_options_parse() {
        assert_eq!(
            TraversalOptions::parse("post", "fwd"),
            Ok(TraversalOptions::new(Order::Post, Direction::Forward))
        );
        assert!(TraversalOptions::parse("post", "up").is_err());
    }
}
