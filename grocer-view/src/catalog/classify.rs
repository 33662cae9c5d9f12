//! Structural classification of catalog document nodes
//!
//! Documents carry no tags saying which level is which. A level is
//! recognized only by its keys: a mapping whose keys intersect the known
//! supermarket ids is a supermarket map, any other mapping is a grouping
//! level, and a mapping with a usable `n` is a product. Arrays are mappings
//! keyed by index (`"0"`, `"1"`, ...).

use serde_json::{Map, Value};
use shared::{RawProductRecord, Supermarket};
use std::borrow::Cow;

/// A mapping-like node: an object, or an array keyed by index
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Level<'a> {
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
}

impl<'a> Level<'a> {
    /// `None` for scalars and `null`
    pub fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Level::Object(map)),
            Value::Array(items) => Some(Level::Array(items)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match *self {
            Level::Object(map) => map.get(key),
            Level::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        }
    }

    /// Entries in document order
    pub fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'a, str>, &'a Value)> + 'a> {
        match *self {
            Level::Object(map) => Box::new(map.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), v))),
            Level::Array(items) => Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (Cow::Owned(i.to_string()), v)),
            ),
        }
    }

    fn has_supermarket_key(&self) -> bool {
        match self {
            Level::Object(map) => map.keys().any(|k| Supermarket::is_known(k)),
            Level::Array(_) => false,
        }
    }
}

/// What a document node turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    /// Mapping with at least one known supermarket key
    SupermarketMap(Level<'a>),
    /// Mapping with no supermarket keys
    Grouping(Level<'a>),
    /// Object with a non-empty `n`
    Product(RawProductRecord),
    /// Scalars and `null`
    Unrecognized,
}

/// Classify a node in product position.
///
/// Products are checked before supermarket keys so a record that happens to
/// carry a field named like a supermarket id is still a record.
pub fn classify(value: &Value) -> Node<'_> {
    if let Value::Object(map) = value
        && let Some(record) = RawProductRecord::from_map(map)
    {
        return Node::Product(record);
    }
    classify_level(value)
}

/// Classify a node in level position (sub-category or grouping).
///
/// No product check: a level that also carries an `n` is still walked.
pub fn classify_level(value: &Value) -> Node<'_> {
    match Level::of(value) {
        Some(level) if level.has_supermarket_key() => Node::SupermarketMap(level),
        Some(level) => Node::Grouping(level),
        None => Node::Unrecognized,
    }
}

impl<'a> Node<'a> {
    /// The underlying mapping for either kind of level
    pub fn as_level(&self) -> Option<Level<'a>> {
        match self {
            Node::SupermarketMap(level) | Node::Grouping(level) => Some(*level),
            Node::Product(_) | Node::Unrecognized => None,
        }
    }
}

/// Loose truthiness of a JSON value: `null`, `false`, `0`, `""` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_supermarket_map() {
        let value = json!({"as": {}, "notes": "x"});
        assert!(matches!(classify(&value), Node::SupermarketMap(_)));
    }

    #[test]
    fn test_grouping_level() {
        let value = json!({"organic": {"as": {}}});
        assert!(matches!(classify(&value), Node::Grouping(_)));
    }

    #[test]
    fn test_product_wins_over_supermarket_keys() {
        let value = json!({"n": "Kale", "as": 1});
        assert!(matches!(classify(&value), Node::Product(_)));
    }

    #[test]
    fn test_nameless_record_is_a_level() {
        let value = json!({"p": 1.2});
        assert!(matches!(classify(&value), Node::Grouping(_)));
    }

    #[test]
    fn test_scalars_unrecognized() {
        assert_eq!(classify(&json!("as")), Node::Unrecognized);
        assert_eq!(classify(&json!(null)), Node::Unrecognized);
        assert_eq!(classify(&json!(3)), Node::Unrecognized);
    }

    #[test]
    fn test_array_is_grouping_keyed_by_index() {
        let value = json!([{"n": "x"}, {"n": "y"}]);
        let Node::Grouping(level) = classify(&value) else {
            panic!("expected a grouping level");
        };
        let keys: Vec<String> = level.entries().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(keys, vec!["0", "1"]);
        assert_eq!(level.get("1"), Some(&json!({"n": "y"})));
        assert_eq!(level.get("as"), None);
    }

    #[test]
    fn test_level_position_ignores_name() {
        let value = json!({"n": "Leafy", "as": {}});
        assert!(matches!(classify(&value), Node::Product(_)));
        assert!(matches!(classify_level(&value), Node::SupermarketMap(_)));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!("0")));
    }
}
