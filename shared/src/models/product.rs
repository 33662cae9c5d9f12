//! Product Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Net weight as published by the catalog (`{"t": 500, "u": "g"}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWeight {
    /// Magnitude
    pub t: f64,
    /// Unit
    pub u: String,
}

/// Product record as found in a catalog document
///
/// Field names in the document are abbreviated (`n`, `p`, `q`, `u`, `ppuom`,
/// `img`, `nw`). Only `n` is required; every other field is read leniently
/// and dropped when it has the wrong type.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProductRecord {
    pub name: String,
    /// Price in major currency units; left untyped, coerced to pence downstream
    pub price: Option<Value>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub price_per_unit: Option<String>,
    pub image: Option<String>,
    pub net_weight: Option<NetWeight>,
}

impl RawProductRecord {
    /// Read a record from a document mapping.
    ///
    /// Returns `None` when `n` is missing, empty or not a string.
    pub fn from_map(map: &Map<String, Value>) -> Option<Self> {
        let name = map.get("n")?.as_str().filter(|n| !n.is_empty())?;

        Some(Self {
            name: name.to_string(),
            price: map.get("p").filter(|p| !p.is_null()).cloned(),
            quantity: map.get("q").and_then(Value::as_f64),
            unit: string_field(map, "u"),
            price_per_unit: string_field(map, "ppuom"),
            image: string_field(map, "img"),
            net_weight: map
                .get("nw")
                .and_then(|nw| NetWeight::deserialize(nw).ok()),
        })
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Normalized product row handed to renderers
///
/// `id` is the record key inside its supermarket mapping, so it is only
/// unique within a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    /// Price in pence
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_weight: Option<NetWeight>,
    /// Supermarket display name
    pub supermarket: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_record_requires_name() {
        assert!(RawProductRecord::from_map(&map(json!({"p": 1.5}))).is_none());
        assert!(RawProductRecord::from_map(&map(json!({"n": ""}))).is_none());
        assert!(RawProductRecord::from_map(&map(json!({"n": 42}))).is_none());
    }

    #[test]
    fn test_record_reads_all_fields() {
        let record = RawProductRecord::from_map(&map(json!({
            "n": "Baby Spinach",
            "p": 1.25,
            "q": 1,
            "u": "bag",
            "ppuom": "£5.00/kg",
            "img": "https://img.example/spinach.jpg",
            "nw": {"t": 250, "u": "g"}
        })))
        .unwrap();

        assert_eq!(record.name, "Baby Spinach");
        assert_eq!(record.price, Some(json!(1.25)));
        assert_eq!(record.quantity, Some(1.0));
        assert_eq!(record.unit.as_deref(), Some("bag"));
        assert_eq!(record.price_per_unit.as_deref(), Some("£5.00/kg"));
        assert_eq!(record.image.as_deref(), Some("https://img.example/spinach.jpg"));
        assert_eq!(
            record.net_weight,
            Some(NetWeight { t: 250.0, u: "g".to_string() })
        );
    }

    #[test]
    fn test_record_drops_mistyped_optional_fields() {
        let record = RawProductRecord::from_map(&map(json!({
            "n": "Kale",
            "q": "two",
            "img": false,
            "nw": {"t": "heavy"}
        })))
        .unwrap();

        assert_eq!(record.quantity, None);
        assert_eq!(record.image, None);
        assert_eq!(record.net_weight, None);
    }

    #[test]
    fn test_row_serializes_camel_case() {
        let row = ProductRow {
            id: "p1".to_string(),
            name: "Spinach".to_string(),
            category: "salad".to_string(),
            subcategory: "leafy".to_string(),
            price: 120,
            quantity: None,
            unit: None,
            price_per_unit: Some("£4.80/kg".to_string()),
            image: None,
            net_weight: Some(NetWeight { t: 250.0, u: "g".to_string() }),
            supermarket: "Asda".to_string(),
        };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["pricePerUnit"], "£4.80/kg");
        assert_eq!(value["netWeight"]["u"], "g");
        assert!(value.get("quantity").is_none());
    }
}
