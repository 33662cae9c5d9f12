//! Catalog document → flat product rows
//!
//! Three document shapes are reconciled:
//!
//! ```text
//! items.<sub>.<supermarket>.<id>            direct supermarket map
//! items.<sub>.<group>.<supermarket>.<id>    nested grouping level
//! items.<sub>.{<supermarket>, <group>}      mixed
//! ```
//!
//! At most one grouping level below the sub-category is searched. Products
//! nested deeper are dropped. Arrays stand in for mappings keyed by index.

use serde_json::Value;
use shared::models::supermarket_display_name;
use shared::{ProductRow, RawProductRecord, Supermarket};

use super::classify::{Level, Node, classify, classify_level, is_truthy};
use super::price::to_pence;

/// Flatten a catalog document into product rows.
///
/// `category` labels every row as-is. With `supermarket` set, only that
/// supermarket's products are collected. Never fails: a document without an
/// object under `items` yields no rows. Rows keep document key order.
pub fn normalize(doc: &Value, category: &str, supermarket: Option<&str>) -> Vec<ProductRow> {
    let mut rows = Vec::new();

    let Some(items) = doc.get("items") else {
        return rows;
    };
    let Some(items) = items.as_object() else {
        tracing::warn!("Catalog `items` is not an object, ignoring document");
        return rows;
    };

    let mut out = RowSink {
        category,
        rows: &mut rows,
    };

    for (sub_key, sub_value) in items {
        let Some(level) = classify_level(sub_value).as_level() else {
            continue;
        };
        match supermarket {
            Some(filter) => out.filtered_subcategory(level, sub_key, filter),
            None => out.all_supermarkets(level, sub_key),
        }
    }

    rows
}

struct RowSink<'a> {
    category: &'a str,
    rows: &'a mut Vec<ProductRow>,
}

impl RowSink<'_> {
    /// No filter: every known supermarket key at this level, plus known
    /// supermarket keys one grouping level down.
    fn all_supermarkets(&mut self, level: Level<'_>, sub_key: &str) {
        for (key, value) in level.entries() {
            if Supermarket::is_known(&key) {
                self.products(value, sub_key.to_string(), &key);
                continue;
            }

            // Only a supermarket map is searched; a deeper grouping is dropped.
            if let Node::SupermarketMap(nested) = classify_level(value) {
                for (market, products) in nested.entries() {
                    if Supermarket::is_known(&market) {
                        self.products(products, format!("{sub_key} - {key}"), &market);
                    }
                }
            }
        }
    }

    /// Filter set: take the filter key here if present, otherwise look for
    /// it exactly one grouping level down.
    fn filtered_subcategory(&mut self, level: Level<'_>, sub_key: &str, filter: &str) {
        if let Some(products) = level.get(filter).filter(|v| is_truthy(v)) {
            self.products(products, sub_key.to_string(), filter);
            return;
        }

        for (key, value) in level.entries() {
            let Some(nested) = classify_level(value).as_level() else {
                continue;
            };
            if let Some(products) = nested.get(filter).filter(|v| is_truthy(v)) {
                self.products(products, format!("{sub_key} - {key}"), filter);
            }
        }
    }

    /// Iterate one supermarket's product mapping
    fn products(&mut self, value: &Value, subcategory: String, market: &str) {
        let Some(products) = Level::of(value) else {
            return;
        };

        for (id, product) in products.entries() {
            if let Node::Product(record) = classify(product) {
                self.rows.push(product_row(
                    record,
                    &id,
                    self.category,
                    &subcategory,
                    market,
                ));
            }
        }
    }
}

fn product_row(
    record: RawProductRecord,
    id: &str,
    category: &str,
    subcategory: &str,
    market: &str,
) -> ProductRow {
    ProductRow {
        id: id.to_string(),
        price: to_pence(record.price.as_ref()),
        name: record.name,
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        quantity: record.quantity,
        unit: record.unit,
        price_per_unit: record.price_per_unit,
        image: record.image,
        net_weight: record.net_weight,
        supermarket: supermarket_display_name(market).to_string(),
    }
}
