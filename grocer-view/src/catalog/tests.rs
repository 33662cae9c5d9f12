use super::*;
use serde_json::json;
use shared::NetWeight;

fn names(rows: &[shared::ProductRow]) -> Vec<&str> {
    rows.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_missing_items_yields_nothing() {
    assert!(normalize(&json!({}), "salad", None).is_empty());
    assert!(normalize(&json!({"products": {"a": 1}}), "salad", Some("as")).is_empty());
    assert!(normalize(&json!([1, 2, 3]), "salad", None).is_empty());
    assert!(normalize(&json!({"items": "nope"}), "salad", None).is_empty());
}

#[test]
fn test_direct_supermarket_map() {
    let doc = json!({"items": {"leafy": {"as": {"p1": {"n": "Spinach", "p": 1.2}}}}});

    let rows = normalize(&doc, "salad", None);

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.id, "p1");
    assert_eq!(row.name, "Spinach");
    assert_eq!(row.category, "salad");
    assert_eq!(row.subcategory, "leafy");
    assert_eq!(row.price, 120);
    assert_eq!(row.supermarket, "Asda");
}

#[test]
fn test_filter_not_present_yields_nothing() {
    let doc = json!({"items": {"leafy": {"as": {"p1": {"n": "Spinach", "p": 1.2}}}}});
    assert!(normalize(&doc, "salad", Some("ms")).is_empty());
}

#[test]
fn test_nested_grouping_gets_composite_label() {
    let doc = json!({"items": {"leafy": {"organic": {"as": {"p2": {"n": "Kale"}}}}}});

    let rows = normalize(&doc, "salad", None);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "p2");
    assert_eq!(rows[0].subcategory, "leafy - organic");
    assert_eq!(rows[0].price, 0);
}

#[test]
fn test_filter_found_one_level_down() {
    let doc = json!({"items": {"leafy": {
        "organic": {"tc": {"p3": {"n": "Rocket", "p": 0.85}}},
        "standard": {"as": {"p4": {"n": "Iceberg"}}}
    }}});

    let rows = normalize(&doc, "salad", Some("tc"));

    assert_eq!(names(&rows), vec!["Rocket"]);
    assert_eq!(rows[0].subcategory, "leafy - organic");
    assert_eq!(rows[0].supermarket, "Tesco");
    assert_eq!(rows[0].price, 85);
}

#[test]
fn test_filter_at_top_level_skips_nested_search() {
    let doc = json!({"items": {"leafy": {
        "tc": {"p1": {"n": "Top"}},
        "organic": {"tc": {"p2": {"n": "Nested"}}}
    }}});

    let rows = normalize(&doc, "salad", Some("tc"));

    assert_eq!(names(&rows), vec!["Top"]);
}

#[test]
fn test_mixed_level_without_filter() {
    let doc = json!({"items": {"roots": {
        "al": {"a1": {"n": "Carrots", "p": 0.45}},
        "organic": {
            "ms": {"m1": {"n": "Organic Carrots", "p": 1.1}},
            "notes": "not a supermarket"
        },
        "oc": {"o1": {"n": "Beetroot", "p": 0.9}}
    }}});

    let rows = normalize(&doc, "vegs", None);

    assert_eq!(names(&rows), vec!["Carrots", "Organic Carrots", "Beetroot"]);
    assert_eq!(rows[0].subcategory, "roots");
    assert_eq!(rows[0].supermarket, "Aldi");
    assert_eq!(rows[1].subcategory, "roots - organic");
    assert_eq!(rows[1].supermarket, "Morrisons");
    assert_eq!(rows[2].subcategory, "roots");
    assert_eq!(rows[2].supermarket, "Ocado");
}

#[test]
fn test_records_without_name_are_skipped() {
    let doc = json!({"items": {"berries": {"as": {
        "b1": {"p": 2.0, "img": "x.jpg"},
        "b2": {"n": "Blueberries", "p": 2.0},
        "b3": {"n": ""},
        "b4": "garbage",
        "b5": null,
        "b6": 17
    }}}});

    let rows = normalize(&doc, "fruit", None);

    assert_eq!(names(&rows), vec!["Blueberries"]);
}

#[test]
fn test_output_follows_document_order() {
    let doc = json!({"items": {
        "zucchini": {"tc": {"z": {"n": "Courgette"}}},
        "apples": {"tc": {
            "k9": {"n": "Gala"},
            "a1": {"n": "Braeburn"}
        }}
    }});

    let rows = normalize(&doc, "vegs", None);

    assert_eq!(names(&rows), vec!["Courgette", "Gala", "Braeburn"]);
}

#[test]
fn test_three_levels_deep_is_dropped() {
    // Only one grouping level below the sub-category is searched.
    let doc = json!({"items": {"leafy": {"organic": {"baby": {"as": {
        "p9": {"n": "Baby Kale"}
    }}}}}});

    assert!(normalize(&doc, "salad", None).is_empty());
    assert!(normalize(&doc, "salad", Some("as")).is_empty());
}

#[test]
fn test_all_fields_mapped() {
    let doc = json!({"items": {"nuts": {"ms": {"n1": {
        "n": "Almonds",
        "p": 2.5,
        "q": 1,
        "u": "pack",
        "ppuom": "£12.50/kg",
        "img": "https://img.example/almonds.png",
        "nw": {"t": 200, "u": "g"}
    }}}}});

    let rows = normalize(&doc, "sndfm", None);

    let row = &rows[0];
    assert_eq!(row.price, 250);
    assert_eq!(row.quantity, Some(1.0));
    assert_eq!(row.unit.as_deref(), Some("pack"));
    assert_eq!(row.price_per_unit.as_deref(), Some("£12.50/kg"));
    assert_eq!(row.image.as_deref(), Some("https://img.example/almonds.png"));
    assert_eq!(row.net_weight, Some(NetWeight { t: 200.0, u: "g".to_string() }));
    assert_eq!(row.supermarket, "Morrisons");
}

#[test]
fn test_unknown_filter_key_labels_with_raw_id() {
    let doc = json!({"items": {"leafy": {"lidl": {"p1": {"n": "Spinach"}}}}});

    let rows = normalize(&doc, "salad", Some("lidl"));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].supermarket, "lidl");
}

#[test]
fn test_non_object_subcategories_ignored() {
    let doc = json!({"items": {
        "count": 3,
        "tags": ["a", "b"],
        "leafy": {"as": {"p1": {"n": "Spinach"}}}
    }});

    let rows = normalize(&doc, "salad", None);

    assert_eq!(names(&rows), vec!["Spinach"]);
}

#[test]
fn test_falsy_filter_value_falls_through_to_nested_search() {
    let doc = json!({"items": {"leafy": {
        "as": null,
        "organic": {"as": {"p1": {"n": "Kale"}}}
    }}});

    let rows = normalize(&doc, "salad", Some("as"));

    assert_eq!(names(&rows), vec!["Kale"]);
    assert_eq!(rows[0].subcategory, "leafy - organic");
}

#[test]
fn test_product_array_keyed_by_index() {
    let doc = json!({"items": {"leafy": {"as": [
        {"n": "Spinach", "p": 1.2},
        "noise",
        {"n": "Chard"}
    ]}}});

    let rows = normalize(&doc, "salad", None);

    assert_eq!(names(&rows), vec!["Spinach", "Chard"]);
    assert_eq!(rows[0].id, "0");
    assert_eq!(rows[1].id, "2");
    assert_eq!(rows[0].supermarket, "Asda");

    let filtered = normalize(&doc, "salad", Some("as"));
    assert_eq!(names(&filtered), vec!["Spinach", "Chard"]);
}

#[test]
fn test_grouping_array_gets_index_label() {
    let doc = json!({"items": {"leafy": [
        {"tc": {"p1": {"n": "Rocket"}}}
    ]}});

    let rows = normalize(&doc, "salad", None);
    assert_eq!(names(&rows), vec!["Rocket"]);
    assert_eq!(rows[0].subcategory, "leafy - 0");

    let filtered = normalize(&doc, "salad", Some("tc"));
    assert_eq!(filtered[0].subcategory, "leafy - 0");
}

#[test]
fn test_subcategory_with_name_field_is_still_walked() {
    let doc = json!({"items": {"leafy": {
        "n": "Leafy greens",
        "as": {"p1": {"n": "Spinach"}},
        "organic": {"n": "Organic", "tc": {"p2": {"n": "Kale"}}}
    }}});

    let rows = normalize(&doc, "salad", None);
    assert_eq!(names(&rows), vec!["Spinach", "Kale"]);
    assert_eq!(rows[1].subcategory, "leafy - organic");

    let filtered = normalize(&doc, "salad", Some("tc"));
    assert_eq!(names(&filtered), vec!["Kale"]);
}
