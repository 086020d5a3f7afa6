use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use condtable::config::{Config, EditorDefaults};
use condtable::core::{Alignment, ColumnFormat};
use condtable::{
    ConditionField, Datasource, FilterAttribute, FilterConfig, FilterConfigState, ParentHeaderConfig, Rgba,
    SymbolCode, TypedValue,
};
use pretty_assertions::assert_eq;

fn sample(name: &str) -> serde_json::Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sample-data").join(name);
    let text = fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("{} should be valid JSON: {e}", path.display()))
}

fn sample_datasource() -> Arc<Datasource> {
    Arc::new(serde_json::from_value(sample("datasource.json")).expect("datasource.json should deserialize"))
}

#[test]
fn props_overlay_defaults() {
    let record = FilterConfig::from_props(&sample("filter-box-props.json")).expect("props should seed a record");

    assert_eq!(record.column.as_deref(), Some("order_total"));
    assert_eq!(record.alignment, Some(Alignment::Right));
    assert_eq!(record.format, Some(ColumnFormat::IndianNumber));
    assert_eq!(record.thumbnail_height, TypedValue::Int(64));
    assert!(!record.multiple);
    // Not in props, so the defaults survive
    assert!(record.asc);
    assert!(record.disable_filters);
    assert_eq!(record.thumbnail_width, TypedValue::Int(50));

    assert_eq!(record.conditions.len(), 2);
    let first = record.conditions.get(0).unwrap();
    assert_eq!(first.initial_symbol, Some(SymbolCode::GreaterEqual));
    assert_eq!(first.final_symbol, Some(SymbolCode::Less));
    assert_eq!(first.color, Rgba::new(255, 0, 0, 255));
    assert_eq!(record.conditions.get(1).unwrap().final_value, None);
}

#[test]
fn edited_record_survives_json_roundtrip() {
    let record = FilterConfig::from_props(&sample("filter-box-props.json")).unwrap();
    let mut state = FilterConfigState::new(record, sample_datasource());

    state.set_attribute(FilterAttribute::DefaultValue, "1250.75").unwrap();
    let index = state.append_condition();
    state.set_condition_field(index, ConditionField::InitialSymbol, "<").unwrap();

    let json = state.to_json().expect("record serializes");
    let decoded = FilterConfig::from_props(&json).expect("serialized record reads back");

    assert_eq!(&decoded, state.record());
    assert_eq!(decoded.default_value, TypedValue::Float(1250.75));
}

#[test]
fn configured_defaults_seed_new_records() {
    let defaults = EditorDefaults {
        multiple: false,
        thumbnail_height: TypedValue::Int(80),
        ..Config::embedded().unwrap().defaults
    };
    let record = FilterConfig::from_props_with(&serde_json::json!({ "column": "order_count" }), &defaults).unwrap();
    assert!(!record.multiple);
    assert_eq!(record.thumbnail_height, TypedValue::Int(80));

    let mut state = FilterConfigState::new(record, sample_datasource());
    state.set_attribute(FilterAttribute::DefaultValue, "17").unwrap();
    assert_eq!(state.record().default_value, TypedValue::Int(17));
}

#[test]
fn malformed_props_are_rejected() {
    assert!(FilterConfig::from_props(&serde_json::json!(["not", "an", "object"])).is_err());
    assert!(FilterConfig::from_props(&serde_json::json!({ "alignment": "justify" })).is_err());
    assert!(ParentHeaderConfig::from_props(&serde_json::json!({ "children": [{ "childKey": "a" }] })).is_ok());
}

#[test]
fn null_props_fall_back_to_defaults() {
    let props = serde_json::json!({
        "column": "order_total",
        "asc": null,
        "disableSortBy": null,
        "conditionalColumnTextColor": null,
        "thumbnailHeight": null,
        "label": null,
        "conditions": null
    });
    let record = FilterConfig::from_props(&props).expect("nulls keep the seeded values");
    assert_eq!(record.column.as_deref(), Some("order_total"));
    assert!(record.asc);
    assert!(!record.disable_sort_by);
    assert_eq!(record.conditional_column_text_color, Rgba::BLACK);
    assert_eq!(record.thumbnail_height, TypedValue::Int(50));
    assert_eq!(record.label, None);
    assert!(record.conditions.is_empty());

    let header = ParentHeaderConfig::from_props(&serde_json::json!({ "children": null, "multiple": null }))
        .expect("nulls keep the seeded values");
    assert!(header.children.is_empty());
    assert!(header.multiple);
}
