//! Integration tests for property records

use serpentine_foundation::{ErrorKind, PropTable, PropValue};

#[test]
fn nested_tables_are_created_on_demand() {
    let mut props = PropTable::new();
    props.table_mut("outer").insert("n", 3_i64);
    props.table_mut("outer").insert("s", "text");

    let outer = props.get_table("outer").unwrap();
    assert_eq!(outer.get_int("n").unwrap(), 3);
    assert_eq!(outer.get_str("s").unwrap(), "text");
    assert_eq!(outer.len(), 2);
}

#[test]
fn table_mut_replaces_non_tables() {
    let mut props = PropTable::new();
    props.insert("slot", 1_i64);
    props.table_mut("slot").insert("inner", 2_i64);
    assert_eq!(props.get_table("slot").unwrap().get_int("inner").unwrap(), 2);
}

#[test]
fn typed_access_reports_mismatches() {
    let mut props = PropTable::new();
    props.insert("list", vec![1_i64, 2]);

    let err = props.get_str("list").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::FieldType { expected: "string", actual: "int list", .. }
    ));
    let err = props.get_int("absent").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingField(ref f) if f == "absent"));
}

#[test]
fn clones_are_independent() {
    let mut a = PropTable::new();
    a.insert("k", 1_i64);
    let mut b = a.clone();
    b.insert("k", 2_i64);
    assert_eq!(a.get_int("k").unwrap(), 1);
    assert_eq!(b.get("k"), Some(&PropValue::Int(2)));
}
