use conform::path_de::{documents_from_str, schema_from_str};
use conform::{
    assert_conforms, assert_not_conforms, compile, conform_to_schema, optional, Key, Kind, Options, Schema,
    Segment, Validator, Value,
};

fn validate(actual: &Value, schema: &Schema) -> Validator {
    Validator::new(actual, schema, Options::default())
}

#[test]
fn nested_sequences_and_maps_conform() {
    let schema = Schema::map([
        ("foo", Schema::seq([Kind::String])),
        ("bar", Schema::seq([Schema::map([("baz", Kind::Number)])])),
    ]);
    let actual = Value::map([
        ("foo", Value::seq(["a", "b"])),
        ("bar", Value::seq([Value::map([("baz", 1)])])),
    ]);
    assert!(validate(&actual, &schema).is_valid());
}

#[test]
fn bad_element_is_located_by_index() {
    let schema = Schema::seq([Kind::Number]);
    let actual = Value::seq([Value::from(1), Value::from(2), Value::from("x")]);
    let validator = validate(&actual, &schema);
    assert!(!validator.is_valid());
    let mismatch = validator.first_mismatch().unwrap();
    assert_eq!(mismatch.location, vec![Segment::Index(2)]);
    assert_eq!(mismatch.pointer(), "/2");
}

#[test]
fn absent_optional_key_is_fine() {
    let schema = Schema::map([("a", Schema::from(1)), ("optional", optional(2))]);
    assert!(validate(&Value::map([("a", 1)]), &schema).is_valid());
    assert!(validate(&Value::map([("a", 1), ("optional", 2)]), &schema).is_valid());
    assert!(!validate(&Value::map([("a", 1), ("optional", 3)]), &schema).is_valid());
}

#[test]
fn breakfast_order_with_optional_side() {
    let schema = Schema::map([("entree", Schema::from(Kind::String)), ("side", optional(Kind::String))]);
    assert_conforms!(Value::map([("entree", "eggs")]), conform_to_schema(schema.clone()));
    assert_conforms!(Value::map([("entree", "eggs"), ("side", "toast")]), conform_to_schema(schema.clone()));
    assert_not_conforms!(
        Value::map([("entree", Value::from("eggs")), ("side", Value::from(1))]),
        conform_to_schema(schema),
    );
}

#[test]
fn single_mismatch_deep_inside_a_sequence_of_maps() {
    let schema = Schema::map([("foo", Schema::seq([Schema::map([("bar", Kind::Number)])]))]);
    let actual = Value::map([(
        "foo",
        Value::seq([Value::map([("bar", Value::from(1))]), Value::map([("bar", Value::from("squirrel"))])]),
    )]);
    let comparison = compile(&schema, &Options::default()).compare(&actual);
    assert_eq!(comparison.mismatches().len(), 1);
    assert_eq!(
        comparison.mismatches()[0].location,
        vec![Segment::from("foo"), Segment::Index(1), Segment::from("bar")]
    );
}

#[test]
fn extra_key_is_one_root_mismatch() {
    let schema = Schema::map([("foo", Kind::Number), ("bar", Kind::Number)]);
    let actual = Value::map([("foo", 1), ("bar", 2), ("baz", 3)]);
    let comparison = compile(&schema, &Options::default()).compare(&actual);
    assert_eq!(comparison.mismatches().len(), 1);
    let mismatch = &comparison.mismatches()[0];
    assert!(mismatch.location.is_empty());
    assert_eq!(
        mismatch.message(),
        "expected / to have a different set of keys\nextra keys were:\n\t\"baz\""
    );
}

#[test]
fn symbol_and_string_keys_meet_under_indifferent_access() {
    let schema = Schema::map([(Key::sym("entree"), Kind::String)]);
    let actual = Value::map([("entree", "eggs")]);
    assert!(!validate(&actual, &schema).is_valid());
    assert!(Validator::new(&actual, &schema, Options::default().with_indifferent_access()).is_valid());
}

#[test]
fn json_encoded_schema_checks_json_documents() {
    let schema = schema_from_str(
        "order.schema.json",
        r#"{
            "entree": {"$type": "string"},
            "side": {"$optional": {"$type": "string"}},
            "count": {"$range": {"min": 1, "max": 12}},
            "code": [{"$type": "integer"}, {"$pattern": "^[A-Z]{3}$"}]
        }"#,
    )
    .unwrap();
    let compiled = compile(&schema, &Options::default());

    let docs = documents_from_str(
        "orders.ndjson",
        concat!(
            r#"{"entree": "eggs", "count": 2, "code": 7}"#,
            "\n",
            r#"{"entree": "eggs", "side": "toast", "count": 3, "code": "ABC"}"#,
            "\n",
            r#"{"entree": "eggs", "count": 40, "code": "ABC"}"#,
            "\n",
        ),
        true,
        None,
    )
    .unwrap();

    let verdicts: Vec<bool> = docs
        .iter()
        .map(|doc| Validator::from_compiled(&doc.value, &compiled).is_valid())
        .collect();
    assert_eq!(verdicts, vec![true, true, false]);

    let failure = Validator::from_compiled(&docs[2].value, &compiled).failure_message().unwrap();
    assert_eq!(failure, "expected /count to match\n\t1..=12\nbut got\n\t40");
}
