#[cfg(test)]
pub mod fixtures {
    use serde_json::json;
    use crate::executor::Row;

    pub fn customer_with_orders() -> Row {
        Row::try_from(json!({
            "Id": 1,
            "Name": "Alice Johnson",
            "City": "Porto",
            "Address": { "Street": "Rua das Flores", "Zip": "4050-262" },
            "Orders": [
                { "Id": 1,  "Total": 699.00,  "Status": "new" },
                { "Id": 16, "Total": 25.99,   "Status": "delivered" },
                { "Id": 31, "Total": 1200.50, "Status": "shipped" }
            ]
        })).unwrap()
    }

    pub fn customer_without_address() -> Row {
        Row::try_from(json!({
            "Id": 2,
            "Name": "Bruno Martins",
            "City": "Lisboa",
            "Address": null,
            "Orders": []
        })).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use std::{num::NonZeroUsize, sync::Arc, thread};

    use indexmap::IndexMap;
    use serde_json::{json, Value};

    use super::fixtures::*;
    use crate::{
        executor::Row,
        expression::{NameExpr, NamedProperty, ValueExpr, ValueKind},
        projection::{ProjectedValue, ProjectionCompiler, ProjectionConfig, ProjectionError, PropertyContainer},
    };

    fn page(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn build(properties: &[NamedProperty]) -> PropertyContainer {
        ProjectionCompiler::compile(properties).unwrap().evaluate(&Row::new()).unwrap()
    }

    // --- property counts across the ladder ---------------------------------

    #[test]
    fn various_numbers_of_properties_round_trip() {
        for count in [0usize, 1, 2, 6, 7, 8, 100] {
            let properties: Vec<_> = (0..count)
                .map(|i| NamedProperty::new(i.to_string(), ValueExpr::literal(i as i64)))
                .collect();

            let dict = build(&properties).to_dictionary(true);

            let expected: IndexMap<String, Value> = (0..count).map(|i| (i.to_string(), json!(i))).collect();
            assert_eq!(dict.len(), count, "count {count}");
            for (k, v) in &expected {
                assert_eq!(&dict[k.as_str()], v, "count {count}, key {k}");
            }
            // declaration order survives overflow chaining
            assert!(dict.keys().eq(expected.keys()), "order for count {count}");
        }
    }

    #[test]
    fn small_ladder_gives_identical_results() {
        let properties: Vec<_> = (0..20)
            .map(|i| NamedProperty::new(format!("p{i}"), ValueExpr::literal(i as i64)))
            .collect();
        let row = Row::new();
        let wide = ProjectionCompiler::compile(&properties).unwrap().evaluate(&row).unwrap();
        let narrow = ProjectionCompiler::compile_with_config(&properties, &ProjectionConfig::with_max_slots(1))
            .unwrap()
            .evaluate(&row)
            .unwrap();
        assert_eq!(wide.to_json(true), narrow.to_json(true));
    }

    // --- concrete scenarios -------------------------------------------------

    #[test]
    fn single_property() {
        let dict = build(&[NamedProperty::new("PropertyName", ValueExpr::literal(42))]).to_dictionary(false);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict["PropertyName"], json!(42));
    }

    #[test]
    fn multiple_properties_with_null_check() {
        let dict = build(&[
            NamedProperty::new("Prop1", ValueExpr::literal(1)).with_null_check(ValueExpr::literal(true)),
            NamedProperty::new("Prop2", ValueExpr::literal(2)).with_null_check(ValueExpr::literal(false)),
        ]).to_dictionary(false);
        assert!(dict["Prop1"].is_null());
        assert_eq!(dict["Prop2"], json!(2));
    }

    #[test]
    fn page_size_truncates_sequence() {
        let dict = build(&[NamedProperty::new("PropertyName", ValueExpr::range(0, 10)).with_page_size(page(5))])
            .to_dictionary(false);
        let truncated = dict["PropertyName"].as_truncated().expect("truncated collection");
        assert!(truncated.is_truncated());
        assert_eq!(truncated.page_size(), 5);
        let items: Vec<_> = truncated.iter().map(|v| v.to_json(false)).collect();
        assert_eq!(items, (0..5).map(|i| json!(i)).collect::<Vec<_>>());
    }

    #[test]
    fn page_size_reports_truncation_only_when_longer() {
        for (len, k) in [(0i64, 3usize), (2, 3), (3, 3), (4, 3), (10, 1)] {
            let dict = build(&[NamedProperty::new("Seq", ValueExpr::range(0, len)).with_page_size(page(k))])
                .to_dictionary(false);
            let t = dict["Seq"].as_truncated().unwrap();
            assert_eq!(t.is_truncated(), len as usize > k, "len {len}, k {k}");
            assert_eq!(t.len(), (len as usize).min(k));
            let expected: Vec<Value> = (0..(len as usize).min(k)).map(|i| json!(i)).collect();
            assert_eq!(dict["Seq"].to_json(false), Value::Array(expected));
        }
    }

    // --- auto-selected ------------------------------------------------------

    #[test]
    fn auto_selected_property_is_hidden_unless_requested() {
        let container = build(&[NamedProperty::new("PropertyName", ValueExpr::literal(42)).auto_selected()]);
        assert!(container.to_dictionary(true).contains_key("PropertyName"));
        assert!(!container.to_dictionary(false).contains_key("PropertyName"));
        // the slot is populated either way
        assert_eq!(container.len(), 1);
    }

    // --- null names ---------------------------------------------------------

    #[test]
    fn null_property_name_is_not_included() {
        let property = NamedProperty::new(NameExpr::null(), ValueExpr::literal("entity"));
        let container = build(&[property.clone(), property]);
        assert!(container.to_dictionary(true).is_empty());
        assert!(container.is_empty());
    }

    #[test]
    fn runtime_null_names_are_skipped_by_the_materializer() {
        let row = Row::try_from(json!({ "Label": null, "Other": "Name" })).unwrap();
        let plan = ProjectionCompiler::compile(&[
            NamedProperty::new(NameExpr::property("Label"), ValueExpr::literal(1)),
            NamedProperty::new(NameExpr::property("Other"), ValueExpr::literal(2)),
        ]).unwrap();
        let container = plan.evaluate(&row).unwrap();
        assert_eq!(container.len(), 2);
        assert_eq!(container.to_json(true), json!({ "Name": 2 }));
    }

    // --- null propagation through navigation --------------------------------

    #[test]
    fn null_check_guards_navigation() {
        let properties = vec![
            NamedProperty::new("Name", ValueExpr::property("Name")),
            NamedProperty::new("Street", ValueExpr::property("Address/Street"))
                .with_null_check(ValueExpr::is_null(ValueExpr::property("Address"))),
        ];
        let plan = ProjectionCompiler::compile(&properties).unwrap();

        let with = plan.evaluate(&customer_with_orders()).unwrap();
        assert_eq!(with.to_json(false), json!({ "Name": "Alice Johnson", "Street": "Rua das Flores" }));

        let without = plan.evaluate(&customer_without_address()).unwrap();
        assert_eq!(without.to_json(false), json!({ "Name": "Bruno Martins", "Street": null }));
    }

    #[test]
    fn null_check_true_hides_non_null_value() {
        let dict = build(&[NamedProperty::new("Secret", ValueExpr::literal("value")).with_null_check(ValueExpr::literal(true))])
            .to_dictionary(true);
        assert_eq!(dict["Secret"], ProjectedValue::null());
    }

    // --- expansion ----------------------------------------------------------

    #[test]
    fn select_and_expand_with_paged_orders() {
        let orders = ProjectionCompiler::compile(&[
            NamedProperty::new("Id", ValueExpr::property("Id")),
            NamedProperty::new("Status", ValueExpr::property("Status")),
        ]).unwrap();
        let properties = vec![
            NamedProperty::new("Id", ValueExpr::property("Id")).auto_selected(),
            NamedProperty::new("Name", ValueExpr::property("Name")),
            NamedProperty::new("Orders", ValueExpr::expand("Orders", orders)).with_page_size(page(2)),
        ];
        let plan = ProjectionCompiler::compile(&properties).unwrap();

        let container = plan.evaluate(&customer_with_orders()).unwrap();
        let dict = container.to_dictionary(false);
        assert!(!dict.contains_key("Id"));
        assert!(dict["Orders"].as_truncated().unwrap().is_truncated());
        assert_eq!(serde_json::to_value(&container).unwrap(), json!({
            "Name": "Alice Johnson",
            "Orders": [
                { "Id": 1,  "Status": "new" },
                { "Id": 16, "Status": "delivered" }
            ]
        }));

        let empty = plan.evaluate(&customer_without_address()).unwrap();
        let orders = empty.to_dictionary(false)["Orders"].clone();
        assert!(!orders.as_truncated().unwrap().is_truncated());
        assert_eq!(orders.to_json(false), json!([]));
    }

    #[test]
    fn auto_selected_flag_reaches_nested_containers() {
        let address = ProjectionCompiler::compile(&[
            NamedProperty::new("Zip", ValueExpr::property("Zip")).auto_selected(),
            NamedProperty::new("Street", ValueExpr::property("Street")),
        ]).unwrap();
        let plan = ProjectionCompiler::compile(&[NamedProperty::new("Address", ValueExpr::expand("Address", address))]).unwrap();
        let container = plan.evaluate(&customer_with_orders()).unwrap();
        assert_eq!(container.to_json(false), json!({ "Address": { "Street": "Rua das Flores" } }));
        assert_eq!(container.to_json(true), json!({ "Address": { "Zip": "4050-262", "Street": "Rua das Flores" } }));
    }

    // --- key collisions -----------------------------------------------------

    #[test]
    fn colliding_names_last_write_wins() {
        let dict = build(&[
            NamedProperty::new("Same", ValueExpr::literal(1)),
            NamedProperty::new("Same", ValueExpr::literal(2)),
        ]).to_dictionary(false);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict["Same"], json!(2));
    }

    #[test]
    fn hidden_duplicate_does_not_overwrite_visible_one() {
        let container = build(&[
            NamedProperty::new("Same", ValueExpr::literal(1)),
            NamedProperty::new("Same", ValueExpr::literal(2)).auto_selected(),
        ]);
        assert_eq!(container.to_dictionary(false)["Same"], json!(1));
        assert_eq!(container.to_dictionary(true)["Same"], json!(2));
    }

    // --- errors -------------------------------------------------------------

    #[test]
    fn paging_a_scalar_property_fails_at_evaluation() {
        let plan = ProjectionCompiler::compile(&[NamedProperty::new("Name", ValueExpr::property("Name")).with_page_size(page(2))]).unwrap();
        let err = plan.evaluate(&customer_with_orders()).unwrap_err();
        assert_eq!(err, ProjectionError::InvalidShape { property: "Name".into(), found: ValueKind::String });
        assert!(err.to_string().starts_with("InvalidShape"));
    }

    #[test]
    fn evaluate_all_surfaces_first_failure() {
        let plan = ProjectionCompiler::compile(&[NamedProperty::new("Orders", ValueExpr::property("Orders")).with_page_size(page(1))]).unwrap();
        let bad = Row::try_from(json!({ "Orders": "nope" })).unwrap();
        let rows = vec![customer_with_orders(), bad, customer_without_address()];
        assert!(matches!(plan.evaluate_all(&rows), Err(ProjectionError::InvalidShape { .. })));
    }

    // --- reuse --------------------------------------------------------------

    #[test]
    fn compiled_plan_is_reusable_across_threads() {
        let plan = Arc::new(ProjectionCompiler::compile(&[
            NamedProperty::new("Id", ValueExpr::property("Id")),
            NamedProperty::new("City", ValueExpr::property("City")),
        ]).unwrap());

        let handles: Vec<_> = [customer_with_orders(), customer_without_address()]
            .into_iter()
            .map(|row| {
                let plan = Arc::clone(&plan);
                thread::spawn(move || plan.evaluate(&row).unwrap().to_json(false))
            })
            .collect();
        let out: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(out, vec![json!({ "Id": 1, "City": "Porto" }), json!({ "Id": 2, "City": "Lisboa" })]);
    }
}
