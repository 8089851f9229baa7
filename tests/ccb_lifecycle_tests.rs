//! CCB Lifecycle Tests
//!
//! End-to-end tests for the public `ccbstage` surface: staging operations
//! through the registry, walking them back, and tearing a bundle down in
//! one step.

use ccbstage::prelude::*;

// ============================================================================
// Bundle Lifecycle Tests
// ============================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn full_bundle_lifecycle() {
        let mut registry = CcbRegistry::new();
        let id = CcbId::new(42);

        // Create callback arrives.
        registry
            .get_or_create(id)
            .add_create_with_name(
                "obj=1,app=demo",
                "DemoClass",
                Some("app=demo"),
                &[Attr::single("count", Value::Uint32(5))],
            )
            .unwrap();

        // Modify callback arrives.
        registry
            .get_or_create(id)
            .add_modify(
                "obj=1,app=demo",
                &[AttrMod::replace("count", Value::Uint32(7))],
            )
            .unwrap();

        // Completion: walk the staged operations in arrival order.
        let record = registry.find(id).unwrap();
        let ops = record.operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0].kind(), OperationKind::Create { .. }));
        match ops[1].kind() {
            OperationKind::Modify { mods, .. } => {
                assert_eq!(mods[0].mod_type(), ModType::Replace);
                assert_eq!(mods[0].attr().values()[0].as_u32(), Some(7));
            }
            other => panic!("expected modify, got {:?}", other),
        }

        // Apply (or abort): the whole bundle goes at once.
        assert!(registry.delete(id));
        assert!(registry.find(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn bundles_are_independent() {
        let mut registry = CcbRegistry::new();
        registry.get_or_create(CcbId::new(1)).add_delete("obj=a");
        registry.get_or_create(CcbId::new(2)).add_delete("obj=b");

        registry.delete(CcbId::new(1));

        let survivor = registry.find(CcbId::new(2)).unwrap();
        assert_eq!(
            survivor.operations()[0].object_name(survivor.arena()),
            "obj=b"
        );
    }

    #[test]
    fn staged_data_outlives_caller_buffers() {
        let mut registry = CcbRegistry::new();
        let id = CcbId::new(3);
        {
            let attrs = vec![Attr::single(
                "label",
                Value::String("transient".to_string()),
            )];
            registry
                .get_or_create(id)
                .add_create("DemoClass", None, &attrs)
                .unwrap();
            // attrs dropped here, as after a callback returns
        }

        let record = registry.find(id).unwrap();
        match record.operations()[0].kind() {
            OperationKind::Create { attrs, .. } => {
                assert_eq!(attrs[0].values()[0].as_str(record.arena()), Some("transient"));
            }
            other => panic!("expected create, got {:?}", other),
        }
    }
}

// ============================================================================
// Iteration Tests
// ============================================================================

mod iteration {
    use super::*;

    #[test]
    fn cursor_walk_covers_the_whole_bundle() {
        let mut registry = CcbRegistry::new();
        let id = CcbId::new(7);
        {
            let record = registry.get_or_create(id);
            record.add_delete("obj=1");
            record
                .add_modify("obj=2", &[AttrMod::replace("count", Value::Uint32(1))])
                .unwrap();
        }

        let mut cursor = None;
        let mut count = 0;
        while let Some(op) = registry.next_operation(id, cursor) {
            assert_eq!(op.ccb_id(), id);
            cursor = Some(op.seq());
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn from_head_probe_materializes_an_empty_record() {
        let mut registry = CcbRegistry::new();
        let id = CcbId::new(8);

        assert!(registry.next_operation(id, None).is_none());
        // The probe created the record, so the registry is no longer empty
        // until the bundle is explicitly deleted.
        assert!(!registry.is_empty());
        registry.delete(id);
        assert!(registry.is_empty());
    }

    #[test]
    fn lookup_by_object_name() {
        let mut registry = CcbRegistry::new();
        let id = CcbId::new(9);
        registry.get_or_create(id).add_delete("obj=1,app=demo");

        let op = registry
            .find_operation_by_name(id, "obj=1,app=demo")
            .unwrap();
        assert!(matches!(op.kind(), OperationKind::Delete { .. }));
        assert!(registry.find_operation_by_name(id, "obj=2,app=demo").is_none());
    }
}

// ============================================================================
// Attribute Helper Tests
// ============================================================================

mod attrs_helpers {
    use super::*;
    use ccbstage::attrs;

    #[test]
    fn typed_lookup_over_an_attribute_list() {
        let list = vec![
            Attr::single("name", Value::Name("obj=1".to_string())),
            Attr::single("count", Value::Uint32(12)),
        ];

        assert_eq!(attrs::u32_value(&list, "count", 0), Some(12));
        assert_eq!(attrs::name_value(&list, "name", 0), Some("obj=1"));
        // Type mismatch and missing attribute both read as absent.
        assert_eq!(attrs::string_value(&list, "count", 0), None);
        assert_eq!(attrs::u32_value(&list, "absent", 0), None);
    }

    #[test]
    fn attrs_survive_a_json_roundtrip() {
        let attr = Attr::new(
            "aliases",
            ValueType::String,
            vec![Value::String("a".to_string()), Value::String("b".to_string())],
        );
        let encoded = serde_json::to_string(&attr).unwrap();
        let decoded: Attr = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, attr);
    }

    #[test]
    fn values_parse_from_text() {
        assert_eq!(
            Value::parse(ValueType::Uint32, "0x2a").unwrap(),
            Value::Uint32(42)
        );
        assert_eq!(
            Value::parse(ValueType::Blob, "abc").unwrap(),
            Value::Blob(vec![0xab, 0xc0])
        );
        assert!(Value::parse(ValueType::Int32, "not-a-number").is_err());
    }
}
