//! Custom field resolution tests
//!
//! Covers nested and repeated references, missing identifiers and cycles
//! between custom fields.

use microcms_jsonschema::{
    convert_api_schema, ApiSchema, ConvertOptions, CustomField, FieldConverter, FieldDefinition,
    FieldKind, ResolutionPath, SchemaNode,
};
use serde_json::{json, Value};

fn to_json(node: &SchemaNode) -> Value {
    serde_json::to_value(node).unwrap()
}

fn text(id: &str) -> FieldDefinition {
    FieldDefinition::new(id, FieldKind::text())
}

#[cfg(test)]
mod nesting {
    use super::*;

    #[test]
    fn test_custom_inside_custom() {
        let pool = vec![
            CustomField::new("outer", "outer", vec![
                text("heading").with_required(true),
                FieldDefinition::new("cta", FieldKind::custom("inner")),
            ]),
            CustomField::new("inner", "inner", vec![text("label"), text("href").with_required(true)]),
        ];
        let converter = FieldConverter::new(&pool);

        let node = converter.convert_field(&FieldDefinition::new("hero", FieldKind::custom("outer")));
        assert_eq!(
            to_json(&node),
            json!({
                "type": "object",
                "properties": {
                    "heading": {"type": "string"},
                    "cta": {
                        "type": "object",
                        "properties": {
                            "label": {"type": "string"},
                            "href": {"type": "string"}
                        },
                        "required": ["href"]
                    }
                },
                "required": ["heading"]
            })
        );
    }

    #[test]
    fn test_single_repeater_equals_direct_resolution() {
        let pool = vec![CustomField::new("c", "c", vec![text("a").with_required(true), text("b")])];
        let converter = FieldConverter::new(&pool);

        let direct = converter
            .resolve_custom_field("c", &ResolutionPath::new())
            .unwrap();
        let repeater = converter.convert_field(&FieldDefinition::new("r", FieldKind::repeater(["c"])));

        assert_eq!(repeater.items.as_deref(), Some(&direct));
        assert!(repeater.items.as_ref().unwrap().one_of.is_none());
    }

    #[test]
    fn test_repeater_lists_same_definition_twice() {
        let pool = vec![CustomField::new("c", "c", vec![text("a")])];
        let converter = FieldConverter::new(&pool);

        let node = converter.convert_field(&FieldDefinition::new("r", FieldKind::repeater(["c", "c"])));
        let alternatives = node.items.unwrap().one_of.unwrap();
        assert_eq!(alternatives.len(), 2);
        assert_eq!(alternatives[0], alternatives[1]);
    }

    #[test]
    fn test_empty_custom_field_is_empty_object() {
        let pool = vec![CustomField::new("empty", "empty", Vec::new())];
        let converter = FieldConverter::new(&pool);

        let node = converter.convert_field(&FieldDefinition::new("e", FieldKind::custom("empty")));
        assert_eq!(to_json(&node), json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn test_repeater_without_identifiers() {
        let converter = FieldConverter::new(&[]);
        let node = converter.convert_field(&FieldDefinition::new("r", FieldKind::repeater(Vec::<String>::new())));
        assert_eq!(to_json(&node), json!({"type": "array"}));
    }
}

#[cfg(test)]
mod cycles {
    use super::*;

    #[test]
    fn test_mutual_recursion_through_repeaters() {
        let pool = vec![
            CustomField::new("item", "menuItem", vec![
                text("label").with_required(true),
                FieldDefinition::new("children", FieldKind::repeater(["group"])),
            ]),
            CustomField::new("group", "menuGroup", vec![
                FieldDefinition::new("items", FieldKind::repeater(["item"])),
            ]),
        ];
        let converter = FieldConverter::new(&pool);

        let node = converter.convert_field(&FieldDefinition::new("menu", FieldKind::custom("item")));
        assert_eq!(
            to_json(&node),
            json!({
                "type": "object",
                "properties": {
                    "label": {"type": "string"},
                    "children": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "items": {"type": "array", "items": {"type": "object"}}
                            }
                        }
                    }
                },
                "required": ["label"]
            })
        );
    }

    #[test]
    fn test_cycle_alternative_is_kept_in_one_of() {
        // "a" lists itself and "b"; the self reference truncates but still counts.
        let pool = vec![
            CustomField::new("a", "a", vec![FieldDefinition::new("next", FieldKind::repeater(["a", "b"]))]),
            CustomField::new("b", "b", vec![text("leaf")]),
        ];
        let converter = FieldConverter::new(&pool);

        let node = converter.convert_field(&FieldDefinition::new("root", FieldKind::custom("a")));
        assert_eq!(
            to_json(&node),
            json!({
                "type": "object",
                "properties": {
                    "next": {
                        "type": "array",
                        "items": {
                            "oneOf": [
                                {"type": "object"},
                                {"type": "object", "properties": {"leaf": {"type": "string"}}}
                            ]
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_cycle_state_is_per_branch() {
        // Both top-level fields expand "x" fully: the first branch's path is not
        // visible to the second.
        let schema = ApiSchema::new(vec![
            FieldDefinition::new("one", FieldKind::custom("x")),
            FieldDefinition::new("two", FieldKind::repeater(["x", "y"])),
        ])
        .with_custom_fields(vec![
            CustomField::new("x", "x", vec![FieldDefinition::new("y", FieldKind::custom("y"))]),
            CustomField::new("y", "y", vec![text("value")]),
        ]);

        let value = convert_api_schema(&schema, &ConvertOptions::new()).to_value().unwrap();
        let x_expanded = json!({
            "type": "object",
            "properties": {
                "y": {"type": "object", "properties": {"value": {"type": "string"}}}
            }
        });

        assert_eq!(value["properties"]["one"], x_expanded);
        assert_eq!(value["properties"]["two"]["items"]["oneOf"][0], x_expanded);
        assert_eq!(
            value["properties"]["two"]["items"]["oneOf"][1],
            json!({"type": "object", "properties": {"value": {"type": "string"}}})
        );
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let pool = vec![CustomField::new("self", "self", vec![FieldDefinition::new("me", FieldKind::custom("self"))])];
        let before = pool.clone();
        let field = FieldDefinition::new("root", FieldKind::custom("self"));
        let field_before = field.clone();

        let converter = FieldConverter::new(&pool);
        let _ = converter.convert_field(&field);

        assert_eq!(pool, before);
        assert_eq!(field, field_before);
    }
}
