//! Generated documents compile as draft-07 and accept real content

use microcms_jsonschema::loader::SchemaLoader;
use microcms_jsonschema::{
    convert_api_schema, convert_bundle, ApiSchema, ConvertOptions, ContentValidator, CustomField,
    FieldDefinition, FieldKind,
};
use serde_json::json;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn blog_validator(options: ConvertOptions) -> ContentValidator {
    let schema = SchemaLoader::new().load_api_schema(&fixture("blog.json")).unwrap();
    let doc = convert_api_schema(&schema, &options);
    ContentValidator::new(&doc).unwrap()
}

fn blog_post() -> serde_json::Value {
    json!({
        "id": "post-1",
        "title": "Hello",
        "body": "<p>Hello world</p>",
        "category": "news",
        "tags": [{"id": "rust"}, {"id": "cms"}],
        "eyecatch": {"url": "https://images.example.com/a.png", "height": 630, "width": 1200},
        "rating": 4,
        "featured": true,
        "publishedOn": "2024-05-01T12:00:00.000Z",
        "seo": {"metaTitle": "Hello", "metaDescription": "A first post"},
        "blocks": [
            {"content": "<p>intro</p>"},
            {"image": {"url": "https://images.example.com/b.png"}, "caption": "b"}
        ]
    })
}

#[test]
fn test_blog_post_is_accepted() {
    let validator = blog_validator(ConvertOptions::new());
    let result = validator.validate(&blog_post());
    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn test_extension_keys_do_not_affect_validation() {
    let validator = blog_validator(ConvertOptions::new().with_extensions(true));
    assert!(validator.is_valid(&blog_post()));

    let mut post = blog_post();
    post["rating"] = json!(9);
    assert!(!validator.is_valid(&post));
}

#[test]
fn test_blog_post_violations() {
    let validator = blog_validator(ConvertOptions::new().with_annotations(true));

    let mut post = blog_post();
    post.as_object_mut().unwrap().remove("body");
    post["category"] = json!("sports");
    post["rating"] = json!(0);
    post["seo"] = json!({"metaDescription": "x".repeat(161)});

    let err = validator.validate(&post).unwrap_err();
    let paths: Vec<&str> = err.violations.iter().map(|v| v.instance_path.as_str()).collect();

    assert!(paths.contains(&""), "missing required body at root: {:?}", paths);
    assert!(paths.contains(&"/category"));
    assert!(paths.contains(&"/rating"));
    assert!(paths.contains(&"/seo"));
    assert!(paths.contains(&"/seo/metaDescription"));
}

#[test]
fn test_text_limits_only_checked_with_annotations() {
    let mut post = blog_post();
    post["seo"]["metaDescription"] = json!("x".repeat(161));

    assert!(blog_validator(ConvertOptions::new()).is_valid(&post));
    assert!(!blog_validator(ConvertOptions::new().with_annotations(true)).is_valid(&post));
}

#[test]
fn test_repeater_item_must_match_one_alternative() {
    let validator = blog_validator(ConvertOptions::new());

    let mut post = blog_post();
    post["blocks"] = json!([{"caption": "no image"}]);
    assert!(!validator.is_valid(&post));
}

#[test]
fn test_cyclic_schema_compiles() {
    let schema = ApiSchema::new(vec![FieldDefinition::new("tree", FieldKind::custom("node"))])
        .with_custom_fields(vec![CustomField::new("node", "node", vec![
            FieldDefinition::new("label", FieldKind::text()).with_required(true),
            FieldDefinition::new("children", FieldKind::repeater(["node"])),
        ])]);

    let validator = ContentValidator::new(&convert_api_schema(&schema, &ConvertOptions::new())).unwrap();

    // Depth beyond the truncation point is only checked as "some object"
    let content = json!({
        "tree": {
            "label": "root",
            "children": [{"anything": true}]
        }
    });
    assert!(validator.is_valid(&content));
    assert!(!validator.is_valid(&json!({"tree": {"children": []}})));
}

#[test]
fn test_every_bundle_document_compiles() {
    let bundle = SchemaLoader::new().load_bundle(&fixture("bundle.yaml")).unwrap();
    let converted = convert_bundle(&bundle, &ConvertOptions::new().with_extensions(true));

    for (endpoint, doc) in converted.iter() {
        let validator = ContentValidator::new(doc)
            .unwrap_or_else(|e| panic!("{} failed to compile: {}", endpoint, e));
        assert!(!validator.is_valid(&json!({})), "{} accepts empty content", endpoint);
    }
}
