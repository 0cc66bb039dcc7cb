use iron::renderer::{render_document, MiniJinjaRenderer, TemplateRenderer};
use serde_json::json;

#[test]
fn test_minijinja_renderer() {
    let engine = MiniJinjaRenderer::new();
    let context = json!({
        "name": "test",
        "value": 42
    });

    let result = engine.render("t", "Hello {{ name }}!", &context).unwrap();
    assert_eq!(result, "Hello test!");

    let result = engine.render("t", "Value: {{ value }}", &context).unwrap();
    assert_eq!(result, "Value: 42");

    let result = engine.render("t", "Missing: '{{ nothing }}'", &context).unwrap();
    assert_eq!(result, "Missing: ''");
}

#[test]
fn test_documents_without_placeholders_are_unchanged() {
    let engine = MiniJinjaRenderer::for_json();
    let documents = [
        json!({}),
        json!({"id": "x", "nested": {"list": [1, 2.5, true, null, "s"]}}),
        json!({"braces": "{ not a placeholder }", "unicode": "Ünïcödé ✓"}),
        json!([{"a": []}, {"b": {}}]),
    ];
    for document in documents {
        let rendered =
            render_document(&engine, "doc", &document, &json!({"canonicalName": "X"})).unwrap();
        assert_eq!(rendered, document);
    }
}

#[test]
fn test_placeholders_anywhere_in_the_document() {
    let engine = MiniJinjaRenderer::for_json();
    let document = json!({
        "id": "{{canonicalName}}",
        "title": "{{ canonicalName }} ({{ type }})",
        "relationships": {"systems": [{"id": "{{ pkg.system }}"}]}
    });
    let context = json!({"canonicalName": "X", "type": "module", "pkg": {"system": "dnd5e"}});

    let rendered = render_document(&engine, "module.yml", &document, &context).unwrap();
    assert_eq!(
        rendered,
        json!({
            "id": "X",
            "title": "X (module)",
            "relationships": {"systems": [{"id": "dnd5e"}]}
        })
    );
}
