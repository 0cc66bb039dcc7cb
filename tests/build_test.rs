mod common;

use common::project;
use iron::build::{build, language_sources};
use iron::context::{build_context, package_descriptor_or_empty, Environment};
use iron::error::Error;
use iron::project::ProjectType;
use iron::renderer::MiniJinjaRenderer;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn read_json(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test_log::test]
fn test_module_build_renders_canonical_name() {
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path(), ProjectType::Module, "mymod");
    fs::write(temp_dir.path().join("module.yml"), "id: mymod\ntitle: \"{{canonicalName}}\"\n")
        .unwrap();

    let context = build_context(&config, json!({}), &Environment::new()).unwrap();
    let report = build(&MiniJinjaRenderer::for_json(), &config, &context).unwrap();

    let output = temp_dir.path().join("dist").join("module.json");
    assert_eq!(report.written, vec![output.clone()]);
    assert_eq!(read_json(&output), json!({"id": "mymod", "title": "mymod"}));
}

#[test]
fn test_manifest_without_placeholders_is_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path(), ProjectType::Module, "plain");
    let source = r#"
id: plain
title: Plain Module
version: 1.0.0
compatibility:
  minimum: 12
  verified: "13"
esmodules:
  - main.js
flags:
  hotReload: true
  weight: 1.5
"#;
    fs::write(temp_dir.path().join("module.yml"), source).unwrap();

    let context = build_context(&config, json!({"name": "ignored"}), &Environment::new()).unwrap();
    build(&MiniJinjaRenderer::for_json(), &config, &context).unwrap();

    let expected: serde_json::Value = serde_yaml::from_str(source).unwrap();
    assert_eq!(read_json(&temp_dir.path().join("dist/module.json")), expected);
}

#[test]
fn test_jinja_tag_openers_in_strings_are_kept() {
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path(), ProjectType::Module, "colors");
    fs::write(
        temp_dir.path().join("module.yml"),
        "id: colors\ndescription: \"Set color {#ff0000} or use {% raw\"\n",
    )
    .unwrap();

    let context = build_context(&config, json!({}), &Environment::new()).unwrap();
    build(&MiniJinjaRenderer::for_json(), &config, &context).unwrap();

    assert_eq!(
        read_json(&temp_dir.path().join("dist/module.json")),
        json!({"id": "colors", "description": "Set color {#ff0000} or use {% raw"})
    );
}

#[test]
fn test_context_sources() {
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path(), ProjectType::Module, "ctx");
    fs::write(temp_dir.path().join("package.json"), r#"{"version": "2.3.4"}"#).unwrap();
    fs::write(
        temp_dir.path().join("module.yml"),
        "id: ctx\ntitle: \"{{ IRON_TITLE }}\"\nversion: \"{{ pkg.version }}\"\nurl: \"{{ pkg.repository.url }}\"\n",
    )
    .unwrap();

    let mut env = Environment::new();
    env.insert("IRON_TITLE".to_string(), "From \"env\"".to_string());
    let package = package_descriptor_or_empty(temp_dir.path());
    let context = build_context(&config, package, &env).unwrap();
    build(&MiniJinjaRenderer::for_json(), &config, &context).unwrap();

    assert_eq!(
        read_json(&temp_dir.path().join("dist/module.json")),
        json!({"id": "ctx", "title": "From \"env\"", "version": "2.3.4", "url": ""})
    );
}

#[test]
fn test_system_build_transcodes_template_schema() {
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path(), ProjectType::System, "mysys");
    fs::write(temp_dir.path().join("system.yml"), "id: mysys\ntitle: My System\n").unwrap();
    let schema = "Actor:\n  types: [character]\n  character:\n    hp: 10\n    name: \"{{canonicalName}}\"\n";
    fs::write(temp_dir.path().join("template.yml"), schema).unwrap();

    let context = build_context(&config, json!({}), &Environment::new()).unwrap();
    build(&MiniJinjaRenderer::for_json(), &config, &context).unwrap();

    assert_eq!(
        read_json(&temp_dir.path().join("dist/template.json")),
        json!({"Actor": {"types": ["character"], "character": {"hp": 10, "name": "{{canonicalName}}"}}})
    );
    assert!(temp_dir.path().join("dist/system.json").exists());
}

#[test]
fn test_system_build_requires_template_schema() {
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path(), ProjectType::System, "mysys");
    fs::write(temp_dir.path().join("system.yml"), "id: mysys\ntitle: My System\n").unwrap();

    let context = build_context(&config, json!({}), &Environment::new()).unwrap();
    let err = build(&MiniJinjaRenderer::for_json(), &config, &context).unwrap_err();

    assert!(matches!(err, Error::ConfigNotFound { ref file, .. } if file == "template.yml"));
    // earlier steps are not rolled back
    assert!(temp_dir.path().join("dist/system.json").exists());
}

#[test]
fn test_missing_manifest_aborts_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path(), ProjectType::Module, "mymod");
    fs::create_dir(temp_dir.path().join("lang")).unwrap();
    fs::write(temp_dir.path().join("lang/en.yml"), "A: hi\n").unwrap();

    let context = build_context(&config, json!({}), &Environment::new()).unwrap();
    let err = build(&MiniJinjaRenderer::for_json(), &config, &context).unwrap_err();

    assert!(matches!(err, Error::ConfigNotFound { ref file, .. } if file == "module.yml"));
    let written: Vec<_> = fs::read_dir(temp_dir.path().join("dist")).unwrap().collect();
    assert!(written.is_empty());
}

#[test]
fn test_malformed_manifest_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path(), ProjectType::Module, "mymod");
    fs::write(temp_dir.path().join("module.yml"), "id: [unclosed\n").unwrap();

    let context = build_context(&config, json!({}), &Environment::new()).unwrap();
    let err = build(&MiniJinjaRenderer::for_json(), &config, &context).unwrap_err();
    assert!(matches!(err, Error::ParseError { .. }));
}

#[test]
fn test_languages_are_transcoded() {
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path(), ProjectType::Module, "mymod");
    fs::write(temp_dir.path().join("module.yml"), "id: mymod\ntitle: M\n").unwrap();
    let lang = temp_dir.path().join("lang");
    fs::create_dir(&lang).unwrap();
    fs::write(lang.join("en.yml"), "MYMOD.Hello: Hello\nMYMOD.Bye: Bye\n").unwrap();
    fs::write(lang.join("pt-BR.yml"), "MYMOD.Hello: Olá\n").unwrap();
    fs::write(lang.join("notes.txt"), "not a language").unwrap();

    assert_eq!(language_sources(&lang).unwrap(), vec![lang.join("en.yml"), lang.join("pt-BR.yml")]);

    let context = build_context(&config, json!({}), &Environment::new()).unwrap();
    let report = build(&MiniJinjaRenderer::for_json(), &config, &context).unwrap();

    let out = temp_dir.path().join("dist/lang");
    assert_eq!(report.written.len(), 3);
    assert_eq!(read_json(&out.join("en.json")), json!({"MYMOD.Hello": "Hello", "MYMOD.Bye": "Bye"}));
    assert_eq!(read_json(&out.join("pt-BR.json")), json!({"MYMOD.Hello": "Olá"}));
    assert!(!out.join("notes.json").exists());
}

#[test]
fn test_build_into_project_root() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = project(temp_dir.path(), ProjectType::Module, "mymod");
    config.dist_path = None;
    fs::write(temp_dir.path().join("module.yml"), "id: mymod\ntitle: M\n").unwrap();

    let context = build_context(&config, json!({}), &Environment::new()).unwrap();
    build(&MiniJinjaRenderer::for_json(), &config, &context).unwrap();

    let content = fs::read_to_string(temp_dir.path().join("module.json")).unwrap();
    assert_eq!(content, "{\n    \"id\": \"mymod\",\n    \"title\": \"M\"\n}");
}
