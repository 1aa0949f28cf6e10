use std::collections::HashMap;

use serde_json::json;
use scout_core::Value;
use scout_prompt::{PromptError, PromptTemplate};

fn vars(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn renders_strings_raw_and_other_values_as_json() {
    let template = PromptTemplate::new("Looking at {{url}}: {{ known }}");
    let out = template.render(&vars(&[
        ("url", json!("https://acme.test")),
        ("known", json!({"name": "Acme Co"})),
    ]));
    assert_eq!(out, r#"Looking at https://acme.test: {"name":"Acme Co"}"#);
}

#[test]
fn lenient_render_blanks_unknown_placeholders() {
    let template = PromptTemplate::new("a={{a}} b={{b}}");
    assert_eq!(template.render(&vars(&[("a", json!("1"))])), "a=1 b=");
}

#[test]
fn strict_render_reports_missing_variable() {
    let template = PromptTemplate::new("{{info}} and {{examples}}");
    let err = template
        .render_strict(&vars(&[("info", json!("x"))]))
        .unwrap_err();
    assert_eq!(err, PromptError::MissingVariable("examples".to_string()));
}

#[test]
fn variables_are_listed_once_in_order() {
    let template = PromptTemplate::new("{{b}} {{a}} {{ b }}");
    assert_eq!(template.variables(), vec!["b".to_string(), "a".to_string()]);
}

#[test]
fn literal_braces_without_names_are_kept() {
    let template = PromptTemplate::new("json: {\"k\": 1} {{v}}");
    assert_eq!(
        template.render(&vars(&[("v", json!(2))])),
        "json: {\"k\": 1} 2"
    );
}
