//! Conformance suites
//!
//! Runs the JSON example suites under `tests/cases/`. Each suite declares the
//! RFC 6570 level it exercises; expansion runs for suites up to
//! SUPPORTED_EXPANSION_LEVEL and extraction for suites up to
//! SUPPORTED_EXTRACTION_LEVEL, since extraction can't split multi-variable
//! expressions.
//!
//! Suite format:
//!
//! ```text
//! { "<suite name>": {
//!     "level": 1-4 (default 4),
//!     "variables": { "<name>": <scalar | list | object | null> },
//!     "testcases": [ ["<template>", "<expansion>" | ["<alternative>", ...]] ]
//! } }
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use uritemplate::{Level, Template, Value, SUPPORTED_EXPANSION_LEVEL, SUPPORTED_EXTRACTION_LEVEL};

#[derive(Debug, Deserialize)]
struct Suite {
    level: Option<u8>,
    variables: HashMap<String, Value>,
    testcases: Vec<(String, Expected)>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Expected {
    One(String),
    AnyOf(Vec<String>),
}

impl Expected {
    fn alternatives(&self) -> Vec<&str> {
        match self {
            Expected::One(uri) => vec![uri.as_str()],
            Expected::AnyOf(uris) => uris.iter().map(String::as_str).collect(),
        }
    }
}

impl Suite {
    fn level(&self) -> Level {
        self.level
            .and_then(Level::from_number)
            .unwrap_or(Level::Four)
    }
}

fn load(source: &str) -> BTreeMap<String, Suite> {
    serde_json::from_str(source).expect("Failed to parse conformance suite")
}

/// Expand every case and return a description of each failure
fn check_expansion(name: &str, suite: &Suite) -> Vec<String> {
    let mut failures = Vec::new();
    for (index, (template, expected)) in suite.testcases.iter().enumerate() {
        let expanded = Template::new(template.as_str()).expand(&suite.variables);
        let alternatives = expected.alternatives();
        if !alternatives.contains(&expanded.as_str()) {
            failures.push(format!(
                "{name} case {} `{template}`: expanded to `{expanded}`, expected one of {alternatives:?}",
                index + 1
            ));
        }
    }
    failures
}

/// Extract every expected URI and compare with the suite's variables
fn check_extraction(name: &str, suite: &Suite) -> Vec<String> {
    let mut failures = Vec::new();
    for (template, expected) in &suite.testcases {
        let template = Template::new(template.as_str());

        let wanted: HashMap<String, String> = template
            .variables()
            .into_iter()
            .filter_map(|var| {
                let value = suite.variables.get(var)?.as_scalar()?;
                Some((var.to_string(), value.to_string()))
            })
            .collect();

        for uri in expected.alternatives() {
            match template.extract(uri) {
                Some(extracted) if extracted == wanted => {}
                Some(extracted) => failures.push(format!(
                    "{name} `{template}` with `{uri}`: extracted {extracted:?}, expected {wanted:?}"
                )),
                None => failures.push(format!("{name} `{template}` did not match `{uri}`")),
            }
        }
    }
    failures
}

fn run_suites(source: &str) {
    let mut failures = Vec::new();
    let mut ran = 0;

    for (name, suite) in &load(source) {
        if suite.level() <= SUPPORTED_EXPANSION_LEVEL {
            failures.extend(check_expansion(name, suite));
            ran += 1;
        }
        if suite.level() <= SUPPORTED_EXTRACTION_LEVEL {
            failures.extend(check_extraction(name, suite));
        }
    }

    assert!(ran > 0, "no suites ran");
    assert!(failures.is_empty(), "\n{}", failures.join("\n"));
}

#[test]
fn test_spec_examples() {
    run_suites(include_str!("cases/spec-examples.json"));
}

#[test]
fn test_extended_examples() {
    run_suites(include_str!("cases/extended-tests.json"));
}

#[test]
fn test_suite_levels_gate_extraction() {
    let suites = load(include_str!("cases/spec-examples.json"));
    let extractable: Vec<&str> = suites
        .iter()
        .filter(|(_, suite)| suite.level() <= SUPPORTED_EXTRACTION_LEVEL)
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(extractable, vec!["Level 1 Examples", "Level 2 Examples"]);
}

#[test]
fn test_supported_suites_hold_extractable_templates() {
    for source in [
        include_str!("cases/spec-examples.json"),
        include_str!("cases/extended-tests.json"),
    ] {
        for suite in load(source).values() {
            if suite.level() > SUPPORTED_EXTRACTION_LEVEL {
                continue;
            }
            for (template, _) in &suite.testcases {
                assert!(
                    Template::new(template.as_str()).supports_extraction(),
                    "{template}"
                );
            }
        }
    }
}
