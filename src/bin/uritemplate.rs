//! Command-line interface for uritemplate
//! Expands templates, extracts variables from URIs and inspects templates.
//!
//! Usage:
//!   uritemplate expand `<template>` [--vars `<json>`] [--var `<name=value>`]...  - Expand a template
//!   uritemplate extract `<template>` `<uri>`                                 - Extract variables as JSON
//!   uritemplate variables `<template>`                                     - List variable names
//!   uritemplate level `<template>`                                         - Print the RFC 6570 level
//!
//! Diagnostics go to stderr and are controlled with `RUST_LOG`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::{BTreeMap, HashMap};
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};
use uritemplate::uritemplate::value::variables_from_json;
use uritemplate::{Template, Value};

fn main() {
    init_tracing();

    let template_arg = || {
        Arg::new("template")
            .help("The URI template")
            .required(true)
            .index(1)
    };

    let matches = Command::new("uritemplate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Expand RFC 6570 URI templates and extract variables from URIs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("expand")
                .about("Expand a template")
                .arg(template_arg())
                .arg(
                    Arg::new("vars")
                        .long("vars")
                        .help("Variables as a JSON object, e.g. '{\"list\": [\"a\", \"b\"]}'"),
                )
                .arg(
                    Arg::new("var")
                        .long("var")
                        .short('v')
                        .action(ArgAction::Append)
                        .help("A scalar variable as name=value (repeatable)"),
                ),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract variables from a URI as JSON")
                .arg(template_arg())
                .arg(
                    Arg::new("uri")
                        .help("The URI to match against the template")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("variables")
                .about("List the variables of a template")
                .arg(template_arg()),
        )
        .subcommand(
            Command::new("level")
                .about("Print the RFC 6570 level a template needs")
                .arg(template_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("expand", expand_matches)) => handle_expand_command(expand_matches),
        Some(("extract", extract_matches)) => {
            let uri = required(extract_matches, "uri");
            handle_extract_command(&template_from(extract_matches), uri);
        }
        Some(("variables", variables_matches)) => {
            for name in template_from(variables_matches).variables() {
                println!("{name}");
            }
        }
        Some(("level", level_matches)) => {
            println!("{}", template_from(level_matches).level());
        }
        _ => unreachable!(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .init();
}

/// Clap enforces `required(true)`, so a missing value means a bug in the command definition.
fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_else(|| unreachable!("argument '{id}' is required"))
}

fn template_from(matches: &ArgMatches) -> Template {
    Template::new(required(matches, "template"))
}

/// Handle the expand command
fn handle_expand_command(matches: &ArgMatches) {
    let template = template_from(matches);

    let mut variables: HashMap<String, Value> = match matches.get_one::<String>("vars") {
        Some(json) => variables_from_json(json).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }),
        None => HashMap::new(),
    };

    for pair in matches.get_many::<String>("var").into_iter().flatten() {
        let Some((name, value)) = pair.split_once('=') else {
            eprintln!("Error: expected name=value, got '{pair}'");
            std::process::exit(2);
        };
        variables.insert(name.to_string(), Value::from(value));
    }

    println!("{}", template.expand(&variables));
}

/// Handle the extract command
fn handle_extract_command(template: &Template, uri: &str) {
    if !template.supports_extraction() {
        tracing::warn!(
            template = %template,
            level = %template.level(),
            "template is above the supported extraction level, results may be incomplete"
        );
    }

    let Some(extracted) = template.extract(uri) else {
        eprintln!("No match");
        std::process::exit(1);
    };

    // Sorted for stable output
    let sorted: BTreeMap<_, _> = extracted.into_iter().collect();
    match serde_json::to_string_pretty(&sorted) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
