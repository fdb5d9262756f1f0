// Command-line interface for adfmd
//
// This binary converts Atlassian Document Format (ADF) JSON, as stored by Confluence and Jira,
// into Markdown with reversible annotations. All conversion semantics live in adf-babel; this
// crate only reads files, layers configuration and prints.
//
// Usage:
//  adfmd <input.json> [-o <file>] [--base-url <url>] [--page-titles <file>]  - Convert (default)
//  adfmd convert <input.json> ...                                            - Same as above (explicit)
//  adfmd critical-attributes                                                 - Print the annotation policy table
//
// Configuration:
//
// Defaults are embedded (see adf-config). An `adfmd.toml` in the working directory is layered on
// top when present, then the file given by --config, then the flags.
//
// Logging goes to stderr and is controlled by RUST_LOG (default: warn).

use adf_babel::{AdfConverter, ConvertOptions, MetadataPolicy, NodeKind, PageLookup};
use adf_babel::{AttributeRule, NoLookup, StaticPageLookup};
use adf_config::{AdfConfig, Loader};
use clap::{Arg, ArgMatches, Command, ValueHint};
use std::fs;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "critical-attributes", "help"];

fn build_cli() -> Command {
    Command::new("adfmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Atlassian Document Format JSON to annotated Markdown")
        .long_about(
            "adfmd turns ADF documents (Confluence pages, Jira descriptions) into Markdown.\n\n\
            Whatever Markdown cannot express (panel colours, macro parameters, merged cells,\n\
            unknown node types) is kept in <!-- ADF-START --> / <!-- ADF-END --> comments\n\
            around the affected fragment.\n\n\
            Examples:\n  \
            adfmd page.json                                   # Markdown on stdout\n  \
            adfmd page.json -o page.md                        # Write to a file\n  \
            adfmd page.json --base-url https://acme.atlassian.net --page-titles titles.json",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an adfmd.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an ADF JSON file to Markdown (default command)")
                .long_about(
                    "Convert an ADF JSON file to Markdown.\n\n\
                    Any ADF node may be the root, not only a doc.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    adfmd convert page.json                    # Markdown on stdout\n  \
                    adfmd convert page.json -o page.md         # Write to page.md\n  \
                    adfmd page.json                            # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input ADF JSON file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("Root URL of this Confluence instance")
                        .long_help(
                            "Root URL of this Confluence instance, e.g. https://acme.atlassian.net.\n\n\
                            Page links on this host are shown with the page title when\n\
                            --page-titles knows it. Other links get text derived from the URL.",
                        )
                        .value_hint(ValueHint::Url),
                )
                .arg(
                    Arg::new("page-titles")
                        .long("page-titles")
                        .value_name("FILE")
                        .help("JSON file mapping page ids to titles")
                        .long_help(
                            "JSON file mapping Confluence page ids to titles or page objects:\n\n  \
                            {\"123\": \"Release notes\", \"456\": {\"title\": \"Runbook\", \"spaceId\": \"OPS\"}}",
                        )
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("critical-attributes")
                .about("Print which attributes force an annotation, per node type"),
        )
}

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let matches = parse_args(build_cli(), &args).unwrap_or_else(|e| e.exit());

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .map(|s| s.as_str())
                .unwrap_or_default();
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());

            let mut overrides = Vec::new();
            if let Some(base_url) = sub_matches.get_one::<String>("base-url") {
                overrides.push(("convert.base_url", base_url.as_str()));
            }
            if let Some(page_titles) = sub_matches.get_one::<String>("page-titles") {
                overrides.push(("lookup.page_titles", page_titles.as_str()));
            }

            let config = load_cli_config(config_path, &overrides);
            handle_convert_command(input, output, &config).await;
        }
        Some(("critical-attributes", _)) => {
            let config = load_cli_config(config_path, &[]);
            handle_critical_attributes_command(&config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Parses `args`. If no subcommand is provided, injects "convert" and tries again
fn parse_args(cli: Command, args: &[String]) -> Result<ArgMatches, clap::Error> {
    match cli.clone().try_get_matches_from(args) {
        Ok(matches) => Ok(matches),
        Err(e) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                cli.try_get_matches_from(new_args)
            } else {
                Err(e)
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Handle the convert command
async fn handle_convert_command(input: &str, output: Option<&str>, config: &AdfConfig) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let lookup: Arc<dyn PageLookup> = match &config.lookup.page_titles {
        Some(path) => {
            let lookup = StaticPageLookup::from_path(path).unwrap_or_else(|e| {
                eprintln!("Error loading page titles: {e}");
                std::process::exit(1);
            });
            debug!(pages = lookup.len(), path = %path.display(), "loaded page titles");
            Arc::new(lookup)
        }
        None => Arc::new(NoLookup),
    };

    let converter = AdfConverter::with_lookup(ConvertOptions::from(config), lookup);
    debug!(input, base_url = ?converter.options().base_url, "converting");
    let markdown = converter.convert_json(&source).await.unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, format!("{markdown}\n")).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{markdown}"),
    }
}

/// Handle the critical-attributes command
fn handle_critical_attributes_command(config: &AdfConfig) {
    let policy: MetadataPolicy = ConvertOptions::from(config).policy;
    println!("Node types and the attributes that force an annotation:\n");
    for (tag, rule) in policy.critical_attributes().iter() {
        let attributes = match rule {
            AttributeRule::All => "all attributes".to_string(),
            AttributeRule::Only(names) if names.is_empty() => "-".to_string(),
            AttributeRule::Only(names) => names.join(", "),
        };
        let always = if MetadataPolicy::always_annotates(&NodeKind::from_tag(tag)) {
            " (always annotated)"
        } else {
            ""
        };
        println!("  {tag:<16} {attributes}{always}");
    }
    println!("\nUnknown node types are always annotated with the whole node.");
}

fn load_cli_config(explicit_path: Option<&str>, overrides: &[(&str, &str)]) -> AdfConfig {
    let loader = Loader::new().with_optional_file("adfmd.toml");
    let mut loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    for (key, value) in overrides {
        loader = loader.set_override(key, *value).unwrap_or_else(|err| {
            eprintln!("Invalid value for {key}: {err}");
            std::process::exit(1);
        });
    }

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
