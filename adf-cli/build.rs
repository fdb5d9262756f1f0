use clap::{Arg, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("adfmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Atlassian Document Format JSON to annotated Markdown")
        .arg_required_else_help(true)
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
                        .value_hint(ValueHint::Url),
                )
                .arg(
                    Arg::new("page-titles")
                        .long("page-titles")
                        .value_name("FILE")
                        .help("JSON file mapping page ids to titles")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("critical-attributes")
                .about("Print which attributes force an annotation, per node type"),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "adfmd", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "adfmd", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "adfmd", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
