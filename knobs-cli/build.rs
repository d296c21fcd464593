//! Build script for knobs-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Arguments shared by the commands that read a configuration file.
fn file_args() -> Vec<Arg> {
    vec![
        Arg::new("file")
            .value_name("FILE")
            .help("Configuration file (.json, .js, .yaml, .yml or .properties)")
            .required(true),
        Arg::new("env-prefix")
            .long("env-prefix")
            .value_name("PREFIX")
            .help("Overlay PREFIX_* environment variables (PREFIX_A__B sets a.b)")
            .env("KNOBS_ENV_PREFIX"),
        Arg::new("set")
            .long("set")
            .value_name("KEY=VALUE")
            .help("Override a key (repeatable, highest precedence)")
            .action(ArgAction::Append),
    ]
}

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("knobs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect configuration files")
        .long_about(
            "Command-line tool for reading flattened, layered configuration files \
             and normalizing duration literals",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommands([
            Command::new("get")
                .about("Print the value of a key")
                .args(file_args())
                .arg(Arg::new("key").value_name("KEY").required(true))
                .arg(Arg::new("default").long("default").value_name("VALUE"))
                .arg(
                    Arg::new("duration")
                        .long("duration")
                        .help("Print the value as an ISO-8601 duration")
                        .action(ArgAction::SetTrue),
                ),
            Command::new("dump")
                .about("Print every entry of a configuration file")
                .args(file_args())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["text", "json"])
                        .default_value("text")
                        .env("KNOBS_OUTPUT_FORMAT"),
                )
                .arg(Arg::new("prefix").long("prefix").value_name("PREFIX")),
            Command::new("keys")
                .about("List the keys of a configuration file")
                .args(file_args())
                .arg(Arg::new("prefix").long("prefix").value_name("PREFIX")),
            Command::new("duration")
                .about("Normalize a duration literal to ISO-8601")
                .arg(Arg::new("literal").value_name("LITERAL").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(Arg::new("shell").required(true)),
        ])
}

fn main() -> io::Result<()> {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("knobs.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
