//! domtree CLI tool - parse markup and dump the resulting tree
//!
//! Usage: domtree [OPTIONS] [INPUT]
//!
//! The tree goes to standard output, all diagnostics to standard error.

use clap::{Parser, ValueEnum};
use domtree::{parse, print_tree};
use std::fs;
use std::io::{self, Read};
use std::process;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const DEMO_DOCUMENT: &str =
    "<html><body>hello<div id=\"main\" class='x'>world</div></body></html>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented one-line-per-node debug dump
    Dump,
    /// Markup regenerated from the tree
    Markup,
}

#[derive(Debug, Parser)]
#[command(name = "domtree", version, about = "Parse markup into a DOM tree and print it")]
struct Cli {
    /// Input: a file name, `-` for stdin, or literal markup preceded by `!`.
    /// A built-in demo document is used when omitted.
    input: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Dump)]
    format: OutputFormat,

    /// Print timing information
    #[arg(long)]
    timing: bool,

    /// Print debug diagnostics
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let source = match read_input(cli.input.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            process::exit(1);
        }
    };
    tracing::debug!(chars = source.chars().count(), "input loaded");

    let start = Instant::now();
    let root = match parse(&source) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("{}", e.format_with_context(&source));
            process::exit(1);
        }
    };

    if cli.timing {
        eprintln!("Parsed in {:?}", start.elapsed());
    }

    match cli.format {
        OutputFormat::Dump => print_tree(&root),
        OutputFormat::Markup => println!("{}", root.to_markup()),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(arg: Option<&str>) -> io::Result<String> {
    match arg {
        None => Ok(DEMO_DOCUMENT.to_string()),
        Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        // Literal (preceded by !)
        Some(literal) if literal.starts_with('!') => Ok(literal[1..].to_string()),
        Some(path) => fs::read_to_string(path),
    }
}
