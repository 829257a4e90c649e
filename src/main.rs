//! snipdoc — browse a help listing and print node snippets.
//!
//! - **outline mode**: `snipdoc listing.json` prints the tree labels
//! - **node mode**: `snipdoc listing.json --node TestLibrary/TestExecutor/Step/getId -f html`
//!
//! The listing is read from stdin when no file is given.

use anyhow::{bail, Context, Result};
use clap::Parser;
use snipdoc::{render, Assistant, Config, ConnectionState};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "snipdoc",
    about = "Browse an assistant help listing and render node snippets"
)]
struct Cli {
    /// Listing file (JSON array of descriptors). If omitted, reads from stdin.
    listing: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Keep the interoperability package
    #[arg(long)]
    interops: bool,

    /// Keep adapter packages
    #[arg(long)]
    adapters: bool,

    /// Drop the framework package
    #[arg(long)]
    no_framework: bool,

    /// Node to render, as names separated by '/'
    #[arg(short = 'n', long)]
    node: Option<String>,

    /// Output format for --node: markdown (default), html, json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// List constructors in the outline
    #[arg(long)]
    show_hidden: bool,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let renderer = render::create_renderer(&cli.format)?;

    let payload = read_listing(cli.listing.as_deref())?;
    let mut assistant = Assistant::new(config);
    assistant.load(&payload);
    if assistant.state() == ConnectionState::Disconnected {
        bail!("unable to decode listing");
    }

    match cli.node {
        Some(ref path) => {
            let id = assistant.find(path)?;
            let page = assistant.help(id).with_context(|| format!("no help page for {}", path))?;
            print!("{}", renderer.render(&page));
        }
        None => print!("{}", outline(&assistant, cli.show_hidden)),
    }
    Ok(())
}

/// Read the config file if given, then apply CLI overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.interops {
        config.mode.interops = true;
    }
    if cli.adapters {
        config.mode.adapters = true;
    }
    if cli.no_framework {
        config.mode.framework = false;
    }
    Ok(config)
}

fn read_listing(path: Option<&std::path::Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = Vec::new();
            io::stdin()
                .read_to_end(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Indented labels, two spaces per level.
fn outline(assistant: &Assistant, show_hidden: bool) -> String {
    let tree = assistant.tree();
    let mut out = String::new();
    for (depth, id) in tree.walk() {
        let node = tree.node(id);
        if node.hidden && !show_hidden {
            continue;
        }
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.label());
        out.push('\n');
    }
    out
}
