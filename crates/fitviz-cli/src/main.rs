use std::str::FromStr;
use std::time::Instant;

use clap::Parser;

use fitviz_cli::{FitvizOptions, run_main};
use fitviz_dot::{OutputFormat, RenderOptions};
use fitviz_error::{Error, Result};

#[derive(Parser, Debug)]
#[command(
    name = "fitviz",
    about = "fitviz: draw fault-space search trees with duplicate branches merged",
    version
)]
pub struct Cli {
    /// JSON file with the raw search tree
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: String,

    /// Output base path (writes FILE and FILE.<format>); prints DOT to stdout when absent
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,

    /// Output format: 'dot', 'svg', 'pdf' or 'png'
    #[arg(short = 'T', long = "format", value_name = "FORMAT", default_value = "pdf")]
    format: String,

    /// Draw the tree as searched, without merging equivalent siblings
    #[arg(long = "no-combine", default_value_t = false)]
    no_combine: bool,

    /// DOT graph name
    #[arg(long = "name", default_value = "G")]
    name: String,

    /// Graphviz rank direction (TB, LR, BT, RL)
    #[arg(long = "rankdir", value_name = "DIR")]
    rankdir: Option<String>,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let format = OutputFormat::from_str(&args.format).map_err(|err| {
        Error::config_invalid(format!(
            "Unknown format: {}. Use 'dot', 'svg', 'pdf', or 'png'",
            args.format
        ))
        .set_source(err)
    })?;

    let mut opts = FitvizOptions::new(args.input);
    opts.output = args.output.map(Into::into);
    opts.format = format;
    opts.combine = !args.no_combine;
    opts.render = RenderOptions {
        graph_name: args.name,
        rankdir: args.rankdir,
        ..RenderOptions::default()
    };

    if let Some(dot) = run_main(&opts)? {
        print!("{dot}");
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

pub fn main() {
    let args = Cli::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        tracing::error!(error = %e, "execution failed");
        std::process::exit(if e.kind().is_input_error() { 2 } else { 1 });
    }
}
