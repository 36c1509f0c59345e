//! fitviz command-line interface.
//!
//! Pipeline: load raw tree → canonicalize → render DOT → print or write.

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use fitviz_core::{CanonicalizeOption, RawSearchNode, canonicalize};
use fitviz_dot::{OutputFormat, RenderOptions, render_to_file, render_tree};
use fitviz_error::Result;

/// Options for running fitviz.
#[derive(Debug, Clone)]
pub struct FitvizOptions {
    /// JSON file holding the raw search tree.
    pub input: PathBuf,
    /// Output base path; `None` prints the DOT source instead.
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub combine: bool,
    pub render: RenderOptions,
}

impl FitvizOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            format: OutputFormat::default(),
            combine: true,
            render: RenderOptions::default(),
        }
    }
}

/// Main entry point.
///
/// Returns the DOT source when no output path is set, otherwise writes the
/// diagram and returns `None`.
pub fn run_main(opts: &FitvizOptions) -> Result<Option<String>> {
    let load_start = Instant::now();
    let raw = RawSearchNode::from_path(&opts.input)?;
    info!(
        "Loading search tree: {:.2}s",
        load_start.elapsed().as_secs_f64()
    );

    let option = CanonicalizeOption::new().with_combine(opts.combine);
    let tree = canonicalize(&raw, &option)?;

    let render_start = Instant::now();
    let dot = render_tree(&tree, &opts.render)?;
    info!(
        "Graph rendering: {:.2}s",
        render_start.elapsed().as_secs_f64()
    );

    match &opts.output {
        Some(path) => {
            let written = render_to_file(&dot, path, opts.format)?;
            info!(path = %written.display(), "output written");
            Ok(None)
        }
        None => Ok(Some(dot)),
    }
}
