//! Writing rendered graphs to disk through Graphviz.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use strum_macros::{Display, EnumString, IntoStaticStr};
use tracing::info;

use fitviz_error::{Error, Result};

/// Graphviz executable used for non-DOT formats.
pub const GRAPHVIZ_DOT: &str = "dot";

/// File format of the rendered diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// DOT source only, no Graphviz needed
    Dot,
    Svg,
    #[default]
    Pdf,
    Png,
}

impl OutputFormat {
    /// Whether producing this format needs the Graphviz executable.
    pub fn needs_graphviz(&self) -> bool {
        !matches!(self, OutputFormat::Dot)
    }
}

/// Write `source` to `path`, and for vector/raster formats also lay it out
/// with Graphviz into `<path>.<format>`.
///
/// Returns the path of the final artifact.
pub fn render_to_file(source: &str, path: impl AsRef<Path>, format: OutputFormat) -> Result<PathBuf> {
    let path = path.as_ref();
    std::fs::write(path, source).map_err(|err| {
        Error::from(err)
            .with_operation("output::render_to_file")
            .with_context("path", path.display().to_string())
    })?;

    if !format.needs_graphviz() {
        info!(path = %path.display(), "dot source written");
        return Ok(path.to_path_buf());
    }

    let target = artifact_path(path, format);
    run_graphviz(source, &target, format)?;
    info!(path = %target.display(), %format, "diagram rendered");
    Ok(target)
}

/// `out/tree` + `pdf` becomes `out/tree.pdf`.
fn artifact_path(path: &Path, format: OutputFormat) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(format.to_string());
    PathBuf::from(name)
}

fn run_graphviz(source: &str, target: &Path, format: OutputFormat) -> Result<()> {
    let mut command = Command::new(GRAPHVIZ_DOT);
    command.arg(format!("-T{format}")).arg("-o").arg(target);
    pipe_source(command, source).map_err(|err| {
        err.with_operation("output::run_graphviz")
            .with_context("format", format.to_string())
            .with_context("target", target.display().to_string())
    })
}

/// Feed `source` to `command` on stdin and wait for it to exit.
///
/// The child is always waited on, so its stderr is reported even when it
/// stops reading its input early.
fn pipe_source(mut command: Command, source: &str) -> Result<()> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| Error::render_failed("could not start graphviz 'dot'").set_source(err))?;

    // stdin is closed at the end of the match so the child sees end of input.
    let fed = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(source.as_bytes()),
        None => Ok(()),
    };

    let output = child
        .wait_with_output()
        .map_err(|err| Error::render_failed("graphviz did not finish").set_source(err))?;
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if let Err(err) = fed {
        return Err(Error::render_failed("could not feed graphviz")
            .with_context("status", output.status.to_string())
            .with_context("stderr", stderr)
            .set_source(err));
    }
    if !output.status.success() {
        return Err(Error::render_failed("graphviz exited with an error")
            .with_context("status", output.status.to_string())
            .with_context("stderr", stderr));
    }
    Ok(())
}
