//! LESS compilation via the external `lessc` binary.
//!
//! The compiler is an external collaborator: grist locates `lessc` on
//! PATH and shells out once per source file, concatenating the emitted
//! CSS. The working directory is the source file's parent so relative
//! `@import`s resolve the way the compiler expects.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::PipelineError;

/// Transform identifier recorded in fingerprints.
pub const TRANSFORM_ID: &str = "lessc";

/// Locate the `lessc` binary on PATH.
fn lessc_binary() -> Result<PathBuf, PipelineError> {
    which::which("lessc").map_err(|e| PipelineError::TransformFailure {
        tool: "lessc",
        detail: format!("binary not found on PATH: {e}"),
    })
}

/// Compile a single LESS source to CSS.
pub fn compile_file(path: &Path) -> Result<String, PipelineError> {
    let lessc = lessc_binary()?;
    let cwd = path.parent().unwrap_or(Path::new("."));

    let output = Command::new(&lessc)
        .arg(path)
        .current_dir(cwd)
        .output()
        .map_err(|e| PipelineError::TransformFailure {
            tool: "lessc",
            detail: format!("failed to spawn `{}`: {e}", lessc.display()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PipelineError::TransformFailure {
            tool: "lessc",
            detail: format!("`{}`: {}", path.display(), stderr.trim()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
