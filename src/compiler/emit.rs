//! Rendering a finished module as textual LLVM IR.
//!
//! Both destinations are fed from the same rendered string, so the stream
//! and the file always receive byte-identical text.

use std::{fs, io::Write, path::Path};

use tracing::debug;

use crate::errors::errors::EmissionError;

use super::compiler::CompilationUnit;

/// Renders the unit's module as textual IR.
pub fn render(unit: &CompilationUnit) -> String {
    unit.module.print_to_string().to_string()
}

/// Writes the module's textual IR to `stream`.
pub fn print<W: Write>(unit: &CompilationUnit, stream: &mut W) -> Result<(), EmissionError> {
    let text = render(unit);

    stream
        .write_all(text.as_bytes())
        .and_then(|_| stream.flush())
        .map_err(EmissionError::Stream)
}

/// Writes the module's textual IR to `path`, truncating any existing file.
pub fn save(unit: &CompilationUnit, path: &Path) -> Result<(), EmissionError> {
    let text = render(unit);

    fs::write(path, text).map_err(|source| EmissionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "saved module");
    Ok(())
}
