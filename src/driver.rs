//! File-level entry points. Reads a source file, compiles it and writes
//! the result so that a failure never leaves a partial output behind.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::{compile, errors::errors::Error, CompileOptions};

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Compile(#[from] Error),
}

impl DriverError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> DriverError + '_ {
        move |source| DriverError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub fn read_source(input: &Path) -> Result<String, DriverError> {
    fs::read_to_string(input).map_err(DriverError::io(input))
}

/// Name used in error positions for `input`.
pub fn display_name(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string_lossy().into_owned())
}

/// Writes `contents` to a temporary file next to `output` and renames it
/// into place.
pub fn write_atomically(output: &Path, contents: &str) -> Result<(), DriverError> {
    let directory = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory).map_err(DriverError::io(directory))?;
    file.write_all(contents.as_bytes())
        .map_err(DriverError::io(file.path()))?;
    file.persist(output)
        .map_err(|error| DriverError::io(output)(error.error))?;
    Ok(())
}

/// Compiles `input` and writes the generated text to `output`.
///
/// # Returns
///
/// The generated text, which is also what ends up in `output`.
pub fn compile_file(
    input: &Path,
    output: &Path,
    options: &CompileOptions,
) -> Result<String, DriverError> {
    let source = read_source(input)?;
    debug!(input = %input.display(), bytes = source.len(), "read source");

    let file_name = display_name(input);
    let generated = compile(&source, Some(&file_name), options)?;

    write_atomically(output, &generated)?;
    info!(output = %output.display(), "wrote {} bytes", generated.len());
    Ok(generated)
}
