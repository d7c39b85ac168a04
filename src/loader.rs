//! This module provides the `TableLoader` struct, responsible for reading descriptions from
//! files or strings and writing translated tables back to disk.

use crate::encoder::encode;
use crate::parser::parse;
use crate::types::{TapeError, TransitionTable};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension of description files picked up when loading a directory.
pub const INPUT_EXTENSION: &str = "in";
/// Extension given to translated descriptions.
pub const OUTPUT_EXTENSION: &str = "out";

/// `TableLoader` is a utility struct for moving transition tables in and out of storage.
pub struct TableLoader;

impl TableLoader {
    /// Loads a single description from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(TransitionTable)` if the file is successfully read and parsed.
    /// * `Err(TapeError::FileError)` if the file cannot be read.
    /// * Any parse error produced by [`parse`] otherwise.
    pub fn load_table(path: &Path) -> Result<TransitionTable, TapeError> {
        debug!(path = %path.display(), "reading description");

        let content = fs::read_to_string(path).map_err(|e| {
            TapeError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single description from the provided string content.
    pub fn load_table_from_string(content: &str) -> Result<TransitionTable, TapeError> {
        parse(content)
    }

    /// Writes `table` to `path` in the description format, replacing any existing file.
    pub fn write_table(path: &Path, table: &TransitionTable) -> Result<(), TapeError> {
        debug!(
            path = %path.display(),
            transitions = table.transitions.len(),
            "writing description"
        );

        fs::write(path, encode(table)).map_err(|e| {
            TapeError::FileError(format!("Failed to write file {}: {}", path.display(), e))
        })
    }

    /// Loads every description file (`.in` extension) from a given directory.
    ///
    /// Subdirectories and files with other extensions are skipped. Results are sorted by path
    /// so batch runs are reproducible. Each failure names the file it came from.
    pub fn load_tables(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, TransitionTable), TapeError>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TapeError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut paths = Vec::new();
        let mut errors = Vec::new();

        for entry in entries {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file()
                        && path.extension().is_some_and(|ext| ext == INPUT_EXTENSION)
                    {
                        paths.push(path);
                    }
                }
                Err(e) => errors.push(Err(TapeError::FileError(format!(
                    "Failed to read directory entry: {}",
                    e
                )))),
            }
        }

        paths.sort();

        paths
            .into_iter()
            .map(|path| match Self::load_table(&path) {
                Ok(table) => Ok((path, table)),
                Err(e) => Err(e.in_file(&path)),
            })
            .chain(errors)
            .collect()
    }
}

/// The path a translation of `input` is written to: `input` with the `.out` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}
