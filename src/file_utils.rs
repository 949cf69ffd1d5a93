use anyhow::{anyhow, Context, Result};
use log::info;
use std::fs;
use std::path::Path;

use crate::proofreading::{ProofreadOutcome, Proofreader};

// @module: File utilities for proofreading documents on disk

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }
}

/// Proofread `input_path` and write the result to `output_path` when given.
///
/// The outcome is returned either way so the caller can print it.
pub async fn check_file(
    proofreader: &Proofreader,
    input_path: &Path,
    output_path: Option<&Path>,
) -> Result<ProofreadOutcome> {
    if !FileManager::file_exists(input_path) {
        return Err(anyhow!("Input file does not exist: {:?}", input_path));
    }

    let text = FileManager::read_to_string(input_path)?;
    let outcome = proofreader.proofread(&text).await;

    if let Some(path) = output_path {
        FileManager::write_to_file(path, &outcome.final_text)?;
        info!("Success: {:?}", path);
    }

    Ok(outcome)
}
