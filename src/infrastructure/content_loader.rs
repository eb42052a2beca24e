// src/infrastructure/content_loader.rs
use crate::domain::{DishDocument, DomainError};
use crate::util::fs::markdown_files;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Read and validate a single dish content document.
pub fn read_document(path: impl AsRef<Path>) -> Result<DishDocument> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read content document {}", path.display()))?;
    Ok(DishDocument::parse(&source)?)
}

/// Validate every document in `dir`, keeping per-file outcomes.
pub fn load_documents(
    dir: impl AsRef<Path>,
) -> Result<Vec<(PathBuf, Result<DishDocument, DomainError>)>> {
    let mut outcomes = Vec::new();
    for path in markdown_files(dir)? {
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read content document {}", path.display()))?;
        let parsed = DishDocument::parse(&source);
        outcomes.push((path, parsed));
    }
    Ok(outcomes)
}
