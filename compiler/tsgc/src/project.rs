//! Loading C# sources into a workspace.

use std::fs;
use std::path::{Path, PathBuf};

use tsg_syntax::{EditorConfigStore, Workspace};

use crate::DriverError;

/// Source files named by `paths`, sorted and deduplicated.
///
/// Directories are walked recursively for `*.cs` files, skipping hidden
/// directories and `bin`/`obj` build output. Files named directly are taken
/// whatever their extension.
pub fn discover_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>, DriverError> {
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, &mut found)?;
        } else if path.exists() {
            found.push(path.clone());
        } else {
            return Err(DriverError::Read {
                path: path.clone(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
    }
    found.sort();
    found.dedup();
    if found.is_empty() {
        return Err(DriverError::NoSources);
    }
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), DriverError> {
    let read_error = |source| DriverError::Read {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            if !is_skipped_dir(&path) {
                walk(&path, found)?;
            }
        } else if is_csharp(&path) {
            found.push(path);
        }
    }
    Ok(())
}

fn is_csharp(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cs"))
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || name == "bin" || name == "obj")
}

/// Read, parse and bind every source under `paths`.
///
/// Each document gets the analyzer options of the `.editorconfig` files
/// above it. Parse errors are logged; the declarations parsed before
/// recovery are still analyzed.
#[tracing::instrument(level = "debug", skip_all, fields(paths = paths.len()))]
pub fn load_workspace(paths: &[PathBuf]) -> Result<Workspace, DriverError> {
    let sources = discover_sources(paths)?;
    let mut configs = EditorConfigStore::new();
    let mut builder = Workspace::builder();
    for path in sources {
        let text = fs::read_to_string(&path).map_err(|source| DriverError::Read {
            path: path.clone(),
            source,
        })?;
        let absolute = fs::canonicalize(&path).map_err(|source| DriverError::Read {
            path: path.clone(),
            source,
        })?;
        let options = configs.options_for(&absolute)?;
        builder.add_document_with_options(path, text, options);
    }

    let workspace = builder.build();
    for doc in workspace.documents() {
        for error in &doc.errors {
            tracing::warn!(path = %doc.path.display(), %error, "parse error");
        }
    }
    Ok(workspace)
}
