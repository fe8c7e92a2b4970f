//! `.editorconfig`-backed analyzer options.
//!
//! Options for a file come from every `.editorconfig` between the file and
//! the nearest one declaring `root = true`. Nearer files override farther
//! ones, and within one file later sections override earlier ones.

use std::io;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use rustc_hash::FxHashMap;
use tsg_ir::host::AnalyzerConfigOptions;

const FILE_NAME: &str = ".editorconfig";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, thiserror::Error)]
pub enum EditorConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Clone, Debug)]
struct Section {
    /// Brace alternatives expand to several patterns.
    patterns: Vec<Pattern>,
    /// Patterns containing `/` match the relative path, others the file name.
    match_path: bool,
    properties: Vec<(String, String)>,
}

impl Section {
    fn matches(&self, relative: &str) -> bool {
        let target = if self.match_path {
            relative
        } else {
            relative.rsplit('/').next().unwrap_or(relative)
        };
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(target, MATCH_OPTIONS))
    }
}

/// One parsed `.editorconfig` file.
#[derive(Clone, Debug, Default)]
pub struct EditorConfig {
    pub root: bool,
    sections: Vec<Section>,
}

impl EditorConfig {
    pub fn parse(text: &str) -> Self {
        let mut config = EditorConfig::default();
        let mut current: Option<Section> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                config.sections.extend(current.take());
                current = Some(section(header));
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::debug!(line, "ignoring malformed editorconfig line");
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            match current.as_mut() {
                Some(section) => section.properties.push((key, value)),
                None if key == "root" => config.root = value.eq_ignore_ascii_case("true"),
                None => {}
            }
        }
        config.sections.extend(current);
        config
    }

    /// Apply every section matching `relative` (a path relative to this
    /// file's directory) to `options`, in file order.
    pub fn apply(&self, relative: &Path, options: &mut AnalyzerConfigOptions) {
        let relative = slash_path(relative);
        for section in &self.sections {
            if section.matches(&relative) {
                for (key, value) in &section.properties {
                    options.insert(key, value.as_str());
                }
            }
        }
    }
}

fn section(header: &str) -> Section {
    let header = header.trim();
    let match_path = header.contains('/');
    let header = header.strip_prefix('/').unwrap_or(header);
    let patterns = expand_braces(header)
        .into_iter()
        .filter_map(|pattern| match Pattern::new(&pattern) {
            Ok(compiled) => Some(compiled),
            Err(err) => {
                tracing::warn!(%pattern, %err, "skipping invalid editorconfig section glob");
                None
            }
        })
        .collect();
    Section {
        patterns,
        match_path,
        properties: Vec::new(),
    }
}

/// Expand `{a,b}` alternatives. Nested braces expand recursively; a brace
/// group without a comma is kept literally.
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let mut depth = 0usize;
    let mut close = None;
    let mut commas = Vec::new();
    for (i, c) in pattern[open..].char_indices() {
        let i = open + i;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            ',' if depth == 1 => commas.push(i),
            _ => {}
        }
    }
    let Some(close) = close else {
        return vec![pattern.to_string()];
    };
    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    if commas.is_empty() {
        let literal = &pattern[open..=close];
        return expand_braces(suffix)
            .into_iter()
            .map(|rest| format!("{prefix}{literal}{rest}"))
            .collect();
    }

    let mut bounds = vec![open];
    bounds.extend(commas);
    bounds.push(close);
    let mut out = Vec::new();
    for pair in bounds.windows(2) {
        let alternative = &pattern[pair[0] + 1..pair[1]];
        for head in expand_braces(alternative) {
            for tail in expand_braces(suffix) {
                out.push(format!("{prefix}{head}{tail}"));
            }
        }
    }
    out
}

fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Loads and caches `.editorconfig` files per directory.
#[derive(Debug, Default)]
pub struct EditorConfigStore {
    cache: FxHashMap<PathBuf, Option<EditorConfig>>,
}

impl EditorConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved options for the document at `path`.
    pub fn options_for(&mut self, path: &Path) -> Result<AnalyzerConfigOptions, EditorConfigError> {
        let mut chain = Vec::new();
        let mut dir = path.parent();
        while let Some(current) = dir {
            if let Some(config) = self.load(current)? {
                let root = config.root;
                chain.push(current.to_path_buf());
                if root {
                    break;
                }
            }
            dir = current.parent();
        }

        let mut options = AnalyzerConfigOptions::new();
        for dir in chain.iter().rev() {
            if let Some(Some(config)) = self.cache.get(dir) {
                let relative = path.strip_prefix(dir).unwrap_or(path);
                config.apply(relative, &mut options);
            }
        }
        tracing::trace!(path = %path.display(), files = chain.len(), options = options.len(), "resolved editorconfig");
        Ok(options)
    }

    fn load(&mut self, dir: &Path) -> Result<Option<&EditorConfig>, EditorConfigError> {
        if !self.cache.contains_key(dir) {
            let file = dir.join(FILE_NAME);
            let loaded = match std::fs::read_to_string(&file) {
                Ok(text) => Some(EditorConfig::parse(&text)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => None,
                Err(source) => return Err(EditorConfigError::Io { path: file, source }),
            };
            self.cache.insert(dir.to_path_buf(), loaded);
        }
        Ok(self.cache.get(dir).and_then(Option::as_ref))
    }
}
