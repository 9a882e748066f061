//! Regenerate every configured documentation page.
//!
//! Pages are handled one at a time: all components of a page are extracted
//! and rendered in memory before the page is written, so a failure never
//! leaves a half-updated file behind.

use crate::analyzer::{Analyzer, ResolutionError};
use crate::config::Config;
use crate::extract::{extract, ExtractOptions};
use crate::render::splice::{END_MARKER, START_MARKER};
use crate::render::{build_tables, try_splice, ComponentTables, RowShapeError};
use std::fs;
use std::path::{Path, PathBuf};

/// What to do with regenerated pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Rewrite pages whose generated region changed.
    Write,
    /// Only report pages whose generated region is out of date.
    Check,
}

#[derive(Debug, Clone, Copy)]
pub struct UpdateOptions {
    pub mode: Mode,
    /// Fail on pages that lack the generated-region markers.
    pub strict: bool,
}

/// Outcome per documentation file name.
#[derive(Debug, Default)]
pub struct Report {
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
    /// Out of date (check mode only)
    pub stale: Vec<String>,
    pub missing_markers: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{file}: {source}")]
    Resolution {
        file: String,
        source: ResolutionError,
    },

    #[error(transparent)]
    RowShape(#[from] RowShapeError),

    #[error(
        "{} has no `{start}` ... `{end}` region",
        .0.display(),
        start = START_MARKER,
        end = END_MARKER
    )]
    MissingMarkers(PathBuf),
}

/// Regenerate the API region of every page in `config`.
pub fn run(
    config: &Config,
    analyzer: &dyn Analyzer,
    options: &UpdateOptions,
) -> Result<Report, UpdateError> {
    let extract_options = ExtractOptions {
        root_class: config.root_class.clone(),
        max_depth: config.max_depth,
    };
    let mut report = Report::default();

    for (file, patterns) in &config.docs {
        let resolution = |source| UpdateError::Resolution {
            file: file.clone(),
            source,
        };

        let entrypoints = expand_entrypoints(analyzer, patterns).map_err(resolution)?;
        let mut components = Vec::with_capacity(entrypoints.len());
        for entrypoint in &entrypoints {
            let meta = extract(analyzer, entrypoint, &extract_options).map_err(resolution)?;
            components.push(ComponentTables {
                class_name: meta.class_name.clone(),
                tables: build_tables(&meta)?,
            });
        }

        let path = config.docs_dir.join(file);
        let current = fs::read_to_string(&path).map_err(|source| UpdateError::Read {
            path: path.clone(),
            source,
        })?;

        let Some(regenerated) = try_splice(&current, &components) else {
            if options.strict {
                return Err(UpdateError::MissingMarkers(path));
            }
            tracing::warn!(path = %path.display(), "No generated API region; file left unchanged");
            report.missing_markers.push(file.clone());
            continue;
        };

        if regenerated == current {
            tracing::debug!(path = %path.display(), "API docs up to date");
            report.unchanged.push(file.clone());
            continue;
        }

        match options.mode {
            Mode::Check => {
                tracing::info!(path = %path.display(), "API docs out of date");
                report.stale.push(file.clone());
            }
            Mode::Write => {
                fs::write(&path, &regenerated).map_err(|source| UpdateError::Write {
                    path: path.clone(),
                    source,
                })?;
                tracing::info!(
                    path = %path.display(),
                    components = components.len(),
                    "Updated API docs"
                );
                report.updated.push(file.clone());
            }
        }
    }

    Ok(report)
}

/// `*` and `?` stay within one path segment, like a filesystem glob.
const MATCH_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Expand entrypoint patterns against the analyzer's module paths.
///
/// Plain paths pass through; glob patterns expand to their sorted matches.
/// Duplicates keep their first position.
fn expand_entrypoints(
    analyzer: &dyn Analyzer,
    patterns: &[String],
) -> Result<Vec<PathBuf>, ResolutionError> {
    let mut entrypoints: Vec<PathBuf> = Vec::new();
    for raw in patterns {
        let pattern = raw.strip_prefix("./").unwrap_or(raw);
        let matches = if is_glob(pattern) {
            let glob = glob::Pattern::new(pattern).map_err(|e| ResolutionError::InvalidPattern {
                pattern: raw.clone(),
                reason: e.to_string(),
            })?;
            let mut found: Vec<PathBuf> = analyzer
                .module_paths()
                .into_iter()
                .filter(|path| glob.matches_path_with(path, MATCH_OPTIONS))
                .map(Path::to_path_buf)
                .collect();
            if found.is_empty() {
                return Err(ResolutionError::NoMatch(raw.clone()));
            }
            found.sort();
            found
        } else {
            vec![PathBuf::from(pattern)]
        };
        for path in matches {
            if !entrypoints.contains(&path) {
                entrypoints.push(path);
            }
        }
    }
    Ok(entrypoints)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
