//! Ignore-filter contract and a small line-oriented implementation.
//!
//! The resolution engine only asks one question of an ignore filter:
//! whether a path is excluded from being treated as a component source.
//! Filters are read-only after construction and safe to share across
//! concurrent resolutions.

use std::path::Path;

/// Predicate excluding paths from resolution.
pub trait IgnoreFilter {
    fn denies(&self, path: &Path) -> bool;
}

/// Filter that denies nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIgnore;

impl IgnoreFilter for NoIgnore {
    fn denies(&self, _path: &Path) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    /// Matches a path component exactly.
    Exact(String),
    /// `name*` — component starts with the head.
    Prefix(String),
    /// `*name` — component ends with the tail.
    Suffix(String),
}

impl Pattern {
    fn matches(&self, component: &str) -> bool {
        match self {
            Pattern::Exact(name) => component == name,
            Pattern::Prefix(head) => component.starts_with(head.as_str()),
            Pattern::Suffix(tail) => component.ends_with(tail.as_str()),
        }
    }
}

/// Ignore filter built from ignore-file style lines.
///
/// Blank lines and `#` comments are skipped. A single leading or trailing
/// `*` acts as a wildcard; everything else matches a path component
/// exactly. A path is denied when any of its components matches any
/// pattern.
#[derive(Debug, Clone, Default)]
pub struct PatternIgnore {
    patterns: Vec<Pattern>,
}

impl PatternIgnore {
    pub fn from_lines(input: &str) -> Self {
        let patterns = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| {
                if let Some(tail) = line.strip_prefix('*') {
                    Pattern::Suffix(tail.to_string())
                } else if let Some(head) = line.strip_suffix('*') {
                    Pattern::Prefix(head.to_string())
                } else {
                    Pattern::Exact(line.to_string())
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl IgnoreFilter for PatternIgnore {
    fn denies(&self, path: &Path) -> bool {
        path.components().any(|component| {
            let text = component.as_os_str().to_string_lossy();
            self.patterns.iter().any(|pattern| pattern.matches(&text))
        })
    }
}
