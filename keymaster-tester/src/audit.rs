use anyhow::{Context, Result, anyhow, bail};
use keymaster_games::{
    CatalogIssue, Entry, ResolvedTemplate, Severity, audit_provider, entries, has_errors,
    has_warnings, registry,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Audit outcome for one game.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub game: String,
    pub slug: String,
    pub objectives: usize,
    pub constraints: usize,
    /// Pool name to the number of values it resolved to.
    pub pools: BTreeMap<String, usize>,
    pub issues: Vec<CatalogIssue>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<ResolvedTemplate>,
}

impl GameReport {
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Resolve a comma-separated selection to registry entries. `all` expands to
/// every registered game; duplicates are dropped. An empty selection is an
/// error so a run can never pass without auditing anything.
pub fn select_games(selection: &[String]) -> Result<Vec<&'static Entry>> {
    if selection.is_empty() {
        bail!("no games selected (use `all` or a comma-separated list of slugs)");
    }
    let mut selected: Vec<&'static Entry> = Vec::new();
    for name in selection {
        let matched: Vec<&'static Entry> = if name.eq_ignore_ascii_case("all") {
            entries().iter().collect()
        } else {
            let entry = registry::find(name).ok_or_else(|| {
                let known: Vec<_> = entries().iter().map(|e| e.slug).collect();
                anyhow!("unknown game {name:?} (known: {})", known.join(", "))
            })?;
            vec![entry]
        };
        for entry in matched {
            if !selected.iter().any(|s| s.slug == entry.slug) {
                selected.push(entry);
            }
        }
    }
    Ok(selected)
}

pub fn load_options(path: Option<&Path>) -> Result<Option<String>> {
    path.map(|path| {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    })
    .transpose()
}

/// Build and audit one game. `strict` turns warnings into a failure.
pub fn audit_game(
    entry: &Entry,
    options_json: Option<&str>,
    strict: bool,
    verbose: bool,
) -> Result<GameReport> {
    let provider = entry
        .build(options_json)
        .with_context(|| format!("failed to build {}", entry.name))?;
    let objectives = provider.objectives();
    let constraints = provider.constraints();

    let mut pools = BTreeMap::new();
    for binding in objectives.iter().chain(&constraints).flat_map(|t| &t.bindings) {
        pools
            .entry(binding.pool.clone())
            .or_insert_with(|| binding.values.len());
    }

    let issues = audit_provider(provider.as_ref());
    let passed = !has_errors(&issues) && !(strict && has_warnings(&issues));
    log::info!(
        "{}: {} issues, {}",
        entry.slug,
        issues.len(),
        if passed { "passed" } else { "failed" }
    );

    let templates = if verbose {
        objectives.iter().chain(&constraints).cloned().collect()
    } else {
        Vec::new()
    };

    Ok(GameReport {
        game: entry.name.to_string(),
        slug: entry.slug.to_string(),
        objectives: objectives.len(),
        constraints: constraints.len(),
        pools,
        issues,
        passed,
        templates,
    })
}
