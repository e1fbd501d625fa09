//! Authoring-time checks over a whole provider.
//!
//! Nothing here runs during objective generation; the checks exist so a
//! catalog author finds unbound tokens or broken option domains before the
//! host does.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::game::Provider;
use crate::template::ResolvedTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIssue {
    pub game: String,
    pub severity: Severity,
    /// Template label, option key or pool name the issue is about.
    pub subject: String,
    pub message: String,
}

impl CatalogIssue {
    #[must_use]
    pub fn error(game: &str, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            game: game.to_string(),
            severity: Severity::Error,
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(game: &str, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            game: game.to_string(),
            severity: Severity::Warning,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}: {}",
            self.severity, self.game, self.subject, self.message
        )
    }
}

/// Run every catalog check against `provider`.
#[must_use]
pub fn audit_provider(provider: &dyn Provider) -> Vec<CatalogIssue> {
    let game = provider.name();
    let mut issues = Vec::new();

    for problem in provider.template_problems() {
        issues.push(CatalogIssue::error(game, "template", problem.to_string()));
    }

    let mut option_keys = BTreeSet::new();
    for declaration in provider.option_declarations() {
        if !option_keys.insert(declaration.key) {
            issues.push(CatalogIssue::error(
                game,
                declaration.key,
                "option key is declared more than once",
            ));
        }
        if let Err(err) = declaration.check() {
            issues.push(CatalogIssue::error(game, declaration.key, err.to_string()));
        }
    }

    let objectives = provider.objectives();
    let constraints = provider.constraints();
    for template in objectives.iter().chain(constraints.iter()) {
        issues.extend(pool_shortfalls(game, template));
    }

    issues.extend(provider.audit());

    for issue in &issues {
        match issue.severity {
            Severity::Error => log::error!("{issue}"),
            Severity::Warning => log::warn!("{issue}"),
        }
    }
    issues
}

/// Pools too small for their sample count. The host treats such templates as
/// ineligible, so this is a warning rather than an error.
fn pool_shortfalls(game: &str, template: &ResolvedTemplate) -> Vec<CatalogIssue> {
    template
        .bindings
        .iter()
        .filter(|b| b.values.len() < b.count)
        .map(|b| {
            CatalogIssue::warning(
                game,
                template.label.as_str(),
                format!(
                    "pool {} has {} values but {} needs {}",
                    b.pool,
                    b.values.len(),
                    b.token,
                    b.count
                ),
            )
        })
        .collect()
}

#[must_use]
pub fn has_errors(issues: &[CatalogIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

#[must_use]
pub fn has_warnings(issues: &[CatalogIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Warning)
}
