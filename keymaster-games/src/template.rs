//! Objective and constraint templates.
//!
//! A template is a human-readable label with uppercase placeholder tokens
//! plus the bindings that tell the host where to draw substitute values
//! from. Rendering and weighted selection stay with the host; this module
//! only describes the templates and checks that they are well formed.
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

use crate::pool::{Resolver, ValuePool};

/// Placeholder tokens: runs of at least two uppercase letters or underscores.
const TOKEN_PATTERN: &str = r"[A-Z][A-Z_]+";

fn token_regex() -> Option<&'static Regex> {
    static TOKEN_RE: OnceLock<Option<Regex>> = OnceLock::new();
    TOKEN_RE
        .get_or_init(|| match Regex::new(TOKEN_PATTERN) {
            Ok(re) => Some(re),
            Err(err) => {
                log::error!("token pattern {TOKEN_PATTERN:?} failed to compile: {err}");
                None
            }
        })
        .as_ref()
}

/// Placeholder tokens in `label`, in order of first appearance.
///
/// Tokens may be glued to neighbouring text (`aBALL`, `SCORE,000,000`);
/// single capitals such as the start of a sentence are not tokens.
#[must_use]
pub fn label_tokens(label: &str) -> Vec<&str> {
    let Some(re) = token_regex() else {
        return Vec::new();
    };
    let mut seen = BTreeSet::new();
    re.find_iter(label)
        .map(|m| m.as_str())
        .filter(|token| seen.insert(*token))
        .collect()
}

/// Binds one placeholder token to the pool it is filled from.
pub struct Binding<G> {
    pub token: &'static str,
    /// Name of the resolver, as shown in reports.
    pub pool: &'static str,
    pub resolver: Resolver<G>,
    /// How many values the host draws for this token.
    pub count: usize,
}

impl<G> Binding<G> {
    #[must_use]
    pub fn resolve(&self, game: &G) -> ValuePool {
        (self.resolver)(game)
    }
}

impl<G> Clone for Binding<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for Binding<G> {}

impl<G> fmt::Debug for Binding<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("token", &self.token)
            .field("pool", &self.pool)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

/// Authoring mistakes found in a template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("token {token} in \"{label}\" has no binding")]
    UnboundToken { label: String, token: String },
    #[error("binding {token} is not used by \"{label}\"")]
    UnusedBinding { label: String, token: String },
    #[error("token {token} is bound more than once in \"{label}\"")]
    DuplicateBinding { label: String, token: String },
    #[error("binding {token} in \"{label}\" samples zero values")]
    ZeroCount { label: String, token: String },
    #[error("\"{label}\" has weight 0")]
    ZeroWeight { label: String },
}

/// A parameterized objective the host can offer the player.
pub struct ObjectiveTemplate<G> {
    pub label: &'static str,
    pub bindings: SmallVec<[Binding<G>; 2]>,
    /// Relative selection frequency.
    pub weight: u32,
    pub is_time_consuming: bool,
    pub is_difficult: bool,
}

/// Optional modifier applied across a whole objective set.
pub type ConstraintTemplate<G> = ObjectiveTemplate<G>;

impl<G> ObjectiveTemplate<G> {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            bindings: SmallVec::new(),
            weight: 1,
            is_time_consuming: false,
            is_difficult: false,
        }
    }

    #[must_use]
    pub fn bind(
        mut self,
        token: &'static str,
        pool: &'static str,
        resolver: Resolver<G>,
        count: usize,
    ) -> Self {
        self.bindings.push(Binding {
            token,
            pool,
            resolver,
            count,
        });
        self
    }

    #[must_use]
    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn time_consuming(mut self, is_time_consuming: bool) -> Self {
        self.is_time_consuming = is_time_consuming;
        self
    }

    #[must_use]
    pub fn difficult(mut self, is_difficult: bool) -> Self {
        self.is_difficult = is_difficult;
        self
    }

    #[must_use]
    pub fn tokens(&self) -> Vec<&'static str> {
        label_tokens(self.label)
    }

    #[must_use]
    pub fn binding(&self, token: &str) -> Option<&Binding<G>> {
        self.bindings.iter().find(|b| b.token == token)
    }

    /// Every authoring problem in this template.
    #[must_use]
    pub fn problems(&self) -> Vec<TemplateError> {
        let label = self.label.to_string();
        let tokens = self.tokens();
        let mut problems = Vec::new();

        if self.weight == 0 {
            problems.push(TemplateError::ZeroWeight {
                label: label.clone(),
            });
        }

        for token in &tokens {
            if self.binding(token).is_none() {
                problems.push(TemplateError::UnboundToken {
                    label: label.clone(),
                    token: (*token).to_string(),
                });
            }
        }

        let mut bound = BTreeSet::new();
        for binding in &self.bindings {
            if !bound.insert(binding.token) {
                problems.push(TemplateError::DuplicateBinding {
                    label: label.clone(),
                    token: binding.token.to_string(),
                });
            }
            if !tokens.contains(&binding.token) {
                problems.push(TemplateError::UnusedBinding {
                    label: label.clone(),
                    token: binding.token.to_string(),
                });
            }
            if binding.count == 0 {
                problems.push(TemplateError::ZeroCount {
                    label: label.clone(),
                    token: binding.token.to_string(),
                });
            }
        }

        problems
    }

    /// Check the template is well formed.
    ///
    /// # Errors
    ///
    /// Returns the first authoring problem found.
    pub fn check(&self) -> Result<(), TemplateError> {
        self.problems().into_iter().next().map_or(Ok(()), Err)
    }

    /// Resolve every binding against `game`'s current option snapshot.
    #[must_use]
    pub fn resolve(&self, game: &G) -> ResolvedTemplate {
        ResolvedTemplate {
            label: self.label.to_string(),
            weight: self.weight,
            is_time_consuming: self.is_time_consuming,
            is_difficult: self.is_difficult,
            bindings: self
                .bindings
                .iter()
                .map(|binding| ResolvedBinding {
                    token: binding.token.to_string(),
                    pool: binding.pool.to_string(),
                    count: binding.count,
                    values: binding.resolve(game),
                })
                .collect(),
        }
    }
}

impl<G> fmt::Debug for ObjectiveTemplate<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectiveTemplate")
            .field("label", &self.label)
            .field("bindings", &self.bindings)
            .field("weight", &self.weight)
            .field("is_time_consuming", &self.is_time_consuming)
            .field("is_difficult", &self.is_difficult)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBinding {
    pub token: String,
    pub pool: String,
    pub count: usize,
    pub values: ValuePool,
}

/// A template with its pools evaluated, detached from the game type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTemplate {
    pub label: String,
    pub weight: u32,
    pub is_time_consuming: bool,
    pub is_difficult: bool,
    pub bindings: Vec<ResolvedBinding>,
}

impl ResolvedTemplate {
    /// Whether every pool can supply the number of values its token needs.
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        self.bindings.iter().all(|b| b.values.len() >= b.count)
    }

    #[must_use]
    pub fn binding(&self, token: &str) -> Option<&ResolvedBinding> {
        self.bindings.iter().find(|b| b.token == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        tables: Vec<&'static str>,
    }

    fn tables(fixture: &Fixture) -> ValuePool {
        ValuePool::from_static(&fixture.tables)
    }

    fn baskets(_: &Fixture) -> ValuePool {
        ValuePool::from(1..6)
    }

    #[test]
    fn token_pattern_compiles() {
        assert!(token_regex().is_some());
    }

    #[test]
    fn tokens_are_found_inside_words_and_numbers() {
        assert_eq!(label_tokens("Catch a Pokémon with aBALL Ball"), vec!["BALL"]);
        assert_eq!(
            label_tokens("Score at least SCORE,000,000 points on the TABLE Field"),
            vec!["SCORE", "TABLE"]
        );
        assert_eq!(label_tokens("Win as POKEMON, then POKEMON again"), vec!["POKEMON"]);
        assert!(label_tokens("Complete an objective without losing a ball").is_empty());
        assert_eq!(label_tokens("Use HELD_ITEMS"), vec!["HELD_ITEMS"]);
    }

    #[test]
    fn builder_sets_defaults_and_overrides() {
        let template: ObjectiveTemplate<Fixture> = ObjectiveTemplate::new("Evolve on TABLE")
            .bind("TABLE", "tables", tables, 1);
        assert_eq!(template.weight, 1);
        assert!(!template.is_time_consuming);
        assert!(!template.is_difficult);

        let template = template.weight(3).time_consuming(true).difficult(true);
        assert_eq!(template.weight, 3);
        assert!(template.is_time_consuming);
        assert!(template.is_difficult);
        assert!(template.check().is_ok());
    }

    #[test]
    fn check_reports_unbound_and_unused_tokens() {
        let template: ObjectiveTemplate<Fixture> = ObjectiveTemplate::new("Score BASKETS baskets")
            .bind("TABLE", "tables", tables, 1);
        let problems = template.problems();
        assert!(problems.contains(&TemplateError::UnboundToken {
            label: "Score BASKETS baskets".to_string(),
            token: "BASKETS".to_string(),
        }));
        assert!(problems.contains(&TemplateError::UnusedBinding {
            label: "Score BASKETS baskets".to_string(),
            token: "TABLE".to_string(),
        }));
        assert!(template.check().is_err());
    }

    #[test]
    fn check_reports_zero_weight_count_and_duplicates() {
        let template: ObjectiveTemplate<Fixture> = ObjectiveTemplate::new("On TABLE")
            .bind("TABLE", "tables", tables, 0)
            .bind("TABLE", "tables", tables, 1)
            .weight(0);
        let problems = template.problems();
        assert_eq!(problems.len(), 3);
        assert!(matches!(problems[0], TemplateError::ZeroWeight { .. }));
        assert!(
            problems
                .iter()
                .any(|p| matches!(p, TemplateError::DuplicateBinding { .. }))
        );
        assert!(
            problems
                .iter()
                .any(|p| matches!(p, TemplateError::ZeroCount { .. }))
        );
    }

    #[test]
    fn resolve_evaluates_pools_against_game() {
        let fixture = Fixture {
            tables: vec!["Ruby"],
        };
        let template: ObjectiveTemplate<Fixture> = ObjectiveTemplate::new("Score BASKETS on TABLE")
            .bind("TABLE", "tables", tables, 1)
            .bind("BASKETS", "basket_range", baskets, 1);
        let resolved = template.resolve(&fixture);
        assert_eq!(resolved.bindings.len(), 2);
        assert_eq!(
            resolved.binding("TABLE").unwrap().values,
            ValuePool::from_static(&["Ruby"])
        );
        assert_eq!(resolved.binding("BASKETS").unwrap().values.len(), 5);
        assert!(resolved.is_satisfiable());

        let empty = Fixture { tables: Vec::new() };
        assert!(!template.resolve(&empty).is_satisfiable());
    }

    #[test]
    fn binding_debug_omits_resolver() {
        let template: ObjectiveTemplate<Fixture> =
            ObjectiveTemplate::new("On TABLE").bind("TABLE", "tables", tables, 2);
        let rendered = format!("{:?}", template.bindings[0]);
        assert!(rendered.contains("TABLE"));
        assert!(rendered.contains("count: 2"));
    }
}
