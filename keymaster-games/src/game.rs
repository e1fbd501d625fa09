//! The provider surface the host framework calls into.
use crate::options::{GameOptions, OptionDeclaration};
use crate::platform::Platform;
use crate::template::{ConstraintTemplate, ObjectiveTemplate, ResolvedTemplate, TemplateError};
use crate::validate::CatalogIssue;

/// A game definition: metadata, option snapshot and template catalogs.
///
/// Catalog builders are pure functions of the option snapshot held by the
/// game; every call rebuilds the same templates.
pub trait Game: Sized {
    type Options: GameOptions;

    const NAME: &'static str;
    const PLATFORM: Platform;
    const PLATFORMS_OTHER: &'static [Platform];
    const IS_ADULT_ONLY_OR_UNRATED: bool;

    fn from_options(options: Self::Options) -> Self;

    fn options(&self) -> &Self::Options;

    fn game_objective_templates(&self) -> Vec<ObjectiveTemplate<Self>>;

    fn optional_game_constraint_templates(&self) -> Vec<ConstraintTemplate<Self>> {
        Vec::new()
    }

    /// Game-specific data findings beyond the generic template checks.
    fn audit(&self) -> Vec<CatalogIssue> {
        Vec::new()
    }
}

/// Type-erased view of a [`Game`], with pools already resolved.
pub trait Provider {
    fn name(&self) -> &'static str;
    fn platform(&self) -> Platform;
    fn platforms_other(&self) -> &'static [Platform];
    fn is_adult_only_or_unrated(&self) -> bool;
    fn option_declarations(&self) -> Vec<OptionDeclaration>;
    /// The current option snapshot as the host would persist it.
    fn options_json(&self) -> serde_json::Value;
    fn objectives(&self) -> Vec<ResolvedTemplate>;
    fn constraints(&self) -> Vec<ResolvedTemplate>;
    /// Authoring problems across objective and constraint templates.
    fn template_problems(&self) -> Vec<TemplateError>;
    /// The game's own lint findings; see [`Game::audit`].
    fn audit(&self) -> Vec<CatalogIssue>;
}

impl<G: Game> Provider for G {
    fn name(&self) -> &'static str {
        G::NAME
    }

    fn platform(&self) -> Platform {
        G::PLATFORM
    }

    fn platforms_other(&self) -> &'static [Platform] {
        G::PLATFORMS_OTHER
    }

    fn is_adult_only_or_unrated(&self) -> bool {
        G::IS_ADULT_ONLY_OR_UNRATED
    }

    fn option_declarations(&self) -> Vec<OptionDeclaration> {
        G::Options::declarations()
    }

    fn options_json(&self) -> serde_json::Value {
        serde_json::to_value(self.options()).unwrap_or_else(|err| {
            log::error!("{}: options snapshot failed to serialize: {err}", G::NAME);
            serde_json::Value::Null
        })
    }

    fn objectives(&self) -> Vec<ResolvedTemplate> {
        let templates = self.game_objective_templates();
        log::debug!(
            "{}: resolving {} objective templates",
            G::NAME,
            templates.len()
        );
        templates.iter().map(|t| t.resolve(self)).collect()
    }

    fn constraints(&self) -> Vec<ResolvedTemplate> {
        self.optional_game_constraint_templates()
            .iter()
            .map(|t| t.resolve(self))
            .collect()
    }

    fn template_problems(&self) -> Vec<TemplateError> {
        let objectives = self.game_objective_templates();
        let constraints = self.optional_game_constraint_templates();
        objectives
            .iter()
            .chain(constraints.iter())
            .flat_map(ObjectiveTemplate::problems)
            .collect()
    }

    fn audit(&self) -> Vec<CatalogIssue> {
        Game::audit(self)
    }
}
