//! Keymaster's Keep game definitions
//!
//! Objective template catalogs, the value pools that fill their
//! placeholders, and the player options that gate those pools. The host
//! framework renders templates and samples objectives; this crate only
//! supplies the data it draws from.

pub mod game;
pub mod games;
pub mod options;
pub mod platform;
pub mod pool;
pub mod registry;
pub mod template;
pub mod validate;

// Re-export commonly used types
pub use game::{Game, Provider};
pub use games::{
    PokemonPinballRsGame, PokemonPinballRsOptions, PokemonUniteGame, PokemonUniteOptions, Role,
};
pub use options::{
    GameOptions, OptionDeclaration, OptionKind, OptionsError, OwnedSet, SetDomain,
    deserialize_toggle,
};
pub use platform::Platform;
pub use pool::{Resolver, ValuePool};
pub use registry::{Entry, GAME_NAMES, RegistryError, entries, provider, providers};
pub use template::{
    Binding, ConstraintTemplate, ObjectiveTemplate, ResolvedBinding, ResolvedTemplate,
    TemplateError, label_tokens,
};
pub use validate::{CatalogIssue, Severity, audit_provider, has_errors, has_warnings};
