use thiserror::Error;

use crate::game::{Game, Provider};
use crate::games::{PokemonPinballRsGame, PokemonUniteGame};
use crate::options::{GameOptions, OptionsError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown game {0:?}")]
    UnknownGame(String),
    #[error(transparent)]
    Options(#[from] OptionsError),
}

type Build = fn(Option<&str>) -> Result<Box<dyn Provider>, RegistryError>;

/// A registered game: its title, a command-line friendly slug and a builder.
#[derive(Clone, Copy)]
pub struct Entry {
    pub slug: &'static str,
    pub name: &'static str,
    build: Build,
}

impl Entry {
    /// Build the provider from an option snapshot, or from declared defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is malformed or names invalid keys.
    pub fn build(&self, options_json: Option<&str>) -> Result<Box<dyn Provider>, RegistryError> {
        (self.build)(options_json)
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.slug.eq_ignore_ascii_case(name) || self.name == name
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("slug", &self.slug)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

const ENTRIES: &[Entry] = &[
    Entry {
        slug: "pokemon_pinball_rs",
        name: PokemonPinballRsGame::NAME,
        build: build::<PokemonPinballRsGame>,
    },
    Entry {
        slug: "pokemon_unite",
        name: PokemonUniteGame::NAME,
        build: build::<PokemonUniteGame>,
    },
];

/// Titles of every registered game, in registration order.
pub const GAME_NAMES: &[&str] = &[PokemonPinballRsGame::NAME, PokemonUniteGame::NAME];

fn build<G>(options_json: Option<&str>) -> Result<Box<dyn Provider>, RegistryError>
where
    G: Game + 'static,
{
    let options = match options_json {
        Some(json) => G::Options::from_json(json)?,
        None => {
            let defaults = G::Options::default();
            defaults.validate()?;
            defaults
        }
    };
    Ok(Box::new(G::from_options(options)))
}

/// Registered games in registration order.
#[must_use]
pub const fn entries() -> &'static [Entry] {
    ENTRIES
}

#[must_use]
pub fn find(name: &str) -> Option<&'static Entry> {
    ENTRIES.iter().find(|entry| entry.matches(name))
}

/// Build a provider by title or slug.
///
/// # Errors
///
/// Returns [`RegistryError::UnknownGame`] for an unregistered name, or an
/// options error if the snapshot does not load.
pub fn provider(
    name: &str,
    options_json: Option<&str>,
) -> Result<Box<dyn Provider>, RegistryError> {
    let entry = find(name).ok_or_else(|| RegistryError::UnknownGame(name.to_string()))?;
    log::debug!("building {} provider", entry.name);
    entry.build(options_json)
}

/// Every registered provider with default options.
///
/// # Errors
///
/// Returns an error if a game's declared defaults fail to load.
pub fn providers() -> Result<Vec<Box<dyn Provider>>, RegistryError> {
    ENTRIES.iter().map(|entry| entry.build(None)).collect()
}
