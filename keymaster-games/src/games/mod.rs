pub mod pokemon_pinball_rs;
pub mod pokemon_unite;

pub use pokemon_pinball_rs::{PokemonPinballRsGame, PokemonPinballRsOptions};
pub use pokemon_unite::{PokemonUniteGame, PokemonUniteOptions, Role, UnitePokemon};
