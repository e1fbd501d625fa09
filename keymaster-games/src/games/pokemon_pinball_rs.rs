use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::options::{GameOptions, OptionDeclaration, deserialize_toggle};
use crate::platform::Platform;
use crate::pool::ValuePool;
use crate::template::{ConstraintTemplate, ObjectiveTemplate};

pub const INCLUDE_RARE_SPAWNS: &str = "pokemon_pinball_rs_include_rare_spawns";

const POKEMON_BASE: &[&str] = &[
    "Treecko",
    "Torchic",
    "Mudkip",
    "Poochyena",
    "Zigzagoon",
    "Silcoon",
    "Cascoon",
    "Lombre",
    "Nuzleaf",
    "Taillow",
    "Wingull",
    "Slakoth",
    "Abra",
    "Nincada",
    "Loudred",
    "Makuhita",
    "Goldeen",
    "Magikarp",
    "Marill",
    "Geodude",
    "Nosepass",
    "Tentacool",
    "Sableye",
    "Mawile",
    "Machop",
    "Meditite",
    "Electrike",
    "Magnemite",
    "Voltorb",
    "Volbeat",
    "Illumise",
    "Doduo",
    "Roselia",
    "Carvanha",
    "Wailmer",
    "Numel",
    "Slugma",
    "Torkoal",
    "Grimer",
    "Koffing",
    "Skarmory",
    "Vibrava",
    "Cacnea",
    "Swablu",
    "Zangoose",
    "Seviper",
    "Lunatone",
    "Solrock",
    "Barboach",
    "Corphish",
    "Baltoy",
    "Lileep",
    "Anorith",
    "Jigglypuff",
    "Feebas",
    "Castform",
    "Staryu",
    "Kecleon",
    "Duskull",
    "Tropius",
    "Absol",
    "Vulpix",
    "Pikachu",
    "Psyduck",
    "Wobbuffet",
    "Girafarig",
    "Pinsir",
    "Heracross",
    "Rhyhorn",
    "Clamperl",
    "Relicanth",
    "Luvdisc",
    "Shelgon",
    "Kyogre",
    "Groudon",
];

/// Ruins spawns, the Eon twins and the other event-only catches.
const POKEMON_RARE: &[&str] = &[
    "Beldum",
    "Regirock",
    "Regice",
    "Registeel",
    "Latias",
    "Latios",
    "Rayquaza",
    "Jirachi",
];

const LOCATIONS_BASE: &[&str] = &[
    "Forest",
    "Plains",
    "City",
    "Cave",
    "Safari Zone",
    "Volcano",
    "Sea",
    "Lake",
    "Desert",
];

const LOCATIONS_RARE: &[&str] = &["Ruins"];

// Each entry finishes the "a" in "with aBALL Ball", so "n Ultra" reads "an Ultra".
const BALLS: &[&str] = &[" Great", "n Ultra", " Master"];

// Repeats are weighting: the host samples uniformly over the list.
const STAGES: &[&str] = &[
    "Kecleon", "Kecleon", "Kecleon", "Dusclops", "Dusclops", "Dusclops", "Groudon", "Groudon",
    "Kyogre", "Kyogre", "Rayquaza",
];

/// Millions of points.
const SCORE_GOALS: &[&str] = &[
    "100", "125", "150", "175", "200", "225", "250", "275", "300",
];

const TABLES: &[&str] = &["Ruby", "Sapphire"];

const SPHEAL_BASKETS_MIN: u32 = 1;
const SPHEAL_BASKETS_MAX: u32 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokemonPinballRsOptions {
    #[serde(
        rename = "pokemon_pinball_rs_include_rare_spawns",
        deserialize_with = "deserialize_toggle"
    )]
    pub include_rare_spawns: bool,
}

impl GameOptions for PokemonPinballRsOptions {
    fn declarations() -> Vec<OptionDeclaration> {
        vec![OptionDeclaration::toggle(
            INCLUDE_RARE_SPAWNS,
            "Pokémon Pinball: Ruby & Sapphire Include Rare Spawns",
            "Whether to include specific rare spawns, such as the Ruins spawns and the Eon Twins, in Pokémon Pinball: Ruby & Sapphire objectives.",
            false,
        )]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonPinballRsGame {
    options: PokemonPinballRsOptions,
}

impl PokemonPinballRsGame {
    #[must_use]
    pub const fn include_rare_spawns(&self) -> bool {
        self.options.include_rare_spawns
    }

    /// Catchable Pokémon, sorted; rare spawns only when enabled.
    #[must_use]
    pub fn pokemon(&self) -> Vec<&'static str> {
        with_rare(POKEMON_BASE, POKEMON_RARE, self.include_rare_spawns())
    }

    /// Catch areas, sorted; the Ruins only when rare spawns are enabled.
    #[must_use]
    pub fn locations(&self) -> Vec<&'static str> {
        with_rare(LOCATIONS_BASE, LOCATIONS_RARE, self.include_rare_spawns())
    }

    #[must_use]
    pub const fn balls() -> &'static [&'static str] {
        BALLS
    }

    #[must_use]
    pub const fn stages() -> &'static [&'static str] {
        STAGES
    }

    #[must_use]
    pub const fn score_goal() -> &'static [&'static str] {
        SCORE_GOALS
    }

    #[must_use]
    pub const fn tables() -> &'static [&'static str] {
        TABLES
    }

    #[must_use]
    pub const fn basket_range() -> std::ops::Range<u32> {
        SPHEAL_BASKETS_MIN..SPHEAL_BASKETS_MAX + 1
    }

    fn pokemon_pool(&self) -> ValuePool {
        ValuePool::sorted(self.pokemon())
    }

    fn locations_pool(&self) -> ValuePool {
        ValuePool::sorted(self.locations())
    }

    fn balls_pool(_: &Self) -> ValuePool {
        ValuePool::from_static(Self::balls())
    }

    fn stages_pool(_: &Self) -> ValuePool {
        ValuePool::from_static(Self::stages())
    }

    fn score_goal_pool(_: &Self) -> ValuePool {
        ValuePool::from_static(Self::score_goal())
    }

    fn tables_pool(_: &Self) -> ValuePool {
        ValuePool::from_static(Self::tables())
    }

    fn basket_range_pool(_: &Self) -> ValuePool {
        ValuePool::from(Self::basket_range())
    }
}

fn with_rare(
    base: &[&'static str],
    rare: &[&'static str],
    include_rare: bool,
) -> Vec<&'static str> {
    let mut values = base.to_vec();
    if include_rare {
        values.extend_from_slice(rare);
    }
    values.sort_unstable();
    values
}

impl Game for PokemonPinballRsGame {
    type Options = PokemonPinballRsOptions;

    const NAME: &'static str = "Pokémon Pinball: Ruby & Sapphire";
    const PLATFORM: Platform = Platform::GameBoyAdvance;
    const PLATFORMS_OTHER: &'static [Platform] = &[Platform::WiiU];
    const IS_ADULT_ONLY_OR_UNRATED: bool = false;

    fn from_options(options: Self::Options) -> Self {
        Self { options }
    }

    fn options(&self) -> &Self::Options {
        &self.options
    }

    fn optional_game_constraint_templates(&self) -> Vec<ConstraintTemplate<Self>> {
        vec![
            ConstraintTemplate::new("Complete an objective without shaking the table"),
            ConstraintTemplate::new("Complete an objective without losing a ball"),
            ConstraintTemplate::new(
                "Complete an objective without spending anything at the Pokémon Mart",
            ),
        ]
    }

    fn game_objective_templates(&self) -> Vec<ObjectiveTemplate<Self>> {
        vec![
            ObjectiveTemplate::new("Catch a Pokémon with aBALL Ball (or better)")
                .bind("BALL", "balls", Self::balls_pool, 1)
                .weight(1),
            ObjectiveTemplate::new("Complete the STAGE Bonus Stage")
                .bind("STAGE", "stages", Self::stages_pool, 1)
                .weight(2),
            ObjectiveTemplate::new("Catch a Pokémon while in the LOCATION Area")
                .bind("LOCATION", "locations", Self::locations_pool, 1)
                .weight(3),
            ObjectiveTemplate::new(
                "Score at least SCORE,000,000 points in a single game on the TABLE Field",
            )
            .bind("SCORE", "score_goal", Self::score_goal_pool, 1)
            .bind("TABLE", "tables", Self::tables_pool, 1)
            .weight(3),
            ObjectiveTemplate::new("Hatch and catch an egg Pokémon on the TABLE Field")
                .bind("TABLE", "tables", Self::tables_pool, 1)
                .weight(3),
            ObjectiveTemplate::new(
                "Participate in the Spheal bonus stage on the TABLE Field and score BASKETS Spheal baskets",
            )
            .bind("TABLE", "tables", Self::tables_pool, 1)
            .bind("BASKETS", "basket_range", Self::basket_range_pool, 1)
            .weight(1),
            ObjectiveTemplate::new("Evolve a Pokémon on the TABLE Field")
                .bind("TABLE", "tables", Self::tables_pool, 1)
                .weight(3),
            ObjectiveTemplate::new("Catch the following Pokémon: POKEMON")
                .bind("POKEMON", "pokemon", Self::pokemon_pool, 1)
                .weight(4),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Provider;

    fn game(include_rare_spawns: bool) -> PokemonPinballRsGame {
        PokemonPinballRsGame::from_options(PokemonPinballRsOptions {
            include_rare_spawns,
        })
    }

    #[test]
    fn pokemon_without_rare_spawns_is_sorted_base() {
        let pokemon = game(false).pokemon();
        assert_eq!(pokemon.len(), POKEMON_BASE.len());
        assert!(pokemon.windows(2).all(|w| w[0] < w[1]));
        assert!(!pokemon.contains(&"Rayquaza"));
        assert_eq!(pokemon.first(), Some(&"Abra"));
    }

    #[test]
    fn pokemon_with_rare_spawns_adds_rare_list() {
        let pokemon = game(true).pokemon();
        assert_eq!(pokemon.len(), POKEMON_BASE.len() + POKEMON_RARE.len());
        assert!(pokemon.windows(2).all(|w| w[0] < w[1]));
        for rare in POKEMON_RARE {
            assert!(pokemon.contains(rare));
        }
    }

    #[test]
    fn locations_follow_rare_spawn_toggle() {
        assert!(!game(false).locations().contains(&"Ruins"));
        let locations = game(true).locations();
        assert!(locations.contains(&"Ruins"));
        assert_eq!(locations.len(), 10);
        assert!(locations.is_sorted());
    }

    #[test]
    fn stages_keep_their_weighting() {
        let stages = PokemonPinballRsGame::stages();
        let count = |name: &str| stages.iter().filter(|s| **s == name).count();
        assert_eq!(count("Kecleon"), 3);
        assert_eq!(count("Dusclops"), 3);
        assert_eq!(count("Groudon"), 2);
        assert_eq!(count("Kyogre"), 2);
        assert_eq!(count("Rayquaza"), 1);
        assert_eq!(stages.len(), 11);
    }

    #[test]
    fn basket_range_is_one_to_five() {
        let baskets: Vec<u32> = PokemonPinballRsGame::basket_range().collect();
        assert_eq!(baskets, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn catalog_shape_matches_weights() {
        let game = game(false);
        let weights: Vec<u32> = game
            .game_objective_templates()
            .iter()
            .map(|t| t.weight)
            .collect();
        assert_eq!(weights, vec![1, 2, 3, 3, 3, 1, 3, 4]);
        assert!(
            game.game_objective_templates()
                .iter()
                .all(|t| !t.is_difficult && !t.is_time_consuming)
        );
        let constraints = game.optional_game_constraint_templates();
        assert_eq!(constraints.len(), 3);
        assert!(constraints.iter().all(|c| c.bindings.is_empty()));
    }

    #[test]
    fn every_template_is_well_formed() {
        assert!(game(true).template_problems().is_empty());
        assert!(game(false).template_problems().is_empty());
    }

    #[test]
    fn options_load_from_host_json() {
        let options = PokemonPinballRsOptions::from_json(
            r#"{"pokemon_pinball_rs_include_rare_spawns": true, "other_game_option": 3}"#,
        )
        .unwrap();
        assert!(options.include_rare_spawns);
        let defaults = PokemonPinballRsOptions::from_json("{}").unwrap();
        assert!(!defaults.include_rare_spawns);
        assert!(
            PokemonPinballRsOptions::from_json(
                r#"{"pokemon_pinball_rs_include_rare_spawns": "yes"}"#
            )
            .is_err()
        );
    }

    #[test]
    fn options_accept_integer_toggle_values() {
        let enabled =
            PokemonPinballRsOptions::from_json(r#"{"pokemon_pinball_rs_include_rare_spawns": 1}"#)
                .unwrap();
        assert!(enabled.include_rare_spawns);
        let disabled =
            PokemonPinballRsOptions::from_json(r#"{"pokemon_pinball_rs_include_rare_spawns": 0}"#)
                .unwrap();
        assert!(!disabled.include_rare_spawns);

        let game = PokemonPinballRsGame::from_options(enabled);
        assert!(game.locations().contains(&"Ruins"));
    }
}
