//! Pokémon Unite.
//!
//! Objectives draw from the roster the player says they own. Role objectives
//! only offer roles that at least one owned Pokémon can fill.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::Game;
use crate::options::{GameOptions, OptionDeclaration, OwnedSet, SetDomain};
use crate::platform::Platform;
use crate::pool::ValuePool;
use crate::template::{ConstraintTemplate, ObjectiveTemplate};
use crate::validate::CatalogIssue;

pub const POKEMON_OWNED: &str = "pokemon_unite_pokemon_owned";

/// Every Pokémon the owned-roster option accepts.
pub const POKEMON: &[&str] = &[
    "Venusaur",
    "Charizard",
    "Blastoise",
    "Pikachu",
    "Alolan Raichu",
    "Clefable",
    "Alolan Ninetales",
    "Wigglytuff",
    "Psyduck",
    "Machamp",
    "Galarian Rapidash",
    "Slowbro",
    "Dodrio",
    "Gengar",
    "Mr. Mime",
    "Gyarados",
    "Lapras",
    "Vaporeon",
    "Snorlax",
    "Dragonite",
    "Mewtwo X",
    "Mewtwo Y",
    "Mew",
    "Azumarill",
    "Espeon",
    "Umbreon",
    "Scizor",
    "Blissey",
    "Suicune",
    "Tyranitar",
    "Ho-Oh",
    "Blaziken",
    "Gardevoir",
    "Sableye",
    "Absol",
    "Metagross",
    "Latias",
    "Latios",
    "Empoleon",
    "Garchomp",
    "Lucario",
    "Leafeon",
    "Glaceon",
    "Mamoswine",
    "Darkrai",
    "Crustle",
    "Zoroark",
    "Chandelure",
    "Delphox",
    "Greninja",
    "Talonflame",
    "Aegislash",
    "Sylveon",
    "Goodra",
    "Trevenant",
    "Hoopa",
    "Decidueye",
    "Tsareena",
    "Comfey",
    "Mimikyu",
    "Dhelmise",
    "Buzzwole",
    "Zeraora",
    "Cinderace",
    "Inteleon",
    "Greedent",
    "Eldegoss",
    "Cramorant",
    "Alcremie",
    "Falinks",
    "Duraludon",
    "Dragapult",
    "Zacian",
    "Urshifu",
    "Meowscarada",
    "Pawmot",
    "Armarouge",
    "Ceruledge",
    "Tinkaton",
    "Miraidon",
];

// Roster spellings are kept as shipped: "Amarouge", "Gyardos" and the fused
// "PawmotCeruledge" never match an owned key, which `audit` reports.
const ATTACKERS: &[&str] = &[
    "Venusaur",
    "Pikachu",
    "Alolan Raichu",
    "Alolan Ninetales",
    "Mewtwo Y",
    "Mew",
    "Espeon",
    "Gardevoir",
    "Latios",
    "Glaceon",
    "Chandelure",
    "Delphox",
    "Greninja",
    "Sylveon",
    "Decidueye",
    "Cinderace",
    "Inteleon",
    "Cramorant",
    "Duraludon",
    "Dragapult",
    "Amarouge",
    "Miraidon",
];

const ALL_ROUNDERS: &[&str] = &[
    "Charizard",
    "Machamp",
    "Gyardos",
    "Dragonite",
    "Mewtwo X",
    "Azumarill",
    "Scizor",
    "Suicune",
    "Tyranitar",
    "Blaziken",
    "Metagross",
    "Empoleon",
    "Garchomp",
    "Lucario",
    "Aegislash",
    "Tsareena",
    "Mimikyu",
    "Dhelmise",
    "Buzzwole",
    "Falinks",
    "Zacian",
    "Urshifu",
    "PawmotCeruledge",
    "Tinkaton",
];

const SPEEDSTERS: &[&str] = &[
    "Galarian Rapidash",
    "Dodrio",
    "Gengar",
    "Absol",
    "Leafeon",
    "Darkrai",
    "Zoroark",
    "Talonflame",
    "Zeraora",
    "Meowscarada",
];

const DEFENDERS: &[&str] = &[
    "Blastoise",
    "Slowbro",
    "Lapras",
    "Vaporeon",
    "Snorlax",
    "Umbreon",
    "Ho-Oh",
    "Mamoswine",
    "Crustle",
    "Goodra",
    "Trevenant",
    "Greedent",
];

const SUPPORTERS: &[&str] = &[
    "Clefable",
    "Wigglytuff",
    "Psyduck",
    "Mr. Mime",
    "Blissey",
    "Sableye",
    "Latias",
    "Hoopa",
    "Comfey",
    "Eldegoss",
    "Alcremie",
];

// "Resuce Hood" is the key hosts have already persisted; keep it.
const HELD_ITEMS: &[&str] = &[
    "Muscle Band",
    "Scope Lens",
    "Shell Bell",
    "Wise Glasses",
    "Focus Band",
    "Energy Amplifier",
    "Float Stone",
    "Buddy Barrier",
    "Score Shield",
    "Aeos Cookie",
    "Attack Weight",
    "Sp. Atk Specs",
    "Leftovers",
    "Exp. Share",
    "Assault Vest",
    "Rocky Helmet",
    "Razor Claw",
    "Choice Specs",
    "Weakness Policy",
    "Rapid-Fire Scarf",
    "Drain Crown",
    "Slick Spoon",
    "Resuce Hood",
    "Curse Bangle",
    "Curse Incense",
    "Resonant Guard",
    "Charging Charm",
    "Accel Bracer",
    "Drive Lens",
    "Amulet Coin",
    "Choice Scarf",
];

const BATTLE_ITEMS: &[&str] = &[
    "Potion",
    "X Attack",
    "X Speed",
    "Fluffy Tail",
    "Eject Button",
    "Slow Smoke",
    "Full Heal",
    "Goal-Getter",
    "Shedinja Doll",
    "Goal Hacker",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Attacker,
    #[serde(rename = "All-Rounder")]
    AllRounder,
    Speedster,
    Defender,
    Supporter,
}

impl Role {
    pub const ALL: [Self; 5] = [
        Self::Attacker,
        Self::AllRounder,
        Self::Speedster,
        Self::Defender,
        Self::Supporter,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attacker => "Attacker",
            Self::AllRounder => "All-Rounder",
            Self::Speedster => "Speedster",
            Self::Defender => "Defender",
            Self::Supporter => "Supporter",
        }
    }

    #[must_use]
    pub const fn roster(self) -> &'static [&'static str] {
        match self {
            Self::Attacker => ATTACKERS,
            Self::AllRounder => ALL_ROUNDERS,
            Self::Speedster => SPEEDSTERS,
            Self::Defender => DEFENDERS,
            Self::Supporter => SUPPORTERS,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain of the owned-roster option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitePokemon;

impl SetDomain for UnitePokemon {
    const OPTION: &'static str = POKEMON_OWNED;
    const VALID_KEYS: &'static [&'static str] = POKEMON;
    const DEFAULT: &'static [&'static str] = POKEMON;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokemonUniteOptions {
    #[serde(rename = "pokemon_unite_pokemon_owned")]
    pub pokemon_owned: OwnedSet<UnitePokemon>,
}

impl GameOptions for PokemonUniteOptions {
    fn declarations() -> Vec<OptionDeclaration> {
        vec![OptionDeclaration::set::<UnitePokemon>(
            "Pokémon Unite Pokémon Owned",
            "Indicates which Pokémon the player owns in Pokémon Unite and wants to play.",
        )]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonUniteGame {
    options: PokemonUniteOptions,
}

impl PokemonUniteGame {
    #[must_use]
    pub const fn held_items() -> &'static [&'static str] {
        HELD_ITEMS
    }

    #[must_use]
    pub const fn battle_items() -> &'static [&'static str] {
        BATTLE_ITEMS
    }

    /// Owned Pokémon, ascending.
    #[must_use]
    pub fn pokemon_pool(&self) -> Vec<&str> {
        self.options.pokemon_owned.iter().collect()
    }

    /// Roles with at least one owned member, ascending by name.
    #[must_use]
    pub fn roles(&self) -> Vec<&'static str> {
        let owned = &self.options.pokemon_owned;
        let mut roles: Vec<&'static str> = Role::ALL
            .into_iter()
            .filter(|role| role.roster().iter().any(|p| owned.contains(p)))
            .map(Role::as_str)
            .collect();
        roles.sort_unstable();
        log::debug!("{} owned Pokémon cover roles {roles:?}", owned.len());
        roles
    }

    fn held_items_pool(_: &Self) -> ValuePool {
        ValuePool::from_static(Self::held_items())
    }

    fn battle_items_pool(_: &Self) -> ValuePool {
        ValuePool::from_static(Self::battle_items())
    }

    fn owned_pool(&self) -> ValuePool {
        ValuePool::sorted(self.pokemon_pool())
    }

    fn roles_pool(&self) -> ValuePool {
        ValuePool::sorted(self.roles())
    }
}

impl Game for PokemonUniteGame {
    type Options = PokemonUniteOptions;

    const NAME: &'static str = "Pokémon Unite";
    const PLATFORM: Platform = Platform::Switch;
    const PLATFORMS_OTHER: &'static [Platform] = &[Platform::Android, Platform::Ios];
    const IS_ADULT_ONLY_OR_UNRATED: bool = false;

    fn from_options(options: Self::Options) -> Self {
        Self { options }
    }

    fn options(&self) -> &Self::Options {
        &self.options
    }

    fn optional_game_constraint_templates(&self) -> Vec<ConstraintTemplate<Self>> {
        vec![
            ConstraintTemplate::new("Cannot equip the following Held Items: ITEMS").bind(
                "ITEMS",
                "held_items",
                Self::held_items_pool,
                3,
            ),
            ConstraintTemplate::new("Cannot equip the following Battle Items: ITEMS").bind(
                "ITEMS",
                "battle_items",
                Self::battle_items_pool,
                2,
            ),
        ]
    }

    fn game_objective_templates(&self) -> Vec<ObjectiveTemplate<Self>> {
        vec![
            ObjectiveTemplate::new("Win a match as POKEMON")
                .bind("POKEMON", "pokemon_pool", Self::owned_pool, 1)
                .weight(3),
            ObjectiveTemplate::new(
                "Win a match as POKEMON with one of the following Held Items equipped: ITEMS",
            )
            .bind("POKEMON", "pokemon_pool", Self::owned_pool, 1)
            .bind("ITEMS", "held_items", Self::held_items_pool, 3)
            .weight(2),
            ObjectiveTemplate::new("Win a match as POKEMON with the following Battle Item: ITEM")
                .bind("POKEMON", "pokemon_pool", Self::owned_pool, 1)
                .bind("ITEM", "battle_items", Self::battle_items_pool, 1)
                .weight(1),
            ObjectiveTemplate::new("Win a match as a Pokémon with the following role: ROLE")
                .bind("ROLE", "roles", Self::roles_pool, 1)
                .weight(2),
            ObjectiveTemplate::new(
                "Win a match as a Pokémon with the ROLE role with all of the following Held Items equipped: ITEMS",
            )
            .bind("ROLE", "roles", Self::roles_pool, 1)
            .bind("ITEMS", "held_items", Self::held_items_pool, 3)
            .difficult(true)
            .weight(1),
        ]
    }

    fn audit(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        for role in Role::ALL {
            for member in role.roster() {
                if !POKEMON.contains(member) {
                    issues.push(CatalogIssue::warning(
                        Self::NAME,
                        role.as_str(),
                        format!("roster entry {member:?} is not a {POKEMON_OWNED} key"),
                    ));
                }
            }
        }
        for key in POKEMON {
            if !Role::ALL.iter().any(|role| role.roster().contains(key)) {
                issues.push(CatalogIssue::warning(
                    Self::NAME,
                    POKEMON_OWNED,
                    format!("{key:?} does not belong to any role roster"),
                ));
            }
        }
        issues
    }
}
