use std::collections::BTreeSet;
use std::hash::Hasher;

use keymaster_games::{
    Game, GameOptions, PokemonPinballRsGame, PokemonPinballRsOptions, PokemonUniteGame,
    PokemonUniteOptions, Provider, ResolvedTemplate, Severity, ValuePool, audit_provider, entries,
    has_errors, label_tokens, providers,
};
use twox_hash::XxHash64;

fn catalog_fingerprint(provider: &dyn Provider) -> u64 {
    let snapshot: (Vec<ResolvedTemplate>, Vec<ResolvedTemplate>) =
        (provider.objectives(), provider.constraints());
    let canonical = serde_json::to_string(&snapshot).unwrap();
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(canonical.as_bytes());
    hasher.finish()
}

#[test]
fn label_tokens_and_bindings_agree_for_every_template() {
    for provider in providers().unwrap() {
        for template in provider.objectives().iter().chain(&provider.constraints()) {
            let tokens: BTreeSet<&str> = label_tokens(&template.label).into_iter().collect();
            let bound: BTreeSet<&str> =
                template.bindings.iter().map(|b| b.token.as_str()).collect();
            assert_eq!(
                tokens,
                bound,
                "{}: \"{}\" tokens and bindings differ",
                provider.name(),
                template.label
            );
            assert!(template.weight > 0, "{} has weight 0", template.label);
        }
    }
}

#[test]
fn default_catalogs_have_no_audit_errors() {
    for provider in providers().unwrap() {
        let issues = audit_provider(provider.as_ref());
        assert!(
            !has_errors(&issues),
            "{} has catalog errors: {issues:#?}",
            provider.name()
        );
    }
}

#[test]
fn only_unite_reports_roster_warnings() {
    for provider in providers().unwrap() {
        let warnings = audit_provider(provider.as_ref())
            .into_iter()
            .filter(|i| i.severity == Severity::Warning)
            .count();
        if provider.name() == PokemonUniteGame::NAME {
            assert_eq!(warnings, 7);
        } else {
            assert_eq!(warnings, 0);
        }
    }
}

#[test]
fn catalogs_are_deterministic_across_builds() {
    for entry in entries() {
        let first = entry.build(None).unwrap();
        let second = entry.build(None).unwrap();
        assert_eq!(
            catalog_fingerprint(first.as_ref()),
            catalog_fingerprint(second.as_ref()),
            "{} catalog changed between builds",
            entry.name
        );
        assert_eq!(first.objectives(), first.objectives());
    }
}

#[test]
fn rare_spawn_toggle_changes_pinball_catalog() {
    let common = PokemonPinballRsGame::default();
    let rare = PokemonPinballRsGame::from_options(PokemonPinballRsOptions {
        include_rare_spawns: true,
    });
    assert_ne!(catalog_fingerprint(&common), catalog_fingerprint(&rare));
}

#[test]
fn static_pools_repeat_exactly() {
    let game = PokemonPinballRsGame::default();
    for template in game.game_objective_templates() {
        for binding in &template.bindings {
            assert_eq!(binding.resolve(&game), binding.resolve(&game));
        }
    }
    assert_eq!(PokemonPinballRsGame::balls(), [" Great", "n Ultra", " Master"]);
    assert_eq!(PokemonPinballRsGame::tables(), ["Ruby", "Sapphire"]);
    assert_eq!(PokemonPinballRsGame::score_goal().len(), 9);
    assert!(!ValuePool::from_static(PokemonPinballRsGame::score_goal()).has_duplicates());
    assert!(!ValuePool::from_static(PokemonUniteGame::held_items()).has_duplicates());
    assert!(!ValuePool::from_static(PokemonUniteGame::battle_items()).has_duplicates());
}

#[test]
fn provider_metadata_matches_host_registration() {
    let pinball = PokemonPinballRsGame::default();
    assert_eq!(pinball.name(), "Pokémon Pinball: Ruby & Sapphire");
    assert_eq!(pinball.platforms_other().len(), 1);
    assert!(!pinball.is_adult_only_or_unrated());

    let unite = PokemonUniteGame::default();
    assert_eq!(unite.platform().as_str(), "SW");
    assert_eq!(
        unite
            .platforms_other()
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>(),
        vec!["AND", "IOS"]
    );
    assert_eq!(unite.option_declarations()[0].key, "pokemon_unite_pokemon_owned");
}

#[test]
fn options_snapshots_reload_through_from_json() {
    let rare = PokemonPinballRsGame::from_options(PokemonPinballRsOptions {
        include_rare_spawns: true,
    });
    let snapshot = rare.options_json();
    assert!(snapshot.is_object());
    let reloaded = PokemonPinballRsOptions::from_json(&snapshot.to_string()).unwrap();
    assert_eq!(&reloaded, rare.options());

    let unite = PokemonUniteGame::default();
    let snapshot = unite.options_json();
    let reloaded = PokemonUniteOptions::from_json(&snapshot.to_string()).unwrap();
    assert_eq!(reloaded.pokemon_owned, unite.options().pokemon_owned);
}
