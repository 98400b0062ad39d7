//! How a move landed: effectiveness, blocks, failures, immunities and misses.

use battle_protocol::{Command, Event};

use super::{effect_id, Narration};
use crate::substitute::{Placeholder, Substitutions};
use crate::templates::Candidate;

/// Statuses that read as "already" when they fail to apply again.
const ALREADY_STARTED: [&str; 6] = ["brn", "frz", "par", "psn", "slp", "substitute"];

/// Weather that the primal weathers do not block.
const WEATHER_MOVES: [&str; 4] = ["sunnyday", "raindance", "sandstorm", "hail"];

/// `-crit`, `-supereffective` and `-resisted`
pub(super) fn effectiveness(cx: &Narration<'_>, command: Command, event: &Event) -> String {
    let mut template_id = String::from(match command {
        Command::Crit => "crit",
        Command::SuperEffective => "superEffective",
        _ => "resisted",
    });
    if event.flag("spread") {
        template_id.push_str("Spread");
    }
    Substitutions::new()
        .set(Placeholder::Pokemon, cx.pokemon(event.arg(1)))
        .apply(&cx.template(&template_id, &[]))
}

/// `-block`
pub(super) fn block(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let effect = event.arg(2);
    let of = event.kw("of");
    let line1 = cx.maybe_ability(effect, of.or(pokemon));
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Source, cx.pokemon(event.arg(4).or(of)))
            .set_opt(Placeholder::Move, event.arg(3))
            .apply(&cx.template("block", &[effect.into()]))
}

/// `-fail`
///
/// A blocking effect under `[from]` gets the first say. Otherwise the failed
/// effect picks the line, with `[heavy]`, `[weak]` and `[forme]` overriding
/// in that order.
pub(super) fn fail(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let effect = event.arg(2);
    let from = event.kw("from");
    let id = effect_id(effect);
    let blocker = effect_id(from);
    let line1 = cx.maybe_ability(from, event.kw("of").or(pokemon));

    let block_id = match blocker.as_str() {
        "desolateland" | "primordialsea" if !WEATHER_MOVES.contains(&id.as_str()) => "blockMove",
        "uproar" if event.flag("msg") => "blockSelf",
        _ => "block",
    };
    let template = cx.template(block_id, &[from.into()]);
    if !template.is_empty() {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .apply(&template);
    }

    if id == "unboost" {
        let stat = event.arg(3);
        let template_id = if stat.is_some() { "failSingular" } else { "fail" };
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set_opt(Placeholder::Stat, stat)
                .apply(&cx.template(template_id, &[Candidate::Effect("unboost")]));
    }

    let mut template_id = if ALREADY_STARTED.contains(&id.as_str()) {
        "alreadyStarted"
    } else {
        "fail"
    };
    if event.flag("heavy") {
        template_id = "failTooHeavy";
    }
    if event.flag("weak") {
        template_id = "fail";
    }
    if event.flag("forme") {
        template_id = "failWrongForme";
    }
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .apply(&cx.template(template_id, &[Candidate::Effect(&id)]))
}

/// `-immune`
pub(super) fn immune(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let from = event.kw("from");
    let line1 = cx.maybe_ability(from, event.kw("of").or(pokemon));

    let mut template = cx.template("block", &[from.into()]);
    if template.is_empty() {
        let template_id = match pokemon {
            None => "immuneNoPokemon",
            Some(_) if event.flag("ohko") => "immuneOHKO",
            Some(_) => "immune",
        };
        template = cx.template(template_id, &[from.into()]);
    }
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .apply(&template)
}

/// `-miss`: the attacker comes first, the dodging target second.
pub(super) fn miss(cx: &Narration<'_>, event: &Event) -> String {
    let source = event.arg(1);
    let pokemon = event.arg(2);
    let line1 = cx.maybe_ability(event.kw("from"), event.kw("of").or(pokemon));
    match pokemon {
        None => {
            line1
                + &Substitutions::new()
                    .set(Placeholder::Source, cx.pokemon(source))
                    .apply(&cx.template("missNoPokemon", &[]))
        }
        Some(_) => {
            line1
                + &Substitutions::new()
                    .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                    .apply(&cx.template("miss", &[]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::handle;

    #[test]
    fn test_effectiveness() {
        assert_eq!(handle("|-crit|p2a: Gengar"), "  A critical hit!\n");
        assert_eq!(handle("|-supereffective|p2a: Gengar"), "  It's super effective!\n");
        assert_eq!(handle("|-resisted|p2a: Gengar"), "  It's not very effective...\n");
        assert_eq!(
            handle("|-supereffective|p2a: Gengar|[spread] p2a,p2b"),
            "  It's super effective on the opposing Gengar!\n"
        );
        assert_eq!(handle("|-crit|p1a: Snorlax|[spread]"), "  A critical hit on Snorlax!\n");
    }

    #[test]
    fn test_block_by_ability() {
        assert_eq!(
            handle("|-block|p1a: Snorlax|ability: Damp|Explosion|p2a: Gengar"),
            "  [Snorlax's Damp]\n  the opposing Gengar cannot use Explosion!\n"
        );
        assert_eq!(
            handle("|-block|p1a: Tsareena|ability: Queenly Majesty|Sucker Punch|p2a: Bisharp"),
            "  [Tsareena's Queenly Majesty]\n  the opposing Bisharp cannot use Sucker Punch!\n"
        );
    }

    #[test]
    fn test_block_without_template() {
        assert_eq!(handle("|-block|p1a: Snorlax|move: Mat Block"), "");
    }

    #[test]
    fn test_fail_generic_and_already_started() {
        assert_eq!(handle("|-fail|p1a: Snorlax"), "  But it failed!\n");
        assert_eq!(
            handle("|-fail|p2a: Gengar|par"),
            "  the opposing Gengar is already paralyzed!\n"
        );
        assert_eq!(
            handle("|-fail|p2a: Gengar|psn"),
            "  the opposing Gengar is already poisoned!\n"
        );
        assert_eq!(
            handle("|-fail|p1a: Snorlax|move: Substitute"),
            "  Snorlax already has a substitute!\n"
        );
    }

    #[test]
    fn test_fail_flags_override() {
        assert_eq!(
            handle("|-fail|p1a: Snorlax|move: Substitute|[weak]"),
            "  But it does not have enough HP left to make a substitute!\n"
        );
        assert_eq!(
            handle("|-fail|p2a: Snorlax|move: Sky Drop|[heavy]"),
            "  the opposing Snorlax is too heavy to be lifted!\n"
        );
        assert_eq!(
            handle("|-fail|p1a: Hoopa|move: Hyperspace Fury|[forme]"),
            "  But Hoopa can't use the move in its current forme!\n"
        );
    }

    #[test]
    fn test_fail_unboost() {
        assert_eq!(
            handle("|-fail|p2a: Gengar|unboost|Attack"),
            "  the opposing Gengar's Attack was not lowered!\n"
        );
        assert_eq!(
            handle("|-fail|p2a: Gengar|unboost"),
            "  the opposing Gengar's stats were not lowered!\n"
        );
    }

    #[test]
    fn test_fail_blocked_by_weather() {
        assert_eq!(
            handle("|-fail|p1a: Blastoise|move: Hydro Pump|[from] Desolate Land"),
            "  The Water-type attack evaporated in the extremely harsh sunlight!\n"
        );
        // Weather moves are not blocked, they just fail
        assert_eq!(
            handle("|-fail|p1a: Blastoise|move: Rain Dance|[from] Desolate Land"),
            "  But it failed!\n"
        );
    }

    #[test]
    fn test_fail_blocked_by_uproar() {
        assert_eq!(
            handle("|-fail|p1a: Snorlax|slp|[from] Uproar|[msg]"),
            "  Snorlax can't sleep in an uproar!\n"
        );
    }

    #[test]
    fn test_immune() {
        assert_eq!(handle("|-immune|p2a: Gengar"), "  It doesn't affect the opposing Gengar...\n");
        assert_eq!(handle("|-immune|p2a: Gengar|[ohko]"), "  the opposing Gengar is unaffected!\n");
        assert_eq!(handle("|-immune|"), "  It had no effect!\n");
        assert_eq!(
            handle("|-immune|p2a: Shedinja|[from] ability: Wonder Guard"),
            "  [the opposing Shedinja's Wonder Guard]\n  It doesn't affect the opposing Shedinja...\n"
        );
    }

    #[test]
    fn test_miss() {
        assert_eq!(
            handle("|-miss|p1a: Snorlax|p2a: Gengar"),
            "  the opposing Gengar avoided the attack!\n"
        );
        assert_eq!(handle("|-miss|p1a: Snorlax"), "  Snorlax's attack missed!\n");
    }
}
