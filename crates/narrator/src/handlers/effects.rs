//! Volatile effects, activations and major status conditions.

use battle_protocol::Event;

use super::{effect_id, is_item, Narration};
use crate::substitute::{Placeholder, Substitutions};
use crate::templates::Candidate;

/// Moves whose activation message breaks through protection. Without a
/// target, the protocol names the protected pokemon first.
const PROTECTION_BREAKERS: [&str; 5] = [
    "hyperspacefury",
    "hyperspacehole",
    "phantomforce",
    "shadowforce",
    "feint",
];

/// `-start`
pub(super) fn start(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let effect = event.arg(2);
    let arg3 = event.arg(3);
    let from = event.kw("from");
    let of = event.kw("of");

    let mut line1 = cx.maybe_ability(effect, pokemon);
    if line1.is_empty() {
        line1 = cx.maybe_ability(from, of.or(pokemon));
    }

    let id = effect_id(effect);
    if id == "typechange" {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set_opt(Placeholder::Type, arg3)
                .set(Placeholder::Source, cx.pokemon(of))
                .apply(&cx.template("typeChange", &[from.into()]));
    }
    if id == "typeadd" {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set_opt(Placeholder::Type, arg3)
                .apply(&cx.template("typeAdd", &[from.into()]));
    }
    if let Some(count) = id.strip_prefix("stockpile") {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Number, count)
                .apply(&cx.template("start", &[Candidate::Effect("stockpile")]));
    }
    if let Some(count) = id.strip_prefix("perish") {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Number, count)
                .apply(&cx.template("activate", &[Candidate::Effect("perishsong")]));
    }

    // Later flags win
    let mut template_id = "start";
    if event.flag("already") {
        template_id = "alreadyStarted";
    }
    if event.flag("fatigue") {
        template_id = "startFromFatigue";
    }
    if event.flag("zeffect") {
        template_id = "startFromZEffect";
    }
    if event.flag("damage") {
        template_id = "activate";
    }
    if event.flag("block") {
        template_id = "block";
    }
    if event.flag("upkeep") {
        template_id = "upkeep";
    }
    if id == "reflect" || id == "lightscreen" {
        template_id = "startGen1";
    }
    if template_id == "start" && is_item(from) {
        template_id = "startFromItem";
    }

    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Effect, cx.effect(effect))
            .set_opt(Placeholder::Move, arg3)
            .set(Placeholder::Source, cx.pokemon(of))
            .set(Placeholder::Item, cx.effect(from))
            .apply(&cx.template(template_id, &[effect.into()]))
}

/// `-end`
pub(super) fn end(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let effect = event.arg(2);
    let from = event.kw("from");
    let of = event.kw("of");

    let mut line1 = cx.maybe_ability(effect, pokemon);
    if line1.is_empty() {
        line1 = cx.maybe_ability(from, of.or(pokemon));
    }

    // Delayed attacks land on the pokemon named in the event
    let id = effect_id(effect);
    if id == "doomdesire" || id == "futuresight" {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Target, cx.pokemon(pokemon))
                .apply(&cx.template("activate", &[effect.into()]));
    }

    let mut template = String::new();
    if is_item(from) {
        template = cx.template("endFromItem", &[effect.into()]);
    }
    if template.is_empty() {
        template = cx.template("end", &[effect.into()]);
    }
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Effect, cx.effect(effect))
            .set(Placeholder::Source, cx.pokemon(of))
            .set(Placeholder::Item, cx.effect(from))
            .apply(&template)
}

/// `-singleturn` and `-singlemove`
pub(super) fn single(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let effect = event.arg(2);
    let of = event.kw("of");

    let mut line1 = cx.maybe_ability(effect, of.or(pokemon));
    if line1.is_empty() {
        line1 = cx.maybe_ability(event.kw("from"), of.or(pokemon));
    }

    // Instruct names the instructor as the actor
    if effect_id(effect) == "instruct" {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(of))
                .set(Placeholder::Target, cx.pokemon(pokemon))
                .apply(&cx.template("activate", &[effect.into()]));
    }

    let mut subs = Substitutions::new();
    let mut template = cx.template("start", &[effect.into(), Candidate::NoDefault]);
    if template.is_empty() {
        template = cx.template("start", &[]);
        subs = subs.set(Placeholder::Effect, cx.effect(effect));
    }
    line1
        + &subs
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Source, cx.pokemon(of))
            .set(Placeholder::Team, cx.team(pokemon.unwrap_or_default()))
            .apply(&template)
}

/// `-activate`
pub(super) fn activate(cx: &Narration<'_>, event: &Event) -> String {
    let mut pokemon = event.arg(1);
    let effect = event.arg(2);
    let mut target = event.arg(3);
    let of = event.kw("of");
    let id = effect_id(effect);

    if id == "celebrate" {
        return Substitutions::new()
            .set(Placeholder::Trainer, cx.trainer(pokemon.unwrap_or_default()))
            .apply(&cx.template("activate", &[Candidate::Effect("celebrate")]));
    }

    if target.is_none() && PROTECTION_BREAKERS.contains(&id.as_str()) {
        target = pokemon;
        pokemon = of.or(target);
    }
    let target = target.or(of).or(pokemon);

    let mut line1 = cx.maybe_ability(effect, pokemon);

    if id == "lockon" || id == "mindreader" {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(of))
                .set(Placeholder::Source, cx.pokemon(pokemon))
                .apply(&cx.template("start", &[effect.into()]));
    }

    if id == "mummy" {
        line1 += &cx.ability(event.kw("ability"), target);
        line1 += &cx.ability(Some("Mummy"), target);
        return line1
            + &Substitutions::new()
                .set(Placeholder::Target, cx.pokemon(target))
                .apply(&cx.template("changeAbility", &[Candidate::Effect("mummy")]));
    }

    let template_id = if id == "forewarn" && pokemon == target {
        "activateNoTarget"
    } else {
        "activate"
    };
    let template = cx.template(template_id, &[effect.into(), Candidate::NoDefault]);
    if template.is_empty() {
        // Abilities have no generic activation text
        if !line1.is_empty() {
            return line1;
        }
        return Substitutions::new()
            .set(Placeholder::Effect, cx.effect(effect))
            .apply(&cx.template("activate", &[]));
    }

    let mut subs = Substitutions::new();
    if id == "brickbreak" {
        subs = subs.set(Placeholder::Team, cx.team(target.unwrap_or_default()));
    }
    if event.kw("ability").is_some() {
        line1 += &cx.ability(event.kw("ability"), pokemon);
    }
    if event.kw("ability2").is_some() {
        line1 += &cx.ability(event.kw("ability2"), target);
    }
    if event.kw("move").is_some() || event.kw("number").is_some() || event.kw("item").is_some() {
        subs = subs
            .set_opt(Placeholder::Move, event.kw("move"))
            .set_opt(Placeholder::Number, event.kw("number"))
            .set_opt(Placeholder::Item, event.kw("item"));
    }
    line1
        + &subs
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Target, cx.pokemon(target))
            .set(Placeholder::Source, cx.pokemon(of))
            .apply(&template)
}

/// `-prepare`
pub(super) fn prepare(cx: &Narration<'_>, event: &Event) -> String {
    Substitutions::new()
        .set(Placeholder::Pokemon, cx.pokemon(event.arg(1)))
        .set(Placeholder::Target, cx.pokemon(event.arg(3)))
        .apply(&cx.template("prepare", &[event.arg(2).into()]))
}

/// `-status`
pub(super) fn status(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let status = event.arg(2);
    let from = event.kw("from");

    let line1 = cx.maybe_ability(from, event.kw("of").or(pokemon));
    let template_id = if effect_id(from) == "rest" {
        "startFromRest"
    } else {
        "start"
    };
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .apply(&cx.template(template_id, &[status.into()]))
}

/// `-curestatus`
pub(super) fn cure_status(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let status = event.arg(2);
    let from = event.kw("from");

    if effect_id(from) == "naturalcure" {
        return Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .apply(&cx.template("activate", &[from.into()]));
    }

    let line1 = cx.maybe_ability(from, event.kw("of").or(pokemon));
    if is_item(from) {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Item, cx.effect(from))
                .apply(&cx.template("endFromItem", &[status.into()]));
    }
    if event.flag("thaw") {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Move, cx.effect(from))
                .apply(&cx.template("endFromMove", &[status.into()]));
    }

    let mut subs = Substitutions::new();
    let mut template = cx.template("end", &[status.into(), Candidate::NoDefault]);
    if template.is_empty() {
        template = cx.template("end", &[]);
        subs = subs.set_opt(Placeholder::Effect, status);
    }
    line1
        + &subs
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .apply(&template)
}

#[cfg(test)]
mod tests {
    use super::super::handle;

    #[test]
    fn test_start_effect_override() {
        assert_eq!(
            handle("|-start|p2a: Gengar|confusion"),
            "  the opposing Gengar became confused!\n"
        );
        assert_eq!(
            handle("|-start|p2a: Gengar|confusion|[fatigue]"),
            "  the opposing Gengar became confused due to fatigue!\n"
        );
    }

    #[test]
    fn test_start_generic_fills_effect() {
        assert_eq!(
            handle("|-start|p1a: Pidgeot|Smack Down"),
            "  (Smack Down started on Pidgeot!)\n"
        );
    }

    #[test]
    fn test_start_type_change() {
        assert_eq!(
            handle("|-start|p2a: Greninja|typechange|Dark|[from] ability: Protean"),
            "  [the opposing Greninja's Protean]\n  the opposing Greninja transformed into the Dark type!\n"
        );
        assert_eq!(
            handle("|-start|p1a: Pidgeot|typeadd|Grass|[from] move: Forest's Curse"),
            "  Grass type was added to Pidgeot!\n"
        );
    }

    #[test]
    fn test_start_counters() {
        assert_eq!(
            handle("|-start|p1a: Snorlax|stockpile2"),
            "  Snorlax stockpiled 2!\n"
        );
        assert_eq!(
            handle("|-start|p1a: Snorlax|perish1"),
            "  Snorlax's perish count fell to 1.\n"
        );
    }

    #[test]
    fn test_start_from_item_and_already() {
        assert_eq!(
            handle("|-start|p1a: Snorlax|move: Focus Energy|[from] item: Lansat Berry"),
            "  Snorlax used the Lansat Berry to get pumped!\n"
        );
        assert_eq!(
            handle("|-start|p1a: Snorlax|Substitute|[already]"),
            "  Snorlax already has a substitute!\n"
        );
        assert_eq!(
            handle("|-start|p1a: Snorlax|Reflect"),
            "  Snorlax gained armor!\n"
        );
    }

    #[test]
    fn test_end_effect() {
        assert_eq!(
            handle("|-end|p1a: Snorlax|Substitute"),
            "  Snorlax's substitute faded!\n"
        );
        assert_eq!(
            handle("|-end|p1a: Snorlax|confusion|[from] item: Persim Berry"),
            "  Snorlax's Persim Berry snapped it out of its confusion!\n"
        );
        assert_eq!(
            handle("|-end|p1a: Snorlax|Smack Down"),
            "  Snorlax was freed from Smack Down!\n"
        );
    }

    #[test]
    fn test_end_delayed_attack_targets_pokemon() {
        assert_eq!(
            handle("|-end|p2a: Gengar|move: Future Sight"),
            "  the opposing Gengar took the Future Sight attack!\n"
        );
    }

    #[test]
    fn test_single_turn() {
        assert_eq!(
            handle("|-singleturn|p1a: Snorlax|Protect"),
            "  Snorlax protected itself!\n"
        );
        assert_eq!(
            handle("|-singleturn|p1a: Snorlax|move: Roost"),
            "  (Roost started on Snorlax!)\n"
        );
        assert_eq!(
            handle("|-singleturn|p2a: Gengar|move: Instruct|[of] p1a: Oranguru"),
            "  the opposing Gengar followed Oranguru's instructions!\n"
        );
    }

    #[test]
    fn test_activate_celebrate() {
        assert_eq!(
            handle("|-activate|p2a: Eevee|move: Celebrate"),
            "  Congratulations, Player 2!\n"
        );
    }

    #[test]
    fn test_activate_breaker_swaps_roles() {
        assert_eq!(
            handle("|-activate|p1a: Snorlax|move: Feint|[of] p2a: Gengar"),
            "  Snorlax fell for the feint!\n"
        );
    }

    #[test]
    fn test_activate_lock_on() {
        assert_eq!(
            handle("|-activate|p1a: Magnezone|move: Lock-On|[of] p2a: Gengar"),
            "  Magnezone took aim at the opposing Gengar!\n"
        );
    }

    #[test]
    fn test_activate_mummy() {
        assert_eq!(
            handle("|-activate|p2a: Cofagrigus|ability: Mummy|[of] p1a: Gengar|[ability] Levitate"),
            "  [the opposing Cofagrigus's Mummy]\n  [Gengar's Levitate]\n  [Gengar's Mummy]\n  Gengar's Ability became Mummy!\n"
        );
    }

    #[test]
    fn test_activate_forewarn() {
        assert_eq!(
            handle("|-activate|p1a: Hypno|ability: Forewarn|p1a: Hypno|[move] Earthquake"),
            "  [Hypno's Forewarn]\n  Hypno's Forewarn alerts it to Earthquake!\n"
        );
        assert_eq!(
            handle("|-activate|p1a: Hypno|ability: Forewarn|p2a: Gengar|[move] Shadow Ball"),
            "  [Hypno's Forewarn]\n  the opposing Gengar's Shadow Ball was revealed!\n"
        );
    }

    #[test]
    fn test_activate_ability_without_template() {
        assert_eq!(
            handle("|-activate|p2a: Gengar|ability: Cursed Body"),
            "  [the opposing Gengar's Cursed Body]\n"
        );
    }

    #[test]
    fn test_activate_generic() {
        assert_eq!(
            handle("|-activate|p1a: Snorlax|move: Grudge"),
            "  (Grudge activated!)\n"
        );
    }

    #[test]
    fn test_activate_brick_break_team() {
        assert_eq!(
            handle("|-activate|p1a: Machamp|move: Brick Break|p2a: Gengar"),
            "  Machamp shattered the opposing team's protections!\n"
        );
    }

    #[test]
    fn test_activate_confusion() {
        assert_eq!(
            handle("|-activate|p2a: Gengar|confusion"),
            "  the opposing Gengar is confused!\n"
        );
    }

    #[test]
    fn test_prepare() {
        assert_eq!(
            handle("|-prepare|p1a: Venusaur|Solar Beam"),
            "  Venusaur absorbed light!\n"
        );
    }

    #[test]
    fn test_status() {
        assert_eq!(handle("|-status|p2a: Sparky|brn"), "  the opposing Sparky was burned!\n");
        assert_eq!(
            handle("|-status|p1a: Snorlax|slp|[from] move: Rest"),
            "  Snorlax slept and became healthy!\n"
        );
        assert_eq!(
            handle("|-status|p2a: Gengar|psn|[from] ability: Poison Point|[of] p1a: Nidoking"),
            "  [Nidoking's Poison Point]\n  the opposing Gengar was poisoned!\n"
        );
    }

    #[test]
    fn test_cure_status() {
        assert_eq!(
            handle("|-curestatus|p1a: Chansey|psn|[from] ability: Natural Cure"),
            "  (Chansey is cured by its Natural Cure!)\n"
        );
        assert_eq!(
            handle("|-curestatus|p1a: Snorlax|par|[from] item: Lum Berry"),
            "  Snorlax's Lum Berry cured its paralysis!\n"
        );
        assert_eq!(
            handle("|-curestatus|p1a: Snorlax|frz|[from] move: Scald|[thaw]"),
            "  Snorlax's Scald melted the ice!\n"
        );
        assert_eq!(handle("|-curestatus|p1a: Snorlax|slp"), "  Snorlax woke up!\n");
        assert_eq!(
            handle("|-curestatus|p1a: Snorlax|tox"),
            "  Snorlax was cured of its poisoning.\n"
        );
    }

    #[test]
    fn test_cure_status_unknown_status() {
        assert_eq!(
            handle("|-curestatus|p1a: Snorlax|xyz"),
            "  Snorlax was freed from xyz!\n"
        );
    }

    #[test]
    fn test_cure_team_and_sethp() {
        assert_eq!(
            handle("|-cureteam|p1a: Blissey|[from] move: Heal Bell"),
            "  A bell chimed!\n"
        );
        assert_eq!(
            handle("|-sethp|p2a: Gengar|50/100|[from] move: Pain Split"),
            "  The battlers shared their pain!\n"
        );
    }
}
