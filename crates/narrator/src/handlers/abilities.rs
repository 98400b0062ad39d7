//! Ability reveals, changes and suppression.

use battle_protocol::{Event, Side};

use super::{effect_id, Narration};
use crate::substitute::{Placeholder, Substitutions};
use crate::templates::Candidate;

const GASTRO_ACID: &str = "Gastro Acid";

/// `-ability`
pub(super) fn ability(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let ability = event.arg(2);
    let mut old_ability = event.arg(3);
    let mut side_arg = event.arg(4);
    let from = event.kw("from");

    // Some simulators put the affected side (or `boost`) where the old
    // ability would be
    if let Some(old) = old_ability {
        if Side::from_token(old).is_some() || old == "boost" {
            side_arg = Some(old);
            old_ability = None;
        }
    }

    let mut line1 = cx.ability(old_ability, pokemon);
    line1 += &cx.ability(ability, pokemon);

    if event.flag("fail") {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .apply(&cx.template("block", &[from.into()]));
    }
    if from.is_some() {
        let line1 = cx.maybe_ability(from, pokemon) + &line1;
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Ability, cx.effect(ability))
                .set(Placeholder::Source, cx.pokemon(event.kw("of")))
                .apply(&cx.template("changeAbility", &[from.into()]));
    }

    let id = effect_id(ability);
    if id == "unnerve" {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Team, cx.team(side_arg.unwrap_or_default()))
                .apply(&cx.template("start", &[ability.into()]));
    }
    let template_id = match id.as_str() {
        "anticipation" | "sturdy" => "activate",
        _ => "start",
    };
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .apply(&cx.template(template_id, &[ability.into(), Candidate::NoDefault]))
}

/// `-endability`. Without a named ability this is Gastro Acid.
pub(super) fn end_ability(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    if let Some(ability) = event.arg(2) {
        return cx.ability(Some(ability), pokemon);
    }
    let line1 = cx.maybe_ability(event.kw("from"), event.kw("of").or(pokemon));
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .apply(&cx.template("start", &[Candidate::Effect(GASTRO_ACID)]))
}
