//! Stat stage changes.

use battle_protocol::{Command, Event};

use super::{effect_id, is_item, Narration};
use crate::substitute::{Placeholder, Substitutions};

/// `-boost` and `-unboost`
pub(super) fn boost(cx: &Narration<'_>, command: Command, event: &Event) -> String {
    let pokemon = event.arg(1);
    let from = event.kw("from");
    let mut stat = event.arg(2);
    if stat == Some("spa") && cx.state.generation == 1 {
        stat = Some("spc");
    }
    let amount = event.arg(3).and_then(|n| n.trim().parse::<i64>().ok());
    let line1 = cx.maybe_ability(from, event.kw("of").or(pokemon));

    let mut template_id = String::from(match command {
        Command::Unboost => "unboost",
        _ => "boost",
    });
    match amount {
        Some(n) if n >= 3 => template_id.push('3'),
        Some(2) => template_id.push('2'),
        Some(0) => template_id.push('0'),
        _ => {}
    }

    let nonzero = amount.is_some_and(|n| n != 0);
    if nonzero && event.flag("zeffect") {
        template_id.push_str(if event.flag("multiple") {
            "MultipleFromZEffect"
        } else {
            "FromZEffect"
        });
    } else if nonzero && is_item(from) {
        template_id.push_str("FromItem");
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Stat, cx.stat(stat))
                .set(Placeholder::Item, cx.effect(from))
                .apply(&cx.template(&template_id, &[from.into()]));
    }

    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Stat, cx.stat(stat))
            .apply(&cx.template(&template_id, &[from.into()]))
}

/// `-setboost`, as in Belly Drum maximizing a stat.
pub(super) fn set_boost(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let from = event.kw("from");
    let line1 = cx.maybe_ability(from, event.kw("of").or(pokemon));
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Stat, cx.stat(event.arg(2)))
            .apply(&cx.template("boost", &[from.into()]))
}

pub(super) fn swap_boost(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let from = event.kw("from");
    let line1 = cx.maybe_ability(from, event.kw("of").or(pokemon));
    let template_id = match effect_id(from).as_str() {
        "guardswap" => "swapDefensiveBoost",
        "powerswap" => "swapOffensiveBoost",
        _ => "swapBoost",
    };
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Target, cx.pokemon(event.arg(2)))
            .apply(&cx.template(template_id, &[from.into()]))
}

pub(super) fn copy_boost(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let from = event.kw("from");
    let line1 = cx.maybe_ability(from, event.kw("of").or(pokemon));
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Target, cx.pokemon(event.arg(2)))
            .apply(&cx.template("copyBoost", &[from.into()]))
}

/// `-clearboost`, `-clearpositiveboost` and `-clearnegativeboost`
pub(super) fn clear_boost(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let from = event.kw("from");
    let line1 = cx.maybe_ability(from, event.kw("of").or(pokemon));
    let template_id = if event.flag("zeffect") {
        "clearBoostFromZEffect"
    } else {
        "clearBoost"
    };
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Source, cx.pokemon(event.arg(2)))
            .apply(&cx.template(template_id, &[from.into()]))
}

pub(super) fn invert_boost(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let from = event.kw("from");
    let line1 = cx.maybe_ability(from, event.kw("of").or(pokemon));
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .apply(&cx.template("invertBoost", &[from.into()]))
}
