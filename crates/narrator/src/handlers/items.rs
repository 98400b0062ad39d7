//! Held items: revealed, gained, stolen, consumed and lost.

use battle_protocol::Event;

use super::{effect_id, Narration};
use crate::substitute::{Placeholder, Substitutions};
use crate::templates::Candidate;

const FRISK: &str = "Frisk";
const BUG_BITE: &str = "Bug Bite";

/// `-item`
pub(super) fn item(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let item = event.arg(2);
    let from = event.kw("from");
    let mut of = event.kw("of");
    let id = effect_id(from);

    // Magician and Pickpocket report the victim under [of]
    let mut victim = None;
    if id == "magician" || id == "pickpocket" {
        victim = of.take();
    }
    let line1 = cx.maybe_ability(from, of.or(pokemon));

    match id.as_str() {
        "thief" | "covet" | "bestow" | "magician" | "pickpocket" => {
            line1
                + &Substitutions::new()
                    .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                    .set(Placeholder::Item, cx.effect(item))
                    .set(Placeholder::Source, cx.pokemon(victim.or(of)))
                    .apply(&cx.template("takeItem", &[from.into()]))
        }
        "frisk" => {
            let has_target = matches!((of, pokemon), (Some(of), Some(pokemon)) if of != pokemon);
            let template_id = if has_target { "activate" } else { "activateNoTarget" };
            line1
                + &Substitutions::new()
                    .set(Placeholder::Pokemon, cx.pokemon(of))
                    .set(Placeholder::Item, cx.effect(item))
                    .set(Placeholder::Target, cx.pokemon(pokemon))
                    .apply(&cx.template(template_id, &[Candidate::Effect(FRISK)]))
        }
        _ if from.is_some() => {
            line1
                + &Substitutions::new()
                    .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                    .set(Placeholder::Item, cx.effect(item))
                    .apply(&cx.template("addItem", &[from.into()]))
        }
        _ => {
            line1
                + &Substitutions::new()
                    .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                    .apply(&cx.template("start", &[item.into(), Candidate::NoDefault]))
        }
    }
}

/// `-enditem`
pub(super) fn end_item(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let item = event.arg(2);
    let from = event.kw("from");
    let of = event.kw("of");

    let line1 = cx.maybe_ability(from, of.or(pokemon));

    if event.flag("eat") {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Item, cx.effect(item))
                .apply(&cx.template("eatItem", &[from.into()]));
    }

    match effect_id(from).as_str() {
        "gem" => {
            return line1
                + &Substitutions::new()
                    .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                    .set(Placeholder::Item, cx.effect(item))
                    .set_opt(Placeholder::Move, event.kw("move"))
                    .apply(&cx.template("useGem", &[item.into()]));
        }
        "stealeat" => {
            return line1
                + &Substitutions::new()
                    .set(Placeholder::Source, cx.pokemon(of))
                    .set(Placeholder::Item, cx.effect(item))
                    .apply(&cx.template("removeItem", &[Candidate::Effect(BUG_BITE)]));
        }
        _ => {}
    }

    if from.is_some() {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Item, cx.effect(item))
                .set(Placeholder::Source, cx.pokemon(of))
                .apply(&cx.template("removeItem", &[from.into()]));
    }
    if event.flag("weaken") {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Item, cx.effect(item))
                .apply(&cx.template("activateWeaken", &[]));
    }

    let mut subs = Substitutions::new();
    let mut template = cx.template("end", &[item.into(), Candidate::NoDefault]);
    if template.is_empty() {
        template = cx.template("activateItem", &[]);
        subs = subs.set(Placeholder::Item, cx.effect(item));
    }
    line1
        + &subs
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Target, cx.pokemon(of))
            .apply(&template)
}
