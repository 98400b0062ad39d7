//! Weather, terrain and other conditions on a side or the whole field.

use battle_protocol::{Command, Event};

use super::{effect_id, Narration};
use crate::substitute::{Placeholder, Substitutions};
use crate::templates::Candidate;

/// `-sidestart` and `-sideend`
pub(super) fn side(cx: &Narration<'_>, command: Command, event: &Event) -> String {
    let side = event.arg(1).unwrap_or_default();
    let effect = event.arg(2);
    let (name, generic) = match command {
        Command::SideEnd => ("end", "endTeamEffect"),
        _ => ("start", "startTeamEffect"),
    };

    let mut template = cx.template(name, &[effect.into(), Candidate::NoDefault]);
    if template.is_empty() {
        template = Substitutions::new()
            .set(Placeholder::Effect, cx.effect(effect))
            .apply(&cx.template(generic, &[]));
    }
    Substitutions::new()
        .set(Placeholder::Team, cx.team(side))
        .set(Placeholder::Party, cx.party(side))
        .apply(&template)
}

/// `-weather`
pub(super) fn weather(cx: &Narration<'_>, event: &Event) -> String {
    let from = event.kw("from");
    let weather = event.arg(1).unwrap_or_default();

    if weather.is_empty() || weather == "none" {
        let template = cx.template("end", &[from.into(), Candidate::NoDefault]);
        if !template.is_empty() {
            return template;
        }
        return Substitutions::new()
            .set(Placeholder::Effect, cx.effect(Some(weather)))
            .apply(&cx.template("endFieldEffect", &[]));
    }

    if event.flag("upkeep") {
        return cx.template("upkeep", &[weather.into(), Candidate::NoDefault]);
    }

    let line1 = cx.maybe_ability(from, event.kw("of"));
    let mut template = cx.template("start", &[weather.into(), Candidate::NoDefault]);
    if template.is_empty() {
        template = Substitutions::new()
            .set(Placeholder::Effect, cx.effect(Some(weather)))
            .apply(&cx.template("startFieldEffect", &[]));
    }
    line1 + &template
}

/// `-fieldstart` and `-fieldactivate`
pub(super) fn field_begin(cx: &Narration<'_>, command: Command, event: &Event) -> String {
    let effect = event.arg(1);
    let of = event.kw("of");
    let line1 = cx.maybe_ability(event.kw("from"), of);

    let name = if command == Command::FieldActivate && effect_id(effect) != "perishsong" {
        "activate"
    } else {
        "start"
    };
    let mut template = cx.template(name, &[effect.into(), Candidate::NoDefault]);
    if template.is_empty() {
        template = Substitutions::new()
            .set(Placeholder::Effect, cx.effect(effect))
            .apply(&cx.template("startFieldEffect", &[]));
    }
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(of))
            .apply(&template)
}

/// `-fieldend`
pub(super) fn field_end(cx: &Narration<'_>, event: &Event) -> String {
    let effect = event.arg(1);
    let template = cx.template("end", &[effect.into(), Candidate::NoDefault]);
    if !template.is_empty() {
        return template;
    }
    Substitutions::new()
        .set(Placeholder::Effect, cx.effect(effect))
        .apply(&cx.template("endFieldEffect", &[]))
}
