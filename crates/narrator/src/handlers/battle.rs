//! Battle flow: players, turns, switching, moves and the final result.

use battle_protocol::{Command, Event};

use super::Narration;
use crate::substitute::{Placeholder, Substitutions};
use crate::templates::Candidate;

/// Water Pledge waits for its partner's move.
const WATER_PLEDGE: &str = "Water Pledge";

pub(super) fn player(cx: &mut Narration<'_>, event: &Event) -> String {
    match (event.arg(1), event.arg(2)) {
        (Some("p1"), Some(name)) => cx.state.player1 = name.to_string(),
        (Some("p2"), Some(name)) => cx.state.player2 = name.to_string(),
        _ => {}
    }
    String::new()
}

pub(super) fn gen(cx: &mut Narration<'_>, event: &Event) -> String {
    match event.arg(1).map(|g| g.trim().parse::<u8>()) {
        Some(Ok(generation)) => cx.state.generation = generation,
        _ => tracing::warn!(
            "Ignoring gen event with bad generation {:?}",
            event.arg(1).unwrap_or_default()
        ),
    }
    String::new()
}

pub(super) fn turn(cx: &Narration<'_>, event: &Event) -> String {
    let line = Substitutions::new()
        .set_opt(Placeholder::Number, event.arg(1))
        .apply(&cx.template("turn", &[]));
    format!("{line}\n")
}

pub(super) fn start(cx: &Narration<'_>) -> String {
    Substitutions::new()
        .set(Placeholder::Trainer, cx.state.player1.as_str())
        .set(Placeholder::Trainer, cx.state.player2.as_str())
        .apply(&cx.template("startBattle", &[]))
}

/// `win` and `tie`. A win without a name reads as a tie.
pub(super) fn finish(cx: &Narration<'_>, command: Command, event: &Event) -> String {
    match event.arg(1) {
        Some(winner) if command == Command::Win => Substitutions::new()
            .set(Placeholder::Trainer, winner)
            .apply(&cx.template("winBattle", &[])),
        _ => Substitutions::new()
            .set(Placeholder::Trainer, cx.state.player1.as_str())
            .set(Placeholder::Trainer, cx.state.player2.as_str())
            .apply(&cx.template("tieBattle", &[])),
    }
}

pub(super) fn switch(cx: &Narration<'_>, event: &Event) -> String {
    let (side, fullname) = cx.pokemon_full(
        event.arg(1).unwrap_or_default(),
        event.arg(2).unwrap_or_default(),
    );
    Substitutions::new()
        .set(Placeholder::Trainer, cx.trainer(side))
        .set(Placeholder::FullName, fullname)
        .apply(&cx.template("switchIn", &[cx.own(side)]))
}

pub(super) fn drag(cx: &Narration<'_>, event: &Event) -> String {
    let (side, fullname) = cx.pokemon_full(
        event.arg(1).unwrap_or_default(),
        event.arg(2).unwrap_or_default(),
    );
    Substitutions::new()
        .set(Placeholder::Trainer, cx.trainer(side))
        .set(Placeholder::FullName, fullname)
        .apply(&cx.template("drag", &[]))
}

pub(super) fn switch_out(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let side = pokemon.unwrap_or_default();
    let template = cx.template("switchOut", &[event.kw("from").into(), cx.own(side)]);
    Substitutions::new()
        .set(Placeholder::Trainer, cx.trainer(side))
        .set(Placeholder::Nickname, cx.pokemon_name(pokemon))
        .set(Placeholder::Pokemon, cx.pokemon(pokemon))
        .apply(&template)
}

pub(super) fn faint(cx: &Narration<'_>, event: &Event) -> String {
    Substitutions::new()
        .set(Placeholder::Pokemon, cx.pokemon(event.arg(1)))
        .apply(&cx.template("faint", &[]))
}

/// A missing or numeric target means the pokemon moved to the center slot.
pub(super) fn swap(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let target = event.arg(2).filter(|t| !is_numeric(t));
    match target {
        None => Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .apply(&cx.template("swapCenter", &[])),
        Some(target) => Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Target, cx.pokemon(Some(target)))
            .apply(&cx.template("swap", &[])),
    }
}

fn is_numeric(s: &str) -> bool {
    s.trim().parse::<f64>().is_ok_and(|n| !n.is_nan())
}

pub(super) fn use_move(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let from = event.kw("from");
    let line1 = if event.flag("zeffect") {
        Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .apply(&cx.template("zEffect", &[]))
    } else {
        cx.maybe_ability(from, event.kw("of").or(pokemon))
    };
    let line2 = Substitutions::new()
        .set(Placeholder::Pokemon, cx.pokemon(pokemon))
        .set_opt(Placeholder::Move, event.arg(2))
        .apply(&cx.template("move", &[from.into()]));
    line1 + &line2
}

pub(super) fn cant(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let effect = event.arg(2);
    let mv = event.arg(3);

    let mut template = cx.template("cant", &[effect.into(), Candidate::NoDefault]);
    if template.is_empty() {
        template = cx.template(if mv.is_some() { "cant" } else { "cantNoMove" }, &[]);
    }
    let line1 = cx.maybe_ability(effect, event.kw("of").or(pokemon));
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set_opt(Placeholder::Move, mv)
            .apply(&template)
}

pub(super) fn message(event: &Event) -> String {
    event.arg(1).map(|m| format!("{m}\n")).unwrap_or_default()
}

pub(super) fn hint(event: &Event) -> String {
    event.arg(1).map(|m| format!("  ({m})\n")).unwrap_or_default()
}

pub(super) fn hit_count(cx: &Narration<'_>, event: &Event) -> String {
    match event.arg(2) {
        Some("1") => cx.template("hitCountSingular", &[]),
        count => Substitutions::new()
            .set_opt(Placeholder::Number, count)
            .apply(&cx.template("hitCount", &[])),
    }
}

pub(super) fn waiting(cx: &Narration<'_>, event: &Event) -> String {
    Substitutions::new()
        .set(Placeholder::Pokemon, cx.pokemon(event.arg(1)))
        .set(Placeholder::Target, cx.pokemon(event.arg(2)))
        .apply(&cx.template("activate", &[Candidate::Effect(WATER_PLEDGE)]))
}
