//! Event handlers.
//!
//! [`dispatch`] routes each supported command to its handler. Handlers
//! return the text for one event (possibly several lines, possibly empty)
//! and only touch the renderer state for `player` and `gen`.

mod abilities;
mod battle;
mod boosts;
mod effects;
mod field;
mod forms;
mod hp;
mod items;
mod outcome;

use battle_protocol::{parse_effect, side_token, Command, Event, Perspective, Side};

use crate::renderer::RendererState;
use crate::substitute::{Placeholder, Substitutions};
use crate::templates::{Candidate, TemplateStore};

/// Everything a handler may read, plus the mutable renderer state.
pub(crate) struct Narration<'a> {
    pub templates: &'a TemplateStore,
    pub perspective: Perspective,
    pub state: &'a mut RendererState,
}

/// Renders one event whose command is in the supported vocabulary.
pub(crate) fn dispatch(cx: &mut Narration<'_>, command: Command, event: &Event) -> String {
    match command {
        Command::Player => battle::player(cx, event),
        Command::Gen => battle::gen(cx, event),
        Command::Turn => battle::turn(cx, event),
        Command::Start => battle::start(cx),
        Command::Win | Command::Tie => battle::finish(cx, command, event),
        Command::Switch => battle::switch(cx, event),
        Command::Drag => battle::drag(cx, event),
        Command::SwitchOut => battle::switch_out(cx, event),
        Command::Faint => battle::faint(cx, event),
        Command::Swap => battle::swap(cx, event),
        Command::Move => battle::use_move(cx, event),
        Command::Cant => battle::cant(cx, event),
        Command::Message => battle::message(event),
        Command::Hint => battle::hint(event),
        Command::Anim => String::new(),
        Command::Center => cx.template("center", &[]),
        Command::Ohko => cx.template("ohko", &[]),
        Command::Combine => cx.template("combine", &[]),
        Command::NoTarget => cx.template("noTarget", &[]),
        Command::HitCount => battle::hit_count(cx, event),
        Command::Waiting => battle::waiting(cx, event),

        Command::DetailsChange | Command::Transform | Command::FormeChange => {
            forms::change(cx, command, event)
        }
        Command::Mega | Command::Primal => forms::mega(cx, command, event),
        Command::ZPower => forms::z_power(cx, event),
        Command::Burst => forms::burst(cx, event),
        Command::ZBroken => forms::z_broken(cx, event),

        Command::StartEffect => effects::start(cx, event),
        Command::EndEffect => effects::end(cx, event),
        Command::SingleTurn | Command::SingleMove => effects::single(cx, event),
        Command::Activate => effects::activate(cx, event),
        Command::Prepare => effects::prepare(cx, event),
        Command::Status => effects::status(cx, event),
        Command::CureStatus => effects::cure_status(cx, event),
        Command::CureTeam | Command::SetHp => cx.template("activate", &[event.kw("from").into()]),

        Command::Ability => abilities::ability(cx, event),
        Command::EndAbility => abilities::end_ability(cx, event),

        Command::Item => items::item(cx, event),
        Command::EndItem => items::end_item(cx, event),

        Command::SideStart | Command::SideEnd => field::side(cx, command, event),
        Command::Weather => field::weather(cx, event),
        Command::FieldStart | Command::FieldActivate => field::field_begin(cx, command, event),
        Command::FieldEnd => field::field_end(cx, event),

        Command::Damage => hp::damage(cx, event),
        Command::Heal => hp::heal(cx, event),

        Command::Boost | Command::Unboost => boosts::boost(cx, command, event),
        Command::SetBoost => boosts::set_boost(cx, event),
        Command::SwapBoost => boosts::swap_boost(cx, event),
        Command::CopyBoost => boosts::copy_boost(cx, event),
        Command::ClearBoost | Command::ClearPositiveBoost | Command::ClearNegativeBoost => {
            boosts::clear_boost(cx, event)
        }
        Command::InvertBoost => boosts::invert_boost(cx, event),
        Command::ClearAllBoost => cx.template("clearAllBoost", &[event.kw("from").into()]),

        Command::Crit | Command::SuperEffective | Command::Resisted => {
            outcome::effectiveness(cx, command, event)
        }
        Command::Block => outcome::block(cx, event),
        Command::Fail => outcome::fail(cx, event),
        Command::Immune => outcome::immune(cx, event),
        Command::Miss => outcome::miss(cx, event),
    }
}

/// Canonical id of a raw effect reference.
pub(crate) fn effect_id(raw: Option<&str>) -> String {
    parse_effect(raw).id
}

/// True if the raw effect reference names an item.
pub(crate) fn is_item(raw: Option<&str>) -> bool {
    raw.is_some_and(|r| r.starts_with("item:"))
}

impl Narration<'_> {
    /// Resolves a template, most specific candidate first.
    pub fn template(&self, name: &str, candidates: &[Candidate<'_>]) -> String {
        self.templates.resolve(name, candidates)
    }

    fn is_own(&self, side: &str) -> bool {
        side_token(side) == self.perspective.own_side().as_str()
    }

    /// `Own` for the narrated side, `Skip` otherwise.
    pub fn own(&self, side: &str) -> Candidate<'static> {
        if self.is_own(side) {
            Candidate::Own
        } else {
            Candidate::Skip
        }
    }

    /// Nickname part of an identifier such as `p2a: Gengar`.
    pub fn pokemon_name(&self, ident: Option<&str>) -> String {
        let Some(ident) = ident.filter(|i| !i.is_empty()) else {
            return String::new();
        };
        if Side::from_token(ident).is_none() {
            return format!("???pokemon:{ident}???");
        }
        match ident.as_bytes() {
            [_, _, _, b':', ..] => ident[4..].trim().to_string(),
            [_, _, b':', ..] => ident[3..].trim().to_string(),
            _ => format!("???pokemon:{ident}???"),
        }
    }

    /// Perspective-relative noun for a pokemon.
    pub fn pokemon(&self, ident: Option<&str>) -> String {
        let Some(ident) = ident.filter(|i| !i.is_empty()) else {
            return String::new();
        };
        let Some(side) = Side::from_token(ident) else {
            return format!("???pokemon:{ident}???");
        };
        let template = if self.perspective.is_own(side) {
            "pokemon"
        } else {
            "opposingPokemon"
        };
        Substitutions::new()
            .set(Placeholder::Nickname, self.pokemon_name(Some(ident)))
            .apply(self.templates.default_text(template).unwrap_or_default())
    }

    /// Side token and display name (`Sparky (**Talonflame**)`) for a
    /// switch-in.
    pub fn pokemon_full<'e>(&self, ident: &'e str, details: &str) -> (&'e str, String) {
        let nickname = self.pokemon_name(Some(ident));
        let species = details.split(',').next().unwrap_or_default();
        let full = if nickname == species {
            format!("**{species}**")
        } else {
            format!("{nickname} (**{species}**)")
        };
        (side_token(ident), full)
    }

    pub fn trainer(&self, side: &str) -> String {
        let token = side_token(side);
        match Side::from_token(token) {
            Some(Side::P1) => self.state.player1.clone(),
            Some(Side::P2) => self.state.player2.clone(),
            None => format!("???side:{token}???"),
        }
    }

    pub fn team(&self, side: &str) -> String {
        self.own_or_opposing(side, "team", "opposingTeam")
    }

    pub fn party(&self, side: &str) -> String {
        self.own_or_opposing(side, "party", "opposingParty")
    }

    fn own_or_opposing(&self, side: &str, own: &str, opposing: &str) -> String {
        let name = if self.is_own(side) { own } else { opposing };
        self.templates.default_text(name).unwrap_or_default().to_string()
    }

    /// Display name of a raw effect reference.
    pub fn effect(&self, raw: Option<&str>) -> String {
        parse_effect(raw).name
    }

    /// The ability-activation line, empty without an ability name.
    pub fn ability(&self, name: Option<&str>, holder: Option<&str>) -> String {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return String::new();
        };
        let template = self.templates.default_text("abilityActivation").unwrap_or_default();
        let line = Substitutions::new()
            .set(Placeholder::Pokemon, self.pokemon(holder))
            .set(Placeholder::Ability, self.effect(Some(name)))
            .apply(template);
        format!("{line}\n")
    }

    /// The ability-activation line if `effect` is an ability reference.
    pub fn maybe_ability(&self, effect: Option<&str>, holder: Option<&str>) -> String {
        match effect.and_then(|e| e.strip_prefix("ability:")) {
            Some(name) => self.ability(Some(name.trim()), holder),
            None => String::new(),
        }
    }

    /// Localized stat label; `None` means the generic "stats".
    pub fn stat(&self, stat: Option<&str>) -> String {
        let key = stat.filter(|s| !s.is_empty()).unwrap_or("stats");
        match self.templates.get(key, "statName") {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format!("???stat:{}???", stat.unwrap_or_default()),
        }
    }
}

#[cfg(test)]
pub(crate) fn handle(line: &str) -> String {
    handle_as(Perspective::P1, line)
}

/// Handler output for a single protocol line, with a fresh state.
#[cfg(test)]
pub(crate) fn handle_as(perspective: Perspective, line: &str) -> String {
    let event = Event::parse_line(line).expect("protocol line");
    let command = event.known_command().expect("supported command");
    let store = TemplateStore::bundled();
    let mut state = RendererState::default();
    let mut cx = Narration {
        templates: &store,
        perspective,
        state: &mut state,
    };
    dispatch(&mut cx, command, &event)
}
