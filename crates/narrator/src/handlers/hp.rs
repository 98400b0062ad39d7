//! Damage and healing.

use battle_protocol::Event;

use super::{effect_id, is_item, Narration};
use crate::substitute::{Placeholder, Substitutions};
use crate::templates::Candidate;

/// Moves that count as partial trapping without the explicit flag.
const PARTIAL_TRAPPING: [&str; 2] = ["bind", "wrap"];

/// `-damage`
///
/// An override for the source effect wins, then an item source, then a
/// partial-trapping move. Everything else falls back to the generic line,
/// which quotes the reported health when there is one.
pub(super) fn damage(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let from = event.kw("from");
    let of = event.kw("of");
    let line1 = cx.maybe_ability(from, of.or(pokemon));

    let template = cx.template("damage", &[from.into(), Candidate::NoDefault]);
    if !template.is_empty() {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .apply(&template);
    }

    if is_item(from) {
        let template_id = if of.is_some() { "damageFromPokemon" } else { "damageFromItem" };
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Item, cx.effect(from))
                .set(Placeholder::Source, cx.pokemon(of))
                .apply(&cx.template(template_id, &[]));
    }

    let id = effect_id(from);
    if event.flag("partiallytrapped") || PARTIAL_TRAPPING.contains(&id.as_str()) {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Move, cx.effect(from))
                .apply(&cx.template("damageFromPartialTrapping", &[]));
    }

    let percentage = event.arg(3).or(event.arg(2));
    let template_id = if percentage.is_some() { "damagePercentage" } else { "damage" };
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set_opt(Placeholder::Percentage, percentage)
            .apply(&cx.template(template_id, &[]))
}

/// `-heal`
pub(super) fn heal(cx: &Narration<'_>, event: &Event) -> String {
    let pokemon = event.arg(1);
    let from = event.kw("from");
    let line1 = cx.maybe_ability(from, pokemon);

    let template = cx.template("heal", &[from.into(), Candidate::NoDefault]);
    if !template.is_empty() {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Source, cx.pokemon(event.kw("of")))
                .set_opt(Placeholder::Nickname, event.kw("wisher"))
                .apply(&template);
    }

    if from.is_some_and(|f| !f.starts_with("ability:")) {
        return line1
            + &Substitutions::new()
                .set(Placeholder::Pokemon, cx.pokemon(pokemon))
                .set(Placeholder::Effect, cx.effect(from))
                .apply(&cx.template("healFromEffect", &[]));
    }

    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .apply(&cx.template("heal", &[]))
}

#[cfg(test)]
mod tests {
    use super::super::handle;

    #[test]
    fn test_damage_override() {
        assert_eq!(
            handle("|-damage|p2a: Gengar|88/100|[from] psn"),
            "  the opposing Gengar was hurt by poison!\n"
        );
        assert_eq!(
            handle("|-damage|p1a: Snorlax|88/100|[from] tox"),
            "  Snorlax was hurt by poison!\n"
        );
        assert_eq!(
            handle("|-damage|p1a: Snorlax|90/100|[from] item: Life Orb"),
            "  Snorlax lost some of its HP!\n"
        );
    }

    #[test]
    fn test_damage_from_ability_prepends_activation() {
        assert_eq!(
            handle("|-damage|p1a: Snorlax|80/100|[from] ability: Rough Skin|[of] p2a: Garchomp"),
            "  [the opposing Garchomp's Rough Skin]\n  Snorlax was hurt!\n"
        );
    }

    #[test]
    fn test_damage_from_item() {
        assert_eq!(
            handle("|-damage|p1a: Snorlax|80/100|[from] item: Sticky Barb"),
            "  Snorlax is hurt by its Sticky Barb!\n"
        );
        assert_eq!(
            handle("|-damage|p1a: Snorlax|80/100|[from] item: Jaboca Berry|[of] p2a: Gengar"),
            "  Snorlax is hurt by the opposing Gengar's Jaboca Berry!\n"
        );
    }

    #[test]
    fn test_damage_partial_trapping() {
        assert_eq!(
            handle("|-damage|p1a: Snorlax|80/100|[from] move: Fire Spin|[partiallytrapped]"),
            "  Snorlax is hurt by Fire Spin!\n"
        );
        assert_eq!(
            handle("|-damage|p1a: Snorlax|80/100|[from] Bind"),
            "  Snorlax is hurt by Bind!\n"
        );
    }

    #[test]
    fn test_damage_without_override_uses_percentage() {
        assert_eq!(
            handle("|-damage|p2a: Gengar|50/100|[from] move: Stealth Rock"),
            "  (the opposing Gengar lost 50/100 of its health!)\n"
        );
        assert_eq!(
            handle("|-damage|p2a: Gengar|50/100"),
            "  (the opposing Gengar lost 50/100 of its health!)\n"
        );
        assert_eq!(handle("|-damage|p2a: Gengar"), "  (the opposing Gengar was hurt!)\n");
    }

    #[test]
    fn test_heal_override() {
        assert_eq!(
            handle("|-heal|p1a: Snorlax|100/100|[from] item: Leftovers"),
            "  Snorlax restored a little HP using its Leftovers!\n"
        );
        assert_eq!(
            handle("|-heal|p1a: Snorlax|100/100|[from] item: Black Sludge"),
            "  Snorlax restored a little HP using its Leftovers!\n"
        );
        assert_eq!(
            handle("|-heal|p2a: Gengar|60/100|[from] drain|[of] p1a: Snorlax"),
            "  Snorlax had its energy drained!\n"
        );
        assert_eq!(
            handle("|-heal|p1a: Snorlax|100/100|[from] move: Wish|[wisher] Jirachi"),
            "  Jirachi's wish came true!\n"
        );
    }

    #[test]
    fn test_heal_from_effect() {
        assert_eq!(
            handle("|-heal|p1a: Snorlax|100/100|[from] item: Shell Bell"),
            "  Snorlax restored HP using its Shell Bell!\n"
        );
    }

    #[test]
    fn test_heal_from_ability_and_plain() {
        assert_eq!(
            handle("|-heal|p1a: Quagsire|100/100|[from] ability: Water Absorb"),
            "  [Quagsire's Water Absorb]\n  Quagsire had its HP restored.\n"
        );
        assert_eq!(handle("|-heal|p1a: Snorlax|100/100"), "  Snorlax had its HP restored.\n");
    }
}
