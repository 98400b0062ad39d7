//! Forme changes, transformation, Mega Evolution and Z-Power.

use battle_protocol::{to_id, Command, Event};

use super::Narration;
use crate::substitute::{Placeholder, Substitutions};
use crate::templates::Candidate;

const ULTRANECROZIUM_Z: &str = "Ultranecrozium Z";

/// The effect (and template) behind a forme change into `species_id`.
fn forme_effect(species_id: &str) -> Option<(&'static str, &'static str)> {
    let effect = match species_id {
        "greninjaash" => ("battlebond", "transform"),
        "mimikyubusted" => ("disguise", "transform"),
        "zygardecomplete" => ("powerconstruct", "transform"),
        "necrozmaultra" => ("ultranecroziumz", "transform"),
        "darmanitanzen" | "darmanitangalarzen" => ("zenmode", "transform"),
        "darmanitan" | "darmanitangalar" => ("zenmode", "transformEnd"),
        "aegislashblade" => ("stancechange", "transform"),
        "aegislash" => ("stancechange", "transformEnd"),
        "wishiwashischool" => ("schooling", "transform"),
        "wishiwashi" => ("schooling", "transformEnd"),
        "miniormeteor" => ("shieldsdown", "transform"),
        "minior" => ("shieldsdown", "transformEnd"),
        "eiscuenoice" => ("iceface", "transform"),
        "eiscue" => ("iceface", "transformEnd"),
        _ => return None,
    };
    Some(effect)
}

/// `detailschange`, `-transform` and `-formechange`
///
/// Only changes with an effect-specific template are narrated, unless the
/// event carries `[msg]`.
pub(super) fn change(cx: &Narration<'_>, command: Command, event: &Event) -> String {
    let pokemon = event.arg(1);
    let species = match command {
        Command::DetailsChange => event
            .arg(2)
            .and_then(|details| details.split(',').next())
            .map(str::trim),
        Command::Transform => event.arg(3),
        _ => event.arg(2),
    }
    .unwrap_or_default();

    let (effect, template_name) = if command == Command::Transform {
        (if species.is_empty() { "" } else { "transform" }, "transform")
    } else {
        forme_effect(&to_id(species)).unwrap_or(("", "transform"))
    };

    let fallback = if event.flag("msg") {
        Candidate::Skip
    } else {
        Candidate::NoDefault
    };
    let template = cx.template(template_name, &[effect.into(), fallback]);
    let line1 = cx.maybe_ability(event.kw("from"), event.kw("of").or(pokemon));
    line1
        + &Substitutions::new()
            .set(Placeholder::Pokemon, cx.pokemon(pokemon))
            .set(Placeholder::Species, species)
            .apply(&template)
}

/// `-mega` and `-primal`
pub(super) fn mega(cx: &Narration<'_>, command: Command, event: &Event) -> String {
    let pokemon = event.arg(1);
    let species = event.arg(2);
    let item = event.arg(3);
    let is_mega = command == Command::Mega;

    let mut effect = "";
    let mut template_id = if is_mega { "mega" } else { "primal" };
    if species == Some("Rayquaza") {
        effect = "dragonascent";
        template_id = "megaNoItem";
    }
    if effect.is_empty() && is_mega && cx.state.generation < 7 {
        template_id = "megaGen6";
    }
    if item.is_none() && is_mega {
        template_id = "megaNoItem";
    }

    let pokemon_name = cx.pokemon(pokemon);
    let mut template = cx.template(template_id, &[effect.into()]);
    if is_mega {
        template += &Substitutions::new()
            .set(Placeholder::Pokemon, pokemon_name.as_str())
            .set_opt(Placeholder::Species, species)
            .apply(&cx.template("transformMega", &[]));
    }
    Substitutions::new()
        .set(Placeholder::Pokemon, pokemon_name)
        .set_opt(Placeholder::Item, item)
        .set(Placeholder::Trainer, cx.trainer(pokemon.unwrap_or_default()))
        .apply(&template)
}

pub(super) fn z_power(cx: &Narration<'_>, event: &Event) -> String {
    Substitutions::new()
        .set(Placeholder::Pokemon, cx.pokemon(event.arg(1)))
        .apply(&cx.template("zPower", &[]))
}

/// `-burst`: Ultra Burst.
pub(super) fn burst(cx: &Narration<'_>, event: &Event) -> String {
    Substitutions::new()
        .set(Placeholder::Pokemon, cx.pokemon(event.arg(1)))
        .apply(&cx.template("activate", &[Candidate::Effect(ULTRANECROZIUM_Z)]))
}

pub(super) fn z_broken(cx: &Narration<'_>, event: &Event) -> String {
    Substitutions::new()
        .set(Placeholder::Pokemon, cx.pokemon(event.arg(1)))
        .apply(&cx.template("zBroken", &[]))
}
