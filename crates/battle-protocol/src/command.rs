//! Command vocabulary
//!
//! The closed set of protocol commands the narrator knows how to render.
//! Anything outside this set parses to `None` and is ignored downstream.

use std::fmt;

macro_rules! commands {
    ($($variant:ident => $wire:literal,)+) => {
        /// A supported protocol command.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Command {
            $($variant,)+
        }

        impl Command {
            /// Returns every supported command.
            pub fn all() -> &'static [Command] {
                &[$(Command::$variant,)+]
            }

            /// The command as written on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Command::$variant => $wire,)+
                }
            }

            /// Resolves a wire command name, `None` if unsupported.
            pub fn parse(name: &str) -> Option<Command> {
                match name {
                    $($wire => Some(Command::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

commands! {
    Player => "player",
    Gen => "gen",
    Turn => "turn",
    Start => "start",
    Win => "win",
    Tie => "tie",
    Switch => "switch",
    Drag => "drag",
    DetailsChange => "detailschange",
    Transform => "-transform",
    FormeChange => "-formechange",
    SwitchOut => "switchout",
    Faint => "faint",
    Swap => "swap",
    Move => "move",
    Cant => "cant",
    StartEffect => "-start",
    EndEffect => "-end",
    Ability => "-ability",
    EndAbility => "-endability",
    Item => "-item",
    EndItem => "-enditem",
    Status => "-status",
    CureStatus => "-curestatus",
    CureTeam => "-cureteam",
    SingleTurn => "-singleturn",
    SingleMove => "-singlemove",
    SideStart => "-sidestart",
    SideEnd => "-sideend",
    Weather => "-weather",
    FieldStart => "-fieldstart",
    FieldActivate => "-fieldactivate",
    FieldEnd => "-fieldend",
    SetHp => "-sethp",
    Message => "-message",
    Hint => "-hint",
    Activate => "-activate",
    Prepare => "-prepare",
    Damage => "-damage",
    Heal => "-heal",
    Boost => "-boost",
    Unboost => "-unboost",
    SetBoost => "-setboost",
    SwapBoost => "-swapboost",
    CopyBoost => "-copyboost",
    ClearBoost => "-clearboost",
    ClearPositiveBoost => "-clearpositiveboost",
    ClearNegativeBoost => "-clearnegativeboost",
    InvertBoost => "-invertboost",
    ClearAllBoost => "-clearallboost",
    Crit => "-crit",
    SuperEffective => "-supereffective",
    Resisted => "-resisted",
    Block => "-block",
    Fail => "-fail",
    Immune => "-immune",
    Miss => "-miss",
    Center => "-center",
    Ohko => "-ohko",
    Combine => "-combine",
    NoTarget => "-notarget",
    Mega => "-mega",
    Primal => "-primal",
    ZPower => "-zpower",
    Burst => "-burst",
    ZBroken => "-zbroken",
    HitCount => "-hitcount",
    Waiting => "-waiting",
    Anim => "-anim",
}

impl Command {
    /// Minor commands are written with a leading `-`.
    pub fn is_minor(&self) -> bool {
        self.as_str().starts_with('-')
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
