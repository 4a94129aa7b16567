use serde::{Deserialize, Serialize};

/// Whole seconds, used for time limits, remaining time and elapsed time.
pub type Seconds = u32;

/// Position of a card on the board.
pub type CardIndex = usize;

/// Count type used for pair counts and matched-pair counts.
pub type PairCount = u8;

/// Milliseconds on the controller's virtual clock.
pub type Millis = u64;

/// Face printed on a card, every round uses a prefix of [`Symbol::POOL`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Car,
    Plane,
    Truck,
    Energy,
    Motorbike,
    Ship,
    Bus,
    Planet,
    Bike,
    Rocket,
    Train,
    Helicopter,
}

impl Symbol {
    pub const POOL: [Symbol; 12] = [
        Symbol::Car,
        Symbol::Plane,
        Symbol::Truck,
        Symbol::Energy,
        Symbol::Motorbike,
        Symbol::Ship,
        Symbol::Bus,
        Symbol::Planet,
        Symbol::Bike,
        Symbol::Rocket,
        Symbol::Train,
        Symbol::Helicopter,
    ];

    /// Stable name, also used by the front-end to locate the card image.
    pub const fn name(self) -> &'static str {
        use Symbol::*;
        match self {
            Car => "car",
            Plane => "plane",
            Truck => "truck",
            Energy => "energy",
            Motorbike => "motorbike",
            Ship => "ship",
            Bus => "bus",
            Planet => "planet",
            Bike => "bike",
            Rocket => "rocket",
            Train => "train",
            Helicopter => "helicopter",
        }
    }
}
