//! API-526 standard effective orifice areas.

use rn_core::units::us::in2_to_mm2;
use std::fmt;

/// One lettered API-526 orifice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardOrifice {
    pub letter: char,
    /// Effective area [in²]
    pub area_in2: f64,
}

impl StandardOrifice {
    pub fn area_mm2(&self) -> f64 {
        in2_to_mm2(self.area_in2)
    }
}

impl fmt::Display for StandardOrifice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)
    }
}

/// API-526 orifices in ascending area.
pub const API_526_ORIFICES: [StandardOrifice; 14] = [
    StandardOrifice { letter: 'D', area_in2: 0.110 },
    StandardOrifice { letter: 'E', area_in2: 0.196 },
    StandardOrifice { letter: 'F', area_in2: 0.307 },
    StandardOrifice { letter: 'G', area_in2: 0.503 },
    StandardOrifice { letter: 'H', area_in2: 0.785 },
    StandardOrifice { letter: 'J', area_in2: 1.287 },
    StandardOrifice { letter: 'K', area_in2: 1.838 },
    StandardOrifice { letter: 'L', area_in2: 2.853 },
    StandardOrifice { letter: 'M', area_in2: 3.60 },
    StandardOrifice { letter: 'N', area_in2: 4.34 },
    StandardOrifice { letter: 'P', area_in2: 6.38 },
    StandardOrifice { letter: 'Q', area_in2: 11.05 },
    StandardOrifice { letter: 'R', area_in2: 16.0 },
    StandardOrifice { letter: 'T', area_in2: 26.0 },
];

/// Outcome of a standard orifice lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrificeSelection {
    pub orifice: StandardOrifice,
    /// Required area is larger than the T orifice; T is returned anyway.
    pub exceeds_largest: bool,
}

/// Smallest standard orifice whose area covers `required_in2`.
pub fn select_orifice(required_in2: f64) -> OrificeSelection {
    match API_526_ORIFICES
        .iter()
        .find(|o| o.area_in2 >= required_in2)
    {
        Some(orifice) => OrificeSelection {
            orifice: *orifice,
            exceeds_largest: false,
        },
        None => OrificeSelection {
            orifice: API_526_ORIFICES[API_526_ORIFICES.len() - 1],
            exceeds_largest: true,
        },
    }
}

/// Look up an orifice by letter, case-insensitive.
pub fn orifice_by_letter(letter: char) -> Option<StandardOrifice> {
    let letter = letter.to_ascii_uppercase();
    API_526_ORIFICES.iter().copied().find(|o| o.letter == letter)
}
