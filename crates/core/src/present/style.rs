//! Fixed color mappings. Nothing here is derived from data: every mapping is
//! a closed match with a neutral fallback.

use palette::Srgb;

use fleet_transit::{BusStatus, IncidentStatus, Priority};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Green,
    Amber,
    Red,
    /// Highlight for the next stop.
    Accent,
    Neutral,
}

impl Tone {
    pub fn color(self) -> Srgb<u8> {
        match self {
            Self::Green => Srgb::new(0x22, 0xc5, 0x5e),
            Self::Amber => Srgb::new(0xf5, 0x9e, 0x0b),
            Self::Red => Srgb::new(0xef, 0x44, 0x44),
            Self::Accent => Srgb::new(0x3b, 0x82, 0xf6),
            Self::Neutral => Srgb::new(0x6b, 0x72, 0x80),
        }
    }
}

pub fn status_tone(status: BusStatus) -> Tone {
    match status {
        BusStatus::Active => Tone::Green,
        BusStatus::Maintenance => Tone::Amber,
        BusStatus::OutOfService => Tone::Red,
        BusStatus::Unknown => Tone::Neutral,
    }
}

pub fn priority_tone(priority: &Priority) -> Tone {
    match priority {
        Priority::High => Tone::Red,
        Priority::Medium => Tone::Amber,
        Priority::Low => Tone::Green,
        Priority::Other(_) => Tone::Neutral,
    }
}

/// Anything not yet resolved or merely reported reads as open.
pub fn incident_status_tone(status: &IncidentStatus) -> Tone {
    match status {
        IncidentStatus::Resolved => Tone::Green,
        IncidentStatus::Reported => Tone::Amber,
        IncidentStatus::Other(_) => Tone::Red,
    }
}

/// `< 60` green, `60..80` amber, `>= 80` red.
pub fn utilization_tone(percentage: f64) -> Tone {
    if percentage >= 80.0 {
        Tone::Red
    } else if percentage >= 60.0 {
        Tone::Amber
    } else {
        Tone::Green
    }
}

pub fn stop_tone(is_next_stop: bool) -> Tone {
    if is_next_stop {
        Tone::Accent
    } else {
        Tone::Neutral
    }
}

pub fn route_color(route_number: &str) -> Srgb<u8> {
    match route_number {
        "B101" => Srgb::new(0xef, 0x44, 0x44),
        "B205" => Srgb::new(0x3b, 0x82, 0xf6),
        "B350" => Srgb::new(0x10, 0xb9, 0x81),
        "B410" => Srgb::new(0xf5, 0x9e, 0x0b),
        "B520" => Srgb::new(0x8b, 0x5c, 0xf6),
        _ => Tone::Neutral.color(),
    }
}

pub fn hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}
