//! HESSI flag vocabulary.
//!
//! Codes ending in `n` in the catalog documentation stand for a family
//! (`A0..A3`, `P0..P1`, `Q0..Q11`); they are matched by prefix here.

/// Every flag code documented in the HESSI flare list, families written with `n`.
pub const FLAG_CODES: [&str; 25] = [
    "a0", "a1", "a2", "a3", "An", "DF", "DR", "ED", "EE", "ES", "FE", "FR", "FS", "GD", "GE",
    "GS", "MR", "NS", "PE", "PS", "Pn", "Qn", "SD", "SE", "SS",
];

fn is_family(code: &str, prefix: char) -> bool {
    let mut chars = code.chars();
    chars.next() == Some(prefix) && {
        let rest = chars.as_str();
        rest == "n" || (!rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
    }
}

/// Meaning of a HESSI flag code.
///
/// Return
/// ----------
/// * `Some(description)` for a documented code, `None` otherwise.
pub fn describe_flag(code: &str) -> Option<&'static str> {
    let meaning = match code {
        "a0" => "In attenuator state 0 (None) sometime during flare",
        "a1" => "In attenuator state 1 (Thin) sometime during flare",
        "a2" => "In attenuator state 2 (Thick) sometime during flare",
        "a3" => "In attenuator state 3 (Both) sometime during flare",
        "DF" => "Front segment counts were decimated sometime during flare",
        "DR" => "Rear segment counts were decimated sometime during flare",
        "ED" => "Spacecraft eclipse (night) sometime during flare",
        "EE" => "Flare ended in spacecraft eclipse (night)",
        "ES" => "Flare started in spacecraft eclipse (night)",
        "FE" => "Flare ongoing at end of file",
        "FR" => "In Fast Rate Mode",
        "FS" => "Flare ongoing at start of file",
        "GD" => "Data gap during flare",
        "GE" => "Flare ended in data gap",
        "GS" => "Flare started in data gap",
        "MR" => "Spacecraft in high-latitude zone during flare",
        "NS" => "Non-solar event",
        "PE" => "Particle event: Particles are present",
        "PS" => "Possible Solar Flare; in front detectors, but no position",
        "SD" => "Spacecraft was in SAA sometime during flare",
        "SE" => "Flare ended when spacecraft was in SAA",
        "SS" => "Flare started when spacecraft was in SAA",
        c if is_family(c, 'A') => {
            "Attenuator state (0=None, 1=Thin, 2=Thick, 3=Both) at peak of flare"
        }
        c if is_family(c, 'P') => {
            "Position Quality: P0 = Position is NOT valid, P1 = Position is valid"
        }
        c if is_family(c, 'Q') => "Data Quality: Q0 = Highest Quality, Q11 = Lowest Quality",
        _ => return None,
    };
    Some(meaning)
}
