use crate::models::{HrZoneSystem, PowerZoneSystem, ZoneColor};

/// Canonical Coggan power zone names and colors, zones 1-7
pub const POWER_ZONE_LABELS: [(&str, ZoneColor); 7] = [
    ("Active Recovery", ZoneColor::new(128, 128, 128)),
    ("Endurance", ZoneColor::new(0, 128, 255)),
    ("Tempo", ZoneColor::new(0, 200, 100)),
    ("Threshold", ZoneColor::new(255, 200, 0)),
    ("VO2max", ZoneColor::new(255, 128, 0)),
    ("Anaerobic", ZoneColor::new(255, 50, 50)),
    ("Neuromuscular", ZoneColor::new(180, 0, 180)),
];

/// Polarized three-band names and colors
pub const POLARIZED_ZONE_LABELS: [(&str, ZoneColor); 3] = [
    ("Low", ZoneColor::new(0, 128, 255)),
    ("Moderate", ZoneColor::new(0, 200, 100)),
    ("High", ZoneColor::new(255, 50, 50)),
];

/// Five-zone heart rate names and colors, shared by the
/// percent-of-max and Karvonen systems
pub const HR_ZONE_LABELS: [(&str, ZoneColor); 5] = [
    ("Recovery", ZoneColor::new(128, 128, 128)),
    ("Aerobic", ZoneColor::new(0, 128, 255)),
    ("Tempo", ZoneColor::new(0, 200, 100)),
    ("Threshold", ZoneColor::new(255, 200, 0)),
    ("Maximum", ZoneColor::new(255, 50, 50)),
];

/// Neutral color used when an index falls outside the known table
pub const FALLBACK_COLOR: ZoneColor = ZoneColor::new(160, 160, 160);

fn label_from(table: &[(&str, ZoneColor)], index: u8) -> (String, ZoneColor) {
    match index.checked_sub(1).and_then(|i| table.get(i as usize)) {
        Some((name, color)) => ((*name).to_string(), *color),
        None => (format!("Zone {}", index), FALLBACK_COLOR),
    }
}

/// Name and color for a power zone index under the given system.
///
/// Total over all positive indices: indices past the known table get a
/// generic "Zone N" label and the neutral color. Custom systems reuse the
/// canonical Coggan names for as long as they last.
pub fn power_zone_label(system: PowerZoneSystem, index: u8) -> (String, ZoneColor) {
    match system {
        PowerZoneSystem::Coggan | PowerZoneSystem::Custom => {
            label_from(&POWER_ZONE_LABELS, index)
        }
        PowerZoneSystem::Polarized => label_from(&POLARIZED_ZONE_LABELS, index),
    }
}

/// Name and color for a heart rate zone index under the given system.
pub fn hr_zone_label(system: HrZoneSystem, index: u8) -> (String, ZoneColor) {
    let _ = system; // all HR systems share one label table
    label_from(&HR_ZONE_LABELS, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coggan_labels() {
        let (name, _) = power_zone_label(PowerZoneSystem::Coggan, 1);
        assert_eq!(name, "Active Recovery");

        let (name, _) = power_zone_label(PowerZoneSystem::Coggan, 7);
        assert_eq!(name, "Neuromuscular");
    }

    #[test]
    fn test_polarized_labels() {
        let (name, _) = power_zone_label(PowerZoneSystem::Polarized, 2);
        assert_eq!(name, "Moderate");
    }

    #[test]
    fn test_fallback_past_known_table() {
        let (name, color) = power_zone_label(PowerZoneSystem::Custom, 8);
        assert_eq!(name, "Zone 8");
        assert_eq!(color, FALLBACK_COLOR);

        let (name, color) = power_zone_label(PowerZoneSystem::Custom, 9);
        assert_eq!(name, "Zone 9");
        assert_eq!(color, FALLBACK_COLOR);
    }

    #[test]
    fn test_hr_labels() {
        let (name, _) = hr_zone_label(HrZoneSystem::Karvonen, 5);
        assert_eq!(name, "Maximum");

        let (name, _) = hr_zone_label(HrZoneSystem::Standard, 6);
        assert_eq!(name, "Zone 6");
    }

    #[test]
    fn test_index_zero_is_not_a_zone() {
        let (name, color) = power_zone_label(PowerZoneSystem::Coggan, 0);
        assert_eq!(name, "Zone 0");
        assert_eq!(color, FALLBACK_COLOR);
    }
}
