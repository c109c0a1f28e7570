//! Builds display-ready zone tables from fractional spans.

use crate::models::{CalculatedZone, ZoneColor};

use super::formulas::ZoneSpan;

/// The absolute quantity that zone fractions scale against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneBasis {
    /// Fractions of a single threshold: FTP in watts, or max HR in bpm.
    Absolute(u32),
    /// Fractions of heart rate reserve, offset by resting HR (Karvonen).
    Reserve { resting: u32, max: u32 },
}

impl ZoneBasis {
    fn project(&self, fraction: f64) -> u32 {
        let value = match *self {
            ZoneBasis::Absolute(threshold) => fraction * f64::from(threshold),
            ZoneBasis::Reserve { resting, max } => {
                f64::from(resting) + fraction * f64::from(max - resting)
            }
        };
        round_half_up(value)
    }
}

/// Round to the nearest whole unit, halves up.
fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor() as u32
}

/// Project fractional spans onto the basis and attach names and colors.
///
/// Pure and infallible: identical inputs always produce an identical
/// table. Indices outside the label table come back as "Zone N" with the
/// neutral color, so any span list renders.
pub fn build_table(
    spans: &[ZoneSpan],
    basis: ZoneBasis,
    label: impl Fn(u8) -> (String, ZoneColor),
) -> Vec<CalculatedZone> {
    spans
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let index = (i + 1) as u8;
            let (name, color) = label(index);
            CalculatedZone {
                index,
                name,
                color,
                min_percent: span.lower * 100.0,
                max_percent: span.upper.map(|u| u * 100.0),
                min_absolute: basis.project(span.lower),
                max_absolute: span.upper.map(|u| basis.project(u)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::labels::{power_zone_label, FALLBACK_COLOR};
    use crate::models::PowerZoneSystem;

    fn spans() -> Vec<ZoneSpan> {
        vec![
            ZoneSpan {
                lower: 0.0,
                upper: Some(0.55),
            },
            ZoneSpan {
                lower: 0.56,
                upper: Some(0.75),
            },
            ZoneSpan {
                lower: 0.76,
                upper: None,
            },
        ]
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(112.0), 112);
        assert_eq!(round_half_up(112.4), 112);
        assert_eq!(round_half_up(112.5), 113);
        assert_eq!(round_half_up(112.6), 113);
    }

    #[test]
    fn test_coggan_zone_two_at_ftp_200() {
        let table = build_table(&spans(), ZoneBasis::Absolute(200), |i| {
            power_zone_label(PowerZoneSystem::Coggan, i)
        });

        assert_eq!(table[1].min_absolute, 112);
        assert_eq!(table[1].max_absolute, Some(150));
        assert_eq!(table[1].name, "Endurance");
    }

    #[test]
    fn test_zone_one_starts_at_zero() {
        let table = build_table(&spans(), ZoneBasis::Absolute(250), |i| {
            power_zone_label(PowerZoneSystem::Coggan, i)
        });
        assert_eq!(table[0].min_percent, 0.0);
        assert_eq!(table[0].min_absolute, 0);
    }

    #[test]
    fn test_final_zone_has_no_upper_bound() {
        let table = build_table(&spans(), ZoneBasis::Absolute(250), |i| {
            power_zone_label(PowerZoneSystem::Coggan, i)
        });
        assert!(table.last().unwrap().max_percent.is_none());
        assert!(table.last().unwrap().max_absolute.is_none());
    }

    #[test]
    fn test_reserve_basis_offsets_by_resting_hr() {
        let basis = ZoneBasis::Reserve {
            resting: 50,
            max: 190,
        };
        let table = build_table(&spans(), basis, |i| (format!("Zone {}", i), FALLBACK_COLOR));

        // 50 + 0.56 * 140 = 128.4
        assert_eq!(table[0].min_absolute, 50);
        assert_eq!(table[1].min_absolute, 128);
    }

    #[test]
    fn test_builder_is_idempotent() {
        let build = || {
            build_table(&spans(), ZoneBasis::Absolute(300), |i| {
                power_zone_label(PowerZoneSystem::Coggan, i)
            })
        };
        assert_eq!(build(), build());
    }
}
