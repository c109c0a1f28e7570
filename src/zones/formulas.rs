//! Pure boundary formulas for power and heart rate zones.
//!
//! Every function here maps a threshold value and a zone system to an
//! ordered list of fractional spans. Projection to absolute watts or bpm
//! happens in the table builder.

use crate::models::{HrZoneConfig, HrZoneSystem, PowerZoneConfig, PowerZoneSystem};

use super::error::ZoneError;

/// One zone expressed as fractions of the threshold basis.
///
/// `upper` is `None` for the open-ended top zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSpan {
    pub lower: f64,
    pub upper: Option<f64>,
}

impl ZoneSpan {
    const fn new(lower: f64, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }
}

/// Coggan 7-zone model, published percentages of FTP.
///
/// Zone starts use the published integer percents (zone 2 starts at 56%),
/// so adjacent zones abut at one-percent steps.
const COGGAN_SPANS: [ZoneSpan; 7] = [
    ZoneSpan::new(0.00, Some(0.55)),
    ZoneSpan::new(0.56, Some(0.75)),
    ZoneSpan::new(0.76, Some(0.90)),
    ZoneSpan::new(0.91, Some(1.05)),
    ZoneSpan::new(1.06, Some(1.20)),
    ZoneSpan::new(1.21, Some(1.50)),
    ZoneSpan::new(1.51, None),
];

/// Polarized low/high cut points as fractions of FTP. Not traceable to a
/// published table; revise here if the canonical model says otherwise.
pub const POLARIZED_LOW_CUT: f64 = 0.80;
pub const POLARIZED_HIGH_CUT: f64 = 1.05;

/// Five-zone heart rate fractions, applied to max HR under the standard
/// system and to heart rate reserve under Karvonen.
const HR_CUTS: [f64; 4] = [0.60, 0.70, 0.80, 0.90];

/// Compute fractional zone spans for a power zone configuration.
///
/// `ftp` must be positive; custom boundaries must be finite, positive and
/// strictly ascending. Violations are `InvalidProfile`.
pub fn power_zone_spans(config: &PowerZoneConfig, ftp: u32) -> Result<Vec<ZoneSpan>, ZoneError> {
    if ftp == 0 {
        return Err(ZoneError::InvalidProfile(
            "FTP must be a positive number of watts".to_string(),
        ));
    }

    match config.system {
        PowerZoneSystem::Coggan => Ok(COGGAN_SPANS.to_vec()),
        PowerZoneSystem::Polarized => Ok(vec![
            ZoneSpan::new(0.0, Some(POLARIZED_LOW_CUT)),
            ZoneSpan::new(POLARIZED_LOW_CUT, Some(POLARIZED_HIGH_CUT)),
            ZoneSpan::new(POLARIZED_HIGH_CUT, None),
        ]),
        PowerZoneSystem::Custom => custom_spans(config.boundaries.as_deref()),
    }
}

/// Compute fractional zone spans for a heart rate zone configuration.
///
/// The standard system needs only `max_hr`; Karvonen needs both values
/// with `max_hr > resting_hr`. Fractions are of max HR for the standard
/// system and of heart rate reserve for Karvonen.
pub fn hr_zone_spans(
    config: &HrZoneConfig,
    max_hr: u32,
    resting_hr: Option<u32>,
) -> Result<Vec<ZoneSpan>, ZoneError> {
    if max_hr == 0 {
        return Err(ZoneError::InvalidProfile(
            "Max heart rate must be a positive number of bpm".to_string(),
        ));
    }

    match config.system {
        HrZoneSystem::Standard => Ok(fraction_spans(&HR_CUTS)),
        HrZoneSystem::Karvonen => {
            let resting = resting_hr.ok_or_else(|| {
                ZoneError::InvalidProfile(
                    "Karvonen zones require a resting heart rate".to_string(),
                )
            })?;
            if resting == 0 {
                return Err(ZoneError::InvalidProfile(
                    "Resting heart rate must be a positive number of bpm".to_string(),
                ));
            }
            if max_hr <= resting {
                return Err(ZoneError::InvalidProfile(format!(
                    "Max heart rate ({} bpm) must exceed resting heart rate ({} bpm)",
                    max_hr, resting
                )));
            }
            Ok(fraction_spans(&HR_CUTS))
        }
        HrZoneSystem::Custom => custom_spans(config.boundaries.as_deref()),
    }
}

/// Build contiguous spans from a list of shared cut points: zone 1 runs
/// from 0 to the first cut, the last zone is open-ended.
fn fraction_spans(cuts: &[f64]) -> Vec<ZoneSpan> {
    let mut spans = Vec::with_capacity(cuts.len() + 1);
    let mut lower = 0.0;
    for &cut in cuts {
        spans.push(ZoneSpan::new(lower, Some(cut)));
        lower = cut;
    }
    spans.push(ZoneSpan::new(lower, None));
    spans
}

/// Validate user-supplied custom cut points and pass them through.
fn custom_spans(boundaries: Option<&[f64]>) -> Result<Vec<ZoneSpan>, ZoneError> {
    let cuts = boundaries.ok_or_else(|| {
        ZoneError::InvalidProfile("Custom zone system has no boundaries defined".to_string())
    })?;

    if cuts.is_empty() {
        return Err(ZoneError::InvalidProfile(
            "Custom zone system has no boundaries defined".to_string(),
        ));
    }

    let mut prev = 0.0;
    for &cut in cuts {
        if !cut.is_finite() || cut <= 0.0 {
            return Err(ZoneError::InvalidProfile(format!(
                "Custom zone boundary {} is not a positive number",
                cut
            )));
        }
        if cut <= prev && prev != 0.0 {
            return Err(ZoneError::InvalidProfile(
                "Custom zone boundaries must be strictly ascending".to_string(),
            ));
        }
        prev = cut;
    }

    Ok(fraction_spans(cuts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coggan() -> PowerZoneConfig {
        PowerZoneConfig {
            system: PowerZoneSystem::Coggan,
            boundaries: None,
        }
    }

    fn hr(system: HrZoneSystem) -> HrZoneConfig {
        HrZoneConfig {
            system,
            boundaries: None,
        }
    }

    #[test]
    fn test_coggan_spans_ascending_and_open_topped() {
        let spans = power_zone_spans(&coggan(), 250).unwrap();
        assert_eq!(spans.len(), 7);

        for pair in spans.windows(2) {
            let upper = pair[0].upper.expect("only the last zone is open");
            assert!(pair[0].lower < upper);
            assert!(pair[1].lower > pair[0].lower);
            assert!(pair[1].lower <= upper + 0.011); // abuts at one-percent steps
        }
        assert!(spans.last().unwrap().upper.is_none());
    }

    #[test]
    fn test_zero_ftp_is_invalid() {
        let err = power_zone_spans(&coggan(), 0).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidProfile(_)));
    }

    #[test]
    fn test_polarized_has_three_bands() {
        let config = PowerZoneConfig {
            system: PowerZoneSystem::Polarized,
            boundaries: None,
        };
        let spans = power_zone_spans(&config, 200).unwrap();
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].upper, Some(POLARIZED_LOW_CUT));
        assert_eq!(spans[1].lower, POLARIZED_LOW_CUT);
        assert!(spans[2].upper.is_none());
    }

    #[test]
    fn test_standard_hr_ignores_resting() {
        let with = hr_zone_spans(&hr(HrZoneSystem::Standard), 185, Some(50)).unwrap();
        let without = hr_zone_spans(&hr(HrZoneSystem::Standard), 185, None).unwrap();
        assert_eq!(with, without);
        assert_eq!(with.len(), 5);
    }

    #[test]
    fn test_karvonen_requires_both_values() {
        let err = hr_zone_spans(&hr(HrZoneSystem::Karvonen), 185, None).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidProfile(_)));
    }

    #[test]
    fn test_karvonen_rejects_inverted_profile() {
        let err = hr_zone_spans(&hr(HrZoneSystem::Karvonen), 150, Some(160)).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidProfile(_)));
    }

    #[test]
    fn test_custom_boundaries_pass_through() {
        let config = PowerZoneConfig {
            system: PowerZoneSystem::Custom,
            boundaries: Some(vec![0.6, 0.8, 1.0, 1.2]),
        };
        let spans = power_zone_spans(&config, 300).unwrap();
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0], ZoneSpan::new(0.0, Some(0.6)));
        assert_eq!(spans[2], ZoneSpan::new(0.8, Some(1.0)));
        assert_eq!(spans[4], ZoneSpan::new(1.2, None));
    }

    #[test]
    fn test_custom_boundaries_must_ascend() {
        let config = PowerZoneConfig {
            system: PowerZoneSystem::Custom,
            boundaries: Some(vec![0.8, 0.6]),
        };
        let err = power_zone_spans(&config, 300).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidProfile(_)));
    }

    #[test]
    fn test_custom_without_boundaries_is_invalid() {
        let config = HrZoneConfig {
            system: HrZoneSystem::Custom,
            boundaries: None,
        };
        let err = hr_zone_spans(&config, 185, Some(50)).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidProfile(_)));
    }
}
