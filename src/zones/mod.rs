//! Zone calculation engine: formulas, labels and table building.

pub mod error;
pub mod formulas;
pub mod labels;
pub mod table;

pub use error::ZoneError;
pub use formulas::ZoneSpan;
pub use table::ZoneBasis;

use crate::models::{
    AthleteZoneProfile, CalculatedZone, HrZoneConfig, HrZoneSystem, PowerZoneConfig,
};

/// Calculate the power zone table for an athlete.
///
/// Fails with `InvalidProfile` when FTP is absent or the configuration
/// cannot produce valid spans; callers turn that into a prompt.
pub fn power_zone_table(
    config: &PowerZoneConfig,
    profile: &AthleteZoneProfile,
) -> Result<Vec<CalculatedZone>, ZoneError> {
    let ftp = profile.ftp.ok_or_else(|| {
        ZoneError::InvalidProfile("Enter an FTP to calculate power zones".to_string())
    })?;

    let spans = formulas::power_zone_spans(config, ftp)?;
    Ok(table::build_table(
        &spans,
        ZoneBasis::Absolute(ftp),
        |index| labels::power_zone_label(config.system, index),
    ))
}

/// Calculate the heart rate zone table for an athlete.
pub fn hr_zone_table(
    config: &HrZoneConfig,
    profile: &AthleteZoneProfile,
) -> Result<Vec<CalculatedZone>, ZoneError> {
    let max_hr = profile.max_hr.ok_or_else(|| {
        ZoneError::InvalidProfile("Enter a max heart rate to calculate heart rate zones".to_string())
    })?;

    let spans = formulas::hr_zone_spans(config, max_hr, profile.resting_hr)?;

    // Karvonen validation already happened in the span computation, so a
    // resting HR is guaranteed present here
    let basis = match (config.system, profile.resting_hr) {
        (HrZoneSystem::Karvonen, Some(resting)) => ZoneBasis::Reserve {
            resting,
            max: max_hr,
        },
        _ => ZoneBasis::Absolute(max_hr),
    };

    Ok(table::build_table(&spans, basis, |index| {
        labels::hr_zone_label(config.system, index)
    }))
}
