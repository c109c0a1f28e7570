use serde::{Deserialize, Serialize};

/// Physiological thresholds stored for an athlete.
///
/// Absent fields block computation of the corresponding zone table; the
/// profile changes only through explicit save operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AthleteZoneProfile {
    /// Functional threshold power, watts
    pub ftp: Option<u32>,
    /// Maximum heart rate, bpm
    pub max_hr: Option<u32>,
    /// Resting heart rate, bpm
    pub resting_hr: Option<u32>,
}

/// Partial profile edit, merged field-by-field into the stored profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ZoneProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ftp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hr: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resting_hr: Option<u32>,
}

impl ZoneProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.ftp.is_none() && self.max_hr.is_none() && self.resting_hr.is_none()
    }

    /// Merge the present fields into a profile
    pub fn apply_to(&self, profile: &mut AthleteZoneProfile) {
        if let Some(ftp) = self.ftp {
            profile.ftp = Some(ftp);
        }
        if let Some(max_hr) = self.max_hr {
            profile.max_hr = Some(max_hr);
        }
        if let Some(resting_hr) = self.resting_hr {
            profile.resting_hr = Some(resting_hr);
        }
    }
}
