use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::zones::{self, ZoneError};

use super::profile::AthleteZoneProfile;

/// Power zone systems supported by RidePro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerZoneSystem {
    /// Coggan 7-zone model
    Coggan,
    /// Three-band polarized model
    Polarized,
    /// User-supplied boundaries
    Custom,
}

/// Heart rate zone systems supported by RidePro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HrZoneSystem {
    /// Fixed percentages of max HR
    Standard,
    /// Heart-rate-reserve method
    Karvonen,
    /// User-supplied boundaries
    Custom,
}

impl std::fmt::Display for PowerZoneSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerZoneSystem::Coggan => write!(f, "Coggan"),
            PowerZoneSystem::Polarized => write!(f, "Polarized"),
            PowerZoneSystem::Custom => write!(f, "Custom"),
        }
    }
}

impl std::str::FromStr for PowerZoneSystem {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coggan" => Ok(PowerZoneSystem::Coggan),
            "polarized" => Ok(PowerZoneSystem::Polarized),
            "custom" => Ok(PowerZoneSystem::Custom),
            _ => Err(ZoneError::UnknownSystem(s.to_string())),
        }
    }
}

impl std::fmt::Display for HrZoneSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HrZoneSystem::Standard => write!(f, "Standard"),
            HrZoneSystem::Karvonen => write!(f, "Karvonen"),
            HrZoneSystem::Custom => write!(f, "Custom"),
        }
    }
}

impl std::str::FromStr for HrZoneSystem {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(HrZoneSystem::Standard),
            "karvonen" => Ok(HrZoneSystem::Karvonen),
            "custom" => Ok(HrZoneSystem::Custom),
            _ => Err(ZoneError::UnknownSystem(s.to_string())),
        }
    }
}

/// Stored power zone configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerZoneConfig {
    pub system: PowerZoneSystem,
    /// Ascending fractional cut points, present only for `Custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundaries: Option<Vec<f64>>,
}

impl PowerZoneConfig {
    pub fn new(system: PowerZoneSystem) -> Self {
        Self {
            system,
            boundaries: None,
        }
    }
}

/// Stored heart rate zone configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrZoneConfig {
    pub system: HrZoneSystem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundaries: Option<Vec<f64>>,
}

impl HrZoneConfig {
    pub fn new(system: HrZoneSystem) -> Self {
        Self {
            system,
            boundaries: None,
        }
    }
}

/// RGB display color for a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ZoneColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One row of a calculated zone table.
///
/// Derived on every fetch or edit, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatedZone {
    /// 1-based ordinal
    pub index: u8,
    pub name: String,
    pub color: ZoneColor,
    /// Lower bound as a percentage of the basis
    pub min_percent: f64,
    /// `None` for the open-ended top zone
    pub max_percent: Option<f64>,
    /// Lower bound in watts or bpm
    pub min_absolute: u32,
    pub max_absolute: Option<u32>,
}

/// A calculated table, or the reason one cannot be shown
#[derive(Debug, Clone, PartialEq)]
pub enum TableStatus {
    Ready(Vec<CalculatedZone>),
    Unavailable(String),
}

impl TableStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, TableStatus::Ready(_))
    }

    fn from_result(result: Result<Vec<CalculatedZone>, ZoneError>) -> Self {
        match result {
            Ok(table) => TableStatus::Ready(table),
            Err(ZoneError::InvalidProfile(reason)) => TableStatus::Unavailable(reason),
            Err(err) => TableStatus::Unavailable(err.to_string()),
        }
    }
}

/// In-memory snapshot of everything the zones views work from.
///
/// Replaced wholesale on every successful fetch; readers always see a
/// fully consistent snapshot or the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonesData {
    pub athlete_id: Uuid,
    pub profile: AthleteZoneProfile,
    pub power: PowerZoneConfig,
    pub heart_rate: HrZoneConfig,
    pub power_table: TableStatus,
    pub hr_table: TableStatus,
    pub fetched_at: DateTime<Utc>,
}

impl ZonesData {
    /// Build a snapshot, recomputing both calculated tables
    pub fn derive(
        athlete_id: Uuid,
        profile: AthleteZoneProfile,
        power: PowerZoneConfig,
        heart_rate: HrZoneConfig,
    ) -> Self {
        let power_table = TableStatus::from_result(zones::power_zone_table(&power, &profile));
        let hr_table = TableStatus::from_result(zones::hr_zone_table(&heart_rate, &profile));

        Self {
            athlete_id,
            profile,
            power,
            heart_rate,
            power_table,
            hr_table,
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_system_round_trip_through_strings() {
        for system in ["coggan", "polarized", "custom"] {
            let parsed = PowerZoneSystem::from_str(system).unwrap();
            assert_eq!(parsed.to_string().to_lowercase(), system);
        }
    }

    #[test]
    fn test_unknown_system_is_rejected() {
        let err = PowerZoneSystem::from_str("threshold-based").unwrap_err();
        assert!(matches!(err, ZoneError::UnknownSystem(_)));

        let err = HrZoneSystem::from_str("maffetone").unwrap_err();
        assert!(matches!(err, ZoneError::UnknownSystem(_)));
    }

    #[test]
    fn test_systems_serialize_lowercase() {
        let json = serde_json::to_string(&PowerZoneSystem::Coggan).unwrap();
        assert_eq!(json, "\"coggan\"");

        let parsed: HrZoneSystem = serde_json::from_str("\"karvonen\"").unwrap();
        assert_eq!(parsed, HrZoneSystem::Karvonen);
    }

    #[test]
    fn test_wire_decode_rejects_out_of_set_system() {
        let result: Result<PowerZoneSystem, _> = serde_json::from_str("\"sweetspot\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_derive_with_partial_profile() {
        let profile = AthleteZoneProfile {
            ftp: Some(250),
            max_hr: None,
            resting_hr: None,
        };
        let data = ZonesData::derive(
            Uuid::new_v4(),
            profile,
            PowerZoneConfig::new(PowerZoneSystem::Coggan),
            HrZoneConfig::new(HrZoneSystem::Standard),
        );

        match &data.power_table {
            TableStatus::Ready(table) => assert_eq!(table.len(), 7),
            TableStatus::Unavailable(reason) => panic!("power table unavailable: {}", reason),
        }
        assert!(!data.hr_table.is_ready());
    }
}
