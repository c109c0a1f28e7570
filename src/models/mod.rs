mod profile;
mod zones;

pub use profile::{AthleteZoneProfile, ZoneProfileUpdate};
pub use zones::{
    CalculatedZone, HrZoneConfig, HrZoneSystem, PowerZoneConfig, PowerZoneSystem, TableStatus,
    ZoneColor, ZonesData,
};
