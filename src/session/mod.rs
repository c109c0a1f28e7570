//! Read-modify-write lifecycle for zone settings.
//!
//! `ZonesSession` owns the loaded snapshot and sequences all traffic to
//! the zones endpoints. Every operation takes `&mut self`, so overlapping
//! calls on one session do not compile; callers that want concurrency
//! must create separate sessions and serialize themselves.

use uuid::Uuid;

use crate::api::{ApiError, ZonesApi};
use crate::models::{HrZoneConfig, PowerZoneConfig, ZoneProfileUpdate, ZonesData};

/// Lifecycle state of a zones session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Loaded,
    Saving,
    /// An I/O failure; recoverable by re-invoking the failed operation
    Error,
}

/// Pending edits for one save sequence
#[derive(Debug, Clone, Default)]
pub struct ZoneChanges {
    pub profile: Option<ZoneProfileUpdate>,
    pub power: Option<PowerZoneConfig>,
    pub heart_rate: Option<HrZoneConfig>,
}

impl ZoneChanges {
    pub fn is_empty(&self) -> bool {
        self.profile.map_or(true, |p| p.is_empty())
            && self.power.is_none()
            && self.heart_rate.is_none()
    }
}

/// Orchestrates fetching, editing and persisting zone configuration
pub struct ZonesSession {
    api: ZonesApi,
    state: SessionState,
    data: Option<ZonesData>,
}

impl ZonesSession {
    pub fn new(api: ZonesApi) -> Self {
        Self {
            api,
            state: SessionState::Idle,
            data: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The last successfully loaded snapshot, if any
    pub fn data(&self) -> Option<&ZonesData> {
        self.data.as_ref()
    }

    /// Fetch the athlete's stored zones and recompute both tables.
    ///
    /// On failure the previous snapshot is preserved; the session enters
    /// `Error` and the caller decides whether to retry.
    pub async fn fetch_zones(&mut self, athlete_id: Uuid) -> Result<&ZonesData, ApiError> {
        self.state = SessionState::Loading;

        match self.api.fetch_zones(athlete_id).await {
            Ok(response) => {
                let data = ZonesData::derive(
                    response.athlete_id,
                    response.profile,
                    response.power,
                    response.heart_rate,
                );
                self.state = SessionState::Loaded;
                Ok(&*self.data.insert(data))
            }
            Err(err) => {
                tracing::warn!(%athlete_id, error = %err, "Failed to fetch zones");
                self.state = SessionState::Error;
                Err(err)
            }
        }
    }

    /// Persist threshold edits. Does not recompute tables; callers
    /// re-fetch or recompute locally.
    pub async fn update_athlete_zone_data(
        &mut self,
        athlete_id: Uuid,
        update: &ZoneProfileUpdate,
    ) -> Result<(), ApiError> {
        self.state = SessionState::Saving;
        let result = self.api.put_profile(athlete_id, update).await;
        self.finish_save(result)
    }

    /// Persist the chosen power zone system
    pub async fn update_power_zones(
        &mut self,
        athlete_id: Uuid,
        config: &PowerZoneConfig,
    ) -> Result<(), ApiError> {
        self.state = SessionState::Saving;
        let result = self.api.put_power_config(athlete_id, config).await;
        self.finish_save(result)
    }

    /// Persist the chosen heart rate zone system
    pub async fn update_hr_zones(
        &mut self,
        athlete_id: Uuid,
        config: &HrZoneConfig,
    ) -> Result<(), ApiError> {
        self.state = SessionState::Saving;
        let result = self.api.put_hr_config(athlete_id, config).await;
        self.finish_save(result)
    }

    /// Run the full save sequence: profile, then power system, then heart
    /// rate system, skipping parts with no pending edit.
    ///
    /// The three writes are independent upserts. When one fails after
    /// earlier ones succeeded, the earlier writes are rolled back to the
    /// values of the last loaded snapshot, best effort; the caller sees a
    /// single error for the whole sequence either way.
    pub async fn save_changes(
        &mut self,
        athlete_id: Uuid,
        changes: &ZoneChanges,
    ) -> Result<(), ApiError> {
        if changes.is_empty() {
            return Ok(());
        }

        self.state = SessionState::Saving;

        let mut profile_saved = false;
        let mut power_saved = false;

        let result = self
            .write_sequence(athlete_id, changes, &mut profile_saved, &mut power_saved)
            .await;

        match result {
            Ok(()) => {
                self.state = SessionState::Loaded;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%athlete_id, error = %err, "Save sequence failed");
                self.roll_back(athlete_id, profile_saved, power_saved).await;
                self.state = SessionState::Error;
                Err(err)
            }
        }
    }

    async fn write_sequence(
        &self,
        athlete_id: Uuid,
        changes: &ZoneChanges,
        profile_saved: &mut bool,
        power_saved: &mut bool,
    ) -> Result<(), ApiError> {
        if let Some(update) = changes.profile.filter(|u| !u.is_empty()) {
            self.api.put_profile(athlete_id, &update).await?;
            *profile_saved = true;
        }

        if let Some(power) = &changes.power {
            self.api.put_power_config(athlete_id, power).await?;
            *power_saved = true;
        }

        if let Some(heart_rate) = &changes.heart_rate {
            self.api.put_hr_config(athlete_id, heart_rate).await?;
        }

        Ok(())
    }

    /// Restore previously loaded values for the writes that succeeded
    /// before the failure. Degrades to nothing without a snapshot.
    async fn roll_back(&self, athlete_id: Uuid, profile_saved: bool, power_saved: bool) {
        if !profile_saved && !power_saved {
            return;
        }

        let snapshot = match &self.data {
            Some(data) if data.athlete_id == athlete_id => data,
            _ => {
                tracing::warn!(%athlete_id, "No snapshot to roll back to; earlier writes remain");
                return;
            }
        };

        if profile_saved {
            let restore = ZoneProfileUpdate {
                ftp: snapshot.profile.ftp,
                max_hr: snapshot.profile.max_hr,
                resting_hr: snapshot.profile.resting_hr,
            };
            if let Err(err) = self.api.put_profile(athlete_id, &restore).await {
                tracing::warn!(%athlete_id, error = %err, "Profile rollback failed");
            }
        }

        if power_saved {
            if let Err(err) = self
                .api
                .put_power_config(athlete_id, &snapshot.power)
                .await
            {
                tracing::warn!(%athlete_id, error = %err, "Power config rollback failed");
            }
        }
    }

    fn finish_save(&mut self, result: Result<(), ApiError>) -> Result<(), ApiError> {
        match result {
            Ok(()) => {
                self.state = SessionState::Loaded;
                Ok(())
            }
            Err(err) => {
                self.state = SessionState::Error;
                Err(err)
            }
        }
    }
}
