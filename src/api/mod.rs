use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{AthleteZoneProfile, HrZoneConfig, PowerZoneConfig, ZoneProfileUpdate};

mod error;

pub use error::ApiError;

/// Zone configuration for an athlete as stored by the RidePro API
#[derive(Debug, Clone, Deserialize)]
pub struct ZonesResponse {
    pub athlete_id: Uuid,
    pub profile: AthleteZoneProfile,
    pub power: PowerZoneConfig,
    pub heart_rate: HrZoneConfig,
}

/// Client for the RidePro zones endpoints
pub struct ZonesApi {
    client: Client,
    base_url: String,
    token: String,
}

impl ZonesApi {
    /// Create a client from the loaded configuration
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api.base_url.clone(),
            token: config.auth.token.clone(),
        })
    }

    /// Create a client against an explicit base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Read the athlete's stored profile and zone system selections
    pub async fn fetch_zones(&self, athlete_id: Uuid) -> Result<ZonesResponse, ApiError> {
        let url = format!("{}/api/v1/athletes/{}/zones", self.base_url, athlete_id);

        tracing::debug!(%athlete_id, "Fetching zone configuration");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, error_text))
        }
    }

    /// Upsert threshold fields into the athlete's profile
    pub async fn put_profile(
        &self,
        athlete_id: Uuid,
        update: &ZoneProfileUpdate,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/api/v1/athletes/{}/zones/profile",
            self.base_url, athlete_id
        );

        tracing::debug!(%athlete_id, "Saving athlete zone profile");
        self.put(&url, update).await
    }

    /// Upsert the athlete's power zone configuration
    pub async fn put_power_config(
        &self,
        athlete_id: Uuid,
        config: &PowerZoneConfig,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/api/v1/athletes/{}/zones/power",
            self.base_url, athlete_id
        );

        tracing::debug!(%athlete_id, system = %config.system, "Saving power zone config");
        self.put(&url, config).await
    }

    /// Upsert the athlete's heart rate zone configuration
    pub async fn put_hr_config(
        &self,
        athlete_id: Uuid,
        config: &HrZoneConfig,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/api/v1/athletes/{}/zones/heart-rate",
            self.base_url, athlete_id
        );

        tracing::debug!(%athlete_id, system = %config.system, "Saving heart rate zone config");
        self.put(&url, config).await
    }

    async fn put<T: serde::Serialize>(&self, url: &str, body: &T) -> Result<(), ApiError> {
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, error_text))
        }
    }
}
