//! Persistence collaborator client
//!
//! The backend exposes a minimal JSON contract for plate maps: GET one by
//! id, POST it back on save. The client carries no retry or cancellation
//! logic; a failed round trip surfaces as an error and the in-memory model
//! stays exactly as it was.

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::plates::{PlateId, PlateMap, PlateMapData};

/// Save response: confirmation plus, optionally, the next plate to edit
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveOutcome {
    success: bool,
    #[serde(default)]
    next_plate_map: Option<PlateMapData>,
}

/// HTTP client for the plate map persistence endpoint
#[derive(Debug, Clone)]
pub struct PlateApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl PlateApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn plate_url(&self, plate_id: &PlateId) -> String {
        format!("{}/plates/{plate_id}", self.base_url)
    }

    /// Load a plate map from the backend
    pub async fn load_plate_map(&self, plate_id: &PlateId) -> Result<PlateMap> {
        let url = self.plate_url(plate_id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;
        if !response.status().is_success() {
            bail!(
                "Loading plate map {plate_id} failed with HTTP {}",
                response.status()
            );
        }
        let plate: PlateMap = response
            .json()
            .await
            .with_context(|| format!("Failed to parse plate map {plate_id}"))?;
        tracing::info!("Loaded plate map {plate_id} ({} wells)", plate.well_count());
        Ok(plate)
    }

    /// Save a plate map
    ///
    /// On confirmed success the plate is marked saved and the backend's
    /// optional next plate map is returned. Any transport or backend
    /// failure propagates without touching `unsaved_changes`, so no edit
    /// is lost silently.
    pub async fn save_plate_map(&self, plate: &mut PlateMap) -> Result<Option<PlateMap>> {
        let url = self.plate_url(plate.plate_id());
        let response = self
            .http
            .post(&url)
            .json(plate)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;
        if !response.status().is_success() {
            bail!(
                "Saving plate map {} failed with HTTP {}",
                plate.plate_id(),
                response.status()
            );
        }
        let outcome: SaveOutcome = response
            .json()
            .await
            .context("Failed to parse save response")?;
        if !outcome.success {
            bail!("Backend rejected plate map {}", plate.plate_id());
        }
        plate.mark_saved();
        tracing::info!("Saved plate map {}", plate.plate_id());
        outcome
            .next_plate_map
            .map(PlateMap::try_from)
            .transpose()
            .context("Next plate map in save response was malformed")
    }
}
