use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A QR code entity with a stable id, a redirect target and an accumulating
/// scan history. Field names serialize in camelCase to match the persisted
/// JSON schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedCode {
    pub id: String,
    pub name: String,
    pub target_url: String,
    pub tracking_url: String,
    pub created_at: DateTime<Utc>,
    pub total_scans: u64,
    pub scans: Vec<ScanEvent>,
}

/// One observed visit to a tracked code's indirection URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Reserved for a future collaborator; never populated by the in-scope flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

/// Client-side observation handed to the scan recorder.
#[derive(Debug, Clone)]
pub struct ScanObservation {
    pub timestamp: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCodeRequest {
    pub name: String,
    pub target_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCodeRequest {
    pub name: Option<String>,
    pub target_url: Option<String>,
}

/// Generate a random code identifier
pub fn generate_code_id() -> String {
    use rand::distr::Alphanumeric;
    use rand::Rng;

    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

impl TrackedCode {
    pub fn new(
        id: String,
        name: String,
        target_url: String,
        tracking_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            target_url,
            tracking_url,
            created_at,
            total_scans: 0,
            scans: Vec::new(),
        }
    }

    /// Append a scan event built from `observation` and bump the counter.
    ///
    /// Scan ids are random UUIDs so rapid repeated calls never collide,
    /// unlike a wall-clock-derived id would.
    pub fn record_scan(&mut self, observation: ScanObservation) -> &ScanEvent {
        let event = ScanEvent {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: observation.timestamp,
            user_agent: observation.user_agent,
            ip: observation.ip,
        };

        self.scans.push(event);
        self.total_scans += 1;

        // Just pushed, so the list is non-empty.
        &self.scans[self.scans.len() - 1]
    }
}
