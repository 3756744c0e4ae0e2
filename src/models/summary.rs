// Point-in-time summary: latest sample per kind, health classification, active alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AiModelSample, ApplicationSample, BusinessSample, SystemSample};

/// Coarse health classification derived from the latest system and application samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Unknown,
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

/// Which metric kind triggered the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSource {
    System,
    Application,
}

/// One active threshold breach. Timestamp is the triggering sample's capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(rename = "type")]
    pub source: AlertSource,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Snapshot of current store state. The four latest samples are independently
/// current: each reflects its own producer's most recent capture time, with no
/// joint-capture barrier across kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub timestamp: DateTime<Utc>,
    pub system: Option<SystemSample>,
    pub application: Option<ApplicationSample>,
    pub ai_model: Option<AiModelSample>,
    pub business: Option<BusinessSample>,
    pub health_status: HealthStatus,
    pub alerts: Vec<Alert>,
}
