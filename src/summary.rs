// Summary/health engine: pure reads over current store state.
//
// Health thresholds (latest system + application samples only):
//   healthy   cpu < 80 && mem < 85 && error_rate < 5 && response_time_avg < 2.0
//   critical  cpu > 95 || mem > 95 || error_rate > 20      (after healthy fails)
//   warning   everything else
//   unknown   either buffer empty

use chrono::Utc;

use crate::models::{
    Alert, AlertSeverity, AlertSource, ApplicationSample, HealthStatus, MetricsSummary,
    SystemSample,
};
use crate::store::MetricsStore;

pub fn summarize(store: &MetricsStore) -> MetricsSummary {
    let system = store.latest_system();
    let application = store.latest_application();
    let health_status = health_status(system.as_ref(), application.as_ref());
    let alerts = active_alerts(system.as_ref(), application.as_ref());
    MetricsSummary {
        timestamp: Utc::now(),
        system,
        application,
        ai_model: store.latest_ai(),
        business: store.latest_business(),
        health_status,
        alerts,
    }
}

fn health_status(
    system: Option<&SystemSample>,
    application: Option<&ApplicationSample>,
) -> HealthStatus {
    let (Some(sys), Some(app)) = (system, application) else {
        return HealthStatus::Unknown;
    };

    let healthy = sys.cpu_percent < 80.0
        && sys.memory_percent < 85.0
        && app.error_rate < 5.0
        && app.response_time_avg < 2.0;
    if healthy {
        HealthStatus::Healthy
    } else if sys.cpu_percent > 95.0 || sys.memory_percent > 95.0 || app.error_rate > 20.0 {
        HealthStatus::Critical
    } else {
        HealthStatus::Warning
    }
}

/// Threshold alerts, system rules first then application. All rules are
/// independent and may fire together; there is no deduplication state here.
fn active_alerts(
    system: Option<&SystemSample>,
    application: Option<&ApplicationSample>,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(sys) = system {
        if sys.cpu_percent > 90.0 {
            alerts.push(Alert {
                source: AlertSource::System,
                severity: AlertSeverity::Critical,
                message: format!("High CPU usage: {:.1}%", sys.cpu_percent),
                timestamp: sys.timestamp,
            });
        }
        if sys.memory_percent > 90.0 {
            alerts.push(Alert {
                source: AlertSource::System,
                severity: AlertSeverity::Critical,
                message: format!("High memory usage: {:.1}%", sys.memory_percent),
                timestamp: sys.timestamp,
            });
        }
    }

    if let Some(app) = application {
        if app.error_rate > 10.0 {
            alerts.push(Alert {
                source: AlertSource::Application,
                severity: AlertSeverity::Warning,
                message: format!("High error rate: {:.1}%", app.error_rate),
                timestamp: app.timestamp,
            });
        }
        if app.response_time_avg > 5.0 {
            alerts.push(Alert {
                source: AlertSource::Application,
                severity: AlertSeverity::Warning,
                message: format!("Slow response time: {:.2}s", app.response_time_avg),
                timestamp: app.timestamp,
            });
        }
    }

    alerts
}

/// Overall score in [0, 100]. Starts at 100 and deducts for CPU and memory
/// above 80%, for error rate, and for average response time above 1s. Missing
/// samples deduct nothing.
pub fn performance_score(summary: &MetricsSummary) -> f64 {
    let mut score = 100.0;

    if let Some(sys) = &summary.system {
        score -= 2.0 * (sys.cpu_percent - 80.0).max(0.0);
        score -= 2.0 * (sys.memory_percent - 80.0).max(0.0);
    }
    if let Some(app) = &summary.application {
        score -= 5.0 * app.error_rate;
        score -= 20.0 * (app.response_time_avg - 1.0).max(0.0);
    }

    score.clamp(0.0, 100.0)
}
