use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub collection: CollectionConfig,
    pub dashboard: DashboardConfig,
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    pub system_interval_secs: u64,
    pub application_interval_secs: u64,
    pub ai_interval_secs: u64,
    pub business_interval_secs: u64,
    /// Upper bound on a single collect call so a stuck gather cannot stall its producer.
    pub collect_timeout_secs: u64,
    /// Max samples retained per metric kind (FIFO eviction past this).
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_history_capacity() -> usize {
    1000
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// How often the broadcaster pushes an update envelope to subscribers.
    pub refresh_interval_secs: u64,
    /// How many recent samples per kind go into each chart payload.
    pub chart_history_points: usize,
    /// Per-subscriber channel capacity; a subscriber that falls this far behind is dropped.
    pub subscriber_buffer: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    pub interval_secs: u64,
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

fn default_retention_days() -> u32 {
    30
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.collection.system_interval_secs > 0,
            "collection.system_interval_secs must be > 0, got {}",
            self.collection.system_interval_secs
        );
        anyhow::ensure!(
            self.collection.application_interval_secs > 0,
            "collection.application_interval_secs must be > 0, got {}",
            self.collection.application_interval_secs
        );
        anyhow::ensure!(
            self.collection.ai_interval_secs > 0,
            "collection.ai_interval_secs must be > 0, got {}",
            self.collection.ai_interval_secs
        );
        anyhow::ensure!(
            self.collection.business_interval_secs > 0,
            "collection.business_interval_secs must be > 0, got {}",
            self.collection.business_interval_secs
        );
        anyhow::ensure!(
            self.collection.collect_timeout_secs > 0,
            "collection.collect_timeout_secs must be > 0, got {}",
            self.collection.collect_timeout_secs
        );
        anyhow::ensure!(
            self.collection.history_capacity > 0,
            "collection.history_capacity must be > 0, got {}",
            self.collection.history_capacity
        );
        anyhow::ensure!(
            self.dashboard.refresh_interval_secs > 0,
            "dashboard.refresh_interval_secs must be > 0, got {}",
            self.dashboard.refresh_interval_secs
        );
        anyhow::ensure!(
            self.dashboard.chart_history_points > 0,
            "dashboard.chart_history_points must be > 0, got {}",
            self.dashboard.chart_history_points
        );
        anyhow::ensure!(
            self.dashboard.subscriber_buffer > 0,
            "dashboard.subscriber_buffer must be > 0, got {}",
            self.dashboard.subscriber_buffer
        );
        anyhow::ensure!(
            self.aggregation.interval_secs > 0,
            "aggregation.interval_secs must be > 0, got {}",
            self.aggregation.interval_secs
        );
        anyhow::ensure!(
            self.aggregation.retention_days > 0,
            "aggregation.retention_days must be > 0, got {}",
            self.aggregation.retention_days
        );
        Ok(())
    }
}
