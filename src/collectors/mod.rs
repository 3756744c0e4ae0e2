// Sample sources. One implementation per metric kind; producers only see the
// `SampleSource` trait, so real collectors and deterministic test fakes are
// interchangeable.

mod simulated;
mod system;

use async_trait::async_trait;

pub use simulated::{SimulatedAiSource, SimulatedApplicationSource, SimulatedBusinessSource};
pub use system::SysinfoSystemSource;

/// Produces one timestamped sample of kind `T` per call.
#[async_trait]
pub trait SampleSource<T>: Send + Sync {
    async fn collect(&self) -> anyhow::Result<T>;
}
