use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::PricingSettings;

/// Storage of site-wide settings.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Current nightly price, `None` if it was never set.
    async fn get_pricing(&self) -> RepositoryResult<Option<PricingSettings>>;

    /// Replace the nightly price.
    async fn set_pricing(&self, pricing: &PricingSettings) -> RepositoryResult<()>;
}
