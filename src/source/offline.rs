//! Source used when no provider is configured

use super::MarketDataSource;
use crate::error::SourceError;
use crate::quote::Quote;
use async_trait::async_trait;

/// Always declines, so every quote is synthesized
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

#[async_trait]
impl MarketDataSource for OfflineSource {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn fetch(&self, _symbol: &str) -> Result<Quote, SourceError> {
        Err(SourceError::Disabled)
    }
}
