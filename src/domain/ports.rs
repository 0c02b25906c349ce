use crate::domain::request::InspectionRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Hosted multimodal model that answers an inspection request with raw text.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, request: &InspectionRequest) -> Result<String>;

    /// Text-only round trip, used to check credentials and quota.
    async fn ping(&self, prompt: &str) -> Result<String>;

    fn model_name(&self) -> &str;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn model(&self) -> &str;
    fn endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}
