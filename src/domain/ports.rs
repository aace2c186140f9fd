use crate::config::settings::Settings;
use crate::domain::model::{Harvest, WideTable};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Retrieves the raw markup behind a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn settings(&self) -> &Settings;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Harvest>;
    async fn transform(&self, harvest: Harvest) -> Result<WideTable>;
    async fn load(&self, table: WideTable) -> Result<String>;
}
