use crate::config::toml_config::{MapSettings, TileSettings};
use crate::domain::model::{MapView, RenderedMap};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Settings a pipeline renders from. `validate` runs before any value is
/// written into the document.
pub trait ConfigProvider: Validate + Send + Sync {
    fn map_settings(&self) -> &MapSettings;
    fn tile_settings(&self) -> &TileSettings;
    fn output_path(&self) -> &str;
}

/// The three phases of a map export: resolve settings into a view, turn it
/// into a document, then persist the document.
#[async_trait]
pub trait Exporter: Send + Sync {
    async fn build(&self) -> Result<MapView>;
    async fn render(&self, view: MapView) -> Result<RenderedMap>;
    async fn load(&self, rendered: RenderedMap) -> Result<String>;
}
