use crate::core::render::render_html;
use crate::core::tiles::TileProvider;
use crate::core::{ConfigProvider, Exporter, MapView, RenderedMap, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

/// Builds an HTML map from configuration and writes it through a [`Storage`].
pub struct HtmlMapPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> HtmlMapPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Exporter for HtmlMapPipeline<S, C> {
    async fn build(&self) -> Result<MapView> {
        // 值會直接寫進 HTML 與 JS，渲染前一律先驗證
        self.config.validate()?;

        let settings = self.config.map_settings();
        let tiles = TileProvider::resolve(self.config.tile_settings())?;
        let max_zoom = settings.max_zoom.unwrap_or(tiles.max_zoom);

        tracing::debug!(
            "Map view: center=({}, {}), zoom={}, tiles={}",
            settings.latitude,
            settings.longitude,
            settings.zoom_start,
            tiles.name
        );

        Ok(MapView {
            title: settings.title.clone(),
            element_id: settings.element_id.clone(),
            center: settings.center(),
            zoom: settings.zoom_start,
            min_zoom: settings.min_zoom,
            max_zoom,
            crs: settings.crs,
            width: settings.width,
            height: settings.height,
            zoom_control: settings.zoom_control,
            control_scale: settings.control_scale,
            prefer_canvas: settings.prefer_canvas,
            tiles,
        })
    }

    async fn render(&self, view: MapView) -> Result<RenderedMap> {
        let html = render_html(&view)?;
        tracing::debug!("Rendered {} bytes of HTML", html.len());

        Ok(RenderedMap {
            file_name: self.config.output_path().to_string(),
            html,
        })
    }

    async fn load(&self, rendered: RenderedMap) -> Result<String> {
        tracing::info!("💾 Writing map to storage");
        self.storage
            .write_file(&rendered.file_name, rendered.html.as_bytes())
            .await?;

        let written = Path::new(&rendered.file_name).display().to_string();
        tracing::info!("🗺️ Map saved: {}", written);
        Ok(written)
    }
}
