use crate::core::Exporter;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ExportEngine<E: Exporter> {
    exporter: E,
    monitor: SystemMonitor,
}

impl<E: Exporter> ExportEngine<E> {
    pub fn new(exporter: E) -> Self {
        Self::new_with_monitoring(exporter, false)
    }

    pub fn new_with_monitoring(exporter: E, monitor_enabled: bool) -> Self {
        Self {
            exporter,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs build, render and load in order and returns the written path.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting map export");

        tracing::info!("🧭 Building map view...");
        let view = self.exporter.build().await?;
        tracing::info!(
            "Center ({}, {}) at zoom {} on {}",
            view.center.lat,
            view.center.lng,
            view.zoom,
            view.tiles.name
        );
        self.monitor.log_phase("Build");

        tracing::info!("🎨 Rendering HTML...");
        let rendered = self.exporter.render(view).await?;
        let document_bytes = rendered.html.len();
        self.monitor.log_phase("Render");

        tracing::info!("💾 Saving map...");
        let output_path = self.exporter.load(rendered).await?;
        self.monitor.log_phase("Load");

        self.monitor.log_final_stats(document_bytes);
        Ok(output_path)
    }
}
