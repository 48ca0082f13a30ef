pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::MapConfig;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "map-export")]
#[command(about = "Export a web map centered on a coordinate to a standalone HTML file")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output HTML file (default: map.html)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Center latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Center longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Initial zoom level (fractional zoom allowed)
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Tile provider name or URL template with {z}/{x}/{y}
    #[arg(long)]
    pub tiles: Option<String>,

    /// Attribution HTML for the tile layer
    #[arg(long)]
    pub attribution: Option<String>,

    /// Document title
    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Show the resolved configuration without writing anything")]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 預設值 → 設定檔 → 命令列，後者覆蓋前者
    pub fn to_map_config(&self) -> Result<MapConfig> {
        let mut config = match &self.config {
            Some(path) => MapConfig::from_file(path)?,
            None => MapConfig::default(),
        };

        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(lat) = self.lat {
            config.map.latitude = lat;
        }
        if let Some(lng) = self.lng {
            config.map.longitude = lng;
        }
        if let Some(zoom) = self.zoom {
            config.map.zoom_start = zoom;
        }
        if let Some(tiles) = &self.tiles {
            config.tiles.provider = tiles.clone();
        }
        if let Some(attribution) = &self.attribution {
            config.tiles.attribution = Some(attribution.clone());
        }
        if let Some(title) = &self.title {
            config.map.title = title.clone();
        }
        if self.monitor {
            config.monitoring.enabled = true;
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_args_gives_reference_map() {
        let cli = CliConfig::try_parse_from(["map-export"]).unwrap();
        let config = cli.to_map_config().unwrap();

        assert_eq!(config.map.latitude, 40.723204);
        assert_eq!(config.map.longitude, -73.923018);
        assert_eq!(config.map.zoom_start, 11.5);
        assert_eq!(config.tiles.provider, "OpenStreetMap");
        assert_eq!(config.output.path, "map.html");
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let toml_content = r#"
[map]
zoom_start = 9
title = "From file"

[output]
path = "file.html"
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::try_parse_from([
            "map-export",
            "--config",
            &path,
            "--lng",
            "-0.1276",
            "--output",
            "cli.html",
            "--monitor",
        ])
        .unwrap();
        let config = cli.to_map_config().unwrap();

        assert_eq!(config.map.zoom_start, 9.0);
        assert_eq!(config.map.title, "From file");
        assert_eq!(config.map.longitude, -0.1276);
        assert_eq!(config.output.path, "cli.html");
        assert!(config.monitoring_enabled());
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let cli = CliConfig {
            config: Some("/definitely/not/here.toml".to_string()),
            ..CliConfig::default()
        };
        assert!(matches!(
            cli.to_map_config(),
            Err(crate::utils::error::MapError::IoError(_))
        ));
    }
}
