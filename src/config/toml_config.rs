use crate::core::tiles::TileProvider;
use crate::core::ConfigProvider;
use crate::domain::model::{Crs, Dimension, LatLng};
use crate::utils::error::{MapError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LATITUDE: f64 = 40.723204;
pub const DEFAULT_LONGITUDE: f64 = -73.923018;
pub const DEFAULT_ZOOM: f64 = 11.5;
pub const DEFAULT_TILES: &str = "OpenStreetMap";
pub const DEFAULT_OUTPUT: &str = "map.html";

/// Leaflet 能處理的最大縮放等級
pub const MAX_ZOOM_LEVEL: u8 = 24;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub map: MapSettings,
    pub tiles: TileSettings,
    pub output: OutputSettings,
    pub monitoring: MonitoringSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub title: String,
    pub element_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub zoom_start: f64,
    pub min_zoom: u8,
    pub max_zoom: Option<u8>,
    pub crs: Crs,
    pub width: Dimension,
    pub height: Dimension,
    pub zoom_control: bool,
    pub control_scale: bool,
    pub prefer_canvas: bool,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            title: "Map".to_string(),
            element_id: "map".to_string(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            zoom_start: DEFAULT_ZOOM,
            min_zoom: 0,
            max_zoom: None,
            crs: Crs::default(),
            width: Dimension::default(),
            height: Dimension::default(),
            zoom_control: true,
            control_scale: false,
            prefer_canvas: false,
        }
    }
}

impl MapSettings {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSettings {
    /// 內建圖磚名稱，或含 `{z}/{x}/{y}` 的 URL 模板
    pub provider: String,
    pub attribution: Option<String>,
    pub max_zoom: Option<u8>,
    pub subdomains: Option<String>,
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            provider: DEFAULT_TILES.to_string(),
            attribution: None,
            max_zoom: None,
            subdomains: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub path: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringSettings {
    pub enabled: bool,
}

impl MapConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MapError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TILE_URL})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MapError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let map = &self.map;

        validation::validate_non_empty_string("map.title", &map.title)?;
        validation::validate_non_empty_string("map.element_id", &map.element_id)?;
        if !map
            .element_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(MapError::invalid_value(
                "map.element_id",
                &map.element_id,
                "Only ASCII letters, digits, '_' and '-' are allowed",
            ));
        }

        validation::validate_range("map.latitude", map.latitude, -90.0, 90.0)?;
        validation::validate_range("map.longitude", map.longitude, -180.0, 180.0)?;

        let max_zoom = self.effective_max_zoom()?;
        validation::validate_range("map.min_zoom", map.min_zoom, 0, max_zoom)?;
        validation::validate_range(
            "map.zoom_start",
            map.zoom_start,
            f64::from(map.min_zoom),
            f64::from(max_zoom),
        )?;

        for (field, dim) in [("map.width", map.width), ("map.height", map.height)] {
            if let Dimension::Pixels(px) = dim {
                validation::validate_positive_number(field, px, 1)?;
            }
        }

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_file_extension("output.path", &self.output.path, &["html", "htm"])?;

        Ok(())
    }

    /// 視圖的最大縮放：明確設定優先，否則沿用圖磚供應者的上限
    pub fn effective_max_zoom(&self) -> Result<u8> {
        let provider_max = TileProvider::resolve(&self.tiles)?.max_zoom;
        let max_zoom = self.map.max_zoom.unwrap_or(provider_max);
        validation::validate_range("map.max_zoom", max_zoom, 0, MAX_ZOOM_LEVEL)?;
        Ok(max_zoom)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }
}

impl ConfigProvider for MapConfig {
    fn map_settings(&self) -> &MapSettings {
        &self.map
    }

    fn tile_settings(&self) -> &TileSettings {
        &self.tiles
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }
}

impl Validate for MapConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
