use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::MapError;

/// A geographic coordinate in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Serializes a coordinate the way Leaflet expects it: `[lat, lng]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LatLngArray(pub LatLng);

impl Serialize for LatLngArray {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.0.lat, self.0.lng].serialize(serializer)
    }
}

/// Coordinate reference system used by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Crs {
    #[default]
    EPSG3857,
    EPSG4326,
    EPSG3395,
    Simple,
}

impl Crs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Crs::EPSG3857 => "EPSG3857",
            Crs::EPSG4326 => "EPSG4326",
            Crs::EPSG3395 => "EPSG3395",
            Crs::Simple => "Simple",
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Crs {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace([':', '_', '-'], "").as_str() {
            "EPSG3857" => Ok(Crs::EPSG3857),
            "EPSG4326" => Ok(Crs::EPSG4326),
            "EPSG3395" => Ok(Crs::EPSG3395),
            "SIMPLE" => Ok(Crs::Simple),
            _ => Err(MapError::invalid_value(
                "map.crs",
                s,
                "Supported values: EPSG3857, EPSG4326, EPSG3395, Simple",
            )),
        }
    }
}

impl TryFrom<String> for Crs {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Crs> for String {
    fn from(value: Crs) -> Self {
        value.as_str().to_string()
    }
}

/// Size of the map element, either relative to its container or fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dimension {
    Percent(f64),
    Pixels(u32),
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Percent(100.0)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Percent(p) => write!(f, "{}%", p),
            Dimension::Pixels(px) => write!(f, "{}px", px),
        }
    }
}

impl FromStr for Dimension {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(pct) = trimmed.strip_suffix('%') {
            let value: f64 = pct.trim().parse().map_err(|_| {
                MapError::invalid_value("dimension", s, "Expected a number before '%'")
            })?;
            if !(value > 0.0 && value <= 100.0) {
                return Err(MapError::invalid_value(
                    "dimension",
                    s,
                    "Percentage must be in (0, 100]",
                ));
            }
            return Ok(Dimension::Percent(value));
        }

        let px = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
        match px.parse::<u32>() {
            Ok(0) => Err(MapError::invalid_value("dimension", s, "Size must be positive")),
            Ok(value) => Ok(Dimension::Pixels(value)),
            Err(_) => Err(MapError::invalid_value(
                "dimension",
                s,
                "Expected a percentage like '100%' or pixels like '600px'",
            )),
        }
    }
}

impl TryFrom<String> for Dimension {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dimension> for String {
    fn from(value: Dimension) -> Self {
        value.to_string()
    }
}

/// A resolved raster tile source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
    pub subdomains: Option<String>,
}

/// Everything the renderer needs to produce one map document.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub title: String,
    pub element_id: String,
    pub center: LatLng,
    pub zoom: f64,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub crs: Crs,
    pub width: Dimension,
    pub height: Dimension,
    pub zoom_control: bool,
    pub control_scale: bool,
    pub prefer_canvas: bool,
    pub tiles: TileLayer,
}

#[derive(Debug, Clone)]
pub struct RenderedMap {
    pub file_name: String,
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_parsing() {
        assert_eq!("100%".parse::<Dimension>().unwrap(), Dimension::Percent(100.0));
        assert_eq!("62.5 %".parse::<Dimension>().unwrap(), Dimension::Percent(62.5));
        assert_eq!("600px".parse::<Dimension>().unwrap(), Dimension::Pixels(600));
        assert_eq!("480".parse::<Dimension>().unwrap(), Dimension::Pixels(480));
        assert!("0px".parse::<Dimension>().is_err());
        assert!("150%".parse::<Dimension>().is_err());
        assert!("wide".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::Percent(100.0).to_string(), "100%");
        assert_eq!(Dimension::Percent(62.5).to_string(), "62.5%");
        assert_eq!(Dimension::Pixels(600).to_string(), "600px");
    }

    #[test]
    fn test_crs_parsing_is_lenient() {
        assert_eq!("EPSG:4326".parse::<Crs>().unwrap(), Crs::EPSG4326);
        assert_eq!("epsg3857".parse::<Crs>().unwrap(), Crs::EPSG3857);
        assert_eq!("simple".parse::<Crs>().unwrap(), Crs::Simple);
        assert!("EPSG:2056".parse::<Crs>().is_err());
    }

    #[test]
    fn test_latlng_serializes_as_array() {
        let json =
            serde_json::to_string(&LatLngArray(LatLng::new(40.723204, -73.923018))).unwrap();
        assert_eq!(json, "[40.723204,-73.923018]");
    }
}
