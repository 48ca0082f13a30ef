//! Turns a [`MapView`] into a standalone Leaflet HTML document.
//!
//! Output is a pure function of the view: no generated ids, no timestamps, and
//! options are serialized through structs so key order is fixed. Rendering the
//! same view twice yields byte-identical documents.

use crate::domain::model::{LatLngArray, MapView};
use crate::utils::error::{MapError, Result};
use serde::Serialize;
use std::fmt::Write;

pub const LEAFLET_VERSION: &str = "1.9.4";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    center: LatLngArray,
    zoom: f64,
    min_zoom: u8,
    max_zoom: u8,
    zoom_control: bool,
    prefer_canvas: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    attribution: &'a str,
    min_zoom: u8,
    max_zoom: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    subdomains: Option<&'a str>,
    detect_retina: bool,
}

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serializes a value for embedding in an inline `<script>`.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    // "</script>" 不能出現在 script 區塊內
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn fmt_err(e: std::fmt::Error) -> MapError {
    MapError::RenderError {
        message: format!("failed to write HTML: {}", e),
    }
}

pub fn render_html(view: &MapView) -> Result<String> {
    let map_options = MapOptions {
        center: LatLngArray(view.center),
        zoom: view.zoom,
        min_zoom: view.min_zoom,
        max_zoom: view.max_zoom,
        zoom_control: view.zoom_control,
        prefer_canvas: view.prefer_canvas,
    };
    let tile_options = TileOptions {
        attribution: &view.tiles.attribution,
        min_zoom: view.min_zoom,
        max_zoom: view.tiles.max_zoom,
        subdomains: view.tiles.subdomains.as_deref(),
        detect_retina: false,
    };

    let var = format!("map_{}", view.element_id.replace('-', "_"));
    let id_json = script_json(&view.element_id)?;
    let map_json = script_json(&map_options)?;
    let url_json = script_json(&view.tiles.url_template)?;
    let tile_json = script_json(&tile_options)?;

    let mut html = String::with_capacity(2048);
    write_head(&mut html, view).map_err(fmt_err)?;

    (|| -> std::fmt::Result {
        writeln!(html, "<body>")?;
        writeln!(
            html,
            "    <div class=\"map-export\" id=\"{}\"></div>",
            escape_html(&view.element_id)
        )?;
        writeln!(html, "    <script>")?;
        writeln!(
            html,
            "        var {var} = L.map({id_json}, L.extend({{crs: L.CRS.{crs}}}, {map_json}));",
            crs = view.crs,
        )?;
        writeln!(
            html,
            "        var tile_layer_{var} = L.tileLayer({url_json}, {tile_json}).addTo({var});"
        )?;
        if view.control_scale {
            writeln!(html, "        L.control.scale().addTo({});", var)?;
        }
        writeln!(html, "    </script>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")
    })()
    .map_err(fmt_err)?;

    Ok(html)
}

fn write_head(html: &mut String, view: &MapView) -> std::fmt::Result {
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html>")?;
    writeln!(html, "<head>")?;
    writeln!(
        html,
        "    <meta http-equiv=\"content-type\" content=\"text/html; charset=UTF-8\" />"
    )?;
    writeln!(
        html,
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no\" />"
    )?;
    writeln!(html, "    <title>{}</title>", escape_html(&view.title))?;
    writeln!(
        html,
        "    <link rel=\"stylesheet\" href=\"https://cdn.jsdelivr.net/npm/leaflet@{}/dist/leaflet.css\" />",
        LEAFLET_VERSION
    )?;
    writeln!(
        html,
        "    <script src=\"https://cdn.jsdelivr.net/npm/leaflet@{}/dist/leaflet.js\"></script>",
        LEAFLET_VERSION
    )?;
    writeln!(
        html,
        "    <style>html, body {{width: 100%; height: 100%; margin: 0; padding: 0;}}</style>"
    )?;
    writeln!(
        html,
        "    <style>#{} {{position: relative; width: {}; height: {}; left: 0; top: 0;}}</style>",
        view.element_id, view.width, view.height
    )?;
    writeln!(html, "</head>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Crs, Dimension, LatLng, TileLayer};

    fn reference_view() -> MapView {
        MapView {
            title: "Map".to_string(),
            element_id: "map".to_string(),
            center: LatLng::new(40.723204, -73.923018),
            zoom: 11.5,
            min_zoom: 0,
            max_zoom: 19,
            crs: Crs::EPSG3857,
            width: Dimension::Percent(100.0),
            height: Dimension::Percent(100.0),
            zoom_control: true,
            control_scale: false,
            prefer_canvas: false,
            tiles: TileLayer {
                name: "OpenStreetMap".to_string(),
                url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
                attribution: "&copy; OpenStreetMap contributors".to_string(),
                max_zoom: 19,
                subdomains: None,
            },
        }
    }

    #[test]
    fn test_render_embeds_center_and_zoom() {
        let html = render_html(&reference_view()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("\"center\":[40.723204,-73.923018]"));
        assert!(html.contains("\"zoom\":11.5"));
        assert!(html.contains("L.CRS.EPSG3857"));
        assert!(html.contains("L.tileLayer(\"https://tile.openstreetmap.org/{z}/{x}/{y}.png\""));
        assert!(!html.contains("subdomains"));
        assert!(!html.contains("L.control.scale"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let view = reference_view();
        assert_eq!(render_html(&view).unwrap(), render_html(&view).unwrap());
    }

    /// Byte offset of `needle`, failing the test when it is absent.
    fn position(html: &str, needle: &str) -> usize {
        html.find(needle).unwrap_or_else(|| panic!("missing {}", needle))
    }

    #[test]
    fn test_elements_sit_in_their_sections() {
        let mut view = reference_view();
        view.control_scale = true;
        let html = render_html(&view).unwrap();

        let head_open = position(&html, "<head>");
        let head_close = position(&html, "</head>");
        let body_open = position(&html, "<body>");
        let body_close = position(&html, "</body>");
        let html_close = position(&html, "</html>");

        assert!(position(&html, "<!DOCTYPE html>") < position(&html, "<html>"));
        assert!(head_open < head_close && head_close < body_open);
        assert!(body_open < body_close && body_close < html_close);
        assert!(html.trim_end().ends_with("</html>"));

        // 每個 script 都必須在 head 或 body 之內，不能在 </body> 之後
        let mut from = 0;
        while let Some(offset) = html[from..].find("<script") {
            let open = from + offset;
            let close = open + position(&html[open..], "</script>");
            let in_head = open > head_open && close < head_close;
            let in_body = open > body_open && close < body_close;
            assert!(in_head || in_body, "script at byte {} is outside head/body", open);
            from = close;
        }

        let div = position(&html, "<div class=\"map-export\"");
        let inline_script = position(&html, "L.map(");
        assert!(body_open < div && div < inline_script && inline_script < body_close);
        assert!(html.rfind("</script>").unwrap() < body_close);
        assert_eq!(html.matches("<body>").count(), 1);
        assert_eq!(html.matches("</body>").count(), 1);
    }

    #[test]
    fn test_title_is_escaped() {
        let mut view = reference_view();
        view.title = "Rats & <Bagels>".to_string();
        let html = render_html(&view).unwrap();
        assert!(html.contains("<title>Rats &amp; &lt;Bagels&gt;</title>"));
    }

    #[test]
    fn test_attribution_cannot_close_script() {
        let mut view = reference_view();
        view.tiles.attribution = "evil</script><script>alert(1)".to_string();
        let html = render_html(&view).unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
        assert!(html.contains("evil<\\/script>"));
    }

    #[test]
    fn test_optional_controls_and_subdomains() {
        let mut view = reference_view();
        view.control_scale = true;
        view.crs = Crs::EPSG4326;
        view.width = Dimension::Pixels(640);
        view.tiles.subdomains = Some("abcd".to_string());
        let html = render_html(&view).unwrap();
        assert!(html.contains("L.control.scale().addTo(map_map);"));
        assert!(html.contains("L.CRS.EPSG4326"));
        assert!(html.contains("\"subdomains\":\"abcd\""));
        assert!(html.contains("width: 640px; height: 100%"));
    }
}
