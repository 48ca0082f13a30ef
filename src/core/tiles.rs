use crate::config::toml_config::TileSettings;
use crate::domain::model::TileLayer;
use crate::utils::error::{MapError, Result};
use crate::utils::validation;

const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const CARTO_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";
const TOPO_ATTRIBUTION: &str = "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, <a href=\"http://viewfinderpanoramas.org\">SRTM</a> | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> (<a href=\"https://creativecommons.org/licenses/by-sa/3.0/\">CC-BY-SA</a>)";

/// A tile source known by name.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinProvider {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub url_template: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
    pub subdomains: Option<&'static str>,
}

pub const BUILTIN_PROVIDERS: &[BuiltinProvider] = &[
    BuiltinProvider {
        name: "OpenStreetMap",
        aliases: &["OpenStreetMap.Mapnik", "OSM"],
        url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: OSM_ATTRIBUTION,
        max_zoom: 19,
        subdomains: None,
    },
    BuiltinProvider {
        name: "CartoDB positron",
        aliases: &["CartoDB.Positron"],
        url_template: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
        attribution: CARTO_ATTRIBUTION,
        max_zoom: 20,
        subdomains: Some("abcd"),
    },
    BuiltinProvider {
        name: "CartoDB dark_matter",
        aliases: &["CartoDB.DarkMatter"],
        url_template: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        attribution: CARTO_ATTRIBUTION,
        max_zoom: 20,
        subdomains: Some("abcd"),
    },
    BuiltinProvider {
        name: "OpenTopoMap",
        aliases: &[],
        url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        attribution: TOPO_ATTRIBUTION,
        max_zoom: 17,
        subdomains: Some("abc"),
    },
];

/// 名稱比對時忽略大小寫、空白、底線、點與連字號
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '.' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_url_template(value: &str) -> bool {
    ["{z}", "{x}", "{y}"].iter().all(|p| value.contains(p))
}

pub struct TileProvider;

impl TileProvider {
    pub fn known_names() -> String {
        BUILTIN_PROVIDERS
            .iter()
            .map(|p| p.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn lookup(name: &str) -> Option<&'static BuiltinProvider> {
        let wanted = normalize(name);
        BUILTIN_PROVIDERS.iter().find(|p| {
            normalize(p.name) == wanted || p.aliases.iter().any(|a| normalize(a) == wanted)
        })
    }

    /// Turns tile settings into a concrete layer. Built-in names win; anything
    /// with `{z}`, `{x}` and `{y}` placeholders is a custom template.
    pub fn resolve(settings: &TileSettings) -> Result<TileLayer> {
        let provider = settings.provider.trim();

        if let Some(builtin) = Self::lookup(provider) {
            tracing::debug!("Resolved tile provider '{}' to {}", provider, builtin.name);
            return Ok(TileLayer {
                name: builtin.name.to_string(),
                url_template: builtin.url_template.to_string(),
                attribution: settings
                    .attribution
                    .clone()
                    .unwrap_or_else(|| builtin.attribution.to_string()),
                max_zoom: settings.max_zoom.unwrap_or(builtin.max_zoom),
                subdomains: settings
                    .subdomains
                    .clone()
                    .or_else(|| builtin.subdomains.map(str::to_string)),
            });
        }

        if is_url_template(provider) {
            return Self::resolve_custom(provider, settings);
        }

        Err(MapError::UnknownTileProvider {
            name: provider.to_string(),
            known: Self::known_names(),
        })
    }

    fn resolve_custom(template: &str, settings: &TileSettings) -> Result<TileLayer> {
        let attribution =
            validation::validate_required_field("tiles.attribution", &settings.attribution)?;
        validation::validate_non_empty_string("tiles.attribution", attribution)?;

        let subdomain = settings
            .subdomains
            .as_deref()
            .and_then(|s| s.chars().next())
            .unwrap_or('a');
        let sample = template
            .replace("{s}", &subdomain.to_string())
            .replace("{z}", "0")
            .replace("{x}", "0")
            .replace("{y}", "0")
            .replace("{r}", "");
        validation::validate_url("tiles.provider", &sample)?;

        Ok(TileLayer {
            name: "custom".to_string(),
            url_template: template.to_string(),
            attribution: attribution.clone(),
            max_zoom: settings.max_zoom.unwrap_or(18),
            subdomains: settings.subdomains.clone(),
        })
    }
}
