//! URL state encoding/decoding for shareable URLs.
//!
//! Encodes the camera position and theme in the URL query string so
//! reloading restores the view and URLs can be shared.

use super::theme::ThemeKey;
use super::view::CameraPosition;

/// Parsed URL parameters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UrlParams {
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub theme: Option<ThemeKey>,
}

impl UrlParams {
    /// The position, if both coordinates are present.
    pub fn position(&self) -> Option<CameraPosition> {
        match (self.lon, self.lat) {
            (Some(lon), Some(lat)) => Some(CameraPosition::new(lon, lat)),
            _ => None,
        }
    }
}

/// Parses a query string (with or without the leading `?`).
///
/// Unparseable numbers and unknown theme keys are dropped.
pub fn parse_query(search: &str) -> UrlParams {
    let mut params = UrlParams::default();

    let query = search.trim_start_matches('?');
    if query.is_empty() {
        return params;
    }

    for pair in query.split('&') {
        let mut kv = pair.splitn(2, '=');
        let key = kv.next().unwrap_or("");
        let value = kv.next().unwrap_or("");
        match key {
            "lon" => params.lon = parse_coordinate(value),
            "lat" => params.lat = parse_coordinate(value),
            "theme" => params.theme = ThemeKey::from_key(value),
            _ => {}
        }
    }

    params
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Builds the query string for a view (`?lon=..&lat=..&theme=..`).
///
/// Coordinates use the shortest representation that parses back exactly.
pub fn build_query(position: CameraPosition, theme: ThemeKey) -> String {
    format!(
        "?lon={}&lat={}&theme={}",
        position.lon,
        position.lat,
        theme.key()
    )
}

/// Parse URL query parameters from the current browser URL.
#[cfg(target_arch = "wasm32")]
pub fn parse_from_url() -> UrlParams {
    let Some(window) = web_sys::window() else {
        return UrlParams::default();
    };

    match window.location().search() {
        Ok(search) => parse_query(&search),
        Err(e) => {
            log::warn!("Failed to read location.search: {:?}", e);
            UrlParams::default()
        }
    }
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn parse_from_url() -> UrlParams {
    UrlParams::default()
}

/// Current page URL with `lon`, `lat` and `theme` set; other parameters are
/// preserved.
#[cfg(target_arch = "wasm32")]
pub fn share_url(position: CameraPosition, theme: ThemeKey) -> Result<String, String> {
    let window = web_sys::window().ok_or("no window")?;
    let href = window
        .location()
        .href()
        .map_err(|e| format!("Failed to read location: {:?}", e))?;
    let url = web_sys::Url::new(&href).map_err(|e| format!("Invalid URL {}: {:?}", href, e))?;

    let params = url.search_params();
    params.set("lon", &position.lon.to_string());
    params.set("lat", &position.lat.to_string());
    params.set("theme", theme.key());

    Ok(url.href())
}

/// Native builds have no page URL; the bare query is returned.
#[cfg(not(target_arch = "wasm32"))]
pub fn share_url(position: CameraPosition, theme: ThemeKey) -> Result<String, String> {
    Ok(build_query(position, theme))
}

/// Rewrite the URL query string in place using `replaceState`.
///
/// No history entry is added and the page is not reloaded.
#[cfg(target_arch = "wasm32")]
pub fn push_to_url(position: CameraPosition, theme: ThemeKey) -> Result<(), String> {
    let url = share_url(position, theme)?;

    let window = web_sys::window().ok_or("no window")?;
    let history = window
        .history()
        .map_err(|e| format!("No history: {:?}", e))?;
    history
        .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
        .map_err(|e| format!("replaceState failed: {:?}", e))
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn push_to_url(position: CameraPosition, theme: ThemeKey) -> Result<(), String> {
    log::debug!("URL state: {}", build_query(position, theme));
    Ok(())
}
