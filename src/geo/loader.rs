//! One-shot world atlas download.
//!
//! The fetch is async but egui's update() is synchronous, so the decoded
//! layers are handed back to the UI thread through a channel.

use super::{GeoLayerSet, GeoLoadError};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};

type LoadResult = Result<GeoLayerSet, GeoLoadError>;

/// Channel carrying the result of the atlas download.
pub struct GeoLoadChannel {
    sender: Sender<LoadResult>,
    receiver: Receiver<LoadResult>,
}

impl Default for GeoLoadChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoLoadChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Starts fetching and decoding the topology at `url`.
    ///
    /// There is no retry. If the app is gone by the time the response
    /// arrives, the result is dropped.
    #[cfg(target_arch = "wasm32")]
    pub fn load(&self, ctx: egui::Context, url: String) {
        let sender = self.sender.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let result = match fetch_text(&url).await {
                Ok(text) => decode(&text),
                Err(e) => Err(e),
            };
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Native fetch on a worker thread.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(&self, ctx: egui::Context, url: String) {
        let sender = self.sender.clone();

        std::thread::spawn(move || {
            let result = fetch_text_blocking(&url).and_then(|text| decode(&text));
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Non-blocking check for a finished load.
    pub fn try_recv(&self) -> Option<LoadResult> {
        self.receiver.try_recv().ok()
    }
}

fn decode(text: &str) -> LoadResult {
    log::info!("Downloaded world atlas ({} bytes)", text.len());
    let layers = GeoLayerSet::from_topology_json(text)?;
    let points: usize = layers
        .iter()
        .flat_map(|layer| layer.features.iter())
        .map(|feature| feature.point_count())
        .sum();
    log::info!(
        "Decoded {} land and {} country features ({} points)",
        layers.land.features.len(),
        layers.countries.features.len(),
        points
    );
    Ok(layers)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, GeoLoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| GeoLoadError::Request(format!("{:?}", e)))?;

    let window = web_sys::window().ok_or_else(|| GeoLoadError::Request("No window".into()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| GeoLoadError::Request(format!("{:?}", e)))?;

    let response: Response = response
        .dyn_into()
        .map_err(|_| GeoLoadError::Request("Fetch did not return a Response".into()))?;

    if !response.ok() {
        return Err(GeoLoadError::Http(response.status()));
    }

    let body = response
        .text()
        .map_err(|e| GeoLoadError::Body(format!("{:?}", e)))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|e| GeoLoadError::Body(format!("{:?}", e)))?;

    text.as_string()
        .ok_or_else(|| GeoLoadError::Body("Response body is not text".into()))
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_text_blocking(url: &str) -> Result<String, GeoLoadError> {
    let response =
        reqwest::blocking::get(url).map_err(|e| GeoLoadError::Request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GeoLoadError::Http(status.as_u16()));
    }

    response.text().map_err(|e| GeoLoadError::Body(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_before_load() {
        let channel = GeoLoadChannel::new();
        assert!(channel.try_recv().is_none());
    }

    #[test]
    fn test_result_is_delivered_once() {
        let channel = GeoLoadChannel::new();
        let sender = channel.sender.clone();
        let _ = sender.send(decode("not json"));

        assert!(matches!(channel.try_recv(), Some(Err(GeoLoadError::Parse(_)))));
        assert!(channel.try_recv().is_none());
    }

    #[test]
    fn test_decode_world() {
        let json = r#"{"type":"Topology",
            "objects":{
                "land":{"type":"GeometryCollection","geometries":[{"type":"Polygon","arcs":[[0]]}]},
                "countries":{"type":"GeometryCollection","geometries":[]}
            },
            "arcs":[[[0,0],[1,0],[1,1],[0,0]]]}"#;
        let layers = decode(json).unwrap();
        assert_eq!(layers.land.features.len(), 1);
        assert!(layers.countries.features.is_empty());
    }
}
