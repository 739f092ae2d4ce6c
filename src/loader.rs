//! Loading the co-authorship payload.
//!
//! The payload is read from an inline `<script id="graph-data">` element when
//! the page embeds one, otherwise it is fetched once from the configured URL.

use log::info;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlScriptElement, Request, RequestInit, RequestMode, Response};

use crate::components::force_graph::GraphData;
use crate::config::GraphConfig;

/// Id of the optional inline data element.
pub const INLINE_DATA_ID: &str = "graph-data";

/// Why the payload could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("browser window is not available")]
	NoWindow,
	#[error("request failed: {0}")]
	Fetch(String),
	#[error("server responded with HTTP {status} for {url}")]
	Status { status: u16, url: String },
	#[error("could not read response body: {0}")]
	Body(String),
	#[error("invalid graph JSON: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Parse a JSON payload.
pub fn parse_graph(text: &str) -> Result<GraphData, LoadError> {
	let data: GraphData = serde_json::from_str(text)?;
	info!(
		"coauthor-graph: loaded {} authors, {} collaborations",
		data.nodes.len(),
		data.links.len()
	);
	Ok(data)
}

/// Load the payload from the page or the network.
pub async fn load_graph_data(config: &GraphConfig) -> Result<GraphData, LoadError> {
	let window = web_sys::window().ok_or(LoadError::NoWindow)?;

	if let Some(text) = window.document().as_ref().and_then(inline_graph_data) {
		info!("coauthor-graph: using inline #{INLINE_DATA_ID} payload");
		return parse_graph(&text);
	}

	info!("coauthor-graph: fetching {}", config.data_url);
	let text = fetch_text(&window, &config.data_url).await?;
	parse_graph(&text)
}

fn inline_graph_data(document: &Document) -> Option<String> {
	let element = document.get_element_by_id(INLINE_DATA_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok().filter(|t| !t.trim().is_empty())
}

async fn fetch_text(window: &web_sys::Window, url: &str) -> Result<String, LoadError> {
	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::Cors);

	let request = Request::new_with_str_and_init(url, &opts)
		.map_err(|e| LoadError::Fetch(js_error_message(&e)))?;
	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| LoadError::Fetch(js_error_message(&e)))?
		.dyn_into()
		.map_err(|e| LoadError::Fetch(js_error_message(&e)))?;

	if !response.ok() {
		return Err(LoadError::Status {
			status: response.status(),
			url: url.to_string(),
		});
	}

	let body = response
		.text()
		.map_err(|e| LoadError::Body(js_error_message(&e)))?;
	JsFuture::from(body)
		.await
		.map_err(|e| LoadError::Body(js_error_message(&e)))?
		.as_string()
		.ok_or_else(|| LoadError::Body("response body is not text".to_string()))
}

/// Best-effort human readable text for a thrown JS value.
fn js_error_message(value: &JsValue) -> String {
	if let Some(error) = value.dyn_ref::<js_sys::Error>() {
		return String::from(error.message());
	}
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
