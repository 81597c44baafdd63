use log::info;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement};

use crate::graph::EditorSession;

use super::render::{Viewport, paint};

const FILE_NAME: &str = "graph.png";

/// Rasterizes the graph onto an offscreen canvas framed around the nodes and downloads it as
/// a PNG. An empty graph exports nothing.
pub fn export_png(session: &EditorSession) -> Result<(), JsValue> {
	let Some(frame) = session.export_frame() else {
		return Ok(());
	};
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;

	let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
	canvas.set_width(frame.width);
	canvas.set_height(frame.height);
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("2d context unavailable"))?
		.dyn_into()?;

	paint(
		session,
		&ctx,
		&Viewport {
			origin: frame.origin,
			width: frame.width as f64,
			height: frame.height as f64,
			highlight: None,
		},
	);

	let url = canvas.to_data_url_with_type("image/png")?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(FILE_NAME);
	anchor.click();
	info!("Exported {}x{} image to {FILE_NAME}", frame.width, frame.height);
	Ok(())
}
