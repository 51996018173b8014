#![cfg(target_arch = "wasm32")]

use site_canvas::components::canvas_board::{BoardDocument, CanvasMount};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

const BOARD: &str = r#"{
	"nodes": [
		{"id": "t", "type": "text", "x": 10, "y": 10, "width": 200, "height": 80, "text": "hello"},
		{"id": "g", "type": "group", "x": 0, "y": 0, "width": 400, "height": 300, "label": "Box"}
	],
	"edges": [
		{"id": "e1", "fromNode": "g", "toNode": "t"},
		{"id": "e2", "fromNode": "t", "toNode": "missing"}
	]
}"#;

fn host() -> HtmlElement {
	let document = web_sys::window().unwrap().document().unwrap();
	let host: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
	host.style().set_property("width", "800px").unwrap();
	host.style().set_property("height", "600px").unwrap();
	document.body().unwrap().append_child(&host).unwrap();
	host
}

#[wasm_bindgen_test]
fn groups_render_before_other_nodes() {
	let host = host();
	let doc = BoardDocument::from_json(BOARD).unwrap();
	let mount = CanvasMount::mount(&host, &doc).unwrap();

	let nodes = host.query_selector_all(".node").unwrap();
	let ids: Vec<String> = (0..nodes.length())
		.filter_map(|i| nodes.get(i))
		.filter_map(|n| n.dyn_into::<Element>().ok())
		.map(|el| el.id())
		.collect();
	assert_eq!(ids, ["node-g", "node-t"]);
	assert!(mount.is_mounted());
}

#[wasm_bindgen_test]
fn dangling_edges_are_skipped() {
	let host = host();
	let doc = BoardDocument::from_json(BOARD).unwrap();
	let _mount = CanvasMount::mount(&host, &doc).unwrap();

	let paths = host.query_selector_all("#edges-layer path.edge").unwrap();
	assert_eq!(paths.length(), 1);
	assert!(host.query_selector("#arrow-head").unwrap().is_some());
}

#[wasm_bindgen_test]
fn unmount_clears_the_host() {
	let host = host();
	let doc = BoardDocument::from_json(BOARD).unwrap();
	let mut mount = CanvasMount::mount(&host, &doc).unwrap();
	mount.unmount();
	mount.unmount();

	assert!(!mount.is_mounted());
	assert!(host.query_selector("#canvas-world").unwrap().is_none());
}

const FILE_BOARD: &str = r#"{
	"nodes": [
		{"id": "f", "type": "file", "x": 0, "y": 0, "width": 200, "height": 120, "file": "data/table.csv"},
		{"id": "t", "type": "text", "x": 300, "y": 0, "width": 200, "height": 80, "text": "drag me"}
	],
	"edges": []
}"#;

fn press(target: &Element) {
	let init = MouseEventInit::new();
	init.set_bubbles(true);
	init.set_client_x(40);
	init.set_client_y(40);
	let ev = MouseEvent::new_with_mouse_event_init_dict("mousedown", &init).unwrap();
	target.dispatch_event(&ev).unwrap();
}

#[wasm_bindgen_test]
fn node_headers_do_not_start_a_pan() {
	let host = host();
	let doc = BoardDocument::from_json(FILE_BOARD).unwrap();
	let mount = CanvasMount::mount(&host, &doc).unwrap();

	let header = host.query_selector("#node-f .canvas-node-header").unwrap().unwrap();
	press(&header);
	assert!(!mount.viewport().is_panning());

	let body = host.query_selector("#node-t").unwrap().unwrap();
	press(&body);
	assert!(mount.viewport().is_panning());

	let release = MouseEvent::new("mouseup").unwrap();
	web_sys::window().unwrap().dispatch_event(&release).unwrap();
	assert!(!mount.viewport().is_panning());
}
