use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use super::note;
use super::scene::{Header, NodeContent, NoteBody, Scene, SceneNode};
use super::viewport::Viewport;

const LINK_SANDBOX: &str = "allow-scripts allow-same-origin allow-popups allow-forms";

#[derive(Clone, Debug, PartialEq)]
enum NoteState {
	Loading,
	Ready(String),
	Failed,
}

/// The world layer (edges plus nodes) and the zoom controls.
#[component]
pub fn CanvasBoard(scene: Scene, viewport: ArcRwSignal<Viewport>) -> impl IntoView {
	let world_ref = NodeRef::<leptos::html::Div>::new();
	let bounds = scene.bounds();

	let vp = viewport.clone();
	let transform = move || vp.with(Viewport::css_transform);

	let vp = viewport.clone();
	let zoom_in = move |_| vp.update(Viewport::zoom_in);
	let vp = viewport.clone();
	let zoom_out = move |_| vp.update(Viewport::zoom_out);
	let vp = viewport;
	let reset = move |_| {
		let (Some(bounds), Some(world)) = (bounds, world_ref.get()) else {
			return;
		};
		let Some(host) = world.parent_element() else {
			return;
		};
		let (w, h) = (host.client_width() as f64, host.client_height() as f64);
		vp.update(|v| v.fit(bounds, w, h));
	};

	let edges = scene
		.edges
		.into_iter()
		.map(|edge| {
			view! { <path class="edge" d=edge.d stroke=edge.stroke marker-end="url(#arrow-head)" /> }
		})
		.collect_view();
	let nodes = scene
		.nodes
		.into_iter()
		.map(|node| view! { <BoardNodeView node=node /> })
		.collect_view();

	view! {
		<div id="canvas-world" class="canvas-world" node_ref=world_ref style:transform=transform>
			<svg id="edges-layer" class="edges-layer" style="z-index: 50; pointer-events: none;">
				<defs>
					<marker
						id="arrow-head"
						viewBox="0 0 10 10"
						refX="6"
						refY="5"
						markerWidth="4"
						markerHeight="4"
						orient="auto"
					>
						<path d="M 0 0 L 10 5 L 0 10 z" fill="#999" />
					</marker>
				</defs>
				{edges}
			</svg>
			{nodes}
		</div>
		<div class="canvas-controls">
			<button class="canvas-control" title="Zoom in" on:click=zoom_in>
				"+"
			</button>
			<button class="canvas-control" title="Zoom out" on:click=zoom_out>
				"−"
			</button>
			<button class="canvas-control" title="Reset view" on:click=reset>
				"⤢"
			</button>
		</div>
	}
}

#[component]
fn BoardNodeView(node: SceneNode) -> impl IntoView {
	let (id, class, style) = (node.dom_id(), node.class(), node.style());
	let inner = match node.content {
		NodeContent::Group { label } => label
			.map(|label| view! { <div class="canvas-group-label">{label}</div> })
			.into_any(),
		NodeContent::Text { html } => view! { <div class="node-note" inner_html=html></div> }.into_any(),
		NodeContent::Image { src, alt } => view! {
			<div class="canvas-node-image">
				<img src=src alt=alt draggable="false" />
			</div>
		}
		.into_any(),
		NodeContent::Note { header, body } => view! {
			<NodeHeader header=header />
			<NoteBox body=body />
		}
		.into_any(),
		NodeContent::File { header, name } => view! {
			<NodeHeader header=header />
			<div class="canvas-node-content-box">
				<div class="canvas-node-fallback">
					<span>{name}</span>
				</div>
			</div>
		}
		.into_any(),
		NodeContent::Link { url } => view! {
			<div class="canvas-node-header">
				<a href=url.clone() target="_blank">
					{url.clone()}
				</a>
			</div>
			<div class="canvas-node-content-box" style="padding: 0; overflow: hidden;">
				<iframe
					src=url
					sandbox=LINK_SANDBOX
					style="width: 100%; height: 100%; border: none;"
				></iframe>
			</div>
		}
		.into_any(),
		NodeContent::Empty => ().into_any(),
	};

	view! {
		<div id=id class=class style=style>
			{inner}
		</div>
	}
}

#[component]
fn NodeHeader(header: Header) -> impl IntoView {
	view! {
		<div class="canvas-node-header">
			<a href=header.href target="_blank">
				{header.title}
			</a>
		</div>
	}
}

/// Content box of a markdown card. Remote bodies load in the background;
/// a result arriving after the board is gone is dropped.
#[component]
fn NoteBox(body: NoteBody) -> impl IntoView {
	let state = RwSignal::new(NoteState::Loading);
	match body {
		NoteBody::Inline(html) => {
			state.set(NoteState::Ready(format!(r#"<div class="node-note">{html}</div>"#)));
		}
		NoteBody::Remote(candidates) => spawn_local(async move {
			let next = match note::fetch_note(&candidates).await {
				Ok(html) => NoteState::Ready(html),
				Err(err) => {
					warn!("canvas: could not fetch embedded note {:?}: {}", candidates.first(), err);
					NoteState::Failed
				}
			};
			let _ = state.try_set(next);
		}),
	}

	view! {
		<div class="canvas-node-content-box is-note">
			{move || match state.get() {
				NoteState::Loading => view! {
					<div class="canvas-node-loading-note">
						<span>"Loading note..."</span>
					</div>
				}
				.into_any(),
				NoteState::Ready(html) => view! { <div class="canvas-node-note-body" inner_html=html></div> }
					.into_any(),
				NoteState::Failed => view! {
					<div class="canvas-node-load-failed">
						<i class="ph ph-warning-circle"></i>
						<span>"Unable to load content"</span>
					</div>
				}
				.into_any(),
			}}
		</div>
	}
}
