use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::palette::NodeKind;
use super::state::{ForceGraphState, HOVER_GROWTH};

const LABEL_FONT: &str = "10px sans-serif";
const LABEL_FONT_BOLD: &str = "bold 10px sans-serif";

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let hovering = state.hover.node.is_some();
	state.graph.visit_edges(|n1, n2, _| {
		let (alpha, width, color) = if state.is_incident(n1.index(), n2.index()) {
			(1.0, 2.0, &state.palette.accent)
		} else if hovering {
			(0.2, 1.0, &state.palette.link)
		} else {
			(0.6, 1.0, &state.palette.link)
		};
		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let label_alpha = if state.local { 1.0 } else { 0.7 };

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let hovered = state.is_hovered(node.index());

		let (radius, fill) = if hovered {
			(info.radius * HOVER_GROWTH, state.palette.accent.as_str())
		} else {
			(
				info.radius,
				state
					.palette
					.node_color(info.kind.unwrap_or(NodeKind::Asset)),
			)
		};
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(fill);
		ctx.fill();

		if info.label.is_empty() {
			return;
		}
		ctx.set_global_alpha(if hovered { 1.0 } else { label_alpha });
		ctx.set_font(if hovered { LABEL_FONT_BOLD } else { LABEL_FONT });
		ctx.set_fill_style_str(&state.palette.text);
		let _ = ctx.fill_text(&info.label, x + info.radius + 4.0, y + 3.0);
		ctx.set_global_alpha(1.0);
	});
}
