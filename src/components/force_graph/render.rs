use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::state::{GraphViewState, MIN_ZOOMED_FONT_SIZE, THICK_EDGE_WIDTH};
use crate::config::{BACKGROUND_COLOR, SEARCH_RESULT_COLOR, SELECTED_NODE_COLOR};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND_COLOR);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	if state.show_edges() {
		draw_edges(state, ctx);
	}
	draw_nodes(state, ctx);
	ctx.restore();
}

fn positions(state: &GraphViewState) -> HashMap<DefaultNodeIdx, (f64, f64)> {
	let mut positions = HashMap::with_capacity(state.node_count());
	state.graph.visit_nodes(|node| {
		positions.insert(node.index(), (node.x() as f64, node.y() as f64));
	});
	positions
}

fn draw_edges(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let positions = positions(state);
	let t = ease_out_cubic(state.hover.highlight_t);
	let k = state.transform.k;

	for edge in state.edges() {
		if !state.is_visible(edge.source) || !state.is_visible(edge.target) {
			continue;
		}
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};

		let is_highlighted = state.is_highlighted(edge.source) && state.is_highlighted(edge.target);
		let alpha = if !state.has_active_highlight() {
			0.25
		} else if is_highlighted {
			0.25 + 0.5 * t
		} else {
			0.25 - 0.2 * t
		};
		let mut width = edge.width;
		if state.is_thick(edge) {
			width = width.max(THICK_EDGE_WIDTH / k);
		}

		ctx.set_stroke_style_str(&format!("rgba(206, 217, 224, {alpha})"));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
}

fn node_fill(state: &GraphViewState, idx: DefaultNodeIdx, color: &'static str) -> &'static str {
	if state.is_selected(idx) {
		SELECTED_NODE_COLOR
	} else {
		color
	}
}

fn draw_label(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	label: &str,
	font_size: f64,
	(x, y): (f64, f64),
	alpha: f64,
	force: bool,
) {
	if !force && font_size * state.transform.k < MIN_ZOOMED_FONT_SIZE {
		return;
	}
	ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {alpha})"));
	ctx.set_font(&format!("{font_size}px sans-serif"));
	ctx.set_text_align("center");
	let _ = ctx.fill_text(label, x, y + font_size / 3.0);
}

fn draw_nodes(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	// Fade everything that isn't a search hit while a search is active.
	let searching = state.has_search_results();

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_visible(idx) || (has_highlight && state.is_highlighted(idx)) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let mut alpha = 1.0 - 0.7 * t;
		if searching && !state.is_search_result(idx) {
			alpha *= 0.3;
		}

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_fill(state, idx, info.color));
		ctx.fill();

		if state.is_search_result(idx) {
			let ring = if state.is_hovering_over(idx) {
				4.0
			} else {
				2.0
			};
			ctx.begin_path();
			let _ = ctx.arc(x, y, info.radius + ring / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(SEARCH_RESULT_COLOR);
			ctx.set_line_width(ring / k);
			ctx.stroke();
		}
		ctx.set_global_alpha(1.0);

		draw_label(
			state,
			ctx,
			&info.label,
			info.font_size,
			(x, y),
			alpha * 0.8,
			state.is_selected(idx) || state.is_hovering_over(idx),
		);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_visible(idx) || !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);

		let (radius, glow_radius) = if is_hovered {
			(info.radius * (1.0 + 0.2 * t), info.radius * (1.5 + 0.8 * t))
		} else {
			(info.radius, info.radius * (1.2 + 0.4 * t))
		};

		if t > 0.01 {
			if let Ok(gradient) =
				ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius)
			{
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {alpha})"));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_fill(state, idx, info.color));
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		draw_label(state, ctx, &info.label, info.font_size, (x, y), 1.0, is_hovered);
	});
}
