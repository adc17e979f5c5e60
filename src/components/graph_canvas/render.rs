use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{GraphCanvasState, ease_out_cubic, tier_radius};
use crate::data::RelationshipKind;
use crate::layout::Tier;

const BACKGROUND: &str = "#f5f3f0";
const DOT_GRID: &str = "rgba(160, 174, 192, 0.45)";
const SUHBAH_RGB: (u8, u8, u8) = (212, 175, 55);
const FAMILY_RGB: (u8, u8, u8) = (5, 150, 105);
const MINIMAP_WIDTH: f64 = 180.0;
const MINIMAP_HEIGHT: f64 = 120.0;
const MINIMAP_MARGIN: f64 = 12.0;

type Positions = HashMap<DefaultNodeIdx, (f64, f64)>;

fn rgba((r, g, b): (u8, u8, u8), alpha: f64) -> String {
	format!("rgba({r}, {g}, {b}, {alpha})")
}

fn kind_rgb(kind: RelationshipKind) -> (u8, u8, u8) {
	match kind {
		RelationshipKind::Suhbah => SUHBAH_RGB,
		RelationshipKind::Family => FAMILY_RGB,
	}
}

/// Fill and stroke colours per tier.
fn tier_style(tier: Tier) -> (&'static str, &'static str, f64) {
	match tier {
		Tier::Center => ("#fffbf0", "#d4af37", 3.0),
		Tier::Level1 => ("#ffffff", "#1f2937", 2.0),
		Tier::Level2 => ("#faf9f7", "#a89a7e", 2.0),
	}
}

pub fn render(state: &GraphCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	let positions = state.positions();

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_grid(state, ctx);
	draw_edges(state, ctx, &positions);
	draw_nodes(state, ctx);
	draw_edge_labels(state, ctx, &positions);
	ctx.restore();

	draw_minimap(state, ctx);
}

fn draw_grid(state: &GraphCanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	if k < 0.4 {
		return;
	}
	let gap = 16.0;
	let (x0, y0) = state.screen_to_graph(0.0, 0.0);
	let (x1, y1) = state.screen_to_graph(state.width, state.height);
	let dot = 1.0 / k;
	ctx.set_fill_style_str(DOT_GRID);
	let mut x = (x0 / gap).floor() * gap;
	while x <= x1 {
		let mut y = (y0 / gap).floor() * gap;
		while y <= y1 {
			ctx.fill_rect(x - dot / 2.0, y - dot / 2.0, dot, dot);
			y += gap;
		}
		x += gap;
	}
}

fn draw_edges(state: &GraphCanvasState, ctx: &CanvasRenderingContext2d, positions: &Positions) {
	let k = state.transform.k;
	let (line_width, arrow_size) = (1.5 / k.max(0.5), 9.0 / k.max(0.5));
	let (dash, gap) = (6.0 / k.max(0.5), 4.0 / k.max(0.5));
	let dash_offset = -(state.flow_time * 20.0) % (dash + gap);
	let mut radii = HashMap::new();
	state.graph.visit_nodes(|node| {
		radii.insert(node.index(), tier_radius(node.data.user_data.tier));
	});
	let radius_of = |idx: &DefaultNodeIdx| radii.get(idx).copied().unwrap_or(0.0);
	let t = ease_out_cubic(state.hover.highlight_t);
	let has_highlight = state.has_active_highlight();

	for edge in &state.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let is_highlighted =
			state.is_highlighted(edge.source) && state.is_highlighted(edge.target);
		let alpha = match (has_highlight, is_highlighted) {
			(false, _) => 0.75,
			(true, true) => 0.75 + 0.25 * t,
			(true, false) => 0.75 - 0.6 * t,
		};
		let rgb = kind_rgb(edge.kind);
		let (r_src, r_tgt) = (radius_of(&edge.source), radius_of(&edge.target));

		ctx.set_stroke_style_str(&rgba(rgb, alpha));
		ctx.set_line_width(if is_highlighted { line_width * (1.0 + 0.5 * t) } else { line_width });
		// Family ties are dashed and drift slowly along the edge.
		if edge.kind == RelationshipKind::Family {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}
		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r_src, y1 + uy * r_src);
		ctx.line_to(x2 - ux * (r_tgt + arrow_size), y2 - uy * (r_tgt + arrow_size));
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(&rgba(rgb, alpha));
		let (tip_x, tip_y) = (x2 - ux * r_tgt, y2 - uy * r_tgt);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_edge_labels(state: &GraphCanvasState, ctx: &CanvasRenderingContext2d, positions: &Positions) {
	let k = state.transform.k;
	if k < 0.35 {
		return;
	}
	let font_px = 11.0 / k.max(0.75);
	let (pad_x, pad_y) = (6.0 / k.max(0.75), 3.0 / k.max(0.75));
	ctx.set_font(&format!("600 {font_px}px sans-serif"));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for edge in &state.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
		let text_w = ctx
			.measure_text(&edge.label)
			.map(|m| m.width())
			.unwrap_or(edge.label.len() as f64 * font_px * 0.6);

		ctx.set_fill_style_str("rgba(255, 255, 255, 0.95)");
		ctx.fill_rect(
			mx - text_w / 2.0 - pad_x,
			my - font_px / 2.0 - pad_y,
			text_w + 2.0 * pad_x,
			font_px + 2.0 * pad_y,
		);
		ctx.set_fill_style_str(&rgba(kind_rgb(edge.kind), 1.0));
		let _ = ctx.fill_text(&edge.label, mx, my);
	}

	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");
}

fn draw_nodes(state: &GraphCanvasState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (fill, stroke, stroke_w) = tier_style(info.tier);

		let dimmed = has_highlight && !state.is_highlighted(idx);
		let alpha = if dimmed { 1.0 - 0.7 * t } else { 1.0 };
		let mut radius = tier_radius(info.tier);
		if has_highlight && state.is_hovered(idx) {
			radius *= 1.0 + 0.25 * t;
		}

		ctx.set_global_alpha(alpha);
		if has_highlight && state.is_hovered(idx) && t > 0.01 {
			let glow = radius * (1.6 + 0.8 * t);
			ctx.begin_path();
			let _ = ctx.arc(x, y, glow, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&format!("rgba(212, 175, 55, {})", 0.18 * t));
			ctx.fill();
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(fill);
		ctx.fill();
		ctx.set_stroke_style_str(stroke);
		ctx.set_line_width(stroke_w / k.max(0.5));
		ctx.stroke();

		let font_px = match info.tier {
			Tier::Center => 14.0,
			_ => 12.0,
		} / k.max(0.5);
		ctx.set_font(&format!("600 {font_px}px sans-serif"));
		ctx.set_text_align("center");
		ctx.set_fill_style_str("#1f2937");
		let _ = ctx.fill_text(&info.label, x, y + radius + font_px + 2.0 / k.max(0.5));
		ctx.set_text_align("start");
		ctx.set_global_alpha(1.0);
	});
}

fn draw_minimap(state: &GraphCanvasState, ctx: &CanvasRenderingContext2d) {
	let Some(bounds) = state.bounds() else {
		return;
	};
	let (left, top) = (MINIMAP_MARGIN, state.height - MINIMAP_HEIGHT - MINIMAP_MARGIN);

	ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
	ctx.fill_rect(left, top, MINIMAP_WIDTH, MINIMAP_HEIGHT);
	ctx.set_stroke_style_str("#d1d5db");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(left, top, MINIMAP_WIDTH, MINIMAP_HEIGHT);

	let pad = 40.0;
	let (bw, bh) = (bounds.width() + 2.0 * pad, bounds.height() + 2.0 * pad);
	let scale = (MINIMAP_WIDTH / bw).min(MINIMAP_HEIGHT / bh);
	let (cx, cy) = (
		(bounds.min_x + bounds.max_x) / 2.0,
		(bounds.min_y + bounds.max_y) / 2.0,
	);
	let to_map = |gx: f64, gy: f64| {
		(
			left + MINIMAP_WIDTH / 2.0 + (gx - cx) * scale,
			top + MINIMAP_HEIGHT / 2.0 + (gy - cy) * scale,
		)
	};

	state.graph.visit_nodes(|node| {
		let (mx, my) = to_map(node.x() as f64, node.y() as f64);
		let (_, stroke, _) = tier_style(node.data.user_data.tier);
		ctx.begin_path();
		let _ = ctx.arc(mx, my, 2.5, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(stroke);
		ctx.fill();
	});

	// Visible region, clipped to the minimap frame.
	let (vx0, vy0) = state.screen_to_graph(0.0, 0.0);
	let (vx1, vy1) = state.screen_to_graph(state.width, state.height);
	let (ax, ay) = to_map(vx0, vy0);
	let (bx, by) = to_map(vx1, vy1);
	ctx.save();
	ctx.begin_path();
	ctx.rect(left, top, MINIMAP_WIDTH, MINIMAP_HEIGHT);
	ctx.clip();
	ctx.set_stroke_style_str("rgba(59, 130, 246, 0.8)");
	ctx.stroke_rect(ax, ay, bx - ax, by - ay);
	ctx.restore();
}
