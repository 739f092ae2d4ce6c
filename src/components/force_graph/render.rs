//! Canvas rendering for the co-authorship graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background
//! 2. Links, dimmed ones first
//! 3. Dimmed nodes, then lit nodes on top, then hover/selection rings

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::GraphSession;
use super::theme::Color;

/// Smoothstep easing so dim transitions do not look linear.
fn smooth_step(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(session: &GraphSession, ctx: &CanvasRenderingContext2d) {
	let (width, height) = session.viewport();
	ctx.set_fill_style_str(&session.theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, width, height);

	let positions = session.sim.positions();
	let dim = smooth_step(session.highlight.dim_level());

	draw_links(session, ctx, &positions, dim);
	draw_nodes(session, ctx, &positions, dim);
}

fn draw_links(
	session: &GraphSession,
	ctx: &CanvasRenderingContext2d,
	positions: &[(f64, f64)],
	dim: f64,
) {
	let style = &session.theme.link;
	let dimmed_alpha = 1.0 - (1.0 - style.dimmed_alpha) * dim;

	for pass_dimmed in [true, false] {
		for link in &session.links {
			let dimmed = session.highlight.is_link_dimmed(link.source, link.target);
			if dimmed != pass_dimmed {
				continue;
			}
			let (Some(&(x1, y1)), Some(&(x2, y2))) =
				(positions.get(link.source), positions.get(link.target))
			else {
				continue;
			};
			let alpha = if dimmed { dimmed_alpha } else { 1.0 };
			ctx.set_stroke_style_str(&style.color.with_alpha(style.color.a * alpha).to_css());
			ctx.set_line_width(link.width);
			ctx.begin_path();
			ctx.move_to(x1, y1);
			ctx.line_to(x2, y2);
			ctx.stroke();
		}
	}
}

fn draw_nodes(
	session: &GraphSession,
	ctx: &CanvasRenderingContext2d,
	positions: &[(f64, f64)],
	dim: f64,
) {
	let style = &session.theme.node;
	let dimmed_alpha = 1.0 - (1.0 - style.dimmed_alpha) * dim;

	for pass_dimmed in [true, false] {
		for (idx, node) in session.nodes.iter().enumerate() {
			let dimmed = session.highlight.is_node_dimmed(idx);
			if dimmed != pass_dimmed {
				continue;
			}
			let Some(&(x, y)) = positions.get(idx) else {
				continue;
			};
			let alpha = if dimmed { dimmed_alpha } else { 1.0 };
			draw_node(ctx, x, y, node.radius, node.color, alpha, session);
		}
	}

	if let Some(idx) = session.highlight.hovered() {
		if let (Some(&(x, y)), Some(node)) = (positions.get(idx), session.nodes.get(idx)) {
			draw_ring(ctx, x, y, node.radius + 2.5, style.hover_ring, 1.5);
		}
	}
	if let Some(tooltip) = &session.tooltip {
		if let (Some(&(x, y)), Some(node)) =
			(positions.get(tooltip.node), session.nodes.get(tooltip.node))
		{
			draw_ring(ctx, x, y, node.radius + 4.0, node.color, 2.0);
		}
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	radius: f64,
	color: Color,
	alpha: f64,
	session: &GraphSession,
) {
	let style = &session.theme.node;
	ctx.set_global_alpha(alpha);

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&color.to_css());
	ctx.fill();

	if style.border_width > 0.0 {
		ctx.set_stroke_style_str(&style.border_color.to_css());
		ctx.set_line_width(style.border_width);
		ctx.stroke();
	}

	ctx.set_global_alpha(1.0);
}

fn draw_ring(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, color: Color, width: f64) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	ctx.stroke();
}
