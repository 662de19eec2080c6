//! Frame composition for a dock area.
//!
//! Layers are painted back to front. Within a layer every window is drawn
//! (content, titlebar, tabs) before the split handles, so handles stay on top
//! of the windows they separate. Docking gizmos go last, and only while a
//! layer is being moved.

use dock_core::geometry::{Position, Rect};
use dock_render::arena::FrameArena;
use dock_render::color::Rgba;
use dock_render::draw::{CornerRadii, DrawSink, ScopedScissor};
use dock_render::text::TextManager;

use crate::config::DockConfig;
use crate::geometry::{
    InnerGizmo, LayoutMetrics, OuterGizmo, delete_gizmo_rect, docking_highlight_rect,
    inner_gizmo_rect, layer_rect, outer_gizmo_rect, resize_handle_rect, window_chrome,
};
use crate::interaction::{HoveredGizmo, InteractionState};
use crate::layer::LayerStack;
use crate::node::{Node, NodeArena, WindowNode};
use crate::traverse::{find_node_rect, traverse_layer};

const CONTENT_SHADE: f32 = 0.5;
const INACTIVE_TAB_ALPHA: f32 = 0.8;
const INACTIVE_TEXT_SHADE: f32 = 0.7;

/// Everything a frame is drawn from.
pub struct RenderCx<'c> {
    pub nodes: &'c NodeArena,
    pub layers: &'c LayerStack,
    pub config: &'c DockConfig,
    pub state: &'c InteractionState,
    pub metrics: LayoutMetrics,
    pub text: &'c mut dyn TextManager,
    pub arena: &'c FrameArena,
    pub widget_rect: Rect,
    pub visible_rect: Rect,
}

/// Draw the whole dock area into `draw`.
pub fn render(cx: &mut RenderCx<'_>, draw: &mut dyn DrawSink) {
    let mut draw = ScopedScissor::intersecting(draw, cx.widget_rect, cx.visible_rect);
    let thickness = cx.config.resize_handle_thickness_px();
    let length = cx.config.resize_handle_length_px();

    for index in (0..cx.layers.len()).rev() {
        let visits = traverse_layer(cx.nodes, cx.layers, index, cx.widget_rect, cx.arena);
        for visit in &visits {
            if let Node::Window(window) = cx.nodes.node(visit.id) {
                render_window(cx, &mut *draw, window, visit.rect);
            }
        }
        for visit in &visits {
            if let Node::Split(split) = cx.nodes.node(visit.id) {
                let handle = resize_handle_rect(visit.rect, thickness, length, split.ratio(), split.axis);
                draw.push_filled_rect(handle, cx.config.colors.resize_handle);
            }
        }
    }

    if let InteractionState::Moving { hovered, .. } = *cx.state {
        render_gizmos(cx, &mut *draw, hovered);
    }
}

fn render_window(cx: &mut RenderCx<'_>, draw: &mut dyn DrawSink, window: &WindowNode, rect: Rect) {
    let chrome = window_chrome(window, rect, cx.metrics, &mut *cx.text, cx.arena);
    let active = window.active();

    if let Some(visible) = chrome.content.intersection_opt(&cx.visible_rect) {
        draw.push_filled_rect(
            chrome.content,
            active.color.scaled(CONTENT_SHADE).with_alpha(1.0),
        );
        let mut clipped = ScopedScissor::new(&mut *draw, visible);
        active
            .widget
            .render(&mut *clipped, &mut *cx.text, chrome.content, visible);
    }

    draw.push_filled_rect(chrome.titlebar, active.color.with_alpha(1.0));

    let font = cx.metrics.font;
    let margin = cx.metrics.tab_text_margin as i32;
    for (index, (tab, &tab_rect)) in window.tabs().iter().zip(chrome.tabs.iter()).enumerate() {
        let is_active = index == window.active_tab();
        let (background, foreground) = if is_active {
            (tab.color.with_alpha(1.0), Rgba::WHITE)
        } else {
            (
                tab.color.with_alpha(INACTIVE_TAB_ALPHA),
                Rgba::WHITE.scaled(INACTIVE_TEXT_SHADE),
            )
        };
        draw.push_filled_rect(tab_rect, background);

        let measured = cx.text.measure_text(&tab.title, font);
        let centered = (tab_rect.width as i32 - measured.width as i32) / 2;
        let position = Position::new(
            tab_rect.x + centered.max(margin),
            tab_rect.y + (tab_rect.height as i32 - measured.height as i32) / 2,
        );
        let overflows = measured.width as i32 + 2 * margin > tab_rect.width as i32;
        if overflows {
            let mut clipped = ScopedScissor::new(&mut *draw, tab_rect);
            clipped.push_text(font, &tab.title, position, foreground);
        } else {
            draw.push_text(font, &tab.title, position, foreground);
        }
    }
}

fn render_gizmos(cx: &mut RenderCx<'_>, draw: &mut dyn DrawSink, hovered: Option<HoveredGizmo>) {
    let size = cx.config.gizmo_px();
    let radii = CornerRadii::uniform(size / 8);
    let colors = cx.config.colors;

    if let Some(HoveredGizmo::Window { window, gizmo }) = hovered {
        let Some((_, rect)) = find_node_rect(cx.nodes, cx.layers, window, cx.widget_rect, cx.arena)
        else {
            return;
        };
        if let Some(gizmo) = gizmo {
            draw.push_filled_rect(docking_highlight_rect(rect, gizmo), colors.docking_highlight);
        }
        for gizmo in InnerGizmo::ALL {
            let square = inner_gizmo_rect(rect, gizmo, size, cx.config.gizmo_offset_factor);
            draw.push_filled_quad(square, colors.gizmo, radii);
        }
        return;
    }

    match hovered {
        Some(HoveredGizmo::Outer(outer)) => draw.push_filled_rect(
            docking_highlight_rect(cx.widget_rect, outer.to_inner()),
            colors.docking_highlight,
        ),
        Some(HoveredGizmo::Delete) => draw.push_filled_rect(
            layer_rect(cx.layers.as_slice(), 0, cx.widget_rect),
            colors.delete_layer_gizmo.with_alpha(colors.docking_highlight.a),
        ),
        _ => {}
    }
    for outer in OuterGizmo::ALL {
        draw.push_filled_quad(outer_gizmo_rect(cx.widget_rect, outer, size), colors.gizmo, radii);
    }
    draw.push_filled_quad(
        delete_gizmo_rect(cx.widget_rect, size),
        colors.delete_layer_gizmo,
        radii,
    );
}
