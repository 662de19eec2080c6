//! Rectangle builders and hit tests for windows, splits, layers, and gizmos.
//!
//! Everything here is a pure function of its inputs. Hit tests walk gizmos in
//! the fixed order of the `ALL` arrays and return the first match.

use dock_core::geometry::{Extent, Rect, Vec2};
use dock_render::arena::{ArenaVec, FrameArena};
use dock_render::text::{FontSize, TextManager};

use crate::config::DockConfig;
use crate::layer::Layer;
use crate::node::{SplitAxis, WindowNode};

/// Docking target inside a window: the center merges tabs, edges split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InnerGizmo {
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

impl InnerGizmo {
    /// Hit-test and draw order.
    pub const ALL: [Self; 5] = [Self::Center, Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Axis of the split created by docking on this gizmo (`None` for center).
    #[must_use]
    pub fn split_axis(self) -> Option<SplitAxis> {
        match self {
            Self::Center => None,
            Self::Left | Self::Right => Some(SplitAxis::Horizontal),
            Self::Top | Self::Bottom => Some(SplitAxis::Vertical),
        }
    }

    /// Whether the incoming tree becomes child `a` of the new split.
    #[must_use]
    pub fn incoming_first(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }
}

/// Docking target on the container edge, splitting the back layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OuterGizmo {
    Top,
    Bottom,
    Left,
    Right,
}

impl OuterGizmo {
    /// Hit-test and draw order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    #[must_use]
    pub fn to_inner(self) -> InnerGizmo {
        match self {
            Self::Top => InnerGizmo::Top,
            Self::Bottom => InnerGizmo::Bottom,
            Self::Left => InnerGizmo::Left,
            Self::Right => InnerGizmo::Right,
        }
    }
}

/// Partition a split node's rect between its children.
///
/// Child `a` gets `floor(extent * ratio)` pixels along the axis, `b` the rest.
#[must_use]
pub fn split_child_rects(rect: Rect, ratio: f32, axis: SplitAxis) -> (Rect, Rect) {
    match axis {
        SplitAxis::Horizontal => {
            let a_width = ((rect.width as f32 * ratio) as u32).min(rect.width);
            let a = Rect::new(rect.x, rect.y, a_width, rect.height);
            let b = Rect::new(
                rect.x + a_width as i32,
                rect.y,
                rect.width - a_width,
                rect.height,
            );
            (a, b)
        }
        SplitAxis::Vertical => {
            let a_height = ((rect.height as f32 * ratio) as u32).min(rect.height);
            let a = Rect::new(rect.x, rect.y, rect.width, a_height);
            let b = Rect::new(
                rect.x,
                rect.y + a_height as i32,
                rect.width,
                rect.height - a_height,
            );
            (a, b)
        }
    }
}

/// Titlebar strip and content area of a window node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryRects {
    pub titlebar: Rect,
    pub content: Rect,
}

/// Split a window rect into a fixed-height titlebar and the remaining content.
///
/// The titlebar keeps its full height even when the window is shorter; the
/// content height floors at zero.
#[must_use]
pub fn window_primary_rects(rect: Rect, titlebar_height: u32) -> PrimaryRects {
    let titlebar = Rect::new(rect.x, rect.y, rect.width, titlebar_height);
    let content = Rect::new(
        rect.x,
        rect.y + titlebar_height as i32,
        rect.width,
        rect.height.saturating_sub(titlebar_height),
    );
    PrimaryRects { titlebar, content }
}

/// Lay out one rect per tab title along `titlebar`.
///
/// Each tab wants its measured text width plus `margin` on both sides. When
/// the row does not fit, every tab but the last is scaled down by the same
/// factor (rounded) and the last takes whatever width remains, so the row
/// ends exactly at the titlebar's right edge.
pub fn tab_rects<'a, 't>(
    titlebar: Rect,
    titles: impl IntoIterator<Item = &'t str>,
    font: FontSize,
    margin: u32,
    text: &mut dyn TextManager,
    arena: &'a FrameArena,
) -> ArenaVec<'a, Rect> {
    let mut desired = arena.vec::<i64>();
    for title in titles {
        let measured = text.measure_text(title, font);
        desired.push(i64::from(measured.width) + 2 * i64::from(margin));
    }

    let mut rects = arena.vec_with_capacity(desired.len());
    let sum: i64 = desired.iter().sum();
    let available = i64::from(titlebar.width);
    let shrink = sum > available;
    let factor = if shrink {
        available as f64 / sum as f64
    } else {
        1.0
    };

    let mut remaining = available;
    let mut offset = 0i64;
    let last = desired.len().saturating_sub(1);
    for (i, &want) in desired.iter().enumerate() {
        let width = if !shrink {
            want
        } else if i == last {
            remaining.max(0)
        } else {
            ((want as f64 * factor).round() as i64).min(remaining.max(0))
        };
        rects.push(Rect::new(
            titlebar.x + offset as i32,
            titlebar.y,
            width as u32,
            titlebar.height,
        ));
        remaining -= width;
        offset += width;
    }
    rects
}

/// Text-derived sizes shared by layout, hit testing, and rendering.
///
/// Measured once per call from the [`TextManager`] and passed along
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub titlebar_height: u32,
    pub font: FontSize,
    pub tab_text_margin: u32,
}

impl LayoutMetrics {
    /// Titlebar height is one line of tab text plus the margin above and below.
    pub fn measure(config: &DockConfig, text: &mut dyn TextManager) -> Self {
        let font = config.tab_font_px();
        let tab_text_margin = config.tab_text_margin_px();
        Self {
            titlebar_height: text.line_height(font) + 2 * tab_text_margin,
            font,
            tab_text_margin,
        }
    }
}

/// Every rect a window node is drawn and hit-tested with.
#[derive(Debug)]
pub struct WindowChrome<'a> {
    pub rect: Rect,
    pub titlebar: Rect,
    pub content: Rect,
    /// One rect per tab, in tab order.
    pub tabs: ArenaVec<'a, Rect>,
}

/// Lay out the titlebar, content area, and tab row of `window` in `rect`.
pub fn window_chrome<'a>(
    window: &WindowNode,
    rect: Rect,
    metrics: LayoutMetrics,
    text: &mut dyn TextManager,
    arena: &'a FrameArena,
) -> WindowChrome<'a> {
    let PrimaryRects { titlebar, content } = window_primary_rects(rect, metrics.titlebar_height);
    let tabs = tab_rects(
        titlebar,
        window.tabs().iter().map(|tab| tab.title.as_str()),
        metrics.font,
        metrics.tab_text_margin,
        text,
        arena,
    );
    WindowChrome {
        rect,
        titlebar,
        content,
        tabs,
    }
}

/// Index of the first rect containing `point`.
#[must_use]
pub fn hit_rect_index(rects: &[Rect], point: Vec2) -> Option<usize> {
    rects.iter().position(|rect| rect.contains_point(point))
}

/// Square for an inner docking gizmo, placed around the node center.
///
/// The center gizmo sits on the center; the others are pushed out by
/// `size * offset_factor` in their direction.
#[must_use]
pub fn inner_gizmo_rect(node_rect: Rect, gizmo: InnerGizmo, size: u32, offset_factor: f32) -> Rect {
    let x = node_rect.x + (node_rect.width / 2) as i32 - (size / 2) as i32;
    let y = node_rect.y + (node_rect.height / 2) as i32 - (size / 2) as i32;
    let offset = (size as f32 * offset_factor).round() as i32;
    let (dx, dy) = match gizmo {
        InnerGizmo::Center => (0, 0),
        InnerGizmo::Top => (0, -offset),
        InnerGizmo::Bottom => (0, offset),
        InnerGizmo::Left => (-offset, 0),
        InnerGizmo::Right => (offset, 0),
    };
    Rect::new(x + dx, y + dy, size, size)
}

/// Square for an outer gizmo, centered on the matching container edge.
#[must_use]
pub fn outer_gizmo_rect(container: Rect, gizmo: OuterGizmo, size: u32) -> Rect {
    let center_x = container.x + (container.width / 2) as i32 - (size / 2) as i32;
    let center_y = container.y + (container.height / 2) as i32 - (size / 2) as i32;
    let (x, y) = match gizmo {
        OuterGizmo::Top => (center_x, container.y),
        OuterGizmo::Bottom => (center_x, container.bottom() - size as i32),
        OuterGizmo::Left => (container.x, center_y),
        OuterGizmo::Right => (container.right() - size as i32, center_y),
    };
    Rect::new(x, y, size, size)
}

/// Square for the delete-layer gizmo: horizontally centered, one gizmo above
/// the bottom outer gizmo.
#[must_use]
pub fn delete_gizmo_rect(container: Rect, size: u32) -> Rect {
    Rect::new(
        container.x + (container.width / 2) as i32 - (size / 2) as i32,
        container.bottom() - 2 * size as i32,
        size,
        size,
    )
}

#[must_use]
pub fn hit_inner_gizmo(node_rect: Rect, size: u32, offset_factor: f32, point: Vec2) -> Option<InnerGizmo> {
    InnerGizmo::ALL
        .into_iter()
        .find(|&gizmo| inner_gizmo_rect(node_rect, gizmo, size, offset_factor).contains_point(point))
}

#[must_use]
pub fn hit_outer_gizmo(container: Rect, size: u32, point: Vec2) -> Option<OuterGizmo> {
    OuterGizmo::ALL
        .into_iter()
        .find(|&gizmo| outer_gizmo_rect(container, gizmo, size).contains_point(point))
}

#[must_use]
pub fn hit_delete_gizmo(container: Rect, size: u32, point: Vec2) -> bool {
    delete_gizmo_rect(container, size).contains_point(point)
}

/// Preview of where docked content would land: half of `node_rect` on the
/// gizmo's side, or all of it for the center.
#[must_use]
pub fn docking_highlight_rect(node_rect: Rect, gizmo: InnerGizmo) -> Rect {
    let half_w = node_rect.width / 2;
    let half_h = node_rect.height / 2;
    match gizmo {
        InnerGizmo::Center => node_rect,
        InnerGizmo::Top => Rect::new(node_rect.x, node_rect.y, node_rect.width, half_h),
        InnerGizmo::Bottom => Rect::new(
            node_rect.x,
            node_rect.y + half_h as i32,
            node_rect.width,
            half_h,
        ),
        InnerGizmo::Left => Rect::new(node_rect.x, node_rect.y, half_w, node_rect.height),
        InnerGizmo::Right => Rect::new(
            node_rect.x + half_w as i32,
            node_rect.y,
            half_w,
            node_rect.height,
        ),
    }
}

/// Grab bar for a split, centered on the split line.
///
/// `thickness` runs across the split line, `length` along it.
#[must_use]
pub fn resize_handle_rect(
    rect: Rect,
    thickness: u32,
    length: u32,
    ratio: f32,
    axis: SplitAxis,
) -> Rect {
    match axis {
        SplitAxis::Horizontal => Rect::new(
            rect.x + (rect.width as f32 * ratio) as i32 - (thickness / 2) as i32,
            rect.y + (rect.height / 2) as i32 - (length / 2) as i32,
            thickness,
            length,
        ),
        SplitAxis::Vertical => Rect::new(
            rect.x + (rect.width / 2) as i32 - (length / 2) as i32,
            rect.y + (rect.height as f32 * ratio) as i32 - (thickness / 2) as i32,
            length,
            thickness,
        ),
    }
}

/// Effective rect of the layer at `index` inside `container`.
///
/// The back layer (or a lone layer) is the container itself. Any other layer
/// is its stored rect translated into container space, with the extent capped
/// to the container and the position clamped so the rect stays inside.
///
/// # Panics
///
/// Panics if `index` is out of range.
#[must_use]
pub fn layer_rect(layers: &[Layer], index: usize, container: Rect) -> Rect {
    assert!(
        index < layers.len(),
        "layer {index} out of range ({} layers)",
        layers.len()
    );
    if index + 1 == layers.len() {
        return container;
    }
    let stored = layers[index].rect;
    let extent = Extent::new(
        stored.width.min(container.width),
        stored.height.min(container.height),
    );
    let max_x = container.right() - extent.width as i32;
    let max_y = container.bottom() - extent.height as i32;
    let x = (container.x + stored.x).min(max_x).max(container.x);
    let y = (container.y + stored.y).min(max_y).max(container.y);
    Rect::new(x, y, extent.width, extent.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;
    use dock_render::text::MonospaceText;
    use proptest::prelude::*;

    fn layer(rect: Rect) -> Layer {
        Layer {
            root: node_id(0),
            rect,
        }
    }

    fn node_id(raw: u32) -> NodeId {
        serde_json::from_str(&raw.to_string()).expect("node id")
    }

    #[test]
    fn split_child_rects_horizontal() {
        let (a, b) = split_child_rects(Rect::new(10, 20, 101, 50), 0.5, SplitAxis::Horizontal);
        assert_eq!(a, Rect::new(10, 20, 50, 50));
        assert_eq!(b, Rect::new(60, 20, 51, 50));
    }

    #[test]
    fn split_child_rects_vertical() {
        let (a, b) = split_child_rects(Rect::new(0, 0, 40, 100), 0.25, SplitAxis::Vertical);
        assert_eq!(a, Rect::new(0, 0, 40, 25));
        assert_eq!(b, Rect::new(0, 25, 40, 75));
    }

    #[test]
    fn primary_rects_floor_content_at_zero() {
        let rects = window_primary_rects(Rect::new(0, 0, 100, 20), 32);
        assert_eq!(rects.titlebar, Rect::new(0, 0, 100, 32));
        assert_eq!(rects.content, Rect::new(0, 32, 100, 0));

        let rects = window_primary_rects(Rect::new(5, 5, 100, 200), 32);
        assert_eq!(rects.content, Rect::new(5, 37, 100, 168));
    }

    #[test]
    fn tab_rects_use_desired_width_when_they_fit() {
        let arena = FrameArena::default();
        let mut text = MonospaceText;
        // "ab" = 2 columns * 8px = 16px, plus 2 * 10 margin.
        let rects = tab_rects(
            Rect::new(0, 0, 500, 36),
            ["ab", "abcd"],
            FontSize(16),
            10,
            &mut text,
            &arena,
        );
        assert_eq!(rects.as_slice(), &[Rect::new(0, 0, 36, 36), Rect::new(36, 0, 52, 36)]);
    }

    #[test]
    fn tab_rects_shrink_and_last_fills_exactly() {
        let arena = FrameArena::default();
        let mut text = MonospaceText;
        // Desired: 100, 100, 100 (80px text + 2*10). Titlebar 250 -> 83, 83, 84.
        let titles = ["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc"];
        let rects = tab_rects(
            Rect::new(7, 3, 250, 20),
            titles,
            FontSize(16),
            10,
            &mut text,
            &arena,
        );
        let widths: Vec<u32> = rects.iter().map(|r| r.width).collect();
        assert_eq!(widths, vec![83, 83, 84]);
        assert_eq!(rects[0].x, 7);
        assert_eq!(rects[2].right(), Rect::new(7, 3, 250, 20).right());
    }

    #[test]
    fn tab_rects_empty_titles() {
        let arena = FrameArena::default();
        let mut text = MonospaceText;
        let rects = tab_rects(
            Rect::new(0, 0, 10, 10),
            std::iter::empty(),
            FontSize(16),
            4,
            &mut text,
            &arena,
        );
        assert!(rects.is_empty());
    }

    #[test]
    fn metrics_follow_font_and_margin() {
        let mut text = MonospaceText;
        let metrics = LayoutMetrics::measure(&DockConfig::default(), &mut text);
        assert_eq!(metrics.titlebar_height, 36);
        assert_eq!(metrics.font, FontSize(16));

        let scaled = DockConfig {
            content_scale: 2.0,
            ..DockConfig::default()
        };
        assert_eq!(LayoutMetrics::measure(&scaled, &mut text).titlebar_height, 72);
    }

    #[test]
    fn window_chrome_stacks_titlebar_over_content() {
        use crate::node::{Tab, TabId};
        use crate::widget::EmptyWidget;
        use dock_render::color::Rgba;

        let tab = |title: &str| Tab {
            id: TabId::new(1),
            title: title.to_owned(),
            color: Rgba::WHITE,
            widget: Box::new(EmptyWidget),
        };
        let mut window = WindowNode::new(tab("one"));
        window.extend_tabs([tab("two")]);
        let arena = FrameArena::default();
        let mut text = MonospaceText;
        let metrics = LayoutMetrics::measure(&DockConfig::default(), &mut text);
        let chrome = window_chrome(&window, Rect::new(0, 0, 300, 200), metrics, &mut text, &arena);
        assert_eq!(chrome.titlebar, Rect::new(0, 0, 300, 36));
        assert_eq!(chrome.content, Rect::new(0, 36, 300, 164));
        assert_eq!(chrome.tabs.len(), 2);
        assert_eq!(chrome.tabs[1].x, 44);
    }

    #[test]
    fn inner_gizmos_form_a_cross() {
        let node = Rect::new(0, 0, 300, 300);
        assert_eq!(inner_gizmo_rect(node, InnerGizmo::Center, 50, 1.0), Rect::new(125, 125, 50, 50));
        assert_eq!(inner_gizmo_rect(node, InnerGizmo::Top, 50, 1.0), Rect::new(125, 75, 50, 50));
        assert_eq!(inner_gizmo_rect(node, InnerGizmo::Bottom, 50, 1.0), Rect::new(125, 175, 50, 50));
        assert_eq!(inner_gizmo_rect(node, InnerGizmo::Left, 50, 1.0), Rect::new(75, 125, 50, 50));
        assert_eq!(inner_gizmo_rect(node, InnerGizmo::Right, 50, 1.5), Rect::new(200, 125, 50, 50));
    }

    #[test]
    fn outer_gizmos_hug_container_edges() {
        let c = Rect::new(10, 10, 400, 300);
        assert_eq!(outer_gizmo_rect(c, OuterGizmo::Top, 40), Rect::new(190, 10, 40, 40));
        assert_eq!(outer_gizmo_rect(c, OuterGizmo::Bottom, 40), Rect::new(190, 270, 40, 40));
        assert_eq!(outer_gizmo_rect(c, OuterGizmo::Left, 40), Rect::new(10, 140, 40, 40));
        assert_eq!(outer_gizmo_rect(c, OuterGizmo::Right, 40), Rect::new(370, 140, 40, 40));
        assert_eq!(delete_gizmo_rect(c, 40), Rect::new(190, 230, 40, 40));
    }

    #[test]
    fn gizmo_hit_tests() {
        let node = Rect::new(0, 0, 300, 300);
        assert_eq!(hit_inner_gizmo(node, 50, 1.0, Vec2::new(150.0, 150.0)), Some(InnerGizmo::Center));
        assert_eq!(hit_inner_gizmo(node, 50, 1.0, Vec2::new(80.0, 150.0)), Some(InnerGizmo::Left));
        assert_eq!(hit_inner_gizmo(node, 50, 1.0, Vec2::new(5.0, 5.0)), None);

        let c = Rect::new(0, 0, 400, 300);
        assert_eq!(hit_outer_gizmo(c, 40, Vec2::new(395.0, 150.0)), Some(OuterGizmo::Right));
        assert_eq!(hit_outer_gizmo(c, 40, Vec2::new(200.0, 150.0)), None);
        assert!(hit_delete_gizmo(c, 40, Vec2::new(200.0, 230.0)));
        assert!(!hit_delete_gizmo(c, 40, Vec2::new(200.0, 290.0)));
    }

    #[test]
    fn highlight_rects_cover_docked_half() {
        let node = Rect::new(0, 0, 200, 100);
        assert_eq!(docking_highlight_rect(node, InnerGizmo::Center), node);
        assert_eq!(docking_highlight_rect(node, InnerGizmo::Left), Rect::new(0, 0, 100, 100));
        assert_eq!(docking_highlight_rect(node, InnerGizmo::Right), Rect::new(100, 0, 100, 100));
        assert_eq!(docking_highlight_rect(node, InnerGizmo::Top), Rect::new(0, 0, 200, 50));
        assert_eq!(docking_highlight_rect(node, InnerGizmo::Bottom), Rect::new(0, 50, 200, 50));
    }

    #[test]
    fn resize_handle_centered_on_split_line() {
        let rect = Rect::new(0, 0, 200, 100);
        assert_eq!(
            resize_handle_rect(rect, 10, 30, 0.5, SplitAxis::Horizontal),
            Rect::new(95, 35, 10, 30)
        );
        assert_eq!(
            resize_handle_rect(rect, 10, 30, 0.3, SplitAxis::Vertical),
            Rect::new(85, 25, 30, 10)
        );
    }

    #[test]
    fn gizmo_axis_and_order_rules() {
        assert_eq!(InnerGizmo::Left.split_axis(), Some(SplitAxis::Horizontal));
        assert_eq!(InnerGizmo::Bottom.split_axis(), Some(SplitAxis::Vertical));
        assert_eq!(InnerGizmo::Center.split_axis(), None);
        assert!(InnerGizmo::Top.incoming_first());
        assert!(!InnerGizmo::Right.incoming_first());
        assert_eq!(OuterGizmo::Left.to_inner(), InnerGizmo::Left);
    }

    #[test]
    fn back_layer_fills_container() {
        let layers = [layer(Rect::new(50, 50, 10, 10)), layer(Rect::new(-90, 3, 1, 1))];
        let container = Rect::new(5, 5, 300, 200);
        assert_eq!(layer_rect(&layers, 1, container), container);
        assert_eq!(layer_rect(&layers[1..], 0, container), container);
    }

    #[test]
    fn floating_layer_is_translated_and_clamped() {
        let container = Rect::new(100, 100, 300, 200);
        let layers = [
            layer(Rect::new(10, 20, 50, 50)),
            layer(Rect::new(280, 190, 50, 50)),
            layer(Rect::new(-40, -40, 500, 50)),
            layer(Rect::default()),
        ];
        assert_eq!(layer_rect(&layers, 0, container), Rect::new(110, 120, 50, 50));
        assert_eq!(layer_rect(&layers, 1, container), Rect::new(350, 250, 50, 50));
        assert_eq!(layer_rect(&layers, 2, container), Rect::new(100, 100, 300, 50));
    }

    proptest! {
        #[test]
        fn layer_rect_always_inside_container(
            cx in -500i32..500, cy in -500i32..500,
            cw in 0u32..2000, ch in 0u32..2000,
            lx in -5000i32..5000, ly in -5000i32..5000,
            lw in 0u32..5000, lh in 0u32..5000,
        ) {
            let container = Rect::new(cx, cy, cw, ch);
            let layers = [layer(Rect::new(lx, ly, lw, lh)), layer(Rect::default())];
            let rect = layer_rect(&layers, 0, container);
            prop_assert!(container.contains_rect(&rect), "{rect:?} escapes {container:?}");
        }

        #[test]
        fn split_children_tile_parent(
            x in -100i32..100, y in -100i32..100,
            w in 0u32..4000, h in 0u32..4000,
            ratio in 0.1f32..=0.9,
            horizontal in any::<bool>(),
        ) {
            let axis = if horizontal { SplitAxis::Horizontal } else { SplitAxis::Vertical };
            let rect = Rect::new(x, y, w, h);
            let (a, b) = split_child_rects(rect, ratio, axis);
            prop_assert!(rect.contains_rect(&a));
            prop_assert!(rect.contains_rect(&b));
            match axis {
                SplitAxis::Horizontal => {
                    prop_assert_eq!(a.width + b.width, w);
                    prop_assert_eq!(a.right(), b.x);
                }
                SplitAxis::Vertical => {
                    prop_assert_eq!(a.height + b.height, h);
                    prop_assert_eq!(a.bottom(), b.y);
                }
            }
        }

        #[test]
        fn shrunk_tab_row_fills_titlebar(
            lens in prop::collection::vec(1usize..30, 1..8),
            width in 1u32..400,
        ) {
            let arena = FrameArena::default();
            let mut text = MonospaceText;
            let titles: Vec<String> = lens.iter().map(|n| "x".repeat(*n)).collect();
            let titlebar = Rect::new(0, 0, width, 20);
            let rects = tab_rects(titlebar, titles.iter().map(String::as_str), FontSize(16), 6, &mut text, &arena);
            let total: u32 = rects.iter().map(|r| r.width).sum();
            let desired: u32 = lens.iter().map(|n| *n as u32 * 8 + 12).sum();
            if desired > width {
                prop_assert_eq!(total, width);
            } else {
                prop_assert_eq!(total, desired);
            }
            for pair in rects.windows(2) {
                prop_assert_eq!(pair[0].right(), pair[1].x);
            }
        }
    }
}
