//! Random pointer streams must never break the layout invariants.

use dock_area::{DockArea, EmptyWidget, FrameCx, MAX_SPLIT_RATIO, MIN_SPLIT_RATIO};
use dock_core::event::{CharRemoveEvent, PointerId, PointerMove, PointerPress, TextInputEvent};
use dock_core::geometry::{Rect, Vec2};
use dock_render::arena::FrameArena;
use dock_render::color::Rgba;
use dock_render::text::MonospaceText;
use proptest::prelude::*;
use rustc_hash::FxHashSet;

const CONTAINER: Rect = Rect::new(0, 0, 800, 600);

#[derive(Debug, Clone)]
enum Step {
    Press {
        pointer: PointerId,
        position: Vec2,
        pressed: bool,
        consumed: bool,
    },
    Move {
        pointer: PointerId,
        position: Vec2,
    },
    AddWindow,
    Text,
    CharRemove,
    ConnectionLost,
}

fn pointer() -> impl Strategy<Value = PointerId> {
    prop_oneof![
        3 => Just(PointerId::CURSOR),
        1 => prop_oneof![Just(0u8), Just(1), Just(u8::MAX)].prop_map(PointerId::touch),
    ]
}

/// Points biased toward titlebars, gizmos, and split lines.
fn position() -> impl Strategy<Value = Vec2> {
    let anywhere = (-40.0f32..840.0, -40.0f32..640.0);
    let titlebars = (0.0f32..800.0, 0.0f32..40.0);
    let gizmo_column = (362.0f32..438.0, 0.0f32..600.0);
    let gizmo_row = (0.0f32..800.0, 262.0f32..338.0);
    let floating_titlebars = (150.0f32..550.0, 150.0f32..190.0);
    prop_oneof![
        2 => anywhere,
        2 => titlebars,
        2 => gizmo_column,
        2 => gizmo_row,
        1 => floating_titlebars,
    ]
    .prop_map(|(x, y)| Vec2::new(x, y))
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (pointer(), position(), any::<bool>(), prop::bool::weighted(0.15))
            .prop_map(|(pointer, position, pressed, consumed)| Step::Press { pointer, position, pressed, consumed }),
        6 => (pointer(), position()).prop_map(|(pointer, position)| Step::Move { pointer, position }),
        1 => Just(Step::AddWindow),
        1 => Just(Step::Text),
        1 => Just(Step::CharRemove),
        1 => Just(Step::ConnectionLost),
    ]
}

fn run(area: &mut DockArea, arena: &mut FrameArena, text: &mut MonospaceText, step: &Step) {
    arena.reset();
    let mut cx = FrameCx {
        text,
        arena,
        widget_rect: CONTAINER,
        visible_rect: CONTAINER,
    };
    match *step {
        Step::Press {
            pointer,
            position,
            pressed,
            consumed,
        } => {
            area.pointer_press(
                PointerPress {
                    id: pointer,
                    position,
                    pressed,
                },
                consumed,
                &mut cx,
            );
        }
        Step::Move { pointer, position } => {
            area.pointer_move(
                PointerMove {
                    id: pointer,
                    position,
                },
                false,
                &mut cx,
            );
        }
        Step::AddWindow => {
            area.add_window("extra", Rgba::WHITE, Box::new(EmptyWidget));
        }
        Step::Text => area.text_input(&TextInputEvent::default(), cx.arena),
        Step::CharRemove => area.char_remove(CharRemoveEvent, cx.arena),
        Step::ConnectionLost => area.input_connection_lost(cx.arena),
    }
}

fn check(area: &DockArea) -> Result<(), TestCaseError> {
    prop_assert_eq!(area.validate(), Ok(()));
    prop_assert!(area.layer_count() >= 1);

    for index in 0..area.layer_count() {
        let rect = area.layer_rect(index, CONTAINER);
        prop_assert!(
            CONTAINER.contains_rect(&rect),
            "layer {} rect {:?} escapes the container",
            index,
            rect
        );
    }

    let mut tabs = FxHashSet::default();
    for (_, node) in area.nodes().iter() {
        if let Some(split) = node.as_split() {
            prop_assert!((MIN_SPLIT_RATIO..=MAX_SPLIT_RATIO).contains(&split.ratio()));
        }
        if let Some(window) = node.as_window() {
            for tab in window.tabs() {
                prop_assert!(tabs.insert(tab.id), "tab {:?} appears twice", tab.id);
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(192))]

    #[test]
    fn gesture_streams_preserve_invariants(steps in prop::collection::vec(step(), 1..80)) {
        let mut area = DockArea::new();
        for title in ["back", "left", "right"] {
            area.add_window(title, Rgba::WHITE, Box::new(EmptyWidget));
        }
        let mut arena = FrameArena::default();
        let mut text = MonospaceText;
        for step in &steps {
            run(&mut area, &mut arena, &mut text, step);
            check(&area)?;
        }
    }

    #[test]
    fn released_pointers_leave_no_gesture(steps in prop::collection::vec(step(), 1..40)) {
        let mut area = DockArea::new();
        for title in ["back", "front"] {
            area.add_window(title, Rgba::WHITE, Box::new(EmptyWidget));
        }
        let mut arena = FrameArena::default();
        let mut text = MonospaceText;
        for step in &steps {
            run(&mut area, &mut arena, &mut text, step);
        }
        if let Some(pointer) = area.state().pointer() {
            let release = Step::Press {
                pointer,
                position: Vec2::new(-10.0, -10.0),
                pressed: false,
                consumed: false,
            };
            run(&mut area, &mut arena, &mut text, &release);
        }
        prop_assert!(area.state().is_normal());
        check(&area)?;
    }
}
