use std::{cell::RefCell, rc::Rc};

use egui::{pos2, CursorIcon, Vec2};
use egui_graph_gui::{
    Callbacks, EditTarget, Editor, InputEvent, Key, NodeIndex, Rejection, Verdict,
};

const A: egui::Pos2 = egui::Pos2::new(100., 100.);
const B: egui::Pos2 = egui::Pos2::new(300., 100.);
const BETWEEN: egui::Pos2 = egui::Pos2::new(200., 100.);

fn two_vertices(callbacks: Callbacks<String, u32>) -> (Editor<String, u32>, NodeIndex, NodeIndex) {
    let mut editor = Editor::new(callbacks).suppress_warnings();
    editor.add_vertex("A".to_string(), Some(A));
    editor.add_vertex("B".to_string(), Some(B));

    let a = editor.find_vertex_by_payload(&"A".to_string()).unwrap();
    let b = editor.find_vertex_by_payload(&"B".to_string()).unwrap();
    (editor, a, b)
}

fn connected(callbacks: Callbacks<String, u32>) -> (Editor<String, u32>, NodeIndex, NodeIndex) {
    let (mut editor, a, b) = two_vertices(callbacks);
    editor.add_edge(&"A".to_string(), &"B".to_string(), Some(7));
    (editor, a, b)
}

#[test]
fn hover_follows_pointer_and_moves_vertex_to_front() {
    let (mut editor, a, b) = two_vertices(Callbacks::new());
    assert_eq!(editor.graph().vertex_order(), &[a, b]);

    editor.handle(InputEvent::PointerMove(B));
    assert_eq!(editor.state().hovered_vertex, Some(b));
    assert!(editor.graph().vertex(b).unwrap().hovered());
    assert_eq!(editor.graph().vertex_order(), &[b, a]);

    editor.handle(InputEvent::PointerMove(pos2(500., 500.)));
    assert_eq!(editor.state().hovered_vertex, None);
    assert!(!editor.graph().vertex(b).unwrap().hovered());
}

#[test]
fn edge_is_hovered_only_without_vertex() {
    let (mut editor, _, _) = connected(Callbacks::new());
    let e = editor.find_edge_by_payload(&7).unwrap();

    editor.handle(InputEvent::PointerMove(BETWEEN));
    assert_eq!(editor.state().hovered_edge, Some(e));
    assert!(editor.graph().edge(e).unwrap().hovered());

    editor.handle(InputEvent::PointerMove(A));
    assert_eq!(editor.state().hovered_edge, None);
    assert!(!editor.graph().edge(e).unwrap().hovered());
}

#[test]
fn plain_drag_moves_hovered_vertex() {
    let (mut editor, a, _) = two_vertices(Callbacks::new());

    editor.handle(InputEvent::PointerMove(A));
    editor.handle(InputEvent::PointerDown(A));
    assert!(editor.graph().vertex(a).unwrap().selected());

    editor.handle(InputEvent::PointerMove(pos2(150., 160.)));
    assert_eq!(editor.graph().vertex(a).unwrap().center(), pos2(150., 160.));

    editor.handle(InputEvent::PointerUp(pos2(150., 160.)));
    assert!(!editor.state().mouse_down);
    assert!(!editor.graph().vertex(a).unwrap().selected());
}

#[test]
fn vetoed_move_keeps_position() {
    let (mut editor, a, _) =
        two_vertices(Callbacks::new().with_move_vertex(|_, _| Ok(Verdict::Veto)));

    editor.handle(InputEvent::PointerDown(A));
    editor.handle(InputEvent::PointerMove(pos2(150., 160.)));

    assert_eq!(editor.graph().vertex(a).unwrap().center(), A);
}

#[test]
fn drag_on_empty_space_does_nothing() {
    let (mut editor, a, b) = two_vertices(Callbacks::new());
    editor.take_redraw_request();

    editor.handle(InputEvent::PointerDown(pos2(500., 500.)));
    editor.handle(InputEvent::PointerMove(pos2(510., 510.)));
    editor.handle(InputEvent::PointerUp(pos2(510., 510.)));

    assert_eq!(editor.graph().vertex(a).unwrap().center(), A);
    assert_eq!(editor.graph().vertex(b).unwrap().center(), B);
}

#[test]
fn ctrl_drag_connects_vertices() {
    let (mut editor, a, b) = two_vertices(Callbacks::new().with_add_edge(|_, _| Ok(Verdict::Replace(3))));

    editor.handle(InputEvent::KeyDown(Key::Ctrl));
    assert_eq!(editor.state().cursor, CursorIcon::Crosshair);

    editor.handle(InputEvent::PointerMove(A));
    editor.handle(InputEvent::PointerDown(A));
    editor.handle(InputEvent::PointerMove(B));

    assert_eq!(editor.state().drag_target, Some(b));
    assert_eq!(editor.state().rubber_band, Some([A, B]));
    assert_eq!(editor.graph().vertex(a).unwrap().center(), A);

    editor.handle(InputEvent::PointerUp(B));

    let e = editor.graph().edge_between(a, b).unwrap();
    assert_eq!(editor.graph().edge(e).unwrap().payload(), &3);
    assert_eq!(editor.state().drag_target, None);
    assert_eq!(editor.state().rubber_band, None);
    assert!(!editor.state().ctrl_dragged);
    assert_eq!(editor.state().hovered_vertex, Some(b));

    editor.handle(InputEvent::KeyUp(Key::Ctrl));
    assert_eq!(editor.state().cursor, CursorIcon::Default);
}

#[test]
fn meta_acts_like_ctrl() {
    let (mut editor, a, b) = two_vertices(Callbacks::new());

    editor.handle(InputEvent::KeyDown(Key::Meta));
    editor.handle(InputEvent::PointerDown(B));
    editor.handle(InputEvent::PointerMove(A));
    editor.handle(InputEvent::PointerUp(A));

    assert!(editor.graph().edge_exists(a, b));
}

#[test]
fn ctrl_drag_to_empty_space_adds_nothing() {
    let (mut editor, _, _) = two_vertices(Callbacks::new());

    editor.handle(InputEvent::KeyDown(Key::Ctrl));
    editor.handle(InputEvent::PointerDown(A));
    editor.handle(InputEvent::PointerMove(pos2(200., 300.)));
    assert!(editor.state().rubber_band.is_some());
    assert_eq!(editor.state().drag_target, None);

    editor.handle(InputEvent::PointerUp(pos2(200., 300.)));
    assert_eq!(editor.graph().edge_count(), 0);
    assert_eq!(editor.state().rubber_band, None);
}

#[test]
fn vetoed_edge_drag_leaves_graph_unchanged() {
    let (mut editor, a, b) =
        two_vertices(Callbacks::new().with_add_edge(|_, _| Ok(Verdict::Veto)));

    editor.handle(InputEvent::KeyDown(Key::Ctrl));
    editor.handle(InputEvent::PointerDown(A));
    editor.handle(InputEvent::PointerMove(B));
    editor.handle(InputEvent::PointerUp(B));

    assert!(!editor.graph().edge_exists(a, b));
    assert_eq!(editor.state().hovered_vertex, Some(b));
    assert_eq!(editor.state().drag_target, None);
}

#[test]
fn shift_click_deletes_vertex_and_clears_hover() {
    let (mut editor, a, b) = connected(Callbacks::new());

    editor.handle(InputEvent::KeyDown(Key::Shift));
    assert_eq!(editor.state().cursor, CursorIcon::NotAllowed);

    editor.handle(InputEvent::PointerMove(A));
    editor.handle(InputEvent::PointerDown(A));

    assert!(editor.graph().vertex(a).is_none());
    assert!(editor.graph().vertex(b).is_some());
    assert_eq!(editor.graph().edge_count(), 0);
    assert_eq!(editor.state().hovered_vertex, None);

    editor.handle(InputEvent::PointerUp(A));
    editor.handle(InputEvent::KeyUp(Key::Shift));
    assert_eq!(editor.state().cursor, CursorIcon::Default);
}

#[test]
fn shift_swipe_deletes_everything_it_crosses() {
    let (mut editor, _, _) = connected(Callbacks::new());

    editor.handle(InputEvent::KeyDown(Key::Shift));
    editor.handle(InputEvent::PointerDown(pos2(200., 300.)));
    editor.handle(InputEvent::PointerMove(BETWEEN));
    assert_eq!(editor.graph().edge_count(), 0);
    assert_eq!(editor.graph().vertex_count(), 2);

    editor.handle(InputEvent::PointerMove(A));
    editor.handle(InputEvent::PointerMove(B));
    assert_eq!(editor.graph().vertex_count(), 0);
}

#[test]
fn vetoed_removal_keeps_vertex() {
    let (mut editor, a, _) =
        connected(Callbacks::new().with_remove_vertex(|_| Ok(Verdict::Veto)));

    editor.handle(InputEvent::KeyDown(Key::Shift));
    editor.handle(InputEvent::PointerDown(A));

    assert!(editor.graph().vertex(a).is_some());
    assert_eq!(editor.graph().edge_count(), 1);
}

#[test]
fn context_menu_on_empty_space_adds_vertex() {
    let (mut editor, _, _) = two_vertices(
        Callbacks::new().with_add_vertex(|pos| Ok(Verdict::Replace(format!("{},{}", pos.x, pos.y)))),
    );

    editor.handle(InputEvent::ContextMenu(pos2(500., 400.)));

    let c = editor.find_vertex_by_payload(&"500,400".to_string()).unwrap();
    assert_eq!(editor.graph().vertex(c).unwrap().center(), pos2(500., 400.));
    assert!(editor.pending_edit().is_none());
    assert!(!editor.state().mouse_down);
}

#[test]
fn context_menu_on_vertex_opens_and_submits_edit() {
    let (mut editor, a, _) = two_vertices(
        Callbacks::new().with_edit_vertex(|old, input| Ok(Verdict::Replace(format!("{old}{input}")))),
    );

    editor.handle(InputEvent::ContextMenu(A));
    let request = editor.pending_edit().unwrap();
    assert_eq!(request.target, EditTarget::Vertex(a));
    assert_eq!(request.prompt, editor.settings().vertex_edit_prompt);
    assert_eq!(editor.graph().vertex_count(), 2);

    editor.pending_edit_mut().unwrap().input = "!".to_string();
    assert_eq!(editor.submit_edit(), Ok(()));

    assert_eq!(editor.graph().vertex(a).unwrap().payload(), "A!");
    assert!(editor.pending_edit().is_none());
}

#[test]
fn context_menu_on_edge_opens_edge_edit() {
    let (mut editor, _, _) = connected(
        Callbacks::new().with_edit_edge(|_, input| {
            input
                .parse::<u32>()
                .map(Verdict::Replace)
                .map_err(|_| "not a number".into())
        }),
    );
    let e = editor.find_edge_by_payload(&7).unwrap();

    editor.handle(InputEvent::ContextMenu(BETWEEN));
    assert_eq!(editor.pending_edit().unwrap().target, EditTarget::Edge(e));
    assert_eq!(
        editor.pending_edit().unwrap().prompt,
        editor.settings().edge_edit_prompt
    );

    editor.pending_edit_mut().unwrap().input = "12".to_string();
    assert_eq!(editor.submit_edit(), Ok(()));
    assert_eq!(editor.graph().edge(e).unwrap().payload(), &12);
}

#[test]
fn cancelled_and_empty_edits_never_reach_handler() {
    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();
    let (mut editor, a, _) = two_vertices(Callbacks::new().with_edit_vertex(move |_, _| {
        *counter.borrow_mut() += 1;
        Ok(Verdict::Keep)
    }));

    editor.handle(InputEvent::ContextMenu(A));
    editor.cancel_edit();
    assert!(editor.pending_edit().is_none());

    editor.handle(InputEvent::ContextMenu(A));
    assert_eq!(editor.submit_edit(), Err(Rejection::EmptyInput));

    assert_eq!(editor.submit_edit(), Err(Rejection::NotFound));
    assert_eq!(*calls.borrow(), 0);
    assert_eq!(editor.graph().vertex(a).unwrap().payload(), "A");
}

#[test]
fn removing_edit_target_drops_pending_edit() {
    let (mut editor, _, _) = two_vertices(Callbacks::new());

    editor.handle(InputEvent::ContextMenu(A));
    assert!(editor.pending_edit().is_some());

    editor.remove_vertex(&"A".to_string());
    assert!(editor.pending_edit().is_none());
}

#[test]
fn other_keys_are_ignored() {
    let (mut editor, _, _) = two_vertices(Callbacks::new());

    editor.handle(InputEvent::KeyDown(Key::Other));
    assert!(!editor.state().ctrl_pressed);
    assert!(!editor.state().shift_pressed);
    assert_eq!(editor.state().cursor, CursorIcon::Default);
}

#[test]
fn resize_updates_canvas_and_requests_redraw() {
    let (mut editor, _, _) = two_vertices(Callbacks::new());
    editor.take_redraw_request();

    editor.handle(InputEvent::Resize(Vec2::new(1024., 768.)));

    assert_eq!(editor.graph().size(), Vec2::new(1024., 768.));
    assert!(editor.take_redraw_request());
}

#[test]
fn hovered_edge_moves_to_front() {
    let (mut editor, _, _) = connected(Callbacks::new());
    editor.add_vertex("C".to_string(), Some(pos2(200., 300.)));
    editor.add_edge(&"B".to_string(), &"C".to_string(), Some(8));
    let ab = editor.find_edge_by_payload(&7).unwrap();
    let bc = editor.find_edge_by_payload(&8).unwrap();
    assert_eq!(editor.graph().edge_order(), &[ab, bc]);

    editor.handle(InputEvent::PointerMove(pos2(250., 200.)));

    assert_eq!(editor.state().hovered_edge, Some(bc));
    assert_eq!(editor.graph().edge_order(), &[bc, ab]);
}

#[test]
fn pointer_leave_clears_hover() {
    let (mut editor, _, b) = connected(Callbacks::new());
    let e = editor.find_edge_by_payload(&7).unwrap();

    editor.handle(InputEvent::PointerMove(B));
    editor.handle(InputEvent::PointerLeave);
    assert_eq!(editor.state().hovered_vertex, None);
    assert!(!editor.graph().vertex(b).unwrap().hovered());

    editor.handle(InputEvent::PointerMove(BETWEEN));
    editor.take_redraw_request();
    editor.handle(InputEvent::PointerLeave);
    assert_eq!(editor.state().hovered_edge, None);
    assert!(!editor.graph().edge(e).unwrap().hovered());
    assert!(editor.take_redraw_request());
}

#[test]
fn pointer_leave_keeps_drag_source() {
    let (mut editor, a, _) = two_vertices(Callbacks::new());

    editor.handle(InputEvent::PointerDown(A));
    editor.handle(InputEvent::PointerLeave);

    assert_eq!(editor.state().hovered_vertex, Some(a));
    assert!(editor.graph().vertex(a).unwrap().hovered());
}
