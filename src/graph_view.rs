use egui::{Align2, Id, Pos2, Response, Sense, Ui, Vec2, Widget, Window};
use serde::{Deserialize, Serialize};

use crate::{
    draw::{DrawContext, Drawer, Labels},
    handlers::{Callbacks, Handlers},
    interaction::{InputEvent, Key},
    settings::SettingsStyle,
    Editor,
};

/// Input seen in the previous frame, kept in egui memory per widget.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct ViewMemory {
    size: Vec2,
    pointer: Option<Pos2>,
    hovered: bool,
    ctrl: bool,
    shift: bool,
}

impl ViewMemory {
    fn load(ui: &Ui, id: Id) -> Self {
        ui.data_mut(|data| data.get_persisted::<Self>(id).unwrap_or_default())
    }

    fn save(self, ui: &Ui, id: Id) {
        ui.data_mut(|data| data.insert_persisted(id, self));
    }
}

/// Widget which draws an [`Editor`] and feeds it with egui input.
///
/// Pointer coordinates are translated into the widget's local space, modifier changes become
/// key events and a secondary click becomes a context menu request. A pending edit is shown
/// as a small window with a text field.
///
/// ```no_run
/// # use egui_graph_gui::{Callbacks, Editor, GraphView, Labels};
/// # fn show(ui: &mut egui::Ui, editor: &mut Editor<String, String>, labels: &Labels<String, String>) {
/// ui.add(&mut GraphView::new(editor, labels));
/// # }
/// ```
pub struct GraphView<'a, V, E, H = Callbacks<V, E>> {
    editor: &'a mut Editor<V, E, H>,
    labels: &'a Labels<V, E>,

    settings_style: SettingsStyle,
}

impl<V, E, H> Widget for &mut GraphView<'_, V, E, H>
where
    V: Default,
    E: Default,
    H: Handlers<V, E>,
{
    fn ui(self, ui: &mut Ui) -> Response {
        let (resp, p) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let mut memory = ViewMemory::load(ui, resp.id);

        self.sync_size(&resp, &mut memory);
        if self.editor.pending_edit().is_none() {
            self.handle_keys(ui, &mut memory);
            self.handle_pointer(ui, &resp, &mut memory);
        }

        Drawer::new(
            self.editor.graph(),
            &DrawContext {
                painter: &p,
                style: &self.settings_style,
                labels: self.labels,
                offset: resp.rect.left_top().to_vec2(),
            },
        )
        .with_rubber_band(self.editor.state().rubber_band)
        .draw();

        self.show_edit_prompt(ui);

        if resp.hovered() || self.editor.state().mouse_down {
            ui.ctx().set_cursor_icon(self.editor.state().cursor);
        }

        memory.save(ui, resp.id);

        if self.editor.take_redraw_request() {
            ui.ctx().request_repaint();
        }

        resp
    }
}

impl<'a, V, E, H> GraphView<'a, V, E, H> {
    pub fn new(editor: &'a mut Editor<V, E, H>, labels: &'a Labels<V, E>) -> Self {
        Self {
            editor,
            labels,
            settings_style: SettingsStyle::default(),
        }
    }

    /// Modifies default style settings.
    pub fn with_styles(mut self, settings_style: &SettingsStyle) -> Self {
        self.settings_style = settings_style.clone();
        self
    }
}

impl<V, E, H> GraphView<'_, V, E, H>
where
    V: Default,
    E: Default,
    H: Handlers<V, E>,
{
    fn sync_size(&mut self, resp: &Response, memory: &mut ViewMemory) {
        let size = resp.rect.size();
        if memory.size != size {
            memory.size = size;
            self.editor.handle(InputEvent::Resize(size));
        }
    }

    fn handle_keys(&mut self, ui: &Ui, memory: &mut ViewMemory) {
        let modifiers = ui.input(|i| i.modifiers);

        let ctrl = modifiers.ctrl || modifiers.mac_cmd;
        if ctrl != memory.ctrl {
            memory.ctrl = ctrl;
            self.editor.handle(if ctrl {
                InputEvent::KeyDown(Key::Ctrl)
            } else {
                InputEvent::KeyUp(Key::Ctrl)
            });
        }

        if modifiers.shift != memory.shift {
            memory.shift = modifiers.shift;
            self.editor.handle(if modifiers.shift {
                InputEvent::KeyDown(Key::Shift)
            } else {
                InputEvent::KeyUp(Key::Shift)
            });
        }
    }

    fn handle_pointer(&mut self, ui: &Ui, resp: &Response, memory: &mut ViewMemory) {
        let (pos, pressed, released) = ui.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });
        let dragging = self.editor.state().mouse_down;

        if memory.hovered && !resp.hovered() && !dragging {
            memory.pointer = None;
            self.editor.handle(InputEvent::PointerLeave);
        }
        memory.hovered = resp.hovered();

        let Some(pos) = pos else {
            return;
        };
        let local = local_pos(resp, pos);

        if memory.pointer != Some(local) && (resp.hovered() || dragging) {
            memory.pointer = Some(local);
            self.editor.handle(InputEvent::PointerMove(local));
        }

        if pressed && resp.hovered() {
            self.editor.handle(InputEvent::PointerDown(local));
        }
        if released && self.editor.state().mouse_down {
            self.editor.handle(InputEvent::PointerUp(local));
        }

        if resp.secondary_clicked() {
            let at = resp.interact_pointer_pos().map_or(local, |p| local_pos(resp, p));
            self.editor.handle(InputEvent::ContextMenu(at));
        }
    }

    fn show_edit_prompt(&mut self, ui: &Ui) {
        let Some(request) = self.editor.pending_edit_mut() else {
            return;
        };

        let mut submit = false;
        let mut cancel = false;
        Window::new("Edit")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ui.ctx(), |ui| {
                ui.label(request.prompt.as_str());

                let field = ui.text_edit_singleline(&mut request.input);
                if !field.has_focus() && !field.lost_focus() {
                    field.request_focus();
                }
                if field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    cancel = true;
                }

                ui.horizontal(|ui| {
                    submit |= ui.button("OK").clicked();
                    cancel |= ui.button("Cancel").clicked();
                });
            });

        if submit {
            let _ = self.editor.submit_edit();
        } else if cancel {
            self.editor.cancel_edit();
        }
    }
}

fn local_pos(resp: &Response, p: Pos2) -> Pos2 {
    (p - resp.rect.left_top()).to_pos2()
}
