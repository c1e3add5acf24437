use eframe::{App, CreationContext};
use egui::{CollapsingHeader, ScrollArea, Ui};
use egui_graph_gui::{
    Callbacks, Editor, GraphView, HandlerError, Labels, SettingsEditor, SettingsStyle, Verdict,
};
use log::info;

#[cfg(feature = "events")]
pub const EVENTS_LIMIT: usize = 200;

#[cfg(feature = "events")]
pub use crossbeam::channel::{unbounded, Receiver, Sender};
#[cfg(feature = "events")]
pub use egui_graph_gui::events::Event;

/// Vertices carry a name, edges a weight.
pub type DemoEditor = Editor<String, u32>;

/// Handlers of the demo: vertices are named `v0`, `v1`, ... edges start with weight 1, an edge
/// weight must parse as a number and vertex names may not be blank.
pub fn demo_callbacks() -> Callbacks<String, u32> {
    let mut next = 0usize;

    Callbacks::new()
        .with_add_vertex(move |_| {
            let name = format!("v{next}");
            next += 1;
            Ok(Verdict::Replace(name))
        })
        .with_add_edge(|_, _| Ok(Verdict::Replace(1)))
        .with_edit_vertex(|_, input| {
            let name = input.trim();
            if name.is_empty() {
                return Ok(Verdict::Veto);
            }
            Ok(Verdict::Replace(name.to_string()))
        })
        .with_edit_edge(|_, input| {
            input
                .trim()
                .parse::<u32>()
                .map(Verdict::Replace)
                .map_err(|err| HandlerError::new(format!("weight must be a number: {err}")))
        })
        .with_remove_vertex(|name| {
            info!("removing vertex {name}");
            Ok(Verdict::Keep)
        })
        .with_remove_edge(|_| Ok(Verdict::Keep))
}

pub struct DemoApp {
    pub editor: DemoEditor,
    pub labels: Labels<String, u32>,
    pub settings_style: SettingsStyle,
    pub initial_vertices: usize,
    pub show_sidebar: bool,

    #[cfg(feature = "events")]
    pub last_events: Vec<String>,
    #[cfg(feature = "events")]
    pub event_consumer: Receiver<Event>,
}

impl DemoApp {
    pub fn new(_cc: &CreationContext<'_>) -> Self {
        let settings = SettingsEditor::default();
        let initial_vertices = settings.initial_vertices;

        #[cfg(feature = "events")]
        let (event_publisher, event_consumer) = unbounded();

        let editor = Editor::new(demo_callbacks()).with_settings(settings);
        #[cfg(feature = "events")]
        let editor = editor.with_event_sink(event_publisher);

        let mut app = Self {
            editor,
            labels: Labels::default().with_edge(|w: &u32| format!("w={w}")),
            settings_style: SettingsStyle::default(),
            initial_vertices,
            show_sidebar: true,
            #[cfg(feature = "events")]
            last_events: Vec::new(),
            #[cfg(feature = "events")]
            event_consumer,
        };
        app.editor.initialize();
        app
    }

    fn reset(&mut self) {
        self.editor.settings_mut().initial_vertices = self.initial_vertices;
        self.editor.initialize();
    }

    fn ui_graph_section(&mut self, ui: &mut Ui) {
        ui.label(format!("vertices: {}", self.editor.graph().vertex_count()));
        ui.label(format!("edges: {}", self.editor.graph().edge_count()));

        ui.horizontal(|ui| {
            ui.label("initial vertices");
            ui.add(egui::Slider::new(&mut self.initial_vertices, 0..=50));
        });
        if ui
            .button("Reset")
            .on_hover_text("Replace the graph with a new random star")
            .clicked()
        {
            self.reset();
        }
    }

    fn ui_style(&mut self, ui: &mut Ui) {
        CollapsingHeader::new("Style").default_open(true).show(ui, |ui| {
            ui.checkbox(&mut self.settings_style.labels_always, "labels_always");
            ui.label("Show labels of every element, not only of hovered ones.");
        });
    }

    fn ui_help(ui: &mut Ui) {
        CollapsingHeader::new("Controls").default_open(true).show(ui, |ui| {
            ui.label("right click on empty space: add vertex");
            ui.label("right click on vertex or edge: edit");
            ui.label("drag: move vertex");
            ui.label("ctrl + drag: connect vertices");
            ui.label("shift + click or drag: delete");
        });
    }

    #[cfg(feature = "events")]
    fn handle_events(&mut self) {
        self.event_consumer.try_iter().for_each(|e| {
            if self.last_events.len() > EVENTS_LIMIT {
                self.last_events.remove(0);
            }
            self.last_events.push(format!("{e:?}"));
        });
    }

    #[cfg(feature = "events")]
    fn ui_events(&mut self, ui: &mut Ui) {
        CollapsingHeader::new("Events").default_open(true).show(ui, |ui| {
            if ui.button("clear").clicked() {
                self.last_events.clear();
            }
            ScrollArea::vertical()
                .id_salt("events")
                .max_height(200.)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    self.last_events.iter().for_each(|e| {
                        ui.label(e);
                    });
                });
        });
    }
}

impl App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        #[cfg(feature = "events")]
        self.handle_events();

        if self.show_sidebar {
            egui::SidePanel::right("right")
                .default_width(260.0)
                .min_width(260.0)
                .show(ctx, |ui| {
                    ScrollArea::vertical().show(ui, |ui| {
                        CollapsingHeader::new("Graph")
                            .default_open(true)
                            .show(ui, |ui| self.ui_graph_section(ui));
                        self.ui_style(ui);
                        Self::ui_help(ui);
                        #[cfg(feature = "events")]
                        self.ui_events(ui);
                    });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if ui
                .small_button(if self.show_sidebar { "»" } else { "«" })
                .on_hover_text("Toggle side panel")
                .clicked()
            {
                self.show_sidebar = !self.show_sidebar;
            }

            ui.add(
                &mut GraphView::new(&mut self.editor, &self.labels)
                    .with_styles(&self.settings_style),
            );
        });
    }
}
