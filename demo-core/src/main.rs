use demo_core::DemoApp;
use eframe::run_native;

fn main() -> eframe::Result {
    env_logger::init();

    run_native(
        "egui_graph_gui_demo",
        eframe::NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(DemoApp::new(cc)))),
    )
}
