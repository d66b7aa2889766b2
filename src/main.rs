use std::path::PathBuf;

use eframe::egui;
use orderscope::app::OrderscopeApp;

fn main() -> eframe::Result {
    env_logger::init();

    // The host may hand us a dataset path on the command line.
    let initial_path = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Orderscope – Orders Analytics Dashboard",
        options,
        Box::new(move |_cc| {
            let mut app = OrderscopeApp::default();
            if let Some(path) = initial_path {
                app.state.load_path(&path);
            }
            Ok(Box::new(app))
        }),
    )
}
