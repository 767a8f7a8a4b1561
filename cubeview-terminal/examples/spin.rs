/// Example: start the viewer in Model Rotate mode with a wider lens
///
/// Usage: cargo run --example spin

use cubeview_core::{Lens, Mode, ViewDefaults};
use cubeview_terminal::TerminalApp;
use std::io;

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let defaults = ViewDefaults {
        mode: Mode::ModelRotate,
        lens: Lens::new(31.6, 6.0, 30.0),
        ..ViewDefaults::default()
    };

    let mut app = TerminalApp::with_defaults(defaults)?;
    app.run()
}
