/// Cubeview Terminal - interactive wireframe cube viewer
///
/// Controls:
///   - Mouse drag (left/middle/right): apply the current mode along x/y/z
///   - o/n/p: View Rotate / View Translate / View Perspective
///   - r/t/s: Model Rotate / Model Translate / Model Scale
///   - v: Viewport
///   - a: Reset view
///   - Q/ESC: Quit
///
/// `cubeview-terminal --replay <script>` runs an event script headlessly and
/// prints every rendered frame instead.

use std::env;
use std::fs;
use std::io;
use cubeview_core::{parse_script, run_script, ViewDefaults};
use cubeview_terminal::{to_io, write_frames, TerminalApp};

fn replay(path: &str) -> io::Result<()> {
    let text = fs::read_to_string(path).map_err(|e| {
        io::Error::new(e.kind(), format!("Failed to read script {}: {}", path, e))
    })?;
    let commands = parse_script(&text).map_err(to_io)?;
    log::info!("Replaying {} commands from {}", commands.len(), path);

    let frames = run_script(&commands, ViewDefaults::default()).map_err(to_io)?;
    let stdout = io::stdout();
    write_frames(&mut stdout.lock(), &frames)
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--replay") => match args.get(2) {
            Some(path) => replay(path),
            None => {
                eprintln!("Usage: {} [--replay <script>]", args[0]);
                Err(io::Error::new(io::ErrorKind::InvalidInput, "missing script path"))
            }
        },
        Some(other) => {
            eprintln!("Unknown argument: {}", other);
            eprintln!("Usage: {} [--replay <script>]", args[0]);
            Err(io::Error::new(io::ErrorKind::InvalidInput, "unknown argument"))
        }
        None => {
            let mut app = TerminalApp::new()?;
            app.run()
        }
    }
}
