/// Example: Visualize a JSON spec file in the terminal
///
/// Usage: cargo run --example from_config -- path/to/spec.json

use std::env;
use std::io;
use textscape_core::{build_scene, VisualizationSpec};
use textscape_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let spec = if args.len() < 2 {
        eprintln!("Usage: {} <spec-file.json>", args[0]);
        eprintln!("\nNo spec file provided, using the built-in demo...");
        VisualizationSpec::demo()
    } else {
        VisualizationSpec::from_json_file(&args[1])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?
    };

    let scene = build_scene(&spec, &mut rand::thread_rng());
    println!("Placed {} objects across {} terms", scene.object_count(), scene.groups.len());
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(scene)?;
    app.run()?;

    Ok(())
}
