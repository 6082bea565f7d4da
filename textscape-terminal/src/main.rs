/// Textscape Terminal - interactive term visualization
///
/// Walks the staged flow in the terminal: enter a source text, enter search
/// terms, visualize, then orbit the camera around the placed primitives.
/// Controls in the camera stage:
///   - WASD / Arrow Keys: Orbit the camera
///   - E/R: Zoom in/out
///   - T: Toggle the turntable sweep
///   - 1-9: Toggle term group visibility
///   - Q/ESC: Quit

use std::io;
use textscape_terminal::run_interactive;

fn main() -> io::Result<()> {
    env_logger::init();

    println!("Textscape Terminal - Text visualization");
    run_interactive()?;

    println!("Thank you for using Textscape!");
    Ok(())
}
