// Main entry point that forwards to the shader-forge-app binary
fn main() {
    // Exit with the same code as the app
    std::process::exit(match shader_forge_app::main() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    });
}
