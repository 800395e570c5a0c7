fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("Usage: retro8 <rom-path>");
            std::process::exit(1);
        }
    };

    log::info!("Playing ROM path: '{}'", rom_path);
    let rom = match std::fs::read(&rom_path) {
        Ok(rom) => rom,
        Err(e) => {
            eprintln!("Failed to read ROM file '{}': {}", rom_path, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = retro8::run(&rom) {
        eprintln!("retro8 exited with an error: {e:#}");
        std::process::exit(1);
    }
}
