use anyhow::{ensure, Result};
use retro8_common::app::App;
use retro8_core::{EmulatorApp, MAX_ROM_SIZE};
use retro8_sdl2::{SdlContext, SdlInitInfo};

/// Wire a ROM image into the machine and hand it to the SDL2 frontend.
///
/// Size validation happens here, before the bytes reach the core: the core
/// itself only copies.
pub fn run(rom_data: &[u8]) -> Result<()> {
    ensure!(
        rom_data.len() <= MAX_ROM_SIZE,
        "ROM image is {} bytes, but only {} bytes fit above the load address",
        rom_data.len(),
        MAX_ROM_SIZE
    );

    let mut app = EmulatorApp::default();
    app.emulator.load_rom(rom_data);

    let init_info = SdlInitInfo::builder()
        .width(app.width())
        .height(app.height())
        .scale(app.scale())
        .title(app.title())
        .build();
    SdlContext::run(init_info, app)
}
