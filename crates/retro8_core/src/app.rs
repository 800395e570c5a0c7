use crate::emulator::Emulator;
use crate::sound::Beeper;
use crate::{INSTRUCTIONS_PER_FRAME, SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};
use retro8_common::app::App;
use retro8_common::color::Color;
use retro8_common::key::Key;

/// Frontend-facing wrapper around the machine.
///
/// This is the cycle driver: each `update` call runs one frame worth of
/// instructions, ticks the timers once, feeds the beeper, and paints the
/// framebuffer. Instruction throughput and timer rate are paced separately,
/// as on the real machine.
#[derive(Default)]
pub struct EmulatorApp {
    should_exit: bool,
    pub emulator: Emulator,
    sound: Option<Beeper>,
}

impl App for EmulatorApp {
    fn init(&mut self) {
        log::info!("CHIP-8 init");
        // Bring up the beeper if we can; without audio the machine still
        // runs, just silently.
        if self.sound.is_none() {
            self.sound = Beeper::new();
        }
    }

    fn update(&mut self, screen_state: &mut [u8]) {
        for _ in 0..INSTRUCTIONS_PER_FRAME {
            if let Err(e) = self.emulator.step() {
                log::error!("machine fault, halting: {e}");
                self.should_exit = true;
                break;
            }
        }
        self.emulator.tick_timers();

        if let Some(beeper) = &mut self.sound {
            beeper.set_active(self.emulator.sound_active());
        }

        render_display(&self.emulator, screen_state);
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        if key == Key::Escape {
            if is_down {
                self.should_exit = true;
            }
            return;
        }
        if let Some(idx) = keypad_index(key) {
            self.emulator.set_key(idx, is_down);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("CHIP-8 exit");
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        "retro8".to_string()
    }
}

fn render_display(emulator: &Emulator, screen_state: &mut [u8]) {
    debug_assert_eq!(screen_state.len(), SCREEN_WIDTH * SCREEN_HEIGHT * 3);

    for (i, pixel) in emulator.display().as_slice().iter().enumerate() {
        let color = if *pixel { Color::WHITE } else { Color::BLACK };
        let index = i * 3;
        screen_state[index] = color.r;
        screen_state[index + 1] = color.g;
        screen_state[index + 2] = color.b;
    }
}

/// Map the `1234/QWER/ASDF/ZXCV` block to the 4x4 hex keypad, following the
/// layout of the original COSMAC VIP keyboard.
fn keypad_index(key: Key) -> Option<usize> {
    let idx = match key {
        Key::Num1 => 0x1,
        Key::Num2 => 0x2,
        Key::Num3 => 0x3,
        Key::Num4 => 0xC,
        Key::Q => 0x4,
        Key::W => 0x5,
        Key::E => 0x6,
        Key::R => 0xD,
        Key::A => 0x7,
        Key::S => 0x8,
        Key::D => 0x9,
        Key::F => 0xE,
        Key::Z => 0xA,
        Key::X => 0x0,
        Key::C => 0xB,
        Key::V => 0xF,
        _ => return None,
    };
    Some(idx)
}
