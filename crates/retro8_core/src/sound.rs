use log::warn;
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};

/// Tone frequency for the buzzer. The original hardware produces a single
/// fixed beep; 440 Hz is a comfortable stand-in.
const BEEP_FREQUENCY_HZ: f32 = 440.0;
const BEEP_VOLUME: f32 = 0.15;

/// Single-tone buzzer driven by the sound timer.
///
/// A paused sink holds an endless sine source; `set_active` plays or pauses
/// it on edges. If audio initialization fails (e.g. no output device), the
/// constructor returns `None` and the emulator runs silently.
pub struct Beeper {
    // Dropping the stream kills the sink, so keep it alive alongside.
    _stream: OutputStream,
    _handle: OutputStreamHandle,
    sink: Sink,
    active: bool,
}

impl Beeper {
    pub fn new() -> Option<Self> {
        let (stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Failed to open default audio output, disabling sound: {e}");
                return None;
            }
        };
        let sink = match Sink::try_new(&handle) {
            Ok(sink) => sink,
            Err(e) => {
                warn!("Failed to create audio sink, disabling sound: {e}");
                return None;
            }
        };
        sink.append(SineWave::new(BEEP_FREQUENCY_HZ).amplify(BEEP_VOLUME));
        sink.pause();

        Some(Self {
            _stream: stream,
            _handle: handle,
            sink,
            active: false,
        })
    }

    /// Follow the sound timer: play while it is nonzero, pause otherwise.
    /// Only acts on state changes so the sink is not poked every frame.
    pub fn set_active(&mut self, on: bool) {
        if on == self.active {
            return;
        }
        self.active = on;
        if on {
            self.sink.play();
        } else {
            self.sink.pause();
        }
    }
}
