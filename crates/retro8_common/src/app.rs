use crate::key::Key;

/// Contract between an emulator and the frontend that drives it.
///
/// The frontend calls `update` once per video frame with an RGB24 buffer of
/// `width * height * 3` bytes; the app runs the machine for one frame's worth
/// of work and paints the buffer. Key events arrive already mapped to the
/// logical `Key` set.
pub trait App {
    fn init(&mut self);
    fn update(&mut self, screen: &mut [u8]);
    fn handle_key_event(&mut self, key: Key, is_down: bool);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn scale(&self) -> u32;
    fn title(&self) -> String;
}
