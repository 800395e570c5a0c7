/// Logical keys the frontends report to apps.
///
/// The set covers the 4x4 block conventionally used for the CHIP-8 keypad
/// (`1234` / `QWER` / `ASDF` / `ZXCV`) plus a few control keys. Anything the
/// frontend cannot map becomes `Key::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Num1,
    Num2,
    Num3,
    Num4,
    Q,
    W,
    E,
    R,
    A,
    S,
    D,
    F,
    Z,
    X,
    C,
    V,
    P,
    Escape,
    None,
}
