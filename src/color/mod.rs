use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use smart_leds::hsv::hsv2rgb;

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Scale every channel of `color` by `level` (clamped to `0.0..=1.0`)
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale(color: Rgb, level: f32) -> Rgb {
    let level = level.clamp(0.0, 1.0);
    let channel = |value: u8| (f32::from(value) * level) as u8;
    Rgb {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// Build a color from an `[r, g, b]` byte triplet
///
/// Returns `None` if the slice is shorter than 3 bytes.
pub fn from_rgb_bytes(bytes: &[u8]) -> Option<Rgb> {
    match bytes {
        [r, g, b, ..] => Some(Rgb::new(*r, *g, *b)),
        _ => None,
    }
}
