use std::fmt;

use serde::{Serialize, Serializer};

/// An 8-bit sRGB color, displayed as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb(pub [u8; 3]);

pub const BLACK: Rgb = Rgb([0x00, 0x00, 0x00]);
pub const WHITE: Rgb = Rgb([0xff, 0xff, 0xff]);

impl Rgb {
  pub const fn new(r: u8, g: u8, b: u8) -> Self { Rgb([r, g, b]) }

  /// Rounds each channel to the nearest integer and clamps it to `0..=255`.
  pub fn from_channels(channels: [f32; 3]) -> Self { Rgb(channels.map(round_channel)) }

  pub fn channels(&self) -> [f32; 3] { self.0.map(f32::from) }

  pub fn hex(&self) -> String { self.to_string() }
}

impl From<[u8; 3]> for Rgb {
  fn from(value: [u8; 3]) -> Self { Rgb(value) }
}

impl fmt::Display for Rgb {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Rgb([r, g, b]) = *self;
    write!(f, "#{r:02x}{g:02x}{b:02x}")
  }
}

impl Serialize for Rgb {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

/// Parses `RRGGBB` with an optional leading `#`. Digits are case-insensitive.
///
/// This is more lenient than [`is_valid`], which insists on the `#`. Presets and other
/// programmatic callers go through here.
pub fn parse(hex: &str) -> Option<Rgb> {
  let digits = hex.strip_prefix('#').unwrap_or(hex).as_bytes();
  if digits.len() != 6 {
    return None;
  }

  let mut rgb = [0u8; 3];
  for (channel, pair) in rgb.iter_mut().zip(digits.chunks_exact(2)) {
    *channel = nibble(pair[0])? << 4 | nibble(pair[1])?;
  }

  Some(Rgb(rgb))
}

/// Formats fractional channels as `#rrggbb`, rounding rather than truncating.
pub fn format(channels: [f32; 3]) -> String { Rgb::from_channels(channels).hex() }

/// True iff `hex` is exactly `#` followed by six hex digits.
pub fn is_valid(hex: &str) -> bool {
  match hex.strip_prefix('#') {
    Some(digits) => digits.len() == 6 && digits.bytes().all(|c| c.is_ascii_hexdigit()),
    None => false,
  }
}

fn nibble(c: u8) -> Option<u8> {
  match c {
    b'0'..=b'9' => Some(c - b'0'),
    b'a'..=b'f' => Some(c - b'a' + 10),
    b'A'..=b'F' => Some(c - b'A' + 10),
    _ => None,
  }
}

// NaN becomes 0 through the saturating cast.
fn round_channel(value: f32) -> u8 { value.round().clamp(0.0, 255.0) as u8 }
