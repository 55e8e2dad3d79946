use color::{ColorSpace, HueDirection, Oklab, OpaqueColor, Srgb};
use serde::Serialize;

/// A perceptual interpolation primitive.
///
/// Channels are on the `0..=255` scale and may be fractional. `t = 0` is `a` and `t = 1` is
/// `b`. Implementations must be pure: the compositor relies on identical inputs producing
/// identical cells.
pub trait Mixer {
  fn lerp(&self, a: [f32; 3], b: [f32; 3], t: f32) -> Option<[f32; 3]>;

  /// Blends RGB through [`Mixer::lerp`] and alpha linearly.
  fn lerp_rgba(&self, from: [f32; 4], to: [f32; 4], t: f32) -> Option<[f32; 4]> {
    let [r, g, b] = self.lerp([from[0], from[1], from[2]], [to[0], to[1], to[2]], t)?;
    let a = from[3] + (to[3] - from[3]) * t;
    a.is_finite().then_some([r, g, b, a])
  }
}

impl<M: Mixer + ?Sized> Mixer for &M {
  fn lerp(&self, a: [f32; 3], b: [f32; 3], t: f32) -> Option<[f32; 3]> { (**self).lerp(a, b, t) }
}

/// The interpolation models available to the compositor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Blend {
  /// Pigment mixing through the Kubelka-Munk based latent space of `mixbox`.
  #[default]
  Pigment,
  /// Straight interpolation in Oklab.
  Oklab,
  /// Naive per-channel interpolation in gamma-encoded sRGB.
  Srgb,
}

impl Blend {
  /// The following blend, wrapping around.
  pub const fn next(self) -> Self {
    match self {
      Blend::Pigment => Blend::Oklab,
      Blend::Oklab => Blend::Srgb,
      Blend::Srgb => Blend::Pigment,
    }
  }
}

impl Mixer for Blend {
  fn lerp(&self, a: [f32; 3], b: [f32; 3], t: f32) -> Option<[f32; 3]> {
    if !t.is_finite() || !a.iter().chain(&b).all(|c| c.is_finite()) {
      return None;
    }

    match self {
      Blend::Pigment => {
        let mixed = mixbox::lerp(&to_rgb8(a), &to_rgb8(b), t);
        Some(mixed.map(f32::from))
      }
      Blend::Oklab => Some(lerp_in::<Oklab>(a, b, t)),
      Blend::Srgb => Some(lerp_in::<Srgb>(a, b, t)),
    }
  }
}

fn lerp_in<CS: ColorSpace>(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
  let from = OpaqueColor::<Srgb>::new(a.map(|c| c / 255.0)).convert::<CS>();
  let to = OpaqueColor::<Srgb>::new(b.map(|c| c / 255.0)).convert::<CS>();

  from.lerp(to, t, HueDirection::Shorter).convert::<Srgb>().components.map(|c| c * 255.0)
}

fn to_rgb8(channels: [f32; 3]) -> [u8; 3] { channels.map(|c| c.round().clamp(0.0, 255.0) as u8) }

#[cfg(test)]
mod tests {
  use super::*;

  const ALL: [Blend; 3] = [Blend::Pigment, Blend::Oklab, Blend::Srgb];

  fn close(a: [f32; 3], b: [f32; 3], tolerance: f32) -> bool {
    a.iter().zip(&b).all(|(x, y)| (x - y).abs() <= tolerance)
  }

  #[test]
  fn endpoints_reproduce_inputs() {
    let a = [204.0, 153.0, 51.0];
    let b = [227.0, 0.0, 34.0];
    for blend in ALL {
      assert!(close(blend.lerp(a, b, 0.0).unwrap(), a, 1.0), "{blend:?} at t=0");
      assert!(close(blend.lerp(a, b, 1.0).unwrap(), b, 1.0), "{blend:?} at t=1");
    }
  }

  #[test]
  fn srgb_is_channel_average() {
    let mid = Blend::Srgb.lerp([0.0, 100.0, 255.0], [255.0, 100.0, 0.0], 0.5).unwrap();
    assert!(close(mid, [127.5, 100.0, 127.5], 1e-3));
  }

  #[test]
  fn non_finite_input_is_absent() {
    for blend in ALL {
      assert_eq!(blend.lerp([0.0; 3], [255.0; 3], f32::NAN), None);
      assert_eq!(blend.lerp([f32::INFINITY, 0.0, 0.0], [255.0; 3], 0.5), None);
    }
  }

  #[test]
  fn deterministic() {
    let a = [0.0, 49.0, 83.0];
    let b = [72.0, 60.0, 50.0];
    for blend in ALL {
      assert_eq!(blend.lerp(a, b, 0.4), blend.lerp(a, b, 0.4));
    }
  }

  #[test]
  fn pigment_blue_and_yellow_make_green() {
    let [r, g, b] = Blend::Pigment.lerp([0.0, 33.0, 133.0], [252.0, 211.0, 0.0], 0.5).unwrap();
    assert!(g > r && g > b, "expected a green, got {r} {g} {b}");
  }

  #[test]
  fn rgba_interpolates_alpha_linearly() {
    let mixed = Blend::Srgb.lerp_rgba([0.0, 0.0, 0.0, 1.0], [255.0, 255.0, 255.0, 0.0], 0.25);
    let [r, g, b, a] = mixed.unwrap();
    assert!(close([r, g, b], [63.75; 3], 1e-3));
    assert!((a - 0.75).abs() < 1e-6);
  }

  #[test]
  fn next_cycles_all_blends() {
    assert_eq!(Blend::Pigment.next().next().next(), Blend::Pigment);
    assert_eq!(ALL.map(Blend::next), [Blend::Oklab, Blend::Srgb, Blend::Pigment]);
  }

  #[test]
  fn borrowed_mixer_delegates() {
    let blend = &Blend::Oklab;
    let a = [10.0, 20.0, 30.0];
    assert_eq!(Mixer::lerp(&blend, a, a, 0.5), Blend::Oklab.lerp(a, a, 0.5));
  }
}
