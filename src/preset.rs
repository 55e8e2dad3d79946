use std::fmt;

use serde::Serialize;

/// A named pair of starting colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
  pub key:     &'static str,
  pub name:    &'static str,
  pub color_a: &'static str,
  pub color_b: &'static str,
}

/// The first entry is "Custom": an empty key that marks no preset as active.
pub const PRESETS: &[Preset] = &[
  Preset::new("", "Custom", "", ""),
  Preset::new("zorn", "Zorn", "#CC9933", "#E30022"),
  Preset::new("moonlight", "Moonlight", "#003153", "#483C32"),
  Preset::new("power", "Power", "#E32636", "#40826D"),
  Preset::new("blockbuster", "Blockbuster", "#006064", "#F28C28"),
  Preset::new("sorcerer", "Sorcerer", "#4B0082", "#CC9933"),
  Preset::new("botanical", "Botanical", "#8E3A59", "#507d2a"),
];

pub const CUSTOM: &Preset = &PRESETS[0];

impl Preset {
  const fn new(
    key: &'static str,
    name: &'static str,
    color_a: &'static str,
    color_b: &'static str,
  ) -> Self {
    Preset { key, name, color_a, color_b }
  }

  pub fn is_custom(&self) -> bool { self.key.is_empty() }
}

impl fmt::Display for Preset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_custom() {
      write!(f, "{}", self.name)
    } else {
      write!(f, "{:<12} {:<12} {} / {}", self.key, self.name, self.color_a, self.color_b)
    }
  }
}

pub fn find(key: &str) -> Option<&'static Preset> { PRESETS.iter().find(|p| p.key == key) }

/// The preset `step` places after `key`, wrapping around the table.
pub fn cycle(key: &str, step: isize) -> &'static Preset {
  let index = PRESETS.iter().position(|p| p.key == key).unwrap_or(0) as isize;
  let len = PRESETS.len() as isize;
  &PRESETS[(index + step).rem_euclid(len) as usize]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hex;

  #[test]
  fn custom_comes_first_and_is_empty() {
    assert!(CUSTOM.is_custom());
    assert_eq!(CUSTOM.name, "Custom");
    assert_eq!(CUSTOM.color_a, "");
    assert_eq!(CUSTOM.color_b, "");
    assert_eq!(find(""), Some(CUSTOM));
  }

  #[test]
  fn every_named_preset_is_valid() {
    for preset in PRESETS.iter().filter(|p| !p.is_custom()) {
      assert!(hex::is_valid(preset.color_a), "{}", preset.key);
      assert!(hex::is_valid(preset.color_b), "{}", preset.key);
    }
  }

  #[test]
  fn lookup_by_key() {
    let zorn = find("zorn").unwrap();
    assert_eq!((zorn.color_a, zorn.color_b), ("#CC9933", "#E30022"));
    assert_eq!(find("botanical").unwrap().color_b, "#507d2a");
    assert_eq!(find("Zorn"), None);
    assert_eq!(find("nope"), None);
  }

  #[test]
  fn cycle_wraps() {
    assert_eq!(cycle("", 1).key, "zorn");
    assert_eq!(cycle("", -1).key, "botanical");
    assert_eq!(cycle("botanical", 1).key, "");
    assert_eq!(cycle("unknown", 2).key, "moonlight");
  }
}
