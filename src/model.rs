use serde::Serialize;

use crate::{
  Error,
  grid::{Grid, GridConfig},
  hex,
  mix::Mixer,
  preset::{self, CUSTOM, Preset},
  ratio::RowScale,
};

const BLACK: &str = "#000000";
const WHITE: &str = "#ffffff";

/// Everything the user controls. Render models are derived from this and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
  color_a:    String,
  color_b:    String,
  preset:     &'static Preset,
  scale:      RowScale,
  tint_start: Option<f32>,
}

/// The grids to draw for one [`InputState`]. Empty until both inputs are valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
  pub scale: RowScale,
  pub grids: Vec<Grid>,
}

impl Default for InputState {
  fn default() -> Self { InputState::new(RowScale::default()) }
}

impl InputState {
  pub fn new(scale: RowScale) -> Self {
    InputState {
      color_a:    String::new(),
      color_b:    String::new(),
      preset:     CUSTOM,
      scale,
      tint_start: None,
    }
  }

  pub fn color_a(&self) -> &str { &self.color_a }
  pub fn color_b(&self) -> &str { &self.color_b }
  pub fn preset(&self) -> &'static Preset { self.preset }
  pub fn scale(&self) -> RowScale { self.scale }
  pub fn tint_start(&self) -> Option<f32> { self.tint_start }

  /// Typing into an input always drops back to "Custom".
  pub fn set_color_a(&mut self, color: impl Into<String>) {
    self.color_a = color.into();
    self.preset = CUSTOM;
  }

  pub fn set_color_b(&mut self, color: impl Into<String>) {
    self.color_b = color.into();
    self.preset = CUSTOM;
  }

  /// Copies the preset's colors into both inputs. "Custom" only clears the selection.
  pub fn select_preset(&mut self, key: &str) -> Result<(), Error> {
    if !self.scale.has_presets() {
      return Err(Error::PresetsUnavailable);
    }
    let preset = preset::find(key).ok_or_else(|| Error::UnknownPreset(key.to_string()))?;
    self.apply(preset);
    Ok(())
  }

  /// Steps through the preset table. Does nothing when presets are unavailable.
  pub fn cycle_preset(&mut self, step: isize) {
    if self.scale.has_presets() {
      self.apply(preset::cycle(self.preset.key, step));
    }
  }

  fn apply(&mut self, preset: &'static Preset) {
    if !preset.is_custom() {
      self.color_a = preset.color_a.to_string();
      self.color_b = preset.color_b.to_string();
    }
    self.preset = preset;
  }

  pub fn set_scale(&mut self, scale: RowScale) {
    self.scale = scale;
    if !scale.has_presets() {
      self.preset = CUSTOM;
    }
  }

  /// `None` removes the tint step. Values outside `0..=1` are clamped.
  pub fn set_tint_start(&mut self, start: Option<f32>) {
    self.tint_start = start.filter(|s| s.is_finite()).map(|s| s.clamp(0.0, 1.0));
  }

  pub fn is_valid_a(&self) -> bool { hex::is_valid(&self.color_a) }
  pub fn is_valid_b(&self) -> bool { hex::is_valid(&self.color_b) }
  pub fn both_valid(&self) -> bool { self.is_valid_a() && self.is_valid_b() }

  /// The four standard grids, or none while either input is invalid.
  pub fn configurations(&self) -> Vec<GridConfig<'_>> {
    if !self.both_valid() {
      return vec![];
    }

    let (a, b) = (self.color_a.as_str(), self.color_b.as_str());
    let configs = [
      GridConfig::new("CA = User A, CB = User B, CC = White", a, b, WHITE),
      GridConfig::new("CA = User A, CB = User B, CC = Black", a, b, BLACK),
      GridConfig::new("CA = User A, CB = Black, CC = White", a, BLACK, WHITE),
      GridConfig::new("CA = User B, CB = Black, CC = White", b, BLACK, WHITE),
    ];

    match self.tint_start {
      Some(start) => configs.map(|c| c.with_tint(opposite(c.cc), start)).to_vec(),
      None => configs.to_vec(),
    }
  }

  pub fn render<M: Mixer + ?Sized>(&self, mixer: &M) -> RenderModel {
    let grids: Vec<_> =
      self.configurations().iter().map(|c| c.compose(self.scale, mixer)).collect();
    tracing::debug!(
      a = %self.color_a,
      b = %self.color_b,
      preset = self.preset.name,
      scale = ?self.scale,
      grids = grids.len(),
      "computed render model"
    );
    RenderModel { scale: self.scale, grids }
  }
}

fn opposite(reference: &str) -> &'static str { if reference == WHITE { BLACK } else { WHITE } }

impl RenderModel {
  pub fn is_empty(&self) -> bool { self.grids.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::mix::Blend;

  fn zorn() -> InputState {
    let mut state = InputState::default();
    state.select_preset("zorn").unwrap();
    state
  }

  #[test]
  fn nothing_renders_until_both_inputs_are_valid() {
    let mut state = InputState::default();
    assert!(state.render(&Blend::Srgb).is_empty());

    state.set_color_a("#CC9933");
    assert!(state.render(&Blend::Srgb).is_empty());

    state.set_color_b("E30022");
    assert!(!state.is_valid_b());
    assert!(state.render(&Blend::Srgb).is_empty());

    state.set_color_b("#E30022");
    assert_eq!(state.render(&Blend::Srgb).grids.len(), 4);
  }

  #[test]
  fn preset_fills_inputs() {
    let state = zorn();
    assert_eq!(state.color_a(), "#CC9933");
    assert_eq!(state.color_b(), "#E30022");
    assert_eq!(state.preset().name, "Zorn");
  }

  #[test]
  fn editing_clears_preset() {
    let mut state = zorn();
    state.set_color_b("#000001");
    assert!(state.preset().is_custom());
    assert_eq!(state.color_a(), "#CC9933");
  }

  #[test]
  fn custom_keeps_inputs() {
    let mut state = zorn();
    state.select_preset("").unwrap();
    assert!(state.preset().is_custom());
    assert_eq!(state.color_a(), "#CC9933");
  }

  #[test]
  fn preset_errors() {
    let mut state = InputState::default();
    assert!(matches!(state.select_preset("mauve"), Err(Error::UnknownPreset(k)) if k == "mauve"));

    let mut state = InputState::new(RowScale::Percentage);
    assert!(matches!(state.select_preset("zorn"), Err(Error::PresetsUnavailable)));
    state.cycle_preset(1);
    assert!(state.preset().is_custom());
    assert_eq!(state.color_a(), "");
  }

  #[test]
  fn switching_to_percentage_drops_preset() {
    let mut state = zorn();
    state.set_scale(RowScale::Percentage);
    assert!(state.preset().is_custom());
    assert_eq!(state.color_b(), "#E30022");
  }

  #[test]
  fn cycling_walks_the_table() {
    let mut state = InputState::default();
    state.cycle_preset(1);
    assert_eq!(state.preset().key, "zorn");
    state.cycle_preset(1);
    assert_eq!(state.color_a(), "#003153");
  }

  #[test]
  fn standard_configurations() {
    let state = zorn();
    let configs = state.configurations();
    let layout: Vec<_> = configs.iter().map(|c| (c.ca, c.cb, c.cc)).collect();
    assert_eq!(layout, [
      ("#CC9933", "#E30022", WHITE),
      ("#CC9933", "#E30022", BLACK),
      ("#CC9933", BLACK, WHITE),
      ("#E30022", BLACK, WHITE),
    ]);
    assert!(configs.iter().all(|c| c.tint.is_none()));
    assert_eq!(configs[3].title, "CA = User B, CB = Black, CC = White");
  }

  #[test]
  fn tint_uses_opposite_of_reference() {
    let mut state = zorn();
    state.set_tint_start(Some(1.5));
    assert_eq!(state.tint_start(), Some(1.0));

    let configs = state.configurations();
    assert_eq!(configs[0].tint.unwrap().color, BLACK);
    assert_eq!(configs[1].tint.unwrap().color, WHITE);
    assert!(configs.iter().all(|c| c.tint.unwrap().start == 1.0));

    state.set_tint_start(Some(f32::NAN));
    assert_eq!(state.tint_start(), None);
  }

  #[test]
  fn grid_sizes_follow_scale() {
    let mut state = zorn();
    let model = state.render(&Blend::Pigment);
    assert!(model.grids.iter().all(|g| g.len() == 30));

    state.set_scale(RowScale::Percentage);
    let model = state.render(&Blend::Pigment);
    assert_eq!(model.scale, RowScale::Percentage);
    assert!(model.grids.iter().all(|g| g.len() == 25));
  }

  #[test]
  fn render_model_serializes() {
    let model = zorn().render(&Blend::Srgb);
    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["scale"], "ratio");
    assert_eq!(json["grids"][0]["rows"][0]["cells"][0]["color"], "#cc9933");
    assert_eq!(json["grids"][0]["columns"][4], "CB");
  }
}
