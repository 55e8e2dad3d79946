use serde::Serialize;

/// One blend weight on a grid axis, with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ratio {
  pub value: f32,
  pub label: &'static str,
}

impl Ratio {
  pub const fn new(value: f32, label: &'static str) -> Self { Ratio { value, label } }
}

/// Weights between CA (0) and CB (1).
pub const COLUMNS: &[Ratio] = &[
  Ratio::new(0.0, "CA"),
  Ratio::new(1.0 / 3.0, "CA:CB 2:1"),
  Ratio::new(0.5, "CA:CB 1:1"),
  Ratio::new(2.0 / 3.0, "CA:CB 1:2"),
  Ratio::new(1.0, "CB"),
];

const RATIO_ROWS: &[Ratio] = &[
  Ratio::new(0.0, "0:1"),
  Ratio::new(0.25, "1:3"),
  Ratio::new(1.0 / 3.0, "1:2"),
  Ratio::new(0.5, "1:1"),
  Ratio::new(2.0 / 3.0, "2:1"),
  Ratio::new(0.75, "3:1"),
];

const PERCENTAGE_ROWS: &[Ratio] = &[
  Ratio::new(0.0, "100%"),
  Ratio::new(0.25, "75%"),
  Ratio::new(0.5, "50%"),
  Ratio::new(0.75, "25%"),
  Ratio::new(0.95, "5%"),
];

/// Which row table a grid uses. The two variants weight rows differently and are never
/// merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RowScale {
  /// Rows labeled as CC:base ratios, with the preset selector.
  #[default]
  Ratio,
  /// Rows labeled by how much of the base mix remains. No presets.
  Percentage,
}

impl RowScale {
  pub const fn rows(self) -> &'static [Ratio] {
    match self {
      RowScale::Ratio => RATIO_ROWS,
      RowScale::Percentage => PERCENTAGE_ROWS,
    }
  }

  pub const fn has_presets(self) -> bool { matches!(self, RowScale::Ratio) }

  pub const fn toggled(self) -> Self {
    match self {
      RowScale::Ratio => RowScale::Percentage,
      RowScale::Percentage => RowScale::Ratio,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn table_sizes() {
    assert_eq!(COLUMNS.len(), 5);
    assert_eq!(RowScale::Ratio.rows().len(), 6);
    assert_eq!(RowScale::Percentage.rows().len(), 5);
  }

  #[test]
  fn weights_stay_in_unit_range_and_ascend() {
    for table in [COLUMNS, RowScale::Ratio.rows(), RowScale::Percentage.rows()] {
      assert!(table.iter().all(|r| (0.0..=1.0).contains(&r.value)));
      assert!(table.windows(2).all(|w| w[0].value < w[1].value));
    }
  }

  #[test]
  fn variants_keep_distinct_semantics() {
    let ratio: Vec<_> = RowScale::Ratio.rows().iter().map(|r| r.label).collect();
    let percentage: Vec<_> = RowScale::Percentage.rows().iter().map(|r| r.label).collect();
    assert_eq!(ratio, ["0:1", "1:3", "1:2", "1:1", "2:1", "3:1"]);
    assert_eq!(percentage, ["100%", "75%", "50%", "25%", "5%"]);
    assert_eq!(RowScale::Percentage.rows()[4].value, 0.95);
  }

  #[test]
  fn only_ratio_rows_offer_presets() {
    assert!(RowScale::Ratio.has_presets());
    assert!(!RowScale::Percentage.has_presets());
    assert_eq!(RowScale::Ratio.toggled(), RowScale::Percentage);
    assert_eq!(RowScale::Percentage.toggled().toggled(), RowScale::Percentage);
  }
}
