use serde::Serialize;

use crate::{
  hex::{self, BLACK, Rgb},
  mix::Mixer,
  ratio::{COLUMNS, RowScale},
};

/// Upper bound on how much of the tint color can enter the base mix.
const TINT_CAP: f32 = 0.6;

/// An optional color blended into the CA/CB mix for rows below `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint<'a> {
  pub color: &'a str,
  pub start: f32,
}

/// One grid: CA and CB mixed across columns, then pulled toward CC down the rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig<'a> {
  pub title: &'a str,
  pub ca:    &'a str,
  pub cb:    &'a str,
  pub cc:    &'a str,
  pub tint:  Option<Tint<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
  pub title:   String,
  pub columns: Vec<&'static str>,
  pub rows:    Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
  pub label: &'static str,
  pub ratio: f32,
  pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
  pub color:  Rgb,
  pub row:    f32,
  pub column: f32,
}

/// Weight of the tint step: zero once `row >= start`, growing linearly below it.
pub fn tint_ratio(start: f32, row: f32) -> f32 { ((start - row) * TINT_CAP).max(0.0) }

impl<'a> GridConfig<'a> {
  pub const fn new(title: &'a str, ca: &'a str, cb: &'a str, cc: &'a str) -> Self {
    GridConfig { title, ca, cb, cc, tint: None }
  }

  pub fn with_tint(mut self, color: &'a str, start: f32) -> Self {
    self.tint = Some(Tint { color, start });
    self
  }

  /// The color of one cell. Unparseable colors or a missing interpolation result give black.
  pub fn cell<M: Mixer + ?Sized>(&self, mixer: &M, row: f32, column: f32) -> Rgb {
    self.try_cell(mixer, row, column).unwrap_or_else(|| {
      tracing::trace!(title = self.title, row, column, "cell fell back to black");
      BLACK
    })
  }

  fn try_cell<M: Mixer + ?Sized>(&self, mixer: &M, row: f32, column: f32) -> Option<Rgb> {
    let ca = hex::parse(self.ca)?;
    let cb = hex::parse(self.cb)?;
    let cc = hex::parse(self.cc)?;

    let mut ab = mixer.lerp(ca.channels(), cb.channels(), column)?;

    if let Some(tint) = self.tint {
      let cd = hex::parse(tint.color)?;
      ab = mixer.lerp(ab, cd.channels(), tint_ratio(tint.start, row))?;
    }

    let mixed = mixer.lerp(ab, cc.channels(), row)?;
    Some(Rgb::from_channels(mixed))
  }

  pub fn compose<M: Mixer + ?Sized>(&self, scale: RowScale, mixer: &M) -> Grid {
    let rows = scale
      .rows()
      .iter()
      .map(|row| GridRow {
        label: row.label,
        ratio: row.value,
        cells: COLUMNS
          .iter()
          .map(|column| Cell {
            color:  self.cell(mixer, row.value, column.value),
            row:    row.value,
            column: column.value,
          })
          .collect(),
      })
      .collect();

    Grid {
      title:   self.title.to_string(),
      columns: COLUMNS.iter().map(|c| c.label).collect(),
      rows,
    }
  }
}

impl Grid {
  pub fn cells(&self) -> impl Iterator<Item = &Cell> { self.rows.iter().flat_map(|r| &r.cells) }

  pub fn len(&self) -> usize { self.rows.iter().map(|r| r.cells.len()).sum() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}
