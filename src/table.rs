use std::fmt;

use crate::{grid::Grid, hex::Rgb};

const LABEL_WIDTH: usize = 6;
const CELL_WIDTH: usize = 10;

impl fmt::Display for Grid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", self.title)?;
    write_header(f, &self.columns)?;

    for row in &self.rows {
      write!(f, "{:<LABEL_WIDTH$}", row.label)?;
      for cell in &row.cells {
        write!(f, "{:<CELL_WIDTH$}", cell.color.hex())?;
      }
      writeln!(f)?;
    }

    Ok(())
  }
}

/// A grid printed with 24-bit ANSI background colors behind each hex code.
pub struct Swatches<'a>(pub &'a Grid);

impl fmt::Display for Swatches<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let grid = self.0;
    writeln!(f, "{}", grid.title)?;
    write_header(f, &grid.columns)?;

    for row in &grid.rows {
      write!(f, "{:<LABEL_WIDTH$}", row.label)?;
      for cell in &row.cells {
        let Rgb([r, g, b]) = cell.color;
        let [fr, fg, fb] = contrast(cell.color).0;
        // CSI 48;2 sets the background, CSI 38;2 the foreground.
        write!(
          f,
          "\x1B[48;2;{r};{g};{b}m\x1B[38;2;{fr};{fg};{fb}m {:<w$}\x1B[0m ",
          cell.color.hex(),
          w = CELL_WIDTH - 3,
        )?;
      }
      writeln!(f)?;
    }

    Ok(())
  }
}

fn write_header(f: &mut fmt::Formatter<'_>, columns: &[&str]) -> fmt::Result {
  write!(f, "{:<LABEL_WIDTH$}", "")?;
  for label in columns {
    write!(f, "{label:<CELL_WIDTH$}")?;
  }
  writeln!(f)
}

/// Black or white, whichever reads better on `background`.
pub(crate) fn contrast(background: Rgb) -> Rgb {
  let Rgb([r, g, b]) = background;
  let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
  if luma > 140.0 { crate::hex::BLACK } else { crate::hex::WHITE }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    grid::GridConfig,
    hex::{BLACK, WHITE},
    mix::Blend,
    ratio::RowScale,
  };

  fn grid(scale: RowScale) -> Grid {
    GridConfig::new("Zorn on white", "#CC9933", "#E30022", "#FFFFFF").compose(scale, &Blend::Srgb)
  }

  #[test]
  fn plain_table_lists_every_cell() {
    let text = grid(RowScale::Percentage).to_string();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 2 + 5);
    assert_eq!(lines[0], "Zorn on white");
    assert!(lines[1].contains("CA:CB 1:1"));
    assert!(lines[2].starts_with("100%  #cc9933"));
    assert!(lines[2].trim_end().ends_with("#e30022"));
    assert_eq!(lines[2].matches('#').count(), 5);
  }

  #[test]
  fn swatches_wrap_cells_in_escape_codes() {
    let text = Swatches(&grid(RowScale::Ratio)).to_string();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 2 + 6);
    assert!(lines[2].contains("\x1B[48;2;204;153;51m"));
    assert_eq!(lines[2].matches("\x1B[0m").count(), 5);
  }

  #[test]
  fn contrast_picks_readable_text() {
    assert_eq!(contrast(WHITE), BLACK);
    assert_eq!(contrast(BLACK), WHITE);
    assert_eq!(contrast(Rgb::new(0x00, 0x31, 0x53)), WHITE);
    assert_eq!(contrast(Rgb::new(0xF2, 0x8C, 0x28)), BLACK);
  }
}
