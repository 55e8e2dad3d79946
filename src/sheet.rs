use kurbo::{Point, Rect, RoundedRect, Size, Stroke};
use parley::FontWeight;
use peniko::{Brush, Color};

use crate::{
  InputState, RenderModel,
  grid::Grid,
  hex::Rgb,
  mix::Blend,
  render::{Align, DrawText, Render},
};

const MARGIN: f64 = 40.0;
const CAPTION_HEIGHT: f64 = 40.0;
const TITLE_HEIGHT: f64 = 36.0;
const HEADER_HEIGHT: f64 = 26.0;
const LABEL_WIDTH: f64 = 52.0;
const SWATCH: f64 = 76.0;
const GAP: f64 = 10.0;
const HEX_HEIGHT: f64 = 18.0;
const SPACING: f64 = 56.0;
const GRIDS_PER_ROW: usize = 2;
const EMPTY_SIZE: Size = Size::new(640.0, 240.0);

const TEXT_COLOR: Brush = Brush::Solid(Color::from_rgb8(32, 32, 32));
const MUTED_COLOR: Brush = Brush::Solid(Color::from_rgb8(110, 110, 110));
const BORDER_COLOR: Brush = Brush::Solid(Color::from_rgb8(200, 200, 200));

/// A render model plus the caption line drawn above it.
pub struct Sheet<'a> {
  model:   &'a RenderModel,
  caption: String,
}

/// Where everything on a sheet goes, in sheet pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
  pub size:    Size,
  pub caption: Point,
  pub grids:   Vec<GridLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
  pub bounds:   Rect,
  pub title:    Point,
  pub headers:  Vec<Point>,
  pub labels:   Vec<Point>,
  pub swatches: Vec<Vec<Rect>>,
}

/// The status line for a sheet: inputs, preset, row scale and blend.
pub fn caption(state: &InputState, blend: Blend) -> String {
  let mut caption = format!(
    "A {}   B {}   Preset: {}   Rows: {:?}   Blend: {:?}",
    display_input(state.color_a()),
    display_input(state.color_b()),
    state.preset().name,
    state.scale(),
    blend,
  );
  if let Some(start) = state.tint_start() {
    caption.push_str(&format!("   Tint below {start:.2}"));
  }
  caption
}

fn display_input(input: &str) -> &str { if input.is_empty() { "-" } else { input } }

impl<'a> Sheet<'a> {
  pub fn new(model: &'a RenderModel, caption: impl Into<String>) -> Self {
    Sheet { model, caption: caption.into() }
  }

  pub fn layout(&self) -> SheetLayout {
    let caption = Point::new(MARGIN, MARGIN + CAPTION_HEIGHT / 2.0);
    let Some(first) = self.model.grids.first() else {
      return SheetLayout { size: EMPTY_SIZE, caption, grids: vec![] };
    };

    let grid_size = grid_size(first);
    let count = self.model.grids.len();
    let across = count.min(GRIDS_PER_ROW);
    let down = count.div_ceil(GRIDS_PER_ROW);

    let grids = self
      .model
      .grids
      .iter()
      .enumerate()
      .map(|(i, grid)| {
        let origin = Point::new(
          MARGIN + (i % GRIDS_PER_ROW) as f64 * (grid_size.width + SPACING),
          MARGIN + CAPTION_HEIGHT + (i / GRIDS_PER_ROW) as f64 * (grid_size.height + SPACING),
        );
        layout_grid(grid, origin)
      })
      .collect();

    let size = Size::new(
      2.0 * MARGIN + across as f64 * grid_size.width + (across - 1) as f64 * SPACING,
      2.0 * MARGIN
        + CAPTION_HEIGHT
        + down as f64 * grid_size.height
        + (down - 1) as f64 * SPACING,
    );

    SheetLayout { size, caption, grids }
  }

  pub(crate) fn draw(&self, render: &mut Render, layout: &SheetLayout) {
    render.draw_text(DrawText {
      text: &self.caption,
      size: 16.0,
      brush: MUTED_COLOR,
      position: layout.caption,
      vertical_align: Align::Center,
      ..Default::default()
    });

    if self.model.is_empty() {
      render.draw_text(DrawText {
        text: "Enter two colors as #RRGGBB to see the mixes.",
        size: 20.0,
        brush: TEXT_COLOR,
        position: Point::new(layout.size.width / 2.0, layout.size.height / 2.0 + MARGIN / 2.0),
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });
      return;
    }

    for (grid, grid_layout) in self.model.grids.iter().zip(&layout.grids) {
      draw_grid(render, grid, grid_layout);
    }
  }
}

fn grid_size(grid: &Grid) -> Size {
  let columns = grid.columns.len() as f64;
  let rows = grid.rows.len() as f64;
  Size::new(
    LABEL_WIDTH + columns * SWATCH + (columns - 1.0).max(0.0) * GAP,
    TITLE_HEIGHT + HEADER_HEIGHT + rows * (SWATCH + HEX_HEIGHT) + (rows - 1.0).max(0.0) * GAP,
  )
}

fn layout_grid(grid: &Grid, origin: Point) -> GridLayout {
  let size = grid_size(grid);
  let swatch_top = origin.y + TITLE_HEIGHT + HEADER_HEIGHT;
  let column_x = |col: usize| origin.x + LABEL_WIDTH + col as f64 * (SWATCH + GAP);
  let row_y = |row: usize| swatch_top + row as f64 * (SWATCH + HEX_HEIGHT + GAP);

  GridLayout {
    bounds:   Rect::from_origin_size(origin, size),
    title:    Point::new(origin.x, origin.y + TITLE_HEIGHT / 2.0),
    headers:  (0..grid.columns.len())
      .map(|col| Point::new(column_x(col) + SWATCH / 2.0, swatch_top - HEADER_HEIGHT / 2.0))
      .collect(),
    labels:   (0..grid.rows.len())
      .map(|row| Point::new(column_x(0) - GAP, row_y(row) + SWATCH / 2.0))
      .collect(),
    swatches: grid
      .rows
      .iter()
      .enumerate()
      .map(|(row, grid_row)| {
        (0..grid_row.cells.len())
          .map(|col| {
            Rect::from_origin_size(Point::new(column_x(col), row_y(row)), (SWATCH, SWATCH))
          })
          .collect()
      })
      .collect(),
  }
}

fn draw_grid(render: &mut Render, grid: &Grid, layout: &GridLayout) {
  render.draw_text(DrawText {
    text: &grid.title,
    size: 20.0,
    weight: FontWeight::BOLD,
    brush: TEXT_COLOR,
    position: layout.title,
    vertical_align: Align::Center,
    ..Default::default()
  });

  for (label, position) in grid.columns.iter().zip(&layout.headers) {
    render.draw_text(DrawText {
      text: label,
      size: 12.0,
      brush: MUTED_COLOR,
      position: *position,
      horizontal_align: Align::Center,
      vertical_align: Align::Center,
      ..Default::default()
    });
  }

  for ((row, position), rects) in grid.rows.iter().zip(&layout.labels).zip(&layout.swatches) {
    render.draw_text(DrawText {
      text: row.label,
      size: 14.0,
      weight: FontWeight::SEMI_BOLD,
      brush: TEXT_COLOR,
      position: *position,
      horizontal_align: Align::End,
      vertical_align: Align::Center,
      ..Default::default()
    });

    for (cell, rect) in row.cells.iter().zip(rects) {
      let swatch = RoundedRect::from_rect(*rect, 4.0);
      render.fill(&swatch, &brush(cell.color));
      render.stroke(&swatch, &BORDER_COLOR, &Stroke::new(1.0));

      let hex = cell.color.hex();
      render.draw_text(DrawText {
        text: &hex,
        size: 11.0,
        brush: MUTED_COLOR,
        position: Point::new(rect.center().x, rect.y1 + HEX_HEIGHT / 2.0),
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }
  }
}

fn brush(rgb: Rgb) -> Brush {
  let Rgb([r, g, b]) = rgb;
  Brush::Solid(Color::from_rgb8(r, g, b))
}
