//! Mixing grids: for two user colors, compute how they blend with each other and with white or
//! black across a table of ratios, then print, export or show the result.

use std::fmt::Display;

pub mod grid;
pub mod hex;
pub mod mix;
pub mod model;
pub mod preset;
pub mod ratio;
mod render;
pub mod sheet;
mod table;

pub use grid::{Grid, GridConfig};
pub use hex::Rgb;
pub use mix::{Blend, Mixer};
pub use model::{InputState, RenderModel};
pub use ratio::RowScale;
pub use render::show;
pub use sheet::Sheet;
pub use table::Swatches;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("unknown preset: {0}")]
  UnknownPreset(String),

  #[error("presets are only available with ratio rows")]
  PresetsUnavailable,

  #[error("invalid color {0:?}, expected #RRGGBB")]
  InvalidColor(String),

  #[error("gpu error: {0}")]
  Gpu(String),

  #[error(transparent)]
  Image(#[from] image::ImageError),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error(transparent)]
  EventLoop(#[from] winit::error::EventLoopError),

  #[error(transparent)]
  Window(#[from] winit::error::OsError),
}

impl Error {
  pub(crate) fn gpu(e: impl Display) -> Self { Error::Gpu(e.to_string()) }
}

pub(crate) trait ResultExt<T> {
  /// Logs the error and drops it.
  fn log_err(self) -> Option<T>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::error!("{e}");
        None
      }
    }
  }
}
