use std::{
  io::{self, Write},
  path::PathBuf,
  process::ExitCode,
};

use clap::{Parser, ValueEnum};
use mixgrid::{
  Blend, Error, InputState, RowScale, Sheet, Swatches, preset::PRESETS, sheet::caption,
};
use tracing_subscriber::EnvFilter;

/// Mixing grids for two colors: each against the other, against white and against black.
#[derive(Parser, Debug)]
#[command(name = "mixgrid", version, about)]
struct Args {
  /// First color, as #RRGGBB.
  color_a: Option<String>,

  /// Second color, as #RRGGBB.
  color_b: Option<String>,

  /// Start from a named preset. Colors given on the command line replace its colors.
  #[arg(short, long)]
  preset: Option<String>,

  /// Row table to use.
  #[arg(short, long, value_enum, default_value_t)]
  rows: RowScale,

  /// Interpolation model.
  #[arg(short, long, value_enum, default_value_t)]
  blend: Blend,

  /// Blend the opposite of each reference color into rows below this ratio.
  #[arg(long)]
  tint_start: Option<f32>,

  /// How to print the grids.
  #[arg(short, long, value_enum, default_value_t)]
  format: Format,

  /// Render the grids to an image file.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Open an interactive window.
  #[arg(long)]
  show: bool,

  /// Print the presets and exit.
  #[arg(long)]
  list_presets: bool,

  /// Log level override (trace, debug, info, warn, error).
  #[arg(long)]
  log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
  #[default]
  Text,
  Ansi,
  Json,
}

fn main() -> ExitCode {
  let args = Args::parse();

  let directive = args.log_level.as_deref().map_or("mixgrid=info".to_string(), |level| {
    if level.contains('=') { level.to_string() } else { format!("mixgrid={level}") }
  });
  let filter = match directive.parse() {
    Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
    Err(_) => EnvFilter::from_default_env(),
  };
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

  match run(args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!("{e}");
      ExitCode::FAILURE
    }
  }
}

fn run(args: Args) -> Result<(), Error> {
  let mut out = io::stdout().lock();

  if args.list_presets {
    for preset in PRESETS.iter().filter(|p| !p.is_custom()) {
      writeln!(out, "{preset}")?;
    }
    return Ok(());
  }

  let mut state = InputState::new(args.rows);
  if let Some(key) = &args.preset {
    state.select_preset(key)?;
  }
  if let Some(a) = args.color_a {
    state.set_color_a(a);
  }
  if let Some(b) = args.color_b {
    state.set_color_b(b);
  }
  state.set_tint_start(args.tint_start);

  if !state.both_valid() {
    let invalid = if state.is_valid_a() { state.color_b() } else { state.color_a() };
    if args.show {
      tracing::warn!(color = invalid, "no grids until both colors are valid");
      drop(out);
      return mixgrid::show(state, args.blend);
    }
    return Err(Error::InvalidColor(invalid.to_string()));
  }

  let model = state.render(&args.blend);

  match args.format {
    Format::Text => {
      for grid in &model.grids {
        writeln!(out, "{grid}")?;
      }
    }
    Format::Ansi => {
      for grid in &model.grids {
        writeln!(out, "{}", Swatches(grid))?;
      }
    }
    Format::Json => {
      serde_json::to_writer_pretty(&mut out, &model)?;
      writeln!(out)?;
    }
  }
  out.flush()?;
  drop(out);

  if let Some(path) = &args.output {
    Sheet::new(&model, caption(&state, args.blend)).save(path)?;
  }

  if args.show {
    mixgrid::show(state, args.blend)?;
  }

  Ok(())
}
