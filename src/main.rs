use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use csvplot::{Mode, Table};

/// Plot the columns of a headerless CSV file. Lines starting with `#` are
/// skipped.
#[derive(Debug, Parser)]
#[command(name = "plot", version, about)]
struct Args {
  /// CSV file to plot.
  path: PathBuf,

  /// How columns map onto the plot: `time` plots columns 2.. against
  /// column 1, `columns` plots every column against its row number.
  #[arg(short, long, value_enum, default_value_t = Mode::Time)]
  mode: Mode,
}

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let args = match Args::try_parse() {
    Ok(args) => args,
    Err(err) if !err.use_stderr() => err.exit(),
    Err(err) => {
      println!("{err}");
      std::process::exit(1);
    }
  };

  let table = Table::from_csv(&args.path)
    .with_context(|| format!("failed to load {}", args.path.display()))?;
  log::info!(
    "read {} rows x {} columns from {}",
    table.height(),
    table.width(),
    args.path.display()
  );

  let mut plot = args.mode.plot(&table)?;
  if let Some(name) = args.path.file_name() {
    plot.title(&name.to_string_lossy());
  }

  plot.show()?;
  Ok(())
}
