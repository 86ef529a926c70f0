use std::path::PathBuf;

use polars::prelude::{DataType, PolarsError};
use vello::wgpu;

use crate::Mode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("could not read {}: {source}", .path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Polars(#[from] PolarsError),

  #[error("column {column} is not numeric (parsed as {dtype})")]
  NonNumeric { column: usize, dtype: DataType },

  #[error("{mode} mode needs at least {required} columns, found {found}")]
  TooFewColumns { mode: Mode, required: usize, found: usize },

  #[error("the table has no rows")]
  Empty,

  #[error("could not start the event loop: {0}")]
  EventLoop(#[from] winit::error::EventLoopError),

  #[error("could not open a window: {0}")]
  Window(#[from] winit::error::OsError),

  #[error("could not create a surface: {0}")]
  Surface(#[from] wgpu::CreateSurfaceError),

  #[error("no compatible graphics adapter: {0}")]
  Adapter(#[from] wgpu::RequestAdapterError),

  #[error("could not create a graphics device: {0}")]
  Device(#[from] wgpu::RequestDeviceError),

  #[error("renderer failed: {0}")]
  Render(#[from] vello::Error),
}
