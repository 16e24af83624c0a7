use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Catalog file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}
