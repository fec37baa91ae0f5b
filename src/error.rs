use std::path::PathBuf;
use thiserror::Error;

/// Failures outside the plotting core: loading input and driving the terminal
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to write {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image {0} has no pixels")]
    EmptyImage(PathBuf),

    #[error("no input: pass an image path or --sample <NAME>")]
    NoInput,
}

pub type Result<T> = std::result::Result<T, Error>;
