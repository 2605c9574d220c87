pub mod config;
pub mod hog;
pub mod norm;
pub mod render;

pub use config::*;
pub use hog::*;
pub use norm::*;
pub use render::*;

pub type Result<T> = std::result::Result<T, HogError>;

#[derive(Debug, thiserror::Error)]
pub enum HogError {
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Window too small: {0}")]
    WindowTooSmall(String),

    #[error("Window out of bounds: {0}")]
    WindowOutOfBounds(String),

    #[error("No image has been processed")]
    NotProcessed,
}
