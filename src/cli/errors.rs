use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("{errors} of {total} images failed")]
    BatchFailures { errors: usize, total: usize },

    #[error(transparent)]
    Sprite(#[from] sprite_matte::Error),
}
