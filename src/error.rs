use thiserror::Error;

/// Every failure a diagnosis request or a model/knowledge load can produce.
///
/// Pipeline stages fail fast with one of these; nothing is retried and no
/// partial result is returned.
#[derive(Error, Debug)]
pub enum Error {
    /// The uploaded bytes could not be decoded as an image.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The normalized tensor contains a non-finite or out-of-range value.
    #[error("normalization produced invalid values: {0}")]
    NormalizationError(String),

    /// Tensor or model output does not have the shape the model declares.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    /// No model is loaded; recover with an explicit reload.
    #[error("model is not loaded")]
    ModelUnavailable,

    #[error("farm size must be a positive finite number, got {0}")]
    InvalidFarmSize(f64),

    /// The model runtime failed while running a forward pass.
    #[error("inference failed: {0}")]
    Inference(String),

    /// A model file parsed but describes an unusable network.
    #[error("invalid model file: {0}")]
    ModelFormat(String),

    #[error("invalid knowledge file: {0}")]
    Knowledge(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::InvalidImage(err.to_string())
    }
}

impl Error {
    /// Stable machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidImage(_) => "INVALID_IMAGE",
            Error::NormalizationError(_) => "NORMALIZATION_ERROR",
            Error::ShapeMismatch { .. } => "SHAPE_MISMATCH",
            Error::ModelUnavailable => "MODEL_UNAVAILABLE",
            Error::InvalidFarmSize(_) => "INVALID_FARM_SIZE",
            Error::Inference(_) => "INFERENCE_FAILED",
            Error::ModelFormat(_) => "MODEL_FORMAT",
            Error::Knowledge(_) => "KNOWLEDGE_FORMAT",
            Error::Config(_) => "CONFIG",
            Error::Io(_) => "IO",
        }
    }

    /// True for errors caused by what the caller sent.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidImage(_) | Error::NormalizationError(_) | Error::InvalidFarmSize(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
