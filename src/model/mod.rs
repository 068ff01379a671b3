pub mod activation;
pub mod dense;
pub mod matrix;
pub mod metadata;
pub mod network;

pub use activation::ActivationFunction;
pub use dense::DenseLayer;
pub use matrix::Matrix;
pub use metadata::{InputType, ModelMetadata};
pub use network::DenseNetwork;
