pub mod normalize;
pub mod tensor;

pub use normalize::{normalize, normalize_to};
pub use tensor::ImageTensor;
