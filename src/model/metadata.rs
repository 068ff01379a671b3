use serde::{Deserialize, Serialize};

/// Describes how the network's input was produced at training time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputType {
    /// Grayscale image resized to width x height. Not servable: the pipeline
    /// always produces three channels.
    ImageGrayscale { width: u32, height: u32 },
    /// RGB image resized to width x height, flattened as R,G,B per pixel.
    ImageRgb { width: u32, height: u32 },
}

/// Annotations stored next to the weights in a model file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default)]
    pub description: Option<String>,
    pub input_type: InputType,
    /// Ordered class labels, index-aligned with the output layer.
    pub output_labels: Vec<String>,
}
