use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::model::{dense::DenseLayer, metadata::{InputType, ModelMetadata}};
use crate::preprocess::ImageTensor;

/// A feed-forward network of dense layers loaded from a JSON model file.
///
/// The first layer consumes the flattened `H * W * 3` image; the last layer
/// must end in `Softmax` with one neuron per output label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseNetwork {
    pub metadata: ModelMetadata,
    pub layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Builds and validates a network.
    pub fn new(metadata: ModelMetadata, layers: Vec<DenseLayer>) -> Result<DenseNetwork> {
        let network = DenseNetwork { metadata, layers };
        network.validate()?;
        Ok(network)
    }

    /// Checks layer chaining, the declared input shape and the label count.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = match self.metadata.input_type {
            InputType::ImageRgb { width, height } => (width as usize, height as usize),
            InputType::ImageGrayscale { .. } => {
                return Err(Error::ModelFormat(
                    "grayscale models are not supported; expected ImageRgb input".into(),
                ))
            }
        };
        let (first, last) = match (self.layers.first(), self.layers.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(Error::ModelFormat("model has no layers".into())),
        };

        for layer in &self.layers {
            layer.validate()?;
        }
        let flat_input = width * height * 3;
        if first.input_size() != flat_input {
            return Err(Error::ModelFormat(format!(
                "first layer takes {} inputs but a {}x{}x3 image has {}",
                first.input_size(),
                width,
                height,
                flat_input
            )));
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[0].size() != pair[1].input_size() {
                return Err(Error::ModelFormat(format!(
                    "layer {} outputs {} values but layer {} expects {}",
                    i,
                    pair[0].size(),
                    i + 1,
                    pair[1].input_size()
                )));
            }
        }
        if last.size() != self.metadata.output_labels.len() {
            return Err(Error::ModelFormat(format!(
                "output layer has {} neurons for {} labels",
                last.size(),
                self.metadata.output_labels.len()
            )));
        }
        if last.activation != crate::model::ActivationFunction::Softmax {
            return Err(Error::ModelFormat("output layer must use Softmax".into()));
        }
        Ok(())
    }

    /// Forward pass for one flattened input.
    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.forward(&current);
        }
        current
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|e| Error::Io(std::io::Error::other(e)))
    }

    /// Reads and validates a network written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<DenseNetwork> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let network: DenseNetwork = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::ModelFormat(format!("{}: {}", path.display(), e)))?;
        network.validate()?;
        info!(
            path = %path.display(),
            layers = network.layers.len(),
            classes = network.metadata.output_labels.len(),
            "loaded dense model"
        );
        Ok(network)
    }
}

impl Classifier for DenseNetwork {
    fn input_shape(&self) -> [usize; 4] {
        match self.metadata.input_type {
            InputType::ImageRgb { width, height } | InputType::ImageGrayscale { width, height } => {
                [1, height as usize, width as usize, 3]
            }
        }
    }

    fn labels(&self) -> &[String] {
        &self.metadata.output_labels
    }

    fn predict(&mut self, input: &ImageTensor) -> Result<Vec<Vec<f32>>> {
        (0..input.batch_size())
            .map(|i| {
                let item = input
                    .batch_item(i)
                    .ok_or_else(|| Error::Inference(format!("batch element {} missing", i)))?;
                let output = self.forward(item);
                if output.iter().any(|p| !p.is_finite()) {
                    return Err(Error::Inference("network produced non-finite output".into()));
                }
                Ok(output)
            })
            .collect()
    }
}
