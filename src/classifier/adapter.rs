use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::classifier::labels::LabelSet;
use crate::error::{Error, Result};
use crate::preprocess::ImageTensor;

/// A black-box image model: fixed NHWC input shape in, one probability
/// vector per batch element out.
///
/// `predict` takes `&mut self` so runtimes that keep scratch buffers or are
/// not safe for concurrent calls can be plugged in unchanged; the adapter
/// serializes access.
pub trait Classifier: Send {
    /// Exact input shape, `[batch, height, width, channels]`.
    fn input_shape(&self) -> [usize; 4];

    /// Ordered labels, index-aligned with each output vector.
    fn labels(&self) -> &[String];

    fn predict(&mut self, input: &ImageTensor) -> Result<Vec<Vec<f32>>>;
}

struct LoadedModel {
    classifier: Box<dyn Classifier>,
    labels: Arc<LabelSet>,
}

/// Probabilities for one image plus the label set they are aligned with.
#[derive(Debug, Clone)]
pub struct Inference {
    pub probabilities: Vec<f32>,
    pub labels: Arc<LabelSet>,
}

/// Owns the single model instance and hands out one inference at a time.
///
/// An empty adapter answers every call with `ModelUnavailable` until a model
/// is installed.
#[derive(Default)]
pub struct ClassifierAdapter {
    slot: Mutex<Option<LoadedModel>>,
}

impl ClassifierAdapter {
    pub fn empty() -> ClassifierAdapter {
        ClassifierAdapter { slot: Mutex::new(None) }
    }

    pub fn with_model(classifier: Box<dyn Classifier>) -> ClassifierAdapter {
        let adapter = ClassifierAdapter::empty();
        adapter.install(classifier);
        adapter
    }

    fn lock(&self) -> MutexGuard<'_, Option<LoadedModel>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the current model (if any). The label set is captured here
    /// and never changes for the lifetime of this model.
    pub fn install(&self, classifier: Box<dyn Classifier>) {
        let labels = Arc::new(LabelSet::new(classifier.labels().iter().cloned()));
        info!(classes = labels.len(), shape = ?classifier.input_shape(), "classifier installed");
        *self.lock() = Some(LoadedModel { classifier, labels });
    }

    pub fn unload(&self) {
        if self.lock().take().is_some() {
            warn!("classifier unloaded");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    pub fn labels(&self) -> Option<Arc<LabelSet>> {
        self.lock().as_ref().map(|m| m.labels.clone())
    }

    pub fn input_shape(&self) -> Option<[usize; 4]> {
        self.lock().as_ref().map(|m| m.classifier.input_shape())
    }

    /// Runs the model on `tensor` and returns the distribution for batch
    /// element 0.
    ///
    /// Fails with `ShapeMismatch` if the tensor or the model output has the
    /// wrong shape, `NormalizationError` if values leave [-1, 1], and
    /// `ModelUnavailable` when nothing is installed.
    pub fn infer(&self, tensor: &ImageTensor) -> Result<Inference> {
        let mut guard = self.lock();
        let model = guard.as_mut().ok_or(Error::ModelUnavailable)?;

        let expected = model.classifier.input_shape();
        if tensor.shape() != expected {
            return Err(Error::ShapeMismatch {
                expected: expected.to_vec(),
                actual: tensor.shape().to_vec(),
            });
        }
        tensor.check_range()?;

        let mut batch = model.classifier.predict(tensor)?;
        if batch.is_empty() {
            return Err(Error::Inference("model returned an empty batch".into()));
        }
        let probabilities = batch.swap_remove(0);
        if probabilities.len() != model.labels.len() {
            return Err(Error::ShapeMismatch {
                expected: vec![model.labels.len()],
                actual: vec![probabilities.len()],
            });
        }
        debug!(classes = probabilities.len(), "inference complete");
        Ok(Inference { probabilities, labels: model.labels.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a canned distribution.
    struct Fixed {
        labels: Vec<String>,
        output: Vec<f32>,
        shape: [usize; 4],
    }

    impl Classifier for Fixed {
        fn input_shape(&self) -> [usize; 4] {
            self.shape
        }
        fn labels(&self) -> &[String] {
            &self.labels
        }
        fn predict(&mut self, _input: &ImageTensor) -> Result<Vec<Vec<f32>>> {
            Ok(vec![self.output.clone()])
        }
    }

    fn fixed(output: Vec<f32>) -> Box<Fixed> {
        Box::new(Fixed {
            labels: vec!["A".into(), "B".into(), "C".into()],
            output,
            shape: [1, 2, 2, 3],
        })
    }

    fn zeros(shape: [usize; 4]) -> ImageTensor {
        ImageTensor::new(shape, vec![0.0; shape.iter().product()]).unwrap()
    }

    #[test]
    fn empty_adapter_is_unavailable() {
        let adapter = ClassifierAdapter::empty();
        assert!(!adapter.is_loaded());
        assert!(matches!(adapter.infer(&zeros([1, 2, 2, 3])), Err(Error::ModelUnavailable)));
    }

    #[test]
    fn unwraps_first_batch_element() {
        let adapter = ClassifierAdapter::with_model(fixed(vec![0.1, 0.7, 0.2]));
        let inference = adapter.infer(&zeros([1, 2, 2, 3])).unwrap();
        assert_eq!(inference.probabilities, vec![0.1, 0.7, 0.2]);
        assert_eq!(inference.labels.get(1), Some("B"));
    }

    #[test]
    fn shape_mismatch_fails_fast() {
        let adapter = ClassifierAdapter::with_model(fixed(vec![0.1, 0.7, 0.2]));
        let err = adapter.infer(&zeros([1, 4, 4, 3])).unwrap_err();
        match err {
            Error::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, vec![1, 2, 2, 3]);
                assert_eq!(actual, vec![1, 4, 4, 3]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn out_of_range_tensor_is_rejected() {
        let adapter = ClassifierAdapter::with_model(fixed(vec![0.1, 0.7, 0.2]));
        let tensor = ImageTensor::new([1, 2, 2, 3], vec![2.0; 12]).unwrap();
        assert!(matches!(adapter.infer(&tensor), Err(Error::NormalizationError(_))));
    }

    #[test]
    fn output_length_must_match_labels() {
        let adapter = ClassifierAdapter::with_model(fixed(vec![0.5, 0.5]));
        assert!(matches!(
            adapter.infer(&zeros([1, 2, 2, 3])),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn unload_then_reinstall_recovers() {
        let adapter = ClassifierAdapter::with_model(fixed(vec![0.2, 0.2, 0.6]));
        adapter.unload();
        assert!(matches!(adapter.infer(&zeros([1, 2, 2, 3])), Err(Error::ModelUnavailable)));
        adapter.install(fixed(vec![0.6, 0.2, 0.2]));
        assert_eq!(adapter.infer(&zeros([1, 2, 2, 3])).unwrap().probabilities[0], 0.6);
    }

    #[test]
    fn concurrent_callers_are_serialized() {
        let adapter = Arc::new(ClassifierAdapter::with_model(fixed(vec![0.3, 0.3, 0.4])));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let adapter = adapter.clone();
                std::thread::spawn(move || adapter.infer(&zeros([1, 2, 2, 3])).map(|i| i.probabilities))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().unwrap(), vec![0.3, 0.3, 0.4]);
        }
    }
}
