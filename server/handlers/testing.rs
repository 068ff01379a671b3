//! Shared fixtures for handler tests.

use std::io::Cursor;

use canescan::constants::INPUT_SHAPE;
use canescan::{
    Classifier, ClassifierAdapter, ImageTensor, KnowledgeBase, Pipeline, ServiceConfig,
};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};

use crate::state::{AppState, SharedState};

pub const LABELS: [&str; 4] = ["Healthy", "RedRot", "Brown Spot", "Rust"];

struct Canned(Vec<String>, Vec<f32>);

impl Classifier for Canned {
    fn input_shape(&self) -> [usize; 4] {
        INPUT_SHAPE
    }

    fn labels(&self) -> &[String] {
        &self.0
    }

    fn predict(&mut self, _input: &ImageTensor) -> canescan::Result<Vec<Vec<f32>>> {
        Ok(vec![self.1.clone()])
    }
}

pub fn state_with_model(output: Vec<f32>) -> SharedState {
    let labels = LABELS.iter().map(|s| s.to_string()).collect();
    let adapter = ClassifierAdapter::with_model(Box::new(Canned(labels, output)));
    AppState::new(Pipeline::new(adapter, KnowledgeBase::empty()), ServiceConfig::default())
}

pub fn state_without_model() -> SharedState {
    AppState::new(
        Pipeline::new(ClassifierAdapter::empty(), KnowledgeBase::empty()),
        ServiceConfig::default(),
    )
}

pub fn leaf_png() -> Vec<u8> {
    let img = RgbImage::from_fn(64, 48, |x, y| Rgb([(x * 3) as u8, 120, (y * 5) as u8]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img).write_to(&mut buf, ImageOutputFormat::Png).unwrap();
    buf.into_inner()
}
