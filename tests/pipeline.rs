//! End-to-end runs through a real dense model file on disk.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};

use canescan::model::{ActivationFunction, DenseLayer, InputType, Matrix, ModelMetadata};
use canescan::{
    ConfidenceTier, DenseNetwork, Error, Experience, Locale, Pipeline, RequestContext, Severity,
    Urgency,
};

const SIDE: usize = 128;

/// Ignores the pixels: zero weights, so the output is softmax(bias).
fn write_model(path: &Path, labels: &[&str], bias: Vec<f32>) {
    let layer = DenseLayer::new(
        Matrix::zeros(SIDE * SIDE * 3, labels.len()),
        bias,
        ActivationFunction::Softmax,
    );
    let network = DenseNetwork::new(
        ModelMetadata {
            description: Some("fixed-output test model".into()),
            input_type: InputType::ImageRgb { width: SIDE as u32, height: SIDE as u32 },
            output_labels: labels.iter().map(|s| s.to_string()).collect(),
        },
        vec![layer],
    )
    .unwrap();
    network.save_json(path).unwrap();
}

fn leaf_jpeg() -> Vec<u8> {
    let img = RgbImage::from_fn(300, 200, |x, y| {
        if (x + y) % 17 < 3 {
            Rgb([150, 40, 30])
        } else {
            Rgb([40, 160, 50])
        }
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img).write_to(&mut buf, ImageOutputFormat::Jpeg(90)).unwrap();
    buf.into_inner()
}

#[test]
fn diagnose_with_model_and_knowledge_files() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("model.json");
    let knowledge = dir.path().join("knowledge.json");
    // softmax([0, 2, 0]) = [0.1065, 0.7870, 0.1065]
    write_model(&model, &["Healthy", "RedRot", "Rust"], vec![0.0, 2.0, 0.0]);
    std::fs::write(
        &knowledge,
        r#"{"en": {"RedRot": {"symptoms": "Red midrib", "solution": "Burn clumps"}}}"#,
    )
    .unwrap();

    let pipeline = Pipeline::load(&model, &knowledge).unwrap();
    let ctx = RequestContext { farm_size: 2.0, locale: Locale::English, experience: Experience::Experienced };
    let d = pipeline.diagnose(&leaf_jpeg(), &ctx).unwrap();

    assert_eq!(d.summary.label, "RedRot");
    assert_eq!(d.summary.confidence_tier, ConfidenceTier::Medium);
    assert_eq!(d.summary.severity, Severity::Critical);
    assert!(d.summary.expert_needed);
    assert!(!d.summary.urgent);
    assert_eq!(d.advisory.urgency, Urgency::WithinWeek);
    assert_eq!(d.advisory.recommendations.immediate_actions.len(), 3);
    assert_eq!(d.advisory.recommendations.expert_consultation, None);

    let alts: Vec<(&str, usize)> =
        d.alternatives.iter().map(|a| (a.label.as_str(), a.rank)).collect();
    assert_eq!(alts, vec![("Healthy", 2), ("Rust", 3)]);

    assert_eq!(d.knowledge.symptoms, "Red midrib");
    assert_eq!(d.knowledge.treatment, "Burn clumps");
    assert!(!d.knowledge.is_complete());
    assert_eq!(d.cost.total, 4800.0);
}

#[test]
fn missing_model_reports_unavailable_until_reload() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("model.json");
    let pipeline = Pipeline::load(&model, &dir.path().join("none.json")).unwrap();

    let err = pipeline.diagnose(&leaf_jpeg(), &RequestContext::default()).unwrap_err();
    assert!(matches!(err, Error::ModelUnavailable));

    write_model(&model, &["Healthy", "Mosaic"], vec![3.0, 0.0]);
    pipeline.reload_model(&model).unwrap();

    let d = pipeline.diagnose(&leaf_jpeg(), &RequestContext::default()).unwrap();
    assert_eq!(d.summary.label, "Healthy");
    assert_eq!(d.locale, Locale::Marathi);
    assert_eq!(d.summary.localized_name, "निरोगी");
    assert_eq!(d.cost.total, 0.0);
}

#[test]
fn request_errors_stop_before_inference() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("model.json");
    write_model(&model, &["Healthy", "Rust"], vec![0.0, 0.0]);
    let pipeline = Pipeline::load(&model, &dir.path().join("none.json")).unwrap();

    let bad_size = RequestContext { farm_size: -3.0, ..RequestContext::default() };
    assert!(matches!(
        pipeline.diagnose(&leaf_jpeg(), &bad_size),
        Err(Error::InvalidFarmSize(_))
    ));
    assert!(matches!(
        pipeline.diagnose(b"GIF89a truncated", &RequestContext::default()),
        Err(Error::InvalidImage(_))
    ));
}

#[test]
fn model_with_wrong_input_size_is_rejected_on_reload() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    write_model(&good, &["Healthy", "Rust"], vec![0.0, 1.0]);
    let pipeline = Pipeline::load(&good, &dir.path().join("none.json")).unwrap();

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"metadata": {"input_type": {"type": "ImageRgb"}}, "layers": []}"#).unwrap();
    assert!(pipeline.reload_model(&bad).is_err());

    // previous model keeps serving
    let d = pipeline.diagnose(&leaf_jpeg(), &RequestContext::default()).unwrap();
    assert_eq!(d.summary.label, "Rust");
}
