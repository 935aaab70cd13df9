#![cfg(feature = "onnx")]

use image::{Rgb, RgbImage};
use visionize_image_classification::onnx::OrtEngine;
use visionize_image_classification::{
    ClassificationService, ClassifierConfig, LabelTable, ScoringMode, MAX_RESULTS,
};

const MODEL_PATH: &str = "models/mobilenet_v1_1.0_224_quant.onnx";
const LABELS_PATH: &str = "models/labels.txt";

#[test]
#[ignore] // Requires a quantized MobileNet exported to ONNX plus its label file
fn test_classify_with_onnx_runtime() {
    let model = std::fs::read(MODEL_PATH).unwrap();
    let labels = LabelTable::from_text(&std::fs::read_to_string(LABELS_PATH).unwrap());

    let engine = OrtEngine::from_memory(&model, ScoringMode::Quantized).unwrap();
    let mut service =
        ClassificationService::new(ClassifierConfig::quantized(224), labels, engine).unwrap();

    let image = RgbImage::from_pixel(224, 224, Rgb([128, 128, 128]));
    let results = service.classify(&image).unwrap();

    println!("Results: {results}");
    assert!(results.len() <= MAX_RESULTS);
}
