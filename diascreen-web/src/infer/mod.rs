//! Image classification: input preprocessing and ONNX inference

pub mod model;
pub mod preprocess;

pub use model::{Classifier, PredictedClass, Prediction};
