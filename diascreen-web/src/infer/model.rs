//! ONNX classifier session
//!
//! Wraps one `ort::Session` built at startup from the exported model
//! artifact and kept for the process lifetime. The session is read-only;
//! concurrent requests share it without locking.

use std::path::Path;

use ndarray::{Array, Dim};
use ort::{inputs, GraphOptimizationLevel, Session};

use diascreen_common::{Error, Result};

/// Output tensor key in the artifact's serving signature
const OUTPUT_KEY: &str = "dense_1";

/// Binary prediction classes, in the model's output index order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictedClass {
    Negative,
    Positive,
}

impl PredictedClass {
    /// Map an output index to its class. Index 1 is positive/diabetic.
    pub fn from_index(index: usize) -> Self {
        if index == 1 {
            PredictedClass::Positive
        } else {
            PredictedClass::Negative
        }
    }
}

/// One classification outcome
#[derive(Debug, Clone)]
pub struct Prediction {
    pub class: PredictedClass,
    pub probabilities: Vec<f32>,
}

enum Backend {
    /// The real ONNX runtime session
    Onnx(Session),
    /// Canned probability vector, for exercising the request flow in tests
    /// without a model artifact
    Fixed(Vec<f32>),
}

/// The loaded binary classifier
pub struct Classifier {
    backend: Backend,
}

impl Classifier {
    /// Build the session from the ONNX artifact.
    ///
    /// Called once at startup; a missing or incompatible artifact is fatal
    /// and the caller must not begin serving. The output name is validated
    /// here so classification can rely on it.
    pub fn load(model_path: &Path) -> Result<Self> {
        if !model_path.exists() {
            return Err(Error::Config(format!(
                "Model artifact not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| Error::Inference(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::Inference(e.to_string()))?
            .with_intra_threads(4)
            .map_err(|e| Error::Inference(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| Error::Inference(e.to_string()))?;

        if !session.outputs.iter().any(|o| o.name == OUTPUT_KEY) {
            return Err(Error::Config(format!(
                "Incompatible model artifact: no '{}' output in {}",
                OUTPUT_KEY,
                model_path.display()
            )));
        }

        Ok(Classifier {
            backend: Backend::Onnx(session),
        })
    }

    /// Classifier that always returns the given probability vector.
    ///
    /// Lets integration tests drive the full request flow without a model
    /// artifact on disk.
    pub fn fixed(probabilities: Vec<f32>) -> Self {
        Classifier {
            backend: Backend::Fixed(probabilities),
        }
    }

    /// Classify one normalized image tensor.
    ///
    /// Runs the serving signature on a batch of size 1, reads the output
    /// probability vector, and takes its argmax (ties break toward the
    /// lowest index). No confidence threshold; deterministic for identical
    /// input.
    pub fn classify(&self, input: Array<f32, Dim<[usize; 4]>>) -> Result<Prediction> {
        let probabilities = match &self.backend {
            Backend::Onnx(session) => run_session(session, input)?,
            Backend::Fixed(probabilities) => probabilities.clone(),
        };

        if probabilities.is_empty() {
            return Err(Error::Inference(
                "model returned an empty output tensor".to_string(),
            ));
        }

        let class = PredictedClass::from_index(argmax(&probabilities));

        Ok(Prediction {
            class,
            probabilities,
        })
    }
}

fn run_session(session: &Session, input: Array<f32, Dim<[usize; 4]>>) -> Result<Vec<f32>> {
    let outputs = session
        .run(inputs![input].map_err(|e| Error::Inference(e.to_string()))?)
        .map_err(|e| Error::Inference(e.to_string()))?;

    // Output presence was validated at load time
    let output = outputs[OUTPUT_KEY]
        .try_extract_tensor::<f32>()
        .map_err(|e| Error::Inference(e.to_string()))?;

    // First axis is the batch; one image in, one probability vector out
    Ok(output.iter().copied().collect())
}

/// Index of the maximum value; ties break toward the lowest index
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use diascreen_common::config;

    #[test]
    fn test_argmax_basic() {
        assert_eq!(argmax(&[0.2, 0.8]), 1);
        assert_eq!(argmax(&[0.9, 0.1]), 0);
        assert_eq!(argmax(&[0.5]), 0);
    }

    #[test]
    fn test_argmax_tie_breaks_to_lowest_index() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.1, 0.45, 0.45]), 1);
    }

    #[test]
    fn test_class_from_index() {
        assert_eq!(PredictedClass::from_index(0), PredictedClass::Negative);
        assert_eq!(PredictedClass::from_index(1), PredictedClass::Positive);
    }

    #[test]
    fn test_fixed_classifier_is_deterministic() {
        let classifier = Classifier::fixed(vec![0.3, 0.7]);
        let input = || Array::zeros((1, 224, 224, 3));

        let first = classifier.classify(input()).unwrap();
        let second = classifier.classify(input()).unwrap();

        assert_eq!(first.class, second.class);
        assert_eq!(first.class, PredictedClass::Positive);
        assert_eq!(first.probabilities, vec![0.3, 0.7]);
    }

    #[test]
    fn test_empty_probability_vector_is_an_error() {
        let classifier = Classifier::fixed(vec![]);
        let result = classifier.classify(Array::zeros((1, 224, 224, 3)));
        assert!(matches!(result, Err(Error::Inference(_))));
    }

    #[test]
    fn test_missing_artifact_is_fatal() {
        let result = Classifier::load(Path::new("/nonexistent/model/classifier.onnx"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    /// Determinism over the real artifact.
    ///
    /// Requires the deployed model; skipped when it is absent (CI
    /// environment).
    #[test]
    fn test_onnx_classifier_deterministic() {
        let root = config::resolve_root_folder(None);
        let model_path = config::model_path(&root);
        if !model_path.exists() {
            eprintln!("Skipping test: model artifact not found at {:?}", model_path);
            return;
        }

        let classifier = Classifier::load(&model_path).expect("Should load deployed artifact");

        let input = || Array::zeros((1, 224, 224, 3));
        let first = classifier.classify(input()).unwrap();
        let second = classifier.classify(input()).unwrap();

        assert_eq!(first.class, second.class);
        assert_eq!(first.probabilities, second.probabilities);
    }
}
