//! Prediction message rendering

use crate::infer::PredictedClass;

/// Render the user-facing message for a prediction
///
/// Pure function over the predicted class and the identity's display name;
/// two literal templates keyed by class.
pub fn prediction_message(username: &str, class: PredictedClass) -> String {
    match class {
        PredictedClass::Positive => format!(
            "Hello, {}, you are diabetic, visit to nearest hospital.",
            username
        ),
        PredictedClass::Negative => {
            format!("Hello, {}, you are not diabetic.", username)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::model::argmax;

    #[test]
    fn test_positive_message() {
        let message = prediction_message("ada", PredictedClass::Positive);
        assert_eq!(
            message,
            "Hello, ada, you are diabetic, visit to nearest hospital."
        );
    }

    #[test]
    fn test_negative_message() {
        let message = prediction_message("ada", PredictedClass::Negative);
        assert_eq!(message, "Hello, ada, you are not diabetic.");
    }

    #[test]
    fn test_probability_vector_to_message() {
        // [0.2, 0.8] → class index 1 → positive
        let class = PredictedClass::from_index(argmax(&[0.2, 0.8]));
        let message = prediction_message("grace", class);
        assert!(message.ends_with("you are diabetic, visit to nearest hospital."));

        // [0.9, 0.1] → class index 0 → negative
        let class = PredictedClass::from_index(argmax(&[0.9, 0.1]));
        let message = prediction_message("grace", class);
        assert!(message.ends_with("you are not diabetic."));
    }
}
