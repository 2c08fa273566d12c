/// Confidence reported with a diagnosis, in percent.
///
/// The value comes from a fixed rule on the request shape and says nothing
/// about the model's own certainty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confidence(f64);

impl Confidence {
    pub const WITH_SYMPTOMS: Confidence = Confidence(85.0);
    pub const IMAGE_ONLY: Confidence = Confidence(75.0);

    pub fn for_request(symptoms_supplied: bool) -> Self {
        if symptoms_supplied {
            Self::WITH_SYMPTOMS
        } else {
            Self::IMAGE_ONLY
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisResult {
    pub diagnosis: String,
    pub confidence: Confidence,
    pub solution: String,
    pub audio_available: bool,
}

impl DiagnosisResult {
    /// The model returns a single answer, so it doubles as the suggested solution.
    pub fn from_model_text(text: String, symptoms_supplied: bool) -> Self {
        Self {
            solution: text.clone(),
            diagnosis: text,
            confidence: Confidence::for_request(symptoms_supplied),
            audio_available: true,
        }
    }
}
