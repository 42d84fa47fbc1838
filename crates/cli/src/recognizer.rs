use carioca_core::{CardRecognizer, RecognitionError, RecognitionResponse, ScanImage};
use std::fs;

/// Stands in for the recognition service: the image reference is a path to
/// a file holding the service's JSON answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReplayRecognizer;

impl CardRecognizer for JsonReplayRecognizer {
    fn recognize(&mut self, image: &ScanImage) -> Result<RecognitionResponse, RecognitionError> {
        let raw = fs::read_to_string(image.as_str()).map_err(|err| {
            RecognitionError::Transport(format!("read {}: {err}", image.as_str()))
        })?;
        RecognitionResponse::from_service_json(&raw)
    }
}
