//! Contract with the external card-recognition service.
//!
//! The service itself is a collaborator: it receives an opaque image and
//! answers with either a list of cards or a tagged quality failure. This
//! module holds the request/response shapes and the bridge that feeds a
//! response into the game's scan sub-flow.

use crate::{Card, EventBus, Game, GameError, GameSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Opaque image payload (data URL, file path, ...). The engine never looks
/// inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanImage(pub String);

impl ScanImage {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanFailureKind {
    Blurry,
    BadLighting,
    NoCardsDetected,
    Unknown,
}

impl ScanFailureKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::Blurry => "BLURRY",
            Self::BadLighting => "BAD_LIGHTING",
            Self::NoCardsDetected => "NO_CARDS_DETECTED",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "BLURRY" => Self::Blurry,
            "BAD_LIGHTING" => Self::BadLighting,
            "NO_CARDS_DETECTED" => Self::NoCardsDetected,
            _ => Self::Unknown,
        }
    }
}

/// Why a scan attempt ended without a hand to confirm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ScanErrorKind {
    Recognition(ScanFailureKind),
    /// The call itself failed (network, malformed answer, ...).
    Transport,
}

impl ScanErrorKind {
    pub fn message_key(self) -> String {
        match self {
            Self::Recognition(kind) => format!("scanError_{}", kind.code()),
            Self::Transport => "cardRecognitionError".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionResponse {
    /// Possibly empty; an empty hand is a valid zero-point result.
    Cards(Vec<Card>),
    Failure(ScanFailureKind),
}

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("recognition transport error: {0}")]
    Transport(String),
    #[error("malformed recognition response: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for RecognitionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum ServiceStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServicePayload {
    status: ServiceStatus,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    cards: Vec<Card>,
}

impl RecognitionResponse {
    /// Decodes the service's JSON answer.
    pub fn from_service_json(raw: &str) -> Result<Self, RecognitionError> {
        let payload: ServicePayload = serde_json::from_str(raw)?;
        Ok(match payload.status {
            ServiceStatus::Success => Self::Cards(payload.cards),
            ServiceStatus::Error => Self::Failure(
                payload
                    .error_code
                    .as_deref()
                    .map(ScanFailureKind::from_code)
                    .unwrap_or(ScanFailureKind::Unknown),
            ),
        })
    }
}

pub trait CardRecognizer {
    fn recognize(&mut self, image: &ScanImage) -> Result<RecognitionResponse, RecognitionError>;
}

/// Hand recognized for the scan target, held until confirmed or retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingScan {
    pub image: ScanImage,
    pub cards: Vec<Card>,
    pub score: i64,
}

/// Feeds one recognizer outcome into the scan sub-flow.
///
/// Every outcome, including transport failures, leaves the game in a phase
/// the user can continue from: `ScanConfirmation` on success, `ScoreInput`
/// otherwise.
pub fn apply_recognition(
    game: &mut Game,
    settings: &GameSettings,
    image: ScanImage,
    outcome: Result<RecognitionResponse, RecognitionError>,
    events: &mut EventBus,
) -> Result<(), GameError> {
    match outcome {
        Ok(RecognitionResponse::Cards(cards)) => game.scan_succeeded(settings, image, cards, events),
        Ok(RecognitionResponse::Failure(kind)) => {
            game.scan_failed(ScanErrorKind::Recognition(kind), events)
        }
        Err(err) => {
            warn!(error = %err, "card recognition failed");
            game.scan_failed(ScanErrorKind::Transport, events)
        }
    }
}

/// Submits `image` for the current scan target and waits for the answer.
pub fn run_recognition<R: CardRecognizer + ?Sized>(
    game: &mut Game,
    settings: &GameSettings,
    recognizer: &mut R,
    image: ScanImage,
    events: &mut EventBus,
) -> Result<(), GameError> {
    game.submit_scan(events)?;
    let outcome = recognizer.recognize(&image);
    apply_recognition(game, settings, image, outcome, events)
}
