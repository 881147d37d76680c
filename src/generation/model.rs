use serde_json::Value;

pub const MIN_TOXICITY: u8 = 0;
pub const MAX_TOXICITY: u8 = 10;

pub const FALLBACK_RESULT: &str = "Something went wrong.";
pub const FAILURE_MESSAGE: &str = "Oops! We couldn't generate your manipulative text this time.";

/// Persuasion intensity sent to the generation service. Always within
/// `MIN_TOXICITY..=MAX_TOXICITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ToxicityLevel(u8);

impl ToxicityLevel {
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(MIN_TOXICITY as i64, MAX_TOXICITY as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Levels above 7 get the devil marker in the modal.
    pub fn is_devilish(self) -> bool {
        self.0 > 7
    }
}

/// An uploaded image, carried as opaque bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestDraft {
    pub past_conversation: String,
    pub details: String,
    pub toxicity: ToxicityLevel,
    pub attached_images: Vec<ImageAttachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Succeeded(_) | RequestState::Failed(_))
    }

    /// Text shown in the result card, if any.
    pub fn result_text(&self) -> Option<&str> {
        match self {
            RequestState::Succeeded(text) | RequestState::Failed(text) => Some(text),
            _ => None,
        }
    }
}

/// Wire form of a draft. Field names match what the generation service reads
/// from the multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPayload {
    pub past_conversation: String,
    pub details: String,
    pub toxicity: String,
    pub images: Vec<(String, ImageAttachment)>,
}

impl GenerationPayload {
    pub fn from_draft(draft: &RequestDraft) -> Self {
        let images = draft
            .attached_images
            .iter()
            .enumerate()
            .map(|(idx, image)| (format!("image_{}", idx), image.clone()))
            .collect();

        Self {
            past_conversation: draft.past_conversation.clone(),
            details: draft.details.clone(),
            toxicity: draft.toxicity.value().to_string(),
            images,
        }
    }

    /// Text parts in the order they are appended to the form.
    pub fn text_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("pastConversation", self.past_conversation.as_str()),
            ("details", self.details.as_str()),
            ("toxicity", self.toxicity.as_str()),
        ]
    }
}

/// Reads the generated message out of a successful response body.
///
/// `Ok` with the fallback text when the body has no usable `manipulatedText`;
/// `Err` only for a `null` body, which carries no fields to look in.
pub fn extract_generated_text(body: &Value) -> Result<String, String> {
    if body.is_null() {
        return Err("response body was null".to_string());
    }

    match body.get("manipulatedText").and_then(Value::as_str) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Ok(FALLBACK_RESULT.to_string()),
    }
}
