use gloo_net::http::Request;
use log::debug;
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::js_sys::{Array, Uint8Array};
use web_sys::{Blob, BlobPropertyBag, FormData};

use super::controller::{Completion, PendingGeneration};
use super::error::GenerationError;
use super::model::{GenerationPayload, ImageAttachment};

/// Sends one generation request and returns the decoded JSON body of a
/// successful response.
#[allow(async_fn_in_trait)]
pub trait GenerationTransport {
    async fn send(&self, payload: &GenerationPayload) -> Result<Value, GenerationError>;
}

/// Runs a submission through the transport. Exactly one `send` per call.
pub async fn request_generation<T: GenerationTransport>(
    transport: &T,
    pending: PendingGeneration,
) -> Completion {
    let result = transport.send(&pending.payload).await;
    Completion {
        sequence: pending.sequence,
        result,
    }
}

/// Posts the payload as multipart form data to the generation endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpTransport {
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl GenerationTransport for HttpTransport {
    async fn send(&self, payload: &GenerationPayload) -> Result<Value, GenerationError> {
        let form = build_form(payload).map_err(|e| GenerationError::Transport(js_error(&e)))?;

        debug!(
            "Posting generation request to {} with {} image(s)",
            self.endpoint,
            payload.images.len()
        );

        let response = Request::post(&self.endpoint)
            .body(form)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        classify_response(status, &body)
    }
}

/// Maps a received status and body to the decoded JSON or the error kind the
/// controller logs. Any non-2xx status is a service error, whatever the body.
pub fn classify_response(status: u16, body: &str) -> Result<Value, GenerationError> {
    if !(200..300).contains(&status) {
        return Err(GenerationError::Service { status });
    }

    serde_json::from_str(body).map_err(|e| GenerationError::MalformedResponse(e.to_string()))
}

fn build_form(payload: &GenerationPayload) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for (name, value) in payload.text_fields() {
        form.append_with_str(name, value)?;
    }
    for (key, image) in &payload.images {
        let blob = image_blob(image)?;
        form.append_with_blob_and_filename(key, &blob, &image.file_name)?;
    }
    Ok(form)
}

fn image_blob(image: &ImageAttachment) -> Result<Blob, JsValue> {
    let bytes = Uint8Array::from(image.bytes.as_slice());
    let parts = Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&image.content_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
