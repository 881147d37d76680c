use log::{debug, error, info, warn};
use serde_json::Value;

use super::clipboard::Clipboard;
use super::error::{ControllerError, GenerationError};
use super::model::{
    extract_generated_text, GenerationPayload, ImageAttachment, RequestDraft, RequestState,
    ToxicityLevel, FAILURE_MESSAGE,
};

/// A submission that has been accepted and still has to go over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingGeneration {
    pub sequence: u64,
    pub payload: GenerationPayload,
}

/// Transport result of a `PendingGeneration`, tagged with the same sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub sequence: u64,
    pub result: Result<Value, GenerationError>,
}

/// Owns the draft and request state of the prompt modal.
///
/// Every accepted submission takes the next sequence number. Closing or
/// reopening the session retires the in-flight number, so a completion that
/// arrives afterwards is dropped instead of overwriting the new session.
/// Image reads are tagged the same way through `begin_upload`.
#[derive(Debug, Default)]
pub struct GenerationController {
    open: bool,
    draft: RequestDraft,
    state: RequestState,
    previous: Option<RequestState>,
    last_sequence: u64,
    in_flight: Option<u64>,
    last_upload: u64,
    pending_upload: Option<u64>,
}

impl GenerationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == RequestState::Submitting
    }

    /// Terminal state that was showing when the current attempt started.
    /// Only set while submitting.
    pub fn previous_result(&self) -> Option<&RequestState> {
        self.previous.as_ref()
    }

    pub fn open_session(&mut self) {
        if self.open {
            return;
        }
        self.reset();
        self.open = true;
        info!("Generation session opened");
    }

    pub fn close_session(&mut self) {
        if let Some(sequence) = self.in_flight {
            debug!("Dropping interest in generation request #{}", sequence);
        }
        self.reset();
        self.open = false;
        info!("Generation session closed");
    }

    fn reset(&mut self) {
        self.draft = RequestDraft::default();
        self.state = RequestState::Idle;
        self.previous = None;
        self.in_flight = None;
        self.pending_upload = None;
    }

    fn ensure_open(&self) -> Result<(), ControllerError> {
        if self.open {
            Ok(())
        } else {
            Err(ControllerError::SessionClosed)
        }
    }

    pub fn update_conversation(&mut self, text: impl Into<String>) -> Result<(), ControllerError> {
        self.ensure_open()?;
        self.draft.past_conversation = text.into();
        Ok(())
    }

    pub fn update_details(&mut self, text: impl Into<String>) -> Result<(), ControllerError> {
        self.ensure_open()?;
        self.draft.details = text.into();
        Ok(())
    }

    pub fn update_toxicity(&mut self, level: i64) -> Result<(), ControllerError> {
        self.ensure_open()?;
        self.draft.toxicity = ToxicityLevel::clamped(level);
        Ok(())
    }

    /// Tags a file read that is about to start. Only the latest tag of the
    /// current session may attach its images.
    pub fn begin_upload(&mut self) -> Result<u64, ControllerError> {
        self.ensure_open()?;
        self.last_upload += 1;
        self.pending_upload = Some(self.last_upload);
        Ok(self.last_upload)
    }

    pub fn set_attached_images(
        &mut self,
        upload: u64,
        images: Vec<ImageAttachment>,
    ) -> Result<(), ControllerError> {
        self.ensure_open()?;
        if self.pending_upload != Some(upload) {
            debug!("Discarding images from stale upload #{}", upload);
            return Err(ControllerError::StaleUpload);
        }
        self.draft.attached_images = images;
        self.pending_upload = None;
        Ok(())
    }

    /// Moves to `Submitting` and hands back the request to send. The caller
    /// must run it through a transport and feed the result to `complete`.
    pub fn submit(&mut self) -> Result<PendingGeneration, ControllerError> {
        self.ensure_open()?;
        if self.is_submitting() {
            warn!("Ignoring submit while request #{} is in flight", self.last_sequence);
            return Err(ControllerError::AlreadySubmitting);
        }

        let previous = std::mem::replace(&mut self.state, RequestState::Submitting);
        self.previous = previous.is_terminal().then_some(previous);
        self.last_sequence += 1;
        self.in_flight = Some(self.last_sequence);

        info!(
            "Submitting generation request #{} (toxicity {}, {} image(s))",
            self.last_sequence,
            self.draft.toxicity.value(),
            self.draft.attached_images.len()
        );

        Ok(PendingGeneration {
            sequence: self.last_sequence,
            payload: GenerationPayload::from_draft(&self.draft),
        })
    }

    pub fn regenerate(&mut self) -> Result<PendingGeneration, ControllerError> {
        self.submit()
    }

    /// Applies a completion. Returns `false` when it belongs to a submission
    /// that is no longer current.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if self.in_flight != Some(completion.sequence) {
            debug!(
                "Discarding stale completion for request #{}",
                completion.sequence
            );
            return false;
        }

        let outcome = completion
            .result
            .and_then(|body| extract_generated_text(&body).map_err(GenerationError::MalformedResponse));

        self.state = match outcome {
            Ok(text) => {
                info!("Generation request #{} succeeded", completion.sequence);
                RequestState::Succeeded(text)
            }
            Err(e) => {
                error!(
                    "Generation request #{} failed ({}): {}",
                    completion.sequence,
                    e.kind(),
                    e
                );
                RequestState::Failed(FAILURE_MESSAGE.to_string())
            }
        };
        self.previous = None;
        self.in_flight = None;
        true
    }

    pub fn copy_result(&self, clipboard: &impl Clipboard) -> Result<(), ControllerError> {
        match &self.state {
            RequestState::Succeeded(text) => {
                clipboard.write_text(text);
                Ok(())
            }
            _ => Err(ControllerError::NothingToCopy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::model::FALLBACK_RESULT;
    use crate::generation::transport::{request_generation, GenerationTransport};
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    struct FakeTransport {
        response: Result<Value, GenerationError>,
        calls: Cell<usize>,
    }

    impl FakeTransport {
        fn replying(response: Result<Value, GenerationError>) -> Self {
            Self {
                response,
                calls: Cell::new(0),
            }
        }
    }

    impl GenerationTransport for FakeTransport {
        async fn send(&self, _payload: &GenerationPayload) -> Result<Value, GenerationError> {
            self.calls.set(self.calls.get() + 1);
            self.response.clone()
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        written: RefCell<Vec<String>>,
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&self, text: &str) {
            self.written.borrow_mut().push(text.to_string());
        }
    }

    fn open_controller() -> GenerationController {
        let mut controller = GenerationController::new();
        controller.open_session();
        controller
    }

    fn run(controller: &mut GenerationController, transport: &FakeTransport) -> bool {
        let pending = controller.submit().unwrap();
        let completion = block_on(request_generation(transport, pending));
        controller.complete(completion)
    }

    fn image() -> ImageAttachment {
        ImageAttachment {
            file_name: "chat.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn new_controller_is_closed_and_idle() {
        let controller = GenerationController::new();
        assert!(!controller.is_open());
        assert_eq!(controller.state(), &RequestState::Idle);
        assert_eq!(controller.draft(), &RequestDraft::default());
    }

    #[test]
    fn edits_outside_a_session_are_rejected() {
        let mut controller = GenerationController::new();
        assert_eq!(
            controller.update_details("hi"),
            Err(ControllerError::SessionClosed)
        );
        assert_eq!(
            controller.update_conversation("hi"),
            Err(ControllerError::SessionClosed)
        );
        assert_eq!(controller.update_toxicity(5), Err(ControllerError::SessionClosed));
        assert_eq!(controller.begin_upload(), Err(ControllerError::SessionClosed));
        assert_eq!(
            controller.set_attached_images(1, vec![image()]),
            Err(ControllerError::SessionClosed)
        );
        assert_eq!(controller.submit(), Err(ControllerError::SessionClosed));
        assert_eq!(controller.draft(), &RequestDraft::default());
    }

    #[test]
    fn reopening_an_open_session_keeps_the_draft() {
        let mut controller = open_controller();
        controller.update_details("keep me").unwrap();
        controller.open_session();
        assert_eq!(controller.draft().details, "keep me");
    }

    #[test]
    fn toxicity_updates_are_clamped() {
        let mut controller = open_controller();
        controller.update_toxicity(15).unwrap();
        assert_eq!(controller.draft().toxicity.value(), 10);
        controller.update_toxicity(-3).unwrap();
        assert_eq!(controller.draft().toxicity.value(), 0);
        controller.update_toxicity(6).unwrap();
        assert_eq!(controller.draft().toxicity.value(), 6);
    }

    #[test]
    fn successful_generation_shows_the_text() {
        let mut controller = open_controller();
        controller.update_conversation("").unwrap();
        controller.update_details("ask them to call me").unwrap();
        controller.update_toxicity(9).unwrap();
        let transport = FakeTransport::replying(Ok(json!({
            "manipulatedText": "Call me, I know you want to."
        })));

        assert!(run(&mut controller, &transport));

        assert_eq!(
            controller.state(),
            &RequestState::Succeeded("Call me, I know you want to.".to_string())
        );
    }

    #[test]
    fn service_error_shows_the_failure_message() {
        let mut controller = open_controller();
        let transport = FakeTransport::replying(Err(GenerationError::Service { status: 500 }));

        run(&mut controller, &transport);

        assert_eq!(
            controller.state(),
            &RequestState::Failed(FAILURE_MESSAGE.to_string())
        );
    }

    #[test]
    fn transport_and_malformed_errors_share_the_failure_message() {
        for err in [
            GenerationError::Transport("connection refused".to_string()),
            GenerationError::MalformedResponse("expected value".to_string()),
        ] {
            let mut controller = open_controller();
            run(&mut controller, &FakeTransport::replying(Err(err)));
            assert_eq!(
                controller.state(),
                &RequestState::Failed(FAILURE_MESSAGE.to_string())
            );
        }
    }

    #[test]
    fn null_body_is_a_failure() {
        let mut controller = open_controller();
        run(&mut controller, &FakeTransport::replying(Ok(Value::Null)));
        assert_eq!(
            controller.state(),
            &RequestState::Failed(FAILURE_MESSAGE.to_string())
        );
    }

    #[test]
    fn empty_body_uses_the_service_fallback() {
        let mut controller = open_controller();
        run(&mut controller, &FakeTransport::replying(Ok(json!({}))));
        assert_eq!(
            controller.state(),
            &RequestState::Succeeded(FALLBACK_RESULT.to_string())
        );
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut controller = open_controller();
        let transport = FakeTransport::replying(Ok(json!({"manipulatedText": "once"})));

        let first = controller.submit().unwrap();
        assert_eq!(controller.submit(), Err(ControllerError::AlreadySubmitting));
        assert_eq!(controller.regenerate(), Err(ControllerError::AlreadySubmitting));
        assert_eq!(controller.state(), &RequestState::Submitting);

        let completion = block_on(request_generation(&transport, first));
        assert!(controller.complete(completion));

        assert_eq!(transport.calls.get(), 1);
        assert_eq!(
            controller.state(),
            &RequestState::Succeeded("once".to_string())
        );
    }

    #[test]
    fn close_session_resets_from_every_state() {
        let transport_ok = FakeTransport::replying(Ok(json!({"manipulatedText": "x"})));
        let transport_err = FakeTransport::replying(Err(GenerationError::Service { status: 502 }));

        let mut idle = open_controller();
        let mut submitting = open_controller();
        submitting.submit().unwrap();
        let mut succeeded = open_controller();
        run(&mut succeeded, &transport_ok);
        let mut failed = open_controller();
        run(&mut failed, &transport_err);

        for controller in [&mut idle, &mut submitting, &mut succeeded, &mut failed] {
            controller.update_details("something").ok();
            controller.update_toxicity(8).ok();
            controller.close_session();
            assert!(!controller.is_open());
            assert_eq!(controller.draft(), &RequestDraft::default());
            assert_eq!(controller.state(), &RequestState::Idle);
            assert_eq!(controller.previous_result(), None);
        }
    }

    #[test]
    fn completion_after_close_is_discarded() {
        let mut controller = open_controller();
        controller.update_details("first session").unwrap();
        let pending = controller.submit().unwrap();

        controller.close_session();
        controller.open_session();

        let transport = FakeTransport::replying(Ok(json!({"manipulatedText": "late"})));
        let completion = block_on(request_generation(&transport, pending));

        assert!(!controller.complete(completion));
        assert_eq!(controller.state(), &RequestState::Idle);
        assert_eq!(controller.draft(), &RequestDraft::default());
    }

    #[test]
    fn completion_from_an_older_submission_is_discarded() {
        let mut controller = open_controller();
        let stale = controller.submit().unwrap();
        controller.close_session();
        controller.open_session();
        let current = controller.submit().unwrap();
        assert!(current.sequence > stale.sequence);

        let late = Completion {
            sequence: stale.sequence,
            result: Ok(json!({"manipulatedText": "stale"})),
        };
        assert!(!controller.complete(late));
        assert_eq!(controller.state(), &RequestState::Submitting);

        let fresh = Completion {
            sequence: current.sequence,
            result: Ok(json!({"manipulatedText": "fresh"})),
        };
        assert!(controller.complete(fresh));
        assert_eq!(
            controller.state(),
            &RequestState::Succeeded("fresh".to_string())
        );
    }

    #[test]
    fn regenerate_keeps_previous_result_until_resolved() {
        let mut controller = open_controller();
        run(
            &mut controller,
            &FakeTransport::replying(Ok(json!({"manipulatedText": "v1"}))),
        );

        let pending = controller.regenerate().unwrap();
        assert_eq!(controller.state(), &RequestState::Submitting);
        assert_eq!(
            controller.previous_result(),
            Some(&RequestState::Succeeded("v1".to_string()))
        );

        let transport = FakeTransport::replying(Ok(json!({"manipulatedText": "v2"})));
        controller.complete(block_on(request_generation(&transport, pending)));

        assert_eq!(controller.state(), &RequestState::Succeeded("v2".to_string()));
        assert_eq!(controller.previous_result(), None);
    }

    #[test]
    fn regenerate_sends_the_same_draft() {
        let mut controller = open_controller();
        controller.update_details("same").unwrap();
        let upload = controller.begin_upload().unwrap();
        controller.set_attached_images(upload, vec![image()]).unwrap();

        let first = controller.submit().unwrap();
        controller.complete(Completion {
            sequence: first.sequence,
            result: Err(GenerationError::Service { status: 500 }),
        });
        let second = controller.regenerate().unwrap();

        assert_eq!(first.payload, second.payload);
        assert_eq!(second.payload.images[0].0, "image_0");
    }

    #[test]
    fn copy_only_works_after_success() {
        let clipboard = FakeClipboard::default();
        let mut controller = open_controller();
        assert_eq!(
            controller.copy_result(&clipboard),
            Err(ControllerError::NothingToCopy)
        );

        run(
            &mut controller,
            &FakeTransport::replying(Err(GenerationError::Service { status: 500 })),
        );
        assert_eq!(
            controller.copy_result(&clipboard),
            Err(ControllerError::NothingToCopy)
        );

        run(
            &mut controller,
            &FakeTransport::replying(Ok(json!({"manipulatedText": "copy me"}))),
        );
        assert_eq!(controller.copy_result(&clipboard), Ok(()));
        assert_eq!(*clipboard.written.borrow(), vec!["copy me".to_string()]);
    }

    #[test]
    fn images_read_before_close_do_not_reach_the_next_session() {
        let mut controller = open_controller();
        let upload = controller.begin_upload().unwrap();

        controller.close_session();
        controller.open_session();

        assert_eq!(
            controller.set_attached_images(upload, vec![image()]),
            Err(ControllerError::StaleUpload)
        );
        assert!(controller.draft().attached_images.is_empty());
        assert_eq!(controller.draft(), &RequestDraft::default());
    }

    #[test]
    fn older_selection_finishing_last_is_discarded() {
        let mut controller = open_controller();
        let older = controller.begin_upload().unwrap();
        let newer = controller.begin_upload().unwrap();

        let newer_image = ImageAttachment {
            file_name: "newer.png".to_string(),
            ..image()
        };
        controller.set_attached_images(newer, vec![newer_image]).unwrap();

        assert_eq!(
            controller.set_attached_images(older, vec![image()]),
            Err(ControllerError::StaleUpload)
        );
        assert_eq!(controller.draft().attached_images.len(), 1);
        assert_eq!(controller.draft().attached_images[0].file_name, "newer.png");
    }
}
