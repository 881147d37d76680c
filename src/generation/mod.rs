//! Request workflow behind the prompt modal: draft editing, a single in-flight
//! generation call, and the result the modal renders.

pub mod clipboard;
pub mod controller;
pub mod error;
pub mod model;
pub mod transport;

pub use clipboard::BrowserClipboard;
pub use controller::{Completion, GenerationController, PendingGeneration};
pub use error::ControllerError;
pub use model::{ImageAttachment, RequestState};
pub use transport::{request_generation, HttpTransport};
