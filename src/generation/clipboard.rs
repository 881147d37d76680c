use log::{error, info};
use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Platform clipboard. Writes are fire-and-forget.
pub trait Clipboard {
    fn write_text(&self, text: &str);
}

/// Writes through `navigator.clipboard`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClipboard;

impl Clipboard for BrowserClipboard {
    fn write_text(&self, text: &str) {
        let Some(window) = web_sys::window() else {
            error!("No window available for clipboard write");
            return;
        };

        let promise = window.navigator().clipboard().write_text(text);
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => info!("Copied generated text to clipboard"),
                Err(e) => error!("Clipboard write failed: {:?}", e),
            }
        });
    }
}
