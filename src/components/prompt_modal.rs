use yew::prelude::*;
use log::{error, info, warn};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::Uint8Array;
use web_sys::{File, HtmlInputElement, HtmlTextAreaElement};
use crate::config;
use crate::generation::{
    request_generation, BrowserClipboard, Completion, ControllerError, GenerationController,
    HttpTransport, ImageAttachment, PendingGeneration, RequestState,
};

const COPY_NOTICE_MS: u32 = 2_000;

#[derive(Properties, PartialEq)]
pub struct PromptModalProps {
    pub open: bool,
    pub on_close: Callback<()>,
}

pub enum PromptMsg {
    Close,
    SetConversation(String),
    SetDetails(String),
    SetToxicity(i64),
    FilesSelected(Vec<File>),
    ImagesLoaded(u64, Vec<ImageAttachment>),
    Generate,
    Regenerate,
    Generated(Completion),
    Copy,
    ClearCopyNotice,
}

pub struct PromptModal {
    controller: GenerationController,
    transport: HttpTransport,
    copy_notice: bool,
}

impl Component for PromptModal {
    type Message = PromptMsg;
    type Properties = PromptModalProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut controller = GenerationController::new();
        if ctx.props().open {
            controller.open_session();
        }

        Self {
            controller,
            transport: HttpTransport::new(config::get_generation_url()),
            copy_notice: false,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let open = ctx.props().open;
        if open && !old_props.open {
            self.controller.open_session();
        } else if !open && old_props.open {
            self.controller.close_session();
            self.copy_notice = false;
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            PromptMsg::Close => {
                self.controller.close_session();
                self.copy_notice = false;
                ctx.props().on_close.emit(());
                true
            }
            PromptMsg::SetConversation(text) => {
                self.controller.update_conversation(text).is_ok()
            }
            PromptMsg::SetDetails(text) => {
                self.controller.update_details(text).is_ok()
            }
            PromptMsg::SetToxicity(level) => {
                self.controller.update_toxicity(level).is_ok()
            }
            PromptMsg::FilesSelected(files) => {
                let upload = match self.controller.begin_upload() {
                    Ok(upload) => upload,
                    Err(e) => {
                        warn!("Ignoring file selection: {}", e);
                        return false;
                    }
                };
                ctx.link().send_future(async move {
                    PromptMsg::ImagesLoaded(upload, read_images(files).await)
                });
                false
            }
            PromptMsg::ImagesLoaded(upload, images) => {
                match self.controller.set_attached_images(upload, images) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("Dropping uploaded images: {}", e);
                        false
                    }
                }
            }
            PromptMsg::Generate => {
                let submitted = self.controller.submit();
                self.dispatch(ctx, submitted)
            }
            PromptMsg::Regenerate => {
                let submitted = self.controller.regenerate();
                self.dispatch(ctx, submitted)
            }
            PromptMsg::Generated(completion) => {
                self.controller.complete(completion)
            }
            PromptMsg::Copy => {
                match self.controller.copy_result(&BrowserClipboard) {
                    Ok(()) => {
                        self.copy_notice = true;
                        ctx.link().send_future(async {
                            TimeoutFuture::new(COPY_NOTICE_MS).await;
                            PromptMsg::ClearCopyNotice
                        });
                        true
                    }
                    Err(e) => {
                        warn!("Copy ignored: {}", e);
                        false
                    }
                }
            }
            PromptMsg::ClearCopyNotice => {
                self.copy_notice = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if !self.controller.is_open() {
            return html! {};
        }

        let link = ctx.link();
        let draft = self.controller.draft();
        let toxicity = draft.toxicity;

        html! {
            <div class="prompt-overlay">
                <style>
                    {r#"
                        .prompt-overlay {
                            position: fixed;
                            inset: 0;
                            background: rgba(0, 0, 0, 0.8);
                            z-index: 50;
                            display: flex;
                            align-items: center;
                            justify-content: center;
                            padding: 1rem;
                        }
                        .prompt-card {
                            position: relative;
                            width: 100%;
                            max-width: 42rem;
                            background: #1c1c1c;
                            border-radius: 1rem;
                            padding: 1.5rem;
                            box-shadow: 0 25px 50px rgba(0, 0, 0, 0.5);
                            max-height: 90vh;
                            overflow-y: auto;
                        }
                        .prompt-close {
                            position: absolute;
                            top: 1rem;
                            right: 1rem;
                            background: none;
                            border: none;
                            color: #9ca3af;
                            font-size: 1.5rem;
                            cursor: pointer;
                        }
                        .prompt-card h2 {
                            color: #60a5fa;
                            margin-bottom: 1rem;
                        }
                        .prompt-field {
                            margin-bottom: 1rem;
                        }
                        .prompt-field label {
                            display: block;
                            margin-bottom: 0.5rem;
                            color: #e5e7eb;
                            font-weight: 600;
                        }
                        .prompt-field textarea {
                            width: 100%;
                            padding: 0.5rem;
                            border-radius: 0.375rem;
                            background: #2c2c2c;
                            color: #f3f4f6;
                            border: none;
                        }
                        .upload-note {
                            font-size: 0.75rem;
                            color: #9ca3af;
                            margin-top: 0.25rem;
                        }
                        .toxicity-level {
                            text-align: right;
                            color: #d1d5db;
                        }
                        .toxicity-level span, .pink {
                            color: #ec4899;
                            font-weight: bold;
                        }
                        .progress-track {
                            width: 100%;
                            height: 1rem;
                            background: #374151;
                            border-radius: 9999px;
                            overflow: hidden;
                        }
                        .progress-fill {
                            height: 100%;
                            background: #db2777;
                            animation: conjure 3s ease-in-out forwards;
                        }
                        @keyframes conjure {
                            from { width: 0%; }
                            to { width: 100%; }
                        }
                        .result-card {
                            margin-top: 1.5rem;
                            background: #0a0a0a;
                            padding: 1rem;
                            border-radius: 0.75rem;
                            animation: pop 0.5s ease-out;
                        }
                        .result-card.stale {
                            opacity: 0.5;
                        }
                        @keyframes pop {
                            from { transform: scale(0); }
                            to { transform: scale(1); }
                        }
                        .result-header {
                            display: flex;
                            justify-content: space-between;
                            align-items: center;
                            margin-bottom: 0.5rem;
                        }
                        .result-actions button {
                            background: none;
                            border: none;
                            color: #d1d5db;
                            cursor: pointer;
                            font-size: 1.1rem;
                        }
                        .result-bubble {
                            padding: 0.5rem 1rem;
                            border-radius: 1rem;
                            background: linear-gradient(to right, #2563eb, #db2777);
                            color: white;
                            word-break: break-word;
                        }
                        .copy-notice {
                            color: #34d399;
                            font-size: 0.85rem;
                            margin-top: 0.5rem;
                        }
                    "#}
                </style>
                <div class="prompt-card">
                    <button class="prompt-close" onclick={link.callback(|_| PromptMsg::Close)}>{"✕"}</button>
                    <h2>{"Craft Your Next Message 😈"}</h2>
                    <p style="color: #d1d5db; margin-bottom: 1.5rem;">
                        {"Provide your past conversation (optional), any images, and details. Adjust the"}
                        <span class="pink">{" Toxicity"}</span>
                        {" slider to control how strong you want your persuasion."}
                    </p>

                    <div class="prompt-field">
                        <label>{"Upload Conversation Images"}</label>
                        <input
                            type="file"
                            multiple=true
                            accept="image/*"
                            onchange={link.batch_callback(|e: Event| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                input.files().map(|list| {
                                    let files = (0..list.length()).filter_map(|i| list.get(i)).collect();
                                    PromptMsg::FilesSelected(files)
                                })
                            })}
                        />
                        if !draft.attached_images.is_empty() {
                            <p class="upload-note">{format!("Uploaded {} image(s)", draft.attached_images.len())}</p>
                        }
                    </div>

                    <div class="prompt-field">
                        <label>{"Past Conversation"}</label>
                        <textarea
                            rows="4"
                            value={draft.past_conversation.clone()}
                            placeholder="Paste or type the previous conversation here..."
                            oninput={link.callback(|e: InputEvent| {
                                let input: HtmlTextAreaElement = e.target_unchecked_into();
                                PromptMsg::SetConversation(input.value())
                            })}
                        />
                    </div>

                    <div class="prompt-field">
                        <label>{"Message"}</label>
                        <textarea
                            rows="4"
                            value={draft.details.clone()}
                            placeholder="What do you want to achieve? Provide context, desired tone, or outcome..."
                            oninput={link.callback(|e: InputEvent| {
                                let input: HtmlTextAreaElement = e.target_unchecked_into();
                                PromptMsg::SetDetails(input.value())
                            })}
                        />
                    </div>

                    <div class="prompt-field" style="margin-bottom: 1.5rem;">
                        <label>{"Toxicity Level"}</label>
                        <input
                            type="range"
                            min="0"
                            max="10"
                            style="width: 100%;"
                            value={toxicity.value().to_string()}
                            oninput={link.batch_callback(|e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                input.value().parse::<i64>().ok().map(PromptMsg::SetToxicity)
                            })}
                        />
                        <div class="toxicity-level">
                            {"Level: "}<span>{toxicity.value().to_string()}</span>
                            { if toxicity.is_devilish() { " 😈" } else { "" } }
                        </div>
                    </div>

                    {
                        if self.controller.is_submitting() {
                            html! {
                                <div style="display: flex; flex-direction: column; align-items: center; gap: 1rem;">
                                    <div class="progress-track">
                                        <div class="progress-fill">{"😈"}</div>
                                    </div>
                                    <p class="pink" style="font-size: 0.875rem; font-weight: normal;">
                                        {"Conjuring your manipulative text..."}
                                    </p>
                                </div>
                            }
                        } else {
                            html! {
                                <button class="hero-button" style="width: 100%;" onclick={link.callback(|_| PromptMsg::Generate)}>
                                    {"Generate Manipulative Text"}
                                </button>
                            }
                        }
                    }

                    { self.render_result(ctx) }
                </div>
            </div>
        }
    }
}

impl PromptModal {
    fn dispatch(
        &self,
        ctx: &Context<Self>,
        submitted: Result<PendingGeneration, ControllerError>,
    ) -> bool {
        match submitted {
            Ok(pending) => {
                let transport = self.transport.clone();
                ctx.link().send_future(async move {
                    PromptMsg::Generated(request_generation(&transport, pending).await)
                });
                true
            }
            Err(e) => {
                warn!("Generate ignored: {}", e);
                false
            }
        }
    }

    fn render_result(&self, ctx: &Context<Self>) -> Html {
        let (state, stale) = match self.controller.state() {
            RequestState::Submitting => match self.controller.previous_result() {
                Some(previous) => (previous, true),
                None => return html! {},
            },
            state => (state, false),
        };

        let Some(text) = state.result_text() else {
            return html! {};
        };
        let link = ctx.link();

        html! {
            <div class={classes!("result-card", stale.then(|| "stale"))}>
                <div class="result-header">
                    <h3 style="color: white;">{"Your Manipulative Message 😈"}</h3>
                    if !stale {
                        <div class="result-actions">
                            if matches!(state, RequestState::Succeeded(_)) {
                                <button title="Copy" onclick={link.callback(|_| PromptMsg::Copy)}>{"⧉"}</button>
                            }
                            <button title="Regenerate" onclick={link.callback(|_| PromptMsg::Regenerate)}>{"↻"}</button>
                        </div>
                    }
                </div>
                <div class="result-bubble">
                    <p>{text}</p>
                </div>
                if self.copy_notice {
                    <p class="copy-notice">{"Copied to clipboard!"}</p>
                }
            </div>
        }
    }
}

async fn read_images(files: Vec<File>) -> Vec<ImageAttachment> {
    let mut images = Vec::with_capacity(files.len());
    for file in files {
        match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => images.push(ImageAttachment {
                file_name: file.name(),
                content_type: file.type_(),
                bytes: Uint8Array::new(&buffer).to_vec(),
            }),
            Err(e) => error!("Failed to read {}: {:?}", file.name(), e),
        }
    }
    info!("Read {} uploaded image(s)", images.len());
    images
}
