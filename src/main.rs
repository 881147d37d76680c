use yew::prelude::*;
use log::{info, Level};

mod config;
mod generation;
mod pages {
    pub mod landing;
}
mod components {
    pub mod prompt_modal;
}

use pages::landing::Landing;


#[function_component]
fn App() -> Html {
    html! {
        <div style="min-height: 100vh; width: 100%;">
            <Landing />
        </div>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
