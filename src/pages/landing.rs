use yew::prelude::*;
use chrono::{Datelike, Local};
use crate::components::prompt_modal::PromptModal;

struct Feature {
    icon: &'static str,
    title: &'static str,
    body: &'static str,
}

const FEATURES: &[Feature] = &[
    Feature {
        icon: "✍️",
        title: "Persuasive Rewrite",
        body: "Transform mundane texts into psychologically impactful messages. Our AI ensures you say just the right thing.",
    },
    Feature {
        icon: "⚡",
        title: "Instant Analysis",
        body: "Get real-time feedback on tone, subtlety, and emotional triggers. Increase the odds of getting the reaction you want.",
    },
    Feature {
        icon: "💬",
        title: "iMessage-Style Interface",
        body: "See your manipulative masterpieces in a familiar chat bubble interface, perfect for texting on iOS.",
    },
];

const RESULTS: &[(&str, &str)] = &[
    ("354", "Current Texts Generated"),
    ("87%", "Success Rate"),
    ("100%", "Manipulator"),
];

struct CreditPack {
    tier: &'static str,
    credits: u32,
    blurb: &'static str,
    price: &'static str,
    highlighted: bool,
}

const CREDIT_PACKS: &[CreditPack] = &[
    CreditPack {
        tier: "Starter",
        credits: 5,
        blurb: "Perfect for testing out the waters. 5 manipulative transformations.",
        price: "$2",
        highlighted: false,
    },
    CreditPack {
        tier: "Power",
        credits: 50,
        blurb: "Get more out of every conversation with 50 transformations.",
        price: "$5",
        highlighted: true,
    },
    CreditPack {
        tier: "Ultimate",
        credits: 500,
        blurb: "For serious manipulators. Never run out of transformations.",
        price: "$25",
        highlighted: false,
    },
];

#[function_component(Landing)]
pub fn landing() -> Html {
    let show_prompt = use_state(|| false);

    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    let open_prompt = {
        let show_prompt = show_prompt.clone();
        Callback::from(move |_: MouseEvent| show_prompt.set(true))
    };

    let close_prompt = {
        let show_prompt = show_prompt.clone();
        Callback::from(move |_: ()| show_prompt.set(false))
    };

    html! {
        <div class="landing-page">
            <PromptModal open={*show_prompt} on_close={close_prompt} />

            <section class="hero-section fade-up">
                <h1 class="hero-title">{"Manipulator.ai "}<span>{"😈"}</span></h1>
                <p class="hero-tagline">
                    {"Harness the power of subtle persuasion in every text message. Let our AI rewrite your words to influence their emotions and outcomes without them ever suspecting a thing."}
                </p>
                <button class="hero-button" onclick={open_prompt.clone()}>{"Start Manipulating Now"}</button>
            </section>

            <section class="landing-section fade-up">
                <h2>{"Mind-Bending Features"}</h2>
                <div class="card-grid three">
                    { for FEATURES.iter().map(|feature| html! {
                        <div class="landing-card centered">
                            <div class="feature-icon">{feature.icon}</div>
                            <h3>{feature.title}</h3>
                            <p class="muted small">{feature.body}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section class="landing-section alt fade-up">
                <h2>{"Our Results"}</h2>
                <p class="muted narrow">
                    {"Curious about how well Manipulator.ai actually works? Here's a glimpse at our performance."}
                </p>
                <div class="card-grid three">
                    { for RESULTS.iter().map(|(figure, label)| html! {
                        <div class="landing-card centered">
                            <h3 class="result-figure">{*figure}</h3>
                            <p class="muted">{*label}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section class="landing-section alt fade-up">
                <h2>{"See It in Action"}</h2>
                <p class="muted narrow">
                    {"Discover how a simple text can be transformed into a mind-shaping message that tilts conversations in your favor."}
                </p>
                <div class="card-grid two">
                    <div class="landing-card">
                        <h3>{"Original iMessage"}</h3>
                        <div class="chat-window">
                            <div class="bubble theirs"><p>{"Hey, I was wondering if you could help me with something?"}</p></div>
                            <div class="bubble mine dull"><p>{"Maybe we can chat later if you're free."}</p></div>
                        </div>
                    </div>
                    <div class="landing-card">
                        <h3>{"Manipulator.ai iMessage 😈"}</h3>
                        <div class="chat-window">
                            <div class="bubble theirs"><p>{"Hey, I was wondering if you could help me with something?"}</p></div>
                            <div class="bubble mine">
                                <p>{"Hey, I know you're the only one who can help me pull this off."}</p>
                                <p>{"I can't stop thinking about your insight. When are you free to chat?"}</p>
                            </div>
                        </div>
                    </div>
                </div>
            </section>

            <section class="landing-section fade-up">
                <h2>{"Buy Credits"}</h2>
                <p class="muted narrow">
                    {"Pick a pack and keep the rewrites coming."}
                </p>
                <div class="card-grid three">
                    { for CREDIT_PACKS.iter().map(|pack| html! {
                        <div class={classes!("landing-card", pack.highlighted.then(|| "highlighted"))}>
                            <h3>{format!("{} {} Credits", pack.tier, pack.credits)}</h3>
                            <p class="muted small">{pack.blurb}</p>
                            <span class="price">{pack.price}</span>
                            // Purchasing is not wired up.
                            <button class="hero-button" style="width: 100%;">{format!("💳 Purchase {} Credits", pack.credits)}</button>
                        </div>
                    }) }
                </div>
            </section>

            <section class="landing-section cta fade-up">
                <h2>{"Ready to Influence Their Every Move?"}</h2>
                <p class="muted narrow centered-text">
                    {"Step up your texting game with manipulative flair. Change their minds, hearts, and decisions, one message at a time."}
                </p>
                <button class="hero-button" onclick={open_prompt}>{"Start Your First Rewrite"}</button>
            </section>

            <footer class="landing-footer">
                {format!("© {} Manipulator.ai | Unleash the Power of Persuasion.", Local::now().year())}
            </footer>

            <style>
                {r#"
                    .landing-page {
                        min-height: 100vh;
                        width: 100%;
                        background: #000;
                        color: #f3f4f6;
                        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                        position: relative;
                    }
                    @keyframes fadeUp {
                        from { opacity: 0; transform: translateY(20px); }
                        to { opacity: 1; transform: translateY(0); }
                    }
                    .fade-up {
                        animation: fadeUp 0.8s ease-out;
                    }
                    .hero-section {
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        padding: 3rem 1rem 4rem;
                        background: linear-gradient(to right, #0a0a0a, #1c1c1c);
                        text-align: center;
                    }
                    .hero-title {
                        font-size: 3.5rem;
                        font-weight: bold;
                        margin-bottom: 1rem;
                        color: #60a5fa;
                    }
                    .hero-tagline {
                        font-size: 1.25rem;
                        color: #d1d5db;
                        max-width: 48rem;
                    }
                    .hero-button {
                        margin-top: 1.5rem;
                        background: #3b82f6;
                        color: white;
                        border: none;
                        padding: 0.75rem 1.25rem;
                        border-radius: 1rem;
                        font-weight: 600;
                        cursor: pointer;
                        box-shadow: 0 4px 6px rgba(0, 0, 0, 0.3);
                    }
                    .hero-button:hover {
                        background: #2563eb;
                    }
                    .landing-section {
                        padding: 3rem 2rem;
                    }
                    .landing-section.alt {
                        background: #0f0f0f;
                    }
                    .landing-section.cta {
                        background: #0a0a0a;
                        text-align: center;
                    }
                    .landing-section h2 {
                        font-size: 1.875rem;
                        font-weight: bold;
                        color: #60a5fa;
                        margin-bottom: 1.5rem;
                    }
                    .card-grid {
                        display: grid;
                        gap: 1.5rem;
                        grid-template-columns: 1fr;
                    }
                    @media (min-width: 768px) {
                        .card-grid.three { grid-template-columns: repeat(3, 1fr); }
                        .card-grid.two { grid-template-columns: repeat(2, 1fr); }
                        .hero-title { font-size: 4rem; }
                    }
                    .landing-card {
                        background: #111;
                        border-radius: 1rem;
                        padding: 1.5rem;
                        box-shadow: 0 10px 15px rgba(0, 0, 0, 0.4);
                    }
                    .landing-card.centered {
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        text-align: center;
                    }
                    .landing-card.highlighted {
                        border: 1px solid #3b82f6;
                        background: #1b1b1b;
                    }
                    .landing-card h3 {
                        font-size: 1.25rem;
                        font-weight: 600;
                        color: white;
                        margin-bottom: 0.5rem;
                    }
                    .feature-icon {
                        font-size: 2.5rem;
                        margin-bottom: 1rem;
                    }
                    .result-figure {
                        font-size: 2.25rem !important;
                        color: #60a5fa !important;
                    }
                    .muted { color: #9ca3af; }
                    .small { font-size: 0.875rem; }
                    .narrow { max-width: 42rem; margin-bottom: 2.5rem; }
                    .centered-text { margin-left: auto; margin-right: auto; }
                    .price {
                        display: block;
                        font-size: 1.5rem;
                        font-weight: bold;
                        color: #60a5fa;
                        margin: 1rem 0;
                    }
                    .chat-window {
                        background: #0a0a0a;
                        padding: 1rem;
                        border-radius: 0.75rem;
                        display: flex;
                        flex-direction: column;
                        gap: 0.75rem;
                    }
                    .bubble {
                        max-width: 20rem;
                        padding: 0.5rem 1rem;
                        border-radius: 1rem;
                    }
                    .bubble.theirs {
                        align-self: flex-start;
                        background: #3a3a3a;
                    }
                    .bubble.mine {
                        align-self: flex-end;
                        background: #2563eb;
                    }
                    .bubble.mine.dull {
                        background: #1d4ed8;
                    }
                    .landing-footer {
                        padding: 1.5rem 2rem;
                        border-top: 1px solid #1f2937;
                        font-size: 0.875rem;
                        color: #6b7280;
                        text-align: center;
                    }
                "#}
            </style>
        </div>
    }
}
