//! OfferAssistant - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading an insurance inquiry email and
//! reviewing the structured data the backend extracted from it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent (AppState: last result XOR last error)          │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadForm (Idle / Submitting)                         │
//! │  ├── error banner (when the last upload failed)             │
//! │  └── ResultCard (when the last upload succeeded)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Endpoint and response schema settings
//! - [`types`] - Extraction result model, field schema, errors
//! - [`state`] - App state reducers and the submission state machine
//! - [`components`] - UI components (Hero, UploadForm, ResultCard)
//! - [`services`] - Backend communication (extraction)

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod state;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Field schema
    FieldKey, FieldValue, ExtractedFields,
    // Result
    Classification, ExtractionResult,
    // Errors
    ExtractionError, ClientResult,
};

// State
pub use state::{AppState, SubmissionMachine, SubmissionState};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install logging and mount the application on `<body>`.
pub fn run() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 {} - Starting Leptos App", APP_NAME);

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    log::info!(
        "Extraction endpoint: {} (schema: {})",
        config.upload_endpoint,
        config.schema
    );
    provide_context(config);

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let state = create_rw_signal(AppState::default());

    let on_result = move |result: ExtractionResult| {
        state.update(|s| *s = std::mem::take(s).apply_result(result));
    };
    let on_error = move |message: String| {
        state.update(|s| *s = std::mem::take(s).apply_error(message));
    };

    view! {
        <div class="container">
            <Hero/>

            <UploadForm on_result=on_result on_error=on_error/>

            {move || {
                state
                    .with(|s| s.last_error().map(str::to_string))
                    .map(|message| view! { <div class="error-message">{message}</div> })
            }}

            {move || {
                state
                    .with(|s| s.last_result().cloned())
                    .map(|result| view! { <ResultCard result=result/> })
            }}
        </div>
    }
}
