//! Email upload component with drag & drop support.
//!
//! Accepts one file per selection or drop, sends it to the extraction
//! backend and hands the outcome to the parent.

use leptos::*;
use web_sys::{DragEvent, Event, File, FileList, HtmlInputElement};

use crate::config::{accept_attribute, ClientConfig};
use crate::services::submit_file;
use crate::state::{Resolution, SubmissionMachine};
use crate::types::ExtractionResult;

/// Only the first file of a multi-file selection or drop is used.
fn first_file(files: Option<FileList>) -> Option<File> {
    files.and_then(|files| files.get(0))
}

#[component]
pub fn UploadForm(
    /// Called with the extraction result of the pending request.
    #[prop(into)]
    on_result: Callback<ExtractionResult>,
    /// Called with a human-readable message when the request fails.
    #[prop(into)]
    on_error: Callback<String>,
) -> impl IntoView {
    let config = store_value(use_context::<ClientConfig>().unwrap_or_default());
    let machine = create_rw_signal(SubmissionMachine::default());
    let input_ref = create_node_ref::<html::Input>();

    let is_submitting = move || machine.with(|m| m.is_submitting());

    let handle_file = move |file: File| {
        let file_name = file.name();

        let mut started = None;
        machine.update(|m| started = m.begin(&file_name));
        let Some(request) = started else {
            return;
        };

        log::info!("📤 Submitting {} ({} bytes)", file_name, file.size());
        let config = config.get_value();
        let started_at = js_sys::Date::now();

        spawn_local(async move {
            let outcome = submit_file(&file, &config).await;

            let mut resolution = Resolution::Stale;
            machine.update(|m| resolution = m.finish(request));
            if resolution == Resolution::Stale {
                return;
            }

            match outcome {
                Ok(result) => {
                    log::info!(
                        "✅ Extracted {} in {:.0} ms",
                        file_name,
                        js_sys::Date::now() - started_at
                    );
                    on_result.call(result);
                }
                Err(e) => {
                    log::error!("❌ {}", e);
                    on_error.call(e.to_string());
                }
            }
        });
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = first_file(input.files()) {
            handle_file(file);
        }
        // Allow picking the same file again
        input.set_value("");
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        if let Some(file) = first_file(ev.data_transfer().and_then(|dt| dt.files())) {
            handle_file(file);
        }
    };

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div
            class="upload-section"
            class:submitting=is_submitting
            on:click=open_picker
            on:dragover=|ev: DragEvent| ev.prevent_default()
            on:drop=on_drop
        >
            <input
                type="file"
                accept=accept_attribute()
                style="display:none"
                node_ref=input_ref
                on:click=|ev| ev.stop_propagation()
                on:change=on_file_change
            />

            <Show
                when=is_submitting
                fallback=move || view! {
                    <p class="upload-hint">
                        "Drag & drop a " <strong>".msg"</strong> " or "
                        <strong>".eml"</strong> " file here, or click to select"
                    </p>
                    {move || {
                        machine
                            .with(|m| m.last_file_name().map(str::to_string))
                            .map(|name| view! {
                                <p class="upload-selected">"Selected: " {name}</p>
                            })
                    }}
                }
            >
                <p class="upload-progress">"Processing…"</p>
            </Show>
        </div>
    }
}
