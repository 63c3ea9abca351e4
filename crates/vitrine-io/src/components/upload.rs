//! Per-slot image upload widget.
//!
//! Shows the committed slot value (or a placeholder), opens the file
//! picker, reads and decodes the selection, drives the crop modal,
//! and fires `on_commit` with the final data URI. Cancellation and
//! every failure path leave the committed value untouched.

use std::rc::Rc;

use dioxus::html::FileData;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdImage, LdInfo, LdUpload};
use vitrine_crop::{CropSession, SourceImage, UploadFlow, data_uri};

use super::CropModal;

/// Props for the [`ImageUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImageUploadProps {
    /// Currently committed slot value (URL or data URI, possibly
    /// empty). Treated as opaque; only ever used as an `<img src>`.
    value: String,
    /// Field label shown above the slot.
    label: String,
    /// Fixed aspect ratio for this slot (e.g. 1, 16/9, 16/5).
    aspect_ratio: f64,
    /// Optional recommended-dimensions hint, display only.
    #[props(default)]
    recommended: Option<String>,
    /// Called with the new data URI after a successful commit. The
    /// host owns the committed value and re-renders the preview.
    on_commit: EventHandler<String>,
}

/// Caption describing the slot's aspect ratio, shown when no
/// recommended-dimensions hint is supplied.
fn aspect_caption(aspect: f64) -> &'static str {
    if (aspect - vitrine_crop::aspect::SQUARE).abs() < 1e-9 {
        "Proporção: Quadrada (1:1)"
    } else if (aspect - vitrine_crop::aspect::COVER).abs() < 1e-9 {
        "Proporção: Widescreen (16:9)"
    } else if (aspect - vitrine_crop::aspect::HERO).abs() < 1e-9 {
        "Proporção: Banner (16:5)"
    } else {
        "Proporção: Personalizada"
    }
}

/// Image upload slot with an interactive crop step.
///
/// Lifecycle: picking a file reads and decodes it, a successful
/// decode opens the crop modal, and explicit confirmation extracts
/// and encodes the crop before `on_commit` fires. Read, decode, and
/// extraction failures all reset the widget to idle with a console
/// diagnostic and an inline error line.
#[component]
pub fn ImageUpload(props: ImageUploadProps) -> Element {
    let mut flow = use_signal(UploadFlow::default);
    let mut source = use_signal(|| Option::<Rc<SourceImage>>::None);
    let mut source_uri = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<String>::None);
    // Bumped whenever a session ends so an in-flight commit from a
    // cancelled session discards its late result.
    let mut generation = use_signal(|| 0u64);

    let aspect_ratio = props.aspect_ratio;
    let on_commit = props.on_commit;

    let input_id = format!(
        "upload-{}",
        props.label.to_lowercase().replace(char::is_whitespace, "-"),
    );

    // Read, decode, and open a crop session for the first selected
    // file. The flow guard keeps the picker inert while a session is
    // already active.
    let process_file = move |files: Vec<FileData>| async move {
        let Some(file) = files.first() else {
            return;
        };
        if flow.write().select_file().is_err() {
            return;
        }
        let name = file.name();
        match file.read_bytes().await {
            Ok(bytes) => {
                let bytes = bytes.to_vec();
                match SourceImage::from_bytes(&bytes) {
                    Ok(decoded) => {
                        let dimensions = decoded.dimensions();
                        let uri = data_uri::encode(data_uri::mime_for_filename(&name), &bytes);
                        source.set(Some(Rc::new(decoded)));
                        source_uri.set(Some(uri));
                        error.set(None);
                        let _ = flow.write().open_session(dimensions, aspect_ratio);
                    }
                    Err(e) => {
                        web_sys::console::warn_1(&format!("image decode failed: {e}").into());
                        error.set(Some(format!("Não foi possível ler a imagem: {name}")));
                        flow.write().cancel();
                    }
                }
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("file read failed: {e:?}").into());
                error.set(Some("Falha ao ler o arquivo selecionado.".to_string()));
                flow.write().cancel();
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_file(evt.files()).await;
    };

    // Live pan/zoom updates from the modal land back in the flow's
    // session.
    let handle_session_change = move |updated: CropSession| {
        if let Some(session) = flow.write().session_mut() {
            *session = updated;
        }
    };

    let mut end_session = move || {
        generation += 1;
        source.set(None);
        source_uri.set(None);
    };

    let handle_cancel = move |()| {
        end_session();
        flow.write().cancel();
    };

    let handle_confirm = move |()| {
        let Ok(rect) = flow.write().begin_commit() else {
            return;
        };
        generation += 1;
        let my_generation = *generation.peek();

        spawn(async move {
            // Yield to the browser event loop so the busy state can
            // paint before the synchronous extract/encode blocks.
            gloo_timers::future::TimeoutFuture::new(0).await;

            // The session was cancelled while we were suspended;
            // drop the result silently.
            if *generation.peek() != my_generation {
                return;
            }

            let Some(decoded) = source() else {
                flow.write().cancel();
                return;
            };

            match vitrine_crop::crop_to_data_uri(&decoded, rect) {
                Ok(uri) => {
                    let _ = flow.write().finish_commit();
                    end_session();
                    error.set(None);
                    on_commit.call(uri);
                }
                Err(e) => {
                    // Never replace the slot with a broken payload;
                    // the previous value stays committed.
                    web_sys::console::warn_1(&format!("crop commit failed: {e}").into());
                    error.set(Some("Não foi possível cortar a imagem.".to_string()));
                    end_session();
                    flow.write().cancel();
                }
            }
        });
    };

    let busy = flow().is_active();
    let caption = props
        .recommended
        .clone()
        .unwrap_or_else(|| aspect_caption(aspect_ratio).to_string());

    rsx! {
        div { class: "upload-slot",
            if !props.label.is_empty() {
                label { class: "upload-label", "{props.label}" }
            }

            div { class: "upload-row",
                div { class: "upload-thumb",
                    if props.value.is_empty() {
                        Icon { icon: LdImage, width: 24, height: 24 }
                    } else {
                        img { src: "{props.value}", alt: "Preview" }
                    }
                }

                div { class: "upload-controls",
                    input {
                        // Remount per generation so re-selecting the
                        // same file still fires onchange.
                        key: "{generation}",
                        r#type: "file",
                        id: "{input_id}",
                        accept: "image/*",
                        class: "upload-input",
                        disabled: busy,
                        onchange: handle_files,
                    }
                    label { r#for: "{input_id}", class: "btn btn-outline upload-trigger",
                        Icon { icon: LdUpload, width: 14, height: 14 }
                        if props.value.is_empty() { "Enviar Imagem" } else { "Alterar Imagem" }
                    }

                    div { class: "upload-hint",
                        Icon { icon: LdInfo, width: 14, height: 14 }
                        div {
                            p { "Formatos: JPG, PNG, WEBP. Max 5MB." }
                            p { class: "upload-hint-strong", "{caption}" }
                        }
                    }

                    if let Some(ref err) = error() {
                        p { class: "upload-error", "{err}" }
                    }
                }
            }

            if let UploadFlow::Cropping(session) = flow() {
                if let Some(uri) = source_uri() {
                    CropModal {
                        source_uri: uri,
                        session,
                        on_session_change: handle_session_change,
                        on_confirm: handle_confirm,
                        on_cancel: handle_cancel,
                    }
                }
            }

            if let UploadFlow::Committing(_) = flow() {
                div { class: "crop-overlay",
                    p { class: "crop-busy", "Processando imagem..." }
                }
            }
        }
    }
}
