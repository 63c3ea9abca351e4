//! Interactive crop modal.
//!
//! Renders the selected image inside a fixed-aspect frame, lets the
//! user drag to pan and slide to zoom, and reports every geometry
//! change to the parent widget. Confirmation and cancellation are
//! plain events; this component never touches the committed slot
//! value.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCheck, LdCrop, LdX, LdZoomIn};
use vitrine_crop::{CropSession, MAX_ZOOM, MIN_ZOOM};

/// On-screen width of the crop frame in CSS pixels. The height
/// follows from the session's aspect ratio.
const FRAME_WIDTH: f64 = 480.0;

/// Props for the [`CropModal`] component.
#[derive(Props, Clone, PartialEq)]
pub struct CropModalProps {
    /// Data URI of the source image being cropped.
    source_uri: String,
    /// Current crop session state (owned by the parent's flow).
    session: CropSession,
    /// Fired with the updated session after every pan/zoom input.
    on_session_change: EventHandler<CropSession>,
    /// Fired when the user confirms the crop.
    on_confirm: EventHandler<()>,
    /// Fired when the user closes or cancels the modal.
    on_cancel: EventHandler<()>,
}

/// Modal dialog with the pan/zoom crop surface.
///
/// The preview maps the session's crop rectangle onto the frame with
/// a CSS scale+translate, so pan/zoom updates are pure style changes
/// -- no pixel data is copied until the parent commits.
#[component]
pub fn CropModal(props: CropModalProps) -> Element {
    // Last pointer position while a drag is in progress.
    let mut drag_from = use_signal(|| Option::<(f64, f64)>::None);

    let session = props.session;
    let rect = session.crop_rect();
    let frame_height = FRAME_WIDTH / session.aspect();
    // CSS pixels per source pixel at the current zoom.
    let scale = FRAME_WIDTH / rect.width;

    let frame_style = format!("width: {FRAME_WIDTH}px; height: {frame_height}px;");
    let image_style = format!(
        "transform-origin: 0 0; transform: scale({scale}) translate({}px, {}px); max-width: none;",
        -rect.x, -rect.y,
    );

    let on_change = props.on_session_change;

    let handle_pointer_down = move |evt: PointerEvent| {
        evt.prevent_default();
        let p = evt.client_coordinates();
        drag_from.set(Some((p.x, p.y)));
    };

    let handle_pointer_move = move |evt: PointerEvent| {
        let Some((from_x, from_y)) = drag_from() else {
            return;
        };
        let p = evt.client_coordinates();
        drag_from.set(Some((p.x, p.y)));

        // Dragging the image moves the crop window the opposite way,
        // in source-pixel units.
        let mut updated = session;
        updated.pan_by((from_x - p.x) / scale, (from_y - p.y) / scale);
        on_change.call(updated);
    };

    let mut handle_pointer_up = move |_| {
        drag_from.set(None);
    };

    rsx! {
        div { class: "crop-overlay",
            div { class: "crop-dialog",
                div { class: "crop-dialog-header",
                    h3 { class: "crop-dialog-title",
                        Icon { icon: LdCrop, width: 18, height: 18 }
                        "Ajustar e Cortar Imagem"
                    }
                    button {
                        class: "crop-dialog-close",
                        aria_label: "Fechar",
                        onclick: move |_| props.on_cancel.call(()),
                        Icon { icon: LdX, width: 24, height: 24 }
                    }
                }

                div { class: "crop-stage",
                    div {
                        class: "crop-frame",
                        style: "{frame_style}",
                        onpointerdown: handle_pointer_down,
                        onpointermove: handle_pointer_move,
                        onpointerup: move |evt| handle_pointer_up(evt),
                        onpointerleave: move |evt| handle_pointer_up(evt),

                        img {
                            src: "{props.source_uri}",
                            alt: "",
                            draggable: "false",
                            style: "{image_style}",
                        }
                        div { class: "crop-frame-grid" }
                    }
                }

                div { class: "crop-dialog-footer",
                    div { class: "crop-zoom-row",
                        Icon { icon: LdZoomIn, width: 16, height: 16 }
                        input {
                            r#type: "range",
                            min: "{MIN_ZOOM}",
                            max: "{MAX_ZOOM}",
                            step: "0.1",
                            value: "{session.zoom()}",
                            aria_label: "Zoom",
                            class: "crop-zoom-slider",
                            oninput: move |e| {
                                match e.value().parse::<f64>() {
                                    Ok(zoom) => {
                                        let mut updated = session;
                                        updated.set_zoom(zoom);
                                        on_change.call(updated);
                                    }
                                    Err(err) => {
                                        web_sys::console::warn_1(
                                            &format!(
                                                "zoom slider parse failure: {err:?} from {:?}",
                                                e.value(),
                                            )
                                                .into(),
                                        );
                                    }
                                }
                            },
                        }
                    }
                    div { class: "crop-actions",
                        button {
                            class: "btn btn-outline",
                            onclick: move |_| props.on_cancel.call(()),
                            "Cancelar"
                        }
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| props.on_confirm.call(()),
                            Icon { icon: LdCheck, width: 16, height: 16 }
                            "Confirmar Corte"
                        }
                    }
                }
            }
        }
    }
}
