use dioxus::prelude::*;
use vitrine_crop::aspect;
use vitrine_io::ImageUpload;

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// A cut-down admin page exercising every upload slot shape the
/// portal uses: the wide hero banner, square logo, widescreen cover,
/// and a small gallery of square product images. Each slot owns its
/// committed value; the widgets only replace it through `on_commit`.
fn app() -> Element {
    let mut hero = use_signal(String::new);
    let mut logo = use_signal(String::new);
    let mut cover = use_signal(String::new);
    let mut gallery = use_signal(|| vec![String::new(); 3]);

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/style.css") }

        div { class: "page",
            header { class: "page-header",
                h1 { class: "page-title", "vitrine" }
                p { class: "page-subtitle",
                    "Painel administrativo — identidade visual do empreendimento"
                }
            }

            main { class: "page-body",
                section { class: "card",
                    h2 { class: "card-title", "Página inicial" }
                    ImageUpload {
                        value: hero(),
                        label: "Banner principal",
                        aspect_ratio: aspect::HERO,
                        recommended: Some("Recomendado: 1920×600px".to_string()),
                        on_commit: move |uri| hero.set(uri),
                    }
                }

                section { class: "card",
                    h2 { class: "card-title", "Identidade da loja" }
                    ImageUpload {
                        value: logo(),
                        label: "Logo",
                        aspect_ratio: aspect::SQUARE,
                        on_commit: move |uri| logo.set(uri),
                    }
                    ImageUpload {
                        value: cover(),
                        label: "Imagem de capa",
                        aspect_ratio: aspect::COVER,
                        on_commit: move |uri| cover.set(uri),
                    }
                }

                section { class: "card",
                    h2 { class: "card-title", "Galeria de produtos" }
                    div { class: "gallery-grid",
                        for index in 0..gallery().len() {
                            ImageUpload {
                                key: "{index}",
                                value: gallery()[index].clone(),
                                label: format!("Produto {}", index + 1),
                                aspect_ratio: aspect::SQUARE,
                                on_commit: move |uri| gallery.write()[index] = uri,
                            }
                        }
                    }
                }
            }
        }
    }
}
