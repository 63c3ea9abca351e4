//! Dioxus UI components for vitrine.
//!
//! Provides the per-slot image upload widget and the crop modal it
//! opens.

mod crop_modal;
mod upload;

pub use crop_modal::CropModal;
pub use upload::ImageUpload;
