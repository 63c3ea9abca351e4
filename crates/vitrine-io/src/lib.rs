//! vitrine-io: Browser I/O and Dioxus component library.
//!
//! Provides the admin panel's image upload widget: file picking and
//! reading, decode, the interactive crop modal, and the commit
//! callback that hands the final data URI back to the host form. The
//! crop math itself lives in `vitrine-crop`.

pub mod components;

pub use components::{CropModal, ImageUpload};
