//! Upload orchestration state machine.
//!
//! Models the widget lifecycle:
//! Idle -> FileSelected -> Cropping -> Committing -> Idle,
//! with cancel returning to Idle from any state. The machine owns the
//! active [`CropSession`]; the committed slot value lives with the
//! host and is only ever replaced through a completed commit, so
//! cancelling at any point leaves it untouched.
//!
//! Exactly one session can be active at a time: starting a new file
//! selection while a session exists is rejected rather than queued.

use crate::geometry::CropSession;
use crate::types::{Dimensions, PixelRect};

/// Transition guard violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// A selection or session is already in progress.
    #[error("an upload session is already active")]
    SessionActive,

    /// No file selection is awaiting a crop session.
    #[error("no file is awaiting a crop session")]
    NoSelection,

    /// No crop session is active.
    #[error("no active crop session")]
    NoSession,
}

/// The upload widget's lifecycle state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadFlow {
    /// Showing the committed slot value (or a placeholder).
    #[default]
    Idle,
    /// A file was chosen; its bytes are being read or decoded.
    FileSelected,
    /// The crop modal is open and live pan/zoom is running.
    Cropping(CropSession),
    /// The user confirmed; extraction is in progress with the
    /// finalized rectangle.
    Committing(PixelRect),
}

impl UploadFlow {
    /// Begin a file selection.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::SessionActive`] unless the flow is idle —
    /// the picker must stay inert while a session runs.
    pub fn select_file(&mut self) -> Result<(), FlowError> {
        if matches!(self, Self::Idle) {
            *self = Self::FileSelected;
            Ok(())
        } else {
            Err(FlowError::SessionActive)
        }
    }

    /// Open the crop session once the selected file has decoded.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NoSelection`] if no file selection is
    /// pending.
    pub fn open_session(&mut self, source: Dimensions, aspect: f64) -> Result<(), FlowError> {
        if matches!(self, Self::FileSelected) {
            *self = Self::Cropping(CropSession::new(source, aspect));
            Ok(())
        } else {
            Err(FlowError::NoSelection)
        }
    }

    /// The active session, if the modal is open.
    #[must_use]
    pub const fn session(&self) -> Option<&CropSession> {
        match self {
            Self::Cropping(session) => Some(session),
            _ => None,
        }
    }

    /// Mutable access to the active session for pan/zoom input.
    pub const fn session_mut(&mut self) -> Option<&mut CropSession> {
        match self {
            Self::Cropping(session) => Some(session),
            _ => None,
        }
    }

    /// Finalize the crop rectangle and enter the committing state.
    ///
    /// Only explicit user confirmation calls this — pan/zoom changes
    /// never auto-commit.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NoSession`] if no crop session is active.
    pub fn begin_commit(&mut self) -> Result<PixelRect, FlowError> {
        match self {
            Self::Cropping(session) => {
                let rect = session.pixel_rect();
                *self = Self::Committing(rect);
                Ok(rect)
            }
            _ => Err(FlowError::NoSession),
        }
    }

    /// Complete a commit after extraction succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NoSession`] if no commit is in progress.
    pub fn finish_commit(&mut self) -> Result<(), FlowError> {
        if matches!(self, Self::Committing(_)) {
            *self = Self::Idle;
            Ok(())
        } else {
            Err(FlowError::NoSession)
        }
    }

    /// Cancel whatever is in progress and return to idle.
    ///
    /// Always succeeds and is immediate; in-flight async work is
    /// expected to notice the reset and discard its late result.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Whether any selection, session, or commit is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::aspect;

    #[test]
    fn full_commit_path() {
        let mut flow = UploadFlow::default();
        assert!(!flow.is_active());

        flow.select_file().unwrap();
        assert_eq!(flow, UploadFlow::FileSelected);

        flow.open_session(Dimensions::new(2000, 2000), aspect::SQUARE)
            .unwrap();
        assert!(flow.session().is_some());

        let rect = flow.begin_commit().unwrap();
        assert_eq!(
            rect,
            PixelRect {
                x: 0,
                y: 0,
                width: 2000,
                height: 2000,
            }
        );

        flow.finish_commit().unwrap();
        assert_eq!(flow, UploadFlow::Idle);
    }

    #[test]
    fn selecting_while_active_is_rejected() {
        let mut flow = UploadFlow::default();
        flow.select_file().unwrap();
        assert_eq!(flow.select_file(), Err(FlowError::SessionActive));

        flow.open_session(Dimensions::new(100, 100), aspect::SQUARE)
            .unwrap();
        assert_eq!(flow.select_file(), Err(FlowError::SessionActive));

        flow.begin_commit().unwrap();
        assert_eq!(flow.select_file(), Err(FlowError::SessionActive));
    }

    #[test]
    fn open_session_requires_selection() {
        let mut flow = UploadFlow::default();
        assert_eq!(
            flow.open_session(Dimensions::new(10, 10), 1.0),
            Err(FlowError::NoSelection)
        );
    }

    #[test]
    fn commit_requires_session() {
        let mut flow = UploadFlow::default();
        assert_eq!(flow.begin_commit(), Err(FlowError::NoSession));
        assert_eq!(flow.finish_commit(), Err(FlowError::NoSession));
    }

    #[test]
    fn cancel_after_mutations_returns_to_idle() {
        // Scenario C: zoom to max, pan to a corner, then cancel. The
        // flow produces no rectangle, so the host slot stays as-is.
        let mut flow = UploadFlow::default();
        flow.select_file().unwrap();
        flow.open_session(Dimensions::new(900, 900), aspect::SQUARE)
            .unwrap();

        let session = flow.session_mut().unwrap();
        session.set_zoom(3.0);
        session.pan_by(1e6, 1e6);

        flow.cancel();
        assert_eq!(flow, UploadFlow::Idle);
        assert!(flow.session().is_none());

        // A fresh selection is allowed again.
        flow.select_file().unwrap();
    }

    #[test]
    fn decode_failure_aborts_before_cropping() {
        // Scenario D: the selected file never decodes; the flow is
        // reset without ever entering Cropping.
        let mut flow = UploadFlow::default();
        flow.select_file().unwrap();

        let decode = crate::SourceImage::from_data_uri("data:image/png;base64,!!!not-base64!!!");
        assert!(decode.is_err());
        assert!(flow.session().is_none());

        flow.cancel();
        assert_eq!(flow, UploadFlow::Idle);
    }

    #[test]
    fn pan_zoom_does_not_auto_commit() {
        let mut flow = UploadFlow::default();
        flow.select_file().unwrap();
        flow.open_session(Dimensions::new(500, 500), aspect::SQUARE)
            .unwrap();
        for _ in 0..100 {
            let session = flow.session_mut().unwrap();
            session.set_zoom(session.zoom() + 0.1);
            session.pan_by(3.0, -2.0);
        }
        assert!(matches!(flow, UploadFlow::Cropping(_)));
    }
}
