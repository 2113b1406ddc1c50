//! Gesture state machine for panning the timeline and adjusting its density.
//!
//! Mouse and touch transports feed the same `on_gesture_*` calls; the
//! controller only needs horizontal pointer positions.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::ensure_finite;
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    DraggingPan,
    DraggingDensity,
}

/// Input transport that produced a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureSource {
    Mouse,
    Touch,
}

/// Element a gesture started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureTarget {
    /// The plot area; drags pan the timeline.
    ChartBody,
    /// A vertical month line; drags change the density.
    DensityHandle(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragKind {
    Pan,
    Density { handle: usize },
}

/// State kept between gesture start and gesture end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub kind: DragKind,
    pub source: GestureSource,
    pub start_pointer_x: f64,
    /// Committed scroll offset for pans, handle pixel position for density drags.
    pub start_value: f64,
    pub last_pointer_x: f64,
}

/// Effect of a pointer move on the active session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragUpdate {
    /// No session is active; the move was orphaned.
    Ignored,
    PanMoved { pending_offset_px: f64 },
    DensityHandleMoved { handle: usize, handle_x: f64 },
}

/// Effect of releasing the active session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragRelease {
    Ignored,
    PanReleased,
    /// `delta_px = start_x - final_x`; dragging left gives a positive delta.
    DensityReleased { handle: usize, delta_px: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self.session.map(|session| session.kind) {
            None => InteractionMode::Idle,
            Some(DragKind::Pan) => InteractionMode::DraggingPan,
            Some(DragKind::Density { .. }) => InteractionMode::DraggingDensity,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.mode() == InteractionMode::DraggingPan
    }

    /// Opens a session. Returns `false` when another session is already active,
    /// in which case the new start is ignored.
    ///
    /// `start_value` is the committed scroll offset for the chart body and the
    /// handle's current pixel position for density handles.
    pub fn on_gesture_start(
        &mut self,
        target: GestureTarget,
        source: GestureSource,
        pointer_x: f64,
        start_value: f64,
    ) -> ChartResult<bool> {
        let pointer_x = ensure_finite(pointer_x, "gesture pointer x")?;
        let start_value = ensure_finite(start_value, "gesture start value")?;
        if let Some(active) = self.session {
            trace!(?active.kind, ?target, "gesture start ignored while dragging");
            return Ok(false);
        }

        let kind = match target {
            GestureTarget::ChartBody => DragKind::Pan,
            GestureTarget::DensityHandle(handle) => DragKind::Density { handle },
        };
        self.session = Some(DragSession {
            kind,
            source,
            start_pointer_x: pointer_x,
            start_value,
            last_pointer_x: pointer_x,
        });
        Ok(true)
    }

    pub fn on_gesture_move(&mut self, pointer_x: f64) -> ChartResult<DragUpdate> {
        let pointer_x = ensure_finite(pointer_x, "gesture pointer x")?;
        let Some(session) = self.session.as_mut() else {
            return Ok(DragUpdate::Ignored);
        };
        session.last_pointer_x = pointer_x;

        let moved = pointer_x - session.start_pointer_x;
        Ok(match session.kind {
            DragKind::Pan => DragUpdate::PanMoved {
                pending_offset_px: moved,
            },
            DragKind::Density { handle } => DragUpdate::DensityHandleMoved {
                handle,
                handle_x: session.start_value + moved,
            },
        })
    }

    /// Closes the session. Without a final pointer position (a touch end carries
    /// no touches) the last observed position is used.
    pub fn on_gesture_end(&mut self, pointer_x: Option<f64>) -> ChartResult<DragRelease> {
        let pointer_x = pointer_x
            .map(|x| ensure_finite(x, "gesture pointer x"))
            .transpose()?;
        let Some(session) = self.session.take() else {
            return Ok(DragRelease::Ignored);
        };

        let final_x = pointer_x.unwrap_or(session.last_pointer_x);
        Ok(match session.kind {
            DragKind::Pan => DragRelease::PanReleased,
            DragKind::Density { handle } => DragRelease::DensityReleased {
                handle,
                delta_px: session.start_pointer_x - final_x,
            },
        })
    }

    /// Drops any active session without producing a release.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orphaned_moves_and_ends_are_ignored() {
        let mut controller = DragController::default();
        assert_eq!(
            controller.on_gesture_move(10.0).expect("move"),
            DragUpdate::Ignored
        );
        assert_eq!(
            controller.on_gesture_end(Some(10.0)).expect("end"),
            DragRelease::Ignored
        );
        assert_eq!(controller.mode(), InteractionMode::Idle);
    }

    #[test]
    fn pan_reports_offset_from_start() {
        let mut controller = DragController::default();
        controller
            .on_gesture_start(GestureTarget::ChartBody, GestureSource::Touch, 100.0, 0.0)
            .expect("start");
        assert_eq!(controller.mode(), InteractionMode::DraggingPan);
        assert_eq!(
            controller.on_gesture_move(70.0).expect("move"),
            DragUpdate::PanMoved {
                pending_offset_px: -30.0
            }
        );
        assert_eq!(
            controller.on_gesture_end(None).expect("end"),
            DragRelease::PanReleased
        );
        assert_eq!(controller.mode(), InteractionMode::Idle);
    }

    #[test]
    fn density_release_uses_last_position_without_end_coordinate() {
        let mut controller = DragController::default();
        controller
            .on_gesture_start(
                GestureTarget::DensityHandle(1),
                GestureSource::Touch,
                200.0,
                139.0,
            )
            .expect("start");
        assert_eq!(
            controller.on_gesture_move(170.0).expect("move"),
            DragUpdate::DensityHandleMoved {
                handle: 1,
                handle_x: 109.0
            }
        );
        assert_eq!(
            controller.on_gesture_end(None).expect("end"),
            DragRelease::DensityReleased {
                handle: 1,
                delta_px: 30.0
            }
        );
    }

    #[test]
    fn second_start_is_ignored_while_dragging() {
        let mut controller = DragController::default();
        assert!(
            controller
                .on_gesture_start(GestureTarget::ChartBody, GestureSource::Mouse, 0.0, 0.0)
                .expect("start")
        );
        assert!(
            !controller
                .on_gesture_start(
                    GestureTarget::DensityHandle(0),
                    GestureSource::Mouse,
                    5.0,
                    0.0
                )
                .expect("start")
        );
        assert_eq!(controller.mode(), InteractionMode::DraggingPan);
    }

    #[test]
    fn non_finite_pointer_is_rejected() {
        let mut controller = DragController::default();
        assert!(
            controller
                .on_gesture_start(
                    GestureTarget::ChartBody,
                    GestureSource::Mouse,
                    f64::NAN,
                    0.0
                )
                .is_err()
        );
    }
}
