use serde::{Deserialize, Serialize};

use crate::core::{MarkerGeometry, RecordId};
use crate::error::{ChartError, ChartResult};

/// Horizontal position idle markers are parked at, outside the plot area.
pub const DEFAULT_PARK_OFFSET_PX: f64 = -1000.0;

/// Stable identifier of one host marker element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerState {
    Active,
    Idle,
}

/// One marker element as tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerHandle {
    pub id: MarkerId,
    pub state: MarkerState,
    pub bound_record: Option<RecordId>,
    pub geometry: MarkerGeometry,
    pub visible: bool,
}

impl MarkerHandle {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == MarkerState::Active
    }
}

/// Grow-only pool of marker handles.
///
/// Handles are never destroyed: releasing one hides it, parks it off-screen and
/// makes it available to the next `acquire`. Each handle is either active or
/// idle, and `len()` never decreases until `clear`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementPool {
    handles: Vec<MarkerHandle>,
    idle: Vec<MarkerId>,
    park_offset_px: f64,
}

impl Default for ElementPool {
    fn default() -> Self {
        Self::new(DEFAULT_PARK_OFFSET_PX)
    }
}

impl ElementPool {
    #[must_use]
    pub fn new(park_offset_px: f64) -> Self {
        Self {
            handles: Vec::new(),
            idle: Vec::new(),
            park_offset_px,
        }
    }

    /// Returns the most recently released idle handle, or creates a new one.
    pub fn acquire(&mut self) -> MarkerId {
        if let Some(id) = self.idle.pop() {
            if let Some(handle) = self.handles.get_mut(id.0 as usize) {
                handle.state = MarkerState::Active;
            }
            return id;
        }

        let id = MarkerId(self.handles.len() as u32);
        self.handles.push(MarkerHandle {
            id,
            state: MarkerState::Active,
            bound_record: None,
            geometry: self.parked_geometry(),
            visible: false,
        });
        id
    }

    /// Unbinds, hides and parks a handle, then returns it to the idle list.
    ///
    /// Releasing an already idle handle is a no-op.
    pub fn release(&mut self, id: MarkerId) -> ChartResult<()> {
        let parked = self.parked_geometry();
        let handle = self.handle_mut(id)?;
        if handle.state == MarkerState::Idle {
            return Ok(());
        }
        handle.state = MarkerState::Idle;
        handle.bound_record = None;
        handle.visible = false;
        handle.geometry = parked;
        self.idle.push(id);
        Ok(())
    }

    /// Attaches an active handle to a record and shows it at `geometry`.
    pub fn bind(
        &mut self,
        id: MarkerId,
        record: RecordId,
        geometry: MarkerGeometry,
    ) -> ChartResult<()> {
        let handle = self.handle_mut(id)?;
        if handle.state != MarkerState::Active {
            return Err(ChartError::InvalidData(format!(
                "marker {id:?} must be acquired before binding"
            )));
        }
        handle.bound_record = Some(record);
        handle.geometry = geometry;
        handle.visible = true;
        Ok(())
    }

    /// Moves an active handle without changing its binding.
    pub fn place(&mut self, id: MarkerId, geometry: MarkerGeometry) -> ChartResult<()> {
        let handle = self.handle_mut(id)?;
        if handle.state != MarkerState::Active {
            return Err(ChartError::InvalidData(format!(
                "marker {id:?} is idle and cannot be placed"
            )));
        }
        handle.geometry = geometry;
        handle.visible = true;
        Ok(())
    }

    #[must_use]
    pub fn handle(&self, id: MarkerId) -> Option<&MarkerHandle> {
        self.handles.get(id.0 as usize)
    }

    pub fn handles(&self) -> impl Iterator<Item = &MarkerHandle> {
        self.handles.iter()
    }

    pub fn active_handles(&self) -> impl Iterator<Item = &MarkerHandle> {
        self.handles.iter().filter(|handle| handle.is_active())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.handles.len() - self.idle.len()
    }

    #[must_use]
    pub fn is_idle(&self, id: MarkerId) -> bool {
        self.handle(id)
            .is_some_and(|handle| handle.state == MarkerState::Idle)
    }

    /// Forgets every handle. Used when the host discards its marker elements.
    pub fn clear(&mut self) {
        self.handles.clear();
        self.idle.clear();
    }

    fn handle_mut(&mut self, id: MarkerId) -> ChartResult<&mut MarkerHandle> {
        self.handles
            .get_mut(id.0 as usize)
            .ok_or(ChartError::UnknownMarker(id))
    }

    fn parked_geometry(&self) -> MarkerGeometry {
        MarkerGeometry {
            x: self.park_offset_px,
            y: 0.0,
            diameter: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(x: f64) -> MarkerGeometry {
        MarkerGeometry {
            x,
            y: 5.0,
            diameter: 10.0,
        }
    }

    #[test]
    fn released_handles_are_reused_before_growing() {
        let mut pool = ElementPool::default();
        let first = pool.acquire();
        let second = pool.acquire();
        assert_eq!(pool.len(), 2);

        pool.release(first).expect("release");
        assert_eq!(pool.idle_count(), 1);
        assert_eq!(pool.active_count(), 1);

        let reused = pool.acquire();
        assert_eq!(reused, first);
        assert_ne!(reused, second);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn release_unbinds_hides_and_parks() {
        let mut pool = ElementPool::default();
        let id = pool.acquire();
        pool.bind(id, RecordId(3), geometry(40.0)).expect("bind");
        assert_eq!(
            pool.handle(id).and_then(|handle| handle.bound_record),
            Some(RecordId(3))
        );

        pool.release(id).expect("release");
        let handle = pool.handle(id).expect("handle");
        assert_eq!(handle.bound_record, None);
        assert!(!handle.visible);
        assert_eq!(handle.geometry.x, DEFAULT_PARK_OFFSET_PX);
        assert!(pool.is_idle(id));
    }

    #[test]
    fn double_release_does_not_duplicate_idle_entries() {
        let mut pool = ElementPool::default();
        let id = pool.acquire();
        pool.release(id).expect("release");
        pool.release(id).expect("release again");
        assert_eq!(pool.idle_count(), 1);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn idle_handles_cannot_be_bound_or_placed() {
        let mut pool = ElementPool::default();
        let id = pool.acquire();
        pool.release(id).expect("release");
        assert!(pool.bind(id, RecordId(0), geometry(1.0)).is_err());
        assert!(pool.place(id, geometry(1.0)).is_err());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut pool = ElementPool::default();
        let err = pool.release(MarkerId(9)).expect_err("unknown");
        assert!(matches!(err, ChartError::UnknownMarker(MarkerId(9))));
    }
}
