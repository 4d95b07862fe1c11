//! Interactive Placement Module
//!
//! Drag-to-relocate state machine for the footprint marker. Intermediate drag
//! positions stay local; only a drag end produces a coordinate to commit.

use crate::geo::Coordinate;

// ===================== TYPES =====================

/// Marker events emitted by the map rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Start,
    Move(Coordinate),
    End(Coordinate),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementState {
    /// Marker sits on the committed center
    Settled,
    /// Marker follows the pointer; `local` is not committed
    Dragging { local: Coordinate },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    committed: Coordinate,
    state: PlacementState,
}

// ===================== STATE MACHINE =====================

impl Placement {
    pub fn new(committed: Coordinate) -> Self {
        Self { committed, state: PlacementState::Settled }
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn committed(&self) -> Coordinate {
        self.committed
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PlacementState::Dragging { .. })
    }

    /// Where the marker and circle are drawn right now.
    pub fn position(&self) -> Coordinate {
        match self.state {
            PlacementState::Settled => self.committed,
            PlacementState::Dragging { local } => local,
        }
    }

    /// Feed one drag event.
    ///
    /// Returns the coordinate to commit on drag end, `None` otherwise.
    /// A move without a preceding start enters `Dragging`; an end without a
    /// start commits directly.
    pub fn handle(&mut self, event: DragEvent) -> Option<Coordinate> {
        match event {
            DragEvent::Start => {
                if let PlacementState::Settled = self.state {
                    self.state = PlacementState::Dragging { local: self.committed };
                }
                None
            }
            DragEvent::Move(c) => {
                self.state = PlacementState::Dragging { local: c };
                None
            }
            DragEvent::End(c) => {
                self.committed = c;
                self.state = PlacementState::Settled;
                Some(c)
            }
        }
    }

    /// Named-location selection or geolocation: replace the committed
    /// coordinate and drop any drag in progress.
    pub fn reset_to(&mut self, committed: Coordinate) {
        self.committed = committed;
        self.state = PlacementState::Settled;
    }
}

// ===================== TESTS =====================
