//! Per-car state machine: floor position, door state and the
//! transitions between them.
use std::sync::Arc;

use serde;

use crate::event::sink::EventSink;
use crate::event::transition::{EventKind, TransitionEvent};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DoorState {
    Closed,
    Open,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Up,
    Down,
}

/// Successful result of applying one command to a car.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TransitionOutcome {
    Moved { from: u8, to: u8, direction: Direction },
    AlreadyAtFloor,
    DoorsOpened,
    DoorsClosed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CarError {
    #[error("invalid floor {requested}: serviceable floors are 0..={floor_count}")]
    InvalidFloor { requested: u8, floor_count: u8 },
}

/// One elevator car. The transition methods below are the only write
/// access to its fields; a failed transition leaves the car untouched.
///
/// Every successful transition that changes state hands one
/// `TransitionEvent` to the sink.
pub struct Car {
    id: usize,
    floor_count: u8,
    current_floor: u8,
    door_state: DoorState,
    sink: Arc<dyn EventSink>,
}

impl Car {
    /// `floor_count` is the highest serviceable floor, so valid floors
    /// are `0..=floor_count`. Cars start on floor 0 with closed doors.
    pub fn new(id: usize, floor_count: u8, sink: Arc<dyn EventSink>) -> Car {
        Car {
            id,
            floor_count,
            current_floor: 0,
            door_state: DoorState::Closed,
            sink,
        }
    }

    pub fn id(&self) -> usize {
        return self.id;
    }

    pub fn floor_count(&self) -> u8 {
        return self.floor_count;
    }

    pub fn current_floor(&self) -> u8 {
        return self.current_floor;
    }

    pub fn door_state(&self) -> DoorState {
        return self.door_state;
    }

    /// Moves the car to `target` in one logical step.
    ///
    /// Door state is neither checked nor changed by movement.
    pub fn goto_floor(&mut self, target: u8) -> Result<TransitionOutcome, CarError> {
        if target > self.floor_count {
            return Err(CarError::InvalidFloor {
                requested: target,
                floor_count: self.floor_count,
            });
        }
        if target == self.current_floor {
            // The floor did not change, so nothing is recorded.
            return Ok(TransitionOutcome::AlreadyAtFloor);
        }
        let direction = if target > self.current_floor {
            Direction::Up
        } else {
            Direction::Down
        };
        let from = self.current_floor;
        self.current_floor = target;
        self.sink
            .record(TransitionEvent::new(self.id, from, target, EventKind::Moved));
        return Ok(TransitionOutcome::Moved {
            from,
            to: target,
            direction,
        });
    }

    /// Opens the doors. Opening already-open doors succeeds and is
    /// recorded again.
    pub fn open_doors(&mut self) -> TransitionOutcome {
        self.door_state = DoorState::Open;
        self.sink.record(TransitionEvent::new(
            self.id,
            self.current_floor,
            self.current_floor,
            EventKind::DoorsOpened,
        ));
        return TransitionOutcome::DoorsOpened;
    }

    /// Closes the doors. Closing already-closed doors succeeds and is
    /// recorded again.
    pub fn close_doors(&mut self) -> TransitionOutcome {
        self.door_state = DoorState::Closed;
        self.sink.record(TransitionEvent::new(
            self.id,
            self.current_floor,
            self.current_floor,
            EventKind::DoorsClosed,
        ));
        return TransitionOutcome::DoorsClosed;
    }
}
