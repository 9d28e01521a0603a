use chrono::{DateTime, Local};
use serde;

/// Which kind of state change a car completed.
///
/// Serialized names match the journal row statuses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EventKind {
    #[serde(rename = "moved")]
    Moved,
    #[serde(rename = "doors_open")]
    DoorsOpened,
    #[serde(rename = "doors_closed")]
    DoorsClosed,
}

/// Record of one completed transition. Created when the transition
/// succeeds, handed to the sink and forgotten; the car keeps no
/// reference to past events.
///
/// Row layout: `elevator_id, initial_floor, target_floor, status, timestamp`.
/// Door events carry `initial_floor == target_floor`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionEvent {
    pub elevator_id: usize,
    pub initial_floor: u8,
    pub target_floor: u8,
    #[serde(rename = "status")]
    pub kind: EventKind,
    pub timestamp: DateTime<Local>,
}

impl TransitionEvent {
    /// Stamps the event with the current local time.
    pub fn new(
        elevator_id: usize,
        initial_floor: u8,
        target_floor: u8,
        kind: EventKind,
    ) -> TransitionEvent {
        TransitionEvent {
            elevator_id,
            initial_floor,
            target_floor,
            kind,
            timestamp: Local::now(),
        }
    }
}
