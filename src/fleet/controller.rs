//! Fleet-level dispatcher: validates addressing, routes commands to the
//! addressed car and aggregates status.
use std::sync::{Arc, Mutex};

use serde;

use crate::event::sink::EventSink;
use crate::fsm::carfsm::{Car, CarError, DoorState, TransitionOutcome};

/// Structured request shapes accepted by the fleet. Anything reaching
/// the controller has already been parsed; raw text never gets this far.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Command {
    MoveCar { car_index: usize, target_floor: u8 },
    OpenDoors { car_index: usize },
    CloseDoors { car_index: usize },
}

/// Read-only view of one car, as returned by `snapshot`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CarStatus {
    pub id: usize,
    pub current_floor: u8,
    pub door_state: DoorState,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FleetError {
    #[error("a fleet needs at least one car, got {0}")]
    InvalidConfiguration(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("unknown car {0}")]
    UnknownCar(usize),
    #[error("command rejected: {0}")]
    Rejected(#[from] CarError),
}

/// Owns the fixed set of cars and serializes access to each one.
///
/// Every car sits behind its own lock: commands addressed to the same
/// car queue up, commands to different cars proceed independently. The
/// set of cars never changes after construction.
pub struct FleetController {
    cars: Vec<Mutex<Car>>,
}

impl FleetController {
    /// Builds `car_count` cars with ids `0..car_count`, all on floor 0
    /// with closed doors, each recording through a handle to `sink`.
    pub fn new(
        car_count: usize,
        floor_count: u8,
        sink: Arc<dyn EventSink>,
    ) -> Result<FleetController, FleetError> {
        if car_count < 1 {
            return Err(FleetError::InvalidConfiguration(car_count));
        }
        let cars = (0..car_count)
            .map(|id| Mutex::new(Car::new(id, floor_count, sink.clone())))
            .collect();
        return Ok(FleetController { cars });
    }

    pub fn car_count(&self) -> usize {
        return self.cars.len();
    }

    /// Addressing check. An out-of-range index never reaches a car.
    fn car(&self, index: usize) -> Result<&Mutex<Car>, DispatchError> {
        return self.cars.get(index).ok_or(DispatchError::UnknownCar(index));
    }

    pub fn request_floor(
        &self,
        car_index: usize,
        target_floor: u8,
    ) -> Result<TransitionOutcome, DispatchError> {
        let outcome = self.car(car_index)?.lock().unwrap().goto_floor(target_floor)?;
        return Ok(outcome);
    }

    pub fn open_doors(&self, car_index: usize) -> Result<TransitionOutcome, DispatchError> {
        return Ok(self.car(car_index)?.lock().unwrap().open_doors());
    }

    pub fn close_doors(&self, car_index: usize) -> Result<TransitionOutcome, DispatchError> {
        return Ok(self.car(car_index)?.lock().unwrap().close_doors());
    }

    /// Routes one structured command to the addressed car.
    pub fn dispatch(&self, command: Command) -> Result<TransitionOutcome, DispatchError> {
        match command {
            Command::MoveCar { car_index, target_floor } => {
                self.request_floor(car_index, target_floor)
            }
            Command::OpenDoors { car_index } => self.open_doors(car_index),
            Command::CloseDoors { car_index } => self.close_doors(car_index),
        }
    }

    /// Reads every car in index order. Each entry is internally
    /// consistent; the fleet is not frozen as a whole while reading.
    pub fn snapshot(&self) -> Vec<CarStatus> {
        return self
            .cars
            .iter()
            .map(|car| {
                let car = car.lock().unwrap();
                CarStatus {
                    id: car.id(),
                    current_floor: car.current_floor(),
                    door_state: car.door_state(),
                }
            })
            .collect();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::sink::{ChannelSink, NullSink};
    use crate::event::transition::{EventKind, TransitionEvent};
    use crate::fsm::carfsm::Direction;
    use crossbeam_channel as cbc;

    fn initialize_fleet(
        car_count: usize,
        floor_count: u8,
    ) -> (FleetController, cbc::Receiver<TransitionEvent>) {
        let (tx, rx) = cbc::unbounded::<TransitionEvent>();
        let fleet = FleetController::new(car_count, floor_count, Arc::new(ChannelSink::new(tx)))
            .unwrap();
        return (fleet, rx);
    }

    fn initial_snapshot(car_count: usize) -> Vec<CarStatus> {
        return (0..car_count)
            .map(|id| CarStatus {
                id,
                current_floor: 0,
                door_state: DoorState::Closed,
            })
            .collect();
    }

    #[test]
    fn it_refuses_an_empty_fleet() {
        let result = FleetController::new(0, 10, Arc::new(NullSink));
        assert_eq!(result.err(), Some(FleetError::InvalidConfiguration(0)));
    }

    #[test]
    fn it_moves_only_the_addressed_car() {
        let (fleet, rx) = initialize_fleet(3, 10);

        assert_eq!(
            fleet.request_floor(1, 7),
            Ok(TransitionOutcome::Moved {
                from: 0,
                to: 7,
                direction: Direction::Up
            })
        );
        assert_eq!(fleet.open_doors(1), Ok(TransitionOutcome::DoorsOpened));

        assert_eq!(
            fleet.snapshot(),
            vec![
                CarStatus { id: 0, current_floor: 0, door_state: DoorState::Closed },
                CarStatus { id: 1, current_floor: 7, door_state: DoorState::Open },
                CarStatus { id: 2, current_floor: 0, door_state: DoorState::Closed },
            ]
        );

        let moved = rx.recv().unwrap();
        assert_eq!(moved.elevator_id, 1);
        assert_eq!(moved.initial_floor, 0);
        assert_eq!(moved.target_floor, 7);
        assert_eq!(moved.kind, EventKind::Moved);
        let opened = rx.recv().unwrap();
        assert_eq!(opened.elevator_id, 1);
        assert_eq!(opened.initial_floor, 7);
        assert_eq!(opened.kind, EventKind::DoorsOpened);
        assert!(rx.is_empty());
    }

    #[test]
    fn it_rejects_an_unknown_car() {
        let (fleet, rx) = initialize_fleet(3, 10);
        assert_eq!(fleet.request_floor(5, 3), Err(DispatchError::UnknownCar(5)));
        assert_eq!(fleet.snapshot(), initial_snapshot(3));
        assert!(rx.is_empty());
    }

    #[test]
    fn it_validates_addressing_for_door_commands() {
        let (fleet, rx) = initialize_fleet(2, 10);
        assert_eq!(fleet.open_doors(7), Err(DispatchError::UnknownCar(7)));
        assert_eq!(fleet.close_doors(2), Err(DispatchError::UnknownCar(2)));
        assert!(rx.is_empty());
    }

    #[test]
    fn it_surfaces_a_car_rejection() {
        let (fleet, rx) = initialize_fleet(3, 10);
        assert_eq!(
            fleet.request_floor(0, 15),
            Err(DispatchError::Rejected(CarError::InvalidFloor {
                requested: 15,
                floor_count: 10
            }))
        );
        assert_eq!(fleet.snapshot()[0].current_floor, 0);
        assert!(rx.is_empty());
    }

    #[test]
    fn it_routes_every_command_shape() {
        let (fleet, _rx) = initialize_fleet(2, 10);
        assert_eq!(
            fleet.dispatch(Command::MoveCar { car_index: 0, target_floor: 4 }),
            Ok(TransitionOutcome::Moved {
                from: 0,
                to: 4,
                direction: Direction::Up
            })
        );
        assert_eq!(
            fleet.dispatch(Command::OpenDoors { car_index: 0 }),
            Ok(TransitionOutcome::DoorsOpened)
        );
        assert_eq!(
            fleet.dispatch(Command::CloseDoors { car_index: 0 }),
            Ok(TransitionOutcome::DoorsClosed)
        );
        assert_eq!(
            fleet.dispatch(Command::MoveCar { car_index: 9, target_floor: 1 }),
            Err(DispatchError::UnknownCar(9))
        );
    }

    #[test]
    fn it_keeps_cars_independent_across_threads() {
        use std::thread::spawn;

        let (fleet, rx) = initialize_fleet(3, 10);
        let fleet = Arc::new(fleet);
        let mut handles = Vec::new();
        for car in 0..3 {
            let fleet = fleet.clone();
            handles.push(spawn(move || {
                fleet.request_floor(car, (car as u8) + 1).unwrap();
                fleet.open_doors(car).unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = fleet.snapshot();
        for car in 0..3 {
            assert_eq!(snapshot[car].current_floor, (car as u8) + 1);
            assert_eq!(snapshot[car].door_state, DoorState::Open);
        }
        assert_eq!(rx.try_iter().count(), 6);
    }
}
