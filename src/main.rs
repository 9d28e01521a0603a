use std::env;
use std::fs::OpenOptions;
use std::io::{self, BufRead};
use std::process;
use std::sync::Arc;
use std::thread::spawn;

use crossbeam_channel as cbc;

use elevator::event::sink::ChannelSink;
use elevator::event::transition::TransitionEvent;
use elevator::fleet::controller::{Command, FleetController};
use elevator::recorder::journal;
use elevator::util::constants::{DEFAULT_NUM_CARS, DEFAULT_NUM_FLOORS, JOURNAL_FILE};

enum Input {
    Command(Command),
    Status,
    Quit,
}

fn parse_line(line: &str) -> Option<Input> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["move", car, floor] => Some(Input::Command(Command::MoveCar {
            car_index: car.parse().ok()?,
            target_floor: floor.parse().ok()?,
        })),
        ["open", car] => Some(Input::Command(Command::OpenDoors {
            car_index: car.parse().ok()?,
        })),
        ["close", car] => Some(Input::Command(Command::CloseDoors {
            car_index: car.parse().ok()?,
        })),
        ["status"] => Some(Input::Status),
        ["quit"] | ["exit"] => Some(Input::Quit),
        _ => None,
    }
}

fn print_help() {
    println!("Commands: move <car> <floor> | open <car> | close <car> | status | quit");
}

fn main() -> io::Result<()> {
    // Fleet dimensions: either from the command line, or the defaults
    let args: Vec<String> = env::args().collect();
    let car_count: usize = args
        .get(1)
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_NUM_CARS);
    let floor_count: u8 = args
        .get(2)
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_NUM_FLOORS);

    // The journal consumer: drains the event channel into a JSON-lines file
    let journal_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(JOURNAL_FILE)?;
    let (event_tx, event_rx) = cbc::unbounded::<TransitionEvent>();
    spawn(move || {
        journal::run(event_rx, journal_file);
    });

    let fleet = match FleetController::new(car_count, floor_count, Arc::new(ChannelSink::new(event_tx)))
    {
        Ok(fleet) => fleet,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    println!(
        "Fleet started: {} cars, serviceable floors 0..={}",
        fleet.car_count(),
        floor_count
    );
    print_help();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match parse_line(&line?) {
            Some(Input::Command(cmd)) => match fleet.dispatch(cmd) {
                Ok(outcome) => println!("{:?}", outcome),
                Err(e) => println!("{}", e),
            },
            Some(Input::Status) => {
                for status in fleet.snapshot() {
                    println!(
                        "Car {} is on floor {} with doors {:?}",
                        status.id, status.current_floor, status.door_state
                    );
                }
            }
            Some(Input::Quit) => break,
            None => print_help(),
        }
    }
    Ok(())
}
