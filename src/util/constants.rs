pub const DEFAULT_NUM_CARS: usize = 3;
pub const DEFAULT_NUM_FLOORS: u8 = 10;

pub const JOURNAL_FILE: &str = "elevator_events.jsonl";
