//! Textual command interface between a driver and the parking core.
//!
//! One command per line, whitespace separated. Menu numbers from the classic
//! console menu are accepted as aliases for the first six verbs.

use std::str::FromStr;

use serde::Serialize;

use crate::facility::{NearestSlot, StatsReport};
use crate::schedule::Interval;
use crate::storage::SlotStatus;
use crate::types::{ParkError, Result, SizeClass, SlotId};

/// Usage summary printed by the `help` command.
pub const HELP: &str = "\
commands:
  list                              show every slot (alias: slots, 1)
  park <vehicle> [<size>] <kind>    reserve slots; kind is small|medium|large|bus (alias: 2)
  leave <vehicle>                   release a vehicle's slots (alias: remove, 3)
  hops <src> <dest>                 shortest hop count between slots (alias: 4)
  path <src> <dest>                 slots along a shortest route
  nearest <from> <size>             closest free slot of a size
  schedule <e1,e2,..> <x1,x2,..>    max non-overlapping stays (alias: 5)
  stats                             occupancy summary
  help                              this text
  quit                              leave the shell (alias: exit, 6)";

/// A single request to the core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    List,
    Park {
        vehicle: String,
        size: String,
        kind: String,
    },
    Leave {
        vehicle: String,
    },
    Hops {
        src: u32,
        dest: u32,
    },
    Path {
        src: u32,
        dest: u32,
    },
    Nearest {
        from: u32,
        size: SizeClass,
    },
    Schedule {
        entries: Vec<u64>,
        exits: Vec<u64>,
    },
    Stats,
    Help,
    Quit,
}

/// Result of a successfully executed [`Command`].
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Slots {
        slots: Vec<SlotStatus>,
    },
    Parked {
        vehicle: String,
        slots: Vec<SlotId>,
    },
    Released {
        vehicle: String,
        slots: Vec<SlotId>,
    },
    Hops {
        src: u32,
        dest: u32,
        hops: u32,
    },
    Path {
        slots: Vec<SlotId>,
    },
    Nearest {
        nearest: Option<NearestSlot>,
    },
    Schedule {
        count: usize,
        chain: Vec<Interval>,
    },
    Stats {
        report: StatsReport,
    },
    Help {
        text: &'static str,
    },
    Quit,
}

impl FromStr for Command {
    type Err = ParkError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(invalid("empty command"));
        };
        let args: Vec<&str> = words.collect();
        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "slots" | "1" => {
                expect_args(&args, 0, 0)?;
                Command::List
            }
            "park" | "2" => {
                expect_args(&args, 2, 3)?;
                let kind = args[args.len() - 1];
                let size = if args.len() == 3 { args[1] } else { kind };
                Command::Park {
                    vehicle: args[0].to_string(),
                    size: size.to_string(),
                    kind: kind.to_string(),
                }
            }
            "leave" | "remove" | "3" => {
                expect_args(&args, 1, 1)?;
                Command::Leave {
                    vehicle: args[0].to_string(),
                }
            }
            "hops" | "4" => {
                expect_args(&args, 2, 2)?;
                Command::Hops {
                    src: parse_number(args[0])?,
                    dest: parse_number(args[1])?,
                }
            }
            "path" => {
                expect_args(&args, 2, 2)?;
                Command::Path {
                    src: parse_number(args[0])?,
                    dest: parse_number(args[1])?,
                }
            }
            "nearest" => {
                expect_args(&args, 2, 2)?;
                Command::Nearest {
                    from: parse_number(args[0])?,
                    size: args[1].parse()?,
                }
            }
            "schedule" | "5" => {
                expect_args(&args, 0, 2)?;
                if args.len() == 1 {
                    return Err(invalid("schedule needs both entry and exit lists"));
                }
                match args.as_slice() {
                    [entries, exits] => Command::Schedule {
                        entries: parse_list(entries)?,
                        exits: parse_list(exits)?,
                    },
                    _ => Command::Schedule {
                        entries: Vec::new(),
                        exits: Vec::new(),
                    },
                }
            }
            "stats" => {
                expect_args(&args, 0, 0)?;
                Command::Stats
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" | "6" => Command::Quit,
            other => return Err(ParkError::InvalidCommand(format!("unknown command '{other}'"))),
        };
        Ok(command)
    }
}

fn invalid(message: &str) -> ParkError {
    ParkError::InvalidCommand(message.to_string())
}

fn expect_args(args: &[&str], min: usize, max: usize) -> Result<()> {
    if args.len() < min || args.len() > max {
        return Err(ParkError::InvalidCommand(format!(
            "expected {min}..={max} arguments, got {}",
            args.len()
        )));
    }
    Ok(())
}

fn parse_number<T: FromStr>(raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| ParkError::InvalidCommand(format!("'{raw}' is not a valid number")))
}

fn parse_list(raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_number)
        .collect()
}
