//! Binary entry point for the `parkade` facility CLI.
#![forbid(unsafe_code)]

#[path = "parkade/ui.rs"]
mod ui;

use std::error::Error;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use parkade::{
    facility::{default_config_path, ConfigError, CounterMetrics, StatsReport},
    logging::init_logging,
    Facility, FacilityConfig, Outcome, ParkError,
};
use tracing::info;

use crate::ui::{Theme, Ui};

#[derive(Parser, Debug)]
#[command(
    name = "parkade",
    version,
    about = "Slot allocation, floor routing and stay scheduling for a parking facility",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "PARKADE_CONFIG",
        value_name = "FILE",
        help = "Facility layout (TOML); defaults to the user config file, then the built-in demo"
    )]
    config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for structured responses"
    )]
    format: OutputFormat,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = Theme::Auto,
        help = "Colour theme for text output"
    )]
    theme: Theme,

    #[arg(
        long,
        global = true,
        env = "PARKADE_LOG",
        default_value = "warn",
        help = "Log filter directive, e.g. `debug` or `parkade=trace`"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every slot with its occupancy.
    Slots,
    /// Shortest hop count between two slot positions (1-based).
    Hops { src: u32, dest: u32 },
    /// Slots along one shortest route between two positions (1-based).
    Path { src: u32, dest: u32 },
    /// Maximum number of non-overlapping stays.
    Schedule {
        #[arg(long, value_delimiter = ',', value_name = "T1,T2,..")]
        entries: Vec<u64>,
        #[arg(long, value_delimiter = ',', value_name = "T1,T2,..")]
        exits: Vec<u64>,
    },
    /// Occupancy summary for the configured layout.
    Stats,
    /// Interactive session reading one command per line from stdin.
    Shell,
    /// Write the demo layout as a TOML config file.
    InitConfig {
        #[arg(long, value_name = "FILE", help = "Target path (defaults to --config or the user config dir)")]
        path: Option<PathBuf>,
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    let ui = Ui::new(cli.theme);

    match cli.command {
        Command::InitConfig { path, force } => init_config(path.or(cli.config), force, &ui),
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "parkade", &mut io::stdout());
            Ok(())
        }
        command => {
            let config = load_config(cli.config.as_deref())?;
            let facility = Facility::from_config(&config)?
                .with_metrics(Arc::new(CounterMetrics::default()));
            run_query(command, &facility, cli.format, &ui)
        }
    }
}

fn run_query(
    command: Command,
    facility: &Facility,
    format: OutputFormat,
    ui: &Ui,
) -> Result<(), Box<dyn Error>> {
    let outcome = match command {
        Command::Slots => Outcome::Slots {
            slots: facility.list_slots(),
        },
        Command::Hops { src, dest } => Outcome::Hops {
            src,
            dest,
            hops: facility.shortest_hops(src, dest)?,
        },
        Command::Path { src, dest } => Outcome::Path {
            slots: facility.shortest_path(src, dest)?,
        },
        Command::Schedule { entries, exits } => {
            let chain = facility.best_schedule(&entries, &exits)?;
            Outcome::Schedule {
                count: chain.len(),
                chain,
            }
        }
        Command::Stats => {
            let report = facility.stats();
            return emit(format, &report, || print_stats(ui, &report));
        }
        Command::Shell => return run_shell(facility, format, ui),
        Command::InitConfig { .. } | Command::Completions { .. } => return Ok(()),
    };
    emit(format, &outcome, || print_outcome(ui, &outcome))
}

fn init_config(path: Option<PathBuf>, force: bool, ui: &Ui) -> Result<(), Box<dyn Error>> {
    let target = path
        .or_else(default_config_path)
        .ok_or(ConfigError::NoConfigPath)?;
    if target.exists() && !force {
        return Err(format!(
            "{} already exists; pass --force to overwrite",
            target.display()
        )
        .into());
    }
    let written = FacilityConfig::demo().persist(&target)?;
    info!(path = %written.display(), "cli.init_config.written");
    ui.success(&format!("wrote facility layout to {}", written.display()));
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<FacilityConfig, ConfigError> {
    if let Some(path) = path {
        return FacilityConfig::load(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => FacilityConfig::load(path),
        _ => Ok(FacilityConfig::demo()),
    }
}

/// Reads commands until `quit` or end of input. Command errors are reported
/// and the session continues.
fn run_shell(facility: &Facility, format: OutputFormat, ui: &Ui) -> Result<(), Box<dyn Error>> {
    let interactive = io::stdin().is_terminal();
    if interactive && format == OutputFormat::Text {
        ui.info("parkade shell; type `help` for commands");
    }
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("parkade> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let result = line
            .parse::<parkade::Command>()
            .and_then(|command| facility.execute(command));
        match result {
            Ok(Outcome::Quit) => break,
            Ok(outcome) => emit(format, &outcome, || print_outcome(ui, &outcome))?,
            Err(err) => report_error(format, ui, &err)?,
        }
    }
    Ok(())
}

fn report_error(format: OutputFormat, ui: &Ui, err: &ParkError) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({ "error": err.kind(), "message": err.to_string() });
            println!("{}", serde_json::to_string(&value)?);
        }
        OutputFormat::Text => ui.error(&err.to_string()),
    }
    Ok(())
}

fn emit<T, F>(format: OutputFormat, value: &T, printer: F) -> Result<(), Box<dyn Error>>
where
    T: serde::Serialize,
    F: FnOnce(),
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{json}");
        }
        OutputFormat::Text => printer(),
    }
    Ok(())
}

fn print_outcome(ui: &Ui, outcome: &Outcome) {
    match outcome {
        Outcome::Slots { slots } => {
            let rows: Vec<Vec<String>> = slots
                .iter()
                .map(|slot| {
                    vec![
                        slot.id.to_string(),
                        slot.size.to_string(),
                        if slot.occupied { "occupied" } else { "free" }.to_string(),
                        slot.occupant
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_default(),
                    ]
                })
                .collect();
            ui.table("Slots", &["ID", "SIZE", "STATUS", "VEHICLE"], &rows);
        }
        Outcome::Parked { vehicle, slots } => {
            ui.success(&format!("{vehicle} parked in slot(s) {}", join(slots)));
        }
        Outcome::Released { vehicle, slots } => {
            ui.success(&format!("{vehicle} left; freed slot(s) {}", join(slots)));
        }
        Outcome::Hops { src, dest, hops } => {
            ui.plain(&format!("hops {src} -> {dest}: {hops}"));
        }
        Outcome::Path { slots } => {
            let route: Vec<String> = slots.iter().map(ToString::to_string).collect();
            ui.plain(&format!("route: {}", route.join(" -> ")));
        }
        Outcome::Nearest { nearest } => match nearest {
            Some(found) => ui.plain(&format!(
                "nearest free slot: {} ({} hops)",
                found.slot, found.hops
            )),
            None => ui.info("no reachable free slot of that size"),
        },
        Outcome::Schedule { count, chain } => {
            ui.plain(&format!("max non-overlapping stays: {count}"));
            if !chain.is_empty() {
                let stays: Vec<String> = chain.iter().map(ToString::to_string).collect();
                ui.plain(&format!("  {}", stays.join(" ")));
            }
        }
        Outcome::Stats { report } => print_stats(ui, report),
        Outcome::Help { text } => ui.plain(text),
        Outcome::Quit => {}
    }
}

fn print_stats(ui: &Ui, report: &StatsReport) {
    ui.section(
        "Facility",
        [
            ("slots", report.slots),
            ("occupied", report.occupied),
            ("reservations", report.active_reservations),
            ("floor edges", report.floor_edges),
            ("bus slots", report.bus_slots),
        ],
    );
    ui.section(
        "Free by size",
        report
            .by_size
            .iter()
            .map(|s| (s.size.as_str(), format!("{}/{}", s.free, s.total))),
    );
    if let Some(counters) = &report.counters {
        ui.section(
            "Counters",
            [
                ("allocations", counters.allocations),
                ("rejected (capacity)", counters.rejected_no_capacity),
                ("rejected (other)", counters.rejected_other),
                ("releases", counters.releases),
                ("hop queries", counters.hop_queries),
                ("schedule runs", counters.schedule_runs),
            ],
        );
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
