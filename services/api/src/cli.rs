use crate::demo::{run_demo, run_fleet_scan, run_fleet_status, DemoArgs, FleetArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taller_itv::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Taller ITV",
    about = "Track vehicle inspection due dates and dispatch preventive reminders",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect a fleet export from the command line
    Itv {
        #[command(subcommand)]
        command: ItvCommand,
    },
    /// Walk through every inspection state with a synthetic fleet
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ItvCommand {
    /// Print the inspection status of every vehicle in the export
    Status(FleetArgs),
    /// Run an alert scan over the export and print the alerts it raises
    Scan(FleetArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the in-memory fleet from a CSV or JSON backup export
    #[arg(long)]
    pub(crate) fleet: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Itv {
            command: ItvCommand::Status(args),
        } => run_fleet_status(args),
        Command::Itv {
            command: ItvCommand::Scan(args),
        } => run_fleet_scan(args),
        Command::Demo(args) => run_demo(args),
    }
}
