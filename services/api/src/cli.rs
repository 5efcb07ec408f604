use crate::demo::{run_demo, run_national_report, DemoArgs, NationalReportArgs};
use crate::server;
use aqarna::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Aqarna Portal",
    about = "Run the owners'-association portal service and its reporting tools",
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
    /// Work with the authority's national indicator dataset
    National {
        #[command(subcommand)]
        command: NationalCommand,
    },
    /// Run an end-to-end CLI demo covering billing, risk, and objections
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum NationalCommand {
    /// Aggregate the quarter's readings and print the KPI roll-up
    Report(NationalReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::National {
            command: NationalCommand::Report(args),
        } => run_national_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
