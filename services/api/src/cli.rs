use crate::demo::{run_demo, run_take, DemoArgs, TakeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use career_compass::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Career Compass",
    about = "Run the career guidance service or take assessments from the command line",
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
    /// Run all three assessments with scripted answers, then search colleges
    Demo(DemoArgs),
    /// Take one assessment interactively in the terminal
    Take(TakeArgs),
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
        Command::Demo(args) => run_demo(args),
        Command::Take(args) => run_take(args),
    }
}
