use crate::demo::{
    run_demo, run_gaps, run_rank, run_recommend, run_templates, CollectionArgs, TemplateArgs,
    TemplatesArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use precon_synergy::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "precon-synergy",
    about = "Score card collections against Commander precon templates and suggest upgrades",
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
    /// List catalog templates, optionally filtered by theme or search text
    Templates(TemplatesArgs),
    /// Rank catalog templates by fit with a collection file
    Rank(CollectionArgs),
    /// Suggest acquisitions for one template
    Recommend(TemplateArgs),
    /// Show missing key pieces and theme coverage for one template
    Gaps(TemplateArgs),
    /// Run the bundled sample collection through every report
    Demo,
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
        Command::Templates(args) => run_templates(args),
        Command::Rank(args) => run_rank(args),
        Command::Recommend(args) => run_recommend(args),
        Command::Gaps(args) => run_gaps(args),
        Command::Demo => run_demo(),
    }
}
