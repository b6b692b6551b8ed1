use crate::commands::{
    run_catalog, run_classify, run_compensation, run_delete, run_doses, run_evaluate, run_import,
    run_record, ClassifyArgs, CompensationArgs, DeleteArgs, DosesArgs, EvaluateArgs, ImportArgs,
    RecordArgs,
};
use crate::infra::build_scheduler;
use clap::{Parser, Subcommand};
use vaxkeeper::config::AppConfig;
use vaxkeeper::error::AppError;
use vaxkeeper::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "vaxkeeper",
    about = "Check and record child vaccinations from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every vaccine in the catalog with doses, spacing, and restrictions
    Catalog,
    /// Compute a child's exact age and age category
    Classify(ClassifyArgs),
    /// List catch-up vaccines available at a given age in months
    Compensation(CompensationArgs),
    /// Show the dose sequence for a vaccine
    Doses(DosesArgs),
    /// Report interval and restriction verdicts for a candidate dose
    Evaluate(EvaluateArgs),
    /// Record a dose in a child file
    Record(RecordArgs),
    /// Delete a recorded dose from a child file
    Delete(DeleteArgs),
    /// Import historical doses from a CSV register into a child file
    Import(ImportArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let scheduler = build_scheduler(&config)?;

    match cli.command {
        Command::Catalog => run_catalog(&scheduler),
        Command::Classify(args) => run_classify(&scheduler, args),
        Command::Compensation(args) => run_compensation(&scheduler, args),
        Command::Doses(args) => run_doses(&scheduler, args),
        Command::Evaluate(args) => run_evaluate(&scheduler, args),
        Command::Record(args) => run_record(&scheduler, args),
        Command::Delete(args) => run_delete(&scheduler, args),
        Command::Import(args) => run_import(&scheduler, args),
    }
}
