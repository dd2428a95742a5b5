use clap::Parser;
use colored::Colorize;
use gitreview::{
    args::{Args, Command},
    config::AppConfig,
    errors::AppError,
    git::SystemGit,
    handlers::{handle_changes, handle_log, handle_review, ReviewArgs},
    logging::{init_logging, LoggingConfig},
    ReviewOutcome,
};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let logging = if args.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    if let Err(e) = init_logging(logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(args).await {
        Ok(outcome) if outcome.as_ref().is_some_and(ReviewOutcome::is_failure) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<Option<ReviewOutcome>, AppError> {
    let config = AppConfig::load()?;
    let git = SystemGit::new();

    match args.command {
        Command::Review {
            repo,
            branch,
            output_dir,
            no_open,
            range,
            language,
        } => {
            let review_args = ReviewArgs {
                repo,
                branch,
                output_dir,
                no_open,
                range,
                language,
            };
            handle_review(&config, review_args).await.map(Some)
        }
        Command::Log { repo, count } => handle_log(&config, &git, &repo, count).map(|_| None),
        Command::Changes { repo } => handle_changes(&git, &repo).map(|_| None),
    }
}
