use crate::{
    ai::OpenAIClient,
    config::AppConfig,
    errors::AppError,
    git::SystemGit,
    logging::Reporter,
    review::{HtmlRenderer, ReviewPipeline},
    types::{git::DiffRange, review::ReviewOutcome},
};
use colored::Colorize;
use std::path::PathBuf;

/// Options of the `review` subcommand.
#[derive(Debug, Clone, Default)]
pub struct ReviewArgs {
    pub repo: PathBuf,
    pub branch: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub no_open: bool,
    pub range: Option<DiffRange>,
    pub language: Option<String>,
}

/// Runs the review and returns its outcome. Failures have already been
/// reported on the console when this returns.
pub async fn handle_review(config: &AppConfig, args: ReviewArgs) -> Result<ReviewOutcome, AppError> {
    let language = args
        .language
        .clone()
        .unwrap_or_else(|| config.review.language.clone());

    if config.ai.api_key.is_none() {
        tracing::warn!("No API key set; configure ai.api_key or OPENROUTER_API_KEY");
    }

    let pipeline = ReviewPipeline::new(
        Box::new(SystemGit::new()),
        Box::new(OpenAIClient::new(config.ai.clone())),
        Reporter::console(),
    )
    .with_prompt(config.review_prompt(), &language);

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.review.expanded_output_dir()));
    let renderer = HtmlRenderer::new(output_dir);
    let open_report = config.review.open_browser && !args.no_open;
    let range = args.range.clone().unwrap_or_default();

    let run = pipeline
        .run_code_review(
            &args.repo,
            args.branch.as_deref(),
            &range,
            &renderer,
            open_report,
        )
        .await?;

    if let Some(report) = &run.report {
        println!("{} {}", "Review written to".green(), report.display());
    }
    Ok(run.outcome)
}
