//! Review pipeline: validates the repository, extracts the patch, builds
//! the prompt and asks the language model for a review.

pub mod output;

use crate::{
    ai::{build_review_prompt, ReviewClient},
    config::DEFAULT_REVIEW_PROMPT,
    errors::AppError,
    git::{self, GitBackend},
    logging::{OperationTimer, Reporter},
    types::{git::DiffRange, review::ReviewOutcome},
};
pub use output::{open_in_browser, HtmlRenderer};
use std::path::{Path, PathBuf};

pub const NO_CHANGES_MESSAGE: &str = "No changes found in the last commit";
pub const NO_REVIEW_MESSAGE: &str = "Error: Could not get AI review response";
pub const BRANCH_SETUP_FAILED_MESSAGE: &str = "Error: Failed to setup git branch";

/// Result of [`ReviewPipeline::run_code_review`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReviewRun {
    pub outcome: ReviewOutcome,
    /// Written HTML report, present only for successful reviews.
    pub report: Option<PathBuf>,
}

pub struct ReviewPipeline {
    git: Box<dyn GitBackend>,
    client: Box<dyn ReviewClient>,
    reporter: Reporter,
    prompt_template: String,
    language: String,
}

impl ReviewPipeline {
    pub fn new(git: Box<dyn GitBackend>, client: Box<dyn ReviewClient>, reporter: Reporter) -> Self {
        Self {
            git,
            client,
            reporter,
            prompt_template: DEFAULT_REVIEW_PROMPT.to_string(),
            language: "English".to_string(),
        }
    }

    pub fn with_prompt(mut self, template: &str, language: &str) -> Self {
        self.prompt_template = template.to_string();
        self.language = language.to_string();
        self
    }

    /// Pull, checkout `branch_name`, pull again. Stops at the first failing step.
    pub fn setup_git_branch(&self, repo_path: &Path, branch_name: &str) -> bool {
        if branch_name.trim().is_empty() {
            self.reporter.report("Error: Branch name is not specified");
            return false;
        }

        let git = self.git.as_ref();
        git::pull_branch(git, repo_path, &self.reporter)
            && git::checkout_branch(git, repo_path, branch_name, &self.reporter)
            && git::pull_branch(git, repo_path, &self.reporter)
    }

    /// Reviews the head commit of `repo_path`.
    pub async fn review_last_commit(&self, repo_path: &Path) -> Result<ReviewOutcome, AppError> {
        self.review(repo_path, &DiffRange::LastCommit).await
    }

    /// Reviews an explicit range. Supporting context still comes from the
    /// files changed by head.
    pub async fn review_range(&self, repo_path: &Path, range: &DiffRange) -> Result<ReviewOutcome, AppError> {
        self.review(repo_path, range).await
    }

    async fn review(&self, repo_path: &Path, range: &DiffRange) -> Result<ReviewOutcome, AppError> {
        let git = self.git.as_ref();
        let target = match range {
            DiffRange::LastCommit => "last commit".to_string(),
            DiffRange::Between { from, to } => format!("{}..{}", from, to),
        };
        self.reporter.report(format!(
            "Starting review of {} in repository: {}",
            target,
            repo_path.display()
        ));

        if !git.path_exists(repo_path) {
            return Ok(self.fail(format!("Error: Path {} does not exist", repo_path.display())));
        }

        if !git::is_repository(git, repo_path) {
            return Ok(self.fail(format!("Error: {} is not a git repository", repo_path.display())));
        }

        self.reporter.report("Getting commit changes...");
        let changes = git::range_patch(git, repo_path, range)?;
        if changes.trim().is_empty() {
            let message = match range {
                DiffRange::LastCommit => NO_CHANGES_MESSAGE.to_string(),
                DiffRange::Between { from, to } => format!("No changes found in {}..{}", from, to),
            };
            self.reporter.report(&message);
            return Ok(ReviewOutcome::NoChanges(message));
        }

        self.reporter.report("Preparing review prompt...");
        let prompt = build_review_prompt(&self.prompt_template, &changes, &self.language);

        let supporting_file = self.supporting_file(repo_path)?;

        self.reporter.report("Requesting AI review...");
        let timer = OperationTimer::new("ai_review");
        let response = self.client.review(&prompt, supporting_file.as_deref()).await;
        timer.finish();

        match response {
            Ok(review) if !review.trim().is_empty() => {
                self.reporter.report("Successfully received AI review");
                Ok(ReviewOutcome::Review(review))
            }
            Ok(_) => Ok(self.fail(NO_REVIEW_MESSAGE.to_string())),
            Err(e) => {
                tracing::warn!("AI review failed: {}", e);
                Ok(self.fail(NO_REVIEW_MESSAGE.to_string()))
            }
        }
    }

    /// `<repo>/<first changed file>`, or `None` when head changes nothing.
    fn supporting_file(&self, repo_path: &Path) -> Result<Option<PathBuf>, AppError> {
        let files = git::list_changed_files(self.git.as_ref(), repo_path)?;
        let base = repo_path.to_string_lossy();

        for file in &files {
            self.reporter.report(format!("Changed file: {}/{}", base, file));
        }

        Ok(files.first().map(|first| {
            let path = PathBuf::from(format!("{}/{}", base, first));
            self.reporter
                .report(format!("Using file context from: {}", path.display()));
            path
        }))
    }

    /// Optional branch setup, review, then HTML report and browser.
    pub async fn run_code_review(
        &self,
        repo_path: &Path,
        branch_name: Option<&str>,
        range: &DiffRange,
        renderer: &HtmlRenderer,
        open_report: bool,
    ) -> Result<CodeReviewRun, AppError> {
        self.reporter.report(format!(
            "Starting code review process for repository: {}",
            repo_path.display()
        ));

        if let Some(branch) = branch_name {
            if !self.setup_git_branch(repo_path, branch) {
                return Ok(CodeReviewRun {
                    outcome: self.fail(BRANCH_SETUP_FAILED_MESSAGE.to_string()),
                    report: None,
                });
            }
        }

        let outcome = self.review(repo_path, range).await?;
        if !outcome.is_review() {
            return Ok(CodeReviewRun {
                outcome,
                report: None,
            });
        }

        self.reporter.report("Saving review to HTML file...");
        let report = renderer.render(outcome.message())?;
        self.reporter
            .report(format!("Review saved to: {}", report.display()));

        if open_report {
            self.reporter.report("Opening review in browser...");
            open_in_browser(&report, &self.reporter);
        }

        self.reporter.report("Code review process completed successfully");
        Ok(CodeReviewRun {
            outcome,
            report: Some(report),
        })
    }

    fn fail(&self, message: String) -> ReviewOutcome {
        self.reporter.report(&message);
        ReviewOutcome::Failed(message)
    }
}
