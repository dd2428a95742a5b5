use crate::errors::AppError;
use crate::logging::Reporter;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in HTML wrapper; `{content}` and `{generated_at}` are substituted.
pub const DEFAULT_REPORT_TEMPLATE: &str = include_str!("../../assets/report-template.html");

/// Writes review markup into numbered HTML files (`1.html`, `2.html`, ...).
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    output_dir: PathBuf,
    template: String,
}

impl HtmlRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            template: DEFAULT_REPORT_TEMPLATE.to_string(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Writes `content` to the next numbered file and returns its path.
    pub fn render(&self, content: &str) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            AppError::IO(
                format!("creating report directory {}", self.output_dir.display()),
                e,
            )
        })?;

        let number = next_file_number(&self.output_dir)?;
        let output_file = self.output_dir.join(format!("{}.html", number));

        let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let html = self
            .template
            .replace("{generated_at}", &generated_at)
            .replace("{content}", content);

        fs::write(&output_file, html).map_err(|e| {
            AppError::IO(format!("writing report {}", output_file.display()), e)
        })?;

        tracing::info!("Review saved to {}", output_file.display());
        Ok(output_file)
    }
}

/// Highest numeric `*.html` stem in `dir` plus one, or 1 when there is none.
/// Gaps are not reused; non-numeric names are ignored.
pub fn next_file_number(dir: &Path) -> Result<u64, AppError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(1),
        Err(e) => return Err(AppError::IO(format!("reading {}", dir.display()), e)),
    };

    let highest = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("html"))
        .filter_map(|path| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u64>().ok())
        })
        .max();

    Ok(highest.map_or(1, |n| n + 1))
}

/// Opens a written report in the default browser. Failures are only reported.
pub fn open_in_browser(file_path: &Path, reporter: &Reporter) {
    if !file_path.exists() {
        reporter.report(format!("Error: File {} does not exist", file_path.display()));
        return;
    }

    let abs_path = fs::canonicalize(file_path).unwrap_or_else(|_| file_path.to_path_buf());
    let url = file_url(&abs_path);

    match webbrowser::open(&url) {
        Ok(()) => reporter.report(format!("Opened in browser: {}", url)),
        Err(e) => {
            tracing::warn!("Error opening browser: {}", e);
            reporter.report(format!("Error opening browser: {}", e));
            reporter.report(format!("Try opening this URL manually: {}", url));
        }
    }
}

/// `file://` URL for an absolute path, with Windows separators normalized.
pub fn file_url(abs_path: &Path) -> String {
    let raw = abs_path.to_string_lossy().replace('\\', "/").replace(' ', "%20");
    let raw = raw.strip_prefix("//?/").unwrap_or(&raw);
    if raw.starts_with('/') {
        format!("file://{}", raw)
    } else {
        format!("file:///{}", raw)
    }
}
