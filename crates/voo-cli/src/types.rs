use std::path::PathBuf;

use serde::Serialize;
use voo_cli::pipeline::PipelineStats;
use voo_validate::Category;

#[derive(Debug, Serialize)]
pub struct RunResult {
    pub inputs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub stats: PipelineStats,
    /// Rules that flagged at least one row, in evaluation order.
    pub rules: Vec<RuleSummary>,
    pub total_flagged_rows: usize,
    pub cleaned: OutputStatus,
    pub report: OutputStatus,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.cleaned.is_failed() || self.report.is_failed()
    }
}

#[derive(Debug, Serialize)]
pub struct RuleSummary {
    pub rule: String,
    pub category: Category,
    pub rows: usize,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum OutputStatus {
    Written(PathBuf),
    Skipped(&'static str),
    Failed(String),
}

impl OutputStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
