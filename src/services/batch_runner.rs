use std::{
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{anyhow, Context};
use futures::future::join_all;
use uuid::Uuid;

use crate::{
    configuration::{PipelineSettings, SpreadsheetSettings},
    domain::{prompt_template_from_sheet, rows_from_sheet, Row},
};

use super::{ProfileGenerator, SheetStore};

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub written: usize,
    pub failed: usize,
    /// Number of rows in each window, in the order the windows ran.
    pub windows: Vec<usize>,
    pub elapsed: Duration,
}

/// One configured batch: where rows come from, how they are profiled and where results go.
pub struct BatchJob {
    pub sheets: Arc<dyn SheetStore>,
    pub generator: ProfileGenerator,
    pub pipeline: PipelineSettings,
    pub spreadsheet: SpreadsheetSettings,
}

impl BatchJob {
    pub async fn run(&self) -> anyhow::Result<BatchReport> {
        run_batch(
            self.sheets.as_ref(),
            &self.generator,
            &self.pipeline,
            &self.spreadsheet,
        )
        .await
    }
}

/// Runs `task` over `items` in windows of `window_size`. A window starts only
/// once every task of the previous one has settled.
pub async fn run_in_windows<'a, T, F, Fut, R>(
    items: &'a [T],
    window_size: usize,
    task: F,
) -> Vec<Vec<R>>
where
    F: Fn(&'a T) -> Fut,
    Fut: Future<Output = R>,
{
    let mut results = vec![];
    for window in items.chunks(window_size.max(1)) {
        results.push(join_all(window.iter().map(&task)).await);
    }
    results
}

async fn process_row(
    sheets: &dyn SheetStore,
    generator: &ProfileGenerator,
    row: &Row,
    prompt_template: &str,
    output_column: &str,
    output_sheet: &str,
) -> anyhow::Result<()> {
    let profile = generator.generate(row, prompt_template).await?;

    sheets
        .write_cell(row.row_index, output_column, &profile, output_sheet)
        .await
        .with_context(|| format!("Writing profile of row {}", row.row_index))
}

/// Reads the input and prompt sheets, profiles every company and writes each
/// result next to its row. Failed rows are logged and left unwritten.
pub async fn run_batch(
    sheets: &dyn SheetStore,
    generator: &ProfileGenerator,
    pipeline: &PipelineSettings,
    spreadsheet: &SpreadsheetSettings,
) -> anyhow::Result<BatchReport> {
    let run_id = Uuid::new_v4();
    let started = Instant::now();

    let input = sheets
        .read_sheet(&spreadsheet.input_sheet)
        .await
        .context("Reading input sheet")?;
    let prompt = sheets
        .read_sheet(&spreadsheet.prompt_sheet)
        .await
        .context("Reading prompt sheet")?;
    let prompt_template = prompt_template_from_sheet(&prompt)
        .ok_or_else(|| anyhow!("Prompt sheet {} has no template", spreadsheet.prompt_sheet))?;

    let prompt_template = prompt_template.as_str();
    let rows = rows_from_sheet(&input);
    log::info!(
        "[{}] Profiling {} rows, {} at a time",
        run_id,
        rows.len(),
        pipeline.parallelism
    );

    let outcomes = run_in_windows(&rows, pipeline.parallelism, |row| async move {
        let outcome = process_row(
            sheets,
            generator,
            row,
            prompt_template,
            &pipeline.output_column,
            &spreadsheet.output_sheet,
        )
        .await;

        match &outcome {
            Ok(()) => log::info!("[{}] Row {} written", run_id, row.row_index),
            Err(e) => log::error!(
                "[{}] Row {} ({}) failed: {:?}",
                run_id,
                row.row_index,
                row.company_name,
                e
            ),
        }
        outcome.is_ok()
    })
    .await;

    let written = outcomes.iter().flatten().filter(|ok| **ok).count();
    let report = BatchReport {
        written,
        failed: rows.len() - written,
        windows: outcomes.iter().map(Vec::len).collect(),
        elapsed: started.elapsed(),
    };

    log::info!(
        "[{}] Done in {:.1}s: {} written, {} failed",
        run_id,
        report.elapsed.as_secs_f64(),
        report.written,
        report.failed
    );

    Ok(report)
}
