//! Label generation pipeline with explicit stages.
//!
//! 1. **Load**: read the CSV table
//! 2. **Validate**: run the row rules over every row
//! 3. **Derive**: build a label record per row
//! 4. **Output**: render and write one SVG per record
//! 5. **Archive**: package the written labels
//!
//! Every row is validated and derived before the first document is opened,
//! so a data error leaves no partial output behind.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use bbfacts_ingest::{CsvTable, read_csv_table};
use bbfacts_model::{LabelOptions, LabelRecord};
use bbfacts_report::{DirectorySink, WrittenLabel, archive_labels, write_labels};
use bbfacts_transform::derive_records;
use bbfacts_validate::{ValidationSummary, validate_table};

/// Settings for one `generate` run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub input_csv: PathBuf,
    pub output_dir: PathBuf,
    /// `None` skips archiving.
    pub archive_name: Option<String>,
    /// Validate and derive without writing anything.
    pub dry_run: bool,
    pub label_options: LabelOptions,
}

/// Per-label line of the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSummary {
    pub row: usize,
    pub company_name: String,
    pub plan_name: String,
    pub monthly_price: String,
    /// Written document name; `None` on a dry run.
    pub file: Option<String>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub input_csv: PathBuf,
    pub output_dir: PathBuf,
    pub labels: Vec<LabelSummary>,
    pub archive: Option<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub input_csv: PathBuf,
    pub columns: usize,
    pub rows_checked: usize,
}

// ============================================================================
// Stages
// ============================================================================

pub fn load(path: &Path) -> Result<CsvTable> {
    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();
    let table = read_csv_table(path)?;
    info!(
        columns = table.headers.len(),
        rows = table.rows.len(),
        "csv loaded"
    );
    Ok(table)
}

/// Run the row rules. A failing row surfaces as a `RowError` inside the
/// returned error.
pub fn validate(table: &CsvTable) -> Result<ValidationSummary> {
    let span = info_span!("validate", rows = table.rows.len());
    let _guard = span.enter();
    Ok(validate_table(table)?)
}

pub fn derive(table: &CsvTable, options: &LabelOptions) -> Result<Vec<LabelRecord>> {
    Ok(derive_records(table, options)?)
}

/// Render and write every record into `output_dir`.
pub fn output(
    records: &[LabelRecord],
    output_dir: &Path,
    options: &LabelOptions,
) -> Result<Vec<WrittenLabel>> {
    let mut sink = DirectorySink::create(output_dir)?;
    write_labels(records, options, &mut sink)
        .with_context(|| format!("write labels to {}", output_dir.display()))
}

// ============================================================================
// Commands
// ============================================================================

pub fn run_generate(config: &GenerateConfig) -> Result<GenerateResult> {
    let start = Instant::now();
    let table = load(&config.input_csv)?;
    validate(&table)?;
    let records = derive(&table, &config.label_options)?;

    let mut labels: Vec<LabelSummary> = records.iter().map(label_summary).collect();
    let mut archive = None;
    if config.dry_run {
        info!(records = records.len(), "dry run, nothing written");
    } else if records.is_empty() {
        warn!(path = %config.input_csv.display(), "no data rows, nothing written");
    } else {
        let written = output(&records, &config.output_dir, &config.label_options)?;
        for (summary, label) in labels.iter_mut().zip(&written) {
            summary.file = Some(label.name.clone());
            summary.height = Some(label.height);
        }
        if let Some(name) = &config.archive_name {
            archive = Some(archive_labels(&config.output_dir, name, &written)?);
        }
    }

    info!(
        labels = labels.len(),
        duration_ms = start.elapsed().as_millis(),
        "generate complete"
    );
    Ok(GenerateResult {
        input_csv: config.input_csv.clone(),
        output_dir: config.output_dir.clone(),
        labels,
        archive,
        dry_run: config.dry_run,
    })
}

pub fn run_check(input_csv: &Path) -> Result<CheckResult> {
    let table = load(input_csv)?;
    let summary = validate(&table)?;
    Ok(CheckResult {
        input_csv: input_csv.to_path_buf(),
        columns: table.headers.len(),
        rows_checked: summary.rows_checked,
    })
}

fn label_summary(record: &LabelRecord) -> LabelSummary {
    LabelSummary {
        row: record.row,
        company_name: record.company_name.clone(),
        plan_name: record.plan_name.clone(),
        monthly_price: record.monthly_price.clone(),
        file: None,
        height: None,
    }
}
