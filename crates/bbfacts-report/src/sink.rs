//! Document sinks: where rendered labels are written.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use bbfacts_model::{LabelOptions, LabelRecord};

use crate::label_svg::render_label;

/// Destination for rendered label documents.
pub trait DocumentSink {
    type Output: Write;

    /// Open the output for the document at `index` (0-based data row index).
    /// Returns the document name and its writer.
    fn open(&mut self, index: usize) -> Result<(String, Self::Output)>;
}

/// Writes `label_<index>.svg` files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Use `dir` as the output directory, creating it if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(index: usize) -> String {
        format!("label_{index}.svg")
    }
}

impl DocumentSink for DirectorySink {
    type Output = BufWriter<File>;

    fn open(&mut self, index: usize) -> Result<(String, Self::Output)> {
        let name = Self::file_name(index);
        let path = self.dir.join(&name);
        let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
        Ok((name, BufWriter::new(file)))
    }
}

/// A label that has been written to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenLabel {
    pub index: usize,
    pub row: usize,
    pub name: String,
    pub height: u32,
}

/// Render and write every record, one sink output per record.
///
/// Each output is flushed and closed before the next is opened.
pub fn write_labels<S: DocumentSink>(
    records: &[LabelRecord],
    options: &LabelOptions,
    sink: &mut S,
) -> Result<Vec<WrittenLabel>> {
    let span = info_span!("write_labels", count = records.len());
    let _guard = span.enter();
    let start = Instant::now();
    let mut written = Vec::with_capacity(records.len());
    for record in records {
        let index = record.data_index();
        let label = render_label(record, options)?;
        let (name, mut output) = sink.open(index)?;
        output
            .write_all(&label.svg)
            .and_then(|()| output.flush())
            .with_context(|| format!("write {name}"))?;
        drop(output);
        debug!(index, row = record.row, %name, height = label.height, "wrote label");
        written.push(WrittenLabel {
            index,
            row: record.row,
            name,
            height: label.height,
        });
    }
    info!(
        labels = written.len(),
        duration_ms = start.elapsed().as_millis(),
        "labels written"
    );
    Ok(written)
}
