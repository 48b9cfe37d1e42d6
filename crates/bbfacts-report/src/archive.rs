//! ZIP packaging of generated labels.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::sink::WrittenLabel;

/// Package the given labels from `dir` into `<name>.zip` inside `dir`.
///
/// Only `labels` are archived, so files left in `dir` by earlier runs are
/// never picked up. The suffix is added when `name` lacks it. Entries are
/// sorted by file name and deflate-compressed. Returns the archive path.
pub fn archive_labels(dir: &Path, name: &str, labels: &[WrittenLabel]) -> Result<PathBuf> {
    let archive_name = archive_file_name(name);
    let archive_path = dir.join(&archive_name);
    let mut entries: Vec<&str> = labels.iter().map(|label| label.name.as_str()).collect();
    entries.sort_unstable();
    entries.dedup();

    let file = File::create(&archive_path)
        .with_context(|| format!("create {}", archive_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for entry_name in &entries {
        let path = dir.join(entry_name);
        zip.start_file(*entry_name, options)
            .with_context(|| format!("add {entry_name} to {archive_name}"))?;
        let mut source = File::open(&path).with_context(|| format!("open {}", path.display()))?;
        io::copy(&mut source, &mut zip)
            .with_context(|| format!("copy {} into archive", path.display()))?;
    }
    zip.finish()
        .with_context(|| format!("finish {}", archive_path.display()))?;
    info!(
        archive = %archive_path.display(),
        entries = entries.len(),
        "labels archived"
    );
    Ok(archive_path)
}

fn archive_file_name(name: &str) -> String {
    if name.ends_with(".zip") {
        name.to_string()
    } else {
        format!("{name}.zip")
    }
}
