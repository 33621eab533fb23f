use crate::exif_reader::read_capture_timestamp;
use crate::metadata::CaptureTimestamp;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub files: Vec<PathBuf>,
    pub target_dir: PathBuf,
    pub basename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortCandidate {
    pub index: usize,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub timestamp: CaptureTimestamp,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct SortStats {
    pub requested: usize,
    pub missing_inputs: usize,
    pub collected: usize,
    pub dated: usize,
    pub undated: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortPlan {
    pub target_dir: PathBuf,
    pub basename: String,
    pub candidates: Vec<SortCandidate>,
    pub stats: SortStats,
}

pub fn generate_plan(options: &PlanOptions) -> Result<SortPlan> {
    if !options.target_dir.is_dir() {
        anyhow::bail!(
            "target directory does not exist: {}",
            options.target_dir.display()
        );
    }

    let mut stats = SortStats {
        requested: options.files.len(),
        ..SortStats::default()
    };

    let mut entries = Vec::with_capacity(options.files.len());
    for path in &options.files {
        if !path.is_file() {
            stats.missing_inputs += 1;
            continue;
        }
        let timestamp = read_capture_timestamp(path)?;
        entries.push((path.clone(), timestamp));
    }

    stats.collected = entries.len();
    stats.dated = entries.iter().filter(|(_, ts)| !ts.is_unknown()).count();
    stats.undated = stats.collected - stats.dated;

    entries.sort_by_key(|(_, ts)| ts.sort_key());

    let width = entries.len().to_string().len();
    let candidates = entries
        .into_iter()
        .enumerate()
        .map(|(index, (source, timestamp))| {
            let file_name = format!(
                "{}{:0width$}{}",
                options.basename,
                index,
                lowercased_extension(&source)
            );
            SortCandidate {
                index,
                destination: options.target_dir.join(file_name),
                source,
                timestamp,
            }
        })
        .collect();

    Ok(SortPlan {
        target_dir: options.target_dir.clone(),
        basename: options.basename.clone(),
        candidates,
        stats,
    })
}

fn lowercased_extension(path: &Path) -> String {
    path.extension()
        .map(|v| format!(".{}", v.to_string_lossy().to_ascii_lowercase()))
        .unwrap_or_default()
}
