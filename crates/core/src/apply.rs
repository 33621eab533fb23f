use crate::planner::SortPlan;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceMode {
    Copy,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Stored,
    SkippedExisting,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApplyResult {
    pub stored: usize,
    pub skipped_existing: usize,
    pub outcomes: Vec<Placement>,
}

pub fn apply_plan(plan: &SortPlan, mode: PlaceMode) -> Result<ApplyResult> {
    let mut result = ApplyResult::default();

    for candidate in &plan.candidates {
        let placement = place_file(&candidate.source, &candidate.destination, mode)?;
        match placement {
            Placement::Stored => result.stored += 1,
            Placement::SkippedExisting => result.skipped_existing += 1,
        }
        result.outcomes.push(placement);
    }

    Ok(result)
}

pub fn place_file(source: &Path, destination: &Path, mode: PlaceMode) -> Result<Placement> {
    if destination.is_file() {
        return Ok(Placement::SkippedExisting);
    }

    match mode {
        PlaceMode::Copy => {
            fs::copy(source, destination).with_context(|| {
                format!(
                    "could not copy {} to {}",
                    source.display(),
                    destination.display()
                )
            })?;
        }
        PlaceMode::Move => move_file(source, destination)?,
    }

    Ok(Placement::Stored)
}

fn move_file(source: &Path, destination: &Path) -> Result<()> {
    if fs::rename(source, destination).is_ok() {
        return Ok(());
    }

    // Rename does not cross filesystems; fall back to copy + remove.
    fs::copy(source, destination).with_context(|| {
        format!(
            "could not move {} to {}",
            source.display(),
            destination.display()
        )
    })?;
    fs::remove_file(source)
        .with_context(|| format!("could not remove {} after moving", source.display()))?;
    Ok(())
}
