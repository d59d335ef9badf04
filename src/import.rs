//! Batch import of fiche documents from the staging directory.
//!
//! The staging directory is the inbox: every matching fiche in it is
//! extracted and saved, then moved to the archive directory so the next run
//! starts clean. A fiche that fails extraction stays in staging and is
//! reported; it never stops the rest of the batch. A staging directory that
//! does not exist is reported the same way, as the batch's one failure.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::db;
use crate::extract::{self, ExtractError, Extraction};
use crate::store;

/// One fiche that could not be extracted.
#[derive(Debug)]
pub struct BatchFailure {
    pub file: String,
    pub error: ExtractError,
}

/// Outcome of extracting a staging directory, before anything is persisted.
#[derive(Debug)]
pub struct BatchReport {
    pub imported: Vec<(Extraction, PathBuf)>,
    pub failed: Vec<BatchFailure>,
}

/// Lists the fiches waiting in `dir`, sorted by file name. Only direct
/// children matching the include globs count; Word lock files (`~` prefix)
/// are skipped.
pub fn scan_staging(dir: &Path, include_globs: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("staging directory does not exist: {}", dir.display());
    }
    let include = build_globset(include_globs)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('~') {
            continue;
        }
        if !include.is_match(&name) {
            continue;
        }
        files.push(entry.into_path());
    }

    // Sort for deterministic ordering
    files.sort();
    Ok(files)
}

/// Extracts every fiche in `dir` without touching the database or moving
/// files. Failures are collected per file, never propagated; a missing
/// directory lands on the failure list as its own entry so the batch still
/// reports through the usual counters.
pub fn extract_batch(dir: &Path, include_globs: &[String]) -> Result<BatchReport> {
    let mut report = BatchReport {
        imported: Vec::new(),
        failed: Vec::new(),
    };
    if !dir.is_dir() {
        report.failed.push(BatchFailure {
            file: dir.display().to_string(),
            error: ExtractError::DocumentUnreadable(
                "staging directory does not exist".to_string(),
            ),
        });
        return Ok(report);
    }
    for path in scan_staging(dir, include_globs)? {
        match extract::from_file(&path) {
            Ok(extraction) => report.imported.push((extraction, path)),
            Err(error) => report.failed.push(BatchFailure {
                file: file_name(&path),
                error,
            }),
        }
    }
    Ok(report)
}

pub async fn run_import(
    config: &Config,
    dir: Option<PathBuf>,
    dry_run: bool,
    keep: bool,
) -> Result<()> {
    let staging = dir.unwrap_or_else(|| config.import.staging.clone());
    let report = extract_batch(&staging, &config.import.include_globs)?;
    let found = report.imported.len() + report.failed.len();

    if dry_run {
        println!("import {} (dry-run)", staging.display());
        for (extraction, path) in &report.imported {
            println!(
                "  would import {} ({}) from {}",
                extraction.plant.name,
                extraction.plant.kind().label(),
                file_name(path)
            );
        }
        for failure in &report.failed {
            println!("  would fail {}: {}", failure.file, failure.error);
        }
        println!("  fiches found: {}", found);
        println!("  would import: {}", report.imported.len());
        println!("  would fail: {}", report.failed.len());
        return Ok(());
    }

    let archive = config.import.archive_for(&staging);
    if !keep && !report.imported.is_empty() {
        if archive == staging {
            bail!("archive directory must differ from the scanned directory");
        }
        std::fs::create_dir_all(&archive)
            .with_context(|| format!("failed to create archive directory {}", archive.display()))?;
    }

    let pool = db::connect(config).await?;

    println!("import {}", staging.display());
    let mut imported = 0u64;
    for (extraction, path) in report.imported {
        let file = file_name(&path);
        for warning in &extraction.warnings {
            eprintln!("  warning ({}): {}", file, warning);
        }
        // Persist before moving on so a crash mid-batch loses nothing
        // already reported as imported.
        let mut plant = extraction.plant;
        let id = store::save_plant(&pool, &mut plant).await?;
        println!(
            "  imported {} ({}) [id {}] from {}",
            plant.name,
            plant.kind().label(),
            id,
            file
        );
        if !keep {
            let dest = archive.join(&file);
            std::fs::rename(&path, &dest)
                .with_context(|| format!("failed to archive {} to {}", file, dest.display()))?;
        }
        imported += 1;
    }
    for failure in &report.failed {
        eprintln!("  failed {}: {}", failure.file, failure.error);
    }

    println!("  fiches found: {}", found);
    println!("  imported: {}", imported);
    println!("  failed: {}", report.failed.len());
    println!("ok");

    pool.close().await;
    Ok(())
}

/// Imports a single fiche, wherever it lives. The file is not moved.
pub async fn run_add(config: &Config, file: &Path) -> Result<()> {
    let extraction = match extract::from_file(file) {
        Ok(extraction) => extraction,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    for warning in &extraction.warnings {
        eprintln!("warning: {}", warning);
    }

    let pool = db::connect(config).await?;
    let mut plant = extraction.plant;
    let id = store::save_plant(&pool, &mut plant).await?;
    println!("imported {} ({}) [id {}]", plant.name, plant.kind().label(), id);

    pool.close().await;
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
