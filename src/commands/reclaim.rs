//! The interactive reclaim flow.
//!
//! Sequences distribution selection, optional analysis, optional trim, and
//! finally compaction. Every cancellation point sits strictly before the
//! first destructive external call.

use anyhow::Result;
use humansize::{format_size, BINARY};
use std::path::Path;

use crate::analyze::{self, AnalyzeOptions, DuProbe};
use crate::cli::Cli;
use crate::config::Config;
use crate::distro::{self, Distribution};
use crate::error::ReclaimError;
use crate::{compact, prompt, trim};

/// Run the reclaim flow.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let distros = distro::enumerate()?;
    let Some(selected) = select_distribution(cli, &distros)? else {
        println!("Aborted.");
        return Ok(());
    };
    println!("Selected distribution: {}", selected.name);

    // Fatal precondition: the registry entry may outlive the actual storage
    let storage = distro::to_unix_path(&selected.base_path)?;
    if !storage.exists() {
        return Err(ReclaimError::StoragePathMissing {
            name: selected.name.clone(),
            path: storage,
        }
        .into());
    }

    if prompt::confirm("Analyze disk usage first?")? {
        // The root filesystem scan uses its own, higher threshold unless one
        // was given explicitly.
        let root_threshold = cli.threshold.unwrap_or(config.analyze.root_threshold_mb);
        run_analysis(cli, config, &selected, Path::new("/"), root_threshold)?;

        if prompt::confirm("Analyze /home in more detail?")? {
            let home_threshold = cli.threshold.unwrap_or(config.analyze.threshold_mb);
            run_analysis(cli, config, &selected, Path::new("/home"), home_threshold)?;
        }
    }

    if prompt::confirm("Report the largest installed packages?")? {
        let capability = analyze::detect_capability();
        let report = analyze::report(capability.as_deref(), config.packages.top_n);
        analyze::print_report(&report);
    }

    if config.compact.trim_first && prompt::confirm("Trim the filesystem before compaction?")? {
        if let Err(e) = trim::run_trim(&selected.name) {
            tracing::warn!(error = %e, "trim failed, continuing to compaction");
            eprintln!("Warning: trim failed ({}), continuing anyway.", e);
        }
    }

    let image_windows = selected.disk_image_path();
    let image_unix = distro::to_unix_path(&image_windows)?;
    if !image_unix.exists() {
        return Err(ReclaimError::DiskImageMissing(image_unix).into());
    }

    if !compact::is_elevated()? {
        return Err(ReclaimError::ElevationRequired.into());
    }

    let size_before = image_size(&image_unix)?;
    println!(
        "Disk image: {} ({})",
        image_windows,
        format_size(size_before, BINARY)
    );

    if !prompt::confirm("Compact the disk image now? All running distributions will be stopped.")? {
        println!("Aborted.");
        return Ok(());
    }

    compact::shutdown_wsl()?;
    compact::compact(&image_windows)?;

    let size_after = image_size(&image_unix)?;
    let reclaimed = size_before.saturating_sub(size_after);
    println!(
        "Done. {} -> {}, reclaimed {}.",
        format_size(size_before, BINARY),
        format_size(size_after, BINARY),
        format_size(reclaimed, BINARY)
    );

    Ok(())
}

/// Pick the distribution to work on, either from `--distro` or interactively.
/// Returns `None` when the user cancels the menu.
fn select_distribution(cli: &Cli, distros: &[Distribution]) -> Result<Option<Distribution>> {
    if let Some(name) = &cli.distro {
        let found = distros
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| ReclaimError::UnknownDistribution(name.clone()))?;
        return Ok(Some(found));
    }

    let current = distro::current_distro();
    let items: Vec<String> = distros
        .iter()
        .map(|d| match &current {
            Some(c) if c == &d.name => format!("{} (current)", d.name),
            _ => d.name.clone(),
        })
        .collect();

    let choice = prompt::select("Select a distribution", &items)?;
    Ok(choice.map(|i| distros[i].clone()))
}

fn run_analysis(
    cli: &Cli,
    config: &Config,
    selected: &Distribution,
    root: &Path,
    threshold_mb: u64,
) -> Result<()> {
    let options = AnalyzeOptions::new()
        .with_threshold_mb(threshold_mb)
        .with_max_depth(config.analyze.max_depth)
        .with_excludes(config.analyze.exclude_paths.clone());

    let probe = match distro::current_distro() {
        Some(current) if current == selected.name => DuProbe::new(),
        _ => DuProbe::for_distro(&selected.name),
    };

    println!(
        "Scanning {} (directories over {} MB, this can take a while)...",
        root.display(),
        threshold_mb
    );
    let lines = analyze::analyze(&probe, root, &options);

    if lines.is_empty() {
        println!("No directories above the threshold.");
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        print!("{}", analyze::render_report(&lines, !cli.quiet));
    }
    Ok(())
}

fn image_size(path: &Path) -> Result<u64> {
    let metadata = std::fs::metadata(path).map_err(|e| ReclaimError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(metadata.len())
}
