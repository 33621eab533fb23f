use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use vphoto_sorter_core::{
    apply_plan, generate_plan, CaptureTimestamp, PlaceMode, Placement, PlanOptions, SortPlan,
};

#[derive(Debug, Parser)]
#[command(name = "vphoto-sorter-cli")]
#[command(about = "Sort vacation photos by date taken into numbered file names")]
struct Cli {
    /// Files to be sorted.
    #[arg(long, value_name = "F", num_args = 1.., required_unless_present = "list_options")]
    files: Vec<PathBuf>,

    /// Target folder to which files should be stored.
    #[arg(long, value_name = "T", required_unless_present = "list_options")]
    target: Option<PathBuf>,

    /// Basename of all sorted files ie. file names will be of the form "<B>00.jpg".
    #[arg(long, value_name = "B", default_value = "IMG-")]
    basename: String,

    /// Move files instead of copying.
    #[arg(long, default_value_t = false)]
    remove_originals: bool,

    /// Show the placement plan without touching any files.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Plan rendering used with --dry-run.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Do nothing else but print available options (intended for auto completion).
    #[arg(long, default_value_t = false)]
    list_options: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_options {
        print_options();
        return Ok(());
    }

    let Some(target_dir) = cli.target else {
        anyhow::bail!("--target is required");
    };

    let options = PlanOptions {
        files: cli.files,
        target_dir,
        basename: cli.basename,
    };

    let plan = generate_plan(&options)?;

    for candidate in &plan.candidates {
        if candidate.timestamp == CaptureTimestamp::MissingField {
            println!(
                "Failed reading creation date of {}",
                candidate.source.display()
            );
        }
    }

    if cli.dry_run {
        match cli.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
            OutputFormat::Table => print_table(&plan),
        }
        eprintln!("dry-run mode: no files were stored. Re-run without --dry-run to apply.");
        return Ok(());
    }

    let mode = if cli.remove_originals {
        PlaceMode::Move
    } else {
        PlaceMode::Copy
    };
    let result = apply_plan(&plan, mode)?;

    for (candidate, placement) in plan.candidates.iter().zip(&result.outcomes) {
        match placement {
            Placement::Stored => println!(
                "Storing {} as {} ...",
                candidate.source.display(),
                candidate.destination.display()
            ),
            Placement::SkippedExisting => println!(
                "ERR Target file {} already exists. Preserving original!",
                candidate.destination.display()
            ),
        }
    }

    eprintln!(
        "done: {} stored, {} skipped",
        result.stored, result.skipped_existing
    );

    Ok(())
}

fn print_table(plan: &SortPlan) {
    println!("source -> destination (capture time)");
    for candidate in &plan.candidates {
        println!(
            "{} -> {} ({})",
            candidate.source.display(),
            candidate.destination.display(),
            candidate.timestamp
        );
    }

    println!(
        "\nsummary: requested={} missing={} collected={} dated={} undated={}",
        plan.stats.requested,
        plan.stats.missing_inputs,
        plan.stats.collected,
        plan.stats.dated,
        plan.stats.undated
    );
}

fn print_options() {
    for option in [
        "--files",
        "--target",
        "--basename",
        "--remove-originals",
        "--dry-run",
        "--output",
        "--list-options",
    ] {
        println!("{option}");
    }
}
