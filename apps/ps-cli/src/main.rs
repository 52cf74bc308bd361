use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use ps_app::{
    AppError, AppResult, RunMode, RunProgressEvent, RunStage, SessionController,
    SleepPacer, compare_gain_sets, estimate_now, load_workbench, parse_gain_set,
    render_comparison_html, render_comparison_json, render_comparison_text, render_page_html,
    render_results_html, render_results_json, render_results_text, save_workbench,
};
use ps_controls::{PlantKind, PlantModel, manual_tuning_guide};
use ps_core::GainTriple;
use ps_project::Workbench;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ps-cli")]
#[command(about = "PID Workbench CLI - heuristic PID performance estimates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(clap::Args)]
struct GainArgs {
    /// Proportional gain
    #[arg(long)]
    kp: Option<f64>,
    /// Integral gain
    #[arg(long)]
    ki: Option<f64>,
    /// Derivative gain
    #[arg(long)]
    kd: Option<f64>,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Workbench file (YAML or JSON); built-in defaults when omitted
    #[arg(short, long)]
    workbench: Option<PathBuf>,
    /// Plant type (first_order, second_order, dc_motor, tank)
    #[arg(long)]
    plant: Option<PlantKind>,
    /// Skip the cosmetic pauses between stages
    #[arg(long)]
    no_delay: bool,
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate metrics for a gain triple immediately
    Estimate {
        /// Proportional gain
        #[arg(long)]
        kp: f64,
        /// Integral gain
        #[arg(long)]
        ki: f64,
        /// Derivative gain
        #[arg(long, default_value_t = 0.0)]
        kd: f64,
        /// Plant type (recorded in the report; does not change the metrics)
        #[arg(long, default_value = "first_order")]
        plant: PlantKind,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Run a paced simulation of the workbench form
    Simulate {
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        gains: GainArgs,
    },
    /// Run the randomized auto-tune
    Autotune {
        #[command(flatten)]
        run: RunArgs,
        /// RNG seed for repeatable results
        #[arg(long)]
        seed: Option<u64>,
        /// Relative perturbation spread in [0, 1]
        #[arg(long)]
        spread: Option<f64>,
    },
    /// Estimate several gain sets side by side and pick the lowest IAE
    Compare {
        /// Workbench whose presets and plant are compared
        #[arg(short, long)]
        workbench: Option<PathBuf>,
        /// Gain set as NAME=KP,KI,KD (repeatable); replaces the presets
        #[arg(short = 'g', long = "gains", value_name = "NAME=KP,KI,KD")]
        gain_sets: Vec<String>,
        /// Plant type (recorded in the report; does not change the metrics)
        #[arg(long)]
        plant: Option<PlantKind>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List gain presets
    Presets {
        /// Workbench file to read presets from
        #[arg(short, long)]
        workbench: Option<PathBuf>,
    },
    /// List plant types and their default parameters
    Plants,
    /// Print the manual tuning guide
    Guide,
    /// Validate a workbench file
    Validate {
        /// Path to the workbench file
        path: PathBuf,
    },
    /// Write a default workbench file
    Init {
        /// Destination path (.yaml or .json)
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            kp,
            ki,
            kd,
            plant,
            format,
        } => cmd_estimate(GainTriple { kp, ki, kd }, plant, format),
        Commands::Simulate { run, gains } => cmd_simulate(&run, &gains),
        Commands::Autotune { run, seed, spread } => cmd_autotune(&run, seed, spread),
        Commands::Compare {
            workbench,
            gain_sets,
            plant,
            format,
            output,
        } => cmd_compare(
            workbench.as_deref(),
            &gain_sets,
            plant,
            format,
            output.as_deref(),
        ),
        Commands::Presets { workbench } => cmd_presets(workbench.as_deref()),
        Commands::Plants => cmd_plants(),
        Commands::Guide => cmd_guide(),
        Commands::Validate { path } => cmd_validate(&path),
        Commands::Init { path, force } => cmd_init(&path, force),
    }
}

fn load_or_default(path: Option<&Path>) -> AppResult<Workbench> {
    match path {
        Some(path) => load_workbench(path),
        None => Ok(Workbench::default()),
    }
}

fn prepare_workbench(run: &RunArgs) -> AppResult<Workbench> {
    let mut workbench = load_or_default(run.workbench.as_deref())?;
    if let Some(kind) = run.plant {
        if workbench.plant.kind() != kind {
            workbench.plant = PlantModel::default_for(kind);
        }
    }
    if run.no_delay {
        workbench.pacing.stage_delay_ms = 0;
        workbench.pacing.auto_tune_stage_delay_ms = 0;
    }
    Ok(workbench)
}

fn cmd_estimate(gains: GainTriple, plant: PlantKind, format: OutputFormat) -> AppResult<()> {
    let report = estimate_now(&PlantModel::default_for(plant), gains)?;
    let rendered = match format {
        OutputFormat::Text => render_results_text(&report),
        OutputFormat::Json => render_results_json(&report)?,
        OutputFormat::Html => render_results_html(&report),
    };
    print!("{rendered}");
    Ok(())
}

fn cmd_simulate(run: &RunArgs, gains: &GainArgs) -> AppResult<()> {
    let mut workbench = prepare_workbench(run)?;
    if let Some(kp) = gains.kp {
        workbench.gains.kp = kp;
    }
    if let Some(ki) = gains.ki {
        workbench.gains.ki = ki;
    }
    if let Some(kd) = gains.kd {
        workbench.gains.kd = kd;
    }
    run_session(workbench, RunMode::Simulate, run)
}

fn cmd_autotune(run: &RunArgs, seed: Option<u64>, spread: Option<f64>) -> AppResult<()> {
    let mut workbench = prepare_workbench(run)?;
    if seed.is_some() {
        workbench.auto_tune.seed = seed;
    }
    if let Some(spread) = spread {
        workbench.auto_tune.spread = spread;
    }
    run_session(workbench, RunMode::AutoTune, run)
}

fn run_session(workbench: Workbench, mode: RunMode, run: &RunArgs) -> AppResult<()> {
    eprintln!("Running {} for plant: {}", mode, workbench.plant.summary());

    let mut session = SessionController::new(workbench);
    let mut last_stage = None;
    let started = Instant::now();
    session.run_blocking(
        mode,
        &mut SleepPacer,
        Some(&mut |event: RunProgressEvent| {
            if last_stage != Some(event.stage) {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
            }
        }),
    )?;
    clear_progress_line();
    eprintln!(
        "✓ {} finished in {:.2}s",
        capitalized(mode),
        started.elapsed().as_secs_f64()
    );

    let report = session.report().ok_or(AppError::Cancelled)?;
    let rendered = match run.format {
        OutputFormat::Text => render_results_text(report),
        OutputFormat::Json => render_results_json(report)?,
        OutputFormat::Html => render_page_html(&session.view()),
    };
    emit(&rendered, run.output.as_deref())
}

fn emit(rendered: &str, output: Option<&Path>) -> AppResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::debug!(path = %path.display(), bytes = rendered.len(), "wrote report");
            eprintln!("✓ Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn cmd_compare(
    workbench: Option<&Path>,
    gain_sets: &[String],
    plant: Option<PlantKind>,
    format: OutputFormat,
    output: Option<&Path>,
) -> AppResult<()> {
    let workbench = load_or_default(workbench)?;
    let plant = match plant {
        Some(kind) if kind != workbench.plant.kind() => PlantModel::default_for(kind),
        _ => workbench.plant,
    };
    let candidates = if gain_sets.is_empty() {
        workbench.presets
    } else {
        gain_sets
            .iter()
            .map(|text| parse_gain_set(text))
            .collect::<AppResult<Vec<_>>>()?
    };

    let comparison = compare_gain_sets(&plant, &candidates)?;
    let rendered = match format {
        OutputFormat::Text => render_comparison_text(&comparison),
        OutputFormat::Json => render_comparison_json(&comparison)?,
        OutputFormat::Html => render_comparison_html(&comparison),
    };
    emit(&rendered, output)
}

fn cmd_presets(workbench: Option<&Path>) -> AppResult<()> {
    let workbench = load_or_default(workbench)?;
    println!("{:<14} {:>8} {:>8} {:>8}  Description", "Preset", "Kp", "Ki", "Kd");
    for preset in &workbench.presets {
        println!(
            "{:<14} {:>8} {:>8} {:>8}  {}",
            preset.name,
            preset.gains.kp,
            preset.gains.ki,
            preset.gains.kd,
            preset.description.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn cmd_plants() -> AppResult<()> {
    for kind in PlantKind::ALL {
        println!("{} - {} (baseline preset: {})", kind, kind.label(), kind.default_preset());
        for param in PlantModel::default_for(kind).parameters() {
            println!("    {:<26} {:>8} {}", param.name, param.value, param.unit);
        }
    }
    Ok(())
}

fn cmd_guide() -> AppResult<()> {
    println!("Manual tuning guide:");
    for step in manual_tuning_guide() {
        println!("  {:<14} {}", step.key, step.text);
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> AppResult<()> {
    println!("Validating workbench: {}", path.display());
    let workbench = load_workbench(path)?;
    println!("✓ Workbench is valid");
    println!("  Name: {}", workbench.name);
    println!("  Plant: {}", workbench.plant.summary());
    println!("  Presets: {}", workbench.presets.len());
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    save_workbench(path, &Workbench::default())?;
    println!("✓ Wrote default workbench to {}", path.display());
    Ok(())
}

fn capitalized(mode: RunMode) -> &'static str {
    match mode {
        RunMode::Simulate => "Simulation",
        RunMode::AutoTune => "Auto-tune",
    }
}

fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(100));
    let _ = io::stderr().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    let width = 24usize;
    let filled = ((event.fraction_complete * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    let mut line = format!(
        "\r[{}] {:>6.2}%  phase={}  elapsed={:.1}s",
        bar,
        event.fraction_complete * 100.0,
        event.stage.label(),
        event.elapsed_wall_s
    );
    if event.stage != RunStage::Completed {
        if let Some(msg) = &event.message {
            line.push_str(&format!("  {}", msg));
        }
    }
    eprint!("{line:<100}");
    let _ = io::stderr().flush();
}
