use clap::{Parser, Subcommand, ValueEnum};
use rn_core::units::to_kgph;
use rn_project::report::{NetworkSheet, SizingSheet};
use rn_project::{Case, DataSheet, ProjectError, analyze_case, analyze_network, load_case};
use rn_sizing::{SizingError, size_orifice};
use rn_solver::PressureDropEstimate;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rn-cli")]
#[command(about = "ReliefNet CLI - PSV line hydraulics and API-520 orifice sizing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a case file
    Validate {
        /// Path to the case file (YAML, or JSON by extension)
        case_path: PathBuf,
    },
    /// Solve the pipe line of a case
    Network {
        case_path: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Size the relief orifice of a case
    Size {
        case_path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Line, sizing and compliance checks together
    Check { case_path: PathBuf },
    /// Write the full data sheet
    Datasheet {
        case_path: PathBuf,
        /// Output file (stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = SheetFormat::Yaml)]
        format: SheetFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SheetFormat {
    Yaml,
    Json,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Case '{name}' has no psv block")]
    NoPsv { name: String },

    #[error("Output error: {0}")]
    Output(String),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Network { case_path, json } => cmd_network(&case_path, json),
        Commands::Size { case_path, json } => cmd_size(&case_path, json),
        Commands::Check { case_path } => cmd_check(&case_path),
        Commands::Datasheet {
            case_path,
            output,
            format,
        } => cmd_datasheet(&case_path, output.as_deref(), format),
    }
}

fn cmd_validate(case_path: &Path) -> CliResult<()> {
    info!(command = "validate", case = %case_path.display(), "running command");
    println!("Validating case: {}", case_path.display());
    let case = load_case(case_path)?;
    println!("✓ Case '{}' is valid", case.name);
    println!("  Segments: {}", case.segments.len());
    println!("  PSV: {}", if case.psv.is_some() { "yes" } else { "no" });
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))
}

fn cmd_network(case_path: &Path, json: bool) -> CliResult<()> {
    info!(command = "network", case = %case_path.display(), "running command");
    let case = load_case(case_path)?;
    let estimate = analyze_network(&case)?;

    if json {
        println!("{}", to_json(&NetworkSheet::from(&estimate))?);
        return Ok(());
    }

    println!("Case: {}", case.name);
    print_network(&estimate);
    Ok(())
}

fn print_network(estimate: &PressureDropEstimate) {
    match estimate {
        PressureDropEstimate::Solved(result) => {
            println!(
                "{:<16} {:>10} {:>8} {:>12} {:>12} {:>10} {:>7}",
                "Segment", "Re", "v [m/s]", "P_in [kPa]", "P_out [kPa]", "dP [kPa]", "Mach"
            );
            for s in &result.segments {
                let flags = match (s.is_choked, s.is_erosional) {
                    (true, true) => " CHOKED EROSIONAL",
                    (true, false) => " CHOKED",
                    (false, true) => " EROSIONAL",
                    (false, false) => "",
                };
                println!(
                    "{:<16} {:>10.0} {:>8.2} {:>12.2} {:>12.2} {:>10.3} {:>7.3}{}",
                    s.segment_name,
                    s.reynolds,
                    s.velocity.value,
                    s.inlet.pressure.value / 1e3,
                    s.outlet.pressure.value / 1e3,
                    s.total_drop().value / 1e3,
                    s.mach,
                    flags
                );
            }
            println!(
                "Total pressure drop: {:.3} kPa",
                result.total_pressure_drop.value / 1e3
            );
            for w in &result.warnings {
                println!("  warning: {w}");
            }
        }
        PressureDropEstimate::LinearFallback {
            pressure_drop,
            total_length,
            reason,
        } => {
            println!("Hydraulic solve unavailable: {reason}");
            println!(
                "LINEAR FALLBACK ESTIMATE: {:.3} kPa over {:.1} m (not a physics result)",
                pressure_drop.value / 1e3,
                total_length.value
            );
        }
    }
}

fn require_psv(case: &Case) -> CliResult<rn_project::SizingCase> {
    rn_project::build_sizing_inputs(case)?.ok_or_else(|| CliError::NoPsv {
        name: case.name.clone(),
    })
}

fn cmd_size(case_path: &Path, json: bool) -> CliResult<()> {
    info!(command = "size", case = %case_path.display(), "running command");
    let case = load_case(case_path)?;
    let psv = require_psv(&case)?;
    let out = size_orifice(&psv.inputs, psv.method)?;

    if json {
        println!("{}", to_json(&SizingSheet::from(&out))?);
        return Ok(());
    }

    println!("Case: {} ({} sizing)", case.name, out.method);
    println!("  Required area:  {:.1} mm²", out.required_area_mm2());
    println!(
        "  Selected:       {} ({:.1} mm², {:.1}% used)",
        out.selected,
        out.selected_area_mm2(),
        out.percent_used
    );
    println!("  Rated capacity: {:.0} kg/h", to_kgph(out.rated_capacity));
    println!(
        "  Kd={:.3} Kb={:.3} Kc={:.3} Kw={:.3} Kv={:.4} Kn={:.4}",
        out.coefficients.kd,
        out.coefficients.kb,
        out.coefficients.kc,
        out.coefficients.kw,
        out.coefficients.kv,
        out.coefficients.kn
    );
    println!(
        "  Flow: {}",
        if out.is_critical_flow {
            "critical"
        } else {
            "subcritical"
        }
    );
    for m in &out.messages {
        println!("  note: {m}");
    }
    Ok(())
}

fn cmd_check(case_path: &Path) -> CliResult<()> {
    info!(command = "check", case = %case_path.display(), "running command");
    let case = load_case(case_path)?;
    if case.psv.is_none() {
        return Err(CliError::NoPsv { name: case.name });
    }
    let analysis = analyze_case(&case)?;

    println!("Case: {}", case.name);
    print_network(&analysis.estimate);
    if let Some(out) = &analysis.sizing {
        println!(
            "Orifice: {} ({:.1}% used, {})",
            out.selected,
            out.percent_used,
            if out.exceeds_largest_orifice {
                "EXCEEDS T"
            } else {
                "ok"
            }
        );
    }
    if let Some(check) = &analysis.inlet_check {
        let mark = if check.is_valid { "✓" } else { "✗" };
        println!("{mark} Inlet loss [{}]: {}", check.severity, check.message);
    }
    if let Some(check) = &analysis.backpressure_check {
        let mark = if check.is_valid { "✓" } else { "✗" };
        println!("{mark} Built-up back pressure: {}", check.message);
    }
    Ok(())
}

fn cmd_datasheet(case_path: &Path, output: Option<&Path>, format: SheetFormat) -> CliResult<()> {
    info!(command = "datasheet", case = %case_path.display(), "running command");
    let case = load_case(case_path)?;
    let analysis = analyze_case(&case)?;
    let sheet = DataSheet::new(&case, &analysis);
    let text = match format {
        SheetFormat::Yaml => sheet.to_yaml()?,
        SheetFormat::Json => sheet.to_json()?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            println!("✓ Data sheet written to {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
