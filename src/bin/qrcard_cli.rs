//! QR Card CLI
//!
//! Commands: generate, check
//! Human-readable report on stdout; distinct exit codes per failure class.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use qrcard_core::{
    locate_data_file, load_record,
    validation::example_document,
    ArtifactOutcome, Config, GenerationPipeline, ModuleEncoder, ModuleStyle, PipelineError,
    QrOptions, RunReport,
};

#[derive(Parser)]
#[command(name = "qrcard-cli")]
#[command(about = "QR Card Generator - vCard and site QR artifacts from data.json")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data file path, tried before the default candidate locations
    #[arg(short, long)]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce the contact and site QR artifacts
    Generate {
        /// Output directory for the PNG artifacts
        #[arg(short, long, default_value = "assets/img/qr_codes")]
        output_dir: PathBuf,

        /// Dark-module style
        #[arg(long, value_enum, default_value_t = ModuleStyle::Normal)]
        style: ModuleStyle,

        /// Pixels per module
        #[arg(long, default_value_t = 12)]
        box_size: u32,

        /// Quiet-zone width in modules
        #[arg(long, default_value_t = 4)]
        border: u32,

        /// Fixed symbol version (1-40); falls back to auto-fit on overflow
        #[arg(long, default_value_t = 10)]
        symbol_version: i16,

        /// Let the symbol version fit the payload instead of fixing it
        #[arg(long)]
        auto_fit: bool,

        /// Foreground color, #RRGGBB
        #[arg(long, default_value = "#000000")]
        dark: String,

        /// Background color, #RRGGBB
        #[arg(long, default_value = "#ffffff")]
        light: String,

        /// Fixed revision timestamp (ISO-8601 UTC) for reproducible output
        #[arg(long)]
        revision: Option<String>,
    },

    /// Locate, load and validate the data file without writing anything
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = Config::default();
    if let Some(data) = cli.data {
        config.candidate_paths.insert(0, data);
    }

    match cli.command {
        Commands::Generate {
            output_dir,
            style,
            box_size,
            border,
            symbol_version,
            auto_fit,
            dark,
            light,
            revision,
        } => {
            let version = if auto_fit { None } else { Some(symbol_version) };
            let qr = match QrOptions::from_user(box_size, border, version) {
                Ok(opts) => QrOptions {
                    style,
                    dark,
                    light,
                    ..opts
                },
                Err(message) => {
                    eprintln!("Error: {message}");
                    return ExitCode::from(2);
                }
            };
            config.output_dir = output_dir;
            config.qr = qr;
            config.revision = revision;

            let pipeline = GenerationPipeline::new(config, ModuleEncoder);
            match pipeline.run() {
                Ok(report) => {
                    print_report(&pipeline, &report);
                    ExitCode::SUCCESS
                }
                Err(error) => fail(&error),
            }
        }

        Commands::Check => {
            let pipeline = GenerationPipeline::new(config, ModuleEncoder);
            let data_path = match locate_data_file(&pipeline.config().candidate_paths) {
                Ok(path) => path,
                Err(error) => return fail(&error),
            };
            println!("Data file: {}", data_path.display());

            let record = match load_record(&data_path) {
                Ok(record) => record,
                Err(error) => return fail(&error),
            };

            match pipeline.check(&record) {
                Ok(warnings) => {
                    print_warnings(&warnings);
                    println!("All required fields present.");
                    ExitCode::SUCCESS
                }
                Err(error) => fail(&error),
            }
        }
    }
}

fn fail(error: &PipelineError) -> ExitCode {
    eprintln!("Error: {error}");
    if let PipelineError::MissingFields(violations) = error {
        eprintln!("\nAdd these fields to your data file, then run again:");
        for violation in violations {
            eprintln!("  - {} : {}", violation.field, violation.message);
        }
        eprintln!("\nMinimal example (JSON):");
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&example_document()).unwrap()
        );
    }
    ExitCode::from(error.exit_code())
}

fn print_warnings(warnings: &[qrcard_core::ValidationViolation]) {
    if warnings.is_empty() {
        return;
    }
    println!("Warning: recommended fields missing (non-blocking):");
    for warning in warnings {
        println!("  - {} : {}", warning.field, warning.message);
    }
}

fn print_report(pipeline: &GenerationPipeline<ModuleEncoder>, report: &RunReport) {
    println!("Loaded data from: {}", report.data_path.display());
    print_warnings(&report.warnings);

    print_outcome("Contact QR", &report.contact);
    print_outcome("Site QR", &report.site);

    let failures = report.failures();
    if !failures.is_empty() {
        println!("\nCompleted with {} failed artifact(s):", failures.len());
        for failure in failures {
            println!("  - {failure}");
        }
    }

    if report.qr_codes_present {
        let config = pipeline.config();
        println!("\nNote: your data file has a 'qrCodes' section. This tool never");
        println!("writes to the data file; to reference the new images, copy these");
        println!("paths into 'qrCodes' yourself:");
        println!(
            "  contact -> {}",
            pipeline.artifact_path(&config.contact_stem).display()
        );
        println!(
            "  site    -> {}",
            pipeline.artifact_path(&config.site_stem).display()
        );
    }

    println!("\nDone.");
}

fn print_outcome(label: &str, outcome: &ArtifactOutcome) {
    match outcome {
        ArtifactOutcome::Written(path) => println!("{label}: written to {}", path.display()),
        ArtifactOutcome::Skipped(reason) => println!("{label}: not generated ({reason})"),
        ArtifactOutcome::Failed(message) => println!("{label}: FAILED ({message})"),
    }
}
