use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use admissions::config::AppConfig;
use admissions::error::AppError;
use admissions::telemetry;
use admissions::workflows::admission::{
    read_applicants_from_path, AdmissionEngine, CapacityPrompt, ConsoleSink, DepartmentCatalog,
    DirectorySink, JsonSink, RankingSink,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "admissions",
    about = "Admit applicants to university departments by priority, score, and capacity",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an admission round (default command)
    Allocate(AllocateArgs),
    /// Print the department catalog and the score fields each department averages
    Departments(DepartmentsArgs),
}

#[derive(Args, Debug, Default)]
struct AllocateArgs {
    /// Applicant list to read (space-delimited, no header)
    #[arg(long)]
    applicants: Option<PathBuf>,
    /// JSON department catalog; the reference departments are used when omitted
    #[arg(long)]
    departments: Option<PathBuf>,
    /// Places per department; prompted for interactively when omitted
    #[arg(long)]
    capacity: Option<String>,
    /// Directory receiving one result file per department
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Skip writing result files
    #[arg(long)]
    no_save: bool,
    /// How the ranking is printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug, Default)]
struct DepartmentsArgs {
    /// JSON department catalog; the reference departments are used when omitted
    #[arg(long)]
    departments: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Allocate(AllocateArgs::default()));

    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Allocate(args) => {
            let stdin = io::stdin();
            run_allocation(args, &mut config, stdin.lock(), io::stdout().lock())
        }
        Command::Departments(args) => {
            if let Some(path) = args.departments {
                config.intake.departments_path = Some(path);
            }
            print_departments(&load_catalog(&config)?)
        }
    }
}

/// Runs one admission round; `input` answers the capacity prompt and `output` gets the ranking.
fn run_allocation<R: BufRead, W: Write>(
    args: AllocateArgs,
    config: &mut AppConfig,
    input: R,
    mut output: W,
) -> Result<(), AppError> {
    let AllocateArgs {
        applicants,
        departments,
        capacity,
        output_dir,
        no_save,
        format,
    } = args;

    if let Some(path) = applicants {
        config.intake.applicants_path = path;
    }
    if let Some(path) = departments {
        config.intake.departments_path = Some(path);
    }
    if let Some(directory) = output_dir {
        config.output.directory = directory;
    }

    let catalog = load_catalog(config)?;
    let capacity = match capacity {
        Some(raw) => config.capacity.parse(&raw)?,
        None => CapacityPrompt::new(input, &mut output, config.capacity).read_capacity()?,
    };

    let applicants = read_applicants_from_path(&config.intake.applicants_path)?;
    info!(
        applicants = applicants.len(),
        path = %config.intake.applicants_path.display(),
        "applicants loaded"
    );

    let engine = AdmissionEngine::new(catalog);
    let ranking = engine.allocate(capacity, &applicants)?;

    match format {
        OutputFormat::Text => ConsoleSink::new(&mut output).publish(&ranking)?,
        OutputFormat::Json => JsonSink::new(&mut output).publish(&ranking)?,
    }

    if !no_save {
        DirectorySink::new(config.output.directory.clone()).publish(&ranking)?;
    }

    Ok(())
}

fn load_catalog(config: &AppConfig) -> Result<DepartmentCatalog, AppError> {
    match &config.intake.departments_path {
        Some(path) => {
            let catalog = DepartmentCatalog::from_path(path)?;
            info!(departments = catalog.len(), path = %path.display(), "department catalog loaded");
            Ok(catalog)
        }
        None => Ok(DepartmentCatalog::reference()),
    }
}

fn print_departments(catalog: &DepartmentCatalog) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    for (name, fields) in catalog.iter() {
        let fields = fields
            .iter()
            .map(|field| field.label())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(stdout, "{name}: {fields}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use admissions::config::{IntakeConfig, OutputConfig, TelemetryConfig};
    use admissions::workflows::admission::{CapacityInputError, CapacityLimits};
    use std::io::Cursor;
    use std::path::Path;

    const APPLICANTS: &str = "Ann Archer 90 90 95 90 0 Mathematics\n\
                              Ben Baker 80 80 80 80 0 Mathematics\n";

    fn config(dir: &Path) -> AppConfig {
        let applicants_path = dir.join("applicants.txt");
        std::fs::write(&applicants_path, APPLICANTS).expect("applicants written");
        AppConfig {
            intake: IntakeConfig {
                applicants_path,
                departments_path: None,
            },
            output: OutputConfig {
                directory: dir.join("results"),
            },
            capacity: CapacityLimits::default(),
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
        }
    }

    fn allocate_args(argv: &[&str]) -> AllocateArgs {
        let cli = Cli::try_parse_from(argv).expect("arguments parse");
        match cli.command {
            Some(Command::Allocate(args)) => args,
            other => panic!("expected allocate command, got {other:?}"),
        }
    }

    #[test]
    fn capacity_flag_fails_instead_of_prompting() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = config(dir.path());
        let args = allocate_args(&["admissions", "allocate", "--capacity", "many"]);
        let mut output = Vec::new();

        let err = run_allocation(args, &mut config, Cursor::new("3\n"), &mut output)
            .expect_err("bad capacity flag");

        assert!(matches!(
            err,
            AppError::Capacity(CapacityInputError::NotNumeric { .. })
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn prompts_for_capacity_when_flag_is_absent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = config(dir.path());
        let args = allocate_args(&["admissions", "allocate", "--no-save"]);
        let mut output = Vec::new();

        run_allocation(args, &mut config, Cursor::new("two\n11\n2\n"), &mut output)
            .expect("round completes");

        let printed = String::from_utf8(output).expect("utf8 output");
        assert!(printed.contains("Input should represent an integer. Try again."));
        assert!(printed.contains("Input is out of defined limits. Try again."));
        assert!(printed.contains("\nMathematics\nAnn Archer 95.0\nBen Baker 80.0\n"));
    }

    #[test]
    fn no_save_leaves_the_output_directory_untouched() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = config(dir.path());
        let args = allocate_args(&["admissions", "allocate", "--capacity", "2", "--no-save"]);

        run_allocation(args, &mut config, io::empty(), Vec::new()).expect("round completes");

        assert!(!dir.path().join("results").exists());
    }

    #[test]
    fn saves_one_file_per_department_by_default() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = config(dir.path());
        let args = allocate_args(&["admissions", "allocate", "--capacity", "2"]);

        run_allocation(args, &mut config, io::empty(), Vec::new()).expect("round completes");

        let mathematics = std::fs::read_to_string(dir.path().join("results/mathematics.txt"))
            .expect("mathematics file");
        assert_eq!(mathematics, "Ann Archer 95.0\nBen Baker 80.0\n");
        assert!(dir.path().join("results/physics.txt").exists());
    }

    #[test]
    fn json_format_prints_machine_readable_ranking() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = config(dir.path());
        let args = allocate_args(&[
            "admissions",
            "allocate",
            "--capacity",
            "2",
            "--no-save",
            "--format",
            "json",
        ]);
        let mut output = Vec::new();

        run_allocation(args, &mut config, io::empty(), &mut output).expect("round completes");

        let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
        assert_eq!(value["Mathematics"][0]["first_name"], "Ann");
        assert_eq!(value["Physics"].as_array().map(Vec::len), Some(0));
    }
}
