use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use testloom::config::{self, Complexity, GenerationConfig, TestType};
use testloom::llm::backend::{Disabled, ModelBackend};
use testloom::llm::client::HttpModelClient;
use testloom::pipeline::{self, GenerationReport};
use testloom::source;

#[derive(Parser)]
#[command(
    name = "testloom",
    version,
    about = "Analyze a repository and generate test case plans, with or without a model."
)]
struct Cli {
    /// Repository root to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Test types to generate (comma separated: unit,integration,e2e,...)
    #[arg(long, value_delimiter = ',')]
    types: Vec<String>,

    /// Test complexity: simple, medium, complex, adaptive
    #[arg(long)]
    complexity: Option<String>,

    /// Test framework name, or "auto" to infer from the repository
    #[arg(long)]
    framework: Option<String>,

    /// Maximum number of files submitted for deep analysis
    #[arg(long, default_value_t = 10)]
    max_files: usize,

    /// Skip the model entirely and use the deterministic generator
    #[arg(long)]
    no_model: bool,

    /// Emit the full report as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Optional TOML file with generation options
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let cfg = build_config(&cli);

    let files = source::list_repository(&cli.path);
    if files.is_empty() {
        eprintln!("no files found under {}", cli.path.display());
        return ExitCode::FAILURE;
    }

    let backend: Box<dyn ModelBackend> = if cli.no_model {
        Box::new(Disabled)
    } else {
        Box::new(HttpModelClient::from_disk())
    };

    let root = cli.path.clone();
    let fetch = move |record: &testloom::FileRecord| source::fetch_content(&root, record);

    let report = match pipeline::generate(&files, &cfg, cli.max_files, backend.as_ref(), &fetch) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("failed to render report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_summary(&report);
    }

    ExitCode::SUCCESS
}

/* ============================================================
   Config assembly
   ============================================================ */

fn build_config(cli: &Cli) -> GenerationConfig {
    let mut cfg = match &cli.config {
        Some(path) => config::load_file(path),
        None => GenerationConfig::default(),
    };

    if !cli.types.is_empty() {
        // unrecognized names coerce to the default type
        cfg.types = cli
            .types
            .iter()
            .map(|s| TestType::parse(s).unwrap_or_default())
            .collect();
    }

    if let Some(c) = &cli.complexity {
        cfg.complexity = Complexity::parse(c).unwrap_or_default();
    }

    if let Some(fw) = &cli.framework {
        cfg.framework = fw.clone();
    }

    cfg.normalized()
}

/* ============================================================
   Human-readable report
   ============================================================ */

fn print_summary(report: &GenerationReport) {
    let s = &report.project_structure;

    println!("project type : {}", s.project_type);
    if let Some(fw) = &s.framework {
        println!("framework    : {fw}");
    }
    if let Some(bt) = &s.build_tool {
        println!("build tool   : {bt}");
    }
    println!("test stack   : {}", report.test_strategy.test_framework);
    println!(
        "files        : {} total, {} selected, {} analyzed",
        report.summary.total_files,
        report.summary.selected_files,
        report.summary.analyzed_files
    );

    for err in &report.file_errors {
        println!("  ! {}: {}", err.path, err.error);
    }

    println!();

    for case in &report.test_cases {
        let function = case.function.as_deref().unwrap_or("-");
        println!(
            "[{:?}] {} ({} / {})",
            case.priority, case.title, case.file, function
        );
    }

    println!("\n{} test case(s) generated", report.test_cases.len());
}
