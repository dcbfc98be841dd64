//! Relic
//!
//! Legacy code modernization: validated IR, modernized rewrites and
//! migration documentation.

mod feedback;
mod ir;
mod pipeline;
mod render;
mod response;
mod utils;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use feedback::{FileFeedback, RunFeedback};
use ir::{parse_project_ir, ProjectIR};
use pipeline::{write_batch, ClientConfig, Pipeline, ReplayClient, SourceFile};
use render::{generate_skeleton, generate_skeleton_for, render_analysis, TargetSyntax};

/// Relic modernization tool
#[derive(Parser, Debug)]
#[command(name = "relic")]
#[command(author = "Z1529")]
#[command(version = "0.1.0")]
#[command(about = "Relic - turn legacy source files into modernized code and migration docs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze, modernize and document a batch of source files
    Run {
        /// Legacy source files
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,

        /// Source language tag (python, java, javascript, ...)
        #[arg(short, long)]
        language: String,

        /// Directory of recorded model responses
        #[arg(long, value_name = "DIR")]
        responses: Option<PathBuf>,

        /// Model identifier
        #[arg(long)]
        model: Option<String>,

        /// Directory the output layout is written under
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        out: PathBuf,

        /// Group every file under this folder instead of its own directory
        #[arg(long, value_name = "NAME")]
        folder: Option<String>,

        /// Write the JSON run report here
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Write the report as single-line JSON
        #[arg(long, requires = "report")]
        compact: bool,
    },
    /// Validate one analysis response
    Validate {
        /// Raw model response
        response: PathBuf,

        /// Print JSON feedback instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Print the skeleton for an analysis response
    Skeleton {
        /// Raw model response
        response: PathBuf,

        /// Target syntax (defaults to the IR language)
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Print the analysis report for an analysis response
    Inspect {
        /// Raw model response
        response: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            files,
            language,
            responses,
            model,
            out,
            folder,
            report,
            compact,
        } => run_batch(
            files,
            &language,
            responses,
            model,
            &out,
            folder,
            report.map(|path| (path, compact)),
        ),
        Commands::Validate { response, json } => validate_response(&response, json),
        Commands::Skeleton { response, language } => {
            print_skeleton(&response, language.as_deref())
        }
        Commands::Inspect { response } => {
            load_ir(&response).map(|ir| print!("{}", render_analysis(&ir)))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run_batch(
    files: Vec<PathBuf>,
    language: &str,
    responses: Option<PathBuf>,
    model: Option<String>,
    out: &Path,
    folder: Option<String>,
    report: Option<(PathBuf, bool)>,
) -> Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(dir) = responses {
        config.responses_dir = dir;
    }
    if let Some(model) = model {
        config.model = model;
    }

    println!("Relic v0.1.0");
    println!("Model: {}", config.model);

    let mut sources = Vec::with_capacity(files.len());
    for path in &files {
        let source = SourceFile::load(path, language)
            .with_context(|| format!("reading {}", path.display()))?;
        sources.push(match &folder {
            Some(folder) => source.with_folder(folder.clone()),
            None => source,
        });
    }

    let client = ReplayClient::new(config.responses_dir.clone());
    let pipeline = Pipeline::new(client, config);
    let mut outcome = pipeline.process_batch(sources);

    for written in write_batch(out, &mut outcome) {
        println!(
            "  [✓] {} -> {} ({} files)",
            written.source, written.base, written.files
        );
    }
    for (source, failure) in outcome.failures() {
        println!("  [✗] {}: {}", source.path(), failure);
    }

    if let Some((path, compact)) = report {
        let feedback = RunFeedback::from_batch(&pipeline.config().model, &outcome);
        let json = if compact {
            feedback.to_json_compact()
        } else {
            feedback.to_json()
        };
        fs::write(&path, json).with_context(|| format!("writing report {}", path.display()))?;
        println!("  [→] Report written to: {}", path.display());
    }

    println!(
        "\n{}/{} files modernized",
        outcome.succeeded(),
        outcome.processed()
    );

    let failed = outcome.processed() - outcome.succeeded();
    if failed > 0 {
        bail!("{} file(s) failed", failed);
    }
    Ok(())
}

fn validate_response(path: &Path, json: bool) -> Result<()> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let result = parse_project_ir(&raw);

    if json {
        let name = path.display().to_string();
        println!("{}", FileFeedback::from_validation(&name, &result).to_json());
        if result.is_err() {
            process::exit(1);
        }
        return Ok(());
    }

    match result {
        Ok(ir) => {
            println!("  [✓] Valid IR for {}", ir.original_filename);
            println!(
                "      {} modules, {} functions, {} debt items",
                ir.modules.len(),
                ir.function_count(),
                ir.technical_debt.len()
            );
            Ok(())
        }
        Err(e) => {
            println!("  [✗] {}", e);
            if let Some(snippet) = e.snippet() {
                println!("\n{}", snippet);
            }
            bail!("{} is not a valid analysis response", path.display())
        }
    }
}

fn print_skeleton(path: &Path, language: Option<&str>) -> Result<()> {
    let ir = load_ir(path)?;
    let skeleton = match language {
        Some(lang) => generate_skeleton_for(&ir, TargetSyntax::from_language(lang)),
        None => generate_skeleton(&ir),
    };
    print!("{}", skeleton);
    Ok(())
}

fn load_ir(path: &Path) -> Result<ProjectIR> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_project_ir(&raw).with_context(|| format!("parsing {}", path.display()))
}
