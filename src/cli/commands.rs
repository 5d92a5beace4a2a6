use crate::runtime_config::{self, RuntimeConfig};
use crate::scenario::{reqres, Suite, SuiteContext};
use crate::schema::{load_schema, load_schema_file};
use crate::validator::{print_violations, validate, ValidationResult};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILED: u8 = 1;
pub const EXIT_SETUP: u8 = 2;

/// Command-line interface for restverify
#[derive(Parser)]
#[command(name = "restverify")]
#[command(about = "Verify a REST API against typed expectations and JSON schemas", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the verification suite against the target API
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Only run the named scenario (repeatable)
        #[arg(short, long = "scenario")]
        scenarios: Vec<String>,
    },
    /// List the available scenarios
    List,
    /// Validate a JSON payload file against a schema
    Validate {
        /// Bundled schema name or path to a schema file
        #[arg(long)]
        schema: String,

        /// JSON file to validate
        #[arg(long)]
        payload: PathBuf,

        /// Directory searched for schemas before the bundled ones
        #[arg(long, env = "RESTVERIFY_SCHEMA_DIR")]
        schema_dir: Option<PathBuf>,
    },
}

/// Where the suite sends its requests.
///
/// Layered as: defaults, then `--config`, then `RESTVERIFY_*` variables, then
/// the remaining flags.
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// YAML configuration file
    #[arg(short, long, env = "RESTVERIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Scheme and host of the target API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path prefix joined in front of every route
    #[arg(long)]
    pub base_path: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl TargetArgs {
    pub fn resolve(&self) -> anyhow::Result<RuntimeConfig> {
        let base = match &self.config {
            Some(path) => RuntimeConfig::from_file(path)?,
            None => RuntimeConfig::default(),
        };
        let mut config = base.with_env_overrides();
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(base_path) = &self.base_path {
            config.base_path = base_path.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn run_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Run { target, scenarios } => run_suite(&target, &scenarios),
        Commands::List => {
            for scenario in reqres::suite().scenarios() {
                println!("{:<28} {}", scenario.name, scenario.description);
            }
            Ok(ExitCode::from(EXIT_OK))
        }
        Commands::Validate {
            schema,
            payload,
            schema_dir,
        } => validate_payload(&schema, &payload, schema_dir),
    }
}

fn setup_suite(target: &TargetArgs, names: &[String]) -> anyhow::Result<(SuiteContext, Suite)> {
    let config = runtime_config::install(target.resolve()?)?;
    let ctx = SuiteContext::setup(config, reqres::REQUIRED_SCHEMAS)?;
    let suite = reqres::suite().filtered(names)?;
    Ok((ctx, suite))
}

fn run_suite(target: &TargetArgs, names: &[String]) -> anyhow::Result<ExitCode> {
    let (ctx, suite) = match setup_suite(target, names) {
        Ok(ready) => ready,
        Err(e) => {
            eprintln!("❌ Suite setup failed: {e:#}");
            return Ok(ExitCode::from(EXIT_SETUP));
        }
    };

    println!(
        "Running {} scenario(s) against {}",
        suite.scenarios().len(),
        ctx.request().root_uri()
    );
    let report = suite.run(&ctx);
    for outcome in &report.outcomes {
        println!("{outcome}");
    }
    println!("\n{}", report.summary());

    Ok(ExitCode::from(if report.aborted {
        EXIT_SETUP
    } else if report.all_passed() {
        EXIT_OK
    } else {
        EXIT_FAILED
    }))
}

fn validate_payload(
    schema: &str,
    payload: &Path,
    schema_dir: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let schema_path = PathBuf::from(schema);
    let document = if schema_path.is_file() {
        load_schema_file(&schema_path)?
    } else {
        load_schema(schema, schema_dir.as_deref())?
    };

    let text = std::fs::read_to_string(payload)
        .with_context(|| format!("cannot read payload {}", payload.display()))?;

    match validate(&text, &document) {
        ValidationResult::Valid => {
            println!("✅ {} conforms to '{}'", payload.display(), document.name());
            Ok(ExitCode::from(EXIT_OK))
        }
        ValidationResult::Invalid(violations) => {
            print_violations(document.name(), &violations);
            Ok(ExitCode::from(EXIT_FAILED))
        }
    }
}
