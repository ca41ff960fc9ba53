use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use spvreq_cli::report::{EnvReport, ResolveReport};
use spvreq_cli::{build_environment, load_source};
use spvreq_core::{resolve_units, Declarations};
use spvreq_parse::parse_str;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spvreq")]
#[command(about = "spvreq: SPIR-V capability and extension requirement resolution")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the capabilities and extensions a listing must declare
    Resolve {
        /// Path to the assembly listing
        file: String,

        #[command(flatten)]
        target: Target,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,

        /// Also print each unit's declarations before hoisting
        #[arg(long)]
        per_unit: bool,
    },

    /// Show what a target can use
    Env {
        #[command(flatten)]
        target: Target,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Parse a listing and dump the instruction stream
    Parse {
        /// Path to the assembly listing
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
}

#[derive(clap::Args, Debug)]
struct Target {
    /// Target triple, e.g. spirv64v1.3-unknown-opencl2.0
    #[arg(long)]
    triple: Option<String>,

    /// Comma-separated feature toggles, e.g. +Int64,-Float16,+SPV_KHR_float_controls
    #[arg(long)]
    features: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Resolve {
            file,
            target,
            format,
            per_unit,
        } => cmd_resolve(&file, &target, format, per_unit),

        Commands::Env { target, format } => cmd_env(&target, format),

        Commands::Parse { file, format } => cmd_parse(&file, format),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_resolve(file: &str, target: &Target, format: Format, per_unit: bool) -> Result<()> {
    let src = load_source(file)?;
    let module = parse_str(file, &src)?;
    let env = build_environment(target.triple.as_deref(), target.features.as_deref())?;

    let units = resolve_units(&env, &module)?;
    let mut hoisted = Declarations::default();
    for decls in &units {
        hoisted.merge(decls);
    }
    info!(
        units = units.len(),
        capabilities = hoisted.capabilities().len(),
        "resolved module"
    );

    let named = module
        .units
        .iter()
        .map(|u| u.name.clone())
        .zip(units)
        .collect();
    let report = ResolveReport::new(&hoisted, named, per_unit);
    match format {
        Format::Pretty => print!("{}", report.to_pretty()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn cmd_env(target: &Target, format: Format) -> Result<()> {
    let env = build_environment(target.triple.as_deref(), target.features.as_deref())?;
    let report = EnvReport::from(&env);
    match format {
        Format::Pretty => print!("{}", report.to_pretty()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn cmd_parse(file: &str, format: Format) -> Result<()> {
    let src = load_source(file)?;
    let module = parse_str(file, &src)?;

    match format {
        Format::Pretty => println!("{:#?}", module),
        Format::Json => println!("{}", serde_json::to_string_pretty(&module)?),
    }
    Ok(())
}
