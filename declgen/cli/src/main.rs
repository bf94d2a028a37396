//! Declaration generator CLI.
//!
//! Generates typed Rust declarations from a table catalog (`sql`) or from a
//! static resource directory (`static-map`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use declgen::config::GeneratorConfig;
use declgen::errors::GeneratorError;
use declgen::output::{Provenance, write_atomic};
use declgen::pipeline::{Generated, generate_sql, generate_static_map};
use declgen::source::{CatalogExport, MetadataProvider};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Generates typed Rust declarations from table catalogs and resource directories
#[derive(Parser, Debug)]
#[command(name = "declgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML); flags override its values
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate table declarations from a database catalog
    Sql(SqlArgs),

    /// Generate path constants for a static resource directory
    StaticMap(StaticMapArgs),
}

#[derive(Args, Debug)]
struct SqlArgs {
    /// Database to describe
    #[arg(long)]
    db: Option<String>,

    /// Connection string (takes precedence over --db)
    #[arg(long)]
    connection_string: Option<String>,

    /// Database server [default: (local)]
    #[arg(long)]
    server: Option<String>,

    /// SQL login; integrated authentication when omitted
    #[arg(long)]
    user_id: Option<String>,

    #[arg(long)]
    password: Option<String>,

    /// Namespace of the generated modules [default: generated::sql_query]
    #[arg(long, value_name = "NAMESPACE")]
    ns: Option<String>,

    /// Prefix table structs with their schema [default: true]
    #[arg(long, value_name = "BOOL")]
    with_schema: Option<bool>,

    /// Directory holding catalog exports (`<database>.json`)
    #[arg(long, value_name = "DIR", default_value = ".")]
    catalog_dir: PathBuf,

    /// Output file [default: SQLQuery.generated.rs]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,
}

impl SqlArgs {
    fn apply(&self, config: &mut GeneratorConfig) {
        let sql = &mut config.sql;
        let source = &mut sql.source;

        override_with(&mut source.database, &self.db);
        override_with(&mut source.connection_string, &self.connection_string);
        override_with(&mut source.user_id, &self.user_id);
        override_with(&mut source.password, &self.password);
        if let Some(server) = &self.server {
            source.server = server.clone();
        }
        if let Some(ns) = &self.ns {
            sql.namespace = ns.clone();
        }
        if let Some(with_schema) = self.with_schema {
            sql.include_schema = with_schema;
        }
        if let Some(output) = &self.output {
            sql.output = output.clone();
        }
    }
}

#[derive(Args, Debug)]
struct StaticMapArgs {
    /// Directory to describe
    #[arg(long, value_name = "DIR")]
    root: PathBuf,

    /// Namespace of the generated modules [default: generated::static_map]
    #[arg(long, value_name = "NAMESPACE")]
    ns: Option<String>,

    /// Output file [default: StaticMap.generated.rs]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,
}

impl StaticMapArgs {
    fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(ns) = &self.ns {
            config.static_map.namespace = ns.clone();
        }
        if let Some(output) = &self.output {
            config.static_map.output = output.clone();
        }
    }
}

fn override_with(target: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

/// Initialize tracing; logs go to stderr so stdout stays free for output.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,declgen=info".to_string(),
            2 => "info,declgen=debug".to_string(),
            _ => "debug,declgen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, GeneratorError> {
    match path {
        Some(path) => GeneratorConfig::load(path),
        None => Ok(GeneratorConfig::default()),
    }
}

fn emit(generated: &Generated, output: &Path, dry_run: bool) -> Result<(), GeneratorError> {
    if dry_run {
        print!("{}", generated.code);
        return Ok(());
    }

    write_atomic(output, &generated.code)?;
    eprintln!(
        "{} {} declarations to {}",
        "Generated".green().bold(),
        generated.classes,
        output.display().to_string().cyan()
    );
    Ok(())
}

fn run(cli: Cli) -> Result<(), GeneratorError> {
    let mut config = load_config(cli.config.as_deref())?;
    let provenance = Provenance::now();

    match cli.command {
        Commands::Sql(args) => {
            args.apply(&mut config);
            let catalog_dir = args.catalog_dir;

            let generated = generate_sql(&config, &provenance, |target| {
                let export = CatalogExport::for_target(&catalog_dir, target)?;
                tracing::info!(path = %export.path().display(), "Reading catalog export");
                Ok(Box::new(export) as Box<dyn MetadataProvider>)
            })?;

            emit(&generated, &config.sql.output, args.dry_run)
        }
        Commands::StaticMap(args) => {
            args.apply(&mut config);
            let generated = generate_static_map(&args.root, &config, &provenance)?;
            emit(&generated, &config.static_map.output, args.dry_run)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
