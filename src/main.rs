use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{LevelFilter, info};
use parser_scanner::{Scanner, Value};

use resource_scanner::{
    Format,
    ResourceScanner,
    ScanConfig,
    Schema,
    fix_resource_file,
    parse_resource_file,
    text_client_entries,
    write_resource_file,
};

#[derive(Parser, Debug)]
#[command(name = "resource-scanner")]
#[command(about = "Parse and rewrite resource files while keeping their layout", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the value of a file as JSON
    Parse {
        file: PathBuf,
        #[command(flatten)]
        schema: SchemaArgs,
    },
    /// Rewrite a file so that it parses to the given JSON value
    Fix {
        file: PathBuf,
        /// JSON file holding the new value
        #[arg(long)]
        value: PathBuf,
        /// Overwrite the file instead of printing the result
        #[arg(long)]
        in_place: bool,
        #[command(flatten)]
        schema: SchemaArgs,
    },
    /// Check that every file of a directory survives a parse/fix round trip
    Verify {
        dir: PathBuf,
        #[command(flatten)]
        schema: SchemaArgs,
        /// File extensions to check
        #[arg(long = "ext", value_delimiter = ',', default_value = "inc")]
        extensions: Vec<String>,
        /// Descend into subdirectories
        #[arg(long)]
        recursive: bool,
        /// Number of worker threads, all cores when omitted
        #[arg(long)]
        threads: Option<usize>,
        /// Do not draw a progress bar
        #[arg(long)]
        no_progress: bool,
    },
    /// Print a built-in format as a schema file
    Schema {
        #[arg(value_enum)]
        format: Format,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SchemaArgs {
    /// JSON schema file describing the scanner
    #[arg(long)]
    schema: Option<PathBuf>,
    /// Built-in format
    #[arg(long, value_enum)]
    format: Option<Format>,
}

impl SchemaArgs {
    fn scanner(&self) -> Result<Scanner> {
        let schema = match (&self.schema, self.format) {
            (Some(path), _) => Schema::load(path)?,
            (None, Some(format)) => format.schema(),
            (None, None) => bail!("Either --schema or --format is required"),
        };
        Ok(schema.build())
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read value {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid value {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse { file, schema } => {
            let value = parse_resource_file(&file, &schema.scanner()?)?;
            if schema.format == Some(Format::TextClient) {
                let entries = text_client_entries(&value)
                    .with_context(|| format!("Unexpected format in {}", file.display()))?;
                info!("{} text client entries", entries.len());
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Fix {
            file,
            value,
            in_place,
            schema,
        } => {
            let scanner = schema.scanner()?;
            let value = read_value(&value)?;
            if in_place {
                write_resource_file(&file, &scanner, &value)?;
            } else {
                print!("{}", fix_resource_file(&file, &scanner, &value)?);
            }
        }
        Commands::Verify {
            dir,
            schema,
            extensions,
            recursive,
            threads,
            no_progress,
        } => {
            let scanner = schema.scanner()?;
            let defaults = ScanConfig::default();
            let config = ScanConfig {
                extensions,
                recursive,
                max_threads: threads.unwrap_or(defaults.max_threads),
                show_progress: !no_progress,
            };

            let report = ResourceScanner::with_config(&dir, &scanner, config).verify()?;
            for failure in report.failures() {
                println!("FAIL {}: {}", failure.path.display(), failure.outcome);
            }
            println!("{} of {} files passed", report.passed(), report.total());

            if !report.is_success() {
                bail!("{} files failed the round trip", report.total() - report.passed());
            }
        }
        Commands::Schema { format } => {
            println!("{}", format.schema().to_json()?);
        }
    }

    Ok(())
}
