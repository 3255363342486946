use std::{path::PathBuf, process};

use clap::{Parser, Subcommand};
use stringsheet::{DuplicatePolicy, EmptyCells, ParseOptions, Platform};
use stringsheet_cli::{
    Config,
    debug::run_debug_command,
    generate::{GenerateOptions, run_generate_command},
    to_sheet::{run_to_sheet_command, write_output},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,

    /// Config file (defaults to ./stringsheet.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate platform string files from a base sheet and an optional translation sheet.
    Generate {
        /// Base sheet with string_name and english_value columns (.csv or .tsv)
        #[arg(short, long)]
        base: PathBuf,

        /// Translation sheet with english_value followed by one column per locale
        #[arg(short, long)]
        translations: Option<PathBuf>,

        /// First data row to read, 0-based after the header
        #[arg(long)]
        start: Option<usize>,

        /// Last data row to read, inclusive
        #[arg(long)]
        end: Option<usize>,

        /// Target platform: android or ios
        #[arg(short, long)]
        platform: Option<Platform>,

        /// Directory the resource folders are written into
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Only write the file for this locale
        #[arg(short, long)]
        locale: Option<String>,

        /// Treat empty cells as explicit empty strings
        #[arg(long)]
        keep_empty: bool,

        /// Fail on repeated keys instead of keeping the last one
        #[arg(long)]
        strict: bool,
    },

    /// Convert an Android strings.xml or iOS .strings file to a CSV sheet.
    ToSheet {
        /// The platform file to convert
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the CSV; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input platform; inferred from the extension when omitted
        #[arg(short, long)]
        platform: Option<Platform>,

        /// Fail on repeated keys instead of keeping the last one
        #[arg(long)]
        strict: bool,
    },

    /// Read a platform file or base sheet and print it as JSON.
    Debug {
        /// The input file to read
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the JSON; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let config = Config::load(args.config.as_deref())?;

    match args.commands {
        Commands::Generate {
            base,
            translations,
            start,
            end,
            platform,
            out_dir,
            locale,
            keep_empty,
            strict,
        } => {
            let mut read = config.read;
            if keep_empty {
                read = read.with_empty_cells(EmptyCells::Preserve);
            }
            if strict {
                read = read.with_duplicates(DuplicatePolicy::Reject);
            }
            let platform = platform
                .or(config.generate.platform)
                .ok_or("no platform given; pass --platform or set generate.platform")?;
            let options = GenerateOptions {
                base,
                translations,
                start,
                end,
                platform,
                out_dir: out_dir
                    .or(config.generate.out_dir)
                    .unwrap_or_else(|| PathBuf::from(".")),
                locale,
                read,
            };
            let written = run_generate_command(&options)?;
            for path in &written {
                println!("✅ Wrote {}", path.display());
            }
        }
        Commands::ToSheet {
            input,
            output,
            platform,
            strict,
        } => {
            let mut options = ParseOptions::from(config.read);
            if strict {
                options = options.with_duplicates(DuplicatePolicy::Reject);
            }
            let csv = run_to_sheet_command(&input, platform, options)?;
            write_output(&csv, output.as_deref())?;
            if let Some(output) = output {
                println!("✅ Sheet written to: {}", output.display());
            }
        }
        Commands::Debug { input, output } => {
            let mut json = run_debug_command(&input, config.read)?;
            json.push('\n');
            write_output(&json, output.as_deref())?;
            if let Some(output) = output {
                println!("✅ Debug output written to: {}", output.display());
            }
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
