mod commands;
mod exporter;
mod selection;
mod util;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mdlsplit",
    version,
    about = "Split an extracted addon into one self-contained folder per model"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML file with collector options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also try materials named after the model's folder and file name
    #[arg(long, global = true)]
    name_hints: bool,

    /// Also scan sidecar files (.vvd, .phy, ...) for material names
    #[arg(long, global = true)]
    scan_sidecars: bool,

    /// Shortest string the model scanner keeps
    #[arg(long, global = true)]
    min_token_len: Option<usize>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Simple flat list of files
    Flat,
    /// Files grouped by role
    Tree,
    /// JSON output
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List every model under the asset root
    List {
        #[arg(default_value = ".")]
        root: PathBuf,
    },
    /// Show the files one model depends on
    Deps {
        /// Model path (e.g. models/props/chair.mdl) or its number from `list`
        model: String,
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Flat)]
        format: OutputFormat,
        #[arg(
            long,
            help = "Use ASCII characters instead of Unicode box characters for tree output"
        )]
        ascii: bool,
    },
    /// Export selected models into EXPORTED<n> folders
    Export {
        #[arg(default_value = ".")]
        root: PathBuf,
        /// Selection such as "1,5-7,12" or "all"; prompts when omitted
        #[arg(short, long)]
        select: Option<String>,
        /// Parent folder for the exports (defaults to the asset root)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = util::load_options(
        cli.config.as_deref(),
        cli.name_hints,
        cli.scan_sidecars,
        cli.min_token_len,
    )?;

    match cli.command {
        Commands::List { root } => commands::cmd_list(root),
        Commands::Deps {
            model,
            root,
            format,
            ascii,
        } => commands::cmd_deps(root, model, format, ascii, options),
        Commands::Export { root, select, out } => commands::cmd_export(root, select, out, options),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
