use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use autobuild_scm::{config, get_version, ui, Backend, ScmClient};

/// Value printed on stdout
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Query {
    Version,
    Revision,
    Url,
    Branch,
}

impl Query {
    fn as_str(self) -> &'static str {
        match self {
            Query::Version => "version",
            Query::Revision => "revision",
            Query::Url => "remote url",
            Query::Branch => "branch",
        }
    }
}

#[derive(clap::Parser)]
#[command(
    name = "autobuild-scm",
    about = "Resolve a package version from git tags, distance and working tree state"
)]
struct Args {
    #[arg(default_value = ".", help = "Directory to resolve from")]
    path: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Query::Version, help = "Value to print")]
    query: Query,

    #[arg(long, value_enum, help = "Override the configured git backend")]
    backend: Option<Backend>,

    #[arg(long, help = "Fail when no value can be resolved")]
    require: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if args.version {
        println!("autobuild-scm {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = config::load_config(args.config.as_deref())
        .context("Error loading config")?
        .with_env()?;
    if let Some(backend) = args.backend {
        config.backend = backend;
    }

    let value = match args.query {
        Query::Version => get_version(&args.path, &config)?,
        Query::Revision => ScmClient::from_config(&args.path, &config).revision()?,
        Query::Url => ScmClient::from_config(&args.path, &config).url()?,
        Query::Branch => ScmClient::from_config(&args.path, &config).branch()?,
    };

    match value {
        Some(value) => println!("{}", value),
        None => {
            let message = ui::absent_message(args.query.as_str(), &args.path.display().to_string());
            if args.require {
                anyhow::bail!(message);
            }
            ui::display_warning(&message);
        }
    }

    Ok(())
}
