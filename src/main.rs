//! logmap - CLI entry point

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use logmap::{render, LogFile, RenderMode, SiteMapConfig, TreeBuilder};

#[derive(Parser)]
#[command(name = "logmap")]
#[command(about = "Generate a nested sitemap from an Apache access log")]
#[command(version)]
struct Cli {
    /// Path to the access log file
    logfile: Option<String>,

    /// Load filter tables and output settings from a TOML file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the rendered map to this path instead of the default
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output flavor (overrides the configured one)
    #[arg(long, value_enum)]
    mode: Option<RenderMode>,

    /// Print the built tree as JSON before writing the map
    #[arg(long)]
    dump_tree: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let Some(logfile) = cli.logfile.clone() else {
        println!("No logfile given");
        return ExitCode::FAILURE;
    };

    match run(&logfile, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Open and write failures are user-facing and go to stdout.
            println!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(logfile: &str, cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => SiteMapConfig::load(path)?,
        None => SiteMapConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(output) = &cli.output {
        config.output_path = Some(output.clone());
    }

    let log = LogFile::open(logfile)?;
    let mut builder = TreeBuilder::new(&config);
    for record in log.records() {
        let record =
            record.with_context(|| format!("There was an error reading '{}'", logfile))?;
        if let Some(record) = record {
            builder.insert(&record);
        }
    }
    let root = builder.finish();

    if cli.dump_tree {
        let json =
            serde_json::to_string_pretty(&root).context("Failed to serialize the site tree")?;
        println!("{}", json);
    }

    let lines = render(&root, &config);
    let out = config.resolved_output();
    fs::write(&out, lines.join("\n"))
        .with_context(|| format!("Failed to write map file: {:?}", out))?;

    Ok(())
}
