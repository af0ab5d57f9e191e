// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Command-line wrapper: reads a plateau description from a file or stdin, drives the rovers, and
//! prints where they ended up.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::info;
use mars_rovers::Deployment;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs, io};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    /// One `X Y D` line per rover.
    Text,
    /// A JSON array of rover reports.
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "mars-rovers",
    version,
    about = "Drive rovers across a plateau and report where they end up"
)]
struct Cli {
    /// Plateau description to read; stdin is read when absent.
    input: Option<PathBuf>,

    /// How to print the final rover states.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log more (-v for debug, -vv for trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).with_context(|| {
            format!(
                "Failed to read the plateau description from {}",
                path.display()
            )
        }),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read the plateau description from stdin")?;
            Ok(input)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let input = read_input(cli.input.as_deref())?;
    let deployment: Deployment<u64> = input.parse()?;
    info!(
        "driving {} rovers on a {} x {} plateau",
        deployment.rovers().len(),
        deployment.plateau().width(),
        deployment.plateau().height()
    );
    let reports = deployment.run()?;

    match cli.format {
        Format::Text => {
            for report in &reports {
                println!("{report}");
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }
    Ok(())
}
