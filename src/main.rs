use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod config;
mod error;
mod exporter;
mod lister;
mod logger;
mod parser;
mod renamer;
mod report;
mod tags;

use config::Config;
use error::Result;
use logger::Logger;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Root directory of the library to process
    #[arg(long)]
    root: Option<PathBuf>,

    /// Directory given only the substitution pass; repeatable, handled in order
    #[arg(long)]
    sweep: Vec<PathBuf>,

    /// TOML file overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the CSV manifest of parsed filenames
    #[arg(long, default_value_t = false)]
    export: bool,

    /// Apply the artist-name substitution table
    #[arg(long, default_value_t = false)]
    substitute: bool,

    /// Collapse stray spaces in the artist segment
    #[arg(long, default_value_t = false)]
    normalize_spaces: bool,

    /// Turn underscores into spaces
    #[arg(long, default_value_t = false)]
    normalize_underscores: bool,

    /// Write parsed filename fields into the embedded tags
    #[arg(long, default_value_t = false)]
    write_tags: bool,

    /// Rebuild filenames from the embedded tags
    #[arg(long, default_value_t = false)]
    rename_from_tags: bool,

    /// Just scan, print output and do nothing
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.dry_run = args.dry_run;
    let logger = Logger::new(&config.log_file);

    for dir in &args.sweep {
        let report = renamer::substitution_pass(&config, &logger, dir)?;
        logger.log(&report.summary())?;
    }

    if let Some(root) = &args.root {
        run_passes(&args, &config, &logger, root)?;
    }

    pause()?;
    Ok(())
}

fn run_passes(args: &Args, config: &Config, logger: &Logger, root: &Path) -> Result<()> {
    if args.export {
        let report = exporter::export_pass(config, logger, root)?;
        logger.log(&report.summary())?;
    }
    if args.substitute {
        let report = renamer::substitution_pass(config, logger, root)?;
        logger.log(&report.summary())?;
    }
    if args.normalize_spaces {
        let report = renamer::space_pass(config, logger, root)?;
        logger.log(&report.summary())?;
    }
    if args.normalize_underscores {
        let report = renamer::underscore_pass(config, logger, root)?;
        logger.log(&report.summary())?;
    }
    if args.write_tags {
        let report = tags::write_tags_pass(config, logger, root)?;
        logger.log(&report.summary())?;
    }
    if args.rename_from_tags {
        let report = tags::rename_from_tags_pass(config, logger, root)?;
        logger.log(&report.summary())?;
    }
    Ok(())
}

fn pause() -> Result<()> {
    print!("Press the enter key to exit.");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }
}
