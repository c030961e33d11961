//! CLI command implementations

use crate::config::{ConfigValues, RENAME_TEMPLATE_KEY};
use crate::output::OutputFormat;
use crate::rename;
use anyhow::Result;
use clap::{Args, Subcommand};
use globmap_engine::FindOptions;
use std::path::PathBuf;

pub mod find;
pub mod generate_config;
pub mod map;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Map source paths given on the command line
    Map(map::MapArgs),

    /// Expand glob patterns and map every match
    Find(find::FindArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Run the selected command
    pub async fn execute(&self) -> Result<()> {
        match self {
            Commands::Map(args) => args.execute(),
            Commands::Find(args) => args.execute().await,
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Options shared by the mapping commands
#[derive(Debug, Clone, Default, Args)]
pub struct MappingArgs {
    /// Directory sources are relative to; joined onto each recorded source
    #[arg(long, value_name = "DIR")]
    pub src_base: Option<String>,

    /// Directory prepended to every destination
    #[arg(long, value_name = "DIR")]
    pub dest_base: Option<String>,

    /// Keep only the file name of each destination
    #[arg(long)]
    pub flatten: bool,

    /// Replacement extension, including its leading dot
    #[arg(long, value_name = "EXT", allow_hyphen_values = true)]
    pub ext: Option<String>,

    /// Which dot of the file name starts the extension
    #[arg(long, value_name = "DOT", value_parser = ["first", "last"])]
    pub ext_dot: Option<String>,

    /// Rename template, e.g. "build/all.{ext}"
    #[arg(long, value_name = "TEMPLATE")]
    pub rename: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extra value for rename templates, as KEY=VALUE
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

impl MappingArgs {
    /// Merge the config file, `--set` pairs and flags, in that order
    pub fn load_config(&self) -> Result<ConfigValues> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                ConfigValues::load(path)?
            }
            None => ConfigValues::new(),
        };

        for pair in &self.set {
            config.set_pair(pair)?;
        }
        if let Some(base) = &self.src_base {
            config.set("srcBase", base.as_str());
        }
        if let Some(base) = &self.dest_base {
            config.set("destBase", base.as_str());
        }
        if self.flatten {
            config.set("flatten", true);
        }
        if let Some(ext) = &self.ext {
            config.set("ext", ext.as_str());
        }
        if let Some(ext_dot) = &self.ext_dot {
            config.set("extDot", ext_dot.as_str());
        }
        if let Some(template) = &self.rename {
            config.set(RENAME_TEMPLATE_KEY, template.as_str());
        }

        Ok(config)
    }

    /// Resolve everything into finder options with the rename hook installed
    pub fn resolve(&self) -> Result<FindOptions> {
        let mut config = self.load_config()?;
        let template = config.take_rename_template()?;
        let mut options = FindOptions::from_value(config.into_value())?;

        if let Some(template) = template {
            options.mapping.rename = Some(rename::compile(&template, &options.mapping)?);
        }

        log::debug!("Resolved options: {:?}", options);
        Ok(options)
    }
}

/// Output and logging options
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl OutputArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()?;
        }

        Ok(())
    }
}
