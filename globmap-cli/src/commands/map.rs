//! Map command implementation

use super::{MappingArgs, OutputArgs};
use crate::output::{create_formatter, open_writer};
use anyhow::Result;
use clap::Args;
use globmap_core::build_mapping;

/// Arguments for the map command
#[derive(Debug, Args)]
pub struct MapArgs {
    /// Source paths to map, in order, relative to --src-base
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub mapping: MappingArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl MapArgs {
    /// Execute the map command
    pub fn execute(&self) -> Result<()> {
        self.output.init_logging()?;
        log::info!("Mapping {} source path(s)", self.paths.len());

        let options = self.mapping.resolve()?;
        let mapping = build_mapping(&self.paths, &options.mapping);
        log::info!("Produced {} destination(s)", mapping.len());

        let writer = open_writer(self.output.output.as_deref())?;
        create_formatter(self.output.format, writer).write_mapping(&mapping)
    }
}
