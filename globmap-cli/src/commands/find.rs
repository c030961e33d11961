//! Find command implementation

use super::{MappingArgs, OutputArgs};
use crate::error::CliError;
use crate::output::{create_formatter, open_writer, OutputFormat};
use anyhow::Result;
use clap::Args;
use globmap_engine::{Filter, FindOptions, FindRequest, MappingFinder};
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the find command
#[derive(Debug, Args)]
pub struct FindArgs {
    /// Glob patterns; a leading "!" excludes (default: `src` from the config)
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Keep only matches of this kind
    #[arg(long, value_enum)]
    pub filter: Option<FilterArg>,

    /// Directory patterns are resolved against
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Match slash-free patterns against file names at any depth
    #[arg(long)]
    pub match_base: bool,

    /// Let wildcards match names starting with "."
    #[arg(long)]
    pub dot: bool,

    /// Print matched paths instead of a mapping
    #[arg(long)]
    pub list: bool,

    /// With --list, keep srcBase on the printed paths
    #[arg(long, requires = "list")]
    pub prefix_base: bool,

    #[command(flatten)]
    pub mapping: MappingArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Match kinds accepted by `--filter`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FilterArg {
    /// Regular files
    IsFile,
    /// Directories
    IsDirectory,
    /// Symbolic links
    IsSymlink,
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::IsFile => Filter::IsFile,
            FilterArg::IsDirectory => Filter::IsDirectory,
            FilterArg::IsSymlink => Filter::IsSymlink,
        }
    }
}

impl FindArgs {
    /// Execute the find command
    pub async fn execute(&self) -> Result<()> {
        self.output.init_logging()?;

        let request = self.request()?;
        log::info!("Searching for {:?}", request.patterns());
        let finder = MappingFinder::new();

        if self.list {
            let paths = finder.find(request).await?;
            log::info!("Matched {} path(s)", paths.len());
            let writer = open_writer(self.output.output.as_deref())?;
            return write_paths(self.output.format, writer, &paths);
        }

        let mapping = finder.find_mapping(request).await?;
        log::info!("Produced {} destination(s)", mapping.len());
        let writer = open_writer(self.output.output.as_deref())?;
        create_formatter(self.output.format, writer).write_mapping(&mapping)
    }

    /// Combine config, flags and patterns into one request
    fn request(&self) -> Result<FindRequest> {
        let mut options = self.mapping.resolve()?;
        self.apply_flags(&mut options);

        if !self.patterns.is_empty() {
            return Ok(FindRequest::new(self.patterns.clone(), options));
        }
        if options.src.is_empty() {
            return Err(CliError::MissingPatterns.into());
        }
        Ok(FindRequest::from(options))
    }

    fn apply_flags(&self, options: &mut FindOptions) {
        if let Some(filter) = self.filter {
            options.filter = Some(filter.into());
        }
        if let Some(cwd) = &self.cwd {
            options.cwd = Some(cwd.clone());
        }
        options.match_base |= self.match_base;
        options.dot |= self.dot;
        options.prefix_base |= self.prefix_base;
    }
}

fn write_paths<W: Write>(format: OutputFormat, mut writer: W, paths: &[String]) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, paths)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            for path in paths {
                writeln!(writer, "{path}")?;
            }
        }
        OutputFormat::Markdown => {
            for path in paths {
                writeln!(writer, "- `{path}`")?;
            }
            writeln!(writer)?;
            writeln!(writer, "---")?;
            writeln!(writer, "*Total paths: {}*", paths.len())?;
        }
    }
    writer.flush()?;
    Ok(())
}
