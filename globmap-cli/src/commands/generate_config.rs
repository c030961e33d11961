//! Generate config command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = "globmap.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        fs::write(&self.output, Self::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template written to {}", self.output.display());
        println!();
        println!("Next steps:");
        println!("1. Edit the patterns and mapping options");
        println!("2. Preview the mapping:");
        println!("   globmap find -c {} -f text", self.output.display());

        Ok(())
    }

    /// Template configuration content
    pub fn template() -> &'static str {
        r#"# globmap configuration
#
# Command-line flags override the values below.

# Patterns used when `globmap find` is given none. A leading "!" excludes.
src = ["**/*"]

# Directory the patterns are matched in. It is stripped from destinations.
# srcBase = "src"

# Directory prepended to every destination.
# destBase = "dist"

# Keep only the file name of each destination.
flatten = false

# Replacement extension, including its leading dot.
# ext = ".min.js"

# Where the extension starts: "first" or "last" dot of the file name.
extDot = "first"

# Keep only matches of one kind: "isFile", "isDirectory" or "isSymbolicLink".
filter = "isFile"

# Match slash-free patterns against file names at any depth.
matchBase = false

# Let wildcards match names starting with ".".
dot = false

# Rewrite each destination. Placeholders: {dest} {dir} {name} {stem} {ext}
# plus any custom key defined in this file or passed with --set.
# renameTemplate = "{channel}/{name}"
# channel = "stable"
"#
    }
}
