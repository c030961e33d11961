//! Single-path destination computation

use crate::options::{ExtDot, MappingOptions};
use crate::path;

/// Computes destination and source-lookup paths for one source at a time
#[derive(Debug, Clone, Copy)]
pub struct PathMapper<'a> {
    options: &'a MappingOptions,
}

impl<'a> PathMapper<'a> {
    /// Create a mapper over borrowed options
    pub fn new(options: &'a MappingOptions) -> Self {
        Self { options }
    }

    /// Options this mapper applies
    pub fn options(&self) -> &'a MappingOptions {
        self.options
    }

    /// Path used to read `source`: `srcBase` joined in front when set
    pub fn src_path(&self, source: &str) -> String {
        match self.options.src_base.as_deref() {
            Some(base) => path::join(base, source),
            None => path::to_slash(source),
        }
    }

    /// Destination for `source`
    ///
    /// Steps run in a fixed order: flatten, extension rewrite, `destBase`
    /// join, rename. `srcBase` never takes part.
    pub fn compute_dest(&self, source: &str) -> String {
        let options = self.options;
        let mut dest = path::to_slash(source);

        if options.flatten {
            dest = path::file_name(&dest).to_string();
        }

        if let Some(ext) = options.ext.as_deref() {
            dest = replace_extension(&dest, ext, options.ext_dot);
        }

        if let Some(base) = options.dest_base.as_deref() {
            dest = path::join(base, &dest);
        }

        if let Some(rename) = options.rename.as_ref() {
            dest = rename(&dest, options);
        }

        tracing::trace!(source, dest = %dest, "computed destination");
        dest
    }
}

/// Destination for `source` under `options`
pub fn compute_dest(source: &str, options: &MappingOptions) -> String {
    PathMapper::new(options).compute_dest(source)
}

/// Replace the extension of the final segment of `path` with `ext`
///
/// Leading dots of the file name are part of its stem, so `.gitignore` has
/// no extension and gets `ext` appended.
fn replace_extension(path: &str, ext: &str, ext_dot: ExtDot) -> String {
    let (dir, name) = path::split_file_name(path);
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    let rest = &name[leading_dots..];

    let split = match ext_dot {
        ExtDot::First => rest.find('.'),
        ExtDot::Last => rest.rfind('.'),
    };
    let stem_len = split.map_or(name.len(), |idx| leading_dots + idx);

    format!("{dir}{}{ext}", &name[..stem_len])
}
