//! Source-to-destination path mapping
//!
//! Given source paths and [`MappingOptions`], compute where each source
//! should be written and group sources that land on the same destination.
//!
//! ```
//! use globmap_core::{build_mapping, MappingEntry, MappingOptions};
//!
//! let options = MappingOptions::new().with_dest_base("dest").with_flatten(true);
//! let mapping = build_mapping(["a.txt", "bar/b.txt"], &options);
//!
//! assert_eq!(
//!     mapping,
//!     vec![
//!         MappingEntry::new("dest/a.txt", ["a.txt"]),
//!         MappingEntry::new("dest/b.txt", ["bar/b.txt"]),
//!     ]
//! );
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod mapper;
pub mod options;
pub mod path;

// Re-export key types
pub use builder::{build_mapping, Mapping, MappingBuilder, MappingEntry};
pub use error::{CoreError, Result};
pub use mapper::{compute_dest, PathMapper};
pub use options::{ExtDot, MappingOptions, RenameFn};
