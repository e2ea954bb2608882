//! Virtual files for build pipelines.
//!
//! A [`VirtualFile`] tracks one source file from disk, through any number of content
//! transformations, to the path and content a writer should emit. The source is read
//! lazily and at most once; whether it is held as text or raw bytes, and whether it is
//! emitted at all, is decided by a [`Classifier`] built from configuration.
//!
//! ```rust
//! use std::sync::Arc;
//! use vfile::{Config, VirtualFile};
//!
//! let config = Config::from_toml_str(r#"
//!     [extensions]
//!     text = "html,css,scss,less,js"
//!     output_ignore = ["psd"]
//! "#)?;
//! let classifier = Arc::new(config.classifier());
//!
//! let mut file = VirtualFile::new("/proj/widget/p2.scss", classifier)?;
//! file.change_target_type("css")?;
//!
//! assert!(file.is_text_file());
//! assert_eq!(file.target_type(), "css");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod config;
pub mod errors;
pub mod status;
pub mod storage;
pub mod vfile;

pub use config::{Config, ConfigError};
pub use extkind::{Catalog, Classifier};
pub use status::{Status, StatusError};
pub use storage::{FsStorage, MemoryStorage, Storage};
pub use vfile::{change_extension, Content, VirtualFile, VirtualFileBuilder, VirtualFileError};
