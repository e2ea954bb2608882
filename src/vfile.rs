use crate::{
    errors::IoError,
    status::Status,
    storage::{FsStorage, Storage},
};
use extkind::Classifier;
use miette::Diagnostic;
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum VirtualFileError {
    #[error("origin path is empty")]
    #[diagnostic(
        code(vfile::vfile::empty_origin_path),
        help("A virtual file needs the absolute path of its source")
    )]
    EmptyOriginPath,

    #[error("origin path must be absolute: '{path}'")]
    #[diagnostic(
        code(vfile::vfile::relative_origin_path),
        help("Resolve the path against the project root before creating the virtual file")
    )]
    RelativeOriginPath { path: PathBuf },

    #[error("extension '{extension}' contains a path separator")]
    #[diagnostic(
        code(vfile::vfile::invalid_extension),
        help("Pass only the extension, such as `css`, without any directory part")
    )]
    InvalidExtension { extension: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),
}

/// File content held in memory.
///
/// Text files are decoded once into a `String`; everything else is kept byte-for-byte so
/// it can be copied without corruption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}
impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }
}
impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
impl From<Vec<u8>> for Content {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(value)
    }
}
impl From<&[u8]> for Content {
    fn from(value: &[u8]) -> Self {
        Self::Binary(value.to_vec())
    }
}

/// Extension of `path` without the leading dot, or `""` when it has none.
fn extension_of(path: &Path) -> &str {
    path.extension().and_then(OsStr::to_str).unwrap_or("")
}

/// Replaces the trailing extension of `path` with `extension`.
///
/// Only the final extension is touched: `/a/scss/b.scss` becomes `/a/scss/b.css`. A path
/// without an extension gains one, and a leading `.` on `extension` is ignored. An empty
/// `extension` removes the current one along with its dot.
///
/// # Errors
///
/// Returns [`VirtualFileError::InvalidExtension`] if `extension` contains a path separator.
pub fn change_extension(path: &Path, extension: &str) -> Result<PathBuf, VirtualFileError> {
    if extension.chars().any(std::path::is_separator) {
        return Err(VirtualFileError::InvalidExtension {
            extension: extension.to_string(),
        });
    }

    let extension = extension.strip_prefix('.').unwrap_or(extension);
    let mut changed = path.to_path_buf();
    changed.set_extension(extension);

    Ok(changed)
}

/// A single source file as it moves through a build pipeline.
///
/// A virtual file pairs an *origin* (the absolute path it was read from and the content
/// that was on disk) with a *target* (the path and content a writer should emit).
/// Transformation stages work on the target only, so a `.scss` origin can end up as a
/// `.css` target without the source being read twice.
///
/// Origin content is fetched lazily: the first call to [`VirtualFile::origin_content`]
/// reads the file through the [`Storage`] collaborator and mirrors the result into the
/// target content. Storage is read at most once per virtual file, even when that read
/// fails. Origin content given to the builder, or content assigned through either
/// setter, skips the read entirely. Target content given to the builder does not: the
/// fetch replaces it with what was read.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use vfile::{Catalog, Classifier, MemoryStorage, VirtualFile};
///
/// let storage = Arc::new(MemoryStorage::new());
/// storage.insert("/proj/widget/p2.scss", "#p2{a{color:blue}}");
///
/// let classifier = Classifier::new(Catalog::parse("css,scss"), Catalog::default());
/// let mut file = VirtualFile::builder("/proj/widget/p2.scss")
///     .classifier(Arc::new(classifier))
///     .storage(storage.clone())
///     .build()?;
///
/// let origin = file.origin_content()?.and_then(|c| c.as_text()).map(str::to_owned);
/// assert_eq!(origin.as_deref(), Some("#p2{a{color:blue}}"));
///
/// file.set_target_content("#p2 a{color:blue}\n");
/// file.change_target_type("css")?;
/// assert_eq!(file.target_path(), std::path::Path::new("/proj/widget/p2.css"));
/// assert_eq!(storage.reads(), 1);
/// # Ok::<(), vfile::VirtualFileError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VirtualFile {
    origin_path: PathBuf,
    origin_content: Option<Content>,
    target_path: Option<PathBuf>,
    target_content: Option<Content>,
    fetched: bool,
    status: Status,
    classifier: Arc<Classifier>,
    storage: Arc<dyn Storage>,
}
impl VirtualFile {
    /// Creates a virtual file read from the local file system.
    ///
    /// # Errors
    ///
    /// Returns a [`VirtualFileError`] if `origin_path` is empty or not absolute.
    pub fn new(
        origin_path: impl Into<PathBuf>,
        classifier: Arc<Classifier>,
    ) -> Result<Self, VirtualFileError> {
        Self::builder(origin_path).classifier(classifier).build()
    }

    pub fn builder(origin_path: impl Into<PathBuf>) -> VirtualFileBuilder {
        VirtualFileBuilder::new(origin_path)
    }

    pub fn origin_path(&self) -> &Path {
        &self.origin_path
    }
    /// Returns the origin content, reading it from storage on first access.
    ///
    /// Returns `Ok(None)` when no content exists, which happens once a previous read has
    /// failed or when only the target content was ever supplied.
    ///
    /// # Errors
    ///
    /// Returns a [`VirtualFileError::Io`] carrying the origin path if the read fails.
    /// The failure is not retried by later calls.
    pub fn origin_content(&mut self) -> Result<Option<&Content>, VirtualFileError> {
        self.fetch()?;

        Ok(self.origin_content.as_ref())
    }
    /// Replaces the origin content and suppresses any future storage read.
    pub fn set_origin_content(&mut self, content: impl Into<Content>) {
        self.fetched = true;
        self.origin_content = Some(content.into());
    }
    /// The output path, which is the origin path until something changes it.
    pub fn target_path(&self) -> &Path {
        self.target_path.as_deref().unwrap_or(&self.origin_path)
    }

    pub fn set_target_path(&mut self, path: impl Into<PathBuf>) {
        self.target_path = Some(path.into());
    }

    pub fn target_content(&self) -> Option<&Content> {
        self.target_content.as_ref()
    }
    /// Replaces the working content and suppresses any future storage read.
    pub fn set_target_content(&mut self, content: impl Into<Content>) {
        self.fetched = true;
        self.target_content = Some(content.into());
    }
    /// Extension of the origin path, without the leading dot.
    pub fn file_type(&self) -> &str {
        extension_of(&self.origin_path)
    }
    /// Extension of the target path, without the leading dot.
    pub fn target_type(&self) -> &str {
        extension_of(self.target_path())
    }
    /// Swaps the extension of the target path, leaving the origin path untouched.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualFileError::InvalidExtension`] if `extension` contains a path
    /// separator; the target path is left as it was.
    pub fn change_target_type(&mut self, extension: &str) -> Result<(), VirtualFileError> {
        let changed = change_extension(self.target_path(), extension).inspect_err(|error| {
            log::error!("{}: keeping target {}", error, self.target_path().display());
        })?;

        log::debug!(
            "target of {} changed to: {}",
            self.origin_path.display(),
            changed.display()
        );

        self.target_path = Some(changed);

        Ok(())
    }

    pub fn is_text_file(&self) -> bool {
        self.classifier.is_text_extension(self.file_type())
    }

    pub fn is_output_ignored(&self) -> bool {
        self.classifier.is_output_ignored(self.file_type())
    }

    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }
    /// Sets the status from its name (`"READY"`, `"DOING"`, `"DONE"` or `"WRITTEN"`).
    ///
    /// Unknown names are logged and leave the current status in place. Returns whether
    /// the status was applied.
    pub fn set_status_named(&mut self, name: &str) -> bool {
        match name.parse::<Status>() {
            Ok(status) => {
                self.status = status;
                true
            }
            Err(error) => {
                log::error!(
                    "{}: keeping status {} for {}",
                    error,
                    self.status,
                    self.origin_path.display()
                );
                false
            }
        }
    }

    fn fetch(&mut self) -> Result<(), IoError> {
        if self.fetched || self.origin_content.is_some() {
            return Ok(());
        }

        // set before reading so a failed read is never retried
        self.fetched = true;

        let bytes = self.storage.read(&self.origin_path)?;

        let content = if self.is_text_file() {
            match String::from_utf8(bytes) {
                Ok(text) => Content::Text(text),
                Err(error) => {
                    log::warn!(
                        "{} is not valid UTF-8, replacing invalid sequences",
                        self.origin_path.display()
                    );
                    Content::Text(String::from_utf8_lossy(error.as_bytes()).into_owned())
                }
            }
        } else {
            Content::Binary(bytes)
        };

        log::debug!(
            "fetched {} ({} bytes)",
            self.origin_path.display(),
            content.len()
        );

        self.target_content = Some(content.clone());
        self.origin_content = Some(content);

        Ok(())
    }
}

/// Builds a [`VirtualFile`], optionally with content that is already in memory.
///
/// Without an explicit classifier nothing is treated as text; without an explicit storage
/// the local file system is used.
#[derive(Debug, Default)]
pub struct VirtualFileBuilder {
    origin_path: PathBuf,
    origin_content: Option<Content>,
    target_path: Option<PathBuf>,
    target_content: Option<Content>,
    classifier: Option<Arc<Classifier>>,
    storage: Option<Arc<dyn Storage>>,
}
impl VirtualFileBuilder {
    pub fn new(origin_path: impl Into<PathBuf>) -> Self {
        Self {
            origin_path: origin_path.into(),
            ..Self::default()
        }
    }
    /// Supplies the origin content so the file is never read from storage.
    pub fn origin_content(mut self, content: impl Into<Content>) -> Self {
        self.origin_content = Some(content.into());
        self
    }

    pub fn target_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_path = Some(path.into());
        self
    }

    pub fn target_content(mut self, content: impl Into<Content>) -> Self {
        self.target_content = Some(content.into());
        self
    }

    pub fn classifier(mut self, classifier: Arc<Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }
    /// # Errors
    ///
    /// Returns a [`VirtualFileError`] if the origin path is empty or not absolute.
    pub fn build(self) -> Result<VirtualFile, VirtualFileError> {
        if self.origin_path.as_os_str().is_empty() {
            log::error!("virtual file origin path is empty");

            return Err(VirtualFileError::EmptyOriginPath);
        }

        if !self.origin_path.is_absolute() {
            log::error!(
                "virtual file origin path must be absolute: {}",
                self.origin_path.display()
            );

            return Err(VirtualFileError::RelativeOriginPath {
                path: self.origin_path,
            });
        }

        Ok(VirtualFile {
            origin_path: self.origin_path,
            origin_content: self.origin_content,
            target_path: self.target_path,
            target_content: self.target_content,
            fetched: false,
            status: Status::Ready,
            classifier: self.classifier.unwrap_or_default(),
            storage: self
                .storage
                .unwrap_or_else(|| Arc::new(FsStorage) as Arc<dyn Storage>),
        })
    }
}
