// Extension classification for virtual files: text vs. binary, emitted vs. ignored.
pub use catalog::Catalog;
pub mod catalog;

/// Classifies file extensions against two catalogs supplied by configuration.
///
/// A classifier is immutable once built and holds no global state, so one instance can be
/// shared across every file of a build.
///
/// # Example
/// ```
/// use extkind::{Catalog, Classifier};
///
/// let classifier = Classifier::new(
///     Catalog::from_tokens(["css", "scss", "less"]),
///     Catalog::parse("psd,ai"),
/// );
///
/// assert!(classifier.is_text_extension("SCSS"));
/// assert!(!classifier.is_text_extension("png"));
/// assert!(classifier.is_output_ignored("psd"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classifier {
    /// Extensions whose files are safe to hold in memory as decoded strings.
    pub text: Catalog,
    /// Extensions whose files must never be emitted by a writer.
    pub output_ignored: Catalog,
}

impl Classifier {
    pub fn new(text: Catalog, output_ignored: Catalog) -> Self {
        Self {
            text,
            output_ignored,
        }
    }

    /// Returns `true` when `extension` is a whole token of the text catalog.
    ///
    /// Extensions missing from the catalog, including the empty one, are binary.
    pub fn is_text_extension(&self, extension: &str) -> bool {
        self.text.contains(extension)
    }

    /// Returns `true` when output for `extension` should be suppressed.
    pub fn is_output_ignored(&self, extension: &str) -> bool {
        self.output_ignored.contains(extension)
    }
}
