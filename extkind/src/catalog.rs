use indexmap::IndexSet;
use std::fmt;

/// An ordered set of file extension tokens.
///
/// Tokens are normalized on the way in: surrounding whitespace is trimmed, a single
/// leading `.` is dropped and the result is lowercased. Lookups normalize the same way,
/// so membership is case-insensitive and always matches a whole token (`css` never
/// matches `scss`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tokens: IndexSet<String>,
}

fn normalize(token: &str) -> String {
    let trimmed = token.trim();
    trimmed
        .strip_prefix('.')
        .unwrap_or(trimmed)
        .to_lowercase()
}

impl Catalog {
    /// Builds a catalog from a list of tokens, keeping first-seen order.
    ///
    /// An explicitly listed empty token is kept, which makes extensionless files match.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|token| normalize(token.as_ref()))
                .collect(),
        }
    }

    /// Parses a comma-joined list such as `"html, css,scss"`.
    ///
    /// Empty pieces are skipped, so `""` is an empty catalog and a trailing comma does
    /// not list the empty extension.
    pub fn parse(joined: &str) -> Self {
        Self::from_tokens(joined.split(',').filter(|piece| !piece.trim().is_empty()))
    }

    /// Exact, case-insensitive token membership.
    pub fn contains(&self, extension: &str) -> bool {
        self.tokens.contains(&normalize(extension))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over the normalized tokens in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl<T: AsRef<str>> FromIterator<T> for Catalog {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
