//! Validated slug identity.
//!
//! A [`Slug`] is the unique key of an item within one collection. Two items
//! with the same slug in the same collection are the same logical entity —
//! everything the reconciler does keys off this type.
//!
//! Slugs are lowercase `a-z0-9`, hyphens, and underscores, with at most one
//! `/` namespace separator (registry-style slugs like `twentytwentyfive/hero`
//! are namespaced). [`Slug::new`] rejects anything else; [`Slug::sanitize`]
//! normalizes untrusted input the way the import boundary needs it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum slug length in bytes.
pub const MAX_SLUG_LEN: usize = 200;

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A value failed slug validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// The value that was rejected.
    pub value: String,
    /// Why the value is invalid.
    pub reason: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid slug '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// Slug
// ---------------------------------------------------------------------------

/// A validated item slug.
///
/// Construction goes through [`Slug::new`] (strict, for trusted data such as
/// the stored library) or [`Slug::sanitize`] (lossy, for imported payloads).
/// The inner string is guaranteed non-empty and within the character set.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate `value` as a slug.
    ///
    /// # Errors
    /// Returns [`ValidationError`] if the value is empty, too long, contains
    /// a character outside `a-z0-9_-/`, has more than one `/`, or starts or
    /// ends with a separator.
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        let err = |reason: &str| ValidationError {
            value: value.to_owned(),
            reason: reason.to_owned(),
        };

        if value.is_empty() {
            return Err(err("must not be empty"));
        }
        if value.len() > MAX_SLUG_LEN {
            return Err(err("exceeds 200 characters"));
        }
        if let Some(c) = value
            .chars()
            .find(|&c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '/')))
        {
            return Err(err(&format!("contains disallowed character '{c}'")));
        }
        if value.matches('/').count() > 1 {
            return Err(err("contains more than one namespace separator"));
        }
        let is_sep = |c: char| matches!(c, '-' | '_' | '/');
        if value.starts_with(is_sep) || value.ends_with(is_sep) {
            return Err(err("must not start or end with a separator"));
        }
        Ok(Self(value.to_owned()))
    }

    /// Normalize untrusted input into a slug, or `None` if nothing survives.
    ///
    /// Lowercases, keeps only `a-z0-9_-/` (dropping any `/` after the first),
    /// trims leading/trailing separators, and truncates to the length limit.
    /// Items whose slug sanitizes to `None` are dropped at the boundary.
    #[must_use]
    pub fn sanitize(value: &str) -> Option<Self> {
        let mut out = String::with_capacity(value.len().min(MAX_SLUG_LEN));
        let mut seen_sep = false;
        for c in value.chars() {
            let c = c.to_ascii_lowercase();
            match c {
                'a'..='z' | '0'..='9' | '-' | '_' => out.push(c),
                '/' if !seen_sep => {
                    seen_sep = true;
                    out.push(c);
                }
                _ => {}
            }
            if out.len() >= MAX_SLUG_LEN {
                break;
            }
        }
        let trimmed = out.trim_matches(|c| matches!(c, '-' | '_' | '/'));
        Self::new(trimmed).ok()
    }

    /// The slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
