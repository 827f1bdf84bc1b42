//! Commit classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The release-note type of a commit.
///
/// Each variant keeps the tag it was parsed from so that aliases such as
/// `doc`/`docs` or `feat`/`feature` round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommitType {
    /// `breaking-change`
    BreakingChange,

    /// `doc` or `docs`.
    Docs(String),

    /// `feat` or `feature`.
    Feature(String),

    /// `fix`
    Fix,

    /// A known type that is not user-facing (`chore`, `build`, `ci`, ...).
    Other(String),

    /// A type prefix that is not part of any known set.
    Unrecognized(String),
}

impl CommitType {
    /// Tag used for breaking changes.
    pub const BREAKING_CHANGE: &'static str = "breaking-change";

    /// Tags classified as documentation.
    pub const DOC_TAGS: &'static [&'static str] = &["doc", "docs"];

    /// Tags classified as features.
    pub const FEATURE_TAGS: &'static [&'static str] = &["feat", "feature"];

    /// Tags classified as non user-facing changes.
    pub const OTHER_TAGS: &'static [&'static str] = &[
        "spec", "build", "test", "chore", "deps", "refactor", "tools", "vendor", "perf", "style",
        "ci",
    ];

    /// Builds a type from a tag, case-insensitively.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        let key = tag.as_str();

        if key == Self::BREAKING_CHANGE {
            Self::BreakingChange
        } else if key == "fix" {
            Self::Fix
        } else if Self::DOC_TAGS.contains(&key) {
            Self::Docs(tag)
        } else if Self::FEATURE_TAGS.contains(&key) {
            Self::Feature(tag)
        } else if Self::OTHER_TAGS.contains(&key) {
            Self::Other(tag)
        } else {
            Self::Unrecognized(tag)
        }
    }

    /// Returns true unless the type is [`CommitType::Unrecognized`].
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Returns true for the `chore` tag.
    #[must_use]
    pub fn is_chore(&self) -> bool {
        matches!(self, Self::Other(tag) if tag == "chore")
    }

    /// Returns the tag this type was built from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BreakingChange => Self::BREAKING_CHANGE,
            Self::Fix => "fix",
            Self::Docs(tag) | Self::Feature(tag) | Self::Other(tag) | Self::Unrecognized(tag) => {
                tag
            }
        }
    }

    /// Returns the release-note section this type is rendered under.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::BreakingChange => Category::Breaking,
            Self::Docs(_) => Category::Docs,
            Self::Feature(_) => Category::Feature,
            Self::Fix => Category::Fix,
            Self::Other(_) => Category::Other,
            Self::Unrecognized(_) => Category::Unknown,
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A release-note section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Breaking,
    Docs,
    Feature,
    Fix,
    Other,
    Unknown,
}

impl Category {
    /// Classifies an optional commit type; a missing type is unknown.
    #[must_use]
    pub fn of(commit_type: Option<&CommitType>) -> Self {
        commit_type.map_or(Self::Unknown, CommitType::category)
    }
}
