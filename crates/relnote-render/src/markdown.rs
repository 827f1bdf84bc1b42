//! Markdown renderer.

use std::collections::BTreeMap;
use std::fmt::Write;

use relnote_commit::{Category, CommitRecord, RepoId};
use relnote_core::NotesBucket;

/// Sections in document order.
const SECTIONS: [(Category, &str); 6] = [
    (Category::Breaking, "Breaking Changes"),
    (Category::Feature, "Features"),
    (Category::Fix, "Fixes"),
    (Category::Other, "Other Changes"),
    (Category::Docs, "Documentation"),
    (Category::Unknown, "Unknown"),
];

/// Leading verbs rewritten to the past tense.
const COMMON_VERBS: &[(&str, &[&str])] = &[
    ("Added", &["Add"]),
    ("Backported", &["Backport"]),
    ("Cleaned", &["Clean"]),
    ("Disabled", &["Disable"]),
    ("Ensured", &["Ensure"]),
    ("Exported", &["Export"]),
    ("Fixed", &["Fix", "Fixes"]),
    ("Handled", &["Handle"]),
    ("Improved", &["Improve"]),
    ("Made", &["Make"]),
    ("Removed", &["Remove"]),
    ("Repaired", &["Repair"]),
    ("Reverted", &["Revert"]),
    ("Stopped", &["Stop"]),
    ("Updated", &["Update"]),
    ("Upgraded", &["Upgrade"]),
];

/// Returns the display text of a record.
///
/// The note (or the subject when there is none) is trimmed, capitalized,
/// terminated by a period and its leading verb put in the past tense.
#[must_use]
pub fn describe(commit: &CommitRecord) -> String {
    let text = commit.effective_text().trim();

    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut text: String = first.to_uppercase().chain(chars).collect();
    if !text.ends_with('.') {
        text.push('.');
    }

    for (past, verbs) in COMMON_VERBS {
        for verb in *verbs {
            if let Some(rest) = text.strip_prefix(verb).and_then(|rest| rest.strip_prefix(' ')) {
                text = format!("{past} {rest}");
            }
        }
    }

    text
}

/// Renders a [`NotesBucket`] as a Markdown document.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    primary: RepoId,
    explicit_links: bool,
}

impl MarkdownRenderer {
    /// Creates a renderer; references into `primary` use GitHub's short form.
    #[must_use]
    pub fn new(primary: RepoId) -> Self {
        Self {
            primary,
            explicit_links: false,
        }
    }

    /// Renders primary pull requests as full Markdown links.
    #[must_use]
    pub fn explicit_links(mut self, explicit_links: bool) -> Self {
        self.explicit_links = explicit_links;
        self
    }

    /// Returns the link of a record.
    ///
    /// Records that were attributed to a pull request link to the first one
    /// they were attributed to; others link to the commit.
    #[must_use]
    pub fn link(&self, commit: &CommitRecord) -> String {
        match commit.original_pr() {
            Some(pr) if pr.repo == self.primary && !self.explicit_links => {
                format!("#{}", pr.number)
            }
            Some(pr) if pr.repo == self.primary => format!("[#{}]({})", pr.number, pr.url()),
            Some(pr) => format!("[{pr}]({})", pr.url()),
            None if commit.repo == self.primary => {
                format!("[{}]({})", commit.short_hash(), commit.url())
            }
            None => format!("[{}@{}]({})", commit.repo, commit.short_hash(), commit.url()),
        }
    }

    /// Renders the document.
    #[must_use]
    pub fn render(&self, bucket: &NotesBucket) -> String {
        let mut output = String::new();

        _ = writeln!(output, "# Release Notes for {}\n", bucket.name);

        for (category, title) in SECTIONS {
            let commits = bucket.section(category);
            if commits.is_empty() {
                continue;
            }

            _ = writeln!(output, "## {title}\n");

            if category == Category::Docs {
                let mut links: Vec<String> = commits.iter().map(|c| self.link(c)).collect();
                links.sort();
                _ = writeln!(output, "- Documentation changes: {}", links.join(", "));
            } else {
                let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for commit in commits {
                    grouped
                        .entry(describe(commit))
                        .or_default()
                        .push(self.link(commit));
                }

                for (text, mut links) in grouped {
                    links.sort();
                    _ = writeln!(output, "- {text} {}", links.join(", "));
                }
            }

            output.push('\n');
        }

        output
    }
}
