//! Tag blacklist.

use std::collections::HashSet;

/// Tags the user never wants to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    tags: HashSet<String>,
}

impl Blacklist {
    /// Parse one tag per line; blank lines and `#` comments are ignored.
    pub fn parse(contents: &str) -> Self {
        let tags = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(ToString::to_string)
            .collect();
        Self { tags }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// True when any of `tags` is blacklisted.
    pub fn blocks<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|tag| self.contains(tag.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
