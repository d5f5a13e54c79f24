// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// One cheat-sheet row: what the motion does and the keys that perform it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub description: String,
}

impl Entry {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Text the list filter matches against.
    pub fn filter_value(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Browse,
    AddEntry,
    ConfirmDelete,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browse => "browse",
            Self::AddEntry => "add",
            Self::ConfirmDelete => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Entry, Mode};

    #[test]
    fn filter_value_is_title() {
        let entry = Entry::new("Move cursor", "hjkl");
        assert_eq!(entry.filter_value(), "Move cursor");
    }

    #[test]
    fn mode_labels() {
        assert_eq!(Mode::Browse.as_str(), "browse");
        assert_eq!(Mode::AddEntry.as_str(), "add");
        assert_eq!(Mode::ConfirmDelete.as_str(), "delete");
    }
}
