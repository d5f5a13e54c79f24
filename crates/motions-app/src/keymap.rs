// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{FilterState, KeyBinding};

pub mod list_keys {
    use crate::KeyBinding;

    pub const CURSOR_UP: KeyBinding = KeyBinding::new(&["up", "k"], "↑/k", "up");
    pub const CURSOR_DOWN: KeyBinding = KeyBinding::new(&["down", "j"], "↓/j", "down");
    pub const PREV_PAGE: KeyBinding =
        KeyBinding::new(&["left", "h", "pgup", "b", "u"], "←/h/pgup", "prev page");
    pub const NEXT_PAGE: KeyBinding =
        KeyBinding::new(&["right", "l", "pgdown", "f", "d"], "→/l/pgdn", "next page");
    pub const GO_TO_START: KeyBinding = KeyBinding::new(&["home", "g"], "g/home", "go to start");
    pub const GO_TO_END: KeyBinding = KeyBinding::new(&["end", "G"], "G/end", "go to end");
    pub const FILTER: KeyBinding = KeyBinding::new(&["/"], "/", "filter");
    pub const CLEAR_FILTER: KeyBinding = KeyBinding::new(&["esc"], "esc", "clear filter");
    pub const CANCEL_WHILE_FILTERING: KeyBinding = KeyBinding::new(&["esc"], "esc", "cancel");
    pub const ACCEPT_WHILE_FILTERING: KeyBinding = KeyBinding::new(
        &["enter", "tab", "shift+tab", "ctrl+k", "up", "ctrl+j", "down"],
        "enter",
        "apply filter",
    );
    pub const SHOW_FULL_HELP: KeyBinding = KeyBinding::new(&["?"], "?", "more");
    pub const CLOSE_FULL_HELP: KeyBinding = KeyBinding::new(&["?"], "?", "close help");
    pub const QUIT: KeyBinding = KeyBinding::new(&["q", "esc"], "q", "quit");
    pub const FORCE_QUIT: KeyBinding = KeyBinding::new(&["ctrl+c"], "ctrl+c", "force quit");

    pub const ADD_ENTRY: KeyBinding = KeyBinding::new(&["n"], "n", "Add a new motion");
    pub const DELETE_ENTRY: KeyBinding = KeyBinding::new(&["d"], "d", "Delete motion");
}

pub mod form_keys {
    use crate::KeyBinding;

    pub const UP: KeyBinding = KeyBinding::new(&["up"], "up", "Up");
    pub const DOWN: KeyBinding = KeyBinding::new(&["down"], "down", "Down");
    pub const SUBMIT: KeyBinding =
        KeyBinding::new(&["shift+enter", "enter"], "shift+enter", "Submit");
    pub const BACK: KeyBinding = KeyBinding::new(&["esc"], "esc", "Back");
}

/// Which binding set drives the help line. The list variant carries the
/// filter state because the list advertises different keys while a filter
/// is being typed or is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapKind {
    List(FilterState),
    AddEntry,
}

impl KeymapKind {
    pub fn short_help(self) -> Vec<KeyBinding> {
        use list_keys::*;

        match self {
            Self::List(FilterState::Filtering) => {
                vec![CANCEL_WHILE_FILTERING, ACCEPT_WHILE_FILTERING]
            }
            Self::List(FilterState::FilterApplied) => vec![
                CURSOR_UP,
                CURSOR_DOWN,
                CLEAR_FILTER,
                FILTER,
                SHOW_FULL_HELP,
                ADD_ENTRY,
                DELETE_ENTRY,
            ],
            Self::List(FilterState::Unfiltered) => vec![
                CURSOR_UP,
                CURSOR_DOWN,
                FILTER,
                QUIT,
                SHOW_FULL_HELP,
                ADD_ENTRY,
                DELETE_ENTRY,
            ],
            Self::AddEntry => vec![
                form_keys::UP,
                form_keys::DOWN,
                form_keys::SUBMIT,
                form_keys::BACK,
            ],
        }
    }

    pub fn full_help(self) -> Vec<Vec<KeyBinding>> {
        use list_keys::*;

        match self {
            Self::List(FilterState::Filtering) => {
                vec![vec![CANCEL_WHILE_FILTERING, ACCEPT_WHILE_FILTERING]]
            }
            Self::List(filter) => {
                let mut filter_column = vec![FILTER];
                if filter == FilterState::FilterApplied {
                    filter_column.insert(0, CLEAR_FILTER);
                }
                vec![
                    vec![CURSOR_UP, CURSOR_DOWN, PREV_PAGE, NEXT_PAGE],
                    vec![GO_TO_START, GO_TO_END],
                    filter_column,
                    vec![QUIT, CLOSE_FULL_HELP],
                    vec![ADD_ENTRY, DELETE_ENTRY],
                ]
            }
            Self::AddEntry => vec![
                vec![form_keys::UP, form_keys::DOWN],
                vec![form_keys::SUBMIT, form_keys::BACK],
            ],
        }
    }
}
