// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::keymap::{form_keys, list_keys};
use crate::{Entry, EntryList, Key, KeymapKind, ListOutcome, Mode, TextInput};

pub const DESCRIPTION_PLACEHOLDER: &str = "Description of Motion";
pub const KEYS_PLACEHOLDER: &str = "Motion Keys";
pub const CONFIRM_PLACEHOLDER: &str = "y/n";

const DESCRIPTION_CHAR_LIMIT: usize = 32;
const KEYS_CHAR_LIMIT: usize = 64;
const CONFIRM_CHAR_LIMIT: usize = 5;
const CONFIRM_WORDS: [&str; 2] = ["y", "yes"];

/// Outer margin around the list: one row top and bottom, two columns left
/// and right.
pub const MARGIN_HORIZONTAL: u16 = 2;
pub const MARGIN_VERTICAL: u16 = 1;

/// Storage call the event loop must perform before the in-memory list may
/// change. See [`AppState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Insert(Entry),
    DeleteTitled { index: usize, title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyField,
    NotConfirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Skip(SkipReason),
    Persist(Pending),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Mode,
    pub effect: Effect,
}

impl Transition {
    fn stay(mode: Mode) -> Self {
        Self {
            next: mode,
            effect: Effect::None,
        }
    }

    fn to(next: Mode, effect: Effect) -> Self {
        Self { next, effect }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddForm {
    pub inputs: [TextInput; 2],
    pub focus_index: usize,
}

impl Default for AddForm {
    fn default() -> Self {
        let mut description = TextInput::new(DESCRIPTION_PLACEHOLDER, DESCRIPTION_CHAR_LIMIT);
        description.focus();
        Self {
            inputs: [description, TextInput::new(KEYS_PLACEHOLDER, KEYS_CHAR_LIMIT)],
            focus_index: 0,
        }
    }
}

impl AddForm {
    pub fn description(&self) -> String {
        self.inputs[0].value()
    }

    pub fn keys(&self) -> String {
        self.inputs[1].value()
    }

    fn move_focus(&mut self, delta: isize) {
        let last = self.inputs.len() - 1;
        self.focus_index = self.focus_index.saturating_add_signed(delta).min(last);
        for (index, input) in self.inputs.iter_mut().enumerate() {
            if index == self.focus_index {
                input.focus();
            } else {
                input.blur();
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub input: TextInput,
    /// Index into the list's items, captured when the prompt opened.
    pub target: Option<usize>,
}

impl Default for DeletePrompt {
    fn default() -> Self {
        Self {
            input: TextInput::new(CONFIRM_PLACEHOLDER, CONFIRM_CHAR_LIMIT),
            target: None,
        }
    }
}

/// The single owner of mutable UI state. Storage never happens here: key
/// handlers hand back an [`Effect`] and the caller persists before calling
/// [`AppState::apply`].
#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: Mode,
    pub list: EntryList,
    pub add_form: AddForm,
    pub delete_prompt: DeletePrompt,
}

impl AppState {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            mode: Mode::Browse,
            list: EntryList::new(entries),
            add_form: AddForm::default(),
            delete_prompt: DeletePrompt::default(),
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Effect {
        let transition = match self.mode {
            Mode::Browse => self.browse_key(key),
            Mode::AddEntry => self.add_entry_key(key),
            Mode::ConfirmDelete => self.confirm_delete_key(key),
        };
        self.mode = transition.next;
        transition.effect
    }

    /// Window size minus the outer margin becomes the list viewport.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.list.set_size(
            width.saturating_sub(MARGIN_HORIZONTAL * 2),
            height.saturating_sub(MARGIN_VERTICAL * 2),
        );
    }

    /// Mirrors a successful storage call into the in-memory list.
    pub fn apply(&mut self, pending: &Pending) {
        match pending {
            Pending::Insert(entry) => self.list.push(entry.clone()),
            Pending::DeleteTitled { title, .. } => {
                self.list.remove_titled(title);
            }
        }
    }

    pub fn keymap(&self) -> KeymapKind {
        match self.mode {
            Mode::Browse => self.list.keymap(),
            Mode::AddEntry | Mode::ConfirmDelete => KeymapKind::AddEntry,
        }
    }

    /// The entry the delete prompt refers to.
    pub fn delete_target(&self) -> Option<&Entry> {
        self.delete_prompt
            .target
            .and_then(|index| self.list.items().get(index))
    }

    fn browse_key(&mut self, key: Key) -> Transition {
        if list_keys::ADD_ENTRY.matches(key) {
            self.add_form = AddForm::default();
            return Transition::stay(Mode::AddEntry);
        }

        if list_keys::DELETE_ENTRY.matches(key) {
            let Some(index) = self.list.selected_index() else {
                return Transition::stay(Mode::Browse);
            };
            self.delete_prompt.target = Some(index);
            self.delete_prompt.input.reset();
            self.delete_prompt.input.focus();
            return Transition::stay(Mode::ConfirmDelete);
        }

        if self.list.is_filtered() && key == Key::Esc {
            return Transition::to(Mode::Browse, Effect::Quit);
        }

        match self.list.handle_key(key) {
            ListOutcome::Quit => Transition::to(Mode::Browse, Effect::Quit),
            ListOutcome::Handled | ListOutcome::Ignored => Transition::stay(Mode::Browse),
        }
    }

    fn add_entry_key(&mut self, key: Key) -> Transition {
        if form_keys::BACK.matches(key) {
            return Transition::stay(Mode::Browse);
        }

        if form_keys::SUBMIT.matches(key) {
            let description = self.add_form.description();
            let keys = self.add_form.keys();
            if description.is_empty() || keys.is_empty() {
                return Transition::to(Mode::Browse, Effect::Skip(SkipReason::EmptyField));
            }
            let entry = Entry::new(description, keys);
            return Transition::to(Mode::Browse, Effect::Persist(Pending::Insert(entry)));
        }

        if form_keys::UP.matches(key) {
            self.add_form.move_focus(-1);
        } else if form_keys::DOWN.matches(key) {
            self.add_form.move_focus(1);
        } else {
            let focus = self.add_form.focus_index;
            self.add_form.inputs[focus].handle_key(key);
        }
        Transition::stay(Mode::AddEntry)
    }

    fn confirm_delete_key(&mut self, key: Key) -> Transition {
        match key {
            Key::Esc => Transition::stay(Mode::Browse),
            Key::Enter => {
                let answer = self.delete_prompt.input.value();
                if answer.is_empty() {
                    return Transition::to(Mode::Browse, Effect::Skip(SkipReason::NotConfirmed));
                }
                if !CONFIRM_WORDS.contains(&answer.to_lowercase().as_str()) {
                    self.delete_prompt.input.reset();
                    return Transition::to(Mode::Browse, Effect::Skip(SkipReason::NotConfirmed));
                }

                let Some(index) = self.delete_prompt.target else {
                    return Transition::stay(Mode::Browse);
                };
                let Some(entry) = self.list.items().get(index) else {
                    return Transition::stay(Mode::Browse);
                };
                let pending = Pending::DeleteTitled {
                    index,
                    title: entry.title.clone(),
                };
                Transition::to(Mode::Browse, Effect::Persist(pending))
            }
            _ => {
                self.delete_prompt.input.handle_key(key);
                Transition::stay(Mode::ConfirmDelete)
            }
        }
    }
}
