// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::keymap::list_keys;
use crate::{Entry, Key, KeymapKind, TextInput};

pub const LIST_TITLE: &str = "Vim Motions for Babies";

/// Rows each item occupies: title line plus description line.
pub const ITEM_HEIGHT: u16 = 2;
pub const ITEM_SPACING: u16 = 1;
/// Title, blank, status, blank, pagination.
pub const LIST_CHROME_ROWS: u16 = 5;

const FILTER_PROMPT: &str = "Filter: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    Filtering,
    FilterApplied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    Handled,
    Ignored,
    Quit,
}

/// Scrollable, filterable list of entries. `visible` holds indices into
/// `items` in display order; every cursor position refers to it.
#[derive(Debug, Clone)]
pub struct EntryList {
    title: String,
    items: Vec<Entry>,
    visible: Vec<usize>,
    filter_state: FilterState,
    filter_input: TextInput,
    cursor: usize,
    width: u16,
    height: u16,
    show_full_help: bool,
}

impl EntryList {
    pub fn new(items: Vec<Entry>) -> Self {
        let visible = (0..items.len()).collect();
        Self {
            title: LIST_TITLE.to_owned(),
            items,
            visible,
            filter_state: FilterState::Unfiltered,
            filter_input: TextInput::new("", 0),
            cursor: 0,
            width: 0,
            height: 0,
            show_full_help: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[Entry] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items after filtering, paired with their index in `items()`.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Entry)> + '_ {
        self.visible.iter().map(|&index| (index, &self.items[index]))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Index of the highlighted item in `items()`, not in the filtered view.
    pub fn selected_index(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.selected_index().map(|index| &self.items[index])
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn is_filtered(&self) -> bool {
        self.filter_state == FilterState::FilterApplied
    }

    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    pub fn filter_input(&self) -> &TextInput {
        &self.filter_input
    }

    pub fn filter_text(&self) -> String {
        self.filter_input.value()
    }

    pub fn filter_prompt(&self) -> &'static str {
        FILTER_PROMPT
    }

    pub fn keymap(&self) -> KeymapKind {
        KeymapKind::List(self.filter_state)
    }

    pub fn show_full_help(&self) -> bool {
        self.show_full_help
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clamp_cursor();
    }

    pub fn help_height(&self) -> u16 {
        if !self.show_full_help {
            return 1;
        }
        let rows = self
            .keymap()
            .full_help()
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(1);
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    pub fn per_page(&self) -> usize {
        let chrome = LIST_CHROME_ROWS.saturating_add(self.help_height());
        let available = self.height.saturating_sub(chrome);
        let per_page = (available + ITEM_SPACING) / (ITEM_HEIGHT + ITEM_SPACING);
        usize::from(per_page.max(1))
    }

    pub fn page(&self) -> usize {
        self.cursor / self.per_page()
    }

    pub fn total_pages(&self) -> usize {
        self.visible.len().div_ceil(self.per_page()).max(1)
    }

    /// Visible items on the current page with their `items()` index.
    pub fn page_items(&self) -> Vec<(usize, &Entry)> {
        let per_page = self.per_page();
        let start = self.page() * per_page;
        self.visible()
            .skip(start)
            .take(per_page)
            .collect::<Vec<_>>()
    }

    pub fn push(&mut self, entry: Entry) {
        self.items.push(entry);
        self.refilter();
    }

    /// Drops every item whose title equals `title` and returns how many went.
    pub fn remove_titled(&mut self, title: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|entry| entry.title != title);
        let removed = before - self.items.len();
        if removed > 0 {
            self.refilter();
        }
        removed
    }

    pub fn handle_key(&mut self, key: Key) -> ListOutcome {
        if list_keys::FORCE_QUIT.matches(key) {
            return ListOutcome::Quit;
        }

        if self.filter_state == FilterState::Filtering {
            return self.handle_filtering_key(key);
        }

        if self.filter_state == FilterState::FilterApplied && list_keys::CLEAR_FILTER.matches(key)
        {
            self.reset_filter();
            return ListOutcome::Handled;
        }

        if list_keys::QUIT.matches(key) {
            return ListOutcome::Quit;
        }

        if list_keys::CURSOR_UP.matches(key) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if list_keys::CURSOR_DOWN.matches(key) {
            self.cursor = (self.cursor + 1).min(self.last_index());
        } else if list_keys::PREV_PAGE.matches(key) {
            self.move_page(-1);
        } else if list_keys::NEXT_PAGE.matches(key) {
            self.move_page(1);
        } else if list_keys::GO_TO_START.matches(key) {
            self.cursor = 0;
        } else if list_keys::GO_TO_END.matches(key) {
            self.cursor = self.last_index();
        } else if list_keys::FILTER.matches(key) {
            self.filter_state = FilterState::Filtering;
            self.filter_input.focus();
            self.cursor = 0;
            self.refilter();
        } else if list_keys::SHOW_FULL_HELP.matches(key) {
            self.show_full_help = !self.show_full_help;
            self.clamp_cursor();
        } else {
            return ListOutcome::Ignored;
        }
        ListOutcome::Handled
    }

    fn handle_filtering_key(&mut self, key: Key) -> ListOutcome {
        if list_keys::CANCEL_WHILE_FILTERING.matches(key) {
            self.reset_filter();
        } else if list_keys::ACCEPT_WHILE_FILTERING.matches(key) {
            if self.filter_input.is_empty() {
                self.reset_filter();
            } else {
                self.filter_state = FilterState::FilterApplied;
                self.filter_input.blur();
                self.clamp_cursor();
            }
        } else if self.filter_input.handle_key(key) {
            self.cursor = 0;
            self.refilter();
        }
        ListOutcome::Handled
    }

    fn reset_filter(&mut self) {
        self.filter_state = FilterState::Unfiltered;
        self.filter_input.reset();
        self.filter_input.blur();
        self.refilter();
    }

    fn refilter(&mut self) {
        let query = self.filter_input.value();
        if self.filter_state == FilterState::Unfiltered || query.is_empty() {
            self.visible = (0..self.items.len()).collect();
        } else {
            self.visible = rank_matches(&self.items, &query);
        }
        self.clamp_cursor();
    }

    fn move_page(&mut self, delta: isize) {
        let per_page = self.per_page();
        let page = self.page();
        let offset = self.cursor % per_page;
        let target = page.checked_add_signed(delta).filter(|target| *target < self.total_pages());
        if let Some(target) = target {
            self.cursor = (target * per_page + offset).min(self.last_index());
        }
    }

    fn last_index(&self) -> usize {
        self.visible.len().saturating_sub(1)
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.last_index());
    }
}

/// Fuzzy-matches titles against `query`, best score first. Equal scores keep
/// storage order.
fn rank_matches(items: &[Entry], query: &str) -> Vec<usize> {
    let matcher = SkimMatcherV2::default();
    let mut scored = items
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            matcher
                .fuzzy_match(entry.filter_value(), query)
                .map(|score| (score, index))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, index)| index).collect()
}

#[cfg(test)]
mod tests {
    use super::{EntryList, FilterState, ListOutcome};
    use crate::{Entry, Key};
    use pretty_assertions::assert_eq;

    fn sample_list() -> EntryList {
        let mut list = EntryList::new(vec![
            Entry::new("Move cursor", "hjkl"),
            Entry::new("Go to top of page", "gg"),
            Entry::new("Delete line", "dd"),
            Entry::new("Undo", "u"),
            Entry::new("Delete line", "dd"),
            Entry::new("Redo", "Ctrl+r"),
        ]);
        // Five chrome rows + one help row leaves 6 rows: two items per page.
        list.set_size(80, 12);
        list
    }

    fn press(list: &mut EntryList, keys: &[Key]) {
        for key in keys {
            list.handle_key(*key);
        }
    }

    fn type_filter(list: &mut EntryList, text: &str) {
        list.handle_key(Key::Char('/'));
        for c in text.chars() {
            list.handle_key(Key::Char(c));
        }
    }

    #[test]
    fn cursor_moves_are_clamped() {
        let mut list = sample_list();
        press(&mut list, &[Key::Up, Key::Char('k')]);
        assert_eq!(list.cursor(), 0);

        press(&mut list, &[Key::End, Key::Down, Key::Char('j')]);
        assert_eq!(list.cursor(), 5);

        list.handle_key(Key::Char('g'));
        assert_eq!(list.selected(), Some(&Entry::new("Move cursor", "hjkl")));
    }

    #[test]
    fn pages_follow_viewport_height() {
        let mut list = sample_list();
        assert_eq!(list.per_page(), 2);
        assert_eq!(list.total_pages(), 3);

        list.handle_key(Key::Down);
        list.handle_key(Key::Right);
        assert_eq!(list.page(), 1);
        assert_eq!(list.cursor(), 3);

        list.handle_key(Key::PageDown);
        list.handle_key(Key::PageDown);
        assert_eq!(list.page(), 2);

        list.handle_key(Key::Char('h'));
        assert_eq!(list.cursor(), 3);

        let titles = list
            .page_items()
            .into_iter()
            .map(|(_, entry)| entry.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Delete line", "Undo"]);
    }

    #[test]
    fn tiny_viewport_still_shows_one_item() {
        let mut list = sample_list();
        list.set_size(10, 2);
        assert_eq!(list.per_page(), 1);
        assert_eq!(list.total_pages(), 6);
    }

    #[test]
    fn filter_narrows_and_selection_tracks_absolute_index() {
        let mut list = sample_list();
        type_filter(&mut list, "redo");
        assert!(list.is_filtering());
        assert_eq!(list.visible_len(), 1);

        list.handle_key(Key::Enter);
        assert_eq!(list.filter_state(), FilterState::FilterApplied);
        assert!(list.is_filtered());
        assert_eq!(list.selected_index(), Some(5));
    }

    #[test]
    fn filtering_swallows_letter_keys() {
        let mut list = sample_list();
        type_filter(&mut list, "q");
        assert_eq!(list.handle_key(Key::Char('n')), ListOutcome::Handled);
        assert_eq!(list.filter_text(), "qn");
    }

    #[test]
    fn esc_cancels_filtering_and_accepting_empty_filter_resets() {
        let mut list = sample_list();
        type_filter(&mut list, "del");
        list.handle_key(Key::Esc);
        assert_eq!(list.filter_state(), FilterState::Unfiltered);
        assert_eq!(list.visible_len(), 6);

        list.handle_key(Key::Char('/'));
        list.handle_key(Key::Enter);
        assert_eq!(list.filter_state(), FilterState::Unfiltered);
    }

    #[test]
    fn esc_clears_applied_filter_inside_the_widget() {
        let mut list = sample_list();
        type_filter(&mut list, "del");
        list.handle_key(Key::Enter);
        assert_eq!(list.handle_key(Key::Esc), ListOutcome::Handled);
        assert_eq!(list.filter_state(), FilterState::Unfiltered);
    }

    #[test]
    fn quit_keys() {
        let mut list = sample_list();
        assert_eq!(list.handle_key(Key::Char('q')), ListOutcome::Quit);
        assert_eq!(list.handle_key(Key::Esc), ListOutcome::Quit);
        type_filter(&mut list, "x");
        assert_eq!(list.handle_key(Key::Ctrl('c')), ListOutcome::Quit);
        assert_eq!(list.handle_key(Key::Char('z')), ListOutcome::Handled);
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut list = sample_list();
        assert_eq!(list.handle_key(Key::Char('x')), ListOutcome::Ignored);
    }

    #[test]
    fn push_appends_and_remove_titled_drops_duplicates() {
        let mut list = sample_list();
        list.push(Entry::new("Jump to mark", "`m"));
        assert_eq!(list.items().last(), Some(&Entry::new("Jump to mark", "`m")));

        list.handle_key(Key::End);
        assert_eq!(list.remove_titled("Delete line"), 2);
        assert_eq!(list.len(), 5);
        assert_eq!(list.cursor(), 4);
        assert!(list.items().iter().all(|entry| entry.title != "Delete line"));
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut list = EntryList::new(Vec::new());
        list.handle_key(Key::Down);
        assert_eq!(list.selected_index(), None);
        assert_eq!(list.total_pages(), 1);
        assert!(list.page_items().is_empty());
    }

    #[test]
    fn question_mark_toggles_full_help_and_shrinks_page() {
        let mut list = sample_list();
        list.set_size(80, 20);
        let compact = list.per_page();
        list.handle_key(Key::Char('?'));
        assert!(list.show_full_help());
        assert!(list.per_page() < compact);
    }
}
