// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use motions_app::{
    AppState, Effect, Entry, EntryList, FilterState, Key, KeyBinding, MARGIN_HORIZONTAL,
    MARGIN_VERTICAL, Mode, Pending, TextInput,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::io;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ADD_HEADER: &str = "Add a new motion";
const DELETE_PROMPT: &str = "Are you sure you want to delete this motion? (y/n)";
const INPUT_PROMPT: &str = "> ";
const ELLIPSIS: &str = "…";
const HELP_SEPARATOR: &str = " • ";
const HELP_COLUMN_GAP: &str = "    ";
const PAGINATION_DOT: &str = "•";

/// Storage calls the event loop makes on the state machine's behalf.
pub trait AppRuntime {
    fn add_entry(&mut self, entry: &Entry) -> Result<()>;
    fn delete_entries_titled(&mut self, title: &str) -> Result<usize>;
}

/// Every style the views use, built once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title_bar: Style,
    pub add_title: Style,
    pub item_title: Style,
    pub item_description: Style,
    pub selected_title: Style,
    pub selected_description: Style,
    pub selected_bar: Style,
    pub status: Style,
    pub empty: Style,
    pub pagination_active: Style,
    pub pagination_inactive: Style,
    pub help_key: Style,
    pub help_desc: Style,
    pub help_separator: Style,
    pub prompt: Style,
    pub focused_prompt: Style,
    pub placeholder: Style,
    pub cursor: Style,
    pub target_title: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let pink = Color::Indexed(205);
        Self {
            title_bar: Style::default()
                .fg(Color::Indexed(230))
                .bg(Color::Indexed(62)),
            add_title: Style::default().fg(pink),
            item_title: Style::default().fg(Color::Rgb(0xDD, 0xDD, 0xDD)),
            item_description: Style::default().fg(Color::Rgb(0x77, 0x77, 0x77)),
            selected_title: Style::default().fg(Color::Rgb(0xEE, 0x6F, 0xF8)),
            selected_description: Style::default().fg(Color::Rgb(0xAD, 0x58, 0xB4)),
            selected_bar: Style::default().fg(Color::Rgb(0xAD, 0x58, 0xB4)),
            status: Style::default().fg(Color::Rgb(0x77, 0x77, 0x77)),
            empty: Style::default().fg(Color::Rgb(0x62, 0x62, 0x62)),
            pagination_active: Style::default().fg(Color::Rgb(0xDD, 0xDD, 0xDD)),
            pagination_inactive: Style::default().fg(Color::Rgb(0x4A, 0x4A, 0x4A)),
            help_key: Style::default().fg(Color::Rgb(0x62, 0x62, 0x62)),
            help_desc: Style::default().fg(Color::Rgb(0x4A, 0x4A, 0x4A)),
            help_separator: Style::default().fg(Color::Rgb(0x3C, 0x3C, 0x3C)),
            prompt: Style::default(),
            focused_prompt: Style::default().fg(pink),
            placeholder: Style::default().fg(Color::Indexed(240)),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            target_title: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    let theme = Theme::default();

    let result = terminal::size()
        .context("read terminal size")
        .and_then(|(width, height)| {
            state.resize(width, height);
            event_loop(&mut terminal, state, runtime, &theme)
        });

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    result
}

fn event_loop<B: Backend, R: AppRuntime>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    runtime: &mut R,
    theme: &Theme,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| render(frame, state, theme))
            .context("draw frame")?;

        match event::read().context("read event")? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if handle_key_event(state, runtime, key)? {
                    return Ok(());
                }
            }
            Event::Resize(width, height) => state.resize(width, height),
            _ => {}
        }
    }
}

/// Runs one key through the state machine and performs any storage call it
/// asks for. Returns `true` when the app should exit. Storage errors are
/// returned untouched: the in-memory list is only updated after the runtime
/// succeeds.
pub fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    key: KeyEvent,
) -> Result<bool> {
    let Some(key) = translate_key(key) else {
        return Ok(false);
    };

    let previous = state.mode;
    match state.handle_key(key) {
        Effect::None => {}
        Effect::Quit => {
            log::info!("quit from {} mode", previous.as_str());
            return Ok(true);
        }
        Effect::Skip(reason) => {
            log::debug!("{} skipped: {reason:?}", previous.as_str());
        }
        Effect::Persist(pending) => {
            persist(runtime, &pending)?;
            state.apply(&pending);
        }
    }

    if state.mode != previous {
        log::debug!("mode {} -> {}", previous.as_str(), state.mode.as_str());
    }
    Ok(false)
}

fn persist<R: AppRuntime>(runtime: &mut R, pending: &Pending) -> Result<()> {
    match pending {
        Pending::Insert(entry) => runtime.add_entry(entry).context("error adding command"),
        Pending::DeleteTitled { title, index } => {
            let removed = runtime
                .delete_entries_titled(title)
                .context("error deleting command")?;
            log::debug!("deleted {removed} rows titled {title:?} (selected index {index})");
            Ok(())
        }
    }
}

fn translate_key(key: KeyEvent) -> Option<Key> {
    let translated = match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Key::Ctrl(c.to_ascii_lowercase())
        }
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => Key::ShiftEnter,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        _ => return None,
    };
    Some(translated)
}

pub fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, theme: &Theme) {
    let area = frame.area();
    match state.mode {
        Mode::Browse => render_browse(frame, area, &state.list, theme),
        Mode::AddEntry => {
            frame.render_widget(Paragraph::new(add_form_lines(state, theme)), area);
        }
        Mode::ConfirmDelete => {
            frame.render_widget(Paragraph::new(delete_lines(state, theme)), area);
        }
    }
}

fn render_browse(frame: &mut ratatui::Frame<'_>, area: Rect, list: &EntryList, theme: &Theme) {
    let inner = area.inner(Margin::new(MARGIN_HORIZONTAL, MARGIN_VERTICAL));
    let [title_area, _, status_area, _, items_area, pagination_area, help_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(list.help_height()),
        ])
        .areas(inner);

    frame.render_widget(Paragraph::new(title_line(list, theme)), title_area);
    frame.render_widget(
        Paragraph::new(Line::styled(status_text(list), theme.status)),
        status_area,
    );
    frame.render_widget(
        Paragraph::new(item_lines(list, usize::from(items_area.width), theme)),
        items_area,
    );
    frame.render_widget(Paragraph::new(pagination_line(list, theme)), pagination_area);

    let help = if list.show_full_help() {
        full_help_lines(&list.keymap().full_help(), theme)
    } else {
        vec![short_help_line(&list.keymap().short_help(), theme)]
    };
    frame.render_widget(Paragraph::new(help), help_area);
}

fn title_line(list: &EntryList, theme: &Theme) -> Line<'static> {
    if list.is_filtering() {
        let mut spans = vec![Span::styled(list.filter_prompt(), theme.focused_prompt)];
        spans.extend(input_spans(list.filter_input(), theme));
        return Line::from(spans);
    }
    Line::from(Span::styled(format!(" {} ", list.title()), theme.title_bar))
}

fn status_text(list: &EntryList) -> String {
    let total = list.len();
    let visible = list.visible_len();
    match list.filter_state() {
        FilterState::Unfiltered if total == 0 => "No items".to_owned(),
        FilterState::Unfiltered => count_label(total),
        FilterState::Filtering if visible == 0 => "Nothing matched".to_owned(),
        FilterState::Filtering => count_label(visible),
        FilterState::FilterApplied => format!(
            "“{}” {}{HELP_SEPARATOR}{} filtered",
            list.filter_text(),
            count_label(visible),
            total - visible
        ),
    }
}

fn count_label(count: usize) -> String {
    if count == 1 {
        "1 item".to_owned()
    } else {
        format!("{count} items")
    }
}

fn item_lines(list: &EntryList, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let page = list.page_items();
    if page.is_empty() {
        if list.filter_state() == FilterState::Unfiltered {
            return vec![Line::styled("No items.", theme.empty)];
        }
        return Vec::new();
    }

    let selected = list.selected_index();
    let text_width = width.saturating_sub(2);
    let mut lines = Vec::with_capacity(page.len() * 3);
    for (position, (index, entry)) in page.into_iter().enumerate() {
        if position > 0 {
            lines.push(Line::default());
        }
        let title = truncate_to_width(&entry.title, text_width);
        let description = truncate_to_width(&entry.description, text_width);
        if Some(index) == selected {
            lines.push(Line::from(vec![
                Span::styled("│ ", theme.selected_bar),
                Span::styled(title, theme.selected_title),
            ]));
            lines.push(Line::from(vec![
                Span::styled("│ ", theme.selected_bar),
                Span::styled(description, theme.selected_description),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(title, theme.item_title),
            ]));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(description, theme.item_description),
            ]));
        }
    }
    lines
}

fn pagination_line(list: &EntryList, theme: &Theme) -> Line<'static> {
    let pages = list.total_pages();
    if pages <= 1 {
        return Line::default();
    }
    let current = list.page();
    let mut spans = vec![Span::raw("  ")];
    spans.extend((0..pages).map(|page| {
        let style = if page == current {
            theme.pagination_active
        } else {
            theme.pagination_inactive
        };
        Span::styled(PAGINATION_DOT, style)
    }));
    Line::from(spans)
}

fn short_help_line(bindings: &[KeyBinding], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(bindings.len() * 4);
    for (index, binding) in bindings.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(HELP_SEPARATOR, theme.help_separator));
        }
        spans.push(Span::styled(binding.help_key, theme.help_key));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(binding.help_desc, theme.help_desc));
    }
    Line::from(spans)
}

/// Lays the help columns side by side, padding each to its widest cell.
fn full_help_lines(columns: &[Vec<KeyBinding>], theme: &Theme) -> Vec<Line<'static>> {
    let widths = columns
        .iter()
        .map(|column| {
            column
                .iter()
                .map(|binding| binding.help_key.width() + 1 + binding.help_desc.width())
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

    (0..rows)
        .map(|row| {
            let mut spans = Vec::new();
            for (column_index, column) in columns.iter().enumerate() {
                if column_index > 0 {
                    spans.push(Span::raw(HELP_COLUMN_GAP));
                }
                let used = match column.get(row) {
                    Some(binding) => {
                        spans.push(Span::styled(binding.help_key, theme.help_key));
                        spans.push(Span::raw(" "));
                        spans.push(Span::styled(binding.help_desc, theme.help_desc));
                        binding.help_key.width() + 1 + binding.help_desc.width()
                    }
                    None => 0,
                };
                let pad = widths[column_index].saturating_sub(used);
                if pad > 0 && column_index + 1 < columns.len() {
                    spans.push(Span::raw(" ".repeat(pad)));
                }
            }
            Line::from(spans)
        })
        .collect()
}

fn add_form_lines(state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(ADD_HEADER, theme.add_title)];
    lines.extend(
        state
            .add_form
            .inputs
            .iter()
            .map(|input| input_line(input, theme)),
    );
    lines.push(Line::default());
    lines.push(Line::default());
    lines.push(short_help_line(&state.keymap().short_help(), theme));
    lines
}

fn delete_lines(state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let title = state
        .delete_target()
        .map(|entry| entry.title.clone())
        .unwrap_or_default();
    vec![
        Line::raw(DELETE_PROMPT),
        Line::default(),
        Line::styled(title, theme.target_title),
        input_line(&state.delete_prompt.input, theme),
        Line::default(),
        Line::default(),
        Line::default(),
        short_help_line(&state.keymap().short_help(), theme),
    ]
}

fn input_line(input: &TextInput, theme: &Theme) -> Line<'static> {
    let prompt_style = if input.is_focused() {
        theme.focused_prompt
    } else {
        theme.prompt
    };
    let mut spans = vec![Span::styled(INPUT_PROMPT, prompt_style)];
    spans.extend(input_spans(input, theme));
    Line::from(spans)
}

/// Text (or placeholder) with the cursor cell drawn reversed when focused.
fn input_spans(input: &TextInput, theme: &Theme) -> Vec<Span<'static>> {
    if input.is_empty() {
        let placeholder = input.placeholder();
        if !input.is_focused() {
            return vec![Span::styled(placeholder, theme.placeholder)];
        }
        let mut chars = placeholder.chars();
        let first = chars.next().map_or_else(|| " ".to_owned(), String::from);
        return vec![
            Span::styled(first, theme.cursor.patch(theme.placeholder)),
            Span::styled(chars.collect::<String>(), theme.placeholder),
        ];
    }

    let value = input.value().chars().collect::<Vec<_>>();
    if !input.is_focused() {
        return vec![Span::raw(value.into_iter().collect::<String>())];
    }

    let cursor = input.cursor().min(value.len());
    let before = value[..cursor].iter().collect::<String>();
    let under = value.get(cursor).map_or_else(|| " ".to_owned(), char::to_string);
    let after = value
        .get(cursor + 1..)
        .map(|rest| rest.iter().collect::<String>())
        .unwrap_or_default();
    vec![
        Span::raw(before),
        Span::styled(under, theme.cursor),
        Span::raw(after),
    ]
}

fn truncate_to_width(value: &str, max_width: usize) -> String {
    if value.width() <= max_width {
        return value.to_owned();
    }
    let budget = max_width.saturating_sub(ELLIPSIS.width());
    let mut used = 0;
    let mut out = String::new();
    for c in value.chars() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > budget {
            break;
        }
        used += char_width;
        out.push(c);
    }
    if max_width > 0 {
        out.push_str(ELLIPSIS);
    }
    out
}
