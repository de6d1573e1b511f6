use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

/// A cursor over a list whose items are owned elsewhere.
///
/// The picker only tracks the length and the highlighted index; callers
/// build the rows at render time from their own data.
#[derive(Debug, Clone, Default)]
pub struct Picker {
    len: usize,
    list_state: ListState,
}

impl Picker {
    pub fn new(len: usize) -> Self {
        let mut picker = Self::default();
        picker.set_len(len);
        picker
    }

    /// Update the length, keeping the cursor in range.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        let selected = match (self.list_state.selected(), len) {
            (_, 0) => None,
            (Some(i), _) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.list_state.select(Some(index));
        }
    }

    /// Moves the cursor. Returns false for keys the picker does not use.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.len == 0 {
            return false;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = match key.code {
            KeyCode::Char('j') | KeyCode::Down => (current + 1).min(self.len - 1),
            KeyCode::Char('k') | KeyCode::Up => current.saturating_sub(1),
            KeyCode::Home => 0,
            KeyCode::End => self.len - 1,
            _ => return false,
        };
        self.list_state.select(Some(next));
        true
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        items: Vec<ListItem>,
        focused: bool,
    ) {
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border_style);

        let mut list = List::new(items).block(block);
        if focused {
            list = list
                .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
                .highlight_symbol("> ");
        }

        let mut state = self.list_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }
}
