use figart_core::catalog::FONT_CATALOG;
use figart_core::generator::RenderRequest;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Text,
    Font,
    Width,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::Text, Self::Font, Self::Width];

    pub fn next(self) -> Self {
        match self {
            Field::Text => Field::Font,
            Field::Font => Field::Width,
            Field::Width => Field::Text,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Text => Field::Width,
            Field::Font => Field::Text,
            Field::Width => Field::Font,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Field::Text => "Text",
            Field::Font => "Font",
            Field::Width => "Width",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Back,
    Forward,
    Head,
    End,
}

/// Editable string with a cursor counted in chars. May hold newlines.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let byte_idx = char_to_byte_index(&self.value, self.cursor);
        self.value.insert_str(byte_idx, text);
        self.cursor += text.chars().count();
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Backspace. Returns whether anything was removed.
    pub fn delete_prev_char(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.remove_at_cursor();
        true
    }

    /// Delete. Returns whether anything was removed.
    pub fn delete_next_char(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        self.remove_at_cursor();
        true
    }

    fn remove_at_cursor(&mut self) {
        let start = char_to_byte_index(&self.value, self.cursor);
        let end = char_to_byte_index(&self.value, self.cursor + 1);
        self.value.replace_range(start..end, "");
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        let len = self.value.chars().count();
        self.cursor = match movement {
            CursorMove::Back => self.cursor.saturating_sub(1),
            CursorMove::Forward => (self.cursor + 1).min(len),
            CursorMove::Head => 0,
            CursorMove::End => len,
        };
    }

    /// Empties the input. Returns whether it held anything.
    pub fn clear(&mut self) -> bool {
        let had_text = !self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        had_text
    }

    pub fn line_count(&self) -> usize {
        self.value.split('\n').count()
    }

    /// Cursor as (line, display column).
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.value[..char_to_byte_index(&self.value, self.cursor)];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        (line, before[line_start..].width())
    }
}

fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(idx, _)| idx)
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub focus: Field,
    pub text: TextInput,
    pub font_index: usize,
    pub width: TextInput,
}

impl FormState {
    pub fn new(font_index: usize) -> Self {
        Self {
            font_index: font_index.min(FONT_CATALOG.len().saturating_sub(1)),
            ..Self::default()
        }
    }

    /// The options offered by the font selector, in display order.
    pub fn font_options() -> &'static [&'static str] {
        FONT_CATALOG
    }

    pub fn font(&self) -> &'static str {
        FONT_CATALOG
            .get(self.font_index)
            .copied()
            .unwrap_or_default()
    }

    /// Returns whether the selection changed.
    pub fn select_font(&mut self, index: usize) -> bool {
        if index >= FONT_CATALOG.len() || index == self.font_index {
            return false;
        }
        self.font_index = index;
        true
    }

    pub fn cycle_font(&mut self, forward: bool) -> bool {
        let len = FONT_CATALOG.len();
        if len < 2 {
            return false;
        }
        let index = if forward {
            (self.font_index + 1) % len
        } else {
            (self.font_index + len - 1) % len
        };
        self.select_font(index)
    }

    /// Snapshot of the current field values.
    pub fn request(&self) -> RenderRequest {
        RenderRequest {
            text: self.text.value().to_string(),
            font: self.font().to_string(),
            width: self.width.value().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_respects_multibyte_chars() {
        let mut input = TextInput::new("héllo");
        input.move_cursor(CursorMove::Head);
        input.move_cursor(CursorMove::Forward);
        input.move_cursor(CursorMove::Forward);
        assert!(input.delete_prev_char());
        assert_eq!(input.value(), "hllo");
        input.insert_char('é');
        assert_eq!(input.value(), "héllo");
        assert!(input.delete_next_char());
        assert_eq!(input.value(), "hélo");
    }

    #[test]
    fn delete_at_edges_reports_no_change() {
        let mut input = TextInput::new("ab");
        assert!(!input.delete_next_char());
        input.move_cursor(CursorMove::Head);
        assert!(!input.delete_prev_char());
        assert!(input.clear());
        assert!(!input.clear());
    }

    #[test]
    fn cursor_position_tracks_lines() {
        let mut input = TextInput::new("ab\ncde");
        assert_eq!(input.cursor_position(), (1, 3));
        assert_eq!(input.line_count(), 2);
        input.move_cursor(CursorMove::Head);
        assert_eq!(input.cursor_position(), (0, 0));
    }

    #[test]
    fn font_cycling_wraps() {
        let mut form = FormState::new(0);
        assert!(form.cycle_font(false));
        assert_eq!(form.font(), *FONT_CATALOG.last().unwrap());
        assert!(form.cycle_font(true));
        assert_eq!(form.font(), FONT_CATALOG[0]);
    }

    #[test]
    fn request_snapshots_fields() {
        let mut form = FormState::new(1);
        form.text = TextInput::new("Hi");
        form.width = TextInput::new("40");
        let request = form.request();
        assert_eq!(request.text, "Hi");
        assert_eq!(request.font, FONT_CATALOG[1]);
        assert_eq!(request.width, "40");
    }

    #[test]
    fn font_options_match_catalog() {
        assert_eq!(FormState::font_options(), FONT_CATALOG);
    }
}
