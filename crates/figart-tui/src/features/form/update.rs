use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{CursorMove, Field, FormState, TextInput};

/// What a key press did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Ignored,
    /// Cursor or focus moved; the values did not change.
    Moved,
    /// A field value changed.
    Changed,
    /// Enter in an editable field. Never quits or clears anything.
    Submit,
    OpenFontPicker,
}

pub fn handle_key(form: &mut FormState, key: KeyEvent) -> FormAction {
    match key.code {
        KeyCode::Tab => {
            form.focus = form.focus.next();
            return FormAction::Moved;
        }
        KeyCode::BackTab => {
            form.focus = form.focus.prev();
            return FormAction::Moved;
        }
        _ => {}
    }

    match form.focus {
        Field::Text => handle_text_key(&mut form.text, key),
        Field::Font => handle_font_key(form, key),
        Field::Width => handle_width_key(&mut form.width, key),
    }
}

/// Bracketed paste into the focused field.
pub fn handle_paste(form: &mut FormState, text: &str) -> FormAction {
    let pasted = match form.focus {
        Field::Text => {
            let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
            form.text.insert_str(&normalized);
            !normalized.is_empty()
        }
        Field::Width => {
            let digits: String = text.chars().filter(char::is_ascii_digit).collect();
            form.width.insert_str(&digits);
            !digits.is_empty()
        }
        Field::Font => false,
    };
    if pasted {
        FormAction::Changed
    } else {
        FormAction::Ignored
    }
}

fn changed_if(changed: bool) -> FormAction {
    if changed {
        FormAction::Changed
    } else {
        FormAction::Ignored
    }
}

/// Keys shared by both editable fields. `None` when the key is not an editing key.
fn handle_edit_key(input: &mut TextInput, key: KeyEvent) -> Option<FormAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('u') if ctrl => changed_if(input.clear()),
        KeyCode::Backspace => changed_if(input.delete_prev_char()),
        KeyCode::Delete => changed_if(input.delete_next_char()),
        KeyCode::Left => {
            input.move_cursor(CursorMove::Back);
            FormAction::Moved
        }
        KeyCode::Right => {
            input.move_cursor(CursorMove::Forward);
            FormAction::Moved
        }
        KeyCode::Home => {
            input.move_cursor(CursorMove::Head);
            FormAction::Moved
        }
        KeyCode::End => {
            input.move_cursor(CursorMove::End);
            FormAction::Moved
        }
        _ => return None,
    };
    Some(action)
}

fn handle_text_key(input: &mut TextInput, key: KeyEvent) -> FormAction {
    if let Some(action) = handle_edit_key(input, key) {
        return action;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Enter if alt || shift => {
            input.insert_char('\n');
            FormAction::Changed
        }
        KeyCode::Char('j') if ctrl => {
            input.insert_char('\n');
            FormAction::Changed
        }
        KeyCode::Enter => FormAction::Submit,
        KeyCode::Char(ch) if !ctrl && !alt => {
            input.insert_char(ch);
            FormAction::Changed
        }
        _ => FormAction::Ignored,
    }
}

fn handle_font_key(form: &mut FormState, key: KeyEvent) -> FormAction {
    match key.code {
        KeyCode::Left | KeyCode::Up => changed_if(form.cycle_font(false)),
        KeyCode::Right | KeyCode::Down => changed_if(form.cycle_font(true)),
        KeyCode::Enter | KeyCode::Char(' ') => FormAction::OpenFontPicker,
        _ => FormAction::Ignored,
    }
}

fn handle_width_key(input: &mut TextInput, key: KeyEvent) -> FormAction {
    if let Some(action) = handle_edit_key(input, key) {
        return action;
    }
    match key.code {
        KeyCode::Enter => FormAction::Submit,
        KeyCode::Char(ch) if ch.is_ascii_digit() && !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.insert_char(ch);
            FormAction::Changed
        }
        _ => FormAction::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut FormState, text: &str) {
        for ch in text.chars() {
            handle_key(form, key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_changes_text() {
        let mut form = FormState::new(0);
        assert_eq!(handle_key(&mut form, key(KeyCode::Char('H'))), FormAction::Changed);
        type_str(&mut form, "i!");
        assert_eq!(form.text.value(), "Hi!");
        assert_eq!(handle_key(&mut form, key(KeyCode::Backspace)), FormAction::Changed);
        assert_eq!(form.text.value(), "Hi");
    }

    #[test]
    fn enter_submits_without_editing() {
        let mut form = FormState::new(0);
        type_str(&mut form, "Hi");
        assert_eq!(handle_key(&mut form, key(KeyCode::Enter)), FormAction::Submit);
        assert_eq!(form.text.value(), "Hi");

        form.focus = Field::Width;
        assert_eq!(handle_key(&mut form, key(KeyCode::Enter)), FormAction::Submit);
    }

    #[test]
    fn alt_enter_inserts_newline() {
        let mut form = FormState::new(0);
        type_str(&mut form, "a");
        let action = handle_key(&mut form, KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
        assert_eq!(action, FormAction::Changed);
        type_str(&mut form, "b");
        assert_eq!(form.text.value(), "a\nb");
    }

    #[test]
    fn tab_cycles_focus() {
        let mut form = FormState::new(0);
        assert_eq!(handle_key(&mut form, key(KeyCode::Tab)), FormAction::Moved);
        assert_eq!(form.focus, Field::Font);
        handle_key(&mut form, key(KeyCode::Tab));
        assert_eq!(form.focus, Field::Width);
        handle_key(&mut form, key(KeyCode::Tab));
        assert_eq!(form.focus, Field::Text);
        handle_key(&mut form, key(KeyCode::BackTab));
        assert_eq!(form.focus, Field::Width);
    }

    #[test]
    fn width_accepts_digits_only() {
        let mut form = FormState::new(0);
        form.focus = Field::Width;
        assert_eq!(handle_key(&mut form, key(KeyCode::Char('x'))), FormAction::Ignored);
        type_str(&mut form, "4a0");
        assert_eq!(form.width.value(), "40");
        assert_eq!(handle_paste(&mut form, "1-2"), FormAction::Changed);
        assert_eq!(form.width.value(), "4012");
    }

    #[test]
    fn font_field_cycles_and_opens_picker() {
        let mut form = FormState::new(0);
        form.focus = Field::Font;
        assert_eq!(handle_key(&mut form, key(KeyCode::Right)), FormAction::Changed);
        assert_eq!(form.font_index, 1);
        assert_eq!(handle_key(&mut form, key(KeyCode::Up)), FormAction::Changed);
        assert_eq!(form.font_index, 0);
        assert_eq!(handle_key(&mut form, key(KeyCode::Enter)), FormAction::OpenFontPicker);
        assert_eq!(handle_key(&mut form, key(KeyCode::Char(' '))), FormAction::OpenFontPicker);
    }

    #[test]
    fn paste_normalizes_line_endings() {
        let mut form = FormState::new(0);
        assert_eq!(handle_paste(&mut form, "a\r\nb\rc"), FormAction::Changed);
        assert_eq!(form.text.value(), "a\nb\nc");
        form.focus = Field::Font;
        assert_eq!(handle_paste(&mut form, "x"), FormAction::Ignored);
    }

    #[test]
    fn ctrl_u_clears_focused_field() {
        let mut form = FormState::new(0);
        type_str(&mut form, "abc");
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut form, ctrl_u), FormAction::Changed);
        assert!(form.text.is_empty());
        assert_eq!(handle_key(&mut form, ctrl_u), FormAction::Ignored);
    }
}
