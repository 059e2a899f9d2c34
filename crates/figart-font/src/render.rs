//! Rendering text with a FIGfont.
//!
//! [`Renderer`] is a small builder over a borrowed [`Font`]: it starts from the font's own
//! defaults and lets callers override the layout modes, print direction, alignment and the
//! maximum output width.

mod line;
mod stack;

use thiserror::Error;

use self::line::{Composer, FigLine};
use crate::font::{Font, PrintDirection};
use crate::layout::{HorizontalLayout, LayoutMode, VerticalLayout};

/// Horizontal placement of each FIGline within the output width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("{ch:?} does not fit within {width} columns")]
    TooNarrow { ch: char, width: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer<'f> {
    font: &'f Font,
    horizontal: HorizontalLayout,
    vertical: VerticalLayout,
    direction: PrintDirection,
    alignment: Option<Alignment>,
    max_width: Option<usize>,
    whitespace_break: bool,
}

impl<'f> Renderer<'f> {
    /// A renderer using the font's default layouts and direction, unbounded width, breaking
    /// long lines at whitespace once a width is set.
    pub fn new(font: &'f Font) -> Self {
        let header = font.header();
        Self {
            font,
            horizontal: header.horizontal_layout,
            vertical: header.vertical_layout,
            direction: header.print_direction,
            alignment: None,
            max_width: None,
            whitespace_break: true,
        }
    }

    #[must_use]
    pub fn horizontal_layout(mut self, mode: LayoutMode) -> Self {
        self.horizontal = self.horizontal.with_mode(mode);
        self
    }

    #[must_use]
    pub fn vertical_layout(mut self, mode: LayoutMode) -> Self {
        self.vertical = self.vertical.with_mode(mode);
        self
    }

    #[must_use]
    pub fn print_direction(mut self, direction: PrintDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Lines are left aligned unless this is set. Alignment pads within the widest rendered
    /// line, never out to `max_width`.
    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Wraps output so no row is wider than `width` columns.
    #[must_use]
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// When wrapping, prefer breaking at the last run of spaces over splitting a word.
    #[must_use]
    pub fn whitespace_break(mut self, enabled: bool) -> Self {
        self.whitespace_break = enabled;
        self
    }

    fn composer(&self) -> Composer {
        Composer {
            layout: self.horizontal,
            hardblank: self.font.header().hardblank,
            direction: self.direction,
        }
    }

    /// Renders `text`, returning the banner rows joined by `\n` without a trailing newline.
    ///
    /// Input lines are separated by `\n`, `\r\n` or `\r`; tabs count as spaces. Characters the
    /// font cannot draw are skipped. Empty input renders to an empty string.
    ///
    /// # Errors
    /// [`RenderError::TooNarrow`] if a single FIGcharacter is wider than the maximum width.
    pub fn render(&self, text: &str) -> Result<String, RenderError> {
        if text.is_empty() {
            return Ok(String::new());
        }
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n").replace('\t', " ");

        let mut lines = Vec::new();
        for paragraph in normalized.split('\n') {
            self.wrap_paragraph(paragraph, &mut lines)?;
        }

        let hardblank = self.font.header().hardblank;
        let target = lines
            .iter()
            .map(|line| line.visible_width(hardblank))
            .max()
            .unwrap_or(0);
        let alignment = self.alignment.unwrap_or(Alignment::Left);

        let mut out: Vec<Vec<char>> = Vec::new();
        for line in lines {
            let visible = line.visible_width(hardblank);
            let pad = match alignment {
                Alignment::Left => 0,
                Alignment::Center => target.saturating_sub(visible) / 2,
                Alignment::Right => target.saturating_sub(visible),
            };
            let rows = line
                .into_rows(self.direction)
                .into_iter()
                .map(|row| {
                    let mut padded = vec![' '; pad];
                    padded.extend(
                        row.into_iter()
                            .map(|c| if hardblank == c { ' ' } else { c }),
                    );
                    padded
                })
                .collect();
            stack::stack(self.vertical, &mut out, rows);
        }

        let rendered: Vec<String> = out
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end_matches(' ').to_owned())
            .collect();
        Ok(rendered.join("\n"))
    }

    /// Lays out one input line, pushing one or more FIGlines.
    fn wrap_paragraph(&self, paragraph: &str, out: &mut Vec<FigLine>) -> Result<(), RenderError> {
        let composer = self.composer();
        let hardblank = self.font.header().hardblank;
        let height = self.font.header().height.get();
        let chars: Vec<char> = paragraph.chars().collect();

        let mut line = FigLine::new(height);
        // Line as it was before the current (or most recent) run of spaces.
        let mut before_spaces = line.clone();
        // Where a word-preserving break could happen: the line before the spaces and the index
        // of the first character after them.
        let mut word_break: Option<(FigLine, usize)> = None;

        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            let is_space = ch == ' ';
            let Some(glyph) = self.font.glyph(ch) else {
                i += 1;
                continue;
            };
            if is_space && (i == 0 || chars[i - 1] != ' ') {
                before_spaces = line.clone();
            }
            if !is_space && i > 0 && chars[i - 1] == ' ' && !line.is_empty() {
                word_break = Some((before_spaces.clone(), i));
            }

            let next = composer.append(&line, glyph);
            let fits = self
                .max_width
                .is_none_or(|max| next.visible_width(hardblank) <= max);
            if fits {
                line = next;
                i += 1;
                continue;
            }

            let width = self.max_width.unwrap_or_default();
            if line.is_empty() {
                return Err(RenderError::TooNarrow { ch, width });
            }
            if is_space {
                out.push(std::mem::replace(&mut before_spaces, FigLine::new(height)));
                while chars.get(i) == Some(&' ') {
                    i += 1;
                }
                line = FigLine::new(height);
            } else if let Some((before, resume)) = word_break.take().filter(|_| self.whitespace_break) {
                out.push(before);
                line = FigLine::new(height);
                i = resume;
            } else {
                out.push(std::mem::replace(&mut line, FigLine::new(height)));
            }
            word_break = None;
        }
        out.push(line);
        Ok(())
    }
}
