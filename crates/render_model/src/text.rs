//! Text measurement and line wrapping
//!
//! Widths come from shaping each run against the font book. Lines break at
//! Unicode line break opportunities (UAX #14).

use crate::{Color, FontBook, GlyphRun, RenderItem, TextAlign};
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// Font settings for a run of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
    /// Line advance as a multiple of font size
    pub line_height: f64,
    pub align: TextAlign,
    pub letter_spacing: f64,
}

impl TextStyle {
    pub fn new(font_family: impl Into<String>, font_size: f64, color: Color) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            bold: false,
            italic: false,
            color,
            line_height: 1.4,
            align: TextAlign::Start,
            letter_spacing: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn letter_spacing(mut self, letter_spacing: f64) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    /// Distance between consecutive baselines
    pub fn line_advance(&self) -> f64 {
        self.font_size * self.line_height
    }

    /// Width of `text` in this style
    pub fn measure(&self, fonts: &FontBook, text: &str) -> f64 {
        let advance = fonts.advance(text, &self.font_family, self.font_size, self.bold, self.italic);
        advance + self.letter_spacing * text.chars().count() as f64
    }

    /// A single glyph run with its baseline at `y`
    pub fn run(&self, text: impl Into<String>, x: f64, y: f64) -> RenderItem {
        RenderItem::GlyphRun(GlyphRun {
            text: text.into(),
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            bold: self.bold,
            italic: self.italic,
            color: self.color,
            x,
            y,
            align: self.align,
            letter_spacing: self.letter_spacing,
        })
    }
}

/// Width of an existing glyph run
pub fn measure_run(fonts: &FontBook, run: &GlyphRun) -> f64 {
    let advance = fonts.advance(&run.text, &run.font_family, run.font_size, run.bold, run.italic);
    advance + run.letter_spacing * run.text.chars().count() as f64
}

/// Break `text` into lines no wider than `max_width`
///
/// Segments wider than a whole line are split between characters. Explicit
/// newlines start a new line; empty text yields no lines.
pub fn wrap_text(fonts: &FontBook, text: &str, max_width: f64, style: &TextStyle) -> Vec<String> {
    let fits = |line: &str| style.measure(fonts, line.trim_end()) <= max_width;
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let paragraph = paragraph.trim_start();
        let mut current = String::new();
        let mut start = 0;

        for (end, opportunity) in linebreaks(paragraph) {
            let segment = &paragraph[start..end];
            start = end;

            let candidate = format!("{}{}", current, segment);
            if fits(&candidate) {
                current = candidate;
            } else {
                push_line(&mut lines, &mut current);
                if fits(segment) {
                    current = segment.to_string();
                } else {
                    for ch in segment.chars() {
                        let mut next = current.clone();
                        next.push(ch);
                        if !current.is_empty() && !fits(&next) {
                            push_line(&mut lines, &mut current);
                            current.push(ch);
                        } else {
                            current = next;
                        }
                    }
                }
            }

            if opportunity == BreakOpportunity::Mandatory && end < paragraph.len() {
                push_line(&mut lines, &mut current);
            }
        }

        push_line(&mut lines, &mut current);
    }

    lines
}

/// Move `current` into `lines` without its trailing spaces, skipping blanks
fn push_line(lines: &mut Vec<String>, current: &mut String) {
    let line = std::mem::take(current);
    let line = line.trim_end();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
}

/// Wrapped text positioned as glyph runs
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    pub items: Vec<RenderItem>,
    /// Vertical space consumed, from the top of the first line
    pub height: f64,
}

impl TextBlock {
    /// Wrap `text` into `width` and place the first line's top at `(x, top)`
    ///
    /// At most `max_lines` lines are emitted when given; the last kept line
    /// ends in an ellipsis if text was cut.
    pub fn layout(
        fonts: &FontBook,
        text: &str,
        x: f64,
        top: f64,
        width: f64,
        style: &TextStyle,
        max_lines: Option<usize>,
    ) -> Self {
        let mut lines = wrap_text(fonts, text, width, style);
        if let Some(max) = max_lines {
            if lines.len() > max {
                lines.truncate(max);
                if let Some(last) = lines.last_mut() {
                    let mut shortened: String = last.clone();
                    while !shortened.is_empty() && style.measure(fonts, &format!("{}...", shortened)) > width {
                        shortened.pop();
                    }
                    *last = format!("{}...", shortened.trim_end());
                }
            }
        }

        let anchor_x = match style.align {
            TextAlign::Start => x,
            TextAlign::Middle => x + width / 2.0,
            TextAlign::End => x + width,
        };

        let advance = style.line_advance();
        // Baseline sits roughly 80% of the font size below the line top
        let first_baseline = top + (advance - style.font_size) / 2.0 + style.font_size * 0.8;

        let items = lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| style.run(line, anchor_x, first_baseline + idx as f64 * advance))
            .collect::<Vec<_>>();

        let height = items.len() as f64 * advance;
        Self { items, height }
    }
}
