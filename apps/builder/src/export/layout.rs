//! Lays a preview tree out on a fixed-size page as a flat list of draw ops.
//!
//! Glyphs are fixed-width bitmap cells, so measuring text is counting chars.
//! Everything is positioned in CSS px; the rasterizer applies the scale.

use super::page::PageGeometry;
use crate::preview::{
    Align, Block, Contact, Header, HeadingRule, Line, PreviewTree, Section, TextStyle, Theme,
};

const TEXT: [u8; 3] = [0x11, 0x18, 0x27];
const MUTED: [u8; 3] = [0x37, 0x41, 0x51];

const COLUMN_GAP: u32 = 12;
const BULLET_INDENT: u32 = 16;
const SECTION_GAP: u32 = 10;
const ITEM_GAP: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Body,
    Name,
}

impl TextSize {
    /// Glyph cell edge in CSS px. Kept at multiples of 4 so a 2× raster
    /// scales the 8×8 glyphs by a whole number.
    pub fn px(self) -> u32 {
        match self {
            TextSize::Small => 8,
            TextSize::Body => 12,
            TextSize::Name => 20,
        }
    }

    pub fn line_height(self) -> u32 {
        self.px() + self.px() / 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFace {
    pub size: TextSize,
    pub bold: bool,
    pub italic: bool,
    pub color: [u8; 3],
}

impl TextFace {
    fn plain(size: TextSize) -> Self {
        Self {
            size,
            bold: false,
            italic: false,
            color: TEXT,
        }
    }

    fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    fn for_style(style: TextStyle) -> Self {
        match style {
            TextStyle::Regular => Self::plain(TextSize::Body),
            TextStyle::Bold => Self::plain(TextSize::Body).bold(),
            TextStyle::Italic => Self {
                italic: true,
                ..Self::plain(TextSize::Body)
            },
            TextStyle::Small => Self {
                color: MUTED,
                ..Self::plain(TextSize::Small)
            },
        }
    }

    pub fn text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.size.px()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: u32,
        y: u32,
        text: String,
        face: TextFace,
    },
    Rect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: [u8; 3],
    },
}

impl DrawOp {
    fn bottom(&self) -> u32 {
        match self {
            DrawOp::Text { y, face, .. } => y + face.size.px(),
            DrawOp::Rect { y, height, .. } => y + height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
    /// Whether anything was dropped for running past the page bottom.
    pub clipped: bool,
}

#[cfg(test)]
impl PageLayout {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rect { .. } => None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Line breaking
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word wrap to at most `max_chars` per line. Words longer than a
/// whole line are hard-split.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        let mut rest = chars.as_slice();

        while !rest.is_empty() {
            let space = usize::from(current_len > 0);
            if current_len + space + rest.len() <= max_chars {
                if space == 1 {
                    current.push(' ');
                }
                current.extend(rest.iter());
                current_len += space + rest.len();
                break;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            let (head, tail) = rest.split_at(max_chars);
            lines.push(head.iter().collect());
            rest = tail;
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Page layout
// ────────────────────────────────────────────────────────────────────────────

struct Cursor<'a> {
    geometry: &'a PageGeometry,
    theme: Theme,
    y: u32,
    ops: Vec<DrawOp>,
}

impl Cursor<'_> {
    fn left(&self) -> u32 {
        self.geometry.content_left()
    }

    fn width(&self) -> u32 {
        self.geometry.content_width()
    }

    fn text(&mut self, x: u32, y: u32, text: impl Into<String>, face: TextFace) {
        let text = text.into();
        if !text.is_empty() {
            self.ops.push(DrawOp::Text { x, y, text, face });
        }
    }

    fn rule(&mut self, color: [u8; 3]) {
        self.ops.push(DrawOp::Rect {
            x: self.left(),
            y: self.y,
            width: self.width(),
            height: 1,
            color,
        });
    }

    /// Wraps `text` into the column starting at `x` and returns the y below
    /// the last line.
    fn paragraph(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        text: &str,
        face: TextFace,
        align: Align,
    ) -> u32 {
        let max_chars = (width / face.size.px()) as usize;
        let mut y = y;
        for line in wrap(text, max_chars) {
            let line_x = match align {
                Align::Left => x,
                Align::Center => x + width.saturating_sub(face.text_width(&line)) / 2,
            };
            self.text(line_x, y, line, face);
            y += face.size.line_height();
        }
        y
    }

    fn header(&mut self, header: &Header) {
        let align = self.theme.header_align;
        let (left, width) = (self.left(), self.width());

        let name_face = TextFace::plain(TextSize::Name).bold();
        self.y = self.paragraph(left, self.y, width, &header.name, name_face, align);

        if let Some(title) = &header.title {
            let face = TextFace::plain(TextSize::Body);
            self.y = self.paragraph(left, self.y, width, title, face, align);
        }

        let contacts: Vec<&str> = header
            .contacts
            .iter()
            .map(|c| match c {
                Contact::Text { text } => text.as_str(),
                Contact::Link { label, .. } => label.as_str(),
            })
            .collect();
        if !contacts.is_empty() {
            let face = TextFace::for_style(TextStyle::Small);
            self.y = self.paragraph(left, self.y, width, &contacts.join(" | "), face, align);
        }
    }

    fn section(&mut self, section: &Section) {
        let accent = self.theme.accent;
        self.y += SECTION_GAP;
        if self.theme.heading_rule == HeadingRule::AboveAndBelow {
            self.rule(accent);
            self.y += 4;
        }

        let face = TextFace {
            color: accent,
            ..TextFace::plain(TextSize::Body).bold()
        };
        self.text(self.left(), self.y, section.heading, face);
        self.y += face.size.line_height();
        self.rule(accent);
        self.y += ITEM_GAP;

        for item in &section.items {
            for block in &item.blocks {
                self.block(block);
            }
            self.y += ITEM_GAP;
        }
    }

    fn block(&mut self, block: &Block) {
        let (left, width) = (self.left(), self.width());
        match block {
            Block::Columns { left: lhs, right: rhs } => {
                let right_width = rhs
                    .iter()
                    .map(|l| TextFace::for_style(l.style).text_width(&l.text))
                    .max()
                    .unwrap_or(0)
                    .min(width / 2);
                let left_width = if right_width == 0 {
                    width
                } else {
                    width - right_width - COLUMN_GAP
                };

                let mut left_y = self.y;
                for line in lhs {
                    left_y = self.line(left, left_y, left_width, line);
                }
                let mut right_y = self.y;
                for line in rhs {
                    let face = TextFace::for_style(line.style);
                    let x = (left + width)
                        .saturating_sub(face.text_width(&line.text))
                        .max(left + left_width);
                    right_y =
                        self.paragraph(x, right_y, right_width, &line.text, face, Align::Left);
                }
                self.y = left_y.max(right_y);
            }
            Block::Line(line) => {
                self.y = self.line(left, self.y, width, line);
            }
            Block::Labeled { label, text } => {
                let face = TextFace::for_style(TextStyle::Regular);
                let prefix = format!("{label}:");
                let full = format!("{prefix} {text}");
                let max_chars = (width / face.size.px()) as usize;
                for (i, line) in wrap(&full, max_chars).into_iter().enumerate() {
                    match line.strip_prefix(prefix.as_str()).filter(|_| i == 0) {
                        Some(rest) => {
                            self.text(left, self.y, prefix.clone(), face.bold());
                            let x = left + face.text_width(&prefix);
                            self.text(x, self.y, rest, face);
                        }
                        None => self.text(left, self.y, line.as_str(), face),
                    }
                    self.y += face.size.line_height();
                }
            }
            Block::Bullets { items } => {
                let face = TextFace::for_style(TextStyle::Regular);
                let line_height = face.size.line_height();
                for item in items {
                    self.ops.push(DrawOp::Rect {
                        x: left + 4,
                        y: self.y + face.size.px() / 2 - 1,
                        width: 3,
                        height: 3,
                        color: TEXT,
                    });
                    let next = self.paragraph(
                        left + BULLET_INDENT,
                        self.y,
                        width - BULLET_INDENT,
                        item,
                        face,
                        Align::Left,
                    );
                    self.y = next.max(self.y + line_height);
                }
            }
        }
    }

    fn line(&mut self, x: u32, y: u32, width: u32, line: &Line) -> u32 {
        let face = TextFace::for_style(line.style);
        self.paragraph(x, y, width, &line.text, face, Align::Left)
    }
}

pub fn layout(tree: &PreviewTree, geometry: &PageGeometry) -> PageLayout {
    let mut cursor = Cursor {
        geometry,
        theme: tree.theme,
        y: geometry.padding_px,
        ops: Vec::new(),
    };

    cursor.header(&tree.header);
    for section in &tree.sections {
        cursor.section(section);
    }

    let bottom = geometry.content_bottom();
    let total = cursor.ops.len();
    let mut ops = cursor.ops;
    ops.retain(|op| op.bottom() <= bottom);

    PageLayout {
        clipped: ops.len() < total,
        ops,
    }
}
