use std::ops::Range;

use crate::block::{Block, Document};
use crate::inline;

const FENCE: &str = "```";

/// A block together with the half-open range of source lines it consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub block: Block,
    pub lines: Range<usize>,
}

/// Parse a chat reply into a document
pub fn parse(text: &str) -> Document {
    segment_lines(text)
        .into_iter()
        .map(|segment| segment.block)
        .collect::<Vec<_>>()
        .into()
}

/// Split text into blocks, keeping track of which lines each block used.
///
/// Rules are tried in order at every line and the first one that accepts
/// consumes its lines. Blank lines match no rule and are skipped.
pub fn segment_lines(text: &str) -> Vec<Segment> {
    let lines = split_lines(text);
    let mut cursor = Cursor {
        lines: &lines,
        pos: 0,
    };
    let mut segments = Vec::new();

    while cursor.pos < lines.len() {
        let start = cursor.pos;
        let matched = RULES
            .iter()
            .find_map(|(name, rule)| rule(&mut cursor).map(|block| (*name, block)));

        match matched {
            Some((name, block)) => {
                log::trace!("{name} block at lines {start}..{}", cursor.pos);
                segments.push(Segment {
                    block,
                    lines: start..cursor.pos,
                });
            }
            None => cursor.pos += 1,
        }
    }

    log::debug!(
        "segmented {} lines into {} blocks",
        lines.len(),
        segments.len()
    );
    segments
}

fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

struct Cursor<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn current(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn following(&self) -> Option<&'a str> {
        self.lines.get(self.pos + 1).copied()
    }

    /// Consume lines for as long as `item` extracts something from them.
    fn take_while<T>(&mut self, mut item: impl FnMut(&'a str) -> Option<T>) -> Vec<T> {
        let mut taken = Vec::new();
        while let Some(value) = self.current().and_then(&mut item) {
            taken.push(value);
            self.pos += 1;
        }
        taken
    }
}

type Rule = fn(&mut Cursor<'_>) -> Option<Block>;

const RULES: [(&str, Rule); 5] = [
    ("table", table),
    ("code", code),
    ("bullet list", bullet_list),
    ("numbered list", numbered_list),
    ("paragraph", paragraph),
];

fn table(cursor: &mut Cursor<'_>) -> Option<Block> {
    let header = cursor.current()?;
    if !has_pipe(header) || !cursor.following().is_some_and(has_pipe) {
        return None;
    }

    // Header and separator; the separator's content is never inspected.
    cursor.pos += 2;
    let rows = cursor.take_while(|line| has_pipe(line).then(|| split_cells(line)));

    Some(Block::Table {
        header: split_cells(header),
        rows,
    })
}

fn code(cursor: &mut Cursor<'_>) -> Option<Block> {
    let opening = cursor.current()?.trim();
    let info = opening.strip_prefix(FENCE)?.trim();
    let language = (!info.is_empty()).then(|| info.to_string());

    cursor.pos += 1;
    let body = cursor.take_while(|line| (!closes_fence(line)).then_some(line));
    if cursor.current().is_some() {
        cursor.pos += 1;
    } else {
        log::debug!("unterminated code fence, taking the rest of the input");
    }

    Some(Block::Code {
        language,
        content: body.join("\n"),
    })
}

fn bullet_list(cursor: &mut Cursor<'_>) -> Option<Block> {
    bullet_item(cursor.current()?)?;
    let items = cursor.take_while(|line| bullet_item(line).map(str::to_string));
    Some(Block::BulletList { items })
}

fn numbered_list(cursor: &mut Cursor<'_>) -> Option<Block> {
    numbered_item(cursor.current()?)?;
    let items = cursor.take_while(|line| numbered_item(line).map(str::to_string));
    Some(Block::NumberedList { items })
}

fn paragraph(cursor: &mut Cursor<'_>) -> Option<Block> {
    let first = cursor.current()?;
    if is_blank(first) {
        return None;
    }

    let mut text = first.trim_end().to_string();
    cursor.pos += 1;
    for line in cursor.take_while(|line| continues_paragraph(line).then(|| line.trim())) {
        text.push(' ');
        text.push_str(line);
    }

    Some(Block::Paragraph {
        content: inline::tokenize(&text),
    })
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn has_pipe(line: &str) -> bool {
    line.contains('|')
}

fn starts_fence(line: &str) -> bool {
    line.trim().starts_with(FENCE)
}

fn closes_fence(line: &str) -> bool {
    line.trim() == FENCE
}

fn continues_paragraph(line: &str) -> bool {
    !is_blank(line)
        && bullet_item(line).is_none()
        && numbered_item(line).is_none()
        && !has_pipe(line)
        && !starts_fence(line)
}

/// `- item`, `* item` or `• item`, returning the item text.
pub(crate) fn bullet_item(line: &str) -> Option<&str> {
    let line = line.trim();
    let mut chars = line.chars();
    let marker = chars.next().filter(|c| matches!(c, '-' | '*' | '•'))?;
    let space = chars.next().filter(|c| c.is_whitespace())?;
    Some(&line[marker.len_utf8() + space.len_utf8()..])
}

/// `12. item`, returning the item text.
pub(crate) fn numbered_item(line: &str) -> Option<&str> {
    let line = line.trim();
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    let space = rest.chars().next().filter(|c| c.is_whitespace())?;
    Some(&rest[space.len_utf8()..])
}

/// Split a table row on `|`, dropping the empty fragments outside the
/// outermost pipes.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = line.split('|').map(|c| c.trim().to_string()).collect();
    if cells.last().is_some_and(String::is_empty) {
        cells.pop();
    }
    if cells.first().is_some_and(String::is_empty) {
        cells.remove(0);
    }
    cells
}
