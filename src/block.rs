use serde::{Deserialize, Serialize};

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
}

impl Span {
    /// The span's text without any markers.
    pub fn as_str(&self) -> &str {
        match self {
            Span::Text(text) | Span::Bold(text) | Span::Italic(text) | Span::Code(text) => text,
        }
    }
}

/// Block-level elements parsed from a chat reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Code {
        language: Option<String>,
        content: String,
    },
    BulletList {
        items: Vec<String>,
    },
    NumberedList {
        items: Vec<String>,
    },
    Paragraph {
        content: Vec<Span>,
    },
}

/// Discriminant of a [`Block`], handy for comparing document shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Table,
    Code,
    BulletList,
    NumberedList,
    Paragraph,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Table { .. } => BlockKind::Table,
            Block::Code { .. } => BlockKind::Code,
            Block::BulletList { .. } => BlockKind::BulletList,
            Block::NumberedList { .. } => BlockKind::NumberedList,
            Block::Paragraph { .. } => BlockKind::Paragraph,
        }
    }
}

/// Pad or truncate every row to the header width.
///
/// The parser keeps ragged rows exactly as written; renderers that need a
/// rectangular grid call this instead.
pub fn normalize_rows(header: &[String], rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let width = header.len();
    rows.iter()
        .map(|row| {
            let mut row: Vec<String> = row.iter().take(width).cloned().collect();
            row.resize(width, String::new());
            row
        })
        .collect()
}

/// A parsed chat reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(Block::kind).collect()
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn normalize_pads_short_rows_and_truncates_long_ones() {
        let header = cells(&["A", "B"]);
        let rows = vec![cells(&["1"]), cells(&["1", "2", "3"]), cells(&[])];
        assert_eq!(
            normalize_rows(&header, &rows),
            vec![cells(&["1", ""]), cells(&["1", "2"]), cells(&["", ""])]
        );
    }

    #[test]
    fn serializes_with_type_tags() {
        let doc = Document::from(vec![
            Block::BulletList {
                items: cells(&["a"]),
            },
            Block::Paragraph {
                content: vec![Span::Bold("b".into())],
            },
        ]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"blocks":[{"type":"bullet_list","items":["a"]},{"type":"paragraph","content":[{"type":"bold","text":"b"}]}]}"#
        );
    }

    #[test]
    fn span_text_ignores_kind() {
        assert_eq!(Span::Italic("x".into()).as_str(), "x");
        assert_eq!(Span::Code("y".into()).as_str(), "y");
    }
}
