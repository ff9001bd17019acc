use std::borrow::Cow;

use crate::block::{Block, Span};
use crate::config::TextConfig;
use crate::parser::{bullet_item, numbered_item};

/// Render blocks back into the plain marker syntax the parser reads.
///
/// Blocks are separated by a blank line so that re-parsing the output
/// yields the same sequence of block kinds.
pub fn render(blocks: &[Block], config: &TextConfig) -> String {
    let mut out = String::new();

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        emit_block(block, config, &mut out);
    }

    out
}

/// Span contents with every marker stripped.
pub fn plain(spans: &[Span]) -> String {
    spans.iter().map(Span::as_str).collect()
}

fn emit_block(block: &Block, config: &TextConfig, out: &mut String) {
    match block {
        Block::Table { header, rows } => {
            emit_row(header, out);
            out.push('|');
            for _ in header {
                out.push_str(" --- |");
            }
            out.push('\n');
            for row in rows {
                emit_row(row, out);
            }
        }
        Block::Code { language, content } => {
            out.push_str("```");
            if let Some(lang) = language {
                out.push_str(lang);
            }
            out.push('\n');
            if !content.is_empty() {
                out.push_str(content);
                out.push('\n');
            }
            out.push_str("```\n");
        }
        Block::BulletList { items } => {
            for item in items {
                out.push_str(&config.bullet);
                out.push(' ');
                out.push_str(item);
                out.push('\n');
            }
        }
        Block::NumberedList { items } => {
            for (n, item) in items.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", n + 1, item));
            }
        }
        Block::Paragraph { content } => {
            let mut line = String::new();
            spans_to_text(content, &mut line);
            out.push_str(&split_after_list_marker(&line));
            out.push('\n');
        }
    }
}

/// A paragraph whose joined text reads like `- a` or `1. a` came from a
/// bare marker line followed by more text. Breaking the line after the
/// marker keeps it a paragraph; the parser joins it back with one space.
fn split_after_list_marker(line: &str) -> Cow<'_, str> {
    if bullet_item(line).is_none() && numbered_item(line).is_none() {
        return Cow::Borrowed(line);
    }

    let body = line.trim_start();
    let indent = line.len() - body.len();
    match body.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((at, space)) => {
            let at = indent + at;
            Cow::Owned(format!("{}\n{}", &line[..at], &line[at + space.len_utf8()..]))
        }
        None => Cow::Borrowed(line),
    }
}

fn emit_row(cells: &[String], out: &mut String) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(cell);
        out.push_str(" |");
    }
    out.push('\n');
}

fn spans_to_text(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) => out.push_str(text),
            Span::Bold(text) => {
                out.push_str("**");
                out.push_str(text);
                out.push_str("**");
            }
            // `_` rather than `*`, so "_ x_" cannot come back as a bullet.
            Span::Italic(text) => {
                out.push('_');
                out.push_str(text);
                out.push('_');
            }
            Span::Code(text) => {
                out.push('`');
                out.push_str(text);
                out.push('`');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn to_text(input: &str) -> String {
        render(&parse(input).blocks, &TextConfig::default())
    }

    #[test]
    fn table() {
        insta::assert_snapshot!(to_text("A | B\n--|--\n1 | 2\n3"), @r"
        | A | B |
        | --- | --- |
        | 1 | 2 |

        3
        ");
    }

    #[test]
    fn empty_row_keeps_a_pipe() {
        assert_eq!(to_text("a | b\n-|-\n|"), "| a | b |\n| --- | --- |\n|\n");
    }

    #[test]
    fn code_block() {
        assert_eq!(to_text("```sh\nls -la\n```"), "```sh\nls -la\n```\n");
        assert_eq!(to_text("```\n```"), "```\n```\n");
    }

    #[test]
    fn lists_are_renumbered() {
        assert_eq!(to_text("3. c\n7. d\n\n* x"), "1. c\n2. d\n\n- x\n");
    }

    #[test]
    fn custom_bullet() {
        let config = TextConfig {
            bullet: "•".to_string(),
        };
        assert_eq!(render(&parse("- a").blocks, &config), "• a\n");
    }

    #[test]
    fn paragraph_markers_are_normalized() {
        assert_eq!(
            to_text("__strong__ *soft* `raw`"),
            "**strong** _soft_ `raw`\n"
        );
    }

    #[test]
    fn paragraph_starting_with_a_bare_marker_stays_a_paragraph() {
        assert_eq!(to_text("-\na"), "-\na\n");
        assert_eq!(to_text("  •\ntwo words"), "  •\ntwo words\n");
        assert_eq!(to_text("1.\n1."), "1.\n1.\n");
        assert_eq!(parse(&to_text("*\nfoo")), parse("*\nfoo"));
    }

    #[test]
    fn plain_strips_markers() {
        let doc = parse("**a** _b_ `c`");
        let crate::Block::Paragraph { content } = &doc.blocks[0] else {
            panic!("expected a paragraph");
        };
        assert_eq!(plain(content), "a b c");
    }

    #[test]
    fn empty_document_renders_nothing() {
        assert_eq!(to_text(""), "");
    }
}
