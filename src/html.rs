use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::block::{Block, Span};
use crate::config::HtmlConfig;

/// Convert blocks to an HTML fragment, one element per line
pub fn render(blocks: &[Block], config: &HtmlConfig) -> String {
    let mut out = String::new();
    for block in blocks {
        emit_block(block, config, &mut out);
    }
    out
}

fn emit_block(block: &Block, config: &HtmlConfig, out: &mut String) {
    match block {
        Block::Table { header, rows } => table_to_html(header, rows, config, out),
        Block::Code { language, content } => {
            out.push_str("<div class=\"code-block\"><div class=\"code-label\">");
            out.push_str(&encode_text(&config.code_label));
            out.push_str("</div><pre><code");
            if let Some(lang) = language.as_deref().filter(|_| config.language_class) {
                out.push_str(" class=\"language-");
                out.push_str(&encode_double_quoted_attribute(lang));
                out.push('"');
            }
            out.push('>');
            out.push_str(&encode_text(content));
            out.push_str("</code></pre></div>\n");
        }
        Block::BulletList { items } => list_to_html("ul", items, out),
        // The source numbers are gone; <ol> counts from 1.
        Block::NumberedList { items } => list_to_html("ol", items, out),
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, out);
            out.push_str("</p>\n");
        }
    }
}

fn list_to_html(tag: &str, items: &[String], out: &mut String) {
    out.push_str(&format!("<{tag}>\n"));
    for item in items {
        out.push_str("<li>");
        out.push_str(&encode_text(item));
        out.push_str("</li>\n");
    }
    out.push_str(&format!("</{tag}>\n"));
}

fn table_to_html(header: &[String], rows: &[Vec<String>], config: &HtmlConfig, out: &mut String) {
    out.push_str("<table>\n<thead><tr>");
    for cell in header {
        out.push_str("<th>");
        out.push_str(&encode_text(cell));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    // Ragged rows are written as parsed.
    for (i, row) in rows.iter().enumerate() {
        if config.striped_tables {
            let parity = if i % 2 == 0 { "even" } else { "odd" };
            out.push_str(&format!("<tr class=\"{parity}\">"));
        } else {
            out.push_str("<tr>");
        }
        for cell in row {
            out.push_str("<td>");
            out.push_str(&encode_text(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        let (open, close, text) = match span {
            Span::Text(text) => ("", "", text),
            Span::Bold(text) => ("<strong>", "</strong>", text),
            Span::Italic(text) => ("<em>", "</em>", text),
            Span::Code(text) => ("<code>", "</code>", text),
        };
        out.push_str(open);
        out.push_str(&encode_text(text));
        out.push_str(close);
    }
}
