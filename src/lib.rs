mod block;
mod config;
mod error;
pub mod html;
pub mod inline;
pub mod message;
pub mod parser;
pub mod text;

pub use block::{Block, BlockKind, Document, Span, normalize_rows};
pub use config::{Config, HtmlConfig, TextConfig};
pub use error::Error;
pub use message::{FormattedMessage, Message, Role};
pub use parser::Segment;

/// Parse a chat reply into a document.
pub fn parse(reply: &str) -> Document {
    parser::parse(reply)
}

/// Convert a reply to an HTML fragment using default config.
pub fn reply_to_html(reply: &str) -> String {
    reply_to_html_with_config(reply, &Config::compiled_default())
}

/// Convert a reply to an HTML fragment with custom config.
pub fn reply_to_html_with_config(reply: &str, config: &Config) -> String {
    html::render(&parse(reply).blocks, &config.html)
}

/// Convert a reply to normalized plain text using default config.
pub fn reply_to_text(reply: &str) -> String {
    reply_to_text_with_config(reply, &Config::compiled_default())
}

/// Convert a reply to normalized plain text with custom config.
pub fn reply_to_text_with_config(reply: &str, config: &Config) -> String {
    text::render(&parse(reply).blocks, &config.text)
}

/// Convert a reply to pretty-printed JSON.
pub fn reply_to_json(reply: &str) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(&parse(reply))?)
}
