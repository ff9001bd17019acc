//! Chat transcripts: role-tagged messages as the dashboard receives them.
//!
//! Only assistant replies carry formatting. User messages are shown as
//! typed, so they become a single unformatted paragraph.

use serde::{Deserialize, Serialize};

use crate::block::{Block, Document, Span};
use crate::error::Error;
use crate::parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// The structured form of this message.
    pub fn document(&self) -> Document {
        match self.role {
            Role::Assistant => parser::parse(&self.content),
            Role::User if self.content.trim().is_empty() => Document::default(),
            Role::User => Document::from(vec![Block::Paragraph {
                content: vec![Span::Text(self.content.clone())],
            }]),
        }
    }
}

/// A message paired with its parsed document, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedMessage {
    pub role: Role,
    #[serde(flatten)]
    pub document: Document,
}

/// Parse a JSON array of `{"role": ..., "content": ...}` objects.
pub fn load_transcript(json: &str) -> Result<Vec<Message>, Error> {
    serde_json::from_str(json).map_err(Error::Transcript)
}

/// Parse every message of a transcript independently.
pub fn format_transcript(messages: &[Message]) -> Vec<FormattedMessage> {
    messages
        .iter()
        .map(|message| FormattedMessage {
            role: message.role,
            document: message.document(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn assistant_content_is_parsed() {
        let message = Message::assistant("- gold\n- silver");
        assert_eq!(message.document().kinds(), vec![BlockKind::BulletList]);
    }

    #[test]
    fn user_content_is_left_alone() {
        let message = Message::user("- **not** a list");
        assert_eq!(
            message.document().blocks,
            vec![Block::Paragraph {
                content: vec![Span::Text("- **not** a list".into())],
            }]
        );
    }

    #[test]
    fn blank_user_message_is_empty() {
        assert!(Message::user("  \n").document().is_empty());
    }

    #[test]
    fn loads_transcript() {
        let messages = load_transcript(
            r#"[{"role":"user","content":"stock?"},{"role":"assistant","content":"**3** bars"}]"#,
        )
        .unwrap();
        assert_eq!(
            messages,
            vec![Message::user("stock?"), Message::assistant("**3** bars")]
        );

        let formatted = format_transcript(&messages);
        assert_eq!(formatted.len(), 2);
        assert_eq!(formatted[1].role, Role::Assistant);
        assert_eq!(
            formatted[1].document.blocks,
            vec![Block::Paragraph {
                content: vec![Span::Bold("3".into()), Span::Text(" bars".into())],
            }]
        );
    }

    #[test]
    fn rejects_unknown_role() {
        let err = load_transcript(r#"[{"role":"system","content":"x"}]"#).unwrap_err();
        assert!(matches!(err, Error::Transcript(_)));
    }

    #[test]
    fn formatted_message_serializes_flat() {
        let formatted = format_transcript(&[Message::assistant("hi")]);
        let json = serde_json::to_string(&formatted).unwrap();
        assert_eq!(
            json,
            r#"[{"role":"assistant","blocks":[{"type":"paragraph","content":[{"type":"text","text":"hi"}]}]}]"#
        );
    }
}
