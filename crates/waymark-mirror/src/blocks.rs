//! Line-wise Markdown to block conversion.
//!
//! Lossy by construction: code fences become a fixed placeholder, inline
//! markup is kept as plain text, and there is no way back to Markdown.

use serde_json::{json, Value};

/// Blocks accepted per append request, and kept per converted document.
pub const MAX_BLOCKS: usize = 100;
/// Characters kept per paragraph.
pub const MAX_PARAGRAPH_CHARS: usize = 2000;
/// Text substituted for any code fence line.
pub const CODE_PLACEHOLDER: &str = "Code block";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Level 1 to 3.
    Heading(u8, String),
    Bullet(String),
    CodePlaceholder,
    Paragraph(String),
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading(level.clamp(1, 3), text.into())
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(text.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Heading(1, _) => "heading_1",
            Block::Heading(2, _) => "heading_2",
            Block::Heading(_, _) => "heading_3",
            Block::Bullet(_) => "bulleted_list_item",
            Block::CodePlaceholder => "code",
            Block::Paragraph(_) => "paragraph",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Block::Heading(_, t) | Block::Bullet(t) | Block::Paragraph(t) => t,
            Block::CodePlaceholder => CODE_PLACEHOLDER,
        }
    }

    /// Wire shape of the block record.
    pub fn to_json(&self) -> Value {
        let kind = self.type_name();
        let rich_text = json!([{ "type": "text", "text": { "content": self.text() } }]);
        let body = match self {
            Block::CodePlaceholder => json!({ "rich_text": rich_text, "language": "plain text" }),
            _ => json!({ "rich_text": rich_text }),
        };
        json!({ "object": "block", "type": kind, kind: body })
    }
}

fn classify(line: &str) -> Option<Block> {
    if line.trim().is_empty() {
        return None;
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return Some(Block::Heading(1, rest.to_string()));
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Some(Block::Heading(2, rest.to_string()));
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return Some(Block::Heading(3, rest.to_string()));
    }
    if line.starts_with("```") {
        return Some(Block::CodePlaceholder);
    }
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return Some(Block::Bullet(rest.to_string()));
    }
    Some(Block::Paragraph(
        line.chars().take(MAX_PARAGRAPH_CHARS).collect(),
    ))
}

/// Classify each line of `markdown`; blank lines produce nothing and the
/// result is cut at [`MAX_BLOCKS`].
pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
    markdown
        .lines()
        .filter_map(classify)
        .take(MAX_BLOCKS)
        .collect()
}
