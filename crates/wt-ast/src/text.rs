//! Strict plain-text extraction from content nodes.
//!
//! Attribute values and image alt text must end up as plain strings in the
//! object model. Extraction only accepts text-like nodes; structured markup
//! in such positions is an error the caller propagates.

use crate::WtNode;

/// A content node could not be rendered as plain text.
#[derive(Debug, thiserror::Error)]
pub enum StringConversionError {
    /// A node kind with no plain-text form was encountered.
    #[error("cannot convert {kind} node to plain text")]
    UnconvertibleNode {
        /// Kind name of the offending node.
        kind: &'static str,
    },

    /// A character reference does not denote a valid character.
    #[error("invalid code point U+{code_point:04X} in character reference")]
    InvalidCodePoint { code_point: u32 },

    /// A named entity reference the parser could not resolve.
    #[error("unresolved entity reference &{name};")]
    UnresolvedEntity { name: String },
}

/// Extract the plain text of a node sequence.
///
/// Text and newline tokens contribute their content, character and entity
/// references their resolved characters, and pure grouping nodes recurse.
/// Everything else fails with [`StringConversionError`].
pub fn to_text(nodes: &[WtNode]) -> Result<String, StringConversionError> {
    let mut out = String::new();
    for node in nodes {
        append_text(&mut out, node)?;
    }
    Ok(out)
}

fn append_text(out: &mut String, node: &WtNode) -> Result<(), StringConversionError> {
    match node {
        WtNode::Text { content } | WtNode::Newline { content } => out.push_str(content),
        WtNode::XmlCharRef { code_point } => match char::from_u32(*code_point) {
            Some(c) => out.push(c),
            None => {
                return Err(StringConversionError::InvalidCodePoint {
                    code_point: *code_point,
                });
            }
        },
        WtNode::XmlEntityRef { name, resolved } => match resolved {
            Some(text) => out.push_str(text),
            None => {
                return Err(StringConversionError::UnresolvedEntity { name: name.clone() });
            }
        },
        WtNode::Whitespace { content }
        | WtNode::Body { content }
        | WtNode::Name { content }
        | WtNode::Value { content } => {
            for child in content {
                append_text(out, child)?;
            }
        }
        WtNode::NodeList { list } => {
            for child in list {
                append_text(out, child)?;
            }
        }
        other => {
            return Err(StringConversionError::UnconvertibleNode { kind: other.kind() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let nodes = vec![WtNode::text("a"), WtNode::newline(), WtNode::text("b")];
        assert_eq!(to_text(&nodes).unwrap(), "a\nb");
    }

    #[test]
    fn references_resolve_to_characters() {
        let nodes = vec![
            WtNode::XmlCharRef { code_point: 0x2014 },
            WtNode::XmlEntityRef {
                name: "amp".to_owned(),
                resolved: Some("&".to_owned()),
            },
        ];
        assert_eq!(to_text(&nodes).unwrap(), "\u{2014}&");
    }

    #[test]
    fn structured_markup_is_rejected() {
        let nodes = vec![WtNode::Bold {
            content: vec![WtNode::text("x")],
        }];
        let err = to_text(&nodes).unwrap_err();
        assert!(matches!(
            err,
            StringConversionError::UnconvertibleNode { kind: "bold" }
        ));
    }

    #[test]
    fn unresolved_entity_is_rejected() {
        let nodes = vec![WtNode::XmlEntityRef {
            name: "bogus".to_owned(),
            resolved: None,
        }];
        assert!(matches!(
            to_text(&nodes).unwrap_err(),
            StringConversionError::UnresolvedEntity { .. }
        ));
    }

    #[test]
    fn grouping_nodes_recurse() {
        let nodes = vec![WtNode::NodeList {
            list: vec![WtNode::text("in "), WtNode::text("order")],
        }];
        assert_eq!(to_text(&nodes).unwrap(), "in order");
    }
}
