//! Counting blank-line runs at paragraph edges.
//!
//! Paragraphs record the vertical gap separating them from neighboring
//! content as a line-break count. The count is taken from the run of
//! whitespace at the start or end of the paragraph's children: each newline
//! token counts one, and inside text each `\n` or `\r` counts one, with a
//! CR directly followed by LF (or the reverse) counting as a single break.
//! The scan stops at the first non-whitespace character or non-text node.

use wt_ast::WtNode;

/// Where to scan a paragraph's children from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Leading,
    Trailing,
}

/// Counts line breaks in the whitespace run at one edge of `children`.
pub fn count_newlines(children: &[WtNode], edge: Edge) -> u32 {
    let mut count = 0;
    let iter: Box<dyn Iterator<Item = &WtNode>> = match edge {
        Edge::Leading => Box::new(children.iter()),
        Edge::Trailing => Box::new(children.iter().rev()),
    };
    for child in iter {
        match child {
            WtNode::Newline { .. } => count += 1,
            WtNode::Text { content } => {
                let (n, stopped) = count_in_text(content, edge);
                count += n;
                if stopped {
                    break;
                }
            }
            _ => break,
        }
    }
    count
}

/// Counts breaks in the whitespace run at one edge of a text fragment.
/// Returns the count and whether the run ended inside the fragment.
fn count_in_text(text: &str, edge: Edge) -> (u32, bool) {
    let mut count = 0;
    let chars: Box<dyn Iterator<Item = char>> = match edge {
        Edge::Leading => Box::new(text.chars()),
        Edge::Trailing => Box::new(text.chars().rev()),
    };
    let mut chars = chars.peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' | '\r' => {
                let other = if c == '\n' { '\r' } else { '\n' };
                if chars.peek() == Some(&other) {
                    chars.next();
                }
                count += 1;
            }
            c if c.is_whitespace() => {}
            _ => return (count, true),
        }
    }
    (count, false)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wt_ast::WtNode;

    use super::{Edge, count_newlines};

    #[test]
    fn counts_newline_tokens() {
        let children = vec![
            WtNode::newline(),
            WtNode::newline(),
            WtNode::text("body"),
        ];
        assert_eq!(count_newlines(&children, Edge::Leading), 2);
        assert_eq!(count_newlines(&children, Edge::Trailing), 0);
    }

    #[test]
    fn crlf_counts_once() {
        let children = vec![WtNode::text("\r\n\r\nbody")];
        assert_eq!(count_newlines(&children, Edge::Leading), 2);
    }

    #[test]
    fn lone_cr_and_lf_count_separately() {
        let children = vec![WtNode::text("\n \n text")];
        assert_eq!(count_newlines(&children, Edge::Leading), 2);
    }

    #[test]
    fn trailing_edge_scans_from_the_end() {
        let children = vec![WtNode::text("body\n\n"), WtNode::newline()];
        assert_eq!(count_newlines(&children, Edge::Trailing), 3);
        assert_eq!(count_newlines(&children, Edge::Leading), 0);
    }

    #[test]
    fn stops_at_non_text_nodes() {
        let children = vec![WtNode::Ticks { count: 2 }, WtNode::newline()];
        assert_eq!(count_newlines(&children, Edge::Leading), 0);
    }
}
