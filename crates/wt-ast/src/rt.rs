//! Round-trip printer: renders syntax-tree nodes back to their textual form.
//!
//! The lowering stage has no structural model for stray XML tags. Instead of
//! dropping them it re-prints them verbatim and emits the result as text, so
//! the original markup stays visible in the output document.

use std::fmt::Write;

use crate::WtNode;

/// Render a node back to its wikitext-ish source form.
pub fn print(node: &WtNode) -> String {
    let mut out = String::new();
    print_into(&mut out, node);
    out
}

/// Render a sequence of nodes back to text, concatenated.
pub fn print_all(nodes: &[WtNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        print_into(&mut out, node);
    }
    out
}

fn print_into(out: &mut String, node: &WtNode) {
    match node {
        WtNode::Text { content }
        | WtNode::Newline { content }
        | WtNode::Ignored { content }
        | WtNode::Nowiki { content }
        | WtNode::XmlAttributeGarbage { content } => out.push_str(content),
        WtNode::Ticks { count } => {
            for _ in 0..*count {
                out.push('\'');
            }
        }
        WtNode::XmlCharRef { code_point } => {
            let _ = write!(out, "&#{code_point};");
        }
        WtNode::XmlEntityRef { name, .. } => {
            let _ = write!(out, "&{name};");
        }
        WtNode::XmlComment { content } => {
            let _ = write!(out, "<!--{content}-->");
        }
        WtNode::XmlStartTag { name, attributes } => {
            print_tag(out, name, attributes, TagShape::Start);
        }
        WtNode::XmlEmptyTag { name, attributes } => {
            print_tag(out, name, attributes, TagShape::Empty);
        }
        WtNode::XmlEndTag { name } => {
            let _ = write!(out, "</{name}>");
        }
        WtNode::XmlElement(elem) => {
            match &elem.body {
                Some(body) => {
                    print_tag(out, &elem.name, &elem.attributes, TagShape::Start);
                    for child in body {
                        print_into(out, child);
                    }
                    let _ = write!(out, "</{}>", elem.name);
                }
                None => print_tag(out, &elem.name, &elem.attributes, TagShape::Empty),
            };
        }
        WtNode::XmlAttribute { name, value } => {
            let _ = write!(out, " {name}=\"");
            for child in value {
                print_into(out, child);
            }
            out.push('"');
        }
        // Pure containers print as their children.
        WtNode::Whitespace { content }
        | WtNode::OnlyInclude { content }
        | WtNode::Body { content }
        | WtNode::Name { content }
        | WtNode::Value { content }
        | WtNode::Paragraph { content }
        | WtNode::Heading { content }
        | WtNode::Bold { content }
        | WtNode::Italics { content }
        | WtNode::SemiPre { content }
        | WtNode::SemiPreLine { content }
        | WtNode::ListItem { content }
        | WtNode::DefinitionListTerm { content }
        | WtNode::DefinitionListDef { content }
        | WtNode::LinkTitle { content } => {
            for child in content {
                print_into(out, child);
            }
        }
        WtNode::NodeList { list } => {
            for child in list {
                print_into(out, child);
            }
        }
        WtNode::OrderedList { items }
        | WtNode::UnorderedList { items }
        | WtNode::DefinitionList { items } => {
            for child in items {
                print_into(out, child);
            }
        }
        // Anything else has no faithful source form here; print nothing
        // rather than invent one.
        _ => {}
    }
}

enum TagShape {
    Start,
    Empty,
}

fn print_tag(out: &mut String, name: &str, attributes: &[WtNode], shape: TagShape) {
    let _ = write!(out, "<{name}");
    for attr in attributes {
        print_into(out, attr);
    }
    match shape {
        TagShape::Start => out.push('>'),
        TagShape::Empty => out.push_str(" />"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_tag_with_attributes() {
        let node = WtNode::XmlStartTag {
            name: "foo".to_owned(),
            attributes: vec![WtNode::XmlAttribute {
                name: "class".to_owned(),
                value: vec![WtNode::text("bar")],
            }],
        };
        assert_eq!(print(&node), r#"<foo class="bar">"#);
    }

    #[test]
    fn empty_tag() {
        let node = WtNode::XmlEmptyTag {
            name: "references".to_owned(),
            attributes: vec![],
        };
        assert_eq!(print(&node), "<references />");
    }

    #[test]
    fn end_tag() {
        let node = WtNode::XmlEndTag {
            name: "div".to_owned(),
        };
        assert_eq!(print(&node), "</div>");
    }

    #[test]
    fn unresolved_references_print_as_escapes() {
        assert_eq!(print(&WtNode::XmlCharRef { code_point: 160 }), "&#160;");
        assert_eq!(
            print(&WtNode::XmlEntityRef {
                name: "nbsp".to_owned(),
                resolved: None,
            }),
            "&nbsp;"
        );
    }

    #[test]
    fn ticks_print_as_apostrophes() {
        assert_eq!(print(&WtNode::Ticks { count: 5 }), "'''''");
    }

    #[test]
    fn element_round_trips_nested_content() {
        let node = WtNode::XmlElement(crate::WtXmlElement {
            name: "q".to_owned(),
            attributes: vec![],
            body: Some(vec![WtNode::text("quoted")]),
        });
        assert_eq!(print(&node), "<q>quoted</q>");
    }
}
