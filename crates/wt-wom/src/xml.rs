//! XML printer for the object model.
//!
//! A thin walker over [`WomNode`]: every node becomes an element named after
//! its kind, attributes become XML attributes, text becomes the content of a
//! `<text xml:space="preserve">` element and comments become XML comments.
//! The root element carries a single namespace declaration.

use std::borrow::Cow;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::{WomKind, WomNode};

/// Namespace of the serialized object model.
pub const WOM_NS: &str = "http://wt-tools.org/schema/wom";

/// Error while serializing an object-model tree.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    /// Writing an XML event failed.
    #[error("XML write error")]
    Io(#[from] std::io::Error),

    /// The produced bytes were not valid UTF-8.
    #[error("UTF-8 error")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize a tree to an indented XML document string.
pub fn print(root: &WomNode) -> Result<String, PrintError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_node(&mut writer, root, true)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    node: &WomNode,
    is_root: bool,
) -> Result<(), PrintError> {
    match &node.kind {
        WomKind::Comment(content) => {
            let content = sanitize_comment(content);
            writer.write_event(Event::Comment(BytesText::new(&content)))?;
        }
        WomKind::Text(content) => {
            let mut elem = BytesStart::new("text");
            elem.push_attribute(("xml:space", "preserve"));
            writer.write_event(Event::Start(elem))?;
            writer.write_event(Event::Text(BytesText::new(content)))?;
            writer.write_event(Event::End(BytesEnd::new("text")))?;
        }
        kind => {
            let name = kind.name().to_owned();
            let mut elem = BytesStart::new(name.as_str());
            if is_root {
                elem.push_attribute(("xmlns", WOM_NS));
            }
            if kind.preserves_space() {
                elem.push_attribute(("xml:space", "preserve"));
            }
            for (attr, value) in &node.attrs {
                elem.push_attribute((attr.as_str(), value.as_str()));
            }
            if node.children.is_empty() {
                writer.write_event(Event::Empty(elem))?;
            } else {
                writer.write_event(Event::Start(elem))?;
                for child in &node.children {
                    write_node(writer, child, false)?;
                }
                writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
            }
        }
    }
    Ok(())
}

/// XML comments may not contain `--` and may not end with `-`. A space
/// breaks up offending hyphen runs.
fn sanitize_comment(content: &str) -> Cow<'_, str> {
    if !content.contains("--") && !content.ends_with('-') {
        return Cow::Borrowed(content);
    }
    let mut out = String::with_capacity(content.len() + 2);
    for c in content.chars() {
        if c == '-' && out.ends_with('-') {
            out.push(' ');
        }
        out.push(c);
    }
    if out.ends_with('-') {
        out.push(' ');
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn root_carries_namespace() {
        let page = WomNode::new(WomKind::Page);
        let xml = print(&page).unwrap();
        assert_eq!(xml, format!(r#"<page xmlns="{WOM_NS}"/>"#));
    }

    #[test]
    fn text_is_wrapped_with_preserve_marker() {
        let mut para = WomNode::new(WomKind::Paragraph);
        para.append_child(WomNode::text("  spaced  "));
        let xml = print(&para).unwrap();
        assert!(xml.contains(r#"<text xml:space="preserve">  spaced  </text>"#));
    }

    #[test]
    fn attributes_are_rendered_sorted() {
        let mut img = WomNode::new(WomKind::Image);
        img.set_attr("width", "100");
        img.set_attr("format", "thumbnail");
        let xml = print(&img).unwrap();
        assert!(xml.contains(r#"format="thumbnail" width="100""#));
    }

    #[test]
    fn comments_become_xml_comments() {
        let mut body = WomNode::new(WomKind::Body);
        body.append_child(WomNode::comment(" hidden "));
        let xml = print(&body).unwrap();
        assert!(xml.contains("<!-- hidden -->"));
    }

    #[test]
    fn hyphen_runs_in_comments_are_broken_up() {
        let mut body = WomNode::new(WomKind::Body);
        body.append_child(WomNode::comment("a -- b ---"));
        let xml = print(&body).unwrap();
        assert!(xml.contains("<!--a - - b - - - -->"));
        assert!(!xml.contains("----"));
    }

    #[test]
    fn text_content_is_escaped() {
        let mut para = WomNode::new(WomKind::Paragraph);
        para.append_child(WomNode::text("a < b & c"));
        let xml = print(&para).unwrap();
        assert!(xml.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn generic_elements_use_their_tag_name() {
        let mut span = WomNode::new(WomKind::Element("span".to_owned()));
        span.set_attr("class", "x");
        let xml = print(&span).unwrap();
        assert!(xml.starts_with("<span "));
        assert!(xml.contains(r#"class="x""#));
    }
}
