//! Object-model node types.

use std::collections::BTreeMap;

/// Kind of an object-model node.
///
/// Structural wiki constructs get dedicated kinds; well-known XHTML
/// formatting markup and anything else the lowering stage keeps verbatim
/// becomes [`WomKind::Element`] with its lowercase tag name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WomKind {
    /// Document root of a lowered page.
    Page,
    /// Redirect marker attached to the page root.
    Redirect,
    /// Content body of a page, section or section-like node.
    Body,
    Section,
    Heading,
    Paragraph,
    HorizontalRule,
    /// Space-indented preformatted block.
    SemiPre,
    /// `<pre>` block; its content is a single text child.
    Pre,
    /// `<nowiki>` content; kept as a single text child.
    Nowiki,

    OrderedList,
    UnorderedList,
    ListItem,
    DefinitionList,
    DefinitionListTerm,
    DefinitionListDef,

    Table,
    TableCaption,
    TableBody,
    TableRow,
    TableCell,
    TableHeader,

    /// Link to a page of the same wiki.
    IntLink,
    /// Link to an external URL.
    ExtLink,
    /// Bare URL in running text.
    Url,
    Image,
    ImageCaption,
    /// Title content of a link.
    Title,
    Signature,
    PageSwitch,

    /// Template invocation with name and ordered arguments.
    Transclusion,
    Name,
    Arg,
    /// Template parameter (`{{{...}}}`).
    Param,
    Value,
    /// Default value of a template parameter.
    Default,
    TagExtension,
    /// Opaque body of a tag extension; content is a single text child.
    TagExtBody,

    /// Markup kept as a generic element, by lowercase tag name.
    Element(String),
    /// Literal text.
    Text(String),
    /// An XML comment.
    Comment(String),
}

impl WomKind {
    /// Element name used when the node is serialized.
    pub fn name(&self) -> &str {
        match self {
            WomKind::Page => "page",
            WomKind::Redirect => "redirect",
            WomKind::Body => "body",
            WomKind::Section => "section",
            WomKind::Heading => "heading",
            WomKind::Paragraph => "paragraph",
            WomKind::HorizontalRule => "hr",
            WomKind::SemiPre => "semipre",
            WomKind::Pre => "pre",
            WomKind::Nowiki => "nowiki",
            WomKind::OrderedList => "ol",
            WomKind::UnorderedList => "ul",
            WomKind::ListItem => "li",
            WomKind::DefinitionList => "dl",
            WomKind::DefinitionListTerm => "dt",
            WomKind::DefinitionListDef => "dd",
            WomKind::Table => "table",
            WomKind::TableCaption => "caption",
            WomKind::TableBody => "tbody",
            WomKind::TableRow => "tr",
            WomKind::TableCell => "td",
            WomKind::TableHeader => "th",
            WomKind::IntLink => "intlink",
            WomKind::ExtLink => "extlink",
            WomKind::Url => "url",
            WomKind::Image => "image",
            WomKind::ImageCaption => "imgcaption",
            WomKind::Title => "title",
            WomKind::Signature => "signature",
            WomKind::PageSwitch => "pageswitch",
            WomKind::Transclusion => "transclusion",
            WomKind::Name => "name",
            WomKind::Arg => "arg",
            WomKind::Param => "param",
            WomKind::Value => "value",
            WomKind::Default => "default",
            WomKind::TagExtension => "tagext",
            WomKind::TagExtBody => "tagextbody",
            WomKind::Element(name) => name,
            WomKind::Text(_) => "text",
            WomKind::Comment(_) => "comment",
        }
    }

    /// Whether text inside this node is whitespace-significant and must
    /// survive round-tripping.
    pub fn preserves_space(&self) -> bool {
        matches!(
            self,
            WomKind::Pre | WomKind::Nowiki | WomKind::TagExtBody | WomKind::Text(_)
        )
    }
}

/// A mutable object-model node.
///
/// Attributes are unique by name; child order is significant. Parentage is
/// implied by ownership: a node owns its children and navigation happens by
/// walking down the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct WomNode {
    pub kind: WomKind,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<WomNode>,
}

impl WomNode {
    /// A node of the given kind with no attributes or children.
    pub fn new(kind: WomKind) -> Self {
        Self {
            kind,
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// A text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(WomKind::Text(content.into()))
    }

    /// A comment node.
    pub fn comment(content: impl Into<String>) -> Self {
        Self::new(WomKind::Comment(content.into()))
    }

    /// Set (or replace) an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Append a child node.
    pub fn append_child(&mut self, child: WomNode) {
        self.children.push(child);
    }

    /// The last child, mutably, if any.
    pub fn last_child_mut(&mut self) -> Option<&mut WomNode> {
        self.children.last_mut()
    }

    /// Replace the unique child of `kind`, or append if none exists yet.
    ///
    /// Used by table handlers: a table holds at most one caption and one
    /// body, and a later arrival overwrites the earlier one in place.
    pub fn replace_or_append(&mut self, child: WomNode) {
        let kind = child.kind.clone();
        match self.children.iter_mut().find(|c| c.kind == kind) {
            Some(slot) => *slot = child,
            None => self.children.push(child),
        }
    }

    /// First child of the given kind, if any.
    pub fn child_of_kind(&self, kind: &WomKind) -> Option<&WomNode> {
        self.children.iter().find(|c| &c.kind == kind)
    }

    /// Concatenated text content of the subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let WomKind::Text(text) = &self.kind {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_are_unique_by_name() {
        let mut node = WomNode::new(WomKind::Image);
        node.set_attr("width", "100");
        node.set_attr("width", "200");
        assert_eq!(node.attr("width"), Some("200"));
        assert_eq!(node.attrs.len(), 1);
    }

    #[test]
    fn replace_or_append_keeps_at_most_one_caption() {
        let mut table = WomNode::new(WomKind::Table);
        let mut first = WomNode::new(WomKind::TableCaption);
        first.append_child(WomNode::text("one"));
        let mut second = WomNode::new(WomKind::TableCaption);
        second.append_child(WomNode::text("two"));

        table.replace_or_append(first);
        table.replace_or_append(second);

        let captions: Vec<_> = table
            .children
            .iter()
            .filter(|c| c.kind == WomKind::TableCaption)
            .collect();
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].text_content(), "two");
    }

    #[test]
    fn replace_keeps_position() {
        let mut table = WomNode::new(WomKind::Table);
        table.replace_or_append(WomNode::new(WomKind::TableCaption));
        table.replace_or_append(WomNode::new(WomKind::TableBody));
        let mut caption = WomNode::new(WomKind::TableCaption);
        caption.append_child(WomNode::text("late"));
        table.replace_or_append(caption);

        assert_eq!(table.children[0].kind, WomKind::TableCaption);
        assert_eq!(table.children[0].text_content(), "late");
        assert_eq!(table.children[1].kind, WomKind::TableBody);
    }

    #[test]
    fn text_content_walks_subtree() {
        let mut para = WomNode::new(WomKind::Paragraph);
        para.append_child(WomNode::text("a"));
        let mut em = WomNode::new(WomKind::Element("em".to_owned()));
        em.append_child(WomNode::text("b"));
        para.append_child(em);
        assert_eq!(para.text_content(), "ab");
    }

    #[test]
    fn generic_element_uses_tag_name() {
        let node = WomNode::new(WomKind::Element("span".to_owned()));
        assert_eq!(node.kind.name(), "span");
    }
}
