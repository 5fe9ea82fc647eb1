//! Node types of the wikitext syntax tree.

use serde::{Deserialize, Serialize};

/// A node of the parsed-and-expanded wikitext syntax tree.
///
/// The variant set is closed: the parser and expansion engine emit exactly
/// these kinds, and the lowering stage matches on them exhaustively. Nodes
/// that are only meaningful inside a specific parent (image link options,
/// link target page names) are not variants but typed fields of their owner,
/// so they can never reach generic dispatch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WtNode {
    // -- Page roots --
    /// Fully expanded page as produced by the expansion engine.
    ProcessedPage { page: Box<WtNode> },
    /// Content root of an expanded page.
    Page { content: Vec<WtNode> },
    /// Parsed but not expanded page.
    ParsedPage { content: Vec<WtNode> },
    /// Preprocessor-only page (templates still unresolved).
    PreproPage { content: Vec<WtNode> },

    // -- Text --
    /// A run of plain text.
    Text { content: String },
    /// A newline token. Carries the literal line-break characters.
    Newline { content: String },
    /// A run of apostrophes the parser could not interpret as bold/italics.
    Ticks { count: u32 },
    /// Grouping node for whitespace the parser kept around.
    Whitespace { content: Vec<WtNode> },
    /// Generic ordered grouping of nodes with no semantics of its own.
    NodeList { list: Vec<WtNode> },
    /// Content of an `<onlyinclude>` region, already resolved.
    OnlyInclude { content: Vec<WtNode> },
    /// Input the parser decided to drop (e.g. `<includeonly>` on a page view).
    Ignored { content: String },

    // -- Generic content wrappers --
    Body { content: Vec<WtNode> },
    Name { content: Vec<WtNode> },
    Value { content: Vec<WtNode> },

    // -- XML --
    /// A matched XML element with optional body.
    XmlElement(WtXmlElement),
    /// An unmatched XML start tag.
    XmlStartTag {
        name: String,
        attributes: Vec<WtNode>,
    },
    /// An unmatched XML end tag.
    XmlEndTag { name: String },
    /// A self-closing XML tag.
    XmlEmptyTag {
        name: String,
        attributes: Vec<WtNode>,
    },
    /// Engine-internal synthetic start tag. Never user visible.
    ImStartTag { name: String },
    /// Engine-internal synthetic end tag. Never user visible.
    ImEndTag { name: String },
    /// An XML attribute. The value may contain arbitrary inline content.
    XmlAttribute {
        name: String,
        value: Vec<WtNode>,
    },
    /// Malformed input inside a tag that did not parse as an attribute.
    XmlAttributeGarbage { content: String },
    /// An XML comment, content without the `<!--`/`-->` delimiters.
    XmlComment { content: String },
    /// A numeric character reference (`&#nnnn;` or `&#xhhhh;`).
    XmlCharRef { code_point: u32 },
    /// A named entity reference. `resolved` is the literal replacement text
    /// if the parser's entity table knew the name.
    XmlEntityRef {
        name: String,
        resolved: Option<String>,
    },
    /// A code point (or surrogate sequence) that is not a valid XML char.
    IllegalCodePoint { code_point: String },

    // -- Templates --
    /// A template invocation (transclusion).
    Template {
        name: Vec<WtNode>,
        args: Box<WtNode>,
    },
    /// The argument list of a template invocation.
    TemplateArguments { args: Vec<WtNode> },
    /// A single, possibly named, template argument.
    TemplateArgument {
        name: Option<Vec<WtNode>>,
        value: Vec<WtNode>,
    },
    /// A template parameter (`{{{name|default}}}`).
    TemplateParameter {
        name: Vec<WtNode>,
        default: Option<Vec<WtNode>>,
    },

    // -- Links --
    /// An internal link (`[[Target|title]]`).
    InternalLink {
        target: String,
        title: Option<Vec<WtNode>>,
    },
    /// An external link (`[proto://host title]`).
    ExternalLink {
        target: WtUrl,
        title: Option<Vec<WtNode>>,
    },
    /// A bare URL in running text.
    Url(WtUrl),
    /// The title content of an internal or external link.
    LinkTitle { content: Vec<WtNode> },
    /// An image inclusion with its already-parsed options.
    ImageLink(Box<WtImageLink>),
    /// A `#REDIRECT` directive.
    Redirect { target: String },

    // -- Wiki structure --
    Paragraph { content: Vec<WtNode> },
    Heading { content: Vec<WtNode> },
    /// A section: heading plus body, nested by level.
    Section {
        level: u32,
        heading: Vec<WtNode>,
        body: Vec<WtNode>,
    },
    Bold { content: Vec<WtNode> },
    Italics { content: Vec<WtNode> },
    HorizontalRule,
    /// Space-indented preformatted block.
    SemiPre { content: Vec<WtNode> },
    /// One line of a space-indented preformatted block.
    SemiPreLine { content: Vec<WtNode> },
    OrderedList { items: Vec<WtNode> },
    UnorderedList { items: Vec<WtNode> },
    ListItem { content: Vec<WtNode> },
    DefinitionList { items: Vec<WtNode> },
    DefinitionListTerm { content: Vec<WtNode> },
    DefinitionListDef { content: Vec<WtNode> },

    // -- Tables (native wiki syntax) --
    /// A native wiki table. The body holds captions, body wrappers and rows.
    Table { body: Vec<WtNode> },
    TableCaption { body: Vec<WtNode> },
    /// Body wrapper synthesized by the parser when no explicit `tbody` was
    /// present in the source.
    TableImplicitBody { body: Vec<WtNode> },
    TableRow { body: Vec<WtNode> },
    TableCell { body: Vec<WtNode> },
    TableHeader { body: Vec<WtNode> },

    // -- Misc markup --
    /// A signature (`~~~`, `~~~~` or `~~~~~`). The grammar only produces
    /// tilde counts 3 to 5; anything else is an upstream bug.
    Signature { tilde_count: u32 },
    /// A behavior switch like `__NOTOC__`, name only.
    PageSwitch { name: String },
    /// A tag extension (`<ref>`, `<nowiki>`, ...), body left opaque.
    TagExtension {
        name: String,
        attributes: Vec<WtNode>,
        body: Option<Box<WtNode>>,
    },
    /// The opaque body of a tag extension.
    TagExtensionBody { content: String },
    /// Already-unwrapped `<nowiki>` content.
    Nowiki { content: String },
    /// An element the expansion engine flagged as erroneous but kept.
    SoftError(WtXmlElement),
}

/// A matched XML element: name, attribute nodes and optional body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WtXmlElement {
    pub name: String,
    pub attributes: Vec<WtNode>,
    pub body: Option<Vec<WtNode>>,
}

/// A URL split into an optional protocol and a path.
///
/// `protocol` is empty for protocol-relative or bare targets; the full URI
/// is then just the path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WtUrl {
    pub protocol: String,
    pub path: String,
}

/// All options of an image link, resolved by the parser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WtImageLink {
    /// Target page of the image, e.g. `File:Example.jpg`.
    pub target: String,
    pub format: ImageViewFormat,
    pub border: bool,
    pub horiz_align: ImageHorizAlign,
    pub vert_align: ImageVertAlign,
    /// Requested width in pixels; negative means not specified.
    pub width: i32,
    /// Requested height in pixels; negative means not specified.
    pub height: i32,
    pub upright: bool,
    /// Where the rendered image links to.
    pub link: ImageLinkTarget,
    /// Alternative text. Must stringify to plain text.
    pub alt: Option<Vec<WtNode>>,
    /// Caption content.
    pub title: Option<Vec<WtNode>>,
}

/// How an image is framed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageViewFormat {
    Unrestrained,
    Frame,
    Frameless,
    Thumbnail,
}

/// Horizontal placement of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageHorizAlign {
    Center,
    Left,
    None,
    Right,
    /// No alignment given in the source.
    Unspecified,
}

/// Vertical alignment of an inline image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageVertAlign {
    Baseline,
    Bottom,
    Middle,
    Sub,
    Super,
    TextBottom,
    TextTop,
    Top,
}

/// Link override of an image (`link=` option).
///
/// This is a closed set: either the option was absent, explicitly empty,
/// an internal page, or an external URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageLinkTarget {
    /// No `link=` option; the image links to its own description page.
    Default,
    /// `link=` with an empty value; the image is not a link at all.
    NoLink,
    /// `link=Some page`.
    Page(String),
    /// `link=http://...`.
    Url(WtUrl),
}

impl WtNode {
    /// Convenience constructor for a plain text node.
    pub fn text(content: impl Into<String>) -> Self {
        WtNode::Text {
            content: content.into(),
        }
    }

    /// Convenience constructor for a newline token.
    pub fn newline() -> Self {
        WtNode::Newline {
            content: "\n".to_owned(),
        }
    }

    /// Stable name of the node kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            WtNode::ProcessedPage { .. } => "processed-page",
            WtNode::Page { .. } => "page",
            WtNode::ParsedPage { .. } => "parsed-page",
            WtNode::PreproPage { .. } => "prepro-page",
            WtNode::Text { .. } => "text",
            WtNode::Newline { .. } => "newline",
            WtNode::Ticks { .. } => "ticks",
            WtNode::Whitespace { .. } => "whitespace",
            WtNode::NodeList { .. } => "node-list",
            WtNode::OnlyInclude { .. } => "only-include",
            WtNode::Ignored { .. } => "ignored",
            WtNode::Body { .. } => "body",
            WtNode::Name { .. } => "name",
            WtNode::Value { .. } => "value",
            WtNode::XmlElement(_) => "xml-element",
            WtNode::XmlStartTag { .. } => "xml-start-tag",
            WtNode::XmlEndTag { .. } => "xml-end-tag",
            WtNode::XmlEmptyTag { .. } => "xml-empty-tag",
            WtNode::ImStartTag { .. } => "im-start-tag",
            WtNode::ImEndTag { .. } => "im-end-tag",
            WtNode::XmlAttribute { .. } => "xml-attribute",
            WtNode::XmlAttributeGarbage { .. } => "xml-attribute-garbage",
            WtNode::XmlComment { .. } => "xml-comment",
            WtNode::XmlCharRef { .. } => "xml-char-ref",
            WtNode::XmlEntityRef { .. } => "xml-entity-ref",
            WtNode::IllegalCodePoint { .. } => "illegal-code-point",
            WtNode::Template { .. } => "template",
            WtNode::TemplateArguments { .. } => "template-arguments",
            WtNode::TemplateArgument { .. } => "template-argument",
            WtNode::TemplateParameter { .. } => "template-parameter",
            WtNode::InternalLink { .. } => "internal-link",
            WtNode::ExternalLink { .. } => "external-link",
            WtNode::Url(_) => "url",
            WtNode::LinkTitle { .. } => "link-title",
            WtNode::ImageLink(_) => "image-link",
            WtNode::Redirect { .. } => "redirect",
            WtNode::Paragraph { .. } => "paragraph",
            WtNode::Heading { .. } => "heading",
            WtNode::Section { .. } => "section",
            WtNode::Bold { .. } => "bold",
            WtNode::Italics { .. } => "italics",
            WtNode::HorizontalRule => "horizontal-rule",
            WtNode::SemiPre { .. } => "semi-pre",
            WtNode::SemiPreLine { .. } => "semi-pre-line",
            WtNode::OrderedList { .. } => "ordered-list",
            WtNode::UnorderedList { .. } => "unordered-list",
            WtNode::ListItem { .. } => "list-item",
            WtNode::DefinitionList { .. } => "definition-list",
            WtNode::DefinitionListTerm { .. } => "definition-list-term",
            WtNode::DefinitionListDef { .. } => "definition-list-def",
            WtNode::Table { .. } => "table",
            WtNode::TableCaption { .. } => "table-caption",
            WtNode::TableImplicitBody { .. } => "table-implicit-body",
            WtNode::TableRow { .. } => "table-row",
            WtNode::TableCell { .. } => "table-cell",
            WtNode::TableHeader { .. } => "table-header",
            WtNode::Signature { .. } => "signature",
            WtNode::PageSwitch { .. } => "page-switch",
            WtNode::TagExtension { .. } => "tag-extension",
            WtNode::TagExtensionBody { .. } => "tag-extension-body",
            WtNode::Nowiki { .. } => "nowiki",
            WtNode::SoftError(_) => "soft-error",
        }
    }
}

impl WtImageLink {
    /// An image link with only a target; every option at its default.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            format: ImageViewFormat::Unrestrained,
            border: false,
            horiz_align: ImageHorizAlign::Unspecified,
            vert_align: ImageVertAlign::Middle,
            width: -1,
            height: -1,
            upright: false,
            link: ImageLinkTarget::Default,
            alt: None,
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_link_defaults_leave_dimensions_unspecified() {
        let img = WtImageLink::new("File:X.png");
        assert_eq!(img.width, -1);
        assert_eq!(img.height, -1);
        assert_eq!(img.link, ImageLinkTarget::Default);
    }

    #[test]
    fn node_round_trips_through_json() {
        let node = WtNode::Paragraph {
            content: vec![
                WtNode::text("Hello "),
                WtNode::Bold {
                    content: vec![WtNode::text("world")],
                },
            ],
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: WtNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(WtNode::HorizontalRule.kind(), "horizontal-rule");
        assert_eq!(WtNode::text("x").kind(), "text");
        assert_eq!(
            WtNode::Signature { tilde_count: 4 }.kind(),
            "signature"
        );
    }
}
