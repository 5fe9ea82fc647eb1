//! The lowering engine: dispatches syntax-tree nodes to handlers and
//! assembles the output tree.
//!
//! Handlers follow one protocol: [`AstLowering::dispatch`] returns
//! `Some(node)` for the caller to attach, or `None` when the handler
//! already attached its output to (or mutated) a node on the context
//! stack, or suppressed it. Container handlers push their node, lower the
//! children into it, pop, and return it. The stack always mirrors the
//! open ancestor chain; push and pop are paired even when a subtree fails.

use tracing::{debug, trace};
use wt_ast::{ImageLinkTarget, WtImageLink, WtNode, WtXmlElement, rt, text};
use wt_site::{PageTitle, SiteConfig};
use wt_wom::{WomKind, WomNode};

use crate::classifier::XhtmlElement;
use crate::error::LowerError;
use crate::gaps::{self, Edge};
use crate::links;

/// Lowers a page's syntax tree into an object-model tree.
///
/// `root` must be one of the page root kinds; `author` and `timestamp` are
/// baked into signature nodes. Any failure aborts the page, no partial
/// tree is returned.
pub fn lower(
    root: &WtNode,
    page_title: &PageTitle,
    author: &str,
    timestamp: &str,
    config: &SiteConfig,
) -> Result<WomNode, LowerError> {
    debug!(title = %page_title.normalized_full(), "lowering page");
    let mut lowering = AstLowering {
        config,
        page_title,
        author,
        timestamp,
        stack: Vec::new(),
    };
    match lowering.dispatch(root)? {
        Some(page) if page.kind == WomKind::Page => Ok(page),
        Some(other) => Err(LowerError::IllegalValue {
            what: "page root",
            value: other.kind.name().to_owned(),
        }),
        None => Err(LowerError::IllegalValue {
            what: "page root",
            value: root.kind().to_owned(),
        }),
    }
}

struct AstLowering<'a> {
    config: &'a SiteConfig,
    page_title: &'a PageTitle,
    author: &'a str,
    timestamp: &'a str,
    stack: Vec<WomNode>,
}

impl AstLowering<'_> {
    fn dispatch(&mut self, node: &WtNode) -> Result<Option<WomNode>, LowerError> {
        trace!(kind = node.kind(), depth = self.stack.len(), "dispatch");
        match node {
            // -- Page roots --
            WtNode::ProcessedPage { page } => self.dispatch(page),
            WtNode::Page { content }
            | WtNode::ParsedPage { content }
            | WtNode::PreproPage { content } => self.build_page(content).map(Some),

            // -- Text --
            WtNode::Text { content } | WtNode::Newline { content } => {
                Ok(self.append_text(content))
            }
            WtNode::Ticks { count } => {
                Ok(self.append_text(&"'".repeat(*count as usize)))
            }
            WtNode::Whitespace { content }
            | WtNode::OnlyInclude { content }
            | WtNode::SemiPreLine { content } => {
                self.lower_children(content)?;
                Ok(None)
            }
            WtNode::NodeList { list } => {
                self.lower_children(list)?;
                Ok(None)
            }
            WtNode::Ignored { .. } => Ok(None),

            // -- Generic content wrappers --
            WtNode::Body { content } => self.container(WomKind::Body, content),
            WtNode::Name { content } => self.container(WomKind::Name, content),
            WtNode::Value { content } => self.container(WomKind::Value, content),

            // -- XML --
            WtNode::XmlElement(elem) => self.lower_xml_element(elem),
            n @ (WtNode::XmlStartTag { .. }
            | WtNode::XmlEndTag { .. }
            | WtNode::XmlEmptyTag { .. }) => {
                // No structural model for stray tags; keep their textual form.
                Ok(self.append_text(&rt::print(n)))
            }
            WtNode::ImStartTag { .. } | WtNode::ImEndTag { .. } => Ok(None),
            WtNode::XmlAttribute { name, value } => {
                let value = text::to_text(value)?;
                if let Some(parent) = self.stack.last_mut() {
                    parent.set_attr(name.as_str(), value);
                }
                Ok(None)
            }
            WtNode::XmlAttributeGarbage { .. } => Ok(None),
            WtNode::XmlComment { content } => Ok(Some(WomNode::comment(content))),
            WtNode::XmlCharRef { code_point } => {
                match char::from_u32(*code_point).filter(|c| is_xml_char(*c)) {
                    Some(c) => Ok(self.append_text(&c.to_string())),
                    // The & gets escaped on output, so the reference stays
                    // visible as plain text instead of vanishing.
                    None => Ok(self.append_text(&format!("&#{code_point};"))),
                }
            }
            WtNode::XmlEntityRef { name, resolved } => {
                // The parser resolves entities it knows; the site's entity
                // table gets a second chance at the rest.
                let config = self.config;
                match resolved
                    .as_deref()
                    .or_else(|| config.resolve_entity(name))
                {
                    Some(replacement) => Ok(self.append_text(replacement)),
                    None => Ok(self.append_text(&format!("&{name};"))),
                }
            }
            WtNode::IllegalCodePoint { code_point } => {
                Ok(self.append_text(&format!("&#{code_point};")))
            }

            // -- Templates --
            WtNode::Template { name, args } => {
                self.stack.push(WomNode::new(WomKind::Transclusion));
                let result = self.lower_template_parts(name, args);
                let transclusion = self.pop();
                result?;
                Ok(Some(transclusion))
            }
            WtNode::TemplateArguments { args } => {
                self.lower_children(args)?;
                Ok(None)
            }
            WtNode::TemplateArgument { name, value } => {
                let mut arg = WomNode::new(WomKind::Arg);
                if let Some(name) = name {
                    arg.append_child(self.lower_into(WomNode::new(WomKind::Name), name)?);
                }
                arg.append_child(self.lower_into(WomNode::new(WomKind::Value), value)?);
                Ok(Some(arg))
            }
            WtNode::TemplateParameter { name, default } => {
                let mut param = WomNode::new(WomKind::Param);
                param.append_child(self.lower_into(WomNode::new(WomKind::Name), name)?);
                if let Some(default) = default {
                    param.append_child(
                        self.lower_into(WomNode::new(WomKind::Default), default)?,
                    );
                }
                Ok(Some(param))
            }

            // -- Links --
            WtNode::InternalLink { target, title } => {
                let resolved = self.config.resolve_title(target).map_err(|source| {
                    LowerError::LinkTarget {
                        target: target.clone(),
                        source,
                    }
                })?;
                let mut full = resolved.normalized_full();
                if let Some(fragment) = &resolved.fragment {
                    full.push('#');
                    full.push_str(fragment);
                }
                let mut link = WomNode::new(WomKind::IntLink);
                link.set_attr("target", full);
                match title {
                    Some(title) => {
                        self.attach_lowered(link, WomKind::Title, title).map(Some)
                    }
                    None => Ok(Some(link)),
                }
            }
            WtNode::ExternalLink { target, title } => {
                let mut link = WomNode::new(WomKind::ExtLink);
                link.set_attr("target", links::compose_url(target)?);
                match title {
                    Some(title) => {
                        self.attach_lowered(link, WomKind::Title, title).map(Some)
                    }
                    None => Ok(Some(link)),
                }
            }
            WtNode::Url(url) => {
                let mut node = WomNode::new(WomKind::Url);
                node.set_attr("target", links::compose_url(url)?);
                Ok(Some(node))
            }
            WtNode::LinkTitle { content } => self.container(WomKind::Title, content),
            WtNode::ImageLink(image) => self.lower_image(image).map(Some),
            WtNode::Redirect { target } => {
                let mut redirect = WomNode::new(WomKind::Redirect);
                redirect.set_attr("target", target.as_str());
                match self.stack.first_mut() {
                    Some(page) if page.kind == WomKind::Page => {
                        page.append_child(redirect);
                        Ok(None)
                    }
                    _ => Err(LowerError::StrayNode {
                        node: "redirect",
                        expected: "page",
                    }),
                }
            }

            // -- Wiki structure --
            WtNode::Paragraph { content } => {
                let mut para = WomNode::new(WomKind::Paragraph);
                let top = gaps::count_newlines(content, Edge::Leading);
                let bottom = gaps::count_newlines(content, Edge::Trailing);
                if top > 0 {
                    para.set_attr("topgap", top.to_string());
                }
                if bottom > 0 {
                    para.set_attr("bottomgap", bottom.to_string());
                }
                let para = self.lower_into(para, content)?;
                // A paragraph holding nothing but whitespace text only ever
                // contributed its gaps; it produces no node of its own.
                let only_whitespace = para.children.iter().all(|child| match &child.kind {
                    WomKind::Text(text) => text.trim().is_empty(),
                    _ => false,
                });
                Ok(if only_whitespace { None } else { Some(para) })
            }
            WtNode::Heading { content } => self.container(WomKind::Heading, content),
            WtNode::Section {
                level,
                heading,
                body,
            } => {
                let mut section = WomNode::new(WomKind::Section);
                section.set_attr("level", level.to_string());
                self.stack.push(section);
                let parts = self
                    .lower_into(WomNode::new(WomKind::Heading), heading)
                    .and_then(|h| {
                        self.lower_into(WomNode::new(WomKind::Body), body)
                            .map(|b| (h, b))
                    });
                let mut section = self.pop();
                let (heading, body) = parts?;
                section.append_child(heading);
                section.append_child(body);
                Ok(Some(section))
            }
            WtNode::Bold { content } => {
                self.container(WomKind::Element("b".to_owned()), content)
            }
            WtNode::Italics { content } => {
                self.container(WomKind::Element("i".to_owned()), content)
            }
            WtNode::HorizontalRule => Ok(Some(WomNode::new(WomKind::HorizontalRule))),
            WtNode::SemiPre { content } => self.container(WomKind::SemiPre, content),
            WtNode::OrderedList { items } => self.container(WomKind::OrderedList, items),
            WtNode::UnorderedList { items } => {
                self.container(WomKind::UnorderedList, items)
            }
            WtNode::ListItem { content } => self.container(WomKind::ListItem, content),
            WtNode::DefinitionList { items } => {
                self.container(WomKind::DefinitionList, items)
            }
            WtNode::DefinitionListTerm { content } => {
                self.container(WomKind::DefinitionListTerm, content)
            }
            WtNode::DefinitionListDef { content } => {
                self.container(WomKind::DefinitionListDef, content)
            }

            // -- Tables (native wiki syntax) --
            WtNode::Table { body } => {
                self.stack.push(WomNode::new(WomKind::Table));
                let result = self.lower_discarding(body);
                let table = self.pop();
                result?;
                Ok(Some(table))
            }
            WtNode::TableCaption { body } => {
                let caption = self.lower_into(WomNode::new(WomKind::TableCaption), body)?;
                self.attach_to_table(caption, "caption")?;
                Ok(None)
            }
            WtNode::TableImplicitBody { body } => {
                let tbody = self.lower_into(WomNode::new(WomKind::TableBody), body)?;
                self.attach_to_table(tbody, "tbody")?;
                Ok(None)
            }
            WtNode::TableRow { body } => self.container(WomKind::TableRow, body),
            WtNode::TableCell { body } => self.container(WomKind::TableCell, body),
            WtNode::TableHeader { body } => self.container(WomKind::TableHeader, body),

            // -- Misc markup --
            WtNode::Signature { tilde_count } => {
                let mut signature = WomNode::new(WomKind::Signature);
                signature.set_attr("format", links::signature_format(*tilde_count)?);
                signature.set_attr("author", self.author);
                signature.set_attr("timestamp", self.timestamp);
                Ok(Some(signature))
            }
            WtNode::PageSwitch { name } => {
                let mut switch = WomNode::new(WomKind::PageSwitch);
                switch.set_attr("name", name.as_str());
                Ok(Some(switch))
            }
            WtNode::TagExtension {
                name,
                attributes,
                body,
            } => {
                let mut ext = WomNode::new(WomKind::TagExtension);
                apply_attributes(&mut ext, attributes)?;
                // The extension's own name wins over a tag attribute that is
                // itself called "name".
                ext.set_attr("name", name.as_str());
                if let Some(body) = body
                    && let Some(body) = self.dispatch(body)?
                {
                    ext.append_child(body);
                }
                Ok(Some(ext))
            }
            WtNode::TagExtensionBody { content } => {
                let mut body = WomNode::new(WomKind::TagExtBody);
                body.append_child(WomNode::text(content));
                Ok(Some(body))
            }
            WtNode::Nowiki { content } => {
                let mut nowiki = WomNode::new(WomKind::Nowiki);
                nowiki.append_child(WomNode::text(content));
                Ok(Some(nowiki))
            }
            WtNode::SoftError(elem) => self.lower_xml_element(elem),
        }
    }

    // -- Page root --

    /// Builds the document root and lowers the page content into its body.
    ///
    /// The denormalized title splits at the last `/` into a path and a leaf
    /// title, so subpages keep their hierarchy visible on the root node.
    fn build_page(&mut self, content: &[WtNode]) -> Result<WomNode, LowerError> {
        let denormalized = self.page_title.denormalized();
        let (path, title) = match denormalized.rsplit_once('/') {
            Some((path, leaf)) => (Some(path), leaf),
            None => (None, denormalized),
        };

        let mut page = WomNode::new(WomKind::Page);
        page.set_attr("version", "1.0");
        if let Some(namespace) = &self.page_title.namespace {
            page.set_attr("namespace", namespace.as_str());
        }
        if let Some(path) = path {
            page.set_attr("path", path);
        }
        page.set_attr("title", title);

        // The page stays on the stack while its body is lowered so redirect
        // nodes deep in the content can still find it.
        self.stack.push(page);
        let body = self.lower_into(WomNode::new(WomKind::Body), content);
        let mut page = self.pop();
        page.append_child(body?);
        Ok(page)
    }

    /// Lowers a transclusion's name and dispatches its argument list while
    /// the transclusion node is on top of the stack. The argument-list
    /// handler appends each argument to the stack top.
    fn lower_template_parts(
        &mut self,
        name: &[WtNode],
        args: &WtNode,
    ) -> Result<(), LowerError> {
        let name = self.lower_into(WomNode::new(WomKind::Name), name)?;
        if let Some(transclusion) = self.stack.last_mut() {
            transclusion.append_child(name);
        }
        self.dispatch(args)?;
        Ok(())
    }

    // -- XML elements --

    fn lower_xml_element(
        &mut self,
        elem: &WtXmlElement,
    ) -> Result<Option<WomNode>, LowerError> {
        let Some(etype) = XhtmlElement::from_tag(&elem.name) else {
            return self.lower_unknown_element(elem).map(Some);
        };
        let node = match etype {
            XhtmlElement::P => self.complete_element(elem, WomKind::Paragraph)?,
            XhtmlElement::Hr => self.complete_element(elem, WomKind::HorizontalRule)?,
            XhtmlElement::Ol => self.complete_element(elem, WomKind::OrderedList)?,
            XhtmlElement::Ul => self.complete_element(elem, WomKind::UnorderedList)?,
            XhtmlElement::Li => self.complete_element(elem, WomKind::ListItem)?,
            XhtmlElement::Dl => self.complete_element(elem, WomKind::DefinitionList)?,
            XhtmlElement::Dt => {
                self.complete_element(elem, WomKind::DefinitionListTerm)?
            }
            XhtmlElement::Dd => self.complete_element(elem, WomKind::DefinitionListDef)?,
            XhtmlElement::Pre => {
                let mut pre = WomNode::new(WomKind::Pre);
                let content = match &elem.body {
                    Some(body) => text::to_text(body)?,
                    None => String::new(),
                };
                pre.append_child(WomNode::text(content));
                pre
            }
            XhtmlElement::Table => self.table_from_element(elem)?,
            XhtmlElement::Caption => {
                let caption = self.complete_element(elem, WomKind::TableCaption)?;
                self.attach_to_table(caption, "caption")?;
                return Ok(None);
            }
            XhtmlElement::Tbody => {
                let tbody = self.complete_element(elem, WomKind::TableBody)?;
                self.attach_to_table(tbody, "tbody")?;
                return Ok(None);
            }
            XhtmlElement::Tr => self.complete_element(elem, WomKind::TableRow)?,
            XhtmlElement::Td => self.complete_element(elem, WomKind::TableCell)?,
            XhtmlElement::Th => self.complete_element(elem, WomKind::TableHeader)?,
            other => {
                self.complete_element(elem, WomKind::Element(other.tag().to_owned()))?
            }
        };
        Ok(Some(node))
    }

    fn complete_element(
        &mut self,
        elem: &WtXmlElement,
        kind: WomKind,
    ) -> Result<WomNode, LowerError> {
        let mut node = WomNode::new(kind);
        apply_attributes(&mut node, &elem.attributes)?;
        match &elem.body {
            Some(body) => self.lower_into(node, body),
            None => Ok(node),
        }
    }

    fn lower_unknown_element(&mut self, elem: &WtXmlElement) -> Result<WomNode, LowerError> {
        let mut node = WomNode::new(WomKind::Element(elem.name.to_ascii_lowercase()));
        apply_attributes(&mut node, &elem.attributes)?;
        match &elem.body {
            Some(body) => self.lower_into(node, body),
            None => Ok(node),
        }
    }

    fn table_from_element(&mut self, elem: &WtXmlElement) -> Result<WomNode, LowerError> {
        let mut table = WomNode::new(WomKind::Table);
        apply_attributes(&mut table, &elem.attributes)?;
        self.stack.push(table);
        let result = match &elem.body {
            Some(body) => self.lower_discarding(body),
            None => Ok(()),
        };
        let table = self.pop();
        result?;
        Ok(table)
    }

    // -- Images --

    fn lower_image(&mut self, image: &WtImageLink) -> Result<WomNode, LowerError> {
        let mut img = WomNode::new(WomKind::Image);
        img.set_attr("target", image.target.as_str());
        img.set_attr("format", links::format_name(image.format));
        img.set_attr("halign", links::horiz_align_name(image.horiz_align));
        img.set_attr("valign", links::vert_align_name(image.vert_align));
        if image.border {
            img.set_attr("border", "true");
        }
        if image.upright {
            img.set_attr("upright", "true");
        }
        // Negative dimensions mean "not specified" and are never emitted.
        if image.width >= 0 {
            img.set_attr("width", image.width.to_string());
        }
        if image.height >= 0 {
            img.set_attr("height", image.height.to_string());
        }
        match &image.link {
            ImageLinkTarget::Default => {}
            ImageLinkTarget::NoLink => img.set_attr("intlink", ""),
            ImageLinkTarget::Page(page) => img.set_attr("intlink", page.as_str()),
            ImageLinkTarget::Url(url) => img.set_attr("extlink", links::compose_url(url)?),
        }
        if let Some(alt) = &image.alt {
            img.set_attr("alt", text::to_text(alt)?);
        }
        match &image.title {
            Some(caption) => self.attach_lowered(img, WomKind::ImageCaption, caption),
            None => Ok(img),
        }
    }

    // -- Context stack plumbing --

    /// Lowers `children` into a fresh container of `kind` and returns it.
    fn container(
        &mut self,
        kind: WomKind,
        children: &[WtNode],
    ) -> Result<Option<WomNode>, LowerError> {
        self.lower_into(WomNode::new(kind), children).map(Some)
    }

    /// Pushes `node`, lowers `children` into it, pops and returns it.
    /// The pop happens before any error propagates, keeping the stack
    /// balanced for the caller.
    fn lower_into(
        &mut self,
        node: WomNode,
        children: &[WtNode],
    ) -> Result<WomNode, LowerError> {
        self.stack.push(node);
        let result = self.lower_children(children);
        let node = self.pop();
        result.map(|()| node)
    }

    /// Dispatches each child and attaches returned nodes to the stack top.
    fn lower_children(&mut self, children: &[WtNode]) -> Result<(), LowerError> {
        for child in children {
            if let Some(node) = self.dispatch(child)? {
                if let Some(parent) = self.stack.last_mut() {
                    parent.append_child(node);
                }
            }
        }
        Ok(())
    }

    /// Dispatches each child for its side effects only. Used for table
    /// bodies, where captions and bodies attach themselves to the open
    /// table and nothing else has a place to go.
    fn lower_discarding(&mut self, children: &[WtNode]) -> Result<(), LowerError> {
        for child in children {
            self.dispatch(child)?;
        }
        Ok(())
    }

    /// Lowers `children` into a fresh node of `kind` while `parent` is open
    /// on the stack, then appends the result to `parent`. Used for link
    /// titles and image captions, whose content must see its owner as the
    /// innermost context.
    fn attach_lowered(
        &mut self,
        parent: WomNode,
        kind: WomKind,
        children: &[WtNode],
    ) -> Result<WomNode, LowerError> {
        self.stack.push(parent);
        let child = self.lower_into(WomNode::new(kind), children);
        let mut parent = self.pop();
        parent.append_child(child?);
        Ok(parent)
    }

    fn pop(&mut self) -> WomNode {
        self.stack.pop().expect("pop without matching push")
    }

    fn attach_to_table(&mut self, child: WomNode, name: &'static str) -> Result<(), LowerError> {
        match self.stack.last_mut() {
            Some(table) if table.kind == WomKind::Table => {
                // A table holds at most one caption and one body; a later
                // arrival overwrites the earlier one in place.
                table.replace_or_append(child);
                Ok(())
            }
            _ => Err(LowerError::StrayNode {
                node: name,
                expected: "table",
            }),
        }
    }

    // -- Text --

    /// Appends text to the current context.
    ///
    /// In an inline context, or when the text is not pure whitespace, the
    /// text coalesces with a trailing text sibling in place (returning
    /// `None`) or comes back as a fresh text node to attach. Whitespace-only
    /// text in a block context is suppressed entirely.
    fn append_text(&mut self, text: &str) -> Option<WomNode> {
        if !self.in_inline_context() && text.trim().is_empty() {
            return None;
        }
        if let Some(parent) = self.stack.last_mut()
            && let Some(last) = parent.last_child_mut()
            && let WomKind::Text(existing) = &mut last.kind
        {
            existing.push_str(text);
            return None;
        }
        Some(WomNode::text(text))
    }

    fn in_inline_context(&self) -> bool {
        match self.stack.last().map(|node| &node.kind) {
            Some(
                WomKind::Paragraph
                | WomKind::Title
                | WomKind::ImageCaption
                | WomKind::Name
                | WomKind::Value
                | WomKind::Default
                | WomKind::IntLink
                | WomKind::ExtLink,
            ) => true,
            Some(WomKind::Element(tag)) => {
                XhtmlElement::from_tag(tag).is_some_and(XhtmlElement::is_inline)
            }
            _ => false,
        }
    }
}

/// Translates a tag's attribute nodes onto an output node. Values must
/// stringify to plain text; garbage inside a tag is dropped.
fn apply_attributes(node: &mut WomNode, attributes: &[WtNode]) -> Result<(), LowerError> {
    for attribute in attributes {
        if let WtNode::XmlAttribute { name, value } = attribute {
            node.set_attr(name.as_str(), text::to_text(value)?);
        }
    }
    Ok(())
}

/// Whether a code point is a character the XML 1.0 grammar allows.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}
