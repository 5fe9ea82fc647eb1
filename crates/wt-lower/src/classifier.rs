//! Classification of raw XML element names.
//!
//! Tags carried by parsed `<...>` markup fall into a known inline set, a
//! known block set, or neither. Known tags get canonical lowercase names in
//! the output (with `strike` folded into `s`); unknown tags pass through as
//! generic elements.

/// An XHTML element name recognized by the lowering stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XhtmlElement {
    Abbr,
    B,
    Big,
    Blockquote,
    Br,
    Caption,
    Center,
    Cite,
    Code,
    Dd,
    Del,
    Dfn,
    Div,
    Dl,
    Dt,
    Em,
    Font,
    Hr,
    I,
    Ins,
    Kbd,
    Li,
    Ol,
    P,
    Pre,
    S,
    Samp,
    Small,
    Span,
    Strike,
    Strong,
    Sub,
    Sup,
    Table,
    Tbody,
    Td,
    Th,
    Tr,
    Tt,
    U,
    Ul,
    Var,
}

impl XhtmlElement {
    /// Looks up a tag name, case-insensitively.
    pub fn from_tag(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let elem = match lower.as_str() {
            "abbr" => Self::Abbr,
            "b" => Self::B,
            "big" => Self::Big,
            "blockquote" => Self::Blockquote,
            "br" => Self::Br,
            "caption" => Self::Caption,
            "center" => Self::Center,
            "cite" => Self::Cite,
            "code" => Self::Code,
            "dd" => Self::Dd,
            "del" => Self::Del,
            "dfn" => Self::Dfn,
            "div" => Self::Div,
            "dl" => Self::Dl,
            "dt" => Self::Dt,
            "em" => Self::Em,
            "font" => Self::Font,
            "hr" => Self::Hr,
            "i" => Self::I,
            "ins" => Self::Ins,
            "kbd" => Self::Kbd,
            "li" => Self::Li,
            "ol" => Self::Ol,
            "p" => Self::P,
            "pre" => Self::Pre,
            "s" => Self::S,
            "samp" => Self::Samp,
            "small" => Self::Small,
            "span" => Self::Span,
            "strike" => Self::Strike,
            "strong" => Self::Strong,
            "sub" => Self::Sub,
            "sup" => Self::Sup,
            "table" => Self::Table,
            "tbody" => Self::Tbody,
            "td" => Self::Td,
            "th" => Self::Th,
            "tr" => Self::Tr,
            "tt" => Self::Tt,
            "u" => Self::U,
            "ul" => Self::Ul,
            "var" => Self::Var,
            _ => return None,
        };
        Some(elem)
    }

    /// The canonical output tag. `strike` is normalized to `s`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Abbr => "abbr",
            Self::B => "b",
            Self::Big => "big",
            Self::Blockquote => "blockquote",
            Self::Br => "br",
            Self::Caption => "caption",
            Self::Center => "center",
            Self::Cite => "cite",
            Self::Code => "code",
            Self::Dd => "dd",
            Self::Del => "del",
            Self::Dfn => "dfn",
            Self::Div => "div",
            Self::Dl => "dl",
            Self::Dt => "dt",
            Self::Em => "em",
            Self::Font => "font",
            Self::Hr => "hr",
            Self::I => "i",
            Self::Ins => "ins",
            Self::Kbd => "kbd",
            Self::Li => "li",
            Self::Ol => "ol",
            Self::P => "p",
            Self::Pre => "pre",
            Self::S | Self::Strike => "s",
            Self::Samp => "samp",
            Self::Small => "small",
            Self::Span => "span",
            Self::Strong => "strong",
            Self::Sub => "sub",
            Self::Sup => "sup",
            Self::Table => "table",
            Self::Tbody => "tbody",
            Self::Td => "td",
            Self::Th => "th",
            Self::Tr => "tr",
            Self::Tt => "tt",
            Self::U => "u",
            Self::Ul => "ul",
            Self::Var => "var",
        }
    }

    /// Whether the element participates in phrase content. Text appended
    /// inside an inline element coalesces with adjacent text; inside a block
    /// element, pure-whitespace text is dropped instead.
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            Self::Abbr
                | Self::B
                | Self::Big
                | Self::Br
                | Self::Cite
                | Self::Code
                | Self::Del
                | Self::Dfn
                | Self::Em
                | Self::Font
                | Self::I
                | Self::Ins
                | Self::Kbd
                | Self::S
                | Self::Samp
                | Self::Small
                | Self::Span
                | Self::Strike
                | Self::Strong
                | Self::Sub
                | Self::Sup
                | Self::Tt
                | Self::U
                | Self::Var
        )
    }
}

#[cfg(test)]
mod tests {
    use super::XhtmlElement;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(XhtmlElement::from_tag("DIV"), Some(XhtmlElement::Div));
        assert_eq!(XhtmlElement::from_tag("Span"), Some(XhtmlElement::Span));
        assert_eq!(XhtmlElement::from_tag("gallery"), None);
    }

    #[test]
    fn strike_folds_into_s() {
        assert_eq!(XhtmlElement::from_tag("strike").unwrap().tag(), "s");
        assert_eq!(XhtmlElement::from_tag("s").unwrap().tag(), "s");
    }

    #[test]
    fn inline_vs_block() {
        assert!(XhtmlElement::Span.is_inline());
        assert!(XhtmlElement::Br.is_inline());
        assert!(!XhtmlElement::Div.is_inline());
        assert!(!XhtmlElement::Blockquote.is_inline());
        assert!(!XhtmlElement::Table.is_inline());
    }
}
