//! Link target composition and media attribute naming.

use wt_ast::{ImageHorizAlign, ImageVertAlign, ImageViewFormat, WtUrl};

use crate::error::LowerError;

/// Composes a parsed URL back into `protocol:path` form.
///
/// Protocol-relative URLs (empty protocol) compose to the bare path. The
/// result is validated just enough to catch garbage that slipped through
/// parsing: it must be non-empty and free of whitespace and control
/// characters, and a non-empty protocol must be ASCII alphanumeric plus
/// `+`, `-` or `.`.
pub fn compose_url(url: &WtUrl) -> Result<String, LowerError> {
    let composed = if url.protocol.is_empty() {
        url.path.clone()
    } else {
        format!("{}:{}", url.protocol, url.path)
    };
    let proto_ok = url
        .protocol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if composed.is_empty()
        || !proto_ok
        || composed.chars().any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(LowerError::InvalidUri { uri: composed });
    }
    Ok(composed)
}

/// Attribute value for an image view format.
pub fn format_name(format: ImageViewFormat) -> &'static str {
    match format {
        ImageViewFormat::Unrestrained => "unrestrained",
        ImageViewFormat::Frame => "frame",
        ImageViewFormat::Frameless => "frameless",
        ImageViewFormat::Thumbnail => "thumbnail",
    }
}

/// Attribute value for horizontal image alignment.
pub fn horiz_align_name(align: ImageHorizAlign) -> &'static str {
    match align {
        ImageHorizAlign::Center => "center",
        ImageHorizAlign::Left => "left",
        ImageHorizAlign::None => "none",
        ImageHorizAlign::Right => "right",
        ImageHorizAlign::Unspecified => "default",
    }
}

/// Attribute value for vertical image alignment.
pub fn vert_align_name(align: ImageVertAlign) -> &'static str {
    match align {
        ImageVertAlign::Baseline => "baseline",
        ImageVertAlign::Bottom => "bottom",
        ImageVertAlign::Middle => "middle",
        ImageVertAlign::Sub => "sub",
        ImageVertAlign::Super => "super",
        ImageVertAlign::TextBottom => "text-bottom",
        ImageVertAlign::TextTop => "text-top",
        ImageVertAlign::Top => "top",
    }
}

/// Maps a signature's tilde count to its rendering format.
///
/// Three tildes name the author, four add a timestamp, five are timestamp
/// only. Anything else cannot come out of the tokenizer.
pub fn signature_format(tilde_count: u32) -> Result<&'static str, LowerError> {
    match tilde_count {
        3 => Ok("user"),
        4 => Ok("user-timestamp"),
        5 => Ok("timestamp"),
        other => Err(LowerError::IllegalValue {
            what: "signature tilde count",
            value: other.to_string(),
        }),
    }
}
