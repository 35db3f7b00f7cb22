//! Line tokenizer for the free text of shapes.
//!
//! A shape's text is a list of lines whose meaning is given by marker
//! characters around the payload. The tokenizer recognises those markers once
//! and produces a [`TextLine`] that later stages consume without slicing
//! strings again:
//!
//! | input              | kind         | decoration | text          |
//! |--------------------|--------------|------------|---------------|
//! | `template=T`       | `Template`   | none       | `T`           |
//! | `<<entity>>`       | `Stereotype` | none       | `entity`      |
//! | `{leaf, final}`    | `Tags`       | none       | `leaf, final` |
//! | `_count: int_`     | `Text`       | `Static`   | `count: int`  |
//! | `/draw()/`         | `Text`       | `Abstract` | `draw()`      |
//! | `+ name: String`   | `Text`       | none       | `+ name: String` |
//!
//! Every line tokenizes; a line with no recognised markers is plain text.

use tikzlet_core::semantic::{Decoration, LineKind, TextLine};
use winnow::{
    Parser as _,
    ascii::Caseless,
    combinator::{alt, preceded},
    error::ModalResult,
    token::{literal, rest},
};

type Input<'a> = &'a str;

/// `template=<value>`; the key is case-insensitive and the value kept as is.
fn template(input: &mut Input<'_>) -> ModalResult<TextLine> {
    preceded(literal(Caseless("template=")), rest)
        .map(|value: &str| TextLine::new(LineKind::Template, Decoration::None, value))
        .parse_next(input)
}

/// `<<stereotype>>`
fn stereotype<'a>(input: &mut Input<'a>) -> ModalResult<TextLine> {
    preceded("<<", rest)
        .verify_map(|inner: &'a str| inner.strip_suffix(">>"))
        .map(|text: &'a str| TextLine::new(LineKind::Stereotype, Decoration::None, text.trim()))
        .parse_next(input)
}

/// `{tag, ...}`
fn tags<'a>(input: &mut Input<'a>) -> ModalResult<TextLine> {
    preceded('{', rest)
        .verify_map(|inner: &'a str| inner.strip_suffix('}'))
        .map(|text: &'a str| TextLine::new(LineKind::Tags, Decoration::None, text.trim()))
        .parse_next(input)
}

/// A line wrapped in `marker` on both ends, with every leading and trailing
/// marker removed.
fn wrapped<'a>(marker: char) -> impl FnMut(&mut Input<'a>) -> ModalResult<&'a str> {
    move |input: &mut Input<'a>| {
        preceded(marker, rest)
            .verify(|inner: &str| inner.ends_with(marker))
            .take()
            .map(|line: &'a str| line.trim_matches(marker))
            .parse_next(input)
    }
}

/// Plain or decorated text.
fn text<'a>(input: &mut Input<'a>) -> ModalResult<TextLine> {
    alt((
        wrapped('_').map(|text: &'a str| TextLine::new(LineKind::Text, Decoration::Static, text)),
        wrapped('/').map(|text: &'a str| TextLine::new(LineKind::Text, Decoration::Abstract, text)),
        rest.map(|line: &'a str| TextLine::plain(line)),
    ))
    .parse_next(input)
}

/// Tokenizes a line of a header section.
///
/// # Examples
///
/// ```ignore
/// let line = header_line("<<interface>>");
/// assert_eq!(line.kind(), LineKind::Stereotype);
/// assert_eq!(line.text(), "interface");
/// ```
pub fn header_line(line: &str) -> TextLine {
    alt((template, stereotype, tags, text))
        .parse(line)
        .unwrap_or_else(|_| TextLine::plain(line))
}

/// Tokenizes a line of a member or operation section.
///
/// Only emphasis markers are recognised here; a `{...}` or `<<...>>` member
/// line is ordinary text.
pub fn member_line(line: &str) -> TextLine {
    text.parse(line).unwrap_or_else(|_| TextLine::plain(line))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn assert_line(line: &TextLine, kind: LineKind, decoration: Decoration, text: &str) {
        assert_eq!(line.kind(), kind);
        assert_eq!(line.decoration(), decoration);
        assert_eq!(line.text(), text);
    }

    #[test]
    fn test_template() {
        assert_line(
            &header_line("template=T"),
            LineKind::Template,
            Decoration::None,
            "T",
        );
        assert_line(
            &header_line("Template=Key, Value"),
            LineKind::Template,
            Decoration::None,
            "Key, Value",
        );
    }

    #[test]
    fn test_stereotype() {
        assert_line(
            &header_line("<<interface>>"),
            LineKind::Stereotype,
            Decoration::None,
            "interface",
        );
        assert_line(
            &header_line("<< entity >>"),
            LineKind::Stereotype,
            Decoration::None,
            "entity",
        );
        assert_line(&header_line("<<open"), LineKind::Text, Decoration::None, "<<open");
    }

    #[test]
    fn test_tags() {
        assert_line(
            &header_line("{leaf, final}"),
            LineKind::Tags,
            Decoration::None,
            "leaf, final",
        );
        assert_line(&header_line("{}"), LineKind::Tags, Decoration::None, "");
    }

    #[test]
    fn test_decorations() {
        assert_line(
            &header_line("_instance_"),
            LineKind::Text,
            Decoration::Static,
            "instance",
        );
        assert_line(
            &header_line("/Shape/"),
            LineKind::Text,
            Decoration::Abstract,
            "Shape",
        );
        assert_line(
            &header_line("/half"),
            LineKind::Text,
            Decoration::None,
            "/half",
        );
    }

    #[test]
    fn test_member_line_ignores_header_markers() {
        assert_line(
            &member_line("{query}"),
            LineKind::Text,
            Decoration::None,
            "{query}",
        );
        assert_line(
            &member_line("<<create>>"),
            LineKind::Text,
            Decoration::None,
            "<<create>>",
        );
        assert_line(
            &member_line("_counter: int_"),
            LineKind::Text,
            Decoration::Static,
            "counter: int",
        );
        assert_line(
            &member_line("/area(): double/"),
            LineKind::Text,
            Decoration::Abstract,
            "area(): double",
        );
    }

    #[test]
    fn test_empty_line() {
        assert_line(&header_line(""), LineKind::Text, Decoration::None, "");
        assert_line(&member_line(""), LineKind::Text, Decoration::None, "");
    }

    fn check_plain_text_is_kept(line: &str) {
        let token = member_line(line);
        assert_eq!(token.decoration(), Decoration::None);
        assert_eq!(token.text(), line);
    }

    proptest! {
        #[test]
        fn plain_text_is_kept(line in "[a-zA-Z0-9 :+#()-]{0,40}") {
            check_plain_text_is_kept(&line);
        }
    }
}
