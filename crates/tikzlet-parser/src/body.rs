//! Interpretation of shape text.
//!
//! A class-like body is split into sections at `--` lines, the first section
//! becoming the [`Header`] and the others the member and operation blocks.

use tikzlet_core::semantic::{ClassBody, Decoration, Header, LineKind, NameStyle, TextLine};

use crate::tokenizer::{header_line, member_line};

/// Trimmed text of a line that separates two sections.
const SECTION_SEPARATOR: &str = "--";

/// At most header, members and operations.
const MAX_SECTIONS: usize = 3;

/// Splits `text` into sections at separator lines.
///
/// There is always at least one section; sections beyond the third are
/// dropped.
fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections = vec![Vec::new()];
    for line in text.lines() {
        if line.trim() == SECTION_SEPARATOR {
            sections.push(Vec::new());
        } else if let Some(current) = sections.last_mut() {
            current.push(line);
        }
    }
    sections.truncate(MAX_SECTIONS);
    sections
}

/// Whether a section reads like an operation list.
fn looks_like_operations(section: &[&str]) -> bool {
    section
        .iter()
        .any(|line| line.contains('(') || line.contains(')'))
}

/// Builds a header from the lines of the first section.
///
/// Recognised, in this order: a leading template line, leading stereotype
/// lines (the last one wins), the first tags line anywhere, and the first
/// remaining line as the name.
pub fn parse_header(lines: &[&str]) -> Header {
    let tokens: Vec<(&str, TextLine)> =
        lines.iter().map(|line| (*line, header_line(line))).collect();
    let mut rest = tokens.as_slice();

    let template = match rest.split_first() {
        Some(((_, first), tail)) if first.kind() == LineKind::Template => {
            rest = tail;
            Some(first.text().to_string())
        }
        _ => None,
    };

    let mut stereotype = None;
    while let Some(((_, first), tail)) = rest.split_first() {
        if first.kind() != LineKind::Stereotype {
            break;
        }
        stereotype = Some(first.text().to_string());
        rest = tail;
    }

    let mut remaining: Vec<&(&str, TextLine)> = rest.iter().collect();
    let tags = remaining
        .iter()
        .position(|(_, token)| token.kind() == LineKind::Tags)
        .map(|index| remaining.remove(index).1.text().to_string());

    let (name, name_style) = match remaining.first() {
        Some((_, token)) if token.kind() == LineKind::Text => match token.decoration() {
            Decoration::Static => (token.text().to_string(), NameStyle::Object),
            Decoration::Abstract => (token.text().trim().to_string(), NameStyle::Abstract),
            Decoration::None => (token.text().to_string(), NameStyle::Plain),
        },
        Some((raw, _)) => (raw.to_string(), NameStyle::Plain),
        None => (String::new(), NameStyle::Plain),
    };

    Header::new(template, stereotype, tags, name, name_style)
}

/// Parses the text of a class-like element.
///
/// `implicit_stereotype` is prepended as a header line, e.g. `interface` for
/// interface elements.
pub fn parse_class_body(text: &str, implicit_stereotype: Option<&str>) -> ClassBody {
    let text = match implicit_stereotype {
        Some(stereotype) => format!("<<{stereotype}>>\n{text}"),
        None => text.to_string(),
    };

    let mut sections = split_sections(&text).into_iter();
    let header = parse_header(&sections.next().unwrap_or_default());
    let second = sections.next();
    let third = sections.next();

    let (members, operations) = match (second, third) {
        (None, _) => return ClassBody::simple(header),
        (Some(body), None) if looks_like_operations(&body) => (Vec::new(), body),
        (Some(body), None) => (body, Vec::new()),
        (Some(members), Some(operations)) => (members, operations),
    };

    ClassBody::full(
        header,
        members.into_iter().map(member_line).collect(),
        operations.into_iter().map(member_line).collect(),
    )
}

/// Parses the text of a container; only its first section is meaningful.
pub fn parse_package_header(text: &str) -> Header {
    let sections = split_sections(text);
    parse_header(sections.first().map(Vec::as_slice).unwrap_or_default())
}
