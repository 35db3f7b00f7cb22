//! Connector style resolution.
//!
//! The editor encodes a connector's kind in a short arrow-like token such as
//! `->>` or `<<<<-`. Tokens are looked up in a fixed table; a token drawn in
//! the opposite direction (`<<-` for `->>`) is recognised by mirroring it,
//! and the connector is then turned around so that its ends match the
//! command.

use log::debug;

use tikzlet_core::semantic::{Diagram, Relation};
use tikzlet_parser::error::{Diagnostic, ErrorCode};

/// Style tokens and the TikZ-UML commands that draw them.
const RELATION_COMMANDS: &[(&str, &str)] = &[
    ("-", "umlassoc"),
    ("->", "umluniassoc"),
    (".>", "umldep"),
    ("->>", "umlinherit"),
    (".>>", "umlimpl"),
    ("<<<<-", "umlaggreg"),
    ("<<<<<-", "umlcompo"),
    ("<<<<->", "umluniaggreg"),
    ("<<<<<->", "umlunicompo"),
];

/// Looks up the command of a style token.
fn command_for(token: &str) -> Option<&'static str> {
    RELATION_COMMANDS
        .iter()
        .find(|(known, _)| *known == token)
        .map(|(_, command)| *command)
}

/// The token read from the other end: arrow heads are swapped and the
/// token is reversed.
///
/// # Examples
///
/// ```
/// # use tikzlet::layout::style::mirror_token;
/// assert_eq!(mirror_token("<<-"), "->>");
/// assert_eq!(mirror_token("->>>>"), "<<<<-");
/// assert_eq!(mirror_token("<."), ".>");
/// ```
pub fn mirror_token(token: &str) -> String {
    token
        .chars()
        .rev()
        .map(|c| match c {
            '<' => '>',
            '>' => '<',
            other => other,
        })
        .collect()
}

/// Outcome of resolving one connector's style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleResolution {
    /// The token is in the table.
    Direct(&'static str),
    /// The mirrored token is in the table; the connector must be turned around.
    Mirrored(&'static str),
    /// Neither form is known.
    Unknown,
}

/// Maps style tokens to drawing commands.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    default_command: String,
}

impl StyleResolver {
    /// Creates a resolver falling back to `default_command` for unknown tokens.
    pub fn new(default_command: impl Into<String>) -> Self {
        Self {
            default_command: default_command.into(),
        }
    }

    /// Looks up `token` directly, then mirrored.
    pub fn lookup(&self, token: &str) -> StyleResolution {
        if let Some(command) = command_for(token) {
            return StyleResolution::Direct(command);
        }
        match command_for(&mirror_token(token)) {
            Some(command) => StyleResolution::Mirrored(command),
            None => StyleResolution::Unknown,
        }
    }

    /// Sets the drawing command of `relation`, turning it around when its
    /// token is only known mirrored.
    ///
    /// Must run after route classification: mirroring also reverses the
    /// route. Returns a warning for unknown tokens, which get the default
    /// command.
    pub fn resolve(&self, relation: &mut Relation) -> Option<Diagnostic> {
        match self.lookup(relation.style()) {
            StyleResolution::Direct(command) => {
                relation.set_command(command);
                None
            }
            StyleResolution::Mirrored(command) => {
                debug!(relation:% = relation.id(), style = relation.style(); "Mirroring connector");
                relation.set_command(command);
                relation.mirror();
                None
            }
            StyleResolution::Unknown => {
                relation.set_command(self.default_command.as_str());
                Some(
                    Diagnostic::warning(format!(
                        "unknown style `{}` on `{}`",
                        relation.style(),
                        relation.id()
                    ))
                    .with_code(ErrorCode::W302)
                    .with_label(relation.span(), "connector defined here")
                    .with_help(format!("drawn as `{}`", self.default_command)),
                )
            }
        }
    }

    /// Resolves every connector of `diagram`.
    pub fn resolve_all(&self, diagram: &mut Diagram) -> Vec<Diagnostic> {
        diagram
            .relations_mut()
            .iter_mut()
            .filter_map(|relation| self.resolve(relation))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use tikzlet_core::{
        geometry::Point,
        identifier::Id,
        semantic::{Endpoint, RelationLabels, RouteShape},
        span::Span,
    };

    use super::*;

    fn relation(style: &str) -> Relation {
        let mut relation = Relation::new(
            Id::new("Relation0"),
            Point::default(),
            Vec::new(),
            style,
            RelationLabels::default(),
            Span::default(),
        );
        relation.set_endpoints(
            Endpoint::Attached {
                shape: Id::new("UMLClass0"),
                angle: 0.0,
            },
            Endpoint::Attached {
                shape: Id::new("UMLClass1"),
                angle: 180.0,
            },
        );
        relation.set_route(RouteShape::VerticalFirst);
        relation
    }

    #[test]
    fn test_every_known_token_resolves_directly() {
        let resolver = StyleResolver::new("umlassoc");
        for (token, command) in RELATION_COMMANDS {
            assert_eq!(resolver.lookup(token), StyleResolution::Direct(command));
        }
    }

    #[test]
    fn test_mirror_token_is_an_involution() {
        for (token, _) in RELATION_COMMANDS {
            assert_eq!(mirror_token(&mirror_token(token)), *token);
        }
    }

    #[test]
    fn test_direct_token() {
        let mut relation = relation("->>");
        let warning = StyleResolver::new("umlassoc").resolve(&mut relation);

        assert!(warning.is_none());
        assert_eq!(relation.command(), Some("umlinherit"));
        assert!(!relation.is_mirrored());
        assert_eq!(relation.start().unwrap().reference(), "UMLClass0");
    }

    #[test]
    fn test_mirrored_token_turns_connector_around() {
        let mut relation = relation("<<-");
        let warning = StyleResolver::new("umlassoc").resolve(&mut relation);

        assert!(warning.is_none());
        assert_eq!(relation.command(), Some("umlinherit"));
        assert!(relation.is_mirrored());
        assert_eq!(relation.start().unwrap().reference(), "UMLClass1");
        assert_eq!(relation.start().unwrap().angle(), Some(180.0));
        assert_eq!(relation.end().unwrap().reference(), "UMLClass0");
        assert_eq!(relation.route(), RouteShape::HorizontalFirst);
    }

    #[test]
    fn test_mirrored_composition() {
        let mut relation = relation("->>>>>");
        StyleResolver::new("umlassoc").resolve(&mut relation);

        assert_eq!(relation.command(), Some("umlcompo"));
        assert!(relation.is_mirrored());
    }

    #[test]
    fn test_unknown_token_falls_back_with_warning() {
        let mut relation = relation("<.>");
        let warning = StyleResolver::new("umldep").resolve(&mut relation);

        assert_eq!(relation.command(), Some("umldep"));
        assert!(!relation.is_mirrored());
        assert_eq!(relation.route(), RouteShape::VerticalFirst);
        let warning = warning.unwrap();
        assert_eq!(warning.code(), Some(ErrorCode::W302));
        assert!(warning.severity().is_warning());
    }
}
