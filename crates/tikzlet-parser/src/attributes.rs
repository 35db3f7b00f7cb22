//! Connector attributes: the `key=value` panel text and the waypoint list.

use tikzlet_core::{
    geometry::Point,
    semantic::{PLAIN_STYLE, RelationLabels},
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// Style token and labels read from a connector's panel text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationAttributes {
    pub style: String,
    pub labels: RelationLabels,
}

/// Parses the panel text of a connector.
///
/// Lines with a `=` are `key=value` pairs; `lt` is the style token, `m1`/`m2`
/// the multiplicities and `r1`/`r2` the roles. Every other line, unknown
/// keys included, is a candidate title and the last one wins.
pub fn parse_relation_attributes(text: &str) -> RelationAttributes {
    let mut style = None;
    let mut labels = RelationLabels::default();
    let mut title = None;

    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let Some((key, value)) = line.split_once('=') else {
            title = Some(line);
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "lt" => style = Some(value),
            "m1" => labels.mult1 = Some(value),
            "m2" => labels.mult2 = Some(value),
            "r1" => labels.role1 = Some(value),
            "r2" => labels.role2 = Some(value),
            _ => title = Some(line),
        }
    }

    labels.title = title
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string);

    RelationAttributes {
        style: style
            .filter(|style| !style.is_empty())
            .unwrap_or_else(|| PLAIN_STYLE.to_string()),
        labels,
    }
}

/// Parses a `dx0;dy0;dx1;dy1;...` list into offsets, divided by `zoom`.
///
/// Empty fields are skipped. `span` locates the list in the document for
/// diagnostics.
pub fn parse_waypoint_offsets(text: &str, zoom: f32, span: Span) -> Result<Vec<Point>, Diagnostic> {
    let values = text
        .split(';')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            field
                .parse::<f32>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| {
                    Diagnostic::error(format!("waypoint offset `{field}` is not a finite number"))
                        .with_code(ErrorCode::E200)
                        .with_label(span, "invalid offset in this list")
                        .with_help("offsets are semicolon-separated numbers")
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() % 2 != 0 {
        return Err(Diagnostic::error(format!(
            "waypoint list has an odd number of offsets ({})",
            values.len()
        ))
        .with_code(ErrorCode::E201)
        .with_label(span, "offsets must come in dx;dy pairs"));
    }

    Ok(values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0] / zoom, pair[1] / zoom))
        .collect())
}
