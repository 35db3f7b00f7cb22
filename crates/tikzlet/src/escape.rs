//! LaTeX-safe text.

/// Escapes the characters TikZ-UML arguments cannot carry verbatim.
///
/// Backslashes pass through, so that diagram authors can still use LaTeX
/// commands in their text.
///
/// # Examples
///
/// ```
/// # use tikzlet::escape::escape_latex;
/// assert_eq!(escape_latex("List<T>"), r"List\textless{}T\textgreater{}");
/// assert_eq!(escape_latex("a_b & {c}"), r"a\_b \& \{c\}");
/// ```
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str(r"\&"),
            '{' => escaped.push_str(r"\{"),
            '}' => escaped.push_str(r"\}"),
            '#' => escaped.push_str(r"\#"),
            '_' => escaped.push_str(r"\_"),
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '<' => escaped.push_str(r"\textless{}"),
            '>' => escaped.push_str(r"\textgreater{}"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Keeps the characters a multiplicity label may show: ASCII letters and
/// digits, brackets, parentheses, `,`, `.` and `*`.
pub fn clean_multiplicity(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || "[](),.*".contains(*c))
        .collect()
}

/// Keeps the characters a role label may show: ASCII letters, digits and `,`.
pub fn clean_role(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ',')
        .collect()
}
