use indexmap::IndexMap;

/// Splits raw sheet text into statements and display aliases.
///
/// Lines are partitioned into comment lines (prefix `//`, untrimmed) and
/// code lines. The code lines are rejoined and split on `;` to produce the
/// ordered statement list; statements may still contain internal newlines
/// and whitespace, which downstream consumers trim. Each comment line of
/// the form `// name: Display Name` contributes an alias entry: the text
/// after the marker is split once on the first `:`, and both sides are
/// trimmed. A comment line without a `:` is silently skipped; alias
/// extraction is best-effort per line and never fails the call.
///
/// # Example
/// ```
/// use reckon::sheet::split::split;
///
/// let (statements, aliases) = split("// total: Grand Total\ntotal = a + b");
///
/// assert_eq!(statements, ["total = a + b"]);
/// assert_eq!(aliases.get("total").unwrap(), "Grand Total");
/// ```
#[must_use]
pub fn split(text: &str) -> (Vec<String>, IndexMap<String, String>) {
    let mut aliases = IndexMap::new();
    let mut code_lines = Vec::new();

    for line in text.split('\n') {
        if let Some(comment) = line.strip_prefix("//") {
            if let Some((name, display)) = comment.split_once(':') {
                aliases.insert(name.trim().to_string(), display.trim().to_string());
            }
        } else {
            code_lines.push(line);
        }
    }

    let statements = code_lines.join("\n")
                               .split(';')
                               .map(str::to_string)
                               .collect();

    (statements, aliases)
}

/// Splits a statement into assignment halves at its top-level `=`.
///
/// A top-level `=` is one that is not part of `==`, `!=`, `<=`, or `>=`.
/// Returns the text on either side of the first such `=`, or `None` when
/// the statement has no top-level `=` or nothing but whitespace to the
/// right of it. In both cases the statement is a bare expression.
pub(crate) fn split_assignment(statement: &str) -> Option<(&str, &str)> {
    let bytes = statement.as_bytes();

    for (i, &byte) in bytes.iter().enumerate() {
        if byte != b'=' {
            continue;
        }
        if i > 0 && matches!(bytes[i - 1], b'=' | b'!' | b'<' | b'>') {
            continue;
        }
        if bytes.get(i + 1) == Some(&b'=') {
            continue;
        }

        let (lhs, rest) = statement.split_at(i);
        let rhs = &rest[1..];
        if rhs.trim().is_empty() {
            return None;
        }
        return Some((lhs, rhs));
    }

    None
}
