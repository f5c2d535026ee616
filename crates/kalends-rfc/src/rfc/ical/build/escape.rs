//! Value escaping for TEXT (RFC 5545 §3.3.11) and parameter values
//! (§3.2, RFC 6868).

/// Backslash-escapes `\\`, `,` and `;`. Any line break (`\n`, `\r\n`, or
/// a lone `\r`) becomes the two characters `\n`.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(normalized.len());
    for c in normalized.chars() {
        match c {
            '\\' | ',' | ';' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Returns the value unchanged unless it holds `:`, `;`, `,`, `"` or a
/// newline; such values are double-quoted with caret escapes for `^`,
/// newline and `"`.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    if !s.contains([':', ';', ',', '"', '\n']) {
        return s.to_string();
    }
    let body = s
        .replace('^', "^^")
        .replace('\n', "^n")
        .replace('"', "^'");
    format!("\"{body}\"")
}
