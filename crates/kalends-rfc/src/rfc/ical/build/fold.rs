//! Line folding (RFC 5545 §3.1).

/// Octets allowed on one physical line, CRLF excluded.
const LIMIT: usize = 75;

/// Terminates `line` with CRLF, breaking it into physical lines of at most
/// 75 octets. Each continuation starts with one space that counts against
/// its limit; breaks never fall inside a UTF-8 sequence.
#[must_use]
pub fn fold_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 3 * (line.len() / LIMIT + 1));
    let mut room = LIMIT;

    for c in line.chars() {
        let width = c.len_utf8();
        if width > room {
            out.push_str("\r\n ");
            room = LIMIT - 1;
        }
        out.push(c);
        room -= width;
    }

    out.push_str("\r\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physical_lines(folded: &str) -> Vec<&str> {
        folded.split("\r\n").filter(|s| !s.is_empty()).collect()
    }

    #[test]
    fn short_line_only_gets_crlf() {
        assert_eq!(fold_line("UID:42"), "UID:42\r\n");
        assert_eq!(fold_line(""), "\r\n");
    }

    #[test]
    fn exactly_75_octets_is_not_folded() {
        let line = "X".repeat(75);
        assert_eq!(fold_line(&line), format!("{line}\r\n"));
    }

    #[test]
    fn boundary_at_75_octets() {
        let line = "A".repeat(80);
        let folded = fold_line(&line);
        let lines = physical_lines(&folded);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 75);
        assert_eq!(lines[1], format!(" {}", "A".repeat(5)));
    }

    #[test]
    fn long_line_unfolds_to_input() {
        let line = "0123456789".repeat(20);
        let folded = fold_line(&line);
        assert!(physical_lines(&folded).iter().all(|l| l.len() <= 75));
        assert_eq!(folded.replace("\r\n ", "").trim_end(), line);
    }

    #[test]
    fn never_splits_a_character() {
        // 73 ASCII octets, then three 3-octet characters.
        let line = format!("{}日本語", "A".repeat(73));
        let folded = fold_line(&line);
        let lines = physical_lines(&folded);
        assert_eq!(lines[0], "A".repeat(73));
        assert_eq!(lines[1], " 日本語");
        assert_eq!(folded.replace("\r\n ", "").trim_end(), line);
    }
}
