//! iCalendar document parser (RFC 5545).
//!
//! Builds the generic component tree. Only values the model reads back are
//! typed; everything else is kept verbatim as `Value::Unknown`.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines, unescape_text};
use crate::rfc::ical::core::{Component, ComponentKind, ContentLine, ICalendar, Property, Value};

type Lines = std::vec::IntoIter<(usize, ContentLine)>;

/// Parses an iCalendar document from a string.
///
/// ## Errors
///
/// Returns an error if the input is empty, any content line is malformed,
/// the root is not a well-nested `VCALENDAR`, or anything follows its `END`.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    tracing::debug!("Parsing iCalendar document");

    let lines = split_lines(input);
    if lines.is_empty() {
        tracing::warn!("Empty iCalendar input");
        return Err(ParseError::at(ParseErrorKind::EmptyInput, 1, 1));
    }

    let content_lines = lines
        .into_iter()
        .map(|(line_num, line)| parse_content_line(&line, line_num).map(|cl| (line_num, cl)))
        .collect::<ParseResult<Vec<_>>>()?;

    tracing::trace!(count = content_lines.len(), "Parsed content lines");

    let mut iter = content_lines.into_iter();
    let Some((line_num, first)) = iter.next() else {
        return Err(ParseError::at(ParseErrorKind::EmptyInput, 1, 1));
    };

    if first.name != "BEGIN" {
        tracing::warn!(name = %first.name, "Document does not start with BEGIN");
        return Err(ParseError::at(ParseErrorKind::MissingBegin, line_num, 1));
    }

    let root_name = first.raw_value.trim().to_ascii_uppercase();
    if ComponentKind::from_name(&root_name) != ComponentKind::Calendar {
        tracing::warn!(root = %root_name, "Root component is not VCALENDAR");
        return Err(ParseError::at(ParseErrorKind::MissingBegin, line_num, 1)
            .with_detail(format!("expected VCALENDAR, got {root_name}")));
    }

    let root = parse_component_body(&mut iter, line_num, &root_name)?;

    if let Some((line_num, extra)) = iter.next() {
        return Err(ParseError::at(ParseErrorKind::TrailingContent, line_num, 1)
            .with_detail(extra.name));
    }

    tracing::debug!(
        children = root.children.len(),
        "iCalendar document parsed successfully"
    );

    Ok(ICalendar { root })
}

/// Parses properties and children up to the matching `END` line.
///
/// The `BEGIN` line has already been consumed.
fn parse_component_body(
    iter: &mut Lines,
    begin_line_num: usize,
    name: &str,
) -> ParseResult<Component> {
    let mut component = Component::named(name);
    let mut last_line_num = begin_line_num;

    loop {
        let Some((line_num, content_line)) = iter.next() else {
            return Err(ParseError::at(ParseErrorKind::MissingEnd, last_line_num, 1)
                .with_detail(format!("missing END:{name}")));
        };
        last_line_num = line_num;

        match content_line.name.as_str() {
            "BEGIN" => {
                let nested_name = content_line.raw_value.trim().to_ascii_uppercase();
                let nested = parse_component_body(iter, line_num, &nested_name)?;
                component.add_child(nested);
            }
            "END" => {
                let end_name = content_line.raw_value.trim().to_ascii_uppercase();
                if end_name != name {
                    return Err(
                        ParseError::at(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_detail(format!("expected END:{name}, got END:{end_name}")),
                    );
                }
                return Ok(component);
            }
            _ => component.add_property(resolve_property(content_line, line_num)?),
        }
    }
}

/// Assigns a typed value to the properties the model reads back.
fn resolve_property(cl: ContentLine, line_num: usize) -> ParseResult<Property> {
    let value = match cl.name.as_str() {
        "REPEAT" | "SEQUENCE" | "PRIORITY" => {
            let n = cl.raw_value.trim().parse::<i32>().map_err(|e| {
                ParseError::at(ParseErrorKind::InvalidInteger, line_num, cl.name.len() + 2)
                    .with_detail(format!("'{}': {e}", cl.raw_value))
            })?;
            Value::Integer(n)
        }
        "ATTENDEE" | "ORGANIZER" => Value::CalAddress(cl.raw_value.clone()),
        name if is_text_property(name) => Value::Text(unescape_text(&cl.raw_value)),
        _ => return Ok(Property::from_content_line(cl)),
    };

    Ok(Property {
        name: cl.name,
        params: cl.params,
        value,
        raw_value: cl.raw_value,
    })
}

fn is_text_property(name: &str) -> bool {
    matches!(
        name,
        "PRODID"
            | "VERSION"
            | "METHOD"
            | "SUMMARY"
            | "DESCRIPTION"
            | "UID"
            | "TZID"
            | "TZNAME"
            | "ACTION"
            | "TRANSP"
            | "LOCATION"
            | "COMMENT"
    ) || name.starts_with("X-")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "BEGIN:VCALENDAR\r\n\
        VERSION:2.0\r\n\
        PRODID:-//Test//Test//EN\r\n\
        BEGIN:VEVENT\r\n\
        UID:test-123@example.com\r\n\
        DTSTART:20260123T120000Z\r\n\
        SUMMARY:Test Event\r\n\
        BEGIN:VALARM\r\n\
        ACTION:DISPLAY\r\n\
        TRIGGER:-PT15M\r\n\
        REPEAT:2\r\n\
        END:VALARM\r\n\
        END:VEVENT\r\n\
        END:VCALENDAR\r\n";

    #[test_log::test]
    fn parse_simple_calendar() {
        let ical = parse(SIMPLE).unwrap();
        assert_eq!(ical.version(), Some("2.0"));
        assert_eq!(ical.prodid(), Some("-//Test//Test//EN"));

        let events = ical.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].text("UID"), Some("test-123@example.com"));
        assert_eq!(events[0].text("SUMMARY"), Some("Test Event"));

        let dtstart = events[0].get_property("DTSTART").unwrap();
        assert_eq!(dtstart.value, Value::Unknown("20260123T120000Z".to_string()));
    }

    #[test_log::test]
    fn parse_nested_alarm() {
        let ical = parse(SIMPLE).unwrap();
        let alarms = ical.events()[0]
            .children_of(ComponentKind::Alarm)
            .collect::<Vec<_>>();
        assert_eq!(alarms.len(), 1);
        assert_eq!(alarms[0].kind, ComponentKind::Alarm);
        assert_eq!(
            alarms[0].get_property("REPEAT").and_then(Property::as_integer),
            Some(2)
        );
    }

    #[test_log::test]
    fn parse_escaped_and_folded_text() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            BEGIN:VEVENT\r\n\
            SUMMARY:Meeting\\, important\\; really\r\n\
            DESCRIPTION:Line 1\\nLine\r\n  2\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let ical = parse(input).unwrap();
        let event = ical.events()[0];
        assert_eq!(event.text("SUMMARY"), Some("Meeting, important; really"));
        assert_eq!(
            event.get_property("DESCRIPTION").and_then(Property::as_text),
            Some("Line 1\nLine 2")
        );
    }

    #[test_log::test]
    fn parse_keeps_method_raw() {
        let input = "BEGIN:VCALENDAR\nMETHOD: REQUEST\nEND:VCALENDAR\n";
        let ical = parse(input).unwrap();
        assert_eq!(ical.method(), Some(" REQUEST"));
    }

    #[test_log::test]
    fn parse_empty_input() {
        let err = parse("\r\n\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyInput);
    }

    #[test_log::test]
    fn parse_garbage() {
        let err = parse("fooooo").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingColon);
    }

    #[test_log::test]
    fn parse_requires_vcalendar_root() {
        let err = parse("SUMMARY:x\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingBegin);

        let err = parse("BEGIN:VEVENT\r\nEND:VEVENT\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingBegin);
    }

    #[test_log::test]
    fn parse_missing_end() {
        let err = parse("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingEnd);
        assert_eq!(err.line, 2);
    }

    #[test_log::test]
    fn parse_mismatched_end() {
        let input = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nEND:VTODO\r\nEND:VCALENDAR\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedComponent);
        assert_eq!(err.line, 3);
    }

    #[test_log::test]
    fn parse_trailing_content() {
        let input = "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\nSUMMARY:extra\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingContent);
    }

    #[test_log::test]
    fn parse_invalid_integer() {
        let input = "BEGIN:VCALENDAR\r\nBEGIN:VALARM\r\nREPEAT:often\r\nEND:VALARM\r\nEND:VCALENDAR\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidInteger);
    }
}
