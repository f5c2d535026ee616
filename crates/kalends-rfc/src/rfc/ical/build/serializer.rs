//! Tree to text. Output order is insertion order everywhere.

use super::escape::escape_text;
use super::fold::fold_line;
use crate::rfc::ical::core::{Component, ICalendar, Property, Value};

#[must_use]
pub fn serialize(calendar: &ICalendar) -> String {
    serialize_component(&calendar.root)
}

/// `BEGIN`, properties, children, `END`.
#[must_use]
pub fn serialize_component(component: &Component) -> String {
    let mut out = String::new();
    write_component(&mut out, component);
    out
}

fn write_component(out: &mut String, node: &Component) {
    out.push_str(&fold_line(&format!("BEGIN:{}", node.name)));
    node.properties
        .iter()
        .for_each(|p| out.push_str(&serialize_property(p)));
    node.children.iter().for_each(|c| write_component(out, c));
    out.push_str(&fold_line(&format!("END:{}", node.name)));
}

/// One folded, CRLF-terminated content line.
#[must_use]
pub fn serialize_property(prop: &Property) -> String {
    let params: String = prop.params.iter().map(|p| format!(";{p}")).collect();
    let value = match &prop.value {
        Value::Text(text) => escape_text(text),
        _ => prop.raw_value.clone(),
    };
    fold_line(&format!("{}{params}:{value}", prop.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{DateTime, DateTimeForm, Duration, Parameter};
    use crate::rfc::ical::parse;

    fn standup() -> Component {
        let mut vevent = Component::event();
        vevent.add_property(Property::text("UID", "standup-7"));
        vevent.add_property(Property::text("SUMMARY", "Standup"));
        vevent
    }

    #[test]
    fn calendar_wraps_children() {
        let mut calendar = ICalendar::new("-//Acme//Planner//EN");
        calendar.add(standup());

        assert_eq!(
            serialize(&calendar),
            "BEGIN:VCALENDAR\r\nPRODID:-//Acme//Planner//EN\r\nVERSION:2.0\r\n\
             BEGIN:VEVENT\r\nUID:standup-7\r\nSUMMARY:Standup\r\nEND:VEVENT\r\n\
             END:VCALENDAR\r\n"
        );
    }

    #[test]
    fn text_values_are_escaped() {
        let mut vevent = Component::event();
        vevent.add_property(Property::text("LOCATION", "Hall A, Floor 2"));
        vevent.add_property(Property::text("DESCRIPTION", "Agenda;\nReview\\Plan"));

        let text = serialize_component(&vevent);
        assert!(text.contains("LOCATION:Hall A\\, Floor 2\r\n"));
        assert!(text.contains("DESCRIPTION:Agenda\\;\\nReview\\\\Plan\r\n"));
    }

    #[test]
    fn nested_alarm_follows_properties() {
        let mut vevent = standup();
        let mut valarm = Component::alarm();
        valarm.add_property(Property::text("ACTION", "DISPLAY"));
        vevent.add_child(valarm);
        vevent.add_property(Property::text("LOCATION", "Online"));

        assert_eq!(
            serialize_component(&vevent),
            "BEGIN:VEVENT\r\nUID:standup-7\r\nSUMMARY:Standup\r\nLOCATION:Online\r\n\
             BEGIN:VALARM\r\nACTION:DISPLAY\r\nEND:VALARM\r\nEND:VEVENT\r\n"
        );
    }

    #[test]
    fn parameters_render_in_insertion_order() {
        let prop = Property::cal_address("ATTENDEE", "mailto:a@example.com")
            .with_param(Parameter::cutype("GROUP"))
            .with_param(Parameter::sent_by("mailto:b@example.com"))
            .with_param(Parameter::cn("Doe, Jane"));
        assert_eq!(
            serialize_property(&prop),
            "ATTENDEE;CUTYPE=GROUP;SENT-BY=\"mailto:b@example.com\";CN=\"Doe, Jane\":mailto:a@example.com\r\n"
        );
    }

    #[test]
    fn typed_values_render_raw() {
        let start = Property::datetime(
            "DTSTART",
            DateTime::sample(
                "20200509T110000",
                DateTimeForm::Zoned {
                    tzid: "Europe/Berlin".into(),
                },
            ),
        );
        assert_eq!(
            serialize_property(&start),
            "DTSTART;TZID=Europe/Berlin:20200509T110000\r\n"
        );

        let trigger = Property::duration("TRIGGER", Duration::minutes(30).with_sign(true));
        assert_eq!(serialize_property(&trigger), "TRIGGER:-PT30M\r\n");
    }

    #[test]
    fn long_values_fold() {
        let mut vjournal = Component::named("VJOURNAL");
        let body = "note ".repeat(30);
        vjournal.add_property(Property::text("DESCRIPTION", body.as_str()));

        let text = serialize_component(&vjournal);
        assert!(text.lines().all(|l| l.len() <= 76));
        assert!(text.replace("\r\n ", "").contains(&format!("DESCRIPTION:{body}\r\n")));
    }

    #[test]
    fn output_reparses_identically() {
        let mut calendar = ICalendar::new("-//Acme//Planner//EN");
        let mut vevent = standup();
        vevent.add_property(Property::text("DESCRIPTION", "a; b, c\nd"));
        calendar.add(vevent);

        let text = serialize(&calendar);
        let back = parse::parse(&text).unwrap();

        assert_eq!(back.prodid(), Some("-//Acme//Planner//EN"));
        assert_eq!(back.events()[0].text("DESCRIPTION"), Some("a; b, c\nd"));
        assert_eq!(serialize(&back), text);
    }
}
