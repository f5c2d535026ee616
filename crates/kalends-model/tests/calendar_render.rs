//! End-to-end rendering of calendars built from the typed model.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use kalends_model::{
    AlarmTrigger, Attendee, CalendarTime, CalendarUserType, Duration, Frequency, RecurrenceEnd,
    RecurrenceRule, VAlarm, VCalendar, VEvent,
};
use kalends_rfc::rfc::ical::TimezoneDatabase;

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()
}

fn berlin() -> Tz {
    "Europe/Berlin".parse().unwrap()
}

fn hello_world() -> VEvent {
    VEvent::new(
        "Hello World",
        CalendarTime::Zoned(berlin().with_ymd_and_hms(2020, 5, 9, 11, 0, 0).unwrap()),
    )
    .with_dtend(CalendarTime::Zoned(
        berlin().with_ymd_and_hms(2020, 5, 9, 12, 0, 0).unwrap(),
    ))
    .with_dtstamp(epoch())
    .with_created(epoch())
    .with_uid("HELLO-WORLD")
}

fn unfolded(text: &str) -> String {
    text.replace("\r\n ", "")
}

#[test_log::test]
fn hello_world_without_timezones() {
    let calendar = VCalendar {
        autoinclude_timezones: false,
        ..VCalendar::default()
    }
    .with_event(hello_world());

    let text = unfolded(&calendar.to_ical_string(&TimezoneDatabase::default()).unwrap());
    let expected = [
        "BEGIN:VEVENT",
        "DTSTAMP:19700101T000000Z",
        "DTSTART;TZID=/freeassociation.sourceforge.net/Europe/Berlin:20200509T110000",
        "DTEND;TZID=/freeassociation.sourceforge.net/Europe/Berlin:20200509T120000",
        "SUMMARY:Hello World",
        "UID:HELLO-WORLD",
        "TRANSP:OPAQUE",
        "CREATED:19700101T000000Z",
        "END:VEVENT",
    ]
    .join("\r\n");

    assert!(text.contains(&expected), "unexpected output:\n{text}");
    assert!(!text.contains("BEGIN:VTIMEZONE"));
}

#[test_log::test]
fn autoinclude_defines_each_zone_once() {
    let calendar = VCalendar::default().with_event(hello_world());
    let tzdb = TimezoneDatabase::default();
    let ical = calendar.to_component(&tzdb).unwrap();

    let zones = ical.timezones();
    assert_eq!(zones.len(), 1);

    let event = ical.events()[0];
    let start_tzid = event
        .get_property("DTSTART")
        .and_then(|p| p.get_param_value("TZID"))
        .unwrap();
    assert_eq!(zones[0].text("TZID"), Some(start_tzid));
    assert_eq!(zones[0].children.len(), 2);
}

#[test_log::test]
fn zones_precede_events() {
    let text = VCalendar::default()
        .with_event(hello_world())
        .to_ical_string(&TimezoneDatabase::default())
        .unwrap();
    let zone_at = text.find("BEGIN:VTIMEZONE").unwrap();
    let event_at = text.find("BEGIN:VEVENT").unwrap();
    assert!(zone_at < event_at);
    assert!(text.starts_with("BEGIN:VCALENDAR\r\nPRODID:-//Kalends/EN\r\nVERSION:2.0\r\n"));
}

#[test_log::test]
fn bare_and_prefixed_forms_are_distinct_zones() {
    let calendar = VCalendar::default()
        .with_timezone(berlin())
        .with_event(hello_world().with_tzid_prefix(false));
    let ical = calendar.to_component(&TimezoneDatabase::default()).unwrap();

    let tzids: Vec<_> = ical.timezones().iter().filter_map(|z| z.text("TZID")).collect();
    assert_eq!(
        tzids,
        vec!["/freeassociation.sourceforge.net/Europe/Berlin", "Europe/Berlin"]
    );
}

#[test_log::test]
fn zone_definition_follows_event_year() {
    let new_york: Tz = "America/New_York".parse().unwrap();
    let event = VEvent::new(
        "Later",
        CalendarTime::Zoned(new_york.with_ymd_and_hms(2021, 6, 1, 9, 0, 0).unwrap()),
    );
    let text = VCalendar::default()
        .with_event(event)
        .to_ical_string(&TimezoneDatabase::default())
        .unwrap();
    assert!(text.contains("DTSTART:20210314T020000\r\n"));
    assert!(text.contains("DTSTART:20211107T020000\r\n"));
}

#[test_log::test]
fn zone_definition_spans_event_years() {
    let at = |year: i32, month: u32| {
        CalendarTime::Zoned(berlin().with_ymd_and_hms(year, month, 1, 10, 0, 0).unwrap())
    };
    let text = VCalendar::default()
        .with_event(VEvent::new("Before", at(1975, 6)).with_uid("EARLY"))
        .with_event(VEvent::new("After", at(2020, 7)).with_uid("LATE"))
        .to_ical_string(&TimezoneDatabase::default())
        .unwrap();

    let vtimezone = text.split("END:VTIMEZONE").next().unwrap();
    assert_eq!(vtimezone.matches("BEGIN:VTIMEZONE").count(), 1);
    assert!(vtimezone.contains("BEGIN:STANDARD\r\nDTSTART:19700101T000000\r\n"));
    assert!(vtimezone.contains("BEGIN:DAYLIGHT\r\n"));
    assert!(vtimezone.contains(
        "DTSTART:19810329T020000\r\nTZOFFSETFROM:+0100\r\nTZOFFSETTO:+0200\r\nRRULE:FREQ=YEARLY;BYDAY=-1SU;BYMONTH=3\r\n"
    ));
}

#[test_log::test]
fn recurrence_expands_as_rendered() {
    let event = hello_world()
        .with_tzid_prefix(false)
        .with_recurrence_rule(
            RecurrenceRule::new(Frequency::Weekly).with_end(RecurrenceEnd::Count(3)),
        );
    let text = VCalendar::default()
        .with_event(event)
        .to_ical_string(&TimezoneDatabase::default())
        .unwrap();
    let text = unfolded(&text);
    let vevent = text.split("BEGIN:VEVENT").nth(1).unwrap();
    assert!(vevent.contains("RRULE:FREQ=WEEKLY;COUNT=3\r\n"));

    let line = |name: &str| {
        vevent
            .lines()
            .find(|l| l.starts_with(name))
            .unwrap()
            .to_string()
    };
    let set: rrule::RRuleSet = format!("{}\n{}", line("DTSTART;"), line("RRULE:"))
        .parse()
        .unwrap();
    let dates: Vec<String> = set
        .all(10)
        .dates
        .iter()
        .map(|d| d.format("%Y%m%dT%H%M%S").to_string())
        .collect();
    assert_eq!(
        dates,
        vec!["20200509T110000", "20200516T110000", "20200523T110000"]
    );
}

#[test_log::test]
fn alarm_with_every_duration_part() {
    let trigger = Duration {
        weeks: 1,
        days: 1,
        hours: 2,
        minutes: 30,
        seconds: 30,
    };
    let event = hello_world().with_alarm(VAlarm::display(AlarmTrigger::Before(trigger), "Go"));
    let text = VCalendar::default()
        .with_event(event)
        .to_ical_string(&TimezoneDatabase::default())
        .unwrap();
    assert!(text.contains(
        "BEGIN:VALARM\r\nTRIGGER:-P1W1DT2H30M30S\r\nACTION:DISPLAY\r\nDESCRIPTION:Go\r\nEND:VALARM\r\nEND:VEVENT\r\n"
    ));
}

#[test_log::test]
fn custom_attendee_type() {
    let attendee = Attendee::new("thomas@example.com")
        .with_user_type(CalendarUserType::X("TEST".into()));
    let text = VCalendar::default()
        .with_event(hello_world().with_attendee(attendee))
        .to_ical_string(&TimezoneDatabase::default())
        .unwrap();
    let text = unfolded(&text);
    assert!(text.contains("ATTENDEE;CUTYPE=TEST:mailto:thomas@example.com\r\n"));
}

#[test_log::test]
fn rendered_calendar_parses_back() {
    let text = VCalendar::default()
        .with_event(hello_world().with_description("Line one\nLine two; done"))
        .to_ical_string(&TimezoneDatabase::default())
        .unwrap();
    let ical = kalends_rfc::rfc::ical::parse(&text).unwrap();
    let event = ical.events()[0];
    assert_eq!(event.text("SUMMARY"), Some("Hello World"));
    assert_eq!(
        event.get_property("DESCRIPTION").unwrap().as_text(),
        Some("Line one\nLine two; done")
    );
}
