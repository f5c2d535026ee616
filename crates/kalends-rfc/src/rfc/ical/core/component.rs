//! Components (RFC 5545 §3.4, §3.6): named blocks of ordered properties and
//! ordered sub-components.

use std::fmt;

use super::Property;
use super::property::names;

/// Components this codec knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentKind {
    Calendar,
    Event,
    Timezone,
    Alarm,
    Standard,
    Daylight,
    /// Anything else; the real name lives on [`Component::name`].
    #[default]
    Other,
}

const KNOWN: [(ComponentKind, &str); 6] = [
    (ComponentKind::Calendar, "VCALENDAR"),
    (ComponentKind::Event, "VEVENT"),
    (ComponentKind::Timezone, "VTIMEZONE"),
    (ComponentKind::Alarm, "VALARM"),
    (ComponentKind::Standard, "STANDARD"),
    (ComponentKind::Daylight, "DAYLIGHT"),
];

impl ComponentKind {
    /// The `BEGIN`/`END` name, `None` for [`ComponentKind::Other`].
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        KNOWN.iter().find(|(k, _)| *k == self).map(|(_, n)| *n)
    }

    /// Case-insensitive lookup of a `BEGIN` name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        KNOWN
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map_or(Self::Other, |(k, _)| *k)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("X-COMPONENT"))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Component {
    pub kind: ComponentKind,
    /// Upper-cased name as written on the `BEGIN` line.
    pub name: String,
    pub properties: Vec<Property>,
    pub children: Vec<Component>,
}

impl Component {
    /// Creates an empty component of a known kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            name: kind.to_string(),
            ..Self::default()
        }
    }

    /// Creates an empty component from a name read off a `BEGIN` line.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            kind: ComponentKind::from_name(name),
            name: name.to_ascii_uppercase(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn calendar() -> Self {
        Self::new(ComponentKind::Calendar)
    }

    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    #[must_use]
    pub fn timezone() -> Self {
        Self::new(ComponentKind::Timezone)
    }

    #[must_use]
    pub fn alarm() -> Self {
        Self::new(ComponentKind::Alarm)
    }

    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// First property called `name`, ignoring case.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Text value of the first property called `name`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get_property(name)?.as_text()
    }

    #[must_use]
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn children_of(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.children.iter().filter(move |c| c.kind == kind)
    }
}

/// A `VCALENDAR` root.
#[derive(Debug, Clone, PartialEq)]
pub struct ICalendar {
    pub root: Component,
}

impl ICalendar {
    /// Creates a calendar holding `PRODID` then `VERSION:2.0`.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        let mut root = Component::calendar();
        root.add_property(Property::text(names::PRODID, prodid));
        root.add_property(Property::text(
            names::VERSION,
            kalends_core::constants::ICALENDAR_VERSION,
        ));
        Self { root }
    }

    #[must_use]
    pub fn prodid(&self) -> Option<&str> {
        self.root.text(names::PRODID)
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.root.text(names::VERSION)
    }

    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.root.text(names::METHOD)
    }

    /// Appends a top-level component such as a `VEVENT` or `VTIMEZONE`.
    pub fn add(&mut self, component: Component) {
        self.root.add_child(component);
    }

    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.children_of(ComponentKind::Event).collect()
    }

    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.root.children_of(ComponentKind::Timezone).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_lookup() {
        assert_eq!(ComponentKind::from_name("VEVENT"), ComponentKind::Event);
        assert_eq!(ComponentKind::from_name("valarm"), ComponentKind::Alarm);
        assert_eq!(ComponentKind::from_name("X-CUSTOM"), ComponentKind::Other);
        assert_eq!(ComponentKind::Daylight.name(), Some("DAYLIGHT"));
        assert_eq!(ComponentKind::Other.name(), None);
    }

    #[test]
    fn header_order() {
        let ical = ICalendar::new("-//Test//Test//EN");
        assert_eq!(ical.version(), Some("2.0"));
        assert_eq!(ical.prodid(), Some("-//Test//Test//EN"));
        assert_eq!(ical.method(), None);
        assert_eq!(ical.root.property_names(), vec!["PRODID", "VERSION"]);
    }

    #[test]
    fn lookup_ignores_case() {
        let mut event = Component::event();
        event.add_property(Property::text("UID", "test-uid-123"));
        event.add_property(Property::text("SUMMARY", "Test Event"));

        assert_eq!(event.text("uid"), Some("test-uid-123"));
        assert_eq!(event.text("SUMMARY"), Some("Test Event"));
        assert!(event.get_property("DTSTART").is_none());
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut ical = ICalendar::new("-//Test//Test//EN");
        let mut event = Component::event();
        event.add_property(Property::text("UID", "event1"));
        ical.add(event);

        let mut tz = Component::timezone();
        tz.add_property(Property::text("TZID", "Europe/Berlin"));
        ical.add(tz);

        assert_eq!(ical.events().len(), 1);
        assert_eq!(ical.timezones()[0].text("TZID"), Some("Europe/Berlin"));
        assert_eq!(ical.root.children[0].kind, ComponentKind::Event);
    }

    #[test]
    fn named_keeps_unknown_names() {
        let c = Component::named("vTimezone");
        assert_eq!(c.name, "VTIMEZONE");
        assert_eq!(c.kind, ComponentKind::Timezone);

        let x = Component::named("x-widget");
        assert_eq!(x.name, "X-WIDGET");
        assert_eq!(x.kind, ComponentKind::Other);
    }
}
