//! Attendees and organizers (RFC 5545 §3.8.4.1, §3.8.4.3).

use std::collections::BTreeMap;

use kalends_rfc::rfc::ical::core::{Parameter, Property, prop_names};

use crate::error::EncodeResult;

const MAILTO: &str = "mailto:";

/// Normalizes an address to a `mailto:` URI.
///
/// Addresses already carrying the scheme, in any case, are returned as-is.
#[must_use]
pub fn mailto(address: &str) -> String {
    let has_scheme = address
        .get(..MAILTO.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(MAILTO));
    if has_scheme {
        address.to_string()
    } else {
        format!("{MAILTO}{address}")
    }
}

/// Kind of calendar user (`CUTYPE`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CalendarUserType {
    #[default]
    Individual,
    Group,
    Resource,
    Room,
    Unknown,
    X(String),
}

impl CalendarUserType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Individual => "INDIVIDUAL",
            Self::Group => "GROUP",
            Self::Resource => "RESOURCE",
            Self::Room => "ROOM",
            Self::Unknown => "UNKNOWN",
            Self::X(value) => value,
        }
    }
}

/// Participation status (`PARTSTAT`) for an event attendee.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParticipationStatus {
    #[default]
    NeedsAction,
    Accepted,
    Declined,
    Tentative,
    Delegated,
    X(String),
}

impl ParticipationStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NeedsAction => "NEEDS-ACTION",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
            Self::Tentative => "TENTATIVE",
            Self::Delegated => "DELEGATED",
            Self::X(value) => value,
        }
    }
}

/// Participation role (`ROLE`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Role {
    Chair,
    #[default]
    RequiredParticipant,
    OptionalParticipant,
    NonParticipant,
    X(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chair => "CHAIR",
            Self::RequiredParticipant => "REQ-PARTICIPANT",
            Self::OptionalParticipant => "OPT-PARTICIPANT",
            Self::NonParticipant => "NON-PARTICIPANT",
            Self::X(value) => value,
        }
    }
}

/// An event or alarm attendee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    pub address: String,
    pub user_type: CalendarUserType,
    pub participation_status: ParticipationStatus,
    pub role: Role,
    pub rsvp: bool,
    pub member: Vec<String>,
    pub delegated_to: Vec<String>,
    pub delegated_from: Vec<String>,
    pub sent_by: Option<String>,
    pub common_name: Option<String>,
    /// Emitted verbatim as `KEY=VALUE` after every other parameter.
    pub x_parameters: BTreeMap<String, String>,
}

impl Attendee {
    /// Creates an attendee with every parameter at its RFC default.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            user_type: CalendarUserType::default(),
            participation_status: ParticipationStatus::default(),
            role: Role::default(),
            rsvp: false,
            member: Vec::new(),
            delegated_to: Vec::new(),
            delegated_from: Vec::new(),
            sent_by: None,
            common_name: None,
            x_parameters: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_common_name(mut self, name: impl Into<String>) -> Self {
        self.common_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_user_type(mut self, user_type: CalendarUserType) -> Self {
        self.user_type = user_type;
        self
    }

    #[must_use]
    pub fn with_participation_status(mut self, status: ParticipationStatus) -> Self {
        self.participation_status = status;
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub const fn with_rsvp(mut self, rsvp: bool) -> Self {
        self.rsvp = rsvp;
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: Vec<String>) -> Self {
        self.member = member;
        self
    }

    #[must_use]
    pub fn with_delegated_to(mut self, to: Vec<String>) -> Self {
        self.delegated_to = to;
        self
    }

    #[must_use]
    pub fn with_delegated_from(mut self, from: Vec<String>) -> Self {
        self.delegated_from = from;
        self
    }

    #[must_use]
    pub fn with_sent_by(mut self, sent_by: impl Into<String>) -> Self {
        self.sent_by = Some(sent_by.into());
        self
    }

    #[must_use]
    pub fn with_x_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.x_parameters.insert(key.into(), value.into());
        self
    }

    /// ## Summary
    /// Builds the `ATTENDEE` property. Parameters equal to their RFC
    /// default are left out.
    ///
    /// ## Errors
    /// Returns an error if an extension parameter name is not legal.
    pub fn to_property(&self) -> EncodeResult<Property> {
        let mut prop = Property::cal_address(prop_names::ATTENDEE, mailto(&self.address));

        if self.user_type != CalendarUserType::Individual {
            prop.add_param(Parameter::cutype(self.user_type.as_str()));
        }
        if !self.member.is_empty() {
            prop.add_param(Parameter::member(&self.member));
        }
        if self.participation_status != ParticipationStatus::NeedsAction {
            prop.add_param(Parameter::partstat(self.participation_status.as_str()));
        }
        if self.role != Role::RequiredParticipant {
            prop.add_param(Parameter::role(self.role.as_str()));
        }
        if !self.delegated_to.is_empty() {
            prop.add_param(Parameter::delegated_to(&self.delegated_to));
        }
        if !self.delegated_from.is_empty() {
            prop.add_param(Parameter::delegated_from(&self.delegated_from));
        }
        if let Some(sent_by) = &self.sent_by {
            prop.add_param(Parameter::sent_by(sent_by.as_str()));
        }
        if let Some(cn) = &self.common_name {
            prop.add_param(Parameter::cn(cn.as_str()));
        }
        if self.rsvp {
            prop.add_param(Parameter::rsvp(true));
        }
        add_x_parameters(&mut prop, &self.x_parameters)?;

        Ok(prop)
    }
}

/// The organizer of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organizer {
    pub address: String,
    pub common_name: Option<String>,
    pub sent_by: Option<String>,
    pub x_parameters: BTreeMap<String, String>,
}

impl Organizer {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            common_name: None,
            sent_by: None,
            x_parameters: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_common_name(mut self, name: impl Into<String>) -> Self {
        self.common_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_sent_by(mut self, sent_by: impl Into<String>) -> Self {
        self.sent_by = Some(sent_by.into());
        self
    }

    #[must_use]
    pub fn with_x_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.x_parameters.insert(key.into(), value.into());
        self
    }

    /// ## Summary
    /// Builds the `ORGANIZER` property. `SENT-BY` is normalized to `mailto:`
    /// like the address itself.
    ///
    /// ## Errors
    /// Returns an error if an extension parameter name is not legal.
    pub fn to_property(&self) -> EncodeResult<Property> {
        let mut prop = Property::cal_address(prop_names::ORGANIZER, mailto(&self.address));

        if let Some(cn) = &self.common_name {
            prop.add_param(Parameter::cn(cn.as_str()));
        }
        if let Some(sent_by) = &self.sent_by {
            prop.add_param(Parameter::sent_by(mailto(sent_by)));
        }
        add_x_parameters(&mut prop, &self.x_parameters)?;

        Ok(prop)
    }
}

fn add_x_parameters(prop: &mut Property, params: &BTreeMap<String, String>) -> EncodeResult<()> {
    for (key, value) in params {
        prop.add_param(Parameter::from_literal(&format!("{key}={value}"))?);
    }
    Ok(())
}
