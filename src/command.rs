//! The portal's arm/disarm command vocabulary.
//!
//! The summary page exposes three buttons, each posting a form with an
//! `__EVENTVALIDATION` anti-forgery token and a command field. The tokens
//! below were captured from the live portal and do not rotate per request;
//! they are constant for the lifetime of the client.

/// Form field name carrying the anti-forgery token.
pub const EVENT_VALIDATION_FIELD: &str = "__EVENTVALIDATION";

const DISARM_EVENT_VALIDATION: &str =
    "MnXvTutfO7KZZ1zZ7QR19E0sfvOVCpK7SVyeJ0IkUkbXpfEqLa4fa9PzFK2ydqxNal";
const ARM_STAY_EVENT_VALIDATION: &str =
    "/CwyHTpKH4aUp/pqo5gRwFJmKGubsvmx3RI6nIFcyrtacuqXSy5dMoqBPX3aV2ruxZBTUVxenQ\
     7luwjnNdcsxQW/p+YvHjN9ialbwACZfQsFt2o5";
const ARM_AWAY_EVENT_VALIDATION: &str = "3ciB9sbTGyjfsnXn7J4LjfBvdGlkqiHoeh1vPjc5";

/// A state-changing command the portal accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmCommand {
    /// Disarm the system.
    Disarm,
    /// Arm with people home (perimeter only).
    ArmStay,
    /// Arm with everyone away.
    ArmAway,
}

impl ArmCommand {
    /// Wire label, posted as the command field's value. Case-sensitive;
    /// the `+` is literal, not URL encoding.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disarm => "Disarm",
            Self::ArmStay => "Arm+Stay",
            Self::ArmAway => "Arm+Away",
        }
    }

    /// Form field name the server expects the label under.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Disarm => "Disarm",
            Self::ArmStay => "Arm Stay",
            Self::ArmAway => "Arm Away",
        }
    }

    /// Fixed anti-forgery token for this command's form.
    pub fn event_validation(self) -> &'static str {
        match self {
            Self::Disarm => DISARM_EVENT_VALIDATION,
            Self::ArmStay => ARM_STAY_EVENT_VALIDATION,
            Self::ArmAway => ARM_AWAY_EVENT_VALIDATION,
        }
    }
}

impl std::fmt::Display for ArmCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
