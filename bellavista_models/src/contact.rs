use std::str::FromStr;

use email_address::EmailAddress;
use nutype::nutype;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sanitize::sanitize_field;

/// A fully sanitized and validated contact form submission.
///
/// Instances only exist for the duration of one request: they are parsed from
/// the raw form fields, used to compose the notification email and the audit
/// log line, and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: SubmissionName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub subject: ContactSubject,
    pub message: SubmissionMessage,
}

#[nutype(
    validate(len_char_min = 2, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct SubmissionName(String);

#[nutype(
    validate(len_char_min = 10, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct SubmissionMessage(String);

/// Phone numbers keep the text the user typed; only the digit count is
/// validated (10 to 15 digits after stripping everything else).
#[nutype(
    validate(predicate = valid_phone),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct PhoneNumber(String);

fn valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (10..=15).contains(&digits)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactSubject {
    Reservation,
    Event,
    Feedback,
    General,
}

impl ContactSubject {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reservation => "Reservation",
            Self::Event => "Event",
            Self::Feedback => "Feedback",
            Self::General => "General",
        }
    }
}

impl std::fmt::Display for ContactSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactSubject {
    type Err = InvalidContactSubject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reservation" => Ok(Self::Reservation),
            "event" => Ok(Self::Event),
            "feedback" => Ok(Self::Feedback),
            "general" => Ok(Self::General),
            _ => Err(InvalidContactSubject),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid contact subject")]
pub struct InvalidContactSubject;

/// The contact form fields exactly as they arrive in the request body,
/// before any sanitization or validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl RawContactSubmission {
    /// Sanitizes every field and applies the server-authoritative validation
    /// rules. All rules are evaluated; every failure is reported.
    pub fn parse(self) -> Result<ContactSubmission, SubmissionRejected> {
        let mut errors = Vec::new();

        let name = SubmissionName::try_new(sanitize_field(&self.name))
            .inspect_err(|_| errors.push(SubmissionFieldError::Name))
            .ok();

        // Single-label domains are syntactically fine per RFC but never
        // deliverable here, so a dot in the domain is required.
        let email = sanitize_field(&self.email)
            .parse::<EmailAddress>()
            .ok()
            .filter(|email| email.domain().contains('.'));
        if email.is_none() {
            errors.push(SubmissionFieldError::Email);
        }

        let phone = sanitize_field(&self.phone);
        let phone = if phone.is_empty() {
            None
        } else {
            PhoneNumber::try_new(phone)
                .inspect_err(|_| errors.push(SubmissionFieldError::Phone))
                .ok()
        };

        let subject = sanitize_field(&self.subject)
            .parse::<ContactSubject>()
            .inspect_err(|_| errors.push(SubmissionFieldError::Subject))
            .ok();

        let message = SubmissionMessage::try_new(sanitize_field(&self.message))
            .inspect_err(|_| errors.push(SubmissionFieldError::Message))
            .ok();

        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) if errors.is_empty() => {
                Ok(ContactSubmission {
                    name,
                    email,
                    phone,
                    subject,
                    message,
                })
            }
            _ => Err(SubmissionRejected(errors)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation errors: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
pub struct SubmissionRejected(pub Vec<SubmissionFieldError>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionFieldError {
    #[error("Name must be at least 2 characters long")]
    Name,
    #[error("Please enter a valid email address")]
    Email,
    #[error("Please enter a valid phone number")]
    Phone,
    #[error("Please select a valid subject")]
    Subject,
    #[error("Message must be at least 10 characters long")]
    Message,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn raw() -> RawContactSubmission {
        RawContactSubmission {
            name: "Max Mustermann".into(),
            email: "max.mustermann@example.de".into(),
            phone: "".into(),
            subject: "reservation".into(),
            message: "A table for two, please.".into(),
        }
    }

    #[test]
    fn parse_valid_submission() {
        let submission = raw().parse().unwrap();
        assert_eq!(&*submission.name, "Max Mustermann");
        assert_eq!(submission.email.as_str(), "max.mustermann@example.de");
        assert_eq!(submission.phone, None);
        assert_eq!(submission.subject, ContactSubject::Reservation);
        assert_eq!(&*submission.message, "A table for two, please.");
    }

    #[test]
    fn parse_trims_fields() {
        let submission = RawContactSubmission {
            name: "  Max Mustermann  ".into(),
            message: "  A table for two, please.  ".into(),
            ..raw()
        }
        .parse()
        .unwrap();
        assert_eq!(&*submission.name, "Max Mustermann");
        assert_eq!(&*submission.message, "A table for two, please.");
    }

    #[test]
    fn reject_short_name() {
        for name in ["", "x", "  x  "] {
            let err = RawContactSubmission {
                name: name.into(),
                ..raw()
            }
            .parse()
            .unwrap_err();
            assert_eq!(err.0, [SubmissionFieldError::Name]);
        }
    }

    #[test]
    fn reject_invalid_email() {
        for email in ["", "not-an-email", "missing@domain", "@example.com"] {
            let err = RawContactSubmission {
                email: email.into(),
                ..raw()
            }
            .parse()
            .unwrap_err();
            assert_eq!(err.0, [SubmissionFieldError::Email]);
        }
    }

    #[test]
    fn phone_digit_count_bounds() {
        let parse = |phone: &str| {
            RawContactSubmission {
                phone: phone.into(),
                ..raw()
            }
            .parse()
        };

        assert!(parse("").is_ok());
        assert!(parse("123456789").is_err());
        assert!(parse("1234567890").is_ok());
        assert!(parse("(555) 123-4567").is_ok());
        assert!(parse("123456789012345").is_ok());
        assert!(parse("1234567890123456").is_err());
    }

    #[test]
    fn reject_unknown_subject() {
        for subject in ["", "marketing", "Reservation"] {
            let err = RawContactSubmission {
                subject: subject.into(),
                ..raw()
            }
            .parse()
            .unwrap_err();
            assert_eq!(err.0, [SubmissionFieldError::Subject]);
        }
    }

    #[test]
    fn reject_short_message() {
        let err = RawContactSubmission {
            message: "too short".into(),
            ..raw()
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.0, [SubmissionFieldError::Message]);
    }

    #[test]
    fn all_failures_are_collected() {
        let err = RawContactSubmission {
            name: "".into(),
            email: "".into(),
            phone: "123".into(),
            subject: "".into(),
            message: "".into(),
        }
        .parse()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation errors: Name must be at least 2 characters long, \
             Please enter a valid email address, \
             Please enter a valid phone number, \
             Please select a valid subject, \
             Message must be at least 10 characters long"
        );
    }

    #[test]
    fn tags_are_stripped_before_validation() {
        let err = RawContactSubmission {
            name: "<b>J</b>".into(),
            ..raw()
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.0, [SubmissionFieldError::Name]);
    }

    #[test]
    fn subject_display_is_capitalized() {
        assert_eq!(ContactSubject::Reservation.to_string(), "Reservation");
        assert_eq!(ContactSubject::General.to_string(), "General");
    }

    #[test]
    fn subject_serde_roundtrip() {
        for (subject, repr) in [
            (ContactSubject::Reservation, "\"reservation\""),
            (ContactSubject::Event, "\"event\""),
            (ContactSubject::Feedback, "\"feedback\""),
            (ContactSubject::General, "\"general\""),
        ] {
            assert_eq!(serde_json::to_string(&subject).unwrap(), repr);
            assert_eq!(
                serde_json::from_str::<ContactSubject>(repr).unwrap(),
                subject
            );
        }
    }
}
