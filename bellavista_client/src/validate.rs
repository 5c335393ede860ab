//! Client-side field validation.
//!
//! Each rule is evaluated independently; the first failure per field is
//! reported. The phone rule checks the raw trimmed length, not the digit
//! count, and has no upper bound. The server re-validates with stricter
//! rules either way.

use crate::{FormFields, EMAIL_REGEX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

pub fn validate(fields: &FormFields) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if fields.name.trim().chars().count() < 2 {
        errors.push(FieldError {
            field: Field::Name,
            message: "Name must be at least 2 characters long",
        });
    }

    if !EMAIL_REGEX.is_match(fields.email.trim()) {
        errors.push(FieldError {
            field: Field::Email,
            message: "Please enter a valid email address",
        });
    }

    let phone = fields.phone.trim();
    if !phone.is_empty() && phone.chars().count() < 10 {
        errors.push(FieldError {
            field: Field::Phone,
            message: "Please enter a valid phone number",
        });
    }

    if fields.subject.is_empty() {
        errors.push(FieldError {
            field: Field::Subject,
            message: "Please select a subject",
        });
    }

    if fields.message.trim().chars().count() < 10 {
        errors.push(FieldError {
            field: Field::Message,
            message: "Message must be at least 10 characters long",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields() -> FormFields {
        FormFields {
            name: "Max Mustermann".into(),
            email: "max.mustermann@example.de".into(),
            phone: "".into(),
            subject: "reservation".into(),
            message: "A table for two, please.".into(),
        }
    }

    #[test]
    fn valid_fields() {
        validate(&fields()).unwrap();
    }

    #[test]
    fn short_name() {
        let errors = validate(&FormFields {
            name: " x ".into(),
            ..fields()
        })
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::Name);
        assert_eq!(errors[0].message, "Name must be at least 2 characters long");
    }

    #[test]
    fn email_pattern() {
        for (email, ok) in [
            ("max.mustermann@example.de", true),
            ("a@b.c", true),
            ("no-at-sign", false),
            ("two words@example.de", false),
            ("missing@dot", false),
            ("", false),
        ] {
            assert_eq!(validate(&FormFields {
                email: email.into(),
                ..fields()
            })
            .is_ok(), ok, "email: {email:?}");
        }
    }

    #[test]
    fn phone_is_optional() {
        validate(&FormFields {
            phone: "".into(),
            ..fields()
        })
        .unwrap();
    }

    #[test]
    fn short_phone() {
        let errors = validate(&FormFields {
            phone: "555-1234".into(),
            ..fields()
        })
        .unwrap_err();
        assert_eq!(errors[0].field, Field::Phone);
    }

    #[test]
    fn missing_subject() {
        let errors = validate(&FormFields {
            subject: "".into(),
            ..fields()
        })
        .unwrap_err();
        assert_eq!(errors[0].message, "Please select a subject");
    }

    #[test]
    fn short_message() {
        let errors = validate(&FormFields {
            message: "too short".into(),
            ..fields()
        })
        .unwrap_err();
        assert_eq!(errors[0].field, Field::Message);
    }

    #[test]
    fn all_failures_are_collected() {
        let errors = validate(&FormFields::default()).unwrap_err();
        assert_eq!(
            errors.iter().map(|e| e.field).collect::<Vec<_>>(),
            [
                Field::Name,
                Field::Email,
                Field::Subject,
                Field::Message
            ]
        );
    }

    /// The client accepts any phone at least 10 characters long, while the
    /// server insists on 10 to 15 digits. These inputs pass here and are
    /// rejected server-side.
    #[test]
    fn phone_rules_disagree_with_server() {
        use bellavista_models::contact::RawContactSubmission;

        for phone in ["123-456-789", "1234567890123456"] {
            validate(&FormFields {
                phone: phone.into(),
                ..fields()
            })
            .unwrap();

            RawContactSubmission {
                name: "Max Mustermann".into(),
                email: "max.mustermann@example.de".into(),
                phone: phone.into(),
                subject: "reservation".into(),
                message: "A table for two, please.".into(),
            }
            .parse()
            .unwrap_err();
        }
    }
}
