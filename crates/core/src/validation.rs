//! Field validators and the batch validation pass.
//!
//! Validation never short-circuits: every check runs and every violation is
//! reported, so the form can show all inline messages at once.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::batch::SubmissionBatch;

/// Local part, `@`, domain, then at least one `.segment` TLD.
const EMAIL_PATTERN: &str = r"^[\w.-]+@[\w.-]+\.\w+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Shortest accepted phone number, in digits.
pub const PHONE_MIN_DIGITS: usize = 9;
/// Longest accepted phone number, in digits.
pub const PHONE_MAX_DIGITS: usize = 14;

/// Whether `s` has the shape `local@domain.tld`.
///
/// ```
/// use attendance_core::validation::is_valid_email;
///
/// assert!(is_valid_email("a@b.com"));
/// assert!(!is_valid_email("a@b"));
/// ```
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Whether `s` is 9 to 14 ASCII digits with nothing else (no `+`, spaces,
/// or dashes).
pub fn is_valid_phone(s: &str) -> bool {
    let len = s.chars().count();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&len) && s.chars().all(|c| c.is_ascii_digit())
}

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    AdgeName,
    Name,
    Email,
    Phone,
}

/// One failed check. `employee` is the 1-based record index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingField {
        field: Field,
        employee: Option<usize>,
    },
    InvalidEmailFormat {
        employee: usize,
    },
    InvalidPhoneFormat {
        employee: usize,
    },
}

impl Violation {
    pub fn field(&self) -> Field {
        match self {
            Violation::MissingField { field, .. } => *field,
            Violation::InvalidEmailFormat { .. } => Field::Email,
            Violation::InvalidPhoneFormat { .. } => Field::Phone,
        }
    }

    pub fn employee(&self) -> Option<usize> {
        match self {
            Violation::MissingField { employee, .. } => *employee,
            Violation::InvalidEmailFormat { employee }
            | Violation::InvalidPhoneFormat { employee } => Some(*employee),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Violation::MissingField { .. } => "missing_field",
            Violation::InvalidEmailFormat { .. } => "invalid_email_format",
            Violation::InvalidPhoneFormat { .. } => "invalid_phone_format",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingField {
                field: Field::AdgeName,
                ..
            } => write!(f, "The 'Name of ADGE' field is required."),
            Violation::MissingField {
                field,
                employee: Some(i),
            } => write!(f, "{} is required for Employee {i}.", field_label(*field)),
            Violation::MissingField {
                field,
                employee: None,
            } => write!(f, "{} is required.", field_label(*field)),
            Violation::InvalidEmailFormat { employee } => {
                write!(f, "Invalid Email Address for Employee {employee}.")
            }
            Violation::InvalidPhoneFormat { employee } => write!(
                f,
                "Phone Number for Employee {employee} must be {PHONE_MIN_DIGITS} to \
                 {PHONE_MAX_DIGITS} digits (numbers only)."
            ),
        }
    }
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::AdgeName => "Name of ADGE",
        Field::Name => "Full Name",
        Field::Email => "Email Address",
        Field::Phone => "Phone Number",
    }
}

/// Wire shape: `{kind, field, employee, message}`.
impl Serialize for Violation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Violation", 4)?;
        s.serialize_field("kind", self.kind())?;
        s.serialize_field("field", &self.field())?;
        s.serialize_field("employee", &self.employee())?;
        s.serialize_field("message", &self.to_string())?;
        s.end()
    }
}

/// Run every check against the batch and collect all violations.
///
/// Order: ADGE name first, then per record (name, email, phone).
pub fn validate_batch(batch: &SubmissionBatch) -> Vec<Violation> {
    let mut violations = Vec::new();

    if batch.adge_name.trim().is_empty() {
        violations.push(Violation::MissingField {
            field: Field::AdgeName,
            employee: None,
        });
    }

    for (idx, record) in batch.records.iter().enumerate() {
        let employee = idx + 1;

        if record.name.trim().is_empty() {
            violations.push(Violation::MissingField {
                field: Field::Name,
                employee: Some(employee),
            });
        }
        if !is_valid_email(&record.email) {
            violations.push(Violation::InvalidEmailFormat { employee });
        }
        if !is_valid_phone(&record.phone) {
            violations.push(Violation::InvalidPhoneFormat { employee });
        }
    }

    violations
}
