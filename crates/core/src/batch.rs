//! Submission data model.
//!
//! A [`SubmissionBatch`] lives for one submit cycle: it is built from the
//! current form state, validated, appended, and dropped.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Upper bound on the number of employees a single form may declare.
pub const MAX_EMPLOYEES: u32 = 100;

/// One attendee as entered on the form. Identity is its position in the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl EmployeeRecord {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// An ADGE name plus the ordered employee records submitted with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionBatch {
    pub adge_name: String,
    pub records: Vec<EmployeeRecord>,
}

impl SubmissionBatch {
    /// Build a batch from form input, checking that the declared employee
    /// count is in `1..=MAX_EMPLOYEES` and matches the number of records.
    pub fn from_form(
        adge_name: impl Into<String>,
        employee_count: u32,
        records: Vec<EmployeeRecord>,
    ) -> Result<Self, CoreError> {
        if employee_count == 0 || employee_count > MAX_EMPLOYEES {
            return Err(CoreError::BadRequest(format!(
                "Number of employees must be between 1 and {MAX_EMPLOYEES}, got {employee_count}"
            )));
        }
        if records.len() != employee_count as usize {
            return Err(CoreError::BadRequest(format!(
                "Declared {employee_count} employee(s) but received {} record(s)",
                records.len()
            )));
        }

        Ok(Self {
            adge_name: adge_name.into(),
            records,
        })
    }

    /// Rows to append, one per record in order:
    /// `[ADGE Name, Employee Name, Email, Phone]`.
    ///
    /// Values are passed through exactly as entered.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|r| {
                vec![
                    self.adge_name.clone(),
                    r.name.clone(),
                    r.email.clone(),
                    r.phone.clone(),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn record() -> EmployeeRecord {
        EmployeeRecord::new("Ada Lovelace", "ada@example.com", "0501234567")
    }

    #[test]
    fn from_form_accepts_matching_count() {
        let batch = SubmissionBatch::from_form("Finance", 2, vec![record(), record()]).unwrap();
        assert_eq!(batch.adge_name, "Finance");
        assert_eq!(batch.records.len(), 2);
    }

    #[test]
    fn from_form_rejects_zero_count() {
        let err = SubmissionBatch::from_form("Finance", 0, vec![]).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(_));
    }

    #[test]
    fn from_form_rejects_count_over_limit() {
        let records = vec![record(); (MAX_EMPLOYEES + 1) as usize];
        let err = SubmissionBatch::from_form("Finance", MAX_EMPLOYEES + 1, records).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(_));
    }

    #[test]
    fn from_form_rejects_count_mismatch() {
        let err = SubmissionBatch::from_form("Finance", 3, vec![record()]).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(msg) if msg.contains("Declared 3"));
    }

    #[test]
    fn rows_keep_column_and_record_order() {
        let batch = SubmissionBatch::from_form(
            "Ops",
            2,
            vec![
                EmployeeRecord::new("A", "a@b.com", "123456789"),
                EmployeeRecord::new("B", "b@b.com", "987654321"),
            ],
        )
        .unwrap();

        assert_eq!(
            batch.rows(),
            vec![
                vec!["Ops", "A", "a@b.com", "123456789"],
                vec!["Ops", "B", "b@b.com", "987654321"],
            ]
        );
    }

    #[test]
    fn record_deserializes_missing_fields_as_empty() {
        let r: EmployeeRecord = serde_json::from_str(r#"{"name": "A"}"#).unwrap();
        assert_eq!(r.email, "");
        assert_eq!(r.phone, "");
    }
}
