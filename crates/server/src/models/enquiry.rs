//! Enquiry domain types and input validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use project_germany_core::{EnquiryId, EnquiryStatus, Interest};

/// Errors raised while validating enquiry input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Public submission missing one of name/email/phone.
    #[error("Please provide name, email, and phone.")]
    MissingRequiredFields,

    /// An update tried to blank out a required field.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Invalid interest: {0}")]
    InvalidInterest(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),
}

/// A stored enquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    #[serde(rename = "_id")]
    pub id: EnquiryId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub interest: Interest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: EnquiryStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/enquiries` as it arrives from the landing page.
///
/// Everything is optional here so a missing field produces the friendly
/// validation message instead of a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct EnquirySubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub interest: Option<String>,
    pub message: Option<String>,
}

/// A validated submission, ready to persist.
///
/// New enquiries always start `pending` with empty notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub interest: Interest,
    pub message: Option<String>,
}

impl TryFrom<EnquirySubmission> for NewEnquiry {
    type Error = ValidationError;

    fn try_from(form: EnquirySubmission) -> Result<Self, Self::Error> {
        let (Some(name), Some(email), Some(phone)) = (
            non_blank(form.name),
            non_blank(form.email),
            non_blank(form.phone),
        ) else {
            return Err(ValidationError::MissingRequiredFields);
        };

        Ok(Self {
            name,
            email,
            phone,
            interest: Interest::parse_or_default(form.interest.as_deref()),
            message: non_blank(form.message),
        })
    }
}

/// Body of `PUT /api/enquiries/{id}`.
///
/// The dashboard sends back the whole record, so unknown keys such as
/// `_id` and `createdAt` are ignored. `null` counts as "not supplied".
#[derive(Debug, Default, Deserialize)]
pub struct EnquiryUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub interest: Option<String>,
    pub message: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// A validated partial update. `None` leaves the stored value untouched.
///
/// Text is trimmed as on submission. `message: Some(None)` clears the message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnquiryPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub interest: Option<Interest>,
    pub message: Option<Option<String>>,
    pub status: Option<EnquiryStatus>,
    pub notes: Option<String>,
}

impl EnquiryPatch {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.interest.is_none()
            && self.message.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }

    /// Overwrite the supplied fields of `enquiry`.
    pub fn apply_to(&self, enquiry: &mut Enquiry) {
        if let Some(name) = &self.name {
            enquiry.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            enquiry.email.clone_from(email);
        }
        if let Some(phone) = &self.phone {
            enquiry.phone.clone_from(phone);
        }
        if let Some(interest) = self.interest {
            enquiry.interest = interest;
        }
        if let Some(message) = &self.message {
            enquiry.message.clone_from(message);
        }
        if let Some(status) = self.status {
            enquiry.status = status;
        }
        if let Some(notes) = &self.notes {
            enquiry.notes.clone_from(notes);
        }
    }
}

impl TryFrom<EnquiryUpdate> for EnquiryPatch {
    type Error = ValidationError;

    fn try_from(update: EnquiryUpdate) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_if_present(update.name, "name")?,
            email: required_if_present(update.email, "email")?,
            phone: required_if_present(update.phone, "phone")?,
            interest: update
                .interest
                .map(|raw| {
                    raw.trim()
                        .parse::<Interest>()
                        .map_err(|_| ValidationError::InvalidInterest(raw))
                })
                .transpose()?,
            message: update.message.map(|m| non_blank(Some(m))),
            status: update
                .status
                .map(|raw| {
                    raw.trim()
                        .parse::<EnquiryStatus>()
                        .map_err(|_| ValidationError::InvalidStatus(raw))
                })
                .transpose()?,
            notes: update.notes.map(|n| n.trim().to_owned()),
        })
    }
}

/// Column the admin list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Name,
    Email,
    Interest,
    Status,
}

impl SortField {
    fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw {
            "createdAt" => Ok(Self::CreatedAt),
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "interest" => Ok(Self::Interest),
            "status" => Ok(Self::Status),
            other => Err(ValidationError::InvalidSortField(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query string of `GET /api/enquiries`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub interest: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Validated list filter and ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnquiryFilter {
    pub status: Option<EnquiryStatus>,
    pub interest: Option<Interest>,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl EnquiryFilter {
    /// Whether `enquiry` passes the status and interest filters.
    #[must_use]
    pub fn matches(&self, enquiry: &Enquiry) -> bool {
        self.status.is_none_or(|s| s == enquiry.status)
            && self.interest.is_none_or(|i| i == enquiry.interest)
    }
}

impl TryFrom<ListQuery> for EnquiryFilter {
    type Error = ValidationError;

    fn try_from(query: ListQuery) -> Result<Self, Self::Error> {
        let status = non_blank(query.status)
            .map(|raw| {
                raw.parse::<EnquiryStatus>()
                    .map_err(|_| ValidationError::InvalidStatus(raw))
            })
            .transpose()?;
        let interest = non_blank(query.interest)
            .map(|raw| {
                raw.parse::<Interest>()
                    .map_err(|_| ValidationError::InvalidInterest(raw))
            })
            .transpose()?;
        let sort_by = non_blank(query.sort_by)
            .map(|raw| SortField::parse(&raw))
            .transpose()?
            .unwrap_or_default();
        // Only an absent `order` defaults; any value but `desc`, even empty, is ascending.
        let order = match query.order.as_deref().map(str::trim) {
            None | Some("desc") => SortOrder::Desc,
            Some(_) => SortOrder::Asc,
        };

        Ok(Self {
            status,
            interest,
            sort_by,
            order,
        })
    }
}

/// One row of the per-interest breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestCount {
    #[serde(rename = "_id")]
    pub interest: Interest,
    pub count: i64,
}

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryStats {
    pub total: i64,
    pub pending: i64,
    pub contacted: i64,
    pub resolved: i64,
    /// Descending by count, ties broken by label.
    pub by_interest: Vec<InterestCount>,
    pub recent_enquiries: i64,
}

/// Sort a per-interest breakdown the way the dashboard lists it.
pub fn sort_interest_counts(counts: &mut [InterestCount]) {
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.interest.label().cmp(b.interest.label()))
    });
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn required_if_present(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Err(ValidationError::EmptyField(field)),
        Some(v) => Ok(Some(v.trim().to_owned())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn submission() -> EnquirySubmission {
        EnquirySubmission {
            name: Some("Aisha Khan".to_string()),
            email: Some("aisha@example.com".to_string()),
            phone: Some("+92 300 1234567".to_string()),
            interest: None,
            message: None,
        }
    }

    fn stored() -> Enquiry {
        Enquiry {
            id: EnquiryId::new(1),
            name: "Aisha Khan".to_string(),
            email: "aisha@example.com".to_string(),
            phone: "+92 300 1234567".to_string(),
            interest: Interest::VisaSupport,
            message: Some("When should I book my appointment?".to_string()),
            status: EnquiryStatus::Pending,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_submission_defaults_interest_to_other() {
        let enquiry = NewEnquiry::try_from(submission()).unwrap();
        assert_eq!(enquiry.interest, Interest::Other);
        assert_eq!(enquiry.message, None);
    }

    #[test]
    fn test_submission_unknown_interest_falls_back_to_other() {
        let form = EnquirySubmission {
            interest: Some("Scholarships".to_string()),
            ..submission()
        };
        assert_eq!(
            NewEnquiry::try_from(form).unwrap().interest,
            Interest::Other
        );
    }

    #[test]
    fn test_submission_requires_name_email_phone() {
        for strip in ["name", "email", "phone"] {
            let mut form = submission();
            match strip {
                "name" => form.name = None,
                "email" => form.email = Some("   ".to_string()),
                _ => form.phone = Some(String::new()),
            }
            assert_eq!(
                NewEnquiry::try_from(form),
                Err(ValidationError::MissingRequiredFields),
                "missing {strip} should be rejected"
            );
        }
    }

    #[test]
    fn test_submission_trims_fields() {
        let form = EnquirySubmission {
            name: Some("  Aisha Khan ".to_string()),
            interest: Some("Visa Support".to_string()),
            message: Some("  ".to_string()),
            ..submission()
        };
        let enquiry = NewEnquiry::try_from(form).unwrap();
        assert_eq!(enquiry.name, "Aisha Khan");
        assert_eq!(enquiry.interest, Interest::VisaSupport);
        assert_eq!(enquiry.message, None);
    }

    #[test]
    fn test_patch_changes_only_supplied_fields() {
        let patch = EnquiryPatch::try_from(EnquiryUpdate {
            status: Some("contacted".to_string()),
            notes: Some("Called on Monday".to_string()),
            ..EnquiryUpdate::default()
        })
        .unwrap();

        let before = stored();
        let mut after = before.clone();
        patch.apply_to(&mut after);

        assert_eq!(after.status, EnquiryStatus::Contacted);
        assert_eq!(after.notes, "Called on Monday");
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.phone, before.phone);
        assert_eq!(after.interest, before.interest);
        assert_eq!(after.message, before.message);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_patch_allows_any_status_transition() {
        let mut enquiry = stored();
        enquiry.status = EnquiryStatus::Resolved;
        let patch = EnquiryPatch {
            status: Some(EnquiryStatus::Pending),
            ..EnquiryPatch::default()
        };
        patch.apply_to(&mut enquiry);
        assert_eq!(enquiry.status, EnquiryStatus::Pending);
    }

    #[test]
    fn test_patch_rejects_invalid_values() {
        let bad_status = EnquiryUpdate {
            status: Some("archived".to_string()),
            ..EnquiryUpdate::default()
        };
        assert_eq!(
            EnquiryPatch::try_from(bad_status),
            Err(ValidationError::InvalidStatus("archived".to_string()))
        );

        let bad_interest = EnquiryUpdate {
            interest: Some("Astronomy".to_string()),
            ..EnquiryUpdate::default()
        };
        assert!(matches!(
            EnquiryPatch::try_from(bad_interest),
            Err(ValidationError::InvalidInterest(_))
        ));

        let blank_name = EnquiryUpdate {
            name: Some(" ".to_string()),
            ..EnquiryUpdate::default()
        };
        assert_eq!(
            EnquiryPatch::try_from(blank_name),
            Err(ValidationError::EmptyField("name"))
        );
    }

    #[test]
    fn test_update_trims_message_and_notes() {
        let update = EnquiryUpdate {
            message: Some("   ".to_string()),
            notes: Some("  Called back  ".to_string()),
            ..EnquiryUpdate::default()
        };
        let patch = EnquiryPatch::try_from(update).unwrap();
        assert_eq!(patch.message, Some(None));
        assert_eq!(patch.notes.as_deref(), Some("Called back"));

        let mut enquiry = stored();
        enquiry.message = Some("Old question".to_string());
        patch.apply_to(&mut enquiry);
        assert_eq!(enquiry.message, None);
        assert_eq!(enquiry.notes, "Called back");

        let update = EnquiryUpdate {
            message: Some(" New question ".to_string()),
            ..EnquiryUpdate::default()
        };
        let patch = EnquiryPatch::try_from(update).unwrap();
        assert_eq!(patch.message, Some(Some("New question".to_string())));
    }

    #[test]
    fn test_update_ignores_echoed_record_fields() {
        let body = serde_json::json!({
            "_id": 1,
            "createdAt": "2026-01-01T00:00:00Z",
            "status": "resolved",
            "notes": null
        });
        let update: EnquiryUpdate = serde_json::from_value(body).unwrap();
        let patch = EnquiryPatch::try_from(update).unwrap();
        assert_eq!(patch.status, Some(EnquiryStatus::Resolved));
        assert_eq!(patch.notes, None);
        assert!(!patch.is_empty());
        assert!(EnquiryPatch::default().is_empty());
    }

    #[test]
    fn test_list_query_defaults() {
        let filter = EnquiryFilter::try_from(ListQuery::default()).unwrap();
        assert_eq!(filter, EnquiryFilter::default());
        assert_eq!(filter.sort_by, SortField::CreatedAt);
        assert_eq!(filter.order, SortOrder::Desc);
    }

    #[test]
    fn test_list_query_parsing() {
        let filter = EnquiryFilter::try_from(ListQuery {
            status: Some("pending".to_string()),
            interest: Some(String::new()),
            sort_by: Some("name".to_string()),
            order: Some("asc".to_string()),
        })
        .unwrap();
        assert_eq!(filter.status, Some(EnquiryStatus::Pending));
        assert_eq!(filter.interest, None);
        assert_eq!(filter.sort_by, SortField::Name);
        assert_eq!(filter.order, SortOrder::Asc);

        let err = EnquiryFilter::try_from(ListQuery {
            sort_by: Some("password".to_string()),
            ..ListQuery::default()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidSortField("password".to_string()));
    }

    #[test]
    fn test_list_query_order_values() {
        let order = |raw: Option<&str>| {
            EnquiryFilter::try_from(ListQuery {
                order: raw.map(String::from),
                ..ListQuery::default()
            })
            .unwrap()
            .order
        };
        assert_eq!(order(None), SortOrder::Desc);
        assert_eq!(order(Some("desc")), SortOrder::Desc);
        assert_eq!(order(Some("asc")), SortOrder::Asc);
        assert_eq!(order(Some("")), SortOrder::Asc);
        assert_eq!(order(Some("newest")), SortOrder::Asc);
    }

    #[test]
    fn test_enquiry_json_shape() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(json["_id"], 1);
        assert_eq!(json["interest"], "Visa Support");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["notes"], "");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_sort_interest_counts() {
        let mut counts = vec![
            InterestCount {
                interest: Interest::Other,
                count: 2,
            },
            InterestCount {
                interest: Interest::VisaSupport,
                count: 5,
            },
            InterestCount {
                interest: Interest::Accommodation,
                count: 2,
            },
        ];
        sort_interest_counts(&mut counts);
        let order: Vec<_> = counts.iter().map(|c| c.interest).collect();
        assert_eq!(
            order,
            vec![Interest::VisaSupport, Interest::Accommodation, Interest::Other]
        );
    }
}
