//! Seed the database with sample enquiries for local development.

use project_germany_core::{EnquiryStatus, Interest};
use project_germany_server::db::{EnquiryStore, PgStore, RepositoryError};
use project_germany_server::models::{EnquiryPatch, NewEnquiry};

use super::connect;

const FIRST_NAMES: [&str; 8] = [
    "Aarav", "Priya", "Mehmet", "Lucia", "Chen", "Amara", "Diego", "Sofia",
];
const LAST_NAMES: [&str; 6] = ["Sharma", "Yilmaz", "Rossi", "Wang", "Okafor", "Garcia"];

/// Insert `count` sample enquiries spread across every interest and status.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn enquiries(count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let store = PgStore::new(connect().await?);

    for i in 0..count {
        let enquiry = sample(i);
        let name = enquiry.name.clone();
        let created = store.create(enquiry).await?;

        let status = pick(&EnquiryStatus::ALL, i);
        if status != EnquiryStatus::Pending {
            let patch = EnquiryPatch {
                status: Some(status),
                notes: Some(format!("Seeded as {status}")),
                ..EnquiryPatch::default()
            };
            store
                .update(created.id, &patch)
                .await?
                .ok_or(RepositoryError::NotFound)?;
        }

        tracing::debug!(id = %created.id, %name, %status, "Seeded enquiry");
    }

    tracing::info!("Seeded {} enquiries", count);
    Ok(())
}

fn sample(i: usize) -> NewEnquiry {
    let first = pick(&FIRST_NAMES, i);
    let last = pick(&LAST_NAMES, i / FIRST_NAMES.len());
    let interest = pick(&Interest::ALL, i);

    NewEnquiry {
        name: format!("{first} {last}"),
        email: format!(
            "{}.{}{i}@example.com",
            first.to_lowercase(),
            last.to_lowercase()
        ),
        phone: format!("+49 151 {:07}", 1_000_000 + i),
        interest,
        message: (i % 3 != 0).then(|| format!("I would like help with {interest}.")),
    }
}

/// The `i`th element, wrapping around.
fn pick<T: Copy + Default>(items: &[T], i: usize) -> T {
    items
        .get(i.checked_rem(items.len()).unwrap_or_default())
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_cover_every_interest() {
        let interests: Vec<Interest> = (0..Interest::ALL.len())
            .map(|i| sample(i).interest)
            .collect();
        assert_eq!(interests, Interest::ALL);
    }

    #[test]
    fn test_samples_have_required_fields() {
        for i in 0..50 {
            let enquiry = sample(i);
            assert!(!enquiry.name.is_empty());
            assert!(enquiry.email.contains('@'));
            assert!(!enquiry.phone.is_empty());
        }
    }
}
