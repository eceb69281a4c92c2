//! In-process store with the same semantics as [`super::PgStore`].
//!
//! Backs the test suites and `SITE_STORAGE=memory` demo runs. Data is lost
//! when the process exits. Clones share the same data.
//!
//! Text sort columns compare bytewise, like the `COLLATE "C"` ordering
//! `PgStore` uses, so `Zoe` sorts before `adam`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use project_germany_core::{AdminId, Email, EnquiryId, EnquiryStatus, Interest};

use super::{AdminStore, EnquiryStore, RepositoryError};
use crate::models::enquiry::sort_interest_counts;
use crate::models::{
    Admin, Enquiry, EnquiryFilter, EnquiryPatch, EnquiryStats, InterestCount, NewEnquiry,
    SortField, SortOrder,
};

#[derive(Debug, Default)]
struct Inner {
    enquiries: BTreeMap<EnquiryId, Enquiry>,
    admins: BTreeMap<AdminId, (Admin, String)>,
    last_enquiry_id: i32,
    last_admin_id: i32,
}

/// Shared in-memory enquiry and admin store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored enquiries.
    pub async fn enquiry_count(&self) -> usize {
        self.inner.read().await.enquiries.len()
    }
}

fn compare(a: &Enquiry, b: &Enquiry, field: SortField) -> std::cmp::Ordering {
    let primary = match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Interest => a.interest.label().cmp(b.interest.label()),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl EnquiryStore for MemoryStore {
    async fn create(&self, enquiry: NewEnquiry) -> Result<Enquiry, RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.last_enquiry_id += 1;
        let id = EnquiryId::new(inner.last_enquiry_id);

        let stored = Enquiry {
            id,
            name: enquiry.name,
            email: enquiry.email,
            phone: enquiry.phone,
            interest: enquiry.interest,
            message: enquiry.message,
            status: EnquiryStatus::Pending,
            notes: String::new(),
            created_at: Utc::now(),
        };
        inner.enquiries.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list(&self, filter: &EnquiryFilter) -> Result<Vec<Enquiry>, RepositoryError> {
        let inner = self.inner.read().await;
        let mut enquiries: Vec<Enquiry> = inner
            .enquiries
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();

        enquiries.sort_by(|a, b| match filter.order {
            SortOrder::Asc => compare(a, b, filter.sort_by),
            SortOrder::Desc => compare(b, a, filter.sort_by),
        });
        Ok(enquiries)
    }

    async fn get(&self, id: EnquiryId) -> Result<Option<Enquiry>, RepositoryError> {
        Ok(self.inner.read().await.enquiries.get(&id).cloned())
    }

    async fn update(
        &self,
        id: EnquiryId,
        patch: &EnquiryPatch,
    ) -> Result<Option<Enquiry>, RepositoryError> {
        let mut inner = self.inner.write().await;
        Ok(inner.enquiries.get_mut(&id).map(|enquiry| {
            patch.apply_to(enquiry);
            enquiry.clone()
        }))
    }

    async fn delete(&self, id: EnquiryId) -> Result<bool, RepositoryError> {
        Ok(self.inner.write().await.enquiries.remove(&id).is_some())
    }

    async fn stats(&self, recent_since: DateTime<Utc>) -> Result<EnquiryStats, RepositoryError> {
        let inner = self.inner.read().await;
        let mut stats = EnquiryStats {
            total: 0,
            pending: 0,
            contacted: 0,
            resolved: 0,
            by_interest: Vec::new(),
            recent_enquiries: 0,
        };
        let mut by_interest: BTreeMap<&'static str, (Interest, i64)> = BTreeMap::new();

        for enquiry in inner.enquiries.values() {
            stats.total += 1;
            match enquiry.status {
                EnquiryStatus::Pending => stats.pending += 1,
                EnquiryStatus::Contacted => stats.contacted += 1,
                EnquiryStatus::Resolved => stats.resolved += 1,
            }
            if enquiry.created_at >= recent_since {
                stats.recent_enquiries += 1;
            }
            by_interest
                .entry(enquiry.interest.label())
                .or_insert((enquiry.interest, 0))
                .1 += 1;
        }

        stats.by_interest = by_interest
            .into_values()
            .map(|(interest, count)| InterestCount { interest, count })
            .collect();
        sort_interest_counts(&mut stats.by_interest);
        Ok(stats)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn get_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.admins.get(&id).map(|(admin, _)| admin.clone()))
    }

    async fn get_with_password_hash(
        &self,
        username: &str,
    ) -> Result<Option<(Admin, String)>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .admins
            .values()
            .find(|(admin, _)| admin.username == username)
            .cloned())
    }

    async fn exists(&self, username: &str, email: &str) -> Result<bool, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .admins
            .values()
            .any(|(admin, _)| admin.username == username || admin.email.as_str() == email))
    }

    async fn create_admin(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Admin, RepositoryError> {
        let email = Email::parse(email)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid email: {e}")))?;

        let mut inner = self.inner.write().await;
        let taken = inner
            .admins
            .values()
            .any(|(admin, _)| admin.username == username || admin.email == email);
        if taken {
            return Err(RepositoryError::Conflict("admin already exists".to_owned()));
        }

        inner.last_admin_id += 1;
        let admin = Admin {
            id: AdminId::new(inner.last_admin_id),
            username: username.to_owned(),
            email,
            created_at: Utc::now(),
        };
        inner
            .admins
            .insert(admin.id, (admin.clone(), password_hash.to_owned()));
        Ok(admin)
    }

    async fn set_password(&self, id: AdminId, password_hash: &str) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        let (_, hash) = inner
            .admins
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        password_hash.clone_into(hash);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::models::EnquirySubmission;

    fn new_enquiry(name: &str, interest: Option<&str>) -> NewEnquiry {
        NewEnquiry::try_from(EnquirySubmission {
            name: Some(name.to_string()),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            phone: Some("+49 30 1234567".to_string()),
            interest: interest.map(String::from),
            message: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_defaults() {
        let store = MemoryStore::new();
        let first = store.create(new_enquiry("Omar", None)).await.unwrap();
        let second = store.create(new_enquiry("Omar", None)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.status, EnquiryStatus::Pending);
        assert_eq!(first.notes, "");
        assert_eq!(first.interest, Interest::Other);
        assert_eq!(store.enquiry_count().await, 2);
    }

    #[tokio::test]
    async fn test_name_sort_is_bytewise() {
        let store = MemoryStore::new();
        for name in ["adam", "Zoe", "Bea"] {
            store.create(new_enquiry(name, None)).await.unwrap();
        }

        let by_name = EnquiryFilter {
            sort_by: SortField::Name,
            order: SortOrder::Asc,
            ..EnquiryFilter::default()
        };
        let names: Vec<String> = store
            .list(&by_name)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["Bea", "Zoe", "adam"]);
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let store = MemoryStore::new();
        let a = store
            .create(new_enquiry("Ana", Some("Visa Support")))
            .await
            .unwrap();
        let b = store
            .create(new_enquiry("Ben", Some("Accommodation")))
            .await
            .unwrap();
        let c = store
            .create(new_enquiry("Cem", Some("Visa Support")))
            .await
            .unwrap();

        let all = store.list(&EnquiryFilter::default()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);

        let visa = EnquiryFilter {
            interest: Some(Interest::VisaSupport),
            ..EnquiryFilter::default()
        };
        let ids: Vec<_> = store
            .list(&visa)
            .await
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![c.id, a.id]);

        let by_name = EnquiryFilter {
            sort_by: SortField::Name,
            order: SortOrder::Asc,
            ..EnquiryFilter::default()
        };
        let names: Vec<_> = store
            .list(&by_name)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Ben", "Cem"]);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryStore::new();
        let patch = EnquiryPatch {
            status: Some(EnquiryStatus::Resolved),
            ..EnquiryPatch::default()
        };
        assert!(
            store
                .update(EnquiryId::new(99), &patch)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_records() {
        let store = MemoryStore::new();
        store.create(new_enquiry("Ana", None)).await.unwrap();

        assert!(!store.delete(EnquiryId::new(42)).await.unwrap());
        assert_eq!(store.enquiry_count().await, 1);
    }

    #[tokio::test]
    async fn test_stats_totals_match_status_counts() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for (name, interest) in [
            ("Ana", "Visa Support"),
            ("Ben", "Visa Support"),
            ("Cem", "Accommodation"),
            ("Dia", "Other"),
        ] {
            ids.push(store.create(new_enquiry(name, Some(interest))).await.unwrap().id);
        }
        let contacted = EnquiryPatch {
            status: Some(EnquiryStatus::Contacted),
            ..EnquiryPatch::default()
        };
        store.update(ids[0], &contacted).await.unwrap();
        let resolved = EnquiryPatch {
            status: Some(EnquiryStatus::Resolved),
            ..EnquiryPatch::default()
        };
        store.update(ids[1], &resolved).await.unwrap();
        store.delete(ids[3]).await.unwrap();

        let stats = store
            .stats(Utc::now() - Duration::days(7))
            .await
            .unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.total, stats.pending + stats.contacted + stats.resolved);
        assert_eq!(stats.recent_enquiries, 3);
        assert_eq!(
            stats.by_interest.first(),
            Some(&InterestCount {
                interest: Interest::VisaSupport,
                count: 2
            })
        );

        let future = store
            .stats(Utc::now() + Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(future.recent_enquiries, 0);
    }

    #[tokio::test]
    async fn test_admin_uniqueness() {
        let store = MemoryStore::new();
        let admin = store
            .create_admin("huzaifa", "huzaifa@projectgermany.com", "hash")
            .await
            .unwrap();
        assert_eq!(admin.id, AdminId::new(1));

        let same_name = store.create_admin("huzaifa", "other@projectgermany.com", "hash").await;
        assert!(matches!(same_name, Err(RepositoryError::Conflict(_))));

        let same_email = store
            .create_admin("someone", "huzaifa@projectgermany.com", "hash")
            .await;
        assert!(matches!(same_email, Err(RepositoryError::Conflict(_))));

        assert!(store.exists("huzaifa", "x@y.z").await.unwrap());
        assert!(!store.exists("nobody", "x@y.z").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_password() {
        let store = MemoryStore::new();
        let admin = store
            .create_admin("huzaifa", "huzaifa@projectgermany.com", "old")
            .await
            .unwrap();
        store.set_password(admin.id, "new").await.unwrap();

        let (_, hash) = store
            .get_with_password_hash("huzaifa")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hash, "new");
        assert!(matches!(
            store.set_password(AdminId::new(7), "x").await,
            Err(RepositoryError::NotFound)
        ));
    }
}
