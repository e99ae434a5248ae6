//! Directory paging and top-N ranking over a `DocumentStore`.

use super::model::{DirectoryFilter, Page, ProfileTypeFilter};
use crate::clock::Clock;
use crate::config::{DEFAULT_COLLECTION, DirectorySettings};
use crate::error::{AgoraError, Result};
use crate::profile::{Profile, RankedProfile, fields, opt_in_filter};
use crate::ranking::rank_by_score;
use crate::store::{DocumentQuery, DocumentStore, FieldFilter};
use std::sync::Arc;

/// Read-only directory over the profile collection.
///
/// The underlying store cannot order by `last_public_vote_at` together with
/// arbitrary equality filters, so each page is over-fetched in native order
/// and resorted by recency here.
///
/// # Paging consistency
///
/// `next_cursor` points at the tail of the *unsorted* fetch while the returned
/// items are a resorted subset of it. Records past `page_size` in the resort
/// are skipped, and concurrent writes can shift records between pages, so
/// consecutive pages are neither guaranteed gap-free nor duplicate-free.
///
/// # Unavailable store
///
/// With no store handle, or a store reporting `StoreUnavailable`, reads return
/// an empty result. Callers cannot tell that apart from "no data". Any other
/// store failure is logged and returned as an error.
#[derive(Clone)]
pub struct DirectoryService {
    store: Option<Arc<dyn DocumentStore>>,
    clock: Arc<dyn Clock>,
    collection: String,
    settings: DirectorySettings,
}

impl DirectoryService {
    /// Creates a service reading the default `users` collection.
    ///
    /// Pass `None` as the store when the backend is not configured.
    pub fn new(store: Option<Arc<dyn DocumentStore>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            collection: DEFAULT_COLLECTION.to_string(),
            settings: DirectorySettings::default(),
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_settings(mut self, settings: DirectorySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Whether a store handle is present.
    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub fn settings(&self) -> &DirectorySettings {
        &self.settings
    }

    /// Fetches one directory page.
    ///
    /// Always constrained to opted-in profiles; gender and type filters add
    /// equality constraints. Fetches `page_size + overfetch` records after the
    /// cursor, sorts them by most recent public vote (never-voted last),
    /// keeps the first `page_size`, and sets `next_cursor` only when the raw
    /// fetch returned more than `page_size` records.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when the page size is 0
    /// - store failures other than `StoreUnavailable`
    #[tracing::instrument(skip(self), fields(collection = %self.collection))]
    pub async fn fetch_page(&self, filter: &DirectoryFilter) -> Result<Page> {
        let page_size = filter.page_size.unwrap_or(self.settings.default_page_size);
        if page_size == 0 {
            return Err(AgoraError::invalid_input("page_size must be positive"));
        }

        let Some(store) = self.store.as_ref() else {
            tracing::debug!("No document store configured, returning empty page");
            return Ok(Page::empty());
        };

        let query = DocumentQuery::new(&self.collection)
            .filters(Self::directory_constraints(filter))
            .limit(page_size.saturating_add(self.settings.overfetch))
            .start_after(filter.cursor.clone());

        tracing::debug!(
            filters = query.filters.len(),
            limit = query.limit,
            has_cursor = query.start_after.is_some(),
            "Fetching directory page"
        );

        let batch = match store.query(&query).await {
            Ok(batch) => batch,
            Err(e) => return Self::recover_unavailable(e, Page::empty(), "fetch_page"),
        };

        let fetched = batch.len();
        let next_cursor = if fetched > page_size {
            batch.last_cursor.clone()
        } else {
            None
        };

        let mut items = Self::decode_admitted(&batch.documents, |p| filter.admits(p));
        // Stable: equal timestamps keep native order
        items.sort_by(|a, b| b.last_vote_sort_key().cmp(&a.last_vote_sort_key()));
        items.truncate(page_size);

        tracing::debug!(fetched, returned = items.len(), "Directory page ready");
        Ok(Page { items, next_cursor })
    }

    /// Ranks opted-in profiles of the given type by top score.
    ///
    /// Fetches `limit * top_fetch_multiplier` candidates in native order,
    /// scores them at the clock's current instant, sorts descending and keeps
    /// the first `limit`. Ties keep fetch order.
    #[tracing::instrument(skip(self), fields(collection = %self.collection))]
    pub async fn fetch_top_by_score(
        &self,
        profile_type: ProfileTypeFilter,
        limit: usize,
    ) -> Result<Vec<RankedProfile>> {
        if limit == 0 {
            return Err(AgoraError::invalid_input("limit must be positive"));
        }

        let Some(store) = self.store.as_ref() else {
            tracing::debug!("No document store configured, returning empty ranking");
            return Ok(Vec::new());
        };

        let mut constraints = vec![opt_in_filter()];
        if let Some(is_politician) = profile_type.politician_constraint() {
            constraints.push(FieldFilter::eq(fields::IS_POLITICIAN, is_politician));
        }

        let query = DocumentQuery::new(&self.collection)
            .filters(constraints)
            .limit(limit.saturating_mul(self.settings.top_fetch_multiplier.max(1)));

        let batch = match store.query(&query).await {
            Ok(batch) => batch,
            Err(e) => return Self::recover_unavailable(e, Vec::new(), "fetch_top_by_score"),
        };

        let candidates = Self::decode_admitted(&batch.documents, |p| {
            p.is_eligible() && profile_type.matches(p)
        });
        let ranked = rank_by_score(candidates, self.clock.now(), limit);

        tracing::debug!(
            candidates = batch.len(),
            returned = ranked.len(),
            "Top-N ranking ready"
        );
        Ok(ranked)
    }

    /// Top voters of any type. `None` uses the configured default limit (12).
    pub async fn fetch_top_voters(&self, limit: Option<usize>) -> Result<Vec<RankedProfile>> {
        let limit = limit.unwrap_or(self.settings.top_default_limit);
        self.fetch_top_by_score(ProfileTypeFilter::All, limit).await
    }

    /// Top politicians. `None` uses the configured default limit (12).
    pub async fn fetch_top_politicians(&self, limit: Option<usize>) -> Result<Vec<RankedProfile>> {
        let limit = limit.unwrap_or(self.settings.top_default_limit);
        self.fetch_top_by_score(ProfileTypeFilter::Politician, limit)
            .await
    }

    /// Looks up a single profile for the public profile view.
    ///
    /// Not restricted to opted-in profiles; check `Profile::is_eligible`
    /// before listing the result anywhere.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_profile(&self, id: &str) -> Result<Option<Profile>> {
        let Some(store) = self.store.as_ref() else {
            tracing::debug!("No document store configured, profile lookup skipped");
            return Ok(None);
        };

        match store.get(&self.collection, id).await {
            Ok(document) => Ok(document.map(Profile::from)),
            Err(e) => Self::recover_unavailable(e, None, "fetch_profile"),
        }
    }

    fn directory_constraints(filter: &DirectoryFilter) -> Vec<FieldFilter> {
        let mut constraints = vec![opt_in_filter()];
        if let Some(gender) = filter.gender.gender() {
            constraints.push(FieldFilter::eq(fields::GENDER, gender.to_string()));
        }
        if let Some(is_politician) = filter.profile_type.politician_constraint() {
            constraints.push(FieldFilter::eq(fields::IS_POLITICIAN, is_politician));
        }
        constraints
    }

    /// Decodes documents and drops any the store returned in violation of the
    /// query constraints.
    fn decode_admitted(
        documents: &[crate::store::Document],
        admit: impl Fn(&Profile) -> bool,
    ) -> Vec<Profile> {
        documents
            .iter()
            .map(Profile::from)
            .filter(|profile| {
                let admitted = admit(profile);
                if !admitted {
                    tracing::warn!(
                        profile_id = %profile.id,
                        "Store returned a profile outside the query constraints, dropping it"
                    );
                }
                admitted
            })
            .collect()
    }

    /// Maps `StoreUnavailable` to `fallback`; logs and returns everything else.
    fn recover_unavailable<T>(error: AgoraError, fallback: T, operation: &str) -> Result<T> {
        if error.is_store_unavailable() {
            tracing::warn!(
                operation,
                error = %error,
                "Document store unavailable, returning empty result"
            );
            Ok(fallback)
        } else {
            tracing::error!(
                operation,
                error_kind = error.kind(),
                error = %error,
                "Document store call failed"
            );
            Err(error)
        }
    }
}
