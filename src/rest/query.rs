//! Query string construction for collection endpoints.
//!
//! App Store Connect collections are filtered with `filter[<field>]=<value>`
//! parameters and ordered with `sort=<field>`. [`build_url`] assembles these
//! deterministically: filters appear in insertion order, followed by `sort`,
//! followed by `limit` when [`ListParams`] carries one.
//!
//! Filter and sort values are percent-encoded. Filter keys are inserted
//! verbatim inside the brackets, so they must already be URL-safe field
//! names such as `sku` or `app.id`.
//!
//! # Example
//!
//! ```rust
//! use appstoreconnect::rest::{build_url, Filters};
//!
//! let filters = Filters::new().with("sku", "A").with("name", "B");
//! assert_eq!(
//!     build_url("/v1/apps", Some(&filters), Some("name")),
//!     "/v1/apps?filter[sku]=A&filter[name]=B&sort=name"
//! );
//! ```

use std::fmt::Write;

/// An ordered mapping of filter field to value.
///
/// Insertion order is preserved so the generated URL is deterministic.
/// Setting a field that is already present replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    entries: Vec<(String, String)>,
}

impl Filters {
    /// Creates an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a filter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a filter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Adds a filter only if the field is not set yet.
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.contains(&key) {
            self.entries.push((key, value.into()));
        }
    }

    /// Returns the value of a filter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if the field is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over the filters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Self::new();
        for (key, value) in iter {
            filters.insert(key, value);
        }
        filters
    }
}

/// Parameters for listing a collection.
///
/// # Example
///
/// ```rust
/// use appstoreconnect::rest::{Filters, ListParams};
///
/// let params = ListParams::new()
///     .filters(Filters::new().with("app", "1234"))
///     .sort("-uploadedDate")
///     .limit(50);
/// assert_eq!(
///     params.to_url("/v1/builds"),
///     "/v1/builds?filter[app]=1234&sort=-uploadedDate&limit=50"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Filters, applied in order.
    pub filters: Option<Filters>,
    /// Sort field, prefixed with `-` for descending order.
    pub sort: Option<String>,
    /// Page size requested from the server.
    pub limit: Option<u32>,
}

impl ListParams {
    /// Creates empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filters.
    #[must_use]
    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Sets the sort field.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Builds the collection URL for `base`.
    #[must_use]
    pub fn to_url(&self, base: &str) -> String {
        let mut url = build_url(base, self.filters.as_ref(), self.sort.as_deref());
        if let Some(limit) = self.limit {
            let separator = if url.contains('?') { '&' } else { '?' };
            let _ = write!(url, "{separator}limit={limit}");
        }
        url
    }
}

/// Builds a collection URL from a base path, filters and a sort key.
///
/// Each filter becomes `filter[<key>]=<value>` in insertion order; a
/// non-empty `sort` appends `sort=<sort>`. The first parameter is introduced
/// with `?` and the rest with `&`. Values are percent-encoded.
#[must_use]
pub fn build_url(base: &str, filters: Option<&Filters>, sort: Option<&str>) -> String {
    let mut url = base.to_string();
    let mut separator = if base.contains('?') { '&' } else { '?' };

    if let Some(filters) = filters {
        for (key, value) in filters.iter() {
            let _ = write!(url, "{separator}filter[{key}]={}", urlencoding::encode(value));
            separator = '&';
        }
    }

    if let Some(sort) = sort.filter(|s| !s.is_empty()) {
        let _ = write!(url, "{separator}sort={}", urlencoding::encode(sort));
    }

    url
}
