//! Lazy pagination over collection endpoints.
//!
//! A [`Cursor`] walks a paginated JSON:API collection one page at a time.
//! Creating a cursor performs no I/O. The first call to
//! [`try_next`](Cursor::try_next) or [`len`](Cursor::len) fetches the first
//! page; later pages are fetched by following `links.next` as the local page
//! runs out. Only one page is held in memory at a time.
//!
//! ```text
//! Unfetched ──first fetch──▶ HasPage ──links.next──▶ HasPage
//!                               │
//!                               └──no next link──▶ Exhausted
//! ```
//!
//! A cursor is forward-only and cannot be rewound. Advancing needs
//! `&mut self`, so one cursor cannot be driven from two places at once.
//!
//! # Example
//!
//! ```rust,ignore
//! use appstoreconnect::rest::ListParams;
//!
//! let mut apps = client.list(&APPS, &ListParams::new());
//! println!("{} apps in total", apps.len().await?);
//!
//! while let Some(app) = apps.try_next().await? {
//!     println!("{app}");
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::clients::AppStoreConnectClient;
use crate::rest::{Resource, ResourceError};

/// Conversion from a decoded envelope into a cursor item.
///
/// Implemented for the untyped [`Resource`] and for
/// [`Typed<A>`](crate::rest::Typed).
pub trait FromResource: Sized {
    /// Converts an envelope into `Self`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the envelope cannot be represented as
    /// `Self`.
    fn from_resource(resource: Resource) -> Result<Self, ResourceError>;
}

impl FromResource for Resource {
    fn from_resource(resource: Resource) -> Result<Self, ResourceError> {
        Ok(resource)
    }
}

enum CursorState {
    Unfetched {
        url: String,
    },
    HasPage {
        page: Vec<Value>,
        index: usize,
        next: Option<String>,
    },
    Exhausted,
}

/// A forward-only, lazily fetched sequence over a paginated collection.
///
/// The cursor borrows the client for `'c` and cannot outlive it.
pub struct Cursor<'c, T = Resource> {
    client: &'c AppStoreConnectClient,
    state: CursorState,
    total: Option<u64>,
    _item: PhantomData<fn() -> T>,
}

impl<'c, T: FromResource> Cursor<'c, T> {
    /// Creates a cursor over the collection at `url`.
    ///
    /// `url` may be relative to the client's base URL or absolute. No
    /// request is made here.
    #[must_use]
    pub fn new(client: &'c AppStoreConnectClient, url: impl Into<String>) -> Self {
        Self {
            client,
            state: CursorState::Unfetched { url: url.into() },
            total: None,
            _item: PhantomData,
        }
    }

    /// Creates a cursor positioned at the start of an already fetched page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the document is not a collection.
    pub fn from_document(
        client: &'c AppStoreConnectClient,
        document: Value,
    ) -> Result<Self, ResourceError> {
        let mut cursor = Self {
            client,
            state: CursorState::Exhausted,
            total: None,
            _item: PhantomData,
        };
        cursor.load_page(document)?;
        Ok(cursor)
    }

    /// Returns the next item, fetching the next page when needed.
    ///
    /// Returns `Ok(None)` once the collection is exhausted, and keeps doing
    /// so on every later call.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if a page fetch fails. The cursor
    /// stays where it was, so the call may be retried. Returns
    /// [`ResourceError::Decode`] if a page or item is malformed.
    pub async fn try_next(&mut self) -> Result<Option<T>, ResourceError> {
        loop {
            let url = match &mut self.state {
                CursorState::Exhausted => return Ok(None),
                CursorState::Unfetched { url } => Some(url.clone()),
                CursorState::HasPage { page, index, next } => {
                    if let Some(item) = page.get_mut(*index) {
                        let raw = item.take();
                        *index += 1;
                        return T::from_resource(Resource::from_value(raw)?).map(Some);
                    }
                    next.clone()
                }
            };

            match url {
                Some(url) => self.fetch_page(&url).await?,
                None => {
                    tracing::trace!("Cursor exhausted");
                    self.state = CursorState::Exhausted;
                }
            }
        }
    }

    /// Returns the total number of items across all pages, as reported by
    /// the server in `meta.paging.total`.
    ///
    /// Fetches the first page if it has not been fetched yet. The cursor's
    /// position is not affected: iterating afterwards still starts at the
    /// first item.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the first page cannot be fetched.
    pub async fn len(&mut self) -> Result<u64, ResourceError> {
        if let Some(total) = self.total {
            return Ok(total);
        }
        if let CursorState::Unfetched { url } = &self.state {
            let url = url.clone();
            self.fetch_page(&url).await?;
        }
        Ok(self.total.unwrap_or(0))
    }

    /// Returns `true` if the server reports no items.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the first page cannot be fetched.
    pub async fn is_empty(&mut self) -> Result<bool, ResourceError> {
        Ok(self.len().await? == 0)
    }

    /// Drains the remaining items into a `Vec`, fetching every page.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub async fn try_collect(mut self) -> Result<Vec<T>, ResourceError> {
        let mut items = Vec::new();
        while let Some(item) = self.try_next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Returns `true` once every page has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.state, CursorState::Exhausted)
    }

    async fn fetch_page(&mut self, url: &str) -> Result<(), ResourceError> {
        tracing::debug!(%url, "Fetching page");
        let document = self.client.get_json(url).await?;
        self.load_page(document)
    }

    fn load_page(&mut self, mut document: Value) -> Result<(), ResourceError> {
        let page = match document.get_mut("data").map(Value::take) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => return Err(ResourceError::decode("expected an array in `data`")),
        };

        let next = document
            .pointer("/links/next")
            .and_then(Value::as_str)
            .filter(|link| !link.is_empty())
            .map(ToString::to_string);

        if self.total.is_none() {
            self.total = Some(
                document
                    .pointer("/meta/paging/total")
                    .and_then(Value::as_u64)
                    .unwrap_or(0),
            );
        }

        tracing::debug!(items = page.len(), has_next = next.is_some(), "Loaded page");
        self.state = CursorState::HasPage {
            page,
            index: 0,
            next,
        };
        Ok(())
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            CursorState::Unfetched { .. } => "Unfetched",
            CursorState::HasPage { .. } => "HasPage",
            CursorState::Exhausted => "Exhausted",
        };
        f.debug_struct("Cursor")
            .field("state", &state)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}
