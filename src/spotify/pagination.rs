use std::future::Future;

use serde_json::Value;

use crate::{
    error::ExportError,
    spotify::client::{FetchFailure, FetchOutcome, clamp_page_size},
};

/// Items gathered from a paged collection.
///
/// `total` is the size the provider declared on the first page, or `None`
/// when even the first page could not be fetched. `interruption` holds the
/// failure that stopped pagination early, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T = Value> {
    pub total: Option<u64>,
    pub items: Vec<T>,
    pub interruption: Option<FetchFailure>,
}

impl<T> Paginated<T> {
    fn unavailable(failure: FetchFailure) -> Self {
        Self {
            total: None,
            items: Vec::new(),
            interruption: Some(failure),
        }
    }

    /// Whether the first page, and with it the declared total, was received.
    pub fn is_available(&self) -> bool {
        self.total.is_some()
    }

    /// Whether exactly the declared number of items was collected.
    pub fn is_complete(&self) -> bool {
        self.interruption.is_none() && self.total == Some(self.items.len() as u64)
    }

    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
            interruption: self.interruption,
        }
    }

    /// Describes why the collection is not complete, for diagnostics.
    pub fn discrepancy(&self) -> Option<String> {
        if self.is_complete() {
            return None;
        }
        let received = self.items.len();
        Some(match (&self.total, &self.interruption) {
            (None, Some(failure)) => format!("collection unavailable: {failure}"),
            (Some(total), Some(failure)) => {
                format!("received {received} of {total} items, stopped by: {failure}")
            }
            (Some(total), None) => format!("received {received} of {total} declared items"),
            (None, None) => format!("received {received} items without a declared total"),
        })
    }
}

/// Walks a paged collection to the end.
///
/// `fetch_page` is called with `(limit, offset)` and must return one page of
/// the collection. The first request at offset 0 learns the declared total;
/// its items are kept, and further pages are requested at offsets that grow
/// by the page size until the total is reached. Items keep the order in which
/// the pages and the provider return them.
///
/// # Request Count
///
/// With `n` declared items and page size `p`, a fully served collection takes
/// `ceil(n / p)` requests. An empty collection (`n = 0`) takes only the first
/// request.
///
/// # Early Termination
///
/// - If the first page fails, the result is empty with `total = None`; no
///   total is guessed.
/// - If a later page fails, has no `items`, or comes back empty while items
///   are still expected, pagination stops and the items collected so far are
///   returned together with the failure in `interruption`.
///
/// Use [`Paginated::is_complete`] and [`Paginated::discrepancy`] to report a
/// partial result; it is never silently treated as complete.
///
/// # Errors
///
/// Only errors the page function returns as `Err` (an authorization failure)
/// are propagated.
///
/// # Example
///
/// ```
/// let playlists = collect_all(
///     move |limit, offset| client.fetch_page("/v1/me/playlists", limit, offset),
///     50,
/// )
/// .await?;
/// ```
pub async fn collect_all<F, Fut>(mut fetch_page: F, page_size: u32) -> Result<Paginated, ExportError>
where
    F: FnMut(u32, u64) -> Fut,
    Fut: Future<Output = Result<FetchOutcome, ExportError>>,
{
    let page_size = clamp_page_size(page_size);

    let (total, mut items) = match fetch_page(page_size, 0).await? {
        FetchOutcome::Data(page) => (page.total, page.items),
        FetchOutcome::Empty { total } => (total, Vec::new()),
        FetchOutcome::Failed(failure) => return Ok(Paginated::unavailable(failure)),
    };

    if total > 0 && items.is_empty() {
        return Ok(Paginated {
            total: Some(total),
            items,
            interruption: Some(empty_page(0)),
        });
    }

    let mut interruption = None;
    let mut offset = u64::from(page_size);
    while offset < total {
        match fetch_page(page_size, offset).await? {
            FetchOutcome::Data(page) => items.extend(page.items),
            FetchOutcome::Empty { .. } => {
                interruption = Some(empty_page(offset));
                break;
            }
            FetchOutcome::Failed(failure) => {
                interruption = Some(failure);
                break;
            }
        }
        offset += u64::from(page_size);
    }

    Ok(Paginated {
        total: Some(total),
        items,
        interruption,
    })
}

fn empty_page(offset: u64) -> FetchFailure {
    FetchFailure::new(
        format!("page at offset {offset}"),
        Some(200),
        "page returned no items before the declared total was reached",
    )
}
