use std::collections::VecDeque;

use serde::de::DeserializeOwned;

use super::model::Page;
use crate::errors::Result;
use crate::http::{ApiClient, Method, RequestBody};

/// Lazy iterator over an ARM list, following `nextLink`.
///
/// Pages are fetched on demand. A failed fetch is yielded once as `Err`
/// and ends the sequence. Call the list operation again to restart.
pub struct Pager<'a, T> {
    api: &'a ApiClient,
    next: Option<String>,
    buffer: VecDeque<T>,
}

impl<'a, T: DeserializeOwned> Pager<'a, T> {
    pub(crate) fn new(api: &'a ApiClient, first_url: String) -> Self {
        Self {
            api,
            next: Some(first_url),
            buffer: VecDeque::new(),
        }
    }
}

impl<T: DeserializeOwned> Iterator for Pager<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }

            let url = self.next.take()?;
            match self.api.call::<Page<T>>(Method::Get, &url, RequestBody::Empty) {
                Ok(page) => {
                    self.buffer.extend(page.value);
                    self.next = page.next_link.filter(|link| !link.is_empty());
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "failed to fetch list page");
                    return Some(Err(e));
                }
            }
        }
    }
}
