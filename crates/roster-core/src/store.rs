//! The `PersonStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-memory`).
//! Higher layers (`roster-api`, `roster-server`) depend on this abstraction,
//! not on any concrete backend.

use std::{collections::BTreeMap, future::Future, ops::Range};

use serde::{Deserialize, Serialize};

use crate::person::{NewPerson, Person, PersonId, PersonPatch};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`PersonStore::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
  /// Free-text filter over name, email, national id and phone. Blank means
  /// "no filter".
  pub search: String,
  /// 1-based page number. `0` is treated as `1`.
  pub page:   usize,
  pub limit:  usize,
}

impl Default for ListQuery {
  fn default() -> Self {
    Self { search: String::new(), page: 1, limit: 10 }
  }
}

impl ListQuery {
  /// The trimmed search term, or `None` when the query does not filter.
  pub fn search_term(&self) -> Option<&str> {
    let term = self.search.trim();
    (!term.is_empty()).then_some(term)
  }

  /// The page number actually served.
  pub fn effective_page(&self) -> usize { self.page.max(1) }

  /// Index range of the requested page within `total` filtered records,
  /// clamped so that an out-of-range page yields an empty range.
  pub fn window(&self, total: usize) -> Range<usize> {
    let start = (self.effective_page() - 1)
      .saturating_mul(self.limit)
      .min(total);
    let end = start.saturating_add(self.limit).min(total);
    start..end
  }
}

/// `ceil(total / limit)`, with `0` for an empty result or a zero limit.
pub fn total_pages(total: usize, limit: usize) -> usize {
  if limit == 0 { 0 } else { total.div_ceil(limit) }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub items:       Vec<T>,
  /// Number of records matching the filter, across all pages.
  pub total:       usize,
  pub page:        usize,
  pub limit:       usize,
  pub total_pages: usize,
}

impl<T> Page<T> {
  /// Convert every item, keeping the pagination figures.
  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      items:       self.items.into_iter().map(f).collect(),
      total:       self.total,
      page:        self.page,
      limit:       self.limit,
      total_pages: self.total_pages,
    }
  }
}

impl<T: Clone> Page<T> {
  /// Cut the page described by `query` out of the already-filtered
  /// `matches`.
  pub fn from_matches(matches: &[T], query: &ListQuery) -> Self {
    let total = matches.len();
    Self {
      items: matches[query.window(total)].to_vec(),
      total,
      page: query.effective_page(),
      limit: query.limit,
      total_pages: total_pages(total, query.limit),
    }
  }
}

/// Aggregate figures returned by [`PersonStore::stats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
  pub total:          usize,
  /// Record count per two-letter state code.
  pub by_state_code:  BTreeMap<String, usize>,
  /// Records created within the last seven days.
  pub recently_added: usize,
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// What callers need to know about a backend failure.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The targeted record does not exist.
  fn is_not_found(&self) -> bool;
}

/// Abstraction over a person store backend.
///
/// Every operation runs to completion without interleaving with another
/// mutation. Duplicate detection is not enforced here; callers use
/// [`is_email_in_use`](Self::is_email_in_use) and
/// [`is_national_id_in_use`](Self::is_national_id_in_use) before writing.
pub trait PersonStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new person. The store assigns `id`, `created_at` and
  /// `updated_at`.
  fn create(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get<'a>(
    &'a self,
    id: &'a PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// Filter and paginate in insertion order.
  fn list<'a>(
    &'a self,
    query: &'a ListQuery,
  ) -> impl Future<Output = Result<Page<Person>, Self::Error>> + Send + 'a;

  /// Merge `patch` into the stored record and refresh `updated_at`.
  /// Fails with a not-found error if `patch.id` does not exist.
  fn update(
    &self,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Remove a person. Fails with a not-found error if `id` does not exist.
  fn delete<'a>(
    &'a self,
    id: &'a PersonId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Case-insensitive email match against every record except `exclude`.
  fn is_email_in_use<'a>(
    &'a self,
    email: &'a str,
    exclude: Option<&'a PersonId>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Exact national-id match against every record except `exclude`.
  fn is_national_id_in_use<'a>(
    &'a self,
    national_id: &'a str,
    exclude: Option<&'a PersonId>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  fn stats(&self) -> impl Future<Output = Result<Stats, Self::Error>> + Send + '_;

  /// Drop every record and reset id generation. Test/reset affordance.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn query(page: usize, limit: usize) -> ListQuery {
    ListQuery { search: String::new(), page, limit }
  }

  #[test]
  fn total_pages_rounds_up() {
    assert_eq!(total_pages(0, 10), 0);
    assert_eq!(total_pages(1, 10), 1);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(11, 10), 2);
    assert_eq!(total_pages(5, 0), 0);
  }

  #[test]
  fn window_clamps_last_page() {
    assert_eq!(query(3, 10).window(25), 20..25);
    assert_eq!(query(4, 10).window(25), 25..25);
    assert_eq!(query(1, 10).window(0), 0..0);
  }

  #[test]
  fn page_zero_is_first_page() {
    let q = query(0, 2);
    assert_eq!(q.window(5), 0..2);
    let page = Page::from_matches(&[1, 2, 3, 4, 5], &q);
    assert_eq!(page.page, 1);
    assert_eq!(page.items, vec![1, 2]);
  }

  #[test]
  fn blank_search_is_no_filter() {
    let mut q = ListQuery::default();
    assert_eq!(q.search_term(), None);
    q.search = "   ".into();
    assert_eq!(q.search_term(), None);
    q.search = "  ana ".into();
    assert_eq!(q.search_term(), Some("ana"));
  }

  mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
      /// Page size is `min(L, max(0, N - (P-1)*L))` and the page count is
      /// `ceil(N / L)`.
      #[test]
      fn page_length_matches_formula(n in 0usize..200, l in 1usize..50, p in 1usize..20) {
        let records: Vec<usize> = (0..n).collect();
        let page = Page::from_matches(&records, &query(p, l));

        let expected = l.min(n.saturating_sub((p - 1) * l));
        prop_assert_eq!(page.items.len(), expected);
        prop_assert_eq!(page.total, n);
        prop_assert_eq!(page.total_pages, n.div_ceil(l));
        if let Some(first) = page.items.first() {
          prop_assert_eq!(*first, (p - 1) * l);
        }
      }
    }
  }
}
