//! The in-memory [`PersonStore`] backend.

use std::{collections::BTreeMap, fmt, sync::Arc, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use roster_core::{
  Error, Result,
  person::{Address, NewPerson, Person, PersonId, PersonPatch},
  store::{ListQuery, Page, PersonStore, Stats},
};

/// Records created within this many days count as "recently added".
const RECENT_DAYS: i64 = 7;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

// ─── State ───────────────────────────────────────────────────────────────────

struct Inner {
  /// Insertion order is listing order.
  people:  Vec<Person>,
  next_id: u64,
}

impl Inner {
  fn new() -> Self {
    Self { people: Vec::new(), next_id: 1 }
  }

  fn position(&self, id: &PersonId) -> Option<usize> {
    self.people.iter().position(|p| &p.id == id)
  }
}

/// Search semantics: case-insensitive on name and email, raw substring on
/// national id and phone. `term` is already lower-cased.
fn matches_search(person: &Person, term: &str) -> bool {
  person.name.to_lowercase().contains(term)
    || person.email.to_lowercase().contains(term)
    || person.national_id.contains(term)
    || person.phone.contains(term)
}

fn is_excluded(person: &Person, exclude: Option<&PersonId>) -> bool {
  exclude.is_some_and(|id| &person.id == id)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store held entirely in memory.
///
/// Clones share the same records.
#[derive(Clone)]
pub struct MemoryStore {
  inner:   Arc<Mutex<Inner>>,
  latency: Duration,
  clock:   Clock,
}

impl fmt::Debug for MemoryStore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MemoryStore")
      .field("latency", &self.latency)
      .finish_non_exhaustive()
  }
}

impl Default for MemoryStore {
  fn default() -> Self { Self::new() }
}

impl MemoryStore {
  /// An empty store using the system clock and no artificial latency.
  pub fn new() -> Self {
    Self {
      inner:   Arc::new(Mutex::new(Inner::new())),
      latency: Duration::ZERO,
      clock:   Arc::new(Utc::now),
    }
  }

  /// Sleep for `latency` before every operation, to mimic a remote backend.
  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = latency;
    self
  }

  /// Replace the time source used for ids and timestamps.
  pub fn with_clock<F>(mut self, clock: F) -> Self
  where
    F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
  {
    self.clock = Arc::new(clock);
    self
  }

  async fn simulate_latency(&self) {
    if !self.latency.is_zero() {
      tokio::time::sleep(self.latency).await;
    }
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for MemoryStore {
  type Error = Error;

  async fn create(&self, input: NewPerson) -> Result<Person> {
    self.simulate_latency().await;
    let mut inner = self.inner.lock().await;

    let now = (self.clock)();
    let id = PersonId::new(format!(
      "person_{}_{}",
      inner.next_id,
      now.timestamp_millis()
    ));
    inner.next_id += 1;

    let person = Person {
      id,
      name:        input.name,
      email:       input.email,
      phone:       input.phone,
      national_id: input.national_id,
      birth_date:  input.birth_date,
      address:     Address::from(input.address),
      created_at:  now,
      updated_at:  now,
    };

    inner.people.push(person.clone());
    tracing::debug!(person_id = %person.id, "created person");
    Ok(person)
  }

  async fn get(&self, id: &PersonId) -> Result<Option<Person>> {
    self.simulate_latency().await;
    let inner = self.inner.lock().await;
    Ok(inner.people.iter().find(|p| &p.id == id).cloned())
  }

  async fn list(&self, query: &ListQuery) -> Result<Page<Person>> {
    self.simulate_latency().await;
    let inner = self.inner.lock().await;

    let term = query.search_term().map(str::to_lowercase);
    let matches: Vec<&Person> = inner
      .people
      .iter()
      .filter(|p| term.as_deref().is_none_or(|t| matches_search(p, t)))
      .collect();

    Ok(Page::from_matches(&matches, query).map(Person::clone))
  }

  async fn update(&self, patch: PersonPatch) -> Result<Person> {
    self.simulate_latency().await;
    let mut inner = self.inner.lock().await;

    let idx = inner
      .position(&patch.id)
      .ok_or_else(|| Error::NotFound(patch.id.clone()))?;

    let now = (self.clock)();
    let person = &mut inner.people[idx];
    person.merge(patch);
    person.updated_at = now;

    tracing::debug!(person_id = %person.id, "updated person");
    Ok(person.clone())
  }

  async fn delete(&self, id: &PersonId) -> Result<()> {
    self.simulate_latency().await;
    let mut inner = self.inner.lock().await;

    let idx = inner
      .position(id)
      .ok_or_else(|| Error::NotFound(id.clone()))?;
    inner.people.remove(idx);

    tracing::debug!(person_id = %id, "deleted person");
    Ok(())
  }

  async fn is_email_in_use(
    &self,
    email: &str,
    exclude: Option<&PersonId>,
  ) -> Result<bool> {
    self.simulate_latency().await;
    let inner = self.inner.lock().await;
    let email = email.to_lowercase();
    Ok(
      inner
        .people
        .iter()
        .any(|p| !is_excluded(p, exclude) && p.email.to_lowercase() == email),
    )
  }

  async fn is_national_id_in_use(
    &self,
    national_id: &str,
    exclude: Option<&PersonId>,
  ) -> Result<bool> {
    self.simulate_latency().await;
    let inner = self.inner.lock().await;
    Ok(
      inner
        .people
        .iter()
        .any(|p| !is_excluded(p, exclude) && p.national_id == national_id),
    )
  }

  async fn stats(&self) -> Result<Stats> {
    self.simulate_latency().await;
    let inner = self.inner.lock().await;

    let cutoff = (self.clock)() - TimeDelta::days(RECENT_DAYS);
    let mut by_state_code = BTreeMap::new();
    let mut recently_added = 0;

    for p in &inner.people {
      *by_state_code
        .entry(p.address.state_code.clone())
        .or_insert(0) += 1;
      if p.created_at > cutoff {
        recently_added += 1;
      }
    }

    Ok(Stats {
      total: inner.people.len(),
      by_state_code,
      recently_added,
    })
  }

  async fn clear(&self) -> Result<()> {
    let mut inner = self.inner.lock().await;
    *inner = Inner::new();
    tracing::debug!("cleared store");
    Ok(())
  }
}
