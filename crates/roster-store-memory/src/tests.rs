//! Behavioural tests for `MemoryStore`.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use roster_core::{
  Error,
  person::{AddressPatch, NewAddress, NewPerson, PersonId, PersonPatch},
  store::{ListQuery, PersonStore},
};

use crate::MemoryStore;

fn store() -> MemoryStore { MemoryStore::new() }

/// A clock the test can move by hand.
#[derive(Clone)]
struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

impl ManualClock {
  fn starting_at(secs: i64) -> Self {
    Self(Arc::new(Mutex::new(Utc.timestamp_opt(secs, 0).unwrap())))
  }

  fn now(&self) -> DateTime<Utc> { *self.0.lock().unwrap() }

  fn advance(&self, by: TimeDelta) { *self.0.lock().unwrap() += by; }
}

fn clocked_store(clock: &ManualClock) -> MemoryStore {
  let c = clock.clone();
  MemoryStore::new().with_clock(move || c.now())
}

fn person(name: &str, email: &str, national_id: &str, state_code: &str) -> NewPerson {
  NewPerson {
    name:        name.into(),
    email:       email.into(),
    phone:       "(11) 99999-9999".into(),
    national_id: national_id.into(),
    birth_date:  "1990-05-15".into(),
    address:     NewAddress {
      postal_code: "01310-100".into(),
      number:      "1000".into(),
      street:      Some("Avenida Paulista".into()),
      complement:  Some("Apto 101".into()),
      district:    Some("Bela Vista".into()),
      city:        Some("São Paulo".into()),
      state_name:  Some("São Paulo".into()),
      state_code:  Some(state_code.into()),
    },
  }
}

fn alice() -> NewPerson {
  person("Alice Souza", "alice@example.com", "111.444.777-35", "SP")
}

fn bruno() -> NewPerson {
  let mut p = person("Bruno Lima", "bruno@example.com", "529.982.247-25", "RJ");
  p.phone = "(21) 88888-8888".into();
  p
}

fn query(search: &str, page: usize, limit: usize) -> ListQuery {
  ListQuery { search: search.into(), page, limit }
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_id_and_timestamps() {
  let clock = ManualClock::starting_at(1_700_000_000);
  let s = clocked_store(&clock);

  let p = s.create(alice()).await.unwrap();
  assert_eq!(p.id.as_str(), "person_1_1700000000000");
  assert_eq!(p.created_at, clock.now());
  assert_eq!(p.updated_at, p.created_at);

  let fetched = s.get(&p.id).await.unwrap().unwrap();
  assert_eq!(fetched, p);
}

#[tokio::test]
async fn create_defaults_missing_address_fields() {
  let s = store();
  let mut input = alice();
  input.address = NewAddress {
    postal_code: "01310-100".into(),
    number: "7".into(),
    ..Default::default()
  };

  let p = s.create(input).await.unwrap();
  assert_eq!(p.address.street, "");
  assert_eq!(p.address.city, "");
  assert_eq!(p.address.state_code, "");
  assert_eq!(p.address.complement, None);
}

#[tokio::test]
async fn ids_are_unique() {
  let s = store();
  let a = s.create(alice()).await.unwrap();
  let b = s.create(bruno()).await.unwrap();
  assert_ne!(a.id, b.id);
  assert!(a.id.as_str().starts_with("person_1_"));
  assert!(b.id.as_str().starts_with("person_2_"));
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store();
  assert!(s.get(&PersonId::new("nope")).await.unwrap().is_none());
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_preserves_insertion_order_and_paginates() {
  let s = store();
  for i in 0..25 {
    let mut p = alice();
    p.name = format!("Person {i:02}");
    s.create(p).await.unwrap();
  }

  let page = s.list(&query("", 3, 10)).await.unwrap();
  assert_eq!(page.total, 25);
  assert_eq!(page.total_pages, 3);
  assert_eq!(page.page, 3);
  assert_eq!(page.items.len(), 5);
  assert_eq!(page.items[0].name, "Person 20");

  let beyond = s.list(&query("", 9, 10)).await.unwrap();
  assert!(beyond.items.is_empty());
  assert_eq!(beyond.total, 25);
}

#[tokio::test]
async fn list_empty_store() {
  let page = store().list(&ListQuery::default()).await.unwrap();
  assert_eq!(page.total, 0);
  assert_eq!(page.total_pages, 0);
  assert!(page.items.is_empty());
}

#[tokio::test]
async fn search_is_case_insensitive_on_name_and_email() {
  let s = store();
  s.create(alice()).await.unwrap();
  s.create(bruno()).await.unwrap();

  let by_name = s.list(&query("  ALICE ", 1, 10)).await.unwrap();
  assert_eq!(by_name.total, 1);
  assert_eq!(by_name.items[0].name, "Alice Souza");

  let by_email = s.list(&query("Bruno@Example", 1, 10)).await.unwrap();
  assert_eq!(by_email.total, 1);
  assert_eq!(by_email.items[0].name, "Bruno Lima");
}

#[tokio::test]
async fn search_matches_stored_national_id_and_phone() {
  let s = store();
  s.create(alice()).await.unwrap();
  s.create(bruno()).await.unwrap();

  let by_id = s.list(&query("529.982", 1, 10)).await.unwrap();
  assert_eq!(by_id.total, 1);
  assert_eq!(by_id.items[0].name, "Bruno Lima");

  // Matching is against the stored (formatted) text, not normalised digits.
  let digits_only = s.list(&query("529982", 1, 10)).await.unwrap();
  assert_eq!(digits_only.total, 0);

  let by_phone = s.list(&query("(21)", 1, 10)).await.unwrap();
  assert_eq!(by_phone.total, 1);
}

#[tokio::test]
async fn search_counts_total_before_paging() {
  let s = store();
  for i in 0..7 {
    let mut p = alice();
    p.name = format!("Maria {i}");
    s.create(p).await.unwrap();
  }
  s.create(bruno()).await.unwrap();

  let page = s.list(&query("maria", 2, 5)).await.unwrap();
  assert_eq!(page.total, 7);
  assert_eq!(page.total_pages, 2);
  assert_eq!(page.items.len(), 2);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_city_only_changes_city_and_updated_at() {
  let clock = ManualClock::starting_at(1_700_000_000);
  let s = clocked_store(&clock);
  let before = s.create(alice()).await.unwrap();

  clock.advance(TimeDelta::minutes(5));
  let mut patch = PersonPatch::new(before.id.clone());
  patch.address = Some(AddressPatch {
    city: Some("X".into()),
    ..Default::default()
  });
  let after = s.update(patch).await.unwrap();

  assert_eq!(after.address.city, "X");
  assert_eq!(after.updated_at, clock.now());
  assert_eq!(after.created_at, before.created_at);

  let mut expected = before.clone();
  expected.address.city = "X".into();
  expected.updated_at = after.updated_at;
  assert_eq!(after, expected);
}

#[tokio::test]
async fn update_keeps_position() {
  let s = store();
  let a = s.create(alice()).await.unwrap();
  s.create(bruno()).await.unwrap();

  let mut patch = PersonPatch::new(a.id.clone());
  patch.name = Some("Alice Renamed".into());
  s.update(patch).await.unwrap();

  let page = s.list(&ListQuery::default()).await.unwrap();
  assert_eq!(page.items[0].id, a.id);
  assert_eq!(page.items[0].name, "Alice Renamed");
}

#[tokio::test]
async fn update_missing_is_not_found() {
  let s = store();
  let err = s
    .update(PersonPatch::new(PersonId::new("ghost")))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(ref id) if id.as_str() == "ghost"));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_exactly_one() {
  let s = store();
  let a = s.create(alice()).await.unwrap();
  let b = s.create(bruno()).await.unwrap();

  s.delete(&a.id).await.unwrap();

  assert!(s.get(&a.id).await.unwrap().is_none());
  let remaining = s.list(&ListQuery::default()).await.unwrap();
  assert_eq!(remaining.total, 1);
  assert_eq!(remaining.items[0].id, b.id);
}

#[tokio::test]
async fn delete_missing_is_not_found_and_leaves_collection() {
  let s = store();
  s.create(alice()).await.unwrap();

  let err = s.delete(&PersonId::new("ghost")).await.unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
  assert_eq!(s.list(&ListQuery::default()).await.unwrap().total, 1);
}

// ─── Duplicate checks ────────────────────────────────────────────────────────

#[tokio::test]
async fn email_in_use_is_case_insensitive_and_honours_exclusion() {
  let s = store();
  let a = s.create(alice()).await.unwrap();

  let mut b_input = bruno();
  b_input.email = "ALICE@example.com".into();
  let b = s.create(b_input).await.unwrap();

  assert!(s.is_email_in_use(&a.email, None).await.unwrap());
  assert!(s.is_email_in_use(&b.email, Some(&b.id)).await.unwrap());

  s.delete(&b.id).await.unwrap();
  assert!(!s.is_email_in_use(&b.email, Some(&a.id)).await.unwrap());
  assert!(s.is_email_in_use(&a.email, None).await.unwrap());
}

#[tokio::test]
async fn national_id_in_use_is_exact() {
  let s = store();
  let a = s.create(alice()).await.unwrap();

  assert!(s.is_national_id_in_use("111.444.777-35", None).await.unwrap());
  assert!(!s.is_national_id_in_use("11144477735", None).await.unwrap());
  assert!(!s.is_national_id_in_use("111.444.777-35", Some(&a.id)).await.unwrap());
}

// ─── Stats / clear ───────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_counts_states_and_recent_records() {
  let clock = ManualClock::starting_at(1_700_000_000);
  let s = clocked_store(&clock);

  s.create(alice()).await.unwrap();
  clock.advance(TimeDelta::days(8));
  s.create(bruno()).await.unwrap();
  s.create(person("Carla Dias", "carla@example.com", "935.411.347-80", "SP"))
    .await
    .unwrap();

  let stats = s.stats().await.unwrap();
  assert_eq!(stats.total, 3);
  assert_eq!(stats.by_state_code.get("SP"), Some(&2));
  assert_eq!(stats.by_state_code.get("RJ"), Some(&1));
  assert_eq!(stats.recently_added, 2);
}

#[tokio::test]
async fn clear_resets_records_and_ids() {
  let s = store();
  s.create(alice()).await.unwrap();
  s.create(bruno()).await.unwrap();

  s.clear().await.unwrap();
  assert_eq!(s.stats().await.unwrap().total, 0);

  let p = s.create(alice()).await.unwrap();
  assert!(p.id.as_str().starts_with("person_1_"));
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_never_collide() {
  let s = store();
  let handles: Vec<_> = (0..50)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move {
        let mut p = alice();
        p.name = format!("Concurrent {i}");
        s.create(p).await.unwrap().id
      })
    })
    .collect();

  let mut ids = Vec::new();
  for h in handles {
    ids.push(h.await.unwrap());
  }
  ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
  ids.dedup();
  assert_eq!(ids.len(), 50);
  assert_eq!(s.stats().await.unwrap().total, 50);
}

#[tokio::test(start_paused = true)]
async fn simulated_latency_delays_operations() {
  let s = store().with_latency(std::time::Duration::from_millis(500));
  let started = tokio::time::Instant::now();
  s.create(alice()).await.unwrap();
  assert!(started.elapsed() >= std::time::Duration::from_millis(500));
}
