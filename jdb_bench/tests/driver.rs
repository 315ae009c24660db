use std::collections::HashMap;

use aok::{OK, Void};
use jdb_bench::{
  Backend, Elem, Error, Handle, Key, KeyMode, Orders,
  backend::{ENTRIES, map},
  cache::Scratch,
  clock::Clock,
  driver::{Driver, teardown},
  op::{Op, Order},
  rnd::Lcg,
};
use log::info;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

fn run_on(
  backend: &mut dyn Backend,
  n: u32,
  order: Order,
) -> jdb_bench::Result<[u32; Op::COUNT]> {
  let clock = Clock::new();
  let mut scratch = Scratch::new(4096);
  let orders = Orders::new(n, KeyMode::Dense, &mut Lcg::default());
  let mut elems = vec![Elem::default(); orders.len()];
  let (insert, search) = orders.keys(order);
  Driver::new(&clock, "test", backend, &mut elems).run(
    &mut scratch,
    order,
    insert,
    search,
  )
}

#[test]
fn every_backend_full_sequence() -> Void {
  for entry in ENTRIES {
    for order in Order::ALL {
      let mut b = (entry.new)(2000);
      let cells = run_on(b.as_mut(), 2000, order)?;
      info!("{} {order} {cells:?}", entry.name);
      assert!(cells[Op::Size.idx()] > 0, "{}", entry.name);
      teardown(entry.name, b)?;
    }
  }
  OK
}

#[test]
fn every_backend_sparse() -> Void {
  let clock = Clock::new();
  let mut scratch = Scratch::new(4096);
  let orders = Orders::new(1000, KeyMode::Sparse, &mut Lcg::default());
  let mut elems = vec![Elem::default(); orders.len()];
  for entry in ENTRIES {
    let mut b = (entry.new)(orders.len());
    let (insert, search) = orders.keys(Order::Random);
    Driver::new(&clock, entry.name, b.as_mut(), &mut elems).run(
      &mut scratch,
      Order::Random,
      insert,
      search,
    )?;
    teardown(entry.name, b)?;
  }
  OK
}

#[test]
fn change_moves_key() -> Void {
  for entry in ENTRIES {
    let mut b = (entry.new)(4);
    let mut elems = vec![Elem::default(); 4];
    for (i, key) in [10, 20, 30, 40].into_iter().enumerate() {
      elems[i].key = key;
      b.insert(&elems, i as Handle, key);
    }
    assert_eq!(b.change(&mut elems, 20, 21), Some(1));
    assert_eq!(elems[1].key, 21);
    assert_eq!(b.find(&elems, 20), None);
    assert_eq!(b.find(&elems, 21), Some(1));
    assert_eq!(b.change(&mut elems, 99, 100), None);
    assert_eq!(b.len(), 4);
    for key in [10, 21, 30, 40] {
      assert!(b.remove(&elems, key).is_some(), "{} {key}", entry.name);
    }
    assert!(b.is_empty());
  }
  OK
}

#[test]
fn map_memory_estimate() -> Void {
  assert_eq!(map::estimate(0), 0);
  assert_eq!(map::estimate(3), 4 * 9 + 16);
  assert_eq!(map::estimate(7), 8 * 9 + 16);
  assert_eq!(map::estimate(100), 128 * 9 + 16);
  OK
}

/// Accepts inserts and forgets them
#[derive(Default)]
struct Forgetful;

impl Backend for Forgetful {
  fn insert(&mut self, _: &[Elem], _: Handle, _: Key) {}
  fn find(&self, _: &[Elem], _: Key) -> Option<Handle> {
    None
  }
  fn remove(&mut self, _: &[Elem], _: Key) -> Option<Handle> {
    None
  }
  fn mem(&self) -> usize {
    0
  }
  fn len(&self) -> usize {
    0
  }
}

/// Answers every lookup with handle 0
#[derive(Default)]
struct Liar(usize);

impl Backend for Liar {
  fn insert(&mut self, _: &[Elem], _: Handle, _: Key) {
    self.0 += 1;
  }
  fn find(&self, _: &[Elem], _: Key) -> Option<Handle> {
    Some(0)
  }
  fn remove(&mut self, _: &[Elem], _: Key) -> Option<Handle> {
    Some(0)
  }
  fn mem(&self) -> usize {
    0
  }
  fn len(&self) -> usize {
    self.0
  }
}

/// Reports removals without unlinking
#[derive(Default)]
struct Leaky(HashMap<Key, Handle>);

impl Backend for Leaky {
  fn insert(&mut self, _: &[Elem], handle: Handle, key: Key) {
    self.0.insert(key, handle);
  }
  fn find(&self, _: &[Elem], key: Key) -> Option<Handle> {
    self.0.get(&key).copied()
  }
  fn remove(&mut self, _: &[Elem], key: Key) -> Option<Handle> {
    self.0.get(&key).copied()
  }
  fn mem(&self) -> usize {
    0
  }
  fn len(&self) -> usize {
    self.0.len()
  }
}

/// Returns handles past the slab
#[derive(Default)]
struct Wild(HashMap<Key, Handle>);

impl Backend for Wild {
  fn insert(&mut self, _: &[Elem], handle: Handle, key: Key) {
    self.0.insert(key, handle + 1_000_000);
  }
  fn find(&self, _: &[Elem], key: Key) -> Option<Handle> {
    self.0.get(&key).copied()
  }
  fn remove(&mut self, _: &[Elem], key: Key) -> Option<Handle> {
    self.0.remove(&key)
  }
  fn mem(&self) -> usize {
    0
  }
  fn len(&self) -> usize {
    self.0.len()
  }
}

/// Finds correctly, removes with a handle past the slab
#[derive(Default)]
struct WildRemove(HashMap<Key, Handle>);

impl Backend for WildRemove {
  fn insert(&mut self, _: &[Elem], handle: Handle, key: Key) {
    self.0.insert(key, handle);
  }
  fn find(&self, _: &[Elem], key: Key) -> Option<Handle> {
    self.0.get(&key).copied()
  }
  fn remove(&mut self, _: &[Elem], key: Key) -> Option<Handle> {
    self.0.remove(&key).map(|h| h + 1_000_000)
  }
  fn mem(&self) -> usize {
    0
  }
  fn len(&self) -> usize {
    self.0.len()
  }
}

#[test]
fn missing_key_is_fatal() -> Void {
  let err = run_on(&mut Forgetful, 100, Order::Forward).unwrap_err();
  assert!(
    matches!(err, Error::NotFound { op: Op::Hit, key: 0x8000_0000, .. }),
    "{err}"
  );
  assert!(!err.is_usage());
  OK
}

#[test]
fn wrong_element_is_fatal() -> Void {
  let err = run_on(&mut Liar::default(), 100, Order::Forward).unwrap_err();
  assert!(
    matches!(
      err,
      Error::KeyMismatch {
        op: Op::Hit,
        expected: 0x8000_0002,
        found: 0x8000_0000,
        ..
      }
    ),
    "{err}"
  );
  OK
}

#[test]
fn present_miss_is_fatal() -> Void {
  // one key: hit passes, then miss lands on element 0
  let err = run_on(&mut Liar::default(), 1, Order::Forward).unwrap_err();
  assert!(
    matches!(err, Error::UnexpectedHit { op: Op::Miss, key: 0x8000_0001, .. }),
    "{err}"
  );
  OK
}

#[test]
fn out_of_range_handle_is_fatal() -> Void {
  let err = run_on(&mut Wild::default(), 10, Order::Random).unwrap_err();
  assert!(matches!(err, Error::BadHandle { op: Op::Hit, .. }), "{err}");
  OK
}

#[test]
fn leftover_elements_fail_teardown() -> Void {
  let mut b: Box<dyn Backend> = Box::new(Leaky::default());
  run_on(b.as_mut(), 100, Order::Random)?;
  let err = teardown("leaky", b).unwrap_err();
  assert!(
    matches!(
      err,
      Error::NotEmpty {
        backend: "leaky",
        len: 200
      }
    ),
    "{err}"
  );
  OK
}

#[test]
fn out_of_range_removal_fails_change() -> Void {
  let err = run_on(&mut WildRemove::default(), 10, Order::Forward).unwrap_err();
  assert!(
    matches!(
      err,
      Error::BadHandle {
        op: Op::Change,
        handle: 1_000_000,
        ..
      }
    ),
    "{err}"
  );
  OK
}
