#![allow(missing_docs)] // test only
use chain_table::{hash_value, ChainTable, HashFunction, TryReserveError, DEFAULT_CAPACITY};

/// A value whose hash code is chosen explicitly, to control which slot it lands in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Probe {
    hash: u64,
    id: u32,
}

type ProbeTable = ChainTable<Probe, fn(&Probe) -> u64, fn(&Probe, &Probe) -> bool>;

fn probe_hash(probe: &Probe) -> u64 {
    probe.hash
}

fn probe_eq(a: &Probe, b: &Probe) -> bool {
    a.id == b.id
}

fn probe_table() -> ProbeTable {
    ProbeTable::new(probe_hash, probe_eq)
}

fn probe(id: u32) -> Probe {
    Probe {
        hash: hash_value(id),
        id,
    }
}

#[test]
fn distinct_inserts_are_counted_duplicates_rejected() {
    let mut table = probe_table();
    for id in 0..100 {
        assert!(table.insert(probe(id)));
    }
    for id in 0..100 {
        assert!(!table.insert(probe(id)));
    }
    assert_eq!(table.len(), 100);
}

#[test]
fn insert_then_find() {
    let mut table = probe_table();
    for id in 0..50 {
        let value = probe(id);
        table.insert(value);
        assert_eq!(
            table.find(probe_hash(&value), |stored| probe_eq(stored, &value)),
            Some(&value)
        );
    }
}

#[test]
fn remove_succeeds_once() {
    let mut table = probe_table();
    let value = probe(3);
    assert!(!table.remove(&value));
    table.insert(value);
    assert!(table.remove(&value));
    assert!(!table.remove(&value));
    assert!(table.find(value.hash, |stored| stored.id == 3).is_none());
    assert!(table.is_empty());
}

#[test]
fn take_returns_stored_value() {
    let mut table = probe_table();
    table.insert(Probe { hash: 5, id: 1 });
    // equality is by id, so the lookup value only needs the same hash code and id
    assert_eq!(
        table.take(&Probe { hash: 5, id: 1 }),
        Some(Probe { hash: 5, id: 1 })
    );
    assert_eq!(table.take(&Probe { hash: 5, id: 1 }), None);
}

#[test]
fn growth_keeps_values_findable() {
    let mut table = probe_table();
    let initial = table.capacity();
    assert_eq!(initial, DEFAULT_CAPACITY);
    let count = initial * 3 / 4 + 1;
    let values: Vec<Probe> = (0..count as u32).map(probe).collect();
    for &value in &values {
        table.insert(value);
    }
    assert!(table.capacity() >= 2 * initial);
    for value in &values {
        assert_eq!(table.find(value.hash, |stored| stored.id == value.id), Some(value));
    }
}

#[test]
fn insert_all_remove_all() {
    let mut table = probe_table();
    let values: Vec<Probe> = (0..1000).map(probe).collect();
    for &value in &values {
        assert!(table.insert(value));
    }
    assert_eq!(table.len(), 1000);
    for value in &values {
        assert!(table.remove(value));
    }
    assert_eq!(table.len(), 0);
    for value in &values {
        assert!(!table.contains(value));
        assert!(table.find(value.hash, |stored| stored.id == value.id).is_none());
    }
}

#[test]
fn congruent_hashes_share_slot_one() {
    let mut table = probe_table();
    assert_eq!(table.capacity(), 8);
    let values = [
        Probe { hash: 1, id: 10 },
        Probe { hash: 9, id: 20 },
        Probe { hash: 17, id: 30 },
    ];
    for value in values {
        assert!(table.insert(value));
    }
    assert_eq!(table.len(), 3);
    let stats = table.stats();
    assert_eq!(stats.occupied_buckets, 1);
    assert_eq!(stats.longest_chain, 3);
    for value in &values {
        assert_eq!(table.find(1, |stored| stored.id == value.id), Some(value));
    }
}

#[test]
fn seventh_value_doubles_capacity() {
    let mut table = probe_table();
    let values: Vec<Probe> = (0..7).map(|id| Probe { hash: id as u64, id }).collect();
    for (index, &value) in values.iter().enumerate() {
        table.insert(value);
        let expected = if index < 6 { 8 } else { 16 };
        assert_eq!(table.capacity(), expected);
    }
    for value in &values {
        assert_eq!(table.find(value.hash, |stored| stored.id == value.id), Some(value));
    }
}

#[test]
fn find_uses_predicate_not_equality() {
    let mut table = probe_table();
    table.insert(Probe { hash: 2, id: 1 });
    table.insert(Probe { hash: 2, id: 2 });
    assert_eq!(table.find(2, |stored| stored.id > 1), Some(&Probe { hash: 2, id: 2 }));
    assert_eq!(table.find(2, |_| false), None);
    // a different hash code selects a different chain
    assert_eq!(table.find(3, |_| true), None);
}

#[test]
fn keyed_records() {
    #[derive(Debug, PartialEq)]
    struct Entry {
        key: String,
        payload: Vec<u8>,
    }

    let mut table = ChainTable::new(
        |entry: &Entry| hash_value(entry.key.as_str()),
        |a: &Entry, b: &Entry| a.key == b.key,
    );
    for (key, len) in [("alpha", 1), ("beta", 2), ("gamma", 3)] {
        table.insert(Entry {
            key: key.to_string(),
            payload: vec![0; len],
        });
    }

    let beta = table.find(hash_value("beta"), |entry| entry.key == "beta");
    assert_eq!(beta.map(|entry| entry.payload.len()), Some(2));
    assert!(table
        .find(hash_value("delta"), |entry| entry.key == "delta")
        .is_none());
}

#[test]
fn default_table_uses_hash_and_eq() {
    let mut table: ChainTable<String> = ChainTable::default();
    assert!(table.insert("chain".to_string()));
    assert!(!table.insert("chain".to_string()));
    assert!(table.contains(&"chain".to_string()));
    assert_eq!(
        table.find(hash_value("chain"), |stored| stored == "chain"),
        Some(&"chain".to_string())
    );
    assert_eq!(
        table.hash_function().hash(&"chain".to_string()),
        hash_value("chain")
    );
}

#[test]
fn clear_keeps_capacity() {
    let mut table: ChainTable<u32> = (0..100).collect();
    let capacity = table.capacity();
    table.clear();
    assert!(table.is_empty());
    assert_eq!(table.capacity(), capacity);
    assert!(!table.contains(&5));
    assert!(table.insert(5));
}

#[test]
fn try_insert_and_reserve() {
    let mut table: ChainTable<u32> = ChainTable::default();
    assert!(table.try_reserve(100).is_ok());
    let capacity = table.capacity();
    for value in 0..100 {
        assert!(matches!(table.try_insert(value), Ok(true)));
    }
    assert!(matches!(table.try_insert(0), Ok(false)));
    assert_eq!(table.capacity(), capacity);
    assert_eq!(
        table.try_reserve(usize::MAX),
        Err(TryReserveError::CapacityOverflow)
    );
    assert_eq!(table.len(), 100);
}

#[test]
fn with_capacity_rounds_to_power_of_two() {
    let table = ProbeTable::with_capacity(5, probe_hash, probe_eq);
    assert_eq!(table.capacity(), 8);
    let table = ProbeTable::with_capacity(0, probe_hash, probe_eq);
    assert_eq!(table.capacity(), 1);
    assert_eq!(
        format!("{table:?}"),
        "ChainTable { len: 0, capacity: 1, .. }"
    );
}
