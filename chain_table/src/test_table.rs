#![cfg(test)]
#![allow(missing_docs)]
use crate::{hash_ref, ChainTable};
use hashbrown::HashTable;
use rand::prelude::*;
use std::hash::Hash;

struct CheckedTable<T> {
    dut: ChainTable<T>,
    ref_table: HashTable<T>,
}

impl<T: Hash + Eq + Clone + std::fmt::Debug> CheckedTable<T> {
    fn with_capacity(capacity: usize) -> Self {
        CheckedTable {
            dut: ChainTable::with_capacity(capacity, Default::default(), Default::default()),
            ref_table: HashTable::new(),
        }
    }
    fn insert(&mut self, value: T) -> bool {
        let hash = hash_ref(&value);
        let ref_result = match self
            .ref_table
            .entry(hash, |stored| *stored == value, |stored| hash_ref(stored))
        {
            hashbrown::hash_table::Entry::Occupied(_) => false,
            hashbrown::hash_table::Entry::Vacant(entry) => {
                entry.insert(value.clone());
                true
            }
        };
        let dut_result = self.dut.insert(value);
        assert_eq!(ref_result, dut_result);
        ref_result
    }
    fn find(&self, value: &T) -> Option<&T> {
        let hash = hash_ref(value);
        let ref_result = self.ref_table.find(hash, |stored| stored == value);
        let dut_result = self.dut.find(hash, |stored| stored == value);
        assert_eq!(ref_result, dut_result);
        assert_eq!(self.dut.contains(value), ref_result.is_some());
        ref_result
    }
    fn take(&mut self, value: &T) -> Option<T> {
        let hash = hash_ref(value);
        let ref_result = self
            .ref_table
            .find_entry(hash, |stored| stored == value)
            .ok()
            .map(|entry| entry.remove().0);
        let dut_result = self.dut.take(value);
        assert_eq!(ref_result, dut_result);
        ref_result
    }
    fn reserve(&mut self, additional: usize) {
        let capacity = self.dut.capacity();
        self.dut.reserve(additional);
        assert!(self.dut.capacity() >= capacity);
        self.ref_table.reserve(additional, |stored| hash_ref(stored));
    }
    fn clear(&mut self) {
        self.dut.clear();
        self.ref_table.clear();
    }
    fn check(&self) {
        self.dut.check();
        assert_eq!(self.dut.len(), self.ref_table.len());
        for value in self.ref_table.iter() {
            assert_eq!(self.dut.get(value), Some(value));
        }
    }
}

macro_rules! weighted_choose {
    ($rng:expr, $($name:ident: $weight:expr => $body:expr),+) => {
        {
            enum Branches { $( $name,  )* }
            let weights = [$((Branches::$name, $weight)),+];
            match weights.choose_weighted($rng, |x| x.1).unwrap().0 {
                $(Branches::$name => $body),*
            }
        }
    }
}

fn test_suite<T: Hash + Eq + Clone + std::fmt::Debug, R: Rng + SeedableRng>(
    mut rand_t: impl FnMut(&mut R) -> T,
) {
    let mut rng = R::seed_from_u64(25);
    let mut table: CheckedTable<T> = CheckedTable::with_capacity(rng.gen_range(0..=8));
    let mut max_size = 0;
    let mut max_capacity = 0;
    let verbosity = 1;
    for _ in 0..5000 {
        weighted_choose! {&mut rng,
            Insert: 1.0 => {
                let item = rand_t(&mut rng);
                let result = table.insert(item.clone());
                if verbosity > 0 {
                    println!("inserting {item:?} -> {result:?}");
                }
            },
            InsertPresent: 0.1 => {
                if let Some(item) = table.ref_table.iter().choose(&mut rng).cloned() {
                    let result = table.insert(item.clone());
                    if verbosity > 0 {
                        println!("reinserting {item:?} -> {result:?}");
                    }
                }
            },
            FindPresent: 0.5 => {
                if let Some(item) = table.ref_table.iter().choose(&mut rng).cloned() {
                    let result = table.find(&item);
                    if verbosity > 0 {
                        println!("finding {item:?} -> {result:?}");
                    }
                }
            },
            FindRandom: 0.5 => {
                let item = rand_t(&mut rng);
                let result = table.find(&item);
                if verbosity > 0 {
                    println!("finding {item:?} -> {result:?}");
                }
            },
            TakePresent: 0.3 => {
                if let Some(item) = table.ref_table.iter().choose(&mut rng).cloned() {
                    let result = table.take(&item);
                    if verbosity > 0 {
                        println!("taking {item:?} -> {result:?}");
                    }
                }
            },
            TakeRandom: 0.5 => {
                let item = rand_t(&mut rng);
                let result = table.take(&item);
                if verbosity > 0 {
                    println!("taking {item:?} -> {result:?}");
                }
            },
            Reserve: 0.02 => {
                let additional = rng.gen_range(0..64);
                table.reserve(additional);
                if verbosity > 0 {
                    println!("reserving {additional}");
                }
            },
            Clear: 0.002 => {
                table.clear();
                if verbosity > 0 {
                    println!("clearing");
                }
            },
            Check: 0.15 => {
                table.check();
                if verbosity > 0 {
                    println!("check");
                }
            }
        };
        max_size = std::cmp::max(max_size, table.ref_table.len());
        max_capacity = std::cmp::max(max_capacity, table.dut.capacity());
    }
    table.check();
    println!("max size: {max_size}, max capacity: {max_capacity}");
}

#[test]
fn test_suite_usize() {
    test_suite::<usize, rand_pcg::Pcg64>(|rng| rng.gen::<usize>() >> rng.gen_range(0..usize::BITS));
}

#[test]
fn test_suite_small_range() {
    // few distinct values, so duplicates and removals of present values are frequent
    test_suite::<u8, rand_pcg::Pcg64>(|rng| rng.gen_range(0..40));
}

#[test]
fn test_suite_boxed_usize() {
    test_suite::<Box<usize>, rand_pcg::Pcg64>(|rng| {
        Box::new(rng.gen::<usize>() >> rng.gen_range(0..usize::BITS))
    });
}

#[test]
fn test_suite_string() {
    test_suite::<String, rand_pcg::Pcg64>(|rng| {
        let len = rng.gen_range(4..32);
        String::from_iter((0..len).map(|_| rng.gen_range('!'..'~')))
    });
}

#[test]
fn test_colliding_hashes() {
    // every value lands in the same chain regardless of capacity
    let mut rng = rand_pcg::Pcg64::seed_from_u64(58);
    let mut table = ChainTable::<u32, _, _>::new(|_: &u32| 0u64, |a: &u32, b: &u32| a == b);
    let mut ref_values = Vec::new();
    for _ in 0..500 {
        let value = rng.gen_range(0..1000);
        let inserted = table.insert(value);
        assert_eq!(inserted, !ref_values.contains(&value));
        if inserted {
            ref_values.push(value);
        }
    }
    table.check();
    let stats = table.stats();
    assert_eq!(stats.occupied_buckets, 1);
    assert_eq!(stats.longest_chain, ref_values.len());
    ref_values.shuffle(&mut rng);
    for value in ref_values {
        assert_eq!(table.find(0, |&stored| stored == value), Some(&value));
        assert!(table.remove(&value));
        assert!(table.find(0, |&stored| stored == value).is_none());
    }
    assert!(table.is_empty());
    table.check();
}

#[test]
fn test_from_iter_extend() {
    let rng_start = rand_pcg::Pcg64::seed_from_u64(58);
    let mut rng = rng_start.clone();
    let mut table = (0..1000).map(|_| rng.gen()).collect::<ChainTable<usize>>();
    table.extend((0..1000).map(|_| rng.gen()));
    table.check();
    assert_eq!(table.len(), 2000);
    rng = rng_start.clone();
    assert!((0..2000).all(|_| table.contains(&rng.gen::<usize>())));
}
