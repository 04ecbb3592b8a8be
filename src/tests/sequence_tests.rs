use std::sync::Arc;

use crate::clock::test_clock::TestClock;
use crate::tests::test_utils::{at, order_generator, TempDir};
use crate::*;

fn sequence_of(info: &Info) -> u64 {
    info.get("sequence").and_then(FieldValue::as_int).unwrap()
}

#[test]
fn test_sequence_steps_within_bounds() {
    let clock = TestClock::new(at(2018, 1, 1, 0, 0, 5));
    let generator = order_generator(Arc::new(MemoryStore::new()), clock, 10);

    let (_, first) = generator.generate_info().unwrap();
    let mut prev = sequence_of(&first);
    assert!(prev <= 10000);

    for _ in 0..200 {
        let (_, info) = generator.generate_info().unwrap();
        let next = sequence_of(&info);
        assert!(
            next >= prev + 1 && next <= prev + 10,
            "sequence {} does not follow {} by a step in [1, 10]",
            next,
            prev
        );
        prev = next;
    }
}

#[test]
fn test_sequence_restarts_per_time_key() {
    let clock = TestClock::new(at(2018, 1, 1, 0, 0, 5));
    let store = Arc::new(MemoryStore::new());
    let generator = order_generator(store.clone(), clock.clone(), 11);

    generator.generate().unwrap();
    generator.generate().unwrap();
    clock.set(at(2018, 1, 1, 0, 0, 6));
    generator.generate().unwrap();

    assert_eq!(store.len(), 2);
    assert!(store.get("2018-01-01 00:00:05").unwrap().is_some());
    assert!(store.get("2018-01-01 00:00:06").unwrap().is_some());
}

#[test]
fn test_ids_increase_within_one_second() {
    let clock = TestClock::new(at(2020, 2, 29, 12, 0, 0));
    let generator = order_generator(Arc::new(MemoryStore::new()), clock, 12);

    let mut last = 0;
    for _ in 0..100 {
        let id = generator.generate().unwrap();
        assert!(id > last);
        last = id;
    }
}

#[test]
fn test_counter_overflow_fails_and_keeps_store() {
    let clock = TestClock::new(at(2018, 1, 1, 0, 0, 5));
    let store = Arc::new(MemoryStore::new());
    store.set("2018-01-01 00:00:05", 65535).unwrap();
    let generator = order_generator(store.clone(), clock, 13);

    assert!(matches!(
        generator.generate(),
        Err(IdGenError::Assemble { ref field, .. }) if field == "sequence"
    ));
    assert_eq!(store.get("2018-01-01 00:00:05").unwrap(), Some(65535));
}

#[test]
fn test_counters_survive_generator_restart() {
    let dir = TempDir::new("restart");
    let clock = TestClock::new(at(2018, 1, 1, 0, 0, 5));

    let first = {
        let store = Arc::new(FileStore::open(dir.path(), "order").unwrap());
        let generator = order_generator(store, clock.clone(), 14);
        sequence_of(&generator.generate_info().unwrap().1)
    };

    let store = Arc::new(FileStore::open(dir.path(), "order").unwrap());
    let generator = order_generator(store, clock, 15);
    let second = sequence_of(&generator.generate_info().unwrap().1);

    assert!(second > first && second <= first + 10);
}

#[test]
fn test_unkeyed_sequence_uses_field_name() {
    let store = Arc::new(MemoryStore::new());
    let generator = IdGenerator::builder("plain")
        .field(SequenceField::new("counter", 32).with_store(store.clone()))
        .build()
        .unwrap();

    assert_eq!(generator.generate().unwrap(), 0);
    assert_eq!(generator.generate().unwrap(), 1);
    assert_eq!(store.get("counter").unwrap(), Some(1));
}
