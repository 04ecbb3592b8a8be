use std::sync::Arc;

use idgen::{
    IdGenerator, MemoryStore, NumberField, SequenceField, TimeField, TimePrecision,
};

fn main() {
    // 17 bits of seconds since midnight, 4 bits of shard, 20 bits of per-shard counter
    let generator = IdGenerator::builder("ticket")
        .field(TimeField::new("clock", 17, TimePrecision::Second))
        .field(NumberField::new("shard", 4).start(1).end(12))
        .field(
            SequenceField::new("serial", 20)
                .start((1, 100))
                .step((1, 5))
                .keys(["clock", "shard"])
                .with_store(Arc::new(MemoryStore::new())),
        )
        .build()
        .unwrap();

    println!("Layout uses {} of 64 bits", generator.total_bits());
    for _ in 0..5 {
        let (id, info) = generator.generate_info().unwrap();
        println!("  {id} {}", serde_json::to_string(&info).unwrap());
    }

    match generator.parse("1") {
        Ok(info) => println!("parsed: {info:?}"),
        Err(e) => println!("parsing 1 fails: {e}"),
    }
}
