use std::sync::Arc;

use idgen::{Category, CustomData, FieldValue, MemoryStore};

fn main() {
    // Counters kept in memory; use FileStore to keep them across runs
    let generator = Category::Order
        .generator(Arc::new(MemoryStore::new()))
        .unwrap();

    println!("Generated IDs:");
    for _ in 0..3 {
        let id = generator.generate().unwrap();
        let info = generator.parse_id(id).unwrap();
        println!("  {id} {}", serde_json::to_string(&info).unwrap());
    }

    // Pin a field to an explicit value
    let custom: CustomData = [("sequence".to_string(), FieldValue::Int(100))].into();
    let id = generator.generate_with(&custom).unwrap();
    println!("\nWith sequence pinned to 100:");
    println!("  {id} {}", serde_json::to_string(&generator.parse_id(id).unwrap()).unwrap());

    // Individual components straight from the layout
    let layout = generator.layout();
    println!("\nComponents of {id}:");
    for (index, slot) in layout.slots().iter().enumerate() {
        println!(
            "  {}: {} ({} bits at shift {})",
            slot.name(),
            layout.extract(id, index).unwrap(),
            slot.bits(),
            slot.shift()
        );
    }
}
