//! Minimal event multicast: two handlers, priority order decides who runs first.
//!
//! Run with: `cargo run --example basic_event`

use herald::{topic, Event, Extras, Registry};

struct ProductSold {
    items: u32,
}
topic!(ProductSold);
impl Event for ProductSold {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::new();

    ProductSold::subscribe(&registry, 5, |event: &ProductSold, _: &Extras| {
        println!("[inventory] reduce stock by {}", event.items);
        Ok(())
    });

    ProductSold::subscribe(&registry, 1, |event: &ProductSold, _: &Extras| {
        println!("[receipt] {} product(s) sold", event.items);
        Ok(())
    });

    // priority 1 runs before priority 5
    ProductSold { items: 2 }.notify(&registry)?;
    Ok(())
}
