//! Dependency binding: supply a collaborator once instead of at every call site.
//!
//! Run with: `cargo run --example inject`

use herald::{topic, Event, Extras, Registry};

#[derive(Clone, Copy, Debug)]
struct FixedClock(u64);

struct JobFinished {
    job: &'static str,
}
topic!(JobFinished);
impl Event for JobFinished {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::new();

    // declares a "clock" parameter; the binder will fill it in
    JobFinished::subscribe_with_params(
        &registry,
        0,
        &["clock"],
        |event: &JobFinished, extras: &Extras| {
            let at = extras.get::<FixedClock>("clock").copied();
            println!("job '{}' finished at {:?}", event.job, at);
            Ok(())
        },
    );

    JobFinished::inject_dependencies(&registry, &Extras::new().with("clock", FixedClock(1_700_000_000)));

    // no clock supplied here; the bound one arrives
    JobFinished { job: "backup" }.notify(&registry)?;
    Ok(())
}
