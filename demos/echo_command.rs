//! Command round trip: exactly one handler, the reply comes back to the caller.
//!
//! Run with: `cargo run --example echo_command`

use herald::{topic, Command, Extras, Registry};

struct Echo {
    text: String,
}
topic!(Echo);
impl Command for Echo {
    type Reply = String;
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::new();

    Echo::subscribe(&registry, |cmd: &Echo, _: &Extras| Ok(cmd.text.to_uppercase()))?;

    // a second handler is rejected; the first stays sole
    let rejected = Echo::subscribe(&registry, |cmd: &Echo, _: &Extras| Ok(cmd.text.clone()));
    println!("second subscribe: {:?}", rejected.err().map(|e| e.as_label()));

    let reply = Echo { text: "hello".into() }.execute(&registry)?;
    println!("reply: {reply}");
    Ok(())
}
