//! A small command dispatcher on top of the word-path tree.
//!
//! Run with `RUST_LOG=trace cargo run --example command_dispatch` to see the
//! tree's trace events.
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use word_path_tree::{GuildKey, ScopedTrees};

type Handler = Arc<dyn Fn(&str) -> String + Send + Sync>;

fn handler(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Handler {
    Arc::new(f)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let scopes: ScopedTrees<Handler> = ScopedTrees::new();
    let key = GuildKey::new(1, "commands");
    let commands = scopes.tree(&key);

    commands.put("", handler(|input| format!("unknown command: {}", input)));
    commands.put("event", handler(|args| format!("listing events ({})", args)));
    commands.put("event create", handler(|args| format!("created event `{}`", args)));
    commands.put("role add", handler(|args| format!("added role {}", args)));

    for input in ["event create standup", "event", "role add @mod", "role", "ping"].iter() {
        if let Some(found) = commands.lookup(input) {
            println!("{:>22} -> [{}] {}", input, found.path, (found.value)(found.rest));
        }
    }

    println!("sub-commands of `event`: {:?}", commands.view("event").words());
    println!("sub-commands of `role`: {:?}", commands.view("role").words());

    commands.remove("role add");
    println!("after removal, `role` exists: {}", commands.view("role").exists());
    println!("registered commands: {}", commands.len());
}
