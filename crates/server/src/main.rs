//! Fedigraph demo entry point.
//!
//! Builds an in-memory server from configuration, registers two actors,
//! wires a follow relationship in each direction and shows where a post ends up.

use fedigraph_common::Config;
use fedigraph_common::config::LoggingConfig;
use fedigraph_core::{ActivityType, InMemoryServer, Server};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_tracing(&config.logging);

    let server = InMemoryServer::from_config(&config);
    info!(server = %server.name(), base_url = %server.base_url(), "Starting fedigraph");

    server.register_actor("alice", "Alice Wonderland")?;
    server.register_actor("bob", "Bob Builder")?;

    println!("Actors created:");
    for actor in server.list_actors() {
        println!("  {} ({})", actor.handle(), actor.display_name());
    }

    server.follow("alice", "bob")?;
    server.follow("bob", "alice")?;
    println!(
        "\nAlice follows Bob? {}",
        server.is_following("alice", "bob")
    );
    println!("Bob follows Alice? {}", server.is_following("bob", "alice"));

    let post = server.post("alice", ActivityType::Create, "Hello ActivityPub!")?;
    println!("\nActivity created: {}", post.content());
    println!("{}", serde_json::to_string_pretty(&server.render(&post))?);

    println!("\nAlice's outbox:");
    for activity in server.outbox("alice")? {
        println!("  {}", activity.content());
    }

    println!("\nBob's inbox:");
    for activity in server.inbox("bob")? {
        println!("  {}", activity.content());
    }

    Ok(())
}
