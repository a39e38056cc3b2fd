//! Core actor directory, follow graph and activity distribution for fedigraph.
//!
//! The [`ActorStore`] is the single owner of every [`Actor`]. Services share
//! it and resolve usernames through it; actors never hold references to one
//! another, only usernames.
//!
//! ```
//! use fedigraph_core::{ActivityType, InMemoryServer, Server};
//!
//! # fn main() -> fedigraph_common::AppResult<()> {
//! let server = InMemoryServer::new("srv");
//! server.register_actor("alice", "Alice Wonderland")?;
//! server.register_actor("bob", "Bob Builder")?;
//!
//! server.follow("bob", "alice")?;
//! server.post("alice", ActivityType::Create, "Hello!")?;
//!
//! assert_eq!(server.inbox("bob")?[0].content(), "Hello!");
//! # Ok(())
//! # }
//! ```

pub mod entities;
pub mod identifier;
pub mod server;
pub mod services;
pub mod store;

pub use entities::{Activity, ActivityType, Actor};
pub use identifier::{Identifier, format_handle};
pub use server::{InMemoryServer, Server};
pub use services::*;
pub use store::{ActorStore, ActorTable};
