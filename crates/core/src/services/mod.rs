//! Business logic services.

pub mod directory;
pub mod distribution;
pub mod following;

pub use directory::{DirectoryService, RegisterActorInput};
pub use distribution::DistributionService;
pub use following::FollowingService;
