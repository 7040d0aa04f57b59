pub mod ids;
pub mod group;
pub mod participant;
pub mod post;

// Re-exports for convenience
pub use ids::Id;
pub use group::{Group, DEFAULT_ADMIN};
pub use participant::{AvatarColor, Participant};
pub use post::{Comment, Like, Post};
