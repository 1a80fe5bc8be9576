//! Domain event sources that publish through the hub.

pub mod review;
pub mod social_graph;

pub use review::ReviewNotifier;
pub use social_graph::{InMemorySocialGraph, SocialGraph};
