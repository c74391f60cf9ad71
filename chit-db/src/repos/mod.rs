//! Typed Query Surfaces
//!
//! One module per entity; each extends [`crate::store::Tables`] with the
//! lookups and domain queries its service needs. Mutation beyond simple
//! inserts stays in the service layer.

pub mod card_repo;
pub mod commission_repo;
pub mod payment_repo;
pub mod scheme_repo;
pub mod winner_repo;
