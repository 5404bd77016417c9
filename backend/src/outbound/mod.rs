//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **credentials**: password digest adapter
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. Business rules stay in the domain.

pub mod credentials;
pub mod persistence;
