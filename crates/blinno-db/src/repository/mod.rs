//! # Repository Module
//!
//! Postgres implementations of the store traits.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Route handler / EntitlementService                                    │
//! │       │                                                                 │
//! │       │  resources.count_owned(ResourceKind::Product, user_id)         │
//! │       ▼                                                                 │
//! │  ResourceRepository                                                    │
//! │  ├── count_owned(&self, kind, owner)                                   │
//! │  ├── insert_product(&self, owner, product, max_owned)                  │
//! │  └── insert_portfolio(&self, owner, portfolio, max_owned)              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  Postgres (Supabase)                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SubscriptionRepository`](subscription::SubscriptionRepository) - Plan lookup by user
//! - [`ResourceRepository`](resource::ResourceRepository) - Product/portfolio counts and inserts
//! - [`TipRepository`](tip::TipRepository) - Tips and their fee audit rows

pub mod resource;
pub mod subscription;
pub mod tip;
