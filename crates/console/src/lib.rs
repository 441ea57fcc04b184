//! Organization aggregation core for the admin console.
//!
//! Owns the canonical in-memory organization collection, derives the metric
//! views the dashboard renders, and coordinates create/update/delete and
//! membership mutations against the admin API. Consumers read the store and
//! derived views; all writes go through [`store::OrganizationStore`].

pub mod error;
pub mod gateway;
pub mod metrics;
pub mod store;

pub use error::{ConsoleError, Result};
pub use gateway::{GraphqlGateway, OrganizationGateway};
pub use metrics::{AggregateMetrics, PlanBreakdownEntry, SizeBucket};
pub use store::OrganizationStore;
