//! `sc-spatial`: port graph, availability, routing, and table loaders.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `PortGraph` (CSR + availability flags), `PortGraphBuilder`  |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                   |
//! | [`heap`]    | `MinHeap<T>` keyed by `f64` priority                        |
//! | [`loader`]  | CSV/JSON port tables, CSV lane tables                       |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `sc-core` types.        |

pub mod error;
pub mod heap;
pub mod loader;
pub mod network;
pub mod router;


pub use error::{SpatialError, SpatialResult};
pub use heap::MinHeap;
pub use loader::LaneLoadSummary;
pub use network::{Port, PortGraph, PortGraphBuilder};
pub use router::{DijkstraRouter, Route, Router};
