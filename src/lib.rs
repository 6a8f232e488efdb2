#![no_std]
#![deny(
    warnings,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

//! Classical shortest-path and network-flow algorithms over directed,
//! edge-weighted graphs, for verification and study.
//!
//! The flow engines never mutate the [`FlowNetwork`] they run on: flow
//! assignments and residual graphs are derived values, rebuilt from the
//! store and the current flow after every augmentation.

extern crate alloc;

pub mod algo;
pub mod search;

mod amount;
mod edge;
mod error;
mod flow;
mod id;
mod network;
mod node;
mod path;
mod residual;

pub use crate::amount::Amount;
pub use crate::edge::{Edge, RawEdge};
pub use crate::error::Error;
pub use crate::flow::{flow_cost, flow_value, net_flow, FlowAssignment};
pub use crate::id::NodeId;
pub use crate::network::{EdgeAttrs, FlowNetwork};
pub use crate::node::Node;
pub use crate::path::{path_bottleneck, path_edges};
pub use crate::residual::{augment, ResidualEdge, ResidualGraph};
