// Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! A library for computing maximum flows on capacitated networks.
//!
//! The flow is computed with a phase based blocking-flow algorithm: each
//! phase restricts the network to a layered auxiliary network of shortest
//! source-sink paths, eliminates nodes that cannot pass flow and routes
//! the smallest remaining node throughput through a bottleneck node. The
//! progress of the computation can be observed through the exporters in
//! [`export`].
//!
//! # Example
//!
//! ```
//! use rs_maxflow::maxflow::mpm;
//! use rs_maxflow::Net;
//!
//! let g = Net::from_arcs(
//!     4,
//!     vec![(0, 1, 3.0), (0, 2, 2.0), (1, 3, 2.0), (2, 3, 3.0), (1, 2, 1.0)],
//! );
//!
//! let (value, _, _) = mpm(&g, g.id2node(0), g.id2node(3));
//! assert_eq!(value, 5.0);
//! ```

mod num {
    pub use num_traits as traits;
}

// # Data structures

pub mod network;
pub use self::network::{Arc, Network, NetworkBuilder, Node};

pub mod filtered;
pub use self::filtered::AuxNetwork;

/// The default network type.
///
/// A network with up to 2^31 arcs and real valued capacities.
pub type Net = Network<f64>;

// # Algorithms

pub mod maxflow;

// # Reporting

pub mod export;
pub use self::export::{ArcState, Export, Recorder, Reporter, Snapshot};

// # Input

pub mod arclist;
