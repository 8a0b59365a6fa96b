/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! A capacitated directed network.
//!
//! The network is a static arena of nodes and arcs. Each arc carries an
//! immutable upper bound (its capacity). Nodes and arcs are identified by
//! contiguous indices, parallel arcs are allowed and loops are not
//! prohibited (the flow algorithms simply never route flow over them).
//!
//! Networks are constructed with a [`NetworkBuilder`] and are immutable
//! afterwards.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::Network;
//!
//! let g = Network::<f64>::new_with(|b| {
//!     let u = b.add_node();
//!     let v = b.add_node();
//!     b.add_arc(u, v, 4.0);
//! });
//!
//! assert_eq!(g.num_nodes(), 2);
//! assert_eq!(g.num_arcs(), 1);
//! ```

use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Node of a network.
///
/// This is basically a newtype of the node index.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Node(u32);

impl Node {
    /// Return the index of this node.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Arc of a network.
///
/// This is basically a newtype of the arc index.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Arc(u32);

impl Arc {
    /// Return the index of this arc.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Arc {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Data for a node in a network.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
struct NodeData {
    firstout: u32,
    firstin: u32,
}

/// Data for an arc in a network.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
struct ArcData<F> {
    nodes: [u32; 2],
    upper: F,
}

/// A directed network with static structure and arc capacities.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Network<F> {
    nodes: Vec<NodeData>,
    arcs: Vec<ArcData<F>>,
    // The list of adjacencies. This list contains the arc slots in a
    // specific order, so that for each node the incident outgoing and
    // incoming arcs are in successive positions. The lowest bit of a
    // slot denotes an incoming arc.
    adj: Vec<u32>,
}

impl<F> Network<F> {
    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of arcs.
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Return an iterator over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = Node> {
        (0..self.nodes.len() as u32).map(Node)
    }

    /// Return an iterator over all arcs.
    pub fn arcs(&self) -> impl Iterator<Item = Arc> {
        (0..self.arcs.len() as u32).map(Arc)
    }

    /// Return the source node of an arc.
    pub fn src(&self, a: Arc) -> Node {
        Node(self.arcs[a.index()].nodes[0])
    }

    /// Return the sink node of an arc.
    pub fn snk(&self, a: Arc) -> Node {
        Node(self.arcs[a.index()].nodes[1])
    }

    /// Return the node with index `id`.
    pub fn id2node(&self, id: usize) -> Node {
        debug_assert!(id < self.nodes.len(), "Invalid node id");
        Node(id as u32)
    }

    /// Return the arc with index `id`.
    pub fn id2arc(&self, id: usize) -> Arc {
        debug_assert!(id < self.arcs.len(), "Invalid arc id");
        Arc(id as u32)
    }

    /// Return an iterator over the outgoing arcs of a node.
    ///
    /// The iterator returns each arc together with the node at its head.
    pub fn outarcs(&self, u: Node) -> impl Iterator<Item = (Arc, Node)> + '_ {
        let uid = u.index();
        let beg = self.nodes[uid].firstout as usize;
        let end = self.nodes[uid].firstin as usize;
        self.adj[beg..end].iter().map(move |&slot| self.decode(slot))
    }

    /// Return an iterator over the incoming arcs of a node.
    ///
    /// The iterator returns each arc together with the node at its tail.
    pub fn inarcs(&self, u: Node) -> impl Iterator<Item = (Arc, Node)> + '_ {
        let uid = u.index();
        let beg = self.nodes[uid].firstin as usize;
        let end = self
            .nodes
            .get(uid + 1)
            .map(|n| n.firstout as usize)
            .unwrap_or_else(|| self.adj.len());
        self.adj[beg..end].iter().map(move |&slot| self.decode(slot))
    }

    fn decode(&self, slot: u32) -> (Arc, Node) {
        let aid = (slot >> 1) as usize;
        (Arc(slot >> 1), Node(self.arcs[aid].nodes[1 - (slot & 1) as usize]))
    }

    /// Create a network by passing a builder to the callback `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_maxflow::Network;
    ///
    /// let g = Network::<f64>::new_with(|b| {
    ///     let nodes = b.add_nodes(3);
    ///     b.add_arc(nodes[0], nodes[1], 5.0);
    ///     b.add_arc(nodes[1], nodes[2], 3.0);
    /// });
    ///
    /// assert_eq!(g.num_arcs(), 2);
    /// ```
    pub fn new_with<G>(f: G) -> Self
    where
        G: FnOnce(&mut NetworkBuilder<F>),
    {
        let mut b = NetworkBuilder::new();
        f(&mut b);
        b.into_network()
    }

    /// Create a network from a node count and a list of arc triples.
    ///
    /// Each triple is `(source index, target index, upper bound)` with
    /// 0-based indices. Indices out of `[0, nnodes)` are a programming
    /// error and cause a panic.
    pub fn from_arcs<I>(nnodes: usize, arcs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, F)>,
    {
        Network::new_with(|b| {
            let nodes = b.add_nodes(nnodes);
            for (u, v, upper) in arcs {
                b.add_arc(nodes[u], nodes[v], upper);
            }
        })
    }
}

impl<F> Network<F>
where
    F: Copy,
{
    /// Return the upper bound (capacity) of an arc.
    pub fn upper(&self, a: Arc) -> F {
        self.arcs[a.index()].upper
    }
}

/// A builder for a network.
///
/// The basic task is to arrange the final outgoing and incoming arcs of
/// each node in successive positions of the packed adjacency list.
pub struct NetworkBuilder<F> {
    /// The outgoing and incoming arc slots of each node.
    nodes: Vec<[Vec<u32>; 2]>,

    /// The end nodes and upper bound of each arc.
    arcs: Vec<ArcData<F>>,
}

impl<F> NetworkBuilder<F> {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        NetworkBuilder::with_capacities(0, 0)
    }

    /// Create a new, empty builder with preallocated memory.
    pub fn with_capacities(nnodes: usize, narcs: usize) -> Self {
        NetworkBuilder {
            nodes: Vec::with_capacity(nnodes),
            arcs: Vec::with_capacity(narcs),
        }
    }

    /// Return the current number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the current number of arcs.
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Add a new node.
    pub fn add_node(&mut self) -> Node {
        assert!(self.nodes.len() + 1 < u32::max_value() as usize, "Node capacity exceeded");
        let id = self.nodes.len();
        self.nodes.push([vec![], vec![]]);
        Node(id as u32)
    }

    /// Add `n` new nodes.
    pub fn add_nodes(&mut self, n: usize) -> Vec<Node> {
        (0..n).map(|_| self.add_node()).collect()
    }

    /// Add a new arc with the given upper bound.
    pub fn add_arc(&mut self, u: Node, v: Node, upper: F) -> Arc {
        assert!(
            self.arcs.len() * 2 + 2 < u32::max_value() as usize,
            "Arc capacity exceeded"
        );
        let aid = self.arcs.len() as u32;
        self.arcs.push(ArcData {
            nodes: [u.0, v.0],
            upper,
        });
        self.nodes[u.index()][0].push(aid << 1);
        self.nodes[v.index()][1].push((aid << 1) | 1);
        Arc(aid)
    }

    /// Turn the builder into a network.
    pub fn into_network(self) -> Network<F> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut adj = Vec::with_capacity(self.arcs.len() * 2);

        for [outs, ins] in self.nodes.into_iter() {
            nodes.push(NodeData {
                firstout: adj.len() as u32,
                firstin: (adj.len() + outs.len()) as u32,
            });
            adj.extend(outs);
            adj.extend(ins);
        }

        Network {
            nodes,
            arcs: self.arcs,
            adj,
        }
    }
}

impl<F> Default for NetworkBuilder<F> {
    fn default() -> Self {
        NetworkBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Network;

    fn diamond() -> Network<f64> {
        Network::from_arcs(
            4,
            vec![(0, 1, 3.0), (0, 2, 2.0), (1, 3, 2.0), (2, 3, 3.0), (1, 2, 1.0)],
        )
    }

    #[test]
    fn test_network() {
        let g = diamond();

        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_arcs(), 5);

        for a in g.arcs() {
            let u = g.src(a);
            let v = g.snk(a);
            assert!(g.outarcs(u).any(|(b, w)| b == a && w == v));
            assert!(g.inarcs(v).any(|(b, w)| b == a && w == u));
        }

        let outs: Vec<_> = g.outarcs(g.id2node(0)).map(|(a, v)| (v.index(), g.upper(a))).collect();
        assert_eq!(outs, vec![(1, 3.0), (2, 2.0)]);

        let ins: Vec<_> = g.inarcs(g.id2node(3)).map(|(a, u)| (u.index(), g.upper(a))).collect();
        assert_eq!(ins, vec![(1, 2.0), (2, 3.0)]);

        assert_eq!(g.outarcs(g.id2node(3)).count(), 0);
        assert_eq!(g.inarcs(g.id2node(0)).count(), 0);
    }

    #[test]
    fn test_parallel_arcs() {
        let g = Network::from_arcs(2, vec![(0, 1, 2.0), (0, 1, 3.0)]);

        assert_eq!(g.num_arcs(), 2);
        let uppers: Vec<_> = g.outarcs(g.id2node(0)).map(|(a, _)| g.upper(a)).collect();
        assert_eq!(uppers, vec![2.0, 3.0]);
        assert_eq!(g.inarcs(g.id2node(1)).count(), 2);
    }

    #[test]
    fn test_builder() {
        let g = Network::<f64>::new_with(|b| {
            let u = b.add_node();
            let v = b.add_node();
            let w = b.add_node();
            b.add_arc(u, v, 1.0);
            b.add_arc(v, w, 2.0);
            b.add_arc(u, w, 3.0);
            assert_eq!(b.num_nodes(), 3);
            assert_eq!(b.num_arcs(), 3);
        });

        let mut ends = vec![];
        for a in g.arcs() {
            ends.push((g.src(a).index(), g.snk(a).index()));
        }
        assert_eq!(ends, vec![(0, 1), (1, 2), (0, 2)]);
    }

    #[cfg(feature = "serialize")]
    mod serialize {
        use super::super::Network;

        #[test]
        fn test_serde() {
            let g = Network::from_arcs(3, vec![(0, 1, 5.0), (1, 2, 3.0)]);

            let serialized = serde_json::to_string(&g).unwrap();
            let h: Network<f64> = serde_json::from_str(&serialized).unwrap();

            assert_eq!(g.num_nodes(), h.num_nodes());
            assert_eq!(g.num_arcs(), h.num_arcs());
            for a in g.arcs() {
                let b = h.id2arc(a.index());
                assert_eq!(g.src(a).index(), h.src(b).index());
                assert_eq!(g.snk(a).index(), h.snk(b).index());
                assert_eq!(g.upper(a), h.upper(b));
            }
        }
    }
}
