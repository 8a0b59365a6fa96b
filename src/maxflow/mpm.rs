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

//! This module implements a phase based max flow algorithm working on
//! layered auxiliary networks.
//!
//! Each phase labels the nodes with their BFS distance from the source,
//! restricts the network to nodes strictly before the sink's level and to
//! arcs advancing exactly one level, repeatedly removes nodes that cannot
//! pass any flow, and routes the smallest remaining node throughput from
//! the bottleneck node forward to the sink and backward to the source.
//! The algorithm stops when the sink becomes unreachable over arcs with
//! remaining capacity.
//!
//! In contrast to the augmenting path algorithms the flow values may be
//! fractional, hence the flow type is only required to be partially
//! ordered.
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
//! let s = g.id2node(0);
//! let t = g.id2node(3);
//!
//! let (value, flow, mut mincut) = mpm(&g, s, t);
//!
//! assert_eq!(value, 5.0);
//! assert!(flow.iter().all(|&(a, f)| f >= 0.0 && f <= g.upper(a)));
//! assert!(g.nodes().filter(|&u| u != s && u != t).all(|u| {
//!     g.outarcs(u).map(|(a, _)| flow[a.index()].1).sum::<f64>() ==
//!     g.inarcs(u).map(|(a, _)| flow[a.index()].1).sum::<f64>()
//! }));
//!
//! mincut.sort_by_key(|u| u.index());
//! assert_eq!(mincut, vec![s]);
//! ```
//!
//! Integral capacities work as well:
//!
//! ```
//! use rs_maxflow::maxflow::Mpm;
//! use rs_maxflow::Network;
//!
//! let g = Network::from_arcs(3, vec![(0, 1, 5), (1, 2, 3)]);
//!
//! let mut alg = Mpm::new(&g);
//! alg.solve(g.id2node(0), g.id2node(2));
//!
//! assert_eq!(alg.value(), 3);
//! ```

use crate::export::Export;
use crate::filtered::AuxNetwork;
use crate::network::{Arc, Network, Node};

use std::collections::VecDeque;
use std::io;

use crate::num::traits::NumAssign;

use log::{debug, trace, warn};

/// The phase based max-flow algorithm.
///
/// This struct contains all algorithmic working data.
pub struct Mpm<'a, F> {
    /// The network the flow problem is solved on.
    net: &'a Network<F>,
    /// Current flow on each arc.
    flow: Vec<F>,
    /// The node mask of the current auxiliary network.
    node_on: Vec<bool>,
    /// The arc mask of the current auxiliary network.
    arc_on: Vec<bool>,
    /// The BFS level of each node, valid within one phase.
    level: Vec<usize>,
    /// The flow requirement of each node during a push or pull step.
    req: Vec<F>,
    /// The queue of nodes for a BFS.
    queue: VecDeque<usize>,
    /// The flow value.
    value: F,
}

impl<'a, F> Mpm<'a, F>
where
    F: NumAssign + PartialOrd + Copy,
{
    /// Return a new algorithm data structure for the network `net`.
    pub fn new(net: &'a Network<F>) -> Self {
        let n = net.num_nodes();
        let m = net.num_arcs();
        Mpm {
            net,
            flow: vec![F::zero(); m],
            node_on: vec![true; n],
            arc_on: vec![true; m],
            level: vec![usize::max_value(); n],
            req: vec![F::zero(); n],
            queue: VecDeque::with_capacity(n),
            value: F::zero(),
        }
    }

    /// Return the underlying network.
    pub fn as_network(&self) -> &'a Network<F> {
        self.net
    }

    /// Return the value of the latest computed maximum flow.
    pub fn value(&self) -> F {
        self.value
    }

    /// Return the flow value on arc `a`.
    pub fn flow(&self, a: Arc) -> F {
        self.flow[a.index()]
    }

    /// Return the remaining capacity of arc `a`.
    pub fn residual(&self, a: Arc) -> F {
        let r = self.net.upper(a) - self.flow[a.index()];
        debug_assert!(r >= F::zero(), "Flow exceeds upper bound");
        r
    }

    /// Solve the max flow problem.
    ///
    /// The method computes the maximum flow from the source node `src` to
    /// the sink node `snk` with the upper bounds stored in the network.
    ///
    /// # Panics
    ///
    /// Panics if `src` and `snk` are the same node.
    pub fn solve(&mut self, src: Node, snk: Node) {
        // the unit exporter performs no I/O
        let _ = self.run::<()>(src, snk, None, false);
    }

    /// Solve the max flow problem and report the progress to an exporter.
    ///
    /// The exporter's step operation is invoked with the auxiliary network
    /// after each completed phase if `steps` is `true`. Its final
    /// operation is invoked exactly once with the full network and the
    /// final flow. An error returned by the exporter aborts the
    /// computation.
    ///
    /// # Panics
    ///
    /// Panics if `src` and `snk` are the same node.
    pub fn solve_with<E>(&mut self, src: Node, snk: Node, export: &mut E, steps: bool) -> io::Result<()>
    where
        E: Export<F>,
    {
        self.run(src, snk, Some(export), steps)
    }

    /// Return the minimal cut associated with the last maximum flow.
    pub fn mincut(&self) -> Vec<Node> {
        self.net
            .nodes()
            .filter(|u| self.level[u.index()] != usize::max_value())
            .collect()
    }

    fn run<E>(&mut self, src: Node, snk: Node, mut export: Option<&mut E>, steps: bool) -> io::Result<()>
    where
        E: Export<F>,
    {
        assert_ne!(src, snk, "Source and sink node must not be equal");
        let src = src.index();
        let snk = snk.index();

        for f in self.flow.iter_mut() {
            *f = F::zero();
        }
        self.value = F::zero();

        let mut nphases = 0;
        while self.build_level_network(src, snk) {
            nphases += 1;
            if let Some((amount, pivot)) = self.eliminate_bottlenecks(src, snk) {
                debug!("phase {}: sink at level {}, pivot node {}", nphases, self.level[snk], pivot);
                self.push(pivot, amount);
                self.pull(pivot, amount);
                self.value += amount;
            } else {
                // A labeled sink guarantees a source-sink path of arcs with
                // remaining capacity, and no node on such a path can have
                // zero throughput.
                warn!("no node with positive throughput left, stopping early");
                break;
            }

            if steps {
                if let Some(e) = export.as_mut() {
                    e.export_step(&AuxNetwork::new(self.net, &self.node_on, &self.arc_on, &self.flow))?;
                }
            }
        }
        debug!("finished after {} phases", nphases);

        if let Some(e) = export {
            e.export_final(self.net, &self.flow)?;
        }
        Ok(())
    }

    /// Build the auxiliary network of one phase.
    ///
    /// Resets the masks (arcs without remaining capacity start disabled),
    /// labels all nodes with their BFS distance from the source, and
    /// restricts the network to the level structure: nodes with a label not
    /// smaller than the sink's are removed (except the sink itself) and so
    /// is every arc not advancing exactly one level.
    ///
    /// Returns `false` if the sink is unreachable, which terminates the
    /// phase loop.
    fn build_level_network(&mut self, src: usize, snk: usize) -> bool {
        let net = self.net;

        for a in net.arcs() {
            self.arc_on[a.index()] = self.residual(a) > F::zero();
        }
        for on in self.node_on.iter_mut() {
            *on = true;
        }

        for l in self.level.iter_mut() {
            *l = usize::max_value();
        }
        self.level[src] = 0;

        self.queue.clear();
        self.queue.push_back(src);
        while let Some(u) = self.queue.pop_front() {
            let d = self.level[u] + 1;
            for (a, v) in net.outarcs(net.id2node(u)) {
                if self.arc_on[a.index()] && self.node_on[v.index()] && self.level[v.index()] == usize::max_value() {
                    self.level[v.index()] = d;
                    self.queue.push_back(v.index());
                }
            }
        }

        if self.level[snk] == usize::max_value() {
            return false;
        }

        // Unlabeled nodes carry the maximal label and are removed as well.
        let snk_level = self.level[snk];
        for u in 0..net.num_nodes() {
            if u != snk && self.level[u] >= snk_level {
                self.disable_node(u);
            }
        }

        for a in net.arcs() {
            if self.arc_on[a.index()] && self.level[net.snk(a).index()] != self.level[net.src(a).index()] + 1 {
                self.arc_on[a.index()] = false;
            }
        }

        true
    }

    /// Remove a node and all its incident arcs from the auxiliary network.
    fn disable_node(&mut self, u: usize) {
        let net = self.net;
        let v = net.id2node(u);
        for (a, _) in net.outarcs(v) {
            self.arc_on[a.index()] = false;
        }
        for (a, _) in net.inarcs(v) {
            self.arc_on[a.index()] = false;
        }
        self.node_on[u] = false;
    }

    /// Return the throughput of a node in the auxiliary network.
    ///
    /// The throughput is the smaller of the remaining capacities entering
    /// and leaving the node. The source has no inflow constraint and the
    /// sink no outflow constraint, so the missing side is taken to equal
    /// the other one.
    fn throughput(&self, u: usize, src: usize, snk: usize) -> F {
        let net = self.net;
        let node = net.id2node(u);

        let mut t_out = F::zero();
        let mut t_in = F::zero();
        for (a, _) in net.outarcs(node) {
            if self.arc_on[a.index()] {
                t_out += self.residual(a);
            }
        }
        for (a, _) in net.inarcs(node) {
            if self.arc_on[a.index()] {
                t_in += self.residual(a);
            }
        }

        if u == src {
            t_in = t_out;
        } else if u == snk {
            t_out = t_in;
        }

        if t_out < t_in {
            t_out
        } else {
            t_in
        }
    }

    /// Scan all live nodes for their throughput.
    ///
    /// Returns the nodes with zero throughput and the node realizing the
    /// minimal positive throughput, if any.
    fn scan_throughputs(&self, src: usize, snk: usize) -> (Vec<usize>, Option<(F, usize)>) {
        let mut zeros = vec![];
        let mut best: Option<(F, usize)> = None;

        for u in 0..self.net.num_nodes() {
            if !self.node_on[u] {
                continue;
            }
            let t = self.throughput(u, src, snk);
            if t.is_zero() {
                zeros.push(u);
            } else if best.map_or(true, |(tbest, _)| t < tbest) {
                best = Some((t, u));
            }
        }

        (zeros, best)
    }

    /// Remove zero-throughput nodes until none remains.
    ///
    /// The source and the sink are never removed. Removing a node changes
    /// the throughput of its neighbors, hence the scan is repeated after
    /// every removal. Returns the saturating amount and the pivot node of
    /// this phase.
    fn eliminate_bottlenecks(&mut self, src: usize, snk: usize) -> Option<(F, usize)> {
        let (mut zeros, mut best) = self.scan_throughputs(src, snk);

        let mut nremoved = 0;
        while let Some(u) = zeros.pop() {
            if u == src || u == snk {
                continue;
            }
            self.disable_node(u);
            nremoved += 1;

            let scan = self.scan_throughputs(src, snk);
            zeros = scan.0;
            best = scan.1;
        }
        if nremoved > 0 {
            trace!("removed {} nodes without throughput", nremoved);
        }

        best
    }

    /// Distribute `amount` units of flow from the pivot toward the sink.
    ///
    /// Each node forwards its requirement over its outgoing live arcs,
    /// capped by the remaining capacity of each arc. A node may be queued
    /// several times, its requirement accumulates across arrivals; since
    /// every live arc advances exactly one level the walk is acyclic and
    /// terminates. The requirement never exceeds a node's throughput, so
    /// every node can forward its requirement completely.
    fn push(&mut self, pivot: usize, amount: F) {
        let net = self.net;

        for r in self.req.iter_mut() {
            *r = F::zero();
        }
        self.req[pivot] = amount;

        self.queue.clear();
        self.queue.push_back(pivot);
        while let Some(u) = self.queue.pop_front() {
            for (a, v) in net.outarcs(net.id2node(u)) {
                if self.req[u].is_zero() {
                    break;
                }
                if !self.arc_on[a.index()] {
                    continue;
                }
                let r = self.residual(a);
                let m = if self.req[u] < r { self.req[u] } else { r };
                if m > F::zero() {
                    self.flow[a.index()] += m;
                    self.req[u] -= m;
                    self.req[v.index()] += m;
                    self.queue.push_back(v.index());
                }
            }
        }
    }

    /// Distribute `amount` units of flow from the pivot toward the source.
    ///
    /// The mirror image of [`push`][Mpm::push] walking the incoming arcs.
    fn pull(&mut self, pivot: usize, amount: F) {
        let net = self.net;

        for r in self.req.iter_mut() {
            *r = F::zero();
        }
        self.req[pivot] = amount;

        self.queue.clear();
        self.queue.push_back(pivot);
        while let Some(u) = self.queue.pop_front() {
            for (a, v) in net.inarcs(net.id2node(u)) {
                if self.req[u].is_zero() {
                    break;
                }
                if !self.arc_on[a.index()] {
                    continue;
                }
                let r = self.residual(a);
                let m = if self.req[u] < r { self.req[u] } else { r };
                if m > F::zero() {
                    self.flow[a.index()] += m;
                    self.req[u] -= m;
                    self.req[v.index()] += m;
                    self.queue.push_back(v.index());
                }
            }
        }
    }
}

/// Solve the maxflow problem with the phase based algorithm.
///
/// The function computes the maximum flow from the source node `src` to
/// the sink node `snk` with the upper bounds stored in the network.
///
/// The function returns the flow value, the flow on each arc and the
/// nodes in a minimal cut.
pub fn mpm<'a, F>(net: &'a Network<F>, src: Node, snk: Node) -> (F, Vec<(Arc, F)>, Vec<Node>)
where
    F: NumAssign + PartialOrd + Copy,
{
    let mut maxflow = Mpm::new(net);
    maxflow.solve(src, snk);
    (
        maxflow.value(),
        net.arcs().map(|a| (a, maxflow.flow(a))).collect(),
        maxflow.mincut(),
    )
}
