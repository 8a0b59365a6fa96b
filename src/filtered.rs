/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! A filtered view of a network suppressing disabled nodes and arcs.
//!
//! The view is defined by two boolean masks over the node and arc arenas
//! of a [`Network`][crate::network::Network]. The max-flow phase loop
//! rebuilds the masks at the start of every phase and only ever clears
//! entries within a phase, so the view always is a subgraph of the full
//! network. The view also carries the current flow, so the remaining
//! capacity of an arc can be read off directly.

use crate::network::{Arc, Network, Node};
use crate::num::traits::NumAssign;

/// The auxiliary network of one phase.
///
/// All accessors taking an arc expect an arc that is live in this view;
/// this is checked in debug builds only.
pub struct AuxNetwork<'a, F> {
    net: &'a Network<F>,
    node_on: &'a [bool],
    arc_on: &'a [bool],
    flow: &'a [F],
}

impl<'a, F> AuxNetwork<'a, F>
where
    F: NumAssign + PartialOrd + Copy,
{
    pub(crate) fn new(net: &'a Network<F>, node_on: &'a [bool], arc_on: &'a [bool], flow: &'a [F]) -> Self {
        AuxNetwork {
            net,
            node_on,
            arc_on,
            flow,
        }
    }

    /// Return the number of live nodes.
    pub fn num_nodes(&self) -> usize {
        self.node_on.iter().filter(|&&on| on).count()
    }

    /// Return an iterator over the live nodes.
    ///
    /// Note that the indices of the returned nodes refer to the full
    /// network, they are not renumbered.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.net.nodes().filter(move |u| self.node_on[u.index()])
    }

    /// Return an iterator over the live arcs.
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.net.arcs().filter(move |a| self.arc_on[a.index()])
    }

    /// Return `true` if the node is live in this view.
    pub fn contains_node(&self, u: Node) -> bool {
        self.node_on[u.index()]
    }

    /// Return `true` if the arc is live in this view.
    pub fn contains_arc(&self, a: Arc) -> bool {
        self.arc_on[a.index()]
    }

    /// Return the source node of an arc.
    pub fn src(&self, a: Arc) -> Node {
        debug_assert!(self.arc_on[a.index()], "Arc has been filtered");
        self.net.src(a)
    }

    /// Return the sink node of an arc.
    pub fn snk(&self, a: Arc) -> Node {
        debug_assert!(self.arc_on[a.index()], "Arc has been filtered");
        self.net.snk(a)
    }

    /// Return the upper bound of an arc.
    pub fn upper(&self, a: Arc) -> F {
        self.net.upper(a)
    }

    /// Return the current flow on an arc.
    pub fn flow(&self, a: Arc) -> F {
        self.flow[a.index()]
    }

    /// Return the remaining capacity of an arc.
    ///
    /// The remaining capacity is always derived from the upper bound and
    /// the flow, it is not stored anywhere.
    pub fn residual(&self, a: Arc) -> F {
        let r = self.net.upper(a) - self.flow[a.index()];
        debug_assert!(r >= F::zero(), "Flow exceeds upper bound");
        r
    }
}

#[cfg(test)]
mod tests {
    use super::AuxNetwork;
    use crate::network::Network;

    #[test]
    fn test_masks() {
        let g = Network::from_arcs(3, vec![(0, 1, 5.0), (1, 2, 3.0), (0, 2, 1.0)]);
        let node_on = vec![true, false, true];
        let arc_on = vec![false, false, true];
        let flow = vec![0.0, 0.0, 1.0];

        let aux = AuxNetwork::new(&g, &node_on, &arc_on, &flow);

        assert_eq!(aux.num_nodes(), 2);
        assert_eq!(aux.nodes().map(|u| u.index()).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(aux.arcs().map(|a| a.index()).collect::<Vec<_>>(), vec![2]);

        let a = g.id2arc(2);
        assert!(aux.contains_arc(a));
        assert!(!aux.contains_arc(g.id2arc(0)));
        assert_eq!(aux.flow(a), 1.0);
        assert_eq!(aux.residual(a), 0.0);
    }
}
