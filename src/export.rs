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

//! Observing the progress and result of a flow computation.
//!
//! The phase loop of the max-flow algorithm reports through the [`Export`]
//! trait: the pruned auxiliary network after each phase (only if step
//! reporting is requested) and the full network with the final flow once
//! at the end. Two exporters are provided, [`Reporter`] writes a human
//! readable listing and [`Recorder`] accumulates the reported states as
//! plain value snapshots for later retrieval.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::export::Recorder;
//! use rs_maxflow::maxflow::Mpm;
//! use rs_maxflow::Net;
//!
//! let g = Net::from_arcs(3, vec![(0, 1, 5.0), (1, 2, 3.0)]);
//!
//! let mut rec = Recorder::new();
//! let mut alg = Mpm::new(&g);
//! alg.solve_with(g.id2node(0), g.id2node(2), &mut rec, true).unwrap();
//!
//! assert_eq!(rec.steps().len(), 1);
//! let fin = rec.final_snapshot().unwrap();
//! assert_eq!(fin.num_nodes, 3);
//! assert_eq!(fin.arcs[1].flow, 3.0);
//! ```

use crate::filtered::AuxNetwork;
use crate::network::Network;
use crate::num::traits::NumAssign;

use std::fmt;
use std::io::{self, Write};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Observer of a flow computation.
///
/// An error returned from either operation aborts the computation.
pub trait Export<F> {
    /// Report the auxiliary network of a completed phase.
    fn export_step(&mut self, aux: &AuxNetwork<'_, F>) -> io::Result<()>;

    /// Report the full network and the final flow, once per computation.
    fn export_final(&mut self, net: &Network<F>, flow: &[F]) -> io::Result<()>;
}

/// The no-op exporter.
impl<F> Export<F> for () {
    fn export_step(&mut self, _aux: &AuxNetwork<'_, F>) -> io::Result<()> {
        Ok(())
    }

    fn export_final(&mut self, _net: &Network<F>, _flow: &[F]) -> io::Result<()> {
        Ok(())
    }
}

/// An exporter writing a human readable listing of each reported state.
pub struct Reporter<W> {
    out: W,
}

impl<W> Reporter<W>
where
    W: Write,
{
    /// Create a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Reporter { out }
    }

    /// Return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W, F> Export<F> for Reporter<W>
where
    W: Write,
    F: NumAssign + PartialOrd + Copy + fmt::Display,
{
    fn export_step(&mut self, aux: &AuxNetwork<'_, F>) -> io::Result<()> {
        writeln!(self.out, "\n-------------------------------------------------------------\n")?;
        writeln!(self.out, "Auxiliary network with {} nodes", aux.num_nodes())?;
        writeln!(self.out, " nodes:")?;
        for u in aux.nodes() {
            writeln!(self.out, "  - {}", u)?;
        }
        writeln!(self.out, " arcs:")?;
        for a in aux.arcs() {
            writeln!(
                self.out,
                "  - ({},{}), c={}, f={}",
                aux.src(a),
                aux.snk(a),
                aux.residual(a),
                aux.flow(a)
            )?;
        }
        Ok(())
    }

    fn export_final(&mut self, net: &Network<F>, flow: &[F]) -> io::Result<()> {
        writeln!(self.out, "\n-------------------------------------------------------------\n")?;
        writeln!(self.out, "Final network with {} nodes", net.num_nodes())?;
        writeln!(self.out, " nodes:")?;
        for u in net.nodes() {
            writeln!(self.out, "  - {}", u)?;
        }
        writeln!(self.out, " arcs:")?;
        for a in net.arcs() {
            writeln!(
                self.out,
                "  - ({},{}), c={}, f={}",
                net.src(a),
                net.snk(a),
                net.upper(a),
                flow[a.index()]
            )?;
        }
        Ok(())
    }
}

/// The state of an arc in a captured snapshot.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ArcState<F> {
    /// The index of the tail node.
    pub source: usize,
    /// The index of the head node.
    pub target: usize,
    /// The upper bound of the arc.
    pub upper: F,
    /// The flow on the arc.
    pub flow: F,
}

/// One captured network state.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<F> {
    /// The number of live nodes.
    pub num_nodes: usize,
    /// The live arcs.
    ///
    /// The node indices refer to the full network, they are not
    /// renumbered when the snapshot captures an auxiliary network.
    pub arcs: Vec<ArcState<F>>,
}

/// An exporter accumulating the reported states in memory.
///
/// The recorder owns its snapshots; they remain available after the
/// computation has finished and are plain values without references into
/// the network.
pub struct Recorder<F> {
    steps: Vec<Snapshot<F>>,
    last: Option<Snapshot<F>>,
}

impl<F> Recorder<F> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Recorder {
            steps: vec![],
            last: None,
        }
    }

    /// Return the snapshots captured after each phase.
    pub fn steps(&self) -> &[Snapshot<F>] {
        &self.steps
    }

    /// Return the snapshot of the final state.
    pub fn final_snapshot(&self) -> Option<&Snapshot<F>> {
        self.last.as_ref()
    }
}

impl<F> Default for Recorder<F> {
    fn default() -> Self {
        Recorder::new()
    }
}

impl<F> Export<F> for Recorder<F>
where
    F: NumAssign + PartialOrd + Copy,
{
    fn export_step(&mut self, aux: &AuxNetwork<'_, F>) -> io::Result<()> {
        let arcs = aux
            .arcs()
            .map(|a| ArcState {
                source: aux.src(a).index(),
                target: aux.snk(a).index(),
                upper: aux.upper(a),
                flow: aux.flow(a),
            })
            .collect();
        self.steps.push(Snapshot {
            num_nodes: aux.num_nodes(),
            arcs,
        });
        Ok(())
    }

    fn export_final(&mut self, net: &Network<F>, flow: &[F]) -> io::Result<()> {
        let arcs = net
            .arcs()
            .map(|a| ArcState {
                source: net.src(a).index(),
                target: net.snk(a).index(),
                upper: net.upper(a),
                flow: flow[a.index()],
            })
            .collect();
        self.last = Some(Snapshot {
            num_nodes: net.num_nodes(),
            arcs,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Recorder, Reporter};
    use crate::maxflow::Mpm;
    use crate::network::Network;

    fn diamond() -> Network<f64> {
        Network::from_arcs(
            4,
            vec![(0, 1, 3.0), (0, 2, 2.0), (1, 3, 2.0), (2, 3, 3.0), (1, 2, 1.0)],
        )
    }

    #[test]
    fn test_recorder() {
        let g = diamond();
        let mut rec = Recorder::new();
        let mut alg = Mpm::new(&g);

        alg.solve_with(g.id2node(0), g.id2node(3), &mut rec, true).unwrap();

        assert_eq!(alg.value(), 5.0);
        assert_eq!(rec.steps().len(), 3);

        // first phase: the cross arc is pruned from the level structure
        assert_eq!(rec.steps()[0].num_nodes, 4);
        assert_eq!(rec.steps()[0].arcs.len(), 4);

        // second phase: one saturated node has been eliminated
        assert_eq!(rec.steps()[1].num_nodes, 3);
        assert_eq!(rec.steps()[1].arcs.len(), 2);

        let fin = rec.final_snapshot().unwrap();
        assert_eq!(fin.num_nodes, 4);
        assert_eq!(fin.arcs.len(), 5);
        for (i, arc) in fin.arcs.iter().enumerate() {
            assert_eq!(arc.upper, g.upper(g.id2arc(i)));
            assert_eq!(arc.flow, alg.flow(g.id2arc(i)));
        }
    }

    #[test]
    fn test_recorder_without_steps() {
        let g = diamond();
        let mut rec = Recorder::new();
        let mut alg = Mpm::new(&g);

        alg.solve_with(g.id2node(0), g.id2node(3), &mut rec, false).unwrap();

        assert!(rec.steps().is_empty());
        assert!(rec.final_snapshot().is_some());
    }

    #[test]
    fn test_reporter() {
        let g = Network::from_arcs(3, vec![(0, 1, 5.0), (1, 2, 3.0)]);
        let mut rep = Reporter::new(Vec::new());
        let mut alg = Mpm::new(&g);

        alg.solve_with(g.id2node(0), g.id2node(2), &mut rep, true).unwrap();

        let text = String::from_utf8(rep.into_inner()).unwrap();
        assert!(text.contains("Auxiliary network with 3 nodes"));
        assert!(text.contains("Final network with 3 nodes"));
        assert!(text.contains("(0,1), c=5, f=3"));
        assert!(text.contains("(1,2), c=3, f=3"));
    }

    #[cfg(feature = "serialize")]
    mod serialize {
        use super::super::Snapshot;
        use super::diamond;
        use crate::export::Recorder;
        use crate::maxflow::Mpm;

        #[test]
        fn test_serde() {
            let g = diamond();
            let mut rec = Recorder::new();
            let mut alg = Mpm::new(&g);
            alg.solve_with(g.id2node(0), g.id2node(3), &mut rec, true).unwrap();

            let serialized = serde_json::to_string(rec.final_snapshot().unwrap()).unwrap();
            let snapshot: Snapshot<f64> = serde_json::from_str(&serialized).unwrap();

            assert_eq!(&snapshot, rec.final_snapshot().unwrap());
        }
    }
}
