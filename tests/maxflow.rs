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

use rs_maxflow::export::Recorder;
use rs_maxflow::maxflow::{mpm, Mpm};
use rs_maxflow::{Arc, Net, Node};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TESTS: &'static [(usize, &'static [(usize, usize, f64)], f64)] = &[
    // a linear chain
    (3, &[(0, 1, 5.0), (1, 2, 3.0)], 3.0),
    // a diamond with a cross arc
    (4, &[(0, 1, 3.0), (0, 2, 2.0), (1, 3, 2.0), (2, 3, 3.0), (1, 2, 1.0)], 5.0),
    // a disconnected sink
    (3, &[(0, 1, 5.0)], 0.0),
    // parallel arcs
    (2, &[(0, 1, 2.0), (0, 1, 3.0)], 5.0),
    // a zero capacity arc next to a usable one
    (3, &[(0, 1, 0.0), (0, 1, 5.0), (1, 2, 5.0)], 5.0),
    (
        6,
        &[
            (0, 1, 15.0),
            (0, 3, 10.0),
            (1, 2, 6.0),
            (1, 3, 7.0),
            (2, 5, 5.0),
            (2, 4, 2.0),
            (3, 2, 11.0),
            (3, 4, 4.0),
            (4, 2, 4.0),
            (4, 5, 20.0),
        ],
        11.0,
    ),
];

fn build(nnodes: usize, arcs: &[(usize, usize, f64)]) -> Net {
    Net::from_arcs(nnodes, arcs.iter().cloned())
}

fn random_network(rng: &mut StdRng) -> Net {
    let nnodes = rng.gen_range(4..9);
    let narcs = 2 * nnodes;
    let arcs: Vec<_> = (0..narcs)
        .map(|_| {
            let u = rng.gen_range(0..nnodes);
            let v = (u + rng.gen_range(1..nnodes)) % nnodes;
            (u, v, rng.gen_range(0..6) as f64)
        })
        .collect();
    Net::from_arcs(nnodes, arcs)
}

fn conservation_holds(g: &Net, flow: &[(Arc, f64)], s: Node, t: Node) -> bool {
    g.nodes().filter(|&u| u != s && u != t).all(|u| {
        let fin: f64 = g.inarcs(u).map(|(a, _)| flow[a.index()].1).sum();
        let fout: f64 = g.outarcs(u).map(|(a, _)| flow[a.index()].1).sum();
        fin == fout
    })
}

fn net_outflow(g: &Net, flow: &[(Arc, f64)], u: Node) -> f64 {
    let fout: f64 = g.outarcs(u).map(|(a, _)| flow[a.index()].1).sum();
    let fin: f64 = g.inarcs(u).map(|(a, _)| flow[a.index()].1).sum();
    fout - fin
}

// The capacity of a minimal source-sink cut by exhaustive enumeration.
fn brute_force_mincut(g: &Net, s: Node, t: Node) -> f64 {
    let n = g.num_nodes();
    assert!(n < 20);

    let mut best = f64::INFINITY;
    for subset in 0u32..(1u32 << n) {
        if subset & (1 << s.index()) == 0 || subset & (1 << t.index()) != 0 {
            continue;
        }
        let cut: f64 = g
            .arcs()
            .filter(|&a| subset & (1 << g.src(a).index()) != 0 && subset & (1 << g.snk(a).index()) == 0)
            .map(|a| g.upper(a))
            .sum();
        if cut < best {
            best = cut;
        }
    }
    best
}

#[test]
fn test_values() {
    for &(nnodes, arcs, expected) in TESTS {
        let g = build(nnodes, arcs);
        let (value, _, _) = mpm(&g, g.id2node(0), g.id2node(nnodes - 1));
        assert_eq!(value, expected, "Instance: {:?}", arcs);
    }
}

#[test]
fn test_flow_properties() {
    for &(nnodes, arcs, _) in TESTS {
        let g = build(nnodes, arcs);
        let s = g.id2node(0);
        let t = g.id2node(nnodes - 1);
        let (value, flow, _) = mpm(&g, s, t);

        assert!(flow.iter().all(|&(a, f)| f >= 0.0 && f <= g.upper(a)));
        assert!(conservation_holds(&g, &flow, s, t));
        assert_eq!(net_outflow(&g, &flow, s), value);
        assert_eq!(net_outflow(&g, &flow, t), -value);
    }
}

#[test]
fn test_mincut_correspondence() {
    for &(nnodes, arcs, _) in TESTS {
        let g = build(nnodes, arcs);
        let s = g.id2node(0);
        let t = g.id2node(nnodes - 1);

        let (value, _, mincut) = mpm(&g, s, t);

        assert_eq!(value, brute_force_mincut(&g, s, t), "Instance: {:?}", arcs);

        // the reported cut is a source-sink cut of exactly this value
        assert!(mincut.contains(&s));
        assert!(!mincut.contains(&t));
        let cutcap: f64 = g
            .arcs()
            .filter(|&a| mincut.contains(&g.src(a)) && !mincut.contains(&g.snk(a)))
            .map(|a| g.upper(a))
            .sum();
        assert_eq!(cutcap, value, "Instance: {:?}", arcs);
    }
}

#[test]
fn test_random_networks() {
    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let g = random_network(&mut rng);
        let s = g.id2node(0);
        let t = g.id2node(g.num_nodes() - 1);

        let (value, flow, mincut) = mpm(&g, s, t);

        assert!(flow.iter().all(|&(a, f)| f >= 0.0 && f <= g.upper(a)), "seed {}", seed);
        assert!(conservation_holds(&g, &flow, s, t), "seed {}", seed);
        assert_eq!(net_outflow(&g, &flow, s), value, "seed {}", seed);

        // the flow value never exceeds the capacity of any source-sink cut
        assert!(value <= brute_force_mincut(&g, s, t), "seed {}", seed);
        assert!(mincut.contains(&s), "seed {}", seed);
        assert!(!mincut.contains(&t), "seed {}", seed);
    }
}

#[test]
fn test_determinism() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let g = random_network(&mut rng);
        let s = g.id2node(0);
        let t = g.id2node(g.num_nodes() - 1);

        let (first, _, _) = mpm(&g, s, t);
        let (second, _, _) = mpm(&g, s, t);
        assert_eq!(first, second);

        // resolving on the same algorithm instance resets the flow
        let mut alg = Mpm::new(&g);
        alg.solve(s, t);
        alg.solve(s, t);
        assert_eq!(alg.value(), first);
    }
}

#[test]
fn test_phase_bound() {
    for &(nnodes, arcs, _) in TESTS {
        let g = build(nnodes, arcs);
        let mut rec = Recorder::new();
        let mut alg = Mpm::new(&g);
        alg.solve_with(g.id2node(0), g.id2node(nnodes - 1), &mut rec, true).unwrap();

        assert!(rec.steps().len() <= g.num_nodes(), "Instance: {:?}", arcs);
    }

    // every phase saturates at least the binding side of its pivot node,
    // hence the number of phases never exceeds the number of arcs
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let g = random_network(&mut rng);

        let mut rec = Recorder::new();
        let mut alg = Mpm::new(&g);
        alg.solve_with(g.id2node(0), g.id2node(g.num_nodes() - 1), &mut rec, true)
            .unwrap();

        assert!(rec.steps().len() <= g.num_arcs(), "seed {}", seed);
    }
}

#[test]
fn test_export_final_consistency() {
    for &(nnodes, arcs, _) in TESTS {
        let g = build(nnodes, arcs);
        let s = g.id2node(0);
        let t = g.id2node(nnodes - 1);

        let mut rec = Recorder::new();
        let mut alg = Mpm::new(&g);
        alg.solve_with(s, t, &mut rec, false).unwrap();

        let fin = rec.final_snapshot().unwrap();
        assert_eq!(fin.num_nodes, g.num_nodes());
        assert_eq!(fin.arcs.len(), g.num_arcs());
        for (i, arc) in fin.arcs.iter().enumerate() {
            let a = g.id2arc(i);
            assert_eq!(arc.source, g.src(a).index());
            assert_eq!(arc.target, g.snk(a).index());
            assert_eq!(arc.upper, g.upper(a));
            assert_eq!(arc.flow, alg.flow(a));
        }
    }
}
