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

use rustop::opts;

use rs_maxflow::arclist;
use rs_maxflow::export::Reporter;
use rs_maxflow::maxflow::Mpm;
use rs_maxflow::Net;

use std::io;
use std::process::exit;

fn main() {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Compute a maximum flow with a phase based blocking-flow algorithm.";
        opt steps:bool, desc:"Print the auxiliary network after each phase.";
        param nodes:usize, desc:"Number of nodes, the first node is the source, the last one the sink.";
        param arcs:Vec<String>, desc:"Arc descriptors in the form 'source,target,capacity' with 1-based nodes.";
    }
    .parse_or_exit();

    if args.nodes < 2 {
        eprintln!("The network needs at least a source and a sink node");
        exit(1);
    }

    let arcs = match arclist::parse_arcs(args.arcs.iter().map(|s| s.as_str()), args.nodes) {
        Ok(arcs) => arcs,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };

    let g: Net = Net::from_arcs(args.nodes, arcs);
    let s = g.id2node(0);
    let t = g.id2node(args.nodes - 1);

    let mut alg = Mpm::new(&g);
    let mut report = Reporter::new(io::stdout());
    if let Err(err) = alg.solve_with(s, t, &mut report, args.steps) {
        eprintln!("{}", err);
        exit(1);
    }

    println!("{}", alg.value());
}
