// Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Parsing textual arc descriptors.
//!
//! An arc descriptor has the form `source,target,capacity` with 1-based
//! node numbers and a non-negative capacity, e.g. `1,4,2.5`. A sequence
//! of descriptors together with a node count describes a complete
//! network; by convention of the callers the first node is the source
//! and the last node is the sink.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::arclist;
//!
//! let arcs: Vec<(usize, usize, f64)> = arclist::parse_arcs(vec!["1,2,5", "2,3,2.5"], 3).unwrap();
//! assert_eq!(arcs, vec![(0, 1, 5.0), (1, 2, 2.5)]);
//!
//! assert!(arclist::parse_arcs::<f64, _>(vec!["1,x,3"], 3).is_err());
//! ```

use crate::num::traits::Zero;

use std::error;
use std::fmt;
use std::str::FromStr;

/// Error when parsing an arc list.
#[derive(Debug)]
pub enum Error {
    /// A syntactically malformed descriptor.
    Format { pos: usize, msg: String },
    /// A well-formed descriptor with invalid data.
    Data { pos: usize, msg: String },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            Format { pos, msg } => write!(fmt, "Format error in descriptor {}: {}", pos, msg),
            Data { pos, msg } => write!(fmt, "Data error in descriptor {}: {}", pos, msg),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse a single arc descriptor.
///
/// `pos` is the 1-based position of the descriptor in its list and is
/// only used for error messages. Returns the 0-based end nodes and the
/// capacity.
pub fn parse_arc<F>(descr: &str, nnodes: usize, pos: usize) -> Result<(usize, usize, F)>
where
    F: FromStr + Zero + PartialOrd,
    F::Err: fmt::Display,
{
    let mut toks = descr.split(',');

    let u: usize = number(toks.next(), descr, pos)?;
    let v: usize = number(toks.next(), descr, pos)?;
    let c: F = number(toks.next(), descr, pos)?;
    if toks.next().is_some() {
        return Err(Error::Format {
            pos,
            msg: format!("unexpected field in '{}'", descr),
        });
    }

    let u = node_index(u, nnodes, pos)?;
    let v = node_index(v, nnodes, pos)?;
    if c < F::zero() {
        return Err(Error::Data {
            pos,
            msg: format!("negative capacity in '{}'", descr),
        });
    }

    Ok((u, v, c))
}

/// Parse a sequence of arc descriptors.
///
/// The first malformed descriptor aborts the parse.
pub fn parse_arcs<'a, F, I>(descrs: I, nnodes: usize) -> Result<Vec<(usize, usize, F)>>
where
    I: IntoIterator<Item = &'a str>,
    F: FromStr + Zero + PartialOrd,
    F::Err: fmt::Display,
{
    descrs
        .into_iter()
        .enumerate()
        .map(|(i, descr)| parse_arc(descr, nnodes, i + 1))
        .collect()
}

// Parse the next field of a descriptor as a number.
fn number<T>(tok: Option<&str>, descr: &str, pos: usize) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    tok.ok_or_else(|| Error::Format {
        pos,
        msg: format!("incomplete descriptor '{}'", descr),
    })?
    .trim()
    .parse()
    .map_err(|e| Error::Format {
        pos,
        msg: format!("{}", e),
    })
}

// Turn a 1-based node number into a node index.
fn node_index(u: usize, nnodes: usize, pos: usize) -> Result<usize> {
    if u < 1 || u > nnodes {
        Err(Error::Data {
            pos,
            msg: format!("invalid node id {} (must be in 1..{})", u, nnodes),
        })
    } else {
        Ok(u - 1)
    }
}
