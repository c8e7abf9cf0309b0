use chumsky::prelude::*;
use itertools::Itertools;
use std::ops::Range;
use tracing::debug;

use crate::range_map::{Location, RangeMap};

pub const SEED: &str = "seed";
pub const LOCATION: &str = "location";

#[derive(thiserror::Error, Debug)]
pub enum AlmanacError {
    #[error("malformed almanac: {0}")]
    Parse(String),
    #[error("no map converts from `{from}`")]
    MissingMap { from: String },
    #[error("maps starting at `{from}` never reach `{to}`")]
    Unreachable { from: String, to: String },
    #[error("seed ranges come in start/length pairs, got {0} numbers")]
    OddSeedCount(usize),
}

#[derive(Debug)]
pub struct Almanac {
    pub seeds: Vec<Location>,
    pub maps: Vec<RangeMap>,
}

/// Maps applied one after the other, each output feeding the next input.
#[derive(Debug, Clone)]
pub struct Pipeline {
    stages: Vec<RangeMap>,
}

impl Pipeline {
    pub fn apply(&self, i: Location) -> Location {
        self.stages.iter().fold(i, |cur, map| map.lookup(cur))
    }

    pub fn reverse(&self) -> Pipeline {
        Pipeline {
            stages: self.stages.iter().rev().map(RangeMap::reverse).collect(),
        }
    }

    /// Largest exclusive end of any rule output, i.e. above anything a rule can produce.
    pub fn output_bound(&self) -> Location {
        self.stages
            .iter()
            .flat_map(|map| map.map_ranges())
            .map(|map_range| map_range.output.end)
            .max()
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub fn stages(&self) -> &[RangeMap] {
        &self.stages
    }
}

impl Almanac {
    /// Chains the maps leading from category `from` to category `to`.
    pub fn pipeline(&self, from: &str, to: &str) -> Result<Pipeline, AlmanacError> {
        let mut stages = Vec::new();
        let mut cur = from;

        while cur != to {
            if stages.len() == self.maps.len() {
                return Err(AlmanacError::Unreachable {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            let map = self
                .maps
                .iter()
                .find(|map| map.src_name == cur)
                .ok_or_else(|| AlmanacError::MissingMap {
                    from: cur.to_string(),
                })?;
            stages.push(map.clone());
            cur = &map.dst_name;
        }
        Ok(Pipeline { stages })
    }

    /// Reads the seed list as `start length` pairs.
    pub fn seed_ranges(&self) -> Result<Vec<Range<Location>>, AlmanacError> {
        if self.seeds.len() % 2 != 0 {
            return Err(AlmanacError::OddSeedCount(self.seeds.len()));
        }
        Ok(self
            .seeds
            .iter()
            .tuples()
            .map(|(&start, &len)| start..start.saturating_add(len))
            .collect())
    }
}

fn number() -> impl Parser<char, Location, Error = Simple<char>> + Clone {
    text::int(10).try_map(|s: String, span| {
        s.parse()
            .map_err(|e| Simple::custom(span, format!("bad number `{}`: {}", s, e)))
    })
}

fn parser() -> impl Parser<char, Almanac, Error = Simple<char>> {
    let spaces = just(' ').repeated().at_least(1);
    let seed_line = just("seeds:").ignore_then(spaces.clone().ignore_then(number()).repeated());
    let map_range = number()
        .then_ignore(spaces.clone())
        .then(number())
        .then_ignore(spaces)
        .then(number());
    let map = text::ident()
        .then_ignore(just("-to-"))
        .then(text::ident())
        .then_ignore(just(" map:"))
        .then_ignore(text::newline())
        .then(map_range.separated_by(text::newline()))
        .map(|((src_name, dst_name), map_ranges)| {
            let mut map = RangeMap::new(src_name, dst_name);
            for ((dst, src), size) in map_ranges {
                map.add(dst, src, size);
            }
            map
        });
    seed_line
        .then_ignore(text::whitespace())
        .then(map.separated_by(text::whitespace()))
        .then_ignore(text::whitespace())
        .then_ignore(end())
        .map(|(seeds, maps)| Almanac { seeds, maps })
}

pub fn parse(src: &str) -> Result<Almanac, AlmanacError> {
    let almanac = parser()
        .parse(src)
        .map_err(|errs| AlmanacError::Parse(errs.iter().map(|e| e.to_string()).join("; ")))?;
    debug!(
        seeds = almanac.seeds.len(),
        maps = almanac.maps.len(),
        "parsed almanac"
    );
    Ok(almanac)
}
