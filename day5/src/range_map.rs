use std::ops::Range;

pub type Location = u64;

/// One rule of a map: `input` is shifted onto `output`, both of the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapRange {
    pub input: Range<Location>,
    pub output: Range<Location>,
}

impl MapRange {
    /// Lengths reaching past `Location::MAX` are cut so both sides stay the same size.
    pub fn new(dst: Location, src: Location, size: Location) -> Self {
        let size = size.min(Location::MAX - src).min(Location::MAX - dst);
        MapRange {
            input: src..src + size,
            output: dst..dst + size,
        }
    }

    fn map(&self, i: Location) -> Option<Location> {
        self.input
            .contains(&i)
            .then(|| self.output.start + (i - self.input.start))
    }

    fn reversed(&self) -> MapRange {
        MapRange {
            input: self.output.clone(),
            output: self.input.clone(),
        }
    }
}

/// Converts numbers of one category (`src_name`) into another (`dst_name`).
///
/// Rules are kept in insertion order and the first one containing a value
/// wins, so overlapping rules resolve the same way they were written down.
/// Values no rule covers map to themselves.
#[derive(Debug, Clone)]
pub struct RangeMap {
    pub src_name: String,
    pub dst_name: String,
    map_ranges: Vec<MapRange>,
}

impl RangeMap {
    pub fn new(src_name: impl Into<String>, dst_name: impl Into<String>) -> Self {
        RangeMap {
            src_name: src_name.into(),
            dst_name: dst_name.into(),
            map_ranges: Vec::new(),
        }
    }

    /// Appends a rule sending `src..src+size` onto `dst..dst+size`.
    pub fn add(&mut self, dst: Location, src: Location, size: Location) {
        self.map_ranges.push(MapRange::new(dst, src, size));
    }

    pub fn lookup(&self, i: Location) -> Location {
        self.map_ranges
            .iter()
            .find_map(|map_range| map_range.map(i))
            .unwrap_or(i)
    }

    /// Builds the inverse map, `dst_name` back to `src_name`, rules in the same order.
    pub fn reverse(&self) -> RangeMap {
        RangeMap {
            src_name: self.dst_name.clone(),
            dst_name: self.src_name.clone(),
            map_ranges: self.map_ranges.iter().map(MapRange::reversed).collect(),
        }
    }

    pub fn map_ranges(&self) -> &[MapRange] {
        &self.map_ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_to_soil() -> RangeMap {
        let mut map = RangeMap::new("seed", "soil");
        map.add(50, 98, 2);
        map.add(52, 50, 48);
        map
    }

    #[test]
    fn looks_up_sample_values() {
        let map = seed_to_soil();
        assert_eq!(map.lookup(98), 50);
        assert_eq!(map.lookup(99), 51);
        assert_eq!(map.lookup(53), 55);
        assert_eq!(map.lookup(10), 10);
    }

    #[test]
    fn uncovered_values_map_to_themselves() {
        let map = seed_to_soil();
        for i in (0..50).chain(100..150) {
            assert_eq!(map.lookup(i), i);
        }
        assert_eq!(RangeMap::new("a", "b").lookup(42), 42);
    }

    #[test]
    fn rule_endpoints_land_on_destination_endpoints() {
        let map = seed_to_soil();
        for map_range in map.map_ranges() {
            assert_eq!(map.lookup(map_range.input.start), map_range.output.start);
            assert_eq!(map.lookup(map_range.input.end - 1), map_range.output.end - 1);
        }
    }

    #[test]
    fn first_matching_rule_wins() {
        let mut map = RangeMap::new("a", "b");
        map.add(100, 0, 10);
        map.add(200, 5, 10);
        assert_eq!(map.lookup(7), 107);
        assert_eq!(map.lookup(12), 207);
    }

    #[test]
    fn reverse_swaps_roles_and_keeps_order() {
        let reversed = seed_to_soil().reverse();
        assert_eq!(reversed.src_name, "soil");
        assert_eq!(reversed.dst_name, "seed");
        assert_eq!(reversed.map_ranges()[0].input, 50..52);
        assert_eq!(reversed.map_ranges()[1].input, 52..100);
        assert_eq!(reversed.lookup(50), 98);
        assert_eq!(reversed.lookup(55), 53);
    }

    #[test]
    fn reversed_overlaps_resolve_in_insertion_order() {
        let mut map = RangeMap::new("a", "b");
        map.add(0, 10, 5);
        map.add(0, 20, 5);
        let reversed = map.reverse();
        assert_eq!(reversed.lookup(2), 12);
        assert_eq!(reversed.lookup(5), 5);
    }

    #[test]
    fn reversing_twice_changes_nothing() {
        let map = seed_to_soil();
        let twice = map.reverse().reverse();
        for i in 0..200 {
            assert_eq!(twice.lookup(i), map.lookup(i));
        }
    }

    #[test]
    fn sizes_are_cut_at_the_top_of_the_number_range() {
        let mut map = RangeMap::new("a", "b");
        map.add(Location::MAX - 1, 0, 10);
        assert_eq!(map.map_ranges()[0].input, 0..1);
        assert_eq!(map.lookup(0), Location::MAX - 1);
        assert_eq!(map.lookup(1), 1);
    }
}
