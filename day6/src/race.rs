use chumsky::prelude::*;
use itertools::Itertools;
use num::integer::Roots;
use std::iter::zip;
use std::num::ParseIntError;
use tracing::debug;

type IntUnit = u64;

#[derive(thiserror::Error, Debug)]
pub enum RaceError {
    #[error("malformed race sheet: {0}")]
    Parse(String),
    #[error("{times} times but {distances} distances")]
    MismatchedColumns { times: usize, distances: usize },
    #[error("kerned race does not fit: {0}")]
    Kerning(#[from] ParseIntError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Race {
    pub time: IntUnit,
    pub record: IntUnit,
}

fn number() -> impl Parser<char, IntUnit, Error = Simple<char>> + Clone {
    text::int(10).try_map(|s: String, span| {
        s.parse()
            .map_err(|e| Simple::custom(span, format!("bad number `{}`: {}", s, e)))
    })
}

fn parser() -> impl Parser<char, (Vec<IntUnit>, Vec<IntUnit>), Error = Simple<char>> {
    let number_list = just(' ')
        .repeated()
        .at_least(1)
        .ignore_then(number())
        .repeated()
        .at_least(1);
    just("Time:")
        .ignore_then(number_list.clone())
        .then_ignore(text::newline())
        .then(just("Distance:").ignore_then(number_list))
        .then_ignore(text::whitespace())
        .then_ignore(end())
}

pub fn parse(src: &str) -> Result<Vec<Race>, RaceError> {
    let (times, records) = parser()
        .parse(src)
        .map_err(|errs| RaceError::Parse(errs.iter().map(|e| e.to_string()).join("; ")))?;
    if times.len() != records.len() {
        return Err(RaceError::MismatchedColumns {
            times: times.len(),
            distances: records.len(),
        });
    }
    debug!(races = times.len(), "parsed race sheet");
    Ok(zip(times, records)
        .map(|(time, record)| Race { time, record })
        .collect())
}

/// Reads the sheet as a single race by gluing the digits of every column together.
pub fn make_big_race(races: &[Race]) -> Result<Race, RaceError> {
    Ok(Race {
        time: races.iter().map(|r| r.time).join("").parse()?,
        record: races.iter().map(|r| r.record).join("").parse()?,
    })
}

/// Distance covered when the button is held for `hold` out of `time`.
fn travelled(hold: IntUnit, time: IntUnit) -> u128 {
    hold as u128 * (time - hold) as u128
}

fn beats(hold: IntUnit, race: &Race) -> bool {
    travelled(hold, race.time) > race.record as u128
}

/// Counts hold times in `1..time` beating the record by checking each one.
pub fn count_winning_hold_times_brute(race: &Race) -> IntUnit {
    (1..race.time).filter(|&hold| beats(hold, race)).count() as IntUnit
}

/// Counts hold times in `1..time` beating the record, i.e. the integers
/// strictly between the roots of `-h^2 + time*h - record`.
///
/// The winning holds are symmetric around `time / 2`, so only the lowest one
/// is searched for. The integer square root lands within one step of it and
/// the two loops settle the exact boundary.
pub fn count_winning_hold_times(race: &Race) -> IntUnit {
    let half = race.time / 2;
    if !beats(half, race) {
        return 0;
    }

    let time = race.time as u128;
    let delta = time * time - 4 * race.record as u128;
    let mut lowest = ((time - delta.sqrt()) / 2).min(half as u128) as IntUnit;
    while !beats(lowest, race) {
        lowest += 1;
    }
    while lowest > 0 && beats(lowest - 1, race) {
        lowest -= 1;
    }
    race.time - 2 * lowest + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../inputs/sample.txt");
    const INPUT: &str = include_str!("../inputs/input.txt");

    fn race(time: IntUnit, record: IntUnit) -> Race {
        Race { time, record }
    }

    #[test]
    fn parses_sample() {
        assert_eq!(
            parse(SAMPLE).unwrap(),
            vec![race(7, 9), race(15, 40), race(30, 200)]
        );
    }

    #[test]
    fn rejects_bad_sheets() {
        assert!(matches!(
            parse("Time: 7 15\nDistance: 9\n"),
            Err(RaceError::MismatchedColumns {
                times: 2,
                distances: 1
            })
        ));
        assert!(matches!(
            parse("Time: 7\nDistance: nine\n"),
            Err(RaceError::Parse(_))
        ));
    }

    #[test]
    fn counts_sample_races() {
        let races = parse(SAMPLE).unwrap();
        let counts: Vec<_> = races.iter().map(count_winning_hold_times).collect();
        assert_eq!(counts, vec![4, 8, 9]);
        assert_eq!(counts.iter().product::<IntUnit>(), 288);
    }

    #[test]
    fn counts_kerned_sample_race() {
        let big_race = make_big_race(&parse(SAMPLE).unwrap()).unwrap();
        assert_eq!(big_race, race(71530, 940200));
        assert_eq!(count_winning_hold_times(&big_race), 71503);
        assert_eq!(count_winning_hold_times_brute(&big_race), 71503);
    }

    #[test]
    fn counts_puzzle_input() {
        let races = parse(INPUT).unwrap();
        assert_eq!(
            races.iter().map(count_winning_hold_times).product::<IntUnit>(),
            2756160
        );
        let big_race = make_big_race(&races).unwrap();
        assert_eq!(count_winning_hold_times(&big_race), 34788142);
    }

    #[test]
    fn closed_form_matches_brute_force() {
        for time in 0..60 {
            for record in 0..(time * time / 4 + 3) {
                let r = race(time, record);
                assert_eq!(
                    count_winning_hold_times(&r),
                    count_winning_hold_times_brute(&r),
                    "{:?}",
                    r
                );
            }
        }
    }

    #[test]
    fn winning_is_symmetric() {
        let r = race(71530, 940200);
        for hold in 0..=r.time {
            assert_eq!(beats(hold, &r), beats(r.time - hold, &r));
        }
    }

    #[test]
    fn handles_large_races() {
        let r = race(IntUnit::MAX, IntUnit::MAX);
        // 1 * (MAX - 1) falls short, 2 * (MAX - 2) does not.
        assert!(!beats(1, &r));
        assert!(beats(2, &r));
        assert_eq!(count_winning_hold_times(&r), IntUnit::MAX - 3);
    }

    #[test]
    fn kerning_overflow_is_an_error() {
        let races = vec![race(18446744073, 1), race(709551616, 1)];
        assert!(matches!(make_big_race(&races), Err(RaceError::Kerning(_))));
    }
}
