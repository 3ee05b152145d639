use chrono::{Duration, NaiveDateTime, Timelike};
use rand::Rng;

/// Textual timestamp pattern accepted by `git commit --date` and
/// `GIT_COMMITTER_DATE`, e.g. `1988-01-01T12:34:56`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// First hour of the waking-hours window (05:00).
pub const EARLIEST_HOUR: u32 = 5;

/// Last hour of the waking-hours window (23:00).
pub const LATEST_HOUR: u32 = 23;

/// Parses a timestamp string in [`DATE_FORMAT`].
///
/// # Parameters
///
/// * `s` — A candidate timestamp, e.g. `"1988-01-01T12:34:56"`.
///
/// # Returns
///
/// * `Ok(NaiveDateTime)` if the string matches the pattern exactly.
/// * `Err(String)` describing the parse failure otherwise.
pub fn parse_date(s: &str) -> Result<NaiveDateTime, String> {
    match NaiveDateTime::parse_from_str(s, DATE_FORMAT) {
        Ok(dt) => Ok(dt),
        Err(e) => Err(format!("invalid date `{}` (expected YYYY-MM-DDTHH:MM:SS): {}", s, e)),
    }
}

/// Replaces the time-of-day of `dt` with `hour`:00:00.
fn at_hour(dt: NaiveDateTime, hour: u32) -> Result<NaiveDateTime, String> {
    match dt.date().and_hms_opt(hour, 0, 0) {
        Some(v) => Ok(v),
        None => Err(format!("hour {} out of range", hour)),
    }
}

/// Draws one random timestamp between `start` and `end`, constrained to
/// waking hours.
///
/// The interval is first clamped to the waking-hours window: `start` is moved
/// to 05:00:00 of its day and `end` to 23:00:00 of its day. A uniform offset
/// is drawn within that span, then the hour field of the result is overwritten
/// by a second independent uniform draw in `[5, 23]`. This is a coarse
/// approximation of waking-hours activity, not a diurnal model.
///
/// # Parameters
///
/// * `start` — Earliest instant of the range (clamped to 05:00 of its day).
/// * `end` — Latest instant of the range (clamped to 23:00 of its day).
/// * `rng` — Randomness source; injected so callers can seed it.
///
/// # Returns
///
/// * `Ok(String)` with the drawn timestamp formatted per [`DATE_FORMAT`].
/// * `Err(String)` if `end` precedes `start` after clamping.
pub fn random_date<R: Rng>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    rng: &mut R,
) -> Result<String, String> {
    let earliest = at_hour(start, EARLIEST_HOUR)?;
    let latest = at_hour(end, LATEST_HOUR)?;

    let span_seconds = (latest - earliest).num_seconds();
    if span_seconds < 0 {
        return Err(format!(
            "end date {} precedes start date {}",
            end.format(DATE_FORMAT),
            start.format(DATE_FORMAT)
        ));
    }

    let offset = rng.gen_range(0..=span_seconds);
    let hour = rng.gen_range(EARLIEST_HOUR..=LATEST_HOUR);

    let drawn = earliest + Duration::seconds(offset);
    match drawn.with_hour(hour) {
        Some(ts) => Ok(ts.format(DATE_FORMAT).to_string()),
        None => Err(format!("cannot set hour {} on {}", hour, drawn)),
    }
}

/// Generates `count` random waking-hours timestamps between two dates,
/// sorted ascending.
///
/// Each timestamp is drawn independently via [`random_date`]; the sorted
/// order mirrors the oldest-to-newest commit order an interactive rebase
/// walks through.
///
/// # Parameters
///
/// * `start_date` — Range start in [`DATE_FORMAT`].
/// * `end_date` — Range end in [`DATE_FORMAT`].
/// * `count` — Number of timestamps to produce; `0` yields an empty vector.
/// * `rng` — Randomness source.
///
/// # Returns
///
/// * `Ok(Vec<String>)` with exactly `count` sorted timestamps.
/// * `Err(String)` if either bound fails to parse or the range is inverted.
pub fn generate<R: Rng>(
    start_date: &str,
    end_date: &str,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, String> {
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;

    let mut results = Vec::with_capacity(count);
    for _ in 0..count {
        results.push(random_date(start, end, rng)?);
    }

    // Lexicographic order equals chronological order for this fixed pattern.
    results.sort();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hour_of(ts: &str) -> u32 {
        match parse_date(ts) {
            Ok(dt) => dt.hour(),
            Err(e) => panic!("generated timestamp failed to parse: {}", e),
        }
    }

    #[test]
    fn parse_accepts_the_fixed_pattern() {
        let dt = parse_date("1988-01-01T12:34:56").expect("parse failed");
        assert_eq!(dt.format(DATE_FORMAT).to_string(), "1988-01-01T12:34:56");
    }

    #[test]
    fn parse_rejects_other_shapes() {
        assert!(parse_date("1988-01-01 12:34:56").is_err());
        assert!(parse_date("not a date").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn zero_count_returns_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = generate("1988-01-01T12:34:56", "1988-12-25T12:34:56", 0, &mut rng)
            .expect("generate failed");
        assert!(out.is_empty());
    }

    #[test]
    fn generates_exactly_n_sorted_waking_hours_timestamps() {
        let mut rng = StdRng::seed_from_u64(42);
        let out = generate("2020-03-01T00:00:00", "2020-03-20T00:00:00", 50, &mut rng)
            .expect("generate failed");

        assert_eq!(out.len(), 50);
        for pair in out.windows(2) {
            assert!(pair[0] <= pair[1], "{} > {}", pair[0], pair[1]);
        }
        for ts in &out {
            let h = hour_of(ts);
            assert!((EARLIEST_HOUR..=LATEST_HOUR).contains(&h), "hour {} outside window", h);
        }
    }

    #[test]
    fn known_1988_range_produces_three_sorted_1988_dates() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = generate("1988-01-01T12:34:56", "1988-12-25T12:34:56", 3, &mut rng)
            .expect("generate failed");

        assert_eq!(out.len(), 3);
        for pair in out.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        for ts in &out {
            assert!(ts.starts_with("1988-"), "unexpected year in {}", ts);
            assert_eq!(ts.len(), "1988-01-01T12:34:56".len());
            let h = hour_of(ts);
            assert!((5..=23).contains(&h));
        }
    }

    #[test]
    fn single_day_range_stays_on_that_day() {
        let mut rng = StdRng::seed_from_u64(9);
        let out = generate("2021-06-15T08:00:00", "2021-06-15T22:00:00", 10, &mut rng)
            .expect("generate failed");
        for ts in &out {
            assert!(ts.starts_with("2021-06-15T"), "left the day: {}", ts);
        }
    }

    #[test]
    fn inverted_range_is_an_error() {
        let mut rng = StdRng::seed_from_u64(3);
        let res = generate("1990-06-01T00:00:00", "1989-01-01T00:00:00", 1, &mut rng);
        assert!(res.is_err());
    }
}
