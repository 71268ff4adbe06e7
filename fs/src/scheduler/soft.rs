//! Soft placement of repeating items
//!
//! Items sharing an interval would otherwise all come due on the same tick.
//! Soft placement searches the interval by binary subdivision for a slot
//! that is not already occupied:
//!
//! ```text
//! last_ts                    last_ts + interval
//! |--------------------------|
//! 5  3   6   2   7  4   8   1     order of search
//! ```

/// Subdivision count after which the last candidate is accepted even if taken
pub const MAX_SOFT_SUBDIVISIONS: u32 = 16;

/// True if any stamp lies within `epsilon` of `ts`.
///
/// `stamps` must be sorted ascending; the scan stops at the first stamp past
/// `ts + epsilon`.
fn taken(stamps: &[f64], ts: f64, epsilon: f64) -> bool {
    for &stamp in stamps {
        if (stamp - ts).abs() <= epsilon {
            return true;
        }
        if stamp > ts + epsilon {
            return false;
        }
    }
    false
}

/// Pick a `next_ts` in `(last_ts, last_ts + interval]` away from occupied stamps
pub fn soft_next_ts(stamps: &[f64], last_ts: f64, interval: f64) -> f64 {
    let mut next_ts = last_ts + interval;
    if !taken(stamps, next_ts, interval / 4.0) {
        return next_ts;
    }

    let mut dt = interval;
    let mut divs: u32 = 1;
    loop {
        next_ts = last_ts;
        for _ in 0..divs.saturating_sub(1) {
            next_ts += dt;
            if !taken(stamps, next_ts, dt / 4.0) {
                return next_ts;
            }
        }
        dt /= 2.0;
        divs *= 2;

        if divs > MAX_SOFT_SUBDIVISIONS {
            return next_ts;
        }
    }
}
