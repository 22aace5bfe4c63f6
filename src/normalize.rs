use crate::eta::data::EtaEntry;
use chrono::{DateTime, Utc};

/// Display-ready arrival: whole minutes until the bus, and the
/// operator's remark carried through as-is. Negative minutes mean the
/// upstream still reports a bus that is already due or gone; it is
/// shown, not hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    pub minutes: i64,
    pub remark: String,
}

/// Filters `entries` to the boarding sequence this board tracks and
/// converts each arrival timestamp into countdown minutes relative to
/// `now`, rounding half away from zero on the millisecond quotient.
///
/// Upstream order is preserved (the API already sorts by soonest
/// arrival). No matches is a legitimate empty result, not an error.
pub fn normalize(entries: &[EtaEntry], expected_seq: u32, now: DateTime<Utc>) -> Vec<Countdown> {
    entries
        .iter()
        .filter(|entry| entry.seq == expected_seq)
        .filter_map(|entry| {
            let eta = match entry.eta.as_deref() {
                Some(eta) => eta,
                None => {
                    debug!(
                        "dropping eta-less record for route {} ('{}')",
                        entry.route, entry.rmk_tc
                    );
                    return None;
                }
            };
            match DateTime::parse_from_rfc3339(eta) {
                Ok(arrival) => {
                    let diff_ms =
                        arrival.with_timezone(&Utc).timestamp_millis() - now.timestamp_millis();
                    let minutes = (diff_ms as f64 / 60_000.0).round() as i64;
                    Some(Countdown {
                        minutes,
                        remark: entry.rmk_tc.clone(),
                    })
                }
                Err(e) => {
                    warn!(
                        "dropping record for route {} with unparseable eta '{}': {}",
                        entry.route, eta, e
                    );
                    None
                }
            }
        })
        .collect()
}
