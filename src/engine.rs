use crate::eta::FetchEtas;
use crate::normalize::{normalize, Countdown};
use crate::registry::{Location, RouteSet};
use chrono::{DateTime, Utc};
use std::{collections::HashMap, time::Duration};
use tokio::sync::watch;

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// The board's published state: countdowns per route label, and when
/// the last cycle finished. Replaced wholesale on publish; readers
/// never see a half-updated cycle.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub routes: HashMap<String, Vec<Countdown>>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// One pass over every route in the set, sequentially. A failed route
/// keeps whatever its slot already held; the clock is stamped after all
/// routes were attempted, failures included.
async fn run_cycle<S: FetchEtas>(source: &S, route_set: &RouteSet, snapshot: &mut Snapshot) {
    for (route, config) in route_set.iter() {
        match source.fetch(route, config).await {
            Ok(entries) => {
                let countdowns = normalize(&entries, config.seq, Utc::now());
                snapshot.routes.insert(route.to_string(), countdowns);
            }
            Err(e) => warn!("failed to fetch etas for route {} with error: '{}'", route, e),
        }
    }
    snapshot.last_updated = Some(Utc::now());
}

/// Drives refresh cycles: one on a fixed interval, and one immediately
/// whenever the location changes. Owns the snapshot; everything else
/// reads it through a [`BoardHandle`].
pub struct Engine<S> {
    source: S,
    interval: Duration,
    location_rx: watch::Receiver<Location>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl<S: FetchEtas> Engine<S> {
    pub fn new(source: S, location: Location, interval: Duration) -> (Engine<S>, BoardHandle) {
        let (location_tx, location_rx) = watch::channel(location);
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::default());
        (
            Engine {
                source,
                interval,
                location_rx,
                snapshot_tx,
            },
            BoardHandle {
                location_tx,
                snapshot_rx,
            },
        )
    }

    /// Runs until every [`BoardHandle`] is dropped. A location change
    /// discards the stale schedule and the old location's snapshot and
    /// starts a fresh cycle right away, so no keys leak across
    /// locations.
    pub async fn run(mut self) {
        loop {
            let location = *self.location_rx.borrow_and_update();
            let route_set = location.route_set();
            let mut snapshot = Snapshot::default();
            // the first tick fires immediately
            let mut interval = tokio::time::interval(self.interval);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        run_cycle(&self.source, route_set, &mut snapshot).await;
                        if self.snapshot_tx.send(snapshot.clone()).is_err() {
                            return;
                        }
                        info!("refreshed {} routes for {}", route_set.len(), location);
                    }
                    changed = self.location_rx.changed() => {
                        match changed {
                            Ok(()) => break,
                            Err(_) => return,
                        }
                    }
                }
            }
        }
    }
}

/// The presentation boundary: read the latest snapshot and the active
/// location, request a location change. Nothing else crosses over.
#[derive(Clone)]
pub struct BoardHandle {
    location_tx: watch::Sender<Location>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

impl BoardHandle {
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn location(&self) -> Location {
        *self.location_tx.borrow()
    }

    /// No-op when the location is already active; otherwise the engine
    /// restarts its schedule against the new route set.
    pub fn set_location(&self, location: Location) {
        self.location_tx.send_if_modified(|current| {
            if *current == location {
                false
            } else {
                *current = location;
                true
            }
        });
    }

    /// Change-driven consumers await `changed()` on the returned
    /// receiver instead of polling `snapshot()`.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }
}
