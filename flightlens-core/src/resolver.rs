//! Aircraft identification resolver — ordered fallback from primary data to
//! ICAO translation to live tracking and route inference.
//!
//! Pure state machine. [`start`] settles everything that needs no I/O and,
//! when the primary record is insufficient, hands back a [`Pending`] step that
//! already holds the route inference and the gate decision. The caller runs
//! the live lookup (or not) and calls [`Pending::finish`] with whatever came
//! back. The merge is deterministic in its inputs, so it does not matter how
//! the live lookup was scheduled.
//!
//! Resolution order, first match wins:
//!
//! 1. primary IATA type present → [`AircraftIdentity::Primary`]
//! 2. primary ICAO type translatable → [`AircraftIdentity::IcaoMapped`]
//! 3. route inference → [`AircraftIdentity::RouteInferred`], registration
//!    from live, else primary
//! 4. live registration → [`AircraftIdentity::LiveTracked`]
//! 5. [`AircraftIdentity::Unavailable`]

use chrono::{DateTime, Utc};

use crate::gate;
use crate::icao;
use crate::route::{self, AircraftSuggestion};
use crate::types::{AircraftIdentity, FlightSnapshot, LiveMatch, NOT_AVAILABLE};

/// Outcome of the I/O-free part of resolution.
#[derive(Debug)]
pub enum ResolveStep<'a> {
    /// Settled from the primary record alone.
    Done(AircraftIdentity),
    /// Needs the live-lookup result (possibly "none") to finish.
    AwaitLive(Pending<'a>),
}

/// Resolution waiting on the live lookup.
#[derive(Debug)]
pub struct Pending<'a> {
    snapshot: &'a FlightSnapshot,
    query_live: bool,
    suggestion: Option<AircraftSuggestion>,
}

/// Run the primary-record states and prepare the live/inference state.
pub fn start(snapshot: &FlightSnapshot, now: DateTime<Utc>) -> ResolveStep<'_> {
    if let Some(iata) = snapshot.primary_iata() {
        return ResolveStep::Done(AircraftIdentity::Primary {
            iata_type: iata.to_string(),
            icao_type: snapshot.primary_icao().map(str::to_string),
            registration: snapshot
                .primary_registration()
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
        });
    }

    if let Some(icao_type) = snapshot.primary_icao() {
        if let Some(iata) = icao::icao_to_iata(icao_type) {
            return ResolveStep::Done(AircraftIdentity::IcaoMapped {
                iata_type: iata.to_string(),
                icao_type: icao_type.to_string(),
                registration: snapshot.primary_registration().map(str::to_string),
            });
        }
    }

    ResolveStep::AwaitLive(Pending {
        snapshot,
        query_live: gate::is_worth_querying(snapshot.departure.scheduled, now),
        suggestion: route::infer(
            &snapshot.departure.iata,
            &snapshot.arrival.iata,
            &snapshot.airline,
        ),
    })
}

impl<'a> Pending<'a> {
    /// Callsign to look up on the live feed, or `None` when the flight is
    /// outside the lookup window.
    pub fn callsign(&self) -> Option<&'a str> {
        if self.query_live {
            Some(self.snapshot.flight_number.as_str())
        } else {
            None
        }
    }

    /// Route inference computed for this flight, if any.
    pub fn suggestion(&self) -> Option<&AircraftSuggestion> {
        self.suggestion.as_ref()
    }

    /// Merge the live result with the route inference.
    ///
    /// A live result passed in while the gate was closed is ignored.
    pub fn finish(self, live: Option<LiveMatch>) -> AircraftIdentity {
        let live_registration = live
            .filter(|_| self.query_live)
            .map(|m| m.registration.trim().to_string())
            .filter(|r| !r.is_empty());

        if let Some(s) = self.suggestion {
            let registration = live_registration
                .or_else(|| self.snapshot.primary_registration().map(str::to_string));
            return AircraftIdentity::RouteInferred {
                iata_type: s.iata,
                model: s.model,
                registration,
                confidence: s.confidence,
                reason: s.reason,
            };
        }

        match live_registration {
            Some(registration) => AircraftIdentity::LiveTracked {
                registration,
                callsign: self.snapshot.flight_number.clone(),
            },
            None => AircraftIdentity::Unavailable,
        }
    }
}

/// Resolve without a live source.
pub fn resolve_offline(snapshot: &FlightSnapshot, now: DateTime<Utc>) -> AircraftIdentity {
    match start(snapshot, now) {
        ResolveStep::Done(identity) => identity,
        ResolveStep::AwaitLive(pending) => pending.finish(None),
    }
}

/// Resolve with a synchronous live lookup. The lookup is only invoked when
/// the gate allows it.
pub fn resolve_with<F>(snapshot: &FlightSnapshot, now: DateTime<Utc>, lookup: F) -> AircraftIdentity
where
    F: FnOnce(&str) -> Option<LiveMatch>,
{
    match start(snapshot, now) {
        ResolveStep::Done(identity) => identity,
        ResolveStep::AwaitLive(pending) => {
            let live = pending.callsign().and_then(lookup);
            pending.finish(live)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Confidence, FlightEndpoint, PrimaryAircraft};
    use chrono::{Duration, TimeZone};
    use std::cell::Cell;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap()
    }

    fn endpoint(iata: &str, scheduled: DateTime<Utc>) -> FlightEndpoint {
        FlightEndpoint {
            airport: iata.into(),
            iata: iata.into(),
            scheduled,
            timezone: "UTC".into(),
            terminal: None,
            gate: None,
        }
    }

    fn snapshot(
        origin: &str,
        destination: &str,
        airline: &str,
        aircraft: Option<PrimaryAircraft>,
    ) -> FlightSnapshot {
        let departs = now() + Duration::hours(2);
        FlightSnapshot {
            flight_number: "BA117".into(),
            airline: airline.into(),
            status: "scheduled".into(),
            departure: endpoint(origin, departs),
            arrival: endpoint(destination, departs + Duration::hours(8)),
            aircraft,
        }
    }

    fn primary(reg: Option<&str>, iata: Option<&str>, icao: Option<&str>) -> Option<PrimaryAircraft> {
        Some(PrimaryAircraft {
            registration: reg.map(Into::into),
            iata_type: iata.map(Into::into),
            icao_type: icao.map(Into::into),
        })
    }

    fn live(reg: &str) -> LiveMatch {
        LiveMatch {
            registration: reg.into(),
            callsign: "BA117".into(),
        }
    }

    #[test]
    fn test_primary_iata_wins() {
        let snap = snapshot("JFK", "LHR", "British Airways", primary(Some("G-ZBKA"), Some("B789"), Some("B789")));
        assert_eq!(
            resolve_offline(&snap, now()),
            AircraftIdentity::Primary {
                iata_type: "B789".into(),
                icao_type: Some("B789".into()),
                registration: "G-ZBKA".into(),
            }
        );
    }

    #[test]
    fn test_primary_without_registration_uses_sentinel() {
        let snap = snapshot("JFK", "LHR", "British Airways", primary(None, Some("A388"), None));
        match resolve_offline(&snap, now()) {
            AircraftIdentity::Primary { registration, icao_type, .. } => {
                assert_eq!(registration, NOT_AVAILABLE);
                assert!(icao_type.is_none());
            }
            other => panic!("expected primary, got {other:?}"),
        }
    }

    #[test]
    fn test_primary_never_queries_live() {
        let called = Cell::new(false);
        let snap = snapshot("JFK", "LHR", "British Airways", primary(None, Some("B772"), None));
        let id = resolve_with(&snap, now(), |_| {
            called.set(true);
            None
        });
        assert_eq!(id.source(), "primary");
        assert!(!called.get());
    }

    #[test]
    fn test_icao_mapped() {
        let snap = snapshot("AVL", "CLT", "Nowhere Air", primary(None, None, Some("B38M")));
        assert_eq!(
            resolve_offline(&snap, now()),
            AircraftIdentity::IcaoMapped {
                iata_type: "B38M".into(),
                icao_type: "B38M".into(),
                registration: None,
            }
        );
    }

    #[test]
    fn test_icao_mapped_translates_and_keeps_registration() {
        let snap = snapshot("JFK", "LHR", "British Airways", primary(Some("G-STBA"), Some(""), Some("b77w")));
        assert_eq!(
            resolve_offline(&snap, now()),
            AircraftIdentity::IcaoMapped {
                iata_type: "B773".into(),
                icao_type: "b77w".into(),
                registration: Some("G-STBA".into()),
            }
        );
    }

    #[test]
    fn test_unknown_icao_falls_through_to_inference() {
        let snap = snapshot("JFK", "LHR", "British Airways", primary(None, None, Some("C172")));
        let id = resolve_offline(&snap, now());
        assert_eq!(id.source(), "route_inferred");
        assert_eq!(id.iata_type(), Some("B789"));
    }

    #[test]
    fn test_jfk_lhr_no_live_match_is_route_inferred() {
        let snap = snapshot("JFK", "LHR", "British Airways", None);
        let id = resolve_with(&snap, now(), |_| None);
        assert_eq!(
            id,
            AircraftIdentity::RouteInferred {
                iata_type: "B789".into(),
                model: "Boeing 787-9".into(),
                registration: None,
                confidence: Confidence::High,
                reason: "Long-haul route".into(),
            }
        );
        assert!(id.is_estimated());
    }

    #[test]
    fn test_live_registration_merged_into_inference() {
        let snap = snapshot("JFK", "LHR", "British Airways", primary(Some("G-OLD"), None, None));
        let id = resolve_with(&snap, now(), |cs| {
            assert_eq!(cs, "BA117");
            Some(live("4007f5"))
        });
        assert_eq!(id.source(), "route_inferred");
        assert_eq!(id.registration(), Some("4007f5"));
    }

    #[test]
    fn test_primary_registration_used_without_live() {
        let snap = snapshot("JFK", "LHR", "British Airways", primary(Some("G-ZBKB"), None, None));
        let id = resolve_with(&snap, now(), |_| None);
        assert_eq!(id.registration(), Some("G-ZBKB"));
    }

    #[test]
    fn test_live_only_is_live_tracked() {
        let snap = snapshot("AVL", "CLT", "Nowhere Air", None);
        let id = resolve_with(&snap, now(), |_| Some(live("a1b2c3")));
        assert_eq!(
            id,
            AircraftIdentity::LiveTracked {
                registration: "a1b2c3".into(),
                callsign: "BA117".into(),
            }
        );
    }

    #[test]
    fn test_nothing_known_is_unavailable() {
        let snap = snapshot("AVL", "CLT", "Nowhere Air", None);
        assert_eq!(resolve_with(&snap, now(), |_| None), AircraftIdentity::Unavailable);
    }

    #[test]
    fn test_gate_closed_skips_live_lookup() {
        let mut snap = snapshot("AVL", "CLT", "Nowhere Air", None);
        snap.departure.scheduled = now() + Duration::days(3);
        let called = Cell::new(false);
        let id = resolve_with(&snap, now(), |_| {
            called.set(true);
            Some(live("a1b2c3"))
        });
        assert!(!called.get());
        assert_eq!(id, AircraftIdentity::Unavailable);
    }

    #[test]
    fn test_pending_exposes_gate_and_suggestion() {
        let snap = snapshot("JFK", "LHR", "British Airways", None);
        match start(&snap, now()) {
            ResolveStep::AwaitLive(pending) => {
                assert_eq!(pending.callsign(), Some("BA117"));
                assert_eq!(pending.suggestion().map(|s| s.iata.as_str()), Some("B789"));
            }
            ResolveStep::Done(id) => panic!("unexpected early resolution: {id:?}"),
        }
    }

    #[test]
    fn test_finish_ignores_live_when_gate_closed() {
        let mut snap = snapshot("AVL", "CLT", "Nowhere Air", None);
        snap.departure.scheduled = now() - Duration::days(2);
        let ResolveStep::AwaitLive(pending) = start(&snap, now()) else {
            panic!("expected pending step");
        };
        assert!(pending.callsign().is_none());
        assert_eq!(pending.finish(Some(live("a1b2c3"))), AircraftIdentity::Unavailable);
    }

    #[test]
    fn test_blank_live_registration_is_ignored() {
        let snap = snapshot("AVL", "CLT", "Nowhere Air", None);
        let id = resolve_with(&snap, now(), |_| Some(live("  ")));
        assert_eq!(id, AircraftIdentity::Unavailable);
    }
}
