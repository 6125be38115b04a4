//! Server reachability status.
//!
//! The monitor itself lives in the client crate; this module holds the
//! status enum and the pure probe transition so the state machine is
//! testable without timers or sockets.

use serde::{Deserialize, Serialize};

/// Tri-state reachability of the backing server.
///
/// `Checking` is only ever the initial value; once the first probe
/// completes the status flips between `Online` and `Offline` and never
/// returns to `Checking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Checking,
    Online,
    Offline,
}

/// Outcome of a single health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The probe got an HTTP response with this status code.
    Responded { status: u16 },
    /// The probe exceeded its timeout budget.
    TimedOut,
    /// The probe failed at the transport level.
    Unreachable,
}

impl ServerStatus {
    /// Transition applied after every probe. Any 2xx response means
    /// online; everything else, timeout and transport failure included,
    /// means offline.
    pub fn after_probe(outcome: ProbeOutcome) -> ServerStatus {
        match outcome {
            ProbeOutcome::Responded { status } if (200..300).contains(&status) => {
                ServerStatus::Online
            }
            _ => ServerStatus::Offline,
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, ServerStatus::Online)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_xx_is_online() {
        for status in [200, 201, 204, 299] {
            assert_eq!(
                ServerStatus::after_probe(ProbeOutcome::Responded { status }),
                ServerStatus::Online
            );
        }
    }

    #[test]
    fn non_two_xx_is_offline() {
        for status in [199, 301, 404, 500, 503] {
            assert_eq!(
                ServerStatus::after_probe(ProbeOutcome::Responded { status }),
                ServerStatus::Offline
            );
        }
    }

    #[test]
    fn timeout_and_transport_failure_are_offline() {
        assert_eq!(
            ServerStatus::after_probe(ProbeOutcome::TimedOut),
            ServerStatus::Offline
        );
        assert_eq!(
            ServerStatus::after_probe(ProbeOutcome::Unreachable),
            ServerStatus::Offline
        );
    }

    #[test]
    fn checking_is_never_a_transition_target() {
        let outcomes = [
            ProbeOutcome::Responded { status: 200 },
            ProbeOutcome::Responded { status: 500 },
            ProbeOutcome::TimedOut,
            ProbeOutcome::Unreachable,
        ];
        for outcome in outcomes {
            assert_ne!(ServerStatus::after_probe(outcome), ServerStatus::Checking);
        }
    }
}
