//! Booking aggregate and its status state machine.
//!
//! ```text
//! PENDING ──► ACCEPTED ──► COMPLETED
//!    │
//!    └──────► REJECTED
//! ```
//!
//! COMPLETED and REJECTED are terminal. Only the provider recorded on the
//! booking may drive transitions.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::catalog::ServiceSummary;
use super::error::BookingError;
use super::user::UserSummary;
use crate::config::{STATUS_ACCEPTED, STATUS_COMPLETED, STATUS_PENDING, STATUS_REJECTED};
use crate::errors::AppError;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => STATUS_PENDING,
            BookingStatus::Accepted => STATUS_ACCEPTED,
            BookingStatus::Rejected => STATUS_REJECTED,
            BookingStatus::Completed => STATUS_COMPLETED,
        }
    }

    /// No transition leaves a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Rejected)
    }

    /// Validate a move from `self` to `next`, returning the new status.
    pub fn transition_to(self, next: BookingStatus) -> Result<BookingStatus, BookingError> {
        if self.is_terminal() {
            return Err(BookingError::TerminalState(self));
        }

        let allowed = match self {
            BookingStatus::Pending => {
                matches!(next, BookingStatus::Accepted | BookingStatus::Rejected)
            }
            BookingStatus::Accepted => matches!(next, BookingStatus::Completed),
            BookingStatus::Rejected | BookingStatus::Completed => false,
        };

        if allowed {
            Ok(next)
        } else {
            Err(BookingError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(BookingStatus::Pending),
            STATUS_ACCEPTED => Ok(BookingStatus::Accepted),
            STATUS_REJECTED => Ok(BookingStatus::Rejected),
            STATUS_COMPLETED => Ok(BookingStatus::Completed),
            other => Err(AppError::internal(format!(
                "Unknown booking status stored: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Start a new booking in PENDING.
    pub fn new(client_id: Uuid, provider_id: Uuid, service_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            provider_id,
            service_id,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Check the acting provider against the booking's own provider
    /// reference and validate the transition. Returns the new status.
    pub fn plan_transition(
        &self,
        acting_provider_id: Uuid,
        next: BookingStatus,
    ) -> Result<BookingStatus, BookingError> {
        if self.provider_id != acting_provider_id {
            return Err(BookingError::Unauthorized);
        }
        self.status.transition_to(next)
    }
}

/// Booking enriched with client, provider and service summaries
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub id: Uuid,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub client: UserSummary,
    pub provider: UserSummary,
    pub service: ServiceSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Accepted,
        BookingStatus::Rejected,
        BookingStatus::Completed,
    ];

    #[test]
    fn test_allowed_transitions() {
        assert_eq!(
            BookingStatus::Pending.transition_to(BookingStatus::Accepted),
            Ok(BookingStatus::Accepted)
        );
        assert_eq!(
            BookingStatus::Pending.transition_to(BookingStatus::Rejected),
            Ok(BookingStatus::Rejected)
        );
        assert_eq!(
            BookingStatus::Accepted.transition_to(BookingStatus::Completed),
            Ok(BookingStatus::Completed)
        );
    }

    #[test]
    fn test_only_three_edges_exist() {
        let mut allowed = Vec::new();
        for from in ALL {
            for to in ALL {
                if from.transition_to(to).is_ok() {
                    allowed.push((from, to));
                }
            }
        }

        assert_eq!(
            allowed,
            vec![
                (BookingStatus::Pending, BookingStatus::Accepted),
                (BookingStatus::Pending, BookingStatus::Rejected),
                (BookingStatus::Accepted, BookingStatus::Completed),
            ]
        );
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for terminal in [BookingStatus::Completed, BookingStatus::Rejected] {
            for to in ALL {
                assert_eq!(
                    terminal.transition_to(to),
                    Err(BookingError::TerminalState(terminal))
                );
            }
        }
    }

    #[test]
    fn test_backwards_move_is_invalid_transition() {
        assert_eq!(
            BookingStatus::Accepted.transition_to(BookingStatus::Pending),
            Err(BookingError::InvalidTransition {
                from: BookingStatus::Accepted,
                to: BookingStatus::Pending,
            })
        );
        assert!(matches!(
            BookingStatus::Pending.transition_to(BookingStatus::Completed),
            Err(BookingError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_plan_transition_checks_booking_provider_first() {
        let provider = Uuid::new_v4();
        let booking = Booking::new(Uuid::new_v4(), provider, Uuid::new_v4());

        assert_eq!(
            booking.plan_transition(Uuid::new_v4(), BookingStatus::Accepted),
            Err(BookingError::Unauthorized)
        );
        assert_eq!(
            booking.plan_transition(provider, BookingStatus::Accepted),
            Ok(BookingStatus::Accepted)
        );
    }

    #[test]
    fn test_status_parse_and_display() {
        for status in ALL {
            assert_eq!(status.to_string().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("CANCELLED".parse::<BookingStatus>().is_err());
    }
}
