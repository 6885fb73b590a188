//! Order status state machine.
//!
//! An order moves through a fixed lifecycle assigned by the external store:
//!
//! ```text
//! processing -> preparing -> delivering -> delivered
//! ```
//!
//! The sequence is totally ordered. A status never moves backward, never
//! skips a stage, and `delivered` is terminal. [`OrderStatus::can_transition`]
//! is the single eligibility rule; callers must reject any proposed change it
//! refuses before contacting the store.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Wire format is the lowercase name (`"processing"`, `"preparing"`, ...),
/// matching the external orders API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order received, not yet started.
    #[default]
    Processing,
    /// Being prepared in the kitchen.
    Preparing,
    /// Out for delivery.
    Delivering,
    /// Handed to the customer. Terminal.
    Delivered,
}

/// Presentation data for one status: label, badge class, icon name.
///
/// Indexed once by [`OrderStatus::display`]; no per-status dispatch anywhere
/// else in the codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    /// Customer-facing label (French).
    pub label: &'static str,
    /// CSS class suffix for the status badge.
    pub badge: &'static str,
    /// Icon name rendered next to the label.
    pub icon: &'static str,
}

/// Presentation table, in lifecycle order.
const DISPLAY: [StatusDisplay; 4] = [
    StatusDisplay {
        label: "En traitement",
        badge: "warning",
        icon: "clock",
    },
    StatusDisplay {
        label: "En préparation",
        badge: "info",
        icon: "package",
    },
    StatusDisplay {
        label: "En livraison",
        badge: "primary",
        icon: "truck",
    },
    StatusDisplay {
        label: "Livrée",
        badge: "success",
        icon: "check-circle",
    },
];

impl OrderStatus {
    /// The fixed lifecycle sequence.
    pub const SEQUENCE: [Self; 4] = [
        Self::Processing,
        Self::Preparing,
        Self::Delivering,
        Self::Delivered,
    ];

    /// Position of this status in the lifecycle sequence.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Processing => 0,
            Self::Preparing => 1,
            Self::Delivering => 2,
            Self::Delivered => 3,
        }
    }

    /// The immediate successor, or `None` for the terminal status.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Processing => Some(Self::Preparing),
            Self::Preparing => Some(Self::Delivering),
            Self::Delivering => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Whether a proposed status change is eligible.
    ///
    /// True iff `target` equals `self` (a no-op refresh) or is the immediate
    /// successor. Backward moves, skips, and anything out of `Delivered` are
    /// refused.
    #[must_use]
    pub fn can_transition(self, target: Self) -> bool {
        target == self || Some(target) == self.next()
    }

    /// Presentation data for this status.
    #[must_use]
    pub const fn display(self) -> &'static StatusDisplay {
        // SEQUENCE order matches the DISPLAY table
        match self {
            Self::Processing => &DISPLAY[0],
            Self::Preparing => &DISPLAY[1],
            Self::Delivering => &DISPLAY[2],
            Self::Delivered => &DISPLAY[3],
        }
    }

    /// The wire-format name (lowercase).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Preparing => "preparing",
            Self::Delivering => "delivering",
            Self::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(Self::Processing),
            "preparing" => Ok(Self::Preparing),
            "delivering" => Ok(Self::Delivering),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::{Delivered, Delivering, Preparing, Processing};

    #[test]
    fn test_self_transition_always_allowed() {
        for status in OrderStatus::SEQUENCE {
            assert!(status.can_transition(status), "{status} -> {status}");
        }
    }

    #[test]
    fn test_adjacent_forward_allowed() {
        assert!(Processing.can_transition(Preparing));
        assert!(Preparing.can_transition(Delivering));
        assert!(Delivering.can_transition(Delivered));
    }

    #[test]
    fn test_backward_rejected() {
        assert!(!Preparing.can_transition(Processing));
        assert!(!Delivering.can_transition(Preparing));
        assert!(!Delivered.can_transition(Delivering));
        assert!(!Delivered.can_transition(Processing));
    }

    #[test]
    fn test_skipping_rejected() {
        assert!(!Processing.can_transition(Delivering));
        assert!(!Processing.can_transition(Delivered));
        assert!(!Preparing.can_transition(Delivered));
    }

    #[test]
    fn test_delivered_is_terminal() {
        assert_eq!(Delivered.next(), None);
        for target in OrderStatus::SEQUENCE {
            if target != Delivered {
                assert!(!Delivered.can_transition(target), "delivered -> {target}");
            }
        }
    }

    #[test]
    fn test_sequence_order_matches_index() {
        for (i, status) in OrderStatus::SEQUENCE.iter().enumerate() {
            assert_eq!(status.index(), i);
        }
    }

    #[test]
    fn test_wire_format_roundtrip() {
        let json = serde_json::to_string(&Preparing).expect("serialize");
        assert_eq!(json, "\"preparing\"");
        let back: OrderStatus = serde_json::from_str("\"delivering\"").expect("deserialize");
        assert_eq!(back, Delivering);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert!("Processing".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Processing.display().label, "En traitement");
        assert_eq!(Delivered.display().icon, "check-circle");
    }
}
