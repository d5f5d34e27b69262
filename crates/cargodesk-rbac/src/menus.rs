//! Top-level menu definitions.
//!
//! Exactly 5 menus exist, each a top-level functional area under
//! independent access control. Adding a menu is a versioned code change,
//! not a runtime concern.

use serde::{Deserialize, Serialize};

/// Number of menus in the fixed set.
pub const MENU_COUNT: usize = 5;

/// Top-level functional area of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Menu {
    /// Landing dashboard: shipment volumes, SLA tiles, revenue summary.
    Dashboard,

    /// KPI tracking: targets and attainment per seller and team.
    Kpi,

    /// Customer relationship management: leads, opportunities, activities.
    Crm,

    /// Operational ticketing: shipment issues, SLA clocks.
    Ticketing,

    /// Accounts receivable / days-sales-outstanding.
    Dso,
}

impl Menu {
    /// Canonical enumeration of every menu.
    pub const ALL: [Menu; MENU_COUNT] = [
        Menu::Dashboard,
        Menu::Kpi,
        Menu::Crm,
        Menu::Ticketing,
        Menu::Dso,
    ];

    /// Returns the wire name of this menu.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Menu::Dashboard => "Dashboard",
            Menu::Kpi => "KPI",
            Menu::Crm => "CRM",
            Menu::Ticketing => "Ticketing",
            Menu::Dso => "DSO",
        }
    }

    /// Parses a wire name into a menu (exact, case-sensitive).
    pub fn from_wire(candidate: &str) -> Option<Menu> {
        Menu::ALL.iter().copied().find(|m| m.wire_name() == candidate)
    }
}

impl std::fmt::Display for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_count() {
        assert_eq!(Menu::ALL.len(), 5);
    }

    #[test]
    fn test_wire_name_roundtrip() {
        for menu in Menu::ALL {
            assert_eq!(Menu::from_wire(menu.wire_name()), Some(menu));
        }
        assert_eq!(Menu::from_wire("Reports"), None);
        assert_eq!(Menu::from_wire("dso"), None); // case-sensitive
    }
}
