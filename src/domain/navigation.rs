//! Screen state machine.
//!
//! Screens form a closed set; every forward move goes through [`transition`]
//! and every back move through [`back`]. Back is a fixed predecessor table,
//! not a history stack.

use super::models::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    // ---
    Splash,
    AboutApp,
    Auth,
    Map,
    Details,
    Reservation,
    Payment,
    Profile,
    Admin,
    Scan,
    News,
    Support,
}

/// Sub-views of the profile screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileTab {
    // ---
    #[default]
    Main,
    Garage,
    Wallet,
    History,
    Favorites,
    Achievements,
}

/// User actions (and timers) that move between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    // ---
    SplashElapsed,
    Start,
    LoggedIn(Role),
    Logout,
    OpenSpot,
    BeginReservation,
    Booked,
    StartRoute,
    BackToMap,
    OpenProfile,
    OpenAdmin,
    OpenNews,
    OpenSupport,
    OpenScan,
    ScanCompleted,
    ServiceRequested,
}

impl NavAction {
    // ---
    /// Actions a user may trigger directly. The others only follow from a
    /// completed operation (sign-in, booking, scan, service call, timers).
    pub fn is_user_action(self) -> bool {
        // ---
        matches!(
            self,
            Self::Start
                | Self::BackToMap
                | Self::OpenProfile
                | Self::OpenAdmin
                | Self::OpenNews
                | Self::OpenSupport
                | Self::OpenScan
        )
    }
}

/// Screens reachable from the bottom navigation bar.
fn has_tab_bar(screen: Screen) -> bool {
    // ---
    matches!(
        screen,
        Screen::Map | Screen::Profile | Screen::News | Screen::Support | Screen::Scan
    )
}

/// Returns the screen `action` leads to from `from`, or `None` when the
/// action is not available there.
pub fn transition(from: Screen, action: NavAction) -> Option<Screen> {
    // ---
    use NavAction as A;
    use Screen as S;

    let to = match (from, action) {
        (S::Splash, A::SplashElapsed) => S::AboutApp,
        (S::AboutApp, A::Start) => S::Auth,
        (S::Auth, A::LoggedIn(Role::Admin)) => S::Admin,
        (S::Auth, A::LoggedIn(Role::User)) => S::Map,
        (S::Profile | S::Admin, A::Logout) => S::Auth,

        (S::Map | S::Profile, A::OpenSpot) => S::Details,
        (S::Details, A::BeginReservation) => S::Reservation,
        (S::Details, A::StartRoute) => S::Map,
        (S::Reservation, A::Booked) => S::Payment,
        (S::Payment, A::BackToMap) => S::Map,

        (S::Profile, A::OpenAdmin) => S::Admin,
        (S::Scan, A::ScanCompleted) => S::Map,
        (S::Support, A::ServiceRequested) => S::Map,

        (s, A::BackToMap) if has_tab_bar(s) => S::Map,
        (s, A::OpenProfile) if has_tab_bar(s) || s == S::Admin => S::Profile,
        (s, A::OpenNews) if has_tab_bar(s) => S::News,
        (s, A::OpenSupport) if has_tab_bar(s) => S::Support,
        (s, A::OpenScan) if has_tab_bar(s) => S::Scan,

        _ => return None,
    };

    Some(to)
}

/// Hard-coded predecessor of `screen`; `None` means back is a no-op.
pub fn back(screen: Screen) -> Option<Screen> {
    // ---
    use Screen as S;

    match screen {
        S::Details => Some(S::Map),
        S::Reservation => Some(S::Details),
        S::Payment | S::Profile | S::News | S::Scan | S::Support => Some(S::Map),
        S::Admin => Some(S::Profile),
        S::Auth => Some(S::AboutApp),
        S::Splash | S::AboutApp | S::Map => None,
    }
}

/// Current navigation position: screen, profile sub-view and route mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    // ---
    screen: Screen,
    profile_tab: ProfileTab,
    routing: bool,
}

impl Default for Navigator {
    // ---
    fn default() -> Self {
        // ---
        Self {
            screen: Screen::Splash,
            profile_tab: ProfileTab::Main,
            routing: false,
        }
    }
}

impl Navigator {
    // ---
    /// Fresh navigator positioned on `screen`, main tab, no route.
    pub fn at(screen: Screen) -> Self {
        // ---
        Self {
            screen,
            ..Self::default()
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn profile_tab(&self) -> ProfileTab {
        self.profile_tab
    }

    /// True while turn-by-turn routing to the selected spot is shown.
    pub fn is_routing(&self) -> bool {
        self.routing
    }

    /// Applies `action`; returns false and stays put when it is not allowed.
    pub fn apply(&mut self, action: NavAction) -> bool {
        // ---
        match transition(self.screen, action) {
            Some(next) => {
                tracing::debug!("navigate {:?} -> {:?} via {:?}", self.screen, next, action);
                if action == NavAction::StartRoute {
                    self.routing = true;
                }
                self.screen = next;
                true
            }
            None => {
                tracing::debug!("ignored {:?} on {:?}", action, self.screen);
                false
            }
        }
    }

    pub fn open_tab(&mut self, tab: ProfileTab) {
        // ---
        self.profile_tab = tab;
    }

    pub fn stop_routing(&mut self) {
        // ---
        self.routing = false;
    }

    /// Back closes an open profile tab first, then follows [`back`].
    pub fn go_back(&mut self) -> Screen {
        // ---
        if self.profile_tab != ProfileTab::Main {
            self.profile_tab = ProfileTab::Main;
            return self.screen;
        }

        if let Some(prev) = back(self.screen) {
            if self.screen == Screen::Details {
                self.routing = false;
            }
            self.screen = prev;
        }

        self.screen
    }
}
