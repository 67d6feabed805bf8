//! Application controller.
//!
//! `AppController` is the one owner of client state. Every user action is a
//! method here; each runs to completion before the next is handled. Failures
//! never escape as a fatal state: they become a toast and, where a caller
//! cares, a returned error.

use crate::config::BookingConfig;
use crate::domain::filter::SpotFilter;
use crate::domain::layout;
use crate::domain::navigation::{NavAction, Navigator, ProfileTab, Screen};
use crate::domain::pricing::total_price;
use crate::domain::weather::{WeatherReading, WeatherState};
use crate::domain::{
    AdminStat, BackendPtr, BalanceChange, ClientError, ClockPtr, GeoPoint, NewsItem, ParkingSpot,
    Reservation, ReservationRequest, Role, Transaction, TransactionKind,
};
use crate::infrastructure::fixtures;
use crate::infrastructure::simulator::AvailabilitySimulator;
use crate::state::ClientStore;
use crate::toast::ToastQueue;
use anyhow::Result;
use uuid::Uuid;

/// Bonus points granted per booking.
pub const BOOKING_BONUS_POINTS: i64 = 10;

/// Amount added by one wallet top-up.
pub const TOP_UP_AMOUNT: i64 = 50_000;

/// Sign-in identity used for each role.
fn login_email(role: Role) -> &'static str {
    // ---
    match role {
        Role::Admin => "admin@smart.uz",
        Role::User => "diyorbek@gmail.com",
    }
}

fn transaction_id() -> String {
    format!("t-{}", Uuid::new_v4().simple())
}

/// Kinds of problem a user can report about a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    // ---
    Full,
    Price,
    Closed,
}

/// Choices made on the reservation screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    // ---
    pub duration_hours: u32,
    pub car_type: String,
    pub payment_method: String,
    pub slot: Option<String>,
}

impl Default for BookingDraft {
    // ---
    fn default() -> Self {
        // ---
        Self {
            duration_hours: 1,
            car_type: "sedan".to_string(),
            payment_method: "payme".to_string(),
            slot: None,
        }
    }
}

pub struct AppController {
    // ---
    backend: BackendPtr,
    store: ClientStore,
    simulator: AvailabilitySimulator,
    clock: ClockPtr,
    booking: BookingConfig,

    nav: Navigator,
    toasts: ToastQueue,

    selected_spot: Option<String>,
    draft: BookingDraft,
    last_reservation: Option<Reservation>,
    admin_stats: Vec<AdminStat>,

    filter: SpotFilter,
    search_query: String,
    active_search: String,

    user_location: Option<GeoPoint>,
    map_center: Option<GeoPoint>,
    weather: WeatherState,
}

impl AppController {
    // ---
    pub fn new(
        backend: BackendPtr,
        store: ClientStore,
        simulator: AvailabilitySimulator,
        clock: ClockPtr,
        booking: BookingConfig,
    ) -> Self {
        // ---
        Self {
            backend,
            store,
            simulator,
            clock,
            booking,
            nav: Navigator::default(),
            toasts: ToastQueue::default(),
            selected_spot: None,
            draft: BookingDraft::default(),
            last_reservation: None,
            admin_stats: Vec::new(),
            filter: SpotFilter::default(),
            search_query: String::new(),
            active_search: String::new(),
            user_location: None,
            map_center: None,
            weather: WeatherState::default(),
        }
    }

    // ============================================================
    // Read access
    // ============================================================

    pub fn screen(&self) -> Screen {
        self.nav.screen()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn store(&self) -> &ClientStore {
        &self.store
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn last_reservation(&self) -> Option<&Reservation> {
        self.last_reservation.as_ref()
    }

    pub fn admin_stats(&self) -> &[AdminStat] {
        &self.admin_stats
    }

    pub fn weather(&self) -> &WeatherState {
        &self.weather
    }

    pub fn user_location(&self) -> Option<GeoPoint> {
        self.user_location
    }

    pub fn news(&self) -> Vec<NewsItem> {
        fixtures::news()
    }

    pub fn selected_spot(&self) -> Option<&ParkingSpot> {
        // ---
        self.selected_spot
            .as_deref()
            .and_then(|id| self.store.spot(id))
    }

    /// Spots passing the current filter and the debounced search.
    pub fn filtered_spots(&self) -> Vec<&ParkingSpot> {
        // ---
        self.filter.apply(self.store.spots(), &self.active_search)
    }

    /// Spots marked as favorite, in favorite order.
    pub fn favorite_spots(&self) -> Vec<&ParkingSpot> {
        // ---
        self.store
            .favorites()
            .iter()
            .filter_map(|id| self.store.spot(id))
            .collect()
    }

    // ============================================================
    // Navigation
    // ============================================================

    /// Applies a user-triggered navigation action; false when unavailable
    /// here. Actions that follow from an operation (sign-in, booking, scan,
    /// service call, timers) are refused, and only admins open the admin
    /// screen.
    pub fn navigate(&mut self, action: NavAction) -> bool {
        // ---
        if !action.is_user_action() {
            tracing::warn!("refused internal navigation {:?}", action);
            return false;
        }
        if action == NavAction::OpenAdmin && !self.store.user().is_some_and(|u| u.is_admin()) {
            tracing::warn!("refused admin screen without an admin session");
            return false;
        }
        self.nav.apply(action)
    }

    pub fn go_back(&mut self) -> Screen {
        self.nav.go_back()
    }

    pub fn open_profile_tab(&mut self, tab: ProfileTab) {
        self.nav.open_tab(tab);
    }

    pub fn splash_elapsed(&mut self) {
        // ---
        self.nav.apply(NavAction::SplashElapsed);
    }

    /// Starts route guidance to the selected spot.
    pub fn navigate_to_selected(&mut self) {
        // ---
        if self.nav.apply(NavAction::StartRoute) {
            self.toasts.info("toast_route");
        }
    }

    pub fn cancel_navigation(&mut self) {
        self.nav.stop_routing();
    }

    // ============================================================
    // Session
    // ============================================================

    /// Signs in with the canned identity for `role` and loads the session data.
    #[tracing::instrument(skip(self))]
    pub async fn login(&mut self, role: Role) -> Result<()> {
        // ---
        let user = match self.backend.login(login_email(role), role).await {
            Ok(user) => user,
            Err(err) => {
                tracing::error!("Login failed: {:?}", err);
                self.toasts.error("toast_error");
                return Err(err);
            }
        };

        tracing::info!("Signed in as {} ({:?})", user.id, user.role);
        let role = user.role;
        self.store.set_user(Some(user)).await;

        if self.screen() != Screen::Auth {
            // Sign-in from anywhere lands as if made from the auth screen.
            self.nav = Navigator::at(Screen::Auth);
        }
        self.nav.apply(NavAction::LoggedIn(role));
        self.toasts.success("toast_login");

        self.refresh().await;
        Ok(())
    }

    pub async fn logout(&mut self) {
        // ---
        self.store.set_user(None).await;
        self.admin_stats.clear();
        self.selected_spot = None;
        self.draft = BookingDraft::default();
        self.last_reservation = None;
        self.nav = Navigator::at(Screen::Auth);
    }

    /// Reloads spots and, for a signed-in user, reservations, transactions
    /// and (for admins) statistics. Failures keep the previous values.
    pub async fn refresh(&mut self) {
        // ---
        match self.backend.list_spots().await {
            Ok(spots) => self.store.set_spots(spots),
            Err(err) => tracing::error!("Failed to fetch spots: {:?}", err),
        }

        let Some(user) = self.store.user().cloned() else {
            return;
        };

        let (reservations, transactions) = futures::join!(
            self.backend.list_reservations(&user.id),
            self.backend.list_transactions(&user.id)
        );

        match reservations {
            Ok(list) => self.store.set_reservations(list).await,
            Err(err) => tracing::error!("Failed to fetch reservations: {:?}", err),
        }
        match transactions {
            Ok(list) => self.store.set_transactions(list).await,
            Err(err) => tracing::error!("Failed to fetch transactions: {:?}", err),
        }

        if user.is_admin() {
            match self.backend.get_admin_stats().await {
                Ok(stats) => self.admin_stats = stats,
                Err(err) => tracing::error!("Failed to fetch stats: {:?}", err),
            }
        }
    }

    // ============================================================
    // Spot discovery
    // ============================================================

    pub fn set_filter(&mut self, filter: SpotFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> SpotFilter {
        self.filter
    }

    /// Records raw search input; it takes effect via [`apply_search`](Self::apply_search).
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Query the spot list is currently filtered by.
    pub fn active_search(&self) -> &str {
        &self.active_search
    }

    /// Makes the current raw query the active search (called after debounce).
    pub fn apply_search(&mut self) {
        // ---
        if self.active_search != self.search_query {
            tracing::debug!("search: {:?}", self.search_query);
            self.active_search = self.search_query.clone();
        }
    }

    /// Explicit search button.
    pub fn global_search(&mut self) {
        // ---
        if self.search_query.is_empty() {
            return;
        }
        self.apply_search();
        self.toasts.info("searching");
    }

    pub fn select_spot(&mut self, spot_id: &str) -> Result<()> {
        // ---
        if self.store.spot(spot_id).is_none() {
            return Err(ClientError::SpotNotFound(spot_id.to_string()).into());
        }
        self.selected_spot = Some(spot_id.to_string());
        self.nav.apply(NavAction::OpenSpot);
        Ok(())
    }

    pub async fn toggle_favorite(&mut self, spot_id: &str) -> bool {
        // ---
        let now_favorite = self.store.toggle_favorite(spot_id).await;
        if now_favorite {
            self.toasts.success("toast_fav_add");
        } else {
            self.toasts.info("toast_fav_remove");
        }
        now_favorite
    }

    /// Advances the availability simulation by one step.
    pub fn tick_availability(&mut self) -> usize {
        // ---
        let spots = self.store.spots_mut();
        self.simulator.tick(spots)
    }

    // ============================================================
    // Booking
    // ============================================================

    pub fn begin_reservation(&mut self) -> bool {
        self.nav.apply(NavAction::BeginReservation)
    }

    pub fn set_duration(&mut self, hours: u32) {
        self.draft.duration_hours = hours.max(1);
    }

    pub fn set_car_type(&mut self, car_type: impl Into<String>) {
        self.draft.car_type = car_type.into();
    }

    pub fn set_payment_method(&mut self, method: impl Into<String>) {
        self.draft.payment_method = method.into();
    }

    /// Picks a bay; occupied or unknown bays are refused.
    pub fn select_slot(&mut self, slot_id: &str) -> Result<()> {
        // ---
        if !layout::is_selectable(slot_id) {
            return Err(ClientError::SlotOccupied(slot_id.to_string()).into());
        }
        self.draft.slot = Some(slot_id.to_string());
        Ok(())
    }

    /// Whether the reserve action is enabled.
    pub fn can_reserve(&self) -> bool {
        // ---
        self.store.user().is_some() && self.selected_spot().is_some() && self.draft.slot.is_some()
    }

    /// Price shown on the reservation screen for the current draft.
    pub fn quote(&self) -> Option<i64> {
        // ---
        let spot = self.selected_spot()?;
        Some(total_price(
            spot.base_price_per_hour,
            self.clock.local_hour(),
            self.draft.duration_hours,
            fixtures::car_multiplier(&self.draft.car_type),
        ))
    }

    fn check_bookable(&self) -> Result<(ParkingSpot, String, String)> {
        // ---
        let user = self.store.user().ok_or(ClientError::NotLoggedIn)?;
        let spot_id = self.selected_spot.clone().ok_or(ClientError::NoSpotSelected)?;
        let slot = self.draft.slot.clone().ok_or(ClientError::NoSlotSelected)?;

        let spot = self
            .store
            .spot(&spot_id)
            .cloned()
            .ok_or_else(|| ClientError::SpotNotFound(spot_id.clone()))?;

        if self.booking.enforce_capacity && spot.available_spots == 0 {
            return Err(ClientError::SpotFull(spot_id).into());
        }

        Ok((spot, user.id.clone(), slot))
    }

    /// Books the selected spot with the current draft.
    ///
    /// On success the reservation and a payment transaction are prepended,
    /// the wallet is debited for wallet-backed methods, bonus points are
    /// granted, one bay is taken, and the payment screen opens. On failure
    /// nothing changes except an error toast.
    #[tracing::instrument(skip(self))]
    pub async fn reserve(&mut self) -> Result<Reservation> {
        // ---
        let (spot, user_id, slot) = match self.check_bookable() {
            Ok(parts) => parts,
            Err(err) => {
                self.toasts.error("toast_error");
                return Err(err);
            }
        };

        let request = ReservationRequest {
            spot_id: spot.id.clone(),
            user_id,
            duration: self.draft.duration_hours,
            car_type: self.draft.car_type.clone(),
            payment_method: self.draft.payment_method.clone(),
        };

        let mut reservation = match self.backend.create_reservation(request).await {
            Ok(reservation) => reservation,
            Err(err) => {
                tracing::warn!("Booking {} failed: {}", spot.id, err);
                self.toasts.error("toast_error");
                return Err(err);
            }
        };
        reservation.parking_name.push_str(&format!(" (spot {slot})"));

        let total = reservation.total_price;
        let debit = fixtures::debits_wallet(&self.draft.payment_method);
        self.store
            .update_user(|user| {
                if debit {
                    user.balance -= total;
                }
                user.bonus_points += BOOKING_BONUS_POINTS;
            })
            .await;

        self.store.prepend_reservation(reservation.clone()).await;
        self.store
            .prepend_transaction(Transaction {
                id: transaction_id(),
                kind: TransactionKind::Payment,
                amount: total,
                date: self.clock.now(),
                description: format!("Parkovka: {}", spot.name),
            })
            .await;

        if let Some(live) = self.store.spot_mut(&spot.id) {
            live.take_one();
        }

        self.last_reservation = Some(reservation.clone());
        self.nav.apply(NavAction::Booked);
        self.toasts.success("toast_booked");

        Ok(reservation)
    }

    // ============================================================
    // Profile, garage and wallet
    // ============================================================

    pub async fn add_car(&mut self, plate: &str) -> bool {
        // ---
        let plate = plate.trim();
        if plate.is_empty() {
            return false;
        }
        let added = self
            .store
            .update_user(|user| user.garage.push(plate.to_string()))
            .await;
        if added {
            self.toasts.success("car_added");
        }
        added
    }

    pub async fn remove_car(&mut self, plate: &str) -> bool {
        // ---
        let removed = self
            .store
            .update_user(|user| user.garage.retain(|p| p != plate))
            .await;
        if removed {
            self.toasts.info("car_removed");
        }
        removed
    }

    /// Adds [`TOP_UP_AMOUNT`] to the wallet and records a deposit.
    #[tracing::instrument(skip(self))]
    pub async fn top_up(&mut self) -> Result<i64> {
        // ---
        let user_id = match self.store.user() {
            Some(user) => user.id.clone(),
            None => return Err(ClientError::NotLoggedIn.into()),
        };

        let delta = match self
            .backend
            .update_balance(&user_id, TOP_UP_AMOUNT, BalanceChange::Deposit)
            .await
        {
            Ok(delta) => delta,
            Err(err) => {
                self.toasts.error("toast_error");
                return Err(err);
            }
        };

        self.store.update_user(|user| user.balance += delta).await;
        self.store
            .prepend_transaction(Transaction {
                id: transaction_id(),
                kind: TransactionKind::Deposit,
                amount: delta,
                date: self.clock.now(),
                description: "top_up".to_string(),
            })
            .await;
        self.toasts.success("toast_topup");

        Ok(self.store.user().map(|u| u.balance).unwrap_or_default())
    }

    // ============================================================
    // Location and parked car
    // ============================================================

    /// Latest position fix; later fixes simply overwrite earlier ones.
    pub fn update_location(&mut self, point: GeoPoint) {
        self.user_location = Some(point);
    }

    pub fn set_map_center(&mut self, point: GeoPoint) {
        self.map_center = Some(point);
    }

    /// Remembers where the car is parked, or returns the saved spot.
    ///
    /// Uses the last position fix, else the map centre. Returns the marker,
    /// or `None` when no location is known.
    pub async fn park_car(&mut self) -> Option<GeoPoint> {
        // ---
        if let Some(saved) = self.store.parked_car() {
            return Some(saved);
        }

        match self.user_location.or(self.map_center) {
            Some(point) => {
                self.store.set_parked_car(Some(point)).await;
                self.toasts.success("car_saved");
                Some(point)
            }
            None => {
                self.toasts.error("gps_error");
                None
            }
        }
    }

    pub async fn clear_parked_car(&mut self) {
        self.store.set_parked_car(None).await;
    }

    // ============================================================
    // Misc flows
    // ============================================================

    pub fn report_issue(&mut self, issue: IssueKind) {
        // ---
        tracing::info!(
            "Issue reported for {:?}: {:?}",
            self.selected_spot.as_deref(),
            issue
        );
        self.toasts.success("report_sent");
    }

    /// First half of a service call; [`finish_service_request`](Self::finish_service_request)
    /// completes it after a delay.
    pub fn request_service(&mut self) {
        self.toasts.info("calling_service");
    }

    pub fn finish_service_request(&mut self) {
        // ---
        self.toasts.success("service_requested");
        self.nav.apply(NavAction::ServiceRequested);
    }

    pub fn complete_scan(&mut self) {
        // ---
        if self.nav.apply(NavAction::ScanCompleted) {
            self.toasts.success("scan_success");
        }
    }

    pub fn apply_weather(&mut self, polled: Option<WeatherReading>) {
        self.weather.apply(polled);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::config::{ApiConfig, SimulatorConfig};
    use crate::domain::random::StdRandom;
    use crate::domain::{is_not_found, FixedClock, RepositoryPtr};
    use crate::infrastructure::backend::MockBackendClient;
    use crate::infrastructure::metrics::create_noop_metrics;
    use crate::infrastructure::storage::create_memory_repository;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    async fn controller_with(repository: RepositoryPtr, booking: BookingConfig) -> AppController {
        // ---
        let clock: ClockPtr = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 4, 2, 14, 0, 0).unwrap(),
        ));
        let backend = MockBackendClient::new(
            ApiConfig {
                mock_delay_scale: 0.0,
                ..ApiConfig::default()
            },
            repository.clone(),
            create_noop_metrics().unwrap(),
            clock.clone(),
        )
        .unwrap();
        let store = ClientStore::load(repository).await;
        let simulator =
            AvailabilitySimulator::new(&SimulatorConfig::default(), Box::new(StdRandom::seeded(1)));

        AppController::new(Arc::new(backend), store, simulator, clock, booking)
    }

    async fn controller() -> AppController {
        controller_with(create_memory_repository(), BookingConfig::default()).await
    }

    async fn signed_in() -> AppController {
        // ---
        let mut app = controller().await;
        app.login(Role::User).await.unwrap();
        app
    }

    #[tokio::test]
    async fn login_loads_session_and_opens_map() {
        // ---
        let mut app = controller().await;
        app.splash_elapsed();
        app.navigate(NavAction::Start);
        app.login(Role::User).await.unwrap();

        assert_eq!(app.screen(), Screen::Map);
        assert_eq!(app.store().user().map(|u| u.balance), Some(150_000));
        assert_eq!(app.store().spots().len(), fixtures::parking_spots().len());
        assert_eq!(app.store().transactions(), fixtures::transactions().as_slice());
        assert!(app.admin_stats().is_empty());
        assert!(app.toasts().contains("toast_login"));
    }

    #[tokio::test]
    async fn admin_login_loads_stats() {
        // ---
        let mut app = controller().await;
        app.login(Role::Admin).await.unwrap();

        assert_eq!(app.screen(), Screen::Admin);
        assert_eq!(app.admin_stats(), fixtures::admin_stats().as_slice());
    }

    #[tokio::test]
    async fn wallet_booking_scenario() {
        // ---
        let mut app = signed_in().await;
        let before = app.store().spot("p1").unwrap().available_spots;

        app.select_spot("p1").unwrap();
        assert!(app.begin_reservation());
        app.set_duration(2);
        app.set_car_type("sedan");
        app.set_payment_method("payme");
        assert!(!app.can_reserve());
        app.select_slot("1-A3").unwrap();
        assert!(app.can_reserve());
        assert_eq!(app.quote(), Some(40_000));

        let res = app.reserve().await.unwrap();

        assert_eq!(res.total_price, 40_000);
        assert_eq!(res.parking_name, "Tashkent City Mall (spot 1-A3)");
        let user = app.store().user().unwrap();
        assert_eq!(user.balance, 110_000);
        assert_eq!(user.bonus_points, 60);
        assert_eq!(app.store().reservations()[0], res);
        let trx = &app.store().transactions()[0];
        assert_eq!(trx.kind, TransactionKind::Payment);
        assert_eq!(trx.amount, 40_000);
        assert_eq!(trx.description, "Parkovka: Tashkent City Mall");
        assert_eq!(app.store().spot("p1").unwrap().available_spots, before - 1);
        assert_eq!(app.screen(), Screen::Payment);
        assert_eq!(app.last_reservation(), Some(&res));
    }

    #[tokio::test]
    async fn card_booking_keeps_balance() {
        // ---
        let mut app = signed_in().await;
        app.select_spot("p2").unwrap();
        app.begin_reservation();
        app.set_payment_method("click");
        app.set_car_type("suv");
        app.select_slot("1-A3").unwrap();

        let res = app.reserve().await.unwrap();
        assert_eq!(res.total_price, 18_000);
        let user = app.store().user().unwrap();
        assert_eq!(user.balance, 150_000);
        assert_eq!(user.bonus_points, 60);
    }

    #[tokio::test]
    async fn booking_without_slot_is_refused() {
        // ---
        let mut app = signed_in().await;
        app.select_spot("p1").unwrap();
        app.begin_reservation();

        let err = app.reserve().await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ClientError>(),
            Some(&ClientError::NoSlotSelected)
        );
        assert!(app.store().reservations().is_empty());
        assert_eq!(app.screen(), Screen::Reservation);
    }

    #[tokio::test]
    async fn unknown_spot_leaves_state_untouched() {
        // ---
        let mut app = signed_in().await;
        // A spot the live list knows about but the backend does not.
        let mut ghost = fixtures::parking_spots()[0].clone();
        ghost.id = "ghost".to_string();
        app.store.spots_mut().push(ghost);

        app.select_spot("ghost").unwrap();
        app.begin_reservation();
        app.select_slot("1-A3").unwrap();

        let spots_before = app.store().spots().to_vec();
        let user_before = app.store().user().cloned();
        let trx_before = app.store().transactions().to_vec();

        let err = app.reserve().await.unwrap_err();
        assert!(is_not_found(&err));
        assert_eq!(app.store().spots(), spots_before.as_slice());
        assert_eq!(app.store().user().cloned(), user_before);
        assert_eq!(app.store().transactions(), trx_before.as_slice());
        assert!(app.store().reservations().is_empty());
        assert!(app.last_reservation().is_none());
        assert_eq!(app.screen(), Screen::Reservation);
        assert!(app.toasts().contains("toast_error"));
    }

    #[tokio::test]
    async fn select_unknown_spot_fails() {
        // ---
        let mut app = signed_in().await;
        assert!(is_not_found(&app.select_spot("nope").unwrap_err()));
        assert_eq!(app.screen(), Screen::Map);
    }

    #[tokio::test]
    async fn full_spot_books_unless_capacity_enforced() {
        // ---
        let mut app = signed_in().await;
        app.select_spot("p3").unwrap();
        app.begin_reservation();
        app.select_slot("1-A3").unwrap();
        assert!(app.reserve().await.is_ok());
        assert_eq!(app.store().spot("p3").unwrap().available_spots, 0);

        let booking = BookingConfig {
            enforce_capacity: true,
        };
        let mut strict = controller_with(create_memory_repository(), booking).await;
        strict.login(Role::User).await.unwrap();
        strict.select_spot("p3").unwrap();
        strict.begin_reservation();
        strict.select_slot("1-A3").unwrap();
        let err = strict.reserve().await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ClientError>(),
            Some(&ClientError::SpotFull("p3".to_string()))
        );
    }

    #[tokio::test]
    async fn two_quick_bookings_both_succeed() {
        // ---
        let mut app = signed_in().await;
        app.select_spot("p4").unwrap();
        app.begin_reservation();
        app.select_slot("1-A3").unwrap();
        app.reserve().await.unwrap();

        app.navigate(NavAction::BackToMap);
        app.select_spot("p4").unwrap();
        app.begin_reservation();
        app.reserve().await.unwrap();

        assert_eq!(app.store().reservations().len(), 2);
        assert_eq!(app.store().spot("p4").unwrap().available_spots, 2);
    }

    #[tokio::test]
    async fn occupied_slot_is_refused() {
        // ---
        let mut app = signed_in().await;
        let err = app.select_slot("1-B2").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ClientError>(),
            Some(&ClientError::SlotOccupied("1-B2".to_string()))
        );
        assert!(app.draft().slot.is_none());
    }

    #[tokio::test]
    async fn favorite_double_toggle_is_identity() {
        // ---
        let mut app = signed_in().await;
        app.toggle_favorite("p1").await;
        app.toggle_favorite("p6").await;
        let before = app.store().favorites().to_vec();

        assert!(app.toggle_favorite("p2").await);
        assert!(!app.toggle_favorite("p2").await);
        assert_eq!(app.store().favorites(), before.as_slice());
        let names: Vec<_> = app.favorite_spots().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(names, vec!["p1", "p6"]);
    }

    #[tokio::test]
    async fn top_up_adds_deposit() {
        // ---
        let mut app = signed_in().await;
        assert_eq!(app.top_up().await.unwrap(), 200_000);

        let trx = &app.store().transactions()[0];
        assert_eq!(trx.kind, TransactionKind::Deposit);
        assert_eq!(trx.amount, TOP_UP_AMOUNT);
    }

    #[tokio::test]
    async fn top_up_requires_session() {
        // ---
        let mut app = controller().await;
        let err = app.top_up().await.unwrap_err();
        assert_eq!(err.downcast_ref::<ClientError>(), Some(&ClientError::NotLoggedIn));
    }

    #[tokio::test]
    async fn garage_edits_persist() {
        // ---
        let repository = create_memory_repository();
        let mut app = controller_with(repository.clone(), BookingConfig::default()).await;
        app.login(Role::User).await.unwrap();

        assert!(!app.add_car("   ").await);
        assert!(app.add_car("10 Z 123 ZZ").await);
        assert!(app.remove_car("01 B 888 BB").await);

        let reloaded = ClientStore::load(repository).await;
        assert_eq!(
            reloaded.user().unwrap().garage,
            vec!["01 A 777 AA".to_string(), "10 Z 123 ZZ".to_string()]
        );
    }

    #[tokio::test]
    async fn park_car_prefers_location_then_map_center() {
        // ---
        let mut app = signed_in().await;
        assert_eq!(app.park_car().await, None);
        assert!(app.toasts().contains("gps_error"));

        app.set_map_center(GeoPoint::new(41.0, 69.0));
        assert_eq!(app.park_car().await, Some(GeoPoint::new(41.0, 69.0)));

        // Already saved: returns the saved marker, ignoring new fixes.
        app.update_location(GeoPoint::new(42.0, 70.0));
        assert_eq!(app.park_car().await, Some(GeoPoint::new(41.0, 69.0)));

        app.clear_parked_car().await;
        assert_eq!(app.park_car().await, Some(GeoPoint::new(42.0, 70.0)));
    }

    #[tokio::test]
    async fn search_applies_only_after_debounce() {
        // ---
        let mut app = signed_in().await;
        app.set_search_query("ev hub");
        assert_eq!(app.filtered_spots().len(), fixtures::parking_spots().len());

        app.apply_search();
        let ids: Vec<_> = app.filtered_spots().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["p2"]);

        app.set_filter(SpotFilter {
            only_free: true,
            ..Default::default()
        });
        app.set_search_query("");
        app.apply_search();
        assert!(app.filtered_spots().iter().all(|s| s.available_spots > 0));
    }

    #[tokio::test]
    async fn simulator_tick_keeps_bounds() {
        // ---
        let mut app = signed_in().await;
        for _ in 0..500 {
            app.tick_availability();
        }
        for spot in app.store().spots() {
            assert!(spot.available_spots <= spot.total_spots);
        }
    }

    #[tokio::test]
    async fn logout_clears_user_and_returns_to_auth() {
        // ---
        let mut app = signed_in().await;
        app.navigate(NavAction::OpenProfile);
        app.logout().await;

        assert!(app.store().user().is_none());
        assert_eq!(app.screen(), Screen::Auth);
    }

    #[tokio::test]
    async fn logout_from_map_returns_to_auth() {
        // ---
        let mut app = signed_in().await;
        assert_eq!(app.screen(), Screen::Map);

        app.logout().await;
        assert!(app.store().user().is_none());
        assert_eq!(app.screen(), Screen::Auth);
        assert_eq!(app.navigator().profile_tab(), ProfileTab::Main);
    }

    #[tokio::test]
    async fn internal_navigation_is_refused() {
        // ---
        let mut app = controller().await;
        app.splash_elapsed();
        assert!(app.navigate(NavAction::Start));
        assert_eq!(app.screen(), Screen::Auth);

        assert!(!app.navigate(NavAction::LoggedIn(Role::Admin)));
        assert_eq!(app.screen(), Screen::Auth);
        assert!(app.store().user().is_none());

        let mut app = signed_in().await;
        app.select_spot("p1").unwrap();
        app.begin_reservation();
        assert!(!app.navigate(NavAction::Booked));
        assert_eq!(app.screen(), Screen::Reservation);
    }

    #[tokio::test]
    async fn admin_screen_needs_admin_session() {
        // ---
        let mut app = signed_in().await;
        app.navigate(NavAction::OpenProfile);
        assert!(!app.navigate(NavAction::OpenAdmin));
        assert_eq!(app.screen(), Screen::Profile);

        let mut admin = controller().await;
        admin.login(Role::Admin).await.unwrap();
        admin.navigate(NavAction::OpenProfile);
        assert!(admin.navigate(NavAction::OpenAdmin));
        assert_eq!(admin.screen(), Screen::Admin);
    }

    #[tokio::test]
    async fn service_and_scan_return_to_map() {
        // ---
        let mut app = signed_in().await;
        app.navigate(NavAction::OpenSupport);
        app.request_service();
        app.finish_service_request();
        assert_eq!(app.screen(), Screen::Map);
        assert!(app.toasts().contains("service_requested"));

        app.navigate(NavAction::OpenScan);
        app.complete_scan();
        assert_eq!(app.screen(), Screen::Map);
        assert!(app.toasts().contains("scan_success"));
    }
}
