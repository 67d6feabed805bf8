//! Single-threaded driver for the controller.
//!
//! User events arrive over a channel; periodic work (availability drift,
//! weather, toast expiry) and one-shot deadlines (splash, search debounce,
//! scan, service call) are timers. Everything is handled one at a time on
//! the same task, so the controller never sees concurrent mutation.

use crate::config::AppConfig;
use crate::controller::{AppController, IssueKind};
use crate::domain::filter::SpotFilter;
use crate::domain::navigation::{NavAction, ProfileTab, Screen};
use crate::domain::{GeoPoint, Role};
use crate::infrastructure::weather::WeatherClient;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};

/// Input from the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // ---
    Navigate(NavAction),
    Back,
    OpenProfileTab(ProfileTab),
    Login(Role),
    Logout,
    Refresh,
    SelectSpot(String),
    BeginReservation,
    SetDuration(u32),
    SetCarType(String),
    SetPaymentMethod(String),
    SelectSlot(String),
    Reserve,
    ToggleFavorite(String),
    AddCar(String),
    RemoveCar(String),
    TopUp,
    ParkCar,
    ClearParkedCar,
    Location(GeoPoint),
    MapMoved(GeoPoint),
    SetFilter(SpotFilter),
    SearchInput(String),
    GlobalSearch,
    NavigateToSpot,
    CancelNavigation,
    ReportIssue(IssueKind),
    RequestService,
    Shutdown,
}

/// Timer periods and delays used by [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTimings {
    // ---
    pub simulator: Duration,
    pub weather: Duration,
    pub splash: Duration,
    pub toast_sweep: Duration,
    pub search_debounce: Duration,
    pub scan: Duration,
    pub service: Duration,
}

impl Default for LoopTimings {
    // ---
    fn default() -> Self {
        // ---
        Self {
            simulator: Duration::from_secs(5),
            weather: Duration::from_secs(300),
            splash: Duration::from_secs(3),
            toast_sweep: Duration::from_millis(250),
            search_debounce: Duration::from_millis(500),
            scan: Duration::from_secs(3),
            service: Duration::from_secs(2),
        }
    }
}

impl LoopTimings {
    // ---
    /// Periodic timers need a non-zero period.
    fn validate(&self) -> Result<()> {
        // ---
        for (name, period) in [
            ("simulator", self.simulator),
            ("weather", self.weather),
            ("toast sweep", self.toast_sweep),
        ] {
            if period.is_zero() {
                anyhow::bail!("{name} period must be positive");
            }
        }
        Ok(())
    }

    pub fn from_config(config: &AppConfig) -> Self {
        // ---
        Self {
            simulator: config.simulator.interval,
            weather: config.weather.poll_interval,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
struct Deadlines {
    // ---
    splash: Option<Instant>,
    search: Option<Instant>,
    scan: Option<Instant>,
    service: Option<Instant>,
}

async fn wait_for(deadline: Option<Instant>) {
    // ---
    match deadline {
        Some(at) => sleep_until(at).await,
        None => futures::future::pending::<()>().await,
    }
}

/// Runs until [`UiEvent::Shutdown`] arrives or the sender is dropped, then
/// hands the controller back.
pub async fn run(
    mut app: AppController,
    weather: Option<WeatherClient>,
    timings: LoopTimings,
    mut events: mpsc::Receiver<UiEvent>,
) -> Result<AppController> {
    // ---
    timings.validate()?;

    let start = Instant::now();
    let mut simulator = delayed_interval(start + timings.simulator, timings.simulator);
    let mut sweep = delayed_interval(start + timings.toast_sweep, timings.toast_sweep);
    // The first weather tick fires immediately.
    let mut weather_tick = interval(timings.weather);
    weather_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut deadlines = Deadlines {
        splash: (app.screen() == Screen::Splash).then(|| start + timings.splash),
        ..Deadlines::default()
    };

    tracing::info!("Event loop started on {:?}", app.screen());

    loop {
        tokio::select! {
            _ = simulator.tick() => {
                let changed = app.tick_availability();
                tracing::trace!("availability tick changed {} spots", changed);
            }
            _ = weather_tick.tick(), if weather.is_some() => {
                if let Some(client) = &weather {
                    let reading = client.poll().await;
                    app.apply_weather(reading);
                }
            }
            _ = sweep.tick() => {
                app.toasts_mut().expire(Instant::now());
            }
            _ = wait_for(deadlines.splash) => {
                deadlines.splash = None;
                app.splash_elapsed();
            }
            _ = wait_for(deadlines.search) => {
                deadlines.search = None;
                app.apply_search();
            }
            _ = wait_for(deadlines.scan) => {
                deadlines.scan = None;
                app.complete_scan();
            }
            _ = wait_for(deadlines.service) => {
                deadlines.service = None;
                app.finish_service_request();
            }
            event = events.recv() => {
                match event {
                    None | Some(UiEvent::Shutdown) => break,
                    Some(event) => handle(&mut app, event, &mut deadlines, &timings).await,
                }
            }
        }
    }

    tracing::info!("Event loop stopped");
    Ok(app)
}

fn delayed_interval(first: Instant, period: Duration) -> tokio::time::Interval {
    // ---
    let mut timer = tokio::time::interval_at(first, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

async fn handle(
    app: &mut AppController,
    event: UiEvent,
    deadlines: &mut Deadlines,
    timings: &LoopTimings,
) {
    // ---
    tracing::debug!("event: {:?}", event);

    // Errors below have already been surfaced as toasts by the controller.
    let outcome: Result<()> = match event {
        UiEvent::Navigate(action) => {
            let was_scan = app.screen() == Screen::Scan;
            app.navigate(action);
            if app.screen() == Screen::Scan && !was_scan {
                deadlines.scan = Some(Instant::now() + timings.scan);
            }
            Ok(())
        }
        UiEvent::Back => {
            app.go_back();
            Ok(())
        }
        UiEvent::OpenProfileTab(tab) => {
            app.open_profile_tab(tab);
            Ok(())
        }
        UiEvent::Login(role) => app.login(role).await,
        UiEvent::Logout => {
            app.logout().await;
            Ok(())
        }
        UiEvent::Refresh => {
            app.refresh().await;
            Ok(())
        }
        UiEvent::SelectSpot(id) => app.select_spot(&id),
        UiEvent::BeginReservation => {
            app.begin_reservation();
            Ok(())
        }
        UiEvent::SetDuration(hours) => {
            app.set_duration(hours);
            Ok(())
        }
        UiEvent::SetCarType(car) => {
            app.set_car_type(car);
            Ok(())
        }
        UiEvent::SetPaymentMethod(method) => {
            app.set_payment_method(method);
            Ok(())
        }
        UiEvent::SelectSlot(slot) => app.select_slot(&slot),
        UiEvent::Reserve => app.reserve().await.map(|_| ()),
        UiEvent::ToggleFavorite(id) => {
            app.toggle_favorite(&id).await;
            Ok(())
        }
        UiEvent::AddCar(plate) => {
            app.add_car(&plate).await;
            Ok(())
        }
        UiEvent::RemoveCar(plate) => {
            app.remove_car(&plate).await;
            Ok(())
        }
        UiEvent::TopUp => app.top_up().await.map(|_| ()),
        UiEvent::ParkCar => {
            app.park_car().await;
            Ok(())
        }
        UiEvent::ClearParkedCar => {
            app.clear_parked_car().await;
            Ok(())
        }
        UiEvent::Location(point) => {
            app.update_location(point);
            Ok(())
        }
        UiEvent::MapMoved(point) => {
            app.set_map_center(point);
            Ok(())
        }
        UiEvent::SetFilter(filter) => {
            app.set_filter(filter);
            Ok(())
        }
        UiEvent::SearchInput(text) => {
            app.set_search_query(text);
            deadlines.search = Some(Instant::now() + timings.search_debounce);
            Ok(())
        }
        UiEvent::GlobalSearch => {
            deadlines.search = None;
            app.global_search();
            Ok(())
        }
        UiEvent::NavigateToSpot => {
            app.navigate_to_selected();
            Ok(())
        }
        UiEvent::CancelNavigation => {
            app.cancel_navigation();
            Ok(())
        }
        UiEvent::ReportIssue(kind) => {
            app.report_issue(kind);
            Ok(())
        }
        UiEvent::RequestService => {
            app.request_service();
            deadlines.service = Some(Instant::now() + timings.service);
            Ok(())
        }
        UiEvent::Shutdown => Ok(()),
    };

    if let Err(err) = outcome {
        tracing::debug!("event failed: {}", err);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::config::{ApiConfig, BookingConfig, SimulatorConfig};
    use crate::domain::random::StdRandom;
    use crate::domain::{ClockPtr, SystemClock};
    use crate::infrastructure::backend::MockBackendClient;
    use crate::infrastructure::metrics::create_noop_metrics;
    use crate::infrastructure::simulator::AvailabilitySimulator;
    use crate::infrastructure::storage::create_memory_repository;
    use crate::state::ClientStore;
    use std::sync::Arc;
    use tokio::task::JoinHandle;

    async fn build_app() -> AppController {
        // ---
        let repository = create_memory_repository();
        let clock: ClockPtr = Arc::new(SystemClock);
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
        AppController::new(
            Arc::new(backend),
            ClientStore::load(repository).await,
            AvailabilitySimulator::new(&SimulatorConfig::default(), Box::new(StdRandom::seeded(7))),
            clock,
            BookingConfig::default(),
        )
    }

    async fn spawn_loop() -> (mpsc::Sender<UiEvent>, JoinHandle<Result<AppController>>) {
        // ---
        let app = build_app().await;
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(run(app, None, LoopTimings::default(), rx));
        (tx, handle)
    }

    async fn stop(
        tx: mpsc::Sender<UiEvent>,
        handle: JoinHandle<Result<AppController>>,
    ) -> AppController {
        // ---
        tx.send(UiEvent::Shutdown).await.unwrap();
        handle.await.unwrap().unwrap()
    }

    async fn pause(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test]
    async fn zero_periods_are_refused_without_panicking() {
        // ---
        let (_tx, rx) = mpsc::channel(1);
        let app = build_app().await;
        let timings = LoopTimings {
            weather: Duration::ZERO,
            ..LoopTimings::default()
        };

        let err = run(app, None, timings, rx).await.err().unwrap();
        assert!(err.to_string().contains("weather"), "{err}");
    }

    #[tokio::test(start_paused = true)]
    async fn splash_advances_after_delay() {
        // ---
        let (tx, handle) = spawn_loop().await;
        pause(2_900).await;
        tx.send(UiEvent::Navigate(NavAction::Start)).await.unwrap();
        pause(200).await;
        let app = stop(tx, handle).await;
        // Still on the splash, so Start was ignored and the timer moved on.
        assert_eq!(app.screen(), Screen::AboutApp);

        let (tx, handle) = spawn_loop().await;
        pause(3_100).await;
        tx.send(UiEvent::Navigate(NavAction::Start)).await.unwrap();
        pause(10).await;
        let app = stop(tx, handle).await;
        assert_eq!(app.screen(), Screen::Auth);
    }

    #[tokio::test(start_paused = true)]
    async fn search_is_debounced() {
        // ---
        let (tx, handle) = spawn_loop().await;
        tx.send(UiEvent::SearchInput("ev".into())).await.unwrap();
        pause(300).await;
        tx.send(UiEvent::SearchInput("ev hub".into())).await.unwrap();
        pause(300).await;
        let app = stop(tx, handle).await;
        assert_eq!(app.active_search(), "");

        let (tx, handle) = spawn_loop().await;
        tx.send(UiEvent::SearchInput("ev".into())).await.unwrap();
        pause(300).await;
        tx.send(UiEvent::SearchInput("ev hub".into())).await.unwrap();
        pause(600).await;
        let app = stop(tx, handle).await;
        assert_eq!(app.active_search(), "ev hub");
    }

    #[tokio::test(start_paused = true)]
    async fn toasts_are_swept() {
        // ---
        let (tx, handle) = spawn_loop().await;
        tx.send(UiEvent::Login(Role::User)).await.unwrap();
        pause(100).await;
        tx.send(UiEvent::ReportIssue(IssueKind::Full)).await.unwrap();
        pause(3_300).await;
        let app = stop(tx, handle).await;

        assert!(app.store().user().is_some());
        assert!(app.toasts().visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn scan_completes_after_delay() {
        // ---
        let (tx, handle) = spawn_loop().await;
        tx.send(UiEvent::Login(Role::User)).await.unwrap();
        tx.send(UiEvent::Navigate(NavAction::OpenScan)).await.unwrap();
        pause(3_200).await;
        let app = stop(tx, handle).await;

        assert_eq!(app.screen(), Screen::Map);
        assert!(app.toasts().contains("scan_success"));
    }

    #[tokio::test(start_paused = true)]
    async fn service_request_finishes_on_map() {
        // ---
        let (tx, handle) = spawn_loop().await;
        tx.send(UiEvent::Login(Role::User)).await.unwrap();
        tx.send(UiEvent::Navigate(NavAction::OpenSupport)).await.unwrap();
        tx.send(UiEvent::RequestService).await.unwrap();
        pause(1_000).await;
        tx.send(UiEvent::Refresh).await.unwrap();
        pause(1_200).await;
        let app = stop(tx, handle).await;

        assert_eq!(app.screen(), Screen::Map);
        assert!(app.toasts().contains("service_requested"));
    }

    #[tokio::test(start_paused = true)]
    async fn navigate_event_ignores_internal_actions() {
        // ---
        let (tx, handle) = spawn_loop().await;
        tx.send(UiEvent::Navigate(NavAction::SplashElapsed)).await.unwrap();
        tx.send(UiEvent::Navigate(NavAction::Start)).await.unwrap();
        tx.send(UiEvent::Navigate(NavAction::LoggedIn(Role::Admin)))
            .await
            .unwrap();
        pause(10).await;
        let app = stop(tx, handle).await;

        assert_eq!(app.screen(), Screen::Splash);
        assert!(app.store().user().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn booking_through_events() {
        // ---
        let (tx, handle) = spawn_loop().await;
        for event in [
            UiEvent::Login(Role::User),
            UiEvent::SelectSpot("p1".into()),
            UiEvent::BeginReservation,
            UiEvent::SelectSlot("1-A3".into()),
            UiEvent::Reserve,
        ] {
            tx.send(event).await.unwrap();
        }
        pause(50).await;
        let app = stop(tx, handle).await;

        assert_eq!(app.screen(), Screen::Payment);
        assert_eq!(app.store().reservations().len(), 1);
        assert_eq!(app.store().user().unwrap().bonus_points, 60);
    }
}
