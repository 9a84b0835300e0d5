//! Boot sequence and control loop
//!
//! [`Device`] owns the shared state, the tasks, and every collaborator.
//! One pass of the loop reads the clock once, runs whichever of sampling,
//! fetching and screen rotation are due, then renders unconditionally.

use embedded_hal_async::delay::DelayNs;

use crate::config::{
    ConfigError, DeviceConfig, Intervals, BOOT_SPLASH_MS, FAILURE_SCREEN_MS, WIFI_MAX_ATTEMPTS,
    WIFI_RETRY_MS,
};
use crate::display::DisplayPresenter;
use crate::prediction::{FetchOutcome, PredictionClient};
use crate::scheduler::{Due, Scheduler};
use crate::sensor::SensorReader;
use crate::state::DeviceState;
use crate::traits::{
    AnalogInput, ClimateSensor, Clock, DisplayDriver, HttpTransport, NetworkLink,
};

/// Status line shown while booting
pub const BOOTING_MESSAGE: &str = "System Booting...";

/// Status line shown while joining WiFi
pub const CONNECTING_MESSAGE: &str = "Connecting to WiFi...";

/// Status line shown before restarting on WiFi failure
pub const WIFI_FAILED_MESSAGE: &str = "WiFi Failed!";

/// Errors that end the boot sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// WiFi did not come up within the retry budget; the board should restart
    WifiUnavailable,
}

/// Board collaborators handed to [`Device::new`]
pub struct Board<S, A, L, T, G, K, D> {
    /// Temperature/humidity sensor
    pub climate: S,
    /// ADC with the soil probe attached
    pub adc: A,
    /// Wireless link
    pub link: L,
    /// HTTP transport over the link
    pub transport: T,
    /// Frame-buffered display
    pub display: G,
    /// Monotonic clock
    pub clock: K,
    /// Async delay for pacing and boot waits
    pub delay: D,
}

/// The field device
pub struct Device<S, A, L, T, G, K, D> {
    config: DeviceConfig,
    state: DeviceState,
    reader: SensorReader<S, A>,
    client: PredictionClient,
    presenter: DisplayPresenter,
    scheduler: Scheduler,
    link: L,
    transport: T,
    display: G,
    clock: K,
    delay: D,
}

impl<S, A, L, T, G, K, D> Device<S, A, L, T, G, K, D>
where
    S: ClimateSensor,
    A: AnalogInput,
    L: NetworkLink,
    T: HttpTransport,
    G: DisplayDriver,
    K: Clock,
    D: DelayNs,
{
    /// Assemble a device
    ///
    /// Fails only if the configured server URL is unusable.
    pub fn new(
        config: DeviceConfig,
        intervals: Intervals,
        board: Board<S, A, L, T, G, K, D>,
    ) -> Result<Self, ConfigError> {
        let client = PredictionClient::new(config.base_url)?;

        Ok(Self {
            config,
            state: DeviceState::default(),
            reader: SensorReader::new(board.climate, board.adc),
            client,
            presenter: DisplayPresenter::new(intervals.scroll_ms),
            scheduler: Scheduler::new(&intervals),
            link: board.link,
            transport: board.transport,
            display: board.display,
            clock: board.clock,
            delay: board.delay,
        })
    }

    /// Shared state
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// The display collaborator
    pub fn display(&self) -> &G {
        &self.display
    }

    /// The link collaborator
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Mutable link collaborator
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// The transport collaborator
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Bring the device up
    ///
    /// Shows the boot splash, joins WiFi, takes a first sample and fetches a
    /// first prediction, then starts every interval from the current time.
    /// After a failed join the failure screen is held for
    /// [`FAILURE_SCREEN_MS`] before returning; the caller should restart.
    pub async fn boot(&mut self) -> Result<(), BootError> {
        self.show_status(BOOTING_MESSAGE);
        self.delay.delay_ms(BOOT_SPLASH_MS).await;

        self.show_status(CONNECTING_MESSAGE);
        if !self.join_wifi().await {
            error!("WiFi failed after {} attempts", WIFI_MAX_ATTEMPTS);
            self.show_status(WIFI_FAILED_MESSAGE);
            self.delay.delay_ms(FAILURE_SCREEN_MS).await;
            return Err(BootError::WifiUnavailable);
        }
        info!("WiFi connected");

        self.sample().await;
        self.fetch().await;
        self.scheduler.arm(self.clock.now_ms());

        Ok(())
    }

    /// Run one pass of the control loop
    ///
    /// Returns which tasks ran.
    pub async fn run_once(&mut self) -> Due {
        let now = self.clock.now_ms();
        let due = self.scheduler.poll(now);

        if due.sample {
            self.sample().await;
        }
        if due.fetch {
            self.fetch().await;
        }
        if due.rotate {
            self.state.cursor.advance_screen();
            debug!("Screen -> {}", self.state.cursor.screen);
        }

        // Time has moved on if a task waited
        let now = self.clock.now_ms();
        if let Err(e) = self.presenter.render(
            &mut self.display,
            &mut self.state.cursor,
            &self.state.snapshot,
            &self.state.prediction,
            now,
        ) {
            warn!("Render failed: {}", e);
        }

        due
    }

    /// Run the control loop forever
    pub async fn run(&mut self) -> ! {
        loop {
            self.run_once().await;
            // Let the radio and network tasks run between passes
            embassy_futures::yield_now().await;
        }
    }

    async fn join_wifi(&mut self) -> bool {
        for attempt in 1..=WIFI_MAX_ATTEMPTS {
            match self
                .link
                .join(self.config.wifi_ssid, self.config.wifi_password)
                .await
            {
                Ok(()) if self.link.is_connected() => return true,
                Ok(()) => debug!("WiFi attempt {}: joined, no address yet", attempt),
                Err(e) => debug!("WiFi attempt {}: {}", attempt, e),
            }
            self.delay.delay_ms(WIFI_RETRY_MS).await;
        }
        false
    }

    async fn sample(&mut self) {
        self.reader
            .sample(&mut self.delay, &mut self.state.snapshot)
            .await;
    }

    async fn fetch(&mut self) -> FetchOutcome {
        self.client
            .fetch(
                &self.link,
                &mut self.transport,
                &self.state.snapshot,
                &mut self.state.prediction,
            )
            .await
    }

    fn show_status(&mut self, message: &str) {
        if let Err(e) = self.presenter.render_status(&mut self.display, message) {
            warn!("Status screen failed: {}", e);
        }
    }
}
