//! WiFi station-mode adapter.
//!
//! Brings the network link up at boot. There is no steady-state
//! reconnect policy: the system blocks until association succeeds,
//! polling the link status with a fixed delay and logging progress. The
//! blocking wait goes through the [`Clock`](crate::app::ports::Clock)
//! port so tests observe poll counts instead of real time.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via
//!   `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests.

use log::info;

use crate::app::ports::Clock;
use crate::error::{CommsError, Error, Result};

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Disconnected,
    Connecting,
    Connected,
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<()> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(Error::Comms(CommsError::InvalidCredentials));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    // Empty means an open network; otherwise WPA2 bounds apply.
    if !password.is_empty() && (password.len() < 8 || password.len() > 64) {
        return Err(Error::Comms(CommsError::InvalidCredentials));
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    #[cfg(target_os = "espidf")]
    driver: esp_idf_svc::wifi::EspWifi<'static>,
    /// Simulation: polls remaining until the link reports up.
    #[cfg(not(target_os = "espidf"))]
    sim_polls_until_up: u32,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(
        modem: esp_idf_svc::hal::modem::Modem,
        sysloop: esp_idf_svc::eventloop::EspSystemEventLoop,
    ) -> Result<Self> {
        let driver = esp_idf_svc::wifi::EspWifi::new(modem, sysloop, None)
            .map_err(|_| Error::Init("WiFi driver init failed"))?;
        Ok(Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            driver,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self> {
        Ok(Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            sim_polls_until_up: 1,
        })
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    /// Number of status polls before the simulated link comes up.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_polls_until_up(&mut self, polls: u32) {
        self.sim_polls_until_up = polls;
    }

    pub fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<()> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid = ssid.try_into().map_err(|()| Error::Comms(CommsError::InvalidCredentials))?;
        self.password =
            password.try_into().map_err(|()| Error::Comms(CommsError::InvalidCredentials))?;
        Ok(())
    }

    /// Start station-mode association and block until the link is up,
    /// polling with a fixed delay. Intentional indefinite blocking: the
    /// rest of the system has nothing to do without the network.
    pub fn connect_blocking(&mut self, clock: &mut impl Clock, poll_delay_ms: u32) -> Result<()> {
        if self.ssid.is_empty() {
            return Err(Error::Comms(CommsError::InvalidCredentials));
        }
        self.state = WifiState::Connecting;
        self.platform_start_connect()?;

        info!("Connecting to WiFi '{}'", self.ssid);
        while !self.platform_is_connected() {
            clock.delay_ms(poll_delay_ms);
            info!("Waiting for WiFi association...");
        }

        self.state = WifiState::Connected;
        info!("WiFi connected");
        Ok(())
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_start_connect(&mut self) -> Result<()> {
        use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};

        let err = |_| Error::Comms(CommsError::WifiConnectFailed);

        let client_cfg = ClientConfiguration {
            ssid: self.ssid.as_str().try_into().map_err(|()| Error::Comms(CommsError::InvalidCredentials))?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|()| Error::Comms(CommsError::InvalidCredentials))?,
            auth_method: if self.password.is_empty() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            ..Default::default()
        };
        self.driver
            .set_configuration(&Configuration::Client(client_cfg))
            .map_err(err)?;
        self.driver.start().map_err(err)?;
        self.driver.connect().map_err(err)?;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        self.driver.is_connected().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start_connect(&mut self) -> Result<()> {
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&mut self) -> bool {
        if self.sim_polls_until_up > 0 {
            self.sim_polls_until_up -= 1;
            return false;
        }
        true
    }
}
