//! The portal client core: session lifecycle, transparent re-login, and the
//! command-dispatch state machine.
//!
//! The portal speaks rendered HTML, not JSON, so every operation here is a
//! scrape: fetch a page, select the element the known layout guarantees, and
//! interpret its absence. A missing dashboard element means the portal served
//! the signin page instead -- the session expired -- and the client recovers
//! by logging back in and retrying the same operation exactly once. A second
//! miss means the layout itself changed, which is fatal for the call.
//!
//! Per command invocation the dispatch runs
//! `Idle -> Sending -> {Accepted, LoggedOutRetry -> Sending(once) ->
//! {Accepted, Failed}, TransportFailed}`.

use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use crate::command::{ArmCommand, EVENT_VALIDATION_FIELD};
use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::scrape;
use crate::session::SessionStore;

/// Cookie the portal issues on the signin page.
const SESSION_COOKIE: &str = "JSESSIONID";

/// Signin form field names.
const USERNAME_FIELD: &str = "usernameForm";
const PASSWORD_FIELD: &str = "passwordForm";

/// Endpoint paths under the versioned context path.
const SIGNIN_PATH: &str = "/access/signin.jsp";
const DASHBOARD_PATH: &str = "/summary/summary.jsp";

/// DOM id of the summary page element carrying the alarm state text.
const ALARM_STATE_ID: &str = "divOrbTextSummary";

/// DOM id of the status message rendered after a command submission.
const MESSAGE_CONTROL_ID: &str = "warnMsgContents";

/// Result of one [`PortalClient::send`] invocation. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Whether the portal acknowledged the state change.
    pub accepted: bool,
    /// Whether the session had expired mid-command and a re-login plus
    /// re-dispatch happened before returning.
    pub triggered_relogin: bool,
}

/// State guarded by the client's single-flight mutex.
#[derive(Debug, Default)]
struct Inner {
    session: SessionStore,
    /// Last observed alarm state text, verbatim from the dashboard.
    /// `None` means "could not confirm", never "disarmed".
    state: Option<String>,
}

/// Client for one portal account.
///
/// Holds a single logical session. All state-mutating operations (login,
/// refresh, send) serialize behind one mutex, so at most one authentication
/// or command sequence is in flight at a time even if the surrounding
/// application calls concurrently.
pub struct PortalClient {
    http: Client,
    config: PortalConfig,
    login_url: String,
    dashboard_url: String,
    inner: Mutex<Inner>,
}

impl PortalClient {
    /// Resolve the portal's versioned context path and build a client.
    ///
    /// The portal prefixes every endpoint with a context path that changes
    /// on each release (e.g. `/myhome/27.0.0-140`), so construction performs
    /// one GET against the portal root to scrape it. Transport failure here
    /// is a constructor error: there is no client to build against a dead or
    /// unrecognizable portal.
    pub async fn initialize(config: PortalConfig) -> Result<Self, PortalError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| PortalError::InvalidConfig(format!("bad base URL: {e}")))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()?;

        debug!("resolving portal context path from {base}");
        let response = http.get(base).send().await?;
        let body = response.text().await?;
        let context = scrape::context_path(&body)
            .ok_or_else(|| PortalError::layout("portal root page has no context path script"))?;
        info!("portal context path resolved: {context}");

        Ok(Self {
            login_url: format!("{}{}{}", config.base_url, context, SIGNIN_PATH),
            dashboard_url: format!("{}{}{}", config.base_url, context, DASHBOARD_PATH),
            http,
            config,
            inner: Mutex::new(Inner::default()),
        })
    }

    /// Log in to the portal.
    ///
    /// Returns `Ok(false)` on ordinary transport failure (timeout, refused
    /// connection). Returns [`PortalError::LayoutChanged`] when the signin
    /// page sets no session cookie, since that means the login flow no longer
    /// matches the layout this client targets.
    ///
    /// The login POST's response body is not inspected for a success
    /// indicator; a completed POST is taken as success and the next scrape
    /// catches a login that did not land.
    pub async fn login(&self) -> Result<bool, PortalError> {
        let mut inner = self.inner.lock().await;
        self.login_locked(&mut inner).await
    }

    /// Fetch the latest alarm state from the dashboard.
    ///
    /// Logs in first when no session is active. Ordinary transport failure
    /// leaves the previous state untouched and returns `Ok`. A missing state
    /// element is treated as session expiry: the state and session are
    /// cleared and the fetch retried once behind a fresh login. A second miss
    /// fails with [`PortalError::LayoutChanged`] and leaves the state
    /// cleared, never stale.
    pub async fn refresh_state(&self) -> Result<(), PortalError> {
        let mut inner = self.inner.lock().await;
        self.refresh_locked(&mut inner).await
    }

    /// Send an arm/disarm command.
    ///
    /// On acknowledgement the authoritative post-command state is pulled via
    /// a refresh before returning. When the portal serves the signin page
    /// instead of a status message the session expired mid-command: the
    /// client logs back in and re-dispatches the same command exactly once.
    ///
    /// Note that a [`PortalError::LayoutChanged`] from the post-command
    /// refresh arrives *after* the portal already acknowledged the command:
    /// the command most likely executed even though the call errors.
    pub async fn send(&self, command: ArmCommand) -> Result<CommandOutcome, PortalError> {
        let mut inner = self.inner.lock().await;
        self.send_locked(&mut inner, command).await
    }

    /// Send the disarm command.
    pub async fn disarm(&self) -> Result<CommandOutcome, PortalError> {
        self.send(ArmCommand::Disarm).await
    }

    /// Send the arm-stay command.
    pub async fn arm_home(&self) -> Result<CommandOutcome, PortalError> {
        self.send(ArmCommand::ArmStay).await
    }

    /// Send the arm-away command.
    pub async fn arm_away(&self) -> Result<CommandOutcome, PortalError> {
        self.send(ArmCommand::ArmAway).await
    }

    /// Last observed alarm state text, verbatim from the dashboard (e.g.
    /// "Disarmed", "Armed Away"). `None` means the state could not be
    /// confirmed -- callers must not read it as "disarmed".
    pub async fn state(&self) -> Option<String> {
        self.inner.lock().await.state.clone()
    }

    /// Whether an authenticated session is currently held.
    pub(crate) async fn is_authenticated(&self) -> bool {
        self.inner.lock().await.session.is_active()
    }

    async fn login_locked(&self, inner: &mut Inner) -> Result<bool, PortalError> {
        debug!("attempting portal login");

        let response = match self.http.get(&self.login_url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("cannot fetch signin page: {e}");
                return Ok(false);
            }
        };
        debug!("signin page status: {}", response.status());

        let session_id = response
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| PortalError::layout("signin page set no JSESSIONID cookie"))?;
        inner.session.set(session_id);
        info!("portal session key acquired");

        let params = [
            (USERNAME_FIELD, self.config.username.as_str()),
            (PASSWORD_FIELD, self.config.password.as_str()),
        ];
        match self.http.post(&self.login_url).form(&params).send().await {
            Ok(response) => {
                debug!("login submission status: {}", response.status());
                info!("portal login submitted");
                Ok(true)
            }
            Err(e) => {
                // The session from the GET stays set; the next scrape catches
                // it if the login never landed.
                warn!("cannot submit login form: {e}");
                Ok(false)
            }
        }
    }

    async fn refresh_locked(&self, inner: &mut Inner) -> Result<(), PortalError> {
        for _ in 0..2 {
            if !inner.session.is_active() {
                self.login_locked(inner).await?;
            }

            debug!("fetching dashboard state");
            let response = match self.http.get(&self.dashboard_url).send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!("cannot fetch dashboard: {e}");
                    return Ok(());
                }
            };
            debug!("dashboard status: {}", response.status());

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("cannot read dashboard body: {e}");
                    return Ok(());
                }
            };

            match scrape::element_text(&body, ALARM_STATE_ID) {
                Some(state) => {
                    debug!("current alarm state: {state}");
                    inner.state = Some(state);
                    return Ok(());
                }
                None => {
                    // An expired session renders the signin page instead of
                    // the dashboard. Clear everything and go around once.
                    debug!("alarm state element missing, assuming expired session");
                    inner.state = None;
                    inner.session.clear();
                }
            }
        }

        Err(PortalError::layout(
            "alarm state element still missing after re-login",
        ))
    }

    async fn send_locked(
        &self,
        inner: &mut Inner,
        command: ArmCommand,
    ) -> Result<CommandOutcome, PortalError> {
        let mut triggered_relogin = false;

        for attempt in 0..2 {
            debug!("sending {command} to the portal");

            // Session-scoped submission URL, JSP style.
            let url = match inner.session.session_id() {
                Some(id) => format!("{};jsessionid={id}", self.dashboard_url),
                None => self.dashboard_url.clone(),
            };
            let params = [
                (EVENT_VALIDATION_FIELD, command.event_validation()),
                (command.field_name(), command.label()),
            ];

            let response = match self.http.post(&url).form(&params).send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!("cannot submit {command}: {e}");
                    return Ok(CommandOutcome {
                        accepted: false,
                        triggered_relogin,
                    });
                }
            };
            debug!("command submission status: {}", response.status());

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("cannot read {command} response: {e}");
                    return Ok(CommandOutcome {
                        accepted: false,
                        triggered_relogin,
                    });
                }
            };

            match scrape::element_text(&body, MESSAGE_CONTROL_ID) {
                Some(message) if message.contains("command") => {
                    debug!("portal acknowledged {command}: {message}");
                    // Pull the authoritative post-command state.
                    self.refresh_locked(inner).await?;
                    return Ok(CommandOutcome {
                        accepted: true,
                        triggered_relogin,
                    });
                }
                Some(message) => {
                    warn!("portal did not acknowledge {command}: {message}");
                    return Ok(CommandOutcome {
                        accepted: false,
                        triggered_relogin,
                    });
                }
                None if attempt == 0 => {
                    // Signin page instead of a status message: logged out
                    // mid-command. Re-dispatch the same command once behind a
                    // fresh login.
                    debug!("status message missing, re-authenticating before re-dispatch");
                    inner.session.clear();
                    self.login_locked(inner).await?;
                    triggered_relogin = true;
                }
                None => break,
            }
        }

        Err(PortalError::layout(
            "status message element still missing after re-login",
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
