//! Lifecycle controller
//!
//! [`Application`] receives the host platform's callbacks (`setup`, `init_cb`,
//! `frame_cb`, `cleanup_cb`, `event_cb`, `fail_cb`), owns the order in which
//! host subsystems are acquired and released, and dispatches to the
//! overridable hooks of an [`App`].
//!
//! ```text
//! Unconfigured -> Configuring -> Initialized -> Running -> CleaningUp -> Terminated
//! ```
//!
//! Subsystems are acquired as args, fetch (in `setup`) then gfx, timer (in
//! `init_cb`), and released as fetch, args, gfx after the `cleanup` hook.

use crate::app::args::{Args, KeyValueArgs};
use crate::app::config::AppConfig;
use crate::app::fetch::{Fetch, FetchDesc, FileFetch};
use crate::app::platform::{Event, Platform};
use crate::app::timer::{StdTimer, Timer};
use crate::error::Result;
use crate::gfx::{Gfx, GfxBackend, GfxDesc};
use crate::{falcon_bail, falcon_debug, falcon_error, falcon_info};

const SOURCE: &str = "falcon::Application";

// ===== HOOKS =====

/// Overridable lifecycle hooks
///
/// Every hook defaults to a no-op, so an application implements only what it
/// needs.
///
/// # Example
///
/// ```
/// use falcon_framework::falcon::{App, AppConfig, Args, Context};
/// use falcon_framework::falcon::gfx::make_pass_action_clear;
///
/// struct Clear;
///
/// impl App for Clear {
///     fn configure(&mut self, config: &mut AppConfig, _args: &dyn Args) {
///         config.window_title = "clear".to_string();
///     }
///
///     fn frame(&mut self, ctx: &mut Context<'_>) {
///         let (w, h) = (ctx.width(), ctx.height());
///         ctx.gfx.begin(&make_pass_action_clear(1.0, 0.0, 0.0, 1.0), w, h);
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait App {
    /// Override the default configuration before the window is created
    fn configure(&mut self, config: &mut AppConfig, args: &dyn Args) {}

    /// Build GPU resources once the backend context exists
    fn init(&mut self, ctx: &mut Context<'_>) {}

    /// Record the frame's commands
    fn frame(&mut self, ctx: &mut Context<'_>) {}

    /// Release what `init` created
    fn cleanup(&mut self, ctx: &mut Context<'_>) {}

    fn event(&mut self, ctx: &mut Context<'_>, event: &Event) {}

    /// Diagnostic message from the host or the framework
    fn fail(&mut self, message: &str) {}
}

// ===== CONTEXT =====

/// Everything a hook may use during one callback
pub struct Context<'a> {
    /// Resource factory and command builder
    pub gfx: &'a mut Gfx,
    pub platform: &'a mut dyn Platform,
    pub fetch: &'a mut dyn Fetch,
    pub args: &'a dyn Args,
    delta_time: f64,
    frame_count: u64,
}

impl Context<'_> {
    /// Seconds elapsed between the previous frame and this one
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Number of completed frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn width(&self) -> i32 {
        self.platform.width()
    }

    pub fn height(&self) -> i32 {
        self.platform.height()
    }

    pub fn is_gles2(&self) -> bool {
        self.platform.is_gles2()
    }

    /// Ask the host to shut down; `cleanup` runs later
    pub fn quit(&mut self) {
        falcon_debug!(SOURCE, "quit requested from a hook");
        self.platform.request_quit();
    }
}

// ===== SERVICES =====

/// Host subsystems driven by an [`Application`]
///
/// The GPU backend is always supplied by the caller; timer, fetch and args
/// default to [`StdTimer`], [`FileFetch`] and [`KeyValueArgs`].
pub struct Services {
    gfx: Gfx,
    timer: Box<dyn Timer>,
    fetch: Box<dyn Fetch>,
    fetch_desc: FetchDesc,
    args: Box<dyn Args>,
}

impl Services {
    pub fn new(backend: Box<dyn GfxBackend>) -> Self {
        Self {
            gfx: Gfx::new(backend),
            timer: Box::new(StdTimer::new()),
            fetch: Box::new(FileFetch::new()),
            fetch_desc: FetchDesc::default(),
            args: Box::new(KeyValueArgs::new()),
        }
    }

    #[must_use]
    pub fn with_timer(mut self, timer: Box<dyn Timer>) -> Self {
        self.timer = timer;
        self
    }

    #[must_use]
    pub fn with_fetch(mut self, fetch: Box<dyn Fetch>) -> Self {
        self.fetch = fetch;
        self
    }

    #[must_use]
    pub fn with_fetch_desc(mut self, desc: FetchDesc) -> Self {
        self.fetch_desc = desc;
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: Box<dyn Args>) -> Self {
        self.args = args;
        self
    }
}

// ===== APPLICATION =====

/// Lifecycle state of an [`Application`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unconfigured,
    Configuring,
    Initialized,
    Running,
    CleaningUp,
    Terminated,
}

/// Lifecycle controller
///
/// Constructed explicitly and passed by reference to the host driver (for
/// example [`run`](crate::app::winit_host::run)); there is no global
/// instance. Hooks read the frame timing through [`Context`] and never touch
/// lifecycle fields directly.
pub struct Application<A: App> {
    app: A,
    state: LifecycleState,
    config: AppConfig,
    gfx: Gfx,
    timer: Box<dyn Timer>,
    fetch: Box<dyn Fetch>,
    fetch_desc: FetchDesc,
    args: Box<dyn Args>,
    /// Timer ticks of the previous lap (0 before the first frame)
    last_time: u64,
    delta_time: f64,
    frame_count: u64,
}

impl<A: App> Application<A> {
    pub fn new(app: A, services: Services) -> Self {
        Self {
            app,
            state: LifecycleState::Unconfigured,
            config: AppConfig::default(),
            gfx: services.gfx,
            timer: services.timer,
            fetch: services.fetch,
            fetch_desc: services.fetch_desc,
            args: services.args,
            last_time: 0,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Configuration produced by `setup`
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Seconds between the two most recent frames (0 before the first frame)
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Number of completed frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn gfx(&self) -> &Gfx {
        &self.gfx
    }

    fn transition(&mut self, next: LifecycleState) {
        falcon_debug!(SOURCE, "{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Acquire the argument and fetch services, then run `configure_cb`
    ///
    /// The resulting configuration is available through [`Application::config`].
    /// `argv` excludes the program name. On failure every service acquired
    /// here is released again and the state returns to `Unconfigured`.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless `Unconfigured`, `InvalidArgument` for a malformed
    /// argument, `InvalidConfig` when the configuration fails validation, or
    /// the fetch service's setup error.
    pub fn setup(&mut self, argv: &[String]) -> Result<()> {
        if self.state != LifecycleState::Unconfigured {
            falcon_bail!(InvalidState, SOURCE, "setup called while {:?}", self.state);
        }

        self.args.setup(argv)?;
        falcon_info!(SOURCE, "argument service acquired ({} arguments)", argv.len());

        if let Err(err) = self.fetch.setup(&self.fetch_desc) {
            self.args.shutdown();
            return Err(err);
        }
        falcon_info!(SOURCE, "fetch service acquired");

        if let Err(err) = self.configure_cb() {
            self.fetch.shutdown();
            self.args.shutdown();
            self.transition(LifecycleState::Unconfigured);
            return Err(err);
        }
        Ok(())
    }

    /// Defaults first, then the `configure` hook, then validation
    fn configure_cb(&mut self) -> Result<()> {
        self.transition(LifecycleState::Configuring);
        self.config = AppConfig::default();
        self.app.configure(&mut self.config, self.args.as_ref());
        self.config.validate()?;
        self.transition(LifecycleState::Initialized);
        Ok(())
    }

    /// Acquire the GPU backend context and the timer baseline, then run `init`
    ///
    /// # Errors
    ///
    /// `InvalidState` unless `Initialized`; in particular a second call fails.
    pub fn init_cb(&mut self, platform: &mut dyn Platform) -> Result<()> {
        if self.state != LifecycleState::Initialized {
            falcon_bail!(InvalidState, SOURCE, "init_cb called while {:?}", self.state);
        }

        let desc = GfxDesc {
            context: platform.gfx_context(),
            ..Default::default()
        };
        self.gfx.setup(&desc);
        self.timer.setup();
        self.last_time = 0;
        self.delta_time = 0.0;
        falcon_info!(SOURCE, "timer baseline established");
        self.transition(LifecycleState::Running);

        let mut ctx = Context {
            gfx: &mut self.gfx,
            platform,
            fetch: self.fetch.as_mut(),
            args: self.args.as_ref(),
            delta_time: self.delta_time,
            frame_count: self.frame_count,
        };
        self.app.init(&mut ctx);
        Ok(())
    }

    /// One host tick
    ///
    /// Drains the fetch service, laps the timer, runs `frame`, then commits
    /// the recorded GPU commands. Fetches completed here are visible to the
    /// same frame's hook.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless `Running`.
    pub fn frame_cb(&mut self, platform: &mut dyn Platform) -> Result<()> {
        if self.state != LifecycleState::Running {
            falcon_bail!(InvalidState, SOURCE, "frame_cb called while {:?}", self.state);
        }

        self.fetch.do_work();
        let ticks = self.timer.lap_time(&mut self.last_time);
        self.delta_time = self.timer.to_seconds(ticks);

        let mut ctx = Context {
            gfx: &mut self.gfx,
            platform,
            fetch: self.fetch.as_mut(),
            args: self.args.as_ref(),
            delta_time: self.delta_time,
            frame_count: self.frame_count,
        };
        self.app.frame(&mut ctx);

        self.gfx.commit();
        self.frame_count += 1;
        Ok(())
    }

    /// Run `cleanup`, then release fetch, args and the GPU backend context
    ///
    /// Runs at most once and cannot be interrupted once begun.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless `Running`.
    pub fn cleanup_cb(&mut self, platform: &mut dyn Platform) -> Result<()> {
        if self.state != LifecycleState::Running {
            falcon_bail!(InvalidState, SOURCE, "cleanup_cb called while {:?}", self.state);
        }
        self.transition(LifecycleState::CleaningUp);

        let mut ctx = Context {
            gfx: &mut self.gfx,
            platform,
            fetch: self.fetch.as_mut(),
            args: self.args.as_ref(),
            delta_time: self.delta_time,
            frame_count: self.frame_count,
        };
        self.app.cleanup(&mut ctx);

        self.fetch.shutdown();
        falcon_info!(SOURCE, "fetch service released");
        self.args.shutdown();
        falcon_info!(SOURCE, "argument service released");
        self.gfx.shutdown();

        self.transition(LifecycleState::Terminated);
        Ok(())
    }

    /// Forward a platform event to the `event` hook
    ///
    /// # Errors
    ///
    /// `InvalidState` once `Terminated`.
    pub fn event_cb(&mut self, platform: &mut dyn Platform, event: &Event) -> Result<()> {
        if self.state == LifecycleState::Terminated {
            falcon_bail!(InvalidState, SOURCE, "event {:?} after termination", event);
        }

        let mut ctx = Context {
            gfx: &mut self.gfx,
            platform,
            fetch: self.fetch.as_mut(),
            args: self.args.as_ref(),
            delta_time: self.delta_time,
            frame_count: self.frame_count,
        };
        self.app.event(&mut ctx, event);
        Ok(())
    }

    /// Log `message` and forward it to the `fail` hook
    ///
    /// Valid in any state; never triggers cleanup by itself.
    pub fn fail_cb(&mut self, message: &str) {
        falcon_error!(SOURCE, "{}", message);
        self.app.fail(message);
    }

    /// Ask the host to shut down; `cleanup_cb` follows on the host's schedule
    pub fn quit(&self, platform: &mut dyn Platform) {
        falcon_debug!(SOURCE, "quit requested");
        platform.request_quit();
    }
}

#[cfg(test)]
#[path = "application_tests.rs"]
mod tests;
