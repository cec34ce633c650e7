//! Winit host runner
//!
//! Drives an [`Application`] from a winit event loop: `setup` before the loop
//! starts, window creation and `init_cb` on the first resume, `frame_cb` on
//! every redraw, `cleanup_cb` on close or after a quit request. Any lifecycle
//! error is reported through `fail_cb` and ends the loop.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::NamedKey;
use winit::window::{Fullscreen, Window, WindowId};

use crate::app::application::{App, Application, LifecycleState};
use crate::app::config::AppConfig;
use crate::app::platform::{Event, Key, MouseButton, Platform};
use crate::error::{Error, Result};
use crate::gfx::{ContextDesc, PixelFormat};
use crate::{falcon_err, falcon_info};

const SOURCE: &str = "falcon::winit";

/// Run `application` until the window closes or a hook calls `quit`
///
/// `args` are the start-up arguments without the program name, e.g.
/// `std::env::args().skip(1).collect::<Vec<_>>()`.
///
/// # Errors
///
/// Returns the first lifecycle error (after forwarding it to `fail_cb`), or
/// `InitializationFailed` when the event loop or the window cannot be
/// created.
pub fn run<A: App>(application: &mut Application<A>, args: &[String]) -> Result<()> {
    if let Err(err) = application.setup(args) {
        application.fail_cb(&err.to_string());
        return Err(err);
    }

    let event_loop = EventLoop::new()
        .map_err(|e| falcon_err!(InitializationFailed, SOURCE, "event loop: {}", e))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut host = WinitHost {
        core: HostCore::new(application),
        cursor: (0.0, 0.0),
        error: None,
    };
    event_loop
        .run_app(&mut host)
        .map_err(|e| falcon_err!(InitializationFailed, SOURCE, "event loop: {}", e))?;

    match host.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// ===== PLATFORM =====

/// [`Platform`] over a winit window
struct WinitPlatform {
    window: Arc<Window>,
    sample_count: i32,
    gles2: bool,
    quit_requested: bool,
}

impl WinitPlatform {
    fn new(window: Arc<Window>, config: &AppConfig) -> Self {
        // Only GLES targets have a reduced-feature fallback
        let gles_target = cfg!(any(target_arch = "wasm32", target_os = "android", target_os = "ios"));
        Self {
            window,
            sample_count: config.sample_count,
            gles2: gles_target && config.gl_force_gles2,
            quit_requested: false,
        }
    }
}

impl Platform for WinitPlatform {
    fn width(&self) -> i32 {
        self.window.inner_size().width as i32
    }

    fn height(&self) -> i32 {
        self.window.inner_size().height as i32
    }

    fn is_gles2(&self) -> bool {
        self.gles2
    }

    fn gfx_context(&self) -> ContextDesc {
        ContextDesc {
            color_format: PixelFormat::Bgra8,
            depth_format: PixelFormat::DepthStencil,
            sample_count: self.sample_count,
            gles2: self.gles2,
            window: Some(self.window.clone()),
        }
    }

    fn request_quit(&mut self) {
        self.quit_requested = true;
    }
}

// ===== EVENT TRANSLATION =====

fn translate_key(key: &winit::keyboard::Key) -> Key {
    use winit::keyboard::Key as WinitKey;

    match key {
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Named(NamedKey::Enter) => Key::Enter,
        WinitKey::Named(NamedKey::Space) => Key::Space,
        WinitKey::Named(NamedKey::Tab) => Key::Tab,
        WinitKey::Named(NamedKey::Backspace) => Key::Backspace,
        WinitKey::Named(NamedKey::Delete) => Key::Delete,
        WinitKey::Named(NamedKey::ArrowLeft) => Key::Left,
        WinitKey::Named(NamedKey::ArrowRight) => Key::Right,
        WinitKey::Named(NamedKey::ArrowUp) => Key::Up,
        WinitKey::Named(NamedKey::ArrowDown) => Key::Down,
        WinitKey::Character(text) => match text.chars().next() {
            Some(' ') => Key::Space,
            Some(c) => Key::Character(c.to_ascii_lowercase()),
            None => Key::Unknown,
        },
        _ => Key::Unknown,
    }
}

fn translate_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

/// Lines are scaled to roughly match pixel deltas
fn translate_scroll(delta: MouseScrollDelta) -> Event {
    match delta {
        MouseScrollDelta::LineDelta(dx, dy) => Event::MouseScroll { dx, dy },
        MouseScrollDelta::PixelDelta(pos) => Event::MouseScroll {
            dx: pos.x as f32 / 20.0,
            dy: pos.y as f32 / 20.0,
        },
    }
}

// ===== HOST =====

/// Window-independent half of the host: forwards callbacks to the
/// [`Application`] while its platform is live
///
/// The platform is dropped once cleanup has run, so events or redraws that
/// winit still delivers before the loop stops reach nothing.
struct HostCore<'a, A: App, P: Platform> {
    application: &'a mut Application<A>,
    platform: Option<P>,
}

impl<'a, A: App, P: Platform> HostCore<'a, A, P> {
    fn new(application: &'a mut Application<A>) -> Self {
        Self {
            application,
            platform: None,
        }
    }

    fn is_live(&self) -> bool {
        self.platform.is_some()
    }

    /// Adopt `platform` and run `init_cb`
    ///
    /// The platform is released again when `init_cb` fails.
    fn start(&mut self, platform: P) -> Result<()> {
        let platform = self.platform.insert(platform);
        let result = self.application.init_cb(platform);
        if result.is_err() {
            self.platform = None;
        }
        result
    }

    fn dispatch(&mut self, event: &Event) -> Result<()> {
        match self.platform.as_mut() {
            Some(platform) => self.application.event_cb(platform, event),
            None => Ok(()),
        }
    }

    fn redraw(&mut self) -> Result<()> {
        match self.platform.as_mut() {
            Some(platform) => self.application.frame_cb(platform),
            None => Ok(()),
        }
    }

    /// Run `cleanup_cb` once and release the platform
    fn shut_down(&mut self) -> Result<()> {
        let Some(mut platform) = self.platform.take() else {
            return Ok(());
        };
        if self.application.state() == LifecycleState::Running {
            self.application.cleanup_cb(&mut platform)?;
        }
        Ok(())
    }
}

struct WinitHost<'a, A: App> {
    core: HostCore<'a, A, WinitPlatform>,
    /// Last cursor position, attached to button events
    cursor: (f32, f32),
    error: Option<Error>,
}

impl<A: App> WinitHost<'_, A> {
    /// Report the first error through `fail_cb` and leave the loop
    fn abort(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        if self.error.is_none() {
            self.core.application.fail_cb(&err.to_string());
            self.error = Some(err);
        }
        event_loop.exit();
    }

    fn check(&mut self, event_loop: &ActiveEventLoop, result: Result<()>) {
        if let Err(err) = result {
            self.abort(event_loop, err);
        }
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: Event) {
        let result = self.core.dispatch(&event);
        self.check(event_loop, result);
    }

    fn finish(&mut self, event_loop: &ActiveEventLoop) {
        let result = self.core.shut_down();
        self.check(event_loop, result);
        event_loop.exit();
    }

    fn quit_requested(&self) -> bool {
        self.core.platform.as_ref().is_some_and(|p| p.quit_requested)
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Window> {
        let config = self.core.application.config();
        let mut attributes = Window::default_attributes().with_title(config.window_title.as_str());
        attributes = if config.high_dpi {
            attributes.with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
        } else {
            attributes.with_inner_size(PhysicalSize::new(config.width as u32, config.height as u32))
        };
        if config.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        event_loop
            .create_window(attributes)
            .map_err(|e| falcon_err!(InitializationFailed, SOURCE, "window creation: {}", e))
    }
}

impl<A: App> ApplicationHandler for WinitHost<'_, A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.core.is_live() {
            self.dispatch(event_loop, Event::Resumed);
            return;
        }
        if self.core.application.state() != LifecycleState::Initialized {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.abort(event_loop, err);
                return;
            }
        };
        let size = window.inner_size();
        falcon_info!(SOURCE, "window created ({}x{})", size.width, size.height);

        let platform = WinitPlatform::new(window.clone(), self.core.application.config());
        if let Err(err) = self.core.start(platform) {
            self.abort(event_loop, err);
            return;
        }
        window.request_redraw();
    }

    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        self.dispatch(event_loop, Event::Suspended);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.dispatch(event_loop, Event::QuitRequested);
                self.finish(event_loop);
                return;
            }
            WindowEvent::RedrawRequested => {
                let result = self.core.redraw();
                self.check(event_loop, result);
            }
            WindowEvent::Resized(size) => self.dispatch(
                event_loop,
                Event::Resized {
                    width: size.width as i32,
                    height: size.height as i32,
                },
            ),
            WindowEvent::KeyboardInput { event, .. } => {
                let key = translate_key(&event.logical_key);
                match event.state {
                    ElementState::Pressed => {
                        self.dispatch(event_loop, Event::KeyDown { key, repeat: event.repeat });
                        if let Some(text) = &event.text {
                            for c in text.chars().filter(|c| !c.is_control()) {
                                self.dispatch(event_loop, Event::Char(c));
                            }
                        }
                    }
                    ElementState::Released => self.dispatch(event_loop, Event::KeyUp { key }),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                self.dispatch(event_loop, Event::MouseMove { x: self.cursor.0, y: self.cursor.1 });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let (button, (x, y)) = (translate_button(button), self.cursor);
                let event = match state {
                    ElementState::Pressed => Event::MouseDown { button, x, y },
                    ElementState::Released => Event::MouseUp { button, x, y },
                };
                self.dispatch(event_loop, event);
            }
            WindowEvent::MouseWheel { delta, .. } => self.dispatch(event_loop, translate_scroll(delta)),
            WindowEvent::Focused(true) => self.dispatch(event_loop, Event::Focused),
            WindowEvent::Focused(false) => self.dispatch(event_loop, Event::Unfocused),
            _ => {}
        }

        if self.quit_requested() {
            self.finish(event_loop);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(platform) = &self.core.platform {
            platform.window.request_redraw();
        }
    }
}
