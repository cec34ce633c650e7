//! Lifecycle controller, host platform interface, host services and the
//! winit host runner.

pub mod application;
pub mod args;
pub mod config;
pub mod fetch;
pub mod platform;
pub mod timer;
pub mod winit_host;

pub use application::{App, Application, Context, LifecycleState, Services};
pub use args::{Args, KeyValueArgs};
pub use config::AppConfig;
pub use fetch::{Fetch, FetchDesc, FetchHandle, FetchResponse, FileFetch};
pub use platform::{Event, Key, MouseButton, Platform};
pub use timer::{StdTimer, Timer};
pub use winit_host::run;

// Mock host services for tests
#[cfg(test)]
pub mod mock_services;
