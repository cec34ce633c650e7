/*!
# Falcon Framework

Bridges a callback-driven host platform into a per-frame application
lifecycle, and provides a scope-guarded builder for GPU render-pass commands.

## Architecture

- **Application**: lifecycle controller turning host callbacks into `App` hooks
  and owning subsystem setup/teardown order
- **Gfx**: resource factory over the host GPU backend (descriptor and
  configurator forms for every resource kind)
- **PassBuilder / PipelineBuilder**: chainable command tokens; dropping the
  pass token closes the pass exactly once
- **Renderer**: explicit begin/end alternative to the scoped builder
- **Services**: timer, async fetch and argument parsing, with default
  implementations
- **run**: winit-driven host runner

GPU resources stay owned by the host backend. The crate only hands out typed,
non-owning handles.
*/

// Internal modules
mod error;
pub mod app;
pub mod gfx;
pub mod log;
pub mod renderer;

#[cfg(test)]
mod test_utils;

// Main falcon namespace module
pub mod falcon {
    // Error types
    pub use crate::error::{Error, Result};

    // Lifecycle controller and hooks
    pub use crate::app::{
        run, App, AppConfig, Application, Context, Event, Key, LifecycleState, MouseButton,
        Platform, Services,
    };

    // Host services
    pub use crate::app::{
        Args, Fetch, FetchDesc, FetchHandle, FetchResponse, FileFetch, KeyValueArgs, StdTimer,
        Timer,
    };

    // Explicit begin/end wrapper
    pub use crate::renderer::Renderer;

    // Logging sub-module (types and functions, NOT macros)
    pub mod log {
        pub use crate::log::{
            format_entry, reset_logger, set_logger, DefaultLogger, LogEntry, LogSeverity, Logger,
        };
    }

    // GPU sub-module: handles, descriptors, backend trait, factory, builders
    pub mod gfx {
        pub use crate::gfx::*;
    }
}

// Re-export math library at crate root
pub use glam;
