//! Typed, non-owning resource handles
//!
//! Every handle is an opaque id issued by the host GPU backend. The framework
//! never tracks liveness: a handle may be stale, and the zero id is the
//! invalid handle. Destroying either is a backend no-op.

use std::fmt;

use crate::gfx::backend::GfxBackend;

/// Resource kinds owned by the host GPU backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Buffer,
    Image,
    Shader,
    Pipeline,
    Pass,
}

/// Common behaviour of the typed handles
///
/// Implemented by [`Buffer`], [`Image`], [`Shader`], [`Pipeline`] and [`Pass`].
/// Dispatches a destroy to the backend call matching the handle's kind.
pub trait Resource: Copy + fmt::Debug {
    /// Kind of resource this handle refers to
    const KIND: ResourceKind;

    /// Raw backend id (0 = invalid)
    fn id(&self) -> u32;

    /// Wrap a raw backend id
    fn from_id(id: u32) -> Self;

    /// Whether the handle is the invalid handle
    fn is_invalid(&self) -> bool {
        self.id() == 0
    }

    /// Forward a destroy request to the backend
    fn destroy_in(self, backend: &mut dyn GfxBackend);
}

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $kind:ident, $destroy:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            id: u32,
        }

        impl $name {
            /// The invalid handle
            pub const INVALID: Self = Self { id: 0 };
        }

        impl Resource for $name {
            const KIND: ResourceKind = ResourceKind::$kind;

            fn id(&self) -> u32 {
                self.id
            }

            fn from_id(id: u32) -> Self {
                Self { id }
            }

            fn destroy_in(self, backend: &mut dyn GfxBackend) {
                backend.$destroy(self);
            }
        }
    };
}

define_handle!(
    /// Vertex or index buffer
    Buffer, Buffer, destroy_buffer
);
define_handle!(
    /// Texture or render target image
    Image, Image, destroy_image
);
define_handle!(
    /// Compiled shader program
    Shader, Shader, destroy_shader
);
define_handle!(
    /// Pipeline state object
    Pipeline, Pipeline, destroy_pipeline
);
define_handle!(
    /// Offscreen render pass (set of render target images)
    Pass, Pass, destroy_pass
);
