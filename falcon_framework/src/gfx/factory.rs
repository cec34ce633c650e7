//! Resource factory
//!
//! Every resource kind can be built two ways: from a ready descriptor
//! (`make_buffer`) or from a configurator that fills in a default descriptor
//! (`make_buffer_with`). The generic [`make`] / [`make_with`] apply the same
//! idiom to plain values such as [`PassAction`] or [`Bindings`].
//!
//! [`Bindings`]: crate::gfx::desc::Bindings

use bytemuck::Pod;

use crate::gfx::backend::{Features, GfxBackend, GfxDesc};
use crate::gfx::desc::{
    Action, BufferDesc, BufferType, ImageContent, ImageDesc, PassAction, PassDesc,
    PipelineDesc, ShaderDesc,
};
use crate::gfx::handle::{Buffer, Image, Pass, Pipeline, Resource, Shader};
use crate::{falcon_info, falcon_trace};

const SOURCE: &str = "falcon::gfx";

// ===== PLAIN VALUES =====

/// Build a default-initialized value
pub fn make<T: Default>() -> T {
    T::default()
}

/// Build a value by letting `configurator` populate a default-initialized one
///
/// # Example
///
/// ```
/// use falcon_framework::falcon::gfx::{make_with, Action, PassAction};
///
/// let action = make_with::<PassAction>(|a| {
///     a.colors[0].action = Action::Clear;
///     a.colors[0].value = [1.0, 0.0, 0.0, 1.0];
/// });
/// assert_eq!(action.colors[1].action, Action::Default);
/// ```
pub fn make_with<T: Default>(configurator: impl FnOnce(&mut T)) -> T {
    let mut value = T::default();
    configurator(&mut value);
    value
}

/// Pass action clearing the first color attachment to `(r, g, b, a)`
///
/// Only `colors[0]` is touched; depth, stencil and the other color
/// attachments keep their default action.
pub fn make_pass_action_clear(r: f32, g: f32, b: f32, a: f32) -> PassAction {
    make_with(|action: &mut PassAction| {
        action.colors[0].action = Action::Clear;
        action.colors[0].value = [r, g, b, a];
    })
}

// ===== GFX =====

/// Front end of the host GPU backend
///
/// Owns the backend object and exposes resource creation, updates,
/// destruction and the scoped command builder (see [`Gfx::begin`]).
pub struct Gfx {
    backend: Box<dyn GfxBackend>,
}

impl Gfx {
    pub fn new(backend: Box<dyn GfxBackend>) -> Self {
        Self { backend }
    }

    pub(crate) fn setup(&mut self, desc: &GfxDesc) {
        self.backend.setup(desc);
        falcon_info!(SOURCE, "GPU backend context acquired");
    }

    pub(crate) fn shutdown(&mut self) {
        self.backend.shutdown();
        falcon_info!(SOURCE, "GPU backend context released");
    }

    pub(crate) fn commit(&mut self) {
        self.backend.commit();
    }

    pub(crate) fn backend_mut(&mut self) -> &mut dyn GfxBackend {
        self.backend.as_mut()
    }

    /// Whether the backend context is currently acquired
    pub fn is_valid(&self) -> bool {
        self.backend.is_valid()
    }

    /// Capabilities of the active backend
    ///
    /// Used to branch to a reduced fallback path instead of failing, e.g.
    /// single-sampled render targets when MSAA targets are unsupported.
    pub fn query_features(&self) -> Features {
        self.backend.query_features()
    }

    // ===== BUFFERS =====

    pub fn make_buffer(&mut self, desc: &BufferDesc) -> Buffer {
        let buffer = self.backend.make_buffer(desc);
        falcon_trace!(SOURCE, "make_buffer '{}' ({} bytes) -> {:?}", desc.label, desc.size, buffer);
        buffer
    }

    pub fn make_buffer_with(&mut self, configurator: impl FnOnce(&mut BufferDesc)) -> Buffer {
        let desc = make_with(configurator);
        self.make_buffer(&desc)
    }

    /// Immutable vertex buffer holding `data`
    ///
    /// Sets exactly the buffer type, size, content and label.
    pub fn make_vertex_buffer<T: Pod>(&mut self, data: &[T], label: &str) -> Buffer {
        self.make_typed_buffer(BufferType::VertexBuffer, bytemuck::cast_slice(data), label)
    }

    /// Immutable index buffer holding `data`
    ///
    /// Sets exactly the buffer type, size, content and label.
    pub fn make_index_buffer<T: Pod>(&mut self, data: &[T], label: &str) -> Buffer {
        self.make_typed_buffer(BufferType::IndexBuffer, bytemuck::cast_slice(data), label)
    }

    fn make_typed_buffer(&mut self, buffer_type: BufferType, bytes: &[u8], label: &str) -> Buffer {
        self.make_buffer_with(|desc| {
            desc.buffer_type = buffer_type;
            desc.size = bytes.len();
            desc.content = bytes.to_vec();
            desc.label = label.to_string();
        })
    }

    /// Replace the content of a dynamic or stream buffer
    pub fn update_buffer<T: Pod>(&mut self, buffer: Buffer, data: &[T]) {
        self.backend.update_buffer(buffer, bytemuck::cast_slice(data));
    }

    // ===== IMAGES =====

    pub fn make_image(&mut self, desc: &ImageDesc) -> Image {
        let image = self.backend.make_image(desc);
        falcon_trace!(SOURCE, "make_image '{}' ({}x{}) -> {:?}", desc.label, desc.width, desc.height, image);
        image
    }

    pub fn make_image_with(&mut self, configurator: impl FnOnce(&mut ImageDesc)) -> Image {
        let desc = make_with(configurator);
        self.make_image(&desc)
    }

    /// Replace the content of a dynamic or stream image
    pub fn update_image(&mut self, image: Image, configurator: impl FnOnce(&mut ImageContent)) {
        let content = make_with(configurator);
        self.backend.update_image(image, &content);
    }

    // ===== SHADERS =====

    pub fn make_shader(&mut self, desc: &ShaderDesc) -> Shader {
        let shader = self.backend.make_shader(desc);
        falcon_trace!(SOURCE, "make_shader '{}' -> {:?}", desc.label, shader);
        shader
    }

    pub fn make_shader_with(&mut self, configurator: impl FnOnce(&mut ShaderDesc)) -> Shader {
        let desc = make_with(configurator);
        self.make_shader(&desc)
    }

    // ===== PIPELINES =====

    pub fn make_pipeline(&mut self, desc: &PipelineDesc) -> Pipeline {
        let pipeline = self.backend.make_pipeline(desc);
        falcon_trace!(SOURCE, "make_pipeline '{}' -> {:?}", desc.label, pipeline);
        pipeline
    }

    pub fn make_pipeline_with(&mut self, configurator: impl FnOnce(&mut PipelineDesc)) -> Pipeline {
        let desc = make_with(configurator);
        self.make_pipeline(&desc)
    }

    // ===== PASSES =====

    pub fn make_pass(&mut self, desc: &PassDesc) -> Pass {
        let pass = self.backend.make_pass(desc);
        falcon_trace!(SOURCE, "make_pass '{}' -> {:?}", desc.label, pass);
        pass
    }

    pub fn make_pass_with(&mut self, configurator: impl FnOnce(&mut PassDesc)) -> Pass {
        let desc = make_with(configurator);
        self.make_pass(&desc)
    }

    // ===== DESTRUCTION =====

    /// Destroy a resource of any kind
    ///
    /// Safe on stale and invalid handles: resize-driven recreation may destroy
    /// an attachment that was never created or was already released.
    pub fn destroy<R: Resource>(&mut self, resource: R) {
        falcon_trace!(SOURCE, "destroy {:?}", resource);
        resource.destroy_in(self.backend.as_mut());
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
