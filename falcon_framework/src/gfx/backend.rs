//! Host GPU backend interface
//!
//! The backend owns every GPU resource and is driven through this trait. Calls
//! are infallible at this layer: failures surface through the host's
//! asynchronous `fail` channel, never as return values.

use std::sync::Arc;
use bitflags::bitflags;
use winit::window::Window;

use crate::gfx::desc::{
    Bindings, BufferDesc, ImageContent, ImageDesc, PassAction, PassDesc, PipelineDesc,
    PixelFormat, ShaderDesc, ShaderStage,
};
use crate::gfx::handle::{Buffer, Image, Pass, Pipeline, Shader};

bitflags! {
    /// Optional capabilities of the active backend
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Features: u32 {
        const INSTANCING = 1 << 0;
        const ORIGIN_TOP_LEFT = 1 << 1;
        /// More than one simultaneous color target per pass
        const MULTIPLE_RENDER_TARGETS = 1 << 2;
        /// Multi-sampled offscreen render targets
        const MSAA_RENDER_TARGETS = 1 << 3;
        const IMAGETYPE_3D = 1 << 4;
        const IMAGETYPE_ARRAY = 1 << 5;
    }
}

/// Rendering context handed over by the host platform
#[derive(Debug, Clone, Default)]
pub struct ContextDesc {
    pub color_format: PixelFormat,
    pub depth_format: PixelFormat,
    pub sample_count: i32,
    /// Reduced-feature backend (GLES2 / WebGL1)
    pub gles2: bool,
    /// Window the default pass renders into, when the host has one
    pub window: Option<Arc<Window>>,
}

/// Backend setup parameters
#[derive(Debug, Clone)]
pub struct GfxDesc {
    pub buffer_pool_size: usize,
    pub image_pool_size: usize,
    pub shader_pool_size: usize,
    pub pipeline_pool_size: usize,
    pub pass_pool_size: usize,
    pub context: ContextDesc,
}

impl Default for GfxDesc {
    fn default() -> Self {
        Self {
            buffer_pool_size: 128,
            image_pool_size: 128,
            shader_pool_size: 32,
            pipeline_pool_size: 64,
            pass_pool_size: 16,
            context: ContextDesc::default(),
        }
    }
}

/// Host GPU backend
///
/// Implemented by the platform integration (GL, Metal, D3D11, ...). All
/// `destroy_*` calls must tolerate stale and invalid handles silently.
pub trait GfxBackend {
    /// Acquire the backend context
    fn setup(&mut self, desc: &GfxDesc);

    /// Release the backend context
    fn shutdown(&mut self);

    /// Whether `setup` has run and `shutdown` has not
    fn is_valid(&self) -> bool;

    /// Capabilities of the active backend
    fn query_features(&self) -> Features;

    // ===== RESOURCES =====

    fn make_buffer(&mut self, desc: &BufferDesc) -> Buffer;
    fn make_image(&mut self, desc: &ImageDesc) -> Image;
    fn make_shader(&mut self, desc: &ShaderDesc) -> Shader;
    fn make_pipeline(&mut self, desc: &PipelineDesc) -> Pipeline;
    fn make_pass(&mut self, desc: &PassDesc) -> Pass;

    fn destroy_buffer(&mut self, buffer: Buffer);
    fn destroy_image(&mut self, image: Image);
    fn destroy_shader(&mut self, shader: Shader);
    fn destroy_pipeline(&mut self, pipeline: Pipeline);
    fn destroy_pass(&mut self, pass: Pass);

    /// Replace the content of a dynamic or stream buffer
    fn update_buffer(&mut self, buffer: Buffer, data: &[u8]);

    /// Replace the content of a dynamic or stream image
    fn update_image(&mut self, image: Image, content: &ImageContent);

    // ===== COMMANDS =====

    /// Open a pass against the default render target
    fn begin_default_pass(&mut self, action: &PassAction, width: i32, height: i32);

    /// Open a pass against an offscreen render target
    fn begin_pass(&mut self, pass: Pass, action: &PassAction);

    fn apply_viewport(&mut self, x: i32, y: i32, width: i32, height: i32, origin_top_left: bool);
    fn apply_scissor_rect(&mut self, x: i32, y: i32, width: i32, height: i32, origin_top_left: bool);
    fn apply_pipeline(&mut self, pipeline: Pipeline);
    fn apply_bindings(&mut self, bindings: &Bindings);
    fn apply_uniforms(&mut self, stage: ShaderStage, slot: usize, data: &[u8]);

    /// Draw `num_elements` vertices/indices starting at `base_element`
    fn draw(&mut self, base_element: i32, num_elements: i32, num_instances: i32);

    /// Close the current pass
    fn end_pass(&mut self);

    /// Flush the commands recorded this frame
    fn commit(&mut self);
}
