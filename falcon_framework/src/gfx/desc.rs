//! Plain value descriptors
//!
//! Each descriptor fully specifies the construction parameters of a resource
//! or action. `Default` leaves every field at the backend's "unset" value, so
//! a configurator only needs to touch the fields it cares about.

use crate::gfx::handle::{Buffer, Image, Shader};

// ===== LIMITS =====

pub const MAX_COLOR_ATTACHMENTS: usize = 4;
pub const MAX_SHADERSTAGE_BUFFERS: usize = 8;
pub const MAX_SHADERSTAGE_IMAGES: usize = 12;
pub const MAX_SHADERSTAGE_UBS: usize = 4;
pub const MAX_VERTEX_ATTRIBUTES: usize = 16;
pub const MAX_MIPMAPS: usize = 16;
pub const CUBEFACE_NUM: usize = 6;

// ===== ENUMS =====

/// Shader stage a uniform block or image slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vs,
    Fs,
}

/// Load behaviour of a pass attachment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Action {
    /// Backend default (clear with the default value)
    #[default]
    Default,
    /// Clear to the action's value
    Clear,
    /// Keep the previous content
    Load,
    /// Discard the previous content
    DontCare,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BufferType {
    #[default]
    VertexBuffer,
    IndexBuffer,
}

/// Update strategy of a buffer or image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Usage {
    /// Content given at creation, never updated
    #[default]
    Immutable,
    /// Updated infrequently
    Dynamic,
    /// Updated every frame
    Stream,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageType {
    #[default]
    Dim2,
    Cube,
    Dim3,
    Array,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PixelFormat {
    /// Backend default (the swapchain format for render targets)
    #[default]
    Default,
    None,
    R8,
    R32F,
    Rgba8,
    Rgba16F,
    Rgba32F,
    Bgra8,
    Depth,
    DepthStencil,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    Default,
    Nearest,
    Linear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Wrap {
    #[default]
    Default,
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrimitiveType {
    #[default]
    Default,
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexType {
    #[default]
    Default,
    None,
    Uint16,
    Uint32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VertexFormat {
    #[default]
    Invalid,
    Float,
    Float2,
    Float3,
    Float4,
    Byte4,
    Byte4N,
    UByte4,
    UByte4N,
    Short2,
    Short2N,
    Short4,
    Short4N,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VertexStep {
    #[default]
    Default,
    PerVertex,
    PerInstance,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompareFunc {
    #[default]
    Default,
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CullMode {
    #[default]
    Default,
    None,
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaceWinding {
    #[default]
    Default,
    Ccw,
    Cw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlendFactor {
    #[default]
    Default,
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstColor,
}

// ===== PASS ACTION =====

/// Load behaviour and clear value of one color attachment
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorAttachmentAction {
    pub action: Action,
    /// Clear color (RGBA)
    pub value: [f32; 4],
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DepthAttachmentAction {
    pub action: Action,
    pub value: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StencilAttachmentAction {
    pub action: Action,
    pub value: u8,
}

/// Per-attachment load behaviour for a pass
///
/// Built by the caller before opening a pass and copied by value into the
/// backend when the pass begins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassAction {
    pub colors: [ColorAttachmentAction; MAX_COLOR_ATTACHMENTS],
    pub depth: DepthAttachmentAction,
    pub stencil: StencilAttachmentAction,
}

// ===== BINDINGS =====

/// Buffers and images supplied as inputs to a pipeline for a draw call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings {
    pub vertex_buffers: [Buffer; MAX_SHADERSTAGE_BUFFERS],
    pub vertex_buffer_offsets: [i32; MAX_SHADERSTAGE_BUFFERS],
    pub index_buffer: Buffer,
    pub index_buffer_offset: i32,
    pub vs_images: [Image; MAX_SHADERSTAGE_IMAGES],
    pub fs_images: [Image; MAX_SHADERSTAGE_IMAGES],
}

// ===== BUFFER =====

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: usize,
    pub buffer_type: BufferType,
    pub usage: Usage,
    /// Initial content (required for immutable buffers)
    pub content: Vec<u8>,
    pub label: String,
}

// ===== IMAGE =====

/// Pixel data for every face and mip level of an image
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageContent {
    pub subimage: [[Vec<u8>; MAX_MIPMAPS]; CUBEFACE_NUM],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageDesc {
    pub image_type: ImageType,
    pub render_target: bool,
    pub width: i32,
    pub height: i32,
    /// Depth for 3D images, layer count for array images
    pub layers: i32,
    pub num_mipmaps: i32,
    pub usage: Usage,
    pub pixel_format: PixelFormat,
    pub sample_count: i32,
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub wrap_u: Wrap,
    pub wrap_v: Wrap,
    pub wrap_w: Wrap,
    pub content: ImageContent,
    pub label: String,
}

// ===== SHADER =====

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderAttrDesc {
    /// GLSL attribute name
    pub name: String,
    /// HLSL semantic name and index
    pub sem_name: String,
    pub sem_index: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShaderUniformBlockDesc {
    /// Size of the uniform block in bytes (0 = unused slot)
    pub size: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderImageDesc {
    pub name: String,
    pub image_type: ImageType,
}

/// Source or bytecode of one shader stage, plus its resource slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderStageDesc {
    pub source: String,
    pub bytecode: Vec<u8>,
    pub entry: String,
    pub uniform_blocks: [ShaderUniformBlockDesc; MAX_SHADERSTAGE_UBS],
    pub images: [ShaderImageDesc; MAX_SHADERSTAGE_IMAGES],
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderDesc {
    pub attrs: [ShaderAttrDesc; MAX_VERTEX_ATTRIBUTES],
    pub vs: ShaderStageDesc,
    pub fs: ShaderStageDesc,
    pub label: String,
}

// ===== PIPELINE =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferLayoutDesc {
    /// Vertex stride in bytes (0 = computed from the attributes)
    pub stride: i32,
    pub step_func: VertexStep,
    pub step_rate: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VertexAttrDesc {
    pub buffer_index: i32,
    /// Byte offset (0 = computed for tightly packed attributes)
    pub offset: i32,
    pub format: VertexFormat,
}

/// Vertex layout of a pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutDesc {
    pub buffers: [BufferLayoutDesc; MAX_SHADERSTAGE_BUFFERS],
    pub attrs: [VertexAttrDesc; MAX_VERTEX_ATTRIBUTES],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthStencilState {
    pub depth_compare_func: CompareFunc,
    pub depth_write_enabled: bool,
    pub stencil_enabled: bool,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub stencil_ref: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlendState {
    pub enabled: bool,
    pub src_factor_rgb: BlendFactor,
    pub dst_factor_rgb: BlendFactor,
    /// Number of simultaneous color targets (0 = 1)
    pub color_attachment_count: i32,
    pub color_format: PixelFormat,
    pub depth_format: PixelFormat,
    pub blend_color: [f32; 4],
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RasterizerState {
    pub alpha_to_coverage_enabled: bool,
    pub cull_mode: CullMode,
    pub face_winding: FaceWinding,
    pub sample_count: i32,
    pub depth_bias: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineDesc {
    pub layout: LayoutDesc,
    pub shader: Shader,
    pub primitive_type: PrimitiveType,
    pub index_type: IndexType,
    pub depth_stencil: DepthStencilState,
    pub blend: BlendState,
    pub rasterizer: RasterizerState,
    pub label: String,
}

// ===== PASS =====

/// One render target image of an offscreen pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttachmentDesc {
    pub image: Image,
    pub mip_level: i32,
    /// Cube face, array layer or 3D slice
    pub layer: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassDesc {
    pub color_attachments: [AttachmentDesc; MAX_COLOR_ATTACHMENTS],
    pub depth_stencil_attachment: AttachmentDesc,
    pub label: String,
}
