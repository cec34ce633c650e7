//! Explicit begin/end pass wrapper
//!
//! An alternative to the scoped [`PassBuilder`](crate::gfx::PassBuilder) for
//! call sites that prefer explicit open and close calls. The caller is
//! responsible for calling [`Renderer::end_pass`] exactly once per opened pass.

use crate::gfx::{
    Action, ColorAttachmentAction, DepthAttachmentAction, Gfx, Pass, PassAction,
    StencilAttachmentAction,
};

/// Holds one mutable [`PassAction`] reused for every pass it opens
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pass_action: PassAction,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing pass action
    pub fn with_pass_action(pass_action: PassAction) -> Self {
        Self { pass_action }
    }

    pub fn pass_action(&self) -> &PassAction {
        &self.pass_action
    }

    pub fn pass_action_mut(&mut self) -> &mut PassAction {
        &mut self.pass_action
    }

    // ===== PASSES =====

    /// Open a pass against the default render target with the held action
    pub fn begin_default_pass(&self, gfx: &mut Gfx, width: i32, height: i32) {
        gfx.backend_mut().begin_default_pass(&self.pass_action, width, height);
    }

    /// Open a pass against an offscreen render target with the held action
    pub fn begin_pass(&self, gfx: &mut Gfx, pass: Pass) {
        gfx.backend_mut().begin_pass(pass, &self.pass_action);
    }

    /// Close the pass opened by `begin_default_pass` or `begin_pass`
    pub fn end_pass(&self, gfx: &mut Gfx) {
        gfx.backend_mut().end_pass();
    }

    // ===== ATTACHMENT ACTIONS =====

    /// Clear color of color attachment `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_COLOR_ATTACHMENTS`.
    pub fn color_attachment_action_colors(&self, index: usize) -> [f32; 4] {
        self.pass_action.colors[index].value
    }

    /// Clear color attachment `index` to `(r, g, b, a)`
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_COLOR_ATTACHMENTS`.
    pub fn set_clear_color_action(&mut self, index: usize, r: f32, g: f32, b: f32, a: f32) {
        self.pass_action.colors[index] = ColorAttachmentAction {
            action: Action::Clear,
            value: [r, g, b, a],
        };
    }

    /// # Panics
    ///
    /// Panics if `index >= MAX_COLOR_ATTACHMENTS`.
    pub fn color_attachment_action(&self, index: usize) -> ColorAttachmentAction {
        self.pass_action.colors[index]
    }

    /// # Panics
    ///
    /// Panics if `index >= MAX_COLOR_ATTACHMENTS`.
    pub fn set_color_attachment_action(&mut self, index: usize, action: ColorAttachmentAction) {
        self.pass_action.colors[index] = action;
    }

    pub fn depth_attachment_action(&self) -> DepthAttachmentAction {
        self.pass_action.depth
    }

    pub fn set_depth_attachment_action(&mut self, action: DepthAttachmentAction) {
        self.pass_action.depth = action;
    }

    /// Clear depth to `value`
    pub fn set_clear_depth_action(&mut self, value: f32) {
        self.pass_action.depth = DepthAttachmentAction {
            action: Action::Clear,
            value,
        };
    }

    pub fn stencil_attachment_action(&self) -> StencilAttachmentAction {
        self.pass_action.stencil
    }

    pub fn set_stencil_attachment_action(&mut self, action: StencilAttachmentAction) {
        self.pass_action.stencil = action;
    }

    /// Clear stencil to `value`
    pub fn set_clear_stencil_action(&mut self, value: u8) {
        self.pass_action.stencil = StencilAttachmentAction {
            action: Action::Clear,
            value,
        };
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
