//! Scoped command builder
//!
//! [`Gfx::begin`] opens a pass and returns a [`PassBuilder`]. Dropping the
//! builder is the only way the pass gets closed, so it is closed exactly once
//! on every exit path. [`PassBuilder::pipeline`] binds a pipeline and returns a
//! [`PipelineBuilder`] borrowing the pass, so draws can only be issued while
//! the pass is open.
//!
//! # Example
//!
//! ```ignore
//! gfx.begin(&pass_action, width, height)
//!     .pipeline(pipeline)
//!     .bindings(&bindings)
//!     .uniforms_of(ShaderStage::Vs, 0, &vs_params)
//!     .draw(0, 36, 1);
//! ```

use bytemuck::Pod;

use crate::gfx::backend::GfxBackend;
use crate::gfx::desc::{Bindings, PassAction, ShaderStage};
use crate::gfx::factory::Gfx;
use crate::gfx::handle::{Pass, Pipeline};

impl Gfx {
    /// Open a pass against the default render target
    ///
    /// The pass closes when the returned builder is dropped.
    pub fn begin(&mut self, action: &PassAction, width: i32, height: i32) -> PassBuilder<'_> {
        let backend = self.backend_mut();
        backend.begin_default_pass(action, width, height);
        PassBuilder { backend }
    }

    /// Open a pass against an offscreen render target created with `make_pass`
    pub fn begin_pass(&mut self, pass: Pass, action: &PassAction) -> PassBuilder<'_> {
        let backend = self.backend_mut();
        backend.begin_pass(pass, action);
        PassBuilder { backend }
    }

    /// Run `f` inside a default pass, closing the pass when `f` returns
    pub fn with_pass<R>(
        &mut self,
        action: &PassAction,
        width: i32,
        height: i32,
        f: impl FnOnce(&mut PassBuilder<'_>) -> R,
    ) -> R {
        let mut pass = self.begin(action, width, height);
        f(&mut pass)
    }
}

// ===== PASS BUILDER =====

/// An open pass
///
/// Not `Clone`; at most one exists at a time because it holds the backend
/// borrowed mutably. Must not outlive the frame it was opened in.
pub struct PassBuilder<'g> {
    backend: &'g mut dyn GfxBackend,
}

impl<'g> PassBuilder<'g> {
    /// Always `true` while the builder exists
    ///
    /// Lets call sites write "if a pass was obtained, record into it" without
    /// this being a failure channel.
    pub fn is_open(&self) -> bool {
        true
    }

    pub fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32, origin_top_left: bool) -> &mut Self {
        self.backend.apply_viewport(x, y, width, height, origin_top_left);
        self
    }

    pub fn scissor_rect(&mut self, x: i32, y: i32, width: i32, height: i32, origin_top_left: bool) -> &mut Self {
        self.backend.apply_scissor_rect(x, y, width, height, origin_top_left);
        self
    }

    /// Upload raw uniform bytes into `slot` of `stage`
    pub fn uniforms(&mut self, stage: ShaderStage, slot: usize, data: &[u8]) -> &mut Self {
        self.backend.apply_uniforms(stage, slot, data);
        self
    }

    /// Upload a uniform block value into `slot` of `stage`
    pub fn uniforms_of<T: Pod>(&mut self, stage: ShaderStage, slot: usize, value: &T) -> &mut Self {
        self.uniforms(stage, slot, bytemuck::bytes_of(value))
    }

    /// Bind `pipeline` for the rest of this pass
    pub fn pipeline(&mut self, pipeline: Pipeline) -> PipelineBuilder<'_, 'g> {
        self.backend.apply_pipeline(pipeline);
        PipelineBuilder { pass: self }
    }

    /// Call `f` once with this builder, keeping the chain intact
    pub fn apply(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        f(self);
        self
    }
}

impl Drop for PassBuilder<'_> {
    fn drop(&mut self) {
        self.backend.end_pass();
    }
}

// ===== PIPELINE BUILDER =====

/// A pipeline bound inside an open pass
///
/// Switching pipelines with [`PipelineBuilder::pipeline`] yields a new
/// builder; the pass stays open. Dropping a pipeline builder has no effect.
pub struct PipelineBuilder<'p, 'g> {
    pass: &'p mut PassBuilder<'g>,
}

impl<'p, 'g> PipelineBuilder<'p, 'g> {
    /// Always `true` while the builder exists
    pub fn is_bound(&self) -> bool {
        true
    }

    pub fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32, origin_top_left: bool) -> &mut Self {
        self.pass.viewport(x, y, width, height, origin_top_left);
        self
    }

    pub fn scissor_rect(&mut self, x: i32, y: i32, width: i32, height: i32, origin_top_left: bool) -> &mut Self {
        self.pass.scissor_rect(x, y, width, height, origin_top_left);
        self
    }

    pub fn uniforms(&mut self, stage: ShaderStage, slot: usize, data: &[u8]) -> &mut Self {
        self.pass.uniforms(stage, slot, data);
        self
    }

    pub fn uniforms_of<T: Pod>(&mut self, stage: ShaderStage, slot: usize, value: &T) -> &mut Self {
        self.pass.uniforms_of(stage, slot, value);
        self
    }

    pub fn bindings(&mut self, bindings: &Bindings) -> &mut Self {
        self.pass.backend.apply_bindings(bindings);
        self
    }

    /// Draw `count` elements starting at `first`, `instance_count` times
    pub fn draw(&mut self, first: i32, count: i32, instance_count: i32) -> &mut Self {
        self.pass.backend.draw(first, count, instance_count);
        self
    }

    /// Bind another pipeline within the same pass
    pub fn pipeline(&mut self, pipeline: Pipeline) -> PipelineBuilder<'_, 'g> {
        self.pass.pipeline(pipeline)
    }

    pub fn apply(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        f(self);
        self
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
