//! Mock GPU backend for unit tests (no GPU required)
//!
//! Records every command as a string and tracks live allocations per
//! resource kind. Ids are never reused, so destroying a stale or invalid
//! handle is a no-op, as the real backends guarantee.

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;

use crate::gfx::backend::{Features, GfxBackend, GfxDesc};
use crate::gfx::desc::{
    Bindings, BufferDesc, ImageContent, ImageDesc, PassAction, PassDesc, PipelineDesc,
    ShaderDesc, ShaderStage,
};
use crate::gfx::handle::{Buffer, Image, Pass, Pipeline, Resource, ResourceKind, Shader};
use crate::test_utils::Journal;

/// Observable state shared between a [`MockBackend`] and its clones
#[derive(Debug, Default)]
pub struct MockState {
    pub commands: Vec<String>,
    pub live: FxHashMap<u32, ResourceKind>,
    /// Debug rendering of the descriptor each id was created from
    pub descs: FxHashMap<u32, String>,
    pub next_id: u32,
    pub valid: bool,
    pub features: Features,
    pub setup_desc: Option<GfxDesc>,
    pub last_pass_action: Option<PassAction>,
    pub last_uniforms: Vec<u8>,
    pub last_bindings: Option<Bindings>,
    pub updates: Vec<(u32, usize)>,
    /// Shared journal also receiving every command, prefixed with `gfx.`
    pub journal: Option<Journal>,
}

impl MockState {
    fn record(&mut self, command: impl Into<String>) {
        let command = command.into();
        if let Some(journal) = &self.journal {
            journal.lock().unwrap().push(format!("gfx.{}", command));
        }
        self.commands.push(command);
    }
}

/// Mock backend; clones share the same state
#[derive(Debug, Clone)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::with_features(Features::all())
    }

    pub fn with_features(features: Features) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                features,
                next_id: 1,
                ..Default::default()
            })),
        }
    }

    /// Mirror every command into `journal` (interleaved with other mocks)
    pub fn with_journal(journal: Journal) -> Self {
        let mock = Self::new();
        mock.state().journal = Some(journal);
        mock
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn commands(&self) -> Vec<String> {
        self.state().commands.clone()
    }

    /// Number of recorded commands equal to `name`
    pub fn count(&self, name: &str) -> usize {
        self.state().commands.iter().filter(|c| c.as_str() == name).count()
    }

    pub fn clear_commands(&self) {
        self.state().commands.clear();
    }

    pub fn live_count(&self, kind: ResourceKind) -> usize {
        self.state().live.values().filter(|k| **k == kind).count()
    }

    pub fn is_live<R: Resource>(&self, resource: R) -> bool {
        self.state().live.get(&resource.id()) == Some(&R::KIND)
    }

    pub fn desc_of<R: Resource>(&self, resource: R) -> Option<String> {
        self.state().descs.get(&resource.id()).cloned()
    }

    fn push(&self, command: &str) {
        self.state().record(command);
    }

    fn alloc(&self, kind: ResourceKind, desc: String) -> u32 {
        let mut state = self.state();
        let id = state.next_id;
        state.next_id += 1;
        state.live.insert(id, kind);
        state.descs.insert(id, desc);
        state.record(format!("make_{:?}", kind).to_lowercase());
        id
    }

    fn free(&self, kind: ResourceKind, id: u32) {
        let mut state = self.state();
        state.record(format!("destroy_{:?}", kind).to_lowercase());
        if state.live.get(&id) == Some(&kind) {
            state.live.remove(&id);
        }
    }
}

impl GfxBackend for MockBackend {
    fn setup(&mut self, desc: &GfxDesc) {
        let mut state = self.state();
        state.valid = true;
        state.setup_desc = Some(desc.clone());
        state.record("setup".to_string());
    }

    fn shutdown(&mut self) {
        let mut state = self.state();
        state.valid = false;
        state.record("shutdown".to_string());
    }

    fn is_valid(&self) -> bool {
        self.state().valid
    }

    fn query_features(&self) -> Features {
        self.state().features
    }

    fn make_buffer(&mut self, desc: &BufferDesc) -> Buffer {
        Buffer::from_id(self.alloc(ResourceKind::Buffer, format!("{:?}", desc)))
    }

    fn make_image(&mut self, desc: &ImageDesc) -> Image {
        Image::from_id(self.alloc(ResourceKind::Image, format!("{:?}", desc)))
    }

    fn make_shader(&mut self, desc: &ShaderDesc) -> Shader {
        Shader::from_id(self.alloc(ResourceKind::Shader, format!("{:?}", desc)))
    }

    fn make_pipeline(&mut self, desc: &PipelineDesc) -> Pipeline {
        Pipeline::from_id(self.alloc(ResourceKind::Pipeline, format!("{:?}", desc)))
    }

    fn make_pass(&mut self, desc: &PassDesc) -> Pass {
        Pass::from_id(self.alloc(ResourceKind::Pass, format!("{:?}", desc)))
    }

    fn destroy_buffer(&mut self, buffer: Buffer) {
        self.free(ResourceKind::Buffer, buffer.id());
    }

    fn destroy_image(&mut self, image: Image) {
        self.free(ResourceKind::Image, image.id());
    }

    fn destroy_shader(&mut self, shader: Shader) {
        self.free(ResourceKind::Shader, shader.id());
    }

    fn destroy_pipeline(&mut self, pipeline: Pipeline) {
        self.free(ResourceKind::Pipeline, pipeline.id());
    }

    fn destroy_pass(&mut self, pass: Pass) {
        self.free(ResourceKind::Pass, pass.id());
    }

    fn update_buffer(&mut self, buffer: Buffer, data: &[u8]) {
        let mut state = self.state();
        state.updates.push((buffer.id(), data.len()));
        state.record("update_buffer".to_string());
    }

    fn update_image(&mut self, image: Image, content: &ImageContent) {
        let mut state = self.state();
        state.updates.push((image.id(), content.subimage[0][0].len()));
        state.record("update_image".to_string());
    }

    fn begin_default_pass(&mut self, action: &PassAction, _width: i32, _height: i32) {
        let mut state = self.state();
        state.last_pass_action = Some(*action);
        state.record("begin_default_pass".to_string());
    }

    fn begin_pass(&mut self, _pass: Pass, action: &PassAction) {
        let mut state = self.state();
        state.last_pass_action = Some(*action);
        state.record("begin_pass".to_string());
    }

    fn apply_viewport(&mut self, _x: i32, _y: i32, _width: i32, _height: i32, _origin_top_left: bool) {
        self.push("apply_viewport");
    }

    fn apply_scissor_rect(&mut self, _x: i32, _y: i32, _width: i32, _height: i32, _origin_top_left: bool) {
        self.push("apply_scissor_rect");
    }

    fn apply_pipeline(&mut self, _pipeline: Pipeline) {
        self.push("apply_pipeline");
    }

    fn apply_bindings(&mut self, bindings: &Bindings) {
        let mut state = self.state();
        state.last_bindings = Some(*bindings);
        state.record("apply_bindings".to_string());
    }

    fn apply_uniforms(&mut self, _stage: ShaderStage, _slot: usize, data: &[u8]) {
        let mut state = self.state();
        state.last_uniforms = data.to_vec();
        state.record("apply_uniforms".to_string());
    }

    fn draw(&mut self, _base_element: i32, _num_elements: i32, _num_instances: i32) {
        self.push("draw");
    }

    fn end_pass(&mut self) {
        self.push("end_pass");
    }

    fn commit(&mut self) {
        self.push("commit");
    }
}
