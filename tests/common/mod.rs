#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use texture_upload_bench::application::{Rasterizer, StatusSink};
use texture_upload_bench::domain::benchmark::{ShaderVariant, StatusReport};
use texture_upload_bench::domain::errors::{AppError, RenderingResult};
use texture_upload_bench::domain::texture::{TextureBackend, TransferKind};
use texture_upload_bench::domain::timing::TimerQueryBackend;

/// Ordered record of every backend call, shared by all mocks of a test.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Default)]
pub struct QueryState {
    pub next_id: u32,
    pub resolved_ns: BTreeMap<u32, f64>,
    pub disjoint: bool,
    pub ended: Vec<u32>,
    pub deleted: BTreeSet<u32>,
}

impl QueryState {
    /// Makes every query ended so far report `ns`.
    pub fn resolve_ended(&mut self, ns: f64) {
        for id in self.ended.clone() {
            self.resolved_ns.entry(id).or_insert(ns);
        }
    }
}

#[derive(Clone)]
pub struct MockQueries {
    pub state: Rc<RefCell<QueryState>>,
    pub journal: Journal,
}

impl MockQueries {
    pub fn new(journal: &Journal) -> Self {
        Self { state: Rc::new(RefCell::new(QueryState::default())), journal: journal.clone() }
    }
}

impl TimerQueryBackend for MockQueries {
    type Query = u32;

    fn create_query(&mut self) -> RenderingResult<u32> {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        Ok(state.next_id)
    }

    fn delete_query(&mut self, query: u32) {
        self.state.borrow_mut().deleted.insert(query);
    }

    fn begin_query(&mut self, query: &u32) {
        self.journal.borrow_mut().push(format!("begin_query {}", query));
    }

    fn end_query(&mut self, query: &u32) {
        self.state.borrow_mut().ended.push(*query);
        self.journal.borrow_mut().push(format!("end_query {}", query));
    }

    fn flush(&mut self) {}

    fn result_available(&self, query: &u32) -> bool {
        self.state.borrow().resolved_ns.contains_key(query)
    }

    fn result_ns(&self, query: &u32) -> f64 {
        self.state.borrow().resolved_ns.get(query).copied().unwrap_or(0.0)
    }

    fn take_disjoint(&mut self) -> bool {
        std::mem::take(&mut self.state.borrow_mut().disjoint)
    }
}

#[derive(Default)]
pub struct TextureState {
    pub next_id: u32,
    pub live: BTreeSet<u32>,
    pub deleted: Vec<u32>,
    pub transfers: Vec<(u32, u32, TransferKind)>,
    pub mipmap_generations: usize,
    pub fail_transfers: bool,
}

#[derive(Clone)]
pub struct MockTextures {
    pub state: Rc<RefCell<TextureState>>,
    pub journal: Journal,
}

impl MockTextures {
    pub fn new(journal: &Journal) -> Self {
        Self { state: Rc::new(RefCell::new(TextureState::default())), journal: journal.clone() }
    }
}

impl TextureBackend for MockTextures {
    type Texture = u32;

    fn create_texture(&mut self, size: u32, levels: u32) -> RenderingResult<u32> {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.live.insert(id);
        self.journal.borrow_mut().push(format!("create_texture {} {}x{} levels={}", id, size, size, levels));
        Ok(id)
    }

    fn delete_texture(&mut self, texture: u32) {
        let mut state = self.state.borrow_mut();
        state.live.remove(&texture);
        state.deleted.push(texture);
    }

    fn bind_texture(&mut self, _texture: &u32) {}

    fn transfer(
        &mut self,
        texture: &u32,
        size: u32,
        data: &[u8],
        kind: TransferKind,
    ) -> RenderingResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_transfers {
            return Err(AppError::Transfer("device lost".to_string()));
        }
        assert_eq!(data.len(), (size * size * 4) as usize);
        state.transfers.push((*texture, size, kind));
        self.journal.borrow_mut().push(format!("transfer {} {:?}", texture, kind));
        Ok(())
    }

    fn generate_mipmaps(&mut self, _texture: &u32) {
        self.state.borrow_mut().mipmap_generations += 1;
    }
}

pub struct MockRasterizer {
    pub draws: Vec<(ShaderVariant, u32)>,
    pub journal: Journal,
}

impl MockRasterizer {
    pub fn new(journal: &Journal) -> Self {
        Self { draws: Vec::new(), journal: journal.clone() }
    }
}

impl Rasterizer for MockRasterizer {
    type Texture = u32;

    fn draw(&mut self, shader: ShaderVariant, texture: &u32) -> RenderingResult<()> {
        self.draws.push((shader, *texture));
        self.journal.borrow_mut().push(format!("draw {} {}", shader, texture));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingStatus {
    pub reports: Vec<StatusReport>,
    pub errors: Vec<AppError>,
}

impl StatusSink for RecordingStatus {
    fn show(&mut self, report: &StatusReport) {
        self.reports.push(report.clone());
    }

    fn show_error(&mut self, error: &AppError) {
        self.errors.push(error.clone());
    }
}
