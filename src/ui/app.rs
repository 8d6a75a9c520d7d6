use crate::catalog::ProjectType;
use crate::info::{self, PickInfo};
use crate::model::{BoqTable, FloorFilter};
use crate::picking::{PickResult, Viewport};
use crate::viewer::BimViewer;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

/// Redraw cadence; also the input poll timeout.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
/// One simulated day per step while playing.
const PLAYBACK_STEP: Duration = Duration::from_millis(100);
/// Terminal cells are about twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 2.0;

const ORBIT_STEP: f32 = 0.12;
const ZOOM_STEP: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Levels,
    Scene,
}

pub struct App {
    pub viewer: BimViewer,
    pub costs: BoqTable,
    pub focus_panel: FocusPanel,
    pub picked: Option<PickResult>,
    pub playing: bool,
    pub scene_area: Rect,
    last_step: Instant,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(viewer: BimViewer, costs: BoqTable) -> Self {
        Self {
            viewer,
            costs,
            focus_panel: FocusPanel::Levels,
            picked: None,
            playing: false,
            scene_area: Rect::default(),
            last_step: Instant::now(),
            should_quit: false,
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            let now = Instant::now();
            self.viewer.poll(now);
            self.step_playback(now);

            let size = terminal.size()?;
            self.sync_scene_area(super::dashboard::scene_area(Rect::new(
                0,
                0,
                size.width,
                size.height,
            )));

            terminal.draw(|frame| super::dashboard::draw_dashboard(frame, &self))?;

            if event::poll(FRAME_INTERVAL)? {
                self.handle_event(&event::read()?, Instant::now());
            }
        }
        Ok(())
    }

    /// Keeps the viewer's render surface equal to the scene panel's interior.
    pub fn sync_scene_area(&mut self, area: Rect) {
        if area == self.scene_area {
            return;
        }
        self.scene_area = area;
        self.viewer.resize(Viewport::new(
            f32::from(area.x),
            f32::from(area.y) * CELL_ASPECT,
            f32::from(area.width),
            f32::from(area.height) * CELL_ASPECT,
        ));
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.toggle_focus(),
            KeyCode::Up | KeyCode::Char('k') => self.navigate_up(),
            KeyCode::Down | KeyCode::Char('j') => self.navigate_down(),
            KeyCode::Left => self.step_days(-1),
            KeyCode::Right => self.step_days(1),
            KeyCode::PageUp => self.step_days(-7),
            KeyCode::PageDown => self.step_days(7),
            KeyCode::Home => self.jump_to_start(),
            KeyCode::End => self.jump_to_end(),
            KeyCode::Char(' ') => self.toggle_playback(),
            KeyCode::Char('a') => self.viewer.camera_mut().orbit(-ORBIT_STEP, 0.0),
            KeyCode::Char('d') => self.viewer.camera_mut().orbit(ORBIT_STEP, 0.0),
            KeyCode::Char('w') => self.viewer.camera_mut().orbit(0.0, ORBIT_STEP),
            KeyCode::Char('s') => self.viewer.camera_mut().orbit(0.0, -ORBIT_STEP),
            KeyCode::Char('+' | '=') => self.viewer.camera_mut().zoom(ZOOM_STEP),
            KeyCode::Char('-') => self.viewer.camera_mut().zoom(1.0 / ZOOM_STEP),
            KeyCode::Char('r') => self.rebuild_scene(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Clicks on the surrounding panels are not picks.
                if !self.scene_area.contains(Position::new(mouse.column, mouse.row)) {
                    return;
                }
                self.focus_panel = FocusPanel::Scene;
                let x = f32::from(mouse.column) + 0.5;
                let y = (f32::from(mouse.row) + 0.5) * CELL_ASPECT;
                self.picked = self.viewer.handle_pointer(x, y, now);
            }
            MouseEventKind::ScrollUp => self.viewer.camera_mut().zoom(ZOOM_STEP),
            MouseEventKind::ScrollDown => self.viewer.camera_mut().zoom(1.0 / ZOOM_STEP),
            _ => {}
        }
    }

    fn toggle_focus(&mut self) {
        self.focus_panel = match self.focus_panel {
            FocusPanel::Levels => FocusPanel::Scene,
            FocusPanel::Scene => FocusPanel::Levels,
        };
    }

    /// Levels: previous floor. Scene: tilt the camera up.
    fn navigate_up(&mut self) {
        match self.focus_panel {
            FocusPanel::Levels => self.previous_level(),
            FocusPanel::Scene => self.viewer.camera_mut().orbit(0.0, ORBIT_STEP),
        }
    }

    fn navigate_down(&mut self) {
        match self.focus_panel {
            FocusPanel::Levels => self.next_level(),
            FocusPanel::Scene => self.viewer.camera_mut().orbit(0.0, -ORBIT_STEP),
        }
    }

    fn previous_level(&mut self) {
        let index = self.viewer.filter().index();
        if index > 0 {
            self.viewer.set_filter(FloorFilter::from_index(index - 1));
        }
    }

    fn next_level(&mut self) {
        let index = self.viewer.filter().index();
        if index < crate::model::Floor::ALL.len() {
            self.viewer.set_filter(FloorFilter::from_index(index + 1));
        }
    }

    fn step_days(&mut self, days: i64) {
        self.viewer.advance(chrono::Duration::days(days));
    }

    fn jump_to_start(&mut self) {
        if let Some((start, _)) = self.viewer.schedule().and_then(|s| s.span()) {
            self.viewer.update_simulation(start);
        }
    }

    fn jump_to_end(&mut self) {
        if let Some((_, end)) = self.viewer.schedule().and_then(|s| s.span()) {
            self.viewer.update_simulation(end);
        }
    }

    fn toggle_playback(&mut self) {
        self.playing = !self.playing;
        if self.playing && self.at_span_end() {
            self.jump_to_start();
        }
        self.last_step = Instant::now();
    }

    fn step_playback(&mut self, now: Instant) {
        if !self.playing || now.duration_since(self.last_step) < PLAYBACK_STEP {
            return;
        }
        self.last_step = now;
        self.step_days(1);
        if self.at_span_end() {
            self.playing = false;
        }
    }

    fn at_span_end(&self) -> bool {
        match (
            self.viewer.current_date(),
            self.viewer.schedule().and_then(|s| s.span()),
        ) {
            (Some(current), Some((_, end))) => current >= end,
            _ => false,
        }
    }

    fn rebuild_scene(&mut self) {
        let project_type: ProjectType = self.viewer.project_type();
        if let Err(err) = self.viewer.reinit(project_type) {
            tracing::error!(%err, "scene rebuild failed");
        }
        self.picked = None;
    }

    /// Info panel content for the current pick at the simulated date.
    #[must_use]
    pub fn picked_info(&self) -> Option<PickInfo> {
        let pick = self.picked.as_ref()?;
        let as_of = self.viewer.current_date()?;
        Some(info::resolve(pick, self.viewer.schedule(), &self.costs, as_of))
    }

    /// Position of the simulated date within the schedule span, `0..=1`.
    #[must_use]
    pub fn timeline_ratio(&self) -> f64 {
        match (
            self.viewer.current_date(),
            self.viewer.schedule().and_then(|s| s.span()),
        ) {
            (Some(current), Some((start, end))) if end > start => {
                let total = (end - start).num_seconds() as f64;
                ((current - start).num_seconds() as f64 / total).clamp(0.0, 1.0)
            }
            (Some(_), Some(_)) => 1.0,
            _ => 0.0,
        }
    }
}
