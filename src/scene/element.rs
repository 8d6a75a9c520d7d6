use crate::catalog::{ResolvedPart, Shape, Transform};
use crate::model::{Appearance, ConstructionState, Finish, Floor, StateKind, TaskId};
use glam::Mat4;

/// Index of an element in its [`SceneContext`](super::SceneContext).
pub type ElementId = usize;

/// One instantiated catalog part.
///
/// Construction state, visibility and appearance are written by the
/// simulation; picking only swaps the appearance for a short highlight.
#[derive(Debug, Clone)]
pub struct GeometryElement {
    pub id: ElementId,
    pub task_id: TaskId,
    pub shape: Shape,
    pub transform: Transform,
    pub floor: Floor,
    pub finish: Finish,
    state: ConstructionState,
    visible: bool,
    appearance: Appearance,
    /// (state, visibility) seen by the previous tick.
    last_tick: Option<(StateKind, bool)>,
    /// Bumped whenever the simulation assigns an appearance.
    version: u64,
    world: Mat4,
    inverse: Mat4,
}

impl GeometryElement {
    pub(crate) fn from_part(id: ElementId, part: ResolvedPart) -> Self {
        let world = part.transform.matrix();
        Self {
            id,
            task_id: part.task_id,
            shape: part.shape,
            transform: part.transform,
            floor: part.floor,
            finish: part.finish,
            state: ConstructionState::Ghost,
            visible: true,
            appearance: Appearance::Ghost,
            last_tick: None,
            version: 0,
            world,
            inverse: world.inverse(),
        }
    }

    #[must_use]
    pub fn state(&self) -> ConstructionState {
        self.state
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world
    }

    #[must_use]
    pub fn inverse_world_matrix(&self) -> &Mat4 {
        &self.inverse
    }

    /// Appearance the simulation would assign for the live state.
    #[must_use]
    pub fn simulated_appearance(&self) -> Appearance {
        Appearance::for_state(self.state, self.finish)
    }

    /// Records the tick's outcome for this element.
    ///
    /// State is always stored. Appearance is only assigned while visible, and
    /// is skipped when neither state kind nor visibility moved since the last
    /// tick, except for active parts whose opacity tracks progress.
    pub(crate) fn apply_tick(&mut self, state: ConstructionState, visible: bool) {
        let kind = state.kind();
        let unchanged = self.last_tick == Some((kind, visible));

        self.state = state;
        self.visible = visible;
        self.last_tick = Some((kind, visible));

        if !visible || (unchanged && kind != StateKind::Active) {
            return;
        }

        self.appearance = self.simulated_appearance();
        self.version += 1;
    }

    pub(crate) fn set_highlight(&mut self) {
        self.appearance = Appearance::Highlight;
    }

    pub(crate) fn restore_appearance(&mut self) {
        self.appearance = self.simulated_appearance();
    }
}
