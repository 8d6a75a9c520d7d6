//! The live scene: instantiated catalog parts plus the task index over them.

pub mod element;
pub mod registry;

pub use element::{ElementId, GeometryElement};
pub use registry::{Registry, TaskBucket};

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::TaskId;
use crate::picking::Highlight;
use std::time::Instant;

/// Non-pickable scene furniture drawn behind the building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HelperNode {
    /// Square ground grid on the Y = 0 plane.
    Grid { size: f32, divisions: u32 },
}

/// Everything the simulation and picking operate on. Owned by the caller.
#[derive(Debug, Default)]
pub struct SceneContext {
    elements: Vec<GeometryElement>,
    registry: Registry,
    helpers: Vec<HelperNode>,
    highlights: Vec<Highlight>,
}

impl SceneContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context from a catalog in one step.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, CatalogError> {
        let mut scene = Self::new();
        scene.instantiate(catalog)?;
        Ok(scene)
    }

    /// Replaces the scene with one ghost element per catalog part.
    ///
    /// The catalog is validated before anything is touched: on error the
    /// previous scene is left as it was. Re-running drops every previous
    /// element, helper and pending highlight first.
    pub fn instantiate(&mut self, catalog: &Catalog) -> Result<&Registry, CatalogError> {
        let parts = catalog.resolve()?;

        self.elements.clear();
        self.registry.clear();
        self.helpers.clear();
        self.highlights.clear();

        self.helpers.push(HelperNode::Grid {
            size: 60.0,
            divisions: 60,
        });

        for part in parts {
            let id = self.elements.len();
            self.registry.insert(&part.task_id, id);
            self.elements.push(GeometryElement::from_part(id, part));
        }

        tracing::info!(
            elements = self.elements.len(),
            tasks = self.registry.task_count(),
            "scene instantiated"
        );
        Ok(&self.registry)
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn elements(&self) -> &[GeometryElement] {
        &self.elements
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&GeometryElement> {
        self.elements.get(id)
    }

    #[must_use]
    pub fn helpers(&self) -> &[HelperNode] {
        &self.helpers
    }

    /// Elements belonging to a task, in catalog order.
    pub fn task_elements<'a>(
        &'a self,
        task_id: &TaskId,
    ) -> impl Iterator<Item = &'a GeometryElement> + 'a {
        self.registry
            .elements_for(task_id)
            .iter()
            .filter_map(|&id| self.elements.get(id))
    }

    pub(crate) fn parts_mut(&mut self) -> (&Registry, &mut [GeometryElement]) {
        (&self.registry, &mut self.elements)
    }

    /// Swaps an element to the highlight appearance until `deadline`.
    ///
    /// A second pick of the same element replaces its pending deadline.
    pub(crate) fn highlight(&mut self, id: ElementId, deadline: Instant) {
        let Some(element) = self.elements.get_mut(id) else {
            return;
        };
        element.set_highlight();
        let version = element.version();
        self.highlights.retain(|h| h.element != id);
        self.highlights.push(Highlight {
            element: id,
            deadline,
            version,
        });
    }

    /// Fires every highlight whose deadline has passed.
    ///
    /// An element whose version moved since it was highlighted was already
    /// repainted by a tick and is left alone; otherwise its appearance is
    /// recomputed from its live state. Returns how many deadlines fired.
    pub fn expire_highlights(&mut self, now: Instant) -> usize {
        let (due, pending): (Vec<_>, Vec<_>) =
            self.highlights.drain(..).partition(|h| h.deadline <= now);
        self.highlights = pending;

        for highlight in &due {
            if let Some(element) = self.elements.get_mut(highlight.element) {
                if element.version() == highlight.version {
                    element.restore_appearance();
                }
            }
        }
        due.len()
    }

    #[must_use]
    pub fn pending_highlights(&self) -> &[Highlight] {
        &self.highlights
    }
}
