use super::ElementId;
use crate::model::TaskId;
use std::collections::{BTreeMap, HashMap};

/// Elements belonging to one task, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBucket {
    pub task_id: TaskId,
    pub elements: Vec<ElementId>,
}

/// Task id → elements index. Tasks iterate in the order their first part
/// was declared, so tick output is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    buckets: Vec<TaskBucket>,
    index: HashMap<TaskId, usize>,
}

impl Registry {
    pub(crate) fn insert(&mut self, task_id: &TaskId, element: ElementId) {
        if let Some(&slot) = self.index.get(task_id) {
            self.buckets[slot].elements.push(element);
            return;
        }
        self.index.insert(task_id.clone(), self.buckets.len());
        self.buckets.push(TaskBucket {
            task_id: task_id.clone(),
            elements: vec![element],
        });
    }

    pub(crate) fn clear(&mut self) {
        self.buckets.clear();
        self.index.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskBucket> {
        self.buckets.iter()
    }

    #[must_use]
    pub fn elements_for(&self, task_id: &TaskId) -> &[ElementId] {
        self.index
            .get(task_id)
            .map_or(&[], |&slot| self.buckets[slot].elements.as_slice())
    }

    #[must_use]
    pub fn task_count(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.buckets.iter().map(|b| b.elements.len()).sum()
    }

    /// Elements per task, keyed for comparison.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<TaskId, usize> {
        self.buckets
            .iter()
            .map(|b| (b.task_id.clone(), b.elements.len()))
            .collect()
    }
}
