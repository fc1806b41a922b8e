use crate::{TaskId, UploadTask};

/// Upload tasks in submission order, at most one record per id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskRegistry {
    tasks: Vec<UploadTask>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `task` unless its id is already present. Returns whether it was added.
    pub fn insert(&mut self, task: UploadTask) -> bool {
        if self.contains(task.id()) {
            return false;
        }
        self.tasks.push(task);
        true
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.tasks.iter().any(|task| task.id() == id)
    }

    pub fn get(&self, id: &TaskId) -> Option<&UploadTask> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn get_mut(&mut self, id: &TaskId) -> Option<&mut UploadTask> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    pub fn remove(&mut self, id: &TaskId) -> Option<UploadTask> {
        let index = self.tasks.iter().position(|task| task.id() == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadTask> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
