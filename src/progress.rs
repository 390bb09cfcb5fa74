use std::sync::{Arc, Mutex, MutexGuard};

/// Shared progress of a job, possibly split into child jobs running on other threads.
#[derive(Clone, Debug)]
pub struct ProgressHandle {
    progress: Arc<Mutex<Progress>>,
    children: Arc<Mutex<Vec<ProgressHandle>>>,
}

impl ProgressHandle {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            progress: Arc::new(Mutex::new(Progress::new_empty())),
            children: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Registers a child job, its progress is included in [`ProgressHandle::progress`].
    pub fn split(&self) -> Self {
        let child = Self::new();
        self.lock_children().push(child.clone());
        child
    }

    pub fn lock(&self) -> MutexGuard<'_, Progress> {
        // progress is plain data, a poisoned value is still usable
        self.progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Progress of this job combined with all of its children.
    pub fn progress(&self) -> Progress {
        let own = *self.lock();
        self.lock_children()
            .iter()
            .fold(own, |prog, child| prog.combine(&child.progress()))
    }

    fn lock_children(&self) -> MutexGuard<'_, Vec<ProgressHandle>> {
        self.children
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub from: usize,
    pub is_done: bool,
}

impl Progress {
    pub fn new(done: usize, from: usize) -> Self {
        Self {
            done,
            from,
            is_done: false,
        }
    }

    pub fn new_empty() -> Self {
        Self::new(0, 0)
    }

    pub fn percent(&self) -> f32 {
        if self.from == 0 {
            return if self.is_done { 1.0 } else { 0.0 };
        }
        self.done as f32 / self.from as f32
    }

    pub fn finish(&mut self) {
        self.done = self.from;
        self.is_done = true;
    }

    pub fn combine(&self, other: &Self) -> Self {
        Self {
            done: self.done + other.done,
            from: self.from + other.from,
            is_done: self.is_done && other.is_done,
        }
    }
}
