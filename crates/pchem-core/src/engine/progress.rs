#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    pub fn message(&self, text: impl Into<String>) {
        if self.callback.is_some() {
            self.report(Progress::Message(text.into()));
        }
    }

    /// Runs `work` bracketed by `PhaseStart`/`PhaseFinish`.
    pub fn phase<T>(&self, name: &'static str, work: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let out = work();
        self.report(Progress::PhaseFinish);
        out
    }

    /// Wraps `total_steps` increments of a counted task.
    pub fn task(&self, total_steps: u64) -> TaskGuard<'_, 'a> {
        self.report(Progress::TaskStart { total_steps });
        TaskGuard { reporter: self }
    }
}

/// Emits `TaskFinish` when dropped, so early returns still close the task.
pub struct TaskGuard<'r, 'a> {
    reporter: &'r ProgressReporter<'a>,
}

impl TaskGuard<'_, '_> {
    #[inline]
    pub fn tick(&self) {
        self.reporter.report(Progress::TaskIncrement);
    }
}

impl Drop for TaskGuard<'_, '_> {
    fn drop(&mut self) {
        self.reporter.report(Progress::TaskFinish);
    }
}
