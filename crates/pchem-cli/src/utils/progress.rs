use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use pchem::engine::progress::{Progress, ProgressCallback, ProgressReporter};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const SPINNER_TICK_MS: u64 = 80;

/// What the bar is currently showing.
///
/// A workflow phase usually runs several counted tasks in a row (one Monte Carlo
/// estimate per proposal and sample count, one sweep per potential), and the
/// `Progress::Message` sent just before each task names it.
struct BarState {
    bar: ProgressBar,
    phase: &'static str,
    label: String,
    tasks_done: usize,
    started: Instant,
}

impl BarState {
    fn show_spinner(&self) {
        self.bar.set_style(CliProgressHandler::spinner_style());
        self.bar
            .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        self.bar.set_message(self.label.clone());
    }

    fn apply(&mut self, event: Progress) {
        match event {
            Progress::PhaseStart { name } => {
                self.phase = name;
                self.label.clear();
                self.tasks_done = 0;
                self.started = Instant::now();
                self.bar.reset();
                self.bar.set_length(0);
                self.bar.set_prefix(name);
                self.show_spinner();
            }
            Progress::Message(text) => {
                self.label = text;
                self.bar.set_message(self.label.clone());
            }
            Progress::TaskStart { total_steps } => {
                self.bar.disable_steady_tick();
                self.bar.reset();
                self.bar.set_length(total_steps);
                self.bar.set_style(CliProgressHandler::bar_style());
                self.bar.set_message(self.label.clone());
            }
            Progress::TaskIncrement => self.bar.inc(1),
            Progress::TaskFinish => {
                self.tasks_done += 1;
                if !self.label.is_empty() {
                    debug!(phase = self.phase, task = %self.label, "Task finished.");
                }
                // Back to the spinner until the next task of this phase starts.
                self.show_spinner();
            }
            Progress::PhaseFinish => {
                self.bar.disable_steady_tick();
                self.bar.set_style(CliProgressHandler::spinner_style());
                self.bar.finish_with_message(self.summary());
            }
        }
    }

    fn summary(&self) -> String {
        let elapsed = self.started.elapsed().as_secs_f64();
        match self.tasks_done {
            0 => format!("✓ done in {elapsed:.1}s"),
            1 => format!("✓ 1 task in {elapsed:.1}s"),
            n => format!("✓ {n} tasks in {elapsed:.1}s"),
        }
    }
}

#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
            .with_style(Self::spinner_style());
        bar.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(BarState {
                bar,
                phase: "",
                label: String::new(),
                tasks_done: 0,
                started: Instant::now(),
            })),
        }
    }

    /// A reporter that drives this handler, or a silent one when `quiet` is set.
    pub fn reporter(&self, quiet: bool) -> ProgressReporter<'static> {
        if quiet {
            ProgressReporter::new()
        } else {
            ProgressReporter::with_callback(self.get_callback())
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();
        Box::new(move |event: Progress| match state.lock() {
            Ok(mut state) => state.apply(event),
            Err(_) => warn!("Progress state mutex was poisoned; dropping {event:?}."),
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "  {prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {msg} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
        })
        .progress_chars("=>-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
