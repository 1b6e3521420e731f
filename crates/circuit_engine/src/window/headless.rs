//! Scripted window backend for tests and headless runs
//!
//! Queued event batches are returned one batch per poll, and idle state is
//! set directly, so frame-loop behavior (edge resets, idle throttling,
//! resize handling) can be exercised without a real window.

use std::collections::VecDeque;

use super::{VsyncMode, WindowBackend, WindowEvent};

/// In-memory window backend with scripted events
pub struct HeadlessWindow {
    size: (u32, u32),
    title: String,
    idle: bool,
    should_close: bool,
    vsync: VsyncMode,
    queued: VecDeque<Vec<WindowEvent>>,
    close_after_polls: Option<u32>,
    polls: u32,
    swaps: u32,
}

impl HeadlessWindow {
    /// Create a headless window of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            title: String::new(),
            idle: false,
            should_close: false,
            vsync: VsyncMode::On,
            queued: VecDeque::new(),
            close_after_polls: None,
            polls: 0,
            swaps: 0,
        }
    }

    /// Queue a batch of events for the next poll
    pub fn queue_events(&mut self, events: Vec<WindowEvent>) {
        self.queued.push_back(events);
    }

    /// Force the idle state reported to the frame loop
    pub fn set_idle(&mut self, idle: bool) {
        self.idle = idle;
    }

    /// Request closure automatically after `polls` poll calls
    pub fn close_after_polls(&mut self, polls: u32) {
        self.close_after_polls = Some(polls);
    }

    /// How many times buffers were swapped
    pub fn swap_count(&self) -> u32 {
        self.swaps
    }

    /// The vsync mode last requested
    pub fn vsync_mode(&self) -> VsyncMode {
        self.vsync
    }
}

impl WindowBackend for HeadlessWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.polls += 1;
        if let Some(limit) = self.close_after_polls {
            if self.polls >= limit {
                self.should_close = true;
            }
        }
        self.queued.pop_front().unwrap_or_default()
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size_limits(&mut self, _min: (u32, u32), _max: (u32, u32)) {}

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn maximize(&mut self) {}

    fn is_idle(&self) -> bool {
        self.idle
    }

    fn set_vsync(&mut self, mode: VsyncMode) {
        self.vsync = mode;
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }
}
