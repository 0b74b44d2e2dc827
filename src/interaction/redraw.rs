/// Collapses any number of redraw requests into at most one per frame
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    pending: bool,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns true once per batch of requests
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
