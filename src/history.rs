use std::collections::VecDeque;

use crate::state::PastDraw;

/// Bounded in-memory record of settled rounds, newest first.
#[derive(Debug, Clone)]
pub struct DrawHistory {
    cap: usize,
    draws: VecDeque<PastDraw>,
}

impl DrawHistory {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            draws: VecDeque::with_capacity(cap),
        }
    }

    pub fn record(&mut self, draw: PastDraw) {
        self.draws.push_front(draw);
        while self.draws.len() > self.cap {
            self.draws.pop_back();
        }
    }

    pub fn recent(&self) -> impl Iterator<Item = &PastDraw> {
        self.draws.iter()
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}
