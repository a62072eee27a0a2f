/// How a page should be drawn
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PageMode {
    Full,
    /// A lightweight stand-in showing only the period's label
    Placeholder,
}

/// Decides which pages of a range get a full rendering.
///
/// Pages within `budget` pages of the current one are drawn in full.  Once a
/// page has been drawn in full it stays that way, so moving away and back
/// never flickers through a placeholder.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PagedView {
    budget: usize,
    rendered: Vec<bool>,
}

impl PagedView {
    pub fn new(len: usize, budget: usize) -> PagedView {
        PagedView {
            budget,
            rendered: vec![false; len],
        }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn mode(&mut self, index: usize, current: usize) -> PageMode {
        if self.has_rendered(index) {
            PageMode::Full
        } else if index.abs_diff(current) <= self.budget {
            self.mark_rendered(index);
            PageMode::Full
        } else {
            PageMode::Placeholder
        }
    }

    pub fn mark_rendered(&mut self, index: usize) {
        if let Some(r) = self.rendered.get_mut(index) {
            *r = true;
        }
    }

    pub fn has_rendered(&self, index: usize) -> bool {
        self.rendered.get(index).copied().unwrap_or(false)
    }
}
