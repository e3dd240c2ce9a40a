//! Cursor movement shared by selectable lists.

/// One cursor movement requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    PageUp(usize),
    PageDown(usize),
    Home,
    End,
}

/// A list with a cursor and an optionally tracked entity.
///
/// Every motion drops the tracked entity so the next resolve step goes by
/// position. Motions only shift the raw cursor; bounds are enforced later by
/// the list's own resolve step, which knows the current length.
pub trait Navigable {
    fn cursor(&self) -> usize;
    fn cursor_mut(&mut self) -> &mut usize;
    fn forget_tracked(&mut self);

    fn apply_motion(&mut self, motion: Motion) {
        let at = self.cursor();
        *self.cursor_mut() = match motion {
            Motion::Up => at.saturating_sub(1),
            Motion::Down => at.saturating_add(1),
            Motion::PageUp(n) => at.saturating_sub(n),
            Motion::PageDown(n) => at.saturating_add(n),
            Motion::Home => 0,
            Motion::End => usize::MAX,
        };
        self.forget_tracked();
    }
}
