//! Synchronous yes/no collaborator for destructive operations

/// Asked once before the roster is cleared
///
/// Implemented for `bool` (a decision already taken by the caller) and for
/// any `FnMut() -> bool` (e.g. a prompt on a terminal).
pub trait Confirm {
    fn confirm(&mut self) -> bool;
}

impl Confirm for bool {
    fn confirm(&mut self) -> bool {
        *self
    }
}

impl<F> Confirm for F
where
    F: FnMut() -> bool,
{
    fn confirm(&mut self) -> bool {
        self()
    }
}
