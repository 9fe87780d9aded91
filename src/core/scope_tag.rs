//! Scoped thread-local tag for annotating log records
//!
//! A `ScopedTag` saves the calling thread's current tag, installs a new one,
//! and restores the saved value when the guard goes out of scope. Formatters
//! see the tag through the record it was captured into.

use std::cell::RefCell;

thread_local! {
    static CURRENT_TAG: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Tag currently installed on this thread, if any.
pub fn current_tag() -> Option<String> {
    CURRENT_TAG.with(|tag| tag.borrow().clone())
}

/// RAII guard installing a tag for the current scope.
///
/// Restores the previous tag on drop, whether the scope ends by normal return,
/// early return, or unwinding.
///
/// # Example
///
/// ```
/// use rust_log_registry::core::scope_tag::{current_tag, ScopedTag};
///
/// assert_eq!(current_tag(), None);
/// {
///     let _guard = ScopedTag::new("request-42");
///     assert_eq!(current_tag().as_deref(), Some("request-42"));
/// }
/// assert_eq!(current_tag(), None);
/// ```
pub struct ScopedTag {
    saved: Option<String>,
}

impl ScopedTag {
    pub fn new(tag: impl Into<String>) -> Self {
        let saved = CURRENT_TAG.with(|slot| slot.borrow_mut().replace(tag.into()));
        Self { saved }
    }
}

impl Drop for ScopedTag {
    fn drop(&mut self) {
        CURRENT_TAG.with(|slot| *slot.borrow_mut() = self.saved.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_installed_and_restored() {
        assert_eq!(current_tag(), None);
        {
            let _guard = ScopedTag::new("outer");
            assert_eq!(current_tag().as_deref(), Some("outer"));
        }
        assert_eq!(current_tag(), None);
    }

    #[test]
    fn test_nested_tags_restore_in_order() {
        let _outer = ScopedTag::new("outer");
        {
            let _inner = ScopedTag::new("inner");
            assert_eq!(current_tag().as_deref(), Some("inner"));
        }
        assert_eq!(current_tag().as_deref(), Some("outer"));
    }

    #[test]
    fn test_restored_on_early_exit() {
        fn bails_out() -> Result<(), ()> {
            let _guard = ScopedTag::new("short-lived");
            Err(())
        }

        assert_eq!(current_tag(), None);
        let _ = bails_out();
        assert_eq!(current_tag(), None);
    }

    #[test]
    fn test_tags_are_thread_local() {
        let _guard = ScopedTag::new("main-thread");
        let seen = std::thread::spawn(current_tag)
            .join()
            .expect("thread panicked");
        assert_eq!(seen, None);
    }
}
