//! # Active Editor Scope
//!
//! Tracks which editor is currently inside an update. The update machinery
//! pushes an editor when it enters an update and the returned guard removes
//! that entry again, so the context is always cleared when the scope unwinds. The stack
//! is thread-local; nested updates see the innermost editor.

use crate::Editor;
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;

thread_local! {
    static ACTIVE_EDITORS: RefCell<Vec<(u64, Editor)>> = const { RefCell::new(Vec::new()) };
    static NEXT_SCOPE_ID: Cell<u64> = const { Cell::new(0) };
}

/// The editor whose update is currently running on this thread, if any
pub fn active_editor() -> Option<Editor> {
    ACTIVE_EDITORS.with(|stack| stack.borrow().last().map(|(_, editor)| editor.clone()))
}

/// Make `editor` the active editor until the returned guard is dropped
pub fn enter_update_scope(editor: &Editor) -> ActiveEditorGuard {
    let id = NEXT_SCOPE_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    ACTIVE_EDITORS.with(|stack| stack.borrow_mut().push((id, editor.clone())));
    ActiveEditorGuard {
        id,
        _not_send: PhantomData,
    }
}

/// Removes the scope it opened on drop, wherever it sits in the stack
#[must_use = "the editor stops being active as soon as the guard is dropped"]
pub struct ActiveEditorGuard {
    id: u64,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ActiveEditorGuard {
    fn drop(&mut self) {
        ACTIVE_EDITORS.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(position) = stack.iter().rposition(|(id, _)| *id == self.id) {
                stack.remove(position);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_editor, CreateEditorArgs};

    fn editor(namespace: &str) -> Editor {
        create_editor(Some(CreateEditorArgs::new().with_namespace(namespace))).unwrap()
    }

    #[test]
    fn test_no_active_editor_by_default() {
        assert!(active_editor().is_none());
    }

    #[test]
    fn test_guard_clears_on_drop() {
        let outer = editor("outer");
        {
            let _guard = enter_update_scope(&outer);
            assert_eq!(active_editor().unwrap().namespace(), "outer");
        }
        assert!(active_editor().is_none());
    }

    #[test]
    fn test_nested_scopes_see_innermost() {
        let outer = editor("outer");
        let inner = editor("inner");

        let _outer_guard = enter_update_scope(&outer);
        {
            let _inner_guard = enter_update_scope(&inner);
            assert_eq!(active_editor().unwrap().namespace(), "inner");
        }
        assert_eq!(active_editor().unwrap().namespace(), "outer");
    }

    #[test]
    fn test_out_of_order_guard_drop_keeps_open_scope_active() {
        let a = editor("a");
        let b = editor("b");

        let guard_a = enter_update_scope(&a);
        let guard_b = enter_update_scope(&b);
        drop(guard_a);
        assert_eq!(active_editor().unwrap().namespace(), "b");

        let nested = create_editor(None).unwrap();
        assert!(nested.shares_registry_with(&b));
        assert_eq!(nested.namespace(), "b");

        drop(guard_b);
        assert!(active_editor().is_none());
    }

    #[test]
    fn test_same_editor_entered_twice() {
        let a = editor("a");
        let b = editor("b");

        let first = enter_update_scope(&a);
        let _middle = enter_update_scope(&b);
        let last = enter_update_scope(&a);
        drop(first);
        assert_eq!(active_editor().unwrap().namespace(), "a");
        drop(last);
        assert_eq!(active_editor().unwrap().namespace(), "b");
    }

    #[test]
    fn test_scope_cleared_after_panic() {
        let outer = editor("outer");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = enter_update_scope(&outer);
            panic!("update failed");
        }));

        assert!(result.is_err());
        assert!(active_editor().is_none());
    }
}
