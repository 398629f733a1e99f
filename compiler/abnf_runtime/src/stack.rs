//! Stack growth for deeply recursive rules.
//!
//! Grammars like `group = "(" *group ")"` recurse once per nesting level of
//! the input, so input depth (not grammar size) decides stack use. Rule
//! invocations go through [`ensure_sufficient_stack`], which grows the stack
//! on demand on native targets and is a passthrough on WASM.

/// Grow the stack when less than this remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f` with at least [`RED_ZONE`] bytes of stack available.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
