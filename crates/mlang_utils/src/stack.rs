//! Stack growth for the recursive parts of the pipeline.
//!
//! Block nesting in the parser, passes over the syntax tree and component
//! expansion in the evaluator all recurse once per level. Wrapping those
//! calls in [`ensure_sufficient_stack`] moves deep recursion onto freshly
//! allocated stack segments instead of overflowing the thread stack.

/// If less than this remains, the stack is grown.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
