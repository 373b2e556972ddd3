//! Stack growth for deeply nested input.
//!
//! Nesting is already capped by `max_depth`, but the cap is configurable and
//! every level of a JavaScript expression costs several native frames. The
//! recursive entry points of the parser run through
//! [`ensure_sufficient_stack`] so a large cap cannot overflow the thread.

/// Grow the stack when less than this remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_recursion() {
        fn nest(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { nest(n - 1) + 1 })
        }

        assert_eq!(nest(100_000), 100_000);
    }

    #[test]
    fn test_passes_result_through() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }
}
