//! Generation counter that fences async results to the session they belong to.

#[cfg(test)]
#[path = "session_guard_test.rs"]
mod session_guard_test;

/// Opaque token naming one session selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Tracks the current generation. Anything captured under an older
/// generation must not touch shared chat state.
#[derive(Clone, Debug, Default)]
pub struct SessionGuard {
    current: Generation,
}

impl SessionGuard {
    /// Move to a fresh generation, invalidating every outstanding one.
    pub fn advance(&mut self) -> Generation {
        self.current = Generation(self.current.0.wrapping_add(1));
        self.current
    }

    #[must_use]
    pub fn current(&self) -> Generation {
        self.current
    }

    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current == generation
    }
}
