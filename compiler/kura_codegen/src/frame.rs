//! Per-routine storage slot allocation.

use kura_ir::Name;

/// Slot allocator for one routine activation.
///
/// Slot 0 always holds the receiver (the struct instance for methods, the
/// synthetic entry instance for top-level code). Named slots follow from
/// slot 1: parameters in call order, then locals in lexical declaration
/// order. There is no block scoping: every local keeps its slot for the
/// whole routine.
///
/// Temporary slots for sub-expression scratch storage sit after all named
/// slots and are allocated and released in strict LIFO order; any statement
/// that allocates temporaries must release them all before it completes.
#[derive(Debug, Default)]
pub struct Frame {
    /// Named slots in binding order; slot = position + 1.
    names: Vec<Name>,
    /// Number of currently live temporaries.
    live_temps: u32,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the next parameter slot.
    pub fn bind_parameter(&mut self, name: Name) -> u32 {
        self.bind(name)
    }

    /// Bind the next local slot.
    pub fn bind_local(&mut self, name: Name) -> u32 {
        self.bind(name)
    }

    fn bind(&mut self, name: Name) -> u32 {
        debug_assert!(
            !self.names.contains(&name),
            "codegen invariant: name bound twice in one frame"
        );
        debug_assert_eq!(
            self.live_temps, 0,
            "codegen invariant: binding a name while temporaries are live"
        );
        self.names.push(name);
        self.names.len() as u32
    }

    /// Slot of a previously bound name.
    ///
    /// # Panics
    /// Panics if `name` is unbound; the checker guarantees every identifier
    /// reaching codegen resolves.
    #[track_caller]
    pub fn slot_of(&self, name: Name) -> u32 {
        match self.names.iter().position(|&n| n == name) {
            Some(index) => index as u32 + 1,
            None => panic!("codegen invariant: unbound name {name:?}"),
        }
    }

    /// Allocate a temporary slot after all named slots and live temporaries.
    pub fn new_temporary(&mut self) -> u32 {
        let slot = self.names.len() as u32 + 1 + self.live_temps;
        self.live_temps += 1;
        slot
    }

    /// Release the most recently allocated temporary.
    pub fn release_temporary(&mut self) {
        debug_assert!(
            self.live_temps > 0,
            "codegen invariant: released a temporary that was never allocated"
        );
        self.live_temps = self.live_temps.saturating_sub(1);
    }

    /// Number of currently live temporaries.
    pub fn live_temporaries(&self) -> u32 {
        self.live_temps
    }

    /// Number of bound named slots.
    pub fn named_count(&self) -> usize {
        self.names.len()
    }
}
