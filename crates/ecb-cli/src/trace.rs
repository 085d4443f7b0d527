//! Console dump of intermediate cipher states.

use ecb_core::{Block, CipherObserver, State, Step};

/// Prints every step of the first `limit` blocks as 4×4 hex grids.
pub struct StatePrinter {
    limit: usize,
    active: bool,
}

impl StatePrinter {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            active: false,
        }
    }
}

impl CipherObserver for StatePrinter {
    fn block_start(&mut self, index: usize, input: &Block) {
        self.active = index < self.limit;
        if self.active {
            println!("\nBlock {index} encryption steps:");
            println!("\nInput Block:\n{}", format_state(input));
        }
    }

    fn step(&mut self, step: Step, state: &State) {
        if self.active {
            println!("\n{step}:\n{}", format_state(state));
        }
    }
}

/// One line per column, bytes in hex.
pub fn format_state(state: &State) -> String {
    state
        .chunks_exact(4)
        .map(|column| {
            column
                .iter()
                .map(|byte| format!("{byte:02x}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
