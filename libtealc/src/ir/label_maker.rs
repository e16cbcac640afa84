//! The `label_maker` module defines the [LabelMaker] type.

/// The jump-target labels for one `if` statement.
#[derive(Debug)]
pub struct IfLabels {
    pub end_if: String,
    pub end_else: String,
}

/// The jump-target labels for one `while` statement.
#[derive(Debug)]
pub struct WhileLabels {
    pub head: String,
    pub end: String,
}

/// The Label Maker generates the jump-target labels used in a subroutine's instructions.
///
/// Labels are unique within a subroutine; the counters restart at 1 for every function definition, so the same
/// label names recur across subroutines.
#[derive(Debug)]
pub struct LabelMaker {
    next_if_index: usize,
    next_while_index: usize,
}

impl LabelMaker {
    /// Creates a new label maker.
    pub fn new() -> Self {
        Self { next_if_index: 1, next_while_index: 1 }
    }

    /// Resets the label counters for a new function definition.
    pub fn reset_for_new_function(&mut self) {
        self.next_if_index = 1;
        self.next_while_index = 1;
    }

    /// Creates the label pair for an `if` statement. The same index names both labels, so an if/else reads as
    /// `endif<k>` / `endelse<k>`.
    pub fn make_if_labels(&mut self) -> IfLabels {
        let index = self.next_if_index;
        self.next_if_index += 1;

        IfLabels { end_if: format!("endif{index}"), end_else: format!("endelse{index}") }
    }

    /// Creates the label pair for a `while` statement: `while<k>` for the head and `endwhile<k>` for the exit.
    pub fn make_while_labels(&mut self) -> WhileLabels {
        let index = self.next_while_index;
        self.next_while_index += 1;

        WhileLabels { head: format!("while{index}"), end: format!("endwhile{index}") }
    }
}
