//! State changes requested by overlays and applied by the reducer.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    Form(FormMutation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMutation {
    /// Select a catalog entry by index.
    SelectFont(usize),
}
