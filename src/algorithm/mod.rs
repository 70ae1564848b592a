/// Fixed-size candidate sets over catalog indices
pub mod bitset;
/// Step driver orchestrating selection, collapse and propagation
pub mod executor;
/// Neighbor domain filtering after a collapse
pub mod propagation;
/// Injected uniform random choices
pub mod random;
/// Lowest-entropy cell selection
pub mod selection;
