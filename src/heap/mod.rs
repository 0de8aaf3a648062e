//! Mergeable priority queue for ready processes.
//!
//! A binomial heap whose ordering is the dispatch tie-break rule
//! ([`crate::dispatching::is_higher_priority`]) rather than a plain key
//! comparison. Nodes live in an arena and link to each other by index.
//!
//! # Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `insert` | O(log n) |
//! | `extract_best` | O(log n) |
//! | `peek_best` | O(log n) |
//! | `snapshot` | O(n) |
//!
//! # Reference
//! Cormen et al. (2001), "Introduction to Algorithms", 2nd ed., Ch. 19 (Binomial Heaps)

mod binomial;

pub use binomial::BinomialHeap;
