//! Sequential containers: positional lists, the legacy vector and
//! stack, the arena-linked list, the ring-buffer deque, and the binary
//! heap.

pub mod array_list;
pub mod deque;
pub mod linked_list;
pub mod priority_queue;
pub mod vector;

pub use array_list::ArrayList;
pub use deque::ArrayDeque;
pub use linked_list::LinkedList;
pub use priority_queue::PriorityQueue;
pub use vector::{Stack, Vector};
