// src/stack.rs

//! Bounded save/restore storage for the active transform.

use crate::error::StackError;
use log::warn;

/// Default depth of the transform stack.
pub const DEFAULT_STACK_CAPACITY: usize = 32;

/// A fixed-capacity LIFO of matrix snapshots.
///
/// `push` stores its own copy of the matrix, so the caller is free to keep
/// mutating the original. The stack never grows past its capacity: a push on
/// a full stack and a pop on an empty one are reported as errors and leave
/// the contents untouched.
#[derive(Debug, Clone)]
pub struct TransformStack<M: Clone> {
    entries: Vec<M>,
    capacity: usize,
}

impl<M: Clone> TransformStack<M> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Saves a copy of `matrix`.
    pub fn push(&mut self, matrix: &M) -> Result<(), StackError> {
        if self.entries.len() >= self.capacity {
            warn!("Transform stack overflow: already holding {} entries", self.capacity);
            return Err(StackError::Overflow {
                capacity: self.capacity,
            });
        }
        self.entries.push(matrix.clone());
        Ok(())
    }

    /// Removes and returns the most recent snapshot.
    pub fn pop(&mut self) -> Result<M, StackError> {
        self.entries.pop().ok_or_else(|| {
            warn!("Transform stack underflow: pop on an empty stack");
            StackError::Underflow
        })
    }

    /// The most recent snapshot, without removing it.
    pub fn peek(&self) -> Option<&M> {
        self.entries.last()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<M: Clone> Default for TransformStack<M> {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Affine2D, Matrix};
    use test_log::test;

    #[test]
    fn push_pop_restores_bit_for_bit() {
        let mut stack = TransformStack::new(4);
        let mut active = Affine2D::IDENTITY;
        active.translate(3.25, -1.5);
        active.rotate(0.3);
        let saved = active;

        stack.push(&active).unwrap();
        active.scale(7.0);
        active.shear_x(0.4);
        active = stack.pop().unwrap();

        assert_eq!(active.to_vec(), saved.to_vec());
        assert!(stack.is_empty());
    }

    #[test]
    fn overflow_reports_and_keeps_depth() {
        let mut stack = TransformStack::new(DEFAULT_STACK_CAPACITY);
        let mut m = Affine2D::IDENTITY;
        for i in 0..DEFAULT_STACK_CAPACITY {
            m.translate(1.0, 0.0);
            stack.push(&m).unwrap_or_else(|e| panic!("push {} failed: {}", i, e));
        }
        assert!(stack.is_full());
        let top_before = *stack.peek().unwrap();

        let err = stack.push(&Affine2D::IDENTITY).unwrap_err();
        assert_eq!(err, StackError::Overflow { capacity: 32 });
        assert_eq!(stack.depth(), stack.capacity());
        assert_eq!(*stack.peek().unwrap(), top_before, "rejected push leaves top intact");
    }

    #[test]
    fn underflow_is_an_error() {
        let mut stack: TransformStack<Affine2D> = TransformStack::default();
        assert_eq!(stack.pop(), Err(StackError::Underflow));
        assert_eq!(stack.depth(), 0);

        stack.push(&Affine2D::IDENTITY).unwrap();
        assert!(stack.pop().is_ok());
        assert_eq!(stack.pop(), Err(StackError::Underflow));
    }

    #[test]
    fn snapshots_are_lifo_copies() {
        let mut stack = TransformStack::new(3);
        let mut m = Affine2D::IDENTITY;
        m.translate(1.0, 0.0);
        stack.push(&m).unwrap();
        m.translate(1.0, 0.0);
        stack.push(&m).unwrap();
        m.translate(1.0, 0.0);

        assert_eq!(stack.pop().unwrap().m[0][2], 2.0);
        assert_eq!(stack.pop().unwrap().m[0][2], 1.0);
        assert_eq!(m.m[0][2], 3.0);

        stack.push(&m).unwrap();
        stack.clear();
        assert!(stack.is_empty());
    }
}
