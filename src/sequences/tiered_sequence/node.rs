//! Rotated layer nodes backing [`TieredSequence`](super::TieredSequence).
//!
//! Every node, at any depth, is a ring of `span` slots with a rotation offset:
//! logical slot `i` is physical slot `(i + offset) % span`. For an inner node,
//! physical slot `q` is the logical slot `q % child_span` of child
//! `q / child_span`. Slots past the sequence length hold garbage.
//!
//! Shifting a whole node by one slot is a rotation plus a single write, which
//! costs $`O(k)`$ for depth $`k`$ instead of touching every slot. A shift over an
//! arbitrary range therefore recurses into at most the two children holding the
//! ends of the range and rotates the children fully covered by it.
use crate::sequences::LayerSchema;

#[derive(Clone)]
pub(crate) struct Node<T> {
    offset: usize,
    body: Body<T>,
}

#[derive(Clone)]
enum Body<T> {
    // Children are allocated on first write.
    Inner(Box<[Option<Box<Node<T>>>]>),
    Leaf(Box<[T]>),
}

impl<T> Node<T>
where
    T: Copy + Default,
{
    pub fn new(schema: &LayerSchema, depth: usize) -> Self {
        let fanout = schema.layers()[depth];
        let body = if schema.is_leaf(depth) {
            Body::Leaf(vec![T::default(); fanout].into_boxed_slice())
        } else {
            Body::Inner((0..fanout).map(|_| None).collect())
        };
        Self { offset: 0, body }
    }

    /// Returns the value of logical slot `i`.
    pub fn get(&self, schema: &LayerSchema, depth: usize, i: usize) -> T {
        let q = self.physical(schema, depth, i);
        match &self.body {
            Body::Leaf(slots) => slots[q],
            Body::Inner(children) => {
                let s = schema.span(depth + 1);
                children[q / s]
                    .as_ref()
                    .map_or_else(T::default, |child| child.get(schema, depth + 1, q % s))
            }
        }
    }

    /// Writes `x` into logical slot `i`, returning the previous value.
    pub fn set(&mut self, schema: &LayerSchema, depth: usize, i: usize, x: T) -> T {
        let q = self.physical(schema, depth, i);
        match &mut self.body {
            Body::Leaf(slots) => std::mem::replace(&mut slots[q], x),
            Body::Inner(children) => {
                let s = schema.span(depth + 1);
                child_mut(children, schema, depth, q / s).set(schema, depth + 1, q % s, x)
            }
        }
    }

    /// Shifts logical slots `[a, b]` one step towards `b`, writes `x` into
    /// slot `a`, and returns the value pushed out of slot `b`.
    pub fn shift_insert(&mut self, schema: &LayerSchema, depth: usize, a: usize, b: usize, x: T) -> T {
        let span = schema.span(depth);
        debug_assert!(a <= b && b < span);
        if a == 0 && b == span - 1 {
            return self.rotate_in_front(schema, depth, x);
        }
        let offset = self.offset;
        match &mut self.body {
            Body::Leaf(slots) => {
                let mut carry = x;
                for i in a..=b {
                    carry = std::mem::replace(&mut slots[(i + offset) % span], carry);
                }
                carry
            }
            Body::Inner(children) => {
                let s = schema.span(depth + 1);
                let mut carry = x;
                let mut p = a + offset;
                let mut rest = b - a + 1;
                while rest != 0 {
                    let q = p % span;
                    let start = q % s;
                    let seg = rest.min(s - start);
                    carry = child_mut(children, schema, depth, q / s).shift_insert(
                        schema,
                        depth + 1,
                        start,
                        start + seg - 1,
                        carry,
                    );
                    p += seg;
                    rest -= seg;
                }
                carry
            }
        }
    }

    /// Shifts logical slots `[a, b]` one step towards `a`, writes `x` into
    /// slot `b`, and returns the value pushed out of slot `a`.
    pub fn shift_remove(&mut self, schema: &LayerSchema, depth: usize, a: usize, b: usize, x: T) -> T {
        let span = schema.span(depth);
        debug_assert!(a <= b && b < span);
        if a == 0 && b == span - 1 {
            return self.rotate_in_back(schema, depth, x);
        }
        let offset = self.offset;
        match &mut self.body {
            Body::Leaf(slots) => {
                let mut carry = x;
                for i in (a..=b).rev() {
                    carry = std::mem::replace(&mut slots[(i + offset) % span], carry);
                }
                carry
            }
            Body::Inner(children) => {
                let s = schema.span(depth + 1);
                let mut carry = x;
                let mut p = b + offset;
                let mut rest = b - a + 1;
                loop {
                    let q = p % span;
                    let end = q % s;
                    let seg = rest.min(end + 1);
                    carry = child_mut(children, schema, depth, q / s).shift_remove(
                        schema,
                        depth + 1,
                        end + 1 - seg,
                        end,
                        carry,
                    );
                    rest -= seg;
                    if rest == 0 {
                        break carry;
                    }
                    p -= seg;
                }
            }
        }
    }

    /// Shifts the whole ring one step towards its end, writes `x` into the
    /// first slot, and returns the value pushed out of the last slot.
    fn rotate_in_front(&mut self, schema: &LayerSchema, depth: usize, x: T) -> T {
        let span = schema.span(depth);
        self.offset = (self.offset + span - 1) % span;
        // The new first slot is physically the old last slot.
        self.set(schema, depth, 0, x)
    }

    /// Shifts the whole ring one step towards its start, writes `x` into the
    /// last slot, and returns the value pushed out of the first slot.
    fn rotate_in_back(&mut self, schema: &LayerSchema, depth: usize, x: T) -> T {
        let span = schema.span(depth);
        let first = self.set(schema, depth, 0, x);
        self.offset = (self.offset + 1) % span;
        first
    }

    /// Returns the number of allocated nodes in this subtree.
    #[cfg(test)]
    pub fn num_nodes(&self) -> usize {
        match &self.body {
            Body::Leaf(_) => 1,
            Body::Inner(children) => {
                1 + children
                    .iter()
                    .flatten()
                    .map(|child| child.num_nodes())
                    .sum::<usize>()
            }
        }
    }

    #[inline(always)]
    fn physical(&self, schema: &LayerSchema, depth: usize, i: usize) -> usize {
        (i + self.offset) % schema.span(depth)
    }
}

#[inline(always)]
fn child_mut<'a, T>(
    children: &'a mut [Option<Box<Node<T>>>],
    schema: &LayerSchema,
    depth: usize,
    c: usize,
) -> &'a mut Node<T>
where
    T: Copy + Default,
{
    children[c].get_or_insert_with(|| Box::new(Node::new(schema, depth + 1)))
}
