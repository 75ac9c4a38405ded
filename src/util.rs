/// The parts of a binary tree node needed to walk it in order.
pub(crate) trait BinaryNode {
    type Element;

    fn element(&self) -> &Self::Element;
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;
}

/// A stack-based in-order walk. The stack holds the left spine of every subtree still to be
/// visited so the walk never recurses and never materializes the elements.
pub(crate) struct InOrder<'a, N> {
    stack: Vec<&'a N>,
    remaining: usize,
}

impl<'a, N: BinaryNode> InOrder<'a, N> {
    pub(crate) fn new(root: Option<&'a N>, len: usize) -> Self {
        let mut walk = Self {
            stack: Vec::new(),
            remaining: len,
        };
        walk.push_left_spine(root);
        walk
    }

    fn push_left_spine(&mut self, mut node: Option<&'a N>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, N: BinaryNode> Iterator for InOrder<'a, N> {
    type Item = &'a N::Element;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.element())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, N> Clone for InOrder<'a, N> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}
