//! Singly linked collision chains.

/// A single chained element, owning its value and the rest of the chain.
pub struct Node<T> {
    pub value: T,
    next: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Box<Self> {
        Box::new(Node { value, next: None })
    }
}

/// Owning head of a singly linked list of [`Node`]s.
///
/// Nodes are always added at the front, the order of values within a chain carries no meaning.
pub struct Chain<T> {
    head: Option<Box<Node<T>>>,
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Chain { head: None }
    }
}

impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        // Unlink node by node, the default recursive drop can overflow the stack on long chains.
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl<T> Chain<T> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn push_front(&mut self, value: T) {
        self.push_node(Node::new(value));
    }

    /// Links an existing node in front of the chain without reallocating it.
    pub fn push_node(&mut self, mut node: Box<Node<T>>) {
        debug_assert!(node.next.is_none());
        node.next = self.head.take();
        self.head = Some(node);
    }

    /// Unlinks the first node and hands over its allocation.
    pub fn pop_node(&mut self) -> Option<Box<Node<T>>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        Some(node)
    }

    /// Returns the first value in the chain for which `predicate` holds.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.iter().find(|&value| predicate(value))
    }

    /// Unlinks the first value for which `predicate` holds and returns it.
    pub fn remove(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|node| !predicate(&node.value)) {
            let Some(node) = link else { unreachable!() };
            link = &mut node.next;
        }
        let mut node = link.take()?;
        *link = node.next.take();
        Some(node.value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

/// Iterator over the values of a [`Chain`], front to back.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(values: impl IntoIterator<Item = u32>) -> Chain<u32> {
        let mut chain = Chain::default();
        for value in values {
            chain.push_front(value);
        }
        chain
    }

    #[test]
    fn push_front_prepends() {
        let chain = chain_of([1, 2, 3]);
        assert!(chain.iter().copied().eq([3, 2, 1]));
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn remove_head_middle_and_tail() {
        let mut chain = chain_of(0..5);
        assert_eq!(chain.remove(|&v| v == 4), Some(4));
        assert_eq!(chain.remove(|&v| v == 2), Some(2));
        assert_eq!(chain.remove(|&v| v == 0), Some(0));
        assert!(chain.iter().copied().eq([3, 1]));
        assert_eq!(chain.remove(|&v| v == 0), None);
        assert_eq!(chain.remove(|_| true), Some(3));
        assert_eq!(chain.remove(|_| true), Some(1));
        assert!(chain.is_empty());
        assert_eq!(chain.remove(|_| true), None);
    }

    #[test]
    fn find_returns_first_match() {
        let chain = chain_of([10, 21, 30, 41]);
        assert_eq!(chain.find(|v| v % 2 == 1), Some(&41));
        assert_eq!(chain.find(|&v| v == 10), Some(&10));
        assert_eq!(chain.find(|&v| v > 100), None);
    }

    #[test]
    fn nodes_move_between_chains() {
        let mut source = chain_of([1, 2, 3]);
        let mut target = chain_of([7]);
        while let Some(node) = source.pop_node() {
            target.push_node(node);
        }
        assert!(source.is_empty());
        assert!(target.iter().copied().eq([1, 2, 3, 7]));
    }

    #[test]
    fn long_chain_drops_without_recursion() {
        let chain = chain_of(0..1_000_000);
        assert_eq!(chain.len(), 1_000_000);
        drop(chain);
    }
}
