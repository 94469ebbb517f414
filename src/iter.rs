use crate::{Node, NodeId};
use std::iter::FusedIterator;

/// Forward iterator over the elements of a skiplist, smallest first.
///
/// Walks the bottom level only, so each step is O(1).
pub struct Iter<'a, T> {
    nodes: &'a [Option<Node<T>>],
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a [Option<Node<T>>], first: Option<NodeId>, len: usize) -> Self {
        Self {
            nodes,
            next: first,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        match &self.nodes[id] {
            Some(node) => {
                self.next = node.lanes[0].next;
                self.remaining -= 1;
                Some(&node.value)
            }
            None => unreachable!("bottom level links to a free slot"),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Owning iterator, produced by `SkipList::into_iter`.
pub struct IntoIter<T> {
    nodes: Vec<Option<Node<T>>>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(nodes: Vec<Option<Node<T>>>, first: Option<NodeId>, len: usize) -> Self {
        Self {
            nodes,
            next: first,
            remaining: len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        match self.nodes[id].take() {
            Some(node) => {
                self.next = node.lanes[0].next;
                self.remaining -= 1;
                Some(node.value)
            }
            None => unreachable!("bottom level links to a free slot"),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use crate::SkipList;

    #[test]
    fn test_iter() {
        let mut sk = SkipList::new();
        let expected = &[0, 1, 2];
        for e in expected.iter().rev() {
            sk.insert(*e);
        }
        let foo: Vec<_> = sk.iter().cloned().collect();
        assert_eq!(&foo[..], expected);
        assert_eq!(sk.iter().len(), 3);
    }

    #[test]
    fn test_empty() {
        let sk = SkipList::<u32>::new();
        let foo: Vec<_> = sk.iter().cloned().collect();
        assert!(foo.is_empty());
        assert_eq!(sk.into_iter().next(), None);
    }

    #[test]
    fn test_enumerate_gives_ranks() {
        let sk: SkipList<&str> = vec!["Hello", "gopher", "Go", "is", "fun"]
            .into_iter()
            .collect();
        let ranked: Vec<_> = sk.iter().enumerate().collect();
        assert_eq!(
            ranked,
            vec![(0, &"Go"), (1, &"Hello"), (2, &"fun"), (3, &"gopher"), (4, &"is")]
        );
    }

    #[test]
    fn test_into_iter_after_deletes() {
        let mut sk: SkipList<u32> = (0..20).collect();
        for i in (0..20).step_by(3) {
            sk.delete(&i);
        }
        // reuse some freed slots
        sk.insert(100);
        sk.insert(3);
        let mut expected: Vec<u32> = (1..20).filter(|i| i % 3 != 0).chain(vec![3, 100]).collect();
        expected.sort();
        let mut it = sk.into_iter();
        assert_eq!(it.len(), expected.len());
        let got: Vec<_> = it.by_ref().collect();
        assert_eq!(got, expected);
        assert_eq!(it.next(), None);
    }
}
