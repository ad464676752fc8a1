use std::cmp::Ordering;

/// Array-backed binary max-heap ordered by a caller-supplied comparator.
///
/// Children of slot `i` live at `2i + 1` and `2i + 2`, its parent at
/// `(i - 1) / 2`. Every element compares `<=` its parent, so the root is
/// a maximum. Elements that compare `Equal` come out in an unspecified
/// order; fold a tie-breaker into the comparator if order matters.
pub struct MaxHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    heap: Vec<T>,
    compare: F,
}

impl<T, F> MaxHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(compare: F) -> Self {
        MaxHeap {
            heap: Vec::new(),
            compare,
        }
    }

    pub fn with_capacity(capacity: usize, compare: F) -> Self {
        MaxHeap {
            heap: Vec::with_capacity(capacity),
            compare,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn push(&mut self, value: T) {
        self.heap.push(value);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the maximum; `None` when empty
    pub fn pop(&mut self) -> Option<T> {
        if self.heap.len() <= 1 {
            return self.heap.pop();
        }

        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let max = self.heap.pop();
        self.sift_down(0);
        max
    }

    /// Drain into a vector ordered from greatest to least
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Some(value) = self.pop() {
            sorted.push(value);
        }
        sorted
    }

    fn sift_up(&mut self, mut current: usize) {
        while current > 0 {
            let parent = (current - 1) / 2;
            if (self.compare)(&self.heap[current], &self.heap[parent]) != Ordering::Greater {
                break;
            }
            self.heap.swap(current, parent);
            current = parent;
        }
    }

    fn sift_down(&mut self, mut current: usize) {
        let len = self.heap.len();

        loop {
            let left = 2 * current + 1;
            let right = left + 1;
            let mut largest = current;

            if left < len && (self.compare)(&self.heap[left], &self.heap[largest]) == Ordering::Greater {
                largest = left;
            }
            if right < len && (self.compare)(&self.heap[right], &self.heap[largest]) == Ordering::Greater {
                largest = right;
            }

            if largest == current {
                break;
            }
            self.heap.swap(current, largest);
            current = largest;
        }
    }

    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.heap.len()).all(|i| {
            (self.compare)(&self.heap[i], &self.heap[(i - 1) / 2]) != Ordering::Greater
        })
    }
}

impl<T: Ord> MaxHeap<T, fn(&T, &T) -> Ordering> {
    /// Heap over the type's natural order
    pub fn natural() -> Self {
        MaxHeap::new(T::cmp)
    }
}

impl<T, F> Extend<T> for MaxHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}
