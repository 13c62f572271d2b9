/// Binary min-heap over a 0-indexed `Vec`. Used to pull the two lightest
/// nodes out of the working set while the Huffman tree is merged.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    pub elements: Vec<T>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap { elements: vec![] }
    }

    pub fn heap_size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn parent(&self, i: usize) -> usize {
        (i - 1) / 2
    }

    pub fn left(&self, i: usize) -> usize {
        2 * i + 1
    }

    pub fn right(&self, i: usize) -> usize {
        2 * i + 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeapErr {
    KeyError(usize, usize),
    HeapUnderflow,
}

impl<T: Ord> MinHeap<T> {
    pub fn build(source: Vec<T>) -> Result<Self, HeapErr> {
        let mut heap = MinHeap { elements: source };
        let n = heap.heap_size();
        for i in (0..n / 2).rev() {
            heap.min_heapify(i)?;
        }
        Ok(heap)
    }

    #[cfg(test)]
    pub fn valid_min_heap(&self) -> bool {
        (1..self.heap_size()).all(|i| self.elements[self.parent(i)] <= self.elements[i])
    }

    pub fn min_heapify(&mut self, i: usize) -> Result<(), HeapErr> {
        let n = self.heap_size();
        if i >= n {
            return Err(HeapErr::KeyError(i, n));
        }

        let mut i = i;
        loop {
            let l = self.left(i);
            let r = self.right(i);
            let mut smallest = i;

            if l < n && self.elements[l] < self.elements[smallest] {
                smallest = l;
            }
            if r < n && self.elements[r] < self.elements[smallest] {
                smallest = r;
            }
            if smallest == i {
                return Ok(());
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let mut i = self.heap_size() - 1;
        while i > 0 {
            let p = self.parent(i);
            if self.elements[p] <= self.elements[i] {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    pub fn extract_min(&mut self) -> Result<T, HeapErr> {
        if self.is_empty() {
            return Err(HeapErr::HeapUnderflow);
        }
        let last = self.heap_size() - 1;
        self.elements.swap(0, last);
        let result = self.elements.pop().ok_or(HeapErr::HeapUnderflow)?;
        if !self.is_empty() {
            self.min_heapify(0)?;
        }
        Ok(result)
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
