/// Fixed-capacity ring buffer used for the background and object pixel queues.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PixelFifo<T: Copy + Default, const N: usize> {
    slots: [T; N],
    head: usize,
    len: usize,
}

impl<T: Copy + Default, const N: usize> PixelFifo<T, N> {
    pub(crate) fn new() -> Self {
        Self {
            slots: [T::default(); N],
            head: 0,
            len: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Append at the tail. A full queue drops the pixel.
    pub(crate) fn push(&mut self, value: T) {
        if self.len == N {
            return;
        }
        self.slots[(self.head + self.len) % N] = value;
        self.len += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.head];
        self.head = (self.head + 1) % N;
        self.len -= 1;
        Some(value)
    }

    /// Element `index` positions from the head.
    pub(crate) fn get(&self, index: usize) -> Option<T> {
        (index < self.len).then(|| self.slots[(self.head + index) % N])
    }

    pub(crate) fn set(&mut self, index: usize, value: T) {
        if index < self.len {
            self.slots[(self.head + index) % N] = value;
        }
    }
}

impl<T: Copy + Default, const N: usize> Default for PixelFifo<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
