use std::collections::VecDeque;

/// One pending artwork preload. `generation` and `letter` only feed the
/// progress highlight in the UI; they never influence preload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadItem {
    pub image_url: String,
    pub generation: u32,
    pub letter: String,
}

/// FIFO of pending preloads. Items come back out in exactly the order they
/// went in; nothing is reordered, dropped, or deduplicated.
#[derive(Debug, Default)]
pub struct PreloadQueue {
    items: VecDeque<PreloadItem>,
}

impl PreloadQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, items: Vec<PreloadItem>) {
        self.items.extend(items);
    }

    /// Removes and returns up to `max` items from the head, fewer if the
    /// queue holds fewer. Always a fresh Vec owned by the caller.
    pub fn take_batch(&mut self, max: usize) -> Vec<PreloadItem> {
        let count = max.min(self.items.len());
        self.items.drain(..count).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(n: u32) -> PreloadItem {
        PreloadItem {
            image_url: format!("{n}.png"),
            generation: 1 + n / 10,
            letter: "A".to_string(),
        }
    }

    #[test]
    fn take_batch_preserves_enqueue_order() {
        let mut queue = PreloadQueue::new();
        queue.enqueue((0..4).map(item).collect());
        queue.enqueue((4..7).map(item).collect());

        let first = queue.take_batch(5);
        let second = queue.take_batch(5);

        let urls: Vec<String> = first
            .iter()
            .chain(second.iter())
            .map(|i| i.image_url.clone())
            .collect();
        let expected: Vec<String> = (0..7).map(|n| format!("{n}.png")).collect();
        assert_eq!(urls, expected);
    }

    #[test]
    fn take_batch_is_bounded_and_exhaustive() {
        let mut queue = PreloadQueue::new();
        queue.enqueue((0..12).map(item).collect());

        let mut total = 0;
        while !queue.is_empty() {
            let batch = queue.take_batch(5);
            assert!(batch.len() <= 5);
            total += batch.len();
        }
        assert_eq!(total, 12);
        assert!(queue.take_batch(5).is_empty());
    }

    #[test]
    fn enqueue_keeps_duplicates() {
        let mut queue = PreloadQueue::new();
        queue.enqueue(vec![item(1), item(1)]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn empty_enqueue_is_a_noop() {
        let mut queue = PreloadQueue::new();
        queue.enqueue(Vec::new());
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }
}
