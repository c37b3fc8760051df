/// Members registered per transaction
pub const BATCH_SIZE: usize = 500;

/// Contiguous, order-preserving chunks of at most `size` items. The last chunk may be shorter.
pub fn batches<T>(items: &[T], size: usize) -> impl ExactSizeIterator<Item = &[T]> + '_ {
    items.chunks(size.max(1))
}
