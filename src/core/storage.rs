//! Growth policy shared by every growable list in the runtime

/// Capacity reserved the first time a list without a config needs room
pub const DEFAULT_MIN_CAPACITY: usize = 4;

/// Make room for one more element, doubling capacity when the list is full
///
/// Starts at `min_capacity` for an empty list. Capacity is explicit rather
/// than left to `Vec`'s own policy so memory estimates stay deterministic.
pub fn reserve_one<T>(items: &mut Vec<T>, min_capacity: usize, label: &str) {
    if items.len() < items.capacity() {
        return;
    }

    let new_capacity = if items.capacity() == 0 {
        min_capacity.max(1)
    } else {
        items.capacity() * 2
    };
    items.reserve_exact(new_capacity - items.len());
    tracing::debug!("Grew {} storage to {} capacity", label, items.capacity());
}

/// Bytes held by a list's allocation (capacity, not length)
pub fn allocated_bytes<T>(items: &Vec<T>) -> usize {
    items.capacity() * std::mem::size_of::<T>()
}
