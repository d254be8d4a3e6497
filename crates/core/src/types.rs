/// Record ids are non-negative integers assigned by the store.
pub type RecordId = u64;
