//! Fixed simulation constants that are not balance parameters.

/// Progress at which an order is complete.
pub const PROGRESS_COMPLETE: f32 = 100.0;

/// Traits assigned to every new hire.
pub const TRAITS_PER_STAFF: usize = 2;

/// Domain events kept before the oldest are dropped.
pub const EVENT_LOG_CAPACITY: usize = 256;

/// Recent feedback lines kept for display (the rest are only logged).
pub const FEEDBACK_HISTORY: usize = 5;

/// Loyalty of a newly hired staff member.
pub const STARTING_LOYALTY: f32 = 50.0;
