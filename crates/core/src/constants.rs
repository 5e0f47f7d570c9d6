/// Name given to an event when its plan is reset.
pub const DEFAULT_EVENT_NAME: &str = "New Event";

/// Unit label used when a goal is created without one.
pub const DEFAULT_GOAL_UNIT: &str = "units";

/// Query parameter carrying the event id in shareable links.
pub const SHARE_LINK_EVENT_PARAM: &str = "event";

/// Default interval between client refreshes, in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default timeout applied to a single store request, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Capacity of the session event channel
pub const SESSION_EVENT_CAPACITY: usize = 64;
