use std::time::Duration;

/// Upper bound on the dump relay buffer, in lines.
pub const MAX_DUMP_BUFFER_LINES: usize = 150_000;
pub const DEFAULT_DUMP_LINES: usize = 20;
pub const DEFAULT_TAIL_BUFFER_EVENTS: usize = 1024;
pub const RECONNECT_DELAY: Duration = Duration::from_secs(1);
