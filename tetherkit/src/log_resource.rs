use slog::Logger;

/// `World`-global resource holding the logger that components
/// and helpers outside any particular system should log through.
pub struct LogResource {
    pub log: Logger,
}

impl LogResource {
    // Can't construct itself as a `Default` resource;
    // it needs a root logger provided from the
    // outside world.
    pub fn new(parent_log: &Logger) -> LogResource {
        LogResource {
            log: parent_log.new(o!()),
        }
    }
}
