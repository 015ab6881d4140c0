use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid cron expression '{expr}': {source}")]
    Parse {
        expr: String,
        #[source]
        source: cron::error::Error,
    },

    #[error("cron expression '{0}' must have exactly 5 fields (minute hour day month weekday)")]
    FieldCount(String),

    #[error("cron expression '{0}' has no fire time after the reference instant")]
    Exhausted(String),
}
