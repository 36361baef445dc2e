use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time is before Unix epoch")
        .as_secs() as i64
}

pub fn elapsed_seconds(start: i64, end: i64) -> i64 {
    end - start
}
