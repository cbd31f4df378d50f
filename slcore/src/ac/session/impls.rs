use super::Session;

impl Session {
    /// Whether the session has been inactive for longer than the
    /// lifetime (in seconds) as of `now`.  A `None` lifetime never
    /// expires.
    pub fn is_expired(&self, now: i64, lifetime: Option<i64>) -> bool {
        lifetime
            .map(|lifetime| now.saturating_sub(self.last_active_ts) > lifetime)
            .unwrap_or(false)
    }
}
