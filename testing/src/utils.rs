/// Compile time assertion that the type is `Send + Sync`.
pub fn is_send_sync<T: Send + Sync>() {}
