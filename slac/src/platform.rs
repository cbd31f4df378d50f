use slcore::{
    ac::session::SessionFactory,
    platform::ACPlatform,
};
use std::sync::Arc;

/// Sessions inactive for longer than this many seconds are expired.
pub const DEFAULT_SESSION_LIFETIME: i64 = 86400;

#[derive(Default)]
pub struct Builder {
    // platform
    ac_platform: Option<Arc<dyn ACPlatform>>,
    // automatically purges all but the most recent passwords
    password_autopurge: bool,
    session_factory: SessionFactory,
    session_lifetime: Option<i64>,
}

struct PlatformInner {
    ac_platform: Arc<dyn ACPlatform>,
    password_autopurge: bool,
    session_factory: SessionFactory,
    session_lifetime: Option<i64>,
}

/// The access control platform; clones share the same backend.
#[derive(Clone)]
pub struct Platform(Arc<PlatformInner>);

mod impls;
