use rand::{
    Rng,
    RngCore,
};
use std::sync::Mutex;
use super::SessionToken;

#[derive(Default)]
pub struct SessionTokenFactory {
    rng: Option<Box<Mutex<dyn RngCore + Send>>>,
}

impl SessionTokenFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Some(Box::new(Mutex::new(rng)));
        self
    }

    pub fn create(&self) -> SessionToken {
        let value: u128 = self.rng
            .as_ref()
            .and_then(|m| m.lock()
                .ok()
                .map(|mut rng| rng.gen())
            )
            .unwrap_or_else(|| rand::thread_rng().gen());
        SessionToken(format!("{value:032x}"))
    }
}
