pub mod conf;
pub mod error;
pub mod server;
pub mod view;

pub use server::{
    router,
    AppState,
};
