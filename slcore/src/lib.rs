pub mod ac;
pub mod error;
pub mod platform;

#[cfg(feature = "chrono")]
pub(crate) mod chrono {
    #[cfg(not(test))]
    pub use ::chrono::Utc;
    #[cfg(test)]
    pub use test_sl::chrono::Utc;
}
