mod access_control;
pub use access_control::{DefaultACPlatform, ACPlatform};

pub trait PlatformUrl {
    fn url(&self) -> &str;
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorOption {
    pub url: String,
    pub auto_create_db: bool,
}

impl ConnectorOption {
    pub fn auto_create_db(mut self, val: bool) -> Self {
        self.auto_create_db = val;
        self
    }
}

impl From<String> for ConnectorOption {
    fn from(url: String) -> Self {
        Self {
            url,
            auto_create_db: false,
        }
    }
}

impl From<&String> for ConnectorOption {
    fn from(url: &String) -> Self {
        url.clone().into()
    }
}

impl From<&str> for ConnectorOption {
    fn from(url: &str) -> Self {
        url.to_string().into()
    }
}
