use clap::Parser;
use slac::{
    authorizer::DEFAULT_COOKIE_NAME,
    platform::DEFAULT_SESSION_LIFETIME,
};
use slrbac::{
    Builder as PolicyBuilder,
    PolicyTable,
};
use std::{
    fs,
    path::PathBuf,
    time::Duration,
};

#[derive(Debug, Parser)]
pub struct Cli {
    #[clap(long, value_name = "SLAC_DB_URL", env = "SLAC_DB_URL")]
    pub slac_db_url: String,
    #[clap(long, value_name = "SL_LISTEN", env = "SL_LISTEN", default_value = "127.0.0.1:9380")]
    pub listen: String,
    #[clap(long, value_name = "SL_COOKIE_NAME", env = "SL_COOKIE_NAME", default_value = DEFAULT_COOKIE_NAME)]
    pub cookie_name: String,
    /// Seconds of inactivity before a session expires; 0 disables expiry
    #[clap(long, env = "SL_SESSION_LIFETIME", default_value_t = DEFAULT_SESSION_LIFETIME)]
    pub session_lifetime: i64,
    #[clap(long, env = "SL_SESSION_LOOKUP_TIMEOUT_MS", default_value_t = 2000)]
    pub session_lookup_timeout_ms: u64,
    /// Replaces the default route policy
    #[clap(long, env = "SL_POLICY_FILE")]
    pub policy_file: Option<PathBuf>,
    #[clap(long, env = "SL_LOGIN_PATH", default_value = "/login")]
    pub login_path: String,
    #[clap(long, env = "SL_HOME_PATH", default_value = "/dashboard")]
    pub home_path: String,
    /// Answer requests lacking the required role with 403 rather than
    /// a redirect to the home path
    #[clap(long, env = "SL_FORBIDDEN_STATUS")]
    pub forbidden_status: bool,
    #[clap(long, env = "SL_SECURE_COOKIE")]
    pub secure_cookie: bool,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Host configuration for the responses produced by the app.
#[derive(Clone, Debug)]
pub struct Config {
    pub login_path: String,
    pub home_path: String,
    pub forbidden_status: bool,
    pub secure_cookie: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            home_path: "/dashboard".to_string(),
            forbidden_status: false,
            secure_cookie: false,
        }
    }
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            login_path: self.login_path.clone(),
            home_path: self.home_path.clone(),
            forbidden_status: self.forbidden_status,
            secure_cookie: self.secure_cookie,
        }
    }

    pub fn session_lifetime(&self) -> Option<i64> {
        (self.session_lifetime > 0).then_some(self.session_lifetime)
    }

    pub fn session_lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.session_lookup_timeout_ms)
    }

    pub fn policy(&self) -> anyhow::Result<PolicyTable> {
        Ok(match &self.policy_file {
            Some(path) => {
                log::info!("loading route policy from {}", path.display());
                PolicyBuilder::default()
                    .policy(fs::read_to_string(path)?)
                    .build()?
            }
            None => PolicyBuilder::new().build()?,
        })
    }
}
