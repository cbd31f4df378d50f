use std::fmt::{
    Display,
    Formatter,
    Result,
};
use super::Agent;

impl Display for Agent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Agent::Anonymous => write!(f, "anonymous"),
            Agent::User(user) => write!(f, "{}({}, {})", user.username, user.id, user.role),
        }
    }
}
