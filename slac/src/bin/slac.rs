use clap::{
    Parser,
    Subcommand,
};
use slac::{
    authorize,
    password::Password,
    platform::Builder as PlatformBuilder,
    Platform,
};
use slcore::ac::{
    agent::Agent,
    role::Role,
    user,
};
use sldb::Backend;
use slrbac::Builder as PolicyBuilder;
use std::path::PathBuf;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(long, value_name = "SLAC_DB_URL", env = "SLAC_DB_URL")]
    slac_db_url: String,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(arg_required_else_help = true)]
    User {
        #[command(subcommand)]
        cmd: UserCmd,
    },
    #[command(arg_required_else_help = true)]
    Session {
        #[command(subcommand)]
        cmd: SessionCmd,
    },
    #[command(arg_required_else_help = true)]
    Policy {
        #[command(subcommand)]
        cmd: PolicyCmd,
    },
}

#[derive(Debug, Subcommand)]
enum UserCmd {
    #[command(arg_required_else_help = true)]
    Create {
        login: String,
        /// The display name; defaults to the login
        #[arg(long)]
        name: Option<String>,
    },
    #[command(arg_required_else_help = true)]
    Status {
        login: String,
    },
    #[command(arg_required_else_help = true)]
    Password {
        login: String,
        #[command(subcommand)]
        cmd: PasswordCmd,
    },
    #[command(arg_required_else_help = true)]
    Role {
        login: String,
        #[arg(value_enum)]
        role: Role,
    },
    #[command(arg_required_else_help = true)]
    Admin {
        login: String,
        #[arg(action = clap::ArgAction::Set)]
        is_admin: bool,
    },
    List,
}

#[derive(Debug, Subcommand)]
enum PasswordCmd {
    /// Reports the status of the password
    Check,
    /// Force a password reset
    Reset,
    /// Restrict the user account
    Restrict,
    #[command(arg_required_else_help = true)]
    /// Sets the password for the user
    Set {
        password: String,
    },
}

#[derive(Debug, Subcommand)]
enum SessionCmd {
    /// List the sessions of the user
    #[command(arg_required_else_help = true)]
    List {
        login: String,
    },
    /// Logout every session of the user
    #[command(arg_required_else_help = true)]
    Purge {
        login: String,
    },
}

#[derive(Debug, Subcommand)]
enum PolicyCmd {
    /// Show the roles required for a path, and whether the user may
    /// access it
    #[command(arg_required_else_help = true)]
    Check {
        path: String,
        #[arg(long)]
        user: Option<String>,
        #[arg(long, env = "SL_POLICY_FILE")]
        policy_file: Option<PathBuf>,
    },
    /// Print the effective policy
    Show {
        #[arg(long, env = "SL_POLICY_FILE")]
        policy_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("slac")
        .module("sldb")
        .module("slrbac")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let platform = PlatformBuilder::new()
        .shared_ac_platform(
            Backend::ac(args.slac_db_url)
                .await
                .map_err(anyhow::Error::from_boxed)?
        )
        .password_autopurge(true)
        .build()?;

    match args.command {
        Commands::User { cmd } => {
            parse_user(&platform, cmd).await?;
        },
        Commands::Session { cmd } => {
            parse_session(&platform, cmd).await?;
        },
        Commands::Policy { cmd } => {
            parse_policy(&platform, cmd).await?;
        },
    }

    Ok(())
}

async fn parse_user(
    platform: &Platform,
    arg: UserCmd,
) -> anyhow::Result<()> {
    match arg {
        UserCmd::Create { login, name } => {
            let name = name.unwrap_or_else(|| login.clone());
            let user = platform.create_user(&login, &name).await?;
            let id = user.id();
            println!("user {login:?} created with id {id}");
        }
        UserCmd::Status { login } => {
            let (user, status) = platform.login_status(&login).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
            println!("password status: {status}");
        }
        UserCmd::Password { login, cmd } => {
            parse_password(platform, login, cmd).await?
        }
        UserCmd::Role { login, role } => {
            let (user, _) = platform.login_status(&login).await?;
            platform.set_user_role(user.id, role).await?;
            println!("role of {login} set to {role}");
        }
        UserCmd::Admin { login, is_admin } => {
            let (user, _) = platform.login_status(&login).await?;
            platform.set_user_admin(user.id, is_admin).await?;
            println!("admin flag of {login} set to {is_admin}");
        }
        UserCmd::List => {
            for user in platform.list_users().await?.into_iter() {
                let admin = if user.is_admin { " (admin)" } else { "" };
                println!("{}\t{}\t{}{admin}", user.id, user.username, user.role);
            }
        }
    }
    Ok(())
}

async fn parse_password(
    platform: &Platform,
    login: String,
    arg: PasswordCmd,
) -> anyhow::Result<()> {
    match arg {
        PasswordCmd::Check => {
            let (_, status) = platform.login_status(&login).await?;
            println!("user's password status: {status}");
        }
        PasswordCmd::Reset => {
            let (user, _) = platform.login_status(&login).await?;
            platform.force_user_id_password(user.id, Password::Reset).await?;
            println!("forced password reset for {login} on their next login");
        }
        PasswordCmd::Restrict => {
            let (user, _) = platform.login_status(&login).await?;
            platform.force_user_id_password(user.id, Password::Restricted).await?;
            platform.logout_user(user.id).await?;
            println!("restricted account for {login}");
        }
        PasswordCmd::Set { password } => {
            let (user, _) = platform.login_status(&login).await?;
            platform.force_user_id_password(user.id, Password::new(&password)).await?;
            println!("updated password for user {login}");
        }
    }
    Ok(())
}

async fn parse_session(
    platform: &Platform,
    arg: SessionCmd,
) -> anyhow::Result<()> {
    match arg {
        SessionCmd::List { login } => {
            let (user, _) = platform.login_status(&login).await?;
            let sessions = platform.get_user_sessions(user.id).await?;
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
        SessionCmd::Purge { login } => {
            let (user, _) = platform.login_status(&login).await?;
            platform.logout_user(user.id).await?;
            println!("logged out every session for {login}");
        }
    }
    Ok(())
}

fn load_policy(policy_file: Option<PathBuf>) -> anyhow::Result<slrbac::PolicyTable> {
    Ok(match policy_file {
        Some(path) => PolicyBuilder::default()
            .policy(std::fs::read_to_string(&path)?)
            .build()?,
        None => PolicyBuilder::new().build()?,
    })
}

async fn parse_policy(
    platform: &Platform,
    arg: PolicyCmd,
) -> anyhow::Result<()> {
    match arg {
        PolicyCmd::Check { path, user, policy_file } => {
            let table = load_policy(policy_file)?;
            let Some(rule) = table.find(&path) else {
                println!("{path} is public");
                return Ok(());
            };
            if rule.roles.is_empty() {
                println!("{path} requires any authenticated user (rule: {rule})");
            } else {
                println!("{path} requires one of [{}] (rule: {rule})", rule.roles);
            }
            let agent = match user {
                Some(login) => platform.get_user_by_name(&login).await?
                    .map(user::User::from)
                    .map(Agent::from)
                    .ok_or_else(|| anyhow::anyhow!("unknown user {login:?}"))?,
                None => Agent::Anonymous,
            };
            match authorize(agent.user(), rule.roles) {
                Ok(_) => println!("{agent} is permitted"),
                Err(denial) => println!("{agent} is not permitted: {denial}"),
            }
        }
        PolicyCmd::Show { policy_file } => {
            print!("{}", load_policy(policy_file)?);
        }
    }
    Ok(())
}
