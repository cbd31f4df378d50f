use clap::Parser;
use slac::{
    authorizer::Builder as AuthorizerBuilder,
    platform::Builder as PlatformBuilder,
};
use slapp::{
    AppState,
    conf::Cli,
    router,
};
use sldb::Backend;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    stderrlog::new()
        .module(module_path!())
        .module("slac")
        .module("sldb")
        .module("sldb_sqlite")
        .module("slrbac")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let platform = PlatformBuilder::new()
        .shared_ac_platform(
            Backend::ac(&args.slac_db_url)
                .await
                .map_err(anyhow::Error::from_boxed)?
        )
        .password_autopurge(true)
        .session_lifetime(args.session_lifetime())
        .build()?;
    let authorizer = AuthorizerBuilder::new()
        .platform(platform)
        .cookie_name(&args.cookie_name)
        .lookup_timeout(args.session_lookup_timeout())
        .policy(args.policy()?)
        .build()?;
    log::debug!("route policy:\n{}", authorizer.policy());

    let app = router(AppState::new(authorizer, args.config()));

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    log::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}
