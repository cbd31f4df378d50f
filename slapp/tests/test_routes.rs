use axum::{
    Router,
    body::{
        Body,
        to_bytes,
    },
    response::Response,
};
use http::{
    Method,
    Request,
    StatusCode,
    header::{
        CONTENT_TYPE,
        COOKIE,
        LOCATION,
        SET_COOKIE,
    },
};
use slac::{
    authorizer::Builder as AuthorizerBuilder,
    platform::{
        Builder as PlatformBuilder,
        Platform,
    },
};
use slapp::{
    AppState,
    conf::Config,
    router,
};
use slcore::{
    ac::{
        role::Role,
        session::{Session, SessionToken},
        traits::SessionBackend,
    },
    platform::ACPlatform,
};
use std::{
    str::FromStr,
    sync::Arc,
};
use test_sl::model::create_sqlite_backend;
use tower::ServiceExt;

struct Fixture {
    app: Router,
    platform: Platform,
    backend: Arc<dyn ACPlatform>,
}

async fn setup(config: Config) -> anyhow::Result<Fixture> {
    let backend: Arc<dyn ACPlatform> = Arc::new(create_sqlite_backend().await?);
    let platform = PlatformBuilder::new()
        .shared_ac_platform(backend.clone())
        .password_autopurge(true)
        .build()?;
    let authorizer = AuthorizerBuilder::new()
        .platform(platform.clone())
        .build()?;
    Ok(Fixture {
        app: router(AppState::new(authorizer, config)),
        platform,
        backend,
    })
}

/// Create a user with the password "password"; returns the user id.
async fn add_user(
    platform: &Platform,
    username: &str,
    role: Role,
    is_admin: bool,
) -> anyhow::Result<i64> {
    let user = platform.create_user(username, username).await?;
    platform.set_user_role(user.id(), role).await?;
    platform.set_user_admin(user.id(), is_admin).await?;
    user.reset_password("password", "password").await?;
    Ok(user.id())
}

/// Log the user in directly against the platform; returns the cookie.
async fn login_cookie(platform: &Platform, username: &str) -> anyhow::Result<String> {
    let session = platform.authenticate_user_login(
        username,
        "password",
        "127.0.0.1".to_string(),
    ).await?;
    Ok(format!("auth_token={}", session.token()))
}

async fn send(
    app: &Router,
    method: Method,
    path: &str,
    cookie: Option<&str>,
    form: Option<&[(&str, &str)]>,
) -> anyhow::Result<Response> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(serde_urlencoded::to_string(form)?)
        }
        None => Body::empty(),
    };
    Ok(app.clone().oneshot(builder.body(body)?).await?)
}

async fn get(app: &Router, path: &str, cookie: Option<&str>) -> anyhow::Result<Response> {
    send(app, Method::GET, path, cookie, None).await
}

fn location(response: &Response) -> Option<&str> {
    response.headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

async fn body(response: Response) -> anyhow::Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

#[tokio::test]
async fn no_cookie_to_login() -> anyhow::Result<()> {
    let fixture = setup(Config::default()).await?;
    for path in ["/admin", "/admin/users/1", "/dashboard", "/dashboard/sessions"] {
        let response = get(&fixture.app, path, None).await?;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/login"));
    }
    Ok(())
}

#[tokio::test]
async fn user_on_admin_route_to_home() -> anyhow::Result<()> {
    let fixture = setup(Config::default()).await?;
    add_user(&fixture.platform, "ningning", Role::User, false).await?;
    let cookie = login_cookie(&fixture.platform, "ningning").await?;

    let response = get(&fixture.app, "/admin", Some(&cookie)).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));

    let response = get(&fixture.app, "/dashboard/artist", Some(&cookie)).await?;
    assert_eq!(location(&response), Some("/dashboard"));

    let response = get(&fixture.app, "/dashboard", Some(&cookie)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body(response).await?.contains("Welcome, ningning"));
    Ok(())
}

#[tokio::test]
async fn insufficient_role_forbidden_status() -> anyhow::Result<()> {
    let fixture = setup(Config {
        forbidden_status: true,
        ..Default::default()
    }).await?;
    add_user(&fixture.platform, "ningning", Role::Artist, false).await?;
    let cookie = login_cookie(&fixture.platform, "ningning").await?;

    let response = get(&fixture.app, "/admin", Some(&cookie)).await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = get(&fixture.app, "/dashboard/artist", Some(&cookie)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    // login class denials still redirect
    let response = get(&fixture.app, "/admin", None).await?;
    assert_eq!(location(&response), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn super_admin_allowed() -> anyhow::Result<()> {
    let fixture = setup(Config::default()).await?;
    add_user(&fixture.platform, "karina", Role::SuperAdmin, true).await?;
    let cookie = login_cookie(&fixture.platform, "karina").await?;

    let response = get(&fixture.app, "/admin", Some(&cookie)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body(response).await?.contains("karina"));

    // the credential among other cookies
    let response = send(
        &fixture.app,
        Method::GET,
        "/dashboard/artist",
        Some(&format!("theme=dark; {cookie}; lang=en")),
        None,
    ).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn unknown_or_expired_token_to_login() -> anyhow::Result<()> {
    let fixture = setup(Config::default()).await?;
    let response = get(&fixture.app, "/dashboard", Some("auth_token=nosuchtoken")).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));

    let user_id = add_user(&fixture.platform, "giselle", Role::Admin, false).await?;
    fixture.backend.save_session(&Session {
        token: SessionToken::from_str("expiredtoken")?,
        user_id,
        origin: "localhost".to_string(),
        created_ts: 0,
        last_active_ts: 0,
    }).await?;
    let response = get(&fixture.app, "/admin", Some("auth_token=expiredtoken")).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn public_routes() -> anyhow::Result<()> {
    let fixture = setup(Config::default()).await?;
    for path in ["/", "/login", "/logged_out"] {
        let response = get(&fixture.app, path, None).await?;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
    let response = get(&fixture.app, "/no/such/page", None).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn login_logout() -> anyhow::Result<()> {
    let fixture = setup(Config::default()).await?;
    add_user(&fixture.platform, "winter", Role::User, false).await?;

    let response = send(
        &fixture.app,
        Method::POST,
        "/login",
        None,
        Some(&[("login", "winter"), ("password", "wrong")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());

    let response = send(
        &fixture.app,
        Method::POST,
        "/login",
        None,
        Some(&[("login", "nobody"), ("password", "password")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &fixture.app,
        Method::POST,
        "/login",
        None,
        Some(&[("login", "winter"), ("password", "password")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));
    let set_cookie = response.headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .expect("a session cookie");
    assert!(set_cookie.starts_with("auth_token="));
    assert!(set_cookie.contains("; HttpOnly; SameSite=Lax; Path=/; Max-Age=86400"));
    assert!(!set_cookie.contains("Secure"));
    let cookie = set_cookie.split(';')
        .next()
        .expect("the cookie pair")
        .to_string();

    let response = get(&fixture.app, "/dashboard/sessions", Some(&cookie)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body(response).await?.contains("<td>unknown</td>"));

    let response = send(&fixture.app, Method::POST, "/logout", Some(&cookie), None).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/logged_out"));
    let cleared = response.headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .expect("a cleared cookie");
    assert!(cleared.starts_with("auth_token=;"));
    assert!(cleared.contains("Max-Age=0"));

    // the session is gone
    let response = get(&fixture.app, "/dashboard", Some(&cookie)).await?;
    assert_eq!(location(&response), Some("/login"));

    // logging out without a session still clears the cookie
    let response = send(&fixture.app, Method::POST, "/logout", None, None).await?;
    assert_eq!(location(&response), Some("/logged_out"));
    assert!(response.headers().get(SET_COOKIE).is_some());
    Ok(())
}

#[tokio::test]
async fn admin_role_change() -> anyhow::Result<()> {
    let fixture = setup(Config::default()).await?;
    let target = add_user(&fixture.platform, "ningning", Role::User, false).await?;
    add_user(&fixture.platform, "giselle", Role::Admin, false).await?;
    add_user(&fixture.platform, "winter", Role::Moderator, false).await?;
    add_user(&fixture.platform, "karina", Role::SuperAdmin, false).await?;
    let admin = login_cookie(&fixture.platform, "giselle").await?;
    let moderator = login_cookie(&fixture.platform, "winter").await?;
    let super_admin = login_cookie(&fixture.platform, "karina").await?;
    let path = format!("/admin/users/{target}/role");

    // moderators may look but not change
    let response = get(&fixture.app, &format!("/admin/users/{target}"), Some(&moderator)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(
        &fixture.app, Method::POST, &path, Some(&moderator),
        Some(&[("role", "ARTIST")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &fixture.app, Method::POST, &path, Some(&admin),
        Some(&[("role", "OWNER")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &fixture.app, Method::POST, &path, Some(&admin),
        Some(&[("role", "ARTIST")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some(format!("/admin/users/{target}").as_str()));
    let user = fixture.platform.get_user(target).await?.expect("user exists");
    assert_eq!(user.role(), Role::Artist);

    // admins cannot escalate to super admin or grant the admin flag
    let response = send(
        &fixture.app, Method::POST, &path, Some(&admin),
        Some(&[("role", "SUPER_ADMIN")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = send(
        &fixture.app, Method::POST, &path, Some(&admin),
        Some(&[("role", "ARTIST"), ("is_admin", "true")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &fixture.app, Method::POST, &path, Some(&super_admin),
        Some(&[("role", "SUPER_ADMIN"), ("is_admin", "true")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let user = fixture.platform.get_user(target).await?.expect("user exists");
    assert_eq!(user.role(), Role::SuperAdmin);
    assert!(user.is_admin());

    let response = send(
        &fixture.app, Method::POST, "/admin/users/999/role", Some(&super_admin),
        Some(&[("role", "USER")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn admin_flag_holder_protected() -> anyhow::Result<()> {
    let fixture = setup(Config::default()).await?;
    let target = add_user(&fixture.platform, "aeri", Role::User, true).await?;
    add_user(&fixture.platform, "giselle", Role::Admin, false).await?;
    add_user(&fixture.platform, "karina", Role::SuperAdmin, false).await?;
    let admin = login_cookie(&fixture.platform, "giselle").await?;
    let super_admin = login_cookie(&fixture.platform, "karina").await?;
    let path = format!("/admin/users/{target}/role");

    // the flag itself is left as is, yet the holder is off limits
    let response = send(
        &fixture.app, Method::POST, &path, Some(&admin),
        Some(&[("role", "ARTIST"), ("is_admin", "true")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let user = fixture.platform.get_user(target).await?.expect("user exists");
    assert_eq!(user.role(), Role::User);

    let response = send(
        &fixture.app, Method::POST, &path, Some(&super_admin),
        Some(&[("role", "ARTIST"), ("is_admin", "true")]),
    ).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let user = fixture.platform.get_user(target).await?.expect("user exists");
    assert_eq!(user.role(), Role::Artist);
    assert!(user.is_admin());
    Ok(())
}

#[tokio::test]
async fn activity_extends_session() -> anyhow::Result<()> {
    let fixture = setup(Config::default()).await?;
    let user_id = add_user(&fixture.platform, "ningning", Role::User, false).await?;
    let token = SessionToken::from_str("activetoken")?;
    let now = chrono::Utc::now().timestamp();
    // close to the end of the default 86400 second lifetime
    let stale = now - 86000;
    fixture.backend.save_session(&Session {
        token: token.clone(),
        user_id,
        origin: "localhost".to_string(),
        created_ts: stale,
        last_active_ts: stale,
    }).await?;

    let response = get(&fixture.app, "/dashboard", Some("auth_token=activetoken")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = response.headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .expect("a refreshed cookie");
    assert!(refreshed.starts_with("auth_token=activetoken;"));
    assert!(refreshed.contains("Max-Age=86400"));

    let stored = fixture.backend.load_session(&token).await?
        .expect("session still stored");
    assert!(stored.last_active_ts >= now);
    assert_eq!(stored.created_ts, stale);
    // the session is good for another full lifetime past its creation
    assert!(!stored.is_expired(stale + 86400 + 600, Some(86400)));

    // recently recorded activity is not written again
    let response = get(&fixture.app, "/dashboard", Some("auth_token=activetoken")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    Ok(())
}

#[tokio::test]
async fn logout_purges_expired_session() -> anyhow::Result<()> {
    let fixture = setup(Config::default()).await?;
    let user_id = add_user(&fixture.platform, "winter", Role::User, false).await?;
    let token = SessionToken::from_str("expiredtoken")?;
    fixture.backend.save_session(&Session {
        token: token.clone(),
        user_id,
        origin: "localhost".to_string(),
        created_ts: 0,
        last_active_ts: 0,
    }).await?;

    let response = send(
        &fixture.app, Method::POST, "/logout", Some("auth_token=expiredtoken"), None,
    ).await?;
    assert_eq!(location(&response), Some("/logged_out"));
    assert!(fixture.backend.load_session(&token).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn cookie_across_headers() -> anyhow::Result<()> {
    let fixture = setup(Config::default()).await?;
    add_user(&fixture.platform, "karina", Role::Artist, false).await?;
    let cookie = login_cookie(&fixture.platform, "karina").await?;
    let request = Request::builder()
        .uri("/dashboard/artist")
        .header(COOKIE, "theme=dark")
        .header(COOKIE, cookie)
        .body(Body::empty())?;
    let response = fixture.app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}
