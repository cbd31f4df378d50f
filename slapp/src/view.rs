//! Minimal HTML rendering; every interpolated value is escaped.

use axum::response::Html;
use html_escape::{
    encode_double_quoted_attribute as attr,
    encode_text as text,
};
use slac::user::User;
use slcore::ac::{
    role::{
        Role,
        Roles,
    },
    session::Session,
    user,
};

pub fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n\
        <html><head><meta charset=\"utf-8\"><title>{} - Snowlight</title></head>\n\
        <body>\n{body}\n</body></html>\n",
        text(title),
    ))
}

pub fn paragraph(s: &str) -> String {
    format!("<p>{}</p>", text(s))
}

pub fn index() -> Html<String> {
    page("Snowlight", "\
        <h1>Snowlight</h1>\n\
        <p><a href=\"/login\">Log in</a></p>")
}

pub fn login_form(message: Option<&str>) -> Html<String> {
    let message = message
        .map(paragraph)
        .unwrap_or_default();
    page("Log in", &format!("\
        <h1>Log in</h1>\n{message}\n\
        <form method=\"post\" action=\"/login\">\n\
        <label>Login <input name=\"login\" type=\"text\"></label>\n\
        <label>Password <input name=\"password\" type=\"password\"></label>\n\
        <button type=\"submit\">Log in</button>\n\
        </form>"))
}

pub fn logged_out() -> Html<String> {
    page("Logged out", "\
        <h1>Logged out</h1>\n\
        <p>You have been logged out. <a href=\"/login\">Log in again</a></p>")
}

fn logout_form() -> &'static str {
    "<form method=\"post\" action=\"/logout\"><button type=\"submit\">Log out</button></form>"
}

pub fn dashboard(user: &User) -> Html<String> {
    let mut links = vec!["<li><a href=\"/dashboard/sessions\">Sessions</a></li>"];
    if user.satisfies(Role::Artist.into()) {
        links.push("<li><a href=\"/dashboard/artist\">Artist tools</a></li>");
    }
    if user.satisfies(Roles::from(Role::Admin) | Role::SuperAdmin | Role::Moderator) {
        links.push("<li><a href=\"/admin\">Admin console</a></li>");
    }
    page("Dashboard", &format!(
        "<h1>Welcome, {}</h1>\n<p>Role: {}</p>\n<ul>{}</ul>\n{}",
        text(user.name()),
        user.role(),
        links.join(""),
        logout_form(),
    ))
}

pub fn artist(user: &User) -> Html<String> {
    page("Artist tools", &format!(
        "<h1>Artist tools</h1>\n<p>Signed in as {}</p>",
        text(user.username()),
    ))
}

pub fn sessions(sessions: &[Session]) -> Html<String> {
    let rows = sessions.iter()
        .map(|session| format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            text(&session.origin),
            session.created_ts,
            session.last_active_ts,
        ))
        .collect::<Vec<_>>()
        .join("\n");
    page("Sessions", &format!("\
        <h1>Sessions</h1>\n\
        <table>\n<tr><th>Origin</th><th>Created</th><th>Last active</th></tr>\n\
        {rows}\n</table>"))
}

pub fn admin_index(users: &[user::User]) -> Html<String> {
    let rows = users.iter()
        .map(|user| format!(
            "<tr><td><a href=\"/admin/users/{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>",
            user.id,
            text(&user.username),
            text(&user.name),
            user.role,
            user.is_admin,
        ))
        .collect::<Vec<_>>()
        .join("\n");
    page("Admin console", &format!("\
        <h1>Admin console</h1>\n\
        <table>\n<tr><th>Login</th><th>Name</th><th>Role</th><th>Admin</th></tr>\n\
        {rows}\n</table>"))
}

pub fn admin_user(user: &user::User) -> Html<String> {
    let options = [
        Role::User,
        Role::Artist,
        Role::Moderator,
        Role::Admin,
        Role::SuperAdmin,
    ]
        .into_iter()
        .map(|role| format!(
            "<option value=\"{role}\"{}>{role}</option>",
            if role == user.role { " selected" } else { "" },
        ))
        .collect::<Vec<_>>()
        .join("");
    page(&user.username, &format!("\
        <h1>{}</h1>\n\
        <p>Name: {}</p>\n\
        <form method=\"post\" action=\"{}\">\n\
        <select name=\"role\">{options}</select>\n\
        <label><input type=\"checkbox\" name=\"is_admin\" value=\"true\"{}> Admin</label>\n\
        <button type=\"submit\">Update</button>\n\
        </form>",
        text(&user.username),
        text(&user.name),
        attr(&format!("/admin/users/{}/role", user.id)),
        if user.is_admin { " checked" } else { "" },
    ))
}
