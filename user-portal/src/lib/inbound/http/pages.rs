//! Minimal HTML views.
//!
//! Every interpolated value goes through [`escape_html`].

use crate::domain::user::models::User;
use crate::inbound::http::router::LOGIN_PATH;
use crate::inbound::http::router::REGISTER_PATH;

pub fn login() -> String {
    layout(
        "Login",
        &format!(
            r#"<h1>Login</h1>
<form method="post" action="{LOGIN_PATH}">
  <label>Username <input name="username" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Login</button>
</form>
<p>No account yet? <a href="{REGISTER_PATH}">Register</a></p>"#
        ),
    )
}

pub fn register() -> String {
    layout(
        "Register",
        &format!(
            r#"<h1>Register</h1>
<form method="post" action="{REGISTER_PATH}">
  <label>Username <input name="username" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Register</button>
</form>
<p>Already registered? <a href="{LOGIN_PATH}">Login</a></p>"#
        ),
    )
}

pub fn home(username: &str, users: &[User]) -> String {
    let rows: String = users
        .iter()
        .map(|user| format!("  <li>{}</li>\n", escape_html(user.username.as_str())))
        .collect();

    layout(
        "Home",
        &format!(
            "<h1>Welcome, {}</h1>\n<h2>Registered users</h2>\n<ul>\n{}</ul>",
            escape_html(username),
            rows
        ),
    )
}

pub fn error(message: &str) -> String {
    layout(
        "Error",
        &format!(
            "<h1>Error</h1>\n<p>{}</p>\n<p><a href=\"{LOGIN_PATH}\">Back to login</a></p>",
            escape_html(message)
        ),
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
