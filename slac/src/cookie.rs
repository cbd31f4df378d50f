//! Cookie header handling for the session credential.

/// Return the value of the first cookie named `name` in a `Cookie`
/// header.
///
/// Pairs are separated by `;` and split at the first `=`, so the value
/// retains any further `=` characters.  Pairs without `=` are skipped.
pub fn extract_credential<'a>(header: Option<&'a str>, name: &str) -> Option<&'a str> {
    header?
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}

/// The `Set-Cookie` value issuing the session credential.
pub fn issue(name: &str, value: &str, max_age: Option<i64>, secure: bool) -> String {
    let mut result = format!("{name}={value}; HttpOnly; SameSite=Lax; Path=/");
    if let Some(max_age) = max_age {
        result.push_str(&format!("; Max-Age={max_age}"));
    }
    if secure {
        result.push_str("; Secure");
    }
    result
}

/// The `Set-Cookie` value clearing the session credential.
pub fn clear(name: &str, secure: bool) -> String {
    issue(name, "", Some(0), secure)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extract() {
        let name = "auth_token";
        assert_eq!(extract_credential(None, name), None);
        assert_eq!(extract_credential(Some(""), name), None);
        assert_eq!(extract_credential(Some("   "), name), None);
        assert_eq!(extract_credential(Some("auth_token=validtoken123"), name), Some("validtoken123"));
        assert_eq!(
            extract_credential(Some("auth_token=abc=123; other=x"), name),
            Some("abc=123"),
        );
        assert_eq!(
            extract_credential(Some("theme=dark;  auth_token=validtoken123 ;lang=en"), name),
            Some("validtoken123"),
        );
        // the first matching pair wins
        assert_eq!(
            extract_credential(Some("auth_token=first; auth_token=second"), name),
            Some("first"),
        );
        // names must match exactly
        assert_eq!(extract_credential(Some("xauth_token=nope; auth_tokenx=no"), name), None);
        // pairs without `=` are skipped
        assert_eq!(extract_credential(Some("auth_token; auth_token=ok"), name), Some("ok"));
        assert_eq!(extract_credential(Some("garbage;;;="), name), None);
        assert_eq!(extract_credential(Some("auth_token="), name), Some(""));
    }

    #[test]
    fn set_cookie() {
        assert_eq!(
            issue("auth_token", "abc", None, false),
            "auth_token=abc; HttpOnly; SameSite=Lax; Path=/",
        );
        assert_eq!(
            issue("auth_token", "abc", Some(86400), true),
            "auth_token=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=86400; Secure",
        );
        assert_eq!(
            clear("auth_token", false),
            "auth_token=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        );
    }
}
