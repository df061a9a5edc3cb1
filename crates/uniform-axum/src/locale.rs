/// Locale requested by the caller
///
/// Checks, in strict priority order: the `locale` query parameter, the
/// `locale` header, then a `locale` cookie. First non-empty value
/// wins; an empty string means no preference was expressed.
#[must_use]
pub fn resolve_locale<B>(request: &http::Request<B>) -> String {
    if let Some(query) = request.uri().query() {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key == "locale" && !value.is_empty() {
                return value.into_owned();
            }
        }
    }

    if let Some(value) = request.headers().get("locale").and_then(|v| v.to_str().ok())
        && !value.is_empty()
    {
        return value.to_owned();
    }

    for header in request.headers().get_all(http::header::COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, value)) = pair.split_once('=')
                && name.trim() == "locale"
                && !value.trim().is_empty()
            {
                return value.trim().to_owned();
            }
        }
    }

    String::new()
}
