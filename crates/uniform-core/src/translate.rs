/// Locale-aware message lookup
///
/// Called once per error per request with the caller's locale and the
/// message template as the lookup key. Implementations are expected to
/// be pure; an empty locale means the caller expressed no preference.
pub trait Translate: Send + Sync {
    /// Look up the localized variant of `key` for `locale`
    fn translate(&self, locale: &str, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn translate(&self, locale: &str, key: &str) -> String {
        self(locale, key)
    }
}

/// Identity translator: echoes the key and ignores the locale
///
/// The default when no catalog is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoTranslator;

impl Translate for EchoTranslator {
    fn translate(&self, _locale: &str, key: &str) -> String {
        key.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_returns_the_key() {
        assert_eq!(EchoTranslator.translate("zh", "foo"), "foo");
        assert_eq!(EchoTranslator.translate("", "foo"), "foo");
    }

    #[test]
    fn closures_satisfy_the_hook() {
        let catalog = |locale: &str, key: &str| format!("{locale}:{key}");
        let translator: &dyn Translate = &catalog;
        assert_eq!(translator.translate("zh", "foo"), "zh:foo");
    }
}
