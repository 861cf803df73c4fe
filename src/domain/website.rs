use itertools::Itertools;

/// Raw text longer than this gets cut down to `TRUNCATED_TEXT_LEN`.
pub const MAX_WEBSITE_TEXT_LEN: usize = 25_000;
pub const TRUNCATED_TEXT_LEN: usize = 20_000;

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Splits a leading `http://` or `https://`, in any letter case, from the rest.
pub fn split_scheme(website: &str) -> (Option<&str>, &str) {
    for scheme in SCHEMES {
        match website.get(..scheme.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(scheme) => {
                return (Some(prefix), &website[scheme.len()..]);
            }
            _ => {}
        }
    }

    (None, website)
}

pub fn has_scheme(website: &str) -> bool {
    split_scheme(website).0.is_some()
}

/// Comparison key for a website: scheme and path removed, lowercased.
/// `www.` is kept on purpose, `www.acme.com` and `acme.com` are different keys.
pub fn clean_website(website: &str) -> Option<String> {
    if website.is_empty() {
        return None;
    }

    let (_, rest) = split_scheme(website);
    let host = rest.split('/').next().unwrap_or_default();

    Some(host.to_lowercase())
}

pub fn websites_match(declared: Option<&str>, input: &str) -> bool {
    match (declared.and_then(clean_website), clean_website(input)) {
        (Some(declared), Some(input)) => declared == input,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrl {
    /// Lowercased scheme including the trailing colon (`https:`).
    pub scheme: String,
    pub host: String,
}

impl SiteUrl {
    /// Prefixes `https://` when no scheme is present and drops everything after the host.
    pub fn parse(raw: &str) -> Option<Self> {
        let (scheme, rest) = split_scheme(raw.trim());
        let scheme = match scheme {
            Some(scheme) => scheme.trim_end_matches('/').to_lowercase(),
            None => "https:".to_string(),
        };

        match rest.split('/').next() {
            Some(host) if !host.is_empty() => Some(SiteUrl {
                scheme,
                host: host.to_string(),
            }),
            _ => None,
        }
    }

    pub fn url(&self) -> String {
        format!("{}//{}", self.scheme, self.host)
    }

    pub fn flipped(&self) -> Option<SiteUrl> {
        let scheme = match self.scheme.as_str() {
            "http:" => "https:",
            "https:" => "http:",
            _ => return None,
        };

        Some(SiteUrl {
            scheme: scheme.to_string(),
            host: self.host.clone(),
        })
    }
}

pub fn truncate_website_text(text: String) -> String {
    match text.chars().count() > MAX_WEBSITE_TEXT_LEN {
        true => text.chars().take(TRUNCATED_TEXT_LEN).collect(),
        false => text,
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    let leading = text.starts_with(char::is_whitespace);
    let trailing = text.ends_with(char::is_whitespace);
    let body = text.split_whitespace().join(" ");

    match (body.is_empty(), leading, trailing) {
        (true, _, _) if !text.is_empty() => " ".to_string(),
        (true, _, _) => String::new(),
        (false, true, true) => format!(" {} ", body),
        (false, true, false) => format!(" {}", body),
        (false, false, true) => format!("{} ", body),
        (false, false, false) => body,
    }
}
