use super::QueryParams;

pub const SCHEME: &str = "m9s";
const AUTHORITY: &str = "mail";
const PATH: &str = "/server";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    InvalidScheme,
    InvalidAuthority,
    UnsupportedRoute,
}

impl LinkError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidScheme => "invalid scheme",
            Self::InvalidAuthority => "invalid authority",
            Self::UnsupportedRoute => "unsupported route",
        }
    }
}

impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accepts `m9s://mail/server?...` or a bare query string (`?a=b` / `a=b`).
pub fn parse_link(input: &str) -> Result<QueryParams, LinkError> {
    let input = input.trim();
    let Some((scheme, rest)) = input.split_once("://") else {
        return Ok(QueryParams::parse(input));
    };
    if scheme != SCHEME {
        return Err(LinkError::InvalidScheme);
    }

    let (authority, path_and_query) = match rest.split_once('/') {
        Some((auth, remainder)) => (auth, format!("/{}", remainder)),
        None => (rest, String::from("/")),
    };
    if authority != AUTHORITY {
        return Err(LinkError::InvalidAuthority);
    }

    let (path, query) = match path_and_query.split_once('?') {
        Some((p, q)) => (p, q),
        None => (path_and_query.as_str(), ""),
    };
    if path.trim_end_matches('/') != PATH {
        return Err(LinkError::UnsupportedRoute);
    }

    Ok(QueryParams::parse(query))
}

pub fn format_link(params: &QueryParams) -> String {
    let query = params.to_query_string();
    if query.is_empty() {
        format!("{}://{}{}", SCHEME, AUTHORITY, PATH)
    } else {
        format!("{}://{}{}?{}", SCHEME, AUTHORITY, PATH, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::ParamValue;

    #[test]
    fn roundtrip_link_with_filters() {
        let mut params = QueryParams::new();
        params.insert("start", ParamValue::Int(0));
        params.insert("length", ParamValue::Int(25));
        params.insert("subject", ParamValue::Text("Invoice #12".to_string()));

        let link = format_link(&params);
        assert_eq!(
            link,
            "m9s://mail/server?length=25&start=0&subject=Invoice+%2312"
        );
        let parsed = parse_link(&link).expect("parse link");
        assert_eq!(parsed.get_text("subject").as_deref(), Some("Invoice #12"));
        assert_eq!(parsed.get_text("length").as_deref(), Some("25"));
    }

    #[test]
    fn bare_query_strings_are_accepted() {
        let parsed = parse_link("?status=error&length=10").expect("parse query");
        assert_eq!(parsed.get_text("status").as_deref(), Some("error"));
        let parsed = parse_link("from=a%40b.c").expect("parse query");
        assert_eq!(parsed.get_text("from").as_deref(), Some("a@b.c"));
    }

    #[test]
    fn rejects_foreign_links() {
        assert_eq!(
            parse_link("https://example.com/mail/server"),
            Err(LinkError::InvalidScheme)
        );
        assert_eq!(
            parse_link("m9s://queue/server"),
            Err(LinkError::InvalidAuthority)
        );
        assert_eq!(
            parse_link("m9s://mail/queue?start=0"),
            Err(LinkError::UnsupportedRoute)
        );
    }

    #[test]
    fn empty_params_format_without_query() {
        assert_eq!(format_link(&QueryParams::new()), "m9s://mail/server");
        assert!(parse_link("m9s://mail/server").expect("parse").is_empty());
    }
}
