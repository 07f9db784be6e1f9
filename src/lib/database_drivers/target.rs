use crate::config::JDBC_PREFIX;
use crate::error::{Error, Result};
use percent_encoding::percent_decode_str;
use url::{Host, Url};

const PASSWORD_MASK: &str = "***";

/// Database information extracted from a connection url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    /// Name of the database the operation is about
    pub database_name: String,
    /// jdbc url of the bootstrap database, used to run create/drop against
    pub administrative_url: String,
    pub host: String,
    /// Only set when the url carried an explicit port
    pub port: Option<u16>,
}

impl ConnectionTarget {
    /// The administrative url without the jdbc prefix, as the drivers expect it.
    pub fn connection_url(&self) -> &str {
        self.administrative_url
            .strip_prefix(JDBC_PREFIX)
            .unwrap_or(&self.administrative_url)
    }

    /// The administrative url with any password masked, for log lines.
    pub fn display_url(&self) -> String {
        redact_password(&self.administrative_url)
    }
}

/// Mask the password of the userinfo in `raw`, with or without the jdbc
/// prefix. Strings that do not parse as a url are masked textually.
pub fn redact_password(raw: &str) -> String {
    let (prefix, stripped) = match raw.strip_prefix(JDBC_PREFIX) {
        Some(s) => (JDBC_PREFIX, s),
        None => ("", raw),
    };

    if let Ok(mut url) = Url::parse(stripped) {
        if url.password().is_none() {
            return raw.to_string();
        }
        if url.set_password(Some(PASSWORD_MASK)).is_ok() {
            return format!("{}{}", prefix, url);
        }
    }

    let authority_start = match raw.find("://") {
        Some(i) => i + 3,
        None => return raw.to_string(),
    };
    let rest = &raw[authority_start..];
    let authority_end = rest
        .find(|c| c == '/' || c == '?' || c == '#')
        .unwrap_or(rest.len());

    match rest[..authority_end].rfind('@') {
        Some(at) => match rest[..at].find(':') {
            Some(colon) => format!(
                "{}{}:{}{}",
                &raw[..authority_start],
                &rest[..colon],
                PASSWORD_MASK,
                &rest[at..]
            ),
            None => raw.to_string(),
        },
        None => raw.to_string(),
    }
}

/// Split `url` into the target database name and a url pointing at
/// `bootstrap_database` on the same server.
pub fn parse(url: &Url, bootstrap_database: &str) -> Result<ConnectionTarget> {
    let host = match url.host() {
        Some(Host::Ipv6(addr)) => addr.to_string(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_string(),
        _ => return Err(Error::malformed_url(url.as_str(), "missing host")),
    };

    let path =
        decode_path(url.path()).map_err(|reason| Error::malformed_url(url.as_str(), reason))?;
    let database_name = path.strip_prefix('/').unwrap_or(&path).to_string();
    if database_name.is_empty() {
        return Err(Error::malformed_url(url.as_str(), "missing database name"));
    }

    let mut connect_url = url.clone();
    connect_url.set_path(&format!("/{}", bootstrap_database));

    Ok(ConnectionTarget {
        database_name,
        administrative_url: format!("{}{}", JDBC_PREFIX, connect_url),
        host,
        port: url.port(),
    })
}

fn decode_path(path: &str) -> Result<String, String> {
    let bytes = path.as_bytes();
    // percent_decode_str passes malformed escapes through untouched
    for (i, _) in path.match_indices('%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .map_or(false, |hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(format!("malformed escape sequence at index {}", i));
        }
    }

    percent_decode_str(path)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| "escaped path is not valid UTF-8".to_string())
}
