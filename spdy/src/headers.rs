use std::fmt::Display;

/// Header names understood by the encoder.
pub mod names {
    /// Stream-ID for the message. Must be odd for requests and even for
    /// pushed resources, increasing monotonically. Not checked here.
    pub const STREAM_ID: &str = "X-SPDY-Stream-ID";
    /// Stream-ID of the request that initiated a pushed resource.
    pub const ASSOCIATED_TO_STREAM_ID: &str = "X-SPDY-Associated-To-Stream-ID";
    /// 0 (highest) to 7 (lowest). Optional, defaults to 0.
    pub const PRIORITY: &str = "X-SPDY-Priority";
    /// Absolute path of a pushed resource.
    pub const URL: &str = "X-SPDY-URL";
    /// Optional, defaults to "https".
    pub const SCHEME: &str = "X-SPDY-Scheme";

    pub const ANNOTATIONS: [&str; 5] = [STREAM_ID, ASSOCIATED_TO_STREAM_ID, PRIORITY, URL, SCHEME];

    pub const CONNECTION: &str = "Connection";
    pub const KEEP_ALIVE: &str = "Keep-Alive";
    pub const PROXY_CONNECTION: &str = "Proxy-Connection";
    pub const TRANSFER_ENCODING: &str = "Transfer-Encoding";
    pub const HOST: &str = "Host";

    /// Headers that must never be sent over a SPDY stream.
    pub const HOP_BY_HOP: [&str; 4] = [CONNECTION, KEEP_ALIVE, PROXY_CONNECTION, TRANSFER_ENCODING];

    pub const SPDY_HOST: &str = ":host";
    pub const SPDY_METHOD: &str = ":method";
    pub const SPDY_PATH: &str = ":path";
    pub const SPDY_SCHEME: &str = ":scheme";
    pub const SPDY_STATUS: &str = ":status";
    pub const SPDY_VERSION: &str = ":version";
}

/// Ordered header multimap. Lookups ignore ASCII case, entries keep the
/// casing they were added with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Replace every entry named `name` with a single one appended at the end.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove(&name);
        self.0.push((name, value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Remove every entry named `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        before != self.0.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Headers {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for Headers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}
