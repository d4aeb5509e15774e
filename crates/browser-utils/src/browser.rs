//! Internet Explorer / legacy Edge detection from a user-agent string.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static MSIE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"MSIE (\d+\.\d+);").expect("valid regex"));

/// Result of IE detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IeVersion {
    /// Internet Explorer 6 through 11. Anything older than 7 reports 6.
    Version(u8),
    /// Legacy (EdgeHTML) Edge.
    Edge,
    /// Any other browser.
    NotIe,
}

impl IeVersion {
    /// The JavaScript-style result: the version number, `"edge"`, or `-1`.
    pub fn sentinel(self) -> Value {
        match self {
            IeVersion::Version(v) => Value::from(v),
            IeVersion::Edge => Value::from("edge"),
            IeVersion::NotIe => Value::from(-1),
        }
    }
}

/// Detect the IE version advertised by `user_agent`.
///
/// ```
/// use browser_utils::{ie_version, IeVersion};
///
/// let ie9 = "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; Trident/5.0)";
/// assert_eq!(ie_version(ie9), IeVersion::Version(9));
///
/// let ie11 = "Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0) like Gecko";
/// assert_eq!(ie_version(ie11), IeVersion::Version(11));
/// ```
pub fn ie_version(user_agent: &str) -> IeVersion {
    let legacy_ie = user_agent.contains("compatible") && user_agent.contains("MSIE");
    if legacy_ie {
        let major = MSIE_RE
            .captures(user_agent)
            .and_then(|caps| caps[1].parse::<f64>().ok())
            .unwrap_or(0.0);
        // Exact matches only; any unlisted version (including a missing one)
        // reports 6.
        let version = [7u8, 8, 9, 10]
            .into_iter()
            .find(|&v| major == f64::from(v))
            .unwrap_or(6);
        return IeVersion::Version(version);
    }

    if user_agent.contains("Edge") {
        return IeVersion::Edge;
    }

    if user_agent.contains("Trident") && user_agent.contains("rv:11.0") {
        return IeVersion::Version(11);
    }

    IeVersion::NotIe
}
