//! Launch request parsing and field validation
//!
//! Posts carry a trigger keyword followed by `key: value` lines. The same
//! field validation backs the HTTP prepare-launch payload.

use std::str::FromStr;

use alloy::primitives::Address;
use url::Url;

use launchpad_types::{
    LaunchError, LaunchRequest, LaunchResult, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_SYMBOL_LEN,
};

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg"];

const IMAGE_HOSTS: &[&str] = &[
    "iili.io",
    "i.imgur.com",
    "imgur.com",
    "arweave.net",
    "ipfs.io",
    "gateway.pinata.cloud",
    "cloudflare-ipfs.com",
];

/// Parses launch posts for one trigger keyword.
#[derive(Debug, Clone)]
pub struct PostParser {
    trigger: String,
}

impl PostParser {
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into().to_lowercase(),
        }
    }

    /// Whether the text contains the trigger keyword at all.
    pub fn contains_trigger(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.trigger)
    }

    /// Parse free text into a validated request. Every problem found is
    /// reported, joined into one validation error.
    pub fn parse(&self, text: &str) -> LaunchResult<LaunchRequest> {
        if !self.contains_trigger(text) {
            return Err(LaunchError::Validation(format!(
                "post does not contain the {} trigger",
                self.trigger
            )));
        }

        let mut fields: Vec<(String, String)> = Vec::new();
        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            // Keys are bare words at the start of the line; later duplicates win.
            if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                continue;
            }
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let key = key.to_lowercase();
            fields.retain(|(k, _)| *k != key);
            fields.push((key, value.to_string()));
        }

        let get = |name: &str| {
            fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };

        let mut missing = Vec::new();
        for required in ["name", "symbol", "wallet", "description", "image"] {
            if get(required).is_none() {
                missing.push(format!("missing required field: {required}"));
            }
        }
        if !missing.is_empty() {
            return Err(LaunchError::Validation(missing.join("; ")));
        }

        validate_fields(
            get("name").unwrap_or_default(),
            get("symbol").unwrap_or_default(),
            get("wallet").unwrap_or_default(),
            get("description").unwrap_or_default(),
            get("image").unwrap_or_default(),
            get("website"),
            get("twitter").or_else(|| get("social")),
        )
    }
}

/// Validate raw field values into a request. Shared by the post parser and
/// the prepare-launch endpoint.
pub fn validate_fields(
    name: &str,
    symbol: &str,
    wallet: &str,
    description: &str,
    image: &str,
    website: Option<&str>,
    social: Option<&str>,
) -> LaunchResult<LaunchRequest> {
    let mut errors = Vec::new();

    let wallet_parsed = parse_wallet(wallet);
    if wallet_parsed.is_none() {
        errors.push("invalid wallet address format".to_string());
    }

    let symbol = symbol.trim().to_uppercase();
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        errors.push(format!("symbol must be {MAX_SYMBOL_LEN} characters or less"));
    }

    let name = name.trim();
    if name.chars().count() > MAX_NAME_LEN {
        errors.push(format!("name must be {MAX_NAME_LEN} characters or less"));
    }

    let description = description.trim();
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.push(format!(
            "description must be {MAX_DESCRIPTION_LEN} characters or less"
        ));
    }

    let image = image.trim();
    if !is_direct_image_url(image) {
        errors.push("image must be a direct URL to an image file".to_string());
    }

    if !errors.is_empty() {
        return Err(LaunchError::Validation(errors.join("; ")));
    }
    let Some(wallet) = wallet_parsed else {
        return Err(LaunchError::Validation("invalid wallet address format".into()));
    };

    Ok(LaunchRequest {
        name: name.to_string(),
        symbol,
        wallet,
        description: description.to_string(),
        image: image.to_string(),
        website: website.map(|w| w.trim().to_string()).filter(|w| !w.is_empty()),
        social: social.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    })
}

fn parse_wallet(raw: &str) -> Option<Address> {
    let raw = raw.trim();
    if !raw.starts_with("0x") || raw.len() != 42 {
        return None;
    }
    Address::from_str(raw).ok()
}

/// A valid image is `ipfs://`, or an http(s) URL whose path has a known
/// image extension, or whose host is an allow-listed image host. A page URL
/// that merely displays an image does not qualify.
fn is_direct_image_url(raw: &str) -> bool {
    if raw.starts_with("ipfs://") {
        return raw.len() > "ipfs://".len();
    }
    let Ok(parsed) = Url::parse(raw) else {
        return false;
    };
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    let path = parsed.path().to_lowercase();
    if IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return true;
    }

    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_lowercase();
    IMAGE_HOSTS
        .iter()
        .any(|allowed| host == *allowed || host.ends_with(&format!(".{allowed}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn parser() -> PostParser {
        PostParser::new("!launchcoin")
    }

    #[test]
    fn parses_full_launch_post() {
        let text = "@bot !launchcoin\nname: Molty Coin\nsymbol: molty\nwallet: 0x742d35cc6634c0532925a3b844bc9e7595f2bd12\ndescription: test\nimage: https://iili.io/x.jpg";
        let request = parser().parse(text).unwrap();
        assert_eq!(request.name, "Molty Coin");
        assert_eq!(request.symbol, "MOLTY");
        assert_eq!(
            request.wallet,
            address!("742d35cc6634c0532925a3b844bc9e7595f2bd12")
        );
        assert_eq!(request.description, "test");
        assert_eq!(request.image, "https://iili.io/x.jpg");
        assert!(request.website.is_none());
    }

    #[test]
    fn requires_trigger_keyword() {
        let text = "name: A\nsymbol: A\nwallet: 0x742d35cc6634c0532925a3b844bc9e7595f2bd12\ndescription: d\nimage: https://iili.io/x.jpg";
        let err = parser().parse(text).unwrap_err();
        assert!(err.to_string().contains("trigger"));
    }

    #[test]
    fn reports_missing_fields() {
        let err = parser().parse("!launchcoin\nname: OnlyName").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("symbol"));
        assert!(message.contains("wallet"));
        assert!(message.contains("image"));
    }

    #[test]
    fn rejects_page_url_as_image() {
        let text = "!launchcoin\nname: A\nsymbol: A\nwallet: 0x742d35cc6634c0532925a3b844bc9e7595f2bd12\ndescription: d\nimage: https://example.com/gallery/123";
        let err = parser().parse(text).unwrap_err();
        assert!(err.to_string().contains("image"));
    }

    #[test]
    fn accepts_ipfs_and_allow_listed_hosts() {
        assert!(is_direct_image_url("ipfs://QmHash"));
        assert!(is_direct_image_url("https://i.imgur.com/abc"));
        assert!(is_direct_image_url("https://gateway.pinata.cloud/ipfs/Qm"));
        assert!(is_direct_image_url("https://cdn.example.com/logo.PNG"));
        assert!(!is_direct_image_url("ipfs://"));
        assert!(!is_direct_image_url("ftp://iili.io/x.jpg"));
        assert!(!is_direct_image_url("not a url"));
        // Host allow-listing matches whole labels, not substrings.
        assert!(!is_direct_image_url("https://imgur.com.evil.example/x"));
    }

    #[test]
    fn rejects_bad_wallet_and_long_fields() {
        let text = format!(
            "!launchcoin\nname: {}\nsymbol: TOOLONGSYMBOL\nwallet: 0x1234\ndescription: d\nimage: https://iili.io/x.jpg",
            "n".repeat(60)
        );
        let err = parser().parse(&text).unwrap_err().to_string();
        assert!(err.contains("wallet"));
        assert!(err.contains("symbol"));
        assert!(err.contains("name"));
    }

    #[test]
    fn later_duplicate_keys_win() {
        let text = "!launchcoin\nname: First\nname: Second\nsymbol: SYM\nwallet: 0x742d35cc6634c0532925a3b844bc9e7595f2bd12\ndescription: d\nimage: https://iili.io/x.jpg";
        let request = parser().parse(text).unwrap();
        assert_eq!(request.name, "Second");
    }
}
