//! Document-target classification of destination URLs.

use reviewbot_domain::PublishTarget;
use url::Url;

const SHAREPOINT_HOST: &str = "sharepoint.com";
const LOOP_HOST: &str = "loop.microsoft.com";
const LAYOUTS_SEGMENT: &str = "/_layouts";

/// Classify a destination URL.
///
/// Rules are checked in order: a SharePoint host, a Word document (`.docx` or
/// `Word` anywhere in the URL), a Loop URL. Anything else, including a string
/// that does not parse as a URL, is `Unknown`. A SharePoint site URL is
/// scheme, host and the path before `/_layouts`; any port is dropped.
///
/// ```
/// use reviewbot_core::classify_target;
/// use reviewbot_domain::DocumentKind;
///
/// let target = classify_target("https://contoso.sharepoint.com/sites/x/_layouts/15/Doc.aspx");
/// assert_eq!(target.kind(), DocumentKind::SharePoint);
/// ```
pub fn classify_target(url: &str) -> PublishTarget {
    let Ok(parsed) = Url::parse(url) else {
        return PublishTarget::Unknown { url: url.to_string() };
    };

    let host = parsed.host_str().unwrap_or_default();
    if host.contains(SHAREPOINT_HOST) {
        let path = parsed.path();
        let site_path = path.split(LAYOUTS_SEGMENT).next().unwrap_or_default();
        return PublishTarget::SharePoint {
            site_url: format!("{}://{host}{site_path}", parsed.scheme()),
            file_path: path.to_string(),
        };
    }

    if url.contains(".docx") || url.contains("Word") {
        return PublishTarget::Word { url: url.to_string() };
    }

    if url.contains(LOOP_HOST) {
        return PublishTarget::Loop { url: url.to_string() };
    }

    PublishTarget::Unknown { url: url.to_string() }
}
