use scraper::{Html, Selector};

use crate::{
    result::{Error, Result},
    types::ClipMetadata,
};

/// Id of the script element embedding the clip JSON payload
const PAYLOAD_SCRIPT_ID: &str = "coubPageCoubJson";

/// Locate and parse the embedded JSON payload of a clip page.
///
/// The page embeds the clip description as the text of a unique
/// `<script>` element. A page without it (removed clip, interstitial,
/// bogus id) is a lookup failure for this clip.
pub fn extract_metadata(html: &str) -> Result<ClipMetadata> {
    let document = Html::parse_document(html);

    // Built from a const, the selector cannot fail to parse
    let selector = Selector::parse(&format!("script#{PAYLOAD_SCRIPT_ID}")).unwrap();

    let script = document
        .select(&selector)
        .next()
        .ok_or_else(|| Error::Payload(format!("no '{PAYLOAD_SCRIPT_ID}' element in page")))?;

    let json: String = script.text().collect();
    ClipMetadata::from_json(json.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(payload: &str) -> String {
        format!(
            "<html><head><title>t</title></head><body>\
             <script id=\"{PAYLOAD_SCRIPT_ID}\" type=\"text/json\">\n{payload}\n</script>\
             </body></html>"
        )
    }

    #[test]
    fn extracts_the_embedded_payload() {
        let payload = serde_json::json!({
            "title": "Round And Round",
            "file_versions": {
                "html5": {
                    "video": { "higher": { "url": "https://host/v.mp4" } },
                    "audio": { "high": { "url": "https://host/a.mp3" } },
                },
            },
        });
        let metadata = extract_metadata(&page(&payload.to_string())).unwrap();

        assert_eq!(metadata.title, "Round And Round");
        assert_eq!(metadata.video.best().unwrap().url, "https://host/v.mp4");
        assert!(metadata.audio.is_some());
    }

    #[test]
    fn page_without_payload_script_is_a_lookup_failure() {
        let html = "<html><body><p>Nothing here</p></body></html>";
        assert!(matches!(extract_metadata(html), Err(Error::Payload(_))));
    }

    #[test]
    fn malformed_payload_json_is_a_lookup_failure() {
        let html = page("{ not json");
        assert!(matches!(extract_metadata(&html), Err(Error::Payload(_))));
    }
}
