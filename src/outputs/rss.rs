//! RSS 2.0 document rendering and file output.
//!
//! Feeds are rendered with the `quick-xml` event writer: an XML declaration,
//! `<rss version="2.0">`, one `<channel>` carrying the source metadata and
//! `lastBuildDate`, then one `<item>` per article with title, link,
//! description, pubDate, and guid (the link, as readers expect for pages
//! without native ids).
//!
//! Guarantees: the output is well-formed XML (the writer escapes special
//! characters; control characters invalid in XML are stripped first), item
//! order is preserved, and empty fields render as empty elements. A
//! zero-article run still produces a valid channel-only document.

use crate::dates::now_rfc822;
use crate::models::{Article, Channel};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Render a complete RSS 2.0 document for `channel` and `articles`.
pub fn render_feed(channel: &Channel, articles: &[Article]) -> Result<String, Box<dyn Error>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss_start = BytesStart::new("rss");
    rss_start.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss_start))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", channel.title)?;
    write_text_element(&mut writer, "link", channel.link)?;
    write_text_element(&mut writer, "description", channel.description)?;
    write_text_element(&mut writer, "language", channel.language)?;
    write_text_element(&mut writer, "lastBuildDate", &now_rfc822())?;

    for article in articles {
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        write_text_element(&mut writer, "title", &article.title)?;
        write_text_element(&mut writer, "link", &article.link)?;
        write_text_element(&mut writer, "description", &article.description)?;
        write_text_element(&mut writer, "pubDate", &article.pub_date)?;
        write_text_element(&mut writer, "guid", &article.link)?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Write one `<name>text</name>` element with sanitized content.
fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Box<dyn Error>> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    let sanitized = sanitize_text(text);
    writer.write_event(Event::Text(BytesText::new(&sanitized)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Strip Cc control characters that are invalid in XML 1.0, keeping
/// tab, LF, and CR. Markup escaping itself is the writer's job.
fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .filter(|&c| {
            let code = c as u32;
            code == 0x09 || code == 0x0A || code == 0x0D || code >= 0x20
        })
        .collect()
}

/// Write a rendered feed document to `{output_dir}/{filename}`, overwriting
/// any previous content.
#[instrument(level = "info", skip_all, fields(%output_dir, %filename))]
pub async fn write_feed(
    output_dir: &str,
    filename: &str,
    document: &str,
) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/{}", output_dir.trim_end_matches('/'), filename);
    fs::write(&path, document).await?;
    info!(path = %path, bytes = document.len(), "Wrote feed document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event as ReadEvent;

    fn channel() -> Channel {
        Channel {
            title: "Test Feed",
            link: "https://example.com/news",
            description: "A test channel",
            language: "ja",
        }
    }

    fn articles() -> Vec<Article> {
        vec![
            Article {
                title: "最初の記事 <with markup>".to_string(),
                link: "https://example.com/news/1".to_string(),
                description: "Tom & Jerry".to_string(),
                pub_date: "Tue, 24 Jun 2025 00:00:00 +0000".to_string(),
            },
            Article {
                title: "Second".to_string(),
                link: "https://example.com/news/2".to_string(),
                description: "".to_string(),
                pub_date: "Wed, 18 Jun 2025 00:00:00 +0000".to_string(),
            },
            Article {
                title: "Third".to_string(),
                link: "https://example.com/news/3".to_string(),
                description: "最後".to_string(),
                pub_date: "Fri, 13 Jun 2025 00:00:00 +0000".to_string(),
            },
        ]
    }

    /// Parse a rendered document back into (element name, text) pairs.
    ///
    /// The reader reports escaped characters as `GeneralRef` events separate
    /// from the surrounding text, so both event kinds feed the accumulator.
    fn parse_back(xml: &str) -> Vec<(String, String)> {
        let mut reader = Reader::from_str(xml);
        let mut out = Vec::new();
        let mut current: Option<String> = None;
        let mut text = String::new();
        loop {
            match reader.read_event().unwrap() {
                ReadEvent::Start(e) => {
                    current = Some(String::from_utf8_lossy(e.name().as_ref()).to_string());
                    text.clear();
                }
                ReadEvent::Text(e) => {
                    if current.is_some() {
                        text.push_str(&e.xml_content().unwrap());
                    }
                }
                ReadEvent::GeneralRef(e) => {
                    if current.is_some() {
                        if let Some(ch) = e.resolve_char_ref().unwrap() {
                            text.push(ch);
                        } else {
                            match e.decode().unwrap().as_ref() {
                                "lt" => text.push('<'),
                                "gt" => text.push('>'),
                                "amp" => text.push('&'),
                                "quot" => text.push('"'),
                                "apos" => text.push('\''),
                                other => panic!("unexpected entity reference: {other}"),
                            }
                        }
                    }
                }
                ReadEvent::End(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    if current.as_deref() == Some(&name) {
                        out.push((name, text.trim().to_string()));
                    }
                    current = None;
                }
                ReadEvent::Eof => break,
                _ => {}
            }
        }
        out
    }

    #[test]
    fn test_zero_articles_valid_channel_only_document() {
        let xml = render_feed(&channel(), &[]).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(!xml.contains("<item>"));

        // must parse cleanly
        let elements = parse_back(&xml);
        assert!(elements.iter().any(|(n, t)| n == "title" && t == "Test Feed"));
        assert!(elements.iter().any(|(n, t)| n == "language" && t == "ja"));
    }

    #[test]
    fn test_three_article_round_trip_preserves_fields_and_order() {
        let input = articles();
        let xml = render_feed(&channel(), &input).unwrap();
        let elements = parse_back(&xml);

        let titles: Vec<&str> = elements
            .iter()
            .filter(|(n, _)| n == "title")
            .skip(1) // channel title
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(titles, vec!["最初の記事 <with markup>", "Second", "Third"]);

        let links: Vec<&str> = elements
            .iter()
            .filter(|(n, _)| n == "link")
            .skip(1) // channel link
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(
            links,
            vec![
                "https://example.com/news/1",
                "https://example.com/news/2",
                "https://example.com/news/3"
            ]
        );

        let dates: Vec<&str> = elements
            .iter()
            .filter(|(n, _)| n == "pubDate")
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(
            dates,
            vec![
                "Tue, 24 Jun 2025 00:00:00 +0000",
                "Wed, 18 Jun 2025 00:00:00 +0000",
                "Fri, 13 Jun 2025 00:00:00 +0000"
            ]
        );

        let descriptions: Vec<&str> = elements
            .iter()
            .filter(|(n, _)| n == "description")
            .skip(1) // channel description
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(descriptions, vec!["Tom & Jerry", "", "最後"]);
    }

    #[test]
    fn test_special_characters_escaped() {
        let xml = render_feed(&channel(), &articles()).unwrap();
        assert!(xml.contains("&lt;with markup&gt;"));
        assert!(xml.contains("Tom &amp; Jerry"));
    }

    #[test]
    fn test_empty_field_renders_empty_element_not_omitted() {
        let xml = render_feed(&channel(), &articles()).unwrap();
        // the empty description of the second article is still present
        let item_descriptions = xml.matches("<description>").count();
        assert_eq!(item_descriptions, 4); // channel + 3 items
    }

    #[test]
    fn test_guid_mirrors_link() {
        let xml = render_feed(&channel(), &articles()).unwrap();
        let elements = parse_back(&xml);
        let guids: Vec<&str> = elements
            .iter()
            .filter(|(n, _)| n == "guid")
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(guids.len(), 3);
        assert_eq!(guids[0], "https://example.com/news/1");
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_text("a\u{0000}b\u{0008}c"), "abc");
        assert_eq!(sanitize_text("tab\tand\nnewline"), "tab\tand\nnewline");
    }

    #[tokio::test]
    async fn test_write_feed_overwrites() {
        let dir = std::env::temp_dir().join("feedsmith-rss-test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let dir = dir.to_str().unwrap().to_string();

        write_feed(&dir, "out.xml", "first").await.unwrap();
        write_feed(&dir, "out.xml", "second").await.unwrap();

        let content = tokio::fs::read_to_string(format!("{}/out.xml", dir))
            .await
            .unwrap();
        assert_eq!(content, "second");
    }
}
