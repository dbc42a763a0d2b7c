use pulldown_cmark::{html, Event, Options, Parser};

use crate::types::Notes;

const PAGE_TITLE: &str = "YouTube Transcript to Detailed Notes Converter";

/// What the page shows below the input form
#[derive(Debug, Clone, Copy)]
pub enum PageBody<'a> {
    Empty,
    Preview { thumbnail_url: &'a str },
    Notes(&'a Notes),
    Error(&'a str),
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // writing into a String never fails
    let _ = pulldown_cmark_escape::escape_html(&mut out, text);
    out
}

/// Markdown to HTML. Raw HTML in the source is emitted as escaped text.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn thumbnail(url: &str) -> String {
    format!(
        r#"<img class="thumbnail" src="{}" alt="Video thumbnail">"#,
        escape_html(url)
    )
}

pub fn render_page(url: &str, body: PageBody<'_>) -> String {
    let content = match body {
        PageBody::Empty => String::new(),
        PageBody::Preview { thumbnail_url } => thumbnail(thumbnail_url),
        PageBody::Notes(notes) => format!(
            "{}\n<section class=\"notes\">\n{}</section>",
            thumbnail(&notes.thumbnail_url),
            markdown_to_html(&format!("## Detailed Notes:\n\n{}", notes.summary))
        ),
        PageBody::Error(message) => {
            format!(r#"<p class="error">{}</p>"#, escape_html(message))
        }
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
input[type=text] {{ width: 100%; padding: .5rem; }}
.thumbnail {{ max-width: 100%; margin: 1rem 0; }}
.error {{ color: #b00020; }}
</style>
</head>
<body>
<h1>{title}</h1>
<form method="post" action="/notes">
<label for="url">Enter YouTube Video Link:</label>
<input type="text" id="url" name="url" value="{url}">
<button type="submit">Get Detailed Notes</button>
</form>
{content}
</body>
</html>
"#,
        title = PAGE_TITLE,
        url = escape_html(url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TranscriptText, VideoReference};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_markdown_bullets_render_as_list() {
        let html = markdown_to_html("- first point\n- second point\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>first point</li>"));
    }

    #[test]
    fn test_markdown_raw_html_is_escaped() {
        let html = markdown_to_html("<script>alert(1)</script>\n\nok <b>bold</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_page_with_notes() {
        let video = VideoReference::new("abc123").unwrap();
        let notes = Notes {
            thumbnail_url: video.thumbnail_url(),
            video_id: video,
            transcript: TranscriptText::from("Bonjour".to_string()),
            translation: "Hello".into(),
            source_language: Some("fr".into()),
            summary: "- Greeting".into(),
        };

        let page = render_page("https://www.youtube.com/watch?v=abc123", PageBody::Notes(&notes));
        assert!(page.contains(r#"src="https://img.youtube.com/vi/abc123/0.jpg""#));
        assert!(page.contains("<h2>Detailed Notes:</h2>"));
        assert!(page.contains("<li>Greeting</li>"));
        assert!(page.contains("value=\"https://www.youtube.com/watch?v=abc123\""));
    }

    #[test]
    fn test_page_with_error_escapes_message() {
        let page = render_page("<x>", PageBody::Error("bad <input>"));
        assert!(page.contains(r#"<p class="error">bad &lt;input&gt;</p>"#));
        assert!(page.contains(r#"value="&lt;x&gt;""#));
    }
}
