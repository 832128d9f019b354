//! RSS feed generation.
//!
//! A small builder mirroring the capability the list formatter consumes:
//! channel metadata up front, then one entry per message with an id (the
//! message's fully-qualified URL), a title and HTML content.

/// One feed entry under construction.
#[derive(Debug, Clone, Default)]
pub struct FeedEntry {
    id: String,
    title: String,
    content: String,
}

impl FeedEntry {
    /// Set the entry id (also used as the permalink).
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = id.into();
        self
    }

    /// Set the entry title.
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    /// Set the entry content (HTML).
    pub fn content(&mut self, content: impl Into<String>) -> &mut Self {
        self.content = content.into();
        self
    }
}

/// An RSS 2.0 feed under construction.
#[derive(Debug, Clone)]
pub struct FeedGenerator {
    title: String,
    link: String,
    description: String,
    entries: Vec<FeedEntry>,
}

impl FeedGenerator {
    /// Create a feed with its channel metadata.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: description.into(),
            entries: Vec::new(),
        }
    }

    /// Append a blank entry and return it for filling in.
    pub fn add_entry(&mut self) -> &mut FeedEntry {
        self.entries.push(FeedEntry::default());
        self.entries.last_mut().expect("entry just pushed")
    }

    /// Serialize the feed to an RSS 2.0 document.
    pub fn rss_str(&self, pretty: bool) -> String {
        let (nl, indent) = if pretty { ("\n", "  ") } else { ("", "") };
        let mut out = String::new();

        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        out.push_str(nl);
        out.push_str("<rss version=\"2.0\">");
        out.push_str(nl);
        out.push_str(indent);
        out.push_str("<channel>");
        out.push_str(nl);
        push_element(&mut out, pretty, 2, "title", &self.title);
        push_element(&mut out, pretty, 2, "link", &self.link);
        push_element(&mut out, pretty, 2, "description", &self.description);
        for entry in &self.entries {
            if pretty {
                out.push_str("    ");
            }
            out.push_str("<item>");
            out.push_str(nl);
            push_element(&mut out, pretty, 3, "guid", &entry.id);
            push_element(&mut out, pretty, 3, "link", &entry.id);
            push_element(&mut out, pretty, 3, "title", &entry.title);
            push_element(&mut out, pretty, 3, "description", &entry.content);
            if pretty {
                out.push_str("    ");
            }
            out.push_str("</item>");
            out.push_str(nl);
        }
        out.push_str(indent);
        out.push_str("</channel>");
        out.push_str(nl);
        out.push_str("</rss>");
        out.push_str(nl);

        out
    }
}

fn push_element(out: &mut String, pretty: bool, depth: usize, tag: &str, text: &str) {
    if pretty {
        for _ in 0..depth {
            out.push_str("  ");
        }
    }
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&xml_escape(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    if pretty {
        out.push('\n');
    }
}

/// Escape text for inclusion in XML element content.
fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
