//! The list formatting engine.
//!
//! A `ListFormatter` drives one list-view request end to end: it merges
//! the page's base filter with the formatting options, computes the
//! pagination window, fetches a bounded slice of messages in the requested
//! order, and renders them as HTML fragments or an RSS document.
//!
//! Instances are per-request and must not be shared across requests; the
//! memoized pagination state assumes exclusive access.

use anyhow::Result;

use crate::config::BoardConfig;
use crate::feed::FeedGenerator;
use crate::list::options::FormattingOptions;
use crate::list::paginator::Paginator;
use crate::message::{Message, MessageFilter, MessageRepository, SortOrder};
use crate::render;

/// Timestamp reported when no message matches the filter. Sorts before
/// any real publication time.
pub const EPOCH_SENTINEL: &str = "2000-01-01T00:00:00";

/// Identity of a list page: its URL, base filter and feed metadata.
///
/// Each variant corresponds to one list route; handlers inject the value
/// into the formatter rather than subclassing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPage {
    /// The board-wide message list at /messList.
    AllMessages,
    /// One author's page at /blog/{author}.
    Blog { author_id: String },
}

impl ListPage {
    /// URL of the page itself, without query parameters.
    pub fn url(&self) -> String {
        match self {
            ListPage::AllMessages => "/messList".to_string(),
            ListPage::Blog { author_id } => format!("/blog/{}", urlencoding::encode(author_id)),
        }
    }

    /// The filter every query on this page starts from.
    pub fn base_filter(&self) -> MessageFilter {
        match self {
            ListPage::AllMessages => MessageFilter::default(),
            ListPage::Blog { author_id } => MessageFilter {
                author_id: Some(author_id.clone()),
                ..Default::default()
            },
        }
    }

    /// Whether one-line summaries name the author. A blog shows a single
    /// author's messages, so repeating the name is noise.
    pub fn include_author_one_line(&self) -> bool {
        match self {
            ListPage::AllMessages => true,
            ListPage::Blog { .. } => false,
        }
    }

    /// Feed generator primed with this page's channel metadata.
    pub fn feed_generator(&self, board: &BoardConfig) -> FeedGenerator {
        let link = format!("{}{}", board.site_url.trim_end_matches('/'), self.url());
        match self {
            ListPage::AllMessages => FeedGenerator::new(
                board.title.clone(),
                link,
                format!("Recent messages on {}", board.title),
            ),
            ListPage::Blog { author_id } => FeedGenerator::new(
                format!("{}: {}", board.title, author_id),
                link,
                format!("Messages by {}", author_id),
            ),
        }
    }
}

/// Pagination decision for one request, computed at most once.
#[derive(Debug, Clone)]
pub struct PaginationPlan {
    /// Messages per page for this view.
    pub page_size: i64,
    /// The window, or None when pagination is disabled (auto-update views
    /// are not paginated).
    pub paginator: Option<Paginator>,
}

#[derive(Debug, Clone)]
enum PaginationSlot {
    Uncomputed,
    Computed(PaginationPlan),
}

/// Formats a list of messages for one request.
pub struct ListFormatter {
    page: ListPage,
    options: FormattingOptions,
    requested_skip: i64,
    repo: MessageRepository,
    board: BoardConfig,
    pagination: PaginationSlot,
}

impl ListFormatter {
    /// Create a formatter for one request.
    pub fn new(
        page: ListPage,
        options: FormattingOptions,
        requested_skip: i64,
        repo: MessageRepository,
        board: BoardConfig,
    ) -> Self {
        Self {
            page,
            options,
            requested_skip,
            repo,
            board,
            pagination: PaginationSlot::Uncomputed,
        }
    }

    /// The options this formatter was built with.
    pub fn options(&self) -> &FormattingOptions {
        &self.options
    }

    /// The page identity this formatter renders.
    pub fn page(&self) -> &ListPage {
        &self.page
    }

    /// The filter for the instance options, or for an override (RSS uses a
    /// fresh default-options filter regardless of live toggles).
    pub fn query(&self, options: Option<&FormattingOptions>) -> MessageFilter {
        let options = options.unwrap_or(&self.options);
        self.page.base_filter().with_options(options)
    }

    /// Decide the pagination window. Runs at most once per instance; the
    /// count query is skipped entirely for auto-update views.
    ///
    /// The count and the later fetch are separate queries; a write between
    /// them can shift the window by a few items, which is accepted.
    pub async fn setup_pagination(&mut self) -> Result<PaginationPlan> {
        if let PaginationSlot::Computed(plan) = &self.pagination {
            return Ok(plan.clone());
        }

        let page_size = if self.options.one_line {
            self.board.one_line_page_size
        } else {
            self.board.page_size
        };

        // Live-updating views are not paginated.
        let paginator = if self.options.au {
            None
        } else {
            let count = self.repo.count(&self.query(None)).await?;
            Some(Paginator::new(count, page_size, self.requested_skip)?)
        };

        let plan = PaginationPlan {
            page_size,
            paginator,
        };
        self.pagination = PaginationSlot::Computed(plan.clone());
        Ok(plan)
    }

    /// Pagination HTML above the message list: the window notice, only
    /// past the first page.
    pub async fn pagination_before(&mut self) -> Result<String> {
        let plan = self.setup_pagination().await?;
        let Some(pag) = &plan.paginator else {
            return Ok(String::new());
        };
        if pag.skip() <= 0 {
            return Ok(String::new());
        }
        Ok(pag.notice_html())
    }

    /// Pagination HTML below the message list: the notice plus the
    /// navigation links.
    pub async fn pagination_after(&mut self) -> Result<String> {
        let plan = self.setup_pagination().await?;
        let Some(pag) = &plan.paginator else {
            return Ok(String::new());
        };
        let links = pag.links_html(&self.page.url(), &self.options.query_pairs());
        Ok(format!(
            "<br>\n{}\n<div class='right-pagination'>{}</div>",
            pag.notice_html(),
            links
        ))
    }

    /// Fetch the messages for this view, sorted and windowed.
    pub async fn messages(&mut self, options: Option<&FormattingOptions>) -> Result<Vec<Message>> {
        let plan = self.setup_pagination().await?;
        let filter = self.query(options);
        let order = SortOrder::from(options.unwrap_or(&self.options));

        let skip = plan.paginator.as_ref().map(|pag| pag.skip());
        self.repo.find(&filter, order, skip, plan.page_size).await
    }

    /// Render the message list as HTML fragments.
    pub async fn messages_html(&mut self) -> Result<String> {
        let messages = self.messages(None).await?;

        let html = if self.options.one_line {
            let show_author = self.page.include_author_one_line();
            messages
                .iter()
                .map(|m| render::view_one_line(m, show_author))
                .collect::<String>()
        } else {
            messages
                .iter()
                .map(|m| format!("{}<p></p>\n", render::view_full(m)))
                .collect::<String>()
        };

        Ok(html)
    }

    /// Timestamp of the most recent message under the current filter,
    /// or the epoch sentinel when nothing matches. Independent of
    /// pagination.
    pub async fn most_recent_timestamp(&self) -> Result<String> {
        let newest = self
            .repo
            .find_one(&self.query(None), SortOrder::Descending)
            .await?;
        Ok(newest.map_or_else(|| EPOCH_SENTINEL.to_string(), |m| m.published))
    }

    /// JavaScript driving the auto-update poller. Emitted only when both
    /// auto-update and most-recent-first are on; a live view of the oldest
    /// messages would never change at the top.
    pub async fn auto_update_js(&self, full_path: &str) -> Result<String> {
        if !(self.options.au && self.options.mrf) {
            return Ok(String::new());
        }

        let js = format!(
            "var updatePollUrl = \"/au{}\";\nvar mostRecentTimeStamp = \"{}\";\npollForAutoUpdate(updatePollUrl, mostRecentTimeStamp);\n",
            full_path,
            self.most_recent_timestamp().await?
        );
        Ok(js)
    }

    /// Page JavaScript: auto-submit on toggle changes, plus the
    /// auto-update snippet when applicable.
    pub async fn js_for_page(&self, full_path: &str) -> Result<String> {
        let mut js = String::from(
            "function foChanged(){\n    document.getElementById('formattingOptionsForm').submit();\n}\nfor (var id of ['id_oneLine', 'id_headOnly', 'id_mrf', 'id_au']) {\n    document.getElementById(id).addEventListener('change', foChanged);\n}\n",
        );
        js.push_str(&self.auto_update_js(full_path).await?);
        Ok(js)
    }

    /// Render the RSS document for this page. Live display toggles are
    /// ignored; the feed always uses the default options and order.
    pub async fn render_rss(&mut self) -> Result<String> {
        let defaults = FormattingOptions::default();
        let messages = self.messages(Some(&defaults)).await?;

        let mut fg = self.page.feed_generator(&self.board);
        for m in &messages {
            fg.add_entry()
                .id(m.full_url(&self.board.site_url))
                .title(m.title.clone())
                .content(m.html.clone());
        }

        Ok(fg.rss_str(true))
    }
}
