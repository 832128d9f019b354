//! Request handlers.

mod feed;
mod list;
mod message;
mod misc;
mod reply;

pub use feed::{rss_blog, rss_mess_list};
pub use list::{au_blog, au_mess_list, blog, mess_list};
pub use message::{mess, mess_source};
pub use misc::{health, index};
pub use reply::{mess_rep_form, mess_rep_form_reply, mess_rep_submit, mess_rep_submit_reply};
