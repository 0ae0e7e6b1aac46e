use time::{macros::format_description, OffsetDateTime};
use uuid::Uuid;

use crate::comments::dto::{Comment, NewComment};
use crate::escape::escape_html;

pub const ANONYMOUS_AUTHOR: &str = "anonymous";

/// Build the comment record for `author`. Comments live only in the
/// response; nothing is written to storage.
pub fn submit(author: Option<&str>, input: NewComment) -> anyhow::Result<Comment> {
    let timestamp = OffsetDateTime::now_utc()
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))?;

    Ok(Comment {
        id: Uuid::new_v4().to_string(),
        author: author
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR)
            .to_string(),
        content: escape_html(&input.content),
        timestamp,
    })
}
