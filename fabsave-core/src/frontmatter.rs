//! Frontmatter block for note-taking tools
//!
//! ```markdown
//! ---
//! generation_date: 2024-05-01 09:30
//! tags: fabric-extraction notes research
//! ---
//! ```

use chrono::{DateTime, Local};

const FRONTMATTER_DELIMITER: &str = "---";
const GENERATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Tags that end up on the `tags:` line, in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterTags {
    tags: Vec<String>,
}

impl FrontmatterTags {
    /// Collect tags for a save, or `None` when no block should be written
    ///
    /// A block is only written when there is something beyond the stub: the
    /// default tag-set (when included) or at least one extra tag. Order is
    /// default tag-set, stub, then extras as given.
    pub fn collect(
        default_tags: Option<&str>,
        include_default: bool,
        stub: &str,
        extra: &[String],
    ) -> Option<Self> {
        let default_tags = default_tags
            .map(str::trim)
            .filter(|tags| include_default && !tags.is_empty());

        if default_tags.is_none() && extra.is_empty() {
            return None;
        }

        let mut tags = Vec::with_capacity(extra.len() + 2);
        if let Some(default_tags) = default_tags {
            tags.push(default_tags.to_string());
        }
        tags.push(stub.to_string());
        tags.extend(extra.iter().cloned());

        Some(Self { tags })
    }

    /// Space-joined tag line value
    pub fn line(&self) -> String {
        self.tags.join(" ")
    }
}

/// Render the full block, including the trailing newline
pub fn render(tags: &FrontmatterTags, generated_at: &DateTime<Local>) -> String {
    format!(
        "{delim}\ngeneration_date: {date}\ntags: {tags}\n{delim}\n",
        delim = FRONTMATTER_DELIMITER,
        date = generated_at.format(GENERATION_DATE_FORMAT),
        tags = tags.line(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_no_tags_no_block() {
        assert_eq!(FrontmatterTags::collect(None, true, "notes", &[]), None);
        assert_eq!(
            FrontmatterTags::collect(Some("fabric-extraction"), false, "notes", &[]),
            None
        );
        assert_eq!(FrontmatterTags::collect(Some(""), true, "notes", &[]), None);
    }

    #[test]
    fn test_default_tags_only() {
        let collected =
            FrontmatterTags::collect(Some("fabric-extraction"), true, "notes", &[]).unwrap();
        assert_eq!(collected.line(), "fabric-extraction notes");
    }

    #[test]
    fn test_order_and_duplicates() {
        let collected = FrontmatterTags::collect(
            Some("fabric-extraction ai"),
            true,
            "notes",
            &tags(&["foo", "bar", "foo"]),
        )
        .unwrap();
        assert_eq!(collected.line(), "fabric-extraction ai notes foo bar foo");
    }

    #[test]
    fn test_nofabric_keeps_extra_tags() {
        let collected = FrontmatterTags::collect(
            Some("fabric-extraction"),
            false,
            "notes",
            &tags(&["foo"]),
        )
        .unwrap();
        assert_eq!(collected.line(), "notes foo");
    }

    #[test]
    fn test_render_block() {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 45)
            .unwrap();
        let now = Local.from_local_datetime(&naive).earliest().unwrap();
        let collected = FrontmatterTags::collect(None, true, "notes", &tags(&["foo"])).unwrap();

        assert_eq!(
            render(&collected, &now),
            "---\ngeneration_date: 2024-05-01 09:30\ntags: notes foo\n---\n"
        );
    }
}
