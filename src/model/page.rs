//! Pages of revision data as delivered by the data-loading collaborator.

use super::identifiers::ContinuationToken;
use super::section::SectionHeader;
use serde::Deserialize;

/// One page of revisions.
///
/// The first page (`rv_start_id == 0`) also carries the header data that
/// becomes the [`LivingDocViewModel`].
#[derive(Debug, Clone, Deserialize)]
pub struct RevisionPage {
    /// Token that requests this page. Zero for the first page.
    #[serde(default)]
    pub rv_start_id: ContinuationToken,
    /// Sections in display order, newest first.
    #[serde(default)]
    pub sections: Vec<SectionHeader>,
    /// Token for the page after this one. Zero when history is exhausted.
    #[serde(default)]
    pub next_rv_start_id: ContinuationToken,
    /// Article title. Only read from the first page.
    #[serde(default)]
    pub article_title: Option<String>,
    /// Short article description. Only read from the first page.
    #[serde(default)]
    pub summary_text: Option<String>,
    /// Edit activity for the header sparkline. Only read from the first page.
    #[serde(default)]
    pub edit_metrics: Option<Vec<u64>>,
}

/// Data backing the whole screen: header text plus the first page of sections.
#[derive(Debug, Clone, Default)]
pub struct LivingDocViewModel {
    /// Article title.
    pub article_title: Option<String>,
    /// Short article description.
    pub summary_text: Option<String>,
    /// Daily edit counts, oldest first.
    pub edit_metrics: Vec<u64>,
    /// First page of sections.
    pub sections: Vec<SectionHeader>,
    /// Token for the second page.
    pub next_rv_start_id: ContinuationToken,
}

impl From<RevisionPage> for LivingDocViewModel {
    fn from(page: RevisionPage) -> Self {
        Self {
            article_title: page.article_title,
            summary_text: page.summary_text,
            edit_metrics: page.edit_metrics.unwrap_or_default(),
            sections: page.sections,
            next_rv_start_id: page.next_rv_start_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_converts_to_view_model() {
        let page: RevisionPage = serde_json::from_str(
            r#"{
                "article_title": "Dog",
                "summary_text": "12 edits in the last 30 days",
                "edit_metrics": [1, 0, 4],
                "sections": [{"id": "2020-10-16", "title": "October 16, 2020"}],
                "next_rv_start_id": 981000
            }"#,
        )
        .unwrap();
        assert!(page.rv_start_id.is_terminal());

        let view_model = LivingDocViewModel::from(page);
        assert_eq!(view_model.article_title.as_deref(), Some("Dog"));
        assert_eq!(view_model.edit_metrics, vec![1, 0, 4]);
        assert_eq!(view_model.sections.len(), 1);
        assert_eq!(view_model.next_rv_start_id, ContinuationToken::new(981000));
    }

    #[test]
    fn missing_metrics_default_to_empty() {
        let page: RevisionPage = serde_json::from_str(r#"{"sections": []}"#).unwrap();
        let view_model = LivingDocViewModel::from(page);
        assert!(view_model.edit_metrics.is_empty());
        assert!(view_model.next_rv_start_id.is_terminal());
    }
}
