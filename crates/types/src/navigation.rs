use serde::Serialize;

/// One position in the flattened traversal of a quiz.
///
/// Every page contributes one entry per question set. The list of entries
/// is the unit of "current position" in a session; randomization permutes
/// the list, never the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEntry {
    /// Position of the page among the document's `Page` elements.
    pub page_index: usize,
    /// Position of the question set within its page.
    pub question_set_index: usize,
    /// Randomization block the page belongs to; 0 is never shuffled.
    pub page_group: u32,
    /// Repetition number, 0 for the original instance.
    pub rep: u32,
}

impl NavigationEntry {
    pub fn new(page_index: usize, question_set_index: usize, page_group: u32, rep: u32) -> Self {
        Self {
            page_index,
            question_set_index,
            page_group,
            rep,
        }
    }
}
