//! Element and attribute names of the quiz/results document.

pub const SESSION: &str = "Session";
pub const PAGE: &str = "Page";
pub const IMAGE: &str = "Image";
pub const LAYER: &str = "Layer";
pub const PATH: &str = "Path";
pub const LABEL_MAP_PATH: &str = "LabelMapPath";
pub const MARKUP_LINE_PATH: &str = "MarkupLinePath";
pub const STATE: &str = "State";
pub const QUESTION_SET: &str = "QuestionSet";
pub const QUESTION: &str = "Question";
pub const OPTION: &str = "Option";
pub const RESPONSE: &str = "Response";
pub const LOGIN: &str = "Login";
pub const RANDOMIZED_PAGE_GROUP_INDICES: &str = "RandomizedPageGroupIndices";

pub mod attr {
    pub const ID: &str = "ID";
    pub const DESCRIPTOR: &str = "Descriptor";
    pub const PAGE_GROUP: &str = "PageGroup";
    pub const REP: &str = "Rep";
    pub const PAGE_COMPLETE: &str = "PageComplete";
    pub const LAYOUT: &str = "Layout";
    pub const LOOP: &str = "Loop";
    pub const BOOKMARK_ID: &str = "BookmarkID";
    pub const GO_TO_BOOKMARK: &str = "GoToBookmark";
    pub const SEGMENT_REQUIRED_ON_ANY_IMAGE: &str = "SegmentRequiredOnAnyImage";
    pub const MIN_MARKUP_LINES_REQUIRED_ON_ANY_IMAGE: &str = "MinMarkupLinesRequiredOnAnyImage";

    pub const TYPE: &str = "Type";
    pub const SEGMENT_REQUIRED: &str = "SegmentRequired";
    pub const MIN_MARKUP_LINES_REQUIRED: &str = "MinMarkupLinesRequired";
    pub const DISPLAY_LABEL_MAP_ID: &str = "DisplayLabelMapID";
    pub const LABEL_MAP_ID: &str = "LabelMapID";

    pub const LOGIN_TIME: &str = "LoginTime";
    pub const LOGOUT_TIME: &str = "LogoutTime";
    pub const RESPONSE_TIME: &str = "ResponseTime";
    pub const QUIZ_COMPLETE: &str = "QuizComplete";
    pub const USER_NAME: &str = "UserName";
    pub const EVENT: &str = "Event";
    pub const RANDOMIZE_PAGE_GROUPS: &str = "RandomizePageGroups";
}

/// `"Y"` or `"y"`; every other value, including absence, is false.
pub fn is_yes(value: Option<&str>) -> bool {
    matches!(value, Some("Y") | Some("y"))
}
