// Markup contract shared with the blog templates - these are the single source of truth for defaults

// Attributes read from trigger elements
pub const DEFAULT_TRIGGER_ATTRIBUTE: &str = "data-modal-name";
pub const DEFAULT_POST_ID_ATTRIBUTE: &str = "data-post-id";

// Well-known element ids
pub const DEFAULT_COMMENT_LIST_MODAL: &str = "listModalComment";
pub const DEFAULT_POST_ID_FIELD: &str = "postId";
pub const DEFAULT_TAG_POPUP_BUTTON: &str = "popupTagBtn";
pub const DEFAULT_TAG_POPUP: &str = "popupTag";

// Fixed-id comment modal
pub const DEFAULT_COMMENT_MODAL: &str = "modal-comment";
pub const DEFAULT_COMMENT_OPEN_BUTTON: &str = "modal-comment-btn";
pub const DEFAULT_COMMENT_CLOSE_BUTTON: &str = "close-comment";

// CSS contract
pub const DEFAULT_TAG_POPUP_CLASS: &str = "show";
pub const DISPLAY_PROPERTY: &str = "display";
pub const DISPLAY_VISIBLE: &str = "block";
pub const DISPLAY_HIDDEN: &str = "none";

// Embedded page configuration
pub const CONFIG_ELEMENT_ID: &str = "modal-config";

pub const CLICK_EVENT: &str = "click";
pub const DOM_CONTENT_LOADED: &str = "DOMContentLoaded";
