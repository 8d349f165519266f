//! The page behaviours. Each is independent and only talks to the page, the
//! host and the runtime through [`UiContext`](crate::dispatcher::UiContext).

pub mod compact_mode;
pub mod masonry;
pub mod notifications;
pub mod rename;
pub mod scroll_memory;
pub mod wallpaper_modal;

pub use compact_mode::CompactModeDetector;
pub use masonry::MasonryLayout;
pub use notifications::NotificationPanel;
pub use rename::RenameAction;
pub use scroll_memory::ScrollMemory;
pub use wallpaper_modal::WallpaperModal;

/// Ids and classes the server-rendered markup provides.
pub mod markup {
    pub const NOTIFICATION_BELL: &str = "notificationBell";
    pub const NOTIFICATION_DROPDOWN: &str = "notificationDropdown";
    pub const NOTIFICATION_COUNT: &str = "notificationCount";
    pub const MARK_ALL_READ: &str = "mark-all-read";
    pub const NOTIFICATION_ITEM: &str = "notification-item";
    pub const UNREAD: &str = "unread";
    pub const SHOW: &str = "show";

    pub const RENAME_BUTTON: &str = "rename-button";
    pub const WALLPAPER_CARD: &str = "wallpaper-card";
    pub const WALLPAPER_IMAGE: &str = "wallpaper-image";
    pub const WALLPAPER_IMAGE_CONTAINER: &str = "wallpaper-image-container";
    pub const COMPACT_MODE: &str = "compact-mode";
    pub const SPELL_GRID: &str = "spell-grid";

    pub const WALLPAPER_MODAL: &str = "wallpaperModal";
    pub const MODAL_IMAGE: &str = "modalImage";
    pub const MODAL_IMAGE_TITLE: &str = "modalImageTitle";
    pub const MODAL_IMAGE_DATE: &str = "modalImageDate";
    pub const COMMENTS_LIST: &str = "commentsList";
    pub const COMMENT_FORM: &str = "commentForm";
    pub const COMMENT_TEXT: &str = "commentText";
    pub const CHAR_COUNT: &str = "charCount";
    pub const ACTIVE: &str = "active";
}
