use kernel::Category;

/// One classification rule: the extensions and declared MIME types a
/// category accepts. Both sets must hit for the rule to match.
struct CategoryRule {
    category: Category,
    extensions: &'static [&'static str],
    mime_types: &'static [&'static str],
}

/// Rules are checked in this order, first full match wins.
const RULES: [CategoryRule; 3] = [
    CategoryRule {
        category: Category::Image,
        extensions: &["jpg", "jpeg", "png", "gif"],
        mime_types: &["image/jpeg", "image/png", "image/gif"],
    },
    CategoryRule {
        category: Category::Audio,
        extensions: &["mp3", "m4a", "wav"],
        mime_types: &["audio/mpeg"],
    },
    CategoryRule {
        category: Category::Video,
        extensions: &["mp4", "webm"],
        mime_types: &["video/mp4"],
    },
];

/// Maps (file name, declared MIME type) pairs onto media categories.
///
/// The rule tables are fixed at construction, there is no runtime
/// registration and no I/O.
pub struct Classifier {
    rules: &'static [CategoryRule],
}

impl Default for Classifier {
    fn default() -> Self {
        Self { rules: &RULES }
    }
}

impl Classifier {
    /// Returns the first category whose extension set and MIME type set
    /// both accept the file, or `Category::Other` when none does. The two
    /// checks are independent but must hit the same category, so e.g. a
    /// `.wav` file declared as `audio/mpeg` is rejected.
    #[must_use]
    pub fn classify(&self, file_name: &str, mime_type: &str) -> Category {
        let ext = extension(file_name);
        self.rules
            .iter()
            .find(|r| r.extensions.contains(&ext.as_str()) && r.mime_types.contains(&mime_type))
            .map_or(Category::Other, |r| r.category)
    }
}

/// Extension after the last dot, lower-cased. Empty when there is no dot.
#[must_use]
pub fn extension(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(ix) => file_name[ix + 1..].to_lowercase(),
        None => String::new(),
    }
}
