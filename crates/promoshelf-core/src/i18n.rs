//! User-visible strings.
//!
//! Thai is the site's native language and the default; English exists for
//! development and for the terminal host.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Thai,
    English,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    /// Label of the chip that shows every tag.
    pub all_tags: &'static str,
    pub no_saved: &'static str,
    pub no_matches: &'static str,
    pub prev_page: &'static str,
    pub next_page: &'static str,
    pub title_label: &'static str,
    pub details_label: &'static str,
    pub save: &'static str,
    pub unsave: &'static str,
    pub link_copied: &'static str,
    pub copy_manually: &'static str,
}

const THAI: Strings = Strings {
    all_tags: "ทั้งหมด",
    no_saved: "ไม่มีรายการที่บันทึก",
    no_matches: "ไม่พบรายการ",
    prev_page: "ก่อนหน้า",
    next_page: "ถัดไป",
    title_label: "ชื่อ",
    details_label: "รายละเอียดเต็มของโปร",
    save: "บันทึก",
    unsave: "ลบรายการ",
    link_copied: "คัดลอกลิงก์แล้ว",
    copy_manually: "คัดลอกลิงก์ด้วยตนเอง:",
};

const ENGLISH: Strings = Strings {
    all_tags: "All",
    no_saved: "No saved items",
    no_matches: "No matches found",
    prev_page: "Previous",
    next_page: "Next",
    title_label: "Title",
    details_label: "Full promotion details",
    save: "Save",
    unsave: "Remove",
    link_copied: "Link copied",
    copy_manually: "Copy the link manually:",
};

impl Locale {
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::Thai => &THAI,
            Locale::English => &ENGLISH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_serde_names() {
        assert_eq!(serde_json::to_string(&Locale::English).unwrap(), "\"english\"");
        let l: Locale = serde_json::from_str("\"thai\"").unwrap();
        assert_eq!(l, Locale::Thai);
    }

    #[test]
    fn test_empty_messages_differ() {
        for locale in [Locale::Thai, Locale::English] {
            let s = locale.strings();
            assert_ne!(s.no_saved, s.no_matches);
        }
    }
}
