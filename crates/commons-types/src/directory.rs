use serde::{Deserialize, Serialize};

/// Flat record exposed by the directory read API.
///
/// This is a deliberate allow-list: identifier, name, live member count, and
/// (groups only) the absolute canonical URL. No other group or skill
/// attributes leave through this read path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: String,
    pub name: String,
    pub number_of_members: i64,
    /// Absolute canonical URL; present for groups, absent for skills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One page of directory results plus the pagination totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryPage {
    pub entries: Vec<DirectoryEntry>,
    /// Total matching records across all pages (live count, not cached).
    pub total_count: i64,
    pub page: u32,
    pub page_size: u32,
}

impl DirectoryPage {
    /// Number of pages needed for `total_count` at this page size.
    pub fn total_pages(&self) -> u32 {
        if self.total_count <= 0 || self.page_size == 0 {
            return 0;
        }
        (self.total_count as u64).div_ceil(self.page_size as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_url_omitted_when_none() {
        let entry = DirectoryEntry {
            id: "x".to_string(),
            name: "Rust".to_string(),
            number_of_members: 3,
            url: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("url"));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = DirectoryPage {
            entries: Vec::new(),
            total_count: 41,
            page: 1,
            page_size: 20,
        };
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_total_pages_empty() {
        let page = DirectoryPage {
            entries: Vec::new(),
            total_count: 0,
            page: 1,
            page_size: 20,
        };
        assert_eq!(page.total_pages(), 0);
    }
}
