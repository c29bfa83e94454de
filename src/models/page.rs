//! List response envelope
//!
//! The backend answers collection reads either with a bare JSON array or with
//! a paginated object (`data` or `items`, plus `total`/`page`). Both decode
//! into `Page<T>`.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRepr<T> {
    Bare(Vec<T>),
    Paged {
        #[serde(alias = "data")]
        items: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
        #[serde(default)]
        page: Option<u32>,
    },
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PageRepr::deserialize(deserializer)? {
            PageRepr::Bare(items) => Page {
                total: Some(items.len() as u64),
                items,
                page: None,
            },
            PageRepr::Paged { items, total, page } => Page { items, total, page },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let page: Page<u32> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total, Some(3));
        assert_eq!(page.page, None);
    }

    #[test]
    fn test_paged_object_with_data_alias() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"data": [4], "total": 40, "page": 2}"#).unwrap();
        assert_eq!(page.items, vec![4]);
        assert_eq!(page.total, Some(40));
        assert_eq!(page.page, Some(2));
    }

    #[test]
    fn test_paged_object_with_items() {
        let page: Page<u32> = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total, None);
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(serde_json::from_str::<Page<u32>>(r#"{"rows": [1]}"#).is_err());
    }
}
