use serde::{Deserialize, Serialize};

/// One delivery record as returned by the mail server listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailRecord {
    pub id: i64,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub status: String,
    pub result: String,
    pub eml: Option<String>,
    #[serde(alias = "putTime")]
    pub put_time: Option<String>,
    #[serde(alias = "processedTime")]
    pub processed_time: Option<String>,
    pub source: String,
}

impl MailRecord {
    pub fn has_eml(&self) -> bool {
        self.eml.as_deref().is_some_and(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub count: u64,
}

/// Response body of the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailPage {
    #[serde(default)]
    pub body: Vec<MailRecord>,
    #[serde(default)]
    pub meta: PageMeta,
}
