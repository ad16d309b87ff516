use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ESearchResult {
    pub esearchresult: ESearchData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ESearchData {
    #[serde(default, rename = "ERROR")]
    pub error: Option<String>,
    #[serde(default)]
    pub idlist: Vec<String>,
}

/// ESummary returns a JSON object with "result" containing a "uids" array and
/// per-UID objects. The dynamic per-UID keys are handled via serde_json::Value
/// and parsed manually.
#[derive(Debug, Deserialize)]
pub(crate) struct ESummaryResponse {
    pub result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ESummaryDocSum {
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub authors: Vec<ESummaryAuthor>,
    #[serde(default)]
    pub pubdate: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub pages: String,
    #[serde(default)]
    pub articleids: Vec<ESummaryArticleId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ESummaryAuthor {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ESummaryArticleId {
    pub idtype: String,
    #[serde(default)]
    pub value: String,
}
