use serde::{Deserialize, Serialize};

/// One entry scraped from the portal's listing page.
///
/// Every record that leaves the extractor has a non-empty `title` and an
/// absolute `link`; `press` and `time` stay empty when the markup does not
/// carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Portal article id, taken from the link's `aid` query parameter.
    /// Empty when the link does not carry one.
    pub aid: String,
    pub title: String,
    pub link: String,
    pub press: String,
    pub time: String,
}

impl ArticleRecord {
    /// Identity key used by the API and the watch loop: the article id when
    /// the portal gave us one, the link otherwise.
    pub fn identity_key(&self) -> &str {
        if self.aid.is_empty() {
            &self.link
        } else {
            &self.aid
        }
    }
}

/// A registered user. Kept in memory only; the password is stored as
/// received and never serialized back out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub nickname: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_key_prefers_aid() {
        let record = ArticleRecord {
            aid: "0001".to_string(),
            title: "Title".to_string(),
            link: "https://news.naver.com/read.naver?aid=0001".to_string(),
            press: String::new(),
            time: String::new(),
        };
        assert_eq!(record.identity_key(), "0001");
    }

    #[test]
    fn identity_key_falls_back_to_link() {
        let record = ArticleRecord {
            aid: String::new(),
            title: "Title".to_string(),
            link: "https://news.naver.com/read.naver".to_string(),
            press: String::new(),
            time: String::new(),
        };
        assert_eq!(record.identity_key(), "https://news.naver.com/read.naver");
    }

    #[test]
    fn password_is_not_serialized() {
        let user = UserRecord {
            email: "a@b.com".to_string(),
            nickname: "a".to_string(),
            password: "secret".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }
}
