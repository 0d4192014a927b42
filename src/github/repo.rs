//! Repository listed on the source account
use serde::Deserialize;

/// Repository of the source account
#[derive(Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct SourceRepository {
    /// Repository name
    pub name: String,

    /// Address the destination clones from
    pub clone_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_extra_fields() {
        let repos: Vec<SourceRepository> = serde_json::from_str(
            r#"[{"id": 1, "name": "repo1", "fork": false, "clone_url": "https://github.com/alice/repo1.git"}]"#,
        )
        .unwrap();
        assert_eq!(
            repos,
            vec![SourceRepository {
                name: "repo1".into(),
                clone_url: "https://github.com/alice/repo1.git".into(),
            }]
        );
    }
}
