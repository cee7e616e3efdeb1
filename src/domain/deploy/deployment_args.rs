use serde::Serialize;
use serde_json::{Map, Value};

/// Semantic impact of a push, inferred from commit message markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Patch,
    Minor,
    Major,
}

/// The fully resolved record posted to the orchestration service.
///
/// Unset optional fields are left out of the JSON body entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentArgs {
    pub app: String,
    pub environment: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_type: Option<ChangeType>,
    /// Unrecognized input keys, forwarded as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_optionals_are_omitted() {
        let args = DeploymentArgs {
            app: "myApp".to_string(),
            environment: "test".to_string(),
            branch: "master".to_string(),
            tag: Some("myapp@1.0.0".to_string()),
            sha: None,
            cluster: None,
            domain: None,
            change_type: Some(ChangeType::Minor),
            extra: Map::new(),
        };

        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({
                "app": "myApp",
                "environment": "test",
                "branch": "master",
                "tag": "myapp@1.0.0",
                "changeType": "minor"
            })
        );
    }

    #[test]
    fn extra_keys_are_flattened_into_body() {
        let mut extra = Map::new();
        extra.insert("replicas".to_string(), json!(3));
        let args = DeploymentArgs {
            app: "myApp".to_string(),
            environment: "test".to_string(),
            branch: "main".to_string(),
            tag: None,
            sha: Some("abc".to_string()),
            cluster: None,
            domain: None,
            change_type: None,
            extra,
        };

        let body = serde_json::to_value(&args).unwrap();
        assert_eq!(body["replicas"], json!(3));
        assert!(body.get("changeType").is_none());
    }
}
