//! Request Builder: one outbound HTTP request per batch, no I/O.

use reqwest::header::CONTENT_TYPE;

use crate::error::{DatasourceError, Result};
use crate::models::DatasourceSettings;
use crate::wire::OutboundQuery;

/// Assembles the POST to `<base_url>/query`.
///
/// Serializes `query` as the request body, sets the JSON content type and,
/// when the settings enable it, HTTP Basic credentials. Returns the fully
/// formed request without sending it.
pub fn build_request(
    client: &reqwest::Client,
    base_url: &str,
    query: &OutboundQuery,
    settings: &DatasourceSettings,
) -> Result<reqwest::Request> {
    let url = format!("{}/query", base_url);

    let body = serde_json::to_vec(query)?;

    let mut builder = client
        .post(&url)
        .header(CONTENT_TYPE, "application/json")
        .body(body);

    if settings.basic_auth {
        builder = builder.basic_auth(
            &settings.basic_auth_user,
            Some(&settings.basic_auth_password),
        );
    }

    builder
        .build()
        .map_err(|e| DatasourceError::RequestBuild(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TargetQuery, TimeRange};
    use crate::wire::QueryTarget;
    use pretty_assertions::assert_eq;

    fn query_with_targets(targets: &[&str]) -> OutboundQuery {
        let mut query = OutboundQuery::new(&TimeRange {
            from: "now-6h".to_string(),
            to: "now".to_string(),
        });
        for (i, target) in targets.iter().enumerate() {
            query.targets.push(QueryTarget::from(&TargetQuery {
                target: target.to_string(),
                ref_id: format!("{}", (b'A' + i as u8) as char),
                query_type: "timeserie".to_string(),
                datasource_url: "http://backend:3333".to_string(),
            }));
        }
        query
    }

    #[test]
    fn appends_query_suffix_and_content_type() {
        let client = reqwest::Client::new();
        let query = query_with_targets(&["cpu"]);
        let req = build_request(
            &client,
            "http://backend:3333",
            &query,
            &DatasourceSettings::default(),
        )
        .unwrap();

        assert_eq!(req.method(), reqwest::Method::POST);
        assert_eq!(req.url().as_str(), "http://backend:3333/query");
        assert_eq!(
            req.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn body_preserves_target_order_and_length() {
        let client = reqwest::Client::new();
        let query = query_with_targets(&["cpu", "mem", "disk"]);
        let req = build_request(
            &client,
            "http://backend:3333",
            &query,
            &DatasourceSettings::default(),
        )
        .unwrap();

        let body = req.body().unwrap().as_bytes().unwrap();
        let decoded: OutboundQuery = serde_json::from_slice(body).unwrap();
        assert_eq!(decoded.targets.len(), 3);
        let names: Vec<&str> = decoded.targets.iter().map(|t| t.target.as_str()).collect();
        assert_eq!(names, vec!["cpu", "mem", "disk"]);
        assert_eq!(decoded.format, "json");
    }

    #[test]
    fn attaches_basic_auth_when_enabled() {
        let client = reqwest::Client::new();
        let query = query_with_targets(&["cpu"]);
        let settings = DatasourceSettings {
            basic_auth: true,
            basic_auth_user: "grafana".to_string(),
            basic_auth_password: "secret".to_string(),
            timeout_secs: 0,
        };
        let req = build_request(&client, "http://backend:3333", &query, &settings).unwrap();

        let auth = req
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .expect("authorization header");
        assert!(auth.to_str().unwrap().starts_with("Basic "));
    }

    #[test]
    fn no_auth_header_when_disabled() {
        let client = reqwest::Client::new();
        let query = query_with_targets(&["cpu"]);
        let req = build_request(
            &client,
            "http://backend:3333",
            &query,
            &DatasourceSettings::default(),
        )
        .unwrap();
        assert!(req.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn malformed_url_is_a_build_error() {
        let client = reqwest::Client::new();
        let query = query_with_targets(&["cpu"]);
        let err = build_request(&client, "not a url", &query, &DatasourceSettings::default())
            .unwrap_err();
        assert!(matches!(err, DatasourceError::RequestBuild(_)));
    }
}
